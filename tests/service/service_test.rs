#[path = "../support/mod.rs"]
mod support;

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use condo_reports::config::Provider;
    use condo_reports::filters::{FilterMap, FilterValue};
    use condo_reports::repository::MongoReportRepository;
    use condo_reports::service::ReportError;
    use condo_reports::Role;

    use super::support::{sample_rows, service_with, RecordingRepository};

    fn raw(pairs: &[(&str, &str)]) -> FilterMap {
        pairs.iter().map(|(k, v)| (*k, *v)).collect()
    }

    #[tokio::test]
    async fn test_run_whitelists_and_coerces_filters() {
        let repo = Arc::new(RecordingRepository::with_rows(sample_rows()));
        let service = service_with(repo.clone());

        let result = service
            .run(
                "manager_property_summary",
                Role::Manager,
                &raw(&[("property_id", "12"), ("unrelated", "x")]),
            )
            .await
            .unwrap();

        assert_eq!(result.report_id, "manager_property_summary");
        assert_eq!(result.title, "Property Summary (YTD)");
        assert_eq!(result.provider, Provider::MySql);
        assert_eq!(result.row_count(), 2);

        let calls = repo.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "vw_manager_property_summary");
        let expected: FilterMap = [("property_id", FilterValue::Int(12))].into_iter().collect();
        assert_eq!(calls[0].1, expected);
        assert_eq!(result.filters, expected);
    }

    #[tokio::test]
    async fn test_run_filters_follow_declared_order() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());

        service
            .run(
                "manager_vendor_quotes_detail",
                Role::Admin,
                &raw(&[("property_id", "4"), ("project_id", "9")]),
            )
            .await
            .unwrap();

        let calls = repo.calls();
        let keys: Vec<_> = calls[0].1.keys().map(str::to_string).collect();
        assert_eq!(keys, vec!["project_id", "property_id"]);
    }

    #[tokio::test]
    async fn test_run_drops_non_numeric_ids_and_blanks() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());

        service
            .run(
                "board_member_pending_approvals",
                Role::Board,
                &raw(&[("board_member_id", "abc"), ("property_id", "")]),
            )
            .await
            .unwrap();

        assert!(repo.calls()[0].1.is_empty());
    }

    #[tokio::test]
    async fn test_forbidden_role_never_reaches_repository() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());

        let err = service
            .run("manager_property_summary", Role::Resident, &FilterMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::Forbidden { role: Role::Resident, .. }));
        assert_eq!(err.public_message(), "Forbidden");
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_board_cannot_run_manager_reports() {
        let service = service_with(Arc::new(RecordingRepository::default()));
        let err = service
            .run("manager_open_projects_detailed", Role::Board, &FilterMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Forbidden { .. }));
    }

    #[tokio::test]
    async fn test_unknown_report() {
        let repo = Arc::new(RecordingRepository::default());
        let service = service_with(repo.clone());

        let err = service
            .run("does_not_exist", Role::Admin, &FilterMap::new())
            .await
            .unwrap_err();

        assert!(matches!(err, ReportError::NotFound(ref id) if id == "does_not_exist"));
        assert_eq!(err.public_message(), "Unknown report");
        assert!(repo.calls().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_execution_error() {
        let service = service_with(Arc::new(RecordingRepository::failing()));
        let err = service
            .run("board_capital_spend_summary_ytd", Role::Board, &FilterMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::Execution(_)));
        assert_eq!(err.public_message(), "Failed to run report");
    }

    #[tokio::test]
    async fn test_mongo_provider_has_no_views() {
        let service = service_with(Arc::new(MongoReportRepository::new()));
        assert_eq!(service.provider(), Provider::Mongo);

        let err = service
            .run("manager_property_summary", Role::Manager, &FilterMap::new())
            .await
            .unwrap_err();
        assert!(matches!(err, ReportError::NotImplemented(_)));
        assert_eq!(err.to_string(), "Report not available for provider: mongo");

        let options = service.filter_options().await.unwrap();
        assert!(options.properties.is_empty());
        assert!(options.board_members.is_empty());
        assert!(service.healthy().await);
    }

    #[tokio::test]
    async fn test_catalog_for_role() {
        let service = service_with(Arc::new(RecordingRepository::default()));

        let board = service.catalog_for(Role::Board);
        assert_eq!(board.provider, Provider::MySql);
        let ids: Vec<_> = board.catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "board_pending_approvals_summary",
                "board_member_pending_approvals",
                "board_capital_spend_summary_ytd",
            ]
        );
        assert!(service.catalog_for(Role::Resident).catalog.is_empty());
    }

    #[tokio::test]
    async fn test_filter_options_and_health() {
        let service = service_with(Arc::new(RecordingRepository::default()));
        let options = service.filter_options().await.unwrap();
        assert_eq!(options.properties.len(), 1);
        assert_eq!(options.board_members.len(), 1);
        assert!(service.healthy().await);

        let broken = service_with(Arc::new(RecordingRepository::failing()));
        assert!(matches!(
            broken.filter_options().await,
            Err(ReportError::Execution(_))
        ));
        assert!(!broken.healthy().await);
    }

    #[test]
    fn test_sanitize_is_idempotent() {
        let service = service_with(Arc::new(RecordingRepository::default()));
        let report = service.catalog().lookup("board_member_pending_approvals").unwrap();
        let once = raw(&[("property_id", " 7 "), ("board_member_id", "2.0"), ("x", "1")])
            .sanitize(&report.filters);
        assert_eq!(once.sanitize(&report.filters), once);
        assert_eq!(once.get("board_member_id"), Some(&FilterValue::Int(2)));
        assert_eq!(once.get("property_id"), Some(&FilterValue::Int(7)));
    }
}
