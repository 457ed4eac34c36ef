#[cfg(test)]
mod tests {
    use condo_reports::catalog::{CatalogError, ReportDefinition};
    use condo_reports::config::Provider;
    use condo_reports::{ReportCatalog, Role};

    #[test]
    fn test_builtin_catalog_ids_in_order() {
        let catalog = ReportCatalog::builtin();
        let ids: Vec<_> = catalog.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "manager_open_projects_detailed",
                "manager_vendor_quotes_detail",
                "manager_property_summary",
                "board_pending_approvals_summary",
                "board_member_pending_approvals",
                "board_capital_spend_summary_ytd",
            ]
        );
    }

    #[test]
    fn test_builtin_catalog_is_valid() {
        let reports: Vec<ReportDefinition> = ReportCatalog::builtin().iter().cloned().collect();
        assert!(ReportCatalog::new(reports).is_ok());
    }

    #[test]
    fn test_list_for_role_matches_permits() {
        let catalog = ReportCatalog::builtin();
        for role in Role::ALL {
            let visible: Vec<_> = catalog.list_for_role(role).iter().map(|r| r.id.clone()).collect();
            let expected: Vec<_> = catalog
                .iter()
                .filter(|r| r.allowed_roles.contains(&role))
                .map(|r| r.id.clone())
                .collect();
            assert_eq!(visible, expected, "role {}", role);
        }
    }

    #[test]
    fn test_visibility_per_role() {
        let catalog = ReportCatalog::builtin();
        assert_eq!(catalog.list_for_role(Role::Admin).len(), catalog.len());
        assert_eq!(catalog.list_for_role(Role::Manager).len(), 3);
        assert_eq!(catalog.list_for_role(Role::Board).len(), 3);
        assert!(catalog.list_for_role(Role::Resident).is_empty());
    }

    #[test]
    fn test_every_builtin_report_has_mysql_view_only() {
        for report in ReportCatalog::builtin().iter() {
            let view = report.view_for(Provider::MySql).unwrap();
            assert_eq!(view, format!("vw_{}", report.id));
            assert_eq!(report.view_for(Provider::Mongo), None);
        }
    }

    #[test]
    fn test_board_member_report_filters() {
        let catalog = ReportCatalog::builtin();
        let report = catalog.lookup("board_member_pending_approvals").unwrap();
        assert_eq!(report.filters, vec!["board_member_id", "property_id"]);
        assert!(catalog.lookup("nope").is_none());
    }

    #[test]
    fn test_summary_hides_view_names() {
        let catalog = ReportCatalog::builtin();
        let summary = catalog.lookup("manager_property_summary").unwrap().summary();
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": "manager_property_summary",
                "title": "Property Summary (YTD)",
                "roles": ["manager", "admin"],
                "filters": ["property_id"],
            })
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let report = ReportDefinition::new("dup", "Dup")
            .roles(&[Role::Admin])
            .mysql_view("vw_dup");
        let err = ReportCatalog::new(vec![report.clone(), report]).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "dup"));
    }

    #[test]
    fn test_invalid_view_name_rejected() {
        let report = ReportDefinition::new("bad", "Bad")
            .roles(&[Role::Admin])
            .mysql_view("vw_bad; DROP TABLE user");
        let err = ReportCatalog::new(vec![report]).unwrap_err();
        assert!(matches!(err, CatalogError::InvalidIdentifier { .. }));
    }

    #[test]
    fn test_report_without_roles_rejected() {
        let report = ReportDefinition::new("orphan", "Orphan").mysql_view("vw_orphan");
        let err = ReportCatalog::new(vec![report]).unwrap_err();
        assert!(matches!(err, CatalogError::NoRoles { .. }));
    }
}
