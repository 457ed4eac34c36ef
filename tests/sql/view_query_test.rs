#[cfg(test)]
mod tests {
    use condo_reports::config::Provider;
    use condo_reports::filters::{FilterMap, FilterValue};
    use condo_reports::sql::{MySql, SqlError, ViewQuery};
    use condo_reports::ReportCatalog;
    use insta::assert_snapshot;
    use sqlparser::dialect::MySqlDialect;
    use sqlparser::parser::Parser;

    fn assert_parses(sql: &str) {
        if let Err(e) = Parser::parse_sql(&MySqlDialect {}, sql) {
            panic!("Invalid SQL for MySQL: {}\nSQL: {}", e, sql);
        }
    }

    #[test]
    fn test_every_catalog_view_with_all_filters_parses() {
        for report in ReportCatalog::builtin().iter() {
            let view = report.view_for(Provider::MySql).unwrap();
            let filters: FilterMap = report
                .filters
                .iter()
                .enumerate()
                .map(|(i, key)| (key.clone(), FilterValue::Int(i as i64 + 1)))
                .collect();
            let query = ViewQuery::with_filters(view, &filters).unwrap();
            assert_eq!(query.predicate_count(), report.filters.len());
            assert_parses(&query.to_sql(&MySql));
        }
    }

    #[test]
    fn test_board_member_query() {
        let filters: FilterMap = [("board_member_id", "3"), ("property_id", "12")]
            .into_iter()
            .collect();
        let query = ViewQuery::with_filters("vw_board_member_pending_approvals", &filters).unwrap();
        assert_snapshot!(
            query.to_sql(&MySql),
            @"SELECT * FROM `vw_board_member_pending_approvals` WHERE `board_member_id` = ? AND `property_id` = ?"
        );
        let params: Vec<_> = query.params().cloned().collect();
        assert_eq!(params, vec![FilterValue::Int(3), FilterValue::Int(12)]);
    }

    #[test]
    fn test_values_never_reach_sql_text() {
        let filters: FilterMap = [("region", "north' OR '1'='1")].into_iter().collect();
        let query = ViewQuery::with_filters("vw_x", &filters).unwrap();
        let sql = query.to_sql(&MySql);
        assert!(!sql.contains("north"));
        assert_snapshot!(sql, @"SELECT * FROM `vw_x` WHERE `region` = ?");
        assert_parses(&sql);
    }

    #[test]
    fn test_float_id_kept_as_float() {
        let filters: FilterMap = [("property_id", "2.5")].into_iter().collect();
        let query = ViewQuery::with_filters("vw_x", &filters).unwrap();
        let params: Vec<_> = query.params().cloned().collect();
        assert_eq!(params, vec![FilterValue::Float(2.5)]);
    }

    #[test]
    fn test_unsafe_filter_key_rejected() {
        let filters: FilterMap = [("id` = 1 OR `1", "1")].into_iter().collect();
        let err = ViewQuery::with_filters("vw_x", &filters).unwrap_err();
        assert!(matches!(err, SqlError::InvalidIdentifier(_)));
    }
}
