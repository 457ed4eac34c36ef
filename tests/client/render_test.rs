#[path = "../support/mod.rs"]
mod support;

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use condo_reports::client::render::{
        export_filename, filters_summary, render_csv, render_table, NO_ROWS,
    };
    use insta::assert_snapshot;
    use serde_json::json;

    use super::support::{record, sample_rows};

    #[test]
    fn test_table_title_cases_headers_and_blanks_nulls() {
        assert_snapshot!(render_table(&sample_rows()), @r"
        Property Id  Property Name  Ytd Spend
        -----------  -------------  ---------
        12           Harbour View   1200.50
        12           Harbour View
        ");
    }

    #[test]
    fn test_table_uses_first_row_columns() {
        let rows = vec![
            record(json!({ "a": 1, "b": "x" })),
            record(json!({ "b": "y", "c": true })),
        ];
        let table = render_table(&rows);
        let header = table.lines().next().unwrap();
        assert_eq!(header, "A  B");
        assert_eq!(table.lines().last().unwrap(), "   y");
    }

    #[test]
    fn test_empty_rows() {
        assert_eq!(render_table(&[]), NO_ROWS);
        assert_eq!(render_csv(&[]).unwrap(), "");
    }

    #[test]
    fn test_csv_keeps_raw_headers() {
        let rows = vec![record(json!({ "property_name": "Smith, Jones & Co", "open_projects": 2 }))];
        assert_snapshot!(render_csv(&rows).unwrap(), @r#"
        property_name,open_projects
        "Smith, Jones & Co",2
        "#);
    }

    #[test]
    fn test_csv_quotes_embedded_quotes_and_commas() {
        let rows = vec![
            record(json!({ "vendor": "Acme \"Roofing\", Ltd", "note": null })),
            record(json!({ "vendor": "Plain", "note": "line one\nline two" })),
        ];
        let csv = render_csv(&rows).unwrap();
        let lines: Vec<_> = csv.lines().collect();
        assert_eq!(lines[0], "vendor,note");
        assert_eq!(lines[1], r#""Acme ""Roofing"", Ltd","#);
        assert_eq!(lines[2], r#"Plain,"line one"#);
        assert_eq!(lines[3], r#"line two""#);
    }

    #[test]
    fn test_filters_summary() {
        assert_eq!(filters_summary(&[]), None);
        let applied = vec![
            ("property_id".to_string(), "4".to_string()),
            ("board_member_id".to_string(), "2".to_string()),
        ];
        assert_eq!(
            filters_summary(&applied).unwrap(),
            "Filters: property_id=4  |  board_member_id=2"
        );
    }

    #[test]
    fn test_export_filename() {
        let at = NaiveDate::from_ymd_opt(2024, 3, 7)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(
            export_filename("Property Summary (YTD)", "csv", at),
            "property-summary-ytd_2024-03-07_0905.csv"
        );
        assert_eq!(export_filename("!!!", "txt", at), "report_2024-03-07_0905.txt");

        let long = "x".repeat(80);
        let name = export_filename(&long, "json", at);
        assert_eq!(name, format!("{}_2024-03-07_0905.json", "x".repeat(60)));
    }
}
