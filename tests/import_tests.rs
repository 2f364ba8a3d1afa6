use chanscope::import::{parse_history_csv, ImportError};

#[test]
fn parses_required_and_optional_columns() {
    let csv = "Month,Subscribers,Views,Engagement,Retention,CTR\nJan 2026,1000,25000,4.5%,38%,5.1%\nFeb 2026,1200,31000,4.1%,40%,4.8%\n";
    let rows = parse_history_csv(csv).expect("valid csv");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].month, "Jan 2026");
    assert_eq!(rows[0].subscribers, 1_000);
    assert_eq!(rows[0].views, 25_000);
    assert_eq!(rows[0].engagement, Some(4.5));
    assert_eq!(rows[0].retention, Some(38.0));
    assert_eq!(rows[1].ctr, Some(4.8));
}

#[test]
fn header_match_is_case_insensitive_substring_and_any_order() {
    let tsv = "Total VIEWS\tmonth name\tsubscribers (end of month)\n5.5K\tMar\t300\n";
    let rows = parse_history_csv(tsv).unwrap();
    assert_eq!(rows[0].month, "Mar");
    assert_eq!(rows[0].subscribers, 300);
    assert_eq!(rows[0].views, 5_500);
    assert_eq!(rows[0].engagement, None);
}

#[test]
fn missing_subscribers_column_is_an_error() {
    let err = parse_history_csv("Month,Subs,Views\nJan,10,100").unwrap_err();
    assert_eq!(err, ImportError::MissingColumns { missing: vec!["Subscribers"] });
    assert_eq!(err.to_string(), "Header must include Month, Subscribers, Views");
}

#[test]
fn lists_every_missing_column() {
    let err = parse_history_csv("Date,Count").unwrap_err();
    assert_eq!(err, ImportError::MissingColumns { missing: vec!["Month", "Subscribers", "Views"] });
}

#[test]
fn blank_input_is_empty_error() {
    assert_eq!(parse_history_csv(""), Err(ImportError::Empty));
    assert_eq!(parse_history_csv("\n  \n"), Err(ImportError::Empty));
}

#[test]
fn short_row_reports_line_and_column() {
    let err = parse_history_csv("Month,Subscribers,Views\nJan,10,100\nFeb,20\n").unwrap_err();
    assert_eq!(err, ImportError::ShortRow { line: 3, column: "Views" });
}

#[test]
fn header_only_and_blank_rows_yield_no_points() {
    assert!(parse_history_csv("Month,Subscribers,Views\n\n").unwrap().is_empty());
}

#[test]
fn imported_point_prices_revenue_at_cpm() {
    let rows = parse_history_csv("Month,Subscribers,Views\nJan,10,20000").unwrap();
    let p = rows[0].to_historical(2.5);
    assert_eq!(p.revenue, 50.0);
    assert_eq!(p.views, 20_000);
}
