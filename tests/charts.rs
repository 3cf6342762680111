use tabular_glance::charts::{
    build_chart, BarAggregate, ChartKind, ChartRequest, ChartSeries, PIE_MAX_SLICES,
};
use tabular_glance::ingestion::load_and_clean;
use tabular_glance::types::CleanedTable;
use tabular_glance::ChartError;

fn table(csv: &str) -> CleanedTable {
    load_and_clean(csv.as_bytes(), "t.csv").unwrap().0
}

fn sales() -> CleanedTable {
    table(
        "city,units,price,tier\n\
         Lima,3,2.0,a\n\
         Quito,5,4.0,b\n\
         Lima,7,6.0,a\n\
         Cusco,1,8.5,c\n\
         Quito,9,1.0,b\n",
    )
}

#[test]
fn heatmap_needs_two_numeric_columns() {
    let t = table("name,x\na,1\nb,2\n");
    let err = build_chart(&t, &ChartRequest::new(ChartKind::CorrelationHeatmap)).unwrap_err();
    assert_eq!(err, ChartError::InsufficientNumericColumns { found: 1 });
}

#[test]
fn heatmap_is_symmetric_with_unit_diagonal() {
    let t = table("x,y,label\n1,2,a\n2,3,b\n3,5,c\n4,4,d\n");
    let ChartSeries::CorrelationHeatmap(m) =
        build_chart(&t, &ChartRequest::new(ChartKind::CorrelationHeatmap)).unwrap()
    else {
        panic!("expected heatmap");
    };
    assert_eq!(m.columns, vec!["x", "y"]);
    assert_eq!(m.get(0, 0), Some(1.0));
    assert_eq!(m.get(1, 1), Some(1.0));
    assert_eq!(m.get(0, 1), m.get(1, 0));
    let r = m.between("x", "y").unwrap();
    assert!((r - 0.8).abs() < 1e-12, "{r}");
}

fn heatmap_of(csv: &str) -> Vec<Vec<Option<f64>>> {
    match build_chart(&table(csv), &ChartRequest::new(ChartKind::CorrelationHeatmap)).unwrap() {
        ChartSeries::CorrelationHeatmap(m) => m.values,
        other => panic!("expected heatmap, got {other:?}"),
    }
}

#[test]
fn heatmap_handles_tiny_and_huge_magnitudes() {
    let tiny = heatmap_of("a,b\n1e-9,2e-9\n2e-9,4e-9\n3e-9,7e-9\n");
    assert_eq!(tiny[0][0], Some(1.0));
    assert_eq!(tiny[1][1], Some(1.0));
    let r = tiny[0][1].unwrap();
    assert!((r - 5.0 / (2.0_f64 * 114.0 / 9.0).sqrt()).abs() < 1e-12, "{r}");
    assert_eq!(tiny[0][1], tiny[1][0]);

    let huge = heatmap_of("a,b\n1e160,2e-9\n2e160,4e-9\n3e160,7e-9\n");
    assert_eq!(huge[0][0], Some(1.0));
    assert_eq!(huge[1][1], Some(1.0));
    let r = huge[0][1].unwrap();
    assert!((r - 5.0 / (2.0_f64 * 114.0 / 9.0).sqrt()).abs() < 1e-12, "{r}");
}

#[test]
fn heatmap_constant_column_is_undefined() {
    let v = heatmap_of("a,b\n0.1,1\n0.1,2\n0.1,3\n");
    assert_eq!(v[0][0], None);
    assert_eq!(v[0][1], None);
    assert_eq!(v[1][1], Some(1.0));
}

#[test]
fn heatmap_ignores_selected_columns() {
    let req = ChartRequest::new(ChartKind::CorrelationHeatmap).with_x("city");
    assert!(build_chart(&sales(), &req).is_ok());
}

#[test]
fn non_heatmap_kinds_require_column_x() {
    for kind in [
        ChartKind::BoxPlot,
        ChartKind::PieChart,
        ChartKind::ScatterPlot,
        ChartKind::BarChart,
    ] {
        let err = build_chart(&sales(), &ChartRequest::new(kind).with_y("units")).unwrap_err();
        assert_eq!(err, ChartError::MissingSelection { kind });
    }
}

#[test]
fn unknown_columns_are_rejected() {
    let err = build_chart(&sales(), &ChartRequest::new(ChartKind::BoxPlot).with_x("nope")).unwrap_err();
    assert_eq!(err, ChartError::UnknownColumn { column: "nope".to_string() });

    let req = ChartRequest::new(ChartKind::BarChart).with_x("city").with_y("nope");
    assert_eq!(
        build_chart(&sales(), &req).unwrap_err(),
        ChartError::UnknownColumn { column: "nope".to_string() }
    );
}

#[test]
fn box_plot_carries_values_and_quartiles() {
    let ChartSeries::BoxPlot(b) =
        build_chart(&sales(), &ChartRequest::new(ChartKind::BoxPlot).with_x("units")).unwrap()
    else {
        panic!("expected box plot");
    };
    assert_eq!(b.values, vec![3.0, 5.0, 7.0, 1.0, 9.0]);
    let stats = b.stats.unwrap();
    assert_eq!((stats.min, stats.q1, stats.median, stats.q3, stats.max), (1.0, 3.0, 5.0, 7.0, 9.0));
    assert!(stats.outliers.is_empty());
}

#[test]
fn box_plot_of_text_column_is_rejected() {
    let err = build_chart(&sales(), &ChartRequest::new(ChartKind::BoxPlot).with_x("city")).unwrap_err();
    assert!(matches!(err, ChartError::NonNumericColumn { .. }));
}

#[test]
fn pie_keeps_ten_most_frequent_of_fifteen() {
    // Category cN appears N times, for N in 1..=15.
    let mut csv = String::from("cat,n\n");
    for n in 1..=15 {
        for i in 0..n {
            csv.push_str(&format!("c{n},{i}\n"));
        }
    }
    let t = table(&csv);
    let ChartSeries::PieChart(p) =
        build_chart(&t, &ChartRequest::new(ChartKind::PieChart).with_x("cat")).unwrap()
    else {
        panic!("expected pie");
    };
    assert_eq!(p.slices.len(), PIE_MAX_SLICES);
    let labels: Vec<&str> = p.slices.iter().map(|s| s.label.as_str()).collect();
    let expected: Vec<String> = (6..=15).rev().map(|n| format!("c{n}")).collect();
    assert_eq!(labels, expected);
    let total_share: f64 = p.slices.iter().map(|s| s.share).sum();
    assert!((total_share - 1.0).abs() < 1e-9);
}

#[test]
fn pie_ties_keep_first_appearance_and_numbers_render_plainly() {
    let t = table("n,k\n2,a\n1,b\n2,c\n1,d\n3,e\n");
    let ChartSeries::PieChart(p) =
        build_chart(&t, &ChartRequest::new(ChartKind::PieChart).with_x("n")).unwrap()
    else {
        panic!("expected pie");
    };
    let got: Vec<(&str, usize)> = p.slices.iter().map(|s| (s.label.as_str(), s.count)).collect();
    assert_eq!(got, vec![("2", 2), ("1", 2), ("3", 1)]);
}

#[test]
fn pie_on_empty_table_is_empty_category() {
    let t = table("cat\n");
    let err = build_chart(&t, &ChartRequest::new(ChartKind::PieChart).with_x("cat")).unwrap_err();
    assert_eq!(err, ChartError::EmptyCategory { column: "cat".to_string() });
}

#[test]
fn scatter_requires_numeric_columns() {
    let err = build_chart(&sales(), &ChartRequest::new(ChartKind::ScatterPlot).with_x("city")).unwrap_err();
    assert_eq!(
        err,
        ChartError::NonNumericColumn {
            kind: ChartKind::ScatterPlot,
            column: "city".to_string()
        }
    );

    let req = ChartRequest::new(ChartKind::ScatterPlot).with_x("units").with_y("tier");
    assert!(matches!(
        build_chart(&sales(), &req).unwrap_err(),
        ChartError::NonNumericColumn { column, .. } if column == "tier"
    ));
}

#[test]
fn scatter_pairs_values_or_uses_row_position() {
    let req = ChartRequest::new(ChartKind::ScatterPlot).with_x("units").with_y("price");
    let ChartSeries::ScatterPlot(s) = build_chart(&sales(), &req).unwrap() else {
        panic!("expected scatter");
    };
    assert_eq!(s.y_column.as_deref(), Some("price"));
    assert_eq!((s.points[0].x, s.points[0].y), (3.0, 2.0));

    let req = ChartRequest::new(ChartKind::ScatterPlot).with_x("units");
    let ChartSeries::ScatterPlot(s) = build_chart(&sales(), &req).unwrap() else {
        panic!("expected scatter");
    };
    let ys: Vec<f64> = s.points.iter().map(|p| p.y).collect();
    assert_eq!(ys, vec![0.0, 1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn bar_counts_text_categories_in_first_appearance_order() {
    let ChartSeries::BarChart(b) =
        build_chart(&sales(), &ChartRequest::new(ChartKind::BarChart).with_x("city")).unwrap()
    else {
        panic!("expected bar");
    };
    assert_eq!(b.aggregate, BarAggregate::Count);
    let got: Vec<(&str, f64)> = b.bars.iter().map(|b| (b.label.as_str(), b.value)).collect();
    assert_eq!(got, vec![("Lima", 2.0), ("Quito", 2.0), ("Cusco", 1.0)]);
}

#[test]
fn bar_with_y_averages_per_category() {
    let req = ChartRequest::new(ChartKind::BarChart).with_x("city").with_y("units");
    let ChartSeries::BarChart(b) = build_chart(&sales(), &req).unwrap() else {
        panic!("expected bar");
    };
    assert_eq!(b.aggregate, BarAggregate::Mean);
    let got: Vec<(&str, f64)> = b.bars.iter().map(|b| (b.label.as_str(), b.value)).collect();
    assert_eq!(got, vec![("Lima", 5.0), ("Quito", 7.0), ("Cusco", 1.0)]);
}

#[test]
fn bar_with_numeric_x_is_sorted_and_text_y_rejected() {
    let t = table("size,w,tag\n3,1,a\n1,2,b\n2,3,c\n1,4,d\n");
    let ChartSeries::BarChart(b) =
        build_chart(&t, &ChartRequest::new(ChartKind::BarChart).with_x("size")).unwrap()
    else {
        panic!("expected bar");
    };
    let labels: Vec<&str> = b.bars.iter().map(|b| b.label.as_str()).collect();
    assert_eq!(labels, vec!["1", "2", "3"]);

    let req = ChartRequest::new(ChartKind::BarChart).with_x("size").with_y("tag");
    assert!(matches!(
        build_chart(&t, &req).unwrap_err(),
        ChartError::NonNumericColumn { .. }
    ));
}

#[test]
fn series_serialize_with_kind_tag() {
    let series = build_chart(&sales(), &ChartRequest::new(ChartKind::PieChart).with_x("tier")).unwrap();
    let json = serde_json::to_value(&series).unwrap();
    assert_eq!(json["kind"], "pie_chart");
    assert_eq!(json["column"], "tier");
    assert_eq!(json["slices"][0]["label"], "a");
    assert_eq!(json["slices"][0]["count"], 2);
}

#[test]
fn request_from_ui_strings() {
    let req = ChartRequest::from_selection("scatter plot", Some("units"), None).unwrap();
    assert!(build_chart(&sales(), &req).is_ok());

    let err = ChartRequest::from_selection("violin", Some("units"), None).unwrap_err();
    assert_eq!(err.to_string(), "unknown chart kind 'violin'");
}
