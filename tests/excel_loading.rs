#![cfg(feature = "excel_test_writer")]

use rust_xlsxwriter::Workbook;

use tabular_glance::ingestion::{load_and_clean, load_and_clean_with_options, ExcelSheetSelection, LoadOptions};
use tabular_glance::types::{DataType, Value};
use tabular_glance::LoadError;

/// Two sheets; "Orders" has a blank row on top, a missing cell, a duplicate and a mixed column.
fn orders_xlsx() -> Vec<u8> {
    let mut wb = Workbook::new();

    let ws = wb.add_worksheet();
    ws.set_name("Orders").unwrap();
    // Row 0 left empty: the header is the first non-empty row.
    ws.write_string(1, 0, "region").unwrap();
    ws.write_string(1, 1, "units").unwrap();
    ws.write_string(1, 2, "code").unwrap();
    ws.write_string(1, 3, "paid").unwrap();

    ws.write_string(2, 0, "north").unwrap();
    ws.write_number(2, 1, 3).unwrap();
    ws.write_number(2, 2, 10).unwrap();
    ws.write_boolean(2, 3, true).unwrap();

    ws.write_string(3, 0, "south").unwrap();
    // units left empty -> null row
    ws.write_string(3, 2, "A7").unwrap();
    ws.write_boolean(3, 3, false).unwrap();

    ws.write_string(4, 0, "north").unwrap();
    ws.write_number(4, 1, 3).unwrap();
    ws.write_number(4, 2, 10).unwrap();
    ws.write_boolean(4, 3, true).unwrap();

    ws.write_string(5, 0, "east").unwrap();
    ws.write_string(5, 1, "4").unwrap();
    ws.write_string(5, 2, "B2").unwrap();
    ws.write_boolean(5, 3, false).unwrap();

    let other = wb.add_worksheet();
    other.set_name("Notes").unwrap();
    other.write_string(0, 0, "note").unwrap();
    other.write_string(1, 0, "hello").unwrap();

    wb.save_to_buffer().unwrap()
}

#[test]
fn xlsx_first_sheet_is_cleaned() {
    let (table, report) = load_and_clean(&orders_xlsx(), "orders.xlsx").unwrap();

    assert_eq!(report.rows_before, 4);
    assert_eq!(report.rows_removed_for_nulls, 1);
    assert_eq!(report.rows_removed_for_duplicates, 1);
    assert_eq!(table.shape(), (2, 4));

    assert_eq!(table.field("units").unwrap().data_type, DataType::Numeric);
    // 10 (number) next to "B2" (text) cannot be coerced, so the number is rendered as text.
    assert_eq!(table.field("code").unwrap().data_type, DataType::Text);
    assert_eq!(table.field("paid").unwrap().data_type, DataType::Text);
    assert_eq!(
        table.rows()[0],
        vec![
            Value::Text("north".to_string()),
            Value::Number(3.0),
            Value::Text("10".to_string()),
            Value::Text("true".to_string()),
        ]
    );
    assert_eq!(table.rows()[1][1], Value::Number(4.0));
}

#[test]
fn xlsx_named_sheet() {
    let opts = LoadOptions {
        excel_sheet_selection: ExcelSheetSelection::Sheet("Notes".to_string()),
        ..Default::default()
    };
    let (table, _) = load_and_clean_with_options(&orders_xlsx(), "orders.xlsx", &opts).unwrap();
    assert_eq!(table.rows(), &[vec![Value::Text("hello".to_string())]]);
}

#[test]
fn xlsx_missing_sheet_is_parse_failure() {
    let opts = LoadOptions {
        excel_sheet_selection: ExcelSheetSelection::Sheet("Nope".to_string()),
        ..Default::default()
    };
    let err = load_and_clean_with_options(&orders_xlsx(), "orders.xlsx", &opts).unwrap_err();
    assert!(matches!(err, LoadError::ParseFailure { .. }));
}

#[test]
fn corrupt_xlsx_is_parse_failure() {
    let err = load_and_clean(b"definitely not a zip archive", "broken.xlsx").unwrap_err();
    assert!(matches!(err, LoadError::ParseFailure { .. }));
}
