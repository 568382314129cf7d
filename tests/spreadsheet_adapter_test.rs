//! Integration tests for the health monitor workbook adapter

mod common;

use common::{at, seeded_store};
use healthx::adapters::store::HealthStore;
use healthx::config::SpreadsheetConfig;
use healthx::core::spreadsheet::{
    normalize_date, BloodPressureWorkbookAdapter, CsvWorkbook, Worksheet, WorksheetSource,
    XlsxWorkbook,
};
use healthx::domain::{ExchangeError, Result};
use std::io::Write;
use tempfile::NamedTempFile;

struct FixedSheet(Worksheet);

impl WorksheetSource for FixedSheet {
    fn first_worksheet(&self) -> Result<Worksheet> {
        Ok(self.0.clone())
    }
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

fn monitor_sheet(rows: &[&[&str]]) -> FixedSheet {
    FixedSheet(Worksheet::new(
        row(&["Date", "Systolic (mmHg)", "Diastolic (mmHg)", "Pulse (bpm)"]),
        rows.iter().map(|r| row(r)).collect(),
    ))
}

#[test]
fn test_swapped_date_is_recovered() {
    let date = normalize_date("13/02/2024 10:00", "%m/%d/%Y").unwrap();
    assert_eq!(date, at(2024, 2, 13, 0, 0).date());

    let err = normalize_date("31/31/2024 10:00", "%m/%d/%Y").unwrap_err();
    assert!(matches!(err, ExchangeError::Spreadsheet(_)));
}

#[tokio::test]
async fn test_workbook_rows_become_blood_pressure_measurements() {
    let store = seeded_store();
    let sheet = monitor_sheet(&[
        &["02/12/2024 09:30", "118", "76", "64"],
        &["13/02/2024 10:00", "121.0", "79.0", "70"],
        &["", "", "", ""],
    ]);

    let adapter = BloodPressureWorkbookAdapter::from_config(&SpreadsheetConfig::default());
    let summary = adapter.import(&sheet, 1, store.clone()).await.unwrap();

    assert_eq!(summary.record_type, "Blood Pressure");
    assert_eq!(summary.committed, 2);

    let stored = store.blood_pressures().list().await.unwrap();
    assert_eq!(stored[0].person_id, 1);
    assert_eq!(stored[0].date, at(2024, 2, 12, 0, 0));
    assert_eq!((stored[0].systolic, stored[0].diastolic), (118, 76));
    assert_eq!(stored[1].date, at(2024, 2, 13, 0, 0));
    assert_eq!((stored[1].systolic, stored[1].diastolic), (121, 79));
}

#[tokio::test]
async fn test_unparseable_date_imports_nothing() {
    let store = seeded_store();
    let sheet = monitor_sheet(&[
        &["02/12/2024 09:30", "118", "76", "64"],
        &["yesterday", "121", "79", "70"],
    ]);

    let adapter = BloodPressureWorkbookAdapter::from_config(&SpreadsheetConfig::default());
    let err = adapter.import(&sheet, 1, store.clone()).await.unwrap_err();

    assert!(matches!(err, ExchangeError::Spreadsheet(_)));
    assert!(store.blood_pressures().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_invalid_reading_is_rejected_by_the_importer() {
    let store = seeded_store();
    let sheet = monitor_sheet(&[
        &["02/12/2024 09:30", "118", "76", "64"],
        &["02/13/2024 09:30", "0", "76", "64"],
    ]);

    let adapter = BloodPressureWorkbookAdapter::from_config(&SpreadsheetConfig::default());
    let err = adapter.import(&sheet, 1, store.clone()).await.unwrap_err();

    assert_eq!(err.to_string(), "Invalid value for 'Systolic' at record 2");
    assert!(store.blood_pressures().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_unknown_person() {
    let sheet = monitor_sheet(&[]);
    let adapter = BloodPressureWorkbookAdapter::from_config(&SpreadsheetConfig::default());

    let err = adapter.import(&sheet, 42, seeded_store()).await.unwrap_err();
    assert_eq!(err.to_string(), "Person '42' not found");
}

#[tokio::test]
async fn test_dry_run_leaves_store_untouched() {
    let store = seeded_store();
    let sheet = monitor_sheet(&[&["02/12/2024 09:30", "118", "76", "64"]]);

    let adapter = BloodPressureWorkbookAdapter::from_config(&SpreadsheetConfig::default())
        .with_dry_run(true);
    let summary = adapter.import(&sheet, 2, store.clone()).await.unwrap();

    assert_eq!(summary.validated, 1);
    assert_eq!(summary.committed, 0);
    assert!(store.blood_pressures().list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_csv_workbook_end_to_end() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "Health Monitor Export,,\n\
         Date,Systolic (mmHg),Diastolic (mmHg)\n\
         02/12/2024 09:30,118,76\n\
         13/02/2024 10:00,121,79\n"
    )
    .unwrap();
    file.flush().unwrap();

    // A title row above the real header is taken as the header
    let workbook = CsvWorkbook::new(file.path());
    let sheet = workbook.first_worksheet().unwrap();
    assert_eq!(sheet.header()[0], "Health Monitor Export");

    let store = seeded_store();
    let adapter = BloodPressureWorkbookAdapter::new("Date", "Systolic (mmHg)", "Diastolic (mmHg)");
    let err = adapter.import(&workbook, 1, store.clone()).await.unwrap_err();
    assert_eq!(
        err.to_string(),
        "Spreadsheet error: Column 'Date' not found in header row"
    );

    let mut clean = NamedTempFile::new().unwrap();
    write!(
        clean,
        "Date,Systolic (mmHg),Diastolic (mmHg)\n02/12/2024 09:30,118,76\n13/02/2024 10:00,121,79\n"
    )
    .unwrap();
    clean.flush().unwrap();

    let summary = adapter
        .import(&CsvWorkbook::new(clean.path()), 1, store.clone())
        .await
        .unwrap();
    assert_eq!(summary.committed, 2);
}

#[tokio::test]
async fn test_xlsx_workbook_end_to_end() {
    use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};

    let mut workbook = Workbook::new();
    let date_format = Format::new().set_num_format("mm/dd/yyyy hh:mm");
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Date").unwrap();
    sheet.write_string(0, 1, "Systolic (mmHg)").unwrap();
    sheet.write_string(0, 2, "Diastolic (mmHg)").unwrap();
    let taken = ExcelDateTime::from_ymd(2024, 2, 12)
        .unwrap()
        .and_hms(9, 30, 0)
        .unwrap();
    sheet
        .write_datetime_with_format(1, 0, &taken, &date_format)
        .unwrap();
    sheet.write_number(1, 1, 118).unwrap();
    sheet.write_number(1, 2, 76).unwrap();
    sheet.write_string(2, 0, "13/02/2024 10:00").unwrap();
    sheet.write_number(2, 1, 121).unwrap();
    sheet.write_number(2, 2, 79).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let store = seeded_store();
    let adapter = BloodPressureWorkbookAdapter::from_config(&SpreadsheetConfig::default());
    let summary = adapter
        .import(&XlsxWorkbook::from_bytes(bytes), 1, store.clone())
        .await
        .unwrap();
    assert_eq!(summary.committed, 2);

    let stored = store.blood_pressures().list().await.unwrap();
    assert_eq!(stored[0].date, at(2024, 2, 12, 0, 0));
    assert_eq!(stored[0].systolic, 118);
    assert_eq!(stored[1].date, at(2024, 2, 13, 0, 0));
    assert_eq!(stored[1].diastolic, 79);
}
