//! Bulk import of the published SWIFT-code spreadsheet, either the `.xlsx`
//! workbook itself (first worksheet) or a CSV export of it.
//!
//! Columns are matched by header name:
//!
//! ```text
//! COUNTRY ISO2 CODE, SWIFT CODE, CODE TYPE, NAME, ADDRESS, TOWN NAME, COUNTRY NAME, TIME ZONE
//! ```
//!
//! `CODE TYPE` and `TOWN NAME` are not stored. Every row goes through the
//! same reconciliation as an API registration, so row order is irrelevant.

use crate::{
    error::{DirectoryError, DirectoryResult, ErrorKind},
    hierarchy,
    registration,
    store::DirectoryStore,
    types::NewBank,
};
use calamine::{Reader, Xlsx};
use std::io::{Read, Seek};

const COL_ISO2: &str = "COUNTRY ISO2 CODE";
const COL_SWIFT_CODE: &str = "SWIFT CODE";
const COL_NAME: &str = "NAME";
const COL_ADDRESS: &str = "ADDRESS";
const COL_COUNTRY_NAME: &str = "COUNTRY NAME";
const COL_TIME_ZONE: &str = "TIME ZONE";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportReport {
    pub inserted: usize,
    pub duplicates: usize,
    pub rejected: usize,
}

struct Columns {
    iso2: usize,
    swift_code: usize,
    name: usize,
    address: Option<usize>,
    country_name: usize,
    time_zone: Option<usize>,
}

impl Columns {
    fn locate(headers: &csv::StringRecord) -> DirectoryResult<Self> {
        let find = |name: &str| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(name));
        let require = |name: &'static str| {
            find(name).ok_or_else(|| {
                DirectoryError::validation("header", format!("missing column '{name}'"))
            })
        };
        Ok(Self {
            iso2: require(COL_ISO2)?,
            swift_code: require(COL_SWIFT_CODE)?,
            name: require(COL_NAME)?,
            address: find(COL_ADDRESS),
            country_name: require(COL_COUNTRY_NAME)?,
            time_zone: find(COL_TIME_ZONE),
        })
    }

    fn parse(&self, row: &csv::StringRecord) -> DirectoryResult<NewBank> {
        let get = |idx: usize| row.get(idx).unwrap_or_default();
        let address = self
            .address
            .map(get)
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string);
        let time_zone = self.time_zone.map(get).map(|tz| tz.trim().to_string());
        registration::normalize(
            get(self.swift_code),
            get(self.name),
            address,
            get(self.iso2),
            get(self.country_name),
            time_zone,
        )
    }
}

/// Load every row of a CSV export into `store`.
///
/// Invalid and duplicate rows are skipped; a store failure aborts the import.
pub fn import_csv<R: Read>(store: &DirectoryStore, reader: R) -> DirectoryResult<ImportReport> {
    let mut reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);
    let columns = Columns::locate(reader.headers()?)?;
    // Header is line 1.
    let rows = reader
        .records()
        .enumerate()
        .map(|(idx, row)| row.map(|row| (idx + 2, row)).map_err(DirectoryError::from));
    load_rows(store, &columns, rows)
}

/// Load the first worksheet of an `.xlsx` workbook into `store`.
///
/// The first non-empty row is the header. Same row handling as [`import_csv`].
pub fn import_xlsx<R: Read + Seek>(store: &DirectoryStore, reader: R) -> DirectoryResult<ImportReport> {
    let mut workbook = Xlsx::new(reader)?;
    let sheet = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DirectoryError::validation("workbook", "contains no worksheet"))??;

    let mut cells = sheet.rows().map(|cells| {
        cells
            .iter()
            .map(|cell| cell.to_string())
            .collect::<csv::StringRecord>()
    });
    let headers = cells
        .next()
        .ok_or_else(|| DirectoryError::validation("workbook", "first worksheet is empty"))?;
    let columns = Columns::locate(&headers)?;

    let first_line = sheet.start().map_or(1, |(row, _)| row as usize + 1);
    let rows = cells
        .enumerate()
        .map(|(idx, row)| Ok::<_, DirectoryError>((first_line + idx + 1, row)));
    load_rows(store, &columns, rows)
}

fn load_rows(
    store: &DirectoryStore,
    columns: &Columns,
    rows: impl Iterator<Item = DirectoryResult<(usize, csv::StringRecord)>>,
) -> DirectoryResult<ImportReport> {
    let mut report = ImportReport::default();

    for result in rows {
        let (line, row) = result?;
        if row.iter().all(|cell| cell.trim().is_empty()) {
            continue;
        }

        let outcome = columns
            .parse(&row)
            .and_then(|bank| hierarchy::register_bank(store, &bank));
        match outcome {
            Ok(_) => report.inserted += 1,
            Err(e) => match e.kind() {
                ErrorKind::Duplicate => {
                    log::warn!("line {line}: skipped, {e}");
                    report.duplicates += 1;
                }
                ErrorKind::Validation => {
                    log::warn!("line {line}: rejected, {e}");
                    report.rejected += 1;
                }
                ErrorKind::NotFound | ErrorKind::Internal => return Err(e),
            },
        }
    }

    log::info!(
        "import finished: {} inserted, {} duplicates, {} rejected",
        report.inserted,
        report.duplicates,
        report.rejected
    );
    Ok(report)
}
