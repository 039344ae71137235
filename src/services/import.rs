//! CSV import service
//!
//! Checks a `date,description,category,amount` file locally so the user can
//! review it, then uploads the original bytes. The server re-reads the file
//! and skips the rows it cannot use, so the preview mirrors its rules: a
//! missing date means today, an unknown category imports uncategorized, and
//! an unreadable date or amount drops the row.

use std::io::Read;

use chrono::NaiveDate;
use csv::{Reader, ReaderBuilder, StringRecord};

use crate::client::ApiClient;
use crate::error::{NexoraError, NexoraResult};
use crate::models::{Category, ImportResult, Money};
use crate::services::category;

/// Columns the import endpoint reads, by header name
pub const EXPECTED_COLUMNS: [&str; 4] = ["date", "description", "category", "amount"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Header positions of the expected columns; any of them may be absent
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Columns {
    date: Option<usize>,
    description: Option<usize>,
    category: Option<usize>,
    amount: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Self {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        Self {
            date: find("date"),
            description: find("description"),
            category: find("category"),
            amount: find("amount"),
        }
    }
}

/// A row as the server would store it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRow {
    /// `None` when the cell is empty; the server uses its current date
    pub date: Option<NaiveDate>,
    pub description: String,
    pub category: Option<String>,
    pub amount: Money,
}

/// Outcome of one row in the preview
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImportStatus {
    /// Row will be imported with its category
    Ready,
    /// Row will be imported without a category
    Uncategorized,
    /// Row will be skipped by the server
    Error(String),
}

/// Preview entry for import review
#[derive(Debug, Clone)]
pub struct ImportPreviewEntry {
    /// 1-based data row number, header excluded
    pub row_number: usize,
    pub row: Option<ParsedRow>,
    pub status: ImportStatus,
}

impl ImportPreviewEntry {
    pub fn will_import(&self) -> bool {
        !matches!(self.status, ImportStatus::Error(_))
    }
}

/// Counts over a preview
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportPreviewSummary {
    pub ready: usize,
    pub uncategorized: usize,
    pub errors: usize,
}

impl ImportPreviewSummary {
    pub fn of(entries: &[ImportPreviewEntry]) -> Self {
        entries.iter().fold(Self::default(), |mut acc, entry| {
            match entry.status {
                ImportStatus::Ready => acc.ready += 1,
                ImportStatus::Uncategorized => acc.uncategorized += 1,
                ImportStatus::Error(_) => acc.errors += 1,
            }
            acc
        })
    }

    pub fn importable(&self) -> usize {
        self.ready + self.uncategorized
    }
}

/// Parse and check CSV contents against the known categories
pub fn preview<R: Read>(input: R, categories: &[Category]) -> NexoraResult<Vec<ImportPreviewEntry>> {
    let mut reader = ReaderBuilder::new().flexible(true).from_reader(input);
    preview_from_reader(&mut reader, categories)
}

/// Same as [`preview`] over an already configured reader
pub fn preview_from_reader<R: Read>(
    reader: &mut Reader<R>,
    categories: &[Category],
) -> NexoraResult<Vec<ImportPreviewEntry>> {
    let headers = reader
        .headers()
        .map_err(|e| NexoraError::Import(format!("Cannot read CSV header: {}", e)))?
        .clone();
    let columns = Columns::from_headers(&headers);
    if columns.amount.is_none() {
        return Err(NexoraError::Import(format!(
            "Missing 'amount' column; expected header: {}",
            EXPECTED_COLUMNS.join(",")
        )));
    }

    let mut entries = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let row_number = idx + 1;
        let entry = match result {
            Ok(record) => match parse_record(&record, &columns) {
                Ok(row) => {
                    let status = match row.category.as_deref() {
                        Some(name) if category::find_in(categories, name).is_some() => {
                            ImportStatus::Ready
                        }
                        _ => ImportStatus::Uncategorized,
                    };
                    ImportPreviewEntry {
                        row_number,
                        row: Some(row),
                        status,
                    }
                }
                Err(message) => ImportPreviewEntry {
                    row_number,
                    row: None,
                    status: ImportStatus::Error(message),
                },
            },
            Err(e) => ImportPreviewEntry {
                row_number,
                row: None,
                status: ImportStatus::Error(format!("Error reading CSV record: {}", e)),
            },
        };
        entries.push(entry);
    }

    Ok(entries)
}

fn cell<'r>(record: &'r StringRecord, column: Option<usize>) -> &'r str {
    column.and_then(|c| record.get(c)).map(str::trim).unwrap_or("")
}

/// Parse a single CSV record
fn parse_record(record: &StringRecord, columns: &Columns) -> Result<ParsedRow, String> {
    let date_str = cell(record, columns.date);
    let date = if date_str.is_empty() {
        None
    } else {
        Some(
            NaiveDate::parse_from_str(date_str, DATE_FORMAT)
                .map_err(|_| format!("Invalid date '{}', expected YYYY-MM-DD", date_str))?,
        )
    };

    // The server reads amounts as plain decimals
    let amount_str = cell(record, columns.amount);
    if amount_str.contains(',') {
        return Err(format!("Invalid amount '{}', use '.' for decimals", amount_str));
    }
    if amount_str.is_empty() {
        return Err("Missing amount".to_string());
    }
    let amount =
        Money::parse(amount_str).map_err(|e| format!("Invalid amount '{}': {}", amount_str, e))?;

    let category = Some(cell(record, columns.category))
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok(ParsedRow {
        date,
        description: cell(record, columns.description).to_string(),
        category,
        amount,
    })
}

/// Service for CSV import
pub struct ImportService<'a> {
    client: &'a ApiClient,
}

impl<'a> ImportService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Preview a file against the user's categories
    pub async fn preview(&self, contents: &[u8]) -> NexoraResult<Vec<ImportPreviewEntry>> {
        let categories = self.client.list_categories().await?;
        preview(contents, &categories)
    }

    /// Upload the file as-is
    pub async fn upload(&self, file_name: &str, contents: Vec<u8>) -> NexoraResult<ImportResult> {
        let result = self
            .client
            .import_transactions_csv(file_name, contents)
            .await?;
        tracing::info!(created = result.created, file = file_name, "csv imported");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, CategoryType};

    fn categories() -> Vec<Category> {
        vec![Category {
            id: CategoryId::new(1),
            name: "Courses".into(),
            category_type: CategoryType::Expense,
            icon: String::new(),
            color: String::new(),
        }]
    }

    #[test]
    fn test_preview_statuses() {
        let csv = "date,description,category,amount\n\
                   2025-03-02,Marche,Courses,-40.00\n\
                   2025-03-03,Cinema,Loisirs,-12\n\
                   ,Salaire,,1500\n\
                   03/04/2025,Bad date,Courses,-5\n\
                   2025-03-05,Bad amount,Courses,abc\n";

        let entries = preview(csv.as_bytes(), &categories()).unwrap();

        assert_eq!(entries.len(), 5);
        assert_eq!(entries[0].status, ImportStatus::Ready);
        assert_eq!(
            entries[0].row.as_ref().unwrap().amount,
            Money::from_cents(-4000)
        );
        assert_eq!(entries[1].status, ImportStatus::Uncategorized);
        assert_eq!(entries[2].status, ImportStatus::Uncategorized);
        assert_eq!(entries[2].row.as_ref().unwrap().date, None);
        assert!(matches!(entries[3].status, ImportStatus::Error(_)));
        assert!(matches!(entries[4].status, ImportStatus::Error(_)));
        assert_eq!(entries[4].row_number, 5);

        let summary = ImportPreviewSummary::of(&entries);
        assert_eq!(summary.ready, 1);
        assert_eq!(summary.uncategorized, 2);
        assert_eq!(summary.errors, 2);
        assert_eq!(summary.importable(), 3);
    }

    #[test]
    fn test_header_order_and_case_do_not_matter() {
        let csv = "Amount,Date,Description\n-3.50,2025-01-09,Cafe\n";
        let entries = preview(csv.as_bytes(), &[]).unwrap();
        let row = entries[0].row.as_ref().unwrap();
        assert_eq!(row.amount, Money::from_cents(-350));
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2025, 1, 9));
        assert_eq!(row.description, "Cafe");
        assert!(entries[0].will_import());
    }

    #[test]
    fn test_comma_decimal_rejected() {
        let csv = "date,description,category,amount\n2025-01-09,Cafe,,\"-3,50\"\n";
        let entries = preview(csv.as_bytes(), &[]).unwrap();
        assert!(!entries[0].will_import());
    }

    #[test]
    fn test_missing_amount_column() {
        let csv = "date,description\n2025-01-09,Cafe\n";
        let err = preview(csv.as_bytes(), &[]).unwrap_err();
        assert!(matches!(err, NexoraError::Import(_)));
    }
}
