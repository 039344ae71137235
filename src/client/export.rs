//! Report download

use std::fmt;
use std::str::FromStr;

use reqwest::header::CONTENT_DISPOSITION;

use super::error::error_message;
use super::{ApiClient, ApiRequest, ClientError};
use crate::models::TransactionFilter;

/// Message used when a failed export carries no readable detail
pub const EXPORT_FALLBACK_MESSAGE: &str = "Export unavailable";

/// Report formats offered by the export endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Pdf,
    Csv,
    /// Served as CSV that spreadsheet tools open directly
    Excel,
}

impl ExportFormat {
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Csv => "csv",
            Self::Excel => "excel",
        }
    }

    /// File name used when the server does not suggest one
    pub fn default_file_name(&self) -> &'static str {
        match self {
            Self::Pdf => "transactions_summary.pdf",
            Self::Csv | Self::Excel => "transactions.csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_query())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(Self::Pdf),
            "csv" => Ok(Self::Csv),
            "excel" | "xlsx" => Ok(Self::Excel),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// A downloaded report
#[derive(Debug, Clone)]
pub struct ExportFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Message for a failed export, read from a binary error body
pub fn export_error_message(body: &[u8]) -> String {
    error_message(body).unwrap_or_else(|| EXPORT_FALLBACK_MESSAGE.to_string())
}

/// File name from a `Content-Disposition: attachment; filename="..."` header
fn attachment_file_name(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty() && !name.contains(['/', '\\']))
}

impl ApiClient {
    /// Download a report for the transactions matching `filter`
    pub async fn export_transactions(
        &self,
        filter: &TransactionFilter,
        format: ExportFormat,
    ) -> Result<ExportFile, ClientError> {
        let request = ApiRequest::get("transactions/export/")
            .query(filter.to_query())
            .query([("format", format.as_query())]);

        let response = self.send(&request).await?;
        let status = response.status();
        let file_name = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(attachment_file_name)
            .unwrap_or_else(|| format.default_file_name().to_string());
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let message = export_error_message(&bytes);
            tracing::warn!(status = status.as_u16(), %message, "export failed");
            return Err(ClientError::Export(message));
        }

        tracing::info!(%format, size = bytes.len(), "report downloaded");
        Ok(ExportFile {
            file_name,
            bytes: bytes.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_error_message() {
        assert_eq!(
            export_error_message(br#"{"detail": "reportlab manquant"}"#),
            "reportlab manquant"
        );
        assert_eq!(export_error_message(b"%PDF-1.4 garbage"), EXPORT_FALLBACK_MESSAGE);
        assert_eq!(export_error_message(b""), EXPORT_FALLBACK_MESSAGE);
    }

    #[test]
    fn test_attachment_file_name() {
        assert_eq!(
            attachment_file_name(r#"attachment; filename="transactions.csv""#).as_deref(),
            Some("transactions.csv")
        );
        assert_eq!(attachment_file_name("inline"), None);
        assert_eq!(attachment_file_name(r#"attachment; filename="../x""#), None);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("PDF".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);
        assert_eq!(ExportFormat::Excel.default_file_name(), "transactions.csv");
        assert!("doc".parse::<ExportFormat>().is_err());
    }
}
