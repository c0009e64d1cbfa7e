mod delimited;
mod report;
mod workbook;

pub use delimited::{combined_csv, table_from_csv, table_to_csv};
pub use report::text_report;
pub use workbook::workbook_bytes;

use crate::config::DashboardConfig;
use crate::sections::section_tables;
use crate::tables::{Table, TableError};
use chrono::NaiveDate;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv serialization failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("csv buffer error: {0}")]
    Io(#[from] std::io::Error),
    #[error("csv output was not valid utf-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("workbook serialization failed: {0}")]
    Workbook(#[from] rust_xlsxwriter::XlsxError),
    #[error(transparent)]
    Table(#[from] TableError),
}

/// Target formats for a bundle download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Workbook,
    Report,
}

impl ExportFormat {
    pub const fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Workbook => "xlsx",
            ExportFormat::Report => "txt",
        }
    }

    pub const fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Workbook => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
            ExportFormat::Report => "text/plain",
        }
    }

    /// Dated download name, e.g. `bolivia_datos_2025-06-30.csv`.
    pub fn file_name(self, date: NaiveDate) -> String {
        let stem = match self {
            ExportFormat::Csv => "datos",
            ExportFormat::Workbook => "dashboard",
            ExportFormat::Report => "reporte",
        };
        format!("bolivia_{stem}_{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

/// One named table headed for a worksheet, CSV block or report section.
#[derive(Debug, Clone)]
pub struct BundleEntry {
    pub name: String,
    pub table: Table,
}

/// The collected tables of the enabled sections, ready for serialization.
/// Empty tables are dropped at collection time so every serializer can assume
/// its entries have rows.
#[derive(Debug)]
pub struct ExportBundle {
    pub generated_on: NaiveDate,
    entries: Vec<BundleEntry>,
}

impl ExportBundle {
    pub fn new(generated_on: NaiveDate) -> Self {
        Self {
            generated_on,
            entries: Vec::new(),
        }
    }

    /// Collect every table of every enabled section.
    pub fn for_dashboard(config: &DashboardConfig, generated_on: NaiveDate) -> Self {
        let mut bundle = Self::new(generated_on);
        for &section in &config.sections {
            for table in section_tables(section) {
                bundle.push(table);
            }
        }
        bundle
    }

    /// Add a table under its own name; empty tables are skipped.
    pub fn push(&mut self, table: Table) {
        if table.is_empty() {
            return;
        }
        self.entries.push(BundleEntry {
            name: table.name().to_string(),
            table,
        });
    }

    pub fn entries(&self) -> &[BundleEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
