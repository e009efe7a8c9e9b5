// src/export.rs
//
// ResultSet → downloadable artifacts.
//
// CSV: header is the first-seen union of every record's columns, one row per
// record, missing cells empty. An empty ResultSet renders as zero bytes (no
// header row), since there are no observed columns to name.
//
// JSON: array of objects, two-space indent, each object in its record's own
// field order. An empty ResultSet renders as `[]`.
//
// Both are pure: same ResultSet in, same bytes out.

use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::consts::EXPORT_STEM;
use crate::post::ResultSet;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 2] = [ExportFormat::Csv, ExportFormat::Json];

    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Json => "json" }
    }

    pub fn mime(&self) -> &'static str {
        match self { ExportFormat::Csv => "text/csv", ExportFormat::Json => "application/json" }
    }

    pub fn label(&self) -> &'static str {
        match self { ExportFormat::Csv => "CSV", ExportFormat::Json => "JSON" }
    }

    /// `threads_data.csv` / `threads_data.json`
    pub fn file_name(&self) -> String {
        format!("{EXPORT_STEM}.{}", self.ext())
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// One rendered file, ready to save or hand to a download button.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExportArtifact {
    pub format: ExportFormat,
    pub file_name: String,
    pub mime: &'static str,
    pub bytes: Vec<u8>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Exporter;

impl Exporter {
    pub fn to_csv(&self, records: &ResultSet) -> Result<Vec<u8>, ExportError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let headers = records.field_names();
        let mut wtr = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        wtr.write_record(&headers)?;
        for post in records {
            let fields = post.fields();
            let row = headers.iter().map(|h| {
                fields
                    .iter()
                    .find(|(name, _)| *name == h.as_str())
                    .map(|(_, cell)| cell.as_str())
                    .unwrap_or("")
            });
            wtr.write_record(row)?;
        }

        wtr.into_inner().map_err(|e| ExportError::Io(e.into_error()))
    }

    pub fn to_json(&self, records: &ResultSet) -> Result<String, ExportError> {
        Ok(serde_json::to_string_pretty(records.records())?)
    }

    pub fn render(&self, format: ExportFormat, records: &ResultSet) -> Result<ExportArtifact, ExportError> {
        let bytes = match format {
            ExportFormat::Csv => self.to_csv(records)?,
            ExportFormat::Json => self.to_json(records)?.into_bytes(),
        };
        logd!("Export: Rendered {} rows={} bytes={}", format.label(), records.len(), bytes.len());
        Ok(ExportArtifact {
            format,
            file_name: format.file_name(),
            mime: format.mime(),
            bytes,
        })
    }

    /// Both formats from the same ResultSet, CSV first.
    pub fn artifacts(&self, records: &ResultSet) -> Result<Vec<ExportArtifact>, ExportError> {
        self.render_all(&ExportFormat::ALL, records)
    }

    pub fn render_all(&self, formats: &[ExportFormat], records: &ResultSet) -> Result<Vec<ExportArtifact>, ExportError> {
        formats.iter().map(|f| self.render(*f, records)).collect()
    }
}
