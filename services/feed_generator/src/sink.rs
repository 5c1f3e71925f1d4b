//! Feed file writers
//!
//! Delimited output has no header row and one record per `\n`-terminated
//! line, in row order. JSON output is a single array of objects.

use crate::error::{GeneratorError, GeneratorResult};
use crate::records::FeedKind;
use feed_config::{OutputConfig, OutputFormat};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes feeds into one output directory
#[derive(Debug, Clone, PartialEq)]
pub struct FeedSink {
    dir: PathBuf,
    format: OutputFormat,
    delimiter: u8,
}

impl FeedSink {
    pub fn new(dir: impl Into<PathBuf>, format: OutputFormat, delimiter: u8) -> Self {
        Self {
            dir: dir.into(),
            format,
            delimiter,
        }
    }

    pub fn from_config(output: &OutputConfig, delimiter: u8) -> Self {
        Self::new(&output.dir, output.format, delimiter)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `prices.txt` for delimited output, `prices.json` for JSON
    pub fn path_for(&self, kind: FeedKind) -> PathBuf {
        let extension = match self.format {
            OutputFormat::Csv => "txt",
            OutputFormat::Json => "json",
        };
        self.dir.join(format!("{}.{}", kind.file_stem(), extension))
    }

    /// Replace the feed file with `rows`
    pub fn write<T: Serialize>(&self, kind: FeedKind, rows: &[T]) -> GeneratorResult<PathBuf> {
        fs::create_dir_all(&self.dir).map_err(|e| GeneratorError::io(&self.dir, e))?;

        let path = self.path_for(kind);
        let file = File::create(&path).map_err(|e| GeneratorError::io(&path, e))?;
        match self.format {
            OutputFormat::Csv => write_delimited(file, rows, self.delimiter)?,
            OutputFormat::Json => {
                let mut writer = BufWriter::new(file);
                write_json(&mut writer, rows)?;
                writer.flush().map_err(|e| GeneratorError::io(&path, e))?;
            }
        }

        info!(feed = %kind, rows = rows.len(), path = ?path, "Feed written");
        Ok(path)
    }
}

/// Header-less delimited records
pub fn write_delimited<W: Write, T: Serialize>(
    writer: W,
    rows: &[T],
    delimiter: u8,
) -> GeneratorResult<()> {
    let mut csv = csv::WriterBuilder::new()
        .has_headers(false)
        .delimiter(delimiter)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(writer);
    for row in rows {
        csv.serialize(row)?;
    }
    csv.flush().map_err(csv::Error::from)?;
    Ok(())
}

/// One JSON array of records
pub fn write_json<W: Write, T: Serialize>(writer: W, rows: &[T]) -> GeneratorResult<()> {
    serde_json::to_writer(writer, rows)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::PriceRecord;
    use tempfile::tempdir;
    use types::Instrument;

    fn rows() -> Vec<PriceRecord> {
        vec![
            PriceRecord {
                instrument: Instrument::new("2Y").unwrap(),
                price: codec::encode(99.0).unwrap(),
                spread: 0.0078125,
            },
            PriceRecord {
                instrument: Instrument::new("2Y").unwrap(),
                price: codec::encode(100.796875).unwrap(),
                spread: 0.01171875,
            },
        ]
    }

    #[test]
    fn test_delimited_lines() {
        let mut buffer = Vec::new();
        write_delimited(&mut buffer, &rows(), b',').unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "2Y,99-00,0.0078125\n2Y,100-25+,0.01171875\n"
        );
    }

    #[test]
    fn test_custom_delimiter() {
        let mut buffer = Vec::new();
        write_delimited(&mut buffer, &rows()[..1], b'|').unwrap();
        assert_eq!(String::from_utf8(buffer).unwrap(), "2Y|99-00|0.0078125\n");
    }

    #[test]
    fn test_json_array() {
        let mut buffer = Vec::new();
        write_json(&mut buffer, &rows()).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["price"], "100-25+");
    }

    #[test]
    fn test_write_creates_directory() {
        let dir = tempdir().unwrap();
        let sink = FeedSink::new(dir.path().join("nested/out"), OutputFormat::Csv, b',');
        let path = sink.write(FeedKind::Prices, &rows()).unwrap();
        assert_eq!(path, dir.path().join("nested/out/prices.txt"));
        assert_eq!(fs::read_to_string(path).unwrap().lines().count(), 2);

        let json = FeedSink::new(dir.path(), OutputFormat::Json, b',');
        assert_eq!(
            json.path_for(FeedKind::MarketData),
            dir.path().join("marketdata.json")
        );
    }
}
