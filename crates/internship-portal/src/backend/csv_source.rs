use std::io::Read;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use super::{BackendError, PositionSource};
use crate::internship::PositionCategory;

/// Errors raised while importing a catalog export.
#[derive(Debug, thiserror::Error)]
pub enum CatalogCsvError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse catalog export: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row} has an empty title")]
    EmptyTitle { row: usize },
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    title: String,
    #[serde(default)]
    item: String,
}

/// Groups `title,item` rows into categories, keeping first-seen order for titles and items.
/// A row with an empty item declares the category without adding an entry.
pub fn parse_catalog<R: Read>(reader: R) -> Result<Vec<PositionCategory>, CatalogCsvError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut catalog: Vec<PositionCategory> = Vec::new();
    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        let row = record?;
        if row.title.is_empty() {
            return Err(CatalogCsvError::EmptyTitle { row: index + 1 });
        }

        let position = match catalog.iter().position(|entry| entry.title == row.title) {
            Some(position) => position,
            None => {
                catalog.push(PositionCategory {
                    title: row.title,
                    items: Vec::new(),
                });
                catalog.len() - 1
            }
        };

        if !row.item.is_empty() {
            catalog[position].items.push(row.item);
        }
    }

    Ok(catalog)
}

/// Catalog read from a CSV export on disk.
#[derive(Debug, Clone)]
pub struct CsvPositionSource {
    path: PathBuf,
}

impl CsvPositionSource {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl PositionSource for CsvPositionSource {
    async fn fetch_positions(&self) -> Result<Vec<PositionCategory>, BackendError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|err| BackendError::Unavailable(format!("{}: {err}", self.path.display())))?;
        let mut catalog =
            parse_catalog(bytes.as_slice()).map_err(|err| BackendError::Decode(err.to_string()))?;
        catalog.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(catalog)
    }
}
