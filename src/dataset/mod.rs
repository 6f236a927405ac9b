//! Recipe table loading
//!
//! A table is any CSV with `Title` and `Ingredients` columns. Rows missing
//! either value are dropped; other columns are ignored. The same loader serves
//! a user-provided file and the local default file.

pub mod cache;
pub mod sample;

pub use cache::{CacheStatus, TableCache};
pub use sample::Sampler;

use crate::config::Config;
use crate::error::{ChefSortError, Result};
use chefsort_common::Recipe;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const TITLE_COLUMN: &str = "Title";
pub const INGREDIENTS_COLUMN: &str = "Ingredients";

/// Where the recipe table comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    /// File chosen by the user
    Upload(PathBuf),
    /// The configured default file
    Local(PathBuf),
}

impl DataSource {
    pub fn from_args(file: Option<PathBuf>, config: &Config) -> Self {
        match file {
            Some(path) => DataSource::Upload(path),
            None => DataSource::Local(config.data_file.clone()),
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            DataSource::Upload(path) | DataSource::Local(path) => path,
        }
    }
}

/// Cleaned rows of one CSV file
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeTable {
    pub source: PathBuf,
    pub recipes: Vec<Recipe>,
    /// Usable rows before sampling
    pub total_rows: usize,
    /// Rows dropped for a missing title or ingredients
    pub dropped_rows: usize,
}

impl RecipeTable {
    pub fn titles(&self) -> Vec<&str> {
        self.recipes.iter().map(|r| r.title.as_str()).collect()
    }

    /// First recipe with this exact title
    pub fn find_by_title(&self, title: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.title == title)
    }
}

/// Load and clean a CSV file
pub fn load_table(path: &Path) -> Result<RecipeTable> {
    let bytes = read_source(path)?;
    parse_table(bytes.as_slice(), path)
}

/// Raw file content, `FileNotFound` when the path does not exist
pub(crate) fn read_source(path: &Path) -> Result<Vec<u8>> {
    if !path.exists() {
        return Err(ChefSortError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read(path)?)
}

/// Parse CSV content; `source` is used for messages and recorded on the table
pub fn parse_table<R: Read>(reader: R, source: &Path) -> Result<RecipeTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let title_idx = column_index(&headers, TITLE_COLUMN, source)?;
    let ingredients_idx = column_index(&headers, INGREDIENTS_COLUMN, source)?;

    let mut recipes = Vec::new();
    let mut dropped_rows = 0;

    for record in reader.records() {
        let record = record?;
        let title = record.get(title_idx).unwrap_or_default();
        let ingredients = record.get(ingredients_idx).unwrap_or_default();

        // whitespace-only counts as missing, but kept cells stay verbatim
        if title.trim().is_empty() || ingredients.trim().is_empty() {
            dropped_rows += 1;
            continue;
        }

        recipes.push(Recipe::new(title, ingredients));
    }

    if recipes.is_empty() {
        return Err(ChefSortError::EmptyTable(source.display().to_string()));
    }

    tracing::debug!(
        source = %source.display(),
        rows = recipes.len(),
        dropped = dropped_rows,
        "Loaded recipe table"
    );

    Ok(RecipeTable {
        source: source.to_path_buf(),
        total_rows: recipes.len(),
        recipes,
        dropped_rows,
    })
}

fn column_index(headers: &csv::StringRecord, column: &str, source: &Path) -> Result<usize> {
    headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .ok_or_else(|| ChefSortError::MissingColumn {
            column: column.to_string(),
            path: source.display().to_string(),
        })
}
