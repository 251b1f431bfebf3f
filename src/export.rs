//! CSV Export Module
//! Serializes tables to UTF-8 CSV and memoizes the bytes by table content.

use polars::prelude::*;
use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

/// MIME type of the exported file.
pub const CSV_MIME: &str = "text/csv";

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to serialize CSV: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Converts tables to CSV.
pub struct CsvExporter;

impl CsvExporter {
    /// Header plus one line per row, no index column, nulls as empty fields.
    pub fn to_csv_bytes(df: &DataFrame) -> Result<Vec<u8>, ExportError> {
        let mut buf = Vec::new();
        let mut df = df.clone();
        CsvWriter::new(&mut buf)
            .include_header(true)
            .finish(&mut df)?;
        Ok(buf)
    }

    pub fn write_file(path: &Path, bytes: &[u8]) -> Result<(), ExportError> {
        std::fs::write(path, bytes).map_err(|source| ExportError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Hash of column names, dtypes and every value, whatever the chunk layout.
    pub fn content_hash(df: &DataFrame) -> u64 {
        let mut hasher = DefaultHasher::new();
        df.height().hash(&mut hasher);
        for column in df.get_columns() {
            column.name().as_str().hash(&mut hasher);
            column.dtype().to_string().hash(&mut hasher);
            // value iteration requires a single chunk
            let series = column.as_materialized_series().rechunk();
            for value in series.iter() {
                value.is_null().hash(&mut hasher);
                value.to_string().hash(&mut hasher);
            }
        }
        hasher.finish()
    }
}

/// A converted table, kept to confirm hash hits.
struct CachedCsv {
    source: DataFrame,
    bytes: Arc<Vec<u8>>,
}

/// Memo table from table content to its CSV bytes.
#[derive(Default)]
pub struct ExportCache {
    entries: HashMap<u64, CachedCsv>,
    conversions: usize,
}

impl ExportCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// CSV bytes for `df`, converting only if identical content was not seen before.
    ///
    /// A hash hit is only served when the stored table equals `df`; a
    /// colliding entry is replaced.
    pub fn get_or_convert(&mut self, df: &DataFrame) -> Result<Arc<Vec<u8>>, ExportError> {
        let key = CsvExporter::content_hash(df);
        if let Some(entry) = self.entries.get(&key) {
            if entry.source.equals_missing(df) {
                log::debug!("CSV cache hit for {} rows", df.height());
                return Ok(Arc::clone(&entry.bytes));
            }
            log::warn!("CSV cache key {:#x} collided, converting again", key);
        }

        let bytes = Arc::new(CsvExporter::to_csv_bytes(df)?);
        self.conversions += 1;
        log::debug!(
            "CSV cache miss: converted {} rows ({} bytes)",
            df.height(),
            bytes.len()
        );
        self.entries.insert(
            key,
            CachedCsv {
                source: df.clone(),
                bytes: Arc::clone(&bytes),
            },
        );
        Ok(bytes)
    }

    /// Number of conversions actually performed.
    pub fn conversions(&self) -> usize {
        self.conversions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DataFilter, DataJoiner};
    use crate::test_support::{example_tables, messy_tables};
    use std::io::Cursor;

    fn read_back(bytes: &[u8]) -> DataFrame {
        CsvReadOptions::default()
            .with_has_header(true)
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()
            .unwrap()
    }

    #[test]
    fn csv_has_header_and_no_index() {
        let joined = DataJoiner::join(&example_tables()).unwrap();
        let filtered = DataFilter::by_min_rating(&joined, 4).unwrap();
        let text = String::from_utf8(CsvExporter::to_csv_bytes(&filtered).unwrap()).unwrap();

        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("order_id,product_id,price,product_category_name,review_score")
        );
        assert_eq!(lines.count(), 2);
    }

    #[test]
    fn filtered_table_round_trips() {
        let joined = DataJoiner::join(&messy_tables()).unwrap();
        let filtered = DataFilter::by_min_rating(&joined, 2).unwrap();

        let back = read_back(&CsvExporter::to_csv_bytes(&filtered).unwrap());
        assert_eq!(back.height(), filtered.height());
        assert!(back.equals_missing(&filtered));
    }

    #[test]
    fn cache_reuses_identical_content() {
        let joined = DataJoiner::join(&example_tables()).unwrap();
        let mut cache = ExportCache::new();

        let first = cache
            .get_or_convert(&DataFilter::by_min_rating(&joined, 3).unwrap())
            .unwrap();
        // same selection recomputed from scratch
        let second = cache
            .get_or_convert(&DataFilter::by_min_rating(&joined, 3).unwrap())
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.conversions(), 1);

        let stricter = cache
            .get_or_convert(&DataFilter::by_min_rating(&joined, 5).unwrap())
            .unwrap();
        assert_ne!(first, stricter);
        assert_eq!(cache.conversions(), 2);
        assert_eq!(cache.entries.len(), 2);
    }

    #[test]
    fn content_hash_tracks_values() {
        let a = df!("x" => [1i64, 2]).unwrap();
        let b = df!("x" => [1i64, 3]).unwrap();
        let c = df!("y" => [1i64, 2]).unwrap();

        assert_eq!(
            CsvExporter::content_hash(&a),
            CsvExporter::content_hash(&a.clone())
        );
        assert_ne!(CsvExporter::content_hash(&a), CsvExporter::content_hash(&b));
        assert_ne!(CsvExporter::content_hash(&a), CsvExporter::content_hash(&c));
    }

    #[test]
    fn stacked_frames_hash_and_export_like_single_chunk() {
        let mut stacked = df!("x" => [1i64], "y" => ["a"]).unwrap();
        stacked
            .vstack_mut(&df!("x" => [2i64], "y" => ["b"]).unwrap())
            .unwrap();
        let single = df!("x" => [1i64, 2], "y" => ["a", "b"]).unwrap();
        assert!(stacked.get_columns()[0].as_materialized_series().n_chunks() > 1);

        assert_eq!(
            CsvExporter::content_hash(&stacked),
            CsvExporter::content_hash(&single)
        );

        let mut cache = ExportCache::new();
        let bytes = cache.get_or_convert(&stacked).unwrap();
        assert!(read_back(&bytes).equals_missing(&single));
        assert_eq!(cache.conversions(), 1);
    }

    #[test]
    fn colliding_key_is_not_served_for_other_content() {
        let a = df!("x" => [1i64, 2]).unwrap();
        let b = df!("x" => [3i64, 4]).unwrap();
        let mut cache = ExportCache::new();
        let a_bytes = cache.get_or_convert(&a).unwrap();

        // file a's entry under b's key
        let a_entry = cache
            .entries
            .remove(&CsvExporter::content_hash(&a))
            .unwrap();
        cache.entries.insert(CsvExporter::content_hash(&b), a_entry);

        let b_bytes = cache.get_or_convert(&b).unwrap();
        assert_ne!(a_bytes, b_bytes);
        assert_eq!(b_bytes.as_slice(), b"x\n3\n4\n");
        assert_eq!(cache.conversions(), 2);
    }

    #[test]
    fn write_file_creates_download() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filtered_data.csv");

        CsvExporter::write_file(&path, b"a,b\n1,2\n").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "a,b\n1,2\n");
    }
}
