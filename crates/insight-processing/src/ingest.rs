//! CSV ingestion.
//!
//! Loads a CSV file into a `DataFrame` for the analysis components. Type
//! inference over the parsed values is polars'; semantic type-tagging
//! happens later in the profiler. Real-world CSVs arrive in odd encodings,
//! so bytes that are not valid UTF-8 are replaced lossily instead of
//! failing the load.

use crate::error::Result;
use polars::io::csv::read::{CsvEncoding, CsvParseOptions, CsvReadOptions};
use polars::prelude::*;
use std::path::Path;
use tracing::info;

/// Load a CSV file with a header row into a `DataFrame`.
pub fn load_csv(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_parse_options(CsvParseOptions::default().with_encoding(CsvEncoding::LossyUtf8))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    info!(
        "Loaded {:?}: {} rows x {} columns",
        path,
        df.height(),
        df.width()
    );
    Ok(df)
}
