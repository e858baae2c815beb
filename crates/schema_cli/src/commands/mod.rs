pub mod check;
pub mod init;
pub mod validate;

use anyhow::{Result, bail};
use schema_validator::CsvOptions;

/// Builds CSV reader options from the shared command line flags.
pub(crate) fn csv_options(index_column: Option<String>, delimiter: char) -> Result<CsvOptions> {
    let Ok(delimiter) = u8::try_from(delimiter) else {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter);
    };
    if !delimiter.is_ascii() {
        bail!("Delimiter must be a single ASCII character, got '{}'", delimiter as char);
    }

    let options = CsvOptions::default().with_delimiter(delimiter);
    Ok(match index_column {
        Some(column) => options.with_index_column(column),
        None => options,
    })
}
