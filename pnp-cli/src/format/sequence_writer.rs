#[cfg(test)]
#[path = "../../tests/unit/format/sequence_writer_test.rs"]
mod sequence_writer_test;

use crate::format::EventRow;
use crate::CliError;
use std::path::Path;

/// Writes the result table to the given path as CSV with a header row.
pub fn write_sequence(path: &Path, rows: &[EventRow]) -> Result<(), CliError> {
    let mut writer = csv::Writer::from_path(path)
        .map_err(|err| CliError::Csv { path: path.to_path_buf(), source: err })?;

    for row in rows.iter() {
        writer
            .serialize(row)
            .map_err(|err| CliError::Csv { path: path.to_path_buf(), source: err })?;
    }

    writer.flush().map_err(|err| CliError::Io { path: path.to_path_buf(), source: err })?;

    Ok(())
}
