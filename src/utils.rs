use crate::prelude::*;
use csv::Writer;
use std::path::Path;

/// Writes one `iteration,current_error,recent_average_error` row per sample.
pub fn write_error_history_to_csv<P: AsRef<Path>>(history: &[ErrorSample], file_path: P) -> Result<()> {
    // Create a CSV writer that writes to the specified file path
    let mut wtr = Writer::from_path(file_path)?;

    // Header row comes from the field names
    for sample in history {
        wtr.serialize(sample)?;
    }

    // Ensure all data is flushed to the file
    wtr.flush()?;
    Ok(())
}
