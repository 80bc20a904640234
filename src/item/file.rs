use std::{
    fs::File,
    io::{BufWriter, Write},
    path::Path,
};

use log::debug;

use crate::BatchError;

/// Writes `text` verbatim to `path`.
///
/// The file is created, or truncated when it already exists. The handle is
/// flushed and closed before returning, on success and on failure alike.
pub fn write_text<P: AsRef<Path>>(text: &str, path: P) -> Result<(), BatchError> {
    let path = path.as_ref();

    let file = File::create(path).map_err(|error| {
        BatchError::Io(format!("Failed to create {}: {}", path.display(), error))
    })?;

    let mut stream = BufWriter::new(file);
    stream
        .write_all(text.as_bytes())
        .and_then(|()| stream.flush())
        .map_err(|error| {
            BatchError::Io(format!("Failed to write {}: {}", path.display(), error))
        })?;

    debug!("{} bytes written to {}", text.len(), path.display());
    Ok(())
}
