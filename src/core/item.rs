use crate::error::BatchError;

/// Result of a single read: `Ok(None)` once the source is exhausted.
pub type ItemReaderResult<R> = Result<Option<R>, BatchError>;

/// Result of a writer operation.
pub type ItemWriterResult = Result<(), BatchError>;

/// Retrieval of input records, one item at a time.
pub trait ItemReader<R> {
    /// Reads the next item.
    ///
    /// # Returns
    /// - `Ok(Some(item))` when an item was read
    /// - `Ok(None)` when there are no more items
    /// - `Err(BatchError)` when the next item could not be produced
    fn read(&self) -> ItemReaderResult<R>;
}

/// Output of records to a destination.
///
/// Writers are driven as `open`, one or more `write`, then `close`.
pub trait ItemWriter<W> {
    fn write(&self, items: &[W]) -> ItemWriterResult;

    fn flush(&self) -> ItemWriterResult {
        Ok(())
    }

    fn open(&self) -> ItemWriterResult {
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        Ok(())
    }
}

/// Drains a reader into a vector, stopping at the first error.
pub fn read_all<R>(reader: &dyn ItemReader<R>) -> Result<Vec<R>, BatchError> {
    let mut items = Vec::new();
    while let Some(item) = reader.read()? {
        items.push(item);
    }
    Ok(items)
}

/// Runs a full writer lifecycle over `items`.
pub fn write_all<W>(writer: &dyn ItemWriter<W>, items: &[W]) -> ItemWriterResult {
    writer.open()?;
    writer.write(items)?;
    writer.close()
}
