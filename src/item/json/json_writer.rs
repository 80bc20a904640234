use std::{
    cell::{Cell, RefCell},
    fs::File,
    io::{BufWriter, Write},
    marker::PhantomData,
    path::Path,
};

use log::debug;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

use crate::{
    BatchError,
    core::item::{ItemWriter, ItemWriterResult},
};

/// Writes items as a JSON array.
///
/// With the pretty formatter enabled the output is identical to
/// `serde_json::to_string_pretty` applied to the whole slice of items,
/// using the configured indent.
pub struct JsonItemWriter<T, W: Write> {
    stream: RefCell<BufWriter<W>>,
    use_pretty_formatter: bool,
    indent: Vec<u8>,
    count: Cell<usize>,
    _pd: PhantomData<T>,
}

impl<T: Serialize, W: Write> JsonItemWriter<T, W> {
    fn to_bytes(&self, item: &T) -> Result<Vec<u8>, BatchError> {
        let mut buffer = Vec::new();
        let result = if self.use_pretty_formatter {
            let formatter = PrettyFormatter::with_indent(&self.indent);
            let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
            item.serialize(&mut serializer)
        } else {
            serde_json::to_writer(&mut buffer, item)
        };

        result.map_err(|error| BatchError::Serialization(error.to_string()))?;
        Ok(buffer)
    }

    fn write_raw(&self, bytes: &[u8]) -> ItemWriterResult {
        self.stream
            .borrow_mut()
            .write_all(bytes)
            .map_err(|error| BatchError::Io(format!("Failed to write JSON: {}", error)))
    }

    /// Number of items written since `open`.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Flushes and returns the underlying writer.
    pub fn into_inner(self) -> Result<W, BatchError> {
        self.stream
            .into_inner()
            .into_inner()
            .map_err(|error| BatchError::Io(format!("Failed to flush JSON: {}", error.error())))
    }
}

impl<T: Serialize, W: Write> ItemWriter<T> for JsonItemWriter<T, W> {
    fn write(&self, items: &[T]) -> ItemWriterResult {
        for item in items {
            let bytes = self.to_bytes(item)?;

            let mut chunk = Vec::with_capacity(bytes.len() + self.indent.len() + 2);
            if self.count.get() > 0 {
                chunk.push(b',');
            }

            if self.use_pretty_formatter {
                // every item sits one level inside the array
                chunk.push(b'\n');
                for (n, line) in bytes.split(|b| *b == b'\n').enumerate() {
                    if n > 0 {
                        chunk.push(b'\n');
                    }
                    chunk.extend_from_slice(&self.indent);
                    chunk.extend_from_slice(line);
                }
            } else {
                chunk.extend_from_slice(&bytes);
            }

            self.write_raw(&chunk)?;
            self.count.set(self.count.get() + 1);
        }
        debug!("{} JSON items written", self.count.get());
        Ok(())
    }

    fn flush(&self) -> ItemWriterResult {
        self.stream
            .borrow_mut()
            .flush()
            .map_err(|error| BatchError::Io(format!("Failed to flush JSON: {}", error)))
    }

    fn open(&self) -> ItemWriterResult {
        self.count.set(0);
        self.write_raw(b"[")
    }

    fn close(&self) -> ItemWriterResult {
        if self.use_pretty_formatter && self.count.get() > 0 {
            self.write_raw(b"\n]")?;
        } else {
            self.write_raw(b"]")?;
        }
        self.flush()
    }
}

pub struct JsonItemWriterBuilder<T> {
    indent: Box<[u8]>,
    pretty_formatter: bool,
    _pd: PhantomData<T>,
}

impl<T> Default for JsonItemWriterBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> JsonItemWriterBuilder<T> {
    pub fn new() -> JsonItemWriterBuilder<T> {
        JsonItemWriterBuilder {
            indent: Box::from(b"  ".to_vec()),
            pretty_formatter: false,
            _pd: PhantomData,
        }
    }

    pub fn indent(mut self, indent: &[u8]) -> JsonItemWriterBuilder<T> {
        self.indent = Box::from(indent);
        self
    }

    pub fn pretty_formatter(mut self, yes: bool) -> JsonItemWriterBuilder<T> {
        self.pretty_formatter = yes;
        self
    }

    pub fn from_writer<W: Write>(self, wtr: W) -> JsonItemWriter<T, W> {
        JsonItemWriter {
            stream: RefCell::new(BufWriter::new(wtr)),
            use_pretty_formatter: self.pretty_formatter,
            indent: self.indent.into_vec(),
            count: Cell::new(0),
            _pd: PhantomData,
        }
    }

    /// Creates (or truncates) the file at `path`.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<JsonItemWriter<T, File>, BatchError> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|error| {
            BatchError::Io(format!("Failed to create {}: {}", path.display(), error))
        })?;
        Ok(self.from_writer(file))
    }
}
