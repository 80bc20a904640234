use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    fs::File,
    io::{BufReader, Read},
    marker::PhantomData,
    path::Path,
};

use log::debug;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    BatchError,
    core::item::{ItemReader, ItemReaderResult, read_all},
};

/// Reads records from a JSON document holding an array of objects.
///
/// The whole document is parsed when the reader is built, so the underlying
/// source is released before the first `read`. Each call to `read` then turns
/// the next array element into a `T`, in document order.
pub struct JsonItemReader<T> {
    _pd: PhantomData<T>,
    objects: RefCell<VecDeque<Value>>,
    index: Cell<usize>,
}

impl<T: DeserializeOwned> JsonItemReader<T> {
    fn new(objects: Vec<Value>) -> Self {
        Self {
            _pd: PhantomData,
            objects: RefCell::new(objects.into()),
            index: Cell::new(0),
        }
    }

    /// Number of records not read yet.
    pub fn remaining(&self) -> usize {
        self.objects.borrow().len()
    }
}

impl<T: DeserializeOwned> ItemReader<T> for JsonItemReader<T> {
    fn read(&self) -> ItemReaderResult<T> {
        let Some(object) = self.objects.borrow_mut().pop_front() else {
            return Ok(None);
        };

        let index = self.index.get();
        self.index.set(index + 1);

        debug!("object {}: {}", index, object);

        serde_json::from_value(object)
            .map(Some)
            .map_err(|error| BatchError::Validation(format!("record {}: {}", index, error)))
    }
}

/// Checks that `document` is an array of objects and returns its elements.
fn into_objects(document: Value) -> Result<Vec<Value>, BatchError> {
    let Value::Array(elements) = document else {
        return Err(BatchError::Parse(format!(
            "expected an array of objects, found {}",
            kind_of(&document)
        )));
    };

    if let Some((index, element)) = elements.iter().enumerate().find(|(_, e)| !e.is_object()) {
        return Err(BatchError::Parse(format!(
            "element {} is {}, expected an object",
            index,
            kind_of(element)
        )));
    }

    Ok(elements)
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

pub struct JsonItemReaderBuilder<T> {
    _pd: PhantomData<T>,
    capacity: usize,
}

impl<T: DeserializeOwned> Default for JsonItemReaderBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DeserializeOwned> JsonItemReaderBuilder<T> {
    pub fn new() -> JsonItemReaderBuilder<T> {
        Self {
            _pd: PhantomData,
            capacity: 8 * 1024,
        }
    }

    /// Buffer capacity used when reading from a file.
    pub fn capacity(mut self, capacity: usize) -> JsonItemReaderBuilder<T> {
        self.capacity = capacity;
        self
    }

    /// Parses the JSON document available from `rdr`.
    pub fn from_reader<R: Read>(self, rdr: R) -> Result<JsonItemReader<T>, BatchError> {
        let document: Value = serde_json::from_reader(rdr).map_err(|error| {
            if error.is_io() {
                BatchError::Io(error.to_string())
            } else {
                BatchError::Parse(error.to_string())
            }
        })?;

        Ok(JsonItemReader::new(into_objects(document)?))
    }

    /// Opens `path`, parses it and closes it again.
    pub fn from_path<P: AsRef<Path>>(self, path: P) -> Result<JsonItemReader<T>, BatchError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|error| {
            BatchError::Io(format!("Unable to open {}: {}", path.display(), error))
        })?;

        let capacity = self.capacity;
        self.from_reader(BufReader::with_capacity(capacity, file))
            .map_err(|error| match error {
                BatchError::Io(message) => {
                    BatchError::Io(format!("Unable to read {}: {}", path.display(), message))
                }
                BatchError::Parse(message) => {
                    BatchError::Parse(format!("{}: {}", path.display(), message))
                }
                other => other,
            })
    }
}

/// Loads every record of the JSON array stored at `path`.
pub fn load<T: DeserializeOwned, P: AsRef<Path>>(path: P) -> Result<Vec<T>, BatchError> {
    let reader = JsonItemReaderBuilder::<T>::new().from_path(path)?;
    read_all(&reader)
}
