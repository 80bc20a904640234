use crate::core::item::{ItemWriter, ItemWriterResult};
use crate::error::BatchError;
use log::debug;
use quick_xml::{
    Writer,
    escape::partial_escape,
    events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use serde::Serialize;
use serde_json::{Map, Value};
use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::marker::PhantomData;
use std::path::Path;

/// A writer that writes items to an XML document.
///
/// Items are shaped into elements without attributes:
///
/// - every item becomes an element named after the item tag;
/// - every field of an item becomes a nested element named after the field;
/// - scalar values become text content;
/// - a list becomes an element holding one item-tag element per entry;
/// - `null` and empty lists become empty elements.
///
/// Items must serialize to flat objects whose lists hold scalars only.
/// Anything deeper is rejected with [`BatchError::Serialization`].
///
/// # Examples
///
/// ```
/// use students_in_room::item::xml::xml_writer::XmlItemWriterBuilder;
/// use students_in_room::core::item::ItemWriter;
/// use students_in_room::model::RoomWithStudents;
///
/// let rooms = vec![RoomWithStudents {
///     id: 0,
///     room_name: "Room #0".to_string(),
///     students: vec!["Ivanov".to_string()],
/// }];
///
/// let writer = XmlItemWriterBuilder::new()
///     .root_tag("students_in_room")
///     .item_tag("field")
///     .from_writer::<RoomWithStudents, _>(Vec::new());
///
/// writer.open().unwrap();
/// writer.write(&rooms).unwrap();
/// writer.close().unwrap();
///
/// let content = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert!(content.contains("<room_name>Room #0</room_name>"));
/// assert!(content.contains("<students>\n      <field>Ivanov</field>\n    </students>"));
/// ```
pub struct XmlItemWriter<T, W: Write = File> {
    writer: RefCell<Writer<BufWriter<W>>>,
    item_tag: String,
    root_tag: String,
    declaration: bool,
    root_open: Cell<bool>,
    count: Cell<usize>,
    _phantom: PhantomData<T>,
}

fn io_error(error: impl std::fmt::Display) -> BatchError {
    BatchError::Io(format!("Failed to write XML: {}", error))
}

/// Element names must start with a letter or `_` and contain only letters,
/// digits, `-`, `_` and `.`.
fn check_element_name(name: &str) -> Result<(), BatchError> {
    let mut chars = name.chars();
    let valid_start = chars.next().is_some_and(|c| c.is_alphabetic() || c == '_');
    let valid_rest = chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.'));

    if valid_start && valid_rest {
        Ok(())
    } else {
        Err(BatchError::Serialization(format!(
            "\"{}\" is not a valid XML element name",
            name
        )))
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.clone()),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl<T, W: Write> XmlItemWriter<T, W> {
    fn write_text_element(
        writer: &mut Writer<BufWriter<W>>,
        name: &str,
        text: &str,
    ) -> ItemWriterResult {
        writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(io_error)?;
        writer
            .write_event(Event::Text(BytesText::from_escaped(partial_escape(text))))
            .map_err(io_error)?;
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(io_error)
    }

    fn write_empty_element(writer: &mut Writer<BufWriter<W>>, name: &str) -> ItemWriterResult {
        writer
            .write_event(Event::Empty(BytesStart::new(name)))
            .map_err(io_error)
    }

    fn write_list(
        &self,
        writer: &mut Writer<BufWriter<W>>,
        name: &str,
        entries: &[Value],
    ) -> ItemWriterResult {
        if entries.is_empty() {
            return Self::write_empty_element(writer, name);
        }

        writer
            .write_event(Event::Start(BytesStart::new(name)))
            .map_err(io_error)?;
        for entry in entries {
            match scalar_text(entry) {
                Some(text) => Self::write_text_element(writer, &self.item_tag, &text)?,
                None if entry.is_null() => Self::write_empty_element(writer, &self.item_tag)?,
                None => {
                    return Err(BatchError::Serialization(format!(
                        "list \"{}\" holds a nested structure",
                        name
                    )));
                }
            }
        }
        writer
            .write_event(Event::End(BytesEnd::new(name)))
            .map_err(io_error)
    }

    fn write_field(
        &self,
        writer: &mut Writer<BufWriter<W>>,
        name: &str,
        value: &Value,
    ) -> ItemWriterResult {
        check_element_name(name)?;

        match value {
            Value::Null => Self::write_empty_element(writer, name),
            Value::Array(entries) => self.write_list(writer, name, entries),
            Value::Object(_) => Err(BatchError::Serialization(format!(
                "field \"{}\" holds a nested object",
                name
            ))),
            scalar => match scalar_text(scalar) {
                Some(text) => Self::write_text_element(writer, name, &text),
                None => Err(BatchError::Serialization(format!(
                    "field \"{}\" has an unsupported value",
                    name
                ))),
            },
        }
    }

    fn write_item(
        &self,
        writer: &mut Writer<BufWriter<W>>,
        fields: &Map<String, Value>,
    ) -> ItemWriterResult {
        writer
            .write_event(Event::Start(BytesStart::new(self.item_tag.as_str())))
            .map_err(io_error)?;
        for (name, value) in fields {
            self.write_field(writer, name, value)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new(self.item_tag.as_str())))
            .map_err(io_error)
    }

    /// Number of items written since `open`.
    pub fn count(&self) -> usize {
        self.count.get()
    }

    /// Returns the underlying writer once the document is closed.
    pub fn into_inner(self) -> Result<W, BatchError> {
        self.writer
            .into_inner()
            .into_inner()
            .into_inner()
            .map_err(|e| io_error(e.error()))
    }
}

impl<T, W: Write> ItemWriter<T> for XmlItemWriter<T, W>
where
    T: Serialize,
{
    fn write(&self, items: &[T]) -> ItemWriterResult {
        if items.is_empty() {
            return Ok(());
        }

        let values = items
            .iter()
            .map(serde_json::to_value)
            .collect::<Result<Vec<Value>, _>>()
            .map_err(|e| BatchError::Serialization(e.to_string()))?;

        let mut writer = self.writer.borrow_mut();

        if !self.root_open.get() {
            writer
                .write_event(Event::Start(BytesStart::new(self.root_tag.as_str())))
                .map_err(io_error)?;
            self.root_open.set(true);
        }

        for value in &values {
            let Value::Object(fields) = value else {
                return Err(BatchError::Serialization(format!(
                    "item {} is not a record",
                    self.count.get()
                )));
            };
            self.write_item(&mut writer, fields)?;
            self.count.set(self.count.get() + 1);
        }

        debug!("{} XML items written", self.count.get());
        Ok(())
    }

    fn flush(&self) -> ItemWriterResult {
        self.writer
            .borrow_mut()
            .get_mut()
            .flush()
            .map_err(|e| BatchError::Io(format!("Failed to flush XML: {}", e)))
    }

    fn open(&self) -> ItemWriterResult {
        check_element_name(&self.root_tag)?;
        check_element_name(&self.item_tag)?;
        self.count.set(0);
        self.root_open.set(false);

        if self.declaration {
            self.writer
                .borrow_mut()
                .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
                .map_err(io_error)?;
        }
        Ok(())
    }

    fn close(&self) -> ItemWriterResult {
        {
            let mut writer = self.writer.borrow_mut();
            if self.root_open.get() {
                writer
                    .write_event(Event::End(BytesEnd::new(self.root_tag.as_str())))
                    .map_err(io_error)?;
                self.root_open.set(false);
            } else {
                Self::write_empty_element(&mut writer, &self.root_tag)?;
            }
            writer.get_mut().write_all(b"\n").map_err(io_error)?;
        }
        self.flush()
    }
}

/// Builder for creating XML item writers.
///
/// Defaults: root tag `root`, item tag `field`, two-space indentation and an
/// XML declaration.
pub struct XmlItemWriterBuilder {
    root_tag: String,
    item_tag: String,
    indent: usize,
    declaration: bool,
}

impl Default for XmlItemWriterBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl XmlItemWriterBuilder {
    pub fn new() -> Self {
        Self {
            root_tag: "root".to_string(),
            item_tag: "field".to_string(),
            indent: 2,
            declaration: true,
        }
    }

    /// Sets the root tag wrapping all items.
    pub fn root_tag(mut self, root_tag: &str) -> Self {
        self.root_tag = root_tag.to_string();
        self
    }

    /// Sets the tag used for each item and for each list entry.
    pub fn item_tag(mut self, item_tag: &str) -> Self {
        self.item_tag = item_tag.to_string();
        self
    }

    /// Spaces per nesting level; `0` writes everything on one line.
    pub fn indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    pub fn declaration(mut self, yes: bool) -> Self {
        self.declaration = yes;
        self
    }

    /// Creates an `XmlItemWriter` from a file path, truncating any existing file.
    pub fn from_path<T: Serialize, P: AsRef<Path>>(
        self,
        path: P,
    ) -> Result<XmlItemWriter<T>, BatchError> {
        let file = File::create(path)
            .map_err(|e| BatchError::Io(format!("Failed to create XML file: {}", e)))?;
        Ok(self.from_writer(file))
    }

    /// Creates an `XmlItemWriter` from a writer.
    pub fn from_writer<T: Serialize, W: Write>(self, wtr: W) -> XmlItemWriter<T, W> {
        let writer = if self.indent == 0 {
            Writer::new(BufWriter::new(wtr))
        } else {
            Writer::new_with_indent(BufWriter::new(wtr), b' ', self.indent)
        };

        XmlItemWriter {
            writer: RefCell::new(writer),
            item_tag: self.item_tag,
            root_tag: self.root_tag,
            declaration: self.declaration,
            root_open: Cell::new(false),
            count: Cell::new(0),
            _phantom: PhantomData,
        }
    }
}
