/// JSON support for reading and writing records.
///
/// The implementation uses `serde_json` for parsing and serialization.
///
/// 1. **JsonItemReader**: parses a document holding an array of objects and
///    hands the elements out one record at a time, in document order.
///
/// 2. **JsonItemWriter**: serializes items as a JSON array, either compact or
///    pretty-printed with a configurable indent.
///
/// # Examples
///
/// ## Reading from JSON
///
/// ```
/// use students_in_room::item::json::json_reader::JsonItemReaderBuilder;
/// use students_in_room::core::item::ItemReader;
/// use students_in_room::model::Student;
/// use std::io::Cursor;
///
/// let json_data = r#"[
///   {"id": 1, "name": "Ivanov", "room": 0},
///   {"id": 2, "name": "Petrov", "room": 1}
/// ]"#;
///
/// let reader = JsonItemReaderBuilder::<Student>::new()
///     .from_reader(Cursor::new(json_data))
///     .unwrap();
///
/// let mut students = Vec::new();
/// while let Some(student) = reader.read().unwrap() {
///     students.push(student);
/// }
///
/// assert_eq!(students.len(), 2);
/// assert_eq!(students[0].name, "Ivanov");
/// assert_eq!(students[1].room, 1);
/// ```
///
/// ## Writing to JSON
///
/// ```
/// use students_in_room::item::json::json_writer::JsonItemWriterBuilder;
/// use students_in_room::core::item::ItemWriter;
/// use students_in_room::model::RoomWithStudents;
///
/// let rooms = vec![RoomWithStudents {
///     id: 0,
///     room_name: "Room #0".to_string(),
///     students: vec!["Ivanov".to_string()],
/// }];
///
/// let writer = JsonItemWriterBuilder::<RoomWithStudents>::new()
///     .pretty_formatter(true)
///     .from_writer(Vec::new());
///
/// writer.open().unwrap();
/// writer.write(&rooms).unwrap();
/// writer.close().unwrap();
///
/// let content = String::from_utf8(writer.into_inner().unwrap()).unwrap();
/// assert_eq!(
///     content,
///     "[\n  {\n    \"id\": 0,\n    \"room_name\": \"Room #0\",\n    \"students\": [\n      \"Ivanov\"\n    ]\n  }\n]"
/// );
/// ```
pub mod json_reader;
pub mod json_writer;

pub use json_reader::{JsonItemReader, JsonItemReaderBuilder, load};
pub use json_writer::{JsonItemWriter, JsonItemWriterBuilder};
