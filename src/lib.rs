#![cfg_attr(docsrs, feature(doc_cfg))]

/*!
 # Students in Room

 A small batch job that reads rooms and students from two JSON files, joins
 every student into the room it lives in and exports the result as JSON or XML.

 ## Core Concepts

- **Job:** the whole run. A [`MergeJob`](core::job::MergeJob) moves through
  `Idle → Loaded → Merged → Serialized → Written → Done`, once.
- **ItemReader:** retrieval of input records. [`JsonItemReader`](item::json::JsonItemReader)
  reads an array of objects.
- **Merger:** [`RoomStudentMerger`](merge::RoomStudentMerger) builds one
  [`RoomWithStudents`](model::RoomWithStudents) per room.
- **ItemWriter:** serialization of the merged records.
  [`JsonItemWriter`](item::json::JsonItemWriter) and
  [`XmlItemWriter`](item::xml::XmlItemWriter), selected by
  [`OutputFormat`](format::OutputFormat).

 ## Input

```json
[{"id": 0, "name": "Room #0"}]
```

```json
[{"id": 1, "name": "Ivanov", "room": 0}]
```

 ## Output

`students_in_room.json`:

```json
[
  {
    "id": 0,
    "room_name": "Room #0",
    "students": [
      "Ivanov"
    ]
  }
]
```

`students_in_room.xml`:

```xml
<?xml version="1.0" encoding="UTF-8"?>
<students_in_room>
  <field>
    <id>0</id>
    <room_name>Room #0</room_name>
    <students>
      <field>Ivanov</field>
    </students>
  </field>
</students_in_room>
```

 ## Getting Started

```rust
# use students_in_room::{
#     core::job::{Job, JobBuilder},
#     error::BatchError,
#     format::OutputFormat,
#     merge::JoinStrategy,
# };
# use std::fs;
fn main() -> Result<(), BatchError> {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("rooms.json"), r#"[{"id": 0, "name": "Room #0"}]"#).unwrap();
    fs::write(
        dir.path().join("students.json"),
        r#"[{"id": 1, "name": "Ivanov", "room": 0}]"#,
    )
    .unwrap();

    let job = JobBuilder::new()
        .rooms_path(dir.path().join("rooms.json"))
        .students_path(dir.path().join("students.json"))
        .format("xml".parse::<OutputFormat>()?)
        .join_strategy(JoinStrategy::ById)
        .output_dir(dir.path())
        .build()?;

    let execution = job.run()?;

    assert_eq!(execution.joined_count, 1);
    assert!(dir.path().join("students_in_room.xml").exists());

    Ok(())
}
```
 */

/// Job orchestration and the reader / writer contracts
pub mod core;

/// Error types for batch operations
pub mod error;

#[doc(inline)]
pub use error::*;

/// Output formats and their serializers
pub mod format;

/// Set of items readers / writers (JSON reader, JSON and XML writers)
pub mod item;

/// Joining students into rooms
pub mod merge;

/// Rooms, students and the merged records
pub mod model;
