use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::{
    BatchError,
    core::item::write_all,
    item::{json::JsonItemWriterBuilder, xml::XmlItemWriterBuilder},
};

/// Base name of every output file and root tag of the XML document.
pub const OUTPUT_NAME: &str = "students_in_room";

/// Tag used for records and list entries in XML output.
pub const XML_ITEM_TAG: &str = "field";

/// Output format of a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Xml,
}

impl OutputFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Xml => "xml",
        }
    }

    /// `students_in_room.json` or `students_in_room.xml`.
    pub fn file_name(&self) -> String {
        format!("{}.{}", OUTPUT_NAME, self.extension())
    }

    /// Serializes `items` into a complete document held in memory.
    pub fn serialize<T: Serialize>(&self, items: &[T]) -> Result<String, BatchError> {
        let bytes = match self {
            OutputFormat::Json => {
                let writer = JsonItemWriterBuilder::<T>::new()
                    .pretty_formatter(true)
                    .indent(b"  ")
                    .from_writer(Vec::new());
                write_all(&writer, items)?;
                writer.into_inner()?
            }
            OutputFormat::Xml => {
                let writer = XmlItemWriterBuilder::new()
                    .root_tag(OUTPUT_NAME)
                    .item_tag(XML_ITEM_TAG)
                    .indent(2)
                    .from_writer::<T, _>(Vec::new());
                write_all(&writer, items)?;
                writer.into_inner()?
            }
        };

        String::from_utf8(bytes).map_err(|error| BatchError::Serialization(error.to_string()))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for OutputFormat {
    type Err = BatchError;

    /// Accepts `json` or `xml` in any letter case.
    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "xml" => Ok(OutputFormat::Xml),
            _ => Err(BatchError::Validation(format!(
                "Incorrect serialization format \"{}\", expected json or xml",
                token
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OutputFormat;
    use crate::{BatchError, model::RoomWithStudents};

    fn scenario() -> Vec<RoomWithStudents> {
        vec![RoomWithStudents {
            id: 0,
            room_name: "Room #0".to_string(),
            students: vec!["Ivanov".to_string()],
        }]
    }

    #[test]
    fn tokens_are_case_insensitive() {
        assert_eq!("json".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("JSON".parse::<OutputFormat>().unwrap(), OutputFormat::Json);
        assert_eq!("Xml".parse::<OutputFormat>().unwrap(), OutputFormat::Xml);
    }

    #[test]
    fn unknown_token_is_a_validation_error() {
        assert!(matches!(
            "csv".parse::<OutputFormat>(),
            Err(BatchError::Validation(_))
        ));
        assert!(matches!(
            "".parse::<OutputFormat>(),
            Err(BatchError::Validation(_))
        ));
    }

    #[test]
    fn file_names_follow_the_format() {
        assert_eq!(OutputFormat::Json.file_name(), "students_in_room.json");
        assert_eq!(OutputFormat::Xml.file_name(), "students_in_room.xml");
    }

    #[test]
    fn json_serialization_is_two_space_indented() {
        let text = OutputFormat::Json.serialize(&scenario()).unwrap();

        assert_eq!(
            text,
            r#"[
  {
    "id": 0,
    "room_name": "Room #0",
    "students": [
      "Ivanov"
    ]
  }
]"#
        );
    }

    #[test]
    fn xml_serialization_uses_field_items() {
        let text = OutputFormat::Xml.serialize(&scenario()).unwrap();

        assert_eq!(
            text,
            r#"<?xml version="1.0" encoding="UTF-8"?>
<students_in_room>
  <field>
    <id>0</id>
    <room_name>Room #0</room_name>
    <students>
      <field>Ivanov</field>
    </students>
  </field>
</students_in_room>
"#
        );
    }

    #[test]
    fn empty_collections_serialize_to_empty_documents() {
        let empty: Vec<RoomWithStudents> = Vec::new();

        assert_eq!(OutputFormat::Json.serialize(&empty).unwrap(), "[]");
        assert!(
            OutputFormat::Xml
                .serialize(&empty)
                .unwrap()
                .ends_with("<students_in_room/>\n")
        );
    }
}
