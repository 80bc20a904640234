use std::fmt;

use serde::{Deserialize, Serialize};

/// A physical location, loaded from the rooms file.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub id: i64,
    pub name: String,
}

/// A student, loaded from the students file. `room` references [`Room::id`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Student {
    pub id: i64,
    pub name: String,
    pub room: i64,
}

/// A room together with the names of the students living in it.
///
/// Field order is the output order of both the JSON and the XML serializers.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RoomWithStudents {
    pub id: i64,
    pub room_name: String,
    pub students: Vec<String>,
}

impl RoomWithStudents {
    /// Creates an entry for `room` with no students yet.
    pub fn empty(room: &Room) -> Self {
        Self {
            id: room.id,
            room_name: room.name.clone(),
            students: Vec::new(),
        }
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{}, name:{}", self.id, self.name)
    }
}

impl fmt::Display for Student {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "id:{}, name:{}, room:{}", self.id, self.name, self.room)
    }
}
