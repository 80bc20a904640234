//! Joining students into the rooms they live in.
//!
//! The merger builds one [`RoomWithStudents`] per room, in room order, and
//! then appends every student's name to the entry that owns it. Students
//! without an owner are left out and only reported in the log.

use std::{collections::HashMap, fmt, str::FromStr};

use log::{debug, warn};

use crate::{
    BatchError,
    model::{Room, RoomWithStudents, Student},
};

/// How a student's `room` value is matched against rooms.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum JoinStrategy {
    /// `student.room` is looked up among room ids.
    #[default]
    ById,
    /// `student.room` is used as a position in the room list, and the room at
    /// that position must also carry that id. Only correct when room ids are
    /// `0, 1, 2, ...` in load order.
    Positional,
    /// `student.room` is compared with the first number found in each room's
    /// name, so `"Room #12"` owns students with `room == 12`.
    ///
    /// Only ASCII digits count. A room whose digit run does not fit in an
    /// `i64` has no number, so it owns no students.
    RoomNumber,
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JoinStrategy::ById => "by-id",
            JoinStrategy::Positional => "positional",
            JoinStrategy::RoomNumber => "room-number",
        };
        f.write_str(name)
    }
}

impl FromStr for JoinStrategy {
    type Err = BatchError;

    fn from_str(token: &str) -> Result<Self, Self::Err> {
        match token.to_ascii_lowercase().as_str() {
            "by-id" | "id" => Ok(JoinStrategy::ById),
            "positional" => Ok(JoinStrategy::Positional),
            "room-number" => Ok(JoinStrategy::RoomNumber),
            other => Err(BatchError::Validation(format!(
                "unknown join strategy \"{}\", expected by-id, positional or room-number",
                other
            ))),
        }
    }
}

/// Joins students into rooms with a given [`JoinStrategy`].
#[derive(Debug, Default, Clone, Copy)]
pub struct RoomStudentMerger {
    strategy: JoinStrategy,
}

impl RoomStudentMerger {
    pub fn new(strategy: JoinStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> JoinStrategy {
        self.strategy
    }

    /// Builds one entry per room, in room order, holding the names of its
    /// students in student order.
    pub fn merge(&self, rooms: &[Room], students: &[Student]) -> Vec<RoomWithStudents> {
        let mut merged: Vec<RoomWithStudents> = rooms.iter().map(RoomWithStudents::empty).collect();

        let omitted = match self.strategy {
            JoinStrategy::ById => join_by_id(&mut merged, students),
            JoinStrategy::Positional => join_positional(&mut merged, students),
            JoinStrategy::RoomNumber => join_by_room_number(&mut merged, students),
        };

        if omitted > 0 {
            warn!(
                "{} student(s) reference no known room and were omitted ({} join)",
                omitted, self.strategy
            );
        }
        debug!(
            "merged {} students into {} rooms",
            students.len() - omitted,
            merged.len()
        );

        merged
    }
}

/// Joins with [`JoinStrategy::ById`], see [`RoomStudentMerger::merge`].
pub fn merge(rooms: &[Room], students: &[Student]) -> Vec<RoomWithStudents> {
    RoomStudentMerger::default().merge(rooms, students)
}

fn join_by_id(merged: &mut [RoomWithStudents], students: &[Student]) -> usize {
    let mut owners: HashMap<i64, usize> = HashMap::with_capacity(merged.len());
    for (index, entry) in merged.iter().enumerate() {
        // first room wins on duplicate ids
        owners.entry(entry.id).or_insert(index);
    }

    let mut omitted = 0;
    for student in students {
        match owners.get(&student.room) {
            Some(&index) => merged[index].students.push(student.name.clone()),
            None => {
                debug!("no room with id {} for student {}", student.room, student);
                omitted += 1;
            }
        }
    }
    omitted
}

fn join_positional(merged: &mut [RoomWithStudents], students: &[Student]) -> usize {
    let mut omitted = 0;
    for student in students {
        let owner = usize::try_from(student.room)
            .ok()
            .and_then(|position| merged.get_mut(position))
            .filter(|entry| entry.id == student.room);

        match owner {
            Some(entry) => entry.students.push(student.name.clone()),
            None => {
                debug!(
                    "no room at position {} for student {}",
                    student.room, student
                );
                omitted += 1;
            }
        }
    }
    omitted
}

fn join_by_room_number(merged: &mut [RoomWithStudents], students: &[Student]) -> usize {
    let numbers: Vec<Option<i64>> = merged
        .iter()
        .map(|entry| first_number(&entry.room_name))
        .collect();

    let mut omitted = 0;
    for student in students {
        let mut owned = false;
        for (entry, number) in merged.iter_mut().zip(&numbers) {
            if *number == Some(student.room) {
                entry.students.push(student.name.clone());
                owned = true;
            }
        }
        if !owned {
            debug!("no room numbered {} for student {}", student.room, student);
            omitted += 1;
        }
    }
    omitted
}

/// First run of ASCII digits in `text`, if any.
fn first_number(text: &str) -> Option<i64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let digits = &text[start..];
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse().ok()
}
