mod common;

use std::fs;

use students_in_room::{
    core::job::{Job, JobBuilder, JobState, run},
    format::OutputFormat,
    item::json::load,
    merge::{JoinStrategy, merge},
    model::{Room, RoomWithStudents, Student},
};

const SCENARIO_ROOMS: &str = r#"[{"id": 0, "name": "Room #0"}]"#;
const SCENARIO_STUDENTS: &str = r#"[{"id": 1, "name": "Ivanov", "room": 0}]"#;

#[test]
fn scenario_a_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(dir.path(), SCENARIO_ROOMS, SCENARIO_STUDENTS);

    let execution = run(&rooms, &students, "json", dir.path()).unwrap();

    assert_eq!(execution.state, JobState::Done);
    let content = fs::read_to_string(dir.path().join("students_in_room.json")).unwrap();
    assert_eq!(
        content,
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

    let compact: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(
        compact.to_string(),
        r#"[{"id":0,"room_name":"Room #0","students":["Ivanov"]}]"#
    );
}

#[test]
fn scenario_b_xml_output() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(dir.path(), SCENARIO_ROOMS, SCENARIO_STUDENTS);

    run(&rooms, &students, "XML", dir.path()).unwrap();

    let content = fs::read_to_string(dir.path().join("students_in_room.xml")).unwrap();
    assert!(content.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<students_in_room>"));
    assert_eq!(content.matches("<room_name>").count(), 1);
    assert!(content.contains("<room_name>Room #0</room_name>"));
    assert!(content.contains("<students>\n      <field>Ivanov</field>\n    </students>"));
    assert!(content.ends_with("</students_in_room>\n"));
}

#[test]
fn scenario_c_unsupported_format_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(dir.path(), SCENARIO_ROOMS, SCENARIO_STUDENTS);

    let result = run(&rooms, &students, "csv", dir.path());

    let error = result.unwrap_err();
    assert!(matches!(error, students_in_room::BatchError::Validation(_)));
    assert!(error.step().is_none());
    let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
    assert_eq!(entries.len(), 2);
}

#[test]
fn scenario_d_student_of_unknown_room_is_omitted() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(
        dir.path(),
        SCENARIO_ROOMS,
        r#"[{"id": 1, "name": "Ivanov", "room": 0}, {"id": 2, "name": "Ghost", "room": 9}]"#,
    );

    let execution = run(&rooms, &students, "json", dir.path()).unwrap();

    assert_eq!(execution.student_count, 2);
    assert_eq!(execution.joined_count, 1);
    let merged: Vec<RoomWithStudents> = load(dir.path().join("students_in_room.json")).unwrap();
    assert_eq!(merged.len(), 1);
    assert_eq!(merged[0].students, vec!["Ivanov".to_string()]);
}

#[test]
fn json_output_round_trips_to_the_merged_structure() {
    let rooms: Vec<Room> = load(common::data("rooms.json")).unwrap();
    let students: Vec<Student> = load(common::data("students.json")).unwrap();
    let expected = merge(&rooms, &students);

    let dir = tempfile::tempdir().unwrap();
    let execution = JobBuilder::new()
        .rooms_path(common::data("rooms.json"))
        .students_path(common::data("students.json"))
        .format(OutputFormat::Json)
        .output_dir(dir.path())
        .build()
        .unwrap()
        .run()
        .unwrap();

    let written: Vec<RoomWithStudents> = load(&execution.output).unwrap();
    assert_eq!(written, expected);
    assert_eq!(written.len(), rooms.len());
    assert_eq!(
        written[2].students,
        vec![
            "Peggy Ryan".to_string(),
            "Lena Hughes".to_string(),
            "Omar Diaz".to_string()
        ]
    );
}

#[test]
fn running_twice_produces_identical_files() {
    for format in [OutputFormat::Json, OutputFormat::Xml] {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();

        for dir in [&first, &second] {
            JobBuilder::new()
                .rooms_path(common::data("rooms.json"))
                .students_path(common::data("students.json"))
                .format(format)
                .output_dir(dir.path())
                .build()
                .unwrap()
                .run()
                .unwrap();
        }

        let a = fs::read(first.path().join(format.file_name())).unwrap();
        let b = fs::read(second.path().join(format.file_name())).unwrap();
        assert_eq!(a, b);
    }
}

#[test]
fn empty_inputs_produce_empty_collections() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(dir.path(), "[]", "[]");

    run(&rooms, &students, "json", dir.path()).unwrap();
    run(&rooms, &students, "xml", dir.path()).unwrap();

    assert_eq!(
        fs::read_to_string(dir.path().join("students_in_room.json")).unwrap(),
        "[]"
    );
    assert_eq!(
        fs::read_to_string(dir.path().join("students_in_room.xml")).unwrap(),
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<students_in_room/>\n"
    );
}

#[test]
fn rooms_without_students_keep_an_empty_list() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(dir.path(), SCENARIO_ROOMS, "[]");

    run(&rooms, &students, "xml", dir.path()).unwrap();

    let content = fs::read_to_string(dir.path().join("students_in_room.xml")).unwrap();
    assert!(content.contains("<room_name>Room #0</room_name>\n    <students/>"));
}

#[test]
fn existing_output_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(dir.path(), SCENARIO_ROOMS, SCENARIO_STUDENTS);
    fs::write(
        dir.path().join("students_in_room.json"),
        "stale content that is longer",
    )
    .unwrap();

    run(&rooms, &students, "json", dir.path()).unwrap();

    let merged: Vec<RoomWithStudents> = load(dir.path().join("students_in_room.json")).unwrap();
    assert_eq!(merged[0].room_name, "Room #0");
}

#[test]
fn positional_join_follows_the_legacy_behaviour() {
    let dir = tempfile::tempdir().unwrap();
    let (rooms, students) = common::write_inputs(
        dir.path(),
        r#"[{"id": 5, "name": "Room #5"}, {"id": 1, "name": "Room #1"}]"#,
        r#"[{"id": 1, "name": "Ivanov", "room": 5}, {"id": 2, "name": "Petrov", "room": 1}]"#,
    );

    let by_position = JobBuilder::new()
        .rooms_path(&rooms)
        .students_path(&students)
        .format(OutputFormat::Json)
        .output_dir(dir.path())
        .join_strategy(JoinStrategy::Positional)
        .build()
        .unwrap()
        .run()
        .unwrap();
    assert_eq!(by_position.joined_count, 1);

    let by_id = run(&rooms, &students, "json", dir.path()).unwrap();
    assert_eq!(by_id.joined_count, 2);
}
