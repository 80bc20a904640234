use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use env_logger::Env;
use log::info;

use students_in_room::{
    core::job::{Job, JobBuilder},
    format::OutputFormat,
    merge::JoinStrategy,
};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "Join rooms and students from JSON files and export them as JSON or XML",
    long_about = None
)]
struct Cli {
    /// JSON file holding an array of rooms: {"id": .., "name": ..}
    #[arg(value_name = "ROOMS")]
    rooms: PathBuf,

    /// JSON file holding an array of students: {"id": .., "name": .., "room": ..}
    #[arg(value_name = "STUDENTS")]
    students: PathBuf,

    /// Output format, json or xml (any case)
    #[arg(value_name = "FORMAT")]
    format: String,

    /// Directory receiving students_in_room.<format>
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    output_dir: PathBuf,

    /// How students are matched to rooms: by-id, positional or room-number
    #[arg(short, long, value_name = "STRATEGY", default_value = "by-id")]
    join: JoinStrategy,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // rejected before any file is opened
    let format: OutputFormat = cli.format.parse()?;

    let job = JobBuilder::new()
        .rooms_path(&cli.rooms)
        .students_path(&cli.students)
        .format(format)
        .output_dir(&cli.output_dir)
        .join_strategy(cli.join)
        .build()?;

    let execution = job
        .run()
        .with_context(|| format!("Job {} failed", job.name()))?;

    info!(
        "{} of {} students placed into {} rooms, written to {} in {:?}",
        execution.joined_count,
        execution.student_count,
        execution.room_count,
        execution.output.display(),
        execution.duration
    );

    Ok(())
}
