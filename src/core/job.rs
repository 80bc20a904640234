use std::{
    cell::Cell,
    fmt,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use log::{error, info};
use uuid::Uuid;

use crate::{
    BatchError,
    format::OutputFormat,
    item::{file::write_text, json::load},
    merge::{JoinStrategy, RoomStudentMerger},
    model::{Room, Student},
};

use super::build_name;

/// Type alias for job execution results.
type JobResult<T> = Result<T, BatchError>;

/// Represents a job that can be executed.
pub trait Job {
    /// Runs the job and returns the result of the job execution.
    ///
    /// # Returns
    /// - `Ok(JobExecution)` when the job executes successfully
    /// - `Err(BatchError)` when the job execution fails
    fn run(&self) -> JobResult<JobExecution>;
}

/// Progress of a [`MergeJob`].
///
/// A job moves forward one state per stage and never goes back:
/// `Idle → Loaded → Merged → Serialized → Written → Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Loaded,
    Merged,
    Serialized,
    Written,
    Done,
}

impl fmt::Display for JobState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            JobState::Idle => "idle",
            JobState::Loaded => "loaded",
            JobState::Merged => "merged",
            JobState::Serialized => "serialized",
            JobState::Written => "written",
            JobState::Done => "done",
        };
        f.write_str(name)
    }
}

/// Represents the execution of a job.
#[derive(Debug)]
pub struct JobExecution {
    /// The time when the job started executing
    pub start: Instant,
    /// The time when the job finished executing
    pub end: Instant,
    /// The total duration of the job execution
    pub duration: Duration,
    /// State reached by the job, `Done` on success
    pub state: JobState,
    pub room_count: usize,
    pub student_count: usize,
    /// Number of students that found their room
    pub joined_count: usize,
    /// File the serialized result was written to
    pub output: PathBuf,
}

/// Loads rooms and students, joins them and writes the result in one format.
///
/// A `MergeJob` runs at most once: a second call to `run` is rejected with a
/// validation error, whatever the outcome of the first one.
pub struct MergeJob {
    /// Unique identifier for this job instance
    id: Uuid,
    /// Human-readable name for the job
    name: String,
    rooms_path: PathBuf,
    students_path: PathBuf,
    format: OutputFormat,
    output_dir: PathBuf,
    merger: RoomStudentMerger,
    state: Cell<JobState>,
    started: Cell<bool>,
}

impl MergeJob {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn state(&self) -> JobState {
        self.state.get()
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Path of the file the job writes.
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(self.format.file_name())
    }

    /// Runs `stage` and moves to `next` on success.
    ///
    /// Failures are logged here and wrapped with the stage name; the state is
    /// left untouched.
    fn stage<T>(
        &self,
        step: &str,
        next: JobState,
        stage: impl FnOnce() -> JobResult<T>,
    ) -> JobResult<T> {
        match stage() {
            Ok(value) => {
                self.state.set(next);
                Ok(value)
            }
            Err(source) => {
                error!(
                    "Step {} of job {} failed in state {}: {}",
                    step,
                    self.name,
                    self.state.get(),
                    source
                );
                Err(BatchError::Step {
                    step: step.to_string(),
                    source: Box::new(source),
                })
            }
        }
    }
}

impl Job for MergeJob {
    fn run(&self) -> JobResult<JobExecution> {
        if self.started.replace(true) {
            return Err(BatchError::Validation(format!(
                "job {} has already run (state: {})",
                self.name,
                self.state.get()
            )));
        }

        let start = Instant::now();
        info!("Start of job: {}, id: {}", self.name, self.id);

        let (rooms, students) = self.stage("load", JobState::Loaded, || {
            let rooms: Vec<Room> = load(&self.rooms_path)?;
            let students: Vec<Student> = load(&self.students_path)?;
            Ok((rooms, students))
        })?;
        info!(
            "Loaded {} rooms from {} and {} students from {}",
            rooms.len(),
            self.rooms_path.display(),
            students.len(),
            self.students_path.display()
        );

        let merged = self.stage("merge", JobState::Merged, || {
            Ok(self.merger.merge(&rooms, &students))
        })?;
        let joined_count: usize = merged.iter().map(|entry| entry.students.len()).sum();
        info!(
            "Merged {} students into {} rooms ({} join)",
            joined_count,
            merged.len(),
            self.merger.strategy()
        );

        let text = self.stage("serialize", JobState::Serialized, || {
            self.format.serialize(&merged)
        })?;
        info!("Serialized {} rooms into {}", merged.len(), self.format);

        let output = self.output_path();
        self.stage("write", JobState::Written, || write_text(&text, &output))?;
        info!("Wrote {}", output.display());

        self.state.set(JobState::Done);
        info!("End of job: {}, id: {}", self.name, self.id);

        Ok(JobExecution {
            start,
            end: Instant::now(),
            duration: start.elapsed(),
            state: self.state.get(),
            room_count: rooms.len(),
            student_count: students.len(),
            joined_count,
            output,
        })
    }
}

/// Builder for creating a [`MergeJob`].
///
/// Rooms path, students path and format are required; the output directory
/// defaults to the working directory and the join strategy to
/// [`JoinStrategy::ById`].
#[derive(Default)]
pub struct JobBuilder {
    /// Optional name for the job (generated randomly if not specified)
    name: Option<String>,
    rooms_path: Option<PathBuf>,
    students_path: Option<PathBuf>,
    format: Option<OutputFormat>,
    output_dir: Option<PathBuf>,
    join_strategy: JoinStrategy,
}

impl JobBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: String) -> JobBuilder {
        self.name = Some(name);
        self
    }

    pub fn rooms_path<P: AsRef<Path>>(mut self, path: P) -> JobBuilder {
        self.rooms_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn students_path<P: AsRef<Path>>(mut self, path: P) -> JobBuilder {
        self.students_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn format(mut self, format: OutputFormat) -> JobBuilder {
        self.format = Some(format);
        self
    }

    pub fn output_dir<P: AsRef<Path>>(mut self, dir: P) -> JobBuilder {
        self.output_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn join_strategy(mut self, strategy: JoinStrategy) -> JobBuilder {
        self.join_strategy = strategy;
        self
    }

    /// Builds the job, failing with a validation error when a required
    /// setting is missing.
    pub fn build(self) -> JobResult<MergeJob> {
        let missing = |setting: &str| BatchError::Validation(format!("{} is required", setting));

        Ok(MergeJob {
            id: Uuid::new_v4(),
            name: self.name.unwrap_or_else(build_name),
            rooms_path: self.rooms_path.ok_or_else(|| missing("rooms path"))?,
            students_path: self.students_path.ok_or_else(|| missing("students path"))?,
            format: self.format.ok_or_else(|| missing("output format"))?,
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            merger: RoomStudentMerger::new(self.join_strategy),
            state: Cell::new(JobState::Idle),
            started: Cell::new(false),
        })
    }
}

/// Parses `format`, then builds and runs a job writing into `output_dir`.
///
/// An unknown format is reported before any file is touched.
pub fn run<R, S, O>(
    rooms_path: R,
    students_path: S,
    format: &str,
    output_dir: O,
) -> JobResult<JobExecution>
where
    R: AsRef<Path>,
    S: AsRef<Path>,
    O: AsRef<Path>,
{
    let format: OutputFormat = format.parse()?;

    JobBuilder::new()
        .rooms_path(rooms_path)
        .students_path(students_path)
        .format(format)
        .output_dir(output_dir)
        .build()?
        .run()
}
