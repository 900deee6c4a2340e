use jiff::Timestamp;
use serde::Serialize;
use serde_json::value::RawValue;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    InProgress,
    Done,
    Error,
}

impl TaskStatus {
    pub fn is_finished(&self) -> bool {
        !matches!(self, TaskStatus::InProgress)
    }
}

/// The tracked record of one submitted unit of work.
///
/// A task is created `in_progress` and moves exactly once to either `done`,
/// carrying the serialized result, or `error`. A finished task never changes
/// again.
#[derive(Clone, Debug, Serialize)]
pub struct Task {
    #[serde(rename = "task_id")]
    id: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Box<RawValue>>,

    status: TaskStatus,

    #[serde(rename = "time")]
    submitted_at: Timestamp,
}

impl Task {
    pub fn new(id: String) -> Self {
        Task {
            id,
            result: None,
            status: TaskStatus::InProgress,
            submitted_at: Timestamp::now(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn result(&self) -> Option<&RawValue> {
        self.result.as_deref()
    }

    pub fn submitted_at(&self) -> Timestamp {
        self.submitted_at
    }

    pub fn into_done(mut self, result: Box<RawValue>) -> Self {
        if !self.status.is_finished() {
            self.status = TaskStatus::Done;
            self.result = Some(result);
        }
        self
    }

    pub fn into_error(mut self) -> Self {
        if !self.status.is_finished() {
            self.status = TaskStatus::Error;
            self.result = None;
        }
        self
    }
}
