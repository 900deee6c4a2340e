use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::{
    executable::Executable, identifier_allocator::IdentifierAllocator, task::Task,
    task_registry::TaskRegistry,
};

/// Runs units of work in the background and tracks them as tasks.
///
/// `submit` never waits for the work: the returned task is always
/// `in_progress`, the outcome is only observable by polling the registry.
#[derive(Default)]
pub struct JobEngine {
    allocator: IdentifierAllocator,
    registry: Arc<TaskRegistry>,
}

impl JobEngine {
    pub fn new(registry: Arc<TaskRegistry>) -> Self {
        JobEngine {
            allocator: IdentifierAllocator::default(),
            registry,
        }
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    pub fn task(&self, id: &str) -> Option<Task> {
        self.registry.get(id)
    }

    /// Number of tasks submitted since startup.
    pub fn submitted(&self) -> u64 {
        self.allocator.current()
    }

    /// Must be called from within a tokio runtime.
    pub fn submit<W>(&self, work: W) -> Task
    where
        W: Executable,
    {
        let task = Task::new(self.allocator.next());
        self.registry.insert(task.id().to_owned(), task.clone());

        debug!(
            task_id = task.id(),
            job = W::NAME,
            submitted = self.submitted(),
            "Submitted task"
        );

        let registry = Arc::clone(&self.registry);
        let pending = task.clone();
        tokio::spawn(async move {
            let finished = run_to_completion(pending, work).await;
            let task_id = finished.id().to_owned();

            if !registry.update_if_present(&task_id, finished) {
                warn!(
                    task_id = task_id.as_str(),
                    job = W::NAME,
                    "Task was removed before it completed"
                );
            }
        });

        task
    }
}

async fn run_to_completion<W>(task: Task, work: W) -> Task
where
    W: Executable,
{
    // Own task, so a panicking unit of work surfaces as a JoinError here.
    match tokio::spawn(work.execute()).await {
        Ok(Ok(output)) => match serde_json::value::to_raw_value(&output) {
            Ok(result) => {
                info!(task_id = task.id(), job = W::NAME, "Task done");
                task.into_done(result)
            }
            Err(err) => {
                error!(task_id = task.id(), job = W::NAME, "Failed to serialize result: {err}");
                task.into_error()
            }
        },
        Ok(Err(err)) => {
            warn!(task_id = task.id(), job = W::NAME, "Task failed: {err}");
            task.into_error()
        }
        Err(err) => {
            error!(task_id = task.id(), job = W::NAME, "Task aborted: {err}");
            task.into_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::BTreeMap, time::Duration};

    use serde::{Serialize, Serializer};
    use tokio::sync::oneshot;

    use super::*;
    use crate::task::TaskStatus;

    struct Gated {
        gate: oneshot::Receiver<()>,
        value: u32,
    }

    impl Executable for Gated {
        const NAME: &'static str = "gated";
        type Output = BTreeMap<&'static str, u32>;
        type Error = String;

        async fn execute(self) -> Result<Self::Output, Self::Error> {
            self.gate.await.map_err(|err| err.to_string())?;
            Ok(BTreeMap::from([("value", self.value)]))
        }
    }

    struct Failing;

    impl Executable for Failing {
        const NAME: &'static str = "failing";
        type Output = ();
        type Error = String;

        async fn execute(self) -> Result<Self::Output, Self::Error> {
            Err(String::from("boom"))
        }
    }

    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not serializable"))
        }
    }

    struct ProducesUnserializable;

    impl Executable for ProducesUnserializable {
        const NAME: &'static str = "unserializable";
        type Output = Unserializable;
        type Error = String;

        async fn execute(self) -> Result<Self::Output, Self::Error> {
            Ok(Unserializable)
        }
    }

    struct Panicking;

    impl Executable for Panicking {
        const NAME: &'static str = "panicking";
        type Output = ();
        type Error = String;

        async fn execute(self) -> Result<Self::Output, Self::Error> {
            panic!("unit of work panicked")
        }
    }

    async fn wait_until_finished(engine: &JobEngine, id: &str) -> Task {
        for _ in 0..200 {
            let task = engine.task(id).unwrap();
            if task.status().is_finished() {
                return task;
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }

        panic!("task {id} did not finish in time");
    }

    #[tokio::test]
    async fn test_submit_returns_in_progress_then_done() {
        let engine = JobEngine::default();
        let (release, gate) = oneshot::channel();

        let task = engine.submit(Gated { gate, value: 3 });
        assert_eq!(task.id(), "1");
        assert_eq!(task.status(), TaskStatus::InProgress);

        let polled = engine.task(task.id()).unwrap();
        assert_eq!(polled.status(), TaskStatus::InProgress);
        assert!(polled.result().is_none());

        release.send(()).unwrap();

        let finished = wait_until_finished(&engine, task.id()).await;
        assert_eq!(finished.status(), TaskStatus::Done);
        assert_eq!(finished.result().unwrap().get(), r#"{"value":3}"#);
        assert_eq!(finished.submitted_at(), task.submitted_at());
    }

    #[tokio::test]
    async fn test_failing_work_sets_error() {
        let engine = JobEngine::default();
        let task = engine.submit(Failing);

        let finished = wait_until_finished(&engine, task.id()).await;
        assert_eq!(finished.status(), TaskStatus::Error);
        assert!(finished.result().is_none());
    }

    #[tokio::test]
    async fn test_serialization_failure_sets_error() {
        let engine = JobEngine::default();
        let task = engine.submit(ProducesUnserializable);

        let finished = wait_until_finished(&engine, task.id()).await;
        assert_eq!(finished.status(), TaskStatus::Error);
    }

    #[tokio::test]
    async fn test_panicking_work_sets_error() {
        let engine = JobEngine::default();
        let task = engine.submit(Panicking);

        let finished = wait_until_finished(&engine, task.id()).await;
        assert_eq!(finished.status(), TaskStatus::Error);

        // The engine keeps working after a panic.
        let next = engine.submit(Failing);
        assert_eq!(next.id(), "2");
    }

    #[tokio::test]
    async fn test_removed_task_is_not_recreated() {
        let engine = JobEngine::default();
        let (release, gate) = oneshot::channel();

        let task = engine.submit(Gated { gate, value: 1 });
        engine.registry().remove(task.id());
        release.send(()).unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(engine.task(task.id()).is_none());
    }

    #[tokio::test]
    async fn test_concurrent_submissions_get_distinct_ids() {
        let engine = Arc::new(JobEngine::default());

        let handles = (0..50)
            .map(|_| {
                let engine = Arc::clone(&engine);
                tokio::spawn(async move { engine.submit(Failing).id().to_owned() })
            })
            .collect::<Vec<_>>();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().parse::<u64>().unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=50).collect::<Vec<_>>());
        assert_eq!(engine.registry().len(), 50);
        assert_eq!(engine.submitted(), 50);
    }
}
