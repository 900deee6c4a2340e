use fxhash::FxHashMap;
use parking_lot::RwLock;

use crate::task::Task;

/// Concurrent map of task id to task.
///
/// Every read hands out a copy taken under the lock, so a reader never sees a
/// half-written task.
#[derive(Default)]
pub struct TaskRegistry {
    tasks: RwLock<FxHashMap<String, Task>>,
}

impl TaskRegistry {
    pub fn insert(&self, id: String, task: Task) {
        self.tasks.write().insert(id, task);
    }

    pub fn get(&self, id: &str) -> Option<Task> {
        self.tasks.read().get(id).cloned()
    }

    /// Replaces the task stored under `id` only if there is one. Returns
    /// whether the task was found.
    pub fn update_if_present(&self, id: &str, task: Task) -> bool {
        match self.tasks.write().get_mut(id) {
            Some(existing) => {
                *existing = task;
                true
            }
            None => false,
        }
    }

    pub fn remove(&self, id: &str) -> Option<Task> {
        self.tasks.write().remove(id)
    }

    /// Keeps only the tasks for which `keep` returns true.
    pub fn retain<F>(&self, mut keep: F)
    where
        F: FnMut(&str, &Task) -> bool,
    {
        self.tasks.write().retain(|id, task| keep(id, task));
    }

    pub fn len(&self) -> usize {
        self.tasks.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.read().is_empty()
    }
}
