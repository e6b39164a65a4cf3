//! Frontend Models
//!
//! Domain data only. View state (e.g. a row's delete confirmation) lives in
//! the components, next to but not inside these types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Task identity. Allocated monotonically, never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A to-do entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

impl Task {
    pub fn new(id: TaskId, text: String) -> Self {
        Self {
            id,
            text,
            completed: false,
        }
    }
}

/// Hands out task identities, starting at 1
#[derive(Debug, Clone)]
pub struct IdAllocator {
    next: u64,
}

impl Default for IdAllocator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdAllocator {
    pub fn allocate(&mut self) -> TaskId {
        let id = TaskId(self.next);
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_creation() {
        let task = Task::new(TaskId(1), "Buy milk".to_string());
        assert_eq!(task.id, TaskId(1));
        assert_eq!(task.text, "Buy milk");
        assert!(!task.completed);
    }

    #[test]
    fn test_ids_are_monotonic() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocate(), TaskId(1));
        assert_eq!(ids.allocate(), TaskId(2));
        assert_eq!(ids.allocate(), TaskId(3));
    }

    #[test]
    fn test_task_serialization() {
        let task = Task::new(TaskId(7), "x".to_string());
        let json = serde_json::to_string(&task).unwrap();
        assert_eq!(json, r#"{"id":7,"text":"x","completed":false}"#);
    }
}
