use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kinds of task events emitted by hooks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum TaskEventType {
    /// The task is being killed
    Killing,
}

impl fmt::Display for TaskEventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Killing => write!(f, "Killing"),
        }
    }
}

/// An event attached to a task's lifecycle request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskEvent {
    pub event_type: TaskEventType,
    pub time: DateTime<Utc>,
    /// The event marks the task as failed rather than stopped
    pub fails_task: bool,
    pub display_message: String,
}

impl TaskEvent {
    pub fn new(event_type: TaskEventType) -> Self {
        Self {
            event_type,
            time: Utc::now(),
            fails_task: false,
            display_message: String::new(),
        }
    }

    pub fn set_fails_task(mut self) -> Self {
        self.fails_task = true;
        self
    }

    pub fn set_display_message(mut self, message: impl Into<String>) -> Self {
        self.display_message = message.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_event_builder() {
        let event = TaskEvent::new(TaskEventType::Killing)
            .set_fails_task()
            .set_display_message("boom");

        assert_eq!(event.event_type, TaskEventType::Killing);
        assert!(event.fails_task);
        assert_eq!(event.display_message, "boom");
    }

    #[test]
    fn test_task_event_defaults_to_benign() {
        let event = TaskEvent::new(TaskEventType::Killing);
        assert!(!event.fails_task);
        assert!(event.display_message.is_empty());
    }

    #[test]
    fn test_task_event_type_display() {
        assert_eq!(TaskEventType::Killing.to_string(), "Killing");
    }
}
