use serde::{Deserialize, Serialize};

/// Recording commands understood by a supervisor.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Start,
    Stop,
    Done,
    Screenshot,
}

impl Action {
    /// Human-readable text sent alongside the action.
    pub fn default_message(self) -> &'static str {
        match self {
            Action::Start => "Start recording",
            Action::Stop => "Stop recording",
            Action::Done => "Done",
            Action::Screenshot => "Take screenshot",
        }
    }
}

/// One line of the bridge stream.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Record {
    /// Free-form progress text.
    Message { message: String },
    Command { action: Action, message: String },
}

impl Record {
    pub fn message(text: impl Into<String>) -> Self {
        Record::Message { message: text.into() }
    }

    /// A command carrying its default message.
    pub fn command(action: Action) -> Self {
        Record::Command {
            action,
            message: action.default_message().to_string(),
        }
    }

    pub fn is_command(&self) -> bool {
        matches!(self, Record::Command { .. })
    }

    pub fn action(&self) -> Option<Action> {
        match self {
            Record::Command { action, .. } => Some(*action),
            Record::Message { .. } => None,
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Record::Message { message } | Record::Command { message, .. } => message,
        }
    }
}
