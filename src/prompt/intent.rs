use serde::Serialize;
use serde_json::Value;

/// A user action, decoupled from the key that produced it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveUp,
    MoveDown,
    /// Close the active branch, or move to its parent
    Collapse,
    /// Open the active branch, or step into it when already open
    Expand,
    /// Toggle selection (multi-select) or openness (single-select)
    Toggle,
    Submit,
    EnterSearch,
    /// Append a character to the search query
    Type(char),
    Backspace,
    /// Complete the query to the active node's path
    Complete,
    /// Move the search one level up
    SearchUp,
    Cancel,
}

/// The submitted result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Single(Value),
    /// Selected values in selection order
    Multiple(Vec<Value>),
}

/// What a handled intent led to
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Continue,
    Answered(Answer),
    Cancelled,
}
