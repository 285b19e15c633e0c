//! Validation contracts.
//!
//! Two distinct validators exist: a per-node predicate whose outcome is
//! memoized on each node (drives selectability and pruning), and a submit
//! validator that can reject an answer and keep the session running.

use async_trait::async_trait;
use serde_json::Value;

use crate::labels::Answers;
use crate::prompt::Answer;

/// Per-node predicate over a node's resolved value
#[async_trait]
pub trait NodeValidator: Send + Sync {
    async fn validate(&self, value: &Value, answers: &Answers) -> anyhow::Result<bool>;
}

/// Outcome of a submit validation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Valid,
    /// Rejected, with the message shown under the prompt
    Invalid(String),
}

/// Intent-level validation run when the user submits
#[async_trait]
pub trait SubmitValidator: Send + Sync {
    async fn validate(&self, answer: &Answer, answers: &Answers) -> Validation;
}

/// Adapts a plain predicate into a [`NodeValidator`]
pub struct PredicateValidator<F>(pub F);

#[async_trait]
impl<F> NodeValidator for PredicateValidator<F>
where
    F: Fn(&Value, &Answers) -> bool + Send + Sync,
{
    async fn validate(&self, value: &Value, answers: &Answers) -> anyhow::Result<bool> {
        Ok((self.0)(value, answers))
    }
}

/// Adapts a plain function into a [`SubmitValidator`]
pub struct SubmitFn<F>(pub F);

#[async_trait]
impl<F> SubmitValidator for SubmitFn<F>
where
    F: Fn(&Answer, &Answers) -> Validation + Send + Sync,
{
    async fn validate(&self, answer: &Answer, answers: &Answers) -> Validation {
        (self.0)(answer, answers)
    }
}
