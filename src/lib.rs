//! Treepick - interactive hierarchical picker for the terminal
//!
//! A tree of choices is navigated with the keyboard. Branches may be
//! expanded lazily through async resolvers, nodes may be validated, and an
//! incremental path search filters the tree while auto-focusing the best
//! match. The answer is a single value or, in multi-select mode, the ordered
//! list of selected values.
//!
//! ```no_run
//! use treepick::{Descriptor, TreePrompt};
//! use treepick::ui::{CursorGuard, KeyboardSource, TerminalScreen};
//!
//! # async fn demo() -> treepick::PickerResult<()> {
//! let mut prompt = TreePrompt::builder(vec![
//!     Descriptor::branch("fruit", vec!["apple".into(), "pear".into()]),
//!     Descriptor::named("Nothing", serde_json::Value::Null),
//! ])
//! .message("Pick one:")
//! .build();
//!
//! let _guard = CursorGuard::acquire()?;
//! let answer = prompt
//!     .run(&mut KeyboardSource, &mut TerminalScreen::stderr())
//!     .await?;
//! # let _ = answer;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod labels;
pub mod prompt;
pub mod search;
pub mod sources;
pub mod tree;
pub mod ui;
pub mod validate;

// Re-exports for convenience
pub use config::{ColorMode, ConfigWarning, PromptConfig};
pub use error::{PickerError, PickerResult};
pub use labels::{value_for, Answers, TransformContext};
pub use prompt::{Answer, Frame, Intent, Outcome, Status, TreePrompt, TreePromptBuilder};
pub use tree::{lazy, lazy_sync, Branch, Descriptor, Entry, Resolved, Resolver, Tree};
pub use validate::{NodeValidator, PredicateValidator, SubmitFn, SubmitValidator, Validation};
