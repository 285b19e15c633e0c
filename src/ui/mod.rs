//! Terminal collaborators of the prompt
//!
//! # Module Structure
//!
//! - `theme` - colors and glyphs (unicode with ASCII fallback)
//! - `terminal` - capability detection
//! - `paginator` - windowing long trees to a page
//! - `screen` - in-place redraw and raw-mode guard
//! - `input` - key decoding and intent sources

pub mod input;
pub mod paginator;
pub mod screen;
pub mod terminal;
pub mod theme;

pub use input::{key_to_intent, IntentSource, KeyboardSource, ScriptedSource};
pub use paginator::Paginator;
pub use screen::{CursorGuard, Screen, TerminalScreen};
pub use terminal::{detect_capabilities, TerminalCapabilities};
pub use theme::Theme;
