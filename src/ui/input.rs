//! Keyboard decoding into picker intents.

use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::error::PickerResult;
use crate::prompt::Intent;

/// Characters accepted into the search query
pub fn is_query_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '/' | '.')
}

/// Map a key press to an intent. `search_mode` changes the meaning of
/// printable keys: outside search only `/`, `j` and `k` mean anything.
pub fn key_to_intent(key: KeyEvent, search_mode: bool) -> Option<Intent> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('c') if ctrl => Some(Intent::Cancel),
        KeyCode::Char('p') if ctrl => Some(Intent::MoveUp),
        KeyCode::Char('n') if ctrl => Some(Intent::MoveDown),
        _ if ctrl => None,
        KeyCode::Esc => Some(Intent::Cancel),
        KeyCode::Up => Some(Intent::MoveUp),
        KeyCode::Down => Some(Intent::MoveDown),
        KeyCode::Left => Some(Intent::Collapse),
        KeyCode::Right => Some(Intent::Expand),
        KeyCode::Enter => Some(Intent::Submit),
        KeyCode::Char(' ') => Some(Intent::Toggle),
        KeyCode::Tab if search_mode => Some(Intent::Complete),
        KeyCode::Backspace if search_mode => Some(Intent::Backspace),
        KeyCode::Char('\\') if search_mode => Some(Intent::SearchUp),
        KeyCode::Char(c) if search_mode && is_query_char(c) => Some(Intent::Type(c)),
        KeyCode::Char('/') => Some(Intent::EnterSearch),
        KeyCode::Char('k') => Some(Intent::MoveUp),
        KeyCode::Char('j') => Some(Intent::MoveDown),
        _ => None,
    }
}

/// Produces intents for a running prompt
#[async_trait]
pub trait IntentSource: Send {
    /// Next intent; `Ok(None)` once the source is exhausted.
    async fn next_intent(&mut self, search_mode: bool) -> PickerResult<Option<Intent>>;
}

/// Reads key presses from the terminal
#[derive(Debug, Default)]
pub struct KeyboardSource;

#[async_trait]
impl IntentSource for KeyboardSource {
    async fn next_intent(&mut self, search_mode: bool) -> PickerResult<Option<Intent>> {
        loop {
            let event = tokio::task::spawn_blocking(event::read)
                .await
                .map_err(io::Error::other)??;

            let Event::Key(key) = event else {
                continue;
            };
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(intent) = key_to_intent(key, search_mode) {
                tracing::trace!(?intent, "key decoded");
                return Ok(Some(intent));
            }
        }
    }
}

/// A fixed sequence of intents, for hosts driving the picker programmatically
#[derive(Debug, Default, Clone)]
pub struct ScriptedSource {
    intents: VecDeque<Intent>,
}

impl ScriptedSource {
    pub fn new(intents: impl IntoIterator<Item = Intent>) -> Self {
        Self {
            intents: intents.into_iter().collect(),
        }
    }
}

#[async_trait]
impl IntentSource for ScriptedSource {
    async fn next_intent(&mut self, _search_mode: bool) -> PickerResult<Option<Intent>> {
        Ok(self.intents.pop_front())
    }
}
