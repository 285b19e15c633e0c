//! Frame composition.

use std::fmt;

use crate::ui::theme::{colors, Theme};

/// One full redraw: the prompt block and an optional block drawn under it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    pub message: String,
    pub bottom: Option<String>,
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)?;
        if let Some(bottom) = &self.bottom {
            write!(f, "\n{bottom}")?;
        }
        Ok(())
    }
}

/// Everything a frame shows, already resolved to text
pub(crate) struct Parts<'a> {
    pub question: &'a str,
    pub search: Option<&'a str>,
    /// `Some(multiple)` on the first frame only
    pub hint: Option<bool>,
    /// Set once answered; replaces the tree listing
    pub answer: Option<String>,
    pub body: String,
    pub active_path: String,
    pub selected_paths: Vec<String>,
    pub error: Option<&'a str>,
}

pub(crate) fn compose(parts: &Parts<'_>, theme: &Theme) -> Frame {
    let mut message = format!(
        "{} {} ",
        theme.paint(theme.question(), colors::SUCCESS),
        theme.bold(parts.question)
    );

    if let Some(query) = parts.search {
        message.push_str(&format!(
            "\nSearch: {} {}",
            theme.paint("$", colors::SUCCESS),
            theme.paint(query, colors::INFO)
        ));
    }

    if let Some(multiple) = parts.hint {
        let hint = if multiple {
            "(Use arrow keys, space to select, enter to confirm.)"
        } else {
            "(Use arrow keys, enter to confirm.)"
        };
        message.push_str(&theme.dim(hint));
    }

    match &parts.answer {
        Some(answer) => message.push_str(&theme.paint(answer, colors::INFO)),
        None => {
            message.push('\n');
            message.push_str(&parts.body);
        }
    }

    message.push_str(&format!(
        "\nSelected Path: {} {}",
        theme.paint(&format!("{} ", theme.marker()), colors::SUCCESS),
        theme.paint(&parts.active_path, colors::INFO)
    ));

    let mut bottom: Vec<String> = parts
        .selected_paths
        .iter()
        .map(|path| format!("{}{path}", theme.paint(&format!("{} ", theme.marker()), colors::ACCENT)))
        .collect();
    if let Some(error) = parts.error {
        bottom.push(theme.paint(&format!("{} {error}", theme.marker()), colors::ERROR));
    }

    Frame {
        message,
        bottom: (!bottom.is_empty()).then(|| bottom.join("\n")),
    }
}
