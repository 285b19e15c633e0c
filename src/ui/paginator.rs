//! Windowing of the rendered tree to `page_size` lines.
//!
//! In looping mode the list is treated as circular and the cursor drifts down
//! to the middle of the page before the window starts scrolling; otherwise the
//! window is clamped to the list and keeps the cursor centered where it can.

use super::theme::Theme;

pub const MORE_HINT: &str = "(Move up and down to reveal more choices)";

#[derive(Debug, Clone, Default)]
pub struct Paginator {
    infinite: bool,
    pointer: usize,
    last_index: usize,
}

impl Paginator {
    pub fn new(infinite: bool) -> Self {
        Self {
            infinite,
            ..Self::default()
        }
    }

    /// Lines visible for cursor position `active`, followed by a dim hint when
    /// the list is longer than a page.
    pub fn paginate(&mut self, lines: &[String], active: usize, page_size: usize, theme: &Theme) -> String {
        if page_size == 0 || lines.len() <= page_size {
            return lines.join("\n");
        }

        let len = lines.len();
        let active = active.min(len - 1);
        let middle = page_size / 2;

        let window: Vec<&str> = if self.infinite {
            if self.pointer < middle && self.last_index < active && active - self.last_index < page_size {
                self.pointer = middle.min(self.pointer + active - self.last_index);
            }
            let top = (active + len).saturating_sub(self.pointer);
            (0..page_size).map(|offset| lines[(top + offset) % len].as_str()).collect()
        } else {
            let top = active.saturating_sub(middle).min(len - page_size);
            lines[top..top + page_size].iter().map(String::as_str).collect()
        };
        self.last_index = active;

        format!("{}\n{}", window.join("\n"), theme.dim(MORE_HINT))
    }
}
