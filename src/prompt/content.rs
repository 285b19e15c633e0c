//! Builds the visible tree listing.
//!
//! Walks the open, non-hidden part of the tree depth-first and records both
//! the lines to draw and the ordered list of visible nodes that navigation
//! moves through.

use indextree::NodeId;

use crate::labels::Labels;
use crate::tree::Tree;
use crate::ui::theme::{colors, Theme};

/// Leading glyph of a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Blank,
    /// Active leaf
    Pointer,
    Expanded,
    Collapsed,
}

/// How the line is highlighted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    Plain,
    ActiveValid,
    ActiveInvalid,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    /// 0 for top-level nodes
    pub depth: usize,
    pub glyph: Glyph,
    /// `Some` only in multi-select mode
    pub checked: Option<bool>,
    pub label: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, Default)]
pub struct Content {
    pub lines: Vec<ContentLine>,
    /// Visible nodes in display order; `lines[i]` draws `shown[i]`
    pub shown: Vec<NodeId>,
}

/// Rendering inputs that live on the prompt rather than in the tree
#[derive(Debug, Clone, Copy)]
pub struct View<'a> {
    pub active: Option<NodeId>,
    pub selected: &'a [NodeId],
    pub multiple: bool,
    pub is_final: bool,
}

pub fn build(tree: &Tree, labels: &Labels, view: &View<'_>) -> Content {
    let mut content = Content::default();
    walk(tree, labels, view, tree.root(), 0, &mut content);
    content
}

fn walk(tree: &Tree, labels: &Labels, view: &View<'_>, parent: NodeId, depth: usize, content: &mut Content) {
    for id in tree.children(parent) {
        let node = tree.node(id);
        if node.is_hidden() {
            continue;
        }

        let is_active = view.active == Some(id);
        let glyph = match (node.is_branch(), node.is_open(), is_active) {
            (true, true, _) => Glyph::Expanded,
            (true, false, _) => Glyph::Collapsed,
            (false, _, true) => Glyph::Pointer,
            (false, _, false) => Glyph::Blank,
        };
        let emphasis = match (is_active, node.validity().is_valid()) {
            (false, _) => Emphasis::Plain,
            (true, true) => Emphasis::ActiveValid,
            (true, false) => Emphasis::ActiveInvalid,
        };

        content.shown.push(id);
        content.lines.push(ContentLine {
            depth,
            glyph,
            checked: view.multiple.then(|| view.selected.contains(&id)),
            label: labels.name_for(node, view.is_final),
            emphasis,
        });

        if node.is_branch() && node.is_open() {
            walk(tree, labels, view, id, depth + 1, content);
        }
    }
}

/// Styled text for each line
pub fn render_lines(lines: &[ContentLine], theme: &Theme) -> Vec<String> {
    lines.iter().map(|line| render_line(line, theme)).collect()
}

fn render_line(line: &ContentLine, theme: &Theme) -> String {
    let indent = "  ".repeat(line.depth + 1);
    let glyph = match line.glyph {
        Glyph::Blank => "  ".to_string(),
        Glyph::Pointer => format!("{} ", theme.pointer()),
        Glyph::Expanded => format!("{} ", theme.expanded()),
        Glyph::Collapsed => format!("{} ", theme.collapsed()),
    };
    let checkbox = line
        .checked
        .map(|checked| format!("{} ", theme.checkbox(checked)))
        .unwrap_or_default();

    let text = format!("{glyph}{checkbox}{}", line.label);
    let text = match line.emphasis {
        Emphasis::Plain => text,
        Emphasis::ActiveValid => theme.paint(&text, colors::INFO),
        Emphasis::ActiveInvalid => theme.paint(&text, colors::ERROR),
    };
    format!("{indent}{text}")
}
