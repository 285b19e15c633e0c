//! The interactive tree prompt
//!
//! [`TreePrompt`] is a state machine driven by [`Intent`]s. Every handled
//! intent leaves a fresh [`Frame`] behind; [`TreePrompt::run`] pumps intents
//! from an [`IntentSource`] and pushes frames to a [`Screen`] until the user
//! submits or cancels.
//!
//! # Module Structure
//!
//! - `intent` - user actions, answers and outcomes
//! - `content` - the visible tree listing
//! - `render` - frame composition

pub mod content;
mod intent;
mod render;

use std::path::PathBuf;
use std::sync::Arc;

use indextree::NodeId;
use serde_json::Value;

use crate::config::PromptConfig;
use crate::error::{PickerError, PickerResult};
use crate::labels::{value_for, Answers, Labels, TransformContext, Transformer, PATH_SEPARATOR};
use crate::search::{self, SearchState};
use crate::tree::{Branch, Loader, Tree};
use crate::ui::{IntentSource, Paginator, Screen, Theme};
use crate::validate::{NodeValidator, PredicateValidator, SubmitValidator, Validation};

pub use intent::{Answer, Intent, Outcome};
pub use render::Frame;

use content::View;
use render::Parts;

/// Shown when submitting with nothing under the cursor
const NOTHING_ACTIVE: &str = "No item is highlighted";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Pending,
    Answered,
}

pub struct TreePrompt {
    tree: Tree,
    loader: Loader,
    labels: Labels,
    config: PromptConfig,
    submit_validator: Option<Arc<dyn SubmitValidator>>,
    theme: Theme,
    paginator: Paginator,
    active: Option<NodeId>,
    selected: Vec<NodeId>,
    shown: Vec<NodeId>,
    search: SearchState,
    status: Status,
    first_render: bool,
    error: Option<String>,
    frame: Frame,
}

impl TreePrompt {
    pub fn builder(tree: impl Into<Branch>) -> TreePromptBuilder {
        TreePromptBuilder::new(tree)
    }

    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    pub fn config(&self) -> &PromptConfig {
        &self.config
    }

    /// Node under the cursor; the root during a search with an empty query or no visible match
    pub fn active(&self) -> Option<NodeId> {
        self.active
    }

    /// Multi-select selection, in toggle order
    pub fn selected(&self) -> &[NodeId] {
        &self.selected
    }

    /// Visible nodes in display order, as of the last frame
    pub fn shown(&self) -> &[NodeId] {
        &self.shown
    }

    pub fn search(&self) -> &SearchState {
        &self.search
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    /// Display path of a node
    pub fn path_of(&self, id: NodeId) -> String {
        self.labels.path_of(&self.tree, id)
    }

    /// Prepare the top level and draw the first frame.
    pub async fn start(&mut self) -> &Frame {
        let root = self.tree.root();
        self.loader.prepare(&mut self.tree, root).await;
        self.render();
        &self.frame
    }

    /// Drive the prompt to completion.
    pub async fn run<S, W>(&mut self, source: &mut S, screen: &mut W) -> PickerResult<Answer>
    where
        S: IntentSource + ?Sized,
        W: Screen + ?Sized,
    {
        self.start().await;
        if self.shown.is_empty() {
            return Err(PickerError::EmptyTree);
        }
        screen.render(&self.frame)?;

        loop {
            let Some(intent) = source.next_intent(self.search.is_active()).await? else {
                return Err(PickerError::InputClosed);
            };

            match self.handle(intent).await {
                Outcome::Continue => screen.render(&self.frame)?,
                Outcome::Answered(answer) => {
                    screen.render(&self.frame)?;
                    screen.done()?;
                    tracing::debug!("prompt answered");
                    return Ok(answer);
                }
                Outcome::Cancelled => {
                    screen.done()?;
                    return Err(PickerError::Cancelled);
                }
            }
        }
    }

    /// Apply one intent and redraw.
    pub async fn handle(&mut self, intent: Intent) -> Outcome {
        if self.status == Status::Answered {
            return Outcome::Continue;
        }
        tracing::trace!(?intent, "handling intent");
        self.error = None;

        match intent {
            Intent::MoveUp => self.move_active(-1),
            Intent::MoveDown => self.move_active(1),
            Intent::Collapse => self.collapse(),
            Intent::Expand => self.expand().await,
            Intent::Toggle => self.toggle().await,
            Intent::Submit => return self.submit().await,
            Intent::EnterSearch => {
                if self.search.enter() {
                    self.apply_search(None).await;
                }
            }
            Intent::Type(c) => {
                if self.search.is_active() {
                    self.search.push(c);
                    self.apply_search(None).await;
                }
            }
            Intent::Backspace => {
                if self.search.is_active() {
                    self.search.pop();
                    self.apply_search(None).await;
                }
            }
            Intent::Complete => self.complete().await,
            Intent::SearchUp => self.search_up().await,
            Intent::Cancel => {
                tracing::debug!("prompt cancelled");
                return Outcome::Cancelled;
            }
        }

        self.render();
        Outcome::Continue
    }

    fn is_selectable(&self, id: NodeId) -> bool {
        !self.tree.is_root(id)
    }

    fn move_active(&mut self, delta: isize) {
        if self.shown.is_empty() {
            return;
        }
        let len = self.shown.len() as isize;
        let current = self
            .active
            .and_then(|active| self.shown.iter().position(|&id| id == active))
            .map_or(-1, |index| index as isize);

        let mut index = current + delta;
        if index >= len || index < 0 {
            if !self.config.looping {
                return;
            }
            index = if index < 0 { len - 1 } else { 0 };
        }
        self.active = Some(self.shown[index as usize]);
    }

    fn collapse(&mut self) {
        let Some(active) = self.active.filter(|&id| self.is_selectable(id)) else {
            return;
        };
        let node = self.tree.node(active);
        if node.is_branch() && node.is_open() {
            self.tree.node_mut(active).open = false;
        } else if !self.tree.is_top_level(active) {
            self.active = self.tree.parent(active);
        }
    }

    async fn expand(&mut self) {
        let Some(active) = self.active.filter(|&id| self.is_selectable(id)) else {
            return;
        };
        let node = self.tree.node(active);
        if !node.is_branch() {
            return;
        }
        if !node.is_open() {
            self.tree.node_mut(active).open = true;
            self.loader.prepare(&mut self.tree, active).await;
        } else if self.tree.child_count(active) > 0 {
            self.move_active(1);
        }
    }

    async fn toggle(&mut self) {
        let Some(active) = self.active.filter(|&id| self.is_selectable(id)) else {
            return;
        };

        if self.config.multiple {
            let node = self.tree.node(active);
            if node.is_branch() || !node.validity().is_valid() {
                return;
            }
            match self.selected.iter().position(|&id| id == active) {
                Some(index) => {
                    self.selected.remove(index);
                }
                None => self.selected.push(active),
            }
        } else if self.tree.node(active).is_branch() {
            let open = !self.tree.node(active).is_open();
            self.tree.node_mut(active).open = open;
            if open {
                self.loader.prepare(&mut self.tree, active).await;
            }
        }
    }

    async fn submit(&mut self) -> Outcome {
        let answer = if self.config.multiple {
            Answer::Multiple(
                self.selected
                    .iter()
                    .map(|&id| value_for(self.tree.node(id)))
                    .collect(),
            )
        } else {
            match self.active.filter(|&id| self.is_selectable(id)) {
                Some(id) => Answer::Single(value_for(self.tree.node(id))),
                None => return self.reject(NOTHING_ACTIVE.to_string()),
            }
        };

        let verdict = match &self.submit_validator {
            Some(validator) => validator.validate(&answer, self.labels.answers()).await,
            None => Validation::Valid,
        };
        if let Validation::Invalid(message) = verdict {
            tracing::debug!(%message, "answer rejected");
            return self.reject(message);
        }

        self.status = Status::Answered;
        self.render();
        Outcome::Answered(answer)
    }

    fn reject(&mut self, message: String) -> Outcome {
        self.error = Some(message);
        self.render();
        Outcome::Continue
    }

    /// Complete the query to the active node's path, descending through
    /// branches that have exactly one child.
    async fn complete(&mut self) {
        if !self.search.is_active() {
            return;
        }
        let root = self.tree.root();
        let mut current = self.active.unwrap_or(root);

        let query = loop {
            let is_root = self.tree.is_root(current);
            if self.tree.node(current).is_branch() {
                self.loader.prepare(&mut self.tree, current).await;
            }

            let mut query = if is_root {
                String::new()
            } else {
                self.labels.path_of(&self.tree, current)
            };
            if !self.tree.node(current).is_branch() {
                break query;
            }

            let name = self.labels.name_for(self.tree.node(current), false);
            if !is_root && query.ends_with(&name) {
                query.push(PATH_SEPARATOR);
            }
            match (self.tree.child_count(current), self.tree.first_child(current)) {
                (1, Some(only)) => {
                    if !is_root {
                        self.tree.node_mut(current).open = true;
                    }
                    current = only;
                }
                _ => break query,
            }
        };

        self.active = Some(current);
        self.search.set_query(query);
        self.apply_search(None).await;
    }

    /// Move the search one level up; on an empty query, leave search mode.
    async fn search_up(&mut self) {
        if !self.search.is_active() {
            return;
        }
        if self.search.query().is_empty() {
            self.search.exit();
            search::apply_filter(&mut self.tree, &self.labels, "");
            if self.active.is_some_and(|id| self.tree.is_root(id)) {
                self.active = None;
            }
            return;
        }

        let root = self.tree.root();
        let mut active = self.active.unwrap_or(root);
        if !self.tree.is_root(active) {
            if let Some(parent) = self.tree.parent(active).filter(|&p| !self.tree.is_root(p)) {
                active = parent;
                self.active = Some(parent);
            }
            if self.tree.node(active).is_branch() && self.tree.node(active).is_open() {
                self.tree.node_mut(active).open = false;
            }
        }

        let query = self
            .tree
            .parent(active)
            .map(|parent| self.labels.path_of(&self.tree, parent))
            .unwrap_or_default();
        self.search.set_query(query);
        self.apply_search(Some(false)).await;
    }

    /// Refilter and auto-focus. `open_next` forces the openness of a focused
    /// branch; by default it opens when the query grew.
    async fn apply_search(&mut self, open_next: Option<bool>) {
        if !self.search.is_active() {
            return;
        }
        let query = self.search.query().to_lowercase();
        let root = self.tree.root();

        search::apply_filter(&mut self.tree, &self.labels, &query);
        self.refresh_shown();

        let root_directory = self.config.root_directory_str();
        let candidates = if query.is_empty() {
            Vec::new()
        } else {
            search::focus_candidates(
                &self.tree,
                &self.labels,
                &self.shown,
                root_directory.as_deref(),
                &query,
            )
        };

        if let Some(&first) = candidates.first() {
            let open = open_next.unwrap_or_else(|| self.search.grew());
            self.focus(first, open).await;
        } else if self.shown.len() == 1 {
            let only = self.shown[0];
            self.focus(only, open_next.unwrap_or(true)).await;
        } else if query.is_empty() {
            self.active = Some(root);
        } else if let Some(active) = self.active.filter(|&id| self.is_selectable(id)) {
            self.tree.node_mut(active).open = false;
        }

        // Children materialized by the focus step need their flags too.
        search::apply_filter(&mut self.tree, &self.labels, &query);
        self.refresh_shown();

        // Only an empty query may leave the cursor outside the visible list.
        let lost = !self.active.is_some_and(|id| self.shown.contains(&id));
        if lost && !query.is_empty() {
            self.active = Some(self.shown.first().copied().unwrap_or(root));
        }
        tracing::trace!(query = %query, candidates = candidates.len(), "search applied");
    }

    async fn focus(&mut self, id: NodeId, open: bool) {
        if self.active == Some(id) && !self.tree.node(id).is_branch() {
            return;
        }
        self.active = Some(id);
        if self.tree.node(id).is_branch() {
            self.tree.node_mut(id).open = open;
            self.loader.prepare(&mut self.tree, id).await;
        }
    }

    fn view(&self) -> View<'_> {
        View {
            active: self.active,
            selected: &self.selected,
            multiple: self.config.multiple,
            is_final: self.status == Status::Answered,
        }
    }

    fn refresh_shown(&mut self) {
        self.shown = content::build(&self.tree, &self.labels, &self.view()).shown;
    }

    fn render(&mut self) {
        let root = self.tree.root();
        if self.active.is_none() {
            self.active = self
                .tree
                .children(root)
                .find(|&id| !self.tree.node(id).is_hidden());
        }

        let answered = self.status == Status::Answered;
        let mut body = String::new();
        let answer = if answered {
            let ids: Vec<NodeId> = if self.config.multiple {
                self.selected.clone()
            } else {
                self.active.into_iter().collect()
            };
            Some(
                ids.iter()
                    .map(|&id| self.labels.short_for(self.tree.node(id), true))
                    .collect::<Vec<_>>()
                    .join(", "),
            )
        } else {
            let listing = content::build(&self.tree, &self.labels, &self.view());
            let mut lines = content::render_lines(&listing.lines, &self.theme);
            if self.config.looping {
                lines.push(self.theme.loop_separator().to_string());
            }
            self.shown = listing.shown;

            let index = self
                .active
                .and_then(|active| self.shown.iter().position(|&id| id == active))
                .unwrap_or(0);
            body = self
                .paginator
                .paginate(&lines, index, self.config.page_size, &self.theme);
            None
        };

        let active_path = self
            .active
            .map(|id| self.labels.path_of(&self.tree, id))
            .unwrap_or_default();
        let selected_paths: Vec<String> = self
            .selected
            .iter()
            .map(|&id| self.labels.path_of(&self.tree, id))
            .collect();

        let frame = render::compose(
            &Parts {
                question: &self.config.message,
                search: self.search.is_active().then(|| self.search.query()),
                hint: self.first_render.then_some(self.config.multiple),
                answer,
                body,
                active_path,
                selected_paths,
                error: self.error.as_deref(),
            },
            &self.theme,
        );
        self.frame = frame;
        self.first_render = false;
    }
}

/// Assembles a [`TreePrompt`]
pub struct TreePromptBuilder {
    tree: Branch,
    config: PromptConfig,
    node_validator: Option<Arc<dyn NodeValidator>>,
    submit_validator: Option<Arc<dyn SubmitValidator>>,
    transformer: Option<Transformer>,
    answers: Answers,
    theme: Theme,
}

impl TreePromptBuilder {
    pub fn new(tree: impl Into<Branch>) -> Self {
        Self {
            tree: tree.into(),
            config: PromptConfig::default(),
            node_validator: None,
            submit_validator: None,
            transformer: None,
            answers: Answers::new(),
            theme: Theme::plain(),
        }
    }

    pub fn config(mut self, config: PromptConfig) -> Self {
        self.config = config;
        self
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.config.message = message.into();
        self
    }

    pub fn multiple(mut self, multiple: bool) -> Self {
        self.config.multiple = multiple;
        self
    }

    pub fn page_size(mut self, page_size: usize) -> Self {
        self.config.page_size = page_size;
        self
    }

    pub fn looping(mut self, looping: bool) -> Self {
        self.config.looping = looping;
        self
    }

    pub fn root_directory(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.root_directory = Some(root.into());
        self
    }

    pub fn only_show_valid(mut self, only: bool) -> Self {
        self.config.only_show_valid = only;
        self
    }

    pub fn hide_children_of_valid(mut self, hide: bool) -> Self {
        self.config.hide_children_of_valid = hide;
        self
    }

    pub fn validator(mut self, validator: Arc<dyn NodeValidator>) -> Self {
        self.node_validator = Some(validator);
        self
    }

    /// Shorthand for a synchronous node predicate
    pub fn validate_with<F>(self, predicate: F) -> Self
    where
        F: Fn(&Value, &Answers) -> bool + Send + Sync + 'static,
    {
        self.validator(Arc::new(PredicateValidator(predicate)))
    }

    pub fn submit_validator(mut self, validator: Arc<dyn SubmitValidator>) -> Self {
        self.submit_validator = Some(validator);
        self
    }

    pub fn transformer<F>(mut self, transformer: F) -> Self
    where
        F: Fn(&Value, &Answers, TransformContext) -> String + Send + Sync + 'static,
    {
        self.transformer = Some(Arc::new(transformer));
        self
    }

    /// Answers from earlier prompts, handed to validators and the transformer
    pub fn answers(mut self, answers: Answers) -> Self {
        self.answers = answers;
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    pub fn build(self) -> TreePrompt {
        let loader = Loader::new(
            self.node_validator,
            self.config.loader_policy(),
            self.answers.clone(),
        );
        TreePrompt {
            tree: Tree::new(self.tree),
            loader,
            labels: Labels::new(self.transformer, self.answers),
            paginator: Paginator::new(self.config.looping),
            config: self.config,
            submit_validator: self.submit_validator,
            theme: self.theme,
            active: None,
            selected: Vec::new(),
            shown: Vec::new(),
            search: SearchState::default(),
            status: Status::Pending,
            first_render: true,
            error: None,
            frame: Frame::default(),
        }
    }
}
