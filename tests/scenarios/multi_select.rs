//! Scenario: selecting several values.

use std::sync::Arc;

use serde_json::{json, Value};
use treepick::ui::ScriptedSource;
use treepick::{Answer, Answers, Intent, SubmitFn, TreePrompt, Validation};

use crate::common::*;

/// Toggling `b` then `c` answers `[B, C]` in toggle order.
#[tokio::test]
async fn scenario_select_two_leaves() {
    let mut prompt = TreePrompt::builder(abc_tree()).multiple(true).build();
    let mut source = ScriptedSource::new([
        Intent::Expand,
        Intent::MoveDown,
        Intent::Toggle,
        Intent::MoveDown,
        Intent::Toggle,
        Intent::Submit,
    ]);
    let mut screen = RecordingScreen::default();

    let answer = prompt.run(&mut source, &mut screen).await.unwrap();

    assert_eq!(answer, Answer::Multiple(vec![json!("B"), json!("C")]));
    assert_eq!(
        screen.last(),
        "? Choose an item: b, c\nSelected Path: >>  a/c\n>> a/b\n>> a/c"
    );
}

#[tokio::test]
async fn scenario_selection_order_follows_toggles() {
    let mut prompt = TreePrompt::builder(abc_tree()).multiple(true).build();
    let mut source = ScriptedSource::new([
        Intent::Expand,
        Intent::MoveDown,
        Intent::MoveDown,
        Intent::Toggle,
        Intent::MoveUp,
        Intent::Toggle,
        Intent::Submit,
    ]);
    let mut screen = RecordingScreen::default();

    let answer = prompt.run(&mut source, &mut screen).await.unwrap();
    assert_eq!(answer, Answer::Multiple(vec![json!("C"), json!("B")]));
}

#[tokio::test]
async fn scenario_checkbox_rendering() {
    let mut prompt = TreePrompt::builder(abc_tree()).multiple(true).looping(false).build();
    let first = prompt.start().await.to_string();
    assert!(first.contains("(Use arrow keys, space to select, enter to confirm.)"));

    prompt.handle(Intent::Expand).await;
    prompt.handle(Intent::MoveDown).await;
    prompt.handle(Intent::Toggle).await;

    assert_eq!(
        prompt.frame().to_string(),
        "? Choose an item: \n  ↓ ◯ a\n    ❯ ◉ b\n      ◯ c\nSelected Path: >>  a/b\n>> a/b"
    );
}

#[tokio::test]
async fn scenario_branches_and_invalid_leaves_are_not_selectable() {
    let mut prompt = TreePrompt::builder(abc_tree())
        .multiple(true)
        .validate_with(|value: &Value, _: &Answers| value != &json!("C"))
        .build();
    prompt.start().await;

    prompt.handle(Intent::Toggle).await;
    assert!(prompt.selected().is_empty());

    prompt.handle(Intent::Expand).await;
    prompt.handle(Intent::MoveDown).await;
    prompt.handle(Intent::MoveDown).await;
    assert_eq!(active_path(&prompt), "a/c");
    prompt.handle(Intent::Toggle).await;
    assert!(prompt.selected().is_empty());
}

#[tokio::test]
async fn scenario_submit_validator_keeps_session_open() {
    let require_one = SubmitFn(|answer: &Answer, _: &Answers| match answer {
        Answer::Multiple(values) if values.is_empty() => {
            Validation::Invalid("Select at least one item".into())
        }
        _ => Validation::Valid,
    });
    let mut prompt = TreePrompt::builder(abc_tree())
        .multiple(true)
        .submit_validator(Arc::new(require_one))
        .build();
    let mut source = ScriptedSource::new([
        Intent::Submit,
        Intent::Expand,
        Intent::MoveDown,
        Intent::Toggle,
        Intent::Submit,
    ]);
    let mut screen = RecordingScreen::default();

    let answer = prompt.run(&mut source, &mut screen).await.unwrap();

    assert_eq!(answer, Answer::Multiple(vec![json!("B")]));
    assert_eq!(
        screen.frames[1].bottom.as_deref(),
        Some(">> Select at least one item")
    );
    assert!(screen.frames[2].bottom.is_none());
}
