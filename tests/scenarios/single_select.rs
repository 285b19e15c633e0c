//! Scenario: picking one value.

use serde_json::json;
use treepick::ui::ScriptedSource;
use treepick::{Answer, Descriptor, Intent, PickerError, TreePrompt};

use crate::common::*;

/// Down, down, right, down lands on `a/b`; enter answers with b's value.
#[tokio::test]
async fn scenario_navigate_into_branch_and_submit() {
    let mut prompt = TreePrompt::builder(abc_tree()).build();
    let mut source = ScriptedSource::new([
        Intent::MoveDown,
        Intent::MoveDown,
        Intent::Expand,
        Intent::MoveDown,
        Intent::Submit,
    ]);
    let mut screen = RecordingScreen::default();

    let answer = prompt.run(&mut source, &mut screen).await.unwrap();

    assert_eq!(answer, Answer::Single(json!("B")));
    assert!(screen.done);
    assert_eq!(screen.frames.len(), 6);
    assert_eq!(
        screen.last(),
        "? Choose an item: b\nSelected Path: >>  a/b"
    );
}

#[tokio::test]
async fn scenario_first_frame() {
    let mut prompt = TreePrompt::builder(abc_tree()).build();
    let frame = prompt.start().await.to_string();

    insta::assert_snapshot!(frame, @r"
    ? Choose an item: (Use arrow keys, enter to confirm.)
      → a
    ----------------
    Selected Path: >>  a
    ");
}

#[tokio::test]
async fn scenario_expanded_branch_frame() {
    let mut prompt = TreePrompt::builder(abc_tree()).looping(false).build();
    prompt.start().await;
    prompt.handle(Intent::Expand).await;
    prompt.handle(Intent::Expand).await;

    assert_eq!(
        prompt.frame().to_string(),
        "? Choose an item: \n  ↓ a\n    ❯ b\n      c\nSelected Path: >>  a/b"
    );
}

#[tokio::test]
async fn scenario_space_opens_and_closes_branches() {
    let mut prompt = TreePrompt::builder(abc_tree()).build();
    prompt.start().await;

    prompt.handle(Intent::Toggle).await;
    assert_eq!(shown_paths(&prompt), ["a", "a/b", "a/c"]);

    prompt.handle(Intent::Toggle).await;
    assert_eq!(shown_paths(&prompt), ["a"]);
}

#[tokio::test]
async fn scenario_left_walks_back_up() {
    let mut prompt = TreePrompt::builder(abc_tree()).build();
    prompt.start().await;
    prompt.handle(Intent::Expand).await;
    prompt.handle(Intent::Expand).await;
    prompt.handle(Intent::MoveDown).await;
    assert_eq!(active_path(&prompt), "a/c");

    prompt.handle(Intent::Collapse).await;
    assert_eq!(active_path(&prompt), "a");
    prompt.handle(Intent::Collapse).await;
    assert_eq!(shown_paths(&prompt), ["a"]);

    // Top-level nodes have nowhere further to go.
    prompt.handle(Intent::Collapse).await;
    assert_eq!(active_path(&prompt), "a");
}

#[tokio::test]
async fn scenario_short_label_in_answer() {
    let tree = vec![Descriptor::named("A very long name", 1).with_short("long")];
    let mut prompt = TreePrompt::builder(tree).build();
    let mut source = ScriptedSource::new([Intent::Submit]);
    let mut screen = RecordingScreen::default();

    let answer = prompt.run(&mut source, &mut screen).await.unwrap();

    assert_eq!(answer, Answer::Single(json!(1)));
    assert!(screen.last().starts_with("? Choose an item: long\n"));
}

#[tokio::test]
async fn scenario_cancel() {
    let mut prompt = TreePrompt::builder(abc_tree()).build();
    let mut source = ScriptedSource::new([Intent::MoveDown, Intent::Cancel]);
    let mut screen = RecordingScreen::default();

    let result = prompt.run(&mut source, &mut screen).await;

    assert!(matches!(result, Err(PickerError::Cancelled)));
    assert!(screen.done);
}

#[tokio::test]
async fn scenario_input_runs_dry() {
    let mut prompt = TreePrompt::builder(abc_tree()).build();
    let mut source = ScriptedSource::new([Intent::MoveDown]);
    let mut screen = RecordingScreen::default();

    let result = prompt.run(&mut source, &mut screen).await;
    assert!(matches!(result, Err(PickerError::InputClosed)));
}

#[tokio::test]
async fn scenario_empty_tree() {
    let mut prompt = TreePrompt::builder(Vec::<Descriptor>::new()).build();
    let mut source = ScriptedSource::new([Intent::Submit]);
    let mut screen = RecordingScreen::default();

    let result = prompt.run(&mut source, &mut screen).await;
    assert!(matches!(result, Err(PickerError::EmptyTree)));
    assert!(screen.frames.is_empty());
}

#[tokio::test]
async fn scenario_transformer_labels_values() {
    let tree = vec![Descriptor::leaf(1), Descriptor::leaf(2)];
    let mut prompt = TreePrompt::builder(tree)
        .transformer(|value, _, ctx| {
            if ctx.is_final {
                format!("#{value}")
            } else {
                format!("item {value}")
            }
        })
        .build();
    let mut source = ScriptedSource::new([Intent::MoveDown, Intent::Submit]);
    let mut screen = RecordingScreen::default();

    let answer = prompt.run(&mut source, &mut screen).await.unwrap();

    assert_eq!(answer, Answer::Single(json!(2)));
    assert!(screen.frames[0].message.contains("❯ item 1"));
    assert!(screen.last().starts_with("? Choose an item: #2\n"));
}
