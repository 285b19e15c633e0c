//! Scenario: finding nodes by path.

use serde_json::json;
use treepick::ui::ScriptedSource;
use treepick::{Answer, Descriptor, Intent, Outcome, TreePrompt};

use crate::common::*;

async fn type_query(prompt: &mut TreePrompt, query: &str) {
    for c in query.chars() {
        prompt.handle(Intent::Type(c)).await;
    }
}

/// Query "c" hides `b` and keeps its ancestor `a` visible.
#[tokio::test]
async fn scenario_query_hides_non_matching_leaves() {
    let mut prompt = TreePrompt::builder(abc_tree()).build();
    prompt.start().await;

    // A lone visible node is focused and opened right away.
    prompt.handle(Intent::EnterSearch).await;
    assert_eq!(active_path(&prompt), "a");
    assert_eq!(shown_paths(&prompt), ["a", "a/b", "a/c"]);

    type_query(&mut prompt, "c").await;

    let tree = prompt.tree();
    let a = tree.find_by_name("a").unwrap();
    let b = tree.find_by_name("b").unwrap();
    let c = tree.find_by_name("c").unwrap();
    assert!(!tree.node(a).is_hidden());
    assert!(tree.node(b).is_hidden());
    assert!(!tree.node(c).is_hidden());
    assert!(prompt.frame().message.contains("\nSearch: $ c\n"));

    // Without a prefix match the active branch is closed; reopening it shows
    // only the matching child.
    assert_eq!(shown_paths(&prompt), ["a"]);
    prompt.handle(Intent::Expand).await;
    assert_eq!(shown_paths(&prompt), ["a", "a/c"]);
}

/// A query that hides the active node without any prefix match moves the
/// cursor to the first visible node, so Enter never answers a hidden one.
#[tokio::test]
async fn scenario_hidden_active_node_hands_cursor_to_first_visible() {
    let tree = vec![
        Descriptor::named("ab", "AB"),
        Descriptor::named("cb", "CB"),
        Descriptor::named("d", "D"),
    ];
    let mut prompt = TreePrompt::builder(tree).build();
    prompt.start().await;
    prompt.handle(Intent::EnterSearch).await;
    for _ in 0..3 {
        prompt.handle(Intent::MoveDown).await;
    }
    assert_eq!(active_path(&prompt), "d");

    prompt.handle(Intent::Type('b')).await;

    assert_eq!(shown_paths(&prompt), ["ab", "cb"]);
    assert_eq!(active_path(&prompt), "ab");
    assert!(prompt.frame().message.ends_with("Selected Path: >>  ab"));
    assert_eq!(
        prompt.handle(Intent::Submit).await,
        Outcome::Answered(Answer::Single(json!("AB")))
    );
}

/// When nothing matches, the cursor falls back to the root and Enter is refused.
#[tokio::test]
async fn scenario_query_without_matches_refuses_submit() {
    let mut prompt = TreePrompt::builder(project_tree()).build();
    prompt.start().await;
    prompt.handle(Intent::MoveDown).await;
    prompt.handle(Intent::EnterSearch).await;

    type_query(&mut prompt, "zz").await;

    assert!(prompt.shown().is_empty());
    assert_eq!(prompt.active(), Some(prompt.tree().root()));
    assert_eq!(prompt.handle(Intent::Submit).await, Outcome::Continue);
    assert_eq!(prompt.error(), Some("No item is highlighted"));
}

#[tokio::test]
async fn scenario_typing_focuses_first_prefix_match() {
    let mut prompt = TreePrompt::builder(project_tree()).build();
    prompt.start().await;
    prompt.handle(Intent::EnterSearch).await;

    type_query(&mut prompt, "re").await;
    assert_eq!(active_path(&prompt), "README");

    prompt.handle(Intent::Backspace).await;
    prompt.handle(Intent::Backspace).await;
    assert_eq!(prompt.search().query(), "");
    assert_eq!(prompt.active(), Some(prompt.tree().root()));
    assert_eq!(shown_paths(&prompt), ["projects", "notes", "README"]);
}

#[tokio::test]
async fn scenario_typing_opens_matching_branch() {
    let mut prompt = TreePrompt::builder(project_tree()).build();
    prompt.start().await;
    prompt.handle(Intent::EnterSearch).await;

    type_query(&mut prompt, "pro").await;

    assert_eq!(active_path(&prompt), "projects");
    assert_eq!(shown_paths(&prompt), ["projects", "projects/treepick"]);
}

#[tokio::test]
async fn scenario_tab_completes_through_single_child_branches() {
    let mut prompt = TreePrompt::builder(project_tree()).build();
    prompt.start().await;
    prompt.handle(Intent::EnterSearch).await;
    type_query(&mut prompt, "p").await;

    prompt.handle(Intent::Complete).await;

    assert_eq!(prompt.search().query(), "projects/treepick/src/");
    assert_eq!(active_path(&prompt), "projects/treepick/src");
    assert_eq!(
        shown_paths(&prompt),
        [
            "projects",
            "projects/treepick",
            "projects/treepick/src",
            "projects/treepick/src/main.rs",
            "projects/treepick/src/lib.rs",
        ]
    );
}

#[tokio::test]
async fn scenario_backslash_moves_search_up_then_exits() {
    let mut prompt = TreePrompt::builder(project_tree()).build();
    prompt.start().await;
    prompt.handle(Intent::EnterSearch).await;
    type_query(&mut prompt, "p").await;
    prompt.handle(Intent::Complete).await;

    prompt.handle(Intent::SearchUp).await;
    assert_eq!(prompt.search().query(), "projects");
    assert_eq!(active_path(&prompt), "projects");
    assert_eq!(shown_paths(&prompt), ["projects"]);

    for _ in 0.."projects".len() {
        prompt.handle(Intent::Backspace).await;
    }
    prompt.handle(Intent::SearchUp).await;
    assert!(!prompt.search().is_active());
    assert_eq!(shown_paths(&prompt), ["projects", "notes", "README"]);
    assert!(!prompt.frame().message.contains("Search:"));
    assert_eq!(active_path(&prompt), "projects");
}

#[tokio::test]
async fn scenario_root_directory_anchors_matching() {
    let mut prompt = TreePrompt::builder(project_tree())
        .root_directory("/home/me/")
        .build();
    prompt.start().await;
    prompt.handle(Intent::EnterSearch).await;

    type_query(&mut prompt, "NOT").await;
    assert_eq!(active_path(&prompt), "notes");
}

#[tokio::test]
async fn scenario_search_then_submit() {
    let mut prompt = TreePrompt::builder(project_tree()).build();
    let mut source = ScriptedSource::new([
        Intent::EnterSearch,
        Intent::Type('n'),
        Intent::Type('o'),
        Intent::Submit,
    ]);
    let mut screen = RecordingScreen::default();

    let answer = prompt.run(&mut source, &mut screen).await.unwrap();
    assert_eq!(answer, Answer::Single(json!("notes.txt")));
}
