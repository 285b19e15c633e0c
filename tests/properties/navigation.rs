//! Property tests for cursor movement.

use proptest::prelude::*;

use treepick::{Descriptor, Intent, TreePrompt};

use crate::common::block_on;

pub fn tree_strategy() -> impl Strategy<Value = Vec<Descriptor>> {
    let leaf = "[a-c]{1,3}".prop_map(|name| Descriptor::named(name.clone(), name));
    let node = leaf.prop_recursive(3, 32, 4, |inner| {
        ("[a-c]{1,3}", prop::collection::vec(inner, 0..4))
            .prop_map(|(name, children)| Descriptor::branch(name, children))
    });
    prop::collection::vec(node, 1..5)
}

fn navigation_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        Just(Intent::MoveUp),
        Just(Intent::MoveDown),
        Just(Intent::Expand),
        Just(Intent::Collapse),
        Just(Intent::Toggle),
    ]
}

/// Navigation interleaved with search editing, over the tree's own alphabet
fn search_intent() -> impl Strategy<Value = Intent> {
    prop_oneof![
        2 => navigation_intent(),
        1 => Just(Intent::EnterSearch),
        3 => "[a-c/]".prop_map(|s| Intent::Type(s.chars().next().unwrap_or('a'))),
        1 => Just(Intent::Backspace),
        1 => Just(Intent::Complete),
        1 => Just(Intent::SearchUp),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Without looping, the active node always stays inside the visible list.
    #[test]
    fn property_active_stays_in_visible_list(
        tree in tree_strategy(),
        intents in prop::collection::vec(navigation_intent(), 0..40),
    ) {
        block_on(async {
            let mut prompt = TreePrompt::builder(tree).looping(false).build();
            prompt.start().await;

            for intent in intents {
                prompt.handle(intent).await;
                let active = prompt.active().expect("a non-empty tree always has an active node");
                let index = prompt.shown().iter().position(|&id| id == active);
                prop_assert!(index.is_some(), "active node left the visible list after {:?}", intent);
                prop_assert!(index.unwrap() < prompt.shown().len());
            }
            Ok(())
        })?;
    }

    /// PROPERTY: With looping, moving down `len` times returns to the start.
    #[test]
    fn property_looping_cycles(tree in tree_strategy()) {
        block_on(async {
            let mut prompt = TreePrompt::builder(tree).build();
            prompt.start().await;
            let start = prompt.active();
            let len = prompt.shown().len();

            for _ in 0..len {
                prompt.handle(Intent::MoveDown).await;
            }
            prop_assert_eq!(prompt.active(), start);
            Ok(())
        })?;
    }

    /// PROPERTY: While searching, the active node is visible; only the root
    /// context (empty query, or nothing left to show) may stand in for it.
    #[test]
    fn property_search_keeps_active_visible(
        tree in tree_strategy(),
        intents in prop::collection::vec(search_intent(), 0..40),
    ) {
        block_on(async {
            let mut prompt = TreePrompt::builder(tree).looping(false).build();
            prompt.start().await;

            for intent in intents {
                prompt.handle(intent).await;
                let active = prompt.active().expect("a non-empty tree always has an active node");
                if prompt.shown().contains(&active) {
                    continue;
                }
                prop_assert_eq!(active, prompt.tree().root(), "hidden node active after {:?}", intent);
                prop_assert!(
                    prompt.search().query().is_empty() || prompt.shown().is_empty(),
                    "root active with query {:?} and visible nodes after {:?}",
                    prompt.search().query(),
                    intent
                );
            }
            Ok(())
        })?;
    }
}
