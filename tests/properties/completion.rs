//! Property tests for tab completion.

use proptest::prelude::*;

use treepick::{Descriptor, Intent, TreePrompt};

use crate::common::{active_path, block_on};

#[derive(Debug, Clone, Copy)]
enum Terminal {
    Leaf,
    EmptyBranch,
    WideBranch,
}

fn terminal() -> impl Strategy<Value = Terminal> {
    prop_oneof![
        Just(Terminal::Leaf),
        Just(Terminal::EmptyBranch),
        Just(Terminal::WideBranch),
    ]
}

/// `n0/n1/.../n{depth-1}/end`, each `n*` holding only the next node
fn chain(depth: usize, end: Terminal) -> Vec<Descriptor> {
    let mut node = match end {
        Terminal::Leaf => Descriptor::named("end", "end"),
        Terminal::EmptyBranch => Descriptor::branch("end", vec![]),
        Terminal::WideBranch => Descriptor::branch(
            "end",
            vec![Descriptor::named("x", 1), Descriptor::named("y", 2)],
        ),
    };
    for level in (0..depth).rev() {
        node = Descriptor::branch(format!("n{level}"), vec![node]);
    }
    vec![node]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Completion descends through single-child branches and stops at
    /// the first leaf or branch with zero or several children.
    #[test]
    fn property_completion_stops_at_first_fork(depth in 0usize..6, end in terminal()) {
        block_on(async {
            let mut prompt = TreePrompt::builder(chain(depth, end)).build();
            prompt.start().await;
            prompt.handle(Intent::EnterSearch).await;
            prompt.handle(Intent::Complete).await;

            let mut expected: Vec<String> = (0..depth).map(|level| format!("n{level}")).collect();
            expected.push("end".to_string());
            let expected_path = expected.join("/");

            prop_assert_eq!(active_path(&prompt), expected_path.clone());
            let expected_query = match end {
                Terminal::Leaf => expected_path,
                Terminal::EmptyBranch | Terminal::WideBranch => format!("{expected_path}/"),
            };
            prop_assert_eq!(prompt.search().query(), expected_query.as_str());
            Ok(())
        })?;
    }
}
