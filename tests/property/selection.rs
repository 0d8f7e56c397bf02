//! Randomized toggle sequences against the selection model

use papersmith::catalogue::TopicCatalogue;
use papersmith::selection::{SelectionModel, TriState};
use proptest::prelude::*;

/// One interaction on the topics step
#[derive(Debug, Clone)]
enum Toggle {
    Subtopic(usize, usize),
    Topic(usize),
    SelectAll,
    DeselectAll,
}

fn toggle_strategy() -> impl Strategy<Value = Toggle> {
    prop_oneof![
        4 => (0usize..6, 0usize..7).prop_map(|(t, s)| Toggle::Subtopic(t, s)),
        2 => (0usize..6).prop_map(Toggle::Topic),
        1 => Just(Toggle::SelectAll),
        1 => Just(Toggle::DeselectAll),
    ]
}

fn apply(model: &mut SelectionModel, catalogue: &TopicCatalogue, toggle: &Toggle) {
    let topics = catalogue.topics();
    match toggle {
        Toggle::Subtopic(t, s) => {
            let topic = &topics[t % topics.len()];
            let sub = &topic.subtopics[s % topic.subtopics.len()];
            model.toggle_subtopic(catalogue, &topic.id, sub).unwrap();
        }
        Toggle::Topic(t) => {
            model.toggle_all_for_topic(&topics[t % topics.len()]);
        }
        Toggle::SelectAll => model.select_all(catalogue),
        Toggle::DeselectAll => model.deselect_all(),
    }
}

/// Tri-state always agrees with the selected count, and empty sets never linger
#[test]
fn test_tri_state_matches_counts_property() {
    let catalogue = TopicCatalogue::builtin().unwrap();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &prop::collection::vec(toggle_strategy(), 0..40),
            |toggles| {
                let mut model = SelectionModel::new();
                for toggle in &toggles {
                    apply(&mut model, &catalogue, toggle);
                }

                for topic in catalogue.topics() {
                    let count = model.selected_count(&topic.id);
                    let expected = if count == 0 {
                        TriState::None
                    } else if count == topic.subtopics.len() {
                        TriState::All
                    } else {
                        TriState::Partial
                    };
                    prop_assert_eq!(model.tri_state(topic), expected);
                    for sub in model.subtopics_for(&topic.id).into_iter().flatten() {
                        prop_assert!(topic.has_subtopic(sub));
                    }
                }
                prop_assert!(model.iter().all(|(_, subs)| !subs.is_empty()));
                prop_assert_eq!(model.is_empty(), model.selected_topics().is_empty());

                Ok(())
            },
        )
        .unwrap();
}

/// Toggling the same subtopic twice is a no-op
#[test]
fn test_double_toggle_is_identity_property() {
    let catalogue = TopicCatalogue::builtin().unwrap();
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &(
                prop::collection::vec(toggle_strategy(), 0..20),
                0usize..6,
                0usize..7,
            ),
            |(toggles, t, s)| {
                let mut model = SelectionModel::new();
                for toggle in &toggles {
                    apply(&mut model, &catalogue, toggle);
                }
                let before = model.clone();
                let flip = Toggle::Subtopic(t, s);
                apply(&mut model, &catalogue, &flip);
                apply(&mut model, &catalogue, &flip);
                prop_assert_eq!(model, before);

                Ok(())
            },
        )
        .unwrap();
}
