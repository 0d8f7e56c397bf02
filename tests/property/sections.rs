//! Randomized edit sequences against the section model

use papersmith::sections::{even_split, SectionModel};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Edit {
    Add,
    Remove(usize),
    Move(usize, usize),
    DragOver(usize, usize),
}

fn edit_strategy() -> impl Strategy<Value = Edit> {
    prop_oneof![
        3 => Just(Edit::Add),
        1 => any::<usize>().prop_map(Edit::Remove),
        2 => (any::<usize>(), 0usize..12).prop_map(|(a, b)| Edit::Move(a, b)),
        2 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Edit::DragOver(a, b)),
    ]
}

fn id_at(model: &SectionModel, pick: usize) -> Option<String> {
    let len = model.len();
    (len > 0).then(|| model.sections()[pick % len].id.clone())
}

fn apply(model: &mut SectionModel, edit: &Edit) {
    match edit {
        Edit::Add => {
            model.add_section(100);
        }
        Edit::Remove(pick) => {
            if let Some(id) = id_at(model, *pick) {
                model.remove_section(&id).unwrap();
            }
        }
        Edit::Move(pick, to) => {
            if let Some(id) = id_at(model, *pick) {
                model.move_section(&id, *to).unwrap();
            }
        }
        Edit::DragOver(a, b) => {
            if let (Some(active), Some(over)) = (id_at(model, *a), id_at(model, *b)) {
                model.drag_over(&active, &over).unwrap();
            }
        }
    }
}

/// After any edit sequence, `order` equals position and ids stay unique
#[test]
fn test_order_is_dense_after_edits_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&prop::collection::vec(edit_strategy(), 0..50), |edits| {
            let mut model = SectionModel::new();
            for edit in &edits {
                apply(&mut model, edit);
            }
            let sections = model.sections();
            for (index, section) in sections.iter().enumerate() {
                prop_assert_eq!(section.order, index);
            }
            let mut ids: Vec<&str> = sections.iter().map(|s| s.id.as_str()).collect();
            ids.sort_unstable();
            ids.dedup();
            prop_assert_eq!(ids.len(), sections.len());

            Ok(())
        })
        .unwrap();
}

/// Auto-distribute always sums to the total, with shares differing by at most one
#[test]
fn test_auto_distribute_sums_to_total_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(&(0u32..10_000, 1usize..40), |(total, count)| {
            let mut model = SectionModel::new();
            for _ in 0..count {
                model.add_section(total);
            }
            model.auto_distribute_marks(total);

            let marks: Vec<u32> = model.sections().iter().map(|s| s.target_marks).collect();
            prop_assert_eq!(marks.iter().sum::<u32>(), total);
            let max = marks.iter().copied().max().unwrap_or(0);
            let min = marks.iter().copied().min().unwrap_or(0);
            prop_assert!(max - min <= 1);
            prop_assert!(marks.windows(2).all(|w| w[0] >= w[1]));
            prop_assert_eq!(marks, even_split(total, count));

            Ok(())
        })
        .unwrap();
}
