use gatekeep_core::{
    classify, compute_diff, window, DiffEngine, DiffStats, DisplayLine, DisplayLineKind, EditOp,
    Error, Impact,
};
use pretty_assertions::assert_eq;

#[test]
fn single_line_replacement_end_to_end() {
    let old = "function f() {\n  return 1\n}";
    let new = "function f() {\n  return 2\n}";

    let ops = DiffEngine::new().diff(old, new).expect("diff");
    assert_eq!(
        ops,
        vec![
            EditOp::equal("function f() {", 1, 1),
            EditOp::delete("  return 1", 2),
            EditOp::insert("  return 2", 2),
            EditOp::equal("}", 3, 3),
        ]
    );

    let stats = DiffStats::from_ops(&ops);
    assert_eq!(stats, DiffStats::new(1, 1));
    assert_eq!(stats.summary(), "+1/-1");
    assert_eq!(classify(stats), Impact::Low);

    let lines = window(&ops, 3);
    let kinds: Vec<_> = lines.iter().map(|line| line.kind).collect();
    assert_eq!(
        kinds,
        vec![
            DisplayLineKind::Context,
            DisplayLineKind::Deleted,
            DisplayLineKind::Added,
            DisplayLineKind::Context,
        ]
    );
}

#[test]
fn swapped_lines_keep_the_later_match() {
    assert_eq!(
        compute_diff("a\nb", "b\na"),
        vec![
            EditOp::delete("a", 1),
            EditOp::equal("b", 2, 1),
            EditOp::insert("a", 2),
        ]
    );
}

#[test]
fn tied_runs_put_deletions_before_insertions() {
    assert_eq!(
        compute_diff("keep\nold 1\nold 2\nend", "keep\nnew 1\nnew 2\nend"),
        vec![
            EditOp::equal("keep", 1, 1),
            EditOp::delete("old 1", 2),
            EditOp::delete("old 2", 3),
            EditOp::insert("new 1", 2),
            EditOp::insert("new 2", 3),
            EditOp::equal("end", 4, 4),
        ]
    );
}

#[test]
fn identical_texts_have_no_visible_lines() {
    let text = "one\ntwo\nthree\n";
    let ops = compute_diff(text, text);
    assert_eq!(ops.len(), 4);
    assert!(ops.iter().all(|op| !op.is_change()));

    let stats = DiffStats::from_ops(&ops);
    assert_eq!(stats, DiffStats::ZERO);
    assert_eq!(classify(stats), Impact::Low);
    assert!(window(&ops, 3).is_empty());
}

#[test]
fn radius_one_keeps_neighbouring_context() {
    let ops = compute_diff("a\nb\nc\nd\ne", "a\nX\nc\nd\ne");
    let lines = window(&ops, 1);
    assert_eq!(
        lines,
        vec![
            DisplayLine::from(&EditOp::equal("a", 1, 1)),
            DisplayLine::from(&EditOp::delete("b", 2)),
            DisplayLine::from(&EditOp::insert("X", 2)),
            DisplayLine::from(&EditOp::equal("c", 3, 3)),
        ]
    );
}

#[test]
fn distant_changes_are_separated_by_one_gap() {
    let old: Vec<String> = (1..=20).map(|n| format!("line {n}")).collect();
    let mut new = old.clone();
    new[1] = "changed 2".into();
    new[17] = "changed 18".into();

    let ops = compute_diff(&old.join("\n"), &new.join("\n"));
    let lines = window(&ops, 2);

    let gaps = lines.iter().filter(|line| line.is_gap()).count();
    assert_eq!(gaps, 1);
    assert!(!lines.first().is_some_and(DisplayLine::is_gap));
    assert!(!lines.last().is_some_and(DisplayLine::is_gap));

    let stats = DiffStats::from_ops(&ops);
    assert_eq!(stats.total, 4);
}

#[test]
fn rewrite_of_many_lines_is_high_impact() {
    let old: Vec<String> = (0..15).map(|n| format!("old {n}")).collect();
    let new: Vec<String> = (0..15).map(|n| format!("new {n}")).collect();

    let stats = DiffStats::from_ops(&compute_diff(&old.join("\n"), &new.join("\n")));
    assert_eq!(stats, DiffStats::new(15, 15));
    assert_eq!(classify(stats), Impact::High);
}

#[test]
fn guard_refuses_before_building_the_table() {
    let big = "x\n".repeat(999);
    let err = DiffEngine::with_max_cells(1_000)
        .diff(&big, &big)
        .expect_err("oversized input");
    match err {
        Error::InputTooLarge {
            old_lines,
            new_lines,
            limit,
        } => {
            assert_eq!(old_lines, 1_000);
            assert_eq!(new_lines, 1_000);
            assert_eq!(limit, 1_000);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
