use markdown_essay_engine::{
    Markup, Outcome,
    editing::{
        insert_note, insert_quote, insert_section, move_block, move_group, move_section,
        remove_block, remove_section,
    },
    parsing::{
        block_region_end, classify, content_sections, group_blocks, join_lines, parse_blocks,
        parse_sections, split_lines,
    },
    SourceNote,
};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!(
        "{}/tests/fixtures/{name}.md",
        env!("CARGO_MANIFEST_DIR")
    ))
    .unwrap()
}

/// Sorted contents of every block line.
fn block_lines(text: &str) -> Vec<String> {
    let lines = split_lines(text);
    let mut out: Vec<String> = parse_blocks(text, &Markup::default())
        .iter()
        .flat_map(|b| lines[b.lines()].iter().map(|l| l.to_string()))
        .collect();
    out.sort();
    out
}

fn assert_pinned_last(before: &str, after: &str) {
    let markup = Markup::default();
    let had_pinned = parse_sections(before, &markup).iter().any(|s| s.pinned);
    if !had_pinned {
        return;
    }
    let sections = parse_sections(after, &markup);
    let last = sections.last().expect("sections after edit");
    assert!(last.pinned, "pinned section is not last:\n{after}");
    assert_eq!(last.title, "Sources");
    assert_eq!(sections.iter().filter(|s| s.pinned).count(), 1);
}

#[rstest]
#[case("essay")]
#[case("no_sources")]
#[case("blank_heavy")]
fn blocks_and_separators_reproduce_region(#[case] name: &str) {
    let text = fixture(name);
    let lines = split_lines(&text);
    let end = block_region_end(&lines, &Markup::default());

    let mut rebuilt: Vec<&str> = Vec::new();
    let mut cursor = 0;
    for block in parse_blocks(&text, &Markup::default()) {
        for gap in &lines[cursor..block.start] {
            assert!(classify(gap).is_separator(), "non-separator between blocks: {gap:?}");
        }
        rebuilt.extend_from_slice(&lines[cursor..block.end]);
        cursor = block.end;
    }
    rebuilt.extend_from_slice(&lines[cursor..end]);

    assert_eq!(join_lines(&rebuilt), join_lines(&lines[..end]));
}

#[rstest]
#[case("essay")]
#[case("no_sources")]
#[case("blank_heavy")]
fn self_moves_are_no_ops(#[case] name: &str) {
    let text = fixture(name);
    let markup = Markup::default();
    let blocks = parse_blocks(&text, &markup).len();
    for i in 0..blocks {
        assert_eq!(move_block(&text, i, i, &markup), Outcome::Unchanged);
    }
    let groups = group_blocks(&parse_blocks(&text, &markup)).groups.len();
    for i in 0..groups {
        assert_eq!(move_group(&text, i, i, &markup), Outcome::Unchanged);
    }
    let sections = content_sections(&parse_sections(&text, &markup)).len();
    for i in 0..sections {
        assert_eq!(move_section(&text, i, i, &markup), Outcome::Unchanged);
    }
}

#[rstest]
#[case("essay")]
#[case("no_sources")]
#[case("blank_heavy")]
fn block_moves_conserve_lines_and_keep_pinned_last(#[case] name: &str) {
    let text = fixture(name);
    let markup = Markup::default();
    let count = parse_blocks(&text, &markup).len();

    for from in 0..count {
        for to in 0..count {
            if from == to {
                continue;
            }
            let moved = move_block(&text, from, to, &markup).into_text(&text);
            assert_eq!(block_lines(&moved), block_lines(&text), "move {from} -> {to}");
            assert_pinned_last(&text, &moved);
        }
    }
}

#[rstest]
#[case("essay")]
#[case("no_sources")]
#[case("blank_heavy")]
fn group_and_section_moves_conserve_lines(#[case] name: &str) {
    let text = fixture(name);
    let markup = Markup::default();
    let groups = group_blocks(&parse_blocks(&text, &markup)).groups.len();
    let sections = content_sections(&parse_sections(&text, &markup)).len();

    for from in 0..groups {
        for to in (0..groups).filter(|&to| to != from) {
            let moved = move_group(&text, from, to, &markup).into_text(&text);
            assert_eq!(block_lines(&moved), block_lines(&text), "group {from} -> {to}");
            assert_pinned_last(&text, &moved);
        }
    }
    for from in 0..sections {
        for to in (0..sections).filter(|&to| to != from) {
            let moved = move_section(&text, from, to, &markup).into_text(&text);
            assert_eq!(block_lines(&moved), block_lines(&text), "section {from} -> {to}");
            assert_pinned_last(&text, &moved);
        }
    }
}

#[rstest]
#[case("essay")]
#[case("no_sources")]
#[case("blank_heavy")]
fn removal_shrinks_by_exactly_one(#[case] name: &str) {
    let text = fixture(name);
    let markup = Markup::default();

    let blocks = parse_blocks(&text, &markup);
    for i in 0..blocks.len() {
        let removed = remove_block(&text, i, &markup).into_text(&text);
        assert_eq!(parse_blocks(&removed, &markup).len(), blocks.len() - 1, "block {i}");
        assert_pinned_last(&text, &removed);
    }

    let sections = parse_sections(&text, &markup);
    let content = content_sections(&sections);
    for (i, section) in content.iter().enumerate() {
        let removed = remove_section(&text, i, &markup).into_text(&text);
        let after = parse_sections(&removed, &markup);
        assert_eq!(after.len(), sections.len() - 1, "section {i}");
        assert!(after.iter().all(|s| s.title != section.title));
        assert_pinned_last(&text, &removed);
    }
}

#[rstest]
#[case("essay")]
#[case("no_sources")]
fn inserts_keep_pinned_last(#[case] name: &str) {
    let text = fixture(name);
    let markup = Markup::default();
    let note = SourceNote::new("Fresh Note", "# Fresh Note\n\nNew material.").unwrap();

    for inserted in [
        insert_section(&text, "New Section", &markup).unwrap(),
        insert_note(&text, &note, &markup).unwrap(),
        insert_quote(&text, "Someone", "A quotable line.", &markup).unwrap(),
    ] {
        assert_pinned_last(&text, &inserted);
    }
}

#[test]
fn first_section_moves_after_second() {
    let doc = "## A\nalpha\n\n## B\nbeta\n\n## Sources\n\n- [[x]]\n";
    let moved = move_section(doc, 0, 1, &Markup::default()).into_text(doc);

    let sections = parse_sections(&moved, &Markup::default());
    let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
    assert_eq!(titles, vec!["B", "A", "Sources"]);
    assert!(moved.contains("## B\nbeta\n"));
    assert!(moved.contains("## A\nalpha\n"));
}

#[test]
fn insert_note_creates_single_pinned_section() {
    let text = fixture("no_sources");
    let markup = Markup::default();
    let note = SourceNote::new("Pulled", "pulled body").unwrap();

    let inserted = insert_note(&text, &note, &markup).unwrap();

    let sections = parse_sections(&inserted, &markup);
    let pinned: Vec<_> = sections.iter().filter(|s| s.pinned).collect();
    assert_eq!(pinned.len(), 1);
    assert!(sections.last().is_some_and(|s| s.pinned));

    let lines = split_lines(&inserted);
    let entries: Vec<&str> = lines[pinned[0].body()]
        .iter()
        .copied()
        .filter(|l| l.starts_with("- "))
        .collect();
    assert_eq!(entries, vec!["- [[Pulled]]"]);
}

#[test]
fn removing_section_next_to_blank_run_collapses_it() {
    let text = fixture("blank_heavy");
    let markup = Markup::default();

    let removed = remove_section(&text, 1, &markup).into_text(&text);

    assert!(removed.contains("Lots of space above.\n\n## After\n"));
    // The run inside the first section is not next to the cut.
    assert!(removed.starts_with("## Keep\n\n\n\nLots of space above."));
}
