use super::{
    Outcome, place,
    splice::{LineEnding, excise, join_lines, split_lines},
};
use crate::{
    markup::Markup,
    parsing::{group_blocks, parse_blocks},
};

/// Moves heading group `from`, children included, so that it becomes group
/// `to` once taken out. Orphan blocks before the first heading stay put.
pub fn move_group(text: &str, from: usize, to: usize, markup: &Markup) -> Outcome {
    let blocks = parse_blocks(text, markup);
    let groups = group_blocks(&blocks).groups;
    if from == to || from >= groups.len() || to >= groups.len() {
        log::debug!("move_group {from} -> {to} ignored ({} groups)", groups.len());
        return Outcome::Unchanged;
    }

    let ending = LineEnding::detect(text);
    let lines = split_lines(text);
    let (remaining, payload) = excise(&lines, groups[from].lines(&blocks));
    let remaining = join_lines(&remaining);

    let remaining_blocks = parse_blocks(&remaining, markup);
    let starts: Vec<usize> = group_blocks(&remaining_blocks)
        .groups
        .iter()
        .map(|g| remaining_blocks[g.heading].start)
        .collect();
    Outcome::Changed(ending.apply(&place(&remaining, &payload, to, &starts, markup)))
}
