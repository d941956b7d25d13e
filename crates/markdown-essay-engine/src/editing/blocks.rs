use super::{
    Outcome, place,
    splice::{LineEnding, drop_dangling_padding, excise, finish, join_lines, split_lines},
};
use crate::{markup::Markup, parsing::parse_blocks};

/// Moves block `from` so that it becomes block `to` once it has been taken
/// out. A `to` past the last remaining block lands above the pinned section.
pub fn move_block(text: &str, from: usize, to: usize, markup: &Markup) -> Outcome {
    let blocks = parse_blocks(text, markup);
    if from == to || from >= blocks.len() || to >= blocks.len() {
        log::debug!("move_block {from} -> {to} ignored ({} blocks)", blocks.len());
        return Outcome::Unchanged;
    }

    let ending = LineEnding::detect(text);
    let lines = split_lines(text);
    let (remaining, payload) = excise(&lines, blocks[from].lines());
    let remaining = join_lines(&remaining);

    let starts: Vec<usize> = parse_blocks(&remaining, markup)
        .iter()
        .map(|b| b.start)
        .collect();
    Outcome::Changed(ending.apply(&place(&remaining, &payload, to, &starts, markup)))
}

/// Deletes block `index` and tidies the blank lines it leaves behind.
pub fn remove_block(text: &str, index: usize, markup: &Markup) -> Outcome {
    let blocks = parse_blocks(text, markup);
    let Some(block) = blocks.get(index) else {
        log::debug!("remove_block {index} ignored ({} blocks)", blocks.len());
        return Outcome::Unchanged;
    };

    let lines = split_lines(text);
    let (remaining, _) = excise(&lines, block.lines());
    let remaining = drop_dangling_padding(remaining, markup);
    Outcome::Changed(LineEnding::detect(text).apply(&finish(&join_lines(&remaining))))
}
