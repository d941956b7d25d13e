use super::{
    EditError, Extraction, Outcome, place,
    splice::{
        LineEnding, drop_dangling_padding, excise, finish, join_lines, split_lines, trim_blank,
    },
};
use crate::{
    markup::Markup,
    parsing::{content_sections, parse_sections, section_extent},
};

/// Moves non-pinned section `from` so that it becomes non-pinned section
/// `to` once taken out. The pinned section never moves.
pub fn move_section(text: &str, from: usize, to: usize, markup: &Markup) -> Outcome {
    let sections = parse_sections(text, markup);
    let content = content_sections(&sections);
    if from == to || from >= content.len() || to >= content.len() {
        log::debug!("move_section {from} -> {to} ignored ({} sections)", content.len());
        return Outcome::Unchanged;
    }

    let ending = LineEnding::detect(text);
    let lines = split_lines(text);
    let range = section_extent(content[from], &sections, &lines, markup);
    let (remaining, payload) = excise(&lines, range);
    let remaining = join_lines(&remaining);

    let starts: Vec<usize> = content_sections(&parse_sections(&remaining, markup))
        .iter()
        .map(|s| s.start)
        .collect();
    Outcome::Changed(ending.apply(&place(&remaining, &payload, to, &starts, markup)))
}

/// Deletes non-pinned section `index`, heading and body.
pub fn remove_section(text: &str, index: usize, markup: &Markup) -> Outcome {
    let sections = parse_sections(text, markup);
    let content = content_sections(&sections);
    let Some(section) = content.get(index) else {
        log::debug!("remove_section {index} ignored ({} sections)", content.len());
        return Outcome::Unchanged;
    };

    let lines = split_lines(text);
    let range = section_extent(section, &sections, &lines, markup);
    let (remaining, _) = excise(&lines, range);
    let remaining = drop_dangling_padding(remaining, markup);
    Outcome::Changed(LineEnding::detect(text).apply(&finish(&join_lines(&remaining))))
}

/// Copies the body of non-pinned section `index` out for a new note.
///
/// The document itself is not changed here; the caller records a
/// back-reference once the note exists. `Ok(None)` means a stale index.
pub fn extract_section(
    text: &str,
    index: usize,
    markup: &Markup,
) -> Result<Option<Extraction>, EditError> {
    let sections = parse_sections(text, markup);
    let content = content_sections(&sections);
    let Some(section) = content.get(index) else {
        log::debug!("extract_section {index} ignored ({} sections)", content.len());
        return Ok(None);
    };

    let lines = split_lines(text);
    let range = section_extent(section, &sections, &lines, markup);
    let body = trim_blank(&lines[(range.start + 1).min(range.end)..range.end]);
    if body.is_empty() {
        return Err(EditError::EmptyExtraction);
    }

    let body: Vec<&str> = body.iter().map(|line| line.trim_end_matches('\r')).collect();
    Ok(Some(Extraction {
        title: section.title.clone(),
        body: join_lines(&body),
    }))
}
