use super::{
    EditError,
    splice::{
        LineEnding, finish, insertion_point, join_lines, join_with_payload, split_lines,
        trim_blank,
    },
};
use crate::{
    attribution,
    markup::{HEADING_MARKER, Markup, WIKILINK_CLOSE, WIKILINK_OPEN},
    notes::SourceNote,
    parsing::{LineClass, classify, classify::is_blank, parse_sections, pinned_section},
};

/// Back-reference line recorded in the pinned section.
pub fn reference_entry(name: &str) -> String {
    format!("- {WIKILINK_OPEN}{}{WIKILINK_CLOSE}", name.trim())
}

/// Adds an empty `## title` section above the pinned section.
pub fn insert_section(text: &str, title: &str, markup: &Markup) -> Result<String, EditError> {
    let title = heading_name(title, markup)?;
    Ok(insert_payload(text, &format!("{HEADING_MARKER}{title}"), None, markup))
}

/// Pulls a note in as a `## name` section and records it as a source.
pub fn insert_note(text: &str, note: &SourceNote, markup: &Markup) -> Result<String, EditError> {
    let name = heading_name(&note.name, markup)?;
    let body = demote_pinned_headings(&note.body(), markup);
    let payload = if body.is_empty() {
        format!("{HEADING_MARKER}{name}")
    } else {
        format!("{HEADING_MARKER}{name}\n\n{body}")
    };
    Ok(insert_payload(text, &payload, Some(name), markup))
}

/// Adds `selection` as a quoted passage credited to `source`, and records
/// the source.
pub fn insert_quote(
    text: &str,
    source: &str,
    selection: &str,
    markup: &Markup,
) -> Result<String, EditError> {
    let source = non_empty(source)?;
    if selection.trim().is_empty() {
        return Err(EditError::EmptySelection);
    }
    let payload = attribution::render_quote(selection, source);
    Ok(insert_payload(text, &payload, Some(source), markup))
}

/// Adds a `## name` section that embeds an extracted note back into the
/// essay.
pub fn insert_placeholder(text: &str, name: &str, markup: &Markup) -> Result<String, EditError> {
    let name = heading_name(name, markup)?;
    let payload = format!("{HEADING_MARKER}{name}\n\n!{WIKILINK_OPEN}{name}{WIKILINK_CLOSE}");
    Ok(insert_payload(text, &payload, None, markup))
}

/// Appends a back-reference to `name` at the end of the pinned section,
/// creating the section at document end if it does not exist yet. An
/// existing reference to the same name leaves the text as it is.
pub fn add_reference(text: &str, name: &str, markup: &Markup) -> String {
    let entry = reference_entry(name);
    let ending = LineEnding::detect(text);
    let lines = split_lines(text);
    let sections = parse_sections(text, markup);

    let Some(pinned) = pinned_section(&sections) else {
        log::debug!("creating pinned section '{}'", markup.pinned_section);
        let section = format!("{}\n\n{entry}", markup.pinned_heading());
        return ending.apply(&join_with_payload(&lines, &[section.as_str()], &[]));
    };

    let target = format!("{WIKILINK_OPEN}{}", name.trim());
    let already_listed = lines[pinned.body()].iter().any(|line| {
        line.contains(&format!("{target}{WIKILINK_CLOSE}")) || line.contains(&format!("{target}|"))
    });
    if already_listed {
        return text.to_string();
    }

    // After the last non-blank line of the pinned section.
    let mut at = pinned.end;
    while at > pinned.start + 1 && is_blank(lines[at - 1]) {
        at -= 1;
    }
    let before = join_lines(&lines[..at]);
    let after = trim_blank(&lines[at..]);
    let separator = if at == pinned.start + 1 { "\n\n" } else { "\n" };

    let mut out = format!("{before}{separator}{entry}");
    if !after.is_empty() {
        out.push_str("\n\n");
        out.push_str(&join_lines(after));
    }
    ending.apply(&finish(&out))
}

fn insert_payload(text: &str, payload: &str, reference: Option<&str>, markup: &Markup) -> String {
    let lines = split_lines(text);
    let at = insertion_point(&lines, markup);
    log::debug!("inserting at line {at}");
    let payload_lines = split_lines(payload);
    let inserted = LineEnding::detect(text).apply(&join_with_payload(
        &lines[..at],
        &payload_lines,
        &lines[at..],
    ));
    match reference {
        Some(name) => add_reference(&inserted, name, markup),
        None => inserted,
    }
}

/// A name that becomes a `## ` heading must not claim the pinned section.
fn heading_name<'a>(name: &'a str, markup: &Markup) -> Result<&'a str, EditError> {
    let name = non_empty(name)?;
    if markup.is_pinned_title(name) {
        return Err(EditError::ReservedName(name.to_string()));
    }
    Ok(name)
}

/// Turns `## <pinned name>` headings inside pulled-in text into `### `, so
/// the essay keeps a single pinned section.
fn demote_pinned_headings(body: &str, markup: &Markup) -> String {
    let lines: Vec<String> = split_lines(body)
        .into_iter()
        .map(|line| match classify(line) {
            LineClass::Heading(title) if markup.is_pinned_title(title) => format!("#{line}"),
            _ => line.to_string(),
        })
        .collect();
    join_lines(&lines)
}

fn non_empty(name: &str) -> Result<&str, EditError> {
    let name = name.trim();
    if name.is_empty() {
        Err(EditError::EmptyName)
    } else {
        Ok(name)
    }
}
