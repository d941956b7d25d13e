/// Splits text into lines on `\n`.
///
/// The split is lossless: joining the result with `\n` reproduces the input,
/// so a trailing newline shows up as a final empty line. A `\r` before the
/// newline stays on its line and is ignored by classification.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Line terminator style of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineEnding {
    Lf,
    CrLf,
}

impl LineEnding {
    /// The ending used by most line breaks in `text`; LF on a tie.
    pub fn detect(text: &str) -> Self {
        let crlf = text.matches("\r\n").count();
        let lf = text.matches('\n').count() - crlf;
        if crlf > lf { Self::CrLf } else { Self::Lf }
    }

    /// Rewrites line breaks in edited text to this ending. LF leaves the
    /// text as it is.
    pub fn apply(self, text: &str) -> String {
        match self {
            Self::Lf => text.to_string(),
            Self::CrLf => text.replace("\r\n", "\n").replace('\n', "\r\n"),
        }
    }
}

/// Joins lines back into text. Inverse of [`split_lines`].
pub fn join_lines<S: AsRef<str>>(lines: &[S]) -> String {
    let mut out = String::new();
    for (i, line) in lines.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(line.as_ref());
    }
    out
}
