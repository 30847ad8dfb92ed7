/// Line classifier: splits script text into lines and lines into tokens
use crate::span::Span;
use serde::{Deserialize, Serialize};

pub const OPTION_MARKER: char = '>';
pub const BLOCK_OPEN: char = '{';
pub const BLOCK_CLOSE: char = '}';
/// Byte order mark some editors put at the start of a file
pub const BOM: char = '\u{feff}';

/// One logical line of a script, kept verbatim
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptLine {
    /// 0-based position in the script
    pub index: usize,
    pub text: String,
    pub span: Span,
}

/// Structural meaning of a line, decided on its first character
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    OptionMarker,
    BlockOpen,
    BlockClose,
    Text,
}

impl ScriptLine {
    pub fn new(index: usize, text: impl Into<String>, span: Span) -> Self {
        ScriptLine {
            index,
            text: text.into(),
            span,
        }
    }

    /// Build lines from already-split strings. Spans are computed as if the
    /// lines had been joined with `\n`. A leading BOM on the first line is
    /// dropped.
    ///
    /// # Example
    /// ```
    /// use choice_tree::lines::ScriptLine;
    ///
    /// let lines = ScriptLine::sequence(["Hello.", "> Wave"]);
    /// assert_eq!(lines[1].index, 1);
    /// assert_eq!(lines[1].span.start, 7);
    /// ```
    pub fn sequence<I, S>(lines: I) -> Vec<ScriptLine>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut offset = 0;
        lines
            .into_iter()
            .enumerate()
            .map(|(index, text)| {
                let mut text: String = text.into();
                if index == 0 && text.starts_with(BOM) {
                    text.drain(..BOM.len_utf8());
                    offset = BOM.len_utf8();
                }
                let span = Span::new(offset, offset + text.len());
                offset = span.end + 1;
                ScriptLine { index, text, span }
            })
            .collect()
    }

    pub fn kind(&self) -> LineKind {
        classify(&self.text)
    }

    pub fn tokens(&self) -> Vec<&str> {
        tokenize(&self.text)
    }

    /// 1-based line number for messages
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

/// Split raw script text into lines. Only the line terminator (`\n` or
/// `\r\n`) and a leading BOM are removed; blank lines are retained.
pub fn split_lines(text: &str) -> Vec<ScriptLine> {
    let mut lines = Vec::new();
    let (text, mut offset) = match text.strip_prefix(BOM) {
        Some(rest) => (rest, BOM.len_utf8()),
        None => (text, 0),
    };

    for (index, raw) in text.split_inclusive('\n').enumerate() {
        let content = raw.strip_suffix('\n').unwrap_or(raw);
        let content = content.strip_suffix('\r').unwrap_or(content);
        lines.push(ScriptLine::new(
            index,
            content,
            Span::new(offset, offset + content.len()),
        ));
        offset += raw.len();
    }

    lines
}

/// Split a line on runs of whitespace
pub fn tokenize(line: &str) -> Vec<&str> {
    line.split_whitespace().collect()
}

/// Markers only count in the first column; indented lines are text
pub fn classify(line: &str) -> LineKind {
    match line.chars().next() {
        Some(OPTION_MARKER) => LineKind::OptionMarker,
        Some(BLOCK_OPEN) => LineKind::BlockOpen,
        Some(BLOCK_CLOSE) => LineKind::BlockClose,
        _ => LineKind::Text,
    }
}
