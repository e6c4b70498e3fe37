//! Terminal control-sequence handling for `iwctl` output.
//!
//! `iwctl` colours its tables even when stdout is not a terminal. These
//! helpers split text into escape sequences and plain characters so the
//! parser can drop or interpret them.

const ESC: char = '\u{1b}';

/// A lexed piece of terminal output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment<'a> {
    /// A complete escape sequence, including the leading ESC.
    Escape(&'a str),
    Char(char),
}

/// Splits `text` into escape sequences and plain characters.
///
/// CSI sequences (`ESC [ params final`) are recognised in full; any other
/// ESC swallows exactly one following character. A truncated sequence at
/// the end of input is returned as-is.
pub(crate) fn segments(text: &str) -> impl Iterator<Item = Segment<'_>> + '_ {
    let mut rest = text;
    std::iter::from_fn(move || {
        let mut chars = rest.char_indices();
        let (_, first) = chars.next()?;

        if first != ESC {
            rest = &rest[first.len_utf8()..];
            return Some(Segment::Char(first));
        }

        let end = match chars.next() {
            Some((_, '[')) => chars
                .find(|(_, c)| ('\u{40}'..='\u{7e}').contains(c))
                .map(|(i, c)| i + c.len_utf8())
                .unwrap_or(rest.len()),
            Some((i, c)) => i + c.len_utf8(),
            None => rest.len(),
        };

        let (seq, tail) = rest.split_at(end);
        rest = tail;
        Some(Segment::Escape(seq))
    })
}

/// Removes every escape sequence from `text`.
pub(crate) fn strip_control_sequences(text: &str) -> String {
    segments(text)
        .filter_map(|s| match s {
            Segment::Char(c) => Some(c),
            Segment::Escape(_) => None,
        })
        .collect()
}

/// True for a token made only of escape sequences (e.g. a lone `ESC[0m`).
pub(crate) fn is_control_only(token: &str) -> bool {
    !token.is_empty() && segments(token).all(|s| matches!(s, Segment::Escape(_)))
}

/// True for an SGR reset (`ESC[0m` or `ESC[m`).
pub(crate) fn is_reset(seq: &str) -> bool {
    seq == "\u{1b}[0m" || seq == "\u{1b}[m"
}
