//! Colon-separated line codec.
//!
//! Wire format:
//! ```text
//! ┌─────┬───┬─────────┬───┬─────────┬─────┬────┐
//! │ tag │ : │ field 1 │ : │ field 2 │ ... │ \n │
//! │ 2 B │   │         │   │         │     │    │
//! └─────┴───┴─────────┴───┴─────────┴─────┴────┘
//! ```
//!
//! Outbound fields are made separator-free with one of two policies:
//!
//! - [`Field::Token`]: the separator is removed (identifiers, topics, URLs).
//! - [`Field::Text`]: the separator becomes `%3A` (headers, bodies, payloads).
//!
//! `%` itself is never escaped, so a payload that already contains `%3A`
//! cannot be told apart from an escaped colon by the companion.  The decoder
//! does not undo the escaping either: inbound fields are delivered as
//! received.
//!
//! The [`LineAssembler`] turns arbitrary transport reads into complete
//! lines.  A single read may carry part of a line, exactly one line, or
//! several lines back to back.

use std::borrow::Cow;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use super::tag::MessageTag;

/// Field separator.
pub const SEPARATOR: char = ':';

/// Line delimiter.
pub const DELIMITER: u8 = b'\n';

/// Replacement for the separator inside free-form fields.
pub const ESCAPED_SEPARATOR: &str = "%3A";

/// Largest inbound line the assembler will buffer, in bytes, excluding its
/// `\n` or `\r\n` terminator.
pub const MAX_LINE_LEN: usize = 512;

// ── Escaping ─────────────────────────────────────────────────

/// Which separator occurrences the escaping policies touch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum EscapeMode {
    /// Only the first separator is stripped/escaped.  Matches the legacy
    /// companion wire format byte for byte.
    FirstOccurrence,
    /// Every separator is stripped/escaped.
    #[default]
    AllOccurrences,
}

/// Remove separators from a short token.
pub fn strip(input: &str, mode: EscapeMode) -> Cow<'_, str> {
    replace_separator(input, "", mode)
}

/// Replace separators in a free-form field with [`ESCAPED_SEPARATOR`].
pub fn percent_escape(input: &str, mode: EscapeMode) -> Cow<'_, str> {
    replace_separator(input, ESCAPED_SEPARATOR, mode)
}

fn replace_separator<'a>(input: &'a str, with: &str, mode: EscapeMode) -> Cow<'a, str> {
    if !input.contains(SEPARATOR) {
        return Cow::Borrowed(input);
    }
    match mode {
        EscapeMode::FirstOccurrence => Cow::Owned(input.replacen(SEPARATOR, with, 1)),
        EscapeMode::AllOccurrences => Cow::Owned(input.replace(SEPARATOR, with)),
    }
}

// ── Encoding ─────────────────────────────────────────────────

/// One outbound field together with its escaping policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field<'a> {
    /// Identifier-like value; separators are stripped.
    Token(&'a str),
    /// Free-form value; separators are percent-escaped.
    Text(&'a str),
    /// Value already known to be separator-free (numbers, composites built
    /// from stripped tokens).
    Raw(&'a str),
}

/// Join `tag` and `fields` into one line (without the delimiter).
pub fn encode_frame(tag: MessageTag, fields: &[Field<'_>], mode: EscapeMode) -> String {
    let mut line = String::from(tag.as_str());
    for field in fields {
        line.push(SEPARATOR);
        match *field {
            Field::Token(v) => line.push_str(&strip(v, mode)),
            Field::Text(v) => line.push_str(&percent_escape(v, mode)),
            Field::Raw(v) => line.push_str(v),
        }
    }
    line
}

// ── Decoding ─────────────────────────────────────────────────

/// A decoded line: the tag followed by its fields, borrowed from the line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame<'a> {
    fields: Vec<&'a str>,
}

impl<'a> Frame<'a> {
    /// Raw tag text (`""` for an empty line).
    pub fn tag(&self) -> &'a str {
        self.fields.first().copied().unwrap_or("")
    }

    /// The tag, if it belongs to the known alphabet.
    pub fn message_tag(&self) -> Option<MessageTag> {
        MessageTag::parse(self.tag())
    }

    /// Field `index`, counting the tag as field 0.
    pub fn field(&self, index: usize) -> Option<&'a str> {
        self.fields.get(index).copied()
    }

    /// Number of fields including the tag.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> &[&'a str] {
        &self.fields
    }
}

/// Split a line into its fields.  Never fails: an empty line yields an
/// empty frame and an unknown tag is left for the dispatcher to ignore.
pub fn decode_line(line: &str) -> Frame<'_> {
    let line = line.trim_end_matches(|c| c == '\r' || c == '\n');
    if line.is_empty() {
        return Frame { fields: Vec::new() };
    }
    Frame {
        fields: line.split(SEPARATOR).collect(),
    }
}

// ── Line assembly ────────────────────────────────────────────

/// Streaming line assembler.
pub struct LineAssembler {
    buf: heapless::Vec<u8, MAX_LINE_LEN>,
    limit: usize,
    /// Set after an overlong line; bytes are dropped until the next `\n`.
    discarding: bool,
    /// A `\r` held back until we know whether it ends the line.
    held_cr: bool,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::with_limit(MAX_LINE_LEN)
    }

    /// Assembler that discards lines longer than `limit` bytes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            buf: heapless::Vec::new(),
            limit: limit.clamp(1, MAX_LINE_LEN),
            discarding: false,
            held_cr: false,
        }
    }

    /// Feed bytes into the assembler.
    ///
    /// Every completed, non-empty, UTF-8 line is appended to `lines` with its
    /// terminator removed.  Returns how many lines were appended.
    pub fn feed(&mut self, data: &[u8], lines: &mut Vec<String>) -> usize {
        let before = lines.len();

        for &byte in data {
            if byte == DELIMITER {
                if self.discarding {
                    self.discarding = false;
                } else {
                    self.finish_line(lines);
                }
                self.buf.clear();
                self.held_cr = false;
                continue;
            }

            if self.discarding {
                continue;
            }

            // A `\r` not followed by `\n` is payload.
            if core::mem::take(&mut self.held_cr) {
                self.push(b'\r');
                if self.discarding {
                    continue;
                }
            }

            if byte == b'\r' {
                self.held_cr = true;
            } else {
                self.push(byte);
            }
        }

        lines.len() - before
    }

    fn push(&mut self, byte: u8) {
        if self.buf.len() >= self.limit || self.buf.push(byte).is_err() {
            warn!("link: inbound line exceeds {} bytes, discarding", self.limit);
            self.buf.clear();
            self.discarding = true;
        }
    }

    /// Bytes buffered for the line in progress.
    pub fn pending(&self) -> usize {
        self.buf.len() + usize::from(self.held_cr)
    }

    /// Drop any partial line (e.g. after a transport reconnect).
    pub fn reset(&mut self) {
        self.buf.clear();
        self.discarding = false;
        self.held_cr = false;
    }

    fn finish_line(&self, lines: &mut Vec<String>) {
        let bytes = self.buf.as_slice();
        if bytes.is_empty() {
            return;
        }
        match core::str::from_utf8(bytes) {
            Ok(line) => lines.push(line.to_owned()),
            Err(_) => debug!("link: dropping non-UTF-8 line ({} bytes)", bytes.len()),
        }
    }
}

impl Default for LineAssembler {
    fn default() -> Self {
        Self::new()
    }
}
