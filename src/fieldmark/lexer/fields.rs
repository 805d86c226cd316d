//! Field span recognition
//!
//!     A field span is a balanced doubled-brace region: `{{ ... }}`. Spans
//!     nest (`{{a{{b}}c}}` is one outer span containing an inner one), must
//!     open and close on the same line, and respect backslash escaping: an
//!     escaped brace can neither start nor complete a delimiter pair.
//!
//!     The rule scans forward from the opening pair with a depth counter,
//!     inspecting the current and next character as a sliding pair. Both
//!     characters of a matched pair are consumed together, so the second
//!     brace of a pair never starts a new pair. On success the interior is
//!     re-tokenized with the full rule set, which is what discovers nested
//!     spans and inline styling inside the field.
//!
//!     Refusal (missing open pair, newline before the close, unterminated
//!     span, silent mode) leaves the state untouched; the dispatch loop
//!     falls back to other rules or literal text. Malformed input can never
//!     make this rule fail any other way.

use super::inline::InlineState;
use super::tokens::{self, Token};

const MARKER_OPEN: char = '{';
const MARKER_CLOSE: char = '}';
const ESCAPE_CHARACTER: char = '\\';

/// Inline rule: recognize a `{{...}}` span starting exactly at `state.pos`.
pub fn tokenize(state: &mut InlineState, silent: bool) -> bool {
    // This rule never participates in speculative matching.
    if silent {
        return false;
    }

    let start = state.pos;
    let max = state.pos_max;

    if state.ch(start) != Some(MARKER_OPEN) || state.ch(start + 1) != Some(MARKER_OPEN) {
        return false;
    }

    // Find the closing sequence, tracking nesting depth.
    let mut depth = 1u32;
    let mut end = None;
    let mut skip_next = false;
    let mut next = state.ch(start + 1);
    let mut i = start + 1;
    while i < max && end.is_none() {
        let current = next;
        next = state.ch(i + 1);
        if skip_next {
            skip_next = false;
        } else if current == Some(MARKER_CLOSE) && next == Some(MARKER_CLOSE) {
            depth -= 1;
            if depth == 0 {
                end = Some(i);
            }
            // Second marker char is already counted.
            skip_next = true;
        } else if current == Some(MARKER_OPEN) && next == Some(MARKER_OPEN) {
            depth += 1;
            skip_next = true;
        } else if current == Some('\n') {
            // Spans cannot cross a line boundary.
            return false;
        } else if current == Some(ESCAPE_CHARACTER) {
            skip_next = true;
        }
        i += 1;
    }

    // Input ended before the closing sequence.
    let Some(end) = end else {
        return false;
    };

    state.push(Token::open(tokens::FIELD));
    state.tokenize_range(start + 2, end);
    state.pos = end + 2;
    state.push(Token::close(tokens::FIELD));

    true
}
