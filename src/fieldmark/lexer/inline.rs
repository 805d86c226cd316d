//! Inline tokenization framework
//!
//!     The inline stage scans paragraph text character by character. At each
//!     position it tries an ordered list of rules; a rule either recognizes
//!     a construct starting exactly there (advancing the position and
//!     emitting tokens) or refuses, leaving the state untouched. When no
//!     rule matches, one literal character is consumed into a pending text
//!     buffer, which is flushed into a `text` token before any other token
//!     is emitted.
//!
//!     Rules that re-tokenize an interior sub-range do so through
//!     [`InlineState::tokenize_range`], which saves the scan boundary,
//!     restricts it to the sub-range, and restores it afterwards. The
//!     restore always runs because tokenization itself cannot fail.

use super::fields;
use super::tokens::{self, Token};

/// An inline rule. Returns true when it consumed input at the current
/// position. In silent mode a rule must not emit tokens; rules that cannot
/// match speculatively refuse outright.
pub type Rule = fn(&mut InlineState, bool) -> bool;

/// Rule order matters: field spans sit before links, as the span syntax
/// would otherwise be eaten by bracket handling in some inputs.
const RULES: &[Rule] = &[
    newline,
    escape,
    backticks,
    fields::tokenize,
    link,
    emphasis,
];

/// Scanning state for one inline parse.
pub struct InlineState {
    chars: Vec<char>,
    /// Current scan position (char index).
    pub pos: usize,
    /// Exclusive end of the current scan range. Always <= the buffer length.
    pub pos_max: usize,
    pending: String,
    tokens: Vec<Token>,
}

impl InlineState {
    pub fn new(src: &str) -> Self {
        let chars: Vec<char> = src.chars().collect();
        let pos_max = chars.len();
        InlineState {
            chars,
            pos: 0,
            pos_max,
            pending: String::new(),
            tokens: Vec::new(),
        }
    }

    /// Character at an absolute buffer index, unbounded by `pos_max`. Rules
    /// that inspect sliding pairs may peek one past their range end.
    pub fn ch(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// The characters in `[start, end)` as a string.
    pub fn slice(&self, start: usize, end: usize) -> String {
        self.chars[start..end].iter().collect()
    }

    /// Emit a token, flushing any pending literal text first.
    pub fn push(&mut self, token: Token) {
        self.flush_pending();
        self.tokens.push(token);
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let text = std::mem::take(&mut self.pending);
            self.tokens.push(Token::text(text));
        }
    }

    /// Run the rule loop over the current `[pos, pos_max)` range.
    pub fn tokenize(&mut self) {
        while self.pos < self.pos_max {
            let matched = RULES.iter().any(|rule| rule(self, false));
            if !matched {
                if let Some(ch) = self.ch(self.pos) {
                    self.pending.push(ch);
                }
                self.pos += 1;
            }
        }
        self.flush_pending();
    }

    /// Tokenize the sub-range `[start, end)` with the full rule set, then
    /// restore the caller's end boundary. The caller is responsible for
    /// repositioning `pos` past whatever delimited the sub-range.
    pub fn tokenize_range(&mut self, start: usize, end: usize) {
        let saved_max = self.pos_max;
        self.pos = start;
        self.pos_max = end;
        self.tokenize();
        self.pos_max = saved_max;
    }

    pub fn into_tokens(mut self) -> Vec<Token> {
        self.flush_pending();
        self.tokens
    }
}

/// Tokenize one inline text run into a flat token sequence.
pub fn tokenize(src: &str) -> Vec<Token> {
    let mut state = InlineState::new(src);
    state.tokenize();
    state.into_tokens()
}

/// Line break: trailing double space makes it hard, otherwise soft. Trailing
/// spaces before the break never survive as text.
fn newline(state: &mut InlineState, silent: bool) -> bool {
    if state.ch(state.pos) != Some('\n') {
        return false;
    }
    let trailing = state
        .pending
        .chars()
        .rev()
        .take_while(|c| *c == ' ')
        .count();
    if !silent {
        if trailing > 0 {
            let keep = state.pending.len() - trailing;
            state.pending.truncate(keep);
        }
        let name = if trailing >= 2 {
            tokens::HARDBREAK
        } else {
            tokens::SOFTBREAK
        };
        state.push(Token::new(name, tokens::Nesting::SelfClosing));
    }
    state.pos += 1;
    while state.pos < state.pos_max && state.ch(state.pos) == Some(' ') {
        state.pos += 1;
    }
    true
}

/// Backslash escape: the next punctuation character becomes literal text and
/// can no longer start or close any construct.
fn escape(state: &mut InlineState, silent: bool) -> bool {
    if state.ch(state.pos) != Some('\\') || state.pos + 1 >= state.pos_max {
        return false;
    }
    match state.ch(state.pos + 1) {
        Some(next) if next.is_ascii_punctuation() => {
            if !silent {
                state.pending.push(next);
            }
            state.pos += 2;
            true
        }
        _ => false,
    }
}

/// Code span: a backtick run closed by a run of the same length. The
/// interior is literal.
fn backticks(state: &mut InlineState, silent: bool) -> bool {
    let start = state.pos;
    let max = state.pos_max;
    if state.ch(start) != Some('`') {
        return false;
    }
    let mut len = 1;
    while start + len < max && state.ch(start + len) == Some('`') {
        len += 1;
    }

    let mut i = start + len;
    while i < max {
        if state.ch(i) == Some('`') {
            let mut run = 1;
            while i + run < max && state.ch(i + run) == Some('`') {
                run += 1;
            }
            if run == len {
                if !silent {
                    let content = state.slice(start + len, i);
                    state.push(Token::leaf(tokens::CODE_INLINE, content));
                }
                state.pos = i + run;
                return true;
            }
            i += run;
        } else {
            i += 1;
        }
    }
    false
}

/// Emphasis, simplified: a run of one `*`/`_` toggles em, a run of two
/// toggles strong, closed by the next run of exactly the same length.
/// CommonMark flanking rules are out of scope here.
fn emphasis(state: &mut InlineState, silent: bool) -> bool {
    if silent {
        return false;
    }
    let start = state.pos;
    let max = state.pos_max;
    let marker = match state.ch(start) {
        Some(c @ ('*' | '_')) => c,
        _ => return false,
    };
    let mut len = 1;
    while start + len < max && state.ch(start + len) == Some(marker) {
        len += 1;
    }
    if len > 2 {
        return false;
    }

    let mut close = None;
    let mut i = start + len;
    while i < max {
        match state.ch(i) {
            Some('\\') => i += 2,
            Some(c) if c == marker => {
                let mut run = 1;
                while i + run < max && state.ch(i + run) == Some(marker) {
                    run += 1;
                }
                if run == len {
                    close = Some(i);
                    break;
                }
                i += run;
            }
            _ => i += 1,
        }
    }
    let Some(close) = close else {
        return false;
    };
    if close == start + len {
        return false;
    }

    let base = if len == 2 { tokens::STRONG } else { tokens::EM };
    state.push(Token::open(base));
    state.tokenize_range(start + len, close);
    state.pos = close + len;
    state.push(Token::close(base));
    true
}

/// Inline link: `[label](dest "title")`. Reference links and angle-bracket
/// destinations are out of scope.
fn link(state: &mut InlineState, silent: bool) -> bool {
    if silent {
        return false;
    }
    let start = state.pos;
    let max = state.pos_max;
    if state.ch(start) != Some('[') {
        return false;
    }

    // Find the matching close bracket, respecting escapes and nesting.
    let mut depth = 0usize;
    let mut label_end = None;
    let mut i = start + 1;
    while i < max {
        match state.ch(i) {
            Some('\\') => i += 1,
            Some('[') => depth += 1,
            Some(']') => {
                if depth == 0 {
                    label_end = Some(i);
                    break;
                }
                depth -= 1;
            }
            Some('\n') | None => return false,
            _ => {}
        }
        i += 1;
    }
    let Some(label_end) = label_end else {
        return false;
    };
    if label_end + 1 >= max || state.ch(label_end + 1) != Some('(') {
        return false;
    }

    let mut j = label_end + 2;
    while j < max && state.ch(j) == Some(' ') {
        j += 1;
    }
    let mut href = String::new();
    while j < max {
        match state.ch(j) {
            Some(')') | Some(' ') => break,
            Some('\n') | None => return false,
            Some(c) => {
                href.push(c);
                j += 1;
            }
        }
    }
    while j < max && state.ch(j) == Some(' ') {
        j += 1;
    }
    let mut title = None;
    if j < max && state.ch(j) == Some('"') {
        j += 1;
        let mut text = String::new();
        loop {
            if j >= max {
                return false;
            }
            match state.ch(j) {
                Some('"') => {
                    j += 1;
                    break;
                }
                Some('\n') | None => return false,
                Some(c) => {
                    text.push(c);
                    j += 1;
                }
            }
        }
        title = Some(text);
        while j < max && state.ch(j) == Some(' ') {
            j += 1;
        }
    }
    if j >= max || state.ch(j) != Some(')') {
        return false;
    }

    let title_value = match title {
        Some(text) => serde_json::json!(text),
        None => serde_json::Value::Null,
    };
    state.push(
        Token::open(tokens::LINK)
            .with_attr("href", serde_json::json!(href))
            .with_attr("title", title_value),
    );
    state.tokenize_range(start + 1, label_end);
    state.pos = j + 1;
    state.push(Token::close(tokens::LINK));
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(stream: &[Token]) -> Vec<&str> {
        stream.iter().map(|t| t.name.as_str()).collect()
    }

    #[test]
    fn test_plain_text_single_token() {
        let stream = tokenize("just words");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].name, "text");
        assert_eq!(stream[0].content, "just words");
    }

    #[test]
    fn test_softbreak_and_hardbreak() {
        let soft = tokenize("a\nb");
        assert_eq!(names(&soft), vec!["text", "softbreak", "text"]);

        let hard = tokenize("a  \nb");
        assert_eq!(names(&hard), vec!["text", "hardbreak", "text"]);
        // Trailing spaces never survive as text.
        assert_eq!(hard[0].content, "a");
    }

    #[test]
    fn test_escape_makes_punctuation_literal() {
        let stream = tokenize(r"a\*b\*c");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].content, "a*b*c");
    }

    #[test]
    fn test_code_span_is_literal() {
        let stream = tokenize("before `x *y* z` after");
        assert_eq!(names(&stream), vec!["text", "code_inline", "text"]);
        assert_eq!(stream[1].content, "x *y* z");
    }

    #[test]
    fn test_code_span_longer_fence() {
        let stream = tokenize("``a ` b``");
        assert_eq!(names(&stream), vec!["code_inline"]);
        assert_eq!(stream[0].content, "a ` b");
    }

    #[test]
    fn test_unclosed_backtick_is_literal() {
        let stream = tokenize("a ` b");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].content, "a ` b");
    }

    #[test]
    fn test_em_and_strong() {
        let stream = tokenize("*a* and **b**");
        assert_eq!(
            names(&stream),
            vec![
                "em_open", "text", "em_close", "text", "strong_open", "text", "strong_close"
            ]
        );
    }

    #[test]
    fn test_unclosed_emphasis_is_literal() {
        let stream = tokenize("*abc");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].content, "*abc");
    }

    #[test]
    fn test_link_with_title() {
        let stream = tokenize(r#"[site](https://a.io "Home")"#);
        assert_eq!(names(&stream), vec!["link_open", "text", "link_close"]);
        assert_eq!(
            stream[0].attr_get("href"),
            Some(&serde_json::json!("https://a.io"))
        );
        assert_eq!(stream[0].attr_get("title"), Some(&serde_json::json!("Home")));
    }

    #[test]
    fn test_link_without_title_has_null_title() {
        let stream = tokenize("[x](/y)");
        assert_eq!(stream[0].attr_get("title"), Some(&serde_json::Value::Null));
    }

    #[test]
    fn test_bare_bracket_is_literal() {
        let stream = tokenize("a [b c");
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].content, "a [b c");
    }

    #[test]
    fn test_nested_emphasis_inside_strong() {
        let stream = tokenize("**a *b* c**");
        assert_eq!(
            names(&stream),
            vec![
                "strong_open",
                "text",
                "em_open",
                "text",
                "em_close",
                "text",
                "strong_close"
            ]
        );
    }

    #[test]
    fn test_tokenize_range_restores_boundary() {
        let mut state = InlineState::new("abcdef");
        state.tokenize_range(1, 3);
        assert_eq!(state.pos_max, 6);
        let stream = state.into_tokens();
        assert_eq!(stream.len(), 1);
        assert_eq!(stream[0].content, "bc");
    }
}
