//! Reversible marker codec
//!
//! Passes sometimes produce text that a later rule (or a later iteration of
//! the same rule) would mangle: a freshly grouped number is itself a digit
//! run, a protected literal may contain punctuation. The codec swaps such
//! stretches for opaque tokens and restores them once the pipeline is done.
//!
//! Token shape: `U+E000` + nonce + id + `U+E001`, where nonce and id use
//! uppercase letters only. Uppercase letters between private-use delimiters
//! cannot match any pass pattern: there are no digits for number rules, no
//! punctuation for spacing rules, and no lowercase word-list hits. Roman
//! numeral rules require an adjacent hyphen, digit, or space, all absent.
//!
//! The nonce is derived from the input text and widened until the token
//! namespace is disjoint from it, so decoding cannot confuse input bytes
//! with engine markers even when the input itself uses the private-use area.

use std::collections::HashMap;
use std::hash::{DefaultHasher, Hash, Hasher};

use crate::error::PipelineError;
use crate::rewrite::{Edit, Rewriter};

const OPEN: char = '\u{E000}';
const CLOSE: char = '\u{E001}';

/// Invocation-scoped codec mapping tokens to the text they stand for
#[derive(Debug)]
pub struct MarkerCodec {
    original: String,
    open_prefix: String,
    table: HashMap<String, String>,
    reserved: HashMap<String, String>,
    next_id: u32,
}

impl MarkerCodec {
    /// Builds a codec whose token namespace does not occur in `text`
    pub fn for_text(text: &str) -> Self {
        let mut open_prefix = String::new();
        open_prefix.push(OPEN);
        if text.contains(OPEN) || text.contains(CLOSE) {
            let mut width = 1;
            loop {
                let nonce = derive_nonce(text, width);
                let candidate = format!("{OPEN}{nonce}");
                if !text.contains(&candidate) {
                    open_prefix = candidate;
                    break;
                }
                width += 1;
            }
        }
        Self {
            original: text.to_string(),
            open_prefix,
            table: HashMap::new(),
            reserved: HashMap::new(),
            next_id: 0,
        }
    }

    /// Allocates (or reuses) a token standing for `payload`.
    ///
    /// The token is verified to not occur literally in the original text;
    /// on the unlikely hit it is widened until free.
    pub fn mark(&mut self, payload: &str) -> String {
        if let Some(token) = self.reserved.get(payload) {
            return token.clone();
        }
        let mut id = encode_id(self.next_id);
        self.next_id += 1;
        let token = loop {
            let candidate = format!("{}{}{}", self.open_prefix, id, CLOSE);
            if !self.original.contains(&candidate) {
                break candidate;
            }
            id.push(salt_char(&self.original, id.len()));
        };
        self.table.insert(token.clone(), payload.to_string());
        self.reserved.insert(payload.to_string(), token.clone());
        token
    }

    /// Replaces every occurrence of `literal` in `text` with its token
    pub fn protect_literal(&mut self, text: &str, literal: &str) -> String {
        if literal.is_empty() || !text.contains(literal) {
            return text.to_string();
        }
        let token = self.mark(literal);
        text.replace(literal, &token)
    }

    /// True when `text` ends with one of this codec's allocated tokens.
    ///
    /// Token bodies exclude the delimiters, so when `text` does end with
    /// a token the last `open_prefix` occurrence is that token's opening.
    pub fn ends_with_token(&self, text: &str) -> bool {
        if !text.ends_with(CLOSE) {
            return false;
        }
        text.rfind(&self.open_prefix)
            .is_some_and(|start| self.table.contains_key(&text[start..]))
    }

    /// Restores every token to its payload.
    ///
    /// Tokens are delimiter-bounded, so a left-to-right scan decodes
    /// unambiguously. Any namespace sequence without a table entry aborts
    /// the segment with [`PipelineError::MarkerCollision`].
    pub fn decode(&self, text: &str) -> Result<String, PipelineError> {
        self.decode_tracked(text).map(|(decoded, _)| decoded)
    }

    /// Like [`decode`](Self::decode), also returning the edit list so the
    /// caller can remap spans across token length changes
    pub fn decode_tracked(&self, text: &str) -> Result<(String, Vec<Edit>), PipelineError> {
        let mut rw = Rewriter::new(text);
        let mut cursor = 0;
        while let Some(found) = text[cursor..].find(&self.open_prefix) {
            let start = cursor + found;
            let body = start + self.open_prefix.len();
            let Some(close) = text[body..].find(CLOSE) else {
                return Err(PipelineError::MarkerCollision { position: start });
            };
            let end = body + close + CLOSE.len_utf8();
            let token = &text[start..end];
            let Some(payload) = self.table.get(token) else {
                return Err(PipelineError::MarkerCollision { position: start });
            };
            rw.replace(start..end, payload);
            cursor = end;
        }
        Ok(rw.finish())
    }

    /// Whether any token has been allocated
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}

fn derive_nonce(text: &str, width: usize) -> String {
    let mut hasher = DefaultHasher::new();
    text.hash(&mut hasher);
    width.hash(&mut hasher);
    let mut value = hasher.finish();
    let mut nonce = String::with_capacity(width);
    for _ in 0..width {
        nonce.push(letter((value % 26) as u8));
        value /= 26;
    }
    nonce
}

fn encode_id(mut id: u32) -> String {
    let mut out = String::new();
    loop {
        out.insert(0, letter((id % 26) as u8));
        id /= 26;
        if id == 0 {
            break;
        }
    }
    out
}

fn salt_char(text: &str, round: usize) -> char {
    let mut hasher = DefaultHasher::new();
    text.len().hash(&mut hasher);
    round.hash(&mut hasher);
    letter((hasher.finish() % 26) as u8)
}

fn letter(value: u8) -> char {
    (b'A' + value) as char
}
