//! Edit-tracked text rewriting
//!
//! Every pass rewrites text through a [`Rewriter`], which records each
//! replacement as an [`Edit`] in source coordinates. Style spans emitted by
//! earlier passes are pushed through those edit lists so that, at the end of
//! a run, every span still points at the bytes it was created for.
//!
//! Replacements must be fed in ascending source order and must not overlap;
//! both are guaranteed by scanning with `captures_iter` and consuming
//! matches left to right.

use std::ops::Range;

use crate::style::{Span, StyleApplication};

/// One replacement: `removed` source bytes at `start` became `inserted` bytes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edit {
    /// Byte offset of the replacement in the source text
    pub start: usize,
    /// Bytes removed from the source
    pub removed: usize,
    /// Bytes inserted into the output
    pub inserted: usize,
}

/// Streaming rewriter over one source string.
///
/// Copies untouched stretches verbatim and records a compact edit list for
/// the stretches it replaces. Identity replacements are copied without
/// recording an edit, which keeps repeated applications of an idempotent
/// pass from accumulating noise.
#[derive(Debug)]
pub struct Rewriter<'t> {
    src: &'t str,
    out: String,
    consumed: usize,
    edits: Vec<Edit>,
}

impl<'t> Rewriter<'t> {
    pub fn new(src: &'t str) -> Self {
        Self {
            src,
            out: String::with_capacity(src.len() + src.len() / 8),
            consumed: 0,
            edits: Vec::new(),
        }
    }

    /// Copies source bytes verbatim up to `pos`.
    ///
    /// `pos` must be on a char boundary at or after the last consumed byte.
    pub fn copy_to(&mut self, pos: usize) {
        debug_assert!(pos >= self.consumed, "rewrites must move forward");
        if pos > self.consumed {
            self.out.push_str(&self.src[self.consumed..pos]);
            self.consumed = pos;
        }
    }

    /// Replaces `range` of the source with `replacement`
    pub fn replace(&mut self, range: Range<usize>, replacement: &str) {
        self.copy_to(range.start);
        let original = &self.src[range.clone()];
        if original == replacement {
            self.out.push_str(original);
        } else {
            self.out.push_str(replacement);
            self.edits.push(Edit {
                start: range.start,
                removed: range.len(),
                inserted: replacement.len(),
            });
        }
        self.consumed = range.end;
    }

    /// Current length of the output, the position where the next byte lands
    pub fn out_len(&self) -> usize {
        self.out.len()
    }

    /// Whether any non-identity replacement was recorded
    pub fn changed(&self) -> bool {
        !self.edits.is_empty()
    }

    /// Copies the remaining tail and returns the output with its edit list
    pub fn finish(mut self) -> (String, Vec<Edit>) {
        self.copy_to(self.src.len());
        (self.out, self.edits)
    }

    /// Finishes and remaps `spans` (created against the source) in place
    pub fn finish_remap(self, spans: &mut [StyleApplication]) -> String {
        let (out, edits) = self.finish();
        remap_applications(&edits, spans);
        out
    }
}

#[derive(Clone, Copy)]
enum Bias {
    Start,
    End,
}

fn map_offset(edits: &[Edit], pos: usize, bias: Bias) -> usize {
    let mut delta: isize = 0;
    for edit in edits {
        if pos <= edit.start {
            break;
        }
        let removed_end = edit.start + edit.removed;
        if pos >= removed_end {
            delta += edit.inserted as isize - edit.removed as isize;
        } else {
            // Inside a replaced stretch: snap to the replacement's edge so
            // the span keeps covering the rewritten content.
            let base = (edit.start as isize + delta) as usize;
            return match bias {
                Bias::Start => base,
                Bias::End => base + edit.inserted,
            };
        }
    }
    (pos as isize + delta) as usize
}

/// Maps a span through one pass's edit list
pub fn remap_span(edits: &[Edit], span: Span) -> Span {
    Span::new(
        map_offset(edits, span.start, Bias::Start),
        map_offset(edits, span.end, Bias::End),
    )
}

/// Remaps every application in place
pub fn remap_applications(edits: &[Edit], apps: &mut [StyleApplication]) {
    if edits.is_empty() {
        return;
    }
    for app in apps {
        app.span = remap_span(edits, app.span);
    }
}
