//! Alternation group resolution.
//!
//! Groups are resolved in a single pass over the scanner's tokens with a stack of
//! open groups. Each group collects its alternatives as they are scanned; when its
//! close marker arrives, one alternative is drawn uniformly and appended to the
//! enclosing group's current alternative (or to the output at top level).
//!
//! Groups therefore resolve innermost-first, in the order of their close markers,
//! and a chosen alternative never contains markers of its own. A separator outside
//! every group is kept as literal text.

use super::error::{Result, SpinError};
use super::markers::MarkerSet;
use super::scanner::{Scanner, Token};
use rand::Rng;
use tracing::trace;

struct OpenGroup {
    /// Byte offset of the open marker, for error reporting.
    start: usize,
    finished: Vec<String>,
    current: String,
}

impl OpenGroup {
    fn new(start: usize) -> Self {
        OpenGroup {
            start,
            finished: Vec::new(),
            current: String::new(),
        }
    }

    fn next_alternative(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
    }

    fn choose<R: Rng + ?Sized>(self, rng: &mut R) -> String {
        let mut alternatives = self.finished;
        alternatives.push(self.current);
        let count = alternatives.len();
        let index = rng.gen_range(0..count);
        trace!(start = self.start, alternatives = count, chosen = index, "resolved group");
        alternatives.swap_remove(index)
    }
}

/// Resolve every alternation group in `text`, drawing choices from `rng`.
///
/// Fails with [`SpinError::MalformedTemplate`] when a close marker has no open
/// marker before it, or when an open marker is never closed.
pub fn resolve<R: Rng + ?Sized>(text: &str, markers: &MarkerSet, rng: &mut R) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut stack: Vec<OpenGroup> = Vec::new();

    for (token, span) in Scanner::new(text, markers) {
        match token {
            Token::Text(chunk) => match stack.last_mut() {
                Some(group) => group.current.push_str(chunk),
                None => output.push_str(chunk),
            },
            Token::Open => stack.push(OpenGroup::new(span.start)),
            Token::Separator => match stack.last_mut() {
                Some(group) => group.next_alternative(),
                None => output.push_str(&text[span]),
            },
            Token::Close => {
                let group = stack
                    .pop()
                    .ok_or_else(|| SpinError::unmatched_close(span.start))?;
                let chosen = group.choose(rng);
                match stack.last_mut() {
                    Some(parent) => parent.current.push_str(&chosen),
                    None => output.push_str(&chosen),
                }
            }
        }
    }

    if let Some(unclosed) = stack.first() {
        return Err(SpinError::unmatched_open(unclosed.start));
    }
    Ok(output)
}
