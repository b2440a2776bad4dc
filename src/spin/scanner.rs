//! Single-pass tokenizer for spintax templates.
//!
//! The scanner walks the template once and yields `(Token, Range<usize>)` pairs,
//! where the range is the byte span of the token in the source. At each position
//! the markers are tried in the order open, close, separator; anything else is
//! accumulated into a [`Token::Text`] run up to the next marker.
//!
//! The placeholder marker is not a token: placeholder references are plain text
//! as far as group resolution is concerned.

use super::error::{Result, SpinError};
use super::markers::MarkerSet;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'a> {
    Text(&'a str),
    Open,
    Close,
    Separator,
}

pub struct Scanner<'a, 'm> {
    source: &'a str,
    markers: &'m MarkerSet,
    pos: usize,
}

impl<'a, 'm> Scanner<'a, 'm> {
    pub fn new(source: &'a str, markers: &'m MarkerSet) -> Self {
        Scanner {
            source,
            markers,
            pos: 0,
        }
    }

    /// Marker token starting at the beginning of `rest`, with its byte length.
    fn marker_at(&self, rest: &str) -> Option<(Token<'a>, usize)> {
        let markers = self.markers;
        [
            (Token::Open, markers.open()),
            (Token::Close, markers.close()),
            (Token::Separator, markers.separator()),
        ]
        .into_iter()
        .find(|(_, marker)| rest.starts_with(marker))
        .map(|(token, marker)| (token, marker.len()))
    }
}

impl<'a> Iterator for Scanner<'a, '_> {
    type Item = (Token<'a>, Range<usize>);

    fn next(&mut self) -> Option<Self::Item> {
        let source = self.source;
        let start = self.pos;
        let rest = &source[start..];
        if rest.is_empty() {
            return None;
        }

        if let Some((token, len)) = self.marker_at(rest) {
            self.pos += len;
            return Some((token, start..self.pos));
        }

        let text_len = rest
            .char_indices()
            .skip(1)
            .map(|(offset, _)| offset)
            .find(|&offset| self.marker_at(&rest[offset..]).is_some())
            .unwrap_or(rest.len());
        self.pos += text_len;
        Some((Token::Text(&rest[..text_len]), start..self.pos))
    }
}

pub fn tokenize<'a>(source: &'a str, markers: &MarkerSet) -> Vec<(Token<'a>, Range<usize>)> {
    Scanner::new(source, markers).collect()
}

/// Verify that every close marker pairs with an earlier open marker.
///
/// Reports the first close that has nothing to pair with, or failing that the
/// earliest open that is never closed.
pub fn check_structure(source: &str, markers: &MarkerSet) -> Result<()> {
    let mut open_positions: Vec<usize> = Vec::new();
    for (token, span) in Scanner::new(source, markers) {
        match token {
            Token::Open => open_positions.push(span.start),
            Token::Close => {
                if open_positions.pop().is_none() {
                    return Err(SpinError::unmatched_close(span.start));
                }
            }
            Token::Text(_) | Token::Separator => {}
        }
    }
    match open_positions.first() {
        Some(&position) => Err(SpinError::unmatched_open(position)),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::error::MalformedKind;

    fn tokens(source: &str) -> Vec<Token<'_>> {
        tokenize(source, &MarkerSet::default())
            .into_iter()
            .map(|(token, _)| token)
            .collect()
    }

    #[test]
    fn test_tokenize_nested_groups() {
        let markers = MarkerSet::default();
        let result = tokenize("a{b|c{d}}", &markers);
        assert_eq!(
            result,
            vec![
                (Token::Text("a"), 0..1),
                (Token::Open, 1..2),
                (Token::Text("b"), 2..3),
                (Token::Separator, 3..4),
                (Token::Text("c"), 4..5),
                (Token::Open, 5..6),
                (Token::Text("d"), 6..7),
                (Token::Close, 7..8),
                (Token::Close, 8..9),
            ]
        );
    }

    #[test]
    fn test_placeholder_is_text() {
        assert_eq!(tokens("~name~ {x}").first(), Some(&Token::Text("~name~ ")));
    }

    #[test]
    fn test_multibyte_text_and_markers() {
        let markers = MarkerSet::new("«", "»", "¦", "§").unwrap();
        let result = tokenize("é«a¦ü»", &markers);
        assert_eq!(
            result,
            vec![
                (Token::Text("é"), 0..2),
                (Token::Open, 2..4),
                (Token::Text("a"), 4..5),
                (Token::Separator, 5..7),
                (Token::Text("ü"), 7..9),
                (Token::Close, 9..11),
            ]
        );
    }

    #[test]
    fn test_multi_char_markers() {
        let markers = MarkerSet::new("{{", "}}", "||", "~~").unwrap();
        let result: Vec<Token<'_>> = tokenize("x{{a||b}}|y", &markers)
            .into_iter()
            .map(|(token, _)| token)
            .collect();
        assert_eq!(
            result,
            vec![
                Token::Text("x"),
                Token::Open,
                Token::Text("a"),
                Token::Separator,
                Token::Text("b"),
                Token::Close,
                Token::Text("|y"),
            ]
        );
    }

    #[test]
    fn test_empty_source_yields_nothing() {
        assert!(tokens("").is_empty());
    }

    #[test]
    fn test_check_structure_accepts_nested() {
        let markers = MarkerSet::default();
        assert!(check_structure("{this|that{| one}} jumps", &markers).is_ok());
        assert!(check_structure("no groups at all", &markers).is_ok());
    }

    #[test]
    fn test_check_structure_reports_close_before_open() {
        let markers = MarkerSet::default();
        assert_eq!(
            check_structure("a}b{c", &markers),
            Err(SpinError::MalformedTemplate {
                kind: MalformedKind::UnmatchedClose,
                position: 1,
            })
        );
    }

    #[test]
    fn test_check_structure_reports_earliest_unclosed_open() {
        let markers = MarkerSet::default();
        assert_eq!(
            check_structure("{Hello, {Joe|Jane}!", &markers),
            Err(SpinError::MalformedTemplate {
                kind: MalformedKind::UnmatchedOpen,
                position: 0,
            })
        );
    }
}
