//! Advisory template validation.
//!
//! Validation here is a balance check: the template passes when it holds as many
//! open markers as close markers. Ordering is not checked, so `}{` passes.
//! [`check_structure`](super::scanner::check_structure) is the strict variant
//! the resolver relies on.

use super::auditor::find_invalid_placeholders;
use super::markers::MarkerSet;
use super::placeholders::PlaceholderTable;
use super::scanner::{Scanner, Token};
use tracing::warn;

/// Open markers minus close markers.
pub fn balance(template: &str, markers: &MarkerSet) -> isize {
    Scanner::new(template, markers)
        .map(|(token, _)| match token {
            Token::Open => 1,
            Token::Close => -1,
            Token::Text(_) | Token::Separator => 0,
        })
        .sum()
}

pub fn validate(
    template: &str,
    placeholders: &PlaceholderTable,
    markers: &MarkerSet,
    check_placeholders: bool,
) -> bool {
    let balance = balance(template, markers);
    if balance != 0 {
        warn!(balance, "template markers do not balance");
        return false;
    }
    if check_placeholders {
        let invalid = find_invalid_placeholders(template, placeholders, markers);
        if !invalid.is_empty() {
            warn!(?invalid, "template references invalid placeholders");
            return false;
        }
    }
    true
}
