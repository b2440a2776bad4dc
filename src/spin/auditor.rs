//! Placeholder auditing.
//!
//! Every reference in the template is audited, including references that sit in
//! alternatives a given spin would never pick. A name is invalid when the table
//! has no entry for it, or when its value contains the placeholder marker.

use super::markers::MarkerSet;
use super::placeholders::PlaceholderTable;

/// Names referenced by `template` that cannot be substituted, first-seen order.
///
/// An empty result means every reference is valid.
pub fn find_invalid_placeholders(
    template: &str,
    placeholders: &PlaceholderTable,
    markers: &MarkerSet,
) -> Vec<String> {
    let mut seen: Vec<&str> = Vec::new();
    let mut invalid = Vec::new();

    for caps in markers.reference_pattern().captures_iter(template) {
        let Some(name) = caps.get(1).map(|m| m.as_str()) else {
            continue;
        };
        if seen.contains(&name) {
            continue;
        }
        seen.push(name);

        let usable = placeholders
            .get(name)
            .is_some_and(|value| !value.contains(markers.placeholder()));
        if !usable {
            invalid.push(name.to_string());
        }
    }

    invalid
}
