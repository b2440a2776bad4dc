//! Placeholder substitution.
//!
//! Entries are applied in table order. Each referenced value is resolved once,
//! with fresh random choices, and that one sample replaces every occurrence of
//! the reference. Values whose reference does not occur are never resolved.

use super::error::Result;
use super::markers::MarkerSet;
use super::placeholders::PlaceholderTable;
use super::resolver::resolve;
use rand::Rng;
use tracing::debug;

pub fn substitute<R: Rng + ?Sized>(
    text: &str,
    placeholders: &PlaceholderTable,
    markers: &MarkerSet,
    rng: &mut R,
) -> Result<String> {
    let mut output = text.to_string();
    for (name, value) in placeholders.iter() {
        let reference = markers.reference(name);
        if !output.contains(&reference) {
            continue;
        }
        let replacement = resolve(value, markers, rng)?;
        debug!(name, "substituting placeholder");
        output = output.replace(&reference, &replacement);
    }
    Ok(output)
}
