//! The spin engine.
//!
//! [`Spinner`] owns a template, a placeholder table, a marker set and the source
//! of randomness used to pick alternatives. Each field is replaced whole by its
//! setter. Nothing is validated implicitly: call [`Spinner::validate`] or
//! [`Spinner::check_structure`] before spinning when that matters.
//!
//! ```rust,ignore
//! use textspin::{PlaceholderTable, Spinner};
//!
//! let mut spinner = Spinner::new("{this|that{| one}} ~verb~")
//!     .with_placeholders(PlaceholderTable::new().with("verb", "jumps"));
//! let text = spinner.spin(true)?;
//! ```

use super::auditor::find_invalid_placeholders;
use super::error::Result;
use super::markers::MarkerSet;
use super::placeholders::PlaceholderTable;
use super::resolver::resolve;
use super::scanner::check_structure;
use super::substitutor::substitute;
use super::validator::validate;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

#[derive(Debug)]
pub struct Spinner<R = StdRng> {
    template: String,
    placeholders: PlaceholderTable,
    markers: MarkerSet,
    rng: R,
}

impl Spinner<StdRng> {
    /// Create a spinner with no placeholders, default markers and an entropy-seeded rng.
    pub fn new(template: impl Into<String>) -> Self {
        Self::from_parts(template, PlaceholderTable::new(), MarkerSet::default())
    }

    pub fn from_parts(
        template: impl Into<String>,
        placeholders: PlaceholderTable,
        markers: MarkerSet,
    ) -> Self {
        Spinner {
            template: template.into(),
            placeholders,
            markers,
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic spinner, mainly for reproducible output.
    pub fn seeded(template: impl Into<String>, seed: u64) -> Self {
        Self::new(template).with_rng(StdRng::seed_from_u64(seed))
    }
}

impl Default for Spinner<StdRng> {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl<R: Rng> Spinner<R> {
    /// Swap the randomness source, keeping template, placeholders and markers.
    pub fn with_rng<S: Rng>(self, rng: S) -> Spinner<S> {
        Spinner {
            template: self.template,
            placeholders: self.placeholders,
            markers: self.markers,
            rng,
        }
    }

    pub fn with_placeholders(mut self, placeholders: PlaceholderTable) -> Self {
        self.placeholders = placeholders;
        self
    }

    pub fn with_markers(mut self, markers: MarkerSet) -> Self {
        self.markers = markers;
        self
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn set_template(&mut self, template: impl Into<String>) {
        self.template = template.into();
    }

    pub fn placeholders(&self) -> &PlaceholderTable {
        &self.placeholders
    }

    pub fn set_placeholders(&mut self, placeholders: PlaceholderTable) {
        self.placeholders = placeholders;
    }

    pub fn markers(&self) -> &MarkerSet {
        &self.markers
    }

    pub fn set_markers(&mut self, markers: MarkerSet) {
        self.markers = markers;
    }

    /// Replace the markers from a map of exactly four keys.
    ///
    /// On error the current markers are left untouched.
    pub fn set_markers_from_map<I, K, V>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.markers = MarkerSet::from_map(entries)?;
        Ok(())
    }

    /// Balance check, plus a placeholder audit when `check_placeholders` is set.
    pub fn validate(&self, check_placeholders: bool) -> bool {
        validate(
            &self.template,
            &self.placeholders,
            &self.markers,
            check_placeholders,
        )
    }

    /// Strict nesting check: every close must follow a matching open.
    pub fn check_structure(&self) -> Result<()> {
        check_structure(&self.template, &self.markers)
    }

    pub fn find_invalid_placeholders(&self) -> Vec<String> {
        find_invalid_placeholders(&self.template, &self.placeholders, &self.markers)
    }

    /// Resolve arbitrary text with this spinner's markers and rng.
    pub fn resolve(&mut self, text: &str) -> Result<String> {
        resolve(text, &self.markers, &mut self.rng)
    }

    /// Substitute this spinner's placeholders into arbitrary text.
    pub fn substitute(&mut self, text: &str) -> Result<String> {
        substitute(text, &self.placeholders, &self.markers, &mut self.rng)
    }

    /// Produce one sample of the template.
    pub fn spin(&mut self, apply_substitution: bool) -> Result<String> {
        let resolved = resolve(&self.template, &self.markers, &mut self.rng)?;
        let output = if apply_substitution {
            substitute(&resolved, &self.placeholders, &self.markers, &mut self.rng)?
        } else {
            resolved
        };
        debug!(
            template_len = self.template.len(),
            output_len = output.len(),
            apply_substitution,
            "spun template"
        );
        Ok(output)
    }

    /// Produce `count` independent samples.
    pub fn spin_many(&mut self, count: usize, apply_substitution: bool) -> Result<Vec<String>> {
        (0..count).map(|_| self.spin(apply_substitution)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spin::error::SpinError;
    use rand::rngs::mock::StepRng;

    #[test]
    fn test_default_spinner_is_empty() {
        let mut spinner: Spinner = Spinner::default();
        assert_eq!(spinner.template(), "");
        assert!(spinner.placeholders().is_empty());
        assert_eq!(spinner.markers(), &MarkerSet::default());
        assert_eq!(spinner.spin(true).unwrap(), "");
    }

    #[test]
    fn test_spin_with_injected_rng() {
        let mut spinner = Spinner::new("{this|that{| one}} ~verb~")
            .with_placeholders(PlaceholderTable::new().with("verb", "{jumps|leaps}"))
            .with_rng(StepRng::new(0, 0));
        assert_eq!(spinner.spin(true).unwrap(), "this jumps");
        assert_eq!(spinner.spin(false).unwrap(), "this ~verb~");
    }

    #[test]
    fn test_rejected_markers_leave_previous_set() {
        let mut spinner = Spinner::new("[a#b]");
        spinner
            .set_markers_from_map([
                ("open", "["),
                ("close", "]"),
                ("separator", "#"),
                ("placeholder", "$"),
            ])
            .unwrap();
        let before = spinner.markers().clone();

        let result = spinner.set_markers_from_map([("open", "<"), ("close", ">"), ("separator", "/")]);
        assert!(matches!(result, Err(SpinError::InvalidInput { .. })));
        assert_eq!(spinner.markers(), &before);
    }

    #[test]
    fn test_seeded_spinners_agree() {
        let template = "{a|b|c} {d|e|f} {g|h|i}";
        let mut left = Spinner::seeded(template, 99);
        let mut right = Spinner::seeded(template, 99);
        assert_eq!(
            left.spin_many(10, true).unwrap(),
            right.spin_many(10, true).unwrap()
        );
    }

    #[test]
    fn test_spin_reports_malformed_template() {
        let mut spinner = Spinner::new("{never closed");
        assert!(!spinner.validate(false));
        assert!(matches!(
            spinner.spin(true),
            Err(SpinError::MalformedTemplate { .. })
        ));
    }
}
