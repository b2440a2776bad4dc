//! # textspin
//!
//! Expands spintax templates: nested `{a|b|c}` alternation groups are resolved by
//! picking one alternative per group at random, and `~name~` references are then
//! replaced from a placeholder table. All four markers are configurable.
//!
//! The engine lives in [`spin`]; [`settings`] loads layered settings for the
//! `textspin` binary.

pub mod settings;
pub mod spin;

pub use spin::{
    MalformedKind, MarkerSet, MarkerSpec, PlaceholderTable, SpinDocument, SpinError, Spinner,
};
