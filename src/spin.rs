//! Spintax engine: markers, placeholder table, scanner, resolver and the spinner itself

pub mod auditor;
pub mod document;
pub mod engine;
pub mod error;
pub mod markers;
pub mod placeholders;
pub mod resolver;
pub mod scanner;
pub mod substitutor;
pub mod validator;

pub use document::SpinDocument;
pub use engine::Spinner;
pub use error::{MalformedKind, Result, SpinError};
pub use markers::{MarkerSet, MarkerSpec};
pub use placeholders::PlaceholderTable;
