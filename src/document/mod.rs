//! Parameter document handling

pub mod diagnostics;

pub use diagnostics::{locate_key, DocumentSyntaxError};
