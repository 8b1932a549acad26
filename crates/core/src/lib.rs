//! Domain core for the folio backend.
//!
//! Pure types and logic shared by the database, media, and API crates:
//! identifiers, asset references, the ordering engine, field validation,
//! and the domain error enum. No I/O lives here.

pub mod asset;
pub mod error;
pub mod ordering;
pub mod types;
pub mod validation;
