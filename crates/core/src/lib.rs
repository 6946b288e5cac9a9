//! Domain logic for the Vendora catalog.
//!
//! Pure functions and types with no I/O: identifiers, errors, price rules,
//! the category index and tree builder, and report shaping. The `db` crate
//! persists these types and the `api` crate orchestrates them.

pub mod catalog;
pub mod error;
pub mod pricing;
pub mod reporting;
pub mod types;
pub mod vendor;
