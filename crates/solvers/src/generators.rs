//! Seeded random problem generators.
//!
//! # Generators
//!
//! - [`nae3sat`] — random not-all-equal 3-SAT instances as spin models

pub mod nae3sat;

pub use nae3sat::Nae3sat;
