//! Page-level value types.
//!
//! # Responsibility
//! - Define declarative element descriptions consumed by the element factory.
//! - Define input validation rules and their results.
//!
//! # Invariants
//! - Types here never touch a host document.

pub mod element;
pub mod validation;
