//! Read-side derivations over the note collection.
//!
//! # Responsibility
//! - Compute display sequences from the full collection and view
//!   parameters.
//!
//! # Invariants
//! - Derivations are pure: no storage access, no input mutation.

pub mod view;
