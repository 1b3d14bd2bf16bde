//! Domain model for the persisted note collection.
//!
//! # Responsibility
//! - Define the canonical note record and its closed category set.
//! - Keep every transformation pure: helpers return new values instead of
//!   mutating the receiver.
//!
//! # Invariants
//! - Every note is identified by a stable `NoteId`.
//! - Constructed notes always satisfy `created_at <= updated_at` and carry
//!   non-empty trimmed title/content.

pub mod note;
