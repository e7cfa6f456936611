#![deny(missing_docs)]

//! # sdx-core — Foundational Types for the SDX Stack
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! `thiserror`, and `chrono` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **Kind-preserving scalar literals.** Self-description documents carry
//!    scalars as RDF literal objects (`{"@type": ..., "@value": ...}`).
//!    [`ScalarLiteral`] and the [`StringValue`]/[`UriValue`]/[`IntegerValue`]
//!    newtypes keep the intended semantic kind attached to the value even
//!    where two kinds share a wire representation.
//!
//! 2. **[`CanonicalDocument`] is the sole path to signing-input bytes.**
//!    Every detached proof in the stack is computed over bytes produced by
//!    `CanonicalDocument::from_value()`, which normalizes timestamps and
//!    serializes with sorted keys and compact separators.
//!
//! 3. **Structured errors with `thiserror`.** No `Box<dyn Error>`, no
//!    `.unwrap()` outside tests.

pub mod canonical;
pub mod did;
pub mod error;
pub mod literal;
pub mod temporal;

// Re-export primary types at crate root for ergonomic imports.
pub use canonical::CanonicalDocument;
pub use did::Did;
pub use error::{CanonicalizationError, FormatError, ValidationError};
pub use literal::{IntegerValue, LiteralKind, ScalarLiteral, StringValue, UriValue};
pub use temporal::Timestamp;
