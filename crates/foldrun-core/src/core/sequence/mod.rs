//! # Sequence Normalization Module
//!
//! Turns any accepted raw input shape into one [`CanonicalRequest`](crate::core::models::request::CanonicalRequest).
//!
//! ## Overview
//!
//! Every residue string is checked against a [`policy::NormalizationPolicy`] (allowed alphabet
//! and minimum chain length) before anything is serialized, so an invalid request is never
//! written. The normalizer is a single component configured by that policy rather than one
//! code path per input revision.
//!
//! - [`policy`] - Alphabet and minimum chain length
//! - [`validate`] - Whitespace cleaning and the per-chain predicates
//! - [`normalizer`] - The per-variant normalization rules
//! - [`error`] - Validation and normalization errors

pub mod error;
pub mod normalizer;
pub mod policy;
pub(crate) mod validate;
