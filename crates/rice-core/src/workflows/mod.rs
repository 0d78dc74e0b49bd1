//! # Workflows Module
//!
//! High-level entry points that run the engine stages in order for the two
//! things a user asks of the library designer.
//!
//! - **Contact Workflow** ([`contacts`]) - Reference structure and alignments to an
//!   alignment-column contact map.
//! - **Design Workflow** ([`design`]) - Parents and contacts to the RASPP curve, with
//!   collapsing, energy scoring and enumeration in between.
//!
//! Both report phases through a [`crate::engine::progress::ProgressReporter`] and fail
//! with [`crate::engine::error::EngineError`] before doing expensive work whenever the
//! inputs are inconsistent.

pub mod contacts;
pub mod design;
