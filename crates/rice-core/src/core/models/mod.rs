//! # Core Models Module
//!
//! Data structures shared by every stage of library design.
//!
//! - [`parent`] - Aligned parent sequences, gap normalization and the [`parent::ParentSet`]
//! - [`contact`] - Column-indexed structural contacts and the [`contact::ContactSet`]
//! - [`structure`] - Residues and atoms read from a reference structure
//! - [`library`] - RASPP results and curve points
//!
//! ```ignore
//! use ricepp::core::models::parent::{Parent, ParentSet};
//!
//! let parents = ParentSet::new(vec![
//!     Parent::new("p1", "MKV-LA"),
//!     Parent::new("p2", "MRVELS"),
//! ])?;
//! assert_eq!(parents.sequence_length(), 6);
//! ```

pub mod contact;
pub mod library;
pub mod parent;
pub mod structure;
