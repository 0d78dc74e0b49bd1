//! # RICE++ Core Library
//!
//! A library for designing protein recombination libraries with SCHEMA-RASPP:
//! given aligned parent sequences and a reference structure, it finds the
//! crossover placements that best trade structural disruption against
//! sequence diversity.
//!
//! ## Architectural Philosophy
//!
//! The library keeps a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`ParentSet`, `ContactSet`,
//!   `Structure`), contact scoring strategies and the readers and writers for PDB,
//!   alignment, contact and report files.
//!
//! - **[`engine`]: The Logic Core.** Residue alignment, contact search, column
//!   collapsing, the energy tensor, cumulative tables and the RASPP enumeration,
//!   each a pure function of its inputs.
//!
//! - **[`workflows`]: The Public API.** Ties `core` and `engine` together into the
//!   contact-map and library-design procedures.

pub mod core;
pub mod engine;
pub mod workflows;
