//! # Engine Module
//!
//! This module implements the SCHEMA-RASPP computation: it turns a reference
//! structure and a set of aligned parents into contact energies and evaluates
//! every admissible crossover placement against them.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Contact search and RASPP parameters with their builders
//! - **Error Handling** ([`error`]) - The [`error::EngineError`] shared by every stage
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Enumeration** ([`breakpoints`]) - Lazy iteration over valid crossover tuples
//! - **Cumulative Tables** ([`tables`]) - O(1) fragment energy and parent-difference lookups
//! - **Tasks** ([`tasks`]) - The individual stages, each a pure function of its inputs
//!
//! All tables are immutable once built and the engine runs on a single thread.

pub mod breakpoints;
pub mod config;
pub mod error;
pub mod progress;
pub mod tables;
pub mod tasks;
