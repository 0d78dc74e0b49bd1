//! Provides input/output for the text formats used in library design.
//!
//! Readers cover reference structures (PDB), multiple sequence alignments
//! (ClustalW/MUSCLE `.aln`) and contact lists; writers cover contact lists and
//! the tab-separated curve report. All formats share the trait-based interface
//! in [`traits`].

pub mod aln;
pub mod contacts;
pub mod pdb;
pub mod report;
pub mod traits;
