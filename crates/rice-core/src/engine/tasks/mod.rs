//! Computational stages of library design.
//!
//! Each submodule exposes a `run` entry point that is a pure function of its
//! inputs, executed in order by the workflows: residue alignment, contact map,
//! collapse, energy tensor, RASPP enumeration and curve extraction.

pub mod collapse;
pub mod contact_map;
pub mod curve;
pub mod energy_tensor;
pub mod raspp;
pub mod residue_alignment;
