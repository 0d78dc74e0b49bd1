//! Small lookup helpers shared by the structure reader and the contact search.

pub mod identifiers;
