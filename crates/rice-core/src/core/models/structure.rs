use crate::core::utils::identifiers::{is_heavy_atom, is_heavy_element, one_letter_code};
use nalgebra::Point3;

#[derive(Debug, Clone, PartialEq)]
pub struct StructureAtom {
    pub serial: usize,                 // Atom serial number from the source file
    pub name: String,                  // Atom name (e.g., "CA", "OG1")
    pub element: Option<String>,       // Element symbol, when the file provides one
    pub position: Point3<f64>,         // Cartesian coordinates in Angstroms
}

impl StructureAtom {
    pub fn new(serial: usize, name: &str, position: Point3<f64>) -> Self {
        Self {
            serial,
            name: name.to_string(),
            element: None,
            position,
        }
    }

    pub fn with_element(mut self, element: &str) -> Self {
        if !element.trim().is_empty() {
            self.element = Some(element.trim().to_string());
        }
        self
    }

    pub fn is_heavy(&self) -> bool {
        match &self.element {
            Some(element) => is_heavy_element(element),
            None => is_heavy_atom(&self.name),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructureResidue {
    pub chain_id: char,          // Chain identifier; ' ' for a blank chain column
    pub seq_num: isize,          // Residue sequence number
    pub insertion_code: char,    // Insertion code; ' ' when absent
    pub name: String,            // Three-letter residue name
    atoms: Vec<StructureAtom>,
}

impl StructureResidue {
    pub fn new(chain_id: char, seq_num: isize, insertion_code: char, name: &str) -> Self {
        Self {
            chain_id,
            seq_num,
            insertion_code,
            name: name.trim().to_string(),
            atoms: Vec::new(),
        }
    }

    pub fn add_atom(&mut self, atom: StructureAtom) {
        self.atoms.push(atom);
    }

    pub fn atoms(&self) -> &[StructureAtom] {
        &self.atoms
    }

    pub fn heavy_atoms(&self) -> impl Iterator<Item = &StructureAtom> {
        self.atoms.iter().filter(|a| a.is_heavy())
    }

    /// A residue takes part in contact search only when it has resolved heavy atoms.
    pub fn has_coordinates(&self) -> bool {
        self.heavy_atoms().next().is_some()
    }

    pub fn one_letter(&self) -> char {
        one_letter_code(&self.name)
    }
}

/// The residues of a structure file, in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Structure {
    pub id_code: Option<String>,
    residues: Vec<StructureResidue>,
}

impl Structure {
    pub fn new(id_code: Option<String>, residues: Vec<StructureResidue>) -> Self {
        Self { id_code, residues }
    }

    pub fn residues(&self) -> &[StructureResidue] {
        &self.residues
    }

    pub fn chain_ids(&self) -> Vec<char> {
        let mut ids: Vec<char> = Vec::new();
        for residue in &self.residues {
            if !ids.contains(&residue.chain_id) {
                ids.push(residue.chain_id);
            }
        }
        ids
    }

    /// Residues belonging to any of `chains`, in file order.
    pub fn select_chains(&self, chains: &[char]) -> Vec<&StructureResidue> {
        self.residues
            .iter()
            .filter(|r| chains.contains(&r.chain_id))
            .collect()
    }

    /// One-letter sequence of the residues in `chains`.
    pub fn sequence(&self, chains: &[char]) -> String {
        self.select_chains(chains)
            .into_iter()
            .map(StructureResidue::one_letter)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn residue(chain: char, num: isize, name: &str, atoms: &[(&str, [f64; 3])]) -> StructureResidue {
        let mut res = StructureResidue::new(chain, num, ' ', name);
        for (i, (atom_name, pos)) in atoms.iter().enumerate() {
            res.add_atom(StructureAtom::new(i + 1, atom_name, Point3::from(*pos)));
        }
        res
    }

    #[test]
    fn is_heavy_prefers_element_column() {
        let atom = StructureAtom::new(1, "HG", Point3::origin()).with_element("HG");
        assert!(atom.is_heavy());
        let hydrogen = StructureAtom::new(2, "HG", Point3::origin());
        assert!(!hydrogen.is_heavy());
    }

    #[test]
    fn has_coordinates_requires_a_heavy_atom() {
        let only_hydrogens = residue('A', 1, "GLY", &[("HA2", [0.0, 0.0, 0.0])]);
        assert!(!only_hydrogens.has_coordinates());
        let with_ca = residue('A', 1, "GLY", &[("CA", [0.0, 0.0, 0.0])]);
        assert!(with_ca.has_coordinates());
    }

    #[test]
    fn sequence_and_selection_follow_chains_in_file_order() {
        let structure = Structure::new(
            Some("1ABC".to_string()),
            vec![
                residue('A', 1, "MET", &[("CA", [0.0; 3])]),
                residue('B', 1, "GLY", &[("CA", [0.0; 3])]),
                residue('A', 2, "LYS", &[("CA", [0.0; 3])]),
                residue(' ', 3, "TRP", &[("CA", [0.0; 3])]),
            ],
        );
        assert_eq!(structure.sequence(&['A', ' ']), "MKW");
        assert_eq!(structure.sequence(&['B']), "G");
        assert_eq!(structure.chain_ids(), vec!['A', 'B', ' ']);
    }
}
