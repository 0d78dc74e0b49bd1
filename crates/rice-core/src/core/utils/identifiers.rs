use phf::{Map, phf_map};

/// Placeholder for residues without a standard one-letter code.
pub const UNKNOWN_RESIDUE: char = 'X';

static THREE_TO_ONE: Map<&'static str, char> = phf_map! {
    "ALA" => 'A', "ARG" => 'R', "ASN" => 'N', "ASP" => 'D', "CYS" => 'C',
    "GLN" => 'Q', "GLU" => 'E', "GLY" => 'G', "HIS" => 'H', "ILE" => 'I',
    "LEU" => 'L', "LYS" => 'K', "MET" => 'M', "PHE" => 'F', "PRO" => 'P',
    "SER" => 'S', "THR" => 'T', "TRP" => 'W', "TYR" => 'Y', "VAL" => 'V',
    // Protonation-state and force-field variants
    "HSE" => 'H', "HSD" => 'H', "HSP" => 'H', "HID" => 'H', "HIE" => 'H', "HIP" => 'H',
    "CYX" => 'C', "CYM" => 'C', "ASH" => 'D', "GLH" => 'E', "LYN" => 'K',
    // Modified residues commonly deposited as ATOM records
    "MSE" => 'M', "SEC" => 'U', "PYL" => 'O',
    "ASX" => 'B', "GLX" => 'Z', "UNK" => 'X',
};

/// Converts a three-letter residue name to its one-letter code.
pub fn one_letter_code(residue_name: &str) -> char {
    THREE_TO_ONE
        .get(residue_name.trim().to_ascii_uppercase().as_str())
        .copied()
        .unwrap_or(UNKNOWN_RESIDUE)
}

/// Heavy-atom test by atom name, ignoring PDB-style leading digits (e.g. `1HB`).
pub fn is_heavy_atom(atom_name: &str) -> bool {
    let first_char = atom_name
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .chars()
        .next()
        .map(|c| c.to_ascii_uppercase());
    !matches!(first_char, Some('H') | Some('D') | None)
}

/// Heavy-atom test by element symbol.
pub fn is_heavy_element(element: &str) -> bool {
    !matches!(element.trim().to_ascii_uppercase().as_str(), "H" | "D" | "T" | "")
}
