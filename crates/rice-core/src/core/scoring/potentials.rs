use crate::core::models::parent::GAP;

/// SCHEMA disruption for one orientation of a parent pair.
///
/// The chimera carries `p_i` at the first contact position and `q_j` at the
/// second. The contact counts as broken when that residue pair occurs in
/// neither parent.
#[inline]
pub fn schema_disruption(p_i: u8, p_j: u8, q_i: u8, q_j: u8) -> f64 {
    if p_i == GAP || q_j == GAP {
        return 0.0;
    }
    let native_to_p = p_j == q_j;
    let native_to_q = q_i == p_i;
    if native_to_p || native_to_q { 0.0 } else { 1.0 }
}

/// Flat penalty whenever the two parents disagree on the contacting residue pair.
#[inline]
pub fn pair_mismatch(p_i: u8, p_j: u8, q_i: u8, q_j: u8, weight: f64) -> f64 {
    if (p_i, p_j) != (q_i, q_j) { weight } else { 0.0 }
}
