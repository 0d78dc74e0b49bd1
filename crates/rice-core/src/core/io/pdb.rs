use crate::core::io::traits::RecordReader;
use crate::core::models::structure::{Structure, StructureAtom, StructureResidue};
use nalgebra::Point3;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum PdbError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {kind}")]
    Parse { line: usize, kind: PdbParseErrorKind },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

#[derive(Debug, Error)]
pub enum PdbParseErrorKind {
    #[error("Invalid integer format in columns {columns} (value: '{value}')")]
    InvalidInt { columns: String, value: String },
    #[error("Invalid float format in columns {columns} (value: '{value}')")]
    InvalidFloat { columns: String, value: String },
    #[error("Required field in columns {columns} is empty")]
    MissingRequiredField { columns: String },
    #[error("Line is too short for ATOM record (must be at least 54 chars)")]
    LineTooShort,
}

fn slice_and_trim(line: &str, start: usize, end: usize) -> &str {
    line.get(start..end).unwrap_or("").trim()
}

fn column_char(line: &str, index: usize) -> char {
    line.as_bytes().get(index).map_or(' ', |&b| b as char)
}

fn parse_int<T: std::str::FromStr>(value: &str, columns: &str, line: usize) -> Result<T, PdbError> {
    value.parse().map_err(|_| PdbError::Parse {
        line,
        kind: PdbParseErrorKind::InvalidInt {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

fn parse_float(value: &str, columns: &str, line: usize) -> Result<f64, PdbError> {
    value.parse().map_err(|_| PdbError::Parse {
        line,
        kind: PdbParseErrorKind::InvalidFloat {
            columns: columns.into(),
            value: value.into(),
        },
    })
}

/// Reader for the fixed-column Protein Data Bank format.
///
/// Only `ATOM` records of the first model are read. When a residue carries
/// alternate locations, the first location seen for that residue is kept.
pub struct PdbFile;

impl RecordReader for PdbFile {
    type Output = Structure;
    type Error = PdbError;

    fn read_from(reader: &mut impl BufRead) -> Result<Structure, PdbError> {
        let mut id_code: Option<String> = None;
        let mut residues: Vec<StructureResidue> = Vec::new();
        let mut current_key: Option<(char, isize, char)> = None;
        let mut current_altloc: Option<char> = None;
        let mut atom_count = 0usize;

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            match slice_and_trim(&line, 0, 6) {
                "HEADER" => {
                    let code = slice_and_trim(&line, 62, 66);
                    if !code.is_empty() && id_code.is_none() {
                        id_code = Some(code.to_string());
                    }
                }
                "ATOM" => {
                    if line.len() < 54 {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::LineTooShort,
                        });
                    }

                    let name = slice_and_trim(&line, 12, 16);
                    if name.is_empty() {
                        return Err(PdbError::Parse {
                            line: line_num,
                            kind: PdbParseErrorKind::MissingRequiredField {
                                columns: "13-16".into(),
                            },
                        });
                    }
                    let serial: usize = parse_int(slice_and_trim(&line, 6, 11), "7-11", line_num)?;
                    let altloc = column_char(&line, 16);
                    let res_name = slice_and_trim(&line, 17, 20);
                    let chain_id = column_char(&line, 21);
                    let seq_num: isize =
                        parse_int(slice_and_trim(&line, 22, 26), "23-26", line_num)?;
                    let insertion_code = column_char(&line, 26);
                    let x = parse_float(slice_and_trim(&line, 30, 38), "31-38", line_num)?;
                    let y = parse_float(slice_and_trim(&line, 38, 46), "39-46", line_num)?;
                    let z = parse_float(slice_and_trim(&line, 46, 54), "47-54", line_num)?;
                    let element = slice_and_trim(&line, 76, 78);

                    let key = (chain_id, seq_num, insertion_code);
                    if current_key != Some(key) {
                        residues.push(StructureResidue::new(
                            chain_id,
                            seq_num,
                            insertion_code,
                            res_name,
                        ));
                        current_key = Some(key);
                        current_altloc = None;
                    }

                    if altloc != ' ' {
                        match current_altloc {
                            None => current_altloc = Some(altloc),
                            Some(kept) if kept != altloc => continue,
                            Some(_) => {}
                        }
                    }

                    if let Some(residue) = residues.last_mut() {
                        residue.add_atom(
                            StructureAtom::new(serial, name, Point3::new(x, y, z))
                                .with_element(element),
                        );
                        atom_count += 1;
                    }
                }
                "ENDMDL" | "END" => break,
                _ => {}
            }
        }

        if residues.is_empty() {
            return Err(PdbError::MissingRecord("ATOM records".into()));
        }
        debug!(
            residues = residues.len(),
            atoms = atom_count,
            "Parsed PDB structure."
        );
        Ok(Structure::new(id_code, residues))
    }
}
