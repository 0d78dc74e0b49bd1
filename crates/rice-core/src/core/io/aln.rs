use crate::core::io::traits::RecordReader;
use crate::core::models::parent::AlignedSequence;
use std::collections::HashMap;
use std::io::{self, BufRead};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum AlnError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("Sequence '{id}' has aligned length {found}, expected {expected}")]
    UnequalLength {
        id: String,
        expected: usize,
        found: usize,
    },
    #[error("Missing required record: {0}")]
    MissingRecord(String),
}

fn is_header(line: &str) -> bool {
    line.starts_with("CLUSTAL") || line.starts_with("MUSCLE") || line.starts_with('#')
}

/// Reader for interleaved ClustalW/MUSCLE alignments.
///
/// Each data line is `identifier  segment  [cumulative count]`; segments of the
/// same identifier are concatenated across blocks. Consensus lines (leading
/// whitespace) and blank lines are skipped.
pub struct AlnFile;

impl RecordReader for AlnFile {
    type Output = Vec<AlignedSequence>;
    type Error = AlnError;

    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error> {
        let mut order: Vec<String> = Vec::new();
        let mut segments: HashMap<String, String> = HashMap::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;

            if line.trim().is_empty() || is_header(&line) {
                continue;
            }
            if line.starts_with(char::is_whitespace) {
                continue;
            }

            let mut fields = line.split_whitespace();
            let (Some(id), Some(segment)) = (fields.next(), fields.next()) else {
                return Err(AlnError::Parse {
                    line: line_num,
                    message: format!("expected '<id> <sequence>', found '{}'", line.trim()),
                });
            };
            if let Some(extra) = fields.next() {
                if extra.parse::<usize>().is_err() {
                    return Err(AlnError::Parse {
                        line: line_num,
                        message: format!("unexpected trailing field '{}'", extra),
                    });
                }
            }

            match segments.get_mut(id) {
                Some(sequence) => sequence.push_str(segment),
                None => {
                    order.push(id.to_string());
                    segments.insert(id.to_string(), segment.to_string());
                }
            }
        }

        if order.is_empty() {
            return Err(AlnError::MissingRecord("alignment sequences".into()));
        }

        let rows: Vec<AlignedSequence> = order
            .into_iter()
            .map(|id| {
                let sequence = segments.remove(&id).unwrap_or_default();
                AlignedSequence::new(id, sequence)
            })
            .collect();

        let expected = rows[0].sequence.len();
        if let Some(bad) = rows.iter().find(|r| r.sequence.len() != expected) {
            return Err(AlnError::UnequalLength {
                id: bad.id.clone(),
                expected,
                found: bad.sequence.len(),
            });
        }

        debug!(
            sequences = rows.len(),
            columns = expected,
            "Parsed alignment."
        );
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};

    fn parse(content: &str) -> Result<Vec<AlignedSequence>, AlnError> {
        let mut reader = BufReader::new(Cursor::new(content.as_bytes()));
        AlnFile::read_from(&mut reader)
    }

    #[test]
    fn concatenates_interleaved_blocks_in_first_seen_order() {
        let content = [
            "CLUSTAL W (1.83) multiple sequence alignment",
            "",
            "pse4      MKV-LA 5",
            "tem1      MRVELS 6",
            "          *.*  .",
            "",
            "pse4      GG 7",
            "tem1      GA 8",
        ]
        .join("\n");
        let rows = parse(&content).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], AlignedSequence::new("pse4", "MKV-LAGG"));
        assert_eq!(rows[1], AlignedSequence::new("tem1", "MRVELSGA"));
    }

    #[test]
    fn accepts_muscle_header_and_lines_without_counts() {
        let content = "MUSCLE (3.8) multiple sequence alignment\n\nA  AC-\nB  ACD\n";
        let rows = parse(content).unwrap();
        assert_eq!(rows[0].ungapped(), "AC");
        assert_eq!(rows[1].sequence, "ACD");
    }

    #[test]
    fn unequal_lengths_are_rejected() {
        let result = parse("A  ACDE\nB  ACD\n");
        assert!(matches!(
            result,
            Err(AlnError::UnequalLength { ref id, expected: 4, found: 3 }) if id == "B"
        ));
    }

    #[test]
    fn line_without_sequence_is_a_parse_error() {
        let result = parse("CLUSTAL\n\nlonely\n");
        assert!(matches!(result, Err(AlnError::Parse { line: 3, .. })));
    }

    #[test]
    fn empty_alignment_is_missing_record() {
        assert!(matches!(parse("CLUSTAL\n\n"), Err(AlnError::MissingRecord(_))));
    }
}
