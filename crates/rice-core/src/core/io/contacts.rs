use crate::core::io::traits::{RecordReader, RecordWriter};
use crate::core::models::contact::{Contact, ContactSet};
use std::io::{self, BufRead, Write};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContactFileError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    #[error("Parse error on line {line}: invalid column index '{value}'")]
    InvalidIndex { line: usize, value: String },
    #[error("Parse error on line {line}: expected two column indices")]
    MissingField { line: usize },
    #[error("Line {line}: ({i}, {j}) is not a valid contact")]
    InvalidContact { line: usize, i: usize, j: usize },
}

/// Plain-text contact list: one `i<TAB>j` pair of alignment columns per line.
pub struct ContactFile;

impl RecordReader for ContactFile {
    type Output = ContactSet;
    type Error = ContactFileError;

    fn read_from(reader: &mut impl BufRead) -> Result<ContactSet, ContactFileError> {
        let mut contacts = ContactSet::new();

        for (line_num, line_res) in reader.lines().enumerate() {
            let line = line_res?;
            let line_num = line_num + 1;
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }

            let mut fields = trimmed.split_whitespace();
            let (Some(a), Some(b)) = (fields.next(), fields.next()) else {
                return Err(ContactFileError::MissingField { line: line_num });
            };
            let parse = |value: &str| {
                value
                    .parse::<usize>()
                    .map_err(|_| ContactFileError::InvalidIndex {
                        line: line_num,
                        value: value.to_string(),
                    })
            };
            let (i, j) = (parse(a)?, parse(b)?);
            let contact = Contact::new(i, j).ok_or(ContactFileError::InvalidContact {
                line: line_num,
                i,
                j,
            })?;
            contacts.insert(contact);
        }

        Ok(contacts)
    }
}

impl RecordWriter for ContactFile {
    type Input = ContactSet;
    type Error = ContactFileError;

    fn write_to(contacts: &ContactSet, writer: &mut impl Write) -> Result<(), ContactFileError> {
        writeln!(writer, "# Contacts: {}", contacts.len())?;
        writeln!(writer, "# i\tj")?;
        for contact in contacts {
            writeln!(writer, "{}\t{}", contact.i(), contact.j())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{BufReader, Cursor};
    use tempfile::NamedTempFile;

    fn parse(content: &str) -> Result<ContactSet, ContactFileError> {
        let mut reader = BufReader::new(Cursor::new(content.as_bytes()));
        ContactFile::read_from(&mut reader)
    }

    #[test]
    fn written_file_reads_back_identically() {
        let contacts: ContactSet = [(1, 8), (3, 6), (0, 2), (10, 40)]
            .into_iter()
            .filter_map(|(i, j)| Contact::new(i, j))
            .collect();
        let file = NamedTempFile::new().unwrap();

        ContactFile::write_to_path(&contacts, file.path()).unwrap();
        let read_back = ContactFile::read_from_path(file.path()).unwrap();

        assert_eq!(read_back, contacts);
    }

    #[test]
    fn writes_sorted_rows_after_comment_header() {
        let contacts: ContactSet = [(3, 6), (1, 8)]
            .into_iter()
            .filter_map(|(i, j)| Contact::new(i, j))
            .collect();
        let mut buffer = Vec::new();
        ContactFile::write_to(&contacts, &mut buffer).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let rows: Vec<&str> = text.lines().filter(|l| !l.starts_with('#')).collect();
        assert_eq!(rows, vec!["1\t8", "3\t6"]);
    }

    #[test]
    fn reader_ignores_comments_blank_lines_and_extra_columns() {
        let contacts = parse("# header\n\n5\t2\t3.9\n  # note\n1 9\n").unwrap();
        assert_eq!(contacts.len(), 2);
        assert!(contacts.contains(&Contact::new(2, 5).unwrap()));
        assert!(contacts.contains(&Contact::new(1, 9).unwrap()));
    }

    #[test]
    fn adjacent_pair_is_rejected() {
        let result = parse("4\t5\n");
        assert!(matches!(
            result,
            Err(ContactFileError::InvalidContact { line: 1, i: 4, j: 5 })
        ));
    }

    #[test]
    fn non_numeric_index_is_rejected() {
        assert!(matches!(
            parse("1\tx\n"),
            Err(ContactFileError::InvalidIndex { line: 1, .. })
        ));
        assert!(matches!(
            parse("7\n"),
            Err(ContactFileError::MissingField { line: 1 })
        ));
    }
}
