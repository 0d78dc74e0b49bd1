use std::error::Error;
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Defines the interface for parsing one of the text formats consumed by the library designer.
///
/// Implementors handle format-specific parsing; opening and buffering files is
/// provided by the default [`RecordReader::read_from_path`].
pub trait RecordReader {
    /// The in-memory representation produced by the parser.
    type Output;

    /// The error type for parse and I/O failures.
    type Error: Error + From<io::Error>;

    /// Parses a complete record set from a buffered reader.
    ///
    /// # Errors
    ///
    /// Returns an error if the input is malformed or reading fails.
    fn read_from(reader: &mut impl BufRead) -> Result<Self::Output, Self::Error>;

    /// Opens `path` and parses it with [`RecordReader::read_from`].
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened or parsing fails.
    fn read_from_path<P: AsRef<Path>>(path: P) -> Result<Self::Output, Self::Error> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_from(&mut reader)
    }
}

/// Defines the interface for serializing results to one of the library designer's text formats.
pub trait RecordWriter {
    /// The value being serialized.
    type Input: ?Sized;

    /// The error type for I/O failures.
    type Error: Error + From<io::Error>;

    /// Serializes `input` to `writer`.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_to(input: &Self::Input, writer: &mut impl Write) -> Result<(), Self::Error>;

    /// Creates `path` and serializes `input` into it.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or writing fails.
    fn write_to_path<P: AsRef<Path>>(input: &Self::Input, path: P) -> Result<(), Self::Error> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(input, &mut writer)?;
        writer.flush()?;
        Ok(())
    }
}
