use crate::core::models::request::CanonicalRequest;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// File name of the canonical request inside a run's working directory.
pub const REQUEST_FILE_NAME: &str = "sequence.fasta";

pub struct FastaFile;

impl FastaFile {
    /// Reads every line of a FASTA-like file, keeping blank lines so callers can
    /// decide how to treat them.
    pub fn read_lines_from(reader: &mut impl BufRead) -> io::Result<Vec<String>> {
        reader.lines().collect()
    }

    pub fn read_lines_from_path<P: AsRef<Path>>(path: P) -> io::Result<Vec<String>> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        Self::read_lines_from(&mut reader)
    }

    pub fn write_to(request: &CanonicalRequest, writer: &mut impl Write) -> io::Result<()> {
        for line in request.lines() {
            writeln!(writer, "{}", line)?;
        }
        writer.flush()
    }

    /// Writes a validated request, creating the parent directory when needed.
    pub fn write_to_path<P: AsRef<Path>>(request: &CanonicalRequest, path: P) -> io::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);
        Self::write_to(request, &mut writer)
    }
}
