//! Filesystem utilities.

use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

/// A generated file that only appears at its destination once committed.
///
/// Content is written to a temporary file in the destination directory and
/// renamed into place by [`GeneratedFile::commit`]. Dropping the value
/// without committing removes the temporary file, so readers never observe
/// a partially written file.
#[derive(Debug)]
pub struct GeneratedFile {
    destination: PathBuf,
    writer: BufWriter<NamedTempFile>,
}

impl GeneratedFile {
    /// Open a generated file for `destination`.
    ///
    /// Fails if the destination directory does not exist or is not writable.
    pub fn create(destination: &Path) -> io::Result<Self> {
        let dir = match destination.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let temp = NamedTempFile::new_in(dir)?;

        Ok(GeneratedFile {
            destination: destination.to_path_buf(),
            writer: BufWriter::new(temp),
        })
    }

    /// Flush and move the file into place.
    pub fn commit(self) -> io::Result<PathBuf> {
        let temp = self.writer.into_inner().map_err(|e| e.into_error())?;
        temp.as_file().sync_all()?;
        temp.persist(&self.destination).map_err(|e| e.error)?;
        Ok(self.destination)
    }
}

impl Write for GeneratedFile {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
