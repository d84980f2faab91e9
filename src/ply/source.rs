use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

/// A PLY byte source that can be read from the start more than once.
///
/// The decoder makes two independent passes over its input, so every pass
/// calls [`PlySource::open`] for a fresh reader.
pub trait PlySource {
    /// Opens a new reader positioned at the first byte of the file.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying storage cannot be opened.
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>>;

    /// Short description used in log output.
    fn describe(&self) -> String {
        "PLY stream".to_owned()
    }
}

impl PlySource for [u8] {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(self))
    }

    fn describe(&self) -> String {
        format!("{} in-memory bytes", self.len())
    }
}

impl PlySource for Vec<u8> {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        self.as_slice().open()
    }

    fn describe(&self) -> String {
        self.as_slice().describe()
    }
}

impl PlySource for Path {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        Ok(Box::new(BufReader::new(File::open(self)?)))
    }

    fn describe(&self) -> String {
        self.display().to_string()
    }
}

impl PlySource for PathBuf {
    fn open(&self) -> io::Result<Box<dyn BufRead + '_>> {
        self.as_path().open()
    }

    fn describe(&self) -> String {
        self.as_path().describe()
    }
}
