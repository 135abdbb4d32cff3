//! File handle management for the file-based writers.
//!
//! A destination file is created on first open and must not already
//! exist; every later open of the same path within the run appends.
//! This keeps per-table DDL and rows in one file without ever
//! clobbering a previous export.

use std::collections::HashSet;
use std::fs::OpenOptions;
use std::io::Write;

use crate::error::{DumpError, Result};

/// Capability to obtain writable file handles.
pub trait FileOpener {
    fn open(&mut self, filename: &str) -> Result<Box<dyn Write>>;
}

/// Filesystem-backed opener with create-then-append semantics.
#[derive(Default)]
pub struct OsFileOpener {
    opened: HashSet<String>,
}

impl OsFileOpener {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FileOpener for OsFileOpener {
    fn open(&mut self, filename: &str) -> Result<Box<dyn Write>> {
        let file = if self.opened.contains(filename) {
            OpenOptions::new().append(true).open(filename)?
        } else {
            let file = OpenOptions::new()
                .write(true)
                .create_new(true)
                .open(filename)
                .map_err(|e| {
                    if e.kind() == std::io::ErrorKind::AlreadyExists {
                        DumpError::FileExists(filename.to_string())
                    } else {
                        DumpError::Io(e)
                    }
                })?;
            self.opened.insert(filename.to_string());
            file
        };
        Ok(Box::new(file))
    }
}
