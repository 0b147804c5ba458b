//! OOXML package (ZIP archive) handling functionality.
//!
//! This module provides utilities for working with OOXML files as ZIP
//! archives, including reading parts by name and checking existence. Both
//! the DOCX and XLSX readers sit on top of this type; it knows nothing
//! about the markup inside the parts.

use crate::common::{Error, Result};
use std::cell::RefCell;
use std::io::{Cursor, Read, Seek};

/// An OOXML package (ZIP file containing XML parts)
#[derive(Debug)]
pub struct Package<R> {
    archive: RefCell<zip::ZipArchive<R>>,
}

impl Package<Cursor<Vec<u8>>> {
    /// Open a package from an in-memory byte buffer.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self> {
        Self::from_reader(Cursor::new(bytes))
    }
}

impl<R: Read + Seek> Package<R> {
    /// Open a package from a reader
    pub fn from_reader(reader: R) -> Result<Self> {
        let archive = zip::ZipArchive::new(reader)
            .map_err(|_| Error::Zip("invalid ZIP archive".to_string()))?;

        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Get a part from the package by path
    pub fn part(&self, path: &str) -> Result<Vec<u8>> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::Zip(format!("part not found: {}", path)))?;

        let mut content = Vec::new();
        file.read_to_end(&mut content)?;
        Ok(content)
    }

    /// Check if a part exists in the package
    pub fn has_part(&self, path: &str) -> bool {
        self.archive.borrow_mut().by_name(path).is_ok()
    }
}
