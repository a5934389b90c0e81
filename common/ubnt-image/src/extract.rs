// Licensed under the Apache-2.0 license

//! Writes section payloads out to files.

use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use log::debug;

use crate::error::{ImageError, Result};
use crate::layout::{SectionHeader, SectionTrailer, NAME_LEN};
use crate::reader::Section;

/// Longest path the sink will write to. Hard bound; paths are rejected,
/// never truncated.
pub const MAX_PATH_LEN: usize = 255;

/// Room a location prefix must leave for a section filename: the name
/// field, ".bin" and a terminating NUL.
const FILENAME_RESERVE: usize = NAME_LEN + 5;

/// Extraction sink: composes output paths under an optional destination
/// directory and streams section payloads into them.
///
/// The format does not guarantee unique section names; a duplicate name
/// overwrites the earlier file (last writer wins).
pub struct Extractor {
    location: Option<PathBuf>,
}

impl Extractor {
    /// Create a sink rooted at `location`, or at the working directory if
    /// none is given.
    ///
    /// The directory must already exist and must leave room for section
    /// filenames within [`MAX_PATH_LEN`]; both are checked here, before
    /// any decoding starts.
    pub fn new(location: Option<&Path>) -> Result<Self> {
        if let Some(dir) = location {
            if dir.as_os_str().len() > MAX_PATH_LEN - FILENAME_RESERVE {
                return Err(ImageError::PathTooLong(dir.to_path_buf()));
            }
            if let Err(err) = fs::read_dir(dir) {
                return Err(ImageError::Io(io::Error::new(
                    err.kind(),
                    format!("location dir {}: {err}", dir.display()),
                )));
            }
        }
        Ok(Self {
            location: location.map(Path::to_path_buf),
        })
    }

    /// Output path for a section: `<location>/<name>.bin`.
    // TODO: sections with an empty name field all compose to ".bin".
    pub fn dest_path(&self, section: &SectionHeader) -> Result<PathBuf> {
        let mut filename = String::from_utf8_lossy(section.raw_name()).into_owned();
        filename.push_str(".bin");
        let path = match &self.location {
            Some(dir) => dir.join(filename),
            None => PathBuf::from(filename),
        };
        if path.as_os_str().len() > MAX_PATH_LEN {
            return Err(ImageError::PathTooLong(path));
        }
        Ok(path)
    }

    /// Stream one section's payload into `path`, creating or truncating
    /// the file. With `verify`, the payload CRC32 must match the recorded
    /// section checksum.
    pub fn write<R: Read>(
        &self,
        path: &Path,
        section: Section<'_, R>,
        verify: bool,
    ) -> Result<SectionTrailer> {
        let mut file = File::create(path).map_err(|err| {
            io::Error::new(err.kind(), format!("cannot create {}: {err}", path.display()))
        })?;
        debug!(
            "writing {} bytes to {}",
            section.header().data_size.get(),
            path.display()
        );
        if verify {
            section.copy_verified(&mut file)
        } else {
            let (_, trailer) = section.copy_to(&mut file)?;
            Ok(trailer)
        }
    }
}
