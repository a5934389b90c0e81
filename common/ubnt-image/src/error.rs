// Licensed under the Apache-2.0 license

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = core::result::Result<T, ImageError>;

/// Errors raised while decoding or extracting a firmware image.
///
/// Every variant is fatal to the run: a misparsed offset cannot be told
/// apart from a corrupt image, so there is no resynchronization.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("not a firmware image (bad header magic)")]
    NotAnImage,

    #[error("image stream ended inside a record or payload")]
    Truncated,

    #[error("extraction path too long: {}", .0.display())]
    PathTooLong(PathBuf),

    #[error("section {name}: CRC mismatch (recorded 0x{recorded:08x}, computed 0x{computed:08x})")]
    CrcMismatch {
        name: String,
        recorded: u32,
        computed: u32,
    },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl ImageError {
    /// Map a read-side I/O error; an early EOF means the image lied about
    /// how many bytes remain.
    pub(crate) fn from_read(err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ImageError::Truncated
        } else {
            ImageError::Io(err)
        }
    }
}
