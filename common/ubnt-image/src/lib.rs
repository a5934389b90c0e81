// Licensed under the Apache-2.0 license

//! Decoder for the UBNT firmware image container format.
//!
//! An image is the `"UBNT"` magic, one fixed-size header record, zero or
//! more sections (descriptor, payload, checksum record), and a trailing
//! signature record behind the `"END."` marker. All numeric fields are
//! big-endian. There is no up-front directory of offsets: sections are
//! discovered by a single forward scan, and payloads are streamed in
//! bounded chunks rather than buffered whole.
//!
//! Checksums are decoded and surfaced but not verified by default; see
//! [`Section::copy_verified`] for the opt-in check.

pub mod error;
pub mod extract;
pub mod layout;
pub mod reader;
#[cfg(test)]
pub(crate) mod testutil;

pub use error::{ImageError, Result};
pub use extract::{Extractor, MAX_PATH_LEN};
pub use layout::{Header, SectionHeader, SectionTrailer, Signature};
pub use reader::{Entry, ImageReader, Section};
