// Licensed under the Apache-2.0 license

//! On-disk record layouts for the firmware image container.
//!
//! Every numeric field is big-endian, every record is byte-exact with no
//! alignment padding beyond the declared fields. The records derive the
//! zerocopy traits so they can be decoded straight from the byte stream.

use core::mem::size_of;

use zerocopy::byteorder::{BigEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

pub const MAGIC_LEN: usize = 4;

/// Magic tag opening a firmware image.
pub const HEADER_MAGIC: [u8; MAGIC_LEN] = *b"UBNT";

/// Magic tag separating the last section from the trailing signature.
pub const END_MAGIC: [u8; MAGIC_LEN] = *b"END.";

pub const VERSION_LEN: usize = 256;
pub const NAME_LEN: usize = 16;
const SECTION_PAD_LEN: usize = 12;

/// Image header record, immediately after [`HEADER_MAGIC`].
#[repr(C)]
#[derive(Clone, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct Header {
    /// NUL-padded firmware version text.
    pub version: [u8; VERSION_LEN],
    pub crc: U32<BigEndian>,
    pub pad: U32<BigEndian>,
}

/// Section descriptor record.
///
/// There is no separate tag byte in the stream: the first four bytes of
/// `name` double as the discriminator against [`END_MAGIC`].
#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SectionHeader {
    /// NUL-padded section name.
    pub name: [u8; NAME_LEN],
    pub pad: [u8; SECTION_PAD_LEN],
    pub memaddr: U32<BigEndian>,
    pub index: U32<BigEndian>,
    pub baseaddr: U32<BigEndian>,
    pub entryaddr: U32<BigEndian>,
    /// Payload length in bytes. Producer-controlled; the decoder treats it
    /// as an untrusted bound and never buffers a whole payload.
    pub data_size: U32<BigEndian>,
    pub part_size: U32<BigEndian>,
}

/// Per-section checksum record, after the payload bytes.
#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct SectionTrailer {
    pub crc: U32<BigEndian>,
    pub pad: U32<BigEndian>,
}

/// Terminal signature record, after [`END_MAGIC`].
#[repr(C)]
#[derive(Clone, Copy, Debug, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
pub struct Signature {
    pub crc: U32<BigEndian>,
    pub pad: U32<BigEndian>,
}

pub const HEADER_SIZE: usize = size_of::<Header>();
pub const SECTION_HEADER_SIZE: usize = size_of::<SectionHeader>();
pub const SECTION_TRAILER_SIZE: usize = size_of::<SectionTrailer>();
pub const SIGNATURE_SIZE: usize = size_of::<Signature>();

const _: () = assert!(HEADER_SIZE == 264);
const _: () = assert!(SECTION_HEADER_SIZE == 52);
const _: () = assert!(SECTION_TRAILER_SIZE == 8);
const _: () = assert!(SIGNATURE_SIZE == 8);

/// Decode a NUL-padded text field for display.
///
/// Takes the NUL-terminated prefix; ASCII alphanumerics are kept and every
/// other byte renders as `.`, so raw buffer contents are never interpreted
/// as control data.
pub fn display_text(field: &[u8]) -> String {
    text_prefix(field)
        .iter()
        .map(|&b| {
            if b.is_ascii_alphanumeric() {
                b as char
            } else {
                '.'
            }
        })
        .collect()
}

/// NUL-terminated prefix of a fixed-length text field.
pub fn text_prefix(field: &[u8]) -> &[u8] {
    let end = field.iter().position(|&b| b == 0).unwrap_or(field.len());
    &field[..end]
}

impl Header {
    /// Version text, masked for display.
    pub fn display_version(&self) -> String {
        display_text(&self.version)
    }
}

impl SectionHeader {
    /// Section name, masked for display.
    pub fn display_name(&self) -> String {
        display_text(&self.name)
    }

    /// Raw NUL-terminated name bytes, as used for extraction filenames.
    pub fn raw_name(&self) -> &[u8] {
        text_prefix(&self.name)
    }
}
