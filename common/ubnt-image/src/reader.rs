// Licensed under the Apache-2.0 license

//! Sequential decoder for the firmware image stream.
//!
//! One forward pass: the leading magic and header record, then a loop of
//! 4-byte tags. A tag equal to the end marker is followed by the signature
//! record and terminates the stream; any other tag is the first four bytes
//! of the next section's name field and is not re-read.

use std::io::{self, Read, Write};

use crc32fast::Hasher;
use log::{debug, warn};
use zerocopy::transmute;

use crate::error::{ImageError, Result};
use crate::layout::{
    Header, SectionHeader, SectionTrailer, Signature, END_MAGIC, HEADER_MAGIC, HEADER_SIZE,
    MAGIC_LEN, SECTION_HEADER_SIZE, SECTION_TRAILER_SIZE, SIGNATURE_SIZE,
};

/// Granularity of payload moves. `data_size` comes from the image itself,
/// so payloads go through this fixed buffer instead of one allocation.
const COPY_CHUNK: usize = 8 * 1024;

/// Forward-only reader over a firmware image byte stream.
pub struct ImageReader<R> {
    src: R,
    offset: u64,
}

/// One structural element of the section stream.
pub enum Entry<'a, R> {
    /// A section, positioned at the start of its payload.
    Section(Section<'a, R>),
    /// The end marker and its signature record; the stream is complete.
    End(Signature),
}

impl<R: Read> ImageReader<R> {
    pub fn new(src: R) -> Self {
        Self { src, offset: 0 }
    }

    /// Bytes consumed so far.
    pub fn offset(&self) -> u64 {
        self.offset
    }

    /// Read the leading magic and the header record.
    ///
    /// A magic mismatch fails with [`ImageError::NotAnImage`] before
    /// anything else is read.
    pub fn read_header(&mut self) -> Result<Header> {
        let mut magic = [0u8; MAGIC_LEN];
        self.read_exact(&mut magic)?;
        if magic != HEADER_MAGIC {
            return Err(ImageError::NotAnImage);
        }
        let mut buf = [0u8; HEADER_SIZE];
        self.read_exact(&mut buf)?;
        Ok(transmute!(buf))
    }

    /// Advance to the next structural element: another section, or the end
    /// marker with its signature.
    ///
    /// A well-formed stream only ever terminates through the end marker;
    /// running out of bytes here is [`ImageError::Truncated`].
    pub fn next_entry(&mut self) -> Result<Entry<'_, R>> {
        let start = self.offset;
        let mut tag = [0u8; MAGIC_LEN];
        self.read_exact(&mut tag)?;
        if tag == END_MAGIC {
            let mut buf = [0u8; SIGNATURE_SIZE];
            self.read_exact(&mut buf)?;
            debug!("end marker at offset {start:#x}");
            return Ok(Entry::End(transmute!(buf)));
        }
        // Not a marker: these four bytes are the start of the name field.
        let mut buf = [0u8; SECTION_HEADER_SIZE];
        buf[..MAGIC_LEN].copy_from_slice(&tag);
        self.read_exact(&mut buf[MAGIC_LEN..])?;
        let header: SectionHeader = transmute!(buf);
        debug!(
            "section {} at offset {start:#x}, {} payload bytes",
            header.display_name(),
            header.data_size.get()
        );
        Ok(Entry::Section(Section {
            header,
            reader: self,
        }))
    }

    fn read_exact(&mut self, buf: &mut [u8]) -> Result<()> {
        self.src.read_exact(buf).map_err(ImageError::from_read)?;
        self.offset += buf.len() as u64;
        Ok(())
    }

    fn read_trailer(&mut self) -> Result<SectionTrailer> {
        let mut buf = [0u8; SECTION_TRAILER_SIZE];
        self.read_exact(&mut buf)?;
        Ok(transmute!(buf))
    }

    /// Move `len` payload bytes into `dst` in bounded chunks, returning
    /// the CRC32 of the copied bytes.
    fn copy_payload<W: Write + ?Sized>(&mut self, len: u64, dst: &mut W) -> Result<u32> {
        let mut hasher = Hasher::new();
        let mut chunk = [0u8; COPY_CHUNK];
        let mut remaining = len;
        while remaining > 0 {
            let want = remaining.min(COPY_CHUNK as u64) as usize;
            self.read_exact(&mut chunk[..want])?;
            hasher.update(&chunk[..want]);
            dst.write_all(&chunk[..want])?;
            remaining -= want as u64;
        }
        Ok(hasher.finalize())
    }
}

/// A section whose payload has not been consumed yet.
///
/// Exactly one of [`skip`](Section::skip), [`copy_to`](Section::copy_to)
/// or [`copy_verified`](Section::copy_verified) must be called; each
/// drains the payload, then reads and returns the per-section checksum
/// record, leaving the reader at the next tag.
pub struct Section<'a, R> {
    header: SectionHeader,
    reader: &'a mut ImageReader<R>,
}

impl<R: Read> Section<'_, R> {
    pub fn header(&self) -> &SectionHeader {
        &self.header
    }

    /// Discard the payload without keeping it anywhere.
    pub fn skip(self) -> Result<SectionTrailer> {
        let len = u64::from(self.header.data_size.get());
        self.reader.copy_payload(len, &mut io::sink())?;
        self.reader.read_trailer()
    }

    /// Stream the payload into `dst`.
    ///
    /// Returns the CRC32 of the copied bytes alongside the recorded
    /// checksum record; the caller decides whether to compare them.
    pub fn copy_to<W: Write + ?Sized>(self, dst: &mut W) -> Result<(u32, SectionTrailer)> {
        let len = u64::from(self.header.data_size.get());
        let crc = self.reader.copy_payload(len, dst)?;
        let trailer = self.reader.read_trailer()?;
        Ok((crc, trailer))
    }

    /// Stream the payload into `dst` and require its CRC32 to match the
    /// recorded section checksum.
    pub fn copy_verified<W: Write + ?Sized>(self, dst: &mut W) -> Result<SectionTrailer> {
        let name = self.header.display_name();
        let (computed, trailer) = self.copy_to(dst)?;
        let recorded = trailer.crc.get();
        if computed != recorded {
            warn!(
                "section {name}: payload CRC 0x{computed:08x} does not match recorded 0x{recorded:08x}"
            );
            return Err(ImageError::CrcMismatch {
                name,
                recorded,
                computed,
            });
        }
        Ok(trailer)
    }
}
