// Licensed under the Apache-2.0 license

//! In-memory image fixtures shared by the unit tests.

use crate::layout::{NAME_LEN, VERSION_LEN};

pub(crate) fn push_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Leading magic plus a header record.
pub(crate) fn header(version: &str, crc: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"UBNT");
    let mut text = [0u8; VERSION_LEN];
    text[..version.len()].copy_from_slice(version.as_bytes());
    buf.extend_from_slice(&text);
    push_u32(&mut buf, crc);
    push_u32(&mut buf, 0);
    buf
}

/// Descriptor, payload and checksum record for one section.
pub(crate) fn section(name: &str, index: u32, payload: &[u8], crc: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    let mut text = [0u8; NAME_LEN];
    text[..name.len()].copy_from_slice(name.as_bytes());
    buf.extend_from_slice(&text);
    buf.extend_from_slice(&[0u8; 12]);
    push_u32(&mut buf, 0x8025_0000); // memaddr
    push_u32(&mut buf, index);
    push_u32(&mut buf, 0x0004_0000); // baseaddr
    push_u32(&mut buf, 0x0004_0100); // entryaddr
    push_u32(&mut buf, payload.len() as u32);
    push_u32(&mut buf, payload.len() as u32); // part_size
    buf.extend_from_slice(payload);
    push_u32(&mut buf, crc);
    push_u32(&mut buf, 0);
    buf
}

/// End marker plus a signature record.
pub(crate) fn signature(crc: u32) -> Vec<u8> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"END.");
    push_u32(&mut buf, crc);
    push_u32(&mut buf, 0);
    buf
}
