// Licensed under the Apache-2.0 license

//! Human-readable info-mode output.
//!
//! The field labels, `0x{:08x}` checksum formatting and the two-step KB/MB
//! conversion are load-bearing: existing scripts scrape this output.

use ubnt_image::{Header, SectionHeader, SectionTrailer, Signature};

/// Integer-truncated KiB.
fn to_kb(bytes: u32) -> f32 {
    (bytes / 1024) as f32
}

/// MiB derived from the truncated KiB value, not from the byte count:
/// 1536 bytes reports KB = 1.0 and MB = 0.0.
fn to_mb(bytes: u32) -> f32 {
    (bytes / 1024) as f32 / 1024.0
}

fn size_line(label: &str, bytes: u32) -> String {
    format!(
        "{label}: {bytes} bytes (KB = {:.1}) (MB = {:.1})",
        to_kb(bytes),
        to_mb(bytes)
    )
}

pub(crate) fn print_header(header: &Header) {
    println!("Version: {}", header.display_version());
    println!("Header CRC: 0x{:08x}", header.crc.get());
    println!();
}

pub(crate) fn print_section(section: &SectionHeader) {
    println!("section: {}", section.display_name());
    println!("Mem addr: 0x{:08x}", section.memaddr.get());
    println!("Index: 0x{:08x}", section.index.get());
    println!("Base addr: 0x{:08x}", section.baseaddr.get());
    println!("Entry addr: 0x{:08x}", section.entryaddr.get());
    println!("{}", size_line("Data size", section.data_size.get()));
    println!("{}", size_line("Part size", section.part_size.get()));
}

pub(crate) fn print_section_trailer(trailer: &SectionTrailer) {
    println!("Section CRC: 0x{:08x}", trailer.crc.get());
    println!();
}

pub(crate) fn print_signature(signature: &Signature) {
    println!("Sign CRC: 0x{:08x}", signature.crc.get());
    println!();
}
