// Licensed under the Apache-2.0 license

//! Command-line driver for the firmware image decoder.

use std::fs::File;
use std::io::{self, BufReader, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ubnt_image::{Entry, Extractor, ImageReader};

mod report;

/// Inspect or unpack UBNT firmware images.
#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print image info (the default).
    #[arg(short, long, conflicts_with = "extract")]
    pub info: bool,

    /// Extract section payloads instead of printing info.
    #[arg(short = 'x', long)]
    pub extract: bool,

    /// Destination directory for extracted sections.
    #[arg(short = 'C', long, value_name = "DIR")]
    pub location: Option<PathBuf>,

    /// Verify section payload CRCs while reading.
    #[arg(short, long)]
    pub check: bool,

    /// Firmware image file.
    pub image: PathBuf,
}

/// Decode the image in the selected mode. One pass, fail-fast: the first
/// short read or write error aborts the run.
pub fn run(cli: &Cli) -> Result<()> {
    let file = File::open(&cli.image)
        .with_context(|| format!("cannot open image file {}", cli.image.display()))?;
    let mut reader = ImageReader::new(BufReader::new(file));

    // The destination directory is validated before any decoding starts,
    // whether or not this run extracts.
    let extractor = Extractor::new(cli.location.as_deref())?;

    println!("\nImage file: {}\n", cli.image.display());

    let header = reader.read_header()?;
    if !cli.extract {
        report::print_header(&header);
    }

    loop {
        match reader.next_entry()? {
            Entry::Section(section) => {
                if cli.extract {
                    let path = extractor.dest_path(section.header())?;
                    print!(
                        "Extracting {} to {}...",
                        section.header().display_name(),
                        path.display()
                    );
                    io::stdout().flush()?;
                    extractor.write(&path, section, cli.check)?;
                    println!("done");
                } else {
                    report::print_section(section.header());
                    let trailer = if cli.check {
                        section.copy_verified(&mut io::sink())?
                    } else {
                        section.skip()?
                    };
                    report::print_section_trailer(&trailer);
                }
            }
            Entry::End(signature) => {
                if !cli.extract {
                    report::print_signature(&signature);
                }
                break;
            }
        }
    }

    Ok(())
}
