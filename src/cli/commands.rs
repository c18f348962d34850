//! CLI command definitions and execution

use std::fs;
use std::path::{Path, PathBuf};

use clap::Subcommand;

use crate::header::ApHeader;

#[derive(Subcommand)]
pub enum Commands {
    /// Decompress an aPLib-packed file
    Unpack {
        /// Source packed file
        #[arg(short, long)]
        source: PathBuf,

        /// Destination file for the decompressed data
        #[arg(short, long)]
        destination: PathBuf,

        /// Keep going on corrupt input and write whatever decoded cleanly
        #[arg(long)]
        lenient: bool,

        /// Suppress the summary line
        #[arg(short, long)]
        quiet: bool,
    },

    /// Show AP32 container header details for a packed file
    Info {
        /// Source packed file
        #[arg(short, long)]
        source: PathBuf,
    },
}

impl Commands {
    /// Execute the selected command.
    ///
    /// # Errors
    /// Returns an error if the underlying operation fails.
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Unpack {
                source,
                destination,
                lenient,
                quiet,
            } => unpack(source, destination, *lenient, *quiet),
            Commands::Info { source } => info(source),
        }
    }
}

fn unpack(source: &Path, destination: &Path, lenient: bool, quiet: bool) -> anyhow::Result<()> {
    let data = fs::read(source)?;
    let output = if lenient {
        crate::decompress_lenient(&data)
    } else {
        crate::decompress(&data)?
    };
    fs::write(destination, &output)?;

    if !quiet {
        println!(
            "{} -> {} ({} -> {} bytes)",
            source.display(),
            destination.display(),
            data.len(),
            output.len()
        );
    }
    Ok(())
}

fn info(source: &Path) -> anyhow::Result<()> {
    let data = fs::read(source)?;
    match ApHeader::detect(&data) {
        Some(header) => {
            println!("AP32 container");
            println!("  header size:  {}", header.header_size);
            println!("  packed size:  {}", header.packed_size);
            println!("  packed crc32: {:#010x}", header.packed_crc32);
            println!("  orig size:    {}", header.orig_size);
            println!("  orig crc32:   {:#010x}", header.orig_crc32);
        }
        None => println!("raw aPLib stream (no AP32 header)"),
    }
    Ok(())
}
