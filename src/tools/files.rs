use std::{
    ffi::OsString,
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use log::{info, warn};

use crate::compression::compress::compress;
use crate::error::{Error, Result};
use crate::token::command::Command;
use crate::token::reader::TokenReader;
use crate::tools::adapter::{format_int_list, from_byte_buffer, parse_int_list, to_byte_buffer};
use crate::tools::cli::{EbOpts, Output};
use crate::tools::rom::Rom;

/// Extension given to compressed files.
pub const EXTENSION: &str = "ebc";

/// Compress the input file defined in opts <EbOpts>.
pub fn compress_file(opts: &EbOpts) -> Result<()> {
    let raw = fs::read(&opts.file)?;
    let data = if opts.list_format {
        to_byte_buffer(&parse_int_list(&String::from_utf8_lossy(&raw))?)?
    } else {
        raw
    };
    info!("Read {} bytes from {}.", data.len(), opts.file.display());

    let packed = compress(&data)?;
    info!(
        "Compressed {} bytes into {} ({:.1}%).",
        data.len(),
        packed.len(),
        packed.len() as f64 * 100.0 / data.len() as f64
    );

    let target = opts
        .output_path
        .clone()
        .unwrap_or_else(|| with_suffix(&opts.file, EXTENSION));
    // The compressed stream is always written as raw bytes
    write_output(opts, &target, &packed)
}

/// Decompress the block at opts.offset of the file defined in opts <EbOpts>.
pub fn decompress_file(opts: &EbOpts) -> Result<()> {
    let rom = Rom::open(&opts.file)?;
    let block = rom.block_at(opts.offset, opts.capacity)?;
    info!(
        "Decompressed {} bytes from {} compressed bytes at {:#x}.",
        block.data.len(),
        block.consumed,
        opts.offset
    );

    let target = opts
        .output_path
        .clone()
        .unwrap_or_else(|| decompressed_name(&opts.file));
    if opts.list_format {
        let text = format_int_list(&from_byte_buffer(&block.data));
        write_output(opts, &target, text.as_bytes())
    } else {
        write_output(opts, &target, &block.data)
    }
}

/// Check that the block at opts.offset decodes cleanly.
pub fn test_file(opts: &EbOpts) -> Result<()> {
    let rom = Rom::open(&opts.file)?;
    let block = rom.block_at(opts.offset, opts.capacity)?;
    info!(
        "{} at {:#x}: ok, {} bytes packed into {}.",
        opts.file.display(),
        opts.offset,
        block.data.len(),
        block.consumed
    );
    Ok(())
}

/// Print the commands of the block at opts.offset, one per line.
pub fn list_file(opts: &EbOpts) -> Result<()> {
    let rom = Rom::open(&opts.file)?;
    let listing = list_commands(rom.data(), opts.offset)?;
    let stdout = io::stdout();
    stdout.lock().write_all(listing.as_bytes())?;
    Ok(())
}

/// Describe each command of the stream at `offset`: stream position, output position and
/// the command itself.
pub fn list_commands(data: &[u8], offset: usize) -> Result<String> {
    if offset >= data.len() {
        return Err(Error::OffsetOutOfRange {
            offset,
            size: data.len(),
        });
    }
    let mut listing = String::new();
    let mut tokens = TokenReader::new(data, offset).commands();
    let mut at = offset;
    let mut out_pos = 0;
    while let Some(cmd) = tokens.next() {
        let cmd = cmd?;
        let line = match cmd {
            Command::Literal(bytes) => format!("Literal x{} {:02X?}", bytes.len(), bytes),
            Command::Terminator => "Terminator".to_string(),
            other => format!("{:?}", other),
        };
        listing.push_str(&format!("{:#08x} {:#06x}  {}\n", at, out_pos, line));
        out_pos += cmd.decoded_len();
        at = tokens.position();
    }
    Ok(listing)
}

/// Send the result to stdout or to `target`, refusing to clobber an existing file unless
/// asked to.
fn write_output(opts: &EbOpts, target: &Path, bytes: &[u8]) -> Result<()> {
    match opts.output {
        Output::Stdout => {
            let stdout = io::stdout();
            stdout.lock().write_all(bytes)?;
        }
        Output::File => {
            if target.exists() {
                if !opts.force_overwrite {
                    return Err(Error::OutputExists(target.display().to_string()));
                }
                warn!("Overwriting {}", target.display());
            }
            fs::write(target, bytes)?;
            info!("Wrote {} bytes to {}.", bytes.len(), target.display());
        }
    }
    Ok(())
}

/// `name` with `.suffix` appended.
fn with_suffix(name: &Path, suffix: &str) -> PathBuf {
    let mut s = OsString::from(name.as_os_str());
    s.push(".");
    s.push(suffix);
    PathBuf::from(s)
}

/// `foo.ebc` becomes `foo`, anything else gets `.out` appended.
fn decompressed_name(name: &Path) -> PathBuf {
    if name.extension().map_or(false, |ext| ext == EXTENSION) {
        name.with_extension("")
    } else {
        with_suffix(name, "out")
    }
}
