use std::{
    fmt::{Display, Formatter},
    path::PathBuf,
};

use clap::Parser;
use log::{info, warn};

use crate::compression::decompress::MAX_OUTPUT;
use crate::tools::adapter::parse_int;

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

/// Compress, Decompress, Test, List
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Compress,
    Decompress,
    Test,
    List,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Define the two output channels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    File,
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

#[derive(Debug, Clone)]
pub struct EbOpts {
    /// Compress/Decompress/Test/List
    pub op_mode: Mode,
    /// File to read for input
    pub file: PathBuf,
    /// Explicit output file, otherwise derived from the input name
    pub output_path: Option<PathBuf>,
    /// Location where output is sent
    pub output: Output,
    /// Silently overwrite existing files with the same name
    pub force_overwrite: bool,
    /// Read and write comma separated integers instead of raw bytes
    pub list_format: bool,
    /// Where the compressed block starts within the input file
    pub offset: usize,
    /// Maximum size of a decoded block
    pub capacity: usize,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl EbOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Compress,
            file: PathBuf::new(),
            output_path: None,
            output: Output::File,
            force_overwrite: false,
            list_format: false,
            offset: 0,
            capacity: MAX_OUTPUT,
            verbose: Verbosity::Errors,
        }
    }
}

impl Default for EbOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Compress and decompress EarthBound ROM data blocks",
    long_about = "
    Packs data with the run-length / back-reference scheme used for compressed blocks in
    EarthBound ROMs, and unpacks blocks from a ROM image at a given offset.

    Compressed output is bit-exact with the tools that produced the existing game data."
)]
pub struct Cli {
    #[clap(subcommand)]
    mode: ModeArgs,

    /// Sets verbosity. -v shows warnings, -vvvv is chatty
    #[clap(short = 'v', long = "verbose", parse(from_occurrences), global = true)]
    verbose: u8,

    /// Suppress all messages
    #[clap(short = 'q', long = "quiet", global = true)]
    quiet: bool,
}

#[derive(clap::Subcommand, Debug)]
enum ModeArgs {
    /// Compress a whole file
    Compress(FileArgs),
    /// Decompress the block at an offset of a file
    Decompress(BlockArgs),
    /// Test the integrity of the block at an offset of a file
    Test(BlockArgs),
    /// List the commands of the block at an offset of a file
    List(BlockArgs),
}

#[derive(clap::Args, Debug)]
struct FileArgs {
    /// Filename of file to process
    file: PathBuf,

    /// Write the result to this file
    #[clap(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Send output to the terminal
    #[clap(short = 'c', long = "stdout")]
    stdout: bool,

    /// Force overwriting output file
    #[clap(short = 'f', long = "force")]
    force: bool,

    /// Treat uncompressed data as a text list of integers
    #[clap(short = 'l', long = "list")]
    list: bool,
}

#[derive(clap::Args, Debug)]
struct BlockArgs {
    #[clap(flatten)]
    file: FileArgs,

    /// Offset of the compressed block (decimal or 0x hex)
    #[clap(short = 'a', long = "offset", default_value = "0", parse(try_from_str = parse_offset))]
    offset: usize,

    /// Maximum decoded size (decimal or 0x hex, at most 65536)
    #[clap(long = "capacity", default_value = "65536", parse(try_from_str = parse_offset))]
    capacity: usize,
}

/// Parse a non-negative decimal or `0x` hex number.
pub fn parse_offset(text: &str) -> Result<usize, String> {
    match parse_int(text) {
        Some(value) if value >= 0 => Ok(value as usize),
        _ => Err(format!("'{}' is not a valid offset", text)),
    }
}

impl From<Cli> for EbOpts {
    fn from(cli: Cli) -> Self {
        let mut opts = EbOpts::new();

        let (file_args, block) = match cli.mode {
            ModeArgs::Compress(f) => {
                opts.op_mode = Mode::Compress;
                (f, None)
            }
            ModeArgs::Decompress(b) => {
                opts.op_mode = Mode::Decompress;
                (b.file, Some((b.offset, b.capacity)))
            }
            ModeArgs::Test(b) => {
                opts.op_mode = Mode::Test;
                (b.file, Some((b.offset, b.capacity)))
            }
            ModeArgs::List(b) => {
                opts.op_mode = Mode::List;
                (b.file, Some((b.offset, b.capacity)))
            }
        };
        if let Some((offset, capacity)) = block {
            opts.offset = offset;
            opts.capacity = capacity;
        }

        opts.file = file_args.file;
        opts.output_path = file_args.output;
        if file_args.stdout {
            opts.output = Output::Stdout
        };
        opts.force_overwrite = file_args.force;
        opts.list_format = file_args.list;

        opts.verbose = if cli.quiet {
            Verbosity::Quiet
        } else {
            match cli.verbose {
                0 => Verbosity::Errors,
                1 => Verbosity::Warnings,
                2 => Verbosity::Info,
                3 => Verbosity::Debug,
                _ => Verbosity::Trace,
            }
        };
        opts
    }
}

/// Parse the command line, set the log level and report the settings.
pub fn ebopts_init() -> EbOpts {
    let opts = EbOpts::from(Cli::parse());

    // Set the log level
    match opts.verbose {
        Verbosity::Quiet => log::set_max_level(log::LevelFilter::Off),
        Verbosity::Errors => log::set_max_level(log::LevelFilter::Error),
        Verbosity::Warnings => log::set_max_level(log::LevelFilter::Warn),
        Verbosity::Info => log::set_max_level(log::LevelFilter::Info),
        Verbosity::Debug => log::set_max_level(log::LevelFilter::Debug),
        Verbosity::Trace => log::set_max_level(log::LevelFilter::Trace),
    };

    // Below we report initialization status to the user
    info!("---- ebcomp Initialization Start ----");
    info!("Verbosity set to {}", log::max_level());
    info!("Operational mode set to {}", opts.op_mode);
    info!("Getting input from the file {}", opts.file.display());
    if opts.op_mode != Mode::Compress {
        info!("Block offset set to {:#x}", opts.offset);
        if opts.capacity != MAX_OUTPUT {
            info!("Output capacity set to {}", opts.capacity)
        };
    }
    match (&opts.output, &opts.output_path) {
        (Output::Stdout, _) => warn!("Sending output to stdout"),
        (Output::File, Some(path)) => info!("Sending output to {}", path.display()),
        (Output::File, None) => {}
    }
    if opts.force_overwrite {
        info!("Forcing file overwriting")
    };
    if opts.list_format {
        info!("Using integer list format")
    };
    info!("---- ebcomp Initialization End ----\n");
    opts
}

#[cfg(test)]
mod test {
    use super::*;

    fn parse(args: &[&str]) -> EbOpts {
        EbOpts::from(Cli::try_parse_from(args).unwrap())
    }

    #[test]
    fn compress_defaults_test() {
        let opts = parse(&["ebcomp", "compress", "town_map.bin"]);
        assert_eq!(opts.op_mode, Mode::Compress);
        assert_eq!(opts.file, PathBuf::from("town_map.bin"));
        assert_eq!(opts.output, Output::File);
        assert_eq!(opts.output_path, None);
        assert_eq!(opts.capacity, MAX_OUTPUT);
        assert_eq!(opts.verbose, Verbosity::Errors);
        assert!(!opts.force_overwrite);
    }

    #[test]
    fn decompress_flags_test() {
        let opts = parse(&[
            "ebcomp",
            "decompress",
            "-vv",
            "game.sfc",
            "--offset",
            "0x2F0C00",
            "-o",
            "out.bin",
            "-f",
            "--list",
        ]);
        assert_eq!(opts.op_mode, Mode::Decompress);
        assert_eq!(opts.offset, 0x2F0C00);
        assert_eq!(opts.output_path, Some(PathBuf::from("out.bin")));
        assert!(opts.force_overwrite);
        assert!(opts.list_format);
        assert_eq!(opts.verbose, Verbosity::Info);
    }

    #[test]
    fn quiet_wins_test() {
        let opts = parse(&["ebcomp", "-vvv", "-q", "test", "game.sfc", "-a", "1024"]);
        assert_eq!(opts.op_mode, Mode::Test);
        assert_eq!(opts.offset, 1024);
        assert_eq!(opts.verbose, Verbosity::Quiet);
    }

    #[test]
    fn bad_offset_test() {
        assert!(Cli::try_parse_from(["ebcomp", "list", "game.sfc", "--offset", "-5"]).is_err());
        assert!(Cli::try_parse_from(["ebcomp", "list", "game.sfc", "--offset", "zz"]).is_err());
        assert!(parse_offset("0x10").is_ok());
    }
}
