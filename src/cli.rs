// Command-line front end for Oxiz85.
//
// Explicit subcommands with long-form options; text goes to stdout and
// diagnostics to stderr.

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

use crate::framed;
use crate::io::{self as z85io, DecodeStats, EncodeStats, Framing};
use crate::z85;

const BUF_SIZE: usize = 64 * 1024;

// ---------------------------------------------------------------------------
// Clap CLI definition
// ---------------------------------------------------------------------------

/// Z85 (ZeroMQ RFC 32) encoder/decoder.
#[derive(Parser, Debug)]
#[command(
    name = "oxiz85",
    version,
    about = "Z85 binary-to-text encoder/decoder",
    arg_required_else_help = true
)]
struct Cli {
    #[command(subcommand)]
    command: Cmd,

    /// Force overwrite existing output files.
    #[arg(short = 'f', long, global = true)]
    force: bool,

    /// Quiet mode (suppress non-error output).
    #[arg(short = 'q', long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Verbose mode (use multiple times for more detail).
    #[arg(short = 'v', long, global = true, action = ArgAction::Count)]
    verbose: u8,

    /// Output stats as JSON to stderr.
    #[arg(long = "json", global = true)]
    json_output: bool,
}

#[derive(Subcommand, Debug)]
enum Cmd {
    /// Encode binary input as Z85 text.
    Encode(CodecArgs),
    /// Decode Z85 text back to binary.
    Decode(CodecArgs),
    /// Print build/configuration details.
    Config,
}

#[derive(Args, Debug)]
struct CodecArgs {
    /// Use the length-framed format (accepts payloads of any length).
    #[arg(long)]
    framed: bool,

    /// Input file (default: stdin).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "input_pos")]
    input: Option<PathBuf>,

    /// Output file (default: stdout).
    #[arg(long, value_hint = ValueHint::FilePath, conflicts_with = "output_pos")]
    output: Option<PathBuf>,

    /// Write output to stdout.
    #[arg(short = 'c', long)]
    stdout: bool,

    /// Input file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    input_pos: Option<PathBuf>,

    /// Output file (positional form).
    #[arg(value_hint = ValueHint::FilePath)]
    output_pos: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved options
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Encode,
    Decode,
    Config,
}

#[derive(Debug)]
struct Options {
    command: Command,
    framing: Framing,
    use_stdout: bool,
    force: bool,
    quiet: bool,
    verbose: u8,
    input_file: Option<PathBuf>,
    output_file: Option<PathBuf>,
    json_output: bool,
}

fn resolve_options(cli: Cli) -> Options {
    let quiet = cli.quiet;
    let verbose = cli.verbose.min(2);
    let force = cli.force;
    let json_output = cli.json_output;

    let (command, args) = match cli.command {
        Cmd::Encode(args) => (Command::Encode, Some(args)),
        Cmd::Decode(args) => (Command::Decode, Some(args)),
        Cmd::Config => (Command::Config, None),
    };

    match args {
        Some(args) => Options {
            command,
            framing: if args.framed {
                Framing::Framed
            } else {
                Framing::Raw
            },
            use_stdout: args.stdout,
            force,
            quiet,
            verbose,
            input_file: args.input.or(args.input_pos),
            output_file: args.output.or(args.output_pos),
            json_output,
        },
        None => Options {
            command,
            framing: Framing::Raw,
            use_stdout: false,
            force,
            quiet,
            verbose,
            input_file: None,
            output_file: None,
            json_output,
        },
    }
}

#[cfg(any(test, feature = "fuzzing"))]
pub fn fuzz_try_parse_args(args: &[String]) {
    let argv: Vec<String> = std::iter::once("oxiz85".to_string())
        .chain(args.iter().cloned())
        .collect();
    if let Ok(cli) = Cli::try_parse_from(argv) {
        let _ = resolve_options(cli);
    }
}

fn framing_name(framing: Framing) -> &'static str {
    match framing {
        Framing::Raw => "raw",
        Framing::Framed => "framed",
    }
}

fn hex(digest: &[u8; 32]) -> String {
    digest.iter().map(|b| format!("{b:02x}")).collect()
}

// ---------------------------------------------------------------------------
// Config command
// ---------------------------------------------------------------------------

fn cmd_config() -> i32 {
    let version = env!("CARGO_PKG_VERSION");
    eprintln!("oxiz85 version {version} (Rust), Copyright (C) oxiz85 contributors");
    eprintln!("Licensed under the MIT License");

    let file_io = cfg!(feature = "file-io") as u8;
    let parallel = cfg!(feature = "parallel") as u8;

    eprintln!("FILE_IO={file_io}");
    eprintln!("PARALLEL={parallel}");
    eprintln!("Z85_ALPHABET={}", String::from_utf8_lossy(z85::ALPHABET));
    eprintln!("FRAMED_SHORT_FORM_MAX={}", framed::SHORT_FORM_MAX);
    eprintln!("FRAMED_LONG_FORM_MARKER={:#04X}", framed::LONG_FORM_MARKER);

    0
}

// ---------------------------------------------------------------------------
// I/O setup
// ---------------------------------------------------------------------------

fn open_input(opts: &Options) -> Result<Box<dyn Read>, i32> {
    match &opts.input_file {
        Some(path) => match File::open(path) {
            Ok(f) => Ok(Box::new(BufReader::with_capacity(BUF_SIZE, f))),
            Err(e) => {
                eprintln!("oxiz85: input file: {}: {e}", path.display());
                Err(1)
            }
        },
        None => Ok(Box::new(BufReader::new(io::stdin()))),
    }
}

fn open_output(opts: &Options) -> Result<Box<dyn Write>, i32> {
    let path = match &opts.output_file {
        Some(path) if !opts.use_stdout => path,
        _ => {
            return Ok(Box::new(BufWriter::with_capacity(
                BUF_SIZE,
                io::stdout().lock(),
            )));
        }
    };
    if path.exists() && !opts.force {
        eprintln!(
            "oxiz85: output file exists, use -f to overwrite: {}",
            path.display()
        );
        return Err(1);
    }
    match File::create(path) {
        Ok(f) => Ok(Box::new(BufWriter::with_capacity(BUF_SIZE, f))),
        Err(e) => {
            eprintln!("oxiz85: output file: {}: {e}", path.display());
            Err(1)
        }
    }
}

/// Close the writer and remove a partially written output file.
fn discard_output(opts: &Options, writer: Box<dyn Write>) {
    drop(writer);
    if let Some(path) = opts.output_file.as_ref().filter(|_| !opts.use_stdout)
        && let Err(e) = std::fs::remove_file(path)
    {
        log::warn!("could not remove partial output {}: {e}", path.display());
    }
}

// ---------------------------------------------------------------------------
// Encode command
// ---------------------------------------------------------------------------

fn report_encode(opts: &Options, stats: &EncodeStats) {
    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxiz85: encoder: {} input bytes, {} output chars ({})",
            stats.input_size,
            stats.output_size,
            framing_name(stats.framing)
        );
    }
    if opts.json_output {
        let json = serde_json::json!({
            "command": "encode",
            "framing": framing_name(stats.framing),
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "payload_sha256": stats.payload_sha256.as_ref().map(hex),
        });
        match serde_json::to_string_pretty(&json) {
            Ok(s) => eprintln!("{s}"),
            Err(e) => log::warn!("json stats: {e}"),
        }
    }
}

fn cmd_encode(opts: &Options) -> i32 {
    let reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let mut writer = match open_output(opts) {
        Ok(w) => w,
        Err(code) => return code,
    };

    let stats = match z85io::encode_stream(reader, &mut writer, opts.framing) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("oxiz85: encode error: {e}");
            discard_output(opts, writer);
            return 1;
        }
    };

    // Terminate the text line; decode ignores trailing whitespace.
    if let Err(e) = writer.write_all(b"\n").and_then(|()| writer.flush()) {
        eprintln!("oxiz85: write flush error: {e}");
        discard_output(opts, writer);
        return 1;
    }

    report_encode(opts, &stats);
    0
}

// ---------------------------------------------------------------------------
// Decode command
// ---------------------------------------------------------------------------

fn report_decode(opts: &Options, stats: &DecodeStats) {
    if opts.verbose > 0 && !opts.quiet {
        eprintln!(
            "oxiz85: decoder: {} input chars, {} output bytes ({})",
            stats.input_size,
            stats.output_size,
            framing_name(stats.framing)
        );
    }
    if opts.json_output {
        let json = serde_json::json!({
            "command": "decode",
            "framing": framing_name(stats.framing),
            "input_size": stats.input_size,
            "output_size": stats.output_size,
            "payload_sha256": stats.payload_sha256.as_ref().map(hex),
        });
        match serde_json::to_string_pretty(&json) {
            Ok(s) => eprintln!("{s}"),
            Err(e) => log::warn!("json stats: {e}"),
        }
    }
}

fn cmd_decode(opts: &Options) -> i32 {
    let reader = match open_input(opts) {
        Ok(r) => r,
        Err(code) => return code,
    };
    let mut writer = match open_output(opts) {
        Ok(w) => w,
        Err(code) => return code,
    };

    let stats = match z85io::decode_stream(reader, &mut writer, opts.framing) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("oxiz85: decode error: {e}");
            discard_output(opts, writer);
            return 1;
        }
    };

    if let Err(e) = writer.flush() {
        eprintln!("oxiz85: write flush error: {e}");
        discard_output(opts, writer);
        return 1;
    }

    report_decode(opts, &stats);
    0
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Main CLI entry point. Parses arguments via clap, dispatches commands.
pub fn run() -> ! {
    let cli = Cli::parse();
    let mut opts = resolve_options(cli);

    let default_filter = match (opts.quiet, opts.verbose) {
        (true, _) => "error",
        (false, 0) => "warn",
        (false, 1) => "info",
        (false, _) => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();

    // Warn if -c overrides output filename.
    if opts.use_stdout
        && !opts.quiet
        && let Some(path) = &opts.output_file
    {
        eprintln!(
            "oxiz85: warning: -c option overrides output filename: {}",
            path.display()
        );
    }
    if opts.use_stdout {
        opts.output_file = None;
    }

    let exit_code = match opts.command {
        Command::Encode => cmd_encode(&opts),
        Command::Decode => cmd_decode(&opts),
        Command::Config => cmd_config(),
    };

    process::exit(exit_code);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_opts(args: &[&str]) -> Options {
        let argv: Vec<String> = std::iter::once("oxiz85".to_string())
            .chain(args.iter().map(|s| s.to_string()))
            .collect();
        let cli = Cli::try_parse_from(argv).expect("cli parse failed");
        resolve_options(cli)
    }

    #[test]
    fn encode_subcommand_maps_correctly() {
        let opts = parse_opts(&["encode", "--framed", "in.bin", "out.z85"]);
        assert_eq!(opts.command, Command::Encode);
        assert_eq!(opts.framing, Framing::Framed);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.bin")));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.z85")));
        assert!(!opts.use_stdout);
    }

    #[test]
    fn decode_subcommand_maps_correctly() {
        let opts = parse_opts(&[
            "--quiet",
            "decode",
            "--input",
            "in.z85",
            "--output",
            "out.bin",
        ]);
        assert_eq!(opts.command, Command::Decode);
        assert_eq!(opts.framing, Framing::Raw);
        assert!(opts.quiet);
        assert_eq!(opts.input_file, Some(PathBuf::from("in.z85")));
        assert_eq!(opts.output_file, Some(PathBuf::from("out.bin")));
    }

    #[test]
    fn input_flag_conflicts_with_positional() {
        let argv = ["oxiz85", "encode", "--input", "a", "b"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn global_stdio_and_force_flags() {
        let opts = parse_opts(&["--force", "encode", "--stdout", "in", "out"]);
        assert!(opts.use_stdout);
        assert!(opts.force);
    }

    #[test]
    fn verbose_is_capped() {
        let verbose = parse_opts(&["--verbose", "--verbose", "--verbose", "encode", "in"]);
        assert_eq!(verbose.verbose, 2);
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        let argv = ["oxiz85", "-q", "-v", "encode"];
        assert!(Cli::try_parse_from(argv).is_err());
    }

    #[test]
    fn config_command_maps() {
        let opts = parse_opts(&["--json", "config"]);
        assert_eq!(opts.command, Command::Config);
        assert!(opts.json_output);
        assert!(opts.input_file.is_none());
    }

    #[test]
    fn hex_formats_digest() {
        let mut d = [0u8; 32];
        d[0] = 0xAB;
        d[31] = 0x01;
        let s = hex(&d);
        assert_eq!(s.len(), 64);
        assert!(s.starts_with("ab00"));
        assert!(s.ends_with("01"));
    }

    #[test]
    fn fuzz_parser_accepts_garbage() {
        fuzz_try_parse_args(&["--bogus".to_string()]);
        fuzz_try_parse_args(&["encode".to_string(), "--framed".to_string()]);
    }
}
