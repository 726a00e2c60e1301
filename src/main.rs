//! simdsplit - Fast SIMD string splitter
//!
//! Splits a file (or a built-in demo string) on a set of delimiter bytes and
//! prints one token per line.

use clap::Parser;
use simdsplit::{get_corpus, PaddedBuffer, SplitError, Splitter, StrPiece, SPLIT_PADDING};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

const DEMO_INPUT: &[u8] = b"this,is,a,string,separated,,,,,,by*stars*and,commas";

#[derive(Parser, Debug)]
#[command(name = "simdsplit")]
#[command(about = "Split a file on delimiter bytes using SIMD", long_about = None)]
struct Args {
    /// File to split; splits a built-in demo string when omitted
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,

    /// Delimiter bytes (escapes: \n \t \r \0 \\ \xHH)
    #[arg(short = 'D', long, default_value = ",*", value_parser = parse_delimiters)]
    delimiters: DelimiterArg,

    /// Print empty tokens too
    #[arg(short, long)]
    keep_empty: bool,

    /// Print each token with its byte range
    #[arg(short, long)]
    dump: bool,

    /// Number of iterations for benchmarking (0 prints tokens instead)
    #[arg(short, long, default_value = "0")]
    iterations: usize,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

/// Raw delimiter bytes parsed from the command line
#[derive(Clone, Debug, PartialEq, Eq)]
struct DelimiterArg(Vec<u8>);

/// Parse a delimiter argument into raw bytes
///
/// Only ASCII is accepted: every delimiter is a single byte.
fn parse_delimiters(arg: &str) -> Result<DelimiterArg, String> {
    let mut bytes = Vec::with_capacity(arg.len());
    let mut chars = arg.chars();

    while let Some(c) = chars.next() {
        let byte = match c {
            '\\' => match chars.next() {
                Some('n') => b'\n',
                Some('t') => b'\t',
                Some('r') => b'\r',
                Some('0') => b'\0',
                Some('\\') => b'\\',
                Some('x') => {
                    let hex: String = chars.by_ref().take(2).collect();
                    if hex.len() != 2 {
                        return Err(format!("incomplete escape \\x{}", hex));
                    }
                    u8::from_str_radix(&hex, 16)
                        .map_err(|_| format!("invalid hex escape \\x{}", hex))?
                }
                Some(other) => return Err(format!("unknown escape \\{}", other)),
                None => return Err("trailing backslash".to_string()),
            },
            c if c.is_ascii() => c as u8,
            c => return Err(format!("delimiter '{}' is not a single byte", c)),
        };
        bytes.push(byte);
    }

    if bytes.is_empty() {
        return Err("at least one delimiter is required".to_string());
    }
    Ok(DelimiterArg(bytes))
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "simdsplit=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_level(true),
        )
        .with(filter)
        .init();
}

fn load_input(args: &Args) -> Result<PaddedBuffer, SplitError> {
    match &args.file {
        Some(path) => {
            tracing::info!(path = %path.display(), "loading");
            get_corpus(path, SPLIT_PADDING)
        }
        None => {
            tracing::info!("no file given, splitting the demo string");
            PaddedBuffer::from_bytes(DEMO_INPUT, SPLIT_PADDING)
        }
    }
}

fn write_tokens(pieces: &[StrPiece<'_>], args: &Args) -> std::io::Result<()> {
    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    for piece in pieces {
        if piece.is_empty() && !args.keep_empty {
            continue;
        }
        if args.dump {
            write!(out, "{}..{}: ", piece.start(), piece.end())?;
        }
        out.write_all(piece.as_bytes())?;
        out.write_all(b"\n")?;
    }

    out.flush()
}

fn benchmark(splitter: &Splitter, buffer: &PaddedBuffer, iterations: usize) {
    let mut total_time = 0.0;

    for _ in 0..iterations {
        let start = Instant::now();
        let pieces = splitter.split_padded(std::hint::black_box(buffer));
        total_time += start.elapsed().as_secs_f64();
        std::hint::black_box(pieces);
    }

    let volume = iterations as f64 * buffer.len() as f64;
    tracing::debug!(total_time, iterations, "benchmark finished");

    println!("Total time in (s)          = {:.6}", total_time);
    println!("Number of iterations       = {}", iterations);
    if total_time > 0.0 {
        let gb_per_s = volume / total_time / (1024.0 * 1024.0 * 1024.0);
        println!(" GB/s: {:.5}", gb_per_s);
    }
}

fn run(args: &Args) -> Result<(), SplitError> {
    let splitter = Splitter::new(&args.delimiters.0)?;
    let buffer = load_input(args)?;

    tracing::debug!(bytes = buffer.len(), delimiters = ?args.delimiters.0, "input ready");

    let pieces = splitter.split_padded(&buffer);
    tracing::info!(tokens = pieces.len(), "split complete");
    if !pieces.is_empty() {
        tracing::debug!(
            bytes_per_token = buffer.len() as f64 / pieces.len() as f64,
            "token density"
        );
    }

    if args.iterations > 0 {
        benchmark(&splitter, &buffer, args.iterations);
    } else {
        write_tokens(&pieces, args)?;
    }

    Ok(())
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("simdsplit: {}", e);
        std::process::exit(1);
    }
}
