//! Blinkmorse CLI
//!
//! Usage:
//!   blinkmorse --input frames.jsonl          # Decode a recorded stream
//!   cat frames.txt | blinkmorse              # Decode from stdin
//!   blinkmorse --encode "SOS"                # Print a synthetic stream
//!   blinkmorse --encode "HI" | blinkmorse    # Round trip
//!   blinkmorse --input f.jsonl --json        # JSON output

use clap::Parser;
use colored::Colorize;
use log::{info, warn};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use blinkmorse::core::{decode_stream, format_sample, save_message, synthesize, MorseDecoder, SynthConfig};
use blinkmorse::types::{BlinkError, DecoderConfig, DecoderOutput, ErrorReason, FlushPolicy};
use blinkmorse::{DEFAULT_OUTPUT_FILE, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "blinkmorse",
    version = VERSION,
    about = "Blinkmorse - decode Morse code blinked with the eyes",
    long_about = "Blinkmorse turns eye-closure timing into text.\n\n\
                  Each input line is one frame: an eye openness value (EAR),\n\
                  eye landmarks, or a frame with no face. Short blinks are dots,\n\
                  long blinks are dashes, pauses end letters and words.\n\n\
                  Input lines:\n  \
                  1.25 0.31                        time, EAR\n  \
                  1.25 -                           no face\n  \
                  {\"t\":1.25,\"ear\":0.31}            JSON sample\n  \
                  {\"t\":1.25,\"width\":640,\"height\":480,\"left\":[..6],\"right\":[..6]}\n\n\
                  Thresholds (defaults):\n  \
                  blink       EAR < 0.23 is closed\n  \
                  dot/dash    closed < 0.3s is a dot\n  \
                  letter      1.2s of silence ends a letter\n  \
                  word        2.5s of silence adds a space"
)]
struct Args {
    /// Frame stream to decode ('-' or absent for stdin)
    #[arg(short, long)]
    input: Option<String>,

    /// Print a synthetic frame stream for TEXT and exit
    #[arg(short, long, value_name = "TEXT")]
    encode: Option<String>,

    /// Frame rate for --encode
    #[arg(long, default_value_t = 30.0)]
    fps: f64,

    /// JSON decoder config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// EAR below this is a closed eye
    #[arg(long)]
    blink_threshold: Option<f64>,

    /// Closed seconds separating dot from dash
    #[arg(long)]
    dot_dash: Option<f64>,

    /// Silence seconds that end a letter
    #[arg(long)]
    letter_break: Option<f64>,

    /// Silence seconds that add a word break
    #[arg(long)]
    word_break: Option<f64>,

    /// Unfinished letter at end of stream: drop or resolve
    #[arg(long)]
    flush: Option<FlushPolicy>,

    /// File the final message is saved to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_FILE)]
    output: PathBuf,

    /// Do not save the final message
    #[arg(long)]
    no_save: bool,

    /// Output as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,

    /// Show every frame, not only frames with events
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    // Diagnostics go to stderr via RUST_LOG; the CLI renders events itself
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = Args::parse();

    if args.no_color {
        colored::control::set_override(false);
    }

    let result = if let Some(ref text) = args.encode {
        run_encode(text, &args)
    } else {
        run_decode(&args)
    };

    if let Err(e) = result {
        eprintln!("{}", format!("error: {}", e).as_str().red());
        std::process::exit(1);
    }
}

/// Build the decoder config: file first, then flag overrides
fn build_config(args: &Args) -> Result<DecoderConfig, BlinkError> {
    let mut config = match args.config {
        Some(ref path) => DecoderConfig::load(path)?,
        None => DecoderConfig::default(),
    };

    if let Some(v) = args.blink_threshold {
        config.blink_threshold = v;
    }
    if let Some(v) = args.dot_dash {
        config.dot_dash_threshold = v;
    }
    if let Some(v) = args.letter_break {
        config.letter_break_secs = v;
    }
    if let Some(v) = args.word_break {
        config.word_break_secs = v;
    }
    if let Some(v) = args.flush {
        config.flush = v;
    }

    config.validate()?;
    Ok(config)
}

/// Print a synthetic stream
fn run_encode(text: &str, args: &Args) -> Result<(), BlinkError> {
    let config = SynthConfig {
        frame_rate: args.fps,
        ..SynthConfig::default()
    };
    let samples = synthesize(text, &config)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for sample in &samples {
        // Reader went away (e.g. `| head`), nothing left to do
        if writeln!(out, "{}", format_sample(sample)).is_err() {
            break;
        }
    }
    info!("Encoded {:?} as {} frames", text, samples.len());
    Ok(())
}

/// Decode a stream, print events, save the final message
fn run_decode(args: &Args) -> Result<(), BlinkError> {
    let config = build_config(args)?;
    let mut decoder = MorseDecoder::with_config(config);

    let reader: Box<dyn BufRead> = match args.input.as_deref() {
        None | Some("-") => Box::new(BufReader::new(io::stdin())),
        Some(path) => {
            let file = File::open(path).map_err(|e| {
                BlinkError::new(ErrorReason::E101_STREAM_READ, format!("{}: {}", path, e))
            })?;
            Box::new(BufReader::new(file))
        }
    };

    if !args.json {
        print_header(&config, args.no_color);
    }

    // One frame at a time, each processed to completion before the next
    let end = decode_stream(&mut decoder, reader, |output| {
        if output.has_events() || args.verbose {
            print_output(output, args);
        }
    });

    if end.output.has_events() {
        print_output(&end.output, args);
    }

    let message = decoder.message().to_string();

    if args.json {
        print_json_summary(&decoder);
    } else {
        println!();
        println!("Final Decoded Message: {}", message);
        if args.verbose {
            print_stats(&decoder, args.no_color);
        }
    }

    if !args.no_save {
        let path = save_message(&message, &args.output)?;
        if !args.json {
            println!("Message saved to {}", path.display());
        }
    }

    // A stream that broke off still fails the run, after the message is kept
    match end.error {
        Some(e) => Err(e),
        None => Ok(()),
    }
}

/// Print header
fn print_header(config: &DecoderConfig, no_color: bool) {
    let title = format!("Blinkmorse v{}", VERSION);
    let thresholds = format!(
        "blink<{:.2} | dot<{:.2}s | letter>{:.1}s | word>{:.1}s | flush={:?}",
        config.blink_threshold,
        config.dot_dash_threshold,
        config.letter_break_secs,
        config.word_break_secs,
        config.flush,
    );
    if no_color {
        println!("========================================");
        println!("  {}", title);
        println!("  {}", thresholds);
        println!("========================================");
    } else {
        println!("{}", title.as_str().bold());
        println!("{}", thresholds.as_str().bright_black());
    }
    println!();
}

/// Print one decoder step
fn print_output(output: &DecoderOutput, args: &Args) {
    if args.json {
        match serde_json::to_string(output) {
            Ok(json) => println!("{}", json),
            Err(e) => warn!("Could not serialize output: {}", e),
        }
    } else if args.no_color {
        println!("{}", output.to_parseable_string());
    } else {
        println!("{}", output.to_terminal_string());
        if output.message_changed() {
            println!("  Message: {}", output.message.as_str().green());
        }
    }
}

/// Print final JSON summary
fn print_json_summary(decoder: &MorseDecoder) {
    #[derive(serde::Serialize)]
    struct Summary<'a> {
        message: &'a str,
        stats: blinkmorse::core::DecoderStats,
        config: &'a DecoderConfig,
    }

    let summary = Summary {
        message: decoder.message(),
        stats: decoder.stats(),
        config: decoder.config(),
    };
    match serde_json::to_string(&summary) {
        Ok(json) => println!("{}", json),
        Err(e) => warn!("Could not serialize summary: {}", e),
    }
}

/// Print decoder counters
fn print_stats(decoder: &MorseDecoder, no_color: bool) {
    let stats = decoder.stats();
    let line = format!(
        "samples={} skipped={} dots={} dashes={} letters={} rejected={} spaces={}",
        stats.samples,
        stats.skipped_frames,
        stats.dots,
        stats.dashes,
        stats.letters,
        stats.rejected,
        stats.word_breaks,
    );
    if no_color {
        println!("{}", line);
    } else {
        println!("{}", line.as_str().bright_black());
    }
}
