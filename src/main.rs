// MRZ scanner: replays recorded OCR frames through a scanning session
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process;

use clap::{Parser, Subcommand};
use log::{info, warn};
use serde::Deserialize;

use mrzscan::models::{gender_display_name, FrameOutcome, MrzRecord, RawFrameText};
use mrzscan::utils::ScanError;
use mrzscan::{MrzScanner, ScannerConfig};

#[derive(Parser, Debug)]
#[command(name = "mrzscan")]
#[command(version, about = "Extract ICAO 9303 MRZ records from OCR text frames", long_about = None)]
struct Cli {
    /// JSON scanner configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Consecutive matching frames required per field
    #[arg(short, long, global = true)]
    threshold: Option<usize>,

    /// Print the record as JSON instead of a report
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Replay a JSON-lines file of OCR frames until consensus is reached
    Scan {
        /// One frame per line: a text object with blocks, or an array of block strings
        frames: PathBuf,

        /// Print per-field agreement after every frame
        #[arg(short, long)]
        progress: bool,
    },

    /// Parse a single frame given as text lines, without consensus
    Parse {
        /// Text blocks of the frame, in reading order
        #[arg(required = true)]
        lines: Vec<String>,
    },
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FrameInput {
    Blocks(Vec<String>),
    Frame(RawFrameText),
}

impl FrameInput {
    fn into_frame(self) -> RawFrameText {
        match self {
            FrameInput::Blocks(blocks) => RawFrameText::from_blocks(blocks.as_slice()),
            FrameInput::Frame(frame) => frame,
        }
    }
}

fn load_config(cli: &Cli) -> Result<ScannerConfig, ScanError> {
    let config = match &cli.config {
        Some(path) => ScannerConfig::from_file(path)?,
        None => ScannerConfig::default(),
    };
    Ok(match cli.threshold {
        Some(threshold) => config.with_threshold(threshold),
        None => config,
    })
}

fn read_frames(path: &Path) -> Result<Vec<RawFrameText>, ScanError> {
    let reader = BufReader::new(File::open(path)?);
    let mut frames = Vec::new();

    for (index, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let input: FrameInput =
            serde_json::from_str(&line).map_err(|e| ScanError::FrameInputError {
                line: index + 1,
                message: e.to_string(),
            })?;
        frames.push(input.into_frame());
    }

    Ok(frames)
}

fn print_report(record: &MrzRecord) {
    let show = |value: Option<String>| value.unwrap_or_else(|| "-".to_string());

    println!("\n===============================================");
    println!("              MRZ RECORD");
    println!("===============================================\n");
    println!("  Layout: {:?} ({:?})", record.layout, record.document_format);
    println!(
        "  Document Type: {}",
        show(record.doc_type.map(|t| t.display_name().to_string()))
    );
    println!("  Issuing Country: {}", show(record.issuing_country.clone()));
    println!("  Document Number: {}", record.id_number);
    println!("  Last Names: {}", show(record.last_names.clone()));
    println!("  Given Names: {}", show(record.given_names.clone()));
    println!("  Nationality: {}", show(record.nationality.clone()));
    println!("  Date of Birth: {}", show(record.dob.map(|d| d.to_string())));
    println!(
        "  Gender: {}",
        show(record.gender.map(|g| format!("{} ({})", g, gender_display_name(g))))
    );
    println!(
        "  Date of Expiry: {}",
        show(record.doc_expiration_date.map(|d| d.to_string()))
    );
    println!(
        "  Additional Information: {}",
        show(record.additional_information.clone())
    );

    let check = |outcome: Option<bool>| match outcome {
        Some(true) => "PASSED",
        Some(false) => "FAILED",
        None => "UNREADABLE",
    };
    println!("\nCHECK DIGITS:");
    println!("  Document Number: {}", check(record.check_digits.id_number));
    println!("  Date of Birth: {}", check(record.check_digits.date_of_birth));
    println!("  Date of Expiry: {}", check(record.check_digits.date_of_expiry));
}

fn emit(record: &MrzRecord, json: bool) -> Result<(), ScanError> {
    if json {
        println!("{}", serde_json::to_string_pretty(record)?);
    } else {
        print_report(record);
    }
    Ok(())
}

fn run(cli: &Cli) -> Result<bool, ScanError> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Scan { frames, progress } => {
            let frames = read_frames(frames)?;
            let mut scanner = MrzScanner::new(config)?;
            info!("Replaying {} frames", frames.len());

            for (index, frame) in frames.iter().enumerate() {
                let outcome = scanner.scan_frame(frame);
                if *progress {
                    let fields: Vec<String> =
                        scanner.progress().iter().map(|p| p.to_string()).collect();
                    println!("frame {}: {}", index + 1, fields.join(" | "));
                }
                if let FrameOutcome::Final(record) = outcome {
                    info!("Consensus reached after {} frames", index + 1);
                    emit(&record, cli.json)?;
                    return Ok(true);
                }
            }

            warn!("Frames exhausted before consensus");
            Ok(false)
        }
        Commands::Parse { lines } => {
            let scanner = MrzScanner::new(config)?;
            match scanner.parse_lines(lines.as_slice()) {
                Ok(record) => {
                    emit(&record, cli.json)?;
                    Ok(true)
                }
                Err(rejection) => {
                    warn!("No record: {}", rejection);
                    Ok(false)
                }
            }
        }
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(err) => {
            eprintln!("Error: {}", err);
            process::exit(2);
        }
    }
}
