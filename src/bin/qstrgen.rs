//! CLI entry point: reads qstr intermediate files and an optional
//! translation catalog, writes the generated main header to stdout and the
//! companion decode-table header to a file (SPEC_FULL.md §6). CLI shape and
//! logging setup are grounded on `zune-bin`'s `cmd_args.rs`/`main.rs`.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, LevelFilter};

use qstr_compress::error::GeneratorError;
use qstr_compress::generator::generate;

#[derive(Parser, Debug)]
#[command(name = "qstrgen", about = "Generate compressed qstr and translation headers")]
struct Cli {
    /// Preprocessed qstr intermediate files.
    #[arg(required = true)]
    infiles: Vec<PathBuf>,

    /// GNU MO translation catalog. When omitted, only the qstr enumeration
    /// header is produced.
    #[arg(long)]
    translation: Option<PathBuf>,

    /// Where to write the companion decompression-table header. Required
    /// when `--translation` is given.
    #[arg(long = "compression-filename")]
    compression_filename: Option<PathBuf>,

    /// Increase log verbosity (repeatable: warn -> info -> debug -> trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logger(verbosity: u8) {
    let level = match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    simple_logger::SimpleLogger::new().with_level(level).init().expect("logger already initialized");
}

fn run(cli: &Cli) -> Result<(), GeneratorError> {
    if cli.translation.is_some() && cli.compression_filename.is_none() {
        return Err(GeneratorError::MissingCompressionFilename);
    }

    let output = generate(&cli.infiles, cli.translation.as_deref())?;
    print!("{}", output.main_header);

    if let (Some(path), Some(companion)) = (&cli.compression_filename, &output.companion_header) {
        std::fs::write(path, companion)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logger(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
