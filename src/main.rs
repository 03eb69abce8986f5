//! crashlens - classify crash logs from the command line
//!
//! This is the binary entry point. All logic lives in the library.

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use crashlens::config::{
    init_config_dir, load_settings, OutputFormat, CONFIG_FILENAME, CRASHLENS_DIR,
};
use crashlens::{
    detect_command, example_command, parse_command, platforms_command, read_input,
    report_usage_error, Outcome, ParseOptions,
};
use crashlens_core::prelude::debug;
use crashlens_core::{logging, PlatformSelector, PlatformTag};

/// crashlens - classify crash logs from the command line
#[derive(Parser, Debug)]
#[command(name = "crashlens")]
#[command(version, about = "Classify React Native, Android, iOS, and Flutter crash logs", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Classify every line of a crash log
    Parse {
        /// Log file to read ("-" or omitted reads stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Platform id, or "auto" to detect it
        #[arg(short, long, value_name = "PLATFORM")]
        platform: Option<PlatformSelector>,

        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,

        /// Write the result to this file instead of stdout
        #[arg(short, long, value_name = "PATH", conflicts_with = "export")]
        output: Option<PathBuf>,

        /// Write the result into this directory under a generated name
        #[arg(long, value_name = "DIR")]
        export: Option<PathBuf>,

        /// Remove ANSI colour codes before parsing
        #[arg(long)]
        strip_ansi: bool,

        /// Hide file:line:col details under frames (text format)
        #[arg(long)]
        no_locations: bool,
    },

    /// Print the detected platform id of a crash log
    Detect {
        /// Log file to read ("-" or omitted reads stdin)
        #[arg(value_name = "FILE")]
        file: Option<PathBuf>,

        /// Remove ANSI colour codes before detecting
        #[arg(long)]
        strip_ansi: bool,
    },

    /// List supported platforms
    Platforms,

    /// Print an example log for a platform
    Example {
        #[arg(value_name = "PLATFORM")]
        platform: PlatformTag,
    },

    /// Write a default .crashlens/config.toml
    Init {
        /// Project directory (defaults to the current directory)
        #[arg(value_name = "DIR")]
        path: Option<PathBuf>,
    },
}

fn main() -> color_eyre::Result<()> {
    let args = Args::parse();

    color_eyre::install()?;

    // Logging is best effort
    if let Err(e) = logging::init() {
        eprintln!("warning: logging disabled: {e}");
    }

    let mut stdout = std::io::stdout().lock();
    let mut stderr = std::io::stderr().lock();

    let outcome = match run_command(args.command, &mut stdout, &mut stderr) {
        Ok(outcome) => outcome,
        Err(e) => report_usage_error(e, &mut stderr)?,
    };

    stdout.flush()?;
    if outcome != Outcome::Success {
        std::process::exit(outcome.exit_code());
    }
    Ok(())
}

fn run_command(
    command: Command,
    out: &mut impl Write,
    err: &mut impl Write,
) -> crashlens_core::Result<Outcome> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));

    match command {
        Command::Parse {
            file,
            platform,
            format,
            output,
            export,
            strip_ansi,
            no_locations,
        } => {
            let settings = load_settings(&cwd);
            let selector = match platform {
                Some(selector) => selector,
                None => settings.input.selector()?,
            };
            let options = ParseOptions {
                selector,
                format: format.unwrap_or(settings.output.format),
                strip_ansi: strip_ansi || settings.input.strip_ansi,
                show_locations: !no_locations && settings.output.show_locations,
                output,
                export_dir: export.or_else(|| settings.output.export_dir()),
            };
            debug!(?options, "parse options");

            let raw = read_input(file.as_deref())?;
            parse_command(&raw, &options, out, err)
        }

        Command::Detect { file, strip_ansi } => {
            let raw = read_input(file.as_deref())?;
            detect_command(&raw, strip_ansi, out, err)
        }

        Command::Platforms => {
            platforms_command(out)?;
            Ok(Outcome::Success)
        }

        Command::Example { platform } => {
            example_command(platform, out)?;
            Ok(Outcome::Success)
        }

        Command::Init { path } => {
            let dir = path.unwrap_or(cwd);
            let config_dir = dir.join(CRASHLENS_DIR);
            if init_config_dir(&dir)? {
                writeln!(err, "✅ Created {}", config_dir.join(CONFIG_FILENAME).display())?;
            } else {
                writeln!(err, "Config already exists in {}", config_dir.display())?;
            }
            Ok(Outcome::Success)
        }
    }
}
