//! Command-line interface
//!
//! Usage:
//!   nozzlecal interlocked --tools 1,2,3,4,5 --reference 2 [-o out.gcode]
//!   nozzlecal interlocked --tools 2,2,2 --reference 2 --x-offsets 0,-0.05,0.05
//!   nozzlecal meander --tool 1 [--direction +y]
//!   nozzlecal init-config [path]

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use nozzlecal_core::CommandStream;
use nozzlecal_settings::{default_config_path, Config};
use nozzlecal_toolpath::{CalibrationPrint, Direction};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::info;

/// Calibration G-code for multi-nozzle offset measurement
#[derive(Parser, Debug)]
#[command(name = "nozzlecal")]
#[command(author, about, long_about = None)]
#[command(version = concat!(env!("CARGO_PKG_VERSION"), " (built ", env!("BUILD_DATE"), ")"))]
pub struct Cli {
    /// Configuration file (.json or .toml); defaults to the user config file if present
    #[arg(short, long, global = true, value_name = "CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate the interlocked comb calibration print
    Interlocked(InterlockedArgs),

    /// Generate a single meander print
    Meander(MeanderArgs),

    /// Write the default configuration to a file
    InitConfig {
        /// Target file (.json or .toml); defaults to the user config file
        #[arg(value_name = "PATH")]
        path: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
pub struct InterlockedArgs {
    /// Tool numbers, one per slot (comma separated)
    #[arg(long, value_delimiter = ',', required = true)]
    pub tools: Vec<u32>,

    /// Tool that prints the framing square and the reference combs
    #[arg(long)]
    pub reference: u32,

    /// X offset per slot (comma separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub x_offsets: Vec<f64>,

    /// Y offset per slot (comma separated)
    #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
    pub y_offsets: Vec<f64>,

    /// Output G-code file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct MeanderArgs {
    /// Tool number
    #[arg(long, default_value_t = 1)]
    pub tool: u32,

    /// Travel direction (+x, -x, +y, -y)
    #[arg(long, default_value = "+y", allow_hyphen_values = true)]
    pub direction: Direction,

    /// Output G-code file
    #[arg(short, long, value_name = "OUTPUT")]
    pub output: Option<PathBuf>,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Interlocked(args) => {
            let mut config = Config::load_or_default(cli.config.as_deref())
                .context("Failed to load configuration")?;
            config
                .printer
                .apply_offsets(&args.x_offsets, &args.y_offsets)?;

            let print = CalibrationPrint::new(config.printer, config.pattern)?;
            let stream = print.full_interlocked_print(&args.tools, args.reference)?;
            let path = args
                .output
                .unwrap_or_else(|| config.output.interlocked_path());
            write_stream(&stream, &path)
        }
        Commands::Meander(args) => {
            let config = Config::load_or_default(cli.config.as_deref())
                .context("Failed to load configuration")?;

            let print = CalibrationPrint::new(config.printer, config.pattern)?;
            let stream = print.meander_print(args.tool, args.direction)?;
            let path = args.output.unwrap_or_else(|| config.output.meander_path());
            write_stream(&stream, &path)
        }
        Commands::InitConfig { path } => {
            let path = match path {
                Some(path) => path,
                None => default_config_path()?,
            };
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            Config::default()
                .save_to_file(&path)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!(path = %path.display(), "default configuration written");
            Ok(())
        }
    }
}

/// Write a command stream as G-code text
pub fn write_stream(stream: &CommandStream, path: &Path) -> Result<()> {
    let file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    stream
        .write_to(BufWriter::new(file))
        .with_context(|| format!("Failed to write {}", path.display()))?;
    info!(path = %path.display(), lines = stream.len(), "G-code written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_args(args: &[&str]) -> Result<()> {
        run(Cli::try_parse_from(args)?)
    }

    #[test]
    fn test_interlocked_command_writes_gcode() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("interlocked.gcode");

        run_args(&[
            "nozzlecal",
            "interlocked",
            "--tools",
            "1,2,3",
            "--reference",
            "2",
            "--x-offsets",
            "0,-0.05,0.05",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let gcode = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = gcode.lines().collect();
        assert_eq!(lines[0], "G10 P1 R175 S200");
        assert!(lines.contains(&"T3"));
        assert!(lines.contains(&";print horizontal interlocked signal pattern 2"));
        assert_eq!(lines.last(), Some(&"M0 H1"));
    }

    #[test]
    fn test_meander_command_with_config() {
        let dir = TempDir::new().unwrap();
        let config_path = dir.path().join("config.toml");
        let output = dir.path().join("meander.gcode");

        let mut config = Config::default();
        config.pattern.width = 40.0;
        config.pattern.length = 10.0;
        config.printer.rotation_degrees = 0.0;
        config.save_to_file(&config_path).unwrap();

        run_args(&[
            "nozzlecal",
            "--config",
            config_path.to_str().unwrap(),
            "meander",
            "--tool",
            "1",
            "--direction",
            "-x",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap();

        let gcode = std::fs::read_to_string(&output).unwrap();
        assert!(gcode.contains("G1 E15.0000 F1800\n"));
        // -x meander spans x [-5, 5], y [-20, 20]; priming spot 10 mm behind its start
        assert!(gcode.contains("G1 X15.000 Y-20.000 F1800\n"));
        assert!(gcode.contains("G1 X5.000 Y-20.000 F1800\n"));
    }

    #[test]
    fn test_unknown_tool_is_reported() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().join("never.gcode");

        let err = run_args(&[
            "nozzlecal",
            "interlocked",
            "--tools",
            "1,8",
            "--reference",
            "1",
            "-o",
            output.to_str().unwrap(),
        ])
        .unwrap_err();

        assert!(err.to_string().contains("Unknown tool 8"));
        assert!(!output.exists());
    }

    #[test]
    fn test_invalid_direction_is_rejected() {
        assert!(Cli::try_parse_from(["nozzlecal", "meander", "--direction", "+z"]).is_err());
    }

    #[test]
    fn test_init_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.json");

        run_args(&["nozzlecal", "init-config", path.to_str().unwrap()]).unwrap();

        assert_eq!(Config::load_from_file(&path).unwrap(), Config::default());
    }
}
