use crate::{
    constants::DEFAULT_MERGED_HEADER_OUTPUT,
    core::vaf::{Tier, VariantType},
};
use anyhow::{anyhow, Result};
use clap::{ArgAction, Parser, Subcommand};
use env_logger::fmt::Color;
use log::{Level, LevelFilter};
use once_cell::sync::Lazy;
use std::{
    io::Write,
    path::{Path, PathBuf},
};

/// Full version string including the crate version and git description.
///
/// # Examples
/// * `0.1.0-1ba958a-dirty` - while on a dirty branch
/// * `0.1.0-1ba958a` - with a fresh commit
pub static FULL_VERSION: Lazy<String> = Lazy::new(|| match option_env!("VERGEN_GIT_DESCRIBE") {
    Some(git_describe) if !git_describe.is_empty() => {
        format!("{}-{}", env!("CARGO_PKG_VERSION"), git_describe)
    }
    _ => env!("CARGO_PKG_VERSION").to_string(),
});

#[derive(Parser, Debug)]
#[command(name="vcfx",
          author="Julia Wiggeshoff <juliawiggeshoff@gmail.com>",
          version=&**FULL_VERSION,
          about="VCF header merging and Strelka2 VAF annotation",
          long_about = None,
          help_template = "{name} {version}\n{author}{about-section}\n{usage-heading}\n    {usage}\n\n{all-args}{after-help}",
          )]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Specify multiple times to increase verbosity level (e.g., -vv for more verbosity)
    #[arg(
        short = 'v',
        long = "verbose",
        action = ArgAction::Count,
        global = true
    )]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge the header sections of multiple VCF files into one consolidated header
    MergeHeaders(MergeHeadersArgs),
    /// Annotate a Strelka2 somatic VCF with per-sample variant allele frequencies
    Vaf(VafArgs),
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::MergeHeaders(_) => "merge-headers",
            Command::Vaf(_) => "vaf",
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct MergeHeadersArgs {
    /// VCF files whose headers will be merged (plain or gzip-compressed)
    #[arg(
        long = "vcfs",
        value_name = "VCF",
        num_args = 2..,
        required = true,
        value_parser = check_file_exists
    )]
    pub vcfs: Vec<PathBuf>,

    /// Write the merged header to a file
    #[arg(
        short = 'o',
        long = "output",
        value_name = "FILE",
        default_value = DEFAULT_MERGED_HEADER_OUTPUT,
        value_parser = check_prefix_path
    )]
    pub output: String,

    /// Also keep command lines and other non-mandatory ## lines
    #[arg(long = "fullheader")]
    pub fullheader: bool,
}

#[derive(Parser, Debug, Clone)]
#[command(arg_required_else_help(true))]
pub struct VafArgs {
    /// Strelka2 somatic VCF to annotate (plain or gzip-compressed)
    #[arg(
        long = "input",
        value_name = "VCF",
        value_parser = check_file_exists
    )]
    pub input: PathBuf,

    /// Write the annotated VCF to a file
    #[arg(
        long = "output",
        value_name = "FILE",
        value_parser = check_prefix_path
    )]
    pub output: String,

    /// Type of variant called by Strelka2
    #[arg(long = "variant", value_name = "TYPE", value_enum)]
    pub variant: VariantType,

    /// Strelka2 confidence tier of the read counts used for the calculation
    #[arg(
        long = "tier",
        value_name = "TIER",
        value_enum,
        default_value_t = Tier::One
    )]
    pub tier: Tier,
}

/// Initializes the verbosity level for logging based on the command-line arguments.
///
/// Sets up the logger with a specific verbosity level that is determined
/// by the number of occurrences of the `-v` or `--verbose` flag in the command-line arguments.
///
/// # Arguments
///
/// * `args` - A reference to the parsed command-line arguments.
pub fn init_verbose(args: &Cli) {
    let filter_level: LevelFilter = match args.verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    env_logger::Builder::from_default_env()
        .format(|buf, record| {
            let level = record.level();
            let mut style = buf.style();
            match record.level() {
                Level::Error => style.set_color(Color::Red),
                Level::Warn => style.set_color(Color::Yellow),
                Level::Info => style.set_color(Color::Green),
                Level::Debug => style.set_color(Color::Blue),
                Level::Trace => style.set_color(Color::Cyan),
            };

            writeln!(
                buf,
                "{} [{}] {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                style.value(level),
                record.module_path().unwrap_or("unknown_module"),
                record.args()
            )
        })
        .filter_level(filter_level)
        .init();
}

/// Checks if the provided file path exists.
///
/// Validates that the file path provided as an argument exists in the file system.
/// It is used to ensure that the file paths provided for input files are valid before attempting to process them.
///
/// # Arguments
///
/// * `s` - A string slice representing the file path to check.
///
/// # Returns
///
/// Returns a `Result<PathBuf>` which is Ok if the file exists, or an Err with a descriptive message if not.
fn check_file_exists(s: &str) -> Result<PathBuf> {
    let path = Path::new(s);
    if !path.exists() {
        return Err(anyhow!("File does not exist: {}", path.display()));
    }
    Ok(path.to_path_buf())
}

fn check_prefix_path(s: &str) -> Result<String> {
    let path = Path::new(s);
    if let Some(parent_dir) = path.parent() {
        if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
            return Err(anyhow!("Path does not exist: {}", parent_dir.display()));
        }
    }
    Ok(s.to_string())
}
