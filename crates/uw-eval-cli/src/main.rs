//! uw-eval CLI - underwater enhancement evaluation tool

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use uw_eval::{BatchConfig, EvalDims, MetricKind};

mod commands;

/// Underwater image enhancement evaluation tool.
#[derive(Parser)]
#[command(name = "uw-eval")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Width images are resampled to before measurement
    #[arg(long, global = true, default_value_t = 320)]
    width: u32,

    /// Height images are resampled to before measurement
    #[arg(long, global = true, default_value_t = 240)]
    height: u32,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Structural similarity between ground-truth and generated images
    Ssim {
        /// Ground-truth image directory
        #[arg(long = "gtr")]
        gtr_dir: PathBuf,

        /// Generated image directory
        #[arg(long = "gen")]
        gen_dir: PathBuf,

        /// Suffix appended to the ground-truth base name to find the
        /// generated counterpart
        #[arg(long, default_value = "_En.png")]
        suffix: String,
    },

    /// Peak signal-to-noise ratio on the lightness channel
    Psnr {
        /// Ground-truth image directory
        #[arg(long = "gtr")]
        gtr_dir: PathBuf,

        /// Generated image directory
        #[arg(long = "gen")]
        gen_dir: PathBuf,

        /// Suffix appended to the ground-truth base name to find the
        /// generated counterpart
        #[arg(long, default_value = "_SESR.png")]
        suffix: String,
    },

    /// No-reference underwater quality over a single directory
    Uiqm {
        /// Directory of images to score
        dir: PathBuf,

        /// Only score file names ending with this token
        #[arg(long)]
        filter: Option<String>,
    },

    /// Run all three metrics and optionally export a report
    Report {
        /// Ground-truth image directory
        #[arg(long = "gtr")]
        gtr_dir: PathBuf,

        /// Generated image directory
        #[arg(long = "gen")]
        gen_dir: PathBuf,

        /// Suffix for SSIM counterpart lookup
        #[arg(long, default_value = "_En.png")]
        ssim_suffix: String,

        /// Suffix for PSNR counterpart lookup
        #[arg(long, default_value = "_SESR.png")]
        psnr_suffix: String,

        /// Only score file names ending with this token for UIQM
        #[arg(long)]
        uiqm_filter: Option<String>,

        /// Directory to write JSON and CSV report files into
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = BatchConfig {
        dims: EvalDims::new(cli.width, cli.height),
    };

    match cli.command {
        Commands::Ssim {
            gtr_dir,
            gen_dir,
            suffix,
        } => commands::measure::run_paired(
            &gtr_dir,
            &gen_dir,
            &suffix,
            MetricKind::Ssim,
            &config,
            cli.verbose,
        ),
        Commands::Psnr {
            gtr_dir,
            gen_dir,
            suffix,
        } => commands::measure::run_paired(
            &gtr_dir,
            &gen_dir,
            &suffix,
            MetricKind::Psnr,
            &config,
            cli.verbose,
        ),
        Commands::Uiqm { dir, filter } => {
            commands::measure::run_uiqm(&dir, filter.as_deref(), &config, cli.verbose)
        }
        Commands::Report {
            gtr_dir,
            gen_dir,
            ssim_suffix,
            psnr_suffix,
            uiqm_filter,
            output,
        } => commands::report::run(
            &gtr_dir,
            &gen_dir,
            &ssim_suffix,
            &psnr_suffix,
            uiqm_filter.as_deref(),
            output.as_deref(),
            &config,
            cli.verbose,
        ),
    }
}
