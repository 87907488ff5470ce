use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_scalers::{list_algorithms, possible_targets, ScaleRange, TargetSet};
use pixscale::models::{parse_candidates, AppConfig};
use pixscale::services::{FitRequest, ScaleRequest, ScaleService};

#[derive(Parser)]
#[command(name = "pixscale")]
#[command(about = "Pixscale - pixel-art and photo scaling for PNG images")]
struct Cli {
    /// Configuration file (defaults to $CONFIG_FILE when set)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scale a PNG with one algorithm and scale factor
    Scale {
        /// Input PNG file
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG file
        #[arg(short, long)]
        output: PathBuf,

        /// Algorithm name (see `pixscale list`)
        #[arg(short, long)]
        algorithm: Option<String>,

        /// Scale factor, e.g. "2x", "3x2", "0.5" or "1.5x2"
        #[arg(short, long)]
        scale: Option<String>,

        /// "fast" or "accurate"
        #[arg(short, long)]
        quality: Option<String>,

        /// Explicit color pipeline, e.g. "linear-rgba"
        #[arg(short, long)]
        pipeline: Option<String>,
    },
    /// Scale a PNG as close as possible to a target size
    Fit {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: PathBuf,

        /// Target width
        #[arg(long)]
        width: u32,

        /// Target height
        #[arg(long)]
        height: u32,

        /// Comma-separated algorithms to try, in order of preference
        #[arg(long)]
        candidates: Option<String>,

        #[arg(short, long)]
        quality: Option<String>,

        #[arg(short, long)]
        pipeline: Option<String>,
    },
    /// Show the output sizes an algorithm can produce
    Targets {
        #[arg(short, long)]
        algorithm: String,

        /// Source width
        #[arg(long)]
        width: u32,

        /// Source height
        #[arg(long)]
        height: u32,
    },
    /// List available algorithms
    List,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixscale=info,pixel_scalers=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    let config_file = cli
        .config
        .or_else(|| std::env::var("CONFIG_FILE").ok().map(PathBuf::from));

    match cli.command {
        Commands::Scale {
            input,
            output,
            algorithm,
            scale,
            quality,
            pipeline,
        } => {
            let service = ScaleService::new(AppConfig::load_optional(config_file.as_deref()));
            let request = ScaleRequest {
                algorithm,
                scale,
                quality,
                pipeline,
            };
            let report = service.scale_file(&input, &output, &request)?;
            println!(
                "Scaled {} {}x{} -> {}x{} with {} {} ({} bytes)",
                input.display(),
                report.input.0,
                report.input.1,
                report.output.0,
                report.output.1,
                report.algorithm,
                report.scale,
                report.bytes
            );
            Ok(())
        }
        Commands::Fit {
            input,
            output,
            width,
            height,
            candidates,
            quality,
            pipeline,
        } => {
            let service = ScaleService::new(AppConfig::load_optional(config_file.as_deref()));
            let request = FitRequest {
                width,
                height,
                candidates: candidates.as_deref().map(parse_candidates).unwrap_or_default(),
                quality,
                pipeline,
            };
            let report = service.fit_file(&input, &output, &request)?;
            println!(
                "Fitted {} {}x{} -> {}x{} (target {width}x{height}) with {} {} ({} bytes)",
                input.display(),
                report.input.0,
                report.input.1,
                report.output.0,
                report.output.1,
                report.algorithm,
                report.scale,
                report.bytes
            );
            Ok(())
        }
        Commands::Targets {
            algorithm,
            width,
            height,
        } => {
            match possible_targets(&algorithm, width, height)? {
                TargetSet::Discrete(targets) => {
                    println!("{algorithm} from {width}x{height}:");
                    for (factor, (w, h)) in targets {
                        println!("  {:<6} {w}x{h}", factor.to_string());
                    }
                }
                TargetSet::Continuous { min, max } => {
                    println!(
                        "{algorithm} from {width}x{height}: any size from {}x{} to {}x{}",
                        min.0, min.1, max.0, max.1
                    );
                }
            }
            Ok(())
        }
        Commands::List => {
            println!("Algorithms:\n");
            for info in list_algorithms() {
                let scales = match info.scales {
                    ScaleRange::Discrete(table) => table
                        .iter()
                        .map(|f| f.to_string())
                        .collect::<Vec<_>>()
                        .join(", "),
                    ScaleRange::Continuous { min, max } => format!("{min} .. {max}"),
                };
                println!("  {:<10} {:<13} {scales}", info.name, info.kind.to_string());
            }
            Ok(())
        }
    }
}
