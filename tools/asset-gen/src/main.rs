//! asset-gen - procedural bulldozer and plow asset generator
//!
//! Builds the tagged bulldozer component scene, the plow scene and the two
//! vehicle textures, and can report the contract tags inside an exported GLB.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand_pcg::Pcg32;
use std::path::PathBuf;

mod bulldozer;
mod config;
mod inspect;
mod plow;
mod textures;

use config::AssetGenConfig;

#[derive(Parser)]
#[command(name = "asset-gen")]
#[command(about = "Generate procedural bulldozer and plow assets")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by the generating commands
#[derive(Args)]
struct GenArgs {
    /// Path to an asset-gen.toml config
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output directory (overrides config)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Seed for texture noise (overrides config)
    #[arg(short, long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate both scenes and both textures
    Generate(GenArgs),

    /// Generate textures only
    Textures(GenArgs),

    /// List contract tags found in a GLB file
    Inspect {
        /// Input GLB file
        input: PathBuf,
    },
}

/// Resolve config plus CLI overrides into (config, output dir, seed)
fn resolve(args: GenArgs) -> Result<(AssetGenConfig, PathBuf, u64)> {
    let config = config::load_config(args.config.as_deref())?;
    let output = args.output.unwrap_or_else(|| config.output.dir.clone());
    let seed = match args.seed.or(config.output.seed) {
        Some(seed) => seed,
        None => {
            let seed = rand::random::<u64>();
            tracing::info!("No seed given, using {} (pass --seed {} to reproduce)", seed, seed);
            seed
        }
    };
    Ok((config, output, seed))
}

fn generate_textures(config: &AssetGenConfig, output: &std::path::Path, seed: u64) -> Result<()> {
    let dir = output.join(&config.output.textures);
    let mut rng = Pcg32::seed_from_u64(seed);
    let written = textures::generate(&config.texture, &dir, &mut rng)
        .with_context(|| format!("Failed to generate textures in {}", dir.display()))?;
    tracing::info!("{} textures written (seed {})", written.len(), seed);
    Ok(())
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => {
            let (config, output, seed) = resolve(args)?;

            tracing::info!("Building bulldozer components");
            let scene = bulldozer::build(&config).context("Failed to build bulldozer scene")?;
            proc_gen::scene::write_glb(&scene, &output.join(&config.output.bulldozer))?;

            tracing::info!("Building plow");
            let scene = plow::build(&config.plow).context("Failed to build plow scene")?;
            proc_gen::scene::write_glb(&scene, &output.join(&config.output.plow))?;

            generate_textures(&config, &output, seed)?;
            tracing::info!("Done!");
        }

        Commands::Textures(args) => {
            let (config, output, seed) = resolve(args)?;
            generate_textures(&config, &output, seed)?;
            tracing::info!("Done!");
        }

        Commands::Inspect { input } => {
            tracing::info!("Inspecting {:?}", input);
            let flagged = inspect::report(&input)?;
            if flagged > 0 {
                anyhow::bail!("{} entities are untagged or use unknown tags", flagged);
            }
        }
    }

    Ok(())
}
