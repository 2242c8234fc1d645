use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use asd_composite::utils::conf_helper::load_config_with;
use asd_composite::{CompositeConfig, SplitCorrection};

// Reflectance usually measures a single surface capture
const SURFACE_COUNT: u32 = 1;

#[derive(Parser, Debug)]
#[command(name = "asd")]
#[command(about = "Process ASD field spectrometer captures into albedo and reflectance")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Print every processed file
    #[arg(long, global = true)]
    pub debug: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Albedo from up- and down-looking capture sets
    Albedo(AlbedoArgs),
    /// Reflectance from surface and white reference capture sets
    Reflectance(ReflectanceArgs),
    /// Check individual white reference captures
    WhiteReference(WhiteReferenceArgs),
}

#[derive(Args, Debug)]
pub struct InputArgs {
    /// Directory containing the captures
    #[arg(short, long, value_name = "DIR")]
    pub input_dir: PathBuf,

    /// File name prefix shared by all captures
    #[arg(short = 'p', long, value_name = "PREFIX")]
    pub file_prefix: String,
}

#[derive(Args, Debug)]
pub struct CompositeArgs {
    /// JSON run file with set indices and counts; flags take precedence
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// How bands below the detector split are rescaled
    #[arg(long, value_name = "divide|multiply")]
    pub correction: Option<SplitCorrection>,
}

#[derive(Args, Debug)]
pub struct AlbedoArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub composite: CompositeArgs,

    /// File number of the first up-looking capture (default: 0)
    #[arg(long = "up-looking-file-start", short = 'u', value_name = "N")]
    pub set_1_index: Option<u32>,

    /// Number of up-looking captures (default: 10)
    #[arg(long = "up-looking-count", value_name = "N")]
    pub set_1_count: Option<u32>,

    /// File number of the first down-looking capture (default: 10)
    #[arg(long = "down-looking-file-start", short = 'd', value_name = "N")]
    pub set_2_index: Option<u32>,

    /// Number of down-looking captures (default: 10)
    #[arg(long = "down-looking-count", value_name = "N")]
    pub set_2_count: Option<u32>,

    /// Also save the result with this file suffix
    #[arg(short, long, value_name = "SUFFIX")]
    pub save: Option<String>,
}

#[derive(Args, Debug)]
pub struct ReflectanceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    #[command(flatten)]
    pub composite: CompositeArgs,

    /// Suffix for the saved file
    #[arg(short, long, default_value = "reflectance", value_name = "SUFFIX")]
    pub output_file_suffix: String,

    /// File number of the surface capture (default: 0)
    #[arg(long = "reflectance-start", short = 'r', value_name = "N")]
    pub r_index: Option<u32>,

    /// Number of surface captures (default: 1)
    #[arg(long = "reflectance-count", value_name = "N")]
    pub r_count: Option<u32>,

    /// Sub-path holding the white references, e.g. white-reference/
    #[arg(long = "white-reference-prefix", short = 'w', value_name = "PATH")]
    pub wr_prefix: Option<String>,

    /// File number of the first white reference capture (default: 10)
    #[arg(long = "white-reference-start", value_name = "N")]
    pub wr_index: Option<u32>,

    /// Number of white reference captures (default: 10)
    #[arg(long = "white-reference-count", value_name = "N")]
    pub wr_count: Option<u32>,
}

#[derive(Args, Debug)]
pub struct WhiteReferenceArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// File number of the first white reference capture
    #[arg(long = "white-reference-start", value_name = "N")]
    pub wr_index: u32,

    /// Number of white reference captures
    #[arg(long = "white-reference-count", default_value_t = 10, value_name = "N")]
    pub wr_count: u32,
}

fn override_with<T>(field: &mut T, flag: Option<T>) {
    if let Some(value) = flag {
        *field = value;
    }
}

impl CompositeArgs {
    /// Defaults, then the run file, then the flags handled here.
    fn load(&self, defaults: CompositeConfig, debug: bool) -> Result<CompositeConfig> {
        let mut config = match &self.config {
            Some(path) => load_config_with(path, defaults)
                .with_context(|| format!("loading run file {}", path.display()))?,
            None => defaults,
        };
        override_with(&mut config.correction, self.correction);
        config.debug |= debug;
        Ok(config)
    }
}

impl AlbedoArgs {
    pub fn config(&self, debug: bool) -> Result<CompositeConfig> {
        let mut config = self.composite.load(CompositeConfig::default(), debug)?;
        override_with(&mut config.set_1_index, self.set_1_index);
        override_with(&mut config.set_1_count, self.set_1_count);
        override_with(&mut config.set_2_index, self.set_2_index);
        override_with(&mut config.set_2_count, self.set_2_count);
        Ok(config)
    }
}

impl ReflectanceArgs {
    pub fn config(&self, debug: bool) -> Result<CompositeConfig> {
        let defaults = CompositeConfig {
            set_1_count: SURFACE_COUNT,
            ..CompositeConfig::default()
        };
        let mut config = self.composite.load(defaults, debug)?;
        override_with(&mut config.set_1_index, self.r_index);
        override_with(&mut config.set_1_count, self.r_count);
        override_with(&mut config.set_2_index, self.wr_index);
        override_with(&mut config.set_2_count, self.wr_count);
        if self.wr_prefix.is_some() {
            config.set_2_alt_prefix = self.wr_prefix.clone();
        }
        Ok(config)
    }
}
