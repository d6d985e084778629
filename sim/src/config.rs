use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::constants::DEFAULT_LOOP_FREQUENCY;
use spotlight_common::SpotlightConfig;

// ============================================================================
// CLI Argument Parsing
// ============================================================================

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Spotlight pursuit simulator", long_about = None)]
pub struct Args {
    /// JSON spotlight config; defaults are used when omitted
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Stop after this many frames
    #[arg(short, long)]
    pub frames: Option<u64>,

    /// Frame loop frequency
    #[arg(long, default_value_t = DEFAULT_LOOP_FREQUENCY)]
    pub hz: u32,

    /// Run fixed steps back to back instead of waiting for the interval
    #[arg(long, default_value_t = false)]
    pub fast: bool,

    /// Seed for the scripted player
    #[arg(long)]
    pub seed: Option<u64>,

    /// Sessions to replay after the first one ends
    #[arg(long, default_value_t = 0)]
    pub restarts: u32,

    /// Log filter, overridden by RUST_LOG
    #[arg(long, default_value = "info")]
    pub log: String,
}

impl Args {
    pub fn spotlight_config(&self) -> Result<SpotlightConfig> {
        match &self.config {
            Some(path) => SpotlightConfig::load(path),
            None => Ok(SpotlightConfig::default()),
        }
    }

    #[must_use]
    pub fn frame_delta(&self) -> f32 {
        1.0 / self.hz.max(1) as f32
    }
}

// ============================================================================
// Logging
// ============================================================================

pub fn init_tracing(default_filter: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .with_context(|| format!("Invalid log filter '{default_filter}'"))?;

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;
    Ok(())
}
