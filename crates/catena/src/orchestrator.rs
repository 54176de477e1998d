//! Drives a bundling run: resolved configuration in, artifact out.

use std::{io::Write, path::Path};

use anyhow::{Context, Result};
use log::{debug, info};
use sha2::{Digest, Sha256};

use crate::{bundler::Bundler, config::Config};

/// Ties the configuration and the bundler core together for one run.
///
/// Each run is a single linear pass and independent of any other: the output
/// target is truncated and fully regenerated every time.
#[derive(Debug)]
pub struct BundleOrchestrator {
    config: Config,
}

impl BundleOrchestrator {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Assemble the artifact and write it to `output_override` when given,
    /// otherwise to the configured output path, or to stdout.
    pub fn run(&self, output_override: Option<&Path>, to_stdout: bool) -> Result<()> {
        info!(
            "bundling {} input files from {}",
            self.config.files.len(),
            self.config.src.display()
        );

        let artifact = Bundler::new(&self.config).bundle()?;
        debug!("artifact sha256: {:x}", Sha256::digest(&artifact));

        if to_stdout {
            std::io::stdout()
                .write_all(&artifact)
                .context("failed to write artifact to stdout")?;
            return Ok(());
        }

        let output = output_override.unwrap_or(&self.config.output);
        std::fs::write(output, &artifact)
            .with_context(|| format!("failed to write output file: {}", output.display()))?;
        info!("wrote {} bytes to {}", artifact.len(), output.display());
        Ok(())
    }
}
