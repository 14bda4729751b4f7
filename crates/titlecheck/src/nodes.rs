//! Time-bounded node vocabulary loading

use eyre::{Result, WrapErr};
use owo_colors::OwoColorize;
use std::time::Duration;
use titlecheck_core::{Harvest, Sources, Vocabulary, VocabularySource, WalkSources};
use tracing::{info, warn};

/// Harvests display names from a [`WalkSources`], giving up after `timeout`.
///
/// The walk runs on a blocking worker of a throwaway runtime so a slow
/// checkout cannot stall validation.
pub struct BoundedWalk {
    walk: WalkSources,
    timeout: Duration,
}

impl BoundedWalk {
    pub fn new(walk: WalkSources, timeout: Duration) -> Self {
        Self { walk, timeout }
    }

    /// Run the harvest to completion or until the deadline passes
    pub fn harvest(&self) -> Result<Harvest> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_time()
            .build()
            .wrap_err("Failed to start vocabulary runtime")?;

        let walk = self.walk.clone();
        let timeout = self.timeout;
        let outcome = runtime.block_on(async move {
            tokio::time::timeout(timeout, tokio::task::spawn_blocking(move || walk.harvest()))
                .await
        });

        // don't wait on a walk that overran its deadline
        runtime.shutdown_background();

        match outcome {
            Ok(joined) => joined.wrap_err("Vocabulary worker panicked")?,
            Err(_) => eyre::bail!(
                "Timed out after {:?} collecting node display names from {}",
                timeout,
                self.walk.root().display()
            ),
        }
    }
}

impl VocabularySource for BoundedWalk {
    fn load(&self) -> Result<Vocabulary> {
        eprintln!(
            "{} Collecting node display names from {}...",
            "->".blue().bold(),
            self.walk.root().display()
        );

        let harvest = self.harvest()?;
        for warning in &harvest.warnings {
            warn!("{}", warning);
        }
        info!(
            files = harvest.files_scanned,
            names = harvest.vocabulary.len(),
            "node vocabulary ready"
        );

        Ok(harvest.vocabulary)
    }
}
