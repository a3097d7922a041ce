//! Parallel verification of many classes
//!
//! Each configuration gets its own run with its own prefab repository, so
//! runs share nothing mutable and can be spread over a rayon pool.

use rayon::prelude::*;
use std::collections::BTreeMap;
use tracing::info;

use crate::config::Configuration;
use crate::errors::{VerifierError, VerifierResult};
use crate::report::VerificationReport;
use crate::verifier::ContractVerifier;

/// Configuration for parallel verification
#[derive(Debug, Clone)]
pub struct ParallelVerificationConfig {
    /// Number of threads to use (0 = auto-detect)
    pub num_threads: usize,
}

impl Default for ParallelVerificationConfig {
    fn default() -> Self {
        Self { num_threads: 0 }
    }
}

/// Verifies a batch of classes on a thread pool
#[derive(Debug, Default)]
pub struct ParallelVerifier {
    config: ParallelVerificationConfig,
}

impl ParallelVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: ParallelVerificationConfig) -> Self {
        self.config = config;
        self
    }

    fn threads(&self) -> usize {
        if self.config.num_threads == 0 {
            num_cpus::get()
        } else {
            self.config.num_threads
        }
    }

    /// Verify every configuration; reports are keyed by class name
    pub fn verify_all(
        &self,
        configs: Vec<Configuration>,
    ) -> VerifierResult<BTreeMap<String, VerificationReport>> {
        let threads = self.threads();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| VerifierError::Execution(format!("Failed to create thread pool: {}", e)))?;

        info!(classes = configs.len(), threads, "Verifying classes in parallel");
        let reports = pool.install(|| {
            configs
                .into_par_iter()
                .map(|config| {
                    let report = ContractVerifier::new(config).report();
                    (report.class_name.clone(), report)
                })
                .collect::<BTreeMap<_, _>>()
        });
        Ok(reports)
    }
}
