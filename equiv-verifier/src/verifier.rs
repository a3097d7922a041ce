//! Entry point for verifying one class

use equiv_core::ClassDef;
use std::sync::Arc;
use tracing::{debug, info};

use crate::checks::{CheckContext, PIPELINE};
use crate::config::Configuration;
use crate::errors::VerifierResult;
use crate::report::{ReportSink, VerificationReport};

/// Runs the check pipeline against a configured class
pub struct ContractVerifier {
    config: Configuration,
    sink: Option<Arc<dyn ReportSink>>,
}

impl ContractVerifier {
    pub fn new(config: Configuration) -> Self {
        Self { config, sink: None }
    }

    /// Verifier with default settings
    pub fn for_class(class: Arc<ClassDef>) -> Self {
        Self::new(Configuration::for_class(class))
    }

    pub fn with_sink(mut self, sink: Arc<dyn ReportSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn config(&self) -> &Configuration {
        &self.config
    }

    /// Run every check; the first failure is returned
    pub fn verify(&self) -> VerifierResult<()> {
        self.run().1
    }

    /// Run every check and deliver the outcome to the sink, if any
    pub fn report(&self) -> VerificationReport {
        let (passed, result) = self.run();
        let class_name = self.config.class_name();
        let report = match result {
            Ok(()) => VerificationReport::success(class_name, passed),
            Err(err) => VerificationReport::failure(class_name, passed, err),
        };
        if let Some(sink) = &self.sink {
            sink.deliver(&report);
        }
        report
    }

    fn run(&self) -> (usize, VerifierResult<()>) {
        info!(
            class = self.config.class_name(),
            suppressed = self.config.settings.suppressed.len(),
            "Verifying equality contract"
        );
        let mut ctx = match CheckContext::new(&self.config) {
            Ok(ctx) => ctx,
            Err(err) => return (0, Err(err)),
        };

        for (passed, (kind, check)) in PIPELINE.iter().enumerate() {
            debug!(class = self.config.class_name(), check = %kind, "Running check");
            if let Err(err) = check(&mut ctx) {
                debug!(class = self.config.class_name(), check = %kind, error = %err, "Check failed");
                return (passed, Err(err));
            }
        }
        info!(class = self.config.class_name(), checks = PIPELINE.len(), "Equality contract holds");
        (PIPELINE.len(), Ok(()))
    }
}
