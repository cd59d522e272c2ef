//! Experiment - the hyperparameters and metrics of a tuning study

use super::hparam::HParam;
use super::metric::Metric;
use crate::clock::{Clock, SystemClock};
use crate::proto;
use crate::proto::Summary;
use crate::summary;

/// An experiment declaration.
///
/// Bundles the hyperparameters being tuned and the metrics being tracked,
/// plus descriptive metadata. Immutable once built; written once to the
/// event stream via [`crate::experiment`].
#[derive(Debug, Clone, PartialEq)]
pub struct Experiment {
    hparams: Vec<HParam>,
    metrics: Vec<Metric>,
    user: Option<String>,
    description: Option<String>,
    time_created_secs: f64,
}

impl Experiment {
    /// Create an experiment stamped with the current time.
    #[must_use]
    pub fn new(hparams: Vec<HParam>, metrics: Vec<Metric>) -> Self {
        ExperimentBuilder::new(hparams, metrics).build()
    }

    /// Create a builder for setting optional fields.
    #[must_use]
    pub fn builder(hparams: Vec<HParam>, metrics: Vec<Metric>) -> ExperimentBuilder {
        ExperimentBuilder::new(hparams, metrics)
    }

    /// Get the hyperparameters, in declaration order.
    #[must_use]
    pub fn hparams(&self) -> &[HParam] {
        &self.hparams
    }

    /// Get the metrics, in declaration order.
    #[must_use]
    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    /// Get the user, if set.
    #[must_use]
    pub fn user(&self) -> Option<&str> {
        self.user.as_deref()
    }

    /// Get the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the creation time in seconds since the Unix epoch.
    #[must_use]
    pub const fn time_created_secs(&self) -> f64 {
        self.time_created_secs
    }

    /// Project into the `Experiment` wire message.
    #[must_use]
    pub fn experiment_pb(&self) -> proto::Experiment {
        proto::Experiment {
            description: self.description.clone().unwrap_or_default(),
            user: self.user.clone().unwrap_or_default(),
            time_created_secs: self.time_created_secs,
            hparam_infos: self.hparams.iter().map(HParam::to_hparam_info).collect(),
            metric_infos: self.metrics.iter().map(Metric::to_metric_info).collect(),
            ..proto::Experiment::default()
        }
    }

    /// Summary carrying this experiment for the hparams dashboard.
    #[must_use]
    pub fn summary_pb(&self) -> Summary {
        summary::experiment_pb(self.experiment_pb())
    }
}

/// Builder for `Experiment`.
#[derive(Debug)]
pub struct ExperimentBuilder {
    hparams: Vec<HParam>,
    metrics: Vec<Metric>,
    user: Option<String>,
    description: Option<String>,
    time_created_secs: Option<f64>,
}

impl ExperimentBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub const fn new(hparams: Vec<HParam>, metrics: Vec<Metric>) -> Self {
        Self {
            hparams,
            metrics,
            user: None,
            description: None,
            time_created_secs: None,
        }
    }

    /// Set the user who created the experiment.
    #[must_use]
    pub fn user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    /// Set a free-form description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set a custom creation time (useful for deserialization/testing).
    #[must_use]
    pub const fn time_created_secs(mut self, secs: f64) -> Self {
        self.time_created_secs = Some(secs);
        self
    }

    /// Build the `Experiment`, stamping the current time if none was set.
    #[must_use]
    pub fn build(self) -> Experiment {
        Experiment {
            hparams: self.hparams,
            metrics: self.metrics,
            user: self.user,
            description: self.description,
            time_created_secs: self
                .time_created_secs
                .unwrap_or_else(|| SystemClock.now_secs()),
        }
    }
}
