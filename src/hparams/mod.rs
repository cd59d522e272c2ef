//! Hyperparameter declarations (Phase 1: hparams dashboard)
//!
//! ## Schema Overview
//!
//! ```text
//! Experiment ──< HParam (N) ── Domain (0..1)
//!            │                   ├── IntInterval
//!            │                   ├── RealInterval
//!            │                   └── Discrete
//!            └──< Metric (N)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use trueno_hparams::hparams::{Discrete, Experiment, HParam, IntInterval, Metric};
//!
//! let hparams = vec![
//!     HParam::new("dense_layers").with_domain(IntInterval::new(2, 7)?),
//!     HParam::new("optimizer").with_domain(Discrete::new(["adam", "sgd"])?),
//! ];
//! let experiment = Experiment::new(hparams, vec![Metric::new("accuracy")]);
//! let summary = experiment.summary_pb();
//! assert_eq!(summary.value.len(), 1);
//! # Ok::<(), trueno_hparams::Error>(())
//! ```

mod domain;
mod experiment;
mod hparam;
mod key;
mod metric;
mod value;

pub use domain::{Discrete, Domain, IntInterval, RealInterval};
pub use experiment::{Experiment, ExperimentBuilder};
pub use hparam::HParam;
pub use key::{normalize_hparams, HParamKey};
pub use metric::{DatasetType, Metric};
pub use value::{DType, HParamValue};
