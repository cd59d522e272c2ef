//! # Trueno-Hparams: Hyperparameter Tuning Metadata for `TensorBoard`
//!
//! **Version**: 0.1.0
//!
//! Trueno-Hparams declares hyperparameter tuning experiments and records the
//! sessions that run them, in the format the `TensorBoard` hparams dashboard
//! reads: protobuf plugin payloads inside summaries inside event files.
//!
//! ## Design Principles (Toyota Way Aligned)
//!
//! - **Poka-Yoke safety**: Domains validate their bounds and value types at
//!   construction, so an invalid experiment can never be serialized
//! - **Jidoka**: Duplicate hyperparameter names stop the session before any
//!   record is written
//! - **Genchi Genbutsu**: Event files are read back with CRC verification
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use trueno_hparams::hparams::{Discrete, Experiment, HParam, IntInterval, Metric};
//! use trueno_hparams::writer::EventFileWriter;
//! use trueno_hparams::WriterConfig;
//!
//! let experiment = Experiment::new(
//!     vec![
//!         HParam::new("dense_layers").with_domain(IntInterval::new(2, 7)?),
//!         HParam::new("optimizer").with_domain(Discrete::new(["adam", "sgd"])?),
//!     ],
//!     vec![Metric::new("accuracy")],
//! );
//!
//! let mut writer = EventFileWriter::create(&WriterConfig::new("logs/hparam_tuning"))?;
//! assert!(trueno_hparams::experiment(Some(&mut writer), &experiment)?);
//! # Ok::<(), trueno_hparams::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod callback;
pub mod clock;
pub mod config;
pub mod error;
pub mod hparams;
pub mod metadata;
pub mod proto;
pub mod summary;
pub mod writer;

pub use callback::{run_with_callbacks, HParamsCallback, TrainContext, TrainingCallback};
pub use config::WriterConfig;
pub use error::{Error, Result};
pub use summary::{experiment, hparams, hparams_pb};
