//! Summary builders and writers for hparams records
//!
//! Each hparams record is a `Summary` with exactly one value: the tag names
//! the record kind, the metadata carries the plugin payload, and the value
//! itself is a scalar `0.0` tensor so generic summary plumbing accepts it.

use std::collections::BTreeMap;

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::clock::{Clock, SystemClock};
use crate::hparams::{normalize_hparams, Experiment, HParamKey, HParamValue};
use crate::metadata::{
    create_summary_metadata, EXPERIMENT_TAG, SESSION_END_INFO_TAG, SESSION_START_INFO_TAG,
};
use crate::proto::hparams::hparams_plugin_data::Data;
use crate::proto::tensorflow::summary;
use crate::proto::{self, SessionEndInfo, SessionStartInfo, Status, Summary, TensorProto};
use crate::writer::SummaryWriter;
use crate::Result;

fn summary_pb(tag: &str, data: Data) -> Summary {
    Summary {
        value: vec![summary::Value {
            tag: tag.to_string(),
            metadata: Some(create_summary_metadata(data)),
            value: Some(summary::value::Value::Tensor(TensorProto::null_scalar())),
            ..summary::Value::default()
        }],
    }
}

/// Summary carrying an experiment definition.
#[must_use]
pub fn experiment_pb(experiment: proto::Experiment) -> Summary {
    summary_pb(EXPERIMENT_TAG, Data::Experiment(experiment))
}

/// Summary carrying a session start record.
#[must_use]
pub fn session_start_pb(
    hparams: &BTreeMap<String, HParamValue>,
    group_name: &str,
    start_time_secs: f64,
) -> Summary {
    let info = SessionStartInfo {
        hparams: hparams
            .iter()
            .map(|(name, value)| (name.clone(), value.to_proto()))
            .collect(),
        group_name: group_name.to_string(),
        start_time_secs,
        ..SessionStartInfo::default()
    };
    summary_pb(SESSION_START_INFO_TAG, Data::SessionStartInfo(info))
}

/// Summary carrying a session end record.
#[must_use]
pub fn session_end_pb(status: Status, end_time_secs: f64) -> Summary {
    let info = SessionEndInfo {
        status: status as i32,
        end_time_secs,
    };
    summary_pb(SESSION_END_INFO_TAG, Data::SessionEndInfo(info))
}

/// Summary recording the hyperparameter values of one trial.
///
/// Without a `trial_id` the group name is derived from the values
/// themselves, so repeated trials of the same configuration group together.
/// Without a `start_time_secs` the current time is used.
///
/// # Errors
///
/// Returns `Error::DuplicateHParam` if two keys share a name.
pub fn hparams_pb<I, K, V>(
    hparams: I,
    trial_id: Option<&str>,
    start_time_secs: Option<f64>,
) -> Result<Summary>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<HParamKey>,
    V: Into<HParamValue>,
{
    let hparams = normalize_hparams(hparams)?;
    let group_name = match trial_id {
        Some(id) => id.to_string(),
        None => derive_trial_id(&hparams)?,
    };
    let start_time_secs = start_time_secs.unwrap_or_else(|| SystemClock.now_secs());
    Ok(session_start_pb(&hparams, &group_name, start_time_secs))
}

/// Hex SHA-256 of the canonical JSON of a normalized hparams mapping.
///
/// # Errors
///
/// Returns `Error::Json` if the mapping cannot be serialized.
pub fn derive_trial_id(hparams: &BTreeMap<String, HParamValue>) -> Result<String> {
    let canonical = serde_json::to_string(hparams)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}

/// Write an experiment definition.
///
/// Returns `Ok(false)` without writing when `writer` is absent or inactive.
///
/// # Errors
///
/// Returns an error if an active writer fails.
pub fn experiment<W>(writer: Option<&mut W>, experiment: &Experiment) -> Result<bool>
where
    W: SummaryWriter + ?Sized,
{
    write_if_active(writer, EXPERIMENT_TAG, || Ok(experiment.summary_pb()))
}

/// Write the hyperparameter values of one trial.
///
/// Returns `Ok(false)` without writing when `writer` is absent or inactive.
///
/// # Errors
///
/// Returns `Error::DuplicateHParam` for duplicate names, or an error if an
/// active writer fails.
pub fn hparams<W, I, K, V>(
    writer: Option<&mut W>,
    hparams: I,
    trial_id: Option<&str>,
    start_time_secs: Option<f64>,
) -> Result<bool>
where
    W: SummaryWriter + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<HParamKey>,
    V: Into<HParamValue>,
{
    let summary = hparams_pb(hparams, trial_id, start_time_secs)?;
    write_if_active(writer, SESSION_START_INFO_TAG, || Ok(summary))
}

fn write_if_active<W, F>(writer: Option<&mut W>, tag: &str, build: F) -> Result<bool>
where
    W: SummaryWriter + ?Sized,
    F: FnOnce() -> Result<Summary>,
{
    match writer {
        Some(writer) if writer.is_active() => {
            writer.write_summary(&build()?, 0)?;
            debug!(tag, "wrote hparams summary");
            Ok(true)
        }
        _ => {
            debug!(tag, "no active summary writer; skipping");
            Ok(false)
        }
    }
}
