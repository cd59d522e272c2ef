//! Plugin metadata for the hparams dashboard
//!
//! Every hparams summary carries its payload as an `HParamsPluginData`
//! message serialized into `SummaryMetadata.plugin_data.content`, with
//! `plugin_name` set to [`PLUGIN_NAME`]. The dashboard finds the payload by
//! that name and by the summary tag, so all of these constants are part of
//! the wire contract.

use prost::Message;

use crate::proto::hparams::hparams_plugin_data::Data;
use crate::proto::tensorflow::summary_metadata::PluginData;
use crate::proto::{
    Experiment, HParamsPluginData, SessionEndInfo, SessionStartInfo, SummaryMetadata,
};
use crate::{Error, Result};

/// Plugin name the dashboard registers under.
pub const PLUGIN_NAME: &str = "hparams";

/// Version of the `HParamsPluginData` payload.
pub const PLUGIN_DATA_VERSION: i32 = 0;

/// Summary tag of the experiment definition.
pub const EXPERIMENT_TAG: &str = "_hparams_/experiment";

/// Summary tag of a session start record.
pub const SESSION_START_INFO_TAG: &str = "_hparams_/session_start_info";

/// Summary tag of a session end record.
pub const SESSION_END_INFO_TAG: &str = "_hparams_/session_end_info";

/// Wrap a plugin payload into `SummaryMetadata`.
#[must_use]
pub fn create_summary_metadata(data: Data) -> SummaryMetadata {
    let content = HParamsPluginData {
        version: PLUGIN_DATA_VERSION,
        data: Some(data),
    }
    .encode_to_vec();
    SummaryMetadata {
        plugin_data: Some(PluginData {
            plugin_name: PLUGIN_NAME.to_string(),
            content,
        }),
        ..SummaryMetadata::default()
    }
}

/// Decode an `Experiment` from plugin content bytes.
///
/// # Errors
///
/// Returns `Error::Decode` on malformed bytes and `Error::PluginData` on a
/// version mismatch or if the payload is not an experiment.
pub fn parse_experiment_plugin_data(content: &[u8]) -> Result<Experiment> {
    match parse_plugin_data(content)? {
        Data::Experiment(experiment) => Ok(experiment),
        other => Err(wrong_kind("experiment", &other)),
    }
}

/// Decode a `SessionStartInfo` from plugin content bytes.
///
/// # Errors
///
/// See [`parse_experiment_plugin_data`].
pub fn parse_session_start_info_plugin_data(content: &[u8]) -> Result<SessionStartInfo> {
    match parse_plugin_data(content)? {
        Data::SessionStartInfo(info) => Ok(info),
        other => Err(wrong_kind("session_start_info", &other)),
    }
}

/// Decode a `SessionEndInfo` from plugin content bytes.
///
/// # Errors
///
/// See [`parse_experiment_plugin_data`].
pub fn parse_session_end_info_plugin_data(content: &[u8]) -> Result<SessionEndInfo> {
    match parse_plugin_data(content)? {
        Data::SessionEndInfo(info) => Ok(info),
        other => Err(wrong_kind("session_end_info", &other)),
    }
}

fn parse_plugin_data(content: &[u8]) -> Result<Data> {
    let plugin_data = HParamsPluginData::decode(content)?;
    if plugin_data.version != PLUGIN_DATA_VERSION {
        return Err(Error::PluginData(format!(
            "unsupported plugin data version {} (expected {PLUGIN_DATA_VERSION})",
            plugin_data.version
        )));
    }
    plugin_data
        .data
        .ok_or_else(|| Error::PluginData("plugin data carries no payload".to_string()))
}

fn wrong_kind(expected: &str, actual: &Data) -> Error {
    let actual = match actual {
        Data::Experiment(_) => "experiment",
        Data::SessionStartInfo(_) => "session_start_info",
        Data::SessionEndInfo(_) => "session_end_info",
    };
    Error::PluginData(format!("expected {expected} payload, found {actual}"))
}
