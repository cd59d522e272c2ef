//! Protocol buffer messages read by TensorBoard.
//!
//! Declared by hand with `prost` derives instead of a `protoc` build step.
//! Only the subset of the upstream schemas that the hparams plugin touches
//! is present, but every field number and enum value matches upstream
//! exactly: the dashboard decodes these bytes with its own generated
//! classes, so any renumbering silently breaks it.

#![allow(missing_docs)]
#![allow(clippy::derive_partial_eq_without_eq)]

pub mod hparams;
pub mod tensorflow;

pub use hparams::{
    DataType, DatasetType, Experiment, HParamInfo, HParamsPluginData, Interval, MetricInfo,
    MetricName, SessionEndInfo, SessionStartInfo, Status,
};
pub use tensorflow::{Event, Summary, SummaryMetadata, TensorProto, TensorShapeProto};

#[cfg(test)]
mod tests {
    use super::*;
    use prost::Message;

    #[test]
    fn test_empty_messages_encode_to_nothing() {
        assert!(Experiment::default().encode_to_vec().is_empty());
        assert!(SessionEndInfo::default().encode_to_vec().is_empty());
        assert!(Summary::default().encode_to_vec().is_empty());
    }

    #[test]
    fn test_session_end_info_wire_bytes() {
        let end = SessionEndInfo {
            status: Status::Success as i32,
            end_time_secs: 0.0,
        };
        // field 1, varint, value 1
        assert_eq!(end.encode_to_vec(), vec![0x08, 0x01]);
    }

    #[test]
    fn test_plugin_data_version_field_number() {
        let data = HParamsPluginData {
            version: 0,
            data: Some(hparams::hparams_plugin_data::Data::SessionEndInfo(
                SessionEndInfo::default(),
            )),
        };
        // field 4, length-delimited, empty payload
        assert_eq!(data.encode_to_vec(), vec![0x22, 0x00]);
    }

    #[test]
    fn test_enum_names_match_upstream() {
        assert_eq!(DataType::Float64.as_str_name(), "DATA_TYPE_FLOAT64");
        assert_eq!(DatasetType::DatasetValidation.as_str_name(), "DATASET_VALIDATION");
        assert_eq!(Status::Success.as_str_name(), "STATUS_SUCCESS");
        assert_eq!(Status::try_from(2).ok(), Some(Status::Failure));
    }
}
