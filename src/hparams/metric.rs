//! Metric - a summary tag the dashboard plots against hyperparameters

use serde::{Deserialize, Serialize};

use crate::proto::hparams as pb;
use crate::proto::{MetricInfo, MetricName};

/// Which dataset a metric was computed on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DatasetType {
    /// Not specified
    #[default]
    Unknown,
    /// Training data
    Training,
    /// Validation data
    Validation,
}

impl DatasetType {
    /// Wire enum value.
    #[must_use]
    pub const fn to_proto(self) -> pb::DatasetType {
        match self {
            Self::Unknown => pb::DatasetType::DatasetUnknown,
            Self::Training => pb::DatasetType::DatasetTraining,
            Self::Validation => pb::DatasetType::DatasetValidation,
        }
    }
}

/// A metric declaration.
///
/// A metric is identified by `(group, tag)`: the group is the run
/// subdirectory the scalar summaries are written to (empty for the session
/// directory itself) and the tag is the summary tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Metric {
    group: String,
    tag: String,
    display_name: Option<String>,
    description: Option<String>,
    dataset_type: DatasetType,
}

impl Metric {
    /// Create a metric with an empty group.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            group: String::new(),
            tag: tag.into(),
            display_name: None,
            description: None,
            dataset_type: DatasetType::Unknown,
        }
    }

    /// Set the group (run subdirectory).
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Set the name shown in the dashboard.
    #[must_use]
    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// Set a free-form description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the dataset type.
    #[must_use]
    pub const fn with_dataset_type(mut self, dataset_type: DatasetType) -> Self {
        self.dataset_type = dataset_type;
        self
    }

    /// Get the group.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Get the tag.
    #[must_use]
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Get the display name, if set.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    /// Get the description, if set.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Get the dataset type.
    #[must_use]
    pub const fn dataset_type(&self) -> DatasetType {
        self.dataset_type
    }

    /// Project into the `MetricInfo` wire message.
    #[must_use]
    pub fn to_metric_info(&self) -> MetricInfo {
        MetricInfo {
            name: Some(MetricName {
                group: self.group.clone(),
                tag: self.tag.clone(),
            }),
            display_name: self.display_name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            dataset_type: self.dataset_type.to_proto() as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metric_defaults() {
        let metric = Metric::new("samples_per_second");
        assert_eq!(metric.group(), "");
        assert_eq!(metric.tag(), "samples_per_second");
        assert_eq!(metric.dataset_type(), DatasetType::Unknown);
    }

    #[test]
    fn test_metric_info_projection() {
        let info = Metric::new("epoch_accuracy")
            .with_group("validation")
            .with_display_name("accuracy (val.)")
            .with_dataset_type(DatasetType::Validation)
            .to_metric_info();
        let name = info.name.as_ref().unwrap();
        assert_eq!(name.group, "validation");
        assert_eq!(name.tag, "epoch_accuracy");
        assert_eq!(info.display_name, "accuracy (val.)");
        assert_eq!(info.dataset_type(), pb::DatasetType::DatasetValidation);
    }
}
