//! HParam - a named, optionally constrained hyperparameter

use std::hash::{Hash, Hasher};

use super::domain::Domain;
use crate::proto::HParamInfo;

/// A hyperparameter declaration.
///
/// Two `HParam`s are equal, and hash identically, when their names are
/// equal; domain and display fields do not participate. This lets a name
/// string and an `HParam` object collide when used as hyperparameter keys.
#[derive(Debug, Clone)]
pub struct HParam {
    name: String,
    domain: Option<Domain>,
    display_name: Option<String>,
    description: Option<String>,
}

impl HParam {
    /// Create an unconstrained hyperparameter.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            domain: None,
            display_name: None,
            description: None,
        }
    }

    /// Constrain the hyperparameter to a domain.
    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<Domain>) -> Self {
        self.domain = Some(domain.into());
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

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the domain, if constrained.
    #[must_use]
    pub const fn domain(&self) -> Option<&Domain> {
        self.domain.as_ref()
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

    /// Project into the `HParamInfo` wire message.
    ///
    /// Without a domain, the type stays `DATA_TYPE_UNSET` and no domain is emitted.
    #[must_use]
    pub fn to_hparam_info(&self) -> HParamInfo {
        let mut info = HParamInfo {
            name: self.name.clone(),
            display_name: self.display_name.clone().unwrap_or_default(),
            description: self.description.clone().unwrap_or_default(),
            ..HParamInfo::default()
        };
        if let Some(domain) = &self.domain {
            domain.update_hparam_info(&mut info);
        }
        info
    }
}

impl PartialEq for HParam {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for HParam {}

impl Hash for HParam {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hparams::{Discrete, IntInterval};
    use crate::proto::DataType;
    use std::collections::HashSet;

    #[test]
    fn test_equality_by_name_only() {
        let a = HParam::new("foo").with_domain(IntInterval::new(1, 2).unwrap());
        let b = HParam::new("foo").with_description("other");
        assert_eq!(a, b);

        let set: HashSet<HParam> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_unconstrained_info_has_no_type() {
        let info = HParam::new("who_knows_what").to_hparam_info();
        assert_eq!(info.name, "who_knows_what");
        assert_eq!(info.r#type(), DataType::Unset);
        assert!(info.domain.is_none());
    }

    #[test]
    fn test_display_fields_projected() {
        let info = HParam::new("magic")
            .with_domain(Discrete::new([false, true]).unwrap())
            .with_display_name("~*~ Magic ~*~")
            .with_description("descriptive")
            .to_hparam_info();
        assert_eq!(info.display_name, "~*~ Magic ~*~");
        assert_eq!(info.description, "descriptive");
        assert_eq!(info.r#type(), DataType::Bool);
    }
}
