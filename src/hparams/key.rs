//! Hyperparameter keys and normalization of user-supplied mappings

use std::collections::BTreeMap;

use super::hparam::HParam;
use super::value::HParamValue;
use crate::{Error, Result};

/// Key of a hyperparameter value: either a bare name or a declared `HParam`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HParamKey {
    /// Bare name
    Name(String),
    /// Declared hyperparameter
    HParam(HParam),
}

impl HParamKey {
    /// Canonical name of this key.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::HParam(hparam) => hparam.name(),
        }
    }
}

impl From<&str> for HParamKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for HParamKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<HParam> for HParamKey {
    fn from(hparam: HParam) -> Self {
        Self::HParam(hparam)
    }
}

impl From<&HParam> for HParamKey {
    fn from(hparam: &HParam) -> Self {
        Self::HParam(hparam.clone())
    }
}

/// Resolve keys to canonical names.
///
/// # Errors
///
/// Returns `Error::DuplicateHParam` when two keys share a name, whether
/// both are `HParam`s or one is a bare name.
pub fn normalize_hparams<I, K, V>(hparams: I) -> Result<BTreeMap<String, HParamValue>>
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<HParamKey>,
    V: Into<HParamValue>,
{
    let mut normalized = BTreeMap::new();
    for (key, value) in hparams {
        let key = key.into();
        let name = key.name();
        if normalized.contains_key(name) {
            return Err(Error::DuplicateHParam(name.to_string()));
        }
        normalized.insert(name.to_string(), value.into());
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mixed_keys_resolve_to_names() {
        let dense = HParam::new("dense_neurons");
        let hparams: Vec<(HParamKey, HParamValue)> = vec![
            ("optimizer".into(), "adam".into()),
            ((&dense).into(), 8.into()),
        ];
        let normalized = normalize_hparams(hparams).unwrap();
        assert_eq!(normalized["optimizer"], HParamValue::from("adam"));
        assert_eq!(normalized["dense_neurons"], HParamValue::Int(8));
    }

    #[test]
    fn test_duplicate_across_string_and_object() {
        let hparams: Vec<(HParamKey, HParamValue)> = vec![
            ("foo".into(), 1.into()),
            (HParam::new("foo").into(), 1.into()),
        ];
        let err = normalize_hparams(hparams).unwrap_err();
        assert_eq!(err.to_string(), "multiple values specified for hparam 'foo'");
    }

    #[test]
    fn test_duplicate_from_two_objects() {
        let hparams = vec![(HParam::new("foo"), 1), (HParam::new("foo"), 1)];
        let err = normalize_hparams(hparams).unwrap_err();
        assert!(matches!(err, Error::DuplicateHParam(name) if name == "foo"));
    }
}
