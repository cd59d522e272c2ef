//! Domains: the legal values of a hyperparameter
//!
//! All domains validate eagerly. A constructed domain is always
//! well-formed: interval endpoints are ordered, discrete values share one
//! dtype and are sorted.

use prost_types::ListValue;
use rand::seq::SliceRandom;
use rand::Rng;

use super::value::{DType, HParamValue};
use crate::proto::hparams::hparam_info;
use crate::proto::{HParamInfo, Interval};
use crate::{Error, Result};

/// A closed interval of integers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntInterval {
    min_value: i64,
    max_value: i64,
}

impl IntInterval {
    /// Create an interval `[min_value, max_value]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvertedBounds` if `min_value > max_value`.
    pub fn new(min_value: i64, max_value: i64) -> Result<Self> {
        if min_value > max_value {
            return Err(Error::InvertedBounds {
                min: HParamValue::Int(min_value),
                max: HParamValue::Int(max_value),
            });
        }
        Ok(Self {
            min_value,
            max_value,
        })
    }

    /// Create an interval from dynamically typed endpoints.
    ///
    /// Only `HParamValue::Int` is accepted; booleans are rejected even though
    /// they are integer-like.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` naming the offending endpoint, or
    /// `Error::InvertedBounds`.
    pub fn from_values(
        min_value: impl Into<HParamValue>,
        max_value: impl Into<HParamValue>,
    ) -> Result<Self> {
        let min_value = expect_int("min_value", min_value.into())?;
        let max_value = expect_int("max_value", max_value.into())?;
        Self::new(min_value, max_value)
    }

    /// Lower endpoint (inclusive).
    #[must_use]
    pub const fn min_value(&self) -> i64 {
        self.min_value
    }

    /// Upper endpoint (inclusive).
    #[must_use]
    pub const fn max_value(&self) -> i64 {
        self.max_value
    }

    /// Always `DType::Int`.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        DType::Int
    }

    /// Sample an integer uniformly from the interval.
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> i64 {
        rng.gen_range(self.min_value..=self.max_value)
    }
}

/// A closed interval of reals. Endpoints may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RealInterval {
    min_value: f64,
    max_value: f64,
}

impl RealInterval {
    /// Create an interval `[min_value, max_value]`.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDomain` for NaN endpoints and
    /// `Error::InvertedBounds` if `min_value > max_value`.
    pub fn new(min_value: f64, max_value: f64) -> Result<Self> {
        if min_value.is_nan() || max_value.is_nan() {
            return Err(Error::InvalidDomain(format!(
                "interval endpoints must not be NaN: [{min_value:?}, {max_value:?}]"
            )));
        }
        if min_value > max_value {
            return Err(Error::InvertedBounds {
                min: HParamValue::Float(min_value),
                max: HParamValue::Float(max_value),
            });
        }
        Ok(Self {
            min_value,
            max_value,
        })
    }

    /// Create an interval from dynamically typed endpoints.
    ///
    /// Only `HParamValue::Float` is accepted; booleans, integers and strings
    /// are rejected.
    ///
    /// # Errors
    ///
    /// Returns `Error::TypeMismatch` naming the offending endpoint, or any
    /// error from [`RealInterval::new`].
    pub fn from_values(
        min_value: impl Into<HParamValue>,
        max_value: impl Into<HParamValue>,
    ) -> Result<Self> {
        let min_value = expect_float("min_value", min_value.into())?;
        let max_value = expect_float("max_value", max_value.into())?;
        Self::new(min_value, max_value)
    }

    /// Lower endpoint (inclusive).
    #[must_use]
    pub const fn min_value(&self) -> f64 {
        self.min_value
    }

    /// Upper endpoint (inclusive).
    #[must_use]
    pub const fn max_value(&self) -> f64 {
        self.max_value
    }

    /// Always `DType::Float`.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        DType::Float
    }

    /// Sample a real uniformly from the interval.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDomain` if either endpoint is infinite or the
    /// width of the interval overflows `f64`.
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<f64> {
        if !(self.max_value - self.min_value).is_finite() {
            return Err(Error::InvalidDomain(format!(
                "cannot sample uniformly from unbounded interval [{:?}, {:?}]",
                self.min_value, self.max_value
            )));
        }
        Ok(rng.gen_range(self.min_value..=self.max_value))
    }
}

/// A finite, sorted set of values of one dtype.
#[derive(Debug, Clone, PartialEq)]
pub struct Discrete {
    values: Vec<HParamValue>,
    dtype: DType,
}

impl Discrete {
    /// Create a discrete domain, inferring the dtype from the first value.
    ///
    /// # Errors
    ///
    /// Returns `Error::EmptyDomain` if `values` is empty, or
    /// `Error::DTypeMismatch` naming the first value whose type differs
    /// from the first element's.
    pub fn new<I, V>(values: I) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<HParamValue>,
    {
        let values: Vec<HParamValue> = values.into_iter().map(Into::into).collect();
        let dtype = values.first().map(HParamValue::dtype).ok_or(Error::EmptyDomain)?;
        Self::build(values, dtype)
    }

    /// Create a discrete domain with an explicit dtype. `values` may be empty.
    ///
    /// # Errors
    ///
    /// Returns `Error::DTypeMismatch` naming the first value not of `dtype`.
    pub fn with_dtype<I, V>(values: I, dtype: DType) -> Result<Self>
    where
        I: IntoIterator<Item = V>,
        V: Into<HParamValue>,
    {
        Self::build(values.into_iter().map(Into::into).collect(), dtype)
    }

    fn build(mut values: Vec<HParamValue>, dtype: DType) -> Result<Self> {
        if let Some(bad) = values.iter().find(|v| v.dtype() != dtype) {
            return Err(Error::DTypeMismatch {
                value: bad.clone(),
                dtype,
            });
        }
        values.sort_by(HParamValue::natural_cmp);
        Ok(Self { values, dtype })
    }

    /// Values in ascending order.
    #[must_use]
    pub fn values(&self) -> &[HParamValue] {
        &self.values
    }

    /// Element dtype.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        self.dtype
    }

    /// Number of values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True if the domain holds no values.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pick one value uniformly.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDomain` if the domain is empty.
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<HParamValue> {
        self.values
            .choose(rng)
            .cloned()
            .ok_or_else(|| Error::InvalidDomain("cannot sample from an empty domain".to_string()))
    }
}

/// Any hyperparameter domain.
#[derive(Debug, Clone, PartialEq)]
pub enum Domain {
    /// Integer interval
    IntInterval(IntInterval),
    /// Real interval
    RealInterval(RealInterval),
    /// Discrete set
    Discrete(Discrete),
}

impl Domain {
    /// Dtype of values in this domain.
    #[must_use]
    pub const fn dtype(&self) -> DType {
        match self {
            Self::IntInterval(d) => d.dtype(),
            Self::RealInterval(d) => d.dtype(),
            Self::Discrete(d) => d.dtype(),
        }
    }

    /// True if `value` is a legal value of this domain.
    #[must_use]
    pub fn contains(&self, value: &HParamValue) -> bool {
        match (self, value) {
            (Self::IntInterval(d), HParamValue::Int(v)) => (d.min_value..=d.max_value).contains(v),
            (Self::RealInterval(d), HParamValue::Float(v)) => {
                d.min_value <= *v && *v <= d.max_value
            }
            (Self::Discrete(d), v) => d.values.contains(v),
            _ => false,
        }
    }

    /// Sample a value uniformly from this domain.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidDomain` for unbounded real intervals and empty
    /// discrete domains.
    pub fn sample_uniform<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<HParamValue> {
        match self {
            Self::IntInterval(d) => Ok(HParamValue::Int(d.sample_uniform(rng))),
            Self::RealInterval(d) => d.sample_uniform(rng).map(HParamValue::Float),
            Self::Discrete(d) => d.sample_uniform(rng),
        }
    }

    /// Write this domain's type and range into an `HParamInfo`.
    #[allow(clippy::cast_precision_loss)]
    pub fn update_hparam_info(&self, info: &mut HParamInfo) {
        info.r#type = self.dtype().data_type() as i32;
        let domain = match self {
            Self::IntInterval(d) => hparam_info::Domain::DomainInterval(Interval {
                min_value: d.min_value as f64,
                max_value: d.max_value as f64,
            }),
            Self::RealInterval(d) => hparam_info::Domain::DomainInterval(Interval {
                min_value: d.min_value,
                max_value: d.max_value,
            }),
            Self::Discrete(d) => hparam_info::Domain::DomainDiscrete(ListValue {
                values: d.values.iter().map(HParamValue::to_proto).collect(),
            }),
        };
        info.domain = Some(domain);
    }
}

impl From<IntInterval> for Domain {
    fn from(d: IntInterval) -> Self {
        Self::IntInterval(d)
    }
}

impl From<RealInterval> for Domain {
    fn from(d: RealInterval) -> Self {
        Self::RealInterval(d)
    }
}

impl From<Discrete> for Domain {
    fn from(d: Discrete) -> Self {
        Self::Discrete(d)
    }
}

fn expect_int(field: &'static str, value: HParamValue) -> Result<i64> {
    match value {
        HParamValue::Int(v) => Ok(v),
        other => Err(Error::TypeMismatch {
            field,
            expected: "an int",
            value: other,
        }),
    }
}

fn expect_float(field: &'static str, value: HParamValue) -> Result<f64> {
    match value {
        HParamValue::Float(v) => Ok(v),
        other => Err(Error::TypeMismatch {
            field,
            expected: "a float",
            value: other,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::DataType;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_int_interval_simple() {
        let domain = IntInterval::new(3, 7).unwrap();
        assert_eq!(domain.min_value(), 3);
        assert_eq!(domain.max_value(), 7);
        assert_eq!(domain.dtype(), DType::Int);
    }

    #[test]
    fn test_int_interval_singleton() {
        let domain = IntInterval::new(61, 61).unwrap();
        assert_eq!(domain.min_value(), 61);
        assert_eq!(domain.max_value(), 61);
    }

    #[test]
    fn test_int_interval_non_ints() {
        let err = IntInterval::from_values(f64::NEG_INFINITY, 0).unwrap_err();
        assert_eq!(err.to_string(), "min_value must be an int: -inf");

        let err = IntInterval::from_values(7, "eleven").unwrap_err();
        assert_eq!(err.to_string(), "max_value must be an int: 'eleven'");

        let err = IntInterval::from_values(true, 3).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { field: "min_value", .. }));
    }

    #[test]
    fn test_int_interval_backward_endpoints() {
        let err = IntInterval::new(123, 45).unwrap_err();
        assert!(err.to_string().contains("123 > 45"));
    }

    #[test]
    fn test_real_interval_infinite() {
        let domain = RealInterval::new(f64::NEG_INFINITY, f64::INFINITY).unwrap();
        assert_eq!(domain.min_value(), f64::NEG_INFINITY);
        assert_eq!(domain.max_value(), f64::INFINITY);
        assert_eq!(domain.dtype(), DType::Float);
    }

    #[test]
    fn test_real_interval_rejects_bool_and_strings() {
        let err = RealInterval::from_values(true, 2.0).unwrap_err();
        assert_eq!(err.to_string(), "min_value must be a float: true");

        let err = RealInterval::from_values(1.2, "wat").unwrap_err();
        assert_eq!(err.to_string(), "max_value must be a float: 'wat'");
    }

    #[test]
    fn test_real_interval_backward_endpoints() {
        let err = RealInterval::new(2.1, 1.2).unwrap_err();
        assert!(err.to_string().contains("2.1 > 1.2"));
    }

    #[test]
    fn test_real_interval_rejects_nan() {
        assert!(matches!(
            RealInterval::new(f64::NAN, 1.0),
            Err(Error::InvalidDomain(_))
        ));
    }

    #[test]
    fn test_discrete_values_sorted() {
        let domain = Discrete::new([2, 3, 1]).unwrap();
        assert_eq!(
            domain.values(),
            &[HParamValue::Int(1), HParamValue::Int(2), HParamValue::Int(3)]
        );
        assert_eq!(domain.dtype(), DType::Int);
    }

    #[test]
    fn test_discrete_empty_with_explicit_dtype() {
        let domain = Discrete::with_dtype(Vec::<bool>::new(), DType::Bool).unwrap();
        assert_eq!(domain.dtype(), DType::Bool);
        assert!(domain.is_empty());
    }

    #[test]
    fn test_discrete_empty_without_dtype() {
        let err = Discrete::new(Vec::<i64>::new()).unwrap_err();
        assert!(err.to_string().contains("Empty domain with no dtype specified"));
    }

    #[test]
    fn test_discrete_dtype_mismatch() {
        let values: Vec<HParamValue> = vec!["one".into(), 2.into()];
        let err = Discrete::new(values).unwrap_err();
        assert_eq!(err.to_string(), "dtype mismatch: 2 is not of type str");
    }

    #[test]
    fn test_update_hparam_info_interval() {
        let mut info = HParamInfo::default();
        Domain::from(IntInterval::new(2, 7).unwrap()).update_hparam_info(&mut info);
        assert_eq!(info.r#type(), DataType::Float64);
        assert_eq!(
            info.domain,
            Some(hparam_info::Domain::DomainInterval(Interval {
                min_value: 2.0,
                max_value: 7.0,
            }))
        );
    }

    #[test]
    fn test_sample_uniform_stays_in_domain() {
        let mut rng = StdRng::seed_from_u64(42);
        let domains = [
            Domain::from(IntInterval::new(4, 16).unwrap()),
            Domain::from(RealInterval::new(0.01, 0.1).unwrap()),
            Domain::from(Discrete::new(["adam", "sgd"]).unwrap()),
        ];
        for domain in &domains {
            for _ in 0..50 {
                let v = domain.sample_uniform(&mut rng).unwrap();
                assert!(domain.contains(&v), "{v} not in {domain:?}");
            }
        }
    }

    #[test]
    fn test_sample_uniform_rejects_unbounded_and_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let unbounded = Domain::from(RealInterval::new(0.0, f64::INFINITY).unwrap());
        assert!(unbounded.sample_uniform(&mut rng).is_err());
        let empty = Domain::from(Discrete::with_dtype(Vec::<i64>::new(), DType::Int).unwrap());
        assert!(empty.sample_uniform(&mut rng).is_err());
    }

    #[test]
    fn test_sample_uniform_rejects_overflowing_width() {
        let mut rng = StdRng::seed_from_u64(1);
        let huge = Domain::from(RealInterval::new(-1e308, 1e308).unwrap());
        let err = huge.sample_uniform(&mut rng).unwrap_err();
        assert!(matches!(err, Error::InvalidDomain(_)));

        let wide = Domain::from(RealInterval::new(-1e307, 1e307).unwrap());
        let v = wide.sample_uniform(&mut rng).unwrap();
        assert!(wide.contains(&v));
    }
}
