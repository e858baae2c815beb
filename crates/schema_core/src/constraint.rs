//! Value constraints.
//!
//! A [`ValueConstraint`] is a predicate over the values of a column. There are
//! two kinds:
//! - [`Range`]: numeric interval with independently inclusive/exclusive bounds
//! - [`Enumeration`]: finite set of allowed values
//!
//! Both evaluate a whole column at once through `contains`, returning a boolean
//! mask with the same length and order as the input.
//!
//! Constraints serialize with an explicit `kind` discriminator. Deserialization
//! also accepts the key-presence form (`minval`/`maxval` for ranges, `allowed`
//! for enumerations) and rejects descriptions that match both or neither.

use crate::{Scalar, SchemaError};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// A numeric interval.
///
/// At least one bound is set, bounds are never NaN, and when both are set
/// `minval < maxval`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Range {
    minval: Option<f64>,
    maxval: Option<f64>,
    include_lower: bool,
    include_upper: bool,
}

impl Range {
    /// Creates a new range constraint.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::InvalidRange`] when both bounds are missing, a bound
    /// is NaN, or `minval >= maxval`.
    pub fn new(
        minval: Option<f64>,
        maxval: Option<f64>,
        include_lower: bool,
        include_upper: bool,
    ) -> Result<Self, SchemaError> {
        if minval.is_none() && maxval.is_none() {
            return Err(SchemaError::invalid_range(
                "minval or maxval must be set, got neither",
            ));
        }
        if minval.is_some_and(f64::is_nan) || maxval.is_some_and(f64::is_nan) {
            return Err(SchemaError::invalid_range("bounds must not be NaN"));
        }
        if let (Some(min), Some(max)) = (minval, maxval) {
            if min >= max {
                return Err(SchemaError::invalid_range(format!(
                    "minval must be lower than maxval, got minval={min} and maxval={max}"
                )));
            }
        }

        Ok(Self {
            minval,
            maxval,
            include_lower,
            include_upper,
        })
    }

    /// Creates an inclusive range `[min, max]`.
    ///
    /// # Errors
    ///
    /// Fails under the same conditions as [`Range::new`].
    pub fn between(min: f64, max: f64) -> Result<Self, SchemaError> {
        Self::new(Some(min), Some(max), true, true)
    }

    /// Creates a range with only an inclusive lower bound.
    ///
    /// # Errors
    ///
    /// Fails when `min` is NaN.
    pub fn at_least(min: f64) -> Result<Self, SchemaError> {
        Self::new(Some(min), None, true, true)
    }

    /// Creates a range with only an inclusive upper bound.
    ///
    /// # Errors
    ///
    /// Fails when `max` is NaN.
    pub fn at_most(max: f64) -> Result<Self, SchemaError> {
        Self::new(None, Some(max), true, true)
    }

    /// Sets whether the lower bound is inclusive.
    pub fn with_include_lower(mut self, include: bool) -> Self {
        self.include_lower = include;
        self
    }

    /// Sets whether the upper bound is inclusive.
    pub fn with_include_upper(mut self, include: bool) -> Self {
        self.include_upper = include;
        self
    }

    pub fn minval(&self) -> Option<f64> {
        self.minval
    }

    pub fn maxval(&self) -> Option<f64> {
        self.maxval
    }

    pub fn include_lower(&self) -> bool {
        self.include_lower
    }

    pub fn include_upper(&self) -> bool {
        self.include_upper
    }

    /// Checks a single numeric value against the bounds.
    pub fn contains_value(&self, value: f64) -> bool {
        let lower_ok = match self.minval {
            Some(min) if self.include_lower => value >= min,
            Some(min) => value > min,
            None => true,
        };
        let upper_ok = match self.maxval {
            Some(max) if self.include_upper => value <= max,
            Some(max) => value < max,
            None => true,
        };
        lower_ok && upper_ok
    }

    /// Evaluates the range over a column of values.
    ///
    /// Null and NaN elements are never contained.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NonNumeric`] if any element is a string.
    pub fn contains(&self, values: &[Scalar]) -> Result<Vec<bool>, SchemaError> {
        if let Some(bad) = values.iter().find(|v| matches!(v, Scalar::Str(_))) {
            return Err(SchemaError::NonNumeric {
                constraint: self.to_string(),
                found: bad.type_name().to_string(),
            });
        }

        Ok(values
            .iter()
            .map(|v| v.as_f64().is_some_and(|n| self.contains_value(n)))
            .collect())
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let open = if self.include_lower && self.minval.is_some() {
            '['
        } else {
            '('
        };
        let close = if self.include_upper && self.maxval.is_some() {
            ']'
        } else {
            ')'
        };
        let lower = self
            .minval
            .map_or_else(|| "-inf".to_string(), |v| Scalar::Float(v).to_string());
        let upper = self
            .maxval
            .map_or_else(|| "inf".to_string(), |v| Scalar::Float(v).to_string());
        write!(f, "{open}{lower}, {upper}{close}")
    }
}

/// A finite set of allowed values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Enumeration {
    allowed: Vec<Scalar>,
}

impl Enumeration {
    /// Creates a new enumeration constraint.
    pub fn new<I, V>(allowed: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Scalar>,
    {
        Self {
            allowed: allowed.into_iter().map(Into::into).collect(),
        }
    }

    pub fn allowed(&self) -> &[Scalar] {
        &self.allowed
    }

    /// Checks whether a single value is a member of the set.
    pub fn contains_value(&self, value: &Scalar) -> bool {
        self.allowed.iter().any(|a| a.matches(value))
    }

    /// Evaluates membership over a column of values.
    pub fn contains(&self, values: &[Scalar]) -> Vec<bool> {
        values.iter().map(|v| self.contains_value(v)).collect()
    }
}

impl fmt::Display for Enumeration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let items: Vec<String> = self.allowed.iter().map(ToString::to_string).collect();
        write!(f, "{{{}}}", items.join(", "))
    }
}

/// A predicate over the values of a column.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum ValueConstraint {
    /// Numeric interval
    #[serde(rename = "range")]
    Range(Range),

    /// Allowed value set
    #[serde(rename = "enum")]
    Enumeration(Enumeration),
}

impl ValueConstraint {
    /// Evaluates the constraint over a column of values.
    ///
    /// # Errors
    ///
    /// Range constraints fail on non-numeric input; enumerations never fail.
    pub fn contains(&self, values: &[Scalar]) -> Result<Vec<bool>, SchemaError> {
        match self {
            ValueConstraint::Range(range) => range.contains(values),
            ValueConstraint::Enumeration(enumeration) => Ok(enumeration.contains(values)),
        }
    }

    /// Returns the discriminator used in serialized descriptions.
    pub fn kind(&self) -> &'static str {
        match self {
            ValueConstraint::Range(_) => "range",
            ValueConstraint::Enumeration(_) => "enum",
        }
    }
}

impl From<Range> for ValueConstraint {
    fn from(range: Range) -> Self {
        ValueConstraint::Range(range)
    }
}

impl From<Enumeration> for ValueConstraint {
    fn from(enumeration: Enumeration) -> Self {
        ValueConstraint::Enumeration(enumeration)
    }
}

impl fmt::Display for ValueConstraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueConstraint::Range(range) => fmt::Display::fmt(range, f),
            ValueConstraint::Enumeration(enumeration) => fmt::Display::fmt(enumeration, f),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
enum ConstraintKind {
    #[serde(rename = "range")]
    Range,
    #[serde(rename = "enum", alias = "enumeration")]
    Enumeration,
}

/// Plain description of a constraint as found in schema files.
///
/// Bound keys use `Option<Option<_>>` so that a key given as `null` still
/// counts as present for key-based disambiguation.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConstraintDescription {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    kind: Option<ConstraintKind>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    minval: Option<Option<f64>>,

    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    maxval: Option<Option<f64>>,

    #[serde(default, alias = "include_lb", skip_serializing_if = "Option::is_none")]
    include_lower: Option<bool>,

    #[serde(default, alias = "include_ub", skip_serializing_if = "Option::is_none")]
    include_upper: Option<bool>,

    #[serde(default, alias = "vals", skip_serializing_if = "Option::is_none")]
    allowed: Option<Vec<Scalar>>,
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

impl ConstraintDescription {
    fn has_bounds(&self) -> bool {
        self.minval.is_some() || self.maxval.is_some()
    }

    fn has_inclusivity(&self) -> bool {
        self.include_lower.is_some() || self.include_upper.is_some()
    }

    fn render(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{self:?}"))
    }
}

impl TryFrom<ConstraintDescription> for ValueConstraint {
    type Error = SchemaError;

    fn try_from(desc: ConstraintDescription) -> Result<Self, Self::Error> {
        let kind = match desc.kind {
            Some(kind) => kind,
            None => match (desc.has_bounds(), desc.allowed.is_some()) {
                (true, false) => ConstraintKind::Range,
                (false, true) => ConstraintKind::Enumeration,
                _ => {
                    return Err(SchemaError::configuration(format!(
                        "Unable to parse valid values for {}. Make sure only a range \
                         (minval/maxval) or a list of allowed values is provided per entry.",
                        desc.render()
                    )));
                }
            },
        };

        match kind {
            ConstraintKind::Range => {
                if desc.allowed.is_some() {
                    return Err(SchemaError::configuration(format!(
                        "Range constraint {} must not list allowed values",
                        desc.render()
                    )));
                }
                Range::new(
                    desc.minval.flatten(),
                    desc.maxval.flatten(),
                    desc.include_lower.unwrap_or(true),
                    desc.include_upper.unwrap_or(true),
                )
                .map(ValueConstraint::Range)
            }
            ConstraintKind::Enumeration => {
                if desc.has_bounds() || desc.has_inclusivity() {
                    return Err(SchemaError::configuration(format!(
                        "Enumeration constraint {} must not define range bounds",
                        desc.render()
                    )));
                }
                let rendered = desc.render();
                let allowed = desc.allowed.ok_or_else(|| {
                    SchemaError::configuration(format!(
                        "Enumeration constraint {rendered} is missing its allowed values"
                    ))
                })?;
                Ok(ValueConstraint::Enumeration(Enumeration { allowed }))
            }
        }
    }
}

impl<'de> Deserialize<'de> for ValueConstraint {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let desc = ConstraintDescription::deserialize(deserializer)?;
        ValueConstraint::try_from(desc).map_err(serde::de::Error::custom)
    }
}
