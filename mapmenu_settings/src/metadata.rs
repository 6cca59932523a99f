// Copyright 2025 the Mapmenu Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Setting definitions.
//!
//! [`SettingDef`] describes one setting: its kind with bounds or options, its
//! default value, and the label and description shown by settings UIs.
//! [`SettingDefBuilder`] is the ergonomic way to make one.

use std::fmt;

use crate::error::SettingError;
use crate::value::SettingValue;

/// Extra check run after the built-in kind validation.
pub type ValidateFn = fn(&SettingValue) -> Result<(), String>;

/// Kind of a setting, with its constraints.
#[derive(Clone, Debug, PartialEq)]
pub enum SettingKind {
    /// `true` or `false`.
    Bool,
    /// Whole number with optional inclusive bounds.
    Int {
        /// Lower bound.
        min: Option<i64>,
        /// Upper bound.
        max: Option<i64>,
    },
    /// Floating point number with optional inclusive bounds.
    Float {
        /// Lower bound.
        min: Option<f64>,
        /// Upper bound.
        max: Option<f64>,
    },
    /// Free text.
    Str,
    /// One of a fixed list of strings.
    Choice {
        /// Allowed values, in display order.
        options: Vec<String>,
    },
    /// A `#RRGGBB` or `#RRGGBBAA` color.
    Color,
}

impl SettingKind {
    /// Short name of the kind.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int { .. } => "int",
            Self::Float { .. } => "float",
            Self::Str => "str",
            Self::Choice { .. } => "choice",
            Self::Color => "color",
        }
    }
}

/// Definition of a single setting.
#[derive(Clone)]
pub struct SettingDef {
    kind: SettingKind,
    default_value: SettingValue,
    label: String,
    description: String,
    validate_fn: Option<ValidateFn>,
}

impl SettingDef {
    /// Returns the kind and its constraints.
    #[must_use]
    #[inline]
    pub fn kind(&self) -> &SettingKind {
        &self.kind
    }

    /// Returns the default value.
    #[must_use]
    #[inline]
    pub fn default_value(&self) -> &SettingValue {
        &self.default_value
    }

    /// Returns the display label.
    #[must_use]
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the description.
    #[must_use]
    #[inline]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Validates `value` for the setting called `name`.
    ///
    /// Returns the value as it should be stored; integral floats are accepted
    /// for int settings and ints for float settings.
    pub fn validate(&self, name: &str, value: &SettingValue) -> Result<SettingValue, SettingError> {
        let mismatch = || SettingError::TypeMismatch {
            name: name.to_owned(),
            expected: self.kind.name(),
            found: value.type_name(),
        };
        let accepted = match &self.kind {
            SettingKind::Bool => SettingValue::Bool(value.as_bool().ok_or_else(mismatch)?),
            SettingKind::Int { min, max } => {
                let v = value.as_int().ok_or_else(mismatch)?;
                check_range(name, v as f64, min.map(|m| m as f64), max.map(|m| m as f64))?;
                SettingValue::Int(v)
            }
            SettingKind::Float { min, max } => {
                let v = value.as_float().ok_or_else(mismatch)?;
                if !v.is_finite() {
                    return Err(mismatch());
                }
                check_range(name, v, *min, *max)?;
                SettingValue::Float(v)
            }
            SettingKind::Str => SettingValue::Str(value.as_str().ok_or_else(mismatch)?.to_owned()),
            SettingKind::Choice { options } => {
                let s = value.as_str().ok_or_else(mismatch)?;
                if !options.iter().any(|o| o == s) {
                    return Err(SettingError::NotAnOption {
                        name: name.to_owned(),
                        options: options.clone(),
                    });
                }
                SettingValue::Str(s.to_owned())
            }
            SettingKind::Color => {
                let s = value.as_str().ok_or_else(mismatch)?;
                if !is_hex_color(s) {
                    return Err(SettingError::Rejected {
                        name: name.to_owned(),
                        reason: format!("{s:?} is not a #RRGGBB color"),
                    });
                }
                SettingValue::Str(s.to_owned())
            }
        };
        if let Some(f) = self.validate_fn {
            f(&accepted).map_err(|reason| SettingError::Rejected {
                name: name.to_owned(),
                reason,
            })?;
        }
        Ok(accepted)
    }
}

fn check_range(name: &str, v: f64, min: Option<f64>, max: Option<f64>) -> Result<(), SettingError> {
    if let Some(min) = min
        && v < min
    {
        return Err(SettingError::BelowMinimum {
            name: name.to_owned(),
            min,
        });
    }
    if let Some(max) = max
        && v > max
    {
        return Err(SettingError::AboveMaximum {
            name: name.to_owned(),
            max,
        });
    }
    Ok(())
}

fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#')
        .is_some_and(|h| matches!(h.len(), 6 | 8) && h.bytes().all(|b| b.is_ascii_hexdigit()))
}

// Manual Debug impl since the validation hook is a bare fn pointer
impl fmt::Debug for SettingDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SettingDef")
            .field("kind", &self.kind)
            .field("default_value", &self.default_value)
            .field("label", &self.label)
            .field("description", &self.description)
            .field("has_validate_fn", &self.validate_fn.is_some())
            .finish()
    }
}

/// Builder for [`SettingDef`].
///
/// # Example
///
/// ```rust
/// use mapmenu_settings::{SettingDefBuilder, SettingValue};
///
/// let def = SettingDefBuilder::int(2)
///     .range(0, 10)
///     .label("Decimal places")
///     .description("Number of decimal places in results")
///     .build();
///
/// assert!(def.validate("decimal_places", &SettingValue::Int(4)).is_ok());
/// assert!(def.validate("decimal_places", &SettingValue::Int(11)).is_err());
/// ```
#[derive(Debug)]
pub struct SettingDefBuilder {
    def: SettingDef,
}

impl SettingDefBuilder {
    fn with(kind: SettingKind, default_value: SettingValue) -> Self {
        Self {
            def: SettingDef {
                kind,
                default_value,
                label: String::new(),
                description: String::new(),
                validate_fn: None,
            },
        }
    }

    /// A bool setting.
    #[must_use]
    pub fn bool(default: bool) -> Self {
        Self::with(SettingKind::Bool, default.into())
    }

    /// An int setting without bounds.
    #[must_use]
    pub fn int(default: i64) -> Self {
        Self::with(SettingKind::Int { min: None, max: None }, default.into())
    }

    /// A float setting without bounds.
    #[must_use]
    pub fn float(default: f64) -> Self {
        Self::with(SettingKind::Float { min: None, max: None }, default.into())
    }

    /// A free-text setting.
    #[must_use]
    pub fn str(default: &str) -> Self {
        Self::with(SettingKind::Str, default.into())
    }

    /// A choice among `options`.
    #[must_use]
    pub fn choice(default: &str, options: &[&str]) -> Self {
        Self::with(
            SettingKind::Choice {
                options: options.iter().map(|o| (*o).to_owned()).collect(),
            },
            default.into(),
        )
    }

    /// A color setting.
    #[must_use]
    pub fn color(default: &str) -> Self {
        Self::with(SettingKind::Color, default.into())
    }

    /// Sets inclusive int bounds. Ignored for other kinds.
    #[must_use]
    pub fn range(mut self, min: i64, max: i64) -> Self {
        if let SettingKind::Int { .. } = self.def.kind {
            self.def.kind = SettingKind::Int {
                min: Some(min),
                max: Some(max),
            };
        }
        self
    }

    /// Sets inclusive float bounds. Ignored for other kinds.
    #[must_use]
    pub fn range_f64(mut self, min: f64, max: f64) -> Self {
        if let SettingKind::Float { .. } = self.def.kind {
            self.def.kind = SettingKind::Float {
                min: Some(min),
                max: Some(max),
            };
        }
        self
    }

    /// Sets the display label.
    #[must_use]
    pub fn label(mut self, label: &str) -> Self {
        label.clone_into(&mut self.def.label);
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: &str) -> Self {
        description.clone_into(&mut self.def.description);
        self
    }

    /// Adds a check run after kind validation.
    #[must_use]
    pub fn validate(mut self, f: ValidateFn) -> Self {
        self.def.validate_fn = Some(f);
        self
    }

    /// Builds the definition.
    #[must_use]
    pub fn build(self) -> SettingDef {
        self.def
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn int_bounds_and_coercion() {
        let def = SettingDefBuilder::int(2).range(0, 10).build();
        assert_eq!(
            def.validate("n", &SettingValue::Float(3.0)).unwrap(),
            SettingValue::Int(3)
        );
        assert!(matches!(
            def.validate("n", &SettingValue::Int(-1)),
            Err(SettingError::BelowMinimum { .. })
        ));
        assert!(matches!(
            def.validate("n", &SettingValue::Int(11)),
            Err(SettingError::AboveMaximum { .. })
        ));
        assert!(matches!(
            def.validate("n", &SettingValue::from("3")),
            Err(SettingError::TypeMismatch { expected: "int", found: "str", .. })
        ));
    }

    #[test]
    fn choice_and_color() {
        let def = SettingDefBuilder::choice("m", &["m", "km", "mi"]).build();
        assert!(def.validate("unit", &"km".into()).is_ok());
        let err = def.validate("unit", &"ft".into()).unwrap_err();
        assert_eq!(err.to_string(), "setting unit must be one of: m, km, mi");

        let color = SettingDefBuilder::color("#ff0000").build();
        assert!(color.validate("c", &"#00FF00".into()).is_ok());
        assert!(color.validate("c", &"#00FF00AA".into()).is_ok());
        assert!(color.validate("c", &"green".into()).is_err());
    }

    #[test]
    fn custom_hook_runs_after_kind_check() {
        fn even(v: &SettingValue) -> Result<(), String> {
            match v.as_int() {
                Some(i) if i % 2 == 0 => Ok(()),
                _ => Err("must be even".into()),
            }
        }
        let def = SettingDefBuilder::int(0).validate(even).label("Even").build();
        assert!(def.validate("e", &SettingValue::Int(4)).is_ok());
        assert!(matches!(
            def.validate("e", &SettingValue::Int(5)),
            Err(SettingError::Rejected { .. })
        ));
        assert_eq!(def.label(), "Even");
    }

    #[test]
    fn float_accepts_ints_and_rejects_nan() {
        let def = SettingDefBuilder::float(1.0).range_f64(0.0, 2.0).build();
        assert_eq!(def.validate("f", &SettingValue::Int(1)).unwrap(), SettingValue::Float(1.0));
        assert!(def.validate("f", &SettingValue::Float(f64::NAN)).is_err());
        assert!(def.validate("f", &SettingValue::Float(2.5)).is_err());
    }
}
