//! Parameter introspection for units under test.
//!
//! A unit exposes its parameters as an ordered, index-addressed list. The
//! index order is the unit's own enumeration order and is what the
//! [binder](crate::binder) walks when applying a test case's bindings.
//!
//! # Example
//!
//! ```rust
//! use oro_core::{ParamDescriptor, ParameterInfo};
//!
//! struct Level {
//!     gain: f32,
//! }
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::linear("gain", "Gain", 0.0, 1.0, 0.7)),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         match index {
//!             0 => self.gain,
//!             _ => 0.0,
//!         }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if index == 0 {
//!             self.gain = value.clamp(0.0, 1.0);
//!         }
//!     }
//! }
//!
//! let level = Level { gain: 0.7 };
//! assert_eq!(level.find_param_by_name("GAIN"), Some(0));
//! ```

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParamUnit {
    /// Decibels (dB).
    Decibels,
    /// Hertz (Hz).
    Hertz,
    /// Milliseconds (ms).
    Milliseconds,
    /// Percentage (%).
    Percent,
    /// Unitless value.
    #[default]
    None,
}

impl ParamUnit {
    /// Suffix appended when formatting a value of this unit.
    pub fn suffix(self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::Percent => "%",
            ParamUnit::None => "",
        }
    }
}

/// Metadata for a single exposed parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Name used by parameter bindings (e.g., `"gain"`).
    pub name: &'static str,
    /// Short display name, also accepted by case-insensitive lookup.
    pub short_name: &'static str,
    /// Unit type for display.
    pub unit: ParamUnit,
    /// Minimum allowed value.
    pub min: f32,
    /// Maximum allowed value.
    pub max: f32,
    /// Value after `prepare`.
    pub default: f32,
}

impl ParamDescriptor {
    /// Unitless linear parameter.
    pub const fn linear(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min,
            max,
            default,
        }
    }

    /// Time parameter in milliseconds.
    pub const fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
        }
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// ```rust
    /// use oro_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::linear("gain", "Gain", 0.0, 1.0, 0.7);
    /// assert_eq!(desc.clamp(1.5), 1.0);
    /// assert_eq!(desc.clamp(-0.5), 0.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Formats a value with this parameter's unit suffix.
    pub fn format_value(&self, value: f32) -> String {
        format!("{:.3}{}", value, self.unit.suffix())
    }
}

/// Trait for units that expose introspectable parameters.
///
/// Parameters are addressed by zero-based index; the index order must stay
/// stable for the lifetime of the unit. Together with
/// [`AudioUnit`](crate::AudioUnit) this forms the capability interface the
/// harness consumes: `param_count`/`param_info` enumerate, `get_param` reads
/// the current value and `set_param` is the setter.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, `None` when out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index`.
    ///
    /// Returns `0.0` for out-of-range indices.
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamping to its range.
    ///
    /// Out-of-range indices are ignored.
    fn set_param(&mut self, index: usize, value: f32);

    /// Finds a parameter by exact name.
    fn find_param_exact(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.name == name))
    }

    /// Finds a parameter index by name (case-insensitive).
    ///
    /// Matches against both [`ParamDescriptor::name`] and
    /// [`ParamDescriptor::short_name`].
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        for i in 0..self.param_count() {
            if let Some(desc) = self.param_info(i)
                && (desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name))
            {
                return Some(i);
            }
        }
        None
    }
}
