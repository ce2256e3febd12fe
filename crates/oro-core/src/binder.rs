//! Applies named parameter bindings to a unit.
//!
//! Bindings are resolved to parameter indices first (exact name, then a
//! case-insensitive match on name or short name). The unit's parameters are
//! then visited in the unit's own enumeration order and each receives the
//! value of the *last* binding that resolved to it. Parameters without a
//! binding keep their current value.

use crate::case::ParamBinding;
use crate::error::ConfigError;
use crate::param_info::ParameterInfo;

/// What to do with a binding whose name matches no exposed parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BindPolicy {
    /// Reject the whole bind with [`ConfigError::UnknownParameter`] before
    /// anything is applied.
    #[default]
    Strict,
    /// Log the binding at `warn` level and skip it.
    Lenient,
}

fn resolve<U: ParameterInfo + ?Sized>(unit: &U, name: &str) -> Option<usize> {
    unit.find_param_exact(name)
        .or_else(|| unit.find_param_by_name(name))
}

/// Applies `bindings` to `unit`.
///
/// Returns the number of parameters that received a value.
pub fn bind_all<U: ParameterInfo + ?Sized>(
    unit: &mut U,
    bindings: &[ParamBinding],
    policy: BindPolicy,
) -> Result<usize, ConfigError> {
    let resolved: Vec<Option<usize>> = bindings.iter().map(|b| resolve(&*unit, &b.name)).collect();

    for (binding, index) in bindings.iter().zip(&resolved) {
        if index.is_none() {
            match policy {
                BindPolicy::Strict => {
                    return Err(ConfigError::UnknownParameter {
                        name: binding.name.clone(),
                    });
                }
                BindPolicy::Lenient => {
                    tracing::warn!(param = %binding.name, "ignoring binding for unknown parameter");
                }
            }
        }
    }

    let mut applied = 0;
    for param in 0..unit.param_count() {
        let last = bindings
            .iter()
            .zip(&resolved)
            .rev()
            .find(|(_, index)| **index == Some(param));
        if let Some((binding, _)) = last {
            tracing::debug!(param = %binding.name, value = binding.value, "binding parameter");
            unit.set_param(param, binding.value);
            applied += 1;
        }
    }
    Ok(applied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param_info::ParamDescriptor;

    /// Records the order in which parameters were set.
    struct Recorder {
        values: [f32; 3],
        log: Vec<usize>,
    }

    impl Recorder {
        fn new() -> Self {
            Self {
                values: [0.1, 0.2, 0.3],
                log: Vec::new(),
            }
        }
    }

    impl ParameterInfo for Recorder {
        fn param_count(&self) -> usize {
            3
        }

        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            match index {
                0 => Some(ParamDescriptor::linear("gain", "Gain", 0.0, 1.0, 0.1)),
                1 => Some(ParamDescriptor::linear("tone", "Tone", 0.0, 1.0, 0.2)),
                2 => Some(ParamDescriptor::linear("drive", "Drv", 0.0, 1.0, 0.3)),
                _ => None,
            }
        }

        fn get_param(&self, index: usize) -> f32 {
            self.values.get(index).copied().unwrap_or(0.0)
        }

        fn set_param(&mut self, index: usize, value: f32) {
            if index < 3 {
                self.values[index] = value;
                self.log.push(index);
            }
        }
    }

    #[test]
    fn applies_in_unit_order() {
        let mut unit = Recorder::new();
        let bindings = vec![
            ParamBinding::new("drive", 0.9),
            ParamBinding::new("gain", 0.5),
        ];
        let applied = bind_all(&mut unit, &bindings, BindPolicy::Strict).unwrap();
        assert_eq!(applied, 2);
        assert_eq!(unit.log, vec![0, 2]);
        assert_eq!(unit.get_param(0), 0.5);
        assert_eq!(unit.get_param(1), 0.2, "unbound parameter keeps its value");
        assert_eq!(unit.get_param(2), 0.9);
    }

    #[test]
    fn last_duplicate_wins() {
        let mut unit = Recorder::new();
        let bindings = vec![
            ParamBinding::new("gain", 0.4),
            ParamBinding::new("Gain", 0.6),
            ParamBinding::new("gain", 0.8),
        ];
        bind_all(&mut unit, &bindings, BindPolicy::Strict).unwrap();
        assert_eq!(unit.get_param(0), 0.8);
        assert_eq!(unit.log, vec![0], "each parameter is set at most once");
    }

    #[test]
    fn strict_rejects_unknown_before_applying() {
        let mut unit = Recorder::new();
        let bindings = vec![
            ParamBinding::new("gain", 0.4),
            ParamBinding::new("cutoff", 1000.0),
        ];
        let err = bind_all(&mut unit, &bindings, BindPolicy::Strict).unwrap_err();
        assert_eq!(
            err,
            ConfigError::UnknownParameter {
                name: "cutoff".to_string()
            }
        );
        assert!(unit.log.is_empty());
    }

    #[test]
    fn lenient_ignores_unknown() {
        let mut unit = Recorder::new();
        let bindings = vec![
            ParamBinding::new("cutoff", 1000.0),
            ParamBinding::new("tone", 0.7),
        ];
        let applied = bind_all(&mut unit, &bindings, BindPolicy::Lenient).unwrap();
        assert_eq!(applied, 1);
        assert_eq!(unit.get_param(1), 0.7);
    }

    #[test]
    fn short_name_resolves() {
        let mut unit = Recorder::new();
        bind_all(&mut unit, &[ParamBinding::new("drv", 1.0)], BindPolicy::Strict).unwrap();
        assert_eq!(unit.get_param(2), 1.0);
    }
}
