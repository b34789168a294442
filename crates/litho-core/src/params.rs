//! Module parameter bundle and active-module set.
//!
//! The host never hands the pipeline a typed config struct; it hands a
//! loosely-typed bundle keyed by module id and parameter id (think: what
//! a UI panel's form state looks like before validation). Unknown module
//! ids and unknown parameter ids are silently ignored per §7's
//! `ParameterMissing` policy — this type does not reject anything, it
//! just stores what it's given and lets `litho-ops` resolve it against
//! documented defaults.

use std::collections::{HashMap, HashSet};

/// A single parameter value as handed in from the host.
///
/// Stage code resolves these against the documented type/range for the
/// parameter in question; a value of the wrong shape is treated the same
/// as a missing parameter (falls back to default), not as an error.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    /// An integer-valued parameter (e.g. `cellSize`, `count`).
    Int(i64),
    /// A floating-point parameter (e.g. `exposure`, `amount`).
    Float(f64),
    /// A short enumerated/string parameter (e.g. `stock`, `feed`, a hex color).
    Str(String),
    /// An on/off parameter (e.g. `weighted`).
    Bool(bool),
}

impl ParamValue {
    /// Returns the value as `f64` if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Returns the value as `f32` if it is numeric.
    pub fn as_f32(&self) -> Option<f32> {
        self.as_f64().map(|v| v as f32)
    }

    /// Returns the value as `i64` if it is an integer.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Returns the value as a string slice.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Returns the value as a bool.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            Self::Str(s) => match s.as_str() {
                "on" | "true" => Some(true),
                "off" | "false" => Some(false),
                _ => None,
            },
            _ => None,
        }
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<f64> for ParamValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for ParamValue {
    fn from(v: f32) -> Self {
        Self::Float(v as f64)
    }
}

impl From<&str> for ParamValue {
    fn from(v: &str) -> Self {
        Self::Str(v.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

/// Mapping module id -> parameter id -> value.
///
/// Recognized modules and parameters are enumerated in `litho-ops`'s
/// defaulting tables; this type is deliberately ignorant of them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModuleParams {
    modules: HashMap<String, HashMap<String, ParamValue>>,
}

impl ModuleParams {
    /// An empty parameter bundle (every module falls back to defaults).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a single parameter value, creating the module entry if needed.
    pub fn set(&mut self, module: impl Into<String>, param: impl Into<String>, value: impl Into<ParamValue>) -> &mut Self {
        self.modules
            .entry(module.into())
            .or_default()
            .insert(param.into(), value.into());
        self
    }

    /// Looks up a parameter value, returning `None` if the module or
    /// parameter is unknown to this bundle (not to be confused with
    /// "unrecognized by the pipeline" — that's a `litho-ops` concern).
    pub fn get(&self, module: &str, param: &str) -> Option<&ParamValue> {
        self.modules.get(module)?.get(param)
    }

    /// Every module id that has at least one parameter set in this bundle.
    ///
    /// Used by hosts that derive an [`ActiveSet`] from "which modules did
    /// the preset/overrides touch" rather than tracking activation
    /// separately.
    pub fn module_ids(&self) -> impl Iterator<Item = &str> {
        self.modules.keys().map(String::as_str)
    }

    /// Merges `other` on top of `self`: parameters present in `other`
    /// override this bundle's values, everything else is kept.
    ///
    /// Used to layer `--set module.param=value` CLI overrides on top of a
    /// preset's bundle.
    pub fn layered_over(mut self, other: &ModuleParams) -> Self {
        for (module, params) in &other.modules {
            let entry = self.modules.entry(module.clone()).or_default();
            for (param, value) in params {
                entry.insert(param.clone(), value.clone());
            }
        }
        self
    }
}

/// A set of active module ids.
///
/// `halftone` and `press` are not members of this set in the usual
/// sense: they are always effectively active (§3) even when absent, so
/// membership here only gates the *other* modules (filmstock, velox,
/// grain, dotgain, registration, inkskip, paper, inkbleed, hickeys).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActiveSet(HashSet<String>);

impl ActiveSet {
    /// An empty active set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an active set from an iterator of module ids.
    pub fn from_ids<I, S>(ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(ids.into_iter().map(Into::into).collect())
    }

    /// Marks `module` as active.
    pub fn activate(&mut self, module: impl Into<String>) -> &mut Self {
        self.0.insert(module.into());
        self
    }

    /// `true` if `module` is a member of this set.
    pub fn contains(&self, module: &str) -> bool {
        self.0.contains(module)
    }

    /// `true` if no modules are active.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn get_returns_none_for_unknown_module() {
        let params = ModuleParams::new();
        assert!(params.get("filmstock", "stock").is_none());
    }

    #[test]
    fn set_then_get_roundtrips() {
        let mut params = ModuleParams::new();
        params.set("velox", "threshold", 0.6f32);
        assert_eq!(params.get("velox", "threshold").unwrap().as_f32(), Some(0.6));
    }

    #[test]
    fn layered_override_wins() {
        let mut base = ModuleParams::new();
        base.set("filmstock", "stock", "kodachrome");
        base.set("filmstock", "exposure", 0.0f32);

        let mut overrides = ModuleParams::new();
        overrides.set("filmstock", "stock", "trix");

        let merged = base.layered_over(&overrides);
        assert_eq!(merged.get("filmstock", "stock").unwrap().as_str(), Some("trix"));
        assert_eq!(merged.get("filmstock", "exposure").unwrap().as_f32(), Some(0.0));
    }

    #[test]
    fn module_ids_reflects_what_was_set() {
        let mut params = ModuleParams::new();
        params.set("velox", "threshold", 0.6f32);
        params.set("grain", "amount", 0.2f32);
        let mut ids: Vec<_> = params.module_ids().collect();
        ids.sort();
        assert_eq!(ids, ["grain", "velox"]);
    }

    #[test]
    fn active_set_membership() {
        let mut active = ActiveSet::from_ids(["grain", "velox"]);
        assert!(active.contains("grain"));
        assert!(!active.contains("halftone"));
        active.activate("halftone");
        assert!(active.contains("halftone"));
    }

    #[test]
    fn bool_param_accepts_on_off_strings() {
        let mut params = ModuleParams::new();
        params.set("grain", "weighted", "off");
        assert_eq!(params.get("grain", "weighted").unwrap().as_bool(), Some(false));
    }
}
