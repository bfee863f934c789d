//! Measurement parameter reference data

use serde::{Deserialize, Serialize};

/// A measurement parameter and how its values are referenced
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    /// Parameter code, e.g. `"72019"`
    pub code: String,

    /// Values are measured as depth below land surface
    pub below_land_surface: bool,

    /// Values are measured as elevation above a vertical datum
    pub above_datum: bool,
}

impl Parameter {
    /// Creates a new parameter
    pub fn new(code: impl Into<String>, below_land_surface: bool, above_datum: bool) -> Self {
        Self {
            code: code.into(),
            below_land_surface,
            above_datum,
        }
    }
}

/// Ordered, read-only set of parameters fetched once per export
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    parameters: Vec<Parameter>,
}

impl ParameterSet {
    /// Creates a parameter set preserving the given order
    pub fn new(parameters: Vec<Parameter>) -> Self {
        Self { parameters }
    }

    /// Iterates the parameters in order
    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.parameters.iter()
    }

    /// Returns the parameter codes in order
    pub fn codes(&self) -> Vec<String> {
        self.parameters.iter().map(|p| p.code.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }
}

impl From<Vec<Parameter>> for ParameterSet {
    fn from(parameters: Vec<Parameter>) -> Self {
        Self::new(parameters)
    }
}
