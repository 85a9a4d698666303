use thiserror::Error;

/// Identifies one of the two components of a `Position`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Component {
    Latitude,
    Longitude,
}

impl Component {
    /// Return the smallest value this component may take.
    pub fn min(&self) -> f64 {
        match self {
            Component::Latitude => -90.0,
            Component::Longitude => -180.0,
        }
    }

    /// Return the largest value this component may take.
    pub fn max(&self) -> f64 {
        match self {
            Component::Latitude => 90.0,
            Component::Longitude => 180.0,
        }
    }

    /// Return true if `value` lies within the inclusive range of this
    /// component. NaN is never in range.
    pub fn contains(&self, value: f64) -> bool {
        (self.min()..=self.max()).contains(&value)
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Component::Latitude => "Latitude",
            Component::Longitude => "Longitude",
        };
        write!(f, "{}", name)
    }
}

/// An error indicating that a latitude or longitude was outside of its
/// permitted range.
#[derive(Clone, Debug, Error, PartialEq)]
#[error("{component} {value} out of range [{}, {}]", .component.min(), .component.max())]
pub struct RangeError {
    component: Component,
    value: f64,
}

impl RangeError {
    pub(crate) fn new(component: Component, value: f64) -> Self {
        Self { component, value }
    }

    /// Return the component which was out of range.
    pub fn component(&self) -> Component {
        self.component
    }

    /// Return the offending value.
    pub fn value(&self) -> f64 {
        self.value
    }
}

/// Errors raised when a debug representation cannot be synthesized for a
/// type. These describe a programming mistake in the type's declaration,
/// not a runtime condition.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum DefinitionError {
    /// The type already has a debug representation installed.
    #[error("{type_name} already defines a debug representation")]
    AlreadyDefined { type_name: &'static str },
    /// The type never declared its constructor parameters.
    #[error("{type_name} does not declare its constructor parameters")]
    NoConstructor { type_name: &'static str },
    /// A constructor parameter has no accessor with the same name.
    #[error(
        "Cannot synthesize a debug representation for {type_name}: constructor parameter '{parameter}' has no matching accessor"
    )]
    MissingAccessor {
        type_name: &'static str,
        parameter: &'static str,
    },
    /// Two accessors were declared with the same name.
    #[error("{type_name} declares the accessor '{name}' more than once")]
    DuplicateAccessor {
        type_name: &'static str,
        name: &'static str,
    },
}

impl DefinitionError {
    /// Return the name of the type whose declaration was rejected.
    pub fn type_name(&self) -> &'static str {
        match *self {
            DefinitionError::AlreadyDefined { type_name } => type_name,
            DefinitionError::NoConstructor { type_name } => type_name,
            DefinitionError::MissingAccessor { type_name, .. } => type_name,
            DefinitionError::DuplicateAccessor { type_name, .. } => type_name,
        }
    }
}

/// An error indicating that a format specification could not be parsed.
#[derive(Clone, Debug, Eq, Error, PartialEq)]
#[error("Invalid format specification {spec:?}, the decimal places after '.' must be an integer from 0 to 65535")]
pub struct ParseFormatSpecError {
    spec: String,
}

impl ParseFormatSpecError {
    pub(crate) fn new(spec: &str) -> Self {
        Self {
            spec: spec.to_owned(),
        }
    }

    /// Return the specification which could not be parsed.
    pub fn spec(&self) -> &str {
        &self.spec
    }
}

/// Errors that can occur when parsing a `Position` from its encoded form.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ParsePositionError {
    /// The string was not a well-formed coordinate.
    #[error("Could not parse a position from string {0}")]
    Malformed(String),
    /// The coordinate was well-formed but out of range.
    #[error("Parsed position is invalid: {0}")]
    Range(#[from] RangeError),
}
