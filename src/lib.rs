//! # Overview
//! This crate provides `Position`, an immutable latitude/longitude value
//! which is validated when it is created, and which knows how to render
//! itself for people (`45.0° N, 90.0° W`) and for developers
//! (`EarthPosition(latitude=45.0, longitude=-90.0)`).
//!
//! Positions can be tagged with the body they belong to, using
//! `EarthPosition` or `MarsPosition`. Tagging changes the type and the
//! debug name of a position, and nothing else.
//!
//! The debug representation is built by the `repr` module, which can
//! synthesize the same kind of representation for any type that declares
//! its constructor parameters and matching accessors.
//!
//! # Usage
//! ```rust
//! use geoposition::{EarthPosition, Position};
//!
//! let greenwich = EarthPosition::new(51.4779, -0.0015).unwrap();
//! assert_eq!(greenwich.to_string(), "51.4779° N, 0.0015° W");
//! assert_eq!(format!("{:.1}", greenwich), "51.5° N, 0.0° W");
//! assert_eq!(greenwich.format_spec(".2").unwrap(), "51.48° N, 0.00° W");
//! assert_eq!(
//!     format!("{:?}", greenwich),
//!     "EarthPosition(latitude=51.4779, longitude=-0.0015)"
//! );
//!
//! let err = Position::<geoposition::Unspecified>::new(91.0, 0.0).unwrap_err();
//! assert_eq!(err.to_string(), "Latitude 91 out of range [-90, 90]");
//! ```
//!
//! # Features
//! - `json` (default): conversions between `Position` and
//!   `serde_json::Value`, through the `ValueExt` trait.

mod body;
mod err;
mod position;
pub mod repr;
#[cfg(feature = "json")]
mod value_ext;

pub use body::{Body, Earth, Mars, Unspecified};
pub use err::{
    Component, DefinitionError, ParseFormatSpecError, ParsePositionError,
    RangeError,
};
pub use position::{
    EarthPosition, LatitudeHemisphere, LongitudeHemisphere, MarsPosition,
    Position, DEFAULT_DECIMAL_PLACES,
};
pub use repr::{auto_repr, AutoRepr, Definition, ReprSlot};
#[cfg(feature = "json")]
pub use value_ext::ValueExt;
