use crate::body::{Body, Earth, Mars, Unspecified};
use crate::err::{
    Component, ParseFormatSpecError, ParsePositionError, RangeError,
};
use crate::repr::{Definition, ReprSlot};
use std::convert::TryFrom;
use std::fmt;
use std::marker::PhantomData;

/// Decimal places used by `Position::format_spec` when the specification
/// does not give any.
pub const DEFAULT_DECIMAL_PLACES: usize = 2;

const HAYSTACK_PREFIX: &str = "c:";

/// A `Position` on Earth.
pub type EarthPosition = Position<Earth>;

/// A `Position` on Mars.
pub type MarsPosition = Position<Mars>;

/// An immutable, validated geographic position.
///
/// The latitude is always within [-90, 90] and the longitude within
/// [-180, 180]. `B` records which body the position belongs to.
#[derive(Clone, Copy, PartialEq)]
pub struct Position<B = Unspecified> {
    latitude: f64,
    longitude: f64,
    body: PhantomData<B>,
}

impl<B: Body> Position<B> {
    /// Create a new `Position`, returning an error if either component is
    /// out of range.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self, RangeError> {
        let latitude = check_range(Component::Latitude, latitude)?;
        let longitude = check_range(Component::Longitude, longitude)?;
        Ok(Self {
            latitude,
            longitude,
            body: PhantomData,
        })
    }

    /// Return the latitude of this `Position`, in degrees.
    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    /// Return the longitude of this `Position`, in degrees.
    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Return the hemisphere of the latitude. A latitude of exactly zero is
    /// reported as `South`.
    pub fn latitude_hemisphere(&self) -> LatitudeHemisphere {
        if self.latitude > 0.0 {
            LatitudeHemisphere::North
        } else {
            LatitudeHemisphere::South
        }
    }

    /// Return the hemisphere of the longitude. A longitude of exactly zero
    /// is reported as `West`.
    pub fn longitude_hemisphere(&self) -> LongitudeHemisphere {
        if self.longitude > 0.0 {
            LongitudeHemisphere::East
        } else {
            LongitudeHemisphere::West
        }
    }

    /// Render this position with a fixed number of decimal places.
    ///
    /// `spec` has the shape `[prefix].[N]`, where `N` is the number of
    /// decimal places. `N` defaults to 2 when there is no `.` or nothing
    /// follows it, and may be at most 65535. The prefix is accepted and
    /// ignored.
    pub fn format_spec(&self, spec: &str) -> Result<String, ParseFormatSpecError> {
        let places = decimal_places(spec)?;
        Ok(format!("{:.*}", places, self))
    }

    /// Return the same position without a body.
    pub fn untagged(self) -> Position {
        self.with_body()
    }

    /// Return the same position, tagged with the body `C`.
    pub fn with_body<C: Body>(self) -> Position<C> {
        Position {
            latitude: self.latitude,
            longitude: self.longitude,
            body: PhantomData,
        }
    }

    /// Return the Haystack encoding of this position, such as
    /// `c:37.545,-77.449`.
    pub fn to_encoded_json_string(&self) -> String {
        format!("{}{},{}", HAYSTACK_PREFIX, self.latitude, self.longitude)
    }

    /// Parse a position from its Haystack encoding, such as
    /// `c:37.545,-77.449`.
    pub fn from_encoded_json_string(
        encoded: &str,
    ) -> Result<Self, ParsePositionError> {
        let malformed = || ParsePositionError::Malformed(encoded.to_owned());

        let components = encoded
            .trim()
            .strip_prefix(HAYSTACK_PREFIX)
            .ok_or_else(malformed)?;
        let mut split = components.split(',');
        let latitude = split
            .next()
            .and_then(parse_component)
            .ok_or_else(malformed)?;
        let longitude = split
            .next()
            .and_then(parse_component)
            .ok_or_else(malformed)?;

        if split.next().is_some() {
            return Err(malformed());
        }

        Ok(Self::new(latitude, longitude)?)
    }
}

fn check_range(component: Component, value: f64) -> Result<f64, RangeError> {
    if component.contains(value) {
        Ok(value)
    } else {
        tracing::debug!(%component, value, "rejected out of range component");
        Err(RangeError::new(component, value))
    }
}

fn parse_component(s: &str) -> Option<f64> {
    s.trim().parse().ok()
}

// Runtime format precision is bounded by `u16`.
fn decimal_places(spec: &str) -> Result<usize, ParseFormatSpecError> {
    match spec.split_once('.') {
        None | Some((_, "")) => Ok(DEFAULT_DECIMAL_PLACES),
        Some((_prefix, places)) => places
            .parse::<u16>()
            .map(usize::from)
            .map_err(|_| ParseFormatSpecError::new(spec)),
    }
}

impl<B: Body> TryFrom<(f64, f64)> for Position<B> {
    type Error = RangeError;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self, Self::Error> {
        Self::new(latitude, longitude)
    }
}

/// Renders as `45.0° N, 90.0° W`. A precision, as in `{:.1}`, fixes the
/// number of decimal places of both components.
///
/// Without a precision each component uses the `f64` `Debug` form, so very
/// small magnitudes render in exponent notation (`1e-9° N`).
impl<B: Body> fmt::Display for Position<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let latitude = self.latitude.abs();
        let longitude = self.longitude.abs();
        let ns = self.latitude_hemisphere();
        let ew = self.longitude_hemisphere();

        match f.precision() {
            Some(places) => write!(
                f,
                "{:.*}° {}, {:.*}° {}",
                places, latitude, ns, places, longitude, ew
            ),
            None => write!(f, "{:?}° {}, {:?}° {}", latitude, ns, longitude, ew),
        }
    }
}

static POSITION_REPR: ReprSlot<Position> = ReprSlot::new();

fn position_definition() -> Definition<Position> {
    Definition::<Position>::new(Unspecified::POSITION_NAME)
        .parameters(&["latitude", "longitude"])
        .accessor("latitude", |position| Box::new(position.latitude()))
        .accessor("longitude", |position| Box::new(position.longitude()))
}

/// Renders as `EarthPosition(latitude=45.0, longitude=-90.0)`, using the
/// name of the body-specific type.
impl<B: Body> fmt::Debug for Position<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        POSITION_REPR.get_or_apply(position_definition).fmt_as(
            B::POSITION_NAME,
            &self.untagged(),
            f,
        )
    }
}

/// The hemisphere of a latitude.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LatitudeHemisphere {
    North,
    South,
}

impl LatitudeHemisphere {
    /// Return the hemisphere letter, `N` or `S`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LatitudeHemisphere::North => "N",
            LatitudeHemisphere::South => "S",
        }
    }
}

impl fmt::Display for LatitudeHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The hemisphere of a longitude.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum LongitudeHemisphere {
    East,
    West,
}

impl LongitudeHemisphere {
    /// Return the hemisphere letter, `E` or `W`.
    pub fn as_str(&self) -> &'static str {
        match self {
            LongitudeHemisphere::East => "E",
            LongitudeHemisphere::West => "W",
        }
    }
}

impl fmt::Display for LongitudeHemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::{
        EarthPosition, LatitudeHemisphere, LongitudeHemisphere, MarsPosition,
        Position,
    };
    use crate::body::Earth;
    use crate::err::{Component, ParsePositionError, RangeError};
    use std::convert::TryFrom;

    fn new_position(latitude: f64, longitude: f64) -> Result<Position, RangeError> {
        Position::new(latitude, longitude)
    }

    fn position(latitude: f64, longitude: f64) -> Position {
        new_position(latitude, longitude).unwrap()
    }

    #[test]
    fn accessors_return_exact_inputs() {
        let latitudes = [-90.0, -89.999999, -45.5, -0.0, 0.0, 1e-9, 12.3456789, 90.0];
        let longitudes = [-180.0, -179.25, -1e-12, 0.0, 77.449, 179.999999, 180.0];

        for &latitude in &latitudes {
            for &longitude in &longitudes {
                let p = position(latitude, longitude);
                assert_eq!(p.latitude().to_bits(), latitude.to_bits());
                assert_eq!(p.longitude().to_bits(), longitude.to_bits());
            }
        }
    }

    #[test]
    fn out_of_range_latitude_fails() {
        for &latitude in &[90.0001, -91.0, 1000.0, f64::NAN, f64::INFINITY] {
            let err = new_position(latitude, 0.0).unwrap_err();
            assert_eq!(err.component(), Component::Latitude);
        }
    }

    #[test]
    fn out_of_range_longitude_fails() {
        for &longitude in &[180.0001, -181.0, 1000.0, f64::NAN, f64::NEG_INFINITY] {
            let err = new_position(0.0, longitude).unwrap_err();
            assert_eq!(err.component(), Component::Longitude);
        }
    }

    #[test]
    fn range_error_identifies_value() {
        let err = new_position(1000.0, 0.0).unwrap_err();
        assert_eq!(err.value(), 1000.0);
        assert!(err.to_string().contains("Latitude 1000"));
    }

    #[test]
    fn latitude_is_checked_first() {
        let err = new_position(-91.0, 181.0).unwrap_err();
        assert_eq!(err.component(), Component::Latitude);
    }

    #[test]
    fn latitude_hemisphere() {
        assert_eq!(
            position(45.0, 0.0).latitude_hemisphere(),
            LatitudeHemisphere::North
        );
        assert_eq!(
            position(-45.0, 0.0).latitude_hemisphere(),
            LatitudeHemisphere::South
        );
        assert_eq!(position(0.0, 0.0).latitude_hemisphere().as_str(), "S");
        assert_eq!(
            position(-0.0, 0.0).latitude_hemisphere(),
            LatitudeHemisphere::South
        );
    }

    #[test]
    fn longitude_hemisphere() {
        assert_eq!(
            position(0.0, 90.0).longitude_hemisphere(),
            LongitudeHemisphere::East
        );
        assert_eq!(
            position(0.0, -90.0).longitude_hemisphere(),
            LongitudeHemisphere::West
        );
        assert_eq!(position(0.0, 0.0).longitude_hemisphere().as_str(), "W");
        assert_eq!(
            position(0.0, -0.0).longitude_hemisphere(),
            LongitudeHemisphere::West
        );
    }

    #[test]
    fn default_rendering() {
        assert_eq!(position(45.0, -90.0).to_string(), "45.0° N, 90.0° W");
        assert_eq!(
            position(-33.8688, 151.2093).to_string(),
            "33.8688° S, 151.2093° E"
        );
        assert_eq!(position(0.0, 0.0).to_string(), "0.0° S, 0.0° W");
        assert_eq!(position(-0.0, -0.0).to_string(), "0.0° S, 0.0° W");
    }

    #[test]
    fn default_rendering_of_tiny_values_uses_exponent() {
        assert_eq!(position(1e-9, -1e-9).to_string(), "1e-9° N, 1e-9° W");
    }

    #[test]
    fn precision_rendering() {
        let p = position(45.12345, -90.6789);
        assert_eq!(format!("{:.1}", p), "45.1° N, 90.7° W");
        assert_eq!(format!("{:.0}", p), "45° N, 91° W");
    }

    #[test]
    fn format_spec_decimal_places() {
        let p = position(45.12345, -90.6789);
        assert_eq!(p.format_spec(".1").unwrap(), "45.1° N, 90.7° W");
        assert_eq!(p.format_spec(".3").unwrap(), "45.123° N, 90.679° W");
    }

    #[test]
    fn format_spec_defaults_to_two_places() {
        let p = position(45.12345, -90.6789);
        assert_eq!(p.format_spec("").unwrap(), "45.12° N, 90.68° W");
        assert_eq!(p.format_spec(".").unwrap(), "45.12° N, 90.68° W");
        assert_eq!(p.format_spec("anything").unwrap(), "45.12° N, 90.68° W");
    }

    #[test]
    fn format_spec_ignores_prefix() {
        let p = position(45.12345, -90.6789);
        assert_eq!(p.format_spec("xyz.1").unwrap(), p.format_spec(".1").unwrap());
    }

    #[test]
    fn format_spec_rejects_bad_places() {
        let p = position(45.0, -90.0);
        let err = p.format_spec(".two").unwrap_err();
        assert_eq!(err.spec(), ".two");
        assert!(p.format_spec(".-1").is_err());
    }

    #[test]
    fn format_spec_rejects_oversized_places() {
        let p = position(45.0, -90.0);
        let err = p.format_spec(".70000").unwrap_err();
        assert_eq!(err.spec(), ".70000");

        let rendered = p.format_spec(".1000").unwrap();
        assert!(rendered.starts_with("45.000"));
        assert!(rendered.ends_with("° W"));
    }

    #[test]
    fn debug_uses_body_type_name() {
        let earth = EarthPosition::new(45.0, -90.0).unwrap();
        assert_eq!(
            format!("{:?}", earth),
            "EarthPosition(latitude=45.0, longitude=-90.0)"
        );

        let rendered = format!("{:?}", earth);
        assert!(!rendered.starts_with("Position("));
        assert!(!rendered.contains("MarsPosition"));

        let mars = MarsPosition::new(-4.5, 137.4).unwrap();
        assert_eq!(
            format!("{:?}", mars),
            "MarsPosition(latitude=-4.5, longitude=137.4)"
        );

        assert_eq!(
            format!("{:?}", position(1.0, 2.0)),
            "Position(latitude=1.0, longitude=2.0)"
        );
    }

    #[test]
    fn with_body_keeps_components() {
        let earth: EarthPosition = position(12.5, -7.25).with_body::<Earth>();
        assert_eq!(earth.latitude(), 12.5);
        assert_eq!(earth.longitude(), -7.25);
        assert_eq!(earth.untagged(), position(12.5, -7.25));
    }

    #[test]
    fn try_from_tuple() {
        let p: Position = Position::try_from((10.0, 20.0)).unwrap();
        assert_eq!(p, position(10.0, 20.0));
        assert!(EarthPosition::try_from((100.0, 20.0)).is_err());
    }

    #[test]
    fn encoded_json_string() {
        let p = position(37.545, -77.449);
        assert_eq!(p.to_encoded_json_string(), "c:37.545,-77.449");

        let parsed: Position =
            Position::from_encoded_json_string("c:37.545,-77.449").unwrap();
        assert_eq!(parsed, p);

        let spaced: Position =
            Position::from_encoded_json_string(" c:37.545, -77.449 ").unwrap();
        assert_eq!(spaced, p);
    }

    #[test]
    fn encoded_json_string_malformed() {
        for &encoded in &["37.545,-77.449", "c:37.545", "c:1,2,3", "c:a,b", "c:", ""] {
            let err = EarthPosition::from_encoded_json_string(encoded).unwrap_err();
            assert_eq!(err, ParsePositionError::Malformed(encoded.to_owned()));
        }
    }

    #[test]
    fn encoded_json_string_out_of_range() {
        let err = MarsPosition::from_encoded_json_string("c:91,0").unwrap_err();
        match err {
            ParsePositionError::Range(range_err) => {
                assert_eq!(range_err.component(), Component::Latitude)
            }
            _ => panic!(),
        }
    }

    #[test]
    fn shared_reads_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Position>();
        assert_send_sync::<EarthPosition>();

        let p = EarthPosition::new(51.4779, -0.0015).unwrap();
        let shared = &p;
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(move || {
                    assert_eq!(shared.latitude(), 51.4779);
                    assert_eq!(shared.to_string(), "51.4779° N, 0.0015° W");
                    assert_eq!(
                        format!("{:?}", shared),
                        "EarthPosition(latitude=51.4779, longitude=-0.0015)"
                    );
                });
            }
        });
    }
}
