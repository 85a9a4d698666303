use crate::body::Body;
use crate::position::Position;
use serde_json::{json, Value};

const KIND: &str = "_kind";
const COORD_KIND: &str = "coord";

/// An extension trait for the `serde_json::Value` enum, which makes it
/// easier to read a `Position` out of a JSON value.
pub trait ValueExt {
    /// Convert the JSON value to a `Position`. Both the Haystack string
    /// encoding (`"c:37.545,-77.449"`) and the Hayson object encoding
    /// (`{"_kind": "coord", "lat": 37.545, "lng": -77.449}`) are accepted.
    /// Returns `None` if the value is neither, or if the coordinate is out
    /// of range.
    fn as_hs_position<B: Body>(&self) -> Option<Position<B>>;
    /// Returns true if the JSON value represents a valid `Position`.
    fn is_hs_position(&self) -> bool;
}

impl ValueExt for Value {
    fn as_hs_position<B: Body>(&self) -> Option<Position<B>> {
        match self {
            Value::String(s) => Position::from_encoded_json_string(s).ok(),
            Value::Object(obj) => {
                if obj.get(KIND).and_then(Value::as_str) != Some(COORD_KIND) {
                    return None;
                }
                let lat = obj.get("lat").and_then(Value::as_f64)?;
                let lng = obj.get("lng").and_then(Value::as_f64)?;
                Position::new(lat, lng).ok()
            }
            _ => None,
        }
    }

    fn is_hs_position(&self) -> bool {
        self.as_hs_position::<crate::body::Unspecified>().is_some()
    }
}

impl<B: Body> Position<B> {
    /// Return this position as a JSON string containing its Haystack
    /// encoding.
    pub fn to_json_value(&self) -> Value {
        Value::String(self.to_encoded_json_string())
    }

    /// Return this position in the Hayson object encoding.
    pub fn to_hayson(&self) -> Value {
        json!({
            KIND: COORD_KIND,
            "lat": self.latitude(),
            "lng": self.longitude(),
        })
    }
}

#[cfg(test)]
mod test {
    use super::ValueExt;
    use crate::{EarthPosition, Position};
    use serde_json::json;

    #[test]
    fn as_hs_position_from_string() {
        let val = json!("c:37.545,-77.449");
        let position: Position = val.as_hs_position().unwrap();
        assert_eq!(position.latitude(), 37.545);
        assert_eq!(position.longitude(), -77.449);
        assert!(val.is_hs_position());
    }

    #[test]
    fn as_hs_position_from_hayson() {
        let val = json!({"_kind": "coord", "lat": -4.5, "lng": 137.4});
        let position: EarthPosition = val.as_hs_position().unwrap();
        assert_eq!(position, EarthPosition::new(-4.5, 137.4).unwrap());
    }

    #[test]
    fn as_hs_position_rejects_other_values() {
        assert!(!json!("s:hello").is_hs_position());
        assert!(!json!("c:91,0").is_hs_position());
        assert!(!json!(45.0).is_hs_position());
        assert!(!json!({"_kind": "number", "lat": 1.0, "lng": 2.0}).is_hs_position());
        assert!(!json!({"_kind": "coord", "lat": 1.0}).is_hs_position());
        assert!(!json!({"lat": 1.0, "lng": 2.0}).is_hs_position());
    }

    #[test]
    fn to_json_value() {
        let position = EarthPosition::new(37.545, -77.449).unwrap();
        assert_eq!(position.to_json_value(), json!("c:37.545,-77.449"));
    }

    #[test]
    fn hayson_round_trip() {
        let position = EarthPosition::new(51.4779, -0.0015).unwrap();
        let value = position.to_hayson();
        assert_eq!(value["_kind"], "coord");
        assert_eq!(value.as_hs_position::<crate::Earth>(), Some(position));
    }
}
