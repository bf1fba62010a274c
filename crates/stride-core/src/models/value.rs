use std::fmt;

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wire token for the Not-Tested sentinel. NT is a deliberate clinical
/// outcome ("not administered") and must survive every serialization
/// round-trip as this exact string — never `null`, never `0`.
pub const NT_TOKEN: &str = "NT";

/// Protocol variant for walk-distance tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalkProtocol {
    TwoMinute,
    SixMinute,
}

impl WalkProtocol {
    pub fn label(&self) -> &'static str {
        match self {
            WalkProtocol::TwoMinute => "2 min",
            WalkProtocol::SixMinute => "6 min",
        }
    }
}

/// Resistance used for the weighted arm-curl test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CurlWeight {
    Lb5,
    Lb8,
}

impl CurlWeight {
    pub fn label(&self) -> &'static str {
        match self {
            CurlWeight::Lb5 => "5 lb",
            CurlWeight::Lb8 => "8 lb",
        }
    }
}

/// One recorded measurement: a plain number, a compound reading, or the
/// Not-Tested sentinel. Defaults to NT so that fields absent from a stored
/// record normalize to "not tested" at the deserialization boundary.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum MeasurementValue {
    #[default]
    NotTested,
    Number(f64),
    Walk {
        distance: f64,
        protocol: WalkProtocol,
    },
    Weighted {
        reps: f64,
        weight: CurlWeight,
    },
}

impl MeasurementValue {
    pub fn is_not_tested(&self) -> bool {
        matches!(self, MeasurementValue::NotTested)
    }

    /// The scoreable magnitude, if the measurement was administered.
    pub fn numeric(&self) -> Option<f64> {
        match self {
            MeasurementValue::NotTested => None,
            MeasurementValue::Number(v) => Some(*v),
            MeasurementValue::Walk { distance, .. } => Some(*distance),
            MeasurementValue::Weighted { reps, .. } => Some(*reps),
        }
    }
}

impl Serialize for MeasurementValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            MeasurementValue::NotTested => serializer.serialize_str(NT_TOKEN),
            MeasurementValue::Number(v) => serializer.serialize_f64(*v),
            MeasurementValue::Walk { distance, protocol } => {
                let mut st = serializer.serialize_struct("MeasurementValue", 2)?;
                st.serialize_field("distance", distance)?;
                st.serialize_field("protocol", protocol)?;
                st.end()
            }
            MeasurementValue::Weighted { reps, weight } => {
                let mut st = serializer.serialize_struct("MeasurementValue", 2)?;
                st.serialize_field("reps", reps)?;
                st.serialize_field("weight", weight)?;
                st.end()
            }
        }
    }
}

impl<'de> Deserialize<'de> for MeasurementValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> Visitor<'de> for ValueVisitor {
            type Value = MeasurementValue;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a number, the string \"NT\", or a compound reading object")
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(MeasurementValue::Number(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(MeasurementValue::Number(v as f64))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(MeasurementValue::Number(v as f64))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                if v == NT_TOKEN {
                    Ok(MeasurementValue::NotTested)
                } else {
                    Err(de::Error::invalid_value(de::Unexpected::Str(v), &self))
                }
            }

            // A stored null means the field was never filled in: NT.
            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(MeasurementValue::NotTested)
            }

            fn visit_map<M: MapAccess<'de>>(self, mut map: M) -> Result<Self::Value, M::Error> {
                let mut distance: Option<f64> = None;
                let mut protocol: Option<WalkProtocol> = None;
                let mut reps: Option<f64> = None;
                let mut weight: Option<CurlWeight> = None;

                while let Some(key) = map.next_key::<String>()? {
                    match key.as_str() {
                        "distance" => distance = Some(map.next_value()?),
                        "protocol" => protocol = Some(map.next_value()?),
                        "reps" => reps = Some(map.next_value()?),
                        "weight" => weight = Some(map.next_value()?),
                        other => {
                            return Err(de::Error::unknown_field(
                                other,
                                &["distance", "protocol", "reps", "weight"],
                            ));
                        }
                    }
                }

                match (distance, protocol, reps, weight) {
                    (Some(distance), Some(protocol), None, None) => {
                        Ok(MeasurementValue::Walk { distance, protocol })
                    }
                    (None, None, Some(reps), Some(weight)) => {
                        Ok(MeasurementValue::Weighted { reps, weight })
                    }
                    _ => Err(de::Error::custom(
                        "expected {distance, protocol} or {reps, weight}",
                    )),
                }
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}

/// Left/right side of a bilateral measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub const BOTH: [Side; 2] = [Side::Left, Side::Right];

    pub fn suffix(&self) -> &'static str {
        match self {
            Side::Left => "(L)",
            Side::Right => "(R)",
        }
    }
}

/// Independent left/right readings; each side is NT-eligible on its own.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bilateral {
    #[serde(default)]
    pub left: MeasurementValue,
    #[serde(default)]
    pub right: MeasurementValue,
}

impl Bilateral {
    pub fn side(&self, side: Side) -> &MeasurementValue {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nt_round_trips_as_the_string_token() {
        let json = serde_json::to_string(&MeasurementValue::NotTested).unwrap();
        assert_eq!(json, "\"NT\"");
        let back: MeasurementValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, MeasurementValue::NotTested);
    }

    #[test]
    fn nt_is_never_zero_or_null() {
        let v: serde_json::Value = serde_json::to_value(MeasurementValue::NotTested).unwrap();
        assert_ne!(v, serde_json::json!(0));
        assert_ne!(v, serde_json::Value::Null);
    }

    #[test]
    fn null_normalizes_to_nt() {
        let v: MeasurementValue = serde_json::from_str("null").unwrap();
        assert_eq!(v, MeasurementValue::NotTested);
    }

    #[test]
    fn plain_numbers_round_trip() {
        let v: MeasurementValue = serde_json::from_str("23.5").unwrap();
        assert_eq!(v, MeasurementValue::Number(23.5));
        let v: MeasurementValue = serde_json::from_str("42").unwrap();
        assert_eq!(v.numeric(), Some(42.0));
    }

    #[test]
    fn walk_reading_round_trips() {
        let v = MeasurementValue::Walk {
            distance: 412.0,
            protocol: WalkProtocol::SixMinute,
        };
        let json = serde_json::to_string(&v).unwrap();
        let back: MeasurementValue = serde_json::from_str(&json).unwrap();
        assert_eq!(back, v);
        assert_eq!(back.numeric(), Some(412.0));
    }

    #[test]
    fn weighted_reading_round_trips() {
        let v = MeasurementValue::Weighted {
            reps: 16.0,
            weight: CurlWeight::Lb8,
        };
        let json = serde_json::to_string(&v).unwrap();
        assert_eq!(serde_json::from_str::<MeasurementValue>(&json).unwrap(), v);
    }

    #[test]
    fn arbitrary_strings_are_rejected() {
        assert!(serde_json::from_str::<MeasurementValue>("\"nt\"").is_err());
        assert!(serde_json::from_str::<MeasurementValue>("\"none\"").is_err());
    }

    #[test]
    fn mixed_compound_fields_are_rejected() {
        let json = r#"{"distance": 100.0, "weight": "lb5"}"#;
        assert!(serde_json::from_str::<MeasurementValue>(json).is_err());
    }

    #[test]
    fn bilateral_sides_default_to_nt_independently() {
        let b: Bilateral = serde_json::from_str(r#"{"left": 31.0}"#).unwrap();
        assert_eq!(b.left, MeasurementValue::Number(31.0));
        assert!(b.right.is_not_tested());
    }
}
