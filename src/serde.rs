use crate::Value;
use core::fmt;
use core::str::FromStr;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// Serializes a `Value` as its exact decimal string, the only representation
/// that survives a round trip without precision loss.
impl Serialize for Value {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

struct ValueVisitor;

impl<'de> de::Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("a decimal number string")
    }

    fn visit_str<E>(self, value: &str) -> Result<Value, E>
    where
        E: de::Error,
    {
        Value::from_str(value).map_err(de::Error::custom)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D>(deserializer: D) -> Result<Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_str(ValueVisitor)
    }
}

#[cfg(test)]
mod test {
    use crate::Value;
    use core::str::FromStr;

    #[test]
    fn round_trips_through_json_strings() {
        let value = Value::from_str("-123.456").unwrap();
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(r#""-123.456""#, json);
        let back: Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, back);
    }
}
