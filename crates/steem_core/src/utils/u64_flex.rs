// Nodes render 64-bit integers as JSON strings while older tooling sends numbers,
// so both forms are accepted. Use as `#[serde(with = "u64_flex")]` on u64 fields.

use core::fmt;
use serde::{
    Deserializer, Serializer,
    de::{Error as DeError, Visitor},
};

pub fn serialize<S: Serializer>(value: &u64, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(*value)
}

pub fn deserialize<'de, D: Deserializer<'de>>(de: D) -> Result<u64, D::Error> {
    struct V;
    impl<'de> Visitor<'de> for V {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            write!(f, "a u64 as a number or a string")
        }

        fn visit_i64<E: DeError>(self, v: i64) -> Result<Self::Value, E> {
            u64::try_from(v).map_err(|_| E::custom("out of range for u64"))
        }
        fn visit_u64<E: DeError>(self, v: u64) -> Result<Self::Value, E> {
            Ok(v)
        }
        fn visit_str<E: DeError>(self, s: &str) -> Result<Self::Value, E> {
            s.trim()
                .parse::<u64>()
                .map_err(|_| E::custom("invalid u64 string"))
        }
    }
    de.deserialize_any(V)
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Nonce {
        #[serde(with = "crate::utils::u64_flex")]
        nonce: u64,
    }

    #[test]
    fn accepts_number_or_string() {
        let a: Nonce = serde_json::from_str(r#"{"nonce":42}"#).unwrap();
        let b: Nonce = serde_json::from_str(r#"{"nonce":"18446744073709551615"}"#).unwrap();
        assert_eq!(a.nonce, 42);
        assert_eq!(b.nonce, u64::MAX);
        assert!(serde_json::from_str::<Nonce>(r#"{"nonce":-1}"#).is_err());
        assert_eq!(serde_json::to_string(&a).unwrap(), r#"{"nonce":42}"#);
    }
}
