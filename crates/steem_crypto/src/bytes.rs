use core::fmt;

use serde::{Deserialize, Serialize};
use steem_proc_macros::{NumBytes, Read, Write};

/// Length-prefixed raw byte string, rendered as hex in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Read, Write, NumBytes)]
pub struct Bytes(pub Vec<u8>);

impl Bytes {
    pub fn new(data: Vec<u8>) -> Self {
        Bytes(data)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Bytes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        hex::encode(self.0.as_slice()).fmt(f)
    }
}

impl Serialize for Bytes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&hex::encode(&self.0))
    }
}

impl<'de> Deserialize<'de> for Bytes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let hex_string = String::deserialize(deserializer)?;
        let bytes = hex::decode(hex_string).map_err(serde::de::Error::custom)?;
        Ok(Bytes(bytes))
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(data: Vec<u8>) -> Self {
        Bytes(data)
    }
}

impl From<&[u8]> for Bytes {
    fn from(data: &[u8]) -> Self {
        Bytes(data.to_vec())
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use steem_serialization::{Write, unpack};

    #[test]
    fn test_bytes_display() {
        let bytes = Bytes::new(vec![0x12, 0x34, 0x56, 0x78]);
        assert_eq!(bytes.to_string(), "12345678");
    }

    #[test]
    fn test_bytes_wire_and_json() {
        let bytes = Bytes::new(vec![0xde, 0xad]);
        assert_eq!(bytes.pack().unwrap(), vec![0x02, 0xde, 0xad]);
        assert_eq!(unpack::<Bytes>(&[0x02, 0xde, 0xad]).unwrap(), bytes);
        assert_eq!(serde_json::to_string(&bytes).unwrap(), "\"dead\"");
        let parsed: Bytes = serde_json::from_str("\"dead\"").unwrap();
        assert_eq!(parsed, bytes);
    }
}
