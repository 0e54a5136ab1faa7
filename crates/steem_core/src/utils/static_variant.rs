use serde::{
    Deserialize, Deserializer, Serialize, Serializer,
    de::{DeserializeOwned, Error as DeError},
};
use steem_proc_macros::{NumBytes, Read, Write};

/// Empty payload of a `void_t` variant, rendered as `{}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Read, Write, NumBytes, Serialize, Deserialize)]
pub struct VoidPayload {}

/// Render a tagged union member as `[tag, payload]`.
pub fn serialize_static_variant<S, T>(tag: u32, payload: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: Serialize + ?Sized,
{
    (tag, payload).serialize(serializer)
}

/// Split `[tag, payload]` (or `["name", payload]`) into its parts.
pub fn deserialize_static_variant<'de, D, K>(deserializer: D) -> Result<(K, serde_json::Value), D::Error>
where
    D: Deserializer<'de>,
    K: Deserialize<'de>,
{
    <(K, serde_json::Value)>::deserialize(deserializer)
}

pub fn payload_from_value<T: DeserializeOwned, E: DeError>(value: serde_json::Value) -> Result<T, E> {
    serde_json::from_value(value).map_err(E::custom)
}

/// Declare a tagged union encoded as `varint tag ‖ payload`, with the
/// `[tag, payload]` JSON form.
macro_rules! static_variant {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $($tag:literal => $variant:ident($payload:ty)),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        $vis enum $name {
            $($variant($payload)),+
        }

        impl $name {
            pub fn tag(&self) -> u32 {
                match self {
                    $($name::$variant(_) => $tag),+
                }
            }
        }

        impl steem_serialization::NumBytes for $name {
            fn num_bytes(&self) -> usize {
                let payload = match self {
                    $($name::$variant(p) => steem_serialization::NumBytes::num_bytes(p)),+
                };
                steem_serialization::NumBytes::num_bytes(&steem_serialization::VarUint32(self.tag())) + payload
            }
        }

        impl steem_serialization::Read for $name {
            fn read(bytes: &[u8], pos: &mut usize) -> Result<Self, steem_serialization::ReadError> {
                let tag = <steem_serialization::VarUint32 as steem_serialization::Read>::read(bytes, pos)?.0;
                match tag {
                    $($tag => Ok($name::$variant(<$payload as steem_serialization::Read>::read(bytes, pos)?)),)+
                    other => Err(steem_serialization::ReadError::ParseError(format!(
                        "invalid {} tag {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }

        impl steem_serialization::Write for $name {
            fn write(&self, bytes: &mut [u8], pos: &mut usize) -> Result<(), steem_serialization::WriteError> {
                steem_serialization::Write::write(&steem_serialization::VarUint32(self.tag()), bytes, pos)?;
                match self {
                    $($name::$variant(p) => steem_serialization::Write::write(p, bytes, pos)),+
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                match self {
                    $($name::$variant(p) => $crate::utils::serialize_static_variant(self.tag(), p, serializer)),+
                }
            }
        }

        impl<'de> serde::Deserialize<'de> for $name {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let (tag, value) = $crate::utils::deserialize_static_variant::<D, u32>(deserializer)?;
                match tag {
                    $($tag => Ok($name::$variant($crate::utils::payload_from_value(value)?)),)+
                    other => Err(<D::Error as serde::de::Error>::custom(format!(
                        "invalid {} tag {}",
                        stringify!($name),
                        other
                    ))),
                }
            }
        }
    };
}

pub(crate) use static_variant;
