// Wire types for the resource services.
//
// Field names follow the services' JSON mapping (camelCase). Stream
// requests carry a `partialEqFilter` list: each element is a partially
// populated resource whose set fields must all match (AND), and the list
// elements are alternatives (OR).

pub mod inventory;
pub mod tag;
pub mod workspace;

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserializer, Serializer};

/// Code of the catch-all `UNRECOGNIZED` value.
pub(crate) const UNRECOGNIZED_CODE: i32 = -1;

/// Default for an `Unrecognized(code)` variant parsed from its name.
pub(crate) fn unrecognized_code() -> i32 {
    UNRECOGNIZED_CODE
}

/// A protobuf enum as it appears in the JSON mapping.
///
/// Values are written as their numeric code and read from either the
/// number, the full protobuf name (`WORKSPACE_STATE_PENDING`) or the short
/// name (`PENDING`). Anything unknown decodes to the unrecognized variant,
/// which keeps the code it arrived with, instead of failing the record.
pub(crate) trait ProtoEnum: Sized + Copy + FromStr + fmt::Display {
    /// Prefix shared by every protobuf value name.
    const PREFIX: &'static str;

    fn code(self) -> i32;
    /// Every code decodes; unknown ones land in the unrecognized variant.
    fn from_code(code: i32) -> Self;
    fn is_unrecognized(self) -> bool;

    fn from_wire_name(name: &str) -> Self {
        let short = name.strip_prefix(Self::PREFIX).unwrap_or(name);
        short
            .parse()
            .unwrap_or_else(|_| Self::from_code(UNRECOGNIZED_CODE))
    }

    /// The name the service itself prints: `PREFIX` + short name, or the
    /// bare code for values this client does not know.
    fn proto_name(self) -> String {
        if self.is_unrecognized() {
            self.code().to_string()
        } else {
            format!("{}{self}", Self::PREFIX)
        }
    }
}

pub(crate) fn serialize_proto_enum<S, T>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
    T: ProtoEnum,
{
    serializer.serialize_i32(value.code())
}

pub(crate) fn deserialize_proto_enum<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: ProtoEnum,
{
    struct ProtoEnumVisitor<T>(std::marker::PhantomData<T>);

    impl<T: ProtoEnum> Visitor<'_> for ProtoEnumVisitor<T> {
        type Value = T;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an enum name or numeric code")
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<T, E> {
            Ok(T::from_wire_name(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<T, E> {
            Ok(i32::try_from(v).map_or_else(|_| T::from_code(UNRECOGNIZED_CODE), T::from_code))
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<T, E> {
            Ok(i32::try_from(v).map_or_else(|_| T::from_code(UNRECOGNIZED_CODE), T::from_code))
        }
    }

    deserializer.deserialize_any(ProtoEnumVisitor(std::marker::PhantomData))
}
