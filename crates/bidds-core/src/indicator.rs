//! Strict 0/1 indicator fields.
//!
//! Bid-DS documents encode on/off statuses and capability flags as the JSON
//! integers `0` and `1`. Booleans, floats (`0.0`) and any other integer are
//! rejected at parse time, and saving always writes the integer form.

use std::fmt;

use schemars::JsonSchema;
use schemars::r#gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Indicator {
    #[default]
    Off,
    On,
}

impl Indicator {
    pub fn is_on(self) -> bool {
        matches!(self, Indicator::On)
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Indicator::Off => 0,
            Indicator::On => 1,
        }
    }
}

impl From<bool> for Indicator {
    fn from(value: bool) -> Self {
        if value { Indicator::On } else { Indicator::Off }
    }
}

impl From<Indicator> for bool {
    fn from(value: Indicator) -> Self {
        value.is_on()
    }
}

impl fmt::Display for Indicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

impl Serialize for Indicator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

struct IndicatorVisitor;

impl Visitor<'_> for IndicatorVisitor {
    type Value = Indicator;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("the integer 0 or 1")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Indicator, E> {
        match v {
            0 => Ok(Indicator::Off),
            1 => Ok(Indicator::On),
            _ => Err(E::invalid_value(Unexpected::Unsigned(v), &self)),
        }
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Indicator, E> {
        match v {
            0 => Ok(Indicator::Off),
            1 => Ok(Indicator::On),
            _ => Err(E::invalid_value(Unexpected::Signed(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Indicator {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(IndicatorVisitor)
    }
}

impl JsonSchema for Indicator {
    fn schema_name() -> String {
        "Indicator".to_owned()
    }

    fn json_schema(_: &mut SchemaGenerator) -> Schema {
        SchemaObject {
            instance_type: Some(InstanceType::Integer.into()),
            enum_values: Some(vec![0.into(), 1.into()]),
            ..Default::default()
        }
        .into()
    }
}
