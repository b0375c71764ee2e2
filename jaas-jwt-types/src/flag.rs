/*
 * Copyright 2025 Security Union LLC
 *
 * Licensed under either of
 *
 * * Apache License, Version 2.0
 *   (http://www.apache.org/licenses/LICENSE-2.0)
 * * MIT license
 *   (http://opensource.org/licenses/MIT)
 *
 * at your option.
 */

//! Boolean claims encoded as JSON strings.
//!
//! The JaaS verifier reads `moderator` and every feature flag as the strings
//! `"true"` / `"false"`. A native JSON boolean is not accepted.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A `bool` that travels on the wire as `"true"` or `"false"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StringBool(pub bool);

impl StringBool {
    pub const TRUE: StringBool = StringBool(true);
    pub const FALSE: StringBool = StringBool(false);

    pub fn as_str(self) -> &'static str {
        if self.0 {
            "true"
        } else {
            "false"
        }
    }
}

impl From<bool> for StringBool {
    fn from(value: bool) -> Self {
        StringBool(value)
    }
}

impl From<StringBool> for bool {
    fn from(value: StringBool) -> Self {
        value.0
    }
}

impl fmt::Display for StringBool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for StringBool {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

struct StringBoolVisitor;

impl Visitor<'_> for StringBoolVisitor {
    type Value = StringBool;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("the string \"true\" or \"false\"")
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
        match v {
            "true" => Ok(StringBool(true)),
            "false" => Ok(StringBool(false)),
            other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for StringBool {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_str(StringBoolVisitor)
    }
}
