use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

pub const RESERVED_PREFIX: &str = "__";

pub fn validate_identifier_value(kind: &str, value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err(format!("{kind} must be non-empty"));
    }
    if value.starts_with(RESERVED_PREFIX) {
        return Err(format!(
            "{kind} must not start with the reserved prefix `{RESERVED_PREFIX}`"
        ));
    }
    if !value.starts_with(|ch: char| ch.is_ascii_alphanumeric()) {
        return Err(format!("{kind} must start with an ASCII letter or digit"));
    }
    if value
        .chars()
        .all(|ch| ch.is_ascii_alphanumeric() || ch == '-' || ch == '_')
    {
        return Ok(());
    }
    Err(format!(
        "{kind} must use only ASCII letters, digits, '-' or '_'"
    ))
}

macro_rules! define_id_type {
    ($name:ident, $kind:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn parse(raw: &str) -> Result<Self, String> {
                validate_identifier_value($kind, raw)?;
                Ok(Self(raw.to_string()))
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }

        impl std::borrow::Borrow<str> for $name {
            fn borrow(&self) -> &str {
                self.as_str()
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                let raw = String::deserialize(deserializer)?;
                Self::parse(&raw).map_err(|err| {
                    D::Error::custom(format!("invalid {} `{}`: {}", $kind, raw, err))
                })
            }
        }
    };
}

define_id_type!(StepId, "step id");
define_id_type!(PopupKey, "popup key");

pub const START_STEP_ID: &str = "start";

impl StepId {
    pub fn start() -> Self {
        Self(START_STEP_ID.to_string())
    }

    pub fn is_start(&self) -> bool {
        self.0 == START_STEP_ID
    }
}
