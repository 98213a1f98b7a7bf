use crate::shared::ids::{StepId, RESERVED_PREFIX};
use crate::shared::serde_ext::parse_via_string;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

pub const RESET_SENTINEL: &str = "__reset__";
pub const BACK_SENTINEL: &str = "__back__";

pub fn is_sentinel(raw: &str) -> bool {
    raw.starts_with(RESERVED_PREFIX)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Target {
    Step(StepId),
    Back,
    Reset,
}

impl Target {
    pub fn parse(raw: &str) -> Result<Self, String> {
        match raw {
            RESET_SENTINEL => Ok(Self::Reset),
            BACK_SENTINEL => Ok(Self::Back),
            other if is_sentinel(other) => Err(format!(
                "unknown control target; expected one of: {RESET_SENTINEL}, {BACK_SENTINEL}"
            )),
            other => StepId::parse(other).map(Self::Step),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Step(id) => id.as_str(),
            Self::Back => BACK_SENTINEL,
            Self::Reset => RESET_SENTINEL,
        }
    }

    pub fn step(id: &str) -> Result<Self, String> {
        StepId::parse(id).map(Self::Step)
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Target {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Target {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        parse_via_string(deserializer, "button target", Target::parse)
    }
}
