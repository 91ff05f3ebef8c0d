//! Resource type enum as the single source of truth for type strings.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The kind of bookable resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ResourceType {
    Room,
    Instructor,
    Equipment,
}

impl ResourceType {
    /// All variants, in display order.
    pub const ALL: [Self; 3] = [Self::Room, Self::Instructor, Self::Equipment];

    /// String representation for database storage.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Room => "room",
            Self::Instructor => "instructor",
            Self::Equipment => "equipment",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ResourceType {
    type Err = UnknownResourceType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "room" => Ok(Self::Room),
            "instructor" => Ok(Self::Instructor),
            "equipment" => Ok(Self::Equipment),
            _ => Err(UnknownResourceType(s.to_string())),
        }
    }
}

impl Serialize for ResourceType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for ResourceType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown resource type strings.
#[derive(Debug, Clone)]
pub struct UnknownResourceType(String);

impl fmt::Display for UnknownResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unknown resource type: {} (expected room, instructor, or equipment)",
            self.0
        )
    }
}

impl std::error::Error for UnknownResourceType {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_all_variants() {
        for variant in ResourceType::ALL {
            let s = variant.to_string();
            let parsed: ResourceType = s.parse().expect("should parse");
            assert_eq!(parsed, variant, "roundtrip failed for {variant:?}");
        }
    }

    #[test]
    fn unknown_type_errors() {
        let result: Result<ResourceType, _> = "projector".parse();
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(
            err.to_string(),
            "unknown resource type: projector (expected room, instructor, or equipment)"
        );
    }

    #[test]
    fn serde_uses_storage_strings() {
        let json = serde_json::to_string(&ResourceType::Instructor).unwrap();
        assert_eq!(json, "\"instructor\"");
        let parsed: ResourceType = serde_json::from_str("\"equipment\"").unwrap();
        assert_eq!(parsed, ResourceType::Equipment);
    }
}
