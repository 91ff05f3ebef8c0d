//! Bookable resources.

use serde::{Deserialize, Serialize};

use crate::resource_type::ResourceType;
use crate::types::ResourceId;

/// A bookable resource: a room, an instructor, or a piece of equipment.
///
/// Resources are binary occupied/free; there is no capacity modeling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique identifier for this resource.
    pub id: ResourceId,
    /// Human-readable name, e.g. "Room A".
    pub name: String,
    /// What kind of resource this is.
    #[serde(rename = "type")]
    pub kind: ResourceType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_serializes_kind_as_type() {
        let resource = Resource {
            id: ResourceId::new("res-1").unwrap(),
            name: "Room A".to_string(),
            kind: ResourceType::Room,
        };
        let json = serde_json::to_string(&resource).unwrap();
        assert!(json.contains(r#""type":"room""#));
        let parsed: Resource = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, resource);
    }
}
