//! Client capability definitions
//!
//! This module defines the capability flags the client declares in its
//! `initialize` request.

use bitflags::bitflags;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

bitflags! {
    /// Client capabilities declared during the handshake
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct ClientCapabilities: u8 {
        /// Client can service `sampling` requests
        const SAMPLING = 0b001;
        /// Client exposes filesystem roots
        const ROOTS = 0b010;
        /// Client emits notifications when its roots change
        const ROOTS_LIST_CHANGED = 0b100;
    }
}

impl ClientCapabilities {
    /// Capability set sent by default: `{"sampling":{},"roots":{"listChanged":true}}`
    #[must_use]
    pub const fn standard() -> Self {
        Self::all()
    }
}

impl Default for ClientCapabilities {
    fn default() -> Self {
        Self::standard()
    }
}

#[derive(Serialize, Deserialize)]
struct RootsCapability {
    #[serde(rename = "listChanged", default)]
    list_changed: bool,
}

// Custom serialization to match the wire shape, where each capability is an
// object keyed by name rather than a boolean
impl Serialize for ClientCapabilities {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        use serde::ser::SerializeMap;

        let len = usize::from(self.contains(Self::SAMPLING)) + usize::from(self.contains(Self::ROOTS));
        let mut map = serializer.serialize_map(Some(len))?;
        if self.contains(Self::SAMPLING) {
            map.serialize_entry("sampling", &serde_json::Map::new())?;
        }
        if self.contains(Self::ROOTS) {
            map.serialize_entry(
                "roots",
                &RootsCapability {
                    list_changed: self.contains(Self::ROOTS_LIST_CHANGED),
                },
            )?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for ClientCapabilities {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct Helper {
            #[serde(default)]
            sampling: Option<serde_json::Value>,
            #[serde(default)]
            roots: Option<RootsCapability>,
        }

        let h = Helper::deserialize(deserializer)?;
        let mut caps = Self::empty();
        if h.sampling.is_some() {
            caps |= Self::SAMPLING;
        }
        if let Some(roots) = h.roots {
            caps |= Self::ROOTS;
            if roots.list_changed {
                caps |= Self::ROOTS_LIST_CHANGED;
            }
        }
        Ok(caps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn standard_capabilities_match_wire_shape() {
        let value = serde_json::to_value(ClientCapabilities::standard()).unwrap();
        assert_eq!(value, json!({"sampling": {}, "roots": {"listChanged": true}}));
    }

    #[test]
    fn roots_without_list_changed() {
        let caps = ClientCapabilities::ROOTS;
        let value = serde_json::to_value(caps).unwrap();
        assert_eq!(value, json!({"roots": {"listChanged": false}}));

        let parsed: ClientCapabilities = serde_json::from_value(value).unwrap();
        assert_eq!(parsed, caps);
    }

    #[test]
    fn empty_object_parses_to_no_capabilities() {
        let parsed: ClientCapabilities = serde_json::from_value(json!({})).unwrap();
        assert!(parsed.is_empty());
    }
}
