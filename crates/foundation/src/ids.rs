use serde::{Deserialize, Serialize};

/// Opaque truck identifier assigned by the backend.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TruckId(String);

impl TruckId {
    pub fn new(id: impl Into<String>) -> Self {
        TruckId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TruckId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TruckId {
    fn from(s: &str) -> Self {
        TruckId::new(s)
    }
}

impl From<String> for TruckId {
    fn from(s: String) -> Self {
        TruckId(s)
    }
}
