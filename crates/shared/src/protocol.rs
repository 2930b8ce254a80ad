use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Mission metadata for one rover, as returned by the upstream manifest endpoint.
///
/// Fields the dashboard does not name explicitly (`max_sol`, `total_photos`, ...)
/// are kept in `extra` so every upstream key stays addressable by [`RoverManifest::field`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoverManifest {
    pub name: String,
    pub launch_date: String,
    pub landing_date: String,
    pub max_date: String,
    pub status: String,
    #[serde(default)]
    pub photos: Vec<Value>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RoverManifest {
    pub fn new(
        name: impl Into<String>,
        launch_date: impl Into<String>,
        landing_date: impl Into<String>,
        max_date: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            launch_date: launch_date.into(),
            landing_date: landing_date.into(),
            max_date: max_date.into(),
            status: status.into(),
            photos: Vec::new(),
            extra: Map::new(),
        }
    }

    /// Display value of the manifest field addressed by an info filter key.
    pub fn field(&self, key: &str) -> Option<String> {
        match key {
            "name" => Some(self.name.clone()),
            "launch_date" => Some(self.launch_date.clone()),
            "landing_date" => Some(self.landing_date.clone()),
            "max_date" => Some(self.max_date.clone()),
            "status" => Some(self.status.clone()),
            "photos" => None,
            other => match self.extra.get(other)? {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                value => Some(value.to_string()),
            },
        }
    }
}

/// Body of the manifest endpoint, upstream and proxied alike.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEnvelope {
    pub photo_manifest: RoverManifest,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Photo {
    pub img_src: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Photo {
    pub fn new(img_src: impl Into<String>) -> Self {
        Self {
            img_src: img_src.into(),
            extra: Map::new(),
        }
    }
}

/// Upstream photo search body; the proxy forwards only `photos`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhotosEnvelope {
    pub photos: Vec<Photo>,
}
