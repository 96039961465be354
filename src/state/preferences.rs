/// View preferences that persist between sessions
///
/// Serialized to JSON and stored as a single row in the library,
/// the same way the rest of the library keeps structured settings.

use serde::{Deserialize, Serialize};

use super::visualization::VisualizationKind;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ViewPreferences {
    /// Render at most the first few hundred frequency entries
    pub quick_mode: bool,

    /// Keep earlier visualizations when generating new ones
    pub visualize_multiple: bool,

    /// Ask the backend to smooth heatmap and line plot data
    pub smooth: bool,

    /// Selected entry of the visualization dropdown
    pub visualization: VisualizationKind,
}

impl Default for ViewPreferences {
    fn default() -> Self {
        Self {
            quick_mode: true,
            visualize_multiple: false,
            smooth: true,
            visualization: VisualizationKind::Heatmap,
        }
    }
}

impl ViewPreferences {
    /// Convert to JSON string for database storage
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Parse from JSON string (from database)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
