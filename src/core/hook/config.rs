use serde::{Deserialize, Serialize};

/// Names used to locate the external aerodynamics module and its types.
///
/// Type names are matched structurally: the simple name is enough, whatever
/// namespace the type lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HookConfig {
    /// Package name of the external module (case-insensitive)
    pub package_name: String,
    pub surface_type: String,
    pub interaction_type: String,
    pub section_type: String,
    pub simulation_type: String,
}

impl HookConfig {
    pub fn new() -> Self {
        Self {
            package_name: "AeroCore".to_string(),
            surface_type: "WingAerodynamicModel".to_string(),
            interaction_type: "WingInteraction".to_string(),
            section_type: "AeroSection".to_string(),
            simulation_type: "InstantConditionSim".to_string(),
        }
    }

    /// Look for the module under a different package name
    pub fn with_package_name(mut self, name: &str) -> Self {
        self.package_name = name.to_string();
        self
    }

    pub fn with_surface_type(mut self, name: &str) -> Self {
        self.surface_type = name.to_string();
        self
    }

    pub fn with_simulation_type(mut self, name: &str) -> Self {
        self.simulation_type = name.to_string();
        self
    }
}

impl Default for HookConfig {
    fn default() -> Self {
        Self::new()
    }
}
