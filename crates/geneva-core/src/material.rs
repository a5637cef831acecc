//! Paint finishes for parts

use serde::{Deserialize, Serialize};

/// Named finish applied to a part
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Paint {
    #[default]
    Grey,
    Plywood,
    Beige,
    Brown,
}

impl Paint {
    /// Material name as written to manifests
    pub fn name(&self) -> &'static str {
        match self {
            Paint::Grey => "grey",
            Paint::Plywood => "plywood",
            Paint::Beige => "beige",
            Paint::Brown => "brown",
        }
    }

    /// Display color (RGBA)
    pub fn color(&self) -> [f32; 4] {
        match self {
            Paint::Grey => [0.5, 0.5, 0.5, 1.0],
            Paint::Plywood => [0.86, 0.72, 0.5, 1.0],
            Paint::Beige => [0.96, 0.96, 0.86, 1.0],
            Paint::Brown => [0.55, 0.27, 0.07, 1.0],
        }
    }

    pub fn material(&self) -> MaterialDef {
        MaterialDef::new(self.name(), self.color())
    }
}

/// Material entry for exported manifests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialDef {
    pub name: String,
    pub color: [f32; 4],
}

impl MaterialDef {
    pub fn new(name: impl Into<String>, color: [f32; 4]) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }
}
