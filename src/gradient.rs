// Gradient pattern tags understood by the monster renderer
use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GradientType {
    LinearHorizontal,
    LinearVertical,
    LinearDiagonalDown,
    LinearDiagonalUp,
    RadialCenter,
    RadialCorner,
    Diamond,
}

impl GradientType {
    /// Every tag, in selection order
    pub const ALL: [GradientType; 7] = [
        GradientType::LinearHorizontal,
        GradientType::LinearVertical,
        GradientType::LinearDiagonalDown,
        GradientType::LinearDiagonalUp,
        GradientType::RadialCenter,
        GradientType::RadialCorner,
        GradientType::Diamond,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GradientType::LinearHorizontal => "linear_horizontal",
            GradientType::LinearVertical => "linear_vertical",
            GradientType::LinearDiagonalDown => "linear_diagonal_down",
            GradientType::LinearDiagonalUp => "linear_diagonal_up",
            GradientType::RadialCenter => "radial_center",
            GradientType::RadialCorner => "radial_corner",
            GradientType::Diamond => "diamond",
        }
    }
}

impl FromStr for GradientType {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|g| g.as_str() == s)
            .ok_or_else(|| anyhow!("Unknown gradient type: {}", s))
    }
}

impl fmt::Display for GradientType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
