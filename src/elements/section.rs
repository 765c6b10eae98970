//! Section properties for line elements

use serde::{Deserialize, Serialize};

/// Cross-section properties
///
/// `ixx` is the strong-axis second moment (bending about local z) and
/// `iyy` the weak-axis one (bending about local y).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Section {
    /// Cross-sectional area
    pub area: f64,
    /// Strong-axis second moment of area
    pub ixx: f64,
    /// Weak-axis second moment of area
    pub iyy: f64,
    /// Torsion constant
    pub j: f64,
    /// Elastic section modulus for strong-axis bending (optional)
    pub sx: Option<f64>,
    /// Elastic section modulus for weak-axis bending (optional)
    pub sy: Option<f64>,
}

impl Section {
    /// Create a new section with basic properties
    pub fn new(area: f64, ixx: f64, iyy: f64, j: f64) -> Self {
        Self {
            area,
            ixx,
            iyy,
            j,
            sx: None,
            sy: None,
        }
    }

    /// Axial-only section for truss members
    pub fn truss(area: f64) -> Self {
        Self::new(area, 0.0, 0.0, 0.0)
    }

    /// Solid rectangle, `depth` measured along local y
    pub fn rectangular(width: f64, depth: f64) -> Self {
        let area = width * depth;
        let ixx = width * depth.powi(3) / 12.0;
        let iyy = depth * width.powi(3) / 12.0;

        // Approximate St. Venant constant
        let (long, short) = if width > depth { (width, depth) } else { (depth, width) };
        let j = long * short.powi(3) / 3.0 * (1.0 - 0.63 * short / long);

        Self {
            area,
            ixx,
            iyy,
            j,
            sx: Some(width * depth.powi(2) / 6.0),
            sy: Some(depth * width.powi(2) / 6.0),
        }
    }

    /// Attach elastic section moduli
    pub fn with_moduli(mut self, sx: f64, sy: f64) -> Self {
        self.sx = Some(sx);
        self.sy = Some(sy);
        self
    }
}
