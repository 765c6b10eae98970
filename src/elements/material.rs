//! Material properties

use serde::{Deserialize, Serialize};

/// Linear-elastic material
///
/// Units are whatever the model is built in; the solver never converts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    /// Modulus of elasticity
    pub e: f64,
    /// Shear modulus
    pub g: f64,
    /// Poisson's ratio, if the material was defined from it
    pub nu: Option<f64>,
    /// Unit weight (force per unit volume), used by self-weight loads
    pub gamma: f64,
}

impl Material {
    /// Create a material with E and G given directly
    pub fn new(e: f64, g: f64) -> Self {
        Self {
            e,
            g,
            nu: None,
            gamma: 0.0,
        }
    }

    /// Create a new isotropic material from E and nu
    /// G is calculated as E / (2 * (1 + nu))
    pub fn isotropic(e: f64, nu: f64) -> Self {
        Self {
            e,
            g: e / (2.0 * (1.0 + nu)),
            nu: Some(nu),
            gamma: 0.0,
        }
    }

    /// Set the unit weight
    pub fn with_unit_weight(mut self, gamma: f64) -> Self {
        self.gamma = gamma;
        self
    }

    /// Structural steel in N and mm (E = 200 GPa, nu = 0.3, 78.5 kN/m³)
    pub fn steel_mm() -> Self {
        Self::isotropic(200_000.0, 0.3).with_unit_weight(7.85e-5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_isotropic_material() {
        let mat = Material::isotropic(200e9, 0.3);
        let expected_g = 200e9 / (2.0 * 1.3);
        assert!((mat.g - expected_g).abs() < 1.0);
        assert_eq!(mat.gamma, 0.0);
    }

    #[test]
    fn test_steel_mm() {
        let steel = Material::steel_mm();
        assert_eq!(steel.e, 200_000.0);
        assert!((steel.g - 76_923.076_923).abs() < 1e-3);
    }
}
