//! Analysis phases and options
//!
//! A solve runs DOF numbering, stiffness assembly and the stability check
//! once per topology (`preprocess`), then load assembly, the linear solve
//! and recovery once per load combination.

pub(crate) mod assembly;
mod dofs;
pub(crate) mod linear_static;
pub(crate) mod stability;

use serde::{Deserialize, Serialize};

pub use assembly::ElementSystem;
pub use dofs::DofRegistry;

/// Options for structural analysis
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Run the eigenvalue stability check before solving
    pub check_stability: bool,
    /// Rows of K_ff whose largest entry is below this are treated as empty
    pub zero_tolerance: f64,
    /// Absolute floor below which an eigenvalue of K_ff marks a mechanism
    pub eigen_tolerance: f64,
    /// Eigenvalue threshold as a fraction of the largest eigenvalue
    pub relative_eigen_tolerance: f64,
    /// Check global force balance after each solve
    pub check_statics: bool,
    /// Allowed force-balance residual relative to the largest applied load
    pub statics_tolerance: f64,
}

impl Default for AnalysisOptions {
    fn default() -> Self {
        Self {
            check_stability: true,
            zero_tolerance: 1e-8,
            eigen_tolerance: 1e-8,
            relative_eigen_tolerance: 1e-12,
            check_statics: true,
            statics_tolerance: 1e-6,
        }
    }
}

impl AnalysisOptions {
    /// Default linear static options
    pub fn linear() -> Self {
        Self::default()
    }

    /// Skip the eigenvalue stability check
    pub fn without_stability_check(mut self) -> Self {
        self.check_stability = false;
        self
    }

    /// Set the zero-row tolerance
    pub fn with_zero_tolerance(mut self, tol: f64) -> Self {
        self.zero_tolerance = tol;
        self
    }

    /// Set the absolute and relative eigenvalue tolerances
    pub fn with_eigen_tolerance(mut self, absolute: f64, relative: f64) -> Self {
        self.eigen_tolerance = absolute;
        self.relative_eigen_tolerance = relative;
        self
    }

    /// Set the force-balance tolerance
    pub fn with_statics_tolerance(mut self, tol: f64) -> Self {
        self.check_statics = true;
        self.statics_tolerance = tol;
        self
    }
}
