//! Error types for the structural analysis engine

use thiserror::Error;

use crate::elements::Dof;

/// Broad classification of an [`MsaError`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Duplicate names, missing references, empty models, invalid connectivity or member loads
    ModelDefinition,
    /// Non-positive element length or unsupported orientation
    ElementGeometry,
    /// Loads applied to a DOF no incident element declares
    DofConsistency,
    /// Zero-stiffness rows, zero-energy modes or no free DOFs
    Stability,
    /// Linear solve failure
    Solver,
    /// API misuse (querying before solving, bad arguments)
    Usage,
}

/// Main error type for analysis operations
#[derive(Error, Debug)]
pub enum MsaError {
    #[error("Node '{0}' not found in model")]
    NodeNotFound(String),

    #[error("Element '{0}' not found in model")]
    ElementNotFound(String),

    #[error("Material '{0}' not found in model")]
    MaterialNotFound(String),

    #[error("Section '{0}' not found in model")]
    SectionNotFound(String),

    #[error("Load case '{0}' not found in model")]
    LoadCaseNotFound(String),

    #[error("Load combination '{0}' not found in model")]
    LoadCombinationNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Invalid model definition: {0}")]
    ModelDefinition(String),

    #[error("Element '{element}' has invalid geometry: {reason}")]
    InvalidGeometry { element: String, reason: String },

    #[error("Node '{node}': load applied to undefined DOF {dof}")]
    UndefinedDof { node: String, dof: Dof },

    #[error("Element '{element}': invalid member load: {reason}")]
    InvalidLoad { element: String, reason: String },

    #[error("Model is unstable: {0}")]
    Unstable(String),

    #[error("Singular stiffness matrix - model may be unstable or have insufficient supports")]
    SingularMatrix,

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("Model not preprocessed - run preprocess() first")]
    NotPreprocessed,

    #[error("No results for load combination '{0}' - run solve() first")]
    NotAnalyzed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl MsaError {
    /// Classify the error
    pub fn kind(&self) -> ErrorKind {
        match self {
            MsaError::NodeNotFound(_)
            | MsaError::ElementNotFound(_)
            | MsaError::MaterialNotFound(_)
            | MsaError::SectionNotFound(_)
            | MsaError::DuplicateName(_)
            | MsaError::ModelDefinition(_)
            | MsaError::InvalidLoad { .. } => ErrorKind::ModelDefinition,
            MsaError::InvalidGeometry { .. } => ErrorKind::ElementGeometry,
            MsaError::UndefinedDof { .. } => ErrorKind::DofConsistency,
            MsaError::Unstable(_) => ErrorKind::Stability,
            MsaError::SingularMatrix | MsaError::AnalysisFailed(_) => ErrorKind::Solver,
            MsaError::LoadCaseNotFound(_)
            | MsaError::LoadCombinationNotFound(_)
            | MsaError::NotPreprocessed
            | MsaError::NotAnalyzed(_)
            | MsaError::InvalidInput(_)
            | MsaError::SerializationError(_) => ErrorKind::Usage,
        }
    }
}

/// Result type for analysis operations
pub type MsaResult<T> = Result<T, MsaError>;
