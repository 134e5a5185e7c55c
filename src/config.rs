//! Tolerances and limits shared by the adaptation pipelines.

use serde::{Deserialize, Serialize};

use crate::mesh_error::AmrError;

/// Default tolerance for the void (midpoint) predicate.
pub const VOID_TOL: f64 = 1e-12;
/// Default tolerance for the supertriangle alignment check.
pub const ALIGN_TOL: f64 = 1e-12;
/// Default tolerance for matching boundary points when joining meshes.
pub const GLUE_TOL: f64 = 1e-9;
/// Smallest connected cluster `compress` and `reduce` accept.
pub const MIN_REDUCED_SIZE: usize = 4;

/// Configuration for refine/coarsen pipelines.
///
/// Missing keys take their defaults when deserialised:
///
/// ```
/// use trimesh_amr::config::AmrConfig;
/// let cfg = AmrConfig::from_json_str(r#"{ "align_tol": 1e-9 }"#).unwrap();
/// assert_eq!(cfg.align_tol, 1e-9);
/// assert_eq!(cfg.min_reduced_size, 4);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AmrConfig {
    /// Distance under which a triangle apex counts as its base midpoint.
    pub void_tol: f64,
    /// Distance under which a kernel node counts as a supertriangle side midpoint.
    pub align_tol: f64,
    /// Distance under which two boundary points are glued.
    pub glue_tol: f64,
    /// Minimum size of a connected supertriangulation kept by `reduce`.
    pub min_reduced_size: usize,
}

impl Default for AmrConfig {
    fn default() -> Self {
        Self {
            void_tol: VOID_TOL,
            align_tol: ALIGN_TOL,
            glue_tol: GLUE_TOL,
            min_reduced_size: MIN_REDUCED_SIZE,
        }
    }
}

impl AmrConfig {
    /// Parse a JSON document and validate the result.
    pub fn from_json_str(text: &str) -> Result<Self, AmrError> {
        let cfg: AmrConfig = serde_json::from_str(text)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Reject non-positive or non-finite tolerances.
    pub fn validate(&self) -> Result<(), AmrError> {
        for (name, value) in [
            ("void_tol", self.void_tol),
            ("align_tol", self.align_tol),
            ("glue_tol", self.glue_tol),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(AmrError::InvalidConfig(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        if self.min_reduced_size == 0 {
            return Err(AmrError::InvalidConfig(
                "min_reduced_size must be at least 1".into(),
            ));
        }
        Ok(())
    }
}
