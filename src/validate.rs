//! Structural and semantic invariant checks on extraction results.
//!
//! [`validate`] is both a post-condition after extraction and a
//! pre-condition gate before the mask and placement stages. It reports the
//! first failed check; nothing here is fatal — callers retry with the
//! fallback region or surface the error to the user.

use thiserror::Error;

use crate::context::{ContextInfo, ExtractionPolicy};

/// Why a geometry computation or check failed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// Width or height is unusable for the attempted operation.
    #[error("invalid dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: i64,
        height: i64,
        reason: &'static str,
    },
    /// The selection cannot be contained, even after clamping and
    /// shifting.
    #[error("selection out of bounds: {reason}")]
    SelectionOutOfBounds { reason: &'static str },
    /// The target shape is not in the supported set. Unreachable through
    /// shape selection, which is total; checked defensively anyway.
    #[error("unsupported target shape {width}x{height}")]
    UnsupportedShape { width: u32, height: u32 },
    /// Padding or scale arithmetic failed a post-condition.
    #[error("geometry invariant violated: {reason}")]
    InvariantViolation { reason: &'static str },
}

/// Check all invariants of an extraction result.
///
/// Verifies, in order: positive extract dimensions, selection containment,
/// shape membership in the policy's set, a positive finite scale factor,
/// and the exact padding sums on both axes.
pub fn validate(info: &ContextInfo, policy: &ExtractionPolicy) -> Result<(), GeometryError> {
    let result = run_checks(info, policy);
    if let Err(err) = result {
        tracing::debug!(%err, "context geometry validation failed");
    }
    result
}

fn run_checks(info: &ContextInfo, policy: &ExtractionPolicy) -> Result<(), GeometryError> {
    let extract = info.extract_region;
    if extract.width == 0 || extract.height == 0 {
        return Err(GeometryError::InvalidDimensions {
            width: extract.width as i64,
            height: extract.height as i64,
            reason: "extract region must have positive dimensions",
        });
    }
    if !extract.contains(info.selection_bounds) {
        return Err(GeometryError::SelectionOutOfBounds {
            reason: "extract region does not contain the selection",
        });
    }
    let shape = info.target_shape;
    if !policy.shapes.contains(shape) {
        return Err(GeometryError::UnsupportedShape {
            width: shape.width,
            height: shape.height,
        });
    }
    let padding_info = &info.padding_info;
    if !(padding_info.scale_factor.is_finite() && padding_info.scale_factor > 0.0) {
        return Err(GeometryError::InvariantViolation {
            reason: "scale factor must be positive and finite",
        });
    }
    let pad = padding_info.padding;
    if padding_info.scaled.width + pad.left + pad.right != shape.width {
        return Err(GeometryError::InvariantViolation {
            reason: "horizontal padding does not sum to the target width",
        });
    }
    if padding_info.scaled.height + pad.top + pad.bottom != shape.height {
        return Err(GeometryError::InvariantViolation {
            reason: "vertical padding does not sum to the target height",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::{ExtractMode, Extraction};
    use crate::geom::{Rect, SelectionBounds, Size};
    use crate::padding::fit_to_shape;
    use crate::shape::Shape;

    fn valid_info() -> ContextInfo {
        Extraction::new(ExtractMode::Focused).compute(
            1200,
            800,
            Some(SelectionBounds::new(400, 250, 800, 550)),
        )
    }

    #[test]
    fn computed_extractions_pass() {
        let policy = ExtractionPolicy::default();
        assert_eq!(validate(&valid_info(), &policy), Ok(()));

        let legacy = ExtractionPolicy::legacy_squares();
        let info = Extraction::new(ExtractMode::Focused)
            .policy(legacy)
            .compute(1200, 800, Some(SelectionBounds::new(400, 250, 800, 550)));
        assert_eq!(validate(&info, &legacy), Ok(()));
    }

    #[test]
    fn rejects_selection_outside_extract() {
        let mut info = valid_info();
        info.selection_bounds = Rect::new(0, 0, 1200, 800);
        assert_eq!(
            validate(&info, &ExtractionPolicy::default()),
            Err(GeometryError::SelectionOutOfBounds {
                reason: "extract region does not contain the selection",
            })
        );
    }

    #[test]
    fn rejects_zero_extract_region() {
        let mut info = valid_info();
        info.extract_region.width = 0;
        assert!(matches!(
            validate(&info, &ExtractionPolicy::default()),
            Err(GeometryError::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn rejects_shape_outside_policy_set() {
        let mut info = valid_info();
        // A legacy-only shape is not in the generation set.
        info.target_shape = Shape::SQUARE_768;
        info.padding_info = fit_to_shape(info.extract_region.size(), info.target_shape);
        assert_eq!(
            validate(&info, &ExtractionPolicy::default()),
            Err(GeometryError::UnsupportedShape {
                width: 768,
                height: 768,
            })
        );
    }

    #[test]
    fn rejects_broken_padding_sum() {
        let mut info = valid_info();
        info.padding_info.padding.right += 1;
        assert_eq!(
            validate(&info, &ExtractionPolicy::default()),
            Err(GeometryError::InvariantViolation {
                reason: "horizontal padding does not sum to the target width",
            })
        );
    }

    #[test]
    fn rejects_non_finite_scale() {
        let mut info = valid_info();
        info.padding_info.scale_factor = f64::NAN;
        assert!(matches!(
            validate(&info, &ExtractionPolicy::default()),
            Err(GeometryError::InvariantViolation { .. })
        ));
        info.padding_info.scale_factor = -1.0;
        assert!(matches!(
            validate(&info, &ExtractionPolicy::default()),
            Err(GeometryError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn error_messages_name_the_failure() {
        let err = GeometryError::UnsupportedShape {
            width: 640,
            height: 640,
        };
        assert_eq!(format!("{err}"), "unsupported target shape 640x640");
    }
}
