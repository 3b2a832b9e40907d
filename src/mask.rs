//! Mapping the selection into target-canvas mask coordinates.
//!
//! The generator is told which part of its canvas to regenerate via a mask
//! image. This module computes the mask's geometry in final padded
//! target-canvas coordinates; rasterizing it (and choosing which polarity
//! means "regenerate") is the consumer's business.

#[allow(unused_imports)]
use num_traits::Float;

use crate::context::ContextInfo;

/// The region of the target canvas to regenerate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MaskGeometry {
    /// The mapped selection. `x2`/`y2` are exclusive; `x1 < x2` and
    /// `y1 < y2` always hold, with all values within the target canvas.
    Rectangle { x1: u32, y1: u32, x2: u32, y2: u32 },
    /// Centered circle used when no selection exists.
    Circle {
        center_x: u32,
        center_y: u32,
        radius: u32,
    },
}

/// Compute the mask geometry for an extraction, in target-canvas pixels.
///
/// The selection is translated into extract-local coordinates, scaled by
/// the same uniform factor the letterbox fit used (so it lands inside the
/// unpadded sub-rectangle), then offset by the leading padding edges.
/// Results that collapse to zero area after rounding are widened by one
/// pixel rather than returned degenerate.
pub fn mask_geometry(info: &ContextInfo) -> MaskGeometry {
    let target = info.target_shape;
    if !info.has_selection {
        // Matches the synthesized centered selection: a centered circle
        // sized to fit whichever canvas axis is shorter.
        return MaskGeometry::Circle {
            center_x: target.width / 2,
            center_y: target.height / 2,
            radius: target.width.min(target.height) / 4,
        };
    }

    let local = info.selection_in_extract();
    let scale = info.padding_info.scale_factor;
    let pad = info.padding_info.padding;

    let map_x = |v: u32| (v as f64 * scale).floor() as i64 + pad.left as i64;
    let map_y = |v: u32| (v as f64 * scale).floor() as i64 + pad.top as i64;

    let mut x1 = map_x(local.x).clamp(0, target.width as i64 - 1) as u32;
    let mut y1 = map_y(local.y).clamp(0, target.height as i64 - 1) as u32;
    let mut x2 = map_x(local.right()).clamp(0, target.width as i64) as u32;
    let mut y2 = map_y(local.bottom()).clamp(0, target.height as i64) as u32;

    // Zero-area after rounding: widen by one pixel.
    if x1 >= x2 {
        if x2 < target.width {
            x2 = x1 + 1;
        } else {
            x1 = x2 - 1;
        }
    }
    if y1 >= y2 {
        if y2 < target.height {
            y2 = y1 + 1;
        } else {
            y1 = y2 - 1;
        }
    }

    MaskGeometry::Rectangle { x1, y1, x2, y2 }
}
