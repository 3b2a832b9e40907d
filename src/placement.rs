//! Mapping a generated result back onto the original image.
//!
//! The inverse of extraction: full-mode results replace the whole canvas,
//! focused-mode results are composited over the extract region. The
//! letterbox padding the generator saw carries no image content, so
//! composite placement crops it away *before* computing the rescale —
//! padding pixels must never be stretched into the final image.

use crate::context::{ContextInfo, ExtractMode};
use crate::geom::{Rect, Size};
use crate::padding::ScaleFactors;

/// How the generated result lands on the original image.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementMode {
    /// The result replaces the entire original canvas.
    Replace,
    /// The result is pasted over the extract region only.
    Composite,
}

/// Instructions for the downstream compositor, in original-image space.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Placement {
    pub mode: PlacementMode,
    /// Region of the generated result to use. `None` = the whole result.
    pub source_crop: Option<Rect>,
    /// Top-left corner of the paste destination.
    pub position: (u32, u32),
    /// Destination size the (cropped) result is resampled to.
    pub size: Size,
    /// Per-axis factors mapping the (cropped) result onto the destination.
    pub scale: ScaleFactors,
}

/// Compute where and how to composite a generated result.
///
/// `result` is the size of the image the generator actually returned — in
/// practice equal to the target shape, but not assumed to be: the unpad
/// crop is mapped into actual-result coordinates first.
pub fn place_result(info: &ContextInfo, original: Size, result: Size) -> Placement {
    match info.mode {
        ExtractMode::Full => Placement {
            mode: PlacementMode::Replace,
            source_crop: None,
            position: (0, 0),
            size: original,
            scale: ScaleFactors::between(result, original),
        },
        ExtractMode::Focused => {
            // Map the letterbox the generator saw into result coordinates.
            let shape = info.target_shape;
            let rx = result.width as f64 / shape.width.max(1) as f64;
            let ry = result.height as f64 / shape.height.max(1) as f64;
            let pad = info.padding_info.padding;
            let scaled = info.padding_info.scaled;
            let crop = Rect::new(
                (pad.left as f64 * rx) as u32,
                (pad.top as f64 * ry) as u32,
                ((scaled.width as f64 * rx) as u32).max(1),
                ((scaled.height as f64 * ry) as u32).max(1),
            )
            .clamp_to(result.width.max(1), result.height.max(1));

            let extract = info.extract_region;
            Placement {
                mode: PlacementMode::Composite,
                source_crop: if crop.is_full(result.width, result.height) {
                    None
                } else {
                    Some(crop)
                },
                position: (extract.x, extract.y),
                size: extract.size(),
                scale: ScaleFactors::between(crop.size(), extract.size()),
            }
        }
    }
}
