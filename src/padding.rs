//! Letterbox fitting of an extracted region into a target shape.
//!
//! Fit-inside, never crop: the source is scaled uniformly until it touches
//! the target on one axis, and the remainder on the other axis becomes
//! blank padding split around the image. All sums are exact integer
//! arithmetic; only the reported scale factor is floating point.

use crate::geom::Size;
use crate::shape::Shape;

/// Blank border around a scaled image, per edge, in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Padding {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Padding {
    /// No padding on any edge.
    pub const ZERO: Self = Self {
        left: 0,
        top: 0,
        right: 0,
        bottom: 0,
    };

    /// Whether all four edges are zero.
    pub const fn is_zero(self) -> bool {
        self.left == 0 && self.top == 0 && self.right == 0 && self.bottom == 0
    }

    /// Sum of all four edges.
    pub const fn total(self) -> u32 {
        self.left + self.top + self.right + self.bottom
    }
}

/// How to scale and pad a source so it exactly fills a target shape.
///
/// Invariant: `scaled.width + padding.left + padding.right ==
/// target.width`, and the same on the vertical axis — exact integer
/// equality for every positive source.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaddingInfo {
    /// Uniform scale applied to the source before padding.
    pub scale_factor: f64,
    /// Source dimensions after scaling (floor-rounded).
    pub scaled: Size,
    /// Blank border completing the target shape.
    pub padding: Padding,
}

/// Compute the uniform scale and letterbox padding that fit `source`
/// inside `target` without distortion.
///
/// Total for any source; zero dimensions are treated as 1 so probing
/// callers get a usable (if meaningless) answer instead of a panic.
///
/// The constrained axis lands exactly on the target; the free axis is the
/// floor of the proportional size, computed in integer arithmetic so the
/// exact-sum invariant cannot be lost to float rounding. Odd remainders
/// are absorbed by the trailing edge.
pub fn fit_to_shape(source: Size, target: Shape) -> PaddingInfo {
    let sw = source.width.max(1) as u64;
    let sh = source.height.max(1) as u64;
    let tw = target.width as u64;
    let th = target.height as u64;

    // Width constrains when W/w <= H/h, compared by cross-multiplication.
    let (scaled_w, scaled_h, scale) = if tw * sh <= th * sw {
        let h = (sh * tw / sw).max(1).min(th);
        (tw, h, tw as f64 / sw as f64)
    } else {
        let w = (sw * th / sh).max(1).min(tw);
        (w, th, th as f64 / sh as f64)
    };

    let scaled = Size::new(scaled_w as u32, scaled_h as u32);
    let left = (target.width - scaled.width) / 2;
    let top = (target.height - scaled.height) / 2;
    PaddingInfo {
        scale_factor: scale,
        scaled,
        padding: Padding {
            left,
            top,
            right: target.width - scaled.width - left,
            bottom: target.height - scaled.height - top,
        },
    }
}

/// Per-axis scale factors between two sizes.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    /// Factors that map `from` onto `to`, per axis.
    pub fn between(from: Size, to: Size) -> Self {
        Self {
            x: to.width as f64 / from.width.max(1) as f64,
            y: to.height as f64 / from.height.max(1) as f64,
        }
    }

    /// The distortion-free scale: the smaller of the two axes.
    pub fn uniform(self) -> f64 {
        self.x.min(self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_exact_sum(info: &PaddingInfo, target: Shape) {
        assert_eq!(
            info.scaled.width + info.padding.left + info.padding.right,
            target.width,
            "width sum for {target}"
        );
        assert_eq!(
            info.scaled.height + info.padding.top + info.padding.bottom,
            target.height,
            "height sum for {target}"
        );
    }

    // ── fit_to_shape ────────────────────────────────────────────────────

    #[test]
    fn wide_source_into_landscape_pads_vertically() {
        // 1920x1080 into 1536x1024: scale 0.8, width-bound.
        let info = fit_to_shape(Size::new(1920, 1080), Shape::LANDSCAPE_1536);
        assert!((info.scale_factor - 0.8).abs() < 1e-9);
        assert_eq!(info.scaled, Size::new(1536, 864));
        assert_eq!(
            info.padding,
            Padding {
                left: 0,
                top: 80,
                right: 0,
                bottom: 80
            }
        );
        assert_exact_sum(&info, Shape::LANDSCAPE_1536);
    }

    #[test]
    fn landscape_source_into_square_pads_vertically() {
        let info = fit_to_shape(Size::new(800, 600), Shape::SQUARE_1024);
        assert_eq!(info.scaled, Size::new(1024, 768));
        assert_eq!(
            info.padding,
            Padding {
                left: 0,
                top: 128,
                right: 0,
                bottom: 128
            }
        );
    }

    #[test]
    fn tall_source_into_portrait() {
        let info = fit_to_shape(Size::new(1080, 1920), Shape::PORTRAIT_1536);
        assert_eq!(info.scaled, Size::new(864, 1536));
        assert_eq!(info.padding.left + info.padding.right, 160);
        assert_exact_sum(&info, Shape::PORTRAIT_1536);
    }

    #[test]
    fn matching_aspect_needs_no_padding() {
        let info = fit_to_shape(Size::new(720, 720), Shape::SQUARE_768);
        assert_eq!(info.scaled, Size::new(768, 768));
        assert!(info.padding.is_zero());

        let info = fit_to_shape(Size::new(3072, 2048), Shape::LANDSCAPE_1536);
        assert_eq!(info.scaled, Size::new(1536, 1024));
        assert!(info.padding.is_zero());
    }

    #[test]
    fn upscale_small_source() {
        let info = fit_to_shape(Size::new(500, 500), Shape::SQUARE_1024);
        assert!((info.scale_factor - 2.048).abs() < 1e-9);
        assert_eq!(info.scaled, Size::new(1024, 1024));
        assert!(info.padding.is_zero());
    }

    #[test]
    fn odd_remainder_lands_on_trailing_edge() {
        // 3:1 source into a square: free axis 341, remainder 683 splits
        // 341 / 342.
        let info = fit_to_shape(Size::new(3000, 1000), Shape::SQUARE_1024);
        assert_eq!(info.scaled, Size::new(1024, 341));
        assert_eq!(info.padding.top, 341);
        assert_eq!(info.padding.bottom, 342);
        assert_exact_sum(&info, Shape::SQUARE_1024);
    }

    #[test]
    fn extreme_source_keeps_one_pixel() {
        let info = fit_to_shape(Size::new(10_000, 1), Shape::SQUARE_512);
        assert_eq!(info.scaled.width, 512);
        assert_eq!(info.scaled.height, 1);
        assert_exact_sum(&info, Shape::SQUARE_512);
    }

    #[test]
    fn exact_sums_across_sources_and_shapes() {
        let shapes = [
            Shape::SQUARE_512,
            Shape::SQUARE_768,
            Shape::SQUARE_1024,
            Shape::LANDSCAPE_1536,
            Shape::PORTRAIT_1536,
        ];
        let sources = [
            (1u32, 1u32),
            (7, 3000),
            (1919, 1081),
            (512, 512),
            (4032, 3024),
            (123, 457),
        ];
        for shape in shapes {
            for (w, h) in sources {
                let info = fit_to_shape(Size::new(w, h), shape);
                assert_exact_sum(&info, shape);
                assert!(info.scaled.width <= shape.width);
                assert!(info.scaled.height <= shape.height);
                assert!(info.scale_factor > 0.0);
            }
        }
    }

    // ── ScaleFactors ────────────────────────────────────────────────────

    #[test]
    fn scale_factors_per_axis_and_uniform() {
        let s = ScaleFactors::between(Size::new(1920, 1080), Size::new(1536, 1024));
        assert!((s.x - 0.8).abs() < 1e-9);
        assert!((s.y - 1024.0 / 1080.0).abs() < 1e-9);
        assert!((s.uniform() - 0.8).abs() < 1e-9);

        let up = ScaleFactors::between(Size::new(100, 100), Size::new(1000, 1000));
        assert!((up.uniform() - 10.0).abs() < 1e-9);
    }
}
