//! Supported output canvas shapes and shape selection.
//!
//! Generation APIs accept a small fixed set of canvas sizes. [`ShapeSet`]
//! names the set in force and picks the best member for a source aspect
//! ratio; everything else in the engine treats the chosen [`Shape`] as
//! opaque dimensions.

use core::fmt;

use crate::geom::Size;

/// One supported output canvas size.
///
/// The wire form expected by generation APIs is `"{width}x{height}"`,
/// which is what [`Display`](fmt::Display) renders:
///
/// ```
/// use inpaint_layout::Shape;
///
/// assert_eq!(Shape::LANDSCAPE_1536.to_string(), "1536x1024");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shape {
    pub width: u32,
    pub height: u32,
}

impl Shape {
    /// 512×512, smallest rung of the legacy square ladder.
    pub const SQUARE_512: Self = Self {
        width: 512,
        height: 512,
    };
    /// 768×768, middle rung of the legacy square ladder.
    pub const SQUARE_768: Self = Self {
        width: 768,
        height: 768,
    };
    /// 1024×1024, shared by both shape sets.
    pub const SQUARE_1024: Self = Self {
        width: 1024,
        height: 1024,
    };
    /// 1536×1024 landscape canvas.
    pub const LANDSCAPE_1536: Self = Self {
        width: 1536,
        height: 1024,
    };
    /// 1024×1536 portrait canvas.
    pub const PORTRAIT_1536: Self = Self {
        width: 1024,
        height: 1536,
    };

    /// Dimensions of this shape.
    pub const fn size(self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Which fixed set of output shapes is in force.
///
/// Two generations of the engine used different sets; the selection rule
/// travels with the set so call sites never branch on it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeSet {
    /// Aspect-aware set: square, landscape, and portrait canvases.
    #[default]
    Generation,
    /// Older square-only ladder, picked by region size.
    LegacySquares,
}

impl ShapeSet {
    /// The members of this set.
    pub const fn shapes(self) -> &'static [Shape] {
        match self {
            Self::Generation => &[
                Shape::SQUARE_1024,
                Shape::LANDSCAPE_1536,
                Shape::PORTRAIT_1536,
            ],
            Self::LegacySquares => &[Shape::SQUARE_512, Shape::SQUARE_768, Shape::SQUARE_1024],
        }
    }

    /// Whether `shape` is a member of this set.
    pub fn contains(self, shape: Shape) -> bool {
        self.shapes().contains(&shape)
    }

    /// Pick the best member for a source of the given dimensions.
    ///
    /// Total: degenerate (zero) dimensions yield the square default, since
    /// callers may probe with sizes they have not validated yet.
    ///
    /// For [`Generation`](Self::Generation), `wide_threshold` is the
    /// aspect ratio above which a source counts as landscape; its
    /// reciprocal is the portrait bound, so swapping width and height
    /// swaps landscape and portrait results symmetrically.
    pub fn select(self, width: u32, height: u32, wide_threshold: f64) -> Shape {
        match self {
            Self::Generation => {
                if width == 0 || height == 0 {
                    return Shape::SQUARE_1024;
                }
                // Multiplication form keeps the landscape and portrait
                // predicates exact mirrors of each other: swapping the
                // arguments swaps the verdicts even at the thresholds.
                let (w, h) = (width as f64, height as f64);
                if w > wide_threshold * h {
                    Shape::LANDSCAPE_1536
                } else if h > wide_threshold * w {
                    Shape::PORTRAIT_1536
                } else {
                    Shape::SQUARE_1024
                }
            }
            Self::LegacySquares => {
                let side = width.max(height);
                if side <= 512 {
                    Shape::SQUARE_512
                } else if side <= 768 {
                    Shape::SQUARE_768
                } else {
                    Shape::SQUARE_1024
                }
            }
        }
    }
}
