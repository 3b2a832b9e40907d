//! Context-region extraction around a selection.
//!
//! Decides which rectangle of the source image a generator should see.
//! Focused mode expands the selection by a bounded margin of surrounding
//! context, keeps the region inside the image by shifting before clamping,
//! and then grows one axis toward the target shape's aspect ratio so the
//! letterbox padding shrinks or disappears. Full mode sends the whole
//! image.
//!
//! # Example
//!
//! ```
//! use inpaint_layout::{ExtractMode, Extraction, SelectionBounds};
//!
//! let info = Extraction::new(ExtractMode::Focused)
//!     .compute(1200, 800, Some(SelectionBounds::new(400, 250, 800, 550)));
//!
//! assert!(info.extract_region.contains(info.selection_bounds));
//! assert_eq!(
//!     info.padding_info.scaled.width
//!         + info.padding_info.padding.left
//!         + info.padding_info.padding.right,
//!     info.target_shape.width,
//! );
//! ```

#[allow(unused_imports)]
use num_traits::Float;

use crate::geom::{Rect, SelectionBounds, Size};
use crate::padding::{PaddingInfo, fit_to_shape};
use crate::shape::{Shape, ShapeSet};
use crate::validate::GeometryError;

/// How much of the image the generator sees.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ExtractMode {
    /// Send the whole image; the result replaces the whole canvas.
    Full,
    /// Send the selection plus surrounding context; the result is
    /// composited back over the extracted region.
    Focused,
}

/// Tunable extraction policy.
///
/// Two generations of the engine shipped with different constants; both
/// are constructors over the same code path rather than parallel
/// implementations. Passed explicitly — the engine keeps no ambient
/// configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtractionPolicy {
    /// Context margin as a fraction of the selection's longer side.
    pub context_fraction: f64,
    /// Lower bound on the context margin, in pixels.
    pub min_context: u32,
    /// Upper bound on the context margin, in pixels.
    pub max_context: u32,
    /// The output shapes available to this engine.
    pub shapes: ShapeSet,
    /// Aspect ratio above which a source counts as landscape.
    pub wide_threshold: f64,
    /// Side length cap for the synthesized default selection.
    pub default_selection: u32,
}

impl ExtractionPolicy {
    /// Shape-aware policy: 40% context margin bounded to 50–300px over
    /// the square/landscape/portrait set.
    pub const fn generation() -> Self {
        Self {
            context_fraction: 0.4,
            min_context: 50,
            max_context: 300,
            shapes: ShapeSet::Generation,
            wide_threshold: 1.3,
            default_selection: 512,
        }
    }

    /// Square-only policy of the earlier engine: 40% margin bounded to
    /// 32–200px over the 512/768/1024 ladder.
    ///
    /// The two margin bounds shipped without a recorded rationale for the
    /// change; both remain available rather than guessing which is
    /// authoritative.
    pub const fn legacy_squares() -> Self {
        Self {
            context_fraction: 0.4,
            min_context: 32,
            max_context: 200,
            shapes: ShapeSet::LegacySquares,
            wide_threshold: 1.3,
            default_selection: 512,
        }
    }

    /// Pick the output shape for a source of the given dimensions.
    pub fn select_shape(&self, width: u32, height: u32) -> Shape {
        self.shapes.select(width, height, self.wide_threshold)
    }
}

impl Default for ExtractionPolicy {
    fn default() -> Self {
        Self::generation()
    }
}

/// Everything downstream stages need to know about one extraction.
///
/// Immutable once constructed; the mask and placement stages read it,
/// never amend it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContextInfo {
    /// Which extraction mode produced this.
    pub mode: ExtractMode,
    /// The (resolved or synthesized) selection, in image coordinates.
    pub selection_bounds: Rect,
    /// The region of the image to crop and send, in image coordinates.
    pub extract_region: Rect,
    /// The output canvas the generator should use.
    pub target_shape: Shape,
    /// How the extract region scales and pads onto the target canvas.
    pub padding_info: PaddingInfo,
    /// False when the selection was synthesized (no user selection).
    pub has_selection: bool,
}

impl ContextInfo {
    /// Whether the extract region needs letterboxing on the target canvas.
    pub fn needs_padding(&self) -> bool {
        !self.padding_info.padding.is_zero()
    }

    /// The selection translated into extract-region-local coordinates.
    pub fn selection_in_extract(&self) -> Rect {
        Rect::new(
            self.selection_bounds.x.saturating_sub(self.extract_region.x),
            self.selection_bounds.y.saturating_sub(self.extract_region.y),
            self.selection_bounds.width,
            self.selection_bounds.height,
        )
    }
}

/// Context extraction builder.
///
/// ```
/// use inpaint_layout::{ExtractMode, Extraction, ExtractionPolicy};
///
/// let info = Extraction::new(ExtractMode::Focused)
///     .policy(ExtractionPolicy::legacy_squares())
///     .compute(800, 600, None);
///
/// // No selection: centered default square, no letterboxing.
/// assert!(!info.has_selection);
/// assert_eq!(info.extract_region.width, 512);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Extraction {
    mode: ExtractMode,
    policy: ExtractionPolicy,
}

impl Extraction {
    /// Create an extraction in the given mode with the default policy.
    pub fn new(mode: ExtractMode) -> Self {
        Self {
            mode,
            policy: ExtractionPolicy::default(),
        }
    }

    /// Override the extraction policy.
    pub fn policy(mut self, policy: ExtractionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Compute the extraction for an image and optional selection.
    ///
    /// Total: this backs an interactive edit, so any internal failure
    /// (degenerate image, unresolvable selection) degrades to the
    /// centered default extraction instead of propagating.
    pub fn compute(
        &self,
        image_width: u32,
        image_height: u32,
        selection: Option<SelectionBounds>,
    ) -> ContextInfo {
        match self.try_compute(image_width, image_height, selection) {
            Ok(info) => info,
            Err(err) => {
                tracing::warn!(
                    %err,
                    image_width,
                    image_height,
                    "context extraction failed, falling back to centered default",
                );
                self.default_extraction(Size::new(image_width.max(1), image_height.max(1)))
            }
        }
    }

    fn try_compute(
        &self,
        image_width: u32,
        image_height: u32,
        selection: Option<SelectionBounds>,
    ) -> Result<ContextInfo, GeometryError> {
        if image_width == 0 || image_height == 0 {
            return Err(GeometryError::InvalidDimensions {
                width: image_width as i64,
                height: image_height as i64,
                reason: "image dimensions must be positive",
            });
        }
        let image = Size::new(image_width, image_height);

        let sel = match selection {
            Some(bounds) => {
                bounds
                    .resolve(image)
                    .ok_or(GeometryError::SelectionOutOfBounds {
                        reason: "selection does not intersect the image",
                    })?
            }
            None => return Ok(self.default_extraction(image)),
        };

        Ok(match self.mode {
            ExtractMode::Full => self.full(image, sel, true),
            ExtractMode::Focused => self.focused(image, sel),
        })
    }

    /// Full-image extraction: the generator sees the whole canvas.
    fn full(&self, image: Size, selection: Rect, has_selection: bool) -> ContextInfo {
        let target_shape = self.policy.select_shape(image.width, image.height);
        ContextInfo {
            mode: ExtractMode::Full,
            selection_bounds: selection,
            extract_region: Rect::new(0, 0, image.width, image.height),
            target_shape,
            padding_info: fit_to_shape(image, target_shape),
            has_selection,
        }
    }

    /// Focused extraction: selection plus bounded context margin.
    fn focused(&self, image: Size, sel: Rect) -> ContextInfo {
        let policy = &self.policy;
        let sel_side = sel.width.max(sel.height);
        let margin = (sel_side as f64 * policy.context_fraction).floor() as i64;
        let margin = margin.min(policy.max_context as i64).max(policy.min_context as i64);

        // Candidate region, allowed to overflow the image until shifted.
        let (x1, x2) = shift_span(
            sel.x as i64 - margin,
            sel.right() as i64 + margin,
            image.width as i64,
        );
        let (y1, y2) = shift_span(
            sel.y as i64 - margin,
            sel.bottom() as i64 + margin,
            image.height as i64,
        );

        // Grow one axis toward the provisional shape's aspect ratio so
        // the letterbox shrinks; for square-only sets this is exactly the
        // old "make it square" step.
        let provisional = policy.select_shape((x2 - x1) as u32, (y2 - y1) as u32);
        let (x1, y1, x2, y2) = extend_toward_aspect(x1, y1, x2, y2, provisional, image);

        let extract_region = Rect::new(
            x1 as u32,
            y1 as u32,
            (x2 - x1) as u32,
            (y2 - y1) as u32,
        );
        let target_shape = policy.select_shape(extract_region.width, extract_region.height);
        ContextInfo {
            mode: ExtractMode::Focused,
            selection_bounds: sel,
            extract_region,
            target_shape,
            padding_info: fit_to_shape(extract_region.size(), target_shape),
            has_selection: true,
        }
    }

    /// The deterministic no-selection default: a centered square bounded
    /// by the smaller image dimension and the policy's cap.
    fn default_extraction(&self, image: Size) -> ContextInfo {
        let side = image
            .width
            .min(image.height)
            .min(self.policy.default_selection)
            .max(1);
        let sel = Rect::new(
            (image.width - side) / 2,
            (image.height - side) / 2,
            side,
            side,
        );
        match self.mode {
            ExtractMode::Full => self.full(image, sel, false),
            ExtractMode::Focused => {
                let target_shape = self.policy.select_shape(side, side);
                ContextInfo {
                    mode: ExtractMode::Focused,
                    selection_bounds: sel,
                    extract_region: sel,
                    target_shape,
                    padding_info: fit_to_shape(sel.size(), target_shape),
                    has_selection: false,
                }
            }
        }
    }
}

/// Fit the span `[a, b)` into `[0, limit)` by shifting toward the
/// interior first, clamping only when the span is longer than the limit.
///
/// Shifting preserves the span's length whenever the image can contain
/// it; clamping alone would shrink context near the edges.
fn shift_span(a: i64, b: i64, limit: i64) -> (i64, i64) {
    let (mut a, mut b) = (a, b);
    if a < 0 {
        b -= a;
        a = 0;
    }
    if b > limit {
        a -= b - limit;
        b = limit;
    }
    if a < 0 {
        a = 0;
    }
    (a, b)
}

/// Grow the aspect-deficient axis of `[x1, x2) × [y1, y2)` toward the
/// `shape` aspect ratio, never both axes, never past the image.
fn extend_toward_aspect(
    x1: i64,
    y1: i64,
    x2: i64,
    y2: i64,
    shape: Shape,
    image: Size,
) -> (i64, i64, i64, i64) {
    let w = x2 - x1;
    let h = y2 - y1;
    let sw = shape.width as i64;
    let sh = shape.height as i64;

    // w/h vs sw/sh by cross-multiplication.
    if w * sh < sw * h {
        // Width is short of the target aspect.
        let desired = ((h * sw + sh / 2) / sh).min(image.width as i64);
        if desired > w {
            let grow = desired - w;
            let (nx1, nx2) = shift_span(x1 - grow / 2, x2 + (grow - grow / 2), image.width as i64);
            return (nx1, y1, nx2, y2);
        }
    } else if w * sh > sw * h {
        // Height is short of the target aspect.
        let desired = ((w * sh + sw / 2) / sw).min(image.height as i64);
        if desired > h {
            let grow = desired - h;
            let (ny1, ny2) =
                shift_span(y1 - grow / 2, y2 + (grow - grow / 2), image.height as i64);
            return (x1, ny1, x2, ny2);
        }
    }
    (x1, y1, x2, y2)
}
