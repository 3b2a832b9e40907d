//! Context-extraction and placement geometry for generative inpainting.
//!
//! Pure geometry — no pixel operations, no I/O, `no_std` compatible. The
//! engine decides what rectangle of an image to send to a generation API,
//! which supported canvas shape to request, how to letterbox the region
//! onto that canvas without distortion, where the selection lands on the
//! canvas for masking, and how to map the generated result back onto the
//! original image. Reading pixels, rasterizing masks, and talking to the
//! API are the host's business.
//!
//! # Modules
//!
//! - [`geom`] — shared value types (`Size`, `Rect`, `SelectionBounds`) and
//!   advisory input limits
//! - [`shape`] — supported output canvas shapes and shape selection
//! - [`padding`] — letterbox fitting onto a target shape
//! - [`context`] — context-region extraction around a selection
//! - [`mask`] — selection mapped into target-canvas mask coordinates
//! - [`placement`] — generated results mapped back onto the original
//! - [`validate`] — invariant checks and the error taxonomy
//!
//! # Example
//!
//! ```
//! use inpaint_layout::{
//!     ExtractMode, Extraction, ExtractionPolicy, SelectionBounds, Size,
//!     mask_geometry, place_result, validate,
//! };
//!
//! let info = Extraction::new(ExtractMode::Focused)
//!     .compute(1920, 1080, Some(SelectionBounds::new(800, 400, 1200, 700)));
//! assert!(validate(&info, &ExtractionPolicy::default()).is_ok());
//!
//! // Crop `extract_region`, scale+pad per `padding_info`, request the
//! // canvas `info.target_shape` ("1024x1024" etc.), rasterize the mask,
//! // and composite the result per the placement.
//! let mask = mask_geometry(&info);
//! let placement = place_result(&info, Size::new(1920, 1080), info.target_shape.size());
//! assert!(placement.position.0 <= info.selection_bounds.x);
//! let _ = (mask, placement);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

pub mod context;
pub mod geom;
pub mod mask;
pub mod padding;
pub mod placement;
pub mod shape;
pub mod validate;

// Re-exports: the whole engine surface is small enough to use flat.
pub use context::{ContextInfo, ExtractMode, Extraction, ExtractionPolicy};
pub use geom::{Limits, Rect, SelectionBounds, Size, check_image_dims};
pub use mask::{MaskGeometry, mask_geometry};
pub use padding::{Padding, PaddingInfo, ScaleFactors, fit_to_shape};
pub use placement::{Placement, PlacementMode, place_result};
pub use shape::{Shape, ShapeSet};
pub use validate::{GeometryError, validate};
