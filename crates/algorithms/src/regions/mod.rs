//! Connected pore-region extraction
//!
//! Groups pore pixels of a cleaned mask into connected components and
//! measures each one: pixel area, bounding box, and (in contour mode) the
//! traced outer boundary with its perimeter length.

mod contour;
mod extract;
mod label;

pub use contour::{perimeter, trace_boundary};
pub use extract::{extract, ExtractRegions, ExtractionParams, Region};
pub use label::{label_components, BoundingBox, ComponentStats};
