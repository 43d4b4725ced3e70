//! Grid data structures and operations

mod field;
mod neighborhood;

pub use field::{BinaryMask, Grid, IntensityField};
pub use neighborhood::{Connectivity, Neighborhood};
