/// Switch between rayon and plain iteration at the feature boundary.
///
/// The morphology and segmentation passes split their work by image row and
/// call `into_par_iter()` on a row range. With the `parallel` feature those
/// calls resolve to rayon; without it they resolve to the shim below and run
/// on one thread, so the hot loops never need their own `cfg` branches.
#[cfg(feature = "parallel")]
pub use rayon::prelude::*;

#[cfg(not(feature = "parallel"))]
mod sequential {
    /// Single-threaded replacement for `rayon::prelude::IntoParallelIterator`.
    ///
    /// `into_par_iter()` here is just `into_iter()`, after which the chained
    /// `flat_map`/`collect` combinators come from the plain `Iterator` trait.
    pub trait IntoParallelIterator {
        type Iter;
        type Item;
        fn into_par_iter(self) -> Self::Iter;
    }

    impl<I: IntoIterator> IntoParallelIterator for I {
        type Iter = I::IntoIter;
        type Item = I::Item;
        fn into_par_iter(self) -> Self::Iter {
            self.into_iter()
        }
    }
}

#[cfg(not(feature = "parallel"))]
pub use sequential::*;
