//! Dense arena indices.
//!
//! Indices are never reused within one graph, so side tables sized by
//! [`Graph::node_bound`](crate::Graph::node_bound) stay valid across removals.

use std::fmt;

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeIx(u32);

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EdgeIx(u32);

macro_rules! impl_ix {
    ($ty:ident, $tag:literal) => {
        impl $ty {
            #[inline]
            pub fn new(ix: usize) -> Self {
                Self(u32::try_from(ix).unwrap_or(u32::MAX))
            }

            #[inline]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($tag, "{}"), self.0)
            }
        }
    };
}

impl_ix!(NodeIx, "n");
impl_ix!(EdgeIx, "e");
