//! CAD kernel abstraction
//!
//! The [`CadKernel`] trait is the seam between feature history and geometry.
//! [`MeshKernel`] is the default backend.

mod mesh;
mod traits;
mod weld;

pub use mesh::{DEFAULT_SEGMENTS, MeshKernel};
pub use traits::*;
