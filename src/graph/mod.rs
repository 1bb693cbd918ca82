//! Composable building blocks for constructing audio-processing graphs.
//!
//! Graph nodes wrap the low-level DSP primitives with what a host graph
//! needs: in-place block rendering against a [`node::RenderCtx`].

/// Interpolated delay node with a millisecond delay time.
pub mod delay;
/// Core traits shared by all graph nodes.
pub mod node;

pub use delay::DelayNode;
pub use node::{GraphNode, RenderCtx};
