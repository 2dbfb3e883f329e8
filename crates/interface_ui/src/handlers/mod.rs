//! UI event handlers
//!
//! Each handler takes what the page currently shows and returns the
//! [`RenderInstruction`](crate::render::RenderInstruction)s for the host.

pub mod amount_input;
pub mod calculator;
pub mod collection;
pub mod search;
