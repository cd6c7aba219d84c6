// src/render/mod.rs

//! Diagram output: DOT generation and Graphviz invocation.

pub mod dot;
pub mod graphviz;

pub use dot::{DotOptions, render_dot};
pub use graphviz::GraphvizRenderer;
