//! Lifecycle and vertex-layout plumbing for linked GL shader programs.
//!
//! [`ShaderProgram`] owns the compiled stages and the linked program object
//! on a context; the [`Shader`] trait is what concrete shader variants
//! implement to describe their vertex layout before a draw. The GL calls
//! themselves go through [`GlDriver`], implemented for [`glow::Context`]
//! and mockable in tests.

mod driver;
mod error;
mod program;

pub use driver::{AttributeKind, GlDriver, Stage};
pub use error::ShaderError;
pub use program::{Shader, ShaderProgram, VertexAttribute, POSITION_ATTRIBUTE};
