//! Filament Stroke - variable-width, anti-aliased polylines
//!
//! This crate provides:
//! - Tessellation of paths into ribbons with per-point thickness and color
//!   gradients, miter/bevel/round joins and butt/square/round/loop caps
//! - An anti-aliasing fringe of zero-alpha vertices around every ribbon
//! - A registry of live polylines batched into one indexed draw
//! - A wgpu renderer for the batch
//!
//! # Example
//!
//! ```ignore
//! use filament_stroke::*;
//!
//! let mut registry = StrokeRegistry::new();
//! let line = Polyline::from_path(
//!     &registry,
//!     vec![Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), Vec3::new(100.0, 80.0, 0.0)],
//!     Gradient::linear(2.0, 12.0),
//!     Color::RED,
//!     StrokeStyle::new(JoinStyle::Round, CapStyle::Round),
//! )?;
//!
//! let mut renderer = StrokeRenderer::new(&device, &queue, surface_format);
//! renderer.prepare(&mut registry, CameraUniform::orthographic(800.0, 600.0, -1.0, 1.0));
//! renderer.render(&mut pass);
//! ```

// Primitives
mod config;
mod curve;
mod error;
mod gradient;
mod style;

// Tessellation
mod tessellator;
mod vertex;

// Instances
mod batch;
mod polyline;
mod registry;

// Rendering
mod gpu_types;
mod pipeline;
mod renderer;

// Re-exports
pub use config::*;
pub use curve::*;
pub use error::*;
pub use gradient::*;
pub use style::*;

pub use tessellator::*;
pub use vertex::*;

pub use batch::*;
pub use polyline::*;
pub use registry::*;

pub use gpu_types::*;
pub use renderer::*;

pub use filament_core::Color;
pub use glam::{Mat4, Vec2, Vec3};
