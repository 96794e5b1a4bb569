//! Stroke tessellation.
//!
//! [`path_meshing`] walks a path once: a cap at the first point, a join at
//! every interior point and a cap at the last point. Each step emits one or
//! more cross-sections ([`MeshInfo`]) and stitches them to the previous one,
//! so the ribbon is built strictly front to back.
//!
//! Every cross-section has four vertices: the opaque core edge (`top`,
//! `btm`) and a copy pushed outward by the anti-aliasing width with zero
//! alpha (`aa_top`, `aa_btm`).

mod cap;
mod join;

pub use join::{Corner, resolve_join};

use crate::config::{StrokeConfig, core_half_thickness};
use crate::error::{StrokeError, StrokeResult};
use crate::gradient::Gradient;
use crate::style::{CapStyle, StrokeStyle};
use crate::vertex::{StrokeMesh, Vertex};
use filament_core::Color;
use filament_core::profiling::profile_function;
use glam::{Vec2, Vec3};

/// The most recently emitted cross-section of a ribbon.
///
/// Indices point into the vertex array of the mesh being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshInfo {
    pub top: u32,
    pub btm: u32,
    pub aa_top: u32,
    pub aa_btm: u32,
}

impl MeshInfo {
    pub fn indices(&self) -> [u32; 4] {
        [self.top, self.btm, self.aa_top, self.aa_btm]
    }
}

/// One path point after gradient evaluation.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Sample {
    pub position: Vec3,
    /// Core half thickness.
    pub half: f32,
    pub color: Color,
}

impl Sample {
    pub fn xy(&self) -> Vec2 {
        self.position.truncate()
    }
}

/// Vertex and triangle emission shared by caps and joins.
pub(crate) struct RibbonBuilder<'a> {
    mesh: &'a mut StrokeMesh,
    pub aa: f32,
    pub config: &'a StrokeConfig,
}

impl<'a> RibbonBuilder<'a> {
    fn new(mesh: &'a mut StrokeMesh, aa: f32, config: &'a StrokeConfig) -> Self {
        Self { mesh, aa, config }
    }

    /// Push a core vertex at `sample` displaced by `offset`.
    pub fn core(&mut self, sample: &Sample, offset: Vec2) -> u32 {
        self.push(sample.position + offset.extend(0.0), sample.color)
    }

    /// Push a faded fringe vertex at `sample` displaced by `offset`.
    pub fn fringe(&mut self, sample: &Sample, offset: Vec2) -> u32 {
        self.push(
            sample.position + offset.extend(0.0),
            sample.color.with_alpha(0.0),
        )
    }

    fn push(&mut self, position: Vec3, color: Color) -> u32 {
        let index = self.mesh.vertices.len() as u32;
        self.mesh.vertices.push(Vertex::new(position, color));
        index
    }

    /// Emit a cross-section from four offsets relative to `sample`.
    pub fn section(
        &mut self,
        sample: &Sample,
        top: Vec2,
        btm: Vec2,
        aa_top: Vec2,
        aa_btm: Vec2,
    ) -> MeshInfo {
        MeshInfo {
            top: self.core(sample, top),
            btm: self.core(sample, btm),
            aa_top: self.fringe(sample, aa_top),
            aa_btm: self.fringe(sample, aa_btm),
        }
    }

    /// Emit a triangle, wound counter-clockwise in the XY plane.
    pub fn triangle(&mut self, a: u32, b: u32, c: u32) {
        let tri = if self.mesh_area(a, b, c) < 0.0 {
            [a, c, b]
        } else {
            [a, b, c]
        };
        self.mesh.indices.extend_from_slice(&tri);
    }

    /// Emit the quad `a b c d` (given in boundary order) as two triangles.
    pub fn quad(&mut self, a: u32, b: u32, c: u32, d: u32) {
        self.triangle(a, b, c);
        self.triangle(a, c, d);
    }

    /// Connect two cross-sections: core quad plus one fringe quad per side.
    pub fn stitch(&mut self, from: MeshInfo, to: MeshInfo) {
        self.quad(from.top, from.btm, to.btm, to.top);
        self.quad(from.aa_top, from.top, to.top, to.aa_top);
        self.quad(from.btm, from.aa_btm, to.aa_btm, to.btm);
    }

    fn mesh_area(&self, a: u32, b: u32, c: u32) -> f32 {
        self.mesh.signed_area([a, b, c])
    }
}

/// Tessellate one polyline into a ribbon mesh.
///
/// Point `i` of an `N`-point path samples both gradients at `t = i / (N-1)`.
/// The parameter advances per point, not per unit of length, so unevenly
/// spaced paths bunch the gradient around dense regions.
///
/// Paths with fewer than two usable points produce an empty mesh.
pub fn path_meshing(
    path: &[Vec3],
    thickness: &Gradient<f32>,
    color: &Gradient<Color>,
    style: StrokeStyle,
    config: &StrokeConfig,
) -> StrokeResult<StrokeMesh> {
    profile_function!();

    let samples = sample_path(path, thickness, color, style, config)?;
    let mut mesh = StrokeMesh::new();
    if samples.len() < 2 {
        tracing::warn!(
            "Polyline has {} usable point(s), nothing to tessellate",
            samples.len()
        );
        return Ok(mesh);
    }

    let aa = config.aa_thickness(thickness.max());
    let mut builder = RibbonBuilder::new(&mut mesh, aa, config);
    let last = samples.len() - 1;

    // Start
    let first_dir = direction(&samples[0], &samples[1]);
    let start = cap::start(&mut builder, style.cap, &samples[0], first_dir);

    // Interior
    let mut frontier = start;
    for i in 1..last {
        let corner = Corner::new(samples[i - 1].xy(), samples[i].xy(), samples[i + 1].xy());
        frontier = join::join(&mut builder, style.join, &corner, &samples[i], frontier);
    }

    // End
    match style.cap {
        CapStyle::Connect => {
            let corner = Corner::new(samples[last - 1].xy(), samples[last].xy(), samples[1].xy());
            let end = join::join(&mut builder, style.join, &corner, &samples[last], frontier);
            weld_loop(&mut mesh, start, end);
        }
        cap => {
            let last_dir = direction(&samples[last - 1], &samples[last]);
            cap::end(&mut builder, cap, &samples[last], last_dir, frontier);
        }
    }

    tracing::trace!(
        "Tessellated {} points into {} vertices / {} triangles",
        samples.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(mesh)
}

/// Overwrite the placeholder start section of a closed loop with the final
/// section, welding both ends of the ribbon together.
fn weld_loop(mesh: &mut StrokeMesh, start: MeshInfo, end: MeshInfo) {
    for (placeholder, source) in start.indices().into_iter().zip(end.indices()) {
        let position = mesh.vertices[source as usize].position;
        mesh.vertices[placeholder as usize].position = position;
    }
}

fn direction(from: &Sample, to: &Sample) -> Vec2 {
    (to.xy() - from.xy()).normalize_or_zero()
}

/// Evaluate gradients per point and drop points that would form
/// zero-length segments. Dropped points keep their slot in `t`.
fn sample_path(
    path: &[Vec3],
    thickness: &Gradient<f32>,
    color: &Gradient<Color>,
    style: StrokeStyle,
    config: &StrokeConfig,
) -> StrokeResult<Vec<Sample>> {
    if let Some(index) = path.iter().position(|p| !p.is_finite()) {
        return Err(StrokeError::NonFinitePoint { index });
    }

    let mut points: Vec<(usize, Vec3)> = Vec::with_capacity(path.len() + 1);
    for (index, &point) in path.iter().enumerate() {
        let distinct = points.last().is_none_or(|&(_, last)| {
            last.truncate().distance(point.truncate()) > config.min_segment_length
        });
        if distinct {
            points.push((index, point));
        }
    }

    // An open loop is closed with a copy of its first point. The copy shares
    // the last point's slot so the user's points keep `t = i / (N-1)`.
    if style.is_loop()
        && let (Some(&(_, first)), Some(&(index, last))) = (points.first(), points.last())
        && points.len() > 1
        && first.truncate().distance(last.truncate()) > config.min_segment_length
    {
        points.push((index, first));
    }

    let span = path.len().saturating_sub(1).max(1) as f32;
    Ok(points
        .into_iter()
        .map(|(index, position)| {
            let t = index as f32 / span;
            Sample {
                position,
                half: core_half_thickness(thickness.evaluate(t)),
                color: color.evaluate(t),
            }
        })
        .collect())
}
