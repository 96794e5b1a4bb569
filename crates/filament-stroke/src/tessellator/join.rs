//! Join strategies for interior path points.
//!
//! Every strategy consumes the frontier left by the previous segment and
//! returns the frontier the next segment starts from. Bevel and round joins
//! emit two frontiers at the same point (incoming and outgoing) and fill the
//! outer corner between them; the miter emits one.

use super::{MeshInfo, RibbonBuilder, Sample};
use crate::config::StrokeConfig;
use crate::style::JoinStyle;
use glam::Vec2;

/// Local geometry of the path around an interior point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    /// Incoming direction (unit).
    pub d_in: Vec2,
    /// Outgoing direction (unit).
    pub d_out: Vec2,
    /// Left normal of the incoming segment.
    pub n_in: Vec2,
    /// Left normal of the outgoing segment.
    pub n_out: Vec2,
    /// Incidence angle between the two normals, in `[0, π]`.
    pub angle: f32,
    /// `cross(d_in, d_out)`: positive for left turns, zero when collinear.
    pub det: f32,
    /// Length of the shorter adjacent segment.
    pub shortest: f32,
}

impl Corner {
    pub fn new(prev: Vec2, point: Vec2, next: Vec2) -> Self {
        let incoming = point - prev;
        let outgoing = next - point;
        let d_in = incoming.normalize_or_zero();
        let d_out = outgoing.normalize_or_zero();
        let n_in = d_in.perp();
        let n_out = d_out.perp();

        Self {
            d_in,
            d_out,
            n_in,
            n_out,
            angle: n_in.dot(n_out).clamp(-1.0, 1.0).acos(),
            det: d_in.perp_dot(d_out),
            shortest: incoming.length().min(outgoing.length()),
        }
    }

    /// `1.0` when the top (left) side is inside the turn, `-1.0` otherwise.
    fn inner_side(&self) -> f32 {
        if self.det >= 0.0 { 1.0 } else { -1.0 }
    }

    /// Unit bisector of the two normals, pointing to the top side.
    fn bisector(&self) -> Vec2 {
        let sum = self.n_in + self.n_out;
        if sum.length_squared() > 1.0e-12 {
            sum.normalize()
        } else {
            // Exact reversal: the offset lines never meet.
            self.d_in
        }
    }
}

fn fallback(style: JoinStyle, corner: &Corner, config: &StrokeConfig) -> Option<JoinStyle> {
    match style {
        JoinStyle::Miter => (corner.angle > config.max_miter_angle).then_some(JoinStyle::Bevel),
        JoinStyle::Bevel | JoinStyle::Round => {
            (corner.angle < config.min_bevel_angle || corner.det == 0.0)
                .then_some(JoinStyle::Miter)
        }
    }
}

/// Pick the strategy that will actually tessellate `corner`.
///
/// Miters that would diverge become bevels; bevels and round joins with no
/// visible face become miters. A strategy is never revisited, so the chain
/// always terminates.
pub fn resolve_join(style: JoinStyle, corner: &Corner, config: &StrokeConfig) -> JoinStyle {
    let mut visited = [false; 3];
    let mut current = style;
    loop {
        visited[current as usize] = true;
        match fallback(current, corner, config) {
            Some(next) if !visited[next as usize] => current = next,
            _ => return current,
        }
    }
}

pub(crate) fn join(
    builder: &mut RibbonBuilder<'_>,
    style: JoinStyle,
    corner: &Corner,
    sample: &Sample,
    prev: MeshInfo,
) -> MeshInfo {
    let resolved = resolve_join(style, corner, builder.config);
    if resolved != style {
        tracing::trace!(
            "{} join at {:?} falls back to {} (angle {:.1}°)",
            style.as_str(),
            sample.position,
            resolved.as_str(),
            corner.angle.to_degrees()
        );
    }

    match resolved {
        JoinStyle::Miter => miter(builder, corner, sample, prev),
        JoinStyle::Bevel => bevel(builder, corner, sample, prev),
        JoinStyle::Round => round(builder, corner, sample, prev),
    }
}

/// Distance from the path point to the intersection of the offset lines at
/// `width`, before any clamping.
fn miter_length(corner: &Corner, width: f32, config: &StrokeConfig) -> f32 {
    let min_cos = (config.max_miter_angle * 0.5).cos();
    let cos_half = corner.bisector().dot(corner.n_in).abs().max(min_cos);
    width / cos_half
}

/// Inner-side miter length, clamped so the point does not run past the
/// shorter adjacent segment.
fn inner_length(corner: &Corner, width: f32, config: &StrokeConfig) -> f32 {
    let limit = (width * width + corner.shortest * corner.shortest).sqrt();
    miter_length(corner, width, config).min(limit)
}

fn miter(
    builder: &mut RibbonBuilder<'_>,
    corner: &Corner,
    sample: &Sample,
    prev: MeshInfo,
) -> MeshInfo {
    let config = builder.config;
    let m = corner.bisector();
    let side = corner.inner_side();
    let core = sample.half;
    let outer = core + builder.aa;

    // Top is the inner side for left turns, the outer side for right turns.
    let (top, btm) = if side > 0.0 {
        (
            inner_length(corner, core, config),
            miter_length(corner, core, config),
        )
    } else {
        (
            miter_length(corner, core, config),
            inner_length(corner, core, config),
        )
    };
    let (aa_top, aa_btm) = if side > 0.0 {
        (
            inner_length(corner, outer, config),
            miter_length(corner, outer, config),
        )
    } else {
        (
            miter_length(corner, outer, config),
            inner_length(corner, outer, config),
        )
    };

    let section = builder.section(sample, m * top, -m * btm, m * aa_top, -m * aa_btm);
    builder.stitch(prev, section);
    section
}

/// The vertices shared by bevel and round joins.
struct SplitCorner {
    outgoing: MeshInfo,
    /// Inner core vertex, the pivot of the corner fill.
    inner: u32,
    /// Outer core and fringe vertices on the incoming and outgoing edge.
    outer_in: (u32, u32),
    outer_out: (u32, u32),
}

/// Emit the inner point plus the outer edge points of both segments, and
/// stitch the incoming frontier.
fn split_corner(
    builder: &mut RibbonBuilder<'_>,
    corner: &Corner,
    sample: &Sample,
    prev: MeshInfo,
) -> SplitCorner {
    let config = builder.config;
    let side = corner.inner_side();
    let m = corner.bisector() * side;
    let core = sample.half;
    let outer = core + builder.aa;

    let inner = builder.core(sample, m * inner_length(corner, core, config));
    let inner_aa = builder.fringe(sample, m * inner_length(corner, outer, config));
    let out_in = (
        builder.core(sample, -side * corner.n_in * core),
        builder.fringe(sample, -side * corner.n_in * outer),
    );
    let out_out = (
        builder.core(sample, -side * corner.n_out * core),
        builder.fringe(sample, -side * corner.n_out * outer),
    );

    let frontier = |outer: (u32, u32)| {
        if side > 0.0 {
            MeshInfo {
                top: inner,
                btm: outer.0,
                aa_top: inner_aa,
                aa_btm: outer.1,
            }
        } else {
            MeshInfo {
                top: outer.0,
                btm: inner,
                aa_top: outer.1,
                aa_btm: inner_aa,
            }
        }
    };

    let incoming = frontier(out_in);
    let outgoing = frontier(out_out);
    builder.stitch(prev, incoming);

    SplitCorner {
        outgoing,
        inner,
        outer_in: out_in,
        outer_out: out_out,
    }
}

fn bevel(
    builder: &mut RibbonBuilder<'_>,
    corner: &Corner,
    sample: &Sample,
    prev: MeshInfo,
) -> MeshInfo {
    let split = split_corner(builder, corner, sample, prev);
    let (a, a_aa) = split.outer_in;
    let (b, b_aa) = split.outer_out;

    builder.triangle(split.inner, a, b);
    builder.quad(a, a_aa, b_aa, b);

    split.outgoing
}

fn round(
    builder: &mut RibbonBuilder<'_>,
    corner: &Corner,
    sample: &Sample,
    prev: MeshInfo,
) -> MeshInfo {
    let split = split_corner(builder, corner, sample, prev);
    let side = corner.inner_side();
    let blades = builder.config.join_fan_blades(corner.angle);
    let step = side * corner.angle / blades as f32;
    let start = -side * corner.n_in;
    let core = sample.half;
    let outer = core + builder.aa;

    let mut ring = split.outer_in;
    for blade in 1..=blades {
        let next = if blade == blades {
            split.outer_out
        } else {
            let dir = Vec2::from_angle(step * blade as f32).rotate(start);
            (
                builder.core(sample, dir * core),
                builder.fringe(sample, dir * outer),
            )
        };

        builder.triangle(split.inner, ring.0, next.0);
        builder.quad(ring.0, ring.1, next.1, next.0);
        ring = next;
    }

    split.outgoing
}
