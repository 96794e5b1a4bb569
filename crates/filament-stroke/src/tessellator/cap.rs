//! Cap strategies for the first and last path point.

use super::{MeshInfo, RibbonBuilder, Sample};
use crate::style::CapStyle;
use glam::Vec2;
use std::f32::consts::PI;

/// Open the ribbon at `sample`, where `dir` is the direction of the first
/// segment. Returns the first frontier.
pub(crate) fn start(
    builder: &mut RibbonBuilder<'_>,
    cap: CapStyle,
    sample: &Sample,
    dir: Vec2,
) -> MeshInfo {
    let normal = dir.perp();
    let out = -dir;

    match cap {
        CapStyle::Butt | CapStyle::Square => {
            let section = flat(builder, cap, sample, normal, out);
            builder.quad(section.top, section.aa_top, section.aa_btm, section.btm);
            section
        }
        CapStyle::Round => {
            let section = plain(builder, sample, normal);
            // Sweep from the top edge around the back of the start point.
            fan(
                builder,
                sample,
                normal,
                (section.top, section.aa_top),
                (section.btm, section.aa_btm),
            );
            section
        }
        // Placeholder, overwritten once the closing section is known.
        CapStyle::Connect => plain(builder, sample, normal),
    }
}

/// Close the ribbon at `sample`, where `dir` is the direction of the last
/// segment, stitching it to `prev`. Returns the final frontier.
pub(crate) fn end(
    builder: &mut RibbonBuilder<'_>,
    cap: CapStyle,
    sample: &Sample,
    dir: Vec2,
    prev: MeshInfo,
) -> MeshInfo {
    let normal = dir.perp();

    match cap {
        CapStyle::Butt | CapStyle::Square => {
            let section = flat(builder, cap, sample, normal, dir);
            builder.stitch(prev, section);
            builder.quad(section.top, section.aa_top, section.aa_btm, section.btm);
            section
        }
        CapStyle::Round => {
            let section = plain(builder, sample, normal);
            builder.stitch(prev, section);
            // Sweep from the bottom edge around the front of the end point.
            fan(
                builder,
                sample,
                -normal,
                (section.btm, section.aa_btm),
                (section.top, section.aa_top),
            );
            section
        }
        CapStyle::Connect => {
            let section = plain(builder, sample, normal);
            builder.stitch(prev, section);
            section
        }
    }
}

/// Cross-section perpendicular to the path, no extension.
fn plain(builder: &mut RibbonBuilder<'_>, sample: &Sample, normal: Vec2) -> MeshInfo {
    let core = normal * sample.half;
    let outer = normal * (sample.half + builder.aa);
    builder.section(sample, core, -core, outer, -outer)
}

/// Butt and square ends. `out` points away from the ribbon.
fn flat(
    builder: &mut RibbonBuilder<'_>,
    cap: CapStyle,
    sample: &Sample,
    normal: Vec2,
    out: Vec2,
) -> MeshInfo {
    let core = sample.half;
    let outer = core + builder.aa;
    let (core_push, outer_push) = match cap {
        CapStyle::Square => (core, outer),
        _ => (0.0, builder.aa),
    };

    builder.section(
        sample,
        normal * core + out * core_push,
        -normal * core + out * core_push,
        normal * outer + out * outer_push,
        -normal * outer + out * outer_push,
    )
}

/// Half-turn fan around a pivot at the sample, sweeping counter-clockwise
/// from `from_dir`. `first` and `last` are the existing (core, fringe)
/// vertices at the two ends of the sweep.
fn fan(
    builder: &mut RibbonBuilder<'_>,
    sample: &Sample,
    from_dir: Vec2,
    first: (u32, u32),
    last: (u32, u32),
) {
    let blades = builder.config.cap_fan_blades();
    let step = PI / blades as f32;
    let core = sample.half;
    let outer = core + builder.aa;
    let pivot = builder.core(sample, Vec2::ZERO);

    let mut ring = first;
    for blade in 1..=blades {
        let next = if blade == blades {
            last
        } else {
            let dir = Vec2::from_angle(step * blade as f32).rotate(from_dir);
            (
                builder.core(sample, dir * core),
                builder.fringe(sample, dir * outer),
            )
        };

        builder.triangle(pivot, ring.0, next.0);
        builder.quad(ring.0, ring.1, next.1, next.0);
        ring = next;
    }
}
