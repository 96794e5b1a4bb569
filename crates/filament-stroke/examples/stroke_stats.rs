//! Stroke Stats Demo - Headless Tessellation and Batching
//!
//! Demonstrates the polyline lifecycle without opening a window:
//! - Creating polylines from paths, segments and Bezier curves
//! - Thickness and color gradients
//! - Updating a polyline in place
//! - Dropping a polyline and rebuilding the batch
//!
//! Run with `RUST_LOG=filament_stroke=trace` to see every rebuild.

use filament_core::profiling::{self, profile_scope};
use filament_core::{Config, ProfilingMode};
use filament_stroke::{
    CapStyle, Color, CubicBezier, Gradient, JoinStyle, Polyline, StrokeError, StrokeRegistry,
    StrokeStyle, Vec3,
};

fn report(label: &str, registry: &mut StrokeRegistry) {
    profile_scope!("report");
    let live = registry.len();
    match registry.batch_if_dirty() {
        Some(batch) => tracing::info!(
            "{label}: {live} polylines, {} vertices, {} triangles",
            batch.vertices().len(),
            batch.triangle_count()
        ),
        None => tracing::info!("{label}: batch unchanged"),
    }
    profiling::new_frame();
}

fn main() -> Result<(), StrokeError> {
    Config {
        profiling: ProfilingMode::On,
    }
    .apply();

    let mut registry = StrokeRegistry::new();

    let zigzag = Polyline::from_path(
        &registry,
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(40.0, 60.0, 0.0),
            Vec3::new(80.0, 0.0, 0.0),
            Vec3::new(120.0, 60.0, 0.0),
        ],
        Gradient::linear(2.0, 14.0),
        Gradient::linear(Color::RED, Color::BLUE),
        StrokeStyle::new(JoinStyle::Round, CapStyle::Round),
    )?;

    let underline = Polyline::segment(
        &registry,
        Vec3::new(0.0, 80.0, 1.0),
        Vec3::new(120.0, 80.0, 1.0),
        3.0,
        Color::from_hex(0x33_cc_99),
        StrokeStyle::new(JoinStyle::Miter, CapStyle::Square),
    )?;

    let arch = CubicBezier::new(
        Vec3::new(0.0, 120.0, 0.5),
        Vec3::new(30.0, 200.0, 0.5),
        Vec3::new(90.0, 200.0, 0.5),
        Vec3::new(120.0, 120.0, 0.5),
    );
    let _coarse = Polyline::bezier(&registry, arch, 6.0, Color::WHITE, StrokeStyle::default())?;
    let _smooth = Polyline::bezier_flattened(
        &registry,
        arch,
        Gradient::new([(0.0, 1.0), (0.5, 10.0), (1.0, 1.0)])?,
        Color::GREEN,
        StrokeStyle::new(JoinStyle::Bevel, CapStyle::Butt),
    )?;

    let frame = Polyline::from_path(
        &registry,
        vec![
            Vec3::new(-10.0, -10.0, 2.0),
            Vec3::new(130.0, -10.0, 2.0),
            Vec3::new(130.0, 210.0, 2.0),
            Vec3::new(-10.0, 210.0, 2.0),
        ],
        2.0,
        Color::BLACK.with_alpha(0.5),
        StrokeStyle::new(JoinStyle::Miter, CapStyle::Connect),
    )?;

    tracing::info!(
        "zigzag: {} vertices, fringe {:.2}; frame: {} vertices",
        zigzag.vertex_count(),
        zigzag.aa_thickness(),
        frame.vertex_count()
    );

    report("initial", &mut registry);
    report("idle", &mut registry);

    zigzag.update(Gradient::linear(14.0, 2.0), Color::WHITE)?;
    report("after update", &mut registry);

    drop(underline);
    report("after drop", &mut registry);

    tracing::info!("{} polylines alive", registry.len());
    Ok(())
}
