//! Stroke tessellation tests.
//!
//! These tests check the ribbon geometry produced for caps, joins and loops
//! through the public API.

use filament_stroke::{
    CapStyle, Color, Corner, Gradient, JoinStyle, Polyline, StrokeConfig, StrokeMesh,
    StrokeRegistry, StrokeStyle, Vec2, Vec3, path_meshing, resolve_join,
};

fn mesh(path: &[Vec3], thickness: f32, style: StrokeStyle) -> StrokeMesh {
    path_meshing(
        path,
        &Gradient::constant(thickness),
        &Gradient::constant(Color::WHITE),
        style,
        &StrokeConfig::default(),
    )
    .unwrap()
}

/// A path that runs along +X and then turns left by `degrees`.
fn corner_path(degrees: f32) -> [Vec3; 3] {
    let turn = Vec2::from_angle(degrees.to_radians()) * 100.0;
    [
        Vec3::new(-100.0, 0.0, 0.0),
        Vec3::ZERO,
        Vec3::new(turn.x, turn.y, 0.0),
    ]
}

fn core_triangles(mesh: &StrokeMesh) -> usize {
    mesh.triangles()
        .filter(|tri| tri.iter().all(|&i| mesh.vertices[i as usize].alpha() == 1.0))
        .count()
}

// ====================
// Caps
// ====================

#[test]
fn test_butt_segment_core_rectangle() {
    let thickness = 5.0;
    let mesh = mesh(
        &[Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)],
        thickness,
        StrokeStyle::default(),
    );

    let core: Vec<Vec3> = mesh
        .vertices
        .iter()
        .filter(|v| v.alpha() == 1.0)
        .map(|v| v.position())
        .collect();
    assert_eq!(core.len(), 4);
    assert_eq!(core_triangles(&mesh), 2);

    let width = 2.0 * ((thickness - 1.0) / 2.0);
    let (min_y, max_y) = core
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.y), hi.max(p.y)));
    let (min_x, max_x) = core
        .iter()
        .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p.x), hi.max(p.x)));
    assert_eq!(max_y - min_y, width);
    assert_eq!(max_x - min_x, 100.0);
}

#[test]
fn test_butt_segment_counts() {
    let mesh = mesh(
        &[Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)],
        5.0,
        StrokeStyle::default(),
    );
    // Two cross-sections, one stitch and one end-fringe quad per cap.
    assert_eq!(mesh.vertex_count(), 8);
    assert_eq!(mesh.triangle_count(), 6 + 2 + 2);
}

#[test]
fn test_fringe_is_transparent_and_offset_by_aa() {
    let mesh = mesh(
        &[Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)],
        5.0,
        StrokeStyle::default(),
    );
    let aa = StrokeConfig::default().aa_thickness(5.0);
    assert_eq!(aa, 0.8);

    let fringe: Vec<Vec3> = mesh
        .vertices
        .iter()
        .filter(|v| v.alpha() == 0.0)
        .map(|v| v.position())
        .collect();
    assert_eq!(fringe.len(), 4);
    for p in fringe {
        assert!((p.y.abs() - (2.0 + aa)).abs() < 1e-5);
        assert!(p.x < 0.0 || p.x > 100.0, "butt fringe extends past the ends");
    }
}

#[test]
fn test_square_cap_extends_core() {
    let mesh = mesh(
        &[Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)],
        5.0,
        StrokeStyle::default().with_cap(CapStyle::Square),
    );
    let xs: Vec<f32> = mesh
        .vertices
        .iter()
        .filter(|v| v.alpha() == 1.0)
        .map(|v| v.position().x)
        .collect();
    assert_eq!(xs.iter().copied().fold(f32::MAX, f32::min), -2.0);
    assert_eq!(xs.iter().copied().fold(f32::MIN, f32::max), 102.0);
}

#[test]
fn test_round_cap_fan() {
    let config = StrokeConfig::default();
    let blades = config.cap_fan_blades();
    assert_eq!(blades, 18);

    let mesh = mesh(
        &[Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0)],
        5.0,
        StrokeStyle::default().with_cap(CapStyle::Round),
    );

    // Per cap: the section, a pivot and a core/fringe pair per inner ring point.
    let per_cap = 4 + 1 + 2 * (blades - 1);
    assert_eq!(mesh.vertex_count(), 2 * per_cap);
    // Per cap: one fan triangle and one fringe quad per blade.
    assert_eq!(mesh.triangle_count(), 2 * 3 * blades + 6);

    // Ring vertices stay at the core radius around each end point.
    for v in mesh.vertices.iter().filter(|v| v.alpha() == 1.0) {
        let p = v.position();
        let r = p
            .truncate()
            .length()
            .min(p.truncate().distance(Vec2::new(100.0, 0.0)));
        assert!(r < 1e-4 || (r - 2.0).abs() < 1e-4, "core vertex {p:?} off the cap");
    }
}

#[test]
fn test_thin_stroke_collapses_to_hairline() {
    let mesh = mesh(
        &[Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0)],
        0.5,
        StrokeStyle::default(),
    );
    for v in mesh.vertices.iter().filter(|v| v.alpha() == 1.0) {
        assert_eq!(v.position().y, 0.0);
    }
    assert_eq!(core_triangles(&mesh), 2);
}

// ====================
// Joins
// ====================

#[test]
fn test_fallback_table() {
    let config = StrokeConfig::default();
    let cases = [
        (45.0, JoinStyle::Miter, JoinStyle::Miter),
        (134.0, JoinStyle::Miter, JoinStyle::Miter),
        (136.0, JoinStyle::Miter, JoinStyle::Bevel),
        (179.0, JoinStyle::Miter, JoinStyle::Bevel),
        (0.0, JoinStyle::Bevel, JoinStyle::Miter),
        (9.0, JoinStyle::Bevel, JoinStyle::Miter),
        (11.0, JoinStyle::Bevel, JoinStyle::Bevel),
        (0.0, JoinStyle::Round, JoinStyle::Miter),
        (9.0, JoinStyle::Round, JoinStyle::Miter),
        (11.0, JoinStyle::Round, JoinStyle::Round),
        (150.0, JoinStyle::Round, JoinStyle::Round),
    ];

    for (degrees, requested, expected) in cases {
        for sign in [1.0, -1.0] {
            let [a, b, c] = corner_path(sign * degrees);
            let corner = Corner::new(a.truncate(), b.truncate(), c.truncate());
            assert_eq!(
                resolve_join(requested, &corner, &config),
                expected,
                "{} join turning {}°",
                requested.as_str(),
                sign * degrees
            );
        }
    }
}

#[test]
fn test_fallback_produces_the_fallback_geometry() {
    let sharp = corner_path(150.0);
    assert_eq!(
        mesh(&sharp, 6.0, StrokeStyle::default().with_join(JoinStyle::Miter)),
        mesh(&sharp, 6.0, StrokeStyle::default().with_join(JoinStyle::Bevel)),
    );

    let shallow = corner_path(5.0);
    assert_eq!(
        mesh(&shallow, 6.0, StrokeStyle::default().with_join(JoinStyle::Round)),
        mesh(&shallow, 6.0, StrokeStyle::default().with_join(JoinStyle::Miter)),
    );
}

#[test]
fn test_round_join_fan_blades() {
    let config = StrokeConfig::default();
    let style = StrokeStyle::default();

    for (degrees, blades) in [(15.0, 1), (45.0, 4), (95.0, 9), (-95.0, 9), (170.0, 17)] {
        let path = corner_path(degrees);
        let corner = Corner::new(path[0].truncate(), path[1].truncate(), path[2].truncate());
        let k = config.join_fan_blades(corner.angle);
        assert_eq!(k, blades, "blades turning {degrees}°");

        let round = mesh(&path, 6.0, style.with_join(JoinStyle::Round));
        let bevel = mesh(&path, 6.0, style.with_join(JoinStyle::Bevel));

        // Bevel and round share everything except the corner fill: one
        // triangle and a fringe quad against k blades, each an opaque
        // triangle on the inner pivot closed by a fringe quad.
        let fill = round.triangle_count() - (bevel.triangle_count() - 3);
        assert_eq!(fill, 3 * k, "round join turning {degrees}°");
        assert_eq!(
            core_triangles(&round) - core_triangles(&bevel),
            k - 1,
            "opaque blades turning {degrees}°"
        );

        // A single blade is a bevel.
        if k == 1 {
            assert_eq!(round, bevel);
        }
    }
}

#[test]
fn test_miter_join_single_section() {
    let path = corner_path(90.0);
    let mesh = mesh(&path, 5.0, StrokeStyle::default());
    // Start cap, one miter section, end section.
    assert_eq!(mesh.vertex_count(), 12);
    assert_eq!(mesh.triangle_count(), 2 + 6 + 6 + 2);

    // The outer miter tip lies on the bisector at w·√2.
    let tip = mesh.vertices[5].position().truncate();
    assert!((tip.length() - 2.0 * 2f32.sqrt()).abs() < 1e-4);
}

#[test]
fn test_reversal_stays_finite() {
    let path = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(50.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 0.0),
    ];
    for join in JoinStyle::ALL {
        let mesh = mesh(&path, 6.0, StrokeStyle::default().with_join(join));
        assert!(!mesh.is_empty());
        assert!(mesh.vertices.iter().all(|v| v.position().is_finite()));
    }
}

// ====================
// Loops
// ====================

#[test]
fn test_connect_square_loop_counts() {
    let square = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(10.0, 0.0, 0.0),
        Vec3::new(10.0, 10.0, 0.0),
        Vec3::new(0.0, 10.0, 0.0),
    ];
    let mesh = mesh(
        &square,
        5.0,
        StrokeStyle::new(JoinStyle::Miter, CapStyle::Connect),
    );

    // Placeholder start, three interior miters and the closing miter; no cap geometry.
    assert_eq!(mesh.vertex_count(), 5 * 4);
    assert_eq!(mesh.triangle_count(), 4 * 6);
}

// ====================
// Factories
// ====================

#[test]
fn test_segment_matches_explicit_path() {
    let registry = StrokeRegistry::new();
    let start = Vec3::new(3.5, -2.0, 0.25);
    let end = Vec3::new(42.0, 17.0, 0.25);
    let thickness = Gradient::linear(2.0, 9.0);
    let color = Gradient::linear(Color::RED, Color::BLUE);
    let style = StrokeStyle::new(JoinStyle::Round, CapStyle::Round);

    let segment =
        Polyline::segment(&registry, start, end, thickness.clone(), color.clone(), style).unwrap();
    let explicit = Polyline::from_path(&registry, vec![start, end], thickness, color, style).unwrap();

    let a = segment.mesh();
    let b = explicit.mesh();
    assert_eq!(
        bytemuck::cast_slice::<_, u8>(a.vertices.as_slice()),
        bytemuck::cast_slice::<_, u8>(b.vertices.as_slice())
    );
    assert_eq!(a.indices, b.indices);
}

#[test]
fn test_color_gradient_follows_point_index() {
    // Uneven spacing: the middle point still samples t = 0.5.
    let path = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(1.0, 0.0, 0.0),
        Vec3::new(100.0, 0.0, 0.0),
    ];
    let mesh = path_meshing(
        &path,
        &Gradient::constant(4.0),
        &Gradient::linear(Color::BLACK, Color::WHITE),
        StrokeStyle::default(),
        &StrokeConfig::default(),
    )
    .unwrap();

    let middle = mesh.vertices[4];
    assert_eq!(middle.color, [0.5, 0.5, 0.5, 1.0]);
}
