//! Polyline instances.
//!
//! A [`Polyline`] is a cheap, clonable handle to one tessellated stroke. The
//! registry it was created in only holds a weak reference; the stroke lives
//! as long as some handle does, and dropping the last handle marks the
//! registry dirty so the next batch leaves it out.

use crate::config::StrokeConfig;
use crate::curve::CubicBezier;
use crate::error::StrokeResult;
use crate::gradient::Gradient;
use crate::registry::{RegistryShared, StrokeRegistry};
use crate::style::StrokeStyle;
use crate::tessellator::path_meshing;
use crate::vertex::StrokeMesh;
use filament_core::Color;
use glam::Vec3;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

/// Identity of a polyline within its registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PolylineId(pub(crate) u64);

impl fmt::Display for PolylineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "polyline#{}", self.0)
    }
}

/// The parts of a polyline that `update` replaces.
struct Appearance {
    thickness: Gradient<f32>,
    color: Gradient<Color>,
    aa_thickness: f32,
    mesh: Rc<StrokeMesh>,
}

impl Appearance {
    fn build(
        path: &[Vec3],
        thickness: Gradient<f32>,
        color: Gradient<Color>,
        style: StrokeStyle,
        config: &StrokeConfig,
    ) -> StrokeResult<Self> {
        let mesh = path_meshing(path, &thickness, &color, style, config)?;
        Ok(Self {
            aa_thickness: config.aa_thickness(thickness.max()),
            thickness,
            color,
            mesh: Rc::new(mesh),
        })
    }
}

pub(crate) struct PolylineInner {
    id: PolylineId,
    path: Vec<Vec3>,
    style: StrokeStyle,
    config: StrokeConfig,
    registry: Weak<RegistryShared>,
    appearance: RefCell<Appearance>,
}

impl PolylineInner {
    pub(crate) fn mesh(&self) -> Rc<StrokeMesh> {
        Rc::clone(&self.appearance.borrow().mesh)
    }

    /// Depth used to order polylines in a batch.
    pub(crate) fn depth(&self) -> Option<f32> {
        self.appearance
            .borrow()
            .mesh
            .vertices
            .first()
            .map(|v| v.position[2])
    }

    pub(crate) fn id(&self) -> PolylineId {
        self.id
    }
}

impl Drop for PolylineInner {
    fn drop(&mut self) {
        tracing::trace!("Dropping {}", self.id);
        if let Some(registry) = self.registry.upgrade() {
            registry.mark_dirty();
        }
    }
}

/// Handle to a tessellated stroke.
///
/// Cloning the handle shares the same stroke; it is removed from batches
/// once every clone is dropped.
#[derive(Clone)]
pub struct Polyline {
    inner: Rc<PolylineInner>,
}

impl Polyline {
    /// Stroke an explicit path.
    pub fn from_path(
        registry: &StrokeRegistry,
        path: impl Into<Vec<Vec3>>,
        thickness: impl Into<Gradient<f32>>,
        color: impl Into<Gradient<Color>>,
        style: StrokeStyle,
    ) -> StrokeResult<Self> {
        let path = path.into();
        let config = *registry.config();
        let appearance = Appearance::build(&path, thickness.into(), color.into(), style, &config)?;

        let shared = registry.shared();
        let id = shared.next_id();
        let inner = Rc::new(PolylineInner {
            id,
            path,
            style,
            config,
            registry: Rc::downgrade(shared),
            appearance: RefCell::new(appearance),
        });
        shared.register(Rc::downgrade(&inner));

        tracing::trace!(
            "Created {} ({} points, {} vertices)",
            id,
            inner.path.len(),
            inner.mesh().vertex_count()
        );
        Ok(Self { inner })
    }

    /// Stroke the straight segment from `start` to `end`.
    pub fn segment(
        registry: &StrokeRegistry,
        start: Vec3,
        end: Vec3,
        thickness: impl Into<Gradient<f32>>,
        color: impl Into<Gradient<Color>>,
        style: StrokeStyle,
    ) -> StrokeResult<Self> {
        Self::from_path(registry, vec![start, end], thickness, color, style)
    }

    /// Stroke a cubic Bezier through its start, subdivided midpoint and end.
    pub fn bezier(
        registry: &StrokeRegistry,
        curve: impl Into<CubicBezier>,
        thickness: impl Into<Gradient<f32>>,
        color: impl Into<Gradient<Color>>,
        style: StrokeStyle,
    ) -> StrokeResult<Self> {
        let points = curve.into().coarse_points();
        Self::from_path(registry, points.to_vec(), thickness, color, style)
    }

    /// Stroke a cubic Bezier flattened to the registry's curve tolerance.
    pub fn bezier_flattened(
        registry: &StrokeRegistry,
        curve: impl Into<CubicBezier>,
        thickness: impl Into<Gradient<f32>>,
        color: impl Into<Gradient<Color>>,
        style: StrokeStyle,
    ) -> StrokeResult<Self> {
        let points = curve.into().flatten(registry.config().curve_tolerance);
        Self::from_path(registry, points, thickness, color, style)
    }

    /// Re-tessellate with new gradients. Path and style are fixed.
    ///
    /// On error the previous geometry is kept.
    pub fn update(
        &self,
        thickness: impl Into<Gradient<f32>>,
        color: impl Into<Gradient<Color>>,
    ) -> StrokeResult<()> {
        let inner = &self.inner;
        let appearance = Appearance::build(
            &inner.path,
            thickness.into(),
            color.into(),
            inner.style,
            &inner.config,
        )?;
        *inner.appearance.borrow_mut() = appearance;

        if let Some(registry) = inner.registry.upgrade() {
            registry.mark_dirty();
        }
        tracing::trace!("Updated {}", inner.id);
        Ok(())
    }

    pub fn id(&self) -> PolylineId {
        self.inner.id
    }

    pub fn path(&self) -> &[Vec3] {
        &self.inner.path
    }

    pub fn style(&self) -> StrokeStyle {
        self.inner.style
    }

    /// Width of the faded fringe around the opaque core.
    pub fn aa_thickness(&self) -> f32 {
        self.inner.appearance.borrow().aa_thickness
    }

    pub fn thickness(&self) -> Gradient<f32> {
        self.inner.appearance.borrow().thickness.clone()
    }

    pub fn color(&self) -> Gradient<Color> {
        self.inner.appearance.borrow().color.clone()
    }

    /// The polyline's own mesh, indices local to it.
    ///
    /// The returned mesh is a snapshot; a later [`update`](Self::update)
    /// swaps in a new one and leaves it untouched.
    pub fn mesh(&self) -> Rc<StrokeMesh> {
        self.inner.mesh()
    }

    pub fn vertex_count(&self) -> usize {
        self.inner.mesh().vertex_count()
    }

    pub fn triangle_count(&self) -> usize {
        self.inner.mesh().triangle_count()
    }

    /// Whether both handles refer to the same stroke.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for Polyline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Polyline")
            .field("id", &self.inner.id)
            .field("points", &self.inner.path.len())
            .field("style", &self.inner.style)
            .field("vertices", &self.vertex_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StrokeError;
    use crate::style::{CapStyle, JoinStyle};

    #[test]
    fn test_clones_share_identity() {
        let registry = StrokeRegistry::new();
        let a = Polyline::segment(
            &registry,
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            3.0,
            Color::RED,
            StrokeStyle::default(),
        )
        .unwrap();
        let b = a.clone();

        assert!(a.ptr_eq(&b));
        assert_eq!(a.id(), b.id());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_ids_are_unique() {
        let registry = StrokeRegistry::new();
        let make = || {
            Polyline::segment(
                &registry,
                Vec3::ZERO,
                Vec3::X,
                2.0,
                Color::WHITE,
                StrokeStyle::default(),
            )
            .unwrap()
        };
        let a = make();
        let b = make();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_update_replaces_geometry() {
        let registry = StrokeRegistry::new();
        let line = Polyline::segment(
            &registry,
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            3.0,
            Color::RED,
            StrokeStyle::default(),
        )
        .unwrap();
        let before = line.mesh().vertices[0];

        line.update(9.0, Color::BLUE).unwrap();
        let after = line.mesh().vertices[0];

        assert_ne!(before.position, after.position);
        assert_eq!(after.color, Color::BLUE.to_array());
        assert_eq!(line.aa_thickness(), 1.125);
    }

    #[test]
    fn test_update_accepts_gradients() {
        let registry = StrokeRegistry::new();
        let line = Polyline::from_path(
            &registry,
            vec![Vec3::ZERO, Vec3::new(10.0, 0.0, 0.0), Vec3::new(20.0, 0.0, 0.0)],
            2.0,
            Color::WHITE,
            StrokeStyle::default(),
        )
        .unwrap();

        let thickness = Gradient::new([(0.0, 3.0), (1.0, 17.0)]).unwrap();
        line.update(thickness.clone(), Gradient::linear(Color::RED, Color::BLUE))
            .unwrap();

        assert_eq!(line.thickness(), thickness);
        assert_eq!(line.aa_thickness(), 1.5);
        // The middle section samples t = 0.5: thickness 10, half width 4.5.
        let mid = line.mesh().vertices[4].position();
        assert!((mid.y.abs() - 4.5).abs() < 1e-5);
    }

    #[test]
    fn test_update_while_mesh_is_held() {
        let registry = StrokeRegistry::new();
        let line = Polyline::segment(
            &registry,
            Vec3::ZERO,
            Vec3::new(10.0, 0.0, 0.0),
            3.0,
            Color::RED,
            StrokeStyle::default(),
        )
        .unwrap();
        let copy = line.clone();
        let held = line.mesh();
        let held_through_copy = copy.mesh();

        line.update(5.0, Color::BLUE).unwrap();

        assert_eq!(held.vertices[0].color, Color::RED.to_array());
        assert_eq!(held_through_copy.vertices[0].color, Color::RED.to_array());
        assert_eq!(copy.mesh().vertices[0].color, Color::BLUE.to_array());
        assert!(!Rc::ptr_eq(&held, &line.mesh()));
    }

    #[test]
    fn test_non_finite_path_is_rejected() {
        let registry = StrokeRegistry::new();
        let result = Polyline::from_path(
            &registry,
            vec![Vec3::ZERO, Vec3::new(f32::INFINITY, 0.0, 0.0)],
            2.0,
            Color::WHITE,
            StrokeStyle::default(),
        );
        assert_eq!(
            result.map(|p| p.id()),
            Err(StrokeError::NonFinitePoint { index: 1 })
        );
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_bezier_uses_three_points() {
        let registry = StrokeRegistry::new();
        let curve = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(25.0, 100.0, 0.0),
            Vec3::new(75.0, 100.0, 0.0),
            Vec3::new(100.0, 0.0, 0.0),
        ];
        let coarse = Polyline::bezier(
            &registry,
            curve,
            4.0,
            Color::WHITE,
            StrokeStyle::new(JoinStyle::Round, CapStyle::Butt),
        )
        .unwrap();
        assert_eq!(coarse.path().len(), 3);
        assert_eq!(coarse.path()[1], Vec3::new(50.0, 75.0, 0.0));

        let fine = Polyline::bezier_flattened(
            &registry,
            curve,
            4.0,
            Color::WHITE,
            StrokeStyle::new(JoinStyle::Round, CapStyle::Butt),
        )
        .unwrap();
        assert!(fine.path().len() > 3);
        assert_eq!(fine.path()[0], curve[0]);
        assert_eq!(fine.path()[fine.path().len() - 1], curve[3]);
    }
}
