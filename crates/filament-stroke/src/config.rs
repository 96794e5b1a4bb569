//! Tessellation constants.

use std::f32::consts::PI;

/// Incidence angle above which a miter would grow without bound (135°).
pub const MAX_MITER_ANGLE: f32 = 0.75 * PI;

/// Incidence angle below which a bevel or round join has no visible face (10°).
pub const MINIMUM_BEVEL_ANGLE: f32 = PI / 18.0;

/// Angle spanned by one fan blade of a round cap or join (10°).
pub const MINIMUM_FAN_ANGLE: f32 = PI / 18.0;

/// Tunables for [`path_meshing`](crate::path_meshing).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeConfig {
    /// Miter joins turn into bevels above this incidence angle (radians).
    pub max_miter_angle: f32,
    /// Bevel and round joins turn into miters below this incidence angle (radians).
    pub min_bevel_angle: f32,
    /// Angle per fan blade for round caps and joins (radians).
    pub min_fan_angle: f32,
    /// The fringe width is the maximum thickness divided by this.
    pub aa_divisor: f32,
    /// Lower clamp for the fringe width.
    pub aa_min: f32,
    /// Upper clamp for the fringe width.
    pub aa_max: f32,
    /// Consecutive points closer than this are treated as one.
    pub min_segment_length: f32,
    /// Flattening tolerance for [`Polyline::bezier_flattened`](crate::Polyline::bezier_flattened).
    pub curve_tolerance: f32,
}

impl Default for StrokeConfig {
    fn default() -> Self {
        Self {
            max_miter_angle: MAX_MITER_ANGLE,
            min_bevel_angle: MINIMUM_BEVEL_ANGLE,
            min_fan_angle: MINIMUM_FAN_ANGLE,
            aa_divisor: 8.0,
            aa_min: 0.8,
            aa_max: 1.5,
            min_segment_length: 1.0e-4,
            curve_tolerance: 0.25,
        }
    }
}

impl StrokeConfig {
    /// Width of the faded fringe for a stroke whose thickest point is `max_thickness`.
    pub fn aa_thickness(&self, max_thickness: f32) -> f32 {
        (max_thickness / self.aa_divisor).clamp(self.aa_min, self.aa_max)
    }

    /// Number of blades in a round cap (half turn).
    pub fn cap_fan_blades(&self) -> usize {
        ((PI / self.min_fan_angle).round() as usize).max(1)
    }

    /// Number of blades in a round join spanning `angle`.
    pub fn join_fan_blades(&self, angle: f32) -> usize {
        ((angle / self.min_fan_angle).floor() as usize).max(1)
    }
}

/// Half width of the opaque core for a stroke `thickness` wide.
///
/// Strokes thinner than one unit collapse to a hairline; only the fringe is
/// visible.
pub fn core_half_thickness(thickness: f32) -> f32 {
    ((thickness - 1.0) * 0.5).max(0.0)
}
