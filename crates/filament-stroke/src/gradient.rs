//! Piecewise-linear gradients sampled along a polyline.
//!
//! A polyline carries one thickness gradient and one color gradient. Both are
//! sampled with the index-fractional parameter `t = i / (N - 1)` of the path
//! point being extruded.

use crate::error::{StrokeError, StrokeResult};
use filament_core::Color;

/// Values a [`Gradient`] can interpolate.
pub trait Interpolate: Copy {
    fn interpolate(self, other: Self, t: f32) -> Self;

    fn is_finite(self) -> bool;
}

impl Interpolate for f32 {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self + (other - self) * t
    }

    fn is_finite(self) -> bool {
        f32::is_finite(self)
    }
}

impl Interpolate for Color {
    fn interpolate(self, other: Self, t: f32) -> Self {
        self.lerp(other, t)
    }

    fn is_finite(self) -> bool {
        Color::is_finite(self)
    }
}

/// A key in a gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientKey<T> {
    /// Position along the polyline (0.0 to 1.0)
    pub t: f32,
    /// Value at this key
    pub value: T,
}

impl<T> GradientKey<T> {
    pub fn new(t: f32, value: T) -> Self {
        Self { t, value }
    }
}

/// An ordered, non-empty set of keys over `[0, 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Gradient<T> {
    keys: Vec<GradientKey<T>>,
}

impl<T: Interpolate> Gradient<T> {
    /// Build a gradient from `(t, value)` pairs in any order.
    ///
    /// Parameters are clamped into `[0, 1]`; keys sharing a parameter keep
    /// their relative order, which yields a hard step at that parameter.
    pub fn new(keys: impl IntoIterator<Item = (f32, T)>) -> StrokeResult<Self> {
        let mut keys = keys
            .into_iter()
            .enumerate()
            .map(|(index, (t, value))| {
                if t.is_finite() && value.is_finite() {
                    Ok(GradientKey::new(t.clamp(0.0, 1.0), value))
                } else {
                    Err(StrokeError::NonFiniteGradientKey { index })
                }
            })
            .collect::<StrokeResult<Vec<_>>>()?;

        if keys.is_empty() {
            return Err(StrokeError::EmptyGradient);
        }

        keys.sort_by(|a, b| a.t.total_cmp(&b.t));
        Ok(Self { keys })
    }

    /// A gradient holding one value everywhere.
    pub fn constant(value: T) -> Self {
        Self {
            keys: vec![GradientKey::new(0.0, value)],
        }
    }

    /// A two-key gradient from `start` at t = 0 to `end` at t = 1.
    pub fn linear(start: T, end: T) -> Self {
        Self {
            keys: vec![GradientKey::new(0.0, start), GradientKey::new(1.0, end)],
        }
    }

    pub fn keys(&self) -> &[GradientKey<T>] {
        &self.keys
    }

    /// Sample the gradient at `t`.
    ///
    /// Before the first key the first value is returned, after the last key
    /// the last value.
    pub fn evaluate(&self, t: f32) -> T {
        let first = &self.keys[0];
        if t <= first.t {
            return first.value;
        }

        let mut prev = first;
        for key in &self.keys[1..] {
            if t <= key.t {
                let range = key.t - prev.t;
                if range < f32::EPSILON {
                    return key.value;
                }
                return prev.value.interpolate(key.value, (t - prev.t) / range);
            }
            prev = key;
        }

        prev.value
    }
}

impl Gradient<f32> {
    /// The largest key value.
    pub fn max(&self) -> f32 {
        self.keys
            .iter()
            .map(|key| key.value)
            .fold(f32::NEG_INFINITY, f32::max)
    }
}

impl From<f32> for Gradient<f32> {
    fn from(value: f32) -> Self {
        Gradient::constant(value)
    }
}

impl From<Color> for Gradient<Color> {
    fn from(value: Color) -> Self {
        Gradient::constant(value)
    }
}
