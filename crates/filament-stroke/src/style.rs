//! Join and cap styles for stroked polylines.
//!
//! Styles are closed enums; raw identifiers coming from outer layers
//! (scripting, serialized scenes) are converted with `TryFrom<u32>` or
//! `FromStr`, which is the only place an unsupported style can appear.

use crate::error::StrokeError;
use std::str::FromStr;

/// Geometry emitted at interior path points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum JoinStyle {
    /// Sharp corner at the intersection of the offset edges.
    #[default]
    Miter,
    /// Flat corner cut across the outer side.
    Bevel,
    /// Rounded outer corner made of fan blades.
    Round,
}

impl JoinStyle {
    pub const ALL: [JoinStyle; 3] = [JoinStyle::Miter, JoinStyle::Bevel, JoinStyle::Round];

    pub fn as_str(self) -> &'static str {
        match self {
            JoinStyle::Miter => "miter",
            JoinStyle::Bevel => "bevel",
            JoinStyle::Round => "round",
        }
    }
}

/// Geometry emitted at the first and last path points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CapStyle {
    /// Flat end exactly at the endpoint.
    #[default]
    Butt,
    /// Flat end pushed out by the local half thickness.
    Square,
    /// Semicircular end.
    Round,
    /// No end at all: the path is closed into a loop and the ends are welded.
    Connect,
}

impl CapStyle {
    pub const ALL: [CapStyle; 4] = [
        CapStyle::Butt,
        CapStyle::Square,
        CapStyle::Round,
        CapStyle::Connect,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CapStyle::Butt => "butt",
            CapStyle::Square => "square",
            CapStyle::Round => "round",
            CapStyle::Connect => "connect",
        }
    }
}

impl TryFrom<u32> for JoinStyle {
    type Error = StrokeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(JoinStyle::Miter),
            1 => Ok(JoinStyle::Bevel),
            2 => Ok(JoinStyle::Round),
            other => Err(StrokeError::UnsupportedJoin(other.to_string())),
        }
    }
}

impl TryFrom<u32> for CapStyle {
    type Error = StrokeError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(CapStyle::Butt),
            1 => Ok(CapStyle::Square),
            2 => Ok(CapStyle::Round),
            3 => Ok(CapStyle::Connect),
            other => Err(StrokeError::UnsupportedCap(other.to_string())),
        }
    }
}

impl FromStr for JoinStyle {
    type Err = StrokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        JoinStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StrokeError::UnsupportedJoin(s.to_string()))
    }
}

impl FromStr for CapStyle {
    type Err = StrokeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CapStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| StrokeError::UnsupportedCap(s.to_string()))
    }
}

/// Join and cap pair applied to a whole polyline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct StrokeStyle {
    pub join: JoinStyle,
    pub cap: CapStyle,
}

impl StrokeStyle {
    pub fn new(join: JoinStyle, cap: CapStyle) -> Self {
        Self { join, cap }
    }

    /// Build a style from raw numeric identifiers.
    ///
    /// Fails on any identifier without a strategy; there is no fallback style.
    pub fn from_raw(join: u32, cap: u32) -> Result<Self, StrokeError> {
        Ok(Self {
            join: JoinStyle::try_from(join)?,
            cap: CapStyle::try_from(cap)?,
        })
    }

    /// Set the join style.
    pub fn with_join(mut self, join: JoinStyle) -> Self {
        self.join = join;
        self
    }

    /// Set the cap style.
    pub fn with_cap(mut self, cap: CapStyle) -> Self {
        self.cap = cap;
        self
    }

    /// Whether the cap style closes the path into a loop.
    pub fn is_loop(&self) -> bool {
        self.cap == CapStyle::Connect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_round_trip() {
        for (i, join) in JoinStyle::ALL.into_iter().enumerate() {
            assert_eq!(JoinStyle::try_from(i as u32), Ok(join));
        }
        for (i, cap) in CapStyle::ALL.into_iter().enumerate() {
            assert_eq!(CapStyle::try_from(i as u32), Ok(cap));
        }
    }

    #[test]
    fn test_unknown_raw_values_are_rejected() {
        assert_eq!(
            StrokeStyle::from_raw(7, 0),
            Err(StrokeError::UnsupportedJoin("7".to_string()))
        );
        assert_eq!(
            StrokeStyle::from_raw(0, 4),
            Err(StrokeError::UnsupportedCap("4".to_string()))
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("Bevel".parse::<JoinStyle>(), Ok(JoinStyle::Bevel));
        assert_eq!(" connect ".parse::<CapStyle>(), Ok(CapStyle::Connect));
        assert!("arcs".parse::<JoinStyle>().is_err());
        assert!("butt-ish".parse::<CapStyle>().is_err());
    }

    #[test]
    fn test_default_style() {
        let style = StrokeStyle::default();
        assert_eq!(style.join, JoinStyle::Miter);
        assert_eq!(style.cap, CapStyle::Butt);
        assert!(!style.is_loop());
        assert!(style.with_cap(CapStyle::Connect).is_loop());
    }
}
