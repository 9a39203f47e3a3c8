use crate::math::{Scalar, R2};

/// Polyline approximating one field line, ordered along the field direction.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Streamline {
    points: Vec<R2>,
}

impl Streamline {
    /// Wraps an ordered list of points.
    #[must_use]
    pub const fn new(points: Vec<R2>) -> Self {
        Self { points }
    }

    /// Points in field direction.
    #[must_use]
    pub fn points(&self) -> &[R2] {
        &self.points
    }

    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// True if the line has no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// First point (upstream end).
    #[must_use]
    pub fn start(&self) -> Option<R2> {
        self.points.first().copied()
    }

    /// Last point (downstream end).
    #[must_use]
    pub fn end(&self) -> Option<R2> {
        self.points.last().copied()
    }

    /// Arc length of the polyline.
    #[must_use]
    pub fn length(&self) -> Scalar {
        self.points.windows(2).map(|w| (w[1] - w[0]).norm()).sum()
    }

    /// Anchor and unit direction for a direction arrow at half the arc length.
    #[must_use]
    pub fn arrow(&self) -> Option<(R2, R2)> {
        let half = 0.5 * self.length();
        if half <= 0.0 {
            return None;
        }
        let mut walked = 0.0;
        for w in self.points.windows(2) {
            let seg = w[1] - w[0];
            let len = seg.norm();
            if len > 0.0 && walked + len >= half {
                let t = (half - walked) / len;
                return Some((w[0] + seg * t, seg / len));
            }
            walked += len;
        }
        None
    }
}

impl From<Vec<R2>> for Streamline {
    fn from(points: Vec<R2>) -> Self {
        Self::new(points)
    }
}
