//! The outcome of a physics-query cast.

use alloc::vec::Vec;
use core::fmt;

use ordered_float::{FloatIsNan, NotNan};

use crate::math::{FreeCoordinate, FreePoint};

/// Identifies an object in the scene which a cast can hit.
///
/// The physics engine and the [`Stage`](crate::stage::Stage) must agree on what
/// each identifier refers to.
#[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct TargetId(pub u32);

impl fmt::Debug for TargetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TargetId({})", self.0)
    }
}

/// One object intersected by a cast.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    distance: NotNan<FreeCoordinate>,
    point: FreePoint,
    target: TargetId,
}

impl Hit {
    /// Constructs a [`Hit`].
    ///
    /// `distance` is how far along the cast direction the cast travelled before
    /// touching the target. Negative distances (which some engines report for casts
    /// which start inside a collider) are clamped to zero; NaN is rejected.
    pub fn new(
        distance: FreeCoordinate,
        point: impl Into<FreePoint>,
        target: TargetId,
    ) -> Result<Self, FloatIsNan> {
        let distance = NotNan::new(distance)?.max(NotNan::from(0i32));
        Ok(Self {
            distance,
            point: point.into(),
            target,
        })
    }

    /// Distance along the cast at which the target was reached. Never negative.
    pub fn distance(&self) -> FreeCoordinate {
        self.distance.into_inner()
    }

    /// Point of contact, in scene coordinates.
    pub fn point(&self) -> FreePoint {
        self.point
    }

    /// The object that was hit.
    pub fn target(&self) -> TargetId {
        self.target
    }
}

/// The normalized outcome of a cast: either nothing was hit, or some objects were.
///
/// For casts which report every hit, the hits are in whatever order the physics engine
/// produced them in. They are *not* necessarily sorted by distance, and the same target
/// may appear more than once.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum QueryResult {
    /// The cast hit nothing.
    #[default]
    Empty,
    /// The cast hit at least one object. The list is never empty.
    Hits(Vec<Hit>),
}

impl QueryResult {
    /// Normalizes the result of a nearest-hit cast.
    pub fn from_nearest(hit: Option<Hit>) -> Self {
        match hit {
            Some(hit) => Self::Hits(vec![hit]),
            None => Self::Empty,
        }
    }

    /// Normalizes the result of an all-hits cast, preserving the order given.
    pub fn from_hits(hits: Vec<Hit>) -> Self {
        if hits.is_empty() {
            Self::Empty
        } else {
            Self::Hits(hits)
        }
    }

    /// Returns all hits, in the order the physics engine reported them.
    pub fn hits(&self) -> &[Hit] {
        match self {
            Self::Empty => &[],
            Self::Hits(hits) => hits,
        }
    }

    /// Returns whether nothing was hit.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Returns the largest hit distance, or [`None`] if nothing was hit.
    ///
    /// This does not assume the hits are sorted.
    pub fn farthest_distance(&self) -> Option<FreeCoordinate> {
        self.hits()
            .iter()
            .map(|hit| hit.distance)
            .max()
            .map(NotNan::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn hit(distance: f64, target: u32) -> Hit {
        Hit::new(distance, [0., 0., distance], TargetId(target)).unwrap()
    }

    #[test]
    fn negative_distance_is_clamped() {
        assert_eq!(hit(-0.5, 1).distance(), 0.0);
    }

    #[test]
    fn nan_distance_is_rejected() {
        assert!(Hit::new(f64::NAN, [0., 0., 0.], TargetId(1)).is_err());
    }

    #[test]
    fn empty_hits_normalize_to_empty() {
        assert_eq!(QueryResult::from_hits(Vec::new()), QueryResult::Empty);
        assert_eq!(QueryResult::from_nearest(None), QueryResult::Empty);
        assert_eq!(QueryResult::Empty.farthest_distance(), None);
        assert!(QueryResult::Empty.hits().is_empty());
    }

    #[test]
    fn farthest_distance_of_unsorted_hits() {
        let result = QueryResult::from_hits(vec![hit(3.0, 1), hit(7.5, 2), hit(1.0, 3)]);
        assert!(!result.is_empty());
        assert_eq!(result.farthest_distance(), Some(7.5));
        // order is preserved
        assert_eq!(
            result.hits().iter().map(Hit::target).collect::<Vec<_>>(),
            vec![TargetId(1), TargetId(2), TargetId(3)]
        );
    }

    #[test]
    fn nearest() {
        let result = QueryResult::from_nearest(Some(hit(2.0, 9)));
        assert_eq!(result.hits().len(), 1);
        assert_eq!(result.farthest_distance(), Some(2.0));
    }
}
