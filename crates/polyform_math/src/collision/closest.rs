use super::CollisionPoint;

/// The result of a closest-point query between two shapes: one contact on
/// each shape, the squared distance between them, and — for multi-edge
/// shapes — which edge produced the minimum.
///
/// The default value is invalid (both embedded points invalid, distance
/// sentinel `-1.0`); queries over malformed shapes return it unchanged, so
/// callers must check the embedded [`CollisionPoint::valid`] flags before
/// trusting the distance.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosestPointResult {
    /// The closest point on the queried shape.
    pub self_point: CollisionPoint,
    /// The closest point on the other shape.
    pub other_point: CollisionPoint,
    /// The squared distance between the two points.
    pub distance_squared: f32,
    /// The edge index on the queried shape that produced the minimum, or
    /// `-1` when the queried shape has a single edge.
    pub self_segment_index: i32,
    /// The edge index on the other shape that produced the minimum, or
    /// `-1` when the other shape has a single edge.
    pub other_segment_index: i32,
}

impl Default for ClosestPointResult {
    fn default() -> Self {
        Self {
            self_point: CollisionPoint::INVALID,
            other_point: CollisionPoint::INVALID,
            distance_squared: -1.0,
            self_segment_index: -1,
            other_segment_index: -1,
        }
    }
}

impl ClosestPointResult {
    /// Creates a result without edge bookkeeping.
    #[inline]
    pub const fn new(
        self_point: CollisionPoint,
        other_point: CollisionPoint,
        distance_squared: f32,
    ) -> Self {
        Self {
            self_point,
            other_point,
            distance_squared,
            self_segment_index: -1,
            other_segment_index: -1,
        }
    }

    /// Creates a result recording which edge of the other shape produced
    /// the minimum.
    #[inline]
    pub const fn with_indices(
        self_point: CollisionPoint,
        other_point: CollisionPoint,
        distance_squared: f32,
        self_segment_index: i32,
        other_segment_index: i32,
    ) -> Self {
        Self {
            self_point,
            other_point,
            distance_squared,
            self_segment_index,
            other_segment_index,
        }
    }

    /// Whether both embedded contact points are valid.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.self_point.valid && self.other_point.valid
    }

    /// Returns true iff this result is strictly closer than `other`.
    ///
    /// Invalid results never win; on exact ties the earlier-found result is
    /// kept, so scanning code that replaces only on `is_closer` stays
    /// deterministic.
    #[inline]
    pub fn is_closer(&self, other: &ClosestPointResult) -> bool {
        if !self.is_valid() {
            return false;
        }
        if !other.is_valid() {
            return true;
        }
        self.distance_squared < other.distance_squared
    }

    /// Returns a copy with `other_segment_index` replaced.
    #[inline]
    #[must_use]
    pub fn with_other_segment_index(self, index: i32) -> Self {
        Self {
            other_segment_index: index,
            ..self
        }
    }

    /// Returns a copy with `self_segment_index` replaced.
    #[inline]
    #[must_use]
    pub fn with_self_segment_index(self, index: i32) -> Self {
        Self {
            self_segment_index: index,
            ..self
        }
    }

    /// Returns a copy with the two contact points (and edge indices)
    /// swapped, for delegating to the symmetric query.
    #[inline]
    #[must_use]
    pub fn swapped(self) -> Self {
        Self {
            self_point: self.other_point,
            other_point: self.self_point,
            distance_squared: self.distance_squared,
            self_segment_index: self.other_segment_index,
            other_segment_index: self.self_segment_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn valid_result(distance_squared: f32) -> ClosestPointResult {
        ClosestPointResult::new(
            CollisionPoint::new(Vec2::ZERO, Vec2::Y),
            CollisionPoint::new(Vec2::X, Vec2::NEG_Y),
            distance_squared,
        )
    }

    #[test]
    fn default_is_invalid() {
        let result = ClosestPointResult::default();
        assert!(!result.is_valid());
        assert_eq!(result.distance_squared, -1.0);
        assert_eq!(result.other_segment_index, -1);
    }

    #[test]
    fn is_closer_is_strict() {
        let near = valid_result(1.0);
        let far = valid_result(4.0);
        assert!(near.is_closer(&far));
        assert!(!far.is_closer(&near));

        // Exact tie: the incumbent is kept.
        let tie = valid_result(1.0);
        assert!(!tie.is_closer(&near));
    }

    #[test]
    fn invalid_never_wins() {
        let invalid = ClosestPointResult::default();
        let valid = valid_result(100.0);
        assert!(!invalid.is_closer(&valid));
        assert!(valid.is_closer(&invalid));
    }

    #[test]
    fn with_other_segment_index_copies() {
        let result = valid_result(2.0);
        let indexed = result.with_other_segment_index(3);
        assert_eq!(indexed.other_segment_index, 3);
        assert_eq!(result.other_segment_index, -1);
        assert_eq!(indexed.distance_squared, result.distance_squared);
    }
}
