use glam::Vec2;

/// A single contact: a position on a shape boundary and the surface normal
/// at that position.
///
/// A default-constructed point is *invalid* and acts as the "no
/// intersection" sentinel; any point built with [`CollisionPoint::new`] is
/// valid. Validity is an explicit flag rather than a NaN or zero check so
/// that contacts at the origin remain representable.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionPoint {
    /// The contact position.
    pub point: Vec2,
    /// The surface normal at the contact position.
    pub normal: Vec2,
    /// Whether this record describes an actual contact.
    pub valid: bool,
}

impl CollisionPoint {
    /// The invalid sentinel, equal to the default value.
    pub const INVALID: Self = Self {
        point: Vec2::ZERO,
        normal: Vec2::ZERO,
        valid: false,
    };

    /// Creates a valid contact from a position and a normal.
    #[inline(always)]
    pub const fn new(point: Vec2, normal: Vec2) -> Self {
        Self {
            point,
            normal,
            valid: true,
        }
    }

    /// Returns a copy with the normal reversed.
    #[inline]
    #[must_use]
    pub fn flip_normal(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }

    /// Returns a copy with the normal replaced.
    #[inline]
    #[must_use]
    pub fn with_normal(self, normal: Vec2) -> Self {
        Self { normal, ..self }
    }
}

/// An append-only, ordered sequence of [`CollisionPoint`]s.
///
/// Producers append contacts in discovery order (the order boundary edges
/// are scanned in), and that order is preserved.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct CollisionPoints {
    points: Vec<CollisionPoint>,
}

impl CollisionPoints {
    /// Creates an empty collection.
    #[inline]
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Creates an empty collection with room for `capacity` contacts.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
        }
    }

    /// Appends a single contact.
    #[inline]
    pub fn add(&mut self, point: CollisionPoint) {
        self.points.push(point);
    }

    /// Appends every contact from `points`, preserving their order.
    #[inline]
    pub fn add_range(&mut self, points: impl IntoIterator<Item = CollisionPoint>) {
        self.points.extend(points);
    }

    /// The number of contacts recorded so far.
    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Whether no contact has been recorded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The contact at `index`, if any.
    #[inline]
    pub fn get(&self, index: usize) -> Option<&CollisionPoint> {
        self.points.get(index)
    }

    /// Iterates the contacts in discovery order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, CollisionPoint> {
        self.points.iter()
    }

    /// Removes every contact, keeping the allocation.
    #[inline]
    pub fn clear(&mut self) {
        self.points.clear();
    }
}

impl core::ops::Index<usize> for CollisionPoints {
    type Output = CollisionPoint;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl<'a> IntoIterator for &'a CollisionPoints {
    type Item = &'a CollisionPoint;
    type IntoIter = core::slice::Iter<'a, CollisionPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}

impl FromIterator<CollisionPoint> for CollisionPoints {
    fn from_iter<I: IntoIterator<Item = CollisionPoint>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_point_is_invalid() {
        let point = CollisionPoint::default();
        assert!(!point.valid);
        assert_eq!(point, CollisionPoint::INVALID);

        let valid = CollisionPoint::new(Vec2::ZERO, Vec2::Y);
        assert!(valid.valid);
    }

    #[test]
    fn flip_normal_preserves_point() {
        let point = CollisionPoint::new(Vec2::new(1.0, 2.0), Vec2::Y);
        let flipped = point.flip_normal();
        assert_eq!(flipped.point, point.point);
        assert_eq!(flipped.normal, Vec2::NEG_Y);
        assert!(flipped.valid);
    }

    #[test]
    fn points_preserve_insertion_order() {
        let mut points = CollisionPoints::new();
        points.add(CollisionPoint::new(Vec2::X, Vec2::Y));
        points.add_range([
            CollisionPoint::new(Vec2::Y, Vec2::X),
            CollisionPoint::new(Vec2::ONE, Vec2::NEG_X),
        ]);

        assert_eq!(points.count(), 3);
        assert_eq!(points[0].point, Vec2::X);
        assert_eq!(points[1].point, Vec2::Y);
        assert_eq!(points[2].point, Vec2::ONE);
    }
}
