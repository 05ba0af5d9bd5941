use glam::Vec2;

use super::{Circle, Line, Polygon, Polyline, Quad, Ray, Rect, Segment, Triangle};
use crate::collision::{
    ClosestPointResult, Collider, CollisionPoint, CollisionPoints,
};

/// A loosely-ordered collection of independent segments, not necessarily
/// connected to one another.
///
/// Queries scan the members in order; closest-point results record the
/// winning member's index so callers can identify the contact segment.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Segments {
    segments: Vec<Segment>,
}

impl Segments {
    /// Creates a collection from its members.
    #[inline]
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// The number of member segments.
    #[inline]
    pub fn count(&self) -> usize {
        self.segments.len()
    }

    /// Whether the collection has no members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Appends a member segment.
    #[inline]
    pub fn add(&mut self, segment: Segment) {
        self.segments.push(segment);
    }

    /// Iterates the member segments in order.
    #[inline]
    pub fn iter(&self) -> core::slice::Iter<'_, Segment> {
        self.segments.iter()
    }

    /// The members' endpoint pairs, in order.
    pub(crate) fn edge_points(&self) -> Vec<(Vec2, Vec2)> {
        self.segments
            .iter()
            .map(|segment| (segment.start, segment.end))
            .collect()
    }

    /// The bounding box enclosing every member.
    pub fn bounding_box(&self) -> Rect {
        let Some(first) = self.segments.first() else {
            return Rect::default();
        };
        let mut rect = first.bounding_box();
        for segment in &self.segments[1..] {
            rect = rect.union(&segment.bounding_box());
        }
        rect
    }
}

impl core::ops::Index<usize> for Segments {
    type Output = Segment;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.segments[index]
    }
}

impl FromIterator<Segment> for Segments {
    fn from_iter<I: IntoIterator<Item = Segment>>(iter: I) -> Self {
        Self {
            segments: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Segments {
    type Item = &'a Segment;
    type IntoIter = core::slice::Iter<'a, Segment>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

// The closest-point family: scan the members, keep the first-found
// minimum, and record the winner's index on the self side.
impl Segments {
    /// The closest point on any member to `point`, with the squared
    /// distance.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        let Some(first) = self.segments.first() else {
            return (CollisionPoint::INVALID, -1.0);
        };
        let (mut best, mut min_distance_squared) = first.closest_point(point);
        for segment in &self.segments[1..] {
            let (candidate, distance_squared) = segment.closest_point(point);
            if distance_squared < min_distance_squared {
                min_distance_squared = distance_squared;
                best = candidate;
            }
        }
        (best, min_distance_squared)
    }

    fn closest_point_scan(
        &self,
        query: impl Fn(&Segment) -> ClosestPointResult,
    ) -> ClosestPointResult {
        if self.segments.is_empty() {
            return ClosestPointResult::default();
        }
        let mut closest = query(&self.segments[0]);
        let mut self_index = 0;
        for (i, segment) in self.segments.iter().enumerate().skip(1) {
            let result = query(segment);
            if result.is_closer(&closest) {
                self_index = i;
                closest = result;
            }
        }
        closest.with_self_segment_index(self_index as i32)
    }

    /// The closest pair of points between any member and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_line(other))
    }

    /// The closest pair of points between any member and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_ray(other))
    }

    /// The closest pair of points between any member and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_segment(other))
    }

    /// The closest pair of points between any member and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_circle(other))
    }

    /// The closest pair of points between any member and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_triangle(other))
    }

    /// The closest pair of points between any member and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_quad(other))
    }

    /// The closest pair of points between any member and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_rect(other))
    }

    /// The closest pair of points between any member and a polygon.
    pub fn closest_point_polygon(&self, other: &Polygon) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_polygon(other))
    }

    /// The closest pair of points between any member and a polyline.
    pub fn closest_point_polyline(&self, other: &Polyline) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_polyline(other))
    }

    /// The closest pair of points between any member and another
    /// collection.
    pub fn closest_point_segments(&self, others: &Segments) -> ClosestPointResult {
        self.closest_point_scan(|segment| segment.closest_point_segments(others))
    }
}

// The intersection family: every member contributes its contacts in
// member order.
impl Segments {
    fn intersect_scan(
        &self,
        max_points: Option<usize>,
        append: impl Fn(&Segment, &mut CollisionPoints) -> usize,
    ) -> Option<CollisionPoints> {
        if self.segments.is_empty() || max_points == Some(0) {
            return None;
        }
        let mut collected = CollisionPoints::new();
        for segment in &self.segments {
            let mut member_points = CollisionPoints::new();
            append(segment, &mut member_points);
            for contact in member_points.iter() {
                collected.add(*contact);
                if max_points.is_some_and(|max| collected.count() >= max) {
                    return Some(collected);
                }
            }
        }
        if collected.is_empty() {
            None
        } else {
            Some(collected)
        }
    }

    /// Intersects the members with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        self.intersect_scan(None, |segment, points| {
            segment.intersect_line_into(other, points)
        })
    }

    /// Intersects the members with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        self.intersect_scan(None, |segment, points| {
            segment.intersect_ray_into(other, points)
        })
    }

    /// Intersects the members with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        self.intersect_scan(None, |segment, points| {
            segment.intersect_segment_into(other, points)
        })
    }

    /// Intersects the members with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        self.intersect_scan(None, |segment, points| {
            segment.intersect_circle_into(other, points, false)
        })
    }

    /// Intersects the members with a triangle, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_triangle(
        &self,
        other: &Triangle,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        self.intersect_scan(max_points, |segment, points| {
            segment.intersect_triangle_into(other, points, false)
        })
    }

    /// Intersects the members with a quad, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_quad(
        &self,
        other: &Quad,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        self.intersect_scan(max_points, |segment, points| {
            segment.intersect_quad_into(other, points, false)
        })
    }

    /// Intersects the members with a rect, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_rect(
        &self,
        other: &Rect,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        self.intersect_scan(max_points, |segment, points| {
            segment.intersect_rect_into(other, points, false)
        })
    }

    /// Intersects the members with a polygon, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polygon(
        &self,
        other: &Polygon,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        self.intersect_scan(max_points, |segment, points| {
            segment.intersect_polygon_into(other, points, false)
        })
    }

    /// Intersects the members with a polyline, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polyline(
        &self,
        other: &Polyline,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        self.intersect_scan(max_points, |segment, points| {
            segment.intersect_polyline_into(other, points, false)
        })
    }

    /// Intersects the members with another collection, optionally capped
    /// to `max_points` contacts.
    pub fn intersect_segments(
        &self,
        others: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        self.intersect_scan(max_points, |segment, points| {
            segment.intersect_segments_into(others, points, false)
        })
    }
}

// Accumulator overloads.
impl Segments {
    fn intersect_scan_into(
        &self,
        points: &mut CollisionPoints,
        return_after_first: bool,
        append: impl Fn(&Segment, &mut CollisionPoints, bool) -> usize,
    ) -> usize {
        let mut count = 0;
        for segment in &self.segments {
            let appended = append(segment, points, return_after_first);
            if appended > 0 && return_after_first {
                return 1;
            }
            count += appended;
        }
        count
    }

    /// Appends line intersections into `points`.
    pub fn intersect_line_into(
        &self,
        other: &Line,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, _| {
            segment.intersect_line_into(other, points)
        })
    }

    /// Appends ray intersections into `points`.
    pub fn intersect_ray_into(
        &self,
        other: &Ray,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, _| {
            segment.intersect_ray_into(other, points)
        })
    }

    /// Appends segment intersections into `points`.
    pub fn intersect_segment_into(
        &self,
        other: &Segment,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, _| {
            segment.intersect_segment_into(other, points)
        })
    }

    /// Appends circle intersections into `points`.
    pub fn intersect_circle_into(
        &self,
        other: &Circle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, early| {
            segment.intersect_circle_into(other, points, early)
        })
    }

    /// Appends triangle intersections into `points`.
    pub fn intersect_triangle_into(
        &self,
        other: &Triangle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, early| {
            segment.intersect_triangle_into(other, points, early)
        })
    }

    /// Appends quad intersections into `points`.
    pub fn intersect_quad_into(
        &self,
        other: &Quad,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, early| {
            segment.intersect_quad_into(other, points, early)
        })
    }

    /// Appends rect intersections into `points`.
    pub fn intersect_rect_into(
        &self,
        other: &Rect,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, early| {
            segment.intersect_rect_into(other, points, early)
        })
    }

    /// Appends polygon intersections into `points`.
    pub fn intersect_polygon_into(
        &self,
        other: &Polygon,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, early| {
            segment.intersect_polygon_into(other, points, early)
        })
    }

    /// Appends polyline intersections into `points`.
    pub fn intersect_polyline_into(
        &self,
        other: &Polyline,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_scan_into(points, return_after_first, |segment, points, early| {
            segment.intersect_polyline_into(other, points, early)
        })
    }
}

// The overlap family.
impl Segments {
    /// Whether any member crosses the line.
    pub fn overlap_line(&self, other: &Line) -> bool {
        self.segments.iter().any(|segment| segment.overlap_line(other))
    }

    /// Whether any member crosses the ray.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        self.segments.iter().any(|segment| segment.overlap_ray(other))
    }

    /// Whether any member crosses the segment.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.overlap_segment(other))
    }

    /// Whether any member touches the circle.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.overlap_circle(other))
    }

    /// Whether any member overlaps the triangle.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.overlap_triangle(other))
    }

    /// Whether any member overlaps the quad.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        self.segments.iter().any(|segment| segment.overlap_quad(other))
    }

    /// Whether any member overlaps the rect.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        self.segments.iter().any(|segment| segment.overlap_rect(other))
    }

    /// Whether any member overlaps the polygon.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.overlap_polygon(other))
    }

    /// Whether any member crosses the polyline.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.overlap_polyline(other))
    }

    /// Whether any member of this collection crosses any member of
    /// another.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        self.segments
            .iter()
            .any(|segment| segment.overlap_segments(others))
    }
}

// Collider dispatch, by forwarding each member's own dispatch.
impl Segments {
    /// Intersects the members with whatever shape `collider` holds.
    /// Disabled colliders yield `None`.
    pub fn intersect(&self, collider: &Collider) -> Option<CollisionPoints> {
        if !collider.enabled {
            return None;
        }
        let mut collected = CollisionPoints::new();
        for segment in &self.segments {
            segment.intersect_into(collider, &mut collected, false);
        }
        if collected.is_empty() {
            None
        } else {
            Some(collected)
        }
    }

    /// Appends intersections with whatever shape `collider` holds into
    /// `points`. Disabled colliders append nothing.
    pub fn intersect_into(
        &self,
        collider: &Collider,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if !collider.enabled {
            return 0;
        }
        let mut count = 0;
        for segment in &self.segments {
            let appended = segment.intersect_into(collider, points, return_after_first);
            if appended > 0 && return_after_first {
                return 1;
            }
            count += appended;
        }
        count
    }

    /// Whether any member overlaps whatever shape `collider` holds.
    /// Disabled colliders never overlap.
    pub fn overlap(&self, collider: &Collider) -> bool {
        if !collider.enabled {
            return false;
        }
        self.segments.iter().any(|segment| segment.overlap(collider))
    }

    /// The closest pair of points between any member and whatever shape
    /// `collider` holds. Disabled colliders yield `None`.
    pub fn closest_point_collider(&self, collider: &Collider) -> Option<ClosestPointResult> {
        if !collider.enabled || self.segments.is_empty() {
            return None;
        }
        Some(self.closest_point_scan(|segment| {
            segment
                .closest_point_collider(collider)
                .unwrap_or_default()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn rungs() -> Segments {
        // Three horizontal rungs at increasing heights.
        Segments::new(vec![
            Segment::new(Vec2::new(0.0, 1.0), Vec2::new(2.0, 1.0), false),
            Segment::new(Vec2::new(0.0, 3.0), Vec2::new(2.0, 3.0), false),
            Segment::new(Vec2::new(0.0, 6.0), Vec2::new(2.0, 6.0), false),
        ])
    }

    #[test]
    fn closest_point_records_the_winning_member() {
        let circle = Circle::new(Vec2::new(1.0, 3.5), 0.25);
        let result = rungs().closest_point_circle(&circle);
        assert!(result.is_valid());
        assert_eq!(result.self_segment_index, 1);
        assert_relative_eq!(result.distance_squared, 0.0625, epsilon = 1e-5);
    }

    #[test]
    fn vertical_segment_crosses_every_rung() {
        let probe = Segment::new(Vec2::new(1.0, 0.0), Vec2::new(1.0, 10.0), false);
        let points = rungs().intersect_segment(&probe).unwrap();
        assert_eq!(points.count(), 3);
        // Member order is preserved.
        assert_relative_eq!(points[0].point.y, 1.0, epsilon = 1e-5);
        assert_relative_eq!(points[1].point.y, 3.0, epsilon = 1e-5);
        assert_relative_eq!(points[2].point.y, 6.0, epsilon = 1e-5);
    }

    #[test]
    fn empty_collection_yields_nothing() {
        let empty = Segments::default();
        let line = Line::new(Vec2::ZERO, Vec2::X, false);
        assert!(empty.intersect_line(&line).is_none());
        assert!(!empty.overlap_line(&line));
        assert!(!empty.closest_point_line(&line).is_valid());
    }

    #[test]
    fn disabled_collider_short_circuits() {
        let mut collider = crate::collision::Collider::new(
            crate::collision::ColliderShape::Segment(Segment::new(
                Vec2::new(1.0, 0.0),
                Vec2::new(1.0, 10.0),
                false,
            )),
        );
        assert!(rungs().intersect(&collider).is_some());
        collider.enabled = false;
        assert!(rungs().intersect(&collider).is_none());
        assert!(!rungs().overlap(&collider));
    }
}
