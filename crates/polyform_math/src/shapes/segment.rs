use glam::Vec2;

use super::{
    clamp_to_zero, Circle, Line, Polygon, Polyline, Quad, Ray, Rect, Segments, Triangle,
    PARALLEL_EPSILON,
};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoint, CollisionPoints,
};

/// A finite line segment between two points.
///
/// The normal is derived from the displacement `end - start` at
/// construction: the right-hand perpendicular by default, the left-hand one
/// when `flipped_normal` is set.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    /// The first endpoint.
    pub start: Vec2,
    /// The second endpoint.
    pub end: Vec2,
    /// The unit normal, perpendicular to the segment direction.
    pub normal: Vec2,
}

impl Segment {
    /// Creates a segment from its endpoints, deriving the normal from the
    /// displacement.
    #[inline]
    pub fn new(start: Vec2, end: Vec2, flipped_normal: bool) -> Self {
        Self {
            start,
            end,
            normal: Self::get_normal(end - start, flipped_normal),
        }
    }

    /// Creates a segment with an explicit, already-derived normal.
    #[inline]
    pub(crate) const fn with_normal(start: Vec2, end: Vec2, normal: Vec2) -> Self {
        Self { start, end, normal }
    }

    /// The unit normal for a segment running along `direction`.
    #[inline]
    pub fn get_normal(direction: Vec2, flipped_normal: bool) -> Vec2 {
        let perp = direction.normalize_or_zero().perp();
        if flipped_normal {
            -perp
        } else {
            perp
        }
    }

    /// The displacement `end - start`. Unlike a direction this is not
    /// normalized.
    #[inline]
    pub fn displacement(&self) -> Vec2 {
        self.end - self.start
    }

    /// The normalized direction from `start` to `end`, or zero for a
    /// degenerate segment.
    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.displacement().normalize_or_zero()
    }

    /// The midpoint of the segment.
    #[inline]
    pub fn center(&self) -> Vec2 {
        (self.start + self.end) / 2.0
    }

    /// The length of the segment.
    #[inline]
    pub fn length(&self) -> f32 {
        self.displacement().length()
    }

    /// The squared length of the segment.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.displacement().length_squared()
    }

    /// Whether the segment has distinct endpoints and a usable normal.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.displacement() != Vec2::ZERO && self.normal != Vec2::ZERO
    }

    /// Whether the normal is the left-hand perpendicular of the direction.
    pub fn is_normal_flipped(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        let direction = self.direction();
        (self.normal.x - direction.y).abs() < 1e-7 && (self.normal.y + direction.x).abs() < 1e-7
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

    /// The infinite line through this segment.
    #[inline]
    pub fn to_line(&self) -> Line {
        Line::with_normal(self.start, self.direction(), self.normal)
    }

    /// The ray starting at `start` along the segment, or the reversed ray
    /// starting at `end`.
    #[inline]
    pub fn to_ray(&self, reversed: bool) -> Ray {
        if reversed {
            Ray::with_normal(self.end, -self.direction(), -self.normal)
        } else {
            Ray::with_normal(self.start, self.direction(), self.normal)
        }
    }

    /// The axis-aligned bounding box of the segment.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.start, self.end)
    }

    /// Returns a copy with a new start point, re-deriving the normal and
    /// preserving whether it was flipped.
    #[must_use]
    pub fn set_start(self, start: Vec2) -> Self {
        let flipped = self.is_normal_flipped();
        Self::new(start, self.end, flipped)
    }

    /// Returns a copy with a new end point, re-deriving the normal and
    /// preserving whether it was flipped.
    #[must_use]
    pub fn set_end(self, end: Vec2) -> Self {
        let flipped = self.is_normal_flipped();
        Self::new(self.start, end, flipped)
    }

    /// Returns a copy translated by `amount`.
    #[inline]
    #[must_use]
    pub fn change_position(self, amount: Vec2) -> Self {
        Self {
            start: self.start + amount,
            end: self.end + amount,
            normal: self.normal,
        }
    }
}

// Point containment and closest-point building blocks. The polygonal shape
// modules all decompose into these.
impl Segment {
    /// Whether `point` lies within the segment's bounding extent.
    ///
    /// Callers pass points that were already computed to lie on the
    /// carrier line; the extent check then bounds them to the segment. The
    /// comparisons are exact, so points a rounding error outside a
    /// degenerate (axis-aligned) extent are rejected — see
    /// [`Line::intersect_line_segment`] for the ray-based path that avoids
    /// re-deriving the point.
    pub fn is_point_on_segment(point: Vec2, start: Vec2, end: Vec2) -> bool {
        let min_x = start.x.min(end.x);
        let max_x = start.x.max(end.x);
        let min_y = start.y.min(end.y);
        let max_y = start.y.max(end.y);
        point.x >= min_x && point.x <= max_x && point.y >= min_y && point.y <= max_y
    }

    /// The closest point on the segment `[start, end]` to `point`, with the
    /// squared distance between them.
    pub fn closest_point_segment_point(start: Vec2, end: Vec2, point: Vec2) -> (Vec2, f32) {
        let displacement = end - start;
        let length_squared = displacement.length_squared();
        let t = if length_squared > 0.0 {
            ((point - start).dot(displacement) / length_squared).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let closest = start + displacement * t;
        let distance_squared = clamp_to_zero(closest.distance_squared(point));
        (closest, distance_squared)
    }

    /// The closest pair of points between two segments, with the squared
    /// distance between them.
    pub fn closest_point_segment_segment(
        start1: Vec2,
        end1: Vec2,
        start2: Vec2,
        end2: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let d1 = end1 - start1;
        let d2 = end2 - start2;
        let r = start1 - start2;
        let a = d1.length_squared();
        let e = d2.length_squared();
        let f = d2.dot(r);

        let (mut s, t);
        if a <= f32::EPSILON && e <= f32::EPSILON {
            // Both segments degenerate to points.
            s = 0.0;
            t = 0.0;
        } else if a <= f32::EPSILON {
            s = 0.0;
            t = (f / e).clamp(0.0, 1.0);
        } else {
            let c = d1.dot(r);
            if e <= f32::EPSILON {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else {
                let b = d1.dot(d2);
                let denominator = a * e - b * b;
                s = if denominator.abs() > PARALLEL_EPSILON {
                    ((b * f - c * e) / denominator).clamp(0.0, 1.0)
                } else {
                    0.0
                };
                let t_unclamped = (b * s + f) / e;
                if t_unclamped < 0.0 {
                    t = 0.0;
                    s = (-c / a).clamp(0.0, 1.0);
                } else if t_unclamped > 1.0 {
                    t = 1.0;
                    s = ((b - c) / a).clamp(0.0, 1.0);
                } else {
                    t = t_unclamped;
                }
            }
        }

        let closest1 = start1 + d1 * s;
        let closest2 = start2 + d2 * t;
        let distance_squared = clamp_to_zero(closest1.distance_squared(closest2));
        (closest1, closest2, distance_squared)
    }

    /// The closest pair of points between a segment and an infinite line.
    ///
    /// The perpendicular offset of each endpoint from the line is linear
    /// along the segment, so the minimum sits at a sign change (the segment
    /// crosses the line, distance zero) or at an endpoint.
    pub fn closest_point_segment_line(
        segment_start: Vec2,
        segment_end: Vec2,
        line_point: Vec2,
        line_direction: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let direction = line_direction.normalize_or_zero();
        let offset_start = direction.perp_dot(segment_start - line_point);
        let offset_end = direction.perp_dot(segment_end - line_point);

        if offset_start * offset_end < 0.0 {
            // The segment crosses the line.
            let t = offset_start / (offset_start - offset_end);
            let intersection = segment_start + (segment_end - segment_start) * t;
            return (intersection, intersection, 0.0);
        }

        // On a tie the start endpoint wins.
        let closest_on_segment = if offset_start.abs() <= offset_end.abs() {
            segment_start
        } else {
            segment_end
        };
        let projection =
            line_point + direction * (closest_on_segment - line_point).dot(direction);
        let distance_squared = clamp_to_zero(closest_on_segment.distance_squared(projection));
        (closest_on_segment, projection, distance_squared)
    }

    /// The closest pair of points between a segment and a ray.
    pub fn closest_point_segment_ray(
        segment_start: Vec2,
        segment_end: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let intersection =
            Ray::intersect_ray_segment(ray_point, ray_direction, segment_start, segment_end);
        if intersection.valid {
            return (intersection.point, intersection.point, 0.0);
        }

        // No crossing: the minimum involves the ray origin or a segment
        // endpoint. First match wins on ties.
        let (on_segment, mut min_distance_squared) =
            Self::closest_point_segment_point(segment_start, segment_end, ray_point);
        let mut best = (on_segment, ray_point);

        let (on_ray, distance_squared) =
            Ray::closest_point_ray_point(ray_point, ray_direction, segment_start);
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            best = (segment_start, on_ray);
        }

        let (on_ray, distance_squared) =
            Ray::closest_point_ray_point(ray_point, ray_direction, segment_end);
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            best = (segment_end, on_ray);
        }

        (best.0, best.1, clamp_to_zero(min_distance_squared))
    }

    /// The closest pair of points between a segment and a circle boundary.
    pub fn closest_point_segment_circle(
        segment_start: Vec2,
        segment_end: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> (Vec2, Vec2, f32) {
        let (on_segment, _) =
            Self::closest_point_segment_point(segment_start, segment_end, circle_center);
        let offset = (on_segment - circle_center).normalize_or_zero();
        let on_circle = circle_center + offset * circle_radius;
        let distance_squared = clamp_to_zero(on_segment.distance_squared(on_circle));
        (on_segment, on_circle, distance_squared)
    }
}

// Intersection building blocks.
impl Segment {
    /// Intersects two segments. The reported normal is the perpendicular of
    /// the *second* segment's direction.
    pub fn intersect_segment_segment(
        start1: Vec2,
        end1: Vec2,
        start2: Vec2,
        end2: Vec2,
    ) -> CollisionPoint {
        let d1 = end1 - start1;
        let d2 = end2 - start2;
        let denominator = d1.perp_dot(d2);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = start2 - start1;
        let t = difference.perp_dot(d2) / denominator;
        let u = difference.perp_dot(d1) / denominator;
        if (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u) {
            let intersection = start1 + d1 * t;
            let normal = d2.normalize_or_zero().perp();
            return CollisionPoint::new(intersection, normal);
        }

        CollisionPoint::INVALID
    }

    /// Intersects two segments, reporting `segment2_normal` instead of the
    /// derived perpendicular.
    pub fn intersect_segment_segment_with_normal(
        start1: Vec2,
        end1: Vec2,
        start2: Vec2,
        end2: Vec2,
        segment2_normal: Vec2,
    ) -> CollisionPoint {
        let result = Self::intersect_segment_segment(start1, end1, start2, end2);
        if result.valid {
            return CollisionPoint::new(result.point, segment2_normal);
        }
        CollisionPoint::INVALID
    }

    /// Intersects a segment with an infinite line. The reported normal is
    /// the perpendicular of the line's direction.
    pub fn intersect_segment_line(
        segment_start: Vec2,
        segment_end: Vec2,
        line_point: Vec2,
        line_direction: Vec2,
    ) -> CollisionPoint {
        let d1 = segment_end - segment_start;
        let denominator = d1.perp_dot(line_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = line_point - segment_start;
        let t = difference.perp_dot(line_direction) / denominator;
        if (0.0..=1.0).contains(&t) {
            let intersection = segment_start + d1 * t;
            let normal = line_direction.normalize_or_zero().perp();
            return CollisionPoint::new(intersection, normal);
        }

        CollisionPoint::INVALID
    }

    /// Intersects a segment with a ray. The reported normal is the
    /// perpendicular of the ray's direction.
    pub fn intersect_segment_ray(
        segment_start: Vec2,
        segment_end: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> CollisionPoint {
        let d1 = segment_end - segment_start;
        let denominator = d1.perp_dot(ray_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = ray_point - segment_start;
        let t = difference.perp_dot(ray_direction) / denominator;
        let u = difference.perp_dot(d1) / denominator;
        if (0.0..=1.0).contains(&t) && u >= 0.0 {
            let intersection = segment_start + d1 * t;
            let normal = ray_direction.normalize_or_zero().perp();
            return CollisionPoint::new(intersection, normal);
        }

        CollisionPoint::INVALID
    }

    /// Intersects a segment with a circle boundary: up to two contacts, one
    /// exact tangent contact, or none.
    pub fn intersect_segment_circle(
        segment_start: Vec2,
        segment_end: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> (CollisionPoint, CollisionPoint) {
        let d = segment_end - segment_start;
        let f = segment_start - circle_center;
        let a = d.length_squared();
        let b = 2.0 * f.dot(d);
        let c = f.length_squared() - circle_radius * circle_radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 || a <= f32::EPSILON {
            return (CollisionPoint::INVALID, CollisionPoint::INVALID);
        }

        let discriminant_sqrt = discriminant.sqrt();
        let t1 = (-b - discriminant_sqrt) / (2.0 * a);
        let t2 = (-b + discriminant_sqrt) / (2.0 * a);

        let mut first = CollisionPoint::INVALID;
        let mut second = CollisionPoint::INVALID;
        if (0.0..=1.0).contains(&t1) {
            let point = segment_start + d * t1;
            first = CollisionPoint::new(point, (point - circle_center).normalize_or_zero());
        }
        // A tangent hit has coincident roots and yields a single contact.
        if discriminant > PARALLEL_EPSILON && (0.0..=1.0).contains(&t2) {
            let point = segment_start + d * t2;
            let contact = CollisionPoint::new(point, (point - circle_center).normalize_or_zero());
            if first.valid {
                second = contact;
            } else {
                first = contact;
            }
        }
        (first, second)
    }
}

// Overlap building blocks.
impl Segment {
    /// Whether two segments cross.
    pub fn overlap_segment_segment(
        start1: Vec2,
        end1: Vec2,
        start2: Vec2,
        end2: Vec2,
    ) -> bool {
        let d1 = end1 - start1;
        let d2 = end2 - start2;
        let denominator = d1.perp_dot(d2);
        if denominator.abs() < PARALLEL_EPSILON {
            return false;
        }
        let difference = start2 - start1;
        let t = difference.perp_dot(d2) / denominator;
        let u = difference.perp_dot(d1) / denominator;
        (0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)
    }

    /// Whether a segment crosses an infinite line.
    pub fn overlap_segment_line(
        segment_start: Vec2,
        segment_end: Vec2,
        line_point: Vec2,
        line_direction: Vec2,
    ) -> bool {
        let d1 = segment_end - segment_start;
        let denominator = d1.perp_dot(line_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return false;
        }
        let difference = line_point - segment_start;
        let t = difference.perp_dot(line_direction) / denominator;
        (0.0..=1.0).contains(&t)
    }

    /// Whether a segment crosses a ray.
    pub fn overlap_segment_ray(
        segment_start: Vec2,
        segment_end: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> bool {
        let d1 = segment_end - segment_start;
        let denominator = d1.perp_dot(ray_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return false;
        }
        let difference = ray_point - segment_start;
        let t = difference.perp_dot(ray_direction) / denominator;
        let u = difference.perp_dot(d1) / denominator;
        (0.0..=1.0).contains(&t) && u >= 0.0
    }

    /// Whether a segment touches or crosses a circle.
    pub fn overlap_segment_circle(
        segment_start: Vec2,
        segment_end: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> bool {
        let (_, distance_squared) =
            Self::closest_point_segment_point(segment_start, segment_end, circle_center);
        let distance = distance_squared.sqrt();
        distance < circle_radius || (distance - circle_radius).abs() < PARALLEL_EPSILON
    }
}

// The closest-point family.
impl Segment {
    /// The closest point on this segment to `point`, with the squared
    /// distance. The reported normal faces the query point.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        let (closest, distance_squared) =
            Self::closest_point_segment_point(self.start, self.end, point);
        let toward = (point - closest).normalize_or_zero();
        let normal = if toward.dot(self.normal) >= 0.0 {
            self.normal
        } else {
            -self.normal
        };
        (CollisionPoint::new(closest, normal), distance_squared)
    }

    /// The closest pair of points between this segment and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) =
            Self::closest_point_segment_line(self.start, self.end, other.point, other.direction);
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this segment and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) =
            Self::closest_point_segment_ray(self.start, self.end, other.point, other.direction);
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this segment and another.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) =
            Self::closest_point_segment_segment(self.start, self.end, other.start, other.end);
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this segment and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) =
            Self::closest_point_segment_circle(self.start, self.end, other.center, other.radius);
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, (other_point - other.center).normalize_or_zero()),
            distance_squared,
        )
    }

    /// The closest pair of points between this segment and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        self.closest_point_edges(&[(other.a, other.b), (other.b, other.c), (other.c, other.a)])
    }

    /// The closest pair of points between this segment and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a, other.b),
            (other.b, other.c),
            (other.c, other.d),
            (other.d, other.a),
        ])
    }

    /// The closest pair of points between this segment and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a(), other.b()),
            (other.b(), other.c()),
            (other.c(), other.d()),
            (other.d(), other.a()),
        ])
    }

    /// The closest pair of points between this segment and a polygon.
    ///
    /// A polygon with fewer than 3 vertices yields the invalid default
    /// result.
    pub fn closest_point_polygon(&self, other: &Polygon) -> ClosestPointResult {
        if other.count() < 3 {
            return ClosestPointResult::default();
        }
        let edges: Vec<(Vec2, Vec2)> = (0..other.count())
            .map(|i| (other[i], other[(i + 1) % other.count()]))
            .collect();
        self.closest_point_edges(&edges)
    }

    /// The closest pair of points between this segment and a polyline.
    ///
    /// A polyline with fewer than 2 vertices yields the invalid default
    /// result.
    pub fn closest_point_polyline(&self, other: &Polyline) -> ClosestPointResult {
        if other.count() < 2 {
            return ClosestPointResult::default();
        }
        let edges: Vec<(Vec2, Vec2)> = (0..other.count() - 1)
            .map(|i| (other[i], other[i + 1]))
            .collect();
        self.closest_point_edges(&edges)
    }

    /// The closest pair of points between this segment and a collection of
    /// segments.
    pub fn closest_point_segments(&self, others: &Segments) -> ClosestPointResult {
        if others.is_empty() {
            return ClosestPointResult::default();
        }
        let mut closest = self.closest_point_segment(&others[0]);
        let mut other_index = 0;
        for i in 1..others.count() {
            let result = self.closest_point_segment(&others[i]);
            if result.is_closer(&closest) {
                other_index = i;
                closest = result;
            }
        }
        closest.with_other_segment_index(other_index as i32)
    }

    /// Edge scan shared by the polygonal closest-point queries: keeps the
    /// first-found minimum and reports the winning edge's right-hand
    /// perpendicular as the other normal.
    fn closest_point_edges(&self, edges: &[(Vec2, Vec2)]) -> ClosestPointResult {
        let (first_start, first_end) = edges[0];
        let (mut self_point, mut other_point, mut min_distance_squared) =
            Self::closest_point_segment_segment(self.start, self.end, first_start, first_end);
        let mut other_normal = first_end - first_start;
        let mut other_index = 0;

        for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
            let (candidate_self, candidate_other, distance_squared) =
                Self::closest_point_segment_segment(self.start, self.end, edge_start, edge_end);
            if distance_squared < min_distance_squared {
                min_distance_squared = distance_squared;
                self_point = candidate_self;
                other_point = candidate_other;
                other_normal = edge_end - edge_start;
                other_index = i;
            }
        }

        ClosestPointResult::with_indices(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other_normal.perp().normalize_or_zero()),
            min_distance_squared,
            -1,
            other_index as i32,
        )
    }
}

// The intersection family.
impl Segment {
    /// Intersects this segment with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let result =
            Self::intersect_segment_line(self.start, self.end, other.point, other.direction);
        if result.valid {
            let mut points = CollisionPoints::new();
            points.add(CollisionPoint::new(result.point, other.normal));
            return Some(points);
        }
        None
    }

    /// Intersects this segment with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let result =
            Self::intersect_segment_ray(self.start, self.end, other.point, other.direction);
        if result.valid {
            let mut points = CollisionPoints::new();
            points.add(CollisionPoint::new(result.point, other.normal));
            return Some(points);
        }
        None
    }

    /// Intersects this segment with another.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let result = Self::intersect_segment_segment_with_normal(
            self.start,
            self.end,
            other.start,
            other.end,
            other.normal,
        );
        if result.valid {
            let mut points = CollisionPoints::new();
            points.add(result);
            return Some(points);
        }
        None
    }

    /// Intersects this segment with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let (first, second) =
            Self::intersect_segment_circle(self.start, self.end, other.center, other.radius);
        collect_pair(first, second)
    }

    /// Intersects this segment with a triangle.
    pub fn intersect_triangle(&self, other: &Triangle) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_triangle_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this segment with a quad.
    pub fn intersect_quad(&self, other: &Quad) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_quad_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this segment with a rect.
    pub fn intersect_rect(&self, other: &Rect) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_rect_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this segment with a polygon, optionally capped to
    /// `max_points` contacts. The cap is checked after each append.
    pub fn intersect_polygon(
        &self,
        other: &Polygon,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if other.count() < 3 || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for i in 0..other.count() {
            let contact = Self::intersect_segment_segment(
                self.start,
                self.end,
                other[i],
                other[(i + 1) % other.count()],
            );
            if contact.valid {
                let points = result.get_or_insert_with(CollisionPoints::new);
                points.add(contact);
                if max_points.is_some_and(|max| points.count() >= max) {
                    return result;
                }
            }
        }
        result
    }

    /// Intersects this segment with a polyline, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polyline(
        &self,
        other: &Polyline,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if other.count() < 3 || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for i in 0..other.count() - 1 {
            let contact =
                Self::intersect_segment_segment(self.start, self.end, other[i], other[i + 1]);
            if contact.valid {
                let points = result.get_or_insert_with(CollisionPoints::new);
                points.add(contact);
                if max_points.is_some_and(|max| points.count() >= max) {
                    return result;
                }
            }
        }
        result
    }

    /// Intersects this segment with a collection of segments, optionally
    /// capped to `max_points` contacts.
    pub fn intersect_segments(
        &self,
        others: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if others.is_empty() || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for other in others.iter() {
            let contact =
                Self::intersect_segment_segment(self.start, self.end, other.start, other.end);
            if contact.valid {
                let points = result.get_or_insert_with(CollisionPoints::new);
                points.add(contact);
                if max_points.is_some_and(|max| points.count() >= max) {
                    return result;
                }
            }
        }
        result
    }
}

// Accumulator overloads appending into a caller-owned buffer.
impl Segment {
    /// Appends the line intersection, if any, into `points`.
    pub fn intersect_line_into(&self, other: &Line, points: &mut CollisionPoints) -> usize {
        let contact =
            Self::intersect_segment_line(self.start, self.end, other.point, other.direction);
        if contact.valid {
            points.add(CollisionPoint::new(contact.point, other.normal));
            return 1;
        }
        0
    }

    /// Appends the ray intersection, if any, into `points`.
    pub fn intersect_ray_into(&self, other: &Ray, points: &mut CollisionPoints) -> usize {
        let contact =
            Self::intersect_segment_ray(self.start, self.end, other.point, other.direction);
        if contact.valid {
            points.add(CollisionPoint::new(contact.point, other.normal));
            return 1;
        }
        0
    }

    /// Appends the segment intersection, if any, into `points`.
    pub fn intersect_segment_into(&self, other: &Segment, points: &mut CollisionPoints) -> usize {
        let contact =
            Self::intersect_segment_segment(self.start, self.end, other.start, other.end);
        if contact.valid {
            points.add(contact);
            return 1;
        }
        0
    }

    /// Appends circle intersections into `points`.
    pub fn intersect_circle_into(
        &self,
        other: &Circle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let (first, second) =
            Self::intersect_segment_circle(self.start, self.end, other.center, other.radius);
        append_pair(first, second, points, return_after_first)
    }

    /// Appends triangle intersections into `points`.
    pub fn intersect_triangle_into(
        &self,
        other: &Triangle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_closed_edges_into(
            &[(other.a, other.b), (other.b, other.c), (other.c, other.a)],
            points,
            return_after_first,
        )
    }

    /// Appends quad intersections into `points`.
    pub fn intersect_quad_into(
        &self,
        other: &Quad,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_closed_edges_into(
            &[
                (other.a, other.b),
                (other.b, other.c),
                (other.c, other.d),
                (other.d, other.a),
            ],
            points,
            return_after_first,
        )
    }

    /// Appends rect intersections into `points`.
    pub fn intersect_rect_into(
        &self,
        other: &Rect,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_closed_edges_into(
            &[
                (other.a(), other.b()),
                (other.b(), other.c()),
                (other.c(), other.d()),
                (other.d(), other.a()),
            ],
            points,
            return_after_first,
        )
    }

    /// Appends polygon intersections into `points`.
    pub fn intersect_polygon_into(
        &self,
        other: &Polygon,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if other.count() < 3 {
            return 0;
        }
        let mut count = 0;
        for i in 0..other.count() {
            let contact = Self::intersect_segment_segment(
                self.start,
                self.end,
                other[i],
                other[(i + 1) % other.count()],
            );
            if contact.valid {
                points.add(contact);
                if return_after_first {
                    return 1;
                }
                count += 1;
            }
        }
        count
    }

    /// Appends polyline intersections into `points`.
    pub fn intersect_polyline_into(
        &self,
        other: &Polyline,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if other.count() < 2 {
            return 0;
        }
        let mut count = 0;
        for i in 0..other.count() - 1 {
            let contact =
                Self::intersect_segment_segment(self.start, self.end, other[i], other[i + 1]);
            if contact.valid {
                points.add(contact);
                if return_after_first {
                    return 1;
                }
                count += 1;
            }
        }
        count
    }

    /// Appends intersections with a collection of segments into `points`.
    pub fn intersect_segments_into(
        &self,
        others: &Segments,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if others.is_empty() {
            return 0;
        }
        let mut count = 0;
        for other in others.iter() {
            let contact =
                Self::intersect_segment_segment(self.start, self.end, other.start, other.end);
            if contact.valid {
                points.add(contact);
                if return_after_first {
                    return 1;
                }
                count += 1;
            }
        }
        count
    }

    /// A segment can cross a closed convex boundary at most twice, so the
    /// scan stops once two contacts are found.
    fn intersect_closed_edges_into(
        &self,
        edges: &[(Vec2, Vec2)],
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let mut count = 0;
        for &(edge_start, edge_end) in edges {
            let contact =
                Self::intersect_segment_segment(self.start, self.end, edge_start, edge_end);
            if contact.valid {
                points.add(contact);
                if return_after_first {
                    return 1;
                }
                count += 1;
                if count >= 2 {
                    return count;
                }
            }
        }
        count
    }
}

// The overlap family.
impl Segment {
    /// Whether `point` lies on this segment.
    pub fn overlap_point(&self, point: Vec2) -> bool {
        if !Line::is_point_on_line(point, self.start, self.displacement()) {
            return false;
        }
        Self::is_point_on_segment(point, self.start, self.end)
    }

    /// Whether this segment crosses a line.
    pub fn overlap_line(&self, other: &Line) -> bool {
        Self::overlap_segment_line(self.start, self.end, other.point, other.direction)
    }

    /// Whether this segment crosses a ray.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        Self::overlap_segment_ray(self.start, self.end, other.point, other.direction)
    }

    /// Whether this segment crosses another.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        Self::overlap_segment_segment(self.start, self.end, other.start, other.end)
    }

    /// Whether this segment touches or crosses a circle.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        Self::overlap_segment_circle(self.start, self.end, other.center, other.radius)
    }

    /// Whether this segment overlaps a triangle, including full
    /// containment of the segment.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        if Triangle::contains_triangle_point(other.a, other.b, other.c, self.start) {
            return true;
        }
        self.overlap_edges(&[(other.a, other.b), (other.b, other.c), (other.c, other.a)])
    }

    /// Whether this segment overlaps a quad, including full containment of
    /// the segment.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        if Quad::contains_quad_point(other.a, other.b, other.c, other.d, self.start) {
            return true;
        }
        self.overlap_edges(&[
            (other.a, other.b),
            (other.b, other.c),
            (other.c, other.d),
            (other.d, other.a),
        ])
    }

    /// Whether this segment overlaps a rect, including full containment of
    /// the segment.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        if other.contains_point(self.start) {
            return true;
        }
        self.overlap_edges(&[
            (other.a(), other.b()),
            (other.b(), other.c()),
            (other.c(), other.d()),
            (other.d(), other.a()),
        ])
    }

    /// Whether this segment overlaps a polygon, including full containment
    /// of the segment.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        if other.count() < 3 {
            return false;
        }
        if Polygon::contains_polygon_point(other.points(), self.start) {
            return true;
        }
        for i in 0..other.count() {
            if Self::overlap_segment_segment(
                self.start,
                self.end,
                other[i],
                other[(i + 1) % other.count()],
            ) {
                return true;
            }
        }
        false
    }

    /// Whether this segment crosses a polyline.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        if other.count() < 3 {
            return false;
        }
        for i in 0..other.count() - 1 {
            if Self::overlap_segment_segment(self.start, self.end, other[i], other[i + 1]) {
                return true;
            }
        }
        false
    }

    /// Whether this segment crosses any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        others.iter().any(|other| {
            Self::overlap_segment_segment(self.start, self.end, other.start, other.end)
        })
    }

    fn overlap_edges(&self, edges: &[(Vec2, Vec2)]) -> bool {
        edges.iter().any(|&(edge_start, edge_end)| {
            Self::overlap_segment_segment(self.start, self.end, edge_start, edge_end)
        })
    }
}

// Collider dispatch.
impl Segment {
    /// Intersects this segment with whatever shape `collider` holds.
    /// Disabled colliders yield `None`.
    pub fn intersect(&self, collider: &Collider) -> Option<CollisionPoints> {
        if !collider.enabled {
            return None;
        }
        match collider.shape() {
            ColliderShape::Circle(circle) => self.intersect_circle(circle),
            ColliderShape::Ray(ray) => self.intersect_ray(ray),
            ColliderShape::Line(line) => self.intersect_line(line),
            ColliderShape::Segment(segment) => self.intersect_segment(segment),
            ColliderShape::Triangle(triangle) => self.intersect_triangle(triangle),
            ColliderShape::Rect(rect) => self.intersect_rect(rect),
            ColliderShape::Quad(quad) => self.intersect_quad(quad),
            ColliderShape::Polygon(polygon) => self.intersect_polygon(polygon, None),
            ColliderShape::Polyline(polyline) => self.intersect_polyline(polyline, None),
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
        match collider.shape() {
            ColliderShape::Circle(circle) => {
                self.intersect_circle_into(circle, points, return_after_first)
            }
            ColliderShape::Ray(ray) => self.intersect_ray_into(ray, points),
            ColliderShape::Line(line) => self.intersect_line_into(line, points),
            ColliderShape::Segment(segment) => self.intersect_segment_into(segment, points),
            ColliderShape::Triangle(triangle) => {
                self.intersect_triangle_into(triangle, points, return_after_first)
            }
            ColliderShape::Rect(rect) => self.intersect_rect_into(rect, points, return_after_first),
            ColliderShape::Quad(quad) => self.intersect_quad_into(quad, points, return_after_first),
            ColliderShape::Polygon(polygon) => {
                self.intersect_polygon_into(polygon, points, return_after_first)
            }
            ColliderShape::Polyline(polyline) => {
                self.intersect_polyline_into(polyline, points, return_after_first)
            }
        }
    }

    /// Whether this segment overlaps whatever shape `collider` holds.
    /// Disabled colliders never overlap.
    pub fn overlap(&self, collider: &Collider) -> bool {
        if !collider.enabled {
            return false;
        }
        match collider.shape() {
            ColliderShape::Circle(circle) => self.overlap_circle(circle),
            ColliderShape::Ray(ray) => self.overlap_ray(ray),
            ColliderShape::Line(line) => self.overlap_line(line),
            ColliderShape::Segment(segment) => self.overlap_segment(segment),
            ColliderShape::Triangle(triangle) => self.overlap_triangle(triangle),
            ColliderShape::Rect(rect) => self.overlap_rect(rect),
            ColliderShape::Quad(quad) => self.overlap_quad(quad),
            ColliderShape::Polygon(polygon) => self.overlap_polygon(polygon),
            ColliderShape::Polyline(polyline) => self.overlap_polyline(polyline),
        }
    }

    /// The closest pair of points between this segment and whatever shape
    /// `collider` holds. Disabled colliders yield `None`.
    pub fn closest_point_collider(&self, collider: &Collider) -> Option<ClosestPointResult> {
        if !collider.enabled {
            return None;
        }
        Some(match collider.shape() {
            ColliderShape::Circle(circle) => self.closest_point_circle(circle),
            ColliderShape::Ray(ray) => self.closest_point_ray(ray),
            ColliderShape::Line(line) => self.closest_point_line(line),
            ColliderShape::Segment(segment) => self.closest_point_segment(segment),
            ColliderShape::Triangle(triangle) => self.closest_point_triangle(triangle),
            ColliderShape::Rect(rect) => self.closest_point_rect(rect),
            ColliderShape::Quad(quad) => self.closest_point_quad(quad),
            ColliderShape::Polygon(polygon) => self.closest_point_polygon(polygon),
            ColliderShape::Polyline(polyline) => self.closest_point_polyline(polyline),
        })
    }
}

/// Collects an intersection pair into a collection, or `None` when both
/// contacts are invalid.
pub(crate) fn collect_pair(
    first: CollisionPoint,
    second: CollisionPoint,
) -> Option<CollisionPoints> {
    if !first.valid && !second.valid {
        return None;
    }
    let mut points = CollisionPoints::new();
    if first.valid {
        points.add(first);
    }
    if second.valid {
        points.add(second);
    }
    Some(points)
}

/// Appends an intersection pair into a caller-owned buffer, honoring the
/// return-after-first fast path, and returns the number appended.
pub(crate) fn append_pair(
    first: CollisionPoint,
    second: CollisionPoint,
    points: &mut CollisionPoints,
    return_after_first: bool,
) -> usize {
    if first.valid && second.valid {
        if return_after_first {
            points.add(first);
            return 1;
        }
        points.add(first);
        points.add(second);
        return 2;
    }
    if first.valid {
        points.add(first);
        return 1;
    }
    if second.valid {
        points.add(second);
        return 1;
    }
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_is_perpendicular() {
        let segment = Segment::new(Vec2::ZERO, Vec2::new(4.0, 0.0), false);
        assert_relative_eq!(segment.normal.dot(segment.direction()), 0.0);
        assert!(!segment.is_normal_flipped());
        assert!(segment.flip_normal().is_normal_flipped());
    }

    #[test]
    fn degenerate_segment_is_invalid() {
        let segment = Segment::new(Vec2::ONE, Vec2::ONE, false);
        assert!(!segment.is_valid());
        assert_eq!(segment.normal, Vec2::ZERO);
    }

    #[test]
    fn closest_point_to_point_clamps_to_endpoints() {
        let start = Vec2::new(0.0, 0.0);
        let end = Vec2::new(2.0, 0.0);

        let (closest, distance_squared) =
            Segment::closest_point_segment_point(start, end, Vec2::new(1.0, 3.0));
        assert_eq!(closest, Vec2::new(1.0, 0.0));
        assert_relative_eq!(distance_squared, 9.0);

        let (closest, distance_squared) =
            Segment::closest_point_segment_point(start, end, Vec2::new(-2.0, 0.0));
        assert_eq!(closest, start);
        assert_relative_eq!(distance_squared, 4.0);
    }

    #[test]
    fn crossing_segments_intersect() {
        let contact = Segment::intersect_segment_segment(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, -1.0),
            Vec2::new(0.0, 1.0),
        );
        assert!(contact.valid);
        assert_relative_eq!(contact.point.x, 0.0);
        assert_relative_eq!(contact.point.y, 0.0);
        // The normal comes from the second segment's direction.
        assert_relative_eq!(contact.normal.x, -1.0);
        assert_relative_eq!(contact.normal.y, 0.0);
    }

    #[test]
    fn disjoint_segments_do_not_intersect() {
        let contact = Segment::intersect_segment_segment(
            Vec2::new(-1.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(0.0, 2.0),
        );
        assert!(!contact.valid);
    }

    #[test]
    fn parallel_segments_never_intersect() {
        let contact = Segment::intersect_segment_segment(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
        );
        assert!(!contact.valid);
    }

    #[test]
    fn segment_circle_secant_and_tangent() {
        // Secant: two contacts.
        let (first, second) = Segment::intersect_segment_circle(
            Vec2::new(-5.0, 0.0),
            Vec2::new(5.0, 0.0),
            Vec2::ZERO,
            1.0,
        );
        assert!(first.valid);
        assert!(second.valid);
        assert_relative_eq!(first.point.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(second.point.x, 1.0, epsilon = 1e-5);

        // Tangent: one contact.
        let (first, second) = Segment::intersect_segment_circle(
            Vec2::new(-5.0, 1.0),
            Vec2::new(5.0, 1.0),
            Vec2::ZERO,
            1.0,
        );
        assert!(first.valid);
        assert!(!second.valid);

        // Miss.
        let (first, second) = Segment::intersect_segment_circle(
            Vec2::new(-5.0, 2.0),
            Vec2::new(5.0, 2.0),
            Vec2::ZERO,
            1.0,
        );
        assert!(!first.valid);
        assert!(!second.valid);
    }

    #[test]
    fn closest_point_crossing_line_is_zero() {
        let segment = Segment::new(Vec2::new(0.0, -1.0), Vec2::new(0.0, 1.0), false);
        let line = Line::new(Vec2::ZERO, Vec2::X, false);
        let result = segment.closest_point_line(&line);
        assert!(result.is_valid());
        assert_eq!(result.distance_squared, 0.0);
        assert_eq!(result.self_point.point, result.other_point.point);
    }

    #[test]
    fn closest_point_parallel_line_keeps_start_on_tie() {
        let segment = Segment::new(Vec2::new(0.0, 1.0), Vec2::new(2.0, 1.0), false);
        let line = Line::new(Vec2::ZERO, Vec2::X, false);
        let result = segment.closest_point_line(&line);
        assert_eq!(result.self_point.point, Vec2::new(0.0, 1.0));
        assert_relative_eq!(result.distance_squared, 1.0);
    }

    #[test]
    fn closest_point_segments_records_winner_index() {
        let segment = Segment::new(Vec2::ZERO, Vec2::new(1.0, 0.0), false);
        let others = Segments::new(vec![
            Segment::new(Vec2::new(0.0, 5.0), Vec2::new(1.0, 5.0), false),
            Segment::new(Vec2::new(0.0, 2.0), Vec2::new(1.0, 2.0), false),
            Segment::new(Vec2::new(0.0, 3.0), Vec2::new(1.0, 3.0), false),
        ]);
        let result = segment.closest_point_segments(&others);
        assert_eq!(result.other_segment_index, 1);
        assert_relative_eq!(result.distance_squared, 4.0);
    }

    #[test]
    fn segment_overlaps_containing_triangle_without_crossing() {
        let segment = Segment::new(Vec2::new(-0.1, 0.2), Vec2::new(0.1, 0.2), false);
        let triangle = Triangle::new(
            Vec2::new(-5.0, 5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(0.0, -5.0),
        );
        assert!(segment.overlap_triangle(&triangle));
        assert!(segment.intersect_triangle(&triangle).is_none());
    }

    #[test]
    fn disabled_collider_short_circuits() {
        let segment = Segment::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), false);
        let mut collider = Collider::new(ColliderShape::Circle(Circle::new(Vec2::ZERO, 0.5)));
        assert!(segment.overlap(&collider));
        assert!(segment.intersect(&collider).is_some());

        collider.enabled = false;
        assert!(!segment.overlap(&collider));
        assert!(segment.intersect(&collider).is_none());
        assert!(segment.closest_point_collider(&collider).is_none());

        let mut points = CollisionPoints::new();
        assert_eq!(segment.intersect_into(&collider, &mut points, false), 0);
        assert!(points.is_empty());
    }
}
