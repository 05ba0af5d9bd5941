use glam::Vec2;

use super::segment::{append_pair, collect_pair};
use super::{
    clamp_to_zero, Circle, Polygon, Polyline, Quad, Ray, Rect, Segment, Segments, Triangle,
    PARALLEL_EPSILON,
};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoint, CollisionPoints,
};

/// An infinite line through an anchor point along a direction.
///
/// The direction and normal are stored normalized; constructing from a
/// zero-length direction yields an invalid line. A line has no length, so
/// its bounding box is clamped to [`Line::MAX_LENGTH`] for display and
/// culling purposes only.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Line {
    /// A point the line passes through.
    pub point: Vec2,
    /// The unit direction; the line extends both ways along it.
    pub direction: Vec2,
    /// The unit normal, perpendicular to the direction.
    pub normal: Vec2,
}

impl Line {
    /// The extent used for the bounding box of an infinite line.
    pub const MAX_LENGTH: f32 = 250_000.0;

    /// Creates a line from an anchor point and a direction.
    ///
    /// The normal is the right-hand perpendicular of the direction, or the
    /// left-hand one when `flipped_normal` is set.
    #[inline]
    pub fn new(point: Vec2, direction: Vec2, flipped_normal: bool) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            point,
            direction,
            normal: Self::get_normal(direction, flipped_normal),
        }
    }

    /// Creates a line through the origin along `direction`.
    #[inline]
    pub fn from_direction(direction: Vec2, flipped_normal: bool) -> Self {
        Self::new(Vec2::ZERO, direction, flipped_normal)
    }

    /// Creates a line with an explicit, already-normalized normal.
    #[inline]
    pub(crate) const fn with_normal(point: Vec2, direction: Vec2, normal: Vec2) -> Self {
        Self {
            point,
            direction,
            normal,
        }
    }

    /// The unit normal for a line running along `direction`.
    #[inline]
    pub fn get_normal(direction: Vec2, flipped_normal: bool) -> Vec2 {
        let perp = direction.normalize_or_zero().perp();
        if flipped_normal {
            -perp
        } else {
            perp
        }
    }

    /// Whether the line has a usable direction and normal.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.direction != Vec2::ZERO && self.normal != Vec2::ZERO
    }

    /// Whether the normal is the left-hand perpendicular of the direction.
    pub fn is_normal_flipped(&self) -> bool {
        if !self.is_valid() {
            return false;
        }
        (self.normal.x - self.direction.y).abs() < 1e-7
            && (self.normal.y + self.direction.x).abs() < 1e-7
    }

    /// The segment of the given `length` centered on the anchor point.
    pub fn to_segment(&self, length: f32) -> Segment {
        if !self.is_valid() {
            return Segment::default();
        }
        Segment::with_normal(
            self.point - self.direction * length * 0.5,
            self.point + self.direction * length * 0.5,
            self.normal,
        )
    }

    /// The ray anchored at this line's point, forward or reversed.
    #[inline]
    pub fn to_ray(&self, reversed: bool) -> Ray {
        if reversed {
            Ray::with_normal(self.point, -self.direction, -self.normal)
        } else {
            Ray::with_normal(self.point, self.direction, self.normal)
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

    /// The bounding box of the line clamped to [`Line::MAX_LENGTH`].
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        self.bounding_box_with_length(Self::MAX_LENGTH)
    }

    /// The bounding box of the line clamped to `length`.
    #[inline]
    pub fn bounding_box_with_length(&self, length: f32) -> Rect {
        Rect::from_points(
            self.point - self.direction * length * 0.5,
            self.point + self.direction * length * 0.5,
        )
    }

    /// Returns a copy anchored at `point`.
    #[inline]
    #[must_use]
    pub fn set_point(self, point: Vec2) -> Self {
        Self { point, ..self }
    }

    /// Returns a copy moved by `amount`.
    #[inline]
    #[must_use]
    pub fn change_point(self, amount: Vec2) -> Self {
        Self {
            point: self.point + amount,
            ..self
        }
    }

    /// Returns a copy with a new direction, preserving whether the normal
    /// was flipped.
    #[must_use]
    pub fn set_direction(self, direction: Vec2) -> Self {
        let flipped = self.is_normal_flipped();
        Self::new(self.point, direction, flipped)
    }

    /// Returns a copy with the direction nudged by `amount`, preserving
    /// whether the normal was flipped.
    #[must_use]
    pub fn change_direction(self, amount: Vec2) -> Self {
        let flipped = self.is_normal_flipped();
        Self::new(self.point, self.direction + amount, flipped)
    }

    /// Returns a copy rotated by `angle_rad`, preserving whether the
    /// normal was flipped.
    #[must_use]
    pub fn change_rotation(self, angle_rad: f32) -> Self {
        let flipped = self.is_normal_flipped();
        let direction = Vec2::from_angle(angle_rad).rotate(self.direction);
        Self::new(self.point, direction, flipped)
    }

    /// Returns a copy pointing along `angle_rad`, preserving whether the
    /// normal was flipped.
    #[must_use]
    pub fn set_rotation(self, angle_rad: f32) -> Self {
        let flipped = self.is_normal_flipped();
        Self::new(self.point, Vec2::from_angle(angle_rad), flipped)
    }
}

// Closest-point building blocks.
impl Line {
    /// Whether `point` lies on the line within the parallel tolerance.
    pub fn is_point_on_line(point: Vec2, line_point: Vec2, line_direction: Vec2) -> bool {
        let to_point = point - line_point;
        to_point.perp_dot(line_direction).abs() < PARALLEL_EPSILON
    }

    /// The closest point on the line to `point`, with the squared distance.
    pub fn closest_point_line_point(
        line_point: Vec2,
        line_direction: Vec2,
        point: Vec2,
    ) -> (Vec2, f32) {
        let direction = line_direction.normalize_or_zero();
        let projection_length = (point - line_point).dot(direction);
        let closest = line_point + direction * projection_length;
        let distance_squared = clamp_to_zero(closest.distance_squared(point));
        (closest, distance_squared)
    }

    /// The closest pair of points between two lines.
    ///
    /// Non-parallel lines intersect, so the pair is the intersection point
    /// with distance zero; parallel lines yield the two anchors with the
    /// `-1.0` distance sentinel.
    pub fn closest_point_line_line(
        line1_point: Vec2,
        line1_direction: Vec2,
        line2_point: Vec2,
        line2_direction: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let result =
            Self::intersect_line_line(line1_point, line1_direction, line2_point, line2_direction);
        if result.valid {
            return (result.point, result.point, 0.0);
        }
        (line1_point, line2_point, -1.0)
    }

    /// The closest pair of points between a line and a ray.
    pub fn closest_point_line_ray(
        line_point: Vec2,
        line_direction: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let intersection =
            Self::intersect_line_ray(line_point, line_direction, ray_point, ray_direction);
        if intersection.valid {
            return (intersection.point, intersection.point, 0.0);
        }

        // The crossing lies behind the ray's anchor (or the two are
        // parallel), so the anchor is the closest point on the ray.
        let (closest, distance_squared) =
            Self::closest_point_line_point(line_point, line_direction, ray_point);
        (closest, ray_point, distance_squared)
    }

    /// The closest pair of points between a line and a segment.
    pub fn closest_point_line_segment(
        line_point: Vec2,
        line_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let (on_segment, on_line, distance_squared) = Segment::closest_point_segment_line(
            segment_start,
            segment_end,
            line_point,
            line_direction,
        );
        (on_line, on_segment, distance_squared)
    }

    /// The closest pair of points between a line and a circle boundary.
    ///
    /// The circle point is the radial projection of the line's closest
    /// point, and the distance is re-derived from the two projected points.
    pub fn closest_point_line_circle(
        line_point: Vec2,
        line_direction: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> (Vec2, Vec2, f32) {
        let (on_line, _) = Self::closest_point_line_point(line_point, line_direction, circle_center);
        let on_circle = circle_center + (on_line - circle_center).normalize_or_zero() * circle_radius;
        let distance_squared = clamp_to_zero(on_line.distance_squared(on_circle));
        (on_line, on_circle, distance_squared)
    }
}

// Intersection building blocks.
impl Line {
    /// Intersects an infinite line with a segment. The reported normal is
    /// the perpendicular of the segment's direction.
    ///
    /// The line is split into two opposite rays and the results unioned.
    /// The single parametric test (kept in
    /// [`Line::intersect_line_segment_info`]) re-checks the computed point
    /// against the segment's bounding extent, which rejects valid hits on
    /// axis-aligned rectangle edges; the ray test bounds its parameters
    /// instead and has no such failure mode.
    pub fn intersect_line_segment(
        line_point: Vec2,
        line_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> CollisionPoint {
        let result =
            Ray::intersect_ray_segment(line_point, line_direction, segment_start, segment_end);
        if result.valid {
            return result;
        }
        Ray::intersect_ray_segment(line_point, -line_direction, segment_end, segment_start)
    }

    /// Intersects a line with a segment, reporting `segment_normal`
    /// instead of the derived perpendicular.
    pub fn intersect_line_segment_with_normal(
        line_point: Vec2,
        line_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
        segment_normal: Vec2,
    ) -> CollisionPoint {
        let result =
            Self::intersect_line_segment(line_point, line_direction, segment_start, segment_end);
        if result.valid {
            return CollisionPoint::new(result.point, segment_normal);
        }
        CollisionPoint::INVALID
    }

    /// Intersects a line with a segment, also returning the line parameter
    /// `t` of the hit (`-1.0` when there is none).
    pub fn intersect_line_segment_info(
        line_point: Vec2,
        line_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> (CollisionPoint, f32) {
        let segment_direction = segment_end - segment_start;
        let denominator = line_direction.perp_dot(segment_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return (CollisionPoint::INVALID, -1.0);
        }

        let difference = segment_start - line_point;
        let t = difference.perp_dot(segment_direction) / denominator;
        let intersection = line_point + line_direction * t;

        if Segment::is_point_on_segment(intersection, segment_start, segment_end) {
            let normal = segment_direction.normalize_or_zero().perp();
            return (CollisionPoint::new(intersection, normal), t);
        }

        (CollisionPoint::INVALID, -1.0)
    }

    /// Intersects two infinite lines. The reported normal is the
    /// perpendicular of the second line's direction.
    pub fn intersect_line_line(
        line1_point: Vec2,
        line1_direction: Vec2,
        line2_point: Vec2,
        line2_direction: Vec2,
    ) -> CollisionPoint {
        let denominator = line1_direction.perp_dot(line2_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = line2_point - line1_point;
        let t = difference.perp_dot(line2_direction) / denominator;
        let intersection = line1_point + line1_direction * t;
        let normal = line2_direction.normalize_or_zero().perp();
        CollisionPoint::new(intersection, normal)
    }

    /// Intersects two lines, reporting `line2_normal` instead of the
    /// derived perpendicular.
    pub fn intersect_line_line_with_normal(
        line1_point: Vec2,
        line1_direction: Vec2,
        line2_point: Vec2,
        line2_direction: Vec2,
        line2_normal: Vec2,
    ) -> CollisionPoint {
        let result =
            Self::intersect_line_line(line1_point, line1_direction, line2_point, line2_direction);
        if result.valid {
            return CollisionPoint::new(result.point, line2_normal);
        }
        CollisionPoint::INVALID
    }

    /// Intersects two lines, also returning the first line's parameter `t`
    /// of the hit (`-1.0` when parallel).
    pub fn intersect_line_line_info(
        line1_point: Vec2,
        line1_direction: Vec2,
        line2_point: Vec2,
        line2_direction: Vec2,
    ) -> (CollisionPoint, f32) {
        let denominator = line1_direction.perp_dot(line2_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return (CollisionPoint::INVALID, -1.0);
        }

        let difference = line2_point - line1_point;
        let t = difference.perp_dot(line2_direction) / denominator;
        let intersection = line1_point + line1_direction * t;
        let normal = line2_direction.normalize_or_zero().perp();
        (CollisionPoint::new(intersection, normal), t)
    }

    /// Intersects a line with a ray. The forward gate `u >= 0` keeps hits
    /// on the ray side of its anchor; the reported normal is the
    /// perpendicular of the ray's direction.
    pub fn intersect_line_ray(
        line_point: Vec2,
        line_direction: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> CollisionPoint {
        let denominator = line_direction.perp_dot(ray_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = ray_point - line_point;
        let t = difference.perp_dot(ray_direction) / denominator;
        let u = difference.perp_dot(line_direction) / denominator;
        if u >= 0.0 {
            let intersection = line_point + line_direction * t;
            let normal = ray_direction.normalize_or_zero().perp();
            return CollisionPoint::new(intersection, normal);
        }

        CollisionPoint::INVALID
    }

    /// Intersects a line with a ray, reporting `ray_normal` instead of the
    /// derived perpendicular.
    pub fn intersect_line_ray_with_normal(
        line_point: Vec2,
        line_direction: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
        ray_normal: Vec2,
    ) -> CollisionPoint {
        let result =
            Self::intersect_line_ray(line_point, line_direction, ray_point, ray_direction);
        if result.valid {
            return CollisionPoint::new(result.point, ray_normal);
        }
        CollisionPoint::INVALID
    }

    /// Intersects a line with a ray, also returning the line parameter `t`
    /// of the hit (`-1.0` when there is none).
    pub fn intersect_line_ray_info(
        line_point: Vec2,
        line_direction: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> (CollisionPoint, f32) {
        let denominator = line_direction.perp_dot(ray_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return (CollisionPoint::INVALID, -1.0);
        }

        let difference = ray_point - line_point;
        let t = difference.perp_dot(ray_direction) / denominator;
        let u = difference.perp_dot(line_direction) / denominator;
        if u >= 0.0 {
            let intersection = line_point + line_direction * t;
            let normal = ray_direction.normalize_or_zero().perp();
            return (CollisionPoint::new(intersection, normal), t);
        }

        (CollisionPoint::INVALID, -1.0)
    }

    /// Intersects a line with a circle boundary: two symmetric contacts
    /// when the perpendicular distance is below the radius, one exact
    /// tangent contact, or none.
    pub fn intersect_line_circle(
        line_point: Vec2,
        line_direction: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> (CollisionPoint, CollisionPoint) {
        let direction = line_direction.normalize_or_zero();
        let to_circle = circle_center - line_point;
        let projection_length = to_circle.dot(direction);
        let closest_point = line_point + direction * projection_length;
        let distance_to_center = closest_point.distance(circle_center);

        if distance_to_center < circle_radius {
            let offset =
                (circle_radius * circle_radius - distance_to_center * distance_to_center).sqrt();
            let intersection1 = closest_point - direction * offset;
            let intersection2 = closest_point + direction * offset;

            let normal1 = (intersection1 - circle_center).normalize_or_zero();
            let normal2 = (intersection2 - circle_center).normalize_or_zero();
            return (
                CollisionPoint::new(intersection1, normal1),
                CollisionPoint::new(intersection2, normal2),
            );
        }

        if (distance_to_center - circle_radius).abs() < PARALLEL_EPSILON {
            let contact = CollisionPoint::new(
                closest_point,
                (closest_point - circle_center).normalize_or_zero(),
            );
            return (contact, CollisionPoint::INVALID);
        }

        (CollisionPoint::INVALID, CollisionPoint::INVALID)
    }

    /// Intersects a line with a triangle: up to two contacts, scanning the
    /// edges `a-b`, `b-c`, `c-a` in order.
    pub fn intersect_line_triangle(
        line_point: Vec2,
        line_direction: Vec2,
        a: Vec2,
        b: Vec2,
        c: Vec2,
    ) -> (CollisionPoint, CollisionPoint) {
        let mut first = CollisionPoint::INVALID;
        let mut second = CollisionPoint::INVALID;

        let contact = Self::intersect_line_segment(line_point, line_direction, a, b);
        if contact.valid {
            first = contact;
        }

        let contact = Self::intersect_line_segment(line_point, line_direction, b, c);
        if contact.valid {
            if first.valid {
                second = contact;
            } else {
                first = contact;
            }
        }

        if first.valid && second.valid {
            return (first, second);
        }

        let contact = Self::intersect_line_segment(line_point, line_direction, c, a);
        if contact.valid {
            if first.valid {
                second = contact;
            } else {
                first = contact;
            }
        }

        (first, second)
    }

    /// Intersects a line with a quad: up to two contacts, scanning the
    /// edges `a-b`, `b-c`, `c-d`, `d-a` in order.
    pub fn intersect_line_quad(
        line_point: Vec2,
        line_direction: Vec2,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        d: Vec2,
    ) -> (CollisionPoint, CollisionPoint) {
        let mut first = CollisionPoint::INVALID;
        let mut second = CollisionPoint::INVALID;

        let contact = Self::intersect_line_segment(line_point, line_direction, a, b);
        if contact.valid {
            first = contact;
        }

        let contact = Self::intersect_line_segment(line_point, line_direction, b, c);
        if contact.valid {
            if first.valid {
                second = contact;
            } else {
                first = contact;
            }
        }
        if first.valid && second.valid {
            return (first, second);
        }

        let contact = Self::intersect_line_segment(line_point, line_direction, c, d);
        if contact.valid {
            if first.valid {
                second = contact;
            } else {
                first = contact;
            }
        }
        if first.valid && second.valid {
            return (first, second);
        }

        let contact = Self::intersect_line_segment(line_point, line_direction, d, a);
        if contact.valid {
            if first.valid {
                second = contact;
            } else {
                first = contact;
            }
        }

        (first, second)
    }

    /// Intersects a line with a rect, treated as the quad of its corners.
    pub fn intersect_line_rect(
        line_point: Vec2,
        line_direction: Vec2,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        d: Vec2,
    ) -> (CollisionPoint, CollisionPoint) {
        Self::intersect_line_quad(line_point, line_direction, a, b, c, d)
    }

    /// Intersects a line with a polygon, optionally capped to `max_points`
    /// contacts. The cap is checked after each append.
    pub fn intersect_line_polygon(
        line_point: Vec2,
        line_direction: Vec2,
        points: &[Vec2],
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if points.len() < 3 || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for i in 0..points.len() {
            let contact = Self::intersect_line_segment(
                line_point,
                line_direction,
                points[i],
                points[(i + 1) % points.len()],
            );
            if contact.valid {
                let collected = result.get_or_insert_with(CollisionPoints::new);
                collected.add(contact);
                if max_points.is_some_and(|max| collected.count() >= max) {
                    return result;
                }
            }
        }
        result
    }

    /// Intersects a line with a polyline, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_line_polyline(
        line_point: Vec2,
        line_direction: Vec2,
        points: &[Vec2],
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if points.len() < 3 || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for i in 0..points.len() - 1 {
            let contact = Self::intersect_line_segment(
                line_point,
                line_direction,
                points[i],
                points[i + 1],
            );
            if contact.valid {
                let collected = result.get_or_insert_with(CollisionPoints::new);
                collected.add(contact);
                if max_points.is_some_and(|max| collected.count() >= max) {
                    return result;
                }
            }
        }
        result
    }

    /// Intersects a line with a collection of segments, optionally capped
    /// to `max_points` contacts.
    pub fn intersect_line_segments(
        line_point: Vec2,
        line_direction: Vec2,
        segments: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if segments.is_empty() || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for segment in segments.iter() {
            let contact = Self::intersect_line_segment(
                line_point,
                line_direction,
                segment.start,
                segment.end,
            );
            if contact.valid {
                let collected = result.get_or_insert_with(CollisionPoints::new);
                collected.add(contact);
                if max_points.is_some_and(|max| collected.count() >= max) {
                    return result;
                }
            }
        }
        result
    }
}

// Overlap building blocks.
impl Line {
    /// Whether a line crosses a segment.
    pub fn overlap_line_segment(
        line_point: Vec2,
        line_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> bool {
        let segment_direction = segment_end - segment_start;
        let denominator = line_direction.perp_dot(segment_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return false;
        }

        let difference = segment_start - line_point;
        let t = difference.perp_dot(segment_direction) / denominator;
        let intersection = line_point + line_direction * t;
        Segment::is_point_on_segment(intersection, segment_start, segment_end)
    }

    /// Whether two lines cross (any non-parallel pair does).
    pub fn overlap_line_line(
        _line1_point: Vec2,
        line1_direction: Vec2,
        _line2_point: Vec2,
        line2_direction: Vec2,
    ) -> bool {
        line1_direction.perp_dot(line2_direction).abs() >= PARALLEL_EPSILON
    }

    /// Whether a line crosses a ray.
    pub fn overlap_line_ray(
        line_point: Vec2,
        line_direction: Vec2,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> bool {
        let denominator = line_direction.perp_dot(ray_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return false;
        }
        let difference = ray_point - line_point;
        let u = difference.perp_dot(line_direction) / denominator;
        u >= 0.0
    }

    /// Whether a line touches or crosses a circle.
    pub fn overlap_line_circle(
        line_point: Vec2,
        line_direction: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> bool {
        if Circle::contains_circle_point(circle_center, circle_radius, line_point) {
            return true;
        }

        let direction = line_direction.normalize_or_zero();
        let to_circle = circle_center - line_point;
        let projection_length = to_circle.dot(direction);
        let closest_point = line_point + direction * projection_length;
        let distance_to_center = closest_point.distance(circle_center);

        distance_to_center < circle_radius
            || (distance_to_center - circle_radius).abs() < PARALLEL_EPSILON
    }

    /// Whether a line overlaps a triangle, including an anchor inside it.
    pub fn overlap_line_triangle(
        line_point: Vec2,
        line_direction: Vec2,
        a: Vec2,
        b: Vec2,
        c: Vec2,
    ) -> bool {
        if Triangle::contains_triangle_point(a, b, c, line_point) {
            return true;
        }
        Self::intersect_line_segment(line_point, line_direction, a, b).valid
            || Self::intersect_line_segment(line_point, line_direction, b, c).valid
            || Self::intersect_line_segment(line_point, line_direction, c, a).valid
    }

    /// Whether a line overlaps a quad, including an anchor inside it.
    pub fn overlap_line_quad(
        line_point: Vec2,
        line_direction: Vec2,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        d: Vec2,
    ) -> bool {
        if Quad::contains_quad_point(a, b, c, d, line_point) {
            return true;
        }
        Self::intersect_line_segment(line_point, line_direction, a, b).valid
            || Self::intersect_line_segment(line_point, line_direction, b, c).valid
            || Self::intersect_line_segment(line_point, line_direction, c, d).valid
            || Self::intersect_line_segment(line_point, line_direction, d, a).valid
    }

    /// Whether a line overlaps a rect, treated as the quad of its corners.
    pub fn overlap_line_rect(
        line_point: Vec2,
        line_direction: Vec2,
        a: Vec2,
        b: Vec2,
        c: Vec2,
        d: Vec2,
    ) -> bool {
        Self::overlap_line_quad(line_point, line_direction, a, b, c, d)
    }

    /// Whether a line overlaps a polygon, including an anchor inside it.
    pub fn overlap_line_polygon(line_point: Vec2, line_direction: Vec2, points: &[Vec2]) -> bool {
        if points.len() < 3 {
            return false;
        }
        if Polygon::contains_polygon_point(points, line_point) {
            return true;
        }
        for i in 0..points.len() {
            if Self::intersect_line_segment(
                line_point,
                line_direction,
                points[i],
                points[(i + 1) % points.len()],
            )
            .valid
            {
                return true;
            }
        }
        false
    }

    /// Whether a line crosses a polyline.
    pub fn overlap_line_polyline(line_point: Vec2, line_direction: Vec2, points: &[Vec2]) -> bool {
        if points.len() < 3 {
            return false;
        }
        for i in 0..points.len() - 1 {
            if Self::intersect_line_segment(line_point, line_direction, points[i], points[i + 1])
                .valid
            {
                return true;
            }
        }
        false
    }

    /// Whether a line crosses any segment of a collection.
    pub fn overlap_line_segments(
        line_point: Vec2,
        line_direction: Vec2,
        segments: &Segments,
    ) -> bool {
        segments.iter().any(|segment| {
            Self::intersect_line_segment(line_point, line_direction, segment.start, segment.end)
                .valid
        })
    }
}

// The closest-point family.
impl Line {
    /// The closest point on this line to `point`, with the squared
    /// distance. The reported normal faces the query point.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        let (closest, distance_squared) =
            Self::closest_point_line_point(self.point, self.direction, point);
        let toward = (point - closest).normalize_or_zero();
        let normal = if toward.dot(self.normal) >= 0.0 {
            self.normal
        } else {
            -self.normal
        };
        (CollisionPoint::new(closest, normal), distance_squared)
    }

    /// The closest pair of points between this line and another.
    ///
    /// Parallel lines yield the invalid default result.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        let result =
            Self::intersect_line_line(self.point, self.direction, other.point, other.direction);
        if result.valid {
            return ClosestPointResult::new(
                CollisionPoint::new(result.point, self.normal),
                CollisionPoint::new(result.point, other.normal),
                0.0,
            );
        }
        ClosestPointResult::default()
    }

    /// The closest pair of points between this line and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) =
            Self::closest_point_line_ray(self.point, self.direction, other.point, other.direction);
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this line and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        let (on_segment, on_line, distance_squared) = Segment::closest_point_segment_line(
            other.start,
            other.end,
            self.point,
            self.direction,
        );
        ClosestPointResult::new(
            CollisionPoint::new(on_line, self.normal),
            CollisionPoint::new(on_segment, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this line and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) = Self::closest_point_line_circle(
            self.point,
            self.direction,
            other.center,
            other.radius,
        );
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, (other_point - other.center).normalize_or_zero()),
            distance_squared,
        )
    }

    /// The closest pair of points between this line and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        self.closest_point_edges(&[(other.a, other.b), (other.b, other.c), (other.c, other.a)])
    }

    /// The closest pair of points between this line and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a, other.b),
            (other.b, other.c),
            (other.c, other.d),
            (other.d, other.a),
        ])
    }

    /// The closest pair of points between this line and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a(), other.b()),
            (other.b(), other.c()),
            (other.c(), other.d()),
            (other.d(), other.a()),
        ])
    }

    /// The closest pair of points between this line and a polygon.
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

    /// The closest pair of points between this line and a polyline.
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

    /// The closest pair of points between this line and a collection of
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
            Self::closest_point_line_segment(self.point, self.direction, first_start, first_end);
        let mut other_normal = first_end - first_start;
        let mut other_index = 0;

        for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
            let (candidate_self, candidate_other, distance_squared) =
                Self::closest_point_line_segment(self.point, self.direction, edge_start, edge_end);
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
impl Line {
    /// Intersects this line with another.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let result = Self::intersect_line_line_with_normal(
            self.point,
            self.direction,
            other.point,
            other.direction,
            other.normal,
        );
        if result.valid {
            let mut points = CollisionPoints::new();
            points.add(result);
            return Some(points);
        }
        None
    }

    /// Intersects this line with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let result = Self::intersect_line_ray_with_normal(
            self.point,
            self.direction,
            other.point,
            other.direction,
            other.normal,
        );
        if result.valid {
            let mut points = CollisionPoints::new();
            points.add(result);
            return Some(points);
        }
        None
    }

    /// Intersects this line with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let result = Self::intersect_line_segment_with_normal(
            self.point,
            self.direction,
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

    /// Intersects this line with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let (first, second) =
            Self::intersect_line_circle(self.point, self.direction, other.center, other.radius);
        collect_pair(first, second)
    }

    /// Intersects this line with a triangle.
    pub fn intersect_triangle(&self, other: &Triangle) -> Option<CollisionPoints> {
        let (first, second) =
            Self::intersect_line_triangle(self.point, self.direction, other.a, other.b, other.c);
        collect_pair(first, second)
    }

    /// Intersects this line with a quad.
    pub fn intersect_quad(&self, other: &Quad) -> Option<CollisionPoints> {
        let (first, second) = Self::intersect_line_quad(
            self.point,
            self.direction,
            other.a,
            other.b,
            other.c,
            other.d,
        );
        collect_pair(first, second)
    }

    /// Intersects this line with a rect.
    pub fn intersect_rect(&self, other: &Rect) -> Option<CollisionPoints> {
        let (first, second) = Self::intersect_line_quad(
            self.point,
            self.direction,
            other.a(),
            other.b(),
            other.c(),
            other.d(),
        );
        collect_pair(first, second)
    }

    /// Intersects this line with a polygon, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polygon(
        &self,
        other: &Polygon,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        Self::intersect_line_polygon(self.point, self.direction, other.points(), max_points)
    }

    /// Intersects this line with a polyline, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polyline(
        &self,
        other: &Polyline,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        Self::intersect_line_polyline(self.point, self.direction, other.points(), max_points)
    }

    /// Intersects this line with a collection of segments, optionally
    /// capped to `max_points` contacts.
    pub fn intersect_segments(
        &self,
        others: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        Self::intersect_line_segments(self.point, self.direction, others, max_points)
    }
}

// Accumulator overloads.
impl Line {
    /// Appends the line intersection, if any, into `points`.
    pub fn intersect_line_into(&self, other: &Line, points: &mut CollisionPoints) -> usize {
        let contact = Self::intersect_line_line_with_normal(
            self.point,
            self.direction,
            other.point,
            other.direction,
            other.normal,
        );
        if contact.valid {
            points.add(contact);
            return 1;
        }
        0
    }

    /// Appends the ray intersection, if any, into `points`.
    pub fn intersect_ray_into(&self, other: &Ray, points: &mut CollisionPoints) -> usize {
        let contact = Self::intersect_line_ray_with_normal(
            self.point,
            self.direction,
            other.point,
            other.direction,
            other.normal,
        );
        if contact.valid {
            points.add(contact);
            return 1;
        }
        0
    }

    /// Appends the segment intersection, if any, into `points`.
    pub fn intersect_segment_into(&self, other: &Segment, points: &mut CollisionPoints) -> usize {
        let contact =
            Self::intersect_line_segment(self.point, self.direction, other.start, other.end);
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
            Self::intersect_line_circle(self.point, self.direction, other.center, other.radius);
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
            let contact = Self::intersect_line_segment(
                self.point,
                self.direction,
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
                Self::intersect_line_segment(self.point, self.direction, other[i], other[i + 1]);
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
                Self::intersect_line_segment(self.point, self.direction, other.start, other.end);
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

    /// A line can cross a closed convex boundary at most twice, so the
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
                Self::intersect_line_segment(self.point, self.direction, edge_start, edge_end);
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
impl Line {
    /// Whether `point` lies on this line.
    pub fn overlap_point(&self, point: Vec2) -> bool {
        Self::is_point_on_line(point, self.point, self.direction)
    }

    /// Whether this line crosses another.
    pub fn overlap_line(&self, other: &Line) -> bool {
        Self::overlap_line_line(self.point, self.direction, other.point, other.direction)
    }

    /// Whether this line crosses a ray.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        Self::overlap_line_ray(self.point, self.direction, other.point, other.direction)
    }

    /// Whether this line crosses a segment.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        Self::overlap_line_segment(self.point, self.direction, other.start, other.end)
    }

    /// Whether this line touches or crosses a circle.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        Self::overlap_line_circle(self.point, self.direction, other.center, other.radius)
    }

    /// Whether this line overlaps a triangle, including an anchor inside
    /// it.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        Self::overlap_line_triangle(self.point, self.direction, other.a, other.b, other.c)
    }

    /// Whether this line overlaps a quad, including an anchor inside it.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        Self::overlap_line_quad(
            self.point,
            self.direction,
            other.a,
            other.b,
            other.c,
            other.d,
        )
    }

    /// Whether this line overlaps a rect, including an anchor inside it.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        Self::overlap_line_quad(
            self.point,
            self.direction,
            other.a(),
            other.b(),
            other.c(),
            other.d(),
        )
    }

    /// Whether this line overlaps a polygon, including an anchor inside
    /// it.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        Self::overlap_line_polygon(self.point, self.direction, other.points())
    }

    /// Whether this line crosses a polyline.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        Self::overlap_line_polyline(self.point, self.direction, other.points())
    }

    /// Whether this line crosses any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        Self::overlap_line_segments(self.point, self.direction, others)
    }
}

// Collider dispatch.
impl Line {
    /// Intersects this line with whatever shape `collider` holds. Disabled
    /// colliders yield `None`.
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

    /// Whether this line overlaps whatever shape `collider` holds.
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

    /// The closest pair of points between this line and whatever shape
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

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_flag_round_trips() {
        let line = Line::new(Vec2::new(1.0, 2.0), Vec2::new(3.0, 0.5), false);
        assert!(!line.is_normal_flipped());
        assert!(line.flip_normal().is_normal_flipped());
        assert_eq!(line.flip_normal().flip_normal().normal, line.normal);

        let flipped = Line::new(Vec2::ZERO, Vec2::X, true);
        assert!(flipped.is_normal_flipped());
        assert_relative_eq!(flipped.normal.dot(flipped.direction), 0.0, epsilon = 1e-7);
    }

    #[test]
    fn zero_direction_is_invalid() {
        let line = Line::new(Vec2::ONE, Vec2::ZERO, false);
        assert!(!line.is_valid());
        assert_eq!(line.direction, Vec2::ZERO);
        assert_eq!(line.normal, Vec2::ZERO);
    }

    #[test]
    fn parallel_lines_never_intersect() {
        let contact = Line::intersect_line_line(
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 5.0),
            Vec2::new(1.0, 1.0),
        );
        assert!(!contact.valid);
    }

    #[test]
    fn crossing_lines_report_the_other_normal() {
        let contact = Line::intersect_line_line(Vec2::ZERO, Vec2::X, Vec2::new(2.0, 0.0), Vec2::Y);
        assert!(contact.valid);
        assert_relative_eq!(contact.point.x, 2.0);
        assert_relative_eq!(contact.point.y, 0.0);
        // The perpendicular of the second line's direction.
        assert_relative_eq!(contact.normal.x, -1.0);
        assert_relative_eq!(contact.normal.y, 0.0);
    }

    #[test]
    fn line_through_origin_hits_rect_twice() {
        let line = Line::new(Vec2::ZERO, Vec2::X, false);
        let rect = Rect::from_points(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        let points = line.intersect_rect(&rect).unwrap();
        assert_eq!(points.count(), 2);

        let mut xs: Vec<f32> = points.iter().map(|p| p.point.x).collect();
        xs.sort_by(|a, b| a.partial_cmp(b).unwrap());
        assert_relative_eq!(xs[0], -1.0, epsilon = 1e-5);
        assert_relative_eq!(xs[1], 1.0, epsilon = 1e-5);
        for point in points.iter() {
            assert_relative_eq!(point.point.y, 0.0, epsilon = 1e-5);
        }
    }

    #[test]
    fn line_above_circle_misses() {
        let line = Line::new(Vec2::new(0.0, 5.0), Vec2::X, false);
        let circle = Circle::new(Vec2::ZERO, 3.0);
        assert!(line.intersect_circle(&circle).is_none());
        assert!(!line.overlap_circle(&circle));
    }

    #[test]
    fn tangent_line_yields_exactly_one_contact() {
        let (first, second) =
            Line::intersect_line_circle(Vec2::new(0.0, 3.0), Vec2::X, Vec2::ZERO, 3.0);
        assert!(first.valid);
        assert!(!second.valid);
        assert_relative_eq!(first.point.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(first.point.y, 3.0, epsilon = 1e-5);
    }

    #[test]
    fn secant_line_yields_two_symmetric_contacts() {
        let (first, second) =
            Line::intersect_line_circle(Vec2::new(0.0, 0.0), Vec2::X, Vec2::ZERO, 2.0);
        assert!(first.valid);
        assert!(second.valid);
        assert_relative_eq!(first.point.x, -2.0, epsilon = 1e-5);
        assert_relative_eq!(second.point.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn closest_point_to_crossing_segment_is_the_intersection() {
        let line = Line::new(Vec2::ZERO, Vec2::X, false);
        let segment = Segment::new(Vec2::new(1.0, -2.0), Vec2::new(1.0, 2.0), false);
        let result = line.closest_point_segment(&segment);
        assert_eq!(result.distance_squared, 0.0);
        assert_eq!(result.self_point.point, result.other_point.point);
        assert_relative_eq!(result.self_point.point.x, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn closest_point_parallel_lines_is_invalid() {
        let line1 = Line::new(Vec2::ZERO, Vec2::X, false);
        let line2 = Line::new(Vec2::new(0.0, 3.0), Vec2::X, false);
        let result = line1.closest_point_line(&line2);
        assert!(!result.is_valid());
    }

    #[test]
    fn distance_is_symmetric_between_line_and_circle() {
        let line = Line::new(Vec2::new(0.0, 5.0), Vec2::X, false);
        let circle = Circle::new(Vec2::ZERO, 3.0);
        let from_line = line.closest_point_circle(&circle);
        let from_circle = circle.closest_point_line(&line);
        assert_relative_eq!(
            from_line.distance_squared,
            from_circle.distance_squared,
            epsilon = 1e-4
        );
        assert_relative_eq!(from_line.distance_squared, 4.0, epsilon = 1e-4);
    }

    #[test]
    fn polygon_cap_is_checked_after_each_append() {
        let square = vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ];
        let all = Line::intersect_line_polygon(Vec2::ZERO, Vec2::X, &square, None).unwrap();
        assert_eq!(all.count(), 2);

        let capped = Line::intersect_line_polygon(Vec2::ZERO, Vec2::X, &square, Some(1)).unwrap();
        assert_eq!(capped.count(), 1);

        assert!(Line::intersect_line_polygon(Vec2::ZERO, Vec2::X, &square, Some(0)).is_none());
    }

    #[test]
    fn two_vertex_polygon_closest_point_is_invalid() {
        let line = Line::new(Vec2::ZERO, Vec2::X, false);
        let degenerate = Polygon::new(vec![Vec2::ZERO, Vec2::ONE]);
        let result = line.closest_point_polygon(&degenerate);
        assert!(!result.self_point.valid);
        assert!(!result.other_point.valid);
    }

    #[test]
    fn two_vertex_polyline_is_rejected_by_intersect_but_not_closest() {
        let line = Line::new(Vec2::new(0.0, 0.5), Vec2::X, false);
        let polyline = Polyline::new(vec![Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0)]);
        assert!(line.intersect_polyline(&polyline, None).is_none());
        assert!(!line.overlap_polyline(&polyline));

        let result = line.closest_point_polyline(&polyline);
        assert!(result.is_valid());
        assert_eq!(result.distance_squared, 0.0);
    }

    #[test]
    fn closest_point_polygon_records_edge_index_and_edge_normal() {
        // A square above the line. Edge 1 reaches distance 2 first at its
        // endpoint (1, 2); edge 2 ties at the same distance but the
        // earlier find is kept.
        let polygon = Polygon::new(vec![
            Vec2::new(-1.0, 4.0),
            Vec2::new(1.0, 4.0),
            Vec2::new(1.0, 2.0),
            Vec2::new(-1.0, 2.0),
        ]);
        let line = Line::new(Vec2::ZERO, Vec2::X, false);
        let result = line.closest_point_polygon(&polygon);
        assert_relative_eq!(result.distance_squared, 4.0, epsilon = 1e-5);
        assert_eq!(result.other_segment_index, 1);
        assert_eq!(result.other_point.point, Vec2::new(1.0, 2.0));
        // Right-hand perpendicular of the winning edge's direction (0, -1).
        assert_relative_eq!(result.other_point.normal.x, 1.0);
        assert_relative_eq!(result.other_point.normal.y, 0.0);
    }

    #[test]
    fn overlap_anchor_inside_polygon_without_boundary_data() {
        let square = vec![
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, -2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(-2.0, 2.0),
        ];
        // Any line anchored inside overlaps regardless of direction.
        assert!(Line::overlap_line_polygon(Vec2::ZERO, Vec2::X, &square));
    }

    #[test]
    fn to_segment_and_to_ray_preserve_the_normal() {
        let line = Line::new(Vec2::ZERO, Vec2::X, true);
        let segment = line.to_segment(10.0);
        assert_eq!(segment.normal, line.normal);
        assert_relative_eq!(segment.length(), 10.0);

        let ray = line.to_ray(false);
        assert_eq!(ray.normal, line.normal);
        let reversed = line.to_ray(true);
        assert_eq!(reversed.direction, -line.direction);
        assert_eq!(reversed.normal, -line.normal);
    }

    #[test]
    fn set_direction_preserves_flipped_state() {
        let line = Line::new(Vec2::ZERO, Vec2::X, true);
        let rotated = line.set_direction(Vec2::Y);
        assert!(rotated.is_normal_flipped());

        let straight = Line::new(Vec2::ZERO, Vec2::X, false).set_direction(Vec2::Y);
        assert!(!straight.is_normal_flipped());
    }
}
