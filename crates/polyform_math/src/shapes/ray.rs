use glam::Vec2;

use super::segment::{append_pair, collect_pair};
use super::{
    clamp_to_zero, Circle, Line, Polygon, Polyline, Quad, Rect, Segment, Segments, Triangle,
    PARALLEL_EPSILON,
};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoint, CollisionPoints,
};

/// A ray: semi-infinite from an anchor point along a direction.
///
/// The direction and normal are stored normalized; constructing from a
/// zero-length direction yields an invalid ray.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Ray {
    /// The anchor point the ray starts from.
    pub point: Vec2,
    /// The unit direction the ray extends along.
    pub direction: Vec2,
    /// The unit normal, perpendicular to the direction.
    pub normal: Vec2,
}

impl Ray {
    /// Creates a ray from an anchor point and a direction.
    ///
    /// The normal is the right-hand perpendicular of the direction, or the
    /// left-hand one when `flipped_normal` is set.
    #[inline]
    pub fn new(point: Vec2, direction: Vec2, flipped_normal: bool) -> Self {
        let direction = direction.normalize_or_zero();
        Self {
            point,
            direction,
            normal: Line::get_normal(direction, flipped_normal),
        }
    }

    /// Creates a ray with an explicit, already-normalized normal.
    #[inline]
    pub(crate) const fn with_normal(point: Vec2, direction: Vec2, normal: Vec2) -> Self {
        Self {
            point,
            direction,
            normal,
        }
    }

    /// Whether the ray has a usable direction and normal.
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

    /// Returns a copy with the normal reversed.
    #[inline]
    #[must_use]
    pub fn flip_normal(self) -> Self {
        Self {
            normal: -self.normal,
            ..self
        }
    }

    /// The infinite line through this ray.
    #[inline]
    pub fn to_line(&self) -> Line {
        Line::with_normal(self.point, self.direction, self.normal)
    }

    /// The segment of the given `length` starting at the anchor point.
    #[inline]
    pub fn to_segment(&self, length: f32) -> Segment {
        if !self.is_valid() {
            return Segment::default();
        }
        Segment::with_normal(self.point, self.point + self.direction * length, self.normal)
    }

    /// Returns a copy pointing the opposite way, with the normal reversed
    /// to match.
    #[inline]
    #[must_use]
    pub fn reversed(self) -> Self {
        Self {
            point: self.point,
            direction: -self.direction,
            normal: -self.normal,
        }
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
    #[inline]
    #[must_use]
    pub fn set_direction(self, direction: Vec2) -> Self {
        let flipped = self.is_normal_flipped();
        Self::new(self.point, direction, flipped)
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
impl Ray {
    /// Whether `point` lies on the forward side of the ray.
    pub fn is_point_on_ray(point: Vec2, ray_point: Vec2, ray_direction: Vec2) -> bool {
        let to_point = point - ray_point;
        let cross = to_point.perp_dot(ray_direction);
        if cross.abs() >= PARALLEL_EPSILON {
            return false;
        }
        to_point.dot(ray_direction) >= 0.0
    }

    /// The closest point on the ray to `point`, with the squared distance.
    /// The projection is clamped to the forward side of the anchor.
    pub fn closest_point_ray_point(
        ray_point: Vec2,
        ray_direction: Vec2,
        point: Vec2,
    ) -> (Vec2, f32) {
        let direction = ray_direction.normalize_or_zero();
        let projection_length = (point - ray_point).dot(direction).max(0.0);
        let closest = ray_point + direction * projection_length;
        let distance_squared = clamp_to_zero(closest.distance_squared(point));
        (closest, distance_squared)
    }

    /// The closest pair of points between two rays.
    pub fn closest_point_ray_ray(
        ray1_point: Vec2,
        ray1_direction: Vec2,
        ray2_point: Vec2,
        ray2_direction: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let intersection =
            Self::intersect_ray_ray(ray1_point, ray1_direction, ray2_point, ray2_direction);
        if intersection.valid {
            return (intersection.point, intersection.point, 0.0);
        }

        // No crossing: one of the anchors is involved in the minimum.
        let (on_ray1, mut min_distance_squared) =
            Self::closest_point_ray_point(ray1_point, ray1_direction, ray2_point);
        let mut best = (on_ray1, ray2_point);

        let (on_ray2, distance_squared) =
            Self::closest_point_ray_point(ray2_point, ray2_direction, ray1_point);
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            best = (ray1_point, on_ray2);
        }

        (best.0, best.1, clamp_to_zero(min_distance_squared))
    }

    /// The closest pair of points between a ray and an infinite line.
    pub fn closest_point_ray_line(
        ray_point: Vec2,
        ray_direction: Vec2,
        line_point: Vec2,
        line_direction: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let intersection =
            Line::intersect_line_ray(line_point, line_direction, ray_point, ray_direction);
        if intersection.valid {
            return (intersection.point, intersection.point, 0.0);
        }

        // Parallel, or the crossing lies behind the anchor: the anchor is
        // the closest point on the ray.
        let (on_line, distance_squared) =
            Line::closest_point_line_point(line_point, line_direction, ray_point);
        (ray_point, on_line, distance_squared)
    }

    /// The closest pair of points between a ray and a segment.
    pub fn closest_point_ray_segment(
        ray_point: Vec2,
        ray_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> (Vec2, Vec2, f32) {
        let (on_segment, on_ray, distance_squared) = Segment::closest_point_segment_ray(
            segment_start,
            segment_end,
            ray_point,
            ray_direction,
        );
        (on_ray, on_segment, distance_squared)
    }

    /// The closest pair of points between a ray and a circle boundary.
    pub fn closest_point_ray_circle(
        ray_point: Vec2,
        ray_direction: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> (Vec2, Vec2, f32) {
        let (on_ray, _) = Self::closest_point_ray_point(ray_point, ray_direction, circle_center);
        let offset = (on_ray - circle_center).normalize_or_zero();
        let on_circle = circle_center + offset * circle_radius;
        let distance_squared = clamp_to_zero(on_ray.distance_squared(on_circle));
        (on_ray, on_circle, distance_squared)
    }
}

// Intersection building blocks. Validity on the ray side is the parametric
// gate `t >= 0`; the reported normal always comes from the second operand.
impl Ray {
    /// Intersects a ray with a segment. The reported normal is the
    /// perpendicular of the segment's direction.
    pub fn intersect_ray_segment(
        ray_point: Vec2,
        ray_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> CollisionPoint {
        let segment_direction = segment_end - segment_start;
        let denominator = ray_direction.perp_dot(segment_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = segment_start - ray_point;
        let t = difference.perp_dot(segment_direction) / denominator;
        let u = difference.perp_dot(ray_direction) / denominator;
        if t >= 0.0 && (0.0..=1.0).contains(&u) {
            let intersection = ray_point + ray_direction * t;
            let normal = segment_direction.normalize_or_zero().perp();
            return CollisionPoint::new(intersection, normal);
        }

        CollisionPoint::INVALID
    }

    /// Intersects a ray with a segment, reporting `segment_normal` instead
    /// of the derived perpendicular.
    pub fn intersect_ray_segment_with_normal(
        ray_point: Vec2,
        ray_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
        segment_normal: Vec2,
    ) -> CollisionPoint {
        let result =
            Self::intersect_ray_segment(ray_point, ray_direction, segment_start, segment_end);
        if result.valid {
            return CollisionPoint::new(result.point, segment_normal);
        }
        CollisionPoint::INVALID
    }

    /// Intersects two rays. The reported normal is the perpendicular of
    /// the second ray's direction.
    pub fn intersect_ray_ray(
        ray1_point: Vec2,
        ray1_direction: Vec2,
        ray2_point: Vec2,
        ray2_direction: Vec2,
    ) -> CollisionPoint {
        let denominator = ray1_direction.perp_dot(ray2_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = ray2_point - ray1_point;
        let t = difference.perp_dot(ray2_direction) / denominator;
        let u = difference.perp_dot(ray1_direction) / denominator;
        if t >= 0.0 && u >= 0.0 {
            let intersection = ray1_point + ray1_direction * t;
            let normal = ray2_direction.normalize_or_zero().perp();
            return CollisionPoint::new(intersection, normal);
        }

        CollisionPoint::INVALID
    }

    /// Intersects a ray with an infinite line. The reported normal is the
    /// perpendicular of the line's direction.
    pub fn intersect_ray_line(
        ray_point: Vec2,
        ray_direction: Vec2,
        line_point: Vec2,
        line_direction: Vec2,
    ) -> CollisionPoint {
        let denominator = ray_direction.perp_dot(line_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return CollisionPoint::INVALID;
        }

        let difference = line_point - ray_point;
        let t = difference.perp_dot(line_direction) / denominator;
        if t >= 0.0 {
            let intersection = ray_point + ray_direction * t;
            let normal = line_direction.normalize_or_zero().perp();
            return CollisionPoint::new(intersection, normal);
        }

        CollisionPoint::INVALID
    }

    /// Intersects a ray with a circle boundary: up to two contacts on the
    /// forward side of the anchor, one exact tangent contact, or none.
    pub fn intersect_ray_circle(
        ray_point: Vec2,
        ray_direction: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> (CollisionPoint, CollisionPoint) {
        let direction = ray_direction.normalize_or_zero();
        let to_circle = circle_center - ray_point;
        let projection_length = to_circle.dot(direction);
        let closest_point = ray_point + direction * projection_length;
        let distance_to_center = closest_point.distance(circle_center);

        if distance_to_center < circle_radius {
            let offset =
                (circle_radius * circle_radius - distance_to_center * distance_to_center).sqrt();
            let t1 = projection_length - offset;
            let t2 = projection_length + offset;

            let mut first = CollisionPoint::INVALID;
            let mut second = CollisionPoint::INVALID;
            if t1 >= 0.0 {
                let point = ray_point + direction * t1;
                first = CollisionPoint::new(point, (point - circle_center).normalize_or_zero());
            }
            if t2 >= 0.0 {
                let point = ray_point + direction * t2;
                let contact =
                    CollisionPoint::new(point, (point - circle_center).normalize_or_zero());
                if first.valid {
                    second = contact;
                } else {
                    first = contact;
                }
            }
            return (first, second);
        }

        if (distance_to_center - circle_radius).abs() < PARALLEL_EPSILON
            && projection_length >= 0.0
        {
            let contact = CollisionPoint::new(
                closest_point,
                (closest_point - circle_center).normalize_or_zero(),
            );
            return (contact, CollisionPoint::INVALID);
        }

        (CollisionPoint::INVALID, CollisionPoint::INVALID)
    }

    /// Intersects a ray with a polygon, optionally capped to `max_points`
    /// contacts. The cap is checked after each append.
    pub fn intersect_ray_polygon(
        ray_point: Vec2,
        ray_direction: Vec2,
        points: &[Vec2],
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if points.len() < 3 || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for i in 0..points.len() {
            let contact = Self::intersect_ray_segment(
                ray_point,
                ray_direction,
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

    /// Intersects a ray with a polyline, optionally capped to `max_points`
    /// contacts.
    pub fn intersect_ray_polyline(
        ray_point: Vec2,
        ray_direction: Vec2,
        points: &[Vec2],
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if points.len() < 3 || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for i in 0..points.len() - 1 {
            let contact =
                Self::intersect_ray_segment(ray_point, ray_direction, points[i], points[i + 1]);
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

    /// Intersects a ray with a collection of segments, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_ray_segments(
        ray_point: Vec2,
        ray_direction: Vec2,
        segments: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if segments.is_empty() || max_points == Some(0) {
            return None;
        }
        let mut result: Option<CollisionPoints> = None;
        for segment in segments.iter() {
            let contact = Self::intersect_ray_segment(
                ray_point,
                ray_direction,
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
impl Ray {
    /// Whether a ray crosses a segment.
    pub fn overlap_ray_segment(
        ray_point: Vec2,
        ray_direction: Vec2,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> bool {
        Self::intersect_ray_segment(ray_point, ray_direction, segment_start, segment_end).valid
    }

    /// Whether two rays cross.
    pub fn overlap_ray_ray(
        ray1_point: Vec2,
        ray1_direction: Vec2,
        ray2_point: Vec2,
        ray2_direction: Vec2,
    ) -> bool {
        let denominator = ray1_direction.perp_dot(ray2_direction);
        if denominator.abs() < PARALLEL_EPSILON {
            return false;
        }
        let difference = ray2_point - ray1_point;
        let t = difference.perp_dot(ray2_direction) / denominator;
        let u = difference.perp_dot(ray1_direction) / denominator;
        t >= 0.0 && u >= 0.0
    }

    /// Whether a ray crosses an infinite line.
    pub fn overlap_ray_line(
        ray_point: Vec2,
        ray_direction: Vec2,
        line_point: Vec2,
        line_direction: Vec2,
    ) -> bool {
        Line::overlap_line_ray(line_point, line_direction, ray_point, ray_direction)
    }

    /// Whether a ray touches or crosses a circle.
    pub fn overlap_ray_circle(
        ray_point: Vec2,
        ray_direction: Vec2,
        circle_center: Vec2,
        circle_radius: f32,
    ) -> bool {
        if Circle::contains_circle_point(circle_center, circle_radius, ray_point) {
            return true;
        }
        let (first, _) =
            Self::intersect_ray_circle(ray_point, ray_direction, circle_center, circle_radius);
        first.valid
    }
}

// The closest-point family.
impl Ray {
    /// The closest point on this ray to `point`, with the squared distance.
    /// The reported normal faces the query point.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        let (closest, distance_squared) =
            Self::closest_point_ray_point(self.point, self.direction, point);
        let toward = (point - closest).normalize_or_zero();
        let normal = if toward.dot(self.normal) >= 0.0 {
            self.normal
        } else {
            -self.normal
        };
        (CollisionPoint::new(closest, normal), distance_squared)
    }

    /// The closest pair of points between this ray and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) =
            Self::closest_point_ray_line(self.point, self.direction, other.point, other.direction);
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this ray and another.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) =
            Self::closest_point_ray_ray(self.point, self.direction, other.point, other.direction);
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this ray and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) = Self::closest_point_ray_segment(
            self.point,
            self.direction,
            other.start,
            other.end,
        );
        ClosestPointResult::new(
            CollisionPoint::new(self_point, self.normal),
            CollisionPoint::new(other_point, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this ray and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        let (self_point, other_point, distance_squared) = Self::closest_point_ray_circle(
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

    /// The closest pair of points between this ray and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        self.closest_point_edges(&[(other.a, other.b), (other.b, other.c), (other.c, other.a)])
    }

    /// The closest pair of points between this ray and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a, other.b),
            (other.b, other.c),
            (other.c, other.d),
            (other.d, other.a),
        ])
    }

    /// The closest pair of points between this ray and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a(), other.b()),
            (other.b(), other.c()),
            (other.c(), other.d()),
            (other.d(), other.a()),
        ])
    }

    /// The closest pair of points between this ray and a polygon.
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

    /// The closest pair of points between this ray and a polyline.
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

    /// The closest pair of points between this ray and a collection of
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

    fn closest_point_edges(&self, edges: &[(Vec2, Vec2)]) -> ClosestPointResult {
        let (first_start, first_end) = edges[0];
        let (mut self_point, mut other_point, mut min_distance_squared) =
            Self::closest_point_ray_segment(self.point, self.direction, first_start, first_end);
        let mut other_normal = first_end - first_start;
        let mut other_index = 0;

        for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
            let (candidate_self, candidate_other, distance_squared) =
                Self::closest_point_ray_segment(self.point, self.direction, edge_start, edge_end);
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
impl Ray {
    /// Intersects this ray with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let result =
            Self::intersect_ray_line(self.point, self.direction, other.point, other.direction);
        if result.valid {
            let mut points = CollisionPoints::new();
            points.add(CollisionPoint::new(result.point, other.normal));
            return Some(points);
        }
        None
    }

    /// Intersects this ray with another.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let result =
            Self::intersect_ray_ray(self.point, self.direction, other.point, other.direction);
        if result.valid {
            let mut points = CollisionPoints::new();
            points.add(CollisionPoint::new(result.point, other.normal));
            return Some(points);
        }
        None
    }

    /// Intersects this ray with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let result = Self::intersect_ray_segment_with_normal(
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

    /// Intersects this ray with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let (first, second) =
            Self::intersect_ray_circle(self.point, self.direction, other.center, other.radius);
        collect_pair(first, second)
    }

    /// Intersects this ray with a triangle.
    pub fn intersect_triangle(&self, other: &Triangle) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_triangle_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this ray with a quad.
    pub fn intersect_quad(&self, other: &Quad) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_quad_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this ray with a rect.
    pub fn intersect_rect(&self, other: &Rect) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_rect_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this ray with a polygon, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polygon(
        &self,
        other: &Polygon,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        Self::intersect_ray_polygon(self.point, self.direction, other.points(), max_points)
    }

    /// Intersects this ray with a polyline, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polyline(
        &self,
        other: &Polyline,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        Self::intersect_ray_polyline(self.point, self.direction, other.points(), max_points)
    }

    /// Intersects this ray with a collection of segments, optionally
    /// capped to `max_points` contacts.
    pub fn intersect_segments(
        &self,
        others: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        Self::intersect_ray_segments(self.point, self.direction, others, max_points)
    }
}

// Accumulator overloads.
impl Ray {
    /// Appends the line intersection, if any, into `points`.
    pub fn intersect_line_into(&self, other: &Line, points: &mut CollisionPoints) -> usize {
        let contact =
            Self::intersect_ray_line(self.point, self.direction, other.point, other.direction);
        if contact.valid {
            points.add(CollisionPoint::new(contact.point, other.normal));
            return 1;
        }
        0
    }

    /// Appends the ray intersection, if any, into `points`.
    pub fn intersect_ray_into(&self, other: &Ray, points: &mut CollisionPoints) -> usize {
        let contact =
            Self::intersect_ray_ray(self.point, self.direction, other.point, other.direction);
        if contact.valid {
            points.add(CollisionPoint::new(contact.point, other.normal));
            return 1;
        }
        0
    }

    /// Appends the segment intersection, if any, into `points`.
    pub fn intersect_segment_into(&self, other: &Segment, points: &mut CollisionPoints) -> usize {
        let contact =
            Self::intersect_ray_segment(self.point, self.direction, other.start, other.end);
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
            Self::intersect_ray_circle(self.point, self.direction, other.center, other.radius);
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
            let contact = Self::intersect_ray_segment(
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
                Self::intersect_ray_segment(self.point, self.direction, other[i], other[i + 1]);
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
                Self::intersect_ray_segment(self.point, self.direction, other.start, other.end);
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

    /// A ray can cross a closed convex boundary at most twice, so the scan
    /// stops once two contacts are found.
    fn intersect_closed_edges_into(
        &self,
        edges: &[(Vec2, Vec2)],
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let mut count = 0;
        for &(edge_start, edge_end) in edges {
            let contact =
                Self::intersect_ray_segment(self.point, self.direction, edge_start, edge_end);
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
impl Ray {
    /// Whether `point` lies on the forward side of this ray.
    pub fn overlap_point(&self, point: Vec2) -> bool {
        Self::is_point_on_ray(point, self.point, self.direction)
    }

    /// Whether this ray crosses a line.
    pub fn overlap_line(&self, other: &Line) -> bool {
        Self::overlap_ray_line(self.point, self.direction, other.point, other.direction)
    }

    /// Whether this ray crosses another.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        Self::overlap_ray_ray(self.point, self.direction, other.point, other.direction)
    }

    /// Whether this ray crosses a segment.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        Self::overlap_ray_segment(self.point, self.direction, other.start, other.end)
    }

    /// Whether this ray touches or crosses a circle.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        Self::overlap_ray_circle(self.point, self.direction, other.center, other.radius)
    }

    /// Whether this ray overlaps a triangle, including an anchor inside it.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        if Triangle::contains_triangle_point(other.a, other.b, other.c, self.point) {
            return true;
        }
        self.overlap_edges(&[(other.a, other.b), (other.b, other.c), (other.c, other.a)])
    }

    /// Whether this ray overlaps a quad, including an anchor inside it.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        if Quad::contains_quad_point(other.a, other.b, other.c, other.d, self.point) {
            return true;
        }
        self.overlap_edges(&[
            (other.a, other.b),
            (other.b, other.c),
            (other.c, other.d),
            (other.d, other.a),
        ])
    }

    /// Whether this ray overlaps a rect, including an anchor inside it.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        if other.contains_point(self.point) {
            return true;
        }
        self.overlap_edges(&[
            (other.a(), other.b()),
            (other.b(), other.c()),
            (other.c(), other.d()),
            (other.d(), other.a()),
        ])
    }

    /// Whether this ray overlaps a polygon, including an anchor inside it.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        if other.count() < 3 {
            return false;
        }
        if Polygon::contains_polygon_point(other.points(), self.point) {
            return true;
        }
        for i in 0..other.count() {
            if Self::overlap_ray_segment(
                self.point,
                self.direction,
                other[i],
                other[(i + 1) % other.count()],
            ) {
                return true;
            }
        }
        false
    }

    /// Whether this ray crosses a polyline.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        if other.count() < 3 {
            return false;
        }
        for i in 0..other.count() - 1 {
            if Self::overlap_ray_segment(self.point, self.direction, other[i], other[i + 1]) {
                return true;
            }
        }
        false
    }

    /// Whether this ray crosses any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        others.iter().any(|other| {
            Self::overlap_ray_segment(self.point, self.direction, other.start, other.end)
        })
    }

    fn overlap_edges(&self, edges: &[(Vec2, Vec2)]) -> bool {
        edges.iter().any(|&(edge_start, edge_end)| {
            Self::overlap_ray_segment(self.point, self.direction, edge_start, edge_end)
        })
    }
}

// Collider dispatch.
impl Ray {
    /// Intersects this ray with whatever shape `collider` holds. Disabled
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

    /// Whether this ray overlaps whatever shape `collider` holds. Disabled
    /// colliders never overlap.
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

    /// The closest pair of points between this ray and whatever shape
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
    fn backward_hits_are_rejected() {
        // The segment sits behind the ray's anchor.
        let contact = Ray::intersect_ray_segment(
            Vec2::ZERO,
            Vec2::X,
            Vec2::new(-2.0, -1.0),
            Vec2::new(-2.0, 1.0),
        );
        assert!(!contact.valid);

        // In front of the anchor it hits.
        let contact = Ray::intersect_ray_segment(
            Vec2::ZERO,
            Vec2::X,
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
        );
        assert!(contact.valid);
        assert_relative_eq!(contact.point.x, 2.0);
        assert_relative_eq!(contact.point.y, 0.0);
    }

    #[test]
    fn ray_circle_from_inside_yields_one_contact() {
        let (first, second) = Ray::intersect_ray_circle(Vec2::ZERO, Vec2::X, Vec2::ZERO, 2.0);
        assert!(first.valid);
        assert!(!second.valid);
        assert_relative_eq!(first.point.x, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn ray_circle_from_outside_yields_two_contacts() {
        let (first, second) =
            Ray::intersect_ray_circle(Vec2::new(-5.0, 0.0), Vec2::X, Vec2::ZERO, 2.0);
        assert!(first.valid);
        assert!(second.valid);
        assert_relative_eq!(first.point.x, -2.0, epsilon = 1e-5);
        assert_relative_eq!(second.point.x, 2.0, epsilon = 1e-5);
        // Normals point radially outward.
        assert_relative_eq!(first.normal.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(second.normal.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn closest_point_clamps_to_anchor() {
        let (closest, distance_squared) =
            Ray::closest_point_ray_point(Vec2::ZERO, Vec2::X, Vec2::new(-3.0, 4.0));
        assert_eq!(closest, Vec2::ZERO);
        assert_relative_eq!(distance_squared, 25.0);
    }

    #[test]
    fn closest_point_ray_ray_diverging() {
        // Two rays anchored apart, pointing away from each other.
        let (self_point, other_point, distance_squared) =
            Ray::closest_point_ray_ray(Vec2::ZERO, Vec2::NEG_X, Vec2::new(3.0, 0.0), Vec2::X);
        assert_eq!(self_point, Vec2::ZERO);
        assert_eq!(other_point, Vec2::new(3.0, 0.0));
        assert_relative_eq!(distance_squared, 9.0);
    }

    #[test]
    fn intersecting_rays_have_zero_distance() {
        let ray1 = Ray::new(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0), false);
        let ray2 = Ray::new(Vec2::new(1.0, -1.0), Vec2::new(-1.0, 1.0), false);
        let result = ray1.closest_point_ray(&ray2);
        assert_eq!(result.distance_squared, 0.0);
        assert_relative_eq!(result.self_point.point.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(result.self_point.point.y, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn ray_polygon_cap_is_honored() {
        // A square the ray crosses twice.
        let square = vec![
            Vec2::new(1.0, -1.0),
            Vec2::new(3.0, -1.0),
            Vec2::new(3.0, 1.0),
            Vec2::new(1.0, 1.0),
        ];
        let all = Ray::intersect_ray_polygon(Vec2::ZERO, Vec2::X, &square, None).unwrap();
        assert_eq!(all.count(), 2);

        let capped = Ray::intersect_ray_polygon(Vec2::ZERO, Vec2::X, &square, Some(1)).unwrap();
        assert_eq!(capped.count(), 1);

        assert!(Ray::intersect_ray_polygon(Vec2::ZERO, Vec2::X, &square, Some(0)).is_none());
    }

    #[test]
    fn anchor_inside_triangle_overlaps() {
        let triangle = Triangle::new(
            Vec2::new(-5.0, 5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(0.0, -5.0),
        );
        let ray = Ray::new(Vec2::new(0.0, 1.0), Vec2::X, false);
        assert!(ray.overlap_triangle(&triangle));
    }
}
