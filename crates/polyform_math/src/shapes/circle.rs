use std::f32::consts::PI;

use glam::Vec2;

use super::segment::{append_pair, collect_pair};
use super::{
    clamp_to_zero, Line, Polygon, Polyline, Quad, Ray, Rect, Segment, Segments, Triangle,
    PARALLEL_EPSILON,
};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoint, CollisionPoints,
};

/// A circle defined by its center and radius.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Circle {
    /// The center of the circle.
    pub center: Vec2,
    /// The radius of the circle.
    pub radius: f32,
}

impl Circle {
    /// Creates a circle from its center and radius.
    #[inline(always)]
    pub const fn new(center: Vec2, radius: f32) -> Self {
        Self { center, radius }
    }

    /// The diameter of the circle.
    #[inline(always)]
    pub fn diameter(&self) -> f32 {
        2.0 * self.radius
    }

    /// The area of the circle.
    #[inline(always)]
    pub fn area(&self) -> f32 {
        PI * self.radius * self.radius
    }

    /// The circumference of the circle.
    #[inline(always)]
    pub fn circumference(&self) -> f32 {
        2.0 * PI * self.radius
    }

    /// Whether the circle has a positive radius.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.radius > 0.0
    }

    /// The axis-aligned bounding box of the circle.
    #[inline]
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(
            self.center - Vec2::splat(self.radius),
            self.center + Vec2::splat(self.radius),
        )
    }

    /// Whether `point` lies inside or on the circle.
    #[inline]
    pub fn contains_circle_point(circle_center: Vec2, circle_radius: f32, point: Vec2) -> bool {
        point.distance_squared(circle_center) <= circle_radius * circle_radius
    }

    /// Whether `point` lies inside or on this circle.
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        Self::contains_circle_point(self.center, self.radius, point)
    }
}

// Closest-point building blocks.
impl Circle {
    /// The closest point on the circle boundary to `point`, with the
    /// squared distance.
    pub fn closest_point_circle_point(
        circle_center: Vec2,
        circle_radius: f32,
        point: Vec2,
    ) -> (Vec2, f32) {
        let closest =
            circle_center + (point - circle_center).normalize_or_zero() * circle_radius;
        let distance_squared = clamp_to_zero(closest.distance_squared(point));
        (closest, distance_squared)
    }

    /// The closest pair of boundary points between two circles, along the
    /// line between their centers.
    pub fn closest_point_circle_circle(
        circle1_center: Vec2,
        circle1_radius: f32,
        circle2_center: Vec2,
        circle2_radius: f32,
    ) -> (Vec2, Vec2, f32) {
        let direction = (circle2_center - circle1_center).normalize_or_zero();
        let on_circle1 = circle1_center + direction * circle1_radius;
        let on_circle2 = circle2_center - direction * circle2_radius;
        let distance_squared = clamp_to_zero(on_circle1.distance_squared(on_circle2));
        (on_circle1, on_circle2, distance_squared)
    }
}

// Intersection building blocks.
impl Circle {
    /// Intersects a circle boundary with a segment. The reported normal is
    /// the perpendicular of the segment's direction.
    pub fn intersect_circle_segment(
        circle_center: Vec2,
        circle_radius: f32,
        segment_start: Vec2,
        segment_end: Vec2,
    ) -> (CollisionPoint, CollisionPoint) {
        let (first, second) = Segment::intersect_segment_circle(
            segment_start,
            segment_end,
            circle_center,
            circle_radius,
        );
        let normal = (segment_end - segment_start).normalize_or_zero().perp();
        (
            if first.valid {
                CollisionPoint::new(first.point, normal)
            } else {
                CollisionPoint::INVALID
            },
            if second.valid {
                CollisionPoint::new(second.point, normal)
            } else {
                CollisionPoint::INVALID
            },
        )
    }

    /// Intersects a circle boundary with an infinite line. The reported
    /// normal is the perpendicular of the line's direction.
    pub fn intersect_circle_line(
        circle_center: Vec2,
        circle_radius: f32,
        line_point: Vec2,
        line_direction: Vec2,
    ) -> (CollisionPoint, CollisionPoint) {
        let (first, second) =
            Line::intersect_line_circle(line_point, line_direction, circle_center, circle_radius);
        let normal = line_direction.normalize_or_zero().perp();
        (
            if first.valid {
                CollisionPoint::new(first.point, normal)
            } else {
                CollisionPoint::INVALID
            },
            if second.valid {
                CollisionPoint::new(second.point, normal)
            } else {
                CollisionPoint::INVALID
            },
        )
    }

    /// Intersects a circle boundary with a ray. The reported normal is the
    /// perpendicular of the ray's direction.
    pub fn intersect_circle_ray(
        circle_center: Vec2,
        circle_radius: f32,
        ray_point: Vec2,
        ray_direction: Vec2,
    ) -> (CollisionPoint, CollisionPoint) {
        let (first, second) =
            Ray::intersect_ray_circle(ray_point, ray_direction, circle_center, circle_radius);
        let normal = ray_direction.normalize_or_zero().perp();
        (
            if first.valid {
                CollisionPoint::new(first.point, normal)
            } else {
                CollisionPoint::INVALID
            },
            if second.valid {
                CollisionPoint::new(second.point, normal)
            } else {
                CollisionPoint::INVALID
            },
        )
    }

    /// Intersects two circle boundaries: two contacts, one exact tangent
    /// contact, or none. The reported normals are radial on the *second*
    /// circle.
    pub fn intersect_circle_circle(
        circle1_center: Vec2,
        circle1_radius: f32,
        circle2_center: Vec2,
        circle2_radius: f32,
    ) -> (CollisionPoint, CollisionPoint) {
        let distance = circle1_center.distance(circle2_center);
        if distance < PARALLEL_EPSILON {
            // Concentric circles either coincide everywhere or nowhere.
            return (CollisionPoint::INVALID, CollisionPoint::INVALID);
        }

        let radius_sum = circle1_radius + circle2_radius;
        let radius_difference = (circle1_radius - circle2_radius).abs();

        if distance > radius_sum || distance < radius_difference {
            return (CollisionPoint::INVALID, CollisionPoint::INVALID);
        }

        let direction = (circle2_center - circle1_center) / distance;
        let along = (distance * distance - circle2_radius * circle2_radius
            + circle1_radius * circle1_radius)
            / (2.0 * distance);
        let midpoint = circle1_center + direction * along;

        let tangent = (distance - radius_sum).abs() < PARALLEL_EPSILON
            || (distance - radius_difference).abs() < PARALLEL_EPSILON;
        if tangent {
            let contact = CollisionPoint::new(
                midpoint,
                (midpoint - circle2_center).normalize_or_zero(),
            );
            return (contact, CollisionPoint::INVALID);
        }

        let half_chord =
            (circle1_radius * circle1_radius - along * along).max(0.0).sqrt();
        let offset = direction.perp() * half_chord;
        let point1 = midpoint + offset;
        let point2 = midpoint - offset;
        (
            CollisionPoint::new(point1, (point1 - circle2_center).normalize_or_zero()),
            CollisionPoint::new(point2, (point2 - circle2_center).normalize_or_zero()),
        )
    }
}

// Overlap building blocks.
impl Circle {
    /// Whether two circles touch or overlap.
    pub fn overlap_circle_circle(
        circle1_center: Vec2,
        circle1_radius: f32,
        circle2_center: Vec2,
        circle2_radius: f32,
    ) -> bool {
        let distance = circle1_center.distance(circle2_center);
        let radius_sum = circle1_radius + circle2_radius;
        distance < radius_sum || (distance - radius_sum).abs() < PARALLEL_EPSILON
    }
}

// The closest-point family.
impl Circle {
    /// The closest point on this circle's boundary to `point`, with the
    /// squared distance. The reported normal is radial.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        let (closest, distance_squared) =
            Self::closest_point_circle_point(self.center, self.radius, point);
        let normal = (closest - self.center).normalize_or_zero();
        (CollisionPoint::new(closest, normal), distance_squared)
    }

    /// The closest pair of points between this circle and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        let (on_line, on_circle, distance_squared) = Line::closest_point_line_circle(
            other.point,
            other.direction,
            self.center,
            self.radius,
        );
        ClosestPointResult::new(
            CollisionPoint::new(on_circle, (on_circle - self.center).normalize_or_zero()),
            CollisionPoint::new(on_line, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this circle and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        let (on_ray, on_circle, distance_squared) = Ray::closest_point_ray_circle(
            other.point,
            other.direction,
            self.center,
            self.radius,
        );
        ClosestPointResult::new(
            CollisionPoint::new(on_circle, (on_circle - self.center).normalize_or_zero()),
            CollisionPoint::new(on_ray, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this circle and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        let (on_segment, on_circle, distance_squared) = Segment::closest_point_segment_circle(
            other.start,
            other.end,
            self.center,
            self.radius,
        );
        ClosestPointResult::new(
            CollisionPoint::new(on_circle, (on_circle - self.center).normalize_or_zero()),
            CollisionPoint::new(on_segment, other.normal),
            distance_squared,
        )
    }

    /// The closest pair of points between this circle and another.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        let (on_self, on_other, distance_squared) = Self::closest_point_circle_circle(
            self.center,
            self.radius,
            other.center,
            other.radius,
        );
        ClosestPointResult::new(
            CollisionPoint::new(on_self, (on_self - self.center).normalize_or_zero()),
            CollisionPoint::new(on_other, (on_other - other.center).normalize_or_zero()),
            distance_squared,
        )
    }

    /// The closest pair of points between this circle and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        self.closest_point_edges(&[(other.a, other.b), (other.b, other.c), (other.c, other.a)])
    }

    /// The closest pair of points between this circle and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a, other.b),
            (other.b, other.c),
            (other.c, other.d),
            (other.d, other.a),
        ])
    }

    /// The closest pair of points between this circle and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        self.closest_point_edges(&[
            (other.a(), other.b()),
            (other.b(), other.c()),
            (other.c(), other.d()),
            (other.d(), other.a()),
        ])
    }

    /// The closest pair of points between this circle and a polygon.
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

    /// The closest pair of points between this circle and a polyline.
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

    /// The closest pair of points between this circle and a collection of
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
        let (mut other_point, mut self_point, mut min_distance_squared) = {
            let (on_segment, on_circle, distance_squared) = Segment::closest_point_segment_circle(
                first_start,
                first_end,
                self.center,
                self.radius,
            );
            (on_segment, on_circle, distance_squared)
        };
        let mut other_normal = first_end - first_start;
        let mut other_index = 0;

        for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
            let (on_segment, on_circle, distance_squared) = Segment::closest_point_segment_circle(
                edge_start,
                edge_end,
                self.center,
                self.radius,
            );
            if distance_squared < min_distance_squared {
                min_distance_squared = distance_squared;
                self_point = on_circle;
                other_point = on_segment;
                other_normal = edge_end - edge_start;
                other_index = i;
            }
        }

        ClosestPointResult::with_indices(
            CollisionPoint::new(self_point, (self_point - self.center).normalize_or_zero()),
            CollisionPoint::new(other_point, other_normal.perp().normalize_or_zero()),
            min_distance_squared,
            -1,
            other_index as i32,
        )
    }
}

// The intersection family.
impl Circle {
    /// Intersects this circle with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let (first, second) =
            Self::intersect_circle_line(self.center, self.radius, other.point, other.direction);
        collect_pair(first, second)
    }

    /// Intersects this circle with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let (first, second) =
            Self::intersect_circle_ray(self.center, self.radius, other.point, other.direction);
        collect_pair(first, second)
    }

    /// Intersects this circle with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let (first, second) =
            Self::intersect_circle_segment(self.center, self.radius, other.start, other.end);
        collect_pair(first, second)
    }

    /// Intersects this circle with another.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let (first, second) = Self::intersect_circle_circle(
            self.center,
            self.radius,
            other.center,
            other.radius,
        );
        collect_pair(first, second)
    }

    /// Intersects this circle with a triangle.
    pub fn intersect_triangle(&self, other: &Triangle) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_triangle_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this circle with a quad.
    pub fn intersect_quad(&self, other: &Quad) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_quad_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this circle with a rect.
    pub fn intersect_rect(&self, other: &Rect) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_rect_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this circle with a polygon, optionally capped to
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
            let (first, second) = Self::intersect_circle_segment(
                self.center,
                self.radius,
                other[i],
                other[(i + 1) % other.count()],
            );
            for contact in [first, second] {
                if contact.valid {
                    let collected = result.get_or_insert_with(CollisionPoints::new);
                    collected.add(contact);
                    if max_points.is_some_and(|max| collected.count() >= max) {
                        return result;
                    }
                }
            }
        }
        result
    }

    /// Intersects this circle with a polyline, optionally capped to
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
            let (first, second) = Self::intersect_circle_segment(
                self.center,
                self.radius,
                other[i],
                other[i + 1],
            );
            for contact in [first, second] {
                if contact.valid {
                    let collected = result.get_or_insert_with(CollisionPoints::new);
                    collected.add(contact);
                    if max_points.is_some_and(|max| collected.count() >= max) {
                        return result;
                    }
                }
            }
        }
        result
    }

    /// Intersects this circle with a collection of segments, optionally
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
        for segment in others.iter() {
            let (first, second) = Self::intersect_circle_segment(
                self.center,
                self.radius,
                segment.start,
                segment.end,
            );
            for contact in [first, second] {
                if contact.valid {
                    let collected = result.get_or_insert_with(CollisionPoints::new);
                    collected.add(contact);
                    if max_points.is_some_and(|max| collected.count() >= max) {
                        return result;
                    }
                }
            }
        }
        result
    }
}

// Accumulator overloads.
impl Circle {
    /// Appends line intersections into `points`.
    pub fn intersect_line_into(
        &self,
        other: &Line,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let (first, second) =
            Self::intersect_circle_line(self.center, self.radius, other.point, other.direction);
        append_pair(first, second, points, return_after_first)
    }

    /// Appends ray intersections into `points`.
    pub fn intersect_ray_into(
        &self,
        other: &Ray,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let (first, second) =
            Self::intersect_circle_ray(self.center, self.radius, other.point, other.direction);
        append_pair(first, second, points, return_after_first)
    }

    /// Appends segment intersections into `points`.
    pub fn intersect_segment_into(
        &self,
        other: &Segment,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let (first, second) =
            Self::intersect_circle_segment(self.center, self.radius, other.start, other.end);
        append_pair(first, second, points, return_after_first)
    }

    /// Appends circle intersections into `points`.
    pub fn intersect_circle_into(
        &self,
        other: &Circle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let (first, second) = Self::intersect_circle_circle(
            self.center,
            self.radius,
            other.center,
            other.radius,
        );
        append_pair(first, second, points, return_after_first)
    }

    /// Appends triangle intersections into `points`.
    pub fn intersect_triangle_into(
        &self,
        other: &Triangle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        self.intersect_edges_into(
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
        self.intersect_edges_into(
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
        self.intersect_edges_into(
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
        let edges: Vec<(Vec2, Vec2)> = (0..other.count())
            .map(|i| (other[i], other[(i + 1) % other.count()]))
            .collect();
        self.intersect_edges_into(&edges, points, return_after_first)
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
        let edges: Vec<(Vec2, Vec2)> = (0..other.count() - 1)
            .map(|i| (other[i], other[i + 1]))
            .collect();
        self.intersect_edges_into(&edges, points, return_after_first)
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
        let edges: Vec<(Vec2, Vec2)> =
            others.iter().map(|segment| (segment.start, segment.end)).collect();
        self.intersect_edges_into(&edges, points, return_after_first)
    }

    fn intersect_edges_into(
        &self,
        edges: &[(Vec2, Vec2)],
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        let mut count = 0;
        for &(edge_start, edge_end) in edges {
            let (first, second) =
                Self::intersect_circle_segment(self.center, self.radius, edge_start, edge_end);
            for contact in [first, second] {
                if contact.valid {
                    points.add(contact);
                    if return_after_first {
                        return 1;
                    }
                    count += 1;
                }
            }
        }
        count
    }
}

// The overlap family.
impl Circle {
    /// Whether this circle overlaps a line.
    pub fn overlap_line(&self, other: &Line) -> bool {
        Line::overlap_line_circle(other.point, other.direction, self.center, self.radius)
    }

    /// Whether this circle overlaps a ray.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        Ray::overlap_ray_circle(other.point, other.direction, self.center, self.radius)
    }

    /// Whether this circle overlaps a segment.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        Segment::overlap_segment_circle(other.start, other.end, self.center, self.radius)
    }

    /// Whether this circle overlaps another.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        Self::overlap_circle_circle(self.center, self.radius, other.center, other.radius)
    }

    /// Whether this circle overlaps a triangle, including containment
    /// either way.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        if Triangle::contains_triangle_point(other.a, other.b, other.c, self.center) {
            return true;
        }
        self.overlap_edges(&[(other.a, other.b), (other.b, other.c), (other.c, other.a)])
    }

    /// Whether this circle overlaps a quad, including containment either
    /// way.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        if Quad::contains_quad_point(other.a, other.b, other.c, other.d, self.center) {
            return true;
        }
        self.overlap_edges(&[
            (other.a, other.b),
            (other.b, other.c),
            (other.c, other.d),
            (other.d, other.a),
        ])
    }

    /// Whether this circle overlaps a rect, including containment either
    /// way.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        if other.contains_point(self.center) {
            return true;
        }
        self.overlap_edges(&[
            (other.a(), other.b()),
            (other.b(), other.c()),
            (other.c(), other.d()),
            (other.d(), other.a()),
        ])
    }

    /// Whether this circle overlaps a polygon, including containment
    /// either way.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        if other.count() < 3 {
            return false;
        }
        if Polygon::contains_polygon_point(other.points(), self.center) {
            return true;
        }
        for i in 0..other.count() {
            if Segment::overlap_segment_circle(
                other[i],
                other[(i + 1) % other.count()],
                self.center,
                self.radius,
            ) {
                return true;
            }
        }
        false
    }

    /// Whether this circle overlaps a polyline.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        if other.count() < 3 {
            return false;
        }
        for i in 0..other.count() - 1 {
            if Segment::overlap_segment_circle(other[i], other[i + 1], self.center, self.radius) {
                return true;
            }
        }
        false
    }

    /// Whether this circle overlaps any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        others.iter().any(|segment| {
            Segment::overlap_segment_circle(segment.start, segment.end, self.center, self.radius)
        })
    }

    fn overlap_edges(&self, edges: &[(Vec2, Vec2)]) -> bool {
        edges.iter().any(|&(edge_start, edge_end)| {
            Segment::overlap_segment_circle(edge_start, edge_end, self.center, self.radius)
        })
    }
}

// Collider dispatch.
impl Circle {
    /// Intersects this circle with whatever shape `collider` holds.
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
            ColliderShape::Ray(ray) => self.intersect_ray_into(ray, points, return_after_first),
            ColliderShape::Line(line) => self.intersect_line_into(line, points, return_after_first),
            ColliderShape::Segment(segment) => {
                self.intersect_segment_into(segment, points, return_after_first)
            }
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

    /// Whether this circle overlaps whatever shape `collider` holds.
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

    /// The closest pair of points between this circle and whatever shape
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
    fn circle_math() {
        let circle = Circle::new(Vec2::ZERO, 3.0);
        assert_eq!(circle.diameter(), 6.0, "incorrect diameter");
        assert_eq!(circle.area(), 28.274334, "incorrect area");
        assert_eq!(circle.circumference(), 18.849556, "incorrect circumference");
    }

    #[test]
    fn contains_point_includes_the_boundary() {
        let circle = Circle::new(Vec2::ZERO, 2.0);
        assert!(circle.contains_point(Vec2::ZERO));
        assert!(circle.contains_point(Vec2::new(2.0, 0.0)));
        assert!(!circle.contains_point(Vec2::new(2.1, 0.0)));
    }

    #[test]
    fn separate_circles_intersect_twice() {
        let (first, second) =
            Circle::intersect_circle_circle(Vec2::ZERO, 2.0, Vec2::new(2.0, 0.0), 2.0);
        assert!(first.valid);
        assert!(second.valid);
        // Contacts sit on the vertical chord at x = 1.
        assert_relative_eq!(first.point.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(second.point.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(first.point.y + second.point.y, 0.0, epsilon = 1e-5);
    }

    #[test]
    fn distant_and_contained_circles_do_not_intersect() {
        let (first, _) =
            Circle::intersect_circle_circle(Vec2::ZERO, 1.0, Vec2::new(5.0, 0.0), 1.0);
        assert!(!first.valid);

        let (first, _) =
            Circle::intersect_circle_circle(Vec2::ZERO, 5.0, Vec2::new(1.0, 0.0), 1.0);
        assert!(!first.valid);
    }

    #[test]
    fn tangent_circles_touch_at_one_point() {
        let (first, second) =
            Circle::intersect_circle_circle(Vec2::ZERO, 1.0, Vec2::new(3.0, 0.0), 2.0);
        assert!(first.valid);
        assert!(!second.valid);
        assert_relative_eq!(first.point.x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn circle_segment_normals_come_from_the_segment() {
        let circle = Circle::new(Vec2::ZERO, 1.0);
        let segment = Segment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), false);
        let points = circle.intersect_segment(&segment).unwrap();
        assert_eq!(points.count(), 2);
        for point in points.iter() {
            // Perpendicular of the segment direction, not radial.
            assert_relative_eq!(point.normal.x, 0.0, epsilon = 1e-6);
            assert_relative_eq!(point.normal.y.abs(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn closest_point_between_circles_lies_on_the_center_line() {
        let circle1 = Circle::new(Vec2::ZERO, 1.0);
        let circle2 = Circle::new(Vec2::new(10.0, 0.0), 2.0);
        let result = circle1.closest_point_circle(&circle2);
        assert_eq!(result.self_point.point, Vec2::new(1.0, 0.0));
        assert_eq!(result.other_point.point, Vec2::new(8.0, 0.0));
        assert_relative_eq!(result.distance_squared, 49.0);
        // Symmetric the other way.
        let reverse = circle2.closest_point_circle(&circle1);
        assert_relative_eq!(reverse.distance_squared, 49.0);
    }

    #[test]
    fn circle_center_inside_triangle_overlaps_without_crossing() {
        let circle = Circle::new(Vec2::new(0.0, 1.0), 0.1);
        let triangle = Triangle::new(
            Vec2::new(-5.0, 5.0),
            Vec2::new(5.0, 5.0),
            Vec2::new(0.0, -5.0),
        );
        assert!(circle.overlap_triangle(&triangle));
        assert!(circle.intersect_triangle(&triangle).is_none());
    }

    #[test]
    fn circle_polygon_cap_is_honored() {
        // The radius sits between the square's inradius (1) and its
        // circumradius (sqrt 2), so every edge is crossed twice.
        let circle = Circle::new(Vec2::ZERO, 1.2);
        let square = Polygon::new(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ]);
        let all = circle.intersect_polygon(&square, None).unwrap();
        assert_eq!(all.count(), 8);

        let capped = circle.intersect_polygon(&square, Some(2)).unwrap();
        assert_eq!(capped.count(), 2);
    }
}
