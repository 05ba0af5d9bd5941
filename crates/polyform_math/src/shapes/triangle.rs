use glam::Vec2;

use super::edge_scan;
use super::{Circle, Line, Polygon, Polyline, Quad, Ray, Rect, Segment, Segments};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoints,
};

/// A triangle given by three vertices in winding order, with edges `a-b`,
/// `b-c`, `c-a`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Triangle {
    /// The first vertex.
    pub a: Vec2,
    /// The second vertex.
    pub b: Vec2,
    /// The third vertex.
    pub c: Vec2,
}

impl Triangle {
    /// Creates a triangle from three vertices.
    #[inline(always)]
    pub const fn new(a: Vec2, b: Vec2, c: Vec2) -> Self {
        Self { a, b, c }
    }

    /// The vertices in winding order.
    #[inline]
    pub fn vertices(&self) -> [Vec2; 3] {
        [self.a, self.b, self.c]
    }

    /// The edges in winding order.
    #[inline]
    pub(crate) fn edges(&self) -> [(Vec2, Vec2); 3] {
        [(self.a, self.b), (self.b, self.c), (self.c, self.a)]
    }

    /// The boundary as segments in winding order.
    #[inline]
    pub fn segments(&self) -> [Segment; 3] {
        [
            Segment::new(self.a, self.b, false),
            Segment::new(self.b, self.c, false),
            Segment::new(self.c, self.a, false),
        ]
    }

    /// The centroid of the triangle.
    #[inline]
    pub fn centroid(&self) -> Vec2 {
        (self.a + self.b + self.c) / 3.0
    }

    /// The area of the triangle.
    #[inline]
    pub fn area(&self) -> f32 {
        ((self.b - self.a).perp_dot(self.c - self.a) / 2.0).abs()
    }

    /// The perimeter of the triangle.
    #[inline]
    pub fn perimeter(&self) -> f32 {
        self.a.distance(self.b) + self.b.distance(self.c) + self.c.distance(self.a)
    }

    /// Whether the triangle has nonzero area.
    #[inline]
    pub fn is_valid(&self) -> bool {
        (self.b - self.a).perp_dot(self.c - self.a).abs() > f32::EPSILON
    }

    /// The axis-aligned bounding box of the triangle.
    pub fn bounding_box(&self) -> Rect {
        Rect::from_points(self.a, self.b).enclosing_point(self.c)
    }

    /// Whether `point` lies inside or on the triangle, for either winding.
    pub fn contains_triangle_point(a: Vec2, b: Vec2, c: Vec2, point: Vec2) -> bool {
        let sign_ab = (b - a).perp_dot(point - a);
        let sign_bc = (c - b).perp_dot(point - b);
        let sign_ca = (a - c).perp_dot(point - c);

        let has_negative = sign_ab < 0.0 || sign_bc < 0.0 || sign_ca < 0.0;
        let has_positive = sign_ab > 0.0 || sign_bc > 0.0 || sign_ca > 0.0;
        !(has_negative && has_positive)
    }

    /// Whether `point` lies inside or on this triangle.
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        Self::contains_triangle_point(self.a, self.b, self.c, point)
    }
}

// The closest-point family.
impl Triangle {
    /// The closest point on the triangle's boundary to `point`, with the
    /// squared distance.
    pub fn closest_point(&self, point: Vec2) -> (crate::collision::CollisionPoint, f32) {
        edge_scan::closest_point_edges_point(&self.edges(), point)
    }

    /// The closest pair of points between this triangle and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        edge_scan::closest_point_edges_line(&self.edges(), other)
    }

    /// The closest pair of points between this triangle and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        edge_scan::closest_point_edges_ray(&self.edges(), other)
    }

    /// The closest pair of points between this triangle and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        edge_scan::closest_point_edges_segment(&self.edges(), other)
    }

    /// The closest pair of points between this triangle and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        edge_scan::closest_point_edges_circle(&self.edges(), other)
    }

    /// The closest pair of points between this triangle and another.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edges())
    }

    /// The closest pair of points between this triangle and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edges())
    }

    /// The closest pair of points between this triangle and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edges())
    }

    /// The closest pair of points between this triangle and a polygon.
    pub fn closest_point_polygon(&self, other: &Polygon) -> ClosestPointResult {
        if other.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edge_points())
    }

    /// The closest pair of points between this triangle and a polyline.
    pub fn closest_point_polyline(&self, other: &Polyline) -> ClosestPointResult {
        if other.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edge_points())
    }

    /// The closest pair of points between this triangle and a collection
    /// of segments.
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
}

// The intersection family.
impl Triangle {
    /// Intersects this triangle with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_line_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this triangle with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_ray_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this triangle with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_segment_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this triangle with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_circle_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this triangle with another.
    pub fn intersect_triangle(&self, other: &Triangle) -> Option<CollisionPoints> {
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edges(), None)
    }

    /// Intersects this triangle with a quad.
    pub fn intersect_quad(&self, other: &Quad) -> Option<CollisionPoints> {
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edges(), None)
    }

    /// Intersects this triangle with a rect.
    pub fn intersect_rect(&self, other: &Rect) -> Option<CollisionPoints> {
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edges(), None)
    }

    /// Intersects this triangle with a polygon, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polygon(
        &self,
        other: &Polygon,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if other.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edge_points(), max_points)
    }

    /// Intersects this triangle with a polyline, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polyline(
        &self,
        other: &Polyline,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if other.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edge_points(), max_points)
    }

    /// Intersects this triangle with a collection of segments, optionally
    /// capped to `max_points` contacts.
    pub fn intersect_segments(
        &self,
        others: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if others.is_empty() {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edges(), &others.edge_points(), max_points)
    }
}

// Accumulator overloads.
impl Triangle {
    /// Appends line intersections into `points`.
    pub fn intersect_line_into(
        &self,
        other: &Line,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        edge_scan::intersect_edges_line_into(&self.edges(), other, points, return_after_first)
    }

    /// Appends ray intersections into `points`.
    pub fn intersect_ray_into(
        &self,
        other: &Ray,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        edge_scan::intersect_edges_ray_into(&self.edges(), other, points, return_after_first)
    }

    /// Appends segment intersections into `points`.
    pub fn intersect_segment_into(
        &self,
        other: &Segment,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        edge_scan::intersect_edges_segment_into(&self.edges(), other, points, return_after_first)
    }

    /// Appends circle intersections into `points`.
    pub fn intersect_circle_into(
        &self,
        other: &Circle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        edge_scan::intersect_edges_circle_into(&self.edges(), other, points, return_after_first)
    }

    /// Appends triangle intersections into `points`.
    pub fn intersect_triangle_into(
        &self,
        other: &Triangle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        edge_scan::intersect_edges_edges_into(
            &self.edges(),
            &other.edges(),
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
        edge_scan::intersect_edges_edges_into(
            &self.edges(),
            &other.edges(),
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
        edge_scan::intersect_edges_edges_into(
            &self.edges(),
            &other.edges(),
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
        edge_scan::intersect_edges_edges_into(
            &self.edges(),
            &other.edge_points(),
            points,
            return_after_first,
        )
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
        edge_scan::intersect_edges_edges_into(
            &self.edges(),
            &other.edge_points(),
            points,
            return_after_first,
        )
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
        edge_scan::intersect_edges_edges_into(
            &self.edges(),
            &others.edge_points(),
            points,
            return_after_first,
        )
    }
}

// The overlap family.
impl Triangle {
    /// Whether this triangle overlaps a line, including an anchor inside.
    pub fn overlap_line(&self, other: &Line) -> bool {
        if self.contains_point(other.point) {
            return true;
        }
        edge_scan::overlap_edges_line(&self.edges(), other)
    }

    /// Whether this triangle overlaps a ray, including an anchor inside.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        if self.contains_point(other.point) {
            return true;
        }
        edge_scan::overlap_edges_ray(&self.edges(), other)
    }

    /// Whether this triangle overlaps a segment, including one fully
    /// inside.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        if self.contains_point(other.start) {
            return true;
        }
        edge_scan::overlap_edges_segment(&self.edges(), other)
    }

    /// Whether this triangle overlaps a circle, including containment
    /// either way.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        if self.contains_point(other.center) {
            return true;
        }
        edge_scan::overlap_edges_circle(&self.edges(), other)
    }

    /// Whether this triangle overlaps another, including containment
    /// either way.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        if self.contains_point(other.a) || other.contains_point(self.a) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edges())
    }

    /// Whether this triangle overlaps a quad, including containment either
    /// way.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        if self.contains_point(other.a) || other.contains_point(self.a) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edges())
    }

    /// Whether this triangle overlaps a rect, including containment either
    /// way.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        if self.contains_point(other.a()) || other.contains_point(self.a) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edges())
    }

    /// Whether this triangle overlaps a polygon, including containment
    /// either way.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        if other.count() < 3 {
            return false;
        }
        if self.contains_point(other[0])
            || Polygon::contains_polygon_point(other.points(), self.a)
        {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edge_points())
    }

    /// Whether this triangle overlaps a polyline, including a chain fully
    /// inside.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        if other.count() < 3 {
            return false;
        }
        if self.contains_point(other[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edge_points())
    }

    /// Whether this triangle overlaps any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        others.iter().any(|segment| self.overlap_segment(segment))
    }
}

// Collider dispatch.
impl Triangle {
    /// Intersects this triangle with whatever shape `collider` holds.
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

    /// Whether this triangle overlaps whatever shape `collider` holds.
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

    /// The closest pair of points between this triangle and whatever shape
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

    fn triangle() -> Triangle {
        Triangle::new(
            Vec2::new(-2.0, -1.0),
            Vec2::new(1.0, 4.0),
            Vec2::new(7.0, 0.0),
        )
    }

    #[test]
    fn triangle_math() {
        let triangle = triangle();
        assert_eq!(triangle.area(), 21.0, "incorrect area");
        assert_eq!(triangle.perimeter(), 22.097439, "incorrect perimeter");

        let degenerate = Triangle::new(
            Vec2::new(-1.0, 0.0),
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
        );
        assert!(!degenerate.is_valid());
    }

    #[test]
    fn contains_point_handles_both_windings() {
        let ccw = Triangle::new(Vec2::new(-1.0, 0.0), Vec2::new(1.0, 0.0), Vec2::new(0.0, 2.0));
        let cw = Triangle::new(Vec2::new(-1.0, 0.0), Vec2::new(0.0, 2.0), Vec2::new(1.0, 0.0));
        let inside = Vec2::new(0.0, 0.5);
        let outside = Vec2::new(0.0, 3.0);
        assert!(ccw.contains_point(inside));
        assert!(cw.contains_point(inside));
        assert!(!ccw.contains_point(outside));
        assert!(!cw.contains_point(outside));
    }

    #[test]
    fn segment_through_triangle_intersects_twice() {
        let triangle =
            Triangle::new(Vec2::new(-2.0, 2.0), Vec2::new(2.0, 2.0), Vec2::new(0.0, -2.0));
        let segment = Segment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), false);
        let points = triangle.intersect_segment(&segment).unwrap();
        assert_eq!(points.count(), 2);
    }

    #[test]
    fn intersection_implies_zero_closest_distance() {
        let triangle =
            Triangle::new(Vec2::new(-2.0, 2.0), Vec2::new(2.0, 2.0), Vec2::new(0.0, -2.0));
        let segment = Segment::new(Vec2::new(-5.0, 0.0), Vec2::new(5.0, 0.0), false);
        assert!(triangle.intersect_segment(&segment).is_some());
        let result = triangle.closest_point_segment(&segment);
        assert_eq!(result.distance_squared, 0.0);
    }

    #[test]
    fn closest_point_between_disjoint_triangles_records_indices() {
        let left = Triangle::new(
            Vec2::new(-3.0, -1.0),
            Vec2::new(-1.0, 0.0),
            Vec2::new(-3.0, 1.0),
        );
        let right = Triangle::new(
            Vec2::new(1.0, 0.0),
            Vec2::new(3.0, -1.0),
            Vec2::new(3.0, 1.0),
        );
        let result = left.closest_point_triangle(&right);
        assert!(result.is_valid());
        assert_relative_eq!(result.distance_squared, 4.0, epsilon = 1e-5);
        assert_eq!(result.self_point.point, Vec2::new(-1.0, 0.0));
        assert_eq!(result.other_point.point, Vec2::new(1.0, 0.0));
        assert!(result.self_segment_index >= 0);
        assert!(result.other_segment_index >= 0);

        // Distance is symmetric when queried the other way.
        let reverse = right.closest_point_triangle(&left);
        assert_relative_eq!(
            reverse.distance_squared,
            result.distance_squared,
            epsilon = 1e-6
        );
    }

    #[test]
    fn contained_circle_overlaps_without_contacts() {
        let triangle =
            Triangle::new(Vec2::new(-5.0, 5.0), Vec2::new(5.0, 5.0), Vec2::new(0.0, -5.0));
        let circle = Circle::new(Vec2::new(0.0, 1.0), 0.5);
        assert!(triangle.overlap_circle(&circle));
        assert!(triangle.intersect_circle(&circle).is_none());
    }
}
