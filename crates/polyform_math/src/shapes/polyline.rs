use glam::Vec2;

use super::edge_scan;
use super::{Circle, Line, Polygon, Quad, Ray, Rect, Segment, Segments, Triangle};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoint, CollisionPoints,
};

/// An open chain of vertices: edge `i` runs from `vertices[i]` to
/// `vertices[i + 1]`, and the chain does not close.
///
/// A polyline needs at least 2 vertices to be valid. Being open, it has no
/// interior; overlap is purely a boundary-crossing question.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Polyline {
    points: Vec<Vec2>,
}

impl Polyline {
    /// Creates a polyline from its vertices in order.
    #[inline]
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// The vertices in order.
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// The number of vertices.
    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Whether the polyline has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polyline has at least one edge.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 2
    }

    /// Appends a vertex.
    #[inline]
    pub fn add(&mut self, point: Vec2) {
        self.points.push(point);
    }

    /// The chain's edges in order.
    pub(crate) fn edge_points(&self) -> Vec<(Vec2, Vec2)> {
        (0..self.points.len().saturating_sub(1))
            .map(|i| (self.points[i], self.points[i + 1]))
            .collect()
    }

    /// The chain as segments in order.
    pub fn segments(&self) -> Vec<Segment> {
        self.edge_points()
            .into_iter()
            .map(|(start, end)| Segment::new(start, end, false))
            .collect()
    }

    /// The total length of the chain.
    pub fn length(&self) -> f32 {
        if self.points.len() < 2 {
            return 0.0;
        }
        (0..self.points.len() - 1)
            .map(|i| self.points[i].distance(self.points[i + 1]))
            .sum()
    }

    /// The axis-aligned bounding box of the chain.
    pub fn bounding_box(&self) -> Rect {
        if self.points.is_empty() {
            return Rect::default();
        }
        let mut rect = Rect::from_points(self.points[0], self.points[0]);
        for &point in &self.points[1..] {
            rect = rect.enclosing_point(point);
        }
        rect
    }
}

impl core::ops::Index<usize> for Polyline {
    type Output = Vec2;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl FromIterator<Vec2> for Polyline {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

// The closest-point family. A polyline with fewer than 2 vertices yields
// the invalid default result.
impl Polyline {
    /// The closest point on the chain to `point`, with the squared
    /// distance.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        if self.count() < 2 {
            return (CollisionPoint::INVALID, -1.0);
        }
        edge_scan::closest_point_edges_point(&self.edge_points(), point)
    }

    /// The closest pair of points between this polyline and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        if self.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_line(&self.edge_points(), other)
    }

    /// The closest pair of points between this polyline and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        if self.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_ray(&self.edge_points(), other)
    }

    /// The closest pair of points between this polyline and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        if self.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_segment(&self.edge_points(), other)
    }

    /// The closest pair of points between this polyline and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        if self.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_circle(&self.edge_points(), other)
    }

    /// The closest pair of points between this polyline and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        if self.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edges())
    }

    /// The closest pair of points between this polyline and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        if self.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edges())
    }

    /// The closest pair of points between this polyline and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        if self.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edges())
    }

    /// The closest pair of points between this polyline and a polygon.
    pub fn closest_point_polygon(&self, other: &Polygon) -> ClosestPointResult {
        if self.count() < 2 || other.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// The closest pair of points between two polylines.
    pub fn closest_point_polyline(&self, other: &Polyline) -> ClosestPointResult {
        if self.count() < 2 || other.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// The closest pair of points between this polyline and a collection
    /// of segments.
    pub fn closest_point_segments(&self, others: &Segments) -> ClosestPointResult {
        if self.count() < 2 || others.is_empty() {
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
impl Polyline {
    /// Intersects this polyline with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_line_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polyline with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_ray_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polyline with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_segment_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polyline with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_circle_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polyline with a triangle, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_triangle(
        &self,
        other: &Triangle,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 2 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edge_points(), &other.edges(), max_points)
    }

    /// Intersects this polyline with a quad, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_quad(
        &self,
        other: &Quad,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 2 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edge_points(), &other.edges(), max_points)
    }

    /// Intersects this polyline with a rect, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_rect(
        &self,
        other: &Rect,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 2 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edge_points(), &other.edges(), max_points)
    }

    /// Intersects this polyline with a polygon, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polygon(
        &self,
        other: &Polygon,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 2 || other.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(
            &self.edge_points(),
            &other.edge_points(),
            max_points,
        )
    }

    /// Intersects two polylines, optionally capped to `max_points`
    /// contacts.
    pub fn intersect_polyline(
        &self,
        other: &Polyline,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 2 || other.count() < 2 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(
            &self.edge_points(),
            &other.edge_points(),
            max_points,
        )
    }

    /// Intersects this polyline with a collection of segments, optionally
    /// capped to `max_points` contacts.
    pub fn intersect_segments(
        &self,
        others: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 2 || others.is_empty() {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(
            &self.edge_points(),
            &others.edge_points(),
            max_points,
        )
    }
}

// Accumulator overloads.
impl Polyline {
    /// Appends line intersections into `points`.
    pub fn intersect_line_into(
        &self,
        other: &Line,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if self.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_line_into(&self.edge_points(), other, points, return_after_first)
    }

    /// Appends ray intersections into `points`.
    pub fn intersect_ray_into(
        &self,
        other: &Ray,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if self.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_ray_into(&self.edge_points(), other, points, return_after_first)
    }

    /// Appends segment intersections into `points`.
    pub fn intersect_segment_into(
        &self,
        other: &Segment,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if self.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_segment_into(
            &self.edge_points(),
            other,
            points,
            return_after_first,
        )
    }

    /// Appends circle intersections into `points`.
    pub fn intersect_circle_into(
        &self,
        other: &Circle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if self.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_circle_into(
            &self.edge_points(),
            other,
            points,
            return_after_first,
        )
    }

    /// Appends triangle intersections into `points`.
    pub fn intersect_triangle_into(
        &self,
        other: &Triangle,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if self.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_edges_into(
            &self.edge_points(),
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
        if self.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_edges_into(
            &self.edge_points(),
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
        if self.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_edges_into(
            &self.edge_points(),
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
        if self.count() < 2 || other.count() < 3 {
            return 0;
        }
        edge_scan::intersect_edges_edges_into(
            &self.edge_points(),
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
        if self.count() < 2 || other.count() < 2 {
            return 0;
        }
        edge_scan::intersect_edges_edges_into(
            &self.edge_points(),
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
        if self.count() < 2 || others.is_empty() {
            return 0;
        }
        edge_scan::intersect_edges_edges_into(
            &self.edge_points(),
            &others.edge_points(),
            points,
            return_after_first,
        )
    }
}

// The overlap family. The chain has no interior, so overlap never
// consults containment of the polyline itself.
impl Polyline {
    /// Whether this polyline crosses a line.
    pub fn overlap_line(&self, other: &Line) -> bool {
        if self.count() < 2 {
            return false;
        }
        edge_scan::overlap_edges_line(&self.edge_points(), other)
    }

    /// Whether this polyline crosses a ray.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        if self.count() < 2 {
            return false;
        }
        edge_scan::overlap_edges_ray(&self.edge_points(), other)
    }

    /// Whether this polyline crosses a segment.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        if self.count() < 2 {
            return false;
        }
        edge_scan::overlap_edges_segment(&self.edge_points(), other)
    }

    /// Whether this polyline touches a circle.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        if self.count() < 2 {
            return false;
        }
        edge_scan::overlap_edges_circle(&self.edge_points(), other)
    }

    /// Whether this polyline overlaps a triangle, including a chain fully
    /// inside it.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        if self.count() < 2 {
            return false;
        }
        if other.contains_point(self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edges())
    }

    /// Whether this polyline overlaps a quad, including a chain fully
    /// inside it.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        if self.count() < 2 {
            return false;
        }
        if other.contains_point(self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edges())
    }

    /// Whether this polyline overlaps a rect, including a chain fully
    /// inside it.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        if self.count() < 2 {
            return false;
        }
        if other.contains_point(self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edges())
    }

    /// Whether this polyline overlaps a polygon, including a chain fully
    /// inside it.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        if self.count() < 2 || other.count() < 3 {
            return false;
        }
        if Polygon::contains_polygon_point(other.points(), self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// Whether two polylines cross.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        if self.count() < 2 || other.count() < 2 {
            return false;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// Whether this polyline crosses any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        others.iter().any(|segment| self.overlap_segment(segment))
    }
}

// Collider dispatch.
impl Polyline {
    /// Intersects this polyline with whatever shape `collider` holds.
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
            ColliderShape::Triangle(triangle) => self.intersect_triangle(triangle, None),
            ColliderShape::Rect(rect) => self.intersect_rect(rect, None),
            ColliderShape::Quad(quad) => self.intersect_quad(quad, None),
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

    /// Whether this polyline overlaps whatever shape `collider` holds.
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

    /// The closest pair of points between this polyline and whatever shape
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

    fn zigzag() -> Polyline {
        Polyline::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(3.0, 1.0),
        ])
    }

    #[test]
    fn length_sums_the_edges() {
        let chain = Polyline::new(vec![Vec2::ZERO, Vec2::new(3.0, 0.0), Vec2::new(3.0, 4.0)]);
        assert_relative_eq!(chain.length(), 7.0);
        assert_eq!(chain.segments().len(), 2);
    }

    #[test]
    fn single_vertex_chain_is_invalid() {
        let chain = Polyline::new(vec![Vec2::ZERO]);
        assert!(!chain.is_valid());
        assert!(!chain.overlap_line(&Line::new(Vec2::ZERO, Vec2::X, false)));
        let (point, _) = chain.closest_point(Vec2::ONE);
        assert!(!point.valid);
    }

    #[test]
    fn line_through_zigzag_hits_every_edge() {
        let line = Line::new(Vec2::new(0.0, 0.5), Vec2::X, false);
        let points = zigzag().intersect_line(&line).unwrap();
        assert_eq!(points.count(), 3);
        // Discovery order follows the chain.
        assert!(points[0].point.x < points[1].point.x);
        assert!(points[1].point.x < points[2].point.x);
    }

    #[test]
    fn chain_inside_polygon_overlaps_without_crossing() {
        let chain = Polyline::new(vec![Vec2::new(-0.5, 0.0), Vec2::new(0.5, 0.0)]);
        let square = Polygon::new(vec![
            Vec2::new(-2.0, -2.0),
            Vec2::new(2.0, -2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(-2.0, 2.0),
        ]);
        assert!(chain.overlap_polygon(&square));
        assert!(chain.intersect_polygon(&square, None).is_none());
    }

    #[test]
    fn closest_point_reports_the_nearest_edge() {
        let chain = zigzag();
        let circle = Circle::new(Vec2::new(1.0, 5.0), 1.0);
        let result = chain.closest_point_circle(&circle);
        assert!(result.is_valid());
        assert_eq!(result.self_point.point, Vec2::new(1.0, 1.0));
        assert_relative_eq!(result.distance_squared, 9.0, epsilon = 1e-5);
    }
}
