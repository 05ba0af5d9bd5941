use glam::Vec2;

use super::edge_scan;
use super::{Circle, Line, Polyline, Quad, Ray, Rect, Segment, Segments, Triangle};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoint, CollisionPoints,
};

/// A closed polygon: an ordered vertex sequence where edge `i` runs from
/// `vertices[i]` to `vertices[(i + 1) % n]`.
///
/// A polygon needs at least 3 vertices to be valid; queries against a
/// malformed polygon yield invalid/empty results rather than panicking.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Polygon {
    points: Vec<Vec2>,
}

impl Polygon {
    /// Creates a polygon from its vertices in winding order.
    #[inline]
    pub fn new(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// The vertices in winding order.
    #[inline]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// The number of vertices.
    #[inline]
    pub fn count(&self) -> usize {
        self.points.len()
    }

    /// Whether the polygon has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the polygon has enough vertices to enclose an area.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.points.len() >= 3
    }

    /// Appends a vertex.
    #[inline]
    pub fn add(&mut self, point: Vec2) {
        self.points.push(point);
    }

    /// The boundary edges in winding order, closing back to the first
    /// vertex.
    pub(crate) fn edge_points(&self) -> Vec<(Vec2, Vec2)> {
        (0..self.points.len())
            .map(|i| (self.points[i], self.points[(i + 1) % self.points.len()]))
            .collect()
    }

    /// The boundary as segments in winding order.
    pub fn segments(&self) -> Vec<Segment> {
        self.edge_points()
            .into_iter()
            .map(|(start, end)| Segment::new(start, end, false))
            .collect()
    }

    /// The average of the vertices.
    pub fn centroid(&self) -> Vec2 {
        if self.points.is_empty() {
            return Vec2::ZERO;
        }
        self.points.iter().copied().sum::<Vec2>() / self.points.len() as f32
    }

    /// The area enclosed by the polygon (shoelace formula).
    pub fn area(&self) -> f32 {
        if self.points.len() < 3 {
            return 0.0;
        }
        let mut doubled = 0.0;
        for i in 0..self.points.len() {
            let current = self.points[i];
            let next = self.points[(i + 1) % self.points.len()];
            doubled += current.perp_dot(next);
        }
        (doubled / 2.0).abs()
    }

    /// The length of the boundary.
    pub fn perimeter(&self) -> f32 {
        if self.points.len() < 2 {
            return 0.0;
        }
        (0..self.points.len())
            .map(|i| {
                self.points[i].distance(self.points[(i + 1) % self.points.len()])
            })
            .sum()
    }

    /// The axis-aligned bounding box of the polygon.
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

    /// Whether `point` lies inside the polygon, by the even-odd rule.
    pub fn contains_polygon_point(points: &[Vec2], point: Vec2) -> bool {
        if points.len() < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = points.len() - 1;
        for i in 0..points.len() {
            let a = points[i];
            let b = points[j];
            if (a.y > point.y) != (b.y > point.y)
                && point.x < (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    /// Whether `point` lies inside this polygon.
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        Self::contains_polygon_point(&self.points, point)
    }
}

impl core::ops::Index<usize> for Polygon {
    type Output = Vec2;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        &self.points[index]
    }
}

impl FromIterator<Vec2> for Polygon {
    fn from_iter<I: IntoIterator<Item = Vec2>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

// The closest-point family. A polygon with fewer than 3 vertices yields
// the invalid default result.
impl Polygon {
    /// The closest point on the polygon's boundary to `point`, with the
    /// squared distance.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        if self.count() < 3 {
            return (CollisionPoint::INVALID, -1.0);
        }
        edge_scan::closest_point_edges_point(&self.edge_points(), point)
    }

    /// The closest pair of points between this polygon and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        if self.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_line(&self.edge_points(), other)
    }

    /// The closest pair of points between this polygon and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        if self.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_ray(&self.edge_points(), other)
    }

    /// The closest pair of points between this polygon and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        if self.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_segment(&self.edge_points(), other)
    }

    /// The closest pair of points between this polygon and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        if self.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_circle(&self.edge_points(), other)
    }

    /// The closest pair of points between this polygon and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        if self.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edges())
    }

    /// The closest pair of points between this polygon and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        if self.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edges())
    }

    /// The closest pair of points between this polygon and a rect.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        if self.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edges())
    }

    /// The closest pair of points between two polygons.
    pub fn closest_point_polygon(&self, other: &Polygon) -> ClosestPointResult {
        if self.count() < 3 || other.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// The closest pair of points between this polygon and a polyline.
    pub fn closest_point_polyline(&self, other: &Polyline) -> ClosestPointResult {
        if self.count() < 3 || other.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// The closest pair of points between this polygon and a collection of
    /// segments.
    pub fn closest_point_segments(&self, others: &Segments) -> ClosestPointResult {
        if self.count() < 3 || others.is_empty() {
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
impl Polygon {
    /// Intersects this polygon with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_line_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polygon with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_ray_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polygon with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_segment_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polygon with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_circle_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this polygon with a triangle, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_triangle(
        &self,
        other: &Triangle,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edge_points(), &other.edges(), max_points)
    }

    /// Intersects this polygon with a quad, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_quad(
        &self,
        other: &Quad,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edge_points(), &other.edges(), max_points)
    }

    /// Intersects this polygon with a rect, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_rect(
        &self,
        other: &Rect,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(&self.edge_points(), &other.edges(), max_points)
    }

    /// Intersects two polygons, optionally capped to `max_points`
    /// contacts.
    pub fn intersect_polygon(
        &self,
        other: &Polygon,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 3 || other.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(
            &self.edge_points(),
            &other.edge_points(),
            max_points,
        )
    }

    /// Intersects this polygon with a polyline, optionally capped to
    /// `max_points` contacts.
    pub fn intersect_polyline(
        &self,
        other: &Polyline,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 3 || other.count() < 3 {
            return None;
        }
        edge_scan::intersect_edges_edges_capped(
            &self.edge_points(),
            &other.edge_points(),
            max_points,
        )
    }

    /// Intersects this polygon with a collection of segments, optionally
    /// capped to `max_points` contacts.
    pub fn intersect_segments(
        &self,
        others: &Segments,
        max_points: Option<usize>,
    ) -> Option<CollisionPoints> {
        if self.count() < 3 || others.is_empty() {
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
impl Polygon {
    /// Appends line intersections into `points`.
    pub fn intersect_line_into(
        &self,
        other: &Line,
        points: &mut CollisionPoints,
        return_after_first: bool,
    ) -> usize {
        if self.count() < 3 {
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
        if self.count() < 3 {
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
        if self.count() < 3 {
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
        if self.count() < 3 {
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
        if self.count() < 3 {
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
        if self.count() < 3 {
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
        if self.count() < 3 {
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
        if self.count() < 3 || other.count() < 3 {
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
        if self.count() < 3 || other.count() < 2 {
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
        if self.count() < 3 || others.is_empty() {
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

// The overlap family.
impl Polygon {
    /// Whether this polygon overlaps a line, including an anchor inside.
    pub fn overlap_line(&self, other: &Line) -> bool {
        if self.count() < 3 {
            return false;
        }
        if self.contains_point(other.point) {
            return true;
        }
        edge_scan::overlap_edges_line(&self.edge_points(), other)
    }

    /// Whether this polygon overlaps a ray, including an anchor inside.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        if self.count() < 3 {
            return false;
        }
        if self.contains_point(other.point) {
            return true;
        }
        edge_scan::overlap_edges_ray(&self.edge_points(), other)
    }

    /// Whether this polygon overlaps a segment, including one fully
    /// inside.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        if self.count() < 3 {
            return false;
        }
        if self.contains_point(other.start) {
            return true;
        }
        edge_scan::overlap_edges_segment(&self.edge_points(), other)
    }

    /// Whether this polygon overlaps a circle, including containment
    /// either way.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        if self.count() < 3 {
            return false;
        }
        if self.contains_point(other.center) {
            return true;
        }
        edge_scan::overlap_edges_circle(&self.edge_points(), other)
    }

    /// Whether this polygon overlaps a triangle, including containment
    /// either way.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        if self.count() < 3 {
            return false;
        }
        if self.contains_point(other.a) || other.contains_point(self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edges())
    }

    /// Whether this polygon overlaps a quad, including containment either
    /// way.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        if self.count() < 3 {
            return false;
        }
        if self.contains_point(other.a) || other.contains_point(self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edges())
    }

    /// Whether this polygon overlaps a rect, including containment either
    /// way.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        if self.count() < 3 {
            return false;
        }
        if self.contains_point(other.a()) || other.contains_point(self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edges())
    }

    /// Whether two polygons overlap, including containment either way.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        if self.count() < 3 || other.count() < 3 {
            return false;
        }
        if self.contains_point(other[0]) || other.contains_point(self[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// Whether this polygon overlaps a polyline, including a chain fully
    /// inside.
    pub fn overlap_polyline(&self, other: &Polyline) -> bool {
        if self.count() < 3 || other.count() < 3 {
            return false;
        }
        if self.contains_point(other[0]) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edge_points(), &other.edge_points())
    }

    /// Whether this polygon overlaps any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        others.iter().any(|segment| self.overlap_segment(segment))
    }
}

// Collider dispatch.
impl Polygon {
    /// Intersects this polygon with whatever shape `collider` holds.
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

    /// Whether this polygon overlaps whatever shape `collider` holds.
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

    /// The closest pair of points between this polygon and whatever shape
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

    fn square() -> Polygon {
        Polygon::new(vec![
            Vec2::new(-1.0, -1.0),
            Vec2::new(1.0, -1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(-1.0, 1.0),
        ])
    }

    #[test]
    fn polygon_math() {
        let square = square();
        assert_eq!(square.area(), 4.0);
        assert_eq!(square.perimeter(), 8.0);
        assert_eq!(square.centroid(), Vec2::ZERO);
        assert_eq!(
            square.bounding_box(),
            Rect::from_points(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0))
        );
    }

    #[test]
    fn even_odd_containment() {
        let square = square();
        assert!(square.contains_point(Vec2::ZERO));
        assert!(!square.contains_point(Vec2::new(2.0, 0.0)));

        // A concave L-shape: the notch is outside.
        let l_shape = Polygon::new(vec![
            Vec2::new(0.0, 0.0),
            Vec2::new(4.0, 0.0),
            Vec2::new(4.0, 2.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(2.0, 4.0),
            Vec2::new(0.0, 4.0),
        ]);
        assert!(l_shape.contains_point(Vec2::new(1.0, 1.0)));
        assert!(l_shape.contains_point(Vec2::new(1.0, 3.0)));
        assert!(!l_shape.contains_point(Vec2::new(3.0, 3.0)));
    }

    #[test]
    fn malformed_polygon_yields_no_geometry() {
        let degenerate = Polygon::new(vec![Vec2::ZERO, Vec2::ONE]);
        let line = Line::new(Vec2::ZERO, Vec2::X, false);

        assert!(!degenerate.is_valid());
        assert!(degenerate.intersect_line(&line).is_none());
        assert!(!degenerate.overlap_line(&line));
        let result = degenerate.closest_point_line(&line);
        assert!(!result.is_valid());
    }

    #[test]
    fn polygon_polygon_intersections_in_discovery_order() {
        let moved = Polygon::new(vec![
            Vec2::new(0.0, -1.0),
            Vec2::new(2.0, -1.0),
            Vec2::new(2.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);
        let points = square().intersect_polygon(&moved, None).unwrap();
        assert_eq!(points.count(), 4);

        let capped = square().intersect_polygon(&moved, Some(2)).unwrap();
        assert_eq!(capped.count(), 2);
    }

    #[test]
    fn closest_point_between_separated_squares() {
        let left = square();
        let right = Polygon::new(vec![
            Vec2::new(3.0, -1.0),
            Vec2::new(5.0, -1.0),
            Vec2::new(5.0, 1.0),
            Vec2::new(3.0, 1.0),
        ]);
        let result = left.closest_point_polygon(&right);
        assert!(result.is_valid());
        assert_relative_eq!(result.distance_squared, 4.0, epsilon = 1e-5);
        assert_relative_eq!(result.self_point.point.x, 1.0, epsilon = 1e-5);
        assert_relative_eq!(result.other_point.point.x, 3.0, epsilon = 1e-5);
        assert!(result.self_segment_index >= 0);
        assert!(result.other_segment_index >= 0);
    }

    #[test]
    fn nested_polygons_overlap_without_crossing() {
        let outer = square();
        let inner = Polygon::new(vec![
            Vec2::new(-0.5, -0.5),
            Vec2::new(0.5, -0.5),
            Vec2::new(0.5, 0.5),
            Vec2::new(-0.5, 0.5),
        ]);
        assert!(outer.overlap_polygon(&inner));
        assert!(inner.overlap_polygon(&outer));
        assert!(outer.intersect_polygon(&inner, None).is_none());
    }
}
