use glam::Vec2;

use super::edge_scan;
use super::{Circle, Line, Polygon, Polyline, Quad, Ray, Segment, Segments, Triangle};
use crate::collision::{
    ClosestPointResult, Collider, ColliderShape, CollisionPoint, CollisionPoints,
};

/// An axis-aligned rectangle in y-down screen coordinates.
///
/// The corner accessors [`a`](Rect::a), [`b`](Rect::b), [`c`](Rect::c),
/// [`d`](Rect::d) traverse top-left, bottom-left, bottom-right, top-right,
/// which is the winding order every edge scan uses.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    /// The x coordinate of the left edge.
    pub x: f32,
    /// The y coordinate of the top edge.
    pub y: f32,
    /// The width of the rect.
    pub width: f32,
    /// The height of the rect.
    pub height: f32,
}

impl Rect {
    /// Creates a rect from its top-left corner and size.
    #[inline(always)]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates the smallest rect containing both points.
    #[inline]
    pub fn from_points(point1: Vec2, point2: Vec2) -> Self {
        let top_left = point1.min(point2);
        let size = (point2 - point1).abs();
        Self {
            x: top_left.x,
            y: top_left.y,
            width: size.x,
            height: size.y,
        }
    }

    /// Creates a rect from its center and size.
    #[inline]
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        Self {
            x: center.x - size.x / 2.0,
            y: center.y - size.y / 2.0,
            width: size.x,
            height: size.y,
        }
    }

    /// The top-left corner.
    #[inline(always)]
    pub fn top_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// The bottom-left corner.
    #[inline(always)]
    pub fn bottom_left(&self) -> Vec2 {
        Vec2::new(self.x, self.y + self.height)
    }

    /// The bottom-right corner.
    #[inline(always)]
    pub fn bottom_right(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y + self.height)
    }

    /// The top-right corner.
    #[inline(always)]
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.x + self.width, self.y)
    }

    /// The first corner in winding order (top-left).
    #[inline(always)]
    pub fn a(&self) -> Vec2 {
        self.top_left()
    }

    /// The second corner in winding order (bottom-left).
    #[inline(always)]
    pub fn b(&self) -> Vec2 {
        self.bottom_left()
    }

    /// The third corner in winding order (bottom-right).
    #[inline(always)]
    pub fn c(&self) -> Vec2 {
        self.bottom_right()
    }

    /// The fourth corner in winding order (top-right).
    #[inline(always)]
    pub fn d(&self) -> Vec2 {
        self.top_right()
    }

    /// The center of the rect.
    #[inline]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// The size of the rect.
    #[inline]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// The area of the rect.
    #[inline]
    pub fn area(&self) -> f32 {
        self.width * self.height
    }

    /// Whether the rect has positive extent on both axes.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// The corners as a [`Quad`] in winding order.
    #[inline]
    pub fn to_quad(&self) -> Quad {
        Quad::new(self.a(), self.b(), self.c(), self.d())
    }

    #[inline]
    pub(crate) fn edges(&self) -> [(Vec2, Vec2); 4] {
        [
            (self.a(), self.b()),
            (self.b(), self.c()),
            (self.c(), self.d()),
            (self.d(), self.a()),
        ]
    }

    /// The boundary as segments in winding order.
    #[inline]
    pub fn segments(&self) -> [Segment; 4] {
        [
            Segment::new(self.a(), self.b(), false),
            Segment::new(self.b(), self.c(), false),
            Segment::new(self.c(), self.d(), false),
            Segment::new(self.d(), self.a(), false),
        ]
    }

    /// The smallest rect containing this rect and `point`.
    #[must_use]
    pub fn enclosing_point(&self, point: Vec2) -> Self {
        let top_left = self.top_left().min(point);
        let bottom_right = self.bottom_right().max(point);
        Self::from_points(top_left, bottom_right)
    }

    /// The smallest rect containing both rects.
    #[must_use]
    pub fn union(&self, other: &Rect) -> Self {
        Self::from_points(
            self.top_left().min(other.top_left()),
            self.bottom_right().max(other.bottom_right()),
        )
    }

    /// Whether `point` lies inside or on this rect.
    #[inline]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Whether `other` lies entirely inside this rect.
    #[inline]
    pub fn contains_rect(&self, other: &Rect) -> bool {
        self.contains_point(other.top_left()) && self.contains_point(other.bottom_right())
    }
}

// The closest-point family.
impl Rect {
    /// The closest point on the rect's boundary to `point`, with the
    /// squared distance.
    pub fn closest_point(&self, point: Vec2) -> (CollisionPoint, f32) {
        edge_scan::closest_point_edges_point(&self.edges(), point)
    }

    /// The closest pair of points between this rect and a line.
    pub fn closest_point_line(&self, other: &Line) -> ClosestPointResult {
        edge_scan::closest_point_edges_line(&self.edges(), other)
    }

    /// The closest pair of points between this rect and a ray.
    pub fn closest_point_ray(&self, other: &Ray) -> ClosestPointResult {
        edge_scan::closest_point_edges_ray(&self.edges(), other)
    }

    /// The closest pair of points between this rect and a segment.
    pub fn closest_point_segment(&self, other: &Segment) -> ClosestPointResult {
        edge_scan::closest_point_edges_segment(&self.edges(), other)
    }

    /// The closest pair of points between this rect and a circle.
    pub fn closest_point_circle(&self, other: &Circle) -> ClosestPointResult {
        edge_scan::closest_point_edges_circle(&self.edges(), other)
    }

    /// The closest pair of points between this rect and a triangle.
    pub fn closest_point_triangle(&self, other: &Triangle) -> ClosestPointResult {
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edges())
    }

    /// The closest pair of points between this rect and a quad.
    pub fn closest_point_quad(&self, other: &Quad) -> ClosestPointResult {
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edges())
    }

    /// The closest pair of points between this rect and another.
    pub fn closest_point_rect(&self, other: &Rect) -> ClosestPointResult {
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edges())
    }

    /// The closest pair of points between this rect and a polygon.
    pub fn closest_point_polygon(&self, other: &Polygon) -> ClosestPointResult {
        if other.count() < 3 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edge_points())
    }

    /// The closest pair of points between this rect and a polyline.
    pub fn closest_point_polyline(&self, other: &Polyline) -> ClosestPointResult {
        if other.count() < 2 {
            return ClosestPointResult::default();
        }
        edge_scan::closest_point_edges_edges(&self.edges(), &other.edge_points())
    }

    /// The closest pair of points between this rect and a collection of
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
}

// The intersection family.
impl Rect {
    /// Intersects this rect with a line.
    pub fn intersect_line(&self, other: &Line) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_line_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this rect with a ray.
    pub fn intersect_ray(&self, other: &Ray) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_ray_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this rect with a segment.
    pub fn intersect_segment(&self, other: &Segment) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_segment_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this rect with a circle.
    pub fn intersect_circle(&self, other: &Circle) -> Option<CollisionPoints> {
        let mut points = CollisionPoints::new();
        if self.intersect_circle_into(other, &mut points, false) > 0 {
            Some(points)
        } else {
            None
        }
    }

    /// Intersects this rect with a triangle.
    pub fn intersect_triangle(&self, other: &Triangle) -> Option<CollisionPoints> {
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edges(), None)
    }

    /// Intersects this rect with a quad.
    pub fn intersect_quad(&self, other: &Quad) -> Option<CollisionPoints> {
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edges(), None)
    }

    /// Intersects this rect with another.
    pub fn intersect_rect(&self, other: &Rect) -> Option<CollisionPoints> {
        edge_scan::intersect_edges_edges_capped(&self.edges(), &other.edges(), None)
    }

    /// Intersects this rect with a polygon, optionally capped to
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

    /// Intersects this rect with a polyline, optionally capped to
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

    /// Intersects this rect with a collection of segments, optionally
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
impl Rect {
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
impl Rect {
    /// Whether this rect overlaps a line, including an anchor inside.
    pub fn overlap_line(&self, other: &Line) -> bool {
        if self.contains_point(other.point) {
            return true;
        }
        edge_scan::overlap_edges_line(&self.edges(), other)
    }

    /// Whether this rect overlaps a ray, including an anchor inside.
    pub fn overlap_ray(&self, other: &Ray) -> bool {
        if self.contains_point(other.point) {
            return true;
        }
        edge_scan::overlap_edges_ray(&self.edges(), other)
    }

    /// Whether this rect overlaps a segment, including one fully inside.
    pub fn overlap_segment(&self, other: &Segment) -> bool {
        if self.contains_point(other.start) {
            return true;
        }
        edge_scan::overlap_edges_segment(&self.edges(), other)
    }

    /// Whether this rect overlaps a circle, including containment either
    /// way.
    pub fn overlap_circle(&self, other: &Circle) -> bool {
        if self.contains_point(other.center) {
            return true;
        }
        edge_scan::overlap_edges_circle(&self.edges(), other)
    }

    /// Whether this rect overlaps a triangle, including containment either
    /// way.
    pub fn overlap_triangle(&self, other: &Triangle) -> bool {
        if self.contains_point(other.a) || other.contains_point(self.a()) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edges())
    }

    /// Whether this rect overlaps a quad, including containment either
    /// way.
    pub fn overlap_quad(&self, other: &Quad) -> bool {
        if self.contains_point(other.a) || other.contains_point(self.a()) {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edges())
    }

    /// Whether two rects overlap. Axis-aligned rects compare extents
    /// directly.
    pub fn overlap_rect(&self, other: &Rect) -> bool {
        self.x <= other.x + other.width
            && self.x + self.width >= other.x
            && self.y <= other.y + other.height
            && self.y + self.height >= other.y
    }

    /// Whether this rect overlaps a polygon, including containment either
    /// way.
    pub fn overlap_polygon(&self, other: &Polygon) -> bool {
        if other.count() < 3 {
            return false;
        }
        if self.contains_point(other[0])
            || Polygon::contains_polygon_point(other.points(), self.a())
        {
            return true;
        }
        edge_scan::overlap_edges_edges(&self.edges(), &other.edge_points())
    }

    /// Whether this rect overlaps a polyline, including a chain fully
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

    /// Whether this rect overlaps any segment of a collection.
    pub fn overlap_segments(&self, others: &Segments) -> bool {
        others.iter().any(|segment| self.overlap_segment(segment))
    }
}

// Collider dispatch.
impl Rect {
    /// Intersects this rect with whatever shape `collider` holds. Disabled
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

    /// Whether this rect overlaps whatever shape `collider` holds.
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

    /// The closest pair of points between this rect and whatever shape
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
    fn corners_follow_the_winding_order() {
        let rect = Rect::new(1.0, 2.0, 4.0, 3.0);
        assert_eq!(rect.a(), Vec2::new(1.0, 2.0));
        assert_eq!(rect.b(), Vec2::new(1.0, 5.0));
        assert_eq!(rect.c(), Vec2::new(5.0, 5.0));
        assert_eq!(rect.d(), Vec2::new(5.0, 2.0));
        assert_eq!(rect.center(), Vec2::new(3.0, 3.5));
        assert_eq!(rect.area(), 12.0);
    }

    #[test]
    fn from_points_normalizes_corners() {
        let rect = Rect::from_points(Vec2::new(3.0, -1.0), Vec2::new(-1.0, 4.0));
        assert_eq!(rect, Rect::new(-1.0, -1.0, 4.0, 5.0));
    }

    #[test]
    fn contains_point_includes_edges() {
        let rect = Rect::from_points(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        assert!(rect.contains_point(Vec2::ZERO));
        assert!(rect.contains_point(Vec2::new(1.0, 1.0)));
        assert!(!rect.contains_point(Vec2::new(1.1, 0.0)));
    }

    #[test]
    fn rect_rect_overlap_uses_extents() {
        let rect = Rect::new(0.0, 0.0, 2.0, 2.0);
        assert!(rect.overlap_rect(&Rect::new(1.0, 1.0, 2.0, 2.0)));
        assert!(rect.overlap_rect(&Rect::new(2.0, 0.0, 1.0, 1.0)));
        assert!(!rect.overlap_rect(&Rect::new(3.0, 3.0, 1.0, 1.0)));
    }

    #[test]
    fn segment_into_rect_yields_one_contact() {
        let rect = Rect::from_points(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        let segment = Segment::new(Vec2::new(-5.0, 0.0), Vec2::new(0.0, 0.0), false);
        let points = rect.intersect_segment(&segment).unwrap();
        assert_eq!(points.count(), 1);
        assert_relative_eq!(points[0].point.x, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn circle_closest_point_on_rect_edge() {
        let rect = Rect::from_points(Vec2::new(-1.0, -1.0), Vec2::new(1.0, 1.0));
        let circle = Circle::new(Vec2::new(4.0, 0.0), 1.0);
        let result = rect.closest_point_circle(&circle);
        assert_eq!(result.self_point.point, Vec2::new(1.0, 0.0));
        assert_relative_eq!(result.distance_squared, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn union_and_enclosing_point_grow_the_rect() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        let grown = rect.enclosing_point(Vec2::new(3.0, -2.0));
        assert_eq!(grown, Rect::new(0.0, -2.0, 3.0, 3.0));

        let merged = rect.union(&Rect::new(-1.0, 0.5, 1.0, 1.0));
        assert_eq!(merged, Rect::new(-1.0, 0.0, 2.0, 1.5));
    }
}
