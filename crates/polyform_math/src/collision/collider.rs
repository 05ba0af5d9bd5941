use crate::shapes::{Circle, Line, Polygon, Polyline, Quad, Ray, Rect, Segment, Triangle};

/// The kind of shape a [`Collider`] currently holds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ShapeType {
    /// A [`Circle`].
    Circle,
    /// A [`Ray`].
    Ray,
    /// A [`Line`].
    Line,
    /// A [`Segment`].
    Segment,
    /// A [`Triangle`].
    Triangle,
    /// A [`Rect`].
    Rect,
    /// A [`Quad`].
    Quad,
    /// A [`Polygon`].
    Polygon,
    /// A [`Polyline`].
    Polyline,
}

/// The shape payload of a [`Collider`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub enum ColliderShape {
    /// A circle payload.
    Circle(Circle),
    /// A ray payload.
    Ray(Ray),
    /// A line payload.
    Line(Line),
    /// A segment payload.
    Segment(Segment),
    /// A triangle payload.
    Triangle(Triangle),
    /// A rect payload.
    Rect(Rect),
    /// A quad payload.
    Quad(Quad),
    /// A polygon payload.
    Polygon(Polygon),
    /// A polyline payload.
    Polyline(Polyline),
}

impl ColliderShape {
    /// The tag matching this payload.
    pub fn shape_type(&self) -> ShapeType {
        match self {
            ColliderShape::Circle(_) => ShapeType::Circle,
            ColliderShape::Ray(_) => ShapeType::Ray,
            ColliderShape::Line(_) => ShapeType::Line,
            ColliderShape::Segment(_) => ShapeType::Segment,
            ColliderShape::Triangle(_) => ShapeType::Triangle,
            ColliderShape::Rect(_) => ShapeType::Rect,
            ColliderShape::Quad(_) => ShapeType::Quad,
            ColliderShape::Polygon(_) => ShapeType::Polygon,
            ColliderShape::Polyline(_) => ShapeType::Polyline,
        }
    }
}

/// A shape wrapper owned by physics-facing code, queried through the
/// geometry core without the caller knowing the concrete shape kind.
///
/// The core only ever reads a collider: queries against a disabled collider
/// short-circuit to "no result" without evaluating any geometry.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serialize", derive(serde::Serialize, serde::Deserialize))]
pub struct Collider {
    /// Whether queries against this collider produce results.
    pub enabled: bool,
    shape: ColliderShape,
}

impl Collider {
    /// Creates an enabled collider holding `shape`.
    #[inline]
    pub fn new(shape: ColliderShape) -> Self {
        Self {
            enabled: true,
            shape,
        }
    }

    /// The tag of the held shape.
    #[inline]
    pub fn shape_type(&self) -> ShapeType {
        self.shape.shape_type()
    }

    /// The held shape payload.
    #[inline]
    pub fn shape(&self) -> &ColliderShape {
        &self.shape
    }

    /// Replaces the held shape payload.
    #[inline]
    pub fn set_shape(&mut self, shape: ColliderShape) {
        self.shape = shape;
    }

    /// The held circle, if the payload is one.
    #[inline]
    pub fn circle_shape(&self) -> Option<&Circle> {
        match &self.shape {
            ColliderShape::Circle(circle) => Some(circle),
            _ => None,
        }
    }

    /// The held ray, if the payload is one.
    #[inline]
    pub fn ray_shape(&self) -> Option<&Ray> {
        match &self.shape {
            ColliderShape::Ray(ray) => Some(ray),
            _ => None,
        }
    }

    /// The held line, if the payload is one.
    #[inline]
    pub fn line_shape(&self) -> Option<&Line> {
        match &self.shape {
            ColliderShape::Line(line) => Some(line),
            _ => None,
        }
    }

    /// The held segment, if the payload is one.
    #[inline]
    pub fn segment_shape(&self) -> Option<&Segment> {
        match &self.shape {
            ColliderShape::Segment(segment) => Some(segment),
            _ => None,
        }
    }

    /// The held triangle, if the payload is one.
    #[inline]
    pub fn triangle_shape(&self) -> Option<&Triangle> {
        match &self.shape {
            ColliderShape::Triangle(triangle) => Some(triangle),
            _ => None,
        }
    }

    /// The held rect, if the payload is one.
    #[inline]
    pub fn rect_shape(&self) -> Option<&Rect> {
        match &self.shape {
            ColliderShape::Rect(rect) => Some(rect),
            _ => None,
        }
    }

    /// The held quad, if the payload is one.
    #[inline]
    pub fn quad_shape(&self) -> Option<&Quad> {
        match &self.shape {
            ColliderShape::Quad(quad) => Some(quad),
            _ => None,
        }
    }

    /// The held polygon, if the payload is one.
    #[inline]
    pub fn polygon_shape(&self) -> Option<&Polygon> {
        match &self.shape {
            ColliderShape::Polygon(polygon) => Some(polygon),
            _ => None,
        }
    }

    /// The held polyline, if the payload is one.
    #[inline]
    pub fn polyline_shape(&self) -> Option<&Polyline> {
        match &self.shape {
            ColliderShape::Polyline(polyline) => Some(polyline),
            _ => None,
        }
    }
}

impl From<ColliderShape> for Collider {
    fn from(shape: ColliderShape) -> Self {
        Self::new(shape)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    #[test]
    fn shape_type_matches_payload() {
        let collider = Collider::new(ColliderShape::Circle(Circle::new(Vec2::ZERO, 1.0)));
        assert_eq!(collider.shape_type(), ShapeType::Circle);
        assert!(collider.enabled);
        assert!(collider.circle_shape().is_some());
        assert!(collider.rect_shape().is_none());
    }

    #[test]
    fn set_shape_changes_tag() {
        let mut collider = Collider::new(ColliderShape::Circle(Circle::new(Vec2::ZERO, 1.0)));
        collider.set_shape(ColliderShape::Segment(Segment::new(
            Vec2::ZERO,
            Vec2::X,
            false,
        )));
        assert_eq!(collider.shape_type(), ShapeType::Segment);
    }
}
