#![forbid(unsafe_code)]

//! Shape primitives and exact-geometry collision queries for polyform.
//!
//! The crate is organized around ten 2D primitive kinds — [`Line`], [`Ray`],
//! [`Segment`], [`Circle`], [`Triangle`], [`Quad`], [`Rect`], [`Polygon`],
//! [`Polyline`] and [`Segments`] — each of which answers three query
//! families against every other kind:
//!
//! * `closest_point_*` — the pair of mutually closest points plus the
//!   squared distance between them, as a [`ClosestPointResult`];
//! * `intersect_*` — exact boundary intersections as [`CollisionPoint`]s,
//!   with `*_into` overloads that append into a caller-owned
//!   [`CollisionPoints`] buffer;
//! * `overlap_*` — boolean tests that also treat containment as overlap
//!   for closed shapes.
//!
//! A [`Collider`] wraps any one shape behind a [`ShapeType`] tag so callers
//! can query "whatever shape this collider currently holds" without knowing
//! the concrete type.
//!
//! All queries are pure functions over immutable inputs; degenerate
//! geometry (parallel directions, malformed polygons) yields invalid
//! results, never panics.
//!
//! [`Line`]: shapes::Line
//! [`Ray`]: shapes::Ray
//! [`Segment`]: shapes::Segment
//! [`Circle`]: shapes::Circle
//! [`Triangle`]: shapes::Triangle
//! [`Quad`]: shapes::Quad
//! [`Rect`]: shapes::Rect
//! [`Polygon`]: shapes::Polygon
//! [`Polyline`]: shapes::Polyline
//! [`Segments`]: shapes::Segments
//! [`CollisionPoint`]: collision::CollisionPoint
//! [`CollisionPoints`]: collision::CollisionPoints
//! [`ClosestPointResult`]: collision::ClosestPointResult
//! [`Collider`]: collision::Collider
//! [`ShapeType`]: collision::ShapeType

pub mod collision;
pub mod shapes;

pub use collision::{
    ClosestPointResult, CollisionPoint, CollisionPoints, Collider, ColliderShape, ShapeType,
};
pub use shapes::{
    Circle, Line, Polygon, Polyline, Quad, Ray, Rect, Segment, Segments, Triangle,
};

/// The `polyform_math` prelude.
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        collision::{
            ClosestPointResult, CollisionPoint, CollisionPoints, Collider, ColliderShape,
            ShapeType,
        },
        shapes::{Circle, Line, Polygon, Polyline, Quad, Ray, Rect, Segment, Segments, Triangle},
    };
    #[doc(hidden)]
    pub use glam::Vec2;
}

pub use glam::Vec2;
