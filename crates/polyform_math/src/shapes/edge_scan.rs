//! Shared edge scans for the polygonal shapes (triangle, quad, rect,
//! polygon, polyline). Each shape decomposes into boundary edges in winding
//! order and delegates to the segment building blocks; these scans keep the
//! conventions in one place: first-found minimum wins on ties, winning edge
//! indices are recorded, and the reported normal of an edge is the
//! right-hand perpendicular of its direction.

use glam::Vec2;

use super::{Circle, Line, Ray, Segment};
use crate::collision::{ClosestPointResult, CollisionPoint, CollisionPoints};

/// The right-hand perpendicular of an edge, normalized.
#[inline]
pub(crate) fn edge_normal(edge_start: Vec2, edge_end: Vec2) -> Vec2 {
    (edge_end - edge_start).perp().normalize_or_zero()
}

/// The closest point on an edge loop to `point`, with the squared
/// distance. The reported normal is the winning edge's perpendicular.
pub(crate) fn closest_point_edges_point(
    edges: &[(Vec2, Vec2)],
    point: Vec2,
) -> (CollisionPoint, f32) {
    let (first_start, first_end) = edges[0];
    let (mut closest, mut min_distance_squared) =
        Segment::closest_point_segment_point(first_start, first_end, point);
    let mut winner = (first_start, first_end);

    for &(edge_start, edge_end) in edges.iter().skip(1) {
        let (candidate, distance_squared) =
            Segment::closest_point_segment_point(edge_start, edge_end, point);
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            closest = candidate;
            winner = (edge_start, edge_end);
        }
    }

    (
        CollisionPoint::new(closest, edge_normal(winner.0, winner.1)),
        min_distance_squared,
    )
}

/// The closest pair between an edge loop (self) and a line.
pub(crate) fn closest_point_edges_line(edges: &[(Vec2, Vec2)], line: &Line) -> ClosestPointResult {
    let (first_start, first_end) = edges[0];
    let (mut self_point, mut other_point, mut min_distance_squared) =
        Segment::closest_point_segment_line(first_start, first_end, line.point, line.direction);
    let mut self_index = 0;

    for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
        let (candidate_self, candidate_other, distance_squared) =
            Segment::closest_point_segment_line(edge_start, edge_end, line.point, line.direction);
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            self_point = candidate_self;
            other_point = candidate_other;
            self_index = i;
        }
    }

    let (winner_start, winner_end) = edges[self_index];
    ClosestPointResult::with_indices(
        CollisionPoint::new(self_point, edge_normal(winner_start, winner_end)),
        CollisionPoint::new(other_point, line.normal),
        min_distance_squared,
        self_index as i32,
        -1,
    )
}

/// The closest pair between an edge loop (self) and a ray.
pub(crate) fn closest_point_edges_ray(edges: &[(Vec2, Vec2)], ray: &Ray) -> ClosestPointResult {
    let (first_start, first_end) = edges[0];
    let (mut self_point, mut other_point, mut min_distance_squared) =
        Segment::closest_point_segment_ray(first_start, first_end, ray.point, ray.direction);
    let mut self_index = 0;

    for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
        let (candidate_self, candidate_other, distance_squared) =
            Segment::closest_point_segment_ray(edge_start, edge_end, ray.point, ray.direction);
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            self_point = candidate_self;
            other_point = candidate_other;
            self_index = i;
        }
    }

    let (winner_start, winner_end) = edges[self_index];
    ClosestPointResult::with_indices(
        CollisionPoint::new(self_point, edge_normal(winner_start, winner_end)),
        CollisionPoint::new(other_point, ray.normal),
        min_distance_squared,
        self_index as i32,
        -1,
    )
}

/// The closest pair between an edge loop (self) and a segment.
pub(crate) fn closest_point_edges_segment(
    edges: &[(Vec2, Vec2)],
    segment: &Segment,
) -> ClosestPointResult {
    let (first_start, first_end) = edges[0];
    let (mut self_point, mut other_point, mut min_distance_squared) =
        Segment::closest_point_segment_segment(first_start, first_end, segment.start, segment.end);
    let mut self_index = 0;

    for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
        let (candidate_self, candidate_other, distance_squared) =
            Segment::closest_point_segment_segment(edge_start, edge_end, segment.start, segment.end);
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            self_point = candidate_self;
            other_point = candidate_other;
            self_index = i;
        }
    }

    let (winner_start, winner_end) = edges[self_index];
    ClosestPointResult::with_indices(
        CollisionPoint::new(self_point, edge_normal(winner_start, winner_end)),
        CollisionPoint::new(other_point, segment.normal),
        min_distance_squared,
        self_index as i32,
        -1,
    )
}

/// The closest pair between an edge loop (self) and a circle boundary.
pub(crate) fn closest_point_edges_circle(
    edges: &[(Vec2, Vec2)],
    circle: &Circle,
) -> ClosestPointResult {
    let (first_start, first_end) = edges[0];
    let (mut self_point, mut other_point, mut min_distance_squared) =
        Segment::closest_point_segment_circle(first_start, first_end, circle.center, circle.radius);
    let mut self_index = 0;

    for (i, &(edge_start, edge_end)) in edges.iter().enumerate().skip(1) {
        let (candidate_self, candidate_other, distance_squared) = Segment::closest_point_segment_circle(
            edge_start,
            edge_end,
            circle.center,
            circle.radius,
        );
        if distance_squared < min_distance_squared {
            min_distance_squared = distance_squared;
            self_point = candidate_self;
            other_point = candidate_other;
            self_index = i;
        }
    }

    let (winner_start, winner_end) = edges[self_index];
    ClosestPointResult::with_indices(
        CollisionPoint::new(self_point, edge_normal(winner_start, winner_end)),
        CollisionPoint::new(other_point, (other_point - circle.center).normalize_or_zero()),
        min_distance_squared,
        self_index as i32,
        -1,
    )
}

/// The closest pair between two edge loops, with both winning indices
/// recorded.
pub(crate) fn closest_point_edges_edges(
    self_edges: &[(Vec2, Vec2)],
    other_edges: &[(Vec2, Vec2)],
) -> ClosestPointResult {
    let mut min_distance_squared = f32::MAX;
    let mut self_point = Vec2::ZERO;
    let mut other_point = Vec2::ZERO;
    let mut self_index = 0;
    let mut other_index = 0;
    let mut found = false;

    for (i, &(self_start, self_end)) in self_edges.iter().enumerate() {
        for (j, &(other_start, other_end)) in other_edges.iter().enumerate() {
            let (candidate_self, candidate_other, distance_squared) =
                Segment::closest_point_segment_segment(self_start, self_end, other_start, other_end);
            if !found || distance_squared < min_distance_squared {
                found = true;
                min_distance_squared = distance_squared;
                self_point = candidate_self;
                other_point = candidate_other;
                self_index = i;
                other_index = j;
            }
        }
    }

    let (self_start, self_end) = self_edges[self_index];
    let (other_start, other_end) = other_edges[other_index];
    ClosestPointResult::with_indices(
        CollisionPoint::new(self_point, edge_normal(self_start, self_end)),
        CollisionPoint::new(other_point, edge_normal(other_start, other_end)),
        min_distance_squared,
        self_index as i32,
        other_index as i32,
    )
}

/// Appends intersections between an edge loop (self) and a line.
pub(crate) fn intersect_edges_line_into(
    edges: &[(Vec2, Vec2)],
    line: &Line,
    points: &mut CollisionPoints,
    return_after_first: bool,
) -> usize {
    let mut count = 0;
    for &(edge_start, edge_end) in edges {
        let contact =
            Segment::intersect_segment_line(edge_start, edge_end, line.point, line.direction);
        if contact.valid {
            points.add(CollisionPoint::new(contact.point, line.normal));
            if return_after_first {
                return 1;
            }
            count += 1;
        }
    }
    count
}

/// Appends intersections between an edge loop (self) and a ray.
pub(crate) fn intersect_edges_ray_into(
    edges: &[(Vec2, Vec2)],
    ray: &Ray,
    points: &mut CollisionPoints,
    return_after_first: bool,
) -> usize {
    let mut count = 0;
    for &(edge_start, edge_end) in edges {
        let contact =
            Segment::intersect_segment_ray(edge_start, edge_end, ray.point, ray.direction);
        if contact.valid {
            points.add(CollisionPoint::new(contact.point, ray.normal));
            if return_after_first {
                return 1;
            }
            count += 1;
        }
    }
    count
}

/// Appends intersections between an edge loop (self) and a segment.
pub(crate) fn intersect_edges_segment_into(
    edges: &[(Vec2, Vec2)],
    segment: &Segment,
    points: &mut CollisionPoints,
    return_after_first: bool,
) -> usize {
    let mut count = 0;
    for &(edge_start, edge_end) in edges {
        let contact = Segment::intersect_segment_segment_with_normal(
            edge_start,
            edge_end,
            segment.start,
            segment.end,
            segment.normal,
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

/// Appends intersections between an edge loop (self) and a circle.
pub(crate) fn intersect_edges_circle_into(
    edges: &[(Vec2, Vec2)],
    circle: &Circle,
    points: &mut CollisionPoints,
    return_after_first: bool,
) -> usize {
    let mut count = 0;
    for &(edge_start, edge_end) in edges {
        let (first, second) = Segment::intersect_segment_circle(
            edge_start,
            edge_end,
            circle.center,
            circle.radius,
        );
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

/// Appends intersections between two edge loops, scanning self edges in
/// the outer loop so discovery order follows the first shape's winding.
pub(crate) fn intersect_edges_edges_into(
    self_edges: &[(Vec2, Vec2)],
    other_edges: &[(Vec2, Vec2)],
    points: &mut CollisionPoints,
    return_after_first: bool,
) -> usize {
    let mut count = 0;
    for &(self_start, self_end) in self_edges {
        for &(other_start, other_end) in other_edges {
            let contact = Segment::intersect_segment_segment(
                self_start,
                self_end,
                other_start,
                other_end,
            );
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

/// Collects intersections between two edge loops with an optional cap,
/// checked after each append.
pub(crate) fn intersect_edges_edges_capped(
    self_edges: &[(Vec2, Vec2)],
    other_edges: &[(Vec2, Vec2)],
    max_points: Option<usize>,
) -> Option<CollisionPoints> {
    if max_points == Some(0) {
        return None;
    }
    let mut result: Option<CollisionPoints> = None;
    for &(self_start, self_end) in self_edges {
        for &(other_start, other_end) in other_edges {
            let contact =
                Segment::intersect_segment_segment(self_start, self_end, other_start, other_end);
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

/// Whether any edge of the loop crosses the line.
pub(crate) fn overlap_edges_line(edges: &[(Vec2, Vec2)], line: &Line) -> bool {
    edges.iter().any(|&(edge_start, edge_end)| {
        Segment::overlap_segment_line(edge_start, edge_end, line.point, line.direction)
    })
}

/// Whether any edge of the loop crosses the ray.
pub(crate) fn overlap_edges_ray(edges: &[(Vec2, Vec2)], ray: &Ray) -> bool {
    edges.iter().any(|&(edge_start, edge_end)| {
        Segment::overlap_segment_ray(edge_start, edge_end, ray.point, ray.direction)
    })
}

/// Whether any edge of the loop crosses the segment.
pub(crate) fn overlap_edges_segment(edges: &[(Vec2, Vec2)], segment: &Segment) -> bool {
    edges.iter().any(|&(edge_start, edge_end)| {
        Segment::overlap_segment_segment(edge_start, edge_end, segment.start, segment.end)
    })
}

/// Whether any edge of the loop touches the circle.
pub(crate) fn overlap_edges_circle(edges: &[(Vec2, Vec2)], circle: &Circle) -> bool {
    edges.iter().any(|&(edge_start, edge_end)| {
        Segment::overlap_segment_circle(edge_start, edge_end, circle.center, circle.radius)
    })
}

/// Whether any edge pair of the two loops crosses.
pub(crate) fn overlap_edges_edges(
    self_edges: &[(Vec2, Vec2)],
    other_edges: &[(Vec2, Vec2)],
) -> bool {
    self_edges.iter().any(|&(self_start, self_end)| {
        other_edges.iter().any(|&(other_start, other_end)| {
            Segment::overlap_segment_segment(self_start, self_end, other_start, other_end)
        })
    })
}
