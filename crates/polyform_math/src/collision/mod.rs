//! The result currency shared by every collision query: contact points,
//! contact-point collections, closest-point pairs and the [`Collider`]
//! dispatch wrapper.

mod closest;
mod collider;
mod points;

pub use closest::ClosestPointResult;
pub use collider::{Collider, ColliderShape, ShapeType};
pub use points::{CollisionPoint, CollisionPoints};
