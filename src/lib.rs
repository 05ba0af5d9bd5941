#![forbid(unsafe_code)]

//! polyform is a 2D shape and collision framework.
//!
//! The heart of the project is [`polyform_math`]: an exact-geometry
//! narrow-phase query library over ten heterogeneous primitive kinds
//! (lines, rays, segments, circles, triangles, quads, rects, polygons,
//! polylines and loose segment collections), with a uniform
//! [`Collider`](math::Collider) dispatch surface. Around it sit a small
//! scene-lifecycle layer ([`polyform_app`]) and an achievement/stat
//! tracker ([`polyform_achievements`]).

pub use polyform_achievements as achievements;
pub use polyform_app as app;
pub use polyform_math as math;

/// The polyform prelude.
///
/// This includes the most common types in the framework, re-exported for
/// your convenience.
pub mod prelude {
    #[doc(hidden)]
    pub use crate::{
        achievements::{Achievement, AchievementTracker, Stat},
        app::{GameTime, Scene, SceneId, SceneOutcome, SceneStack},
        math::prelude::*,
    };
}
