#![forbid(unsafe_code)]

//! Scene lifecycle and game-time plumbing for polyform.
//!
//! The windowing, rendering and input backends live outside this crate;
//! what lives here is the state machine between them and game code: a
//! [`SceneStack`] owning boxed [`Scene`]s, an explicit activation
//! handshake, a pause latch, a quit latch and a [`GameTime`] accumulator.
//! The owner loop drives [`SceneStack::update`] once per frame and reads
//! the latches back.

mod scene;
mod time;

pub use scene::{Scene, SceneError, SceneId, SceneOutcome, SceneStack, SceneState};
pub use time::GameTime;
