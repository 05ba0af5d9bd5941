use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;

use crate::GameTime;

/// Identifies a registered scene within a [`SceneStack`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SceneId(pub u32);

/// Where a scene sits in its lifecycle.
///
/// `Inactive -> Active` on activation, `Active -> Inactive` when another
/// scene takes over, and `Closed` is terminal: a closed scene is removed
/// from the stack and never reactivated.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneState {
    /// Registered but not receiving updates.
    #[default]
    Inactive,
    /// The scene currently driven by the owner loop.
    Active,
    /// Finished for good.
    Closed,
}

/// What a scene asks of the owner loop after an update.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SceneOutcome {
    /// Keep running this scene.
    #[default]
    Continue,
    /// Switch to another registered scene.
    SwitchTo(SceneId),
    /// Close this scene and stop updating until another is activated.
    Close,
    /// Ask the owner loop to quit.
    Quit,
}

/// A unit of game flow (a menu, a level, a cutscene) driven by the owner
/// loop through explicit hooks.
///
/// Hooks with empty default bodies are optional; only [`Scene::on_update`]
/// is required.
pub trait Scene {
    /// Called when this scene becomes the active one. `previous` names the
    /// scene that was active before, if any.
    fn on_activate(&mut self, _previous: Option<SceneId>) {}

    /// Called when this scene stops being the active one.
    fn on_deactivate(&mut self) {}

    /// Called once per frame while active.
    fn on_update(&mut self, time: &GameTime) -> SceneOutcome;

    /// Called on every pause flip while active.
    fn on_pause_changed(&mut self, _paused: bool) {}

    /// Called when the scene is closed and removed.
    fn on_close(&mut self) {}
}

/// Errors from scene registry misuse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// The id has no registered scene.
    #[error("no scene registered under id {0:?}")]
    UnknownScene(SceneId),
    /// The id was registered twice.
    #[error("a scene is already registered under id {0:?}")]
    DuplicateScene(SceneId),
    /// The scene has already closed and cannot be activated again.
    #[error("scene {0:?} is closed")]
    SceneClosed(SceneId),
}

struct SceneEntry {
    scene: Box<dyn Scene>,
    state: SceneState,
}

/// Owns registered scenes and runs the activation state machine.
///
/// At most one scene is active at a time. Switching deactivates the old
/// scene before activating the new one, in that order, so a scene never
/// observes two active peers.
#[derive(Default)]
pub struct SceneStack {
    scenes: HashMap<SceneId, SceneEntry>,
    active: Option<SceneId>,
    paused: bool,
    quit: bool,
}

impl SceneStack {
    /// Creates an empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a scene under `id`.
    pub fn register(&mut self, id: SceneId, scene: Box<dyn Scene>) -> Result<(), SceneError> {
        if self.scenes.contains_key(&id) {
            return Err(SceneError::DuplicateScene(id));
        }
        self.scenes.insert(
            id,
            SceneEntry {
                scene,
                state: SceneState::Inactive,
            },
        );
        debug!("registered scene {id:?}");
        Ok(())
    }

    /// The currently active scene, if any.
    pub fn active(&self) -> Option<SceneId> {
        self.active
    }

    /// The lifecycle state of a registered scene.
    pub fn state(&self, id: SceneId) -> Option<SceneState> {
        self.scenes.get(&id).map(|entry| entry.state)
    }

    /// Whether updates are currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Whether a scene has requested the owner loop to quit.
    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Deactivates the current scene, then activates `id`.
    pub fn switch_to(&mut self, id: SceneId) -> Result<(), SceneError> {
        match self.scenes.get(&id) {
            None => return Err(SceneError::UnknownScene(id)),
            Some(entry) if entry.state == SceneState::Closed => {
                return Err(SceneError::SceneClosed(id));
            }
            Some(_) => {}
        }

        let previous = self.active;
        if previous == Some(id) {
            return Ok(());
        }

        if let Some(previous_id) = previous {
            if let Some(entry) = self.scenes.get_mut(&previous_id) {
                entry.scene.on_deactivate();
                entry.state = SceneState::Inactive;
            }
        }

        let Some(entry) = self.scenes.get_mut(&id) else {
            return Err(SceneError::UnknownScene(id));
        };
        entry.scene.on_activate(previous);
        entry.state = SceneState::Active;
        self.active = Some(id);
        debug!("switched active scene: {previous:?} -> {id:?}");
        Ok(())
    }

    /// Flips the pause latch, notifying the active scene on change.
    pub fn set_paused(&mut self, paused: bool) {
        if self.paused == paused {
            return;
        }
        self.paused = paused;
        if let Some(id) = self.active {
            if let Some(entry) = self.scenes.get_mut(&id) {
                entry.scene.on_pause_changed(paused);
            }
        }
    }

    /// Runs one frame of the active scene and resolves its outcome.
    ///
    /// Paused stacks and stacks with no active scene do nothing. A
    /// [`SceneOutcome::SwitchTo`] naming an unknown or closed scene is
    /// logged and ignored rather than tearing the loop down.
    pub fn update(&mut self, time: &GameTime) {
        if self.paused {
            return;
        }
        let Some(id) = self.active else {
            return;
        };
        let Some(entry) = self.scenes.get_mut(&id) else {
            return;
        };

        match entry.scene.on_update(time) {
            SceneOutcome::Continue => {}
            SceneOutcome::SwitchTo(next) => {
                if let Err(error) = self.switch_to(next) {
                    warn!("scene {id:?} requested an impossible switch: {error}");
                }
            }
            SceneOutcome::Close => self.close(id),
            SceneOutcome::Quit => {
                debug!("scene {id:?} requested quit");
                self.quit = true;
            }
        }
    }

    /// Closes a scene for good. Closing the active scene leaves the stack
    /// idle until the next [`SceneStack::switch_to`].
    pub fn close(&mut self, id: SceneId) {
        let Some(entry) = self.scenes.get_mut(&id) else {
            return;
        };
        if entry.state == SceneState::Closed {
            return;
        }
        if self.active == Some(id) {
            entry.scene.on_deactivate();
            self.active = None;
        }
        entry.scene.on_close();
        entry.state = SceneState::Closed;
        debug!("closed scene {id:?}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    struct TestScene {
        name: &'static str,
        recorder: Rc<RefCell<Recorder>>,
        outcome: SceneOutcome,
    }

    impl TestScene {
        fn push(&self, event: &str) {
            self.recorder
                .borrow_mut()
                .events
                .push(format!("{}:{event}", self.name));
        }
    }

    impl Scene for TestScene {
        fn on_activate(&mut self, _previous: Option<SceneId>) {
            self.push("activate");
        }
        fn on_deactivate(&mut self) {
            self.push("deactivate");
        }
        fn on_update(&mut self, _time: &GameTime) -> SceneOutcome {
            self.push("update");
            self.outcome
        }
        fn on_pause_changed(&mut self, paused: bool) {
            self.push(if paused { "pause" } else { "resume" });
        }
        fn on_close(&mut self) {
            self.push("close");
        }
    }

    fn scene(
        name: &'static str,
        recorder: &Rc<RefCell<Recorder>>,
        outcome: SceneOutcome,
    ) -> Box<dyn Scene> {
        Box::new(TestScene {
            name,
            recorder: Rc::clone(recorder),
            outcome,
        })
    }

    const MENU: SceneId = SceneId(0);
    const LEVEL: SceneId = SceneId(1);

    #[test]
    fn switch_deactivates_before_activating() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut stack = SceneStack::new();
        stack
            .register(MENU, scene("menu", &recorder, SceneOutcome::Continue))
            .unwrap();
        stack
            .register(LEVEL, scene("level", &recorder, SceneOutcome::Continue))
            .unwrap();

        stack.switch_to(MENU).unwrap();
        stack.switch_to(LEVEL).unwrap();

        let events = &recorder.borrow().events;
        assert_eq!(
            events,
            &["menu:activate", "menu:deactivate", "level:activate"]
        );
        assert_eq!(stack.state(MENU), Some(SceneState::Inactive));
        assert_eq!(stack.state(LEVEL), Some(SceneState::Active));
    }

    #[test]
    fn duplicate_and_unknown_ids_are_errors() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut stack = SceneStack::new();
        stack
            .register(MENU, scene("menu", &recorder, SceneOutcome::Continue))
            .unwrap();
        assert_eq!(
            stack.register(MENU, scene("menu", &recorder, SceneOutcome::Continue)),
            Err(SceneError::DuplicateScene(MENU))
        );
        assert_eq!(stack.switch_to(LEVEL), Err(SceneError::UnknownScene(LEVEL)));
    }

    #[test]
    fn update_resolves_switch_outcome() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut stack = SceneStack::new();
        stack
            .register(MENU, scene("menu", &recorder, SceneOutcome::SwitchTo(LEVEL)))
            .unwrap();
        stack
            .register(LEVEL, scene("level", &recorder, SceneOutcome::Continue))
            .unwrap();
        stack.switch_to(MENU).unwrap();

        let time = GameTime::default();
        stack.update(&time);
        assert_eq!(stack.active(), Some(LEVEL));

        stack.update(&time);
        assert_eq!(stack.active(), Some(LEVEL));
    }

    #[test]
    fn paused_stack_does_not_update() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut stack = SceneStack::new();
        stack
            .register(MENU, scene("menu", &recorder, SceneOutcome::Continue))
            .unwrap();
        stack.switch_to(MENU).unwrap();

        stack.set_paused(true);
        stack.update(&GameTime::default());
        stack.set_paused(false);

        let events = &recorder.borrow().events;
        assert_eq!(events, &["menu:activate", "menu:pause", "menu:resume"]);
    }

    #[test]
    fn quit_outcome_sets_the_latch() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut stack = SceneStack::new();
        stack
            .register(MENU, scene("menu", &recorder, SceneOutcome::Quit))
            .unwrap();
        stack.switch_to(MENU).unwrap();

        assert!(!stack.quit_requested());
        stack.update(&GameTime::default());
        assert!(stack.quit_requested());
    }

    #[test]
    fn closed_scene_cannot_come_back() {
        let recorder = Rc::new(RefCell::new(Recorder::default()));
        let mut stack = SceneStack::new();
        stack
            .register(MENU, scene("menu", &recorder, SceneOutcome::Close))
            .unwrap();
        stack.switch_to(MENU).unwrap();
        stack.update(&GameTime::default());

        assert_eq!(stack.active(), None);
        assert_eq!(stack.state(MENU), Some(SceneState::Closed));
        assert_eq!(stack.switch_to(MENU), Err(SceneError::SceneClosed(MENU)));
        let events = &recorder.borrow().events;
        assert!(events.contains(&"menu:deactivate".to_string()));
        assert!(events.contains(&"menu:close".to_string()));
    }
}
