#![forbid(unsafe_code)]

//! Stat tracking and achievement goals for polyform.
//!
//! Game code bumps integer [`Stat`]s; [`Achievement`]s watch a stat over a
//! goal range and report progress. Notification is explicit observer
//! registration (callback lists), not a language event mechanism: the
//! [`AchievementTracker`] collects [`AchievementEvent`]s as stats change
//! and hands them to subscribers on [`AchievementTracker::update`].

use std::collections::HashMap;

use log::{debug, warn};
use thiserror::Error;

/// A clamped integer statistic identified by an API name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stat {
    /// Stable identifier used to reference the stat from achievements.
    pub api_name: String,
    /// Human-readable name.
    pub display_name: String,
    value: i64,
    default_value: i64,
    min_value: i64,
    max_value: i64,
}

impl Stat {
    /// Creates a stat with a default value clamped into `[min, max]`.
    pub fn new(
        api_name: impl Into<String>,
        display_name: impl Into<String>,
        default_value: i64,
        min_value: i64,
        max_value: i64,
    ) -> Self {
        let default_value = default_value.clamp(min_value, max_value);
        Self {
            api_name: api_name.into(),
            display_name: display_name.into(),
            value: default_value,
            default_value,
            min_value,
            max_value,
        }
    }

    /// Creates an unbounded counter starting at zero.
    pub fn counter(api_name: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self::new(api_name, display_name, 0, i64::MIN, i64::MAX)
    }

    /// The current value.
    pub fn value(&self) -> i64 {
        self.value
    }

    /// Resets to the default value. Returns the old and new values if the
    /// value actually changed.
    pub fn reset(&mut self) -> Option<(i64, i64)> {
        self.set(self.default_value)
    }

    /// Adds `change` to the value, clamping to the stat's range. Returns
    /// the old and new values if the value actually changed.
    pub fn change_by(&mut self, change: i64) -> Option<(i64, i64)> {
        if change == 0 {
            return None;
        }
        let old = self.value;
        let new = old
            .saturating_add(change)
            .clamp(self.min_value, self.max_value);
        if new == old {
            return None;
        }
        self.value = new;
        Some((old, new))
    }

    /// Sets the value, clamping to the stat's range. Returns the old and
    /// new values if the value actually changed.
    pub fn set(&mut self, value: i64) -> Option<(i64, i64)> {
        let clamped = value.clamp(self.min_value, self.max_value);
        self.change_by(clamped.saturating_sub(self.value))
    }
}

/// A goal over a stat's range `[start, end]`: finished when the stat
/// reaches `end`, in progress from `start` upward.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Achievement {
    /// Stable identifier of the achievement.
    pub api_name: String,
    /// Human-readable name.
    pub display_name: String,
    /// The stat this achievement watches.
    pub stat_api_name: String,
    /// Hidden achievements show no name or progress until achieved.
    pub hidden: bool,
    start: i64,
    end: i64,
    notification_increment: i64,
    achieved: bool,
}

impl Achievement {
    /// Creates an achievement over `stat_api_name` with the goal range
    /// `[start, end]`. A positive `notification_increment` reports
    /// progress every time the stat crosses a multiple of it inside the
    /// range; zero disables progress notifications.
    pub fn new(
        api_name: impl Into<String>,
        display_name: impl Into<String>,
        stat_api_name: impl Into<String>,
        hidden: bool,
        start: i64,
        end: i64,
        notification_increment: i64,
    ) -> Self {
        Self {
            api_name: api_name.into(),
            display_name: display_name.into(),
            stat_api_name: stat_api_name.into(),
            hidden,
            start,
            end,
            notification_increment,
            achieved: false,
        }
    }

    /// Whether the goal has been reached.
    pub fn is_achieved(&self) -> bool {
        self.achieved
    }

    /// Whether `value` is inside the active goal range.
    pub fn is_goal_active(&self, value: i64) -> bool {
        value >= self.start
    }

    /// Whether `value` finishes the goal.
    pub fn is_goal_finished(&self, value: i64) -> bool {
        value >= self.end
    }

    /// Progress through the goal range, clamped to `[0, 1]`.
    pub fn goal_percentage(&self, value: i64) -> f32 {
        if self.end == self.start {
            return if value >= self.end { 1.0 } else { 0.0 };
        }
        let progress = (value - self.start) as f32 / (self.end - self.start) as f32;
        progress.clamp(0.0, 1.0)
    }

    fn wants_increment_notification(&self, old: i64, new: i64) -> bool {
        self.notification_increment > 0
            && new >= self.start
            && new < self.end
            && new != old
            && new % self.notification_increment == 0
    }
}

/// A notification produced by stat changes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AchievementEvent {
    /// A watched stat crossed a progress increment of an achievement.
    Progress {
        /// The achievement making progress.
        api_name: String,
        /// The stat value that triggered the notification.
        value: i64,
    },
    /// An achievement's goal was reached.
    Achieved {
        /// The achievement that finished.
        api_name: String,
    },
}

/// An observer callback invoked for every drained [`AchievementEvent`].
pub type AchievementObserver = Box<dyn FnMut(&AchievementEvent)>;

/// Errors from registry misuse.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AchievementError {
    /// A stat was registered twice under one API name.
    #[error("a stat named `{0}` is already registered")]
    DuplicateStat(String),
    /// An achievement was registered twice under one API name.
    #[error("an achievement named `{0}` is already registered")]
    DuplicateAchievement(String),
    /// A referenced stat does not exist.
    #[error("no stat named `{0}` is registered")]
    UnknownStat(String),
}

/// The registry tying stats, achievements and observers together.
#[derive(Default)]
pub struct AchievementTracker {
    stats: HashMap<String, Stat>,
    achievements: Vec<Achievement>,
    observers: Vec<AchievementObserver>,
    pending: Vec<AchievementEvent>,
}

impl AchievementTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a stat.
    pub fn register_stat(&mut self, stat: Stat) -> Result<(), AchievementError> {
        if self.stats.contains_key(&stat.api_name) {
            return Err(AchievementError::DuplicateStat(stat.api_name));
        }
        self.stats.insert(stat.api_name.clone(), stat);
        Ok(())
    }

    /// Registers an achievement watching an already-registered stat.
    ///
    /// An achievement whose goal is already finished by the stat's current
    /// value is marked achieved immediately, without a notification.
    pub fn register_achievement(
        &mut self,
        mut achievement: Achievement,
    ) -> Result<(), AchievementError> {
        if self
            .achievements
            .iter()
            .any(|existing| existing.api_name == achievement.api_name)
        {
            return Err(AchievementError::DuplicateAchievement(achievement.api_name));
        }
        let Some(stat) = self.stats.get(&achievement.stat_api_name) else {
            return Err(AchievementError::UnknownStat(achievement.stat_api_name));
        };
        if achievement.is_goal_finished(stat.value()) {
            debug!(
                "achievement `{}` registered already finished",
                achievement.api_name
            );
            achievement.achieved = true;
        }
        self.achievements.push(achievement);
        Ok(())
    }

    /// Subscribes an observer to drained events.
    pub fn add_observer(&mut self, observer: AchievementObserver) {
        self.observers.push(observer);
    }

    /// The current value of a stat.
    pub fn stat_value(&self, api_name: &str) -> Option<i64> {
        self.stats.get(api_name).map(Stat::value)
    }

    /// A registered achievement by API name.
    pub fn achievement(&self, api_name: &str) -> Option<&Achievement> {
        self.achievements
            .iter()
            .find(|achievement| achievement.api_name == api_name)
    }

    /// Progress of an achievement through its goal range.
    pub fn goal_percentage(&self, api_name: &str) -> Option<f32> {
        let achievement = self.achievement(api_name)?;
        let stat = self.stats.get(&achievement.stat_api_name)?;
        Some(achievement.goal_percentage(stat.value()))
    }

    /// Changes a stat by `change`, queueing any notifications it causes.
    pub fn change_stat(&mut self, api_name: &str, change: i64) -> Result<(), AchievementError> {
        let Some(stat) = self.stats.get_mut(api_name) else {
            return Err(AchievementError::UnknownStat(api_name.to_string()));
        };
        let Some((old, new)) = stat.change_by(change) else {
            return Ok(());
        };

        for achievement in &mut self.achievements {
            if achievement.achieved || achievement.stat_api_name != api_name {
                continue;
            }
            if achievement.is_goal_finished(new) {
                achievement.achieved = true;
                self.pending.push(AchievementEvent::Achieved {
                    api_name: achievement.api_name.clone(),
                });
            } else if achievement.wants_increment_notification(old, new) {
                self.pending.push(AchievementEvent::Progress {
                    api_name: achievement.api_name.clone(),
                    value: new,
                });
            }
        }
        Ok(())
    }

    /// Sets a stat to `value`, queueing any notifications it causes.
    pub fn set_stat(&mut self, api_name: &str, value: i64) -> Result<(), AchievementError> {
        let current = self
            .stat_value(api_name)
            .ok_or_else(|| AchievementError::UnknownStat(api_name.to_string()))?;
        self.change_stat(api_name, value.saturating_sub(current))
    }

    /// Drains queued events through every observer, in arrival order.
    pub fn update(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let events = std::mem::take(&mut self.pending);
        if self.observers.is_empty() {
            warn!("{} achievement events dropped with no observer", events.len());
            return;
        }
        for event in &events {
            for observer in &mut self.observers {
                observer(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn tracker_with_kill_stat() -> AchievementTracker {
        let mut tracker = AchievementTracker::new();
        tracker
            .register_stat(Stat::new("kills", "Enemies defeated", 0, 0, 1000))
            .unwrap();
        tracker
            .register_achievement(Achievement::new(
                "slayer",
                "Slayer",
                "kills",
                false,
                0,
                10,
                2,
            ))
            .unwrap();
        tracker
    }

    #[test]
    fn stat_clamps_to_its_range() {
        let mut stat = Stat::new("health", "Health", 50, 0, 100);
        assert_eq!(stat.change_by(100), Some((50, 100)));
        assert_eq!(stat.change_by(1), None);
        assert_eq!(stat.set(-20), Some((100, 0)));
        assert_eq!(stat.reset(), Some((0, 50)));
    }

    #[test]
    fn goal_percentage_is_clamped() {
        let achievement = Achievement::new("a", "A", "s", false, 10, 20, 0);
        assert_eq!(achievement.goal_percentage(5), 0.0);
        assert_eq!(achievement.goal_percentage(15), 0.5);
        assert_eq!(achievement.goal_percentage(30), 1.0);
    }

    #[test]
    fn progress_and_achieved_events_flow_to_observers() {
        let mut tracker = tracker_with_kill_stat();
        let seen: Rc<RefCell<Vec<AchievementEvent>>> = Rc::default();
        let sink = Rc::clone(&seen);
        tracker.add_observer(Box::new(move |event| {
            sink.borrow_mut().push(event.clone());
        }));

        for _ in 0..10 {
            tracker.change_stat("kills", 1).unwrap();
        }
        tracker.update();

        let events = seen.borrow();
        // Increments at 2, 4, 6, 8; achieved at 10.
        assert_eq!(events.len(), 5);
        assert_eq!(
            events[0],
            AchievementEvent::Progress {
                api_name: "slayer".into(),
                value: 2
            }
        );
        assert_eq!(
            events[4],
            AchievementEvent::Achieved {
                api_name: "slayer".into()
            }
        );
        assert!(tracker.achievement("slayer").unwrap().is_achieved());
    }

    #[test]
    fn achieved_goals_fire_only_once() {
        let mut tracker = tracker_with_kill_stat();
        let count = Rc::new(RefCell::new(0usize));
        let sink = Rc::clone(&count);
        tracker.add_observer(Box::new(move |event| {
            if matches!(event, AchievementEvent::Achieved { .. }) {
                *sink.borrow_mut() += 1;
            }
        }));

        tracker.change_stat("kills", 10).unwrap();
        tracker.change_stat("kills", 10).unwrap();
        tracker.update();
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn registering_against_a_finished_stat_marks_achieved_silently() {
        let mut tracker = AchievementTracker::new();
        tracker
            .register_stat(Stat::new("score", "Score", 500, 0, 1000))
            .unwrap();
        tracker
            .register_achievement(Achievement::new(
                "century", "Century", "score", false, 0, 100, 0,
            ))
            .unwrap();
        assert!(tracker.achievement("century").unwrap().is_achieved());

        tracker.update();
        assert!(tracker.goal_percentage("century").unwrap() >= 1.0);
    }

    #[test]
    fn registry_misuse_is_an_error() {
        let mut tracker = tracker_with_kill_stat();
        assert_eq!(
            tracker.register_stat(Stat::counter("kills", "Enemies defeated")),
            Err(AchievementError::DuplicateStat("kills".into()))
        );
        assert_eq!(
            tracker.register_achievement(Achievement::new(
                "slayer", "Slayer", "kills", false, 0, 10, 0
            )),
            Err(AchievementError::DuplicateAchievement("slayer".into()))
        );
        assert_eq!(
            tracker.change_stat("deaths", 1),
            Err(AchievementError::UnknownStat("deaths".into()))
        );
    }
}
