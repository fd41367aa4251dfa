//! The single repeating timer that advances the game

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at};

use crate::game::GameStatus;

/// Owns at most one tick interval.
///
/// The interval only exists while the game is running. Disarming drops it,
/// arming creates a fresh one whose first tick is a full period away, so a
/// resume or reset never fires an immediate tick and two timers can never
/// be live at once.
pub struct TickDriver {
    period: Duration,
    interval: Option<Interval>,
}

impl TickDriver {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            interval: None,
        }
    }

    pub fn is_armed(&self) -> bool {
        self.interval.is_some()
    }

    /// Start a new interval, replacing any existing one
    pub fn arm(&mut self) {
        let mut interval = interval_at(Instant::now() + self.period, self.period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
        self.interval = Some(interval);
    }

    pub fn disarm(&mut self) {
        self.interval = None;
    }

    /// Arm while running, disarm otherwise. An already armed driver keeps
    /// its phase.
    pub fn sync(&mut self, status: GameStatus) {
        match (status == GameStatus::Running, self.is_armed()) {
            (true, false) => self.arm(),
            (false, true) => self.disarm(),
            _ => {}
        }
    }

    /// Drop the current interval and start over, if the game is running
    pub fn restart(&mut self, status: GameStatus) {
        self.disarm();
        self.sync(status);
    }

    /// Wait for the next tick. Never completes while disarmed.
    pub async fn tick(&mut self) {
        match self.interval.as_mut() {
            Some(interval) => {
                interval.tick().await;
            }
            None => std::future::pending::<()>().await,
        }
    }
}
