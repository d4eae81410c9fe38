//! Timer handles owned by the play loop
//!
//! The engine asks for timers through [`TimerCommand`]s; [`GameClock`] turns
//! them into a tokio [`Interval`] for ticks plus a set of one-shot sleeps.
//! Changing the tick period replaces the interval outright so the next tick
//! lands one full new period after the change.

use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;
use std::time::Duration;
use tokio::time::{Instant, Interval, MissedTickBehavior, interval_at, sleep};

use crate::game::{Deferred, TimerCommand};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Tick,
    Deferred(Deferred),
}

pub struct GameClock {
    tick: Option<Interval>,
    pending: FuturesUnordered<BoxFuture<'static, Deferred>>,
}

impl GameClock {
    pub fn new() -> Self {
        Self {
            tick: None,
            pending: FuturesUnordered::new(),
        }
    }

    pub fn apply(&mut self, commands: impl IntoIterator<Item = TimerCommand>) {
        for command in commands {
            match command {
                TimerCommand::RestartTick(period) => {
                    let mut timer = interval_at(Instant::now() + period, period);
                    timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
                    self.tick = Some(timer);
                }
                TimerCommand::StopTick => self.tick = None,
                TimerCommand::Schedule(delay, deferred) => {
                    self.pending.push(Box::pin(async move {
                        sleep(delay).await;
                        deferred
                    }));
                }
                TimerCommand::CancelAll => {
                    self.tick = None;
                    self.pending = FuturesUnordered::new();
                }
            }
        }
    }

    /// Period of the running tick timer, if any
    pub fn tick_period(&self) -> Option<Duration> {
        self.tick.as_ref().map(Interval::period)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Wait for the next tick or one-shot. Cancel safe.
    pub async fn next(&mut self) -> ClockEvent {
        let Self { tick, pending } = self;
        tokio::select! {
            _ = next_tick(tick) => ClockEvent::Tick,
            Some(deferred) = pending.next(), if !pending.is_empty() => ClockEvent::Deferred(deferred),
        }
    }
}

impl Default for GameClock {
    fn default() -> Self {
        Self::new()
    }
}

async fn next_tick(tick: &mut Option<Interval>) {
    match tick {
        Some(timer) => {
            timer.tick().await;
        }
        None => std::future::pending::<()>().await,
    }
}
