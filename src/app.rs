//! Loop ownership: input queue, frame scheduling, restart and resize.
//!
//! The browser drives the game through a callback-per-frame primitive. To
//! keep that testable (and to rule out duplicate loops advancing the same
//! state), the `Session` owns at most one pending `FrameHandle` and always
//! cancels it before starting a fresh loop. Schedulers are injected, so
//! tests run against `FakeScheduler` with no display at all.

use std::collections::VecDeque;

use crate::consts::INPUT_QUEUE_CAP;
use crate::highscores::BestScore;
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

/// Identifier for a scheduled frame callback
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameHandle(pub i32);

/// "Schedule a callback before next frame" / "cancel a scheduled callback"
pub trait FrameScheduler {
    /// Request one frame callback; `None` if the platform refused
    fn request_frame(&mut self) -> Option<FrameHandle>;
    /// Cancel a previously requested callback
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Recording scheduler for tests and the headless native build
#[derive(Debug, Default)]
pub struct FakeScheduler {
    next_id: i32,
    pub scheduled: Vec<FrameHandle>,
    pub cancelled: Vec<FrameHandle>,
}

impl FakeScheduler {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameScheduler for FakeScheduler {
    fn request_frame(&mut self) -> Option<FrameHandle> {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.scheduled.push(handle);
        Some(handle)
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.cancelled.push(handle);
    }
}

/// Discrete input events, delivered asynchronously and consumed once per
/// frame boundary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// Jump impulse (key press, tap, click)
    Flap,
}

/// Owns the game state, the best score, and the frame loop
pub struct Session<S: FrameScheduler> {
    pub state: GameState,
    pub best: BestScore,
    scheduler: S,
    pending: Option<FrameHandle>,
    queue: VecDeque<InputEvent>,
}

impl<S: FrameScheduler> Session<S> {
    pub fn new(width: f32, height: f32, seed: u64, scheduler: S) -> Self {
        Self {
            state: GameState::new(width, height, seed),
            best: BestScore::load(),
            scheduler,
            pending: None,
            queue: VecDeque::with_capacity(INPUT_QUEUE_CAP),
        }
    }

    /// The frame currently scheduled, if any
    pub fn pending_frame(&self) -> Option<FrameHandle> {
        self.pending
    }

    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Queue a discrete input event; dropped if the queue is full
    pub fn queue_event(&mut self, event: InputEvent) {
        if self.queue.len() < INPUT_QUEUE_CAP {
            self.queue.push_back(event);
        } else {
            log::debug!("input queue full, dropping {:?}", event);
        }
    }

    /// Begin a fresh run (from Idle or the terminal overlay). Cancels any
    /// pending frame before scheduling a new one, so exactly one loop runs.
    pub fn start(&mut self, seed: u64) {
        self.cancel_pending();
        self.state = GameState::new(self.state.width, self.state.height, seed);
        self.state.phase = GamePhase::Running;
        self.queue.clear();
        self.schedule();
        log::info!("run started (seed {seed})");
    }

    /// One frame: drain queued input, tick, track the best score, and
    /// schedule the next frame unless the run just ended. Returns the
    /// events the tick emitted, for frontend side effects.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        // The callback that invoked us was the pending frame
        self.pending = None;

        let input = self.drain_input();
        tick(&mut self.state, &input);

        let events = self.state.take_events();
        if events.contains(&GameEvent::Scored) && self.best.record(self.state.score) {
            log::info!("new best score: {}", self.best.value);
        }

        if self.state.phase == GamePhase::Running {
            self.schedule();
        }
        events
    }

    /// Surface dimensions changed: rescale in-flight entities and restart
    /// the pending frame so the old callback cannot race the new one
    pub fn resize(&mut self, width: f32, height: f32) {
        let had_pending = self.pending.is_some();
        self.cancel_pending();
        self.state.resize(width, height);
        if had_pending {
            self.schedule();
        }
    }

    fn drain_input(&mut self) -> TickInput {
        let mut input = TickInput::default();
        while let Some(event) = self.queue.pop_front() {
            match event {
                InputEvent::Flap => input.flap = true,
            }
        }
        input
    }

    fn schedule(&mut self) {
        self.pending = self.scheduler.request_frame();
        if self.pending.is_none() {
            log::warn!("frame scheduler refused a callback; loop stalled");
        }
    }

    fn cancel_pending(&mut self) {
        if let Some(handle) = self.pending.take() {
            self.scheduler.cancel_frame(handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Pipe;
    use glam::Vec2;

    fn session() -> Session<FakeScheduler> {
        Session::new(800.0, 600.0, 42, FakeScheduler::new())
    }

    #[test]
    fn start_schedules_exactly_one_frame() {
        let mut s = session();
        assert_eq!(s.pending_frame(), None);
        s.start(1);
        assert_eq!(s.scheduler().scheduled.len(), 1);
        assert_eq!(s.pending_frame(), Some(s.scheduler().scheduled[0]));
    }

    #[test]
    fn restart_cancels_pending_frame_and_resets_state() {
        let mut s = session();
        s.start(1);
        let first = s.pending_frame().unwrap();

        // Accumulate some run state
        s.queue_event(InputEvent::Flap);
        s.frame();
        s.state.score = 7;
        s.state.pipes.push(Pipe::new(300.0, 100.0));

        let rescheduled = s.pending_frame().unwrap();
        s.start(2);
        // The fired frame is gone; only the still-pending one gets cancelled
        assert_eq!(s.scheduler().cancelled, vec![rescheduled]);
        let second = s.pending_frame().unwrap();
        assert_ne!(first, second);
        assert_ne!(rescheduled, second);

        assert_eq!(s.state.score, 0);
        assert!(s.state.pipes.is_empty());
        assert_eq!(s.state.bird.pos, Vec2::new(200.0, 300.0));
        assert_eq!(s.state.bird.velocity, 0.0);
        assert_eq!(s.state.phase, GamePhase::Running);
    }

    #[test]
    fn restart_before_frame_fires_cancels_it() {
        let mut s = session();
        s.start(1);
        let first = s.pending_frame().unwrap();
        // Restart without the scheduled frame ever firing
        s.start(2);
        assert_eq!(s.scheduler().cancelled, vec![first]);
        // Only one live loop remains
        assert_eq!(s.scheduler().scheduled.len(), 2);
    }

    #[test]
    fn frame_drains_queue_and_reschedules() {
        let mut s = session();
        s.start(1);
        s.queue_event(InputEvent::Flap);
        s.queue_event(InputEvent::Flap);

        let events = s.frame();
        assert!(events.contains(&GameEvent::Flapped));
        assert_eq!(s.state.bird.velocity, FLAP_IMPULSE);
        assert!(s.pending_frame().is_some(), "running loop keeps scheduling");

        // Queue was fully consumed at the frame boundary
        let events = s.frame();
        assert!(!events.contains(&GameEvent::Flapped));
    }

    #[test]
    fn input_queue_is_bounded() {
        let mut s = session();
        for _ in 0..(INPUT_QUEUE_CAP + 10) {
            s.queue_event(InputEvent::Flap);
        }
        assert_eq!(s.queue.len(), INPUT_QUEUE_CAP);
    }

    #[test]
    fn terminal_frame_stops_the_loop() {
        let mut s = session();
        s.start(1);
        s.state.bird.pos.y = 600.0 - GROUND_MARGIN;

        let events = s.frame();
        assert!(events.contains(&GameEvent::Crashed));
        assert_eq!(s.state.phase, GamePhase::GameOver);
        assert_eq!(s.pending_frame(), None, "no frame scheduled after game over");
    }

    #[test]
    fn best_score_tracks_maximum_across_runs() {
        let mut s = session();
        s.start(1);
        // Arrange a pipe about to be passed
        s.state.pipes.push(Pipe::new(151.0, 250.0));
        s.state.bird.pos = Vec2::new(200.0, 350.0);
        s.frame();
        assert_eq!(s.state.score, 1);
        assert_eq!(s.best.value, 1);

        // A worse run never lowers the best
        s.start(2);
        s.state.bird.pos.y = 600.0;
        s.frame();
        assert_eq!(s.state.score, 0);
        assert_eq!(s.best.value, 1);
    }

    #[test]
    fn resize_rescales_and_replaces_pending_frame() {
        let mut s = session();
        s.start(1);
        let before = s.pending_frame().unwrap();
        s.state.pipes.push(Pipe::new(400.0, 100.0));

        s.resize(1600.0, 600.0);

        assert_eq!(s.scheduler().cancelled, vec![before]);
        assert!(s.pending_frame().is_some());
        assert_ne!(s.pending_frame(), Some(before));
        assert_eq!(s.state.pipes[0].x, 800.0);
        assert_eq!(s.state.bird.pos.x, 400.0);
    }

    #[test]
    fn resize_while_idle_schedules_nothing() {
        let mut s = session();
        s.resize(400.0, 300.0);
        assert_eq!(s.pending_frame(), None);
        assert!(s.scheduler().scheduled.is_empty());
    }
}
