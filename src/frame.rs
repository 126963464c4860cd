//! Frame loop
//!
//! Owns the single mutable [`GameState`] and runs input, update and render
//! once per display refresh. The host decides when `frame` is called
//! (requestAnimationFrame in the browser, a plain loop natively); the loop
//! decides whether it keeps running through its [`CancelToken`].

use std::cell::Cell;
use std::rc::Rc;

use crate::audio::{AudioSink, SoundEffect};
use crate::config::{GameConfig, Pacing};
use crate::consts::{MAX_FRAME_DT, MAX_MOVES_PER_FRAME, MAX_SUBSTEPS};
use crate::input::InputSource;
use crate::renderer::{DrawSurface, RenderStyle, render};
use crate::restart::RestartSignal;
use crate::settings::Settings;
use crate::sim::{Command, GameEvent, GameState, PaddleMove, TickInput, TickReport, tick};

/// Shared stop flag; clones observe the same flag
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Rc<Cell<bool>>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

/// Whether the host should schedule another frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    Continue,
    Cancelled,
}

/// Game instance driving simulation and rendering
pub struct FrameLoop<S, I, A> {
    state: GameState,
    style: RenderStyle,
    pacing: Pacing,
    sound: bool,
    surface: S,
    input: I,
    audio: A,
    restart: RestartSignal,
    cancel: CancelToken,
    accumulator: f32,
    last_time: Option<f64>,
    /// Events of the most recent frame
    events: Vec<GameEvent>,
    frames: u64,
}

impl<S, I, A> FrameLoop<S, I, A>
where
    S: DrawSurface,
    I: InputSource,
    A: AudioSink,
{
    pub fn new(config: &GameConfig, settings: &Settings, surface: S, input: I, audio: A) -> Self {
        Self {
            state: GameState::new(config),
            style: RenderStyle::new(config, settings),
            pacing: config.pacing,
            sound: settings.effective_volume() > 0.0,
            surface,
            input,
            audio,
            restart: RestartSignal::new(),
            cancel: CancelToken::new(),
            accumulator: 0.0,
            last_time: None,
            events: Vec::new(),
            frames: 0,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn input_mut(&mut self) -> &mut I {
        &mut self.input
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    /// Pulses once per round reset. Subscribers run while the loop is
    /// mid-frame, so they must not reach back into the loop.
    pub fn restart_signal(&self) -> &RestartSignal {
        &self.restart
    }

    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Events produced during the most recent frame
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Frames rendered so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Turn bounce sounds on or off
    pub fn set_sound(&mut self, on: bool) {
        self.sound = on;
    }

    /// Run one frame at host timestamp `time_ms`
    pub fn frame(&mut self, time_ms: f64) -> FrameOutcome {
        if self.cancel.is_cancelled() {
            return FrameOutcome::Cancelled;
        }
        self.events.clear();

        let mut input = TickInput {
            moves: self.drain_input(),
        };
        let steps = self.steps_due(time_ms);

        if steps == 0 {
            // No step this frame; the paddle still answers the keys
            for &mv in &input.moves {
                self.state.paddle.apply(mv, &self.state.arena);
            }
        }

        for _ in 0..steps {
            let report = tick(&mut self.state, &input);
            input.moves.clear();
            self.handle_report(report);
        }

        render(&self.state, &self.style, &mut self.surface);
        self.frames += 1;
        FrameOutcome::Continue
    }

    /// Drive `count` frames spaced `frame_ms` apart; returns frames run
    pub fn run_frames(&mut self, count: u64, frame_ms: f64) -> u64 {
        let mut ran = 0;
        for i in 0..count {
            if self.frame(i as f64 * frame_ms) == FrameOutcome::Cancelled {
                log::info!("Frame loop cancelled after {} frames", ran);
                break;
            }
            ran += 1;
        }
        ran
    }

    fn drain_input(&mut self) -> Vec<PaddleMove> {
        let mut moves = Vec::new();
        while moves.len() < MAX_MOVES_PER_FRAME {
            match self.input.poll(&self.state) {
                Some(mv) => moves.push(mv),
                None => break,
            }
        }
        moves
    }

    /// Number of simulation steps to run this frame
    fn steps_due(&mut self, time_ms: f64) -> u32 {
        let Some(step_dt) = self.pacing.step_dt() else {
            self.last_time = Some(time_ms);
            return 1;
        };

        let dt = match self.last_time {
            Some(last) => (((time_ms - last) / 1000.0) as f32).max(0.0),
            None => step_dt,
        };
        self.last_time = Some(time_ms);
        self.accumulator += dt.min(MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= step_dt && steps < MAX_SUBSTEPS {
            self.accumulator -= step_dt;
            steps += 1;
        }
        steps
    }

    fn handle_report(&mut self, report: TickReport) {
        for event in &report.events {
            match event {
                GameEvent::WallBounce => self.play(SoundEffect::WallHit),
                GameEvent::PaddleBounce { .. } => self.play(SoundEffect::PaddleHit),
                GameEvent::TopWallImpact => {}
            }
        }
        self.events.extend(report.events);

        if let Some(Command::Restart) = report.command {
            self.state.restart();
            log::info!(
                "Round {} started after {} ticks",
                self.state.round,
                self.state.time_ticks
            );
            self.restart.publish();
        }
    }

    fn play(&mut self, effect: SoundEffect) {
        if self.sound {
            self.audio.play(effect);
        }
    }
}
