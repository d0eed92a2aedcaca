//! Round lifecycle
//!
//! `Loading -> Countdown -> Running -> GameOver -> Countdown ...`
//!
//! [`Lifecycle`] owns the game state, layout, settings and score store. The
//! driver feeds it events and gets back a [`Response`] saying which timer
//! should be running, what to draw and which UI changes to make. Exactly one
//! timer is active at a time; the lifecycle never schedules anything itself.

use crate::consts::COUNTDOWN_TICK_MS;
use crate::highscores::ScoreStore;
use crate::layout::Layout;
use crate::persistence::KeyValueStore;
use crate::renderer::Scene;
use crate::settings::Settings;
use crate::sim::{Direction, GameState, TickInput, TickOutcome, tick};

/// Current phase of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the background image
    Loading,
    /// Counting down to the next round
    Countdown,
    /// Simulation ticking
    Running,
    /// Round ended, waiting for a name or a new game
    GameOver,
}

/// Which repeating timer drives the current phase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Countdown,
    Simulation,
}

/// Timer instruction for the driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Schedule {
    /// Leave the active timer alone
    #[default]
    Keep,
    /// Replace the active timer
    Start { kind: TimerKind, interval_ms: u32 },
    /// Cancel the active timer
    Stop,
}

/// Changes to the DOM around the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiCommand {
    ShowGameOver { score: u32 },
    HideGameOver,
    /// High score list changed
    RefreshScores,
}

/// Everything that can happen to the game
#[derive(Debug, Clone, PartialEq)]
pub enum LifecycleEvent {
    /// Background asset finished loading (or failed; the game runs anyway)
    AssetsLoaded,
    /// One second of countdown elapsed
    CountdownTick,
    /// Simulation timer fired
    SimTick,
    /// Viewport changed size
    Resize { width: f32, height: f32 },
    /// Direction intent from keyboard or touch
    Steer(Direction),
    /// Toggle demo mode
    ToggleAutopilot,
    /// Player submitted a name on the game-over screen
    SubmitScore(String),
    /// Player asked for another round
    NewGame,
}

/// Result of handling one event
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Response {
    pub schedule: Schedule,
    pub scene: Option<Scene>,
    pub ui: Vec<UiCommand>,
}

impl Response {
    fn draw(scene: Scene) -> Self {
        Self {
            scene: Some(scene),
            ..Default::default()
        }
    }
}

/// Abstract DOM capabilities the lifecycle needs
pub trait GameUi {
    fn set_game_over_visible(&mut self, visible: bool);
    fn set_final_score(&mut self, score: u32);
    fn render_scores(&mut self, lines: &[String]);
}

/// Game instance holding all state
pub struct Lifecycle<S: KeyValueStore> {
    phase: Phase,
    state: GameState,
    layout: Layout,
    settings: Settings,
    scores: ScoreStore<S>,
    input: TickInput,
    active_timer: Option<TimerKind>,
    /// Last countdown value drawn, for redraws on resize
    shown_countdown: Option<i32>,
    /// A name was saved for the current round
    score_submitted: bool,
    /// The autopilot steered at least one tick this round
    autopilot_round: bool,
}

impl<S: KeyValueStore> Lifecycle<S> {
    pub fn new(seed: u64, settings: Settings, scores: ScoreStore<S>, layout: Layout) -> Self {
        let mut state = GameState::new(seed);
        state.countdown = settings.countdown_from;
        Self {
            phase: Phase::Loading,
            state,
            layout,
            settings,
            scores,
            input: TickInput::default(),
            active_timer: None,
            shown_countdown: None,
            score_submitted: false,
            autopilot_round: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn scores(&self) -> &ScoreStore<S> {
        &self.scores
    }

    pub fn active_timer(&self) -> Option<TimerKind> {
        self.active_timer
    }

    pub fn autopilot(&self) -> bool {
        self.input.autopilot
    }

    /// Simulation interval for the current layout
    pub fn sim_interval_ms(&self) -> u32 {
        self.layout
            .tick_interval_ms(self.settings.tick_ms, self.settings.scale_tick_rate)
    }

    /// Scene for the current phase, if anything is on screen yet
    pub fn current_scene(&self) -> Option<Scene> {
        match self.phase {
            Phase::Loading => None,
            Phase::Countdown => self.shown_countdown.map(Scene::Countdown),
            Phase::Running => Some(Scene::Play),
            Phase::GameOver => Some(Scene::GameOver),
        }
    }

    /// Handle one event
    pub fn handle(&mut self, event: LifecycleEvent) -> Response {
        let response = match event {
            LifecycleEvent::AssetsLoaded => self.on_assets_loaded(),
            LifecycleEvent::CountdownTick => self.on_countdown_tick(),
            LifecycleEvent::SimTick => self.on_sim_tick(),
            LifecycleEvent::Resize { width, height } => self.on_resize(width, height),
            LifecycleEvent::Steer(dir) => {
                if self.phase == Phase::Running {
                    self.state.steer(dir);
                }
                Response::default()
            }
            LifecycleEvent::ToggleAutopilot => {
                self.input.autopilot = !self.input.autopilot;
                log::info!("Autopilot: {}", self.input.autopilot);
                Response::default()
            }
            LifecycleEvent::SubmitScore(name) => self.on_submit_score(&name),
            LifecycleEvent::NewGame => self.on_new_game(),
        };

        match response.schedule {
            Schedule::Start { kind, .. } => self.active_timer = Some(kind),
            Schedule::Stop => self.active_timer = None,
            Schedule::Keep => {}
        }
        response
    }

    /// Push UI commands to the DOM
    pub fn apply_ui<U: GameUi + ?Sized>(&self, commands: &[UiCommand], ui: &mut U) {
        for command in commands {
            match *command {
                UiCommand::ShowGameOver { score } => {
                    ui.set_final_score(score);
                    ui.set_game_over_visible(true);
                }
                UiCommand::HideGameOver => ui.set_game_over_visible(false),
                UiCommand::RefreshScores => ui.render_scores(&self.scores.board().lines()),
            }
        }
    }

    fn start_countdown(&mut self) -> Response {
        self.phase = Phase::Countdown;
        self.state.countdown = self.settings.countdown_from;
        self.shown_countdown = None;
        log::info!("Countdown from {}", self.state.countdown);
        Response {
            schedule: Schedule::Start {
                kind: TimerKind::Countdown,
                interval_ms: COUNTDOWN_TICK_MS,
            },
            ..Default::default()
        }
    }

    fn on_assets_loaded(&mut self) -> Response {
        if self.phase != Phase::Loading {
            return Response::default();
        }
        let mut response = self.start_countdown();
        response.ui.push(UiCommand::RefreshScores);
        response
    }

    fn on_countdown_tick(&mut self) -> Response {
        if self.phase != Phase::Countdown {
            return Response::default();
        }

        // Show the current value, then count down
        let shown = self.state.countdown;
        self.shown_countdown = Some(shown);
        self.state.countdown -= 1;
        let mut response = Response::draw(Scene::Countdown(shown));

        if self.state.countdown < 0 {
            self.state.reset();
            self.state.running = true;
            self.score_submitted = false;
            self.autopilot_round = false;
            self.phase = Phase::Running;
            response.schedule = Schedule::Start {
                kind: TimerKind::Simulation,
                interval_ms: self.sim_interval_ms(),
            };
            log::info!("Round started ({} ms ticks)", self.sim_interval_ms());
        }
        response
    }

    fn on_sim_tick(&mut self) -> Response {
        if self.phase != Phase::Running {
            return Response::default();
        }

        self.autopilot_round |= self.input.autopilot;
        match tick(&mut self.state, &self.input) {
            TickOutcome::Collided(_) => {
                self.phase = Phase::GameOver;
                Response {
                    schedule: Schedule::Stop,
                    scene: Some(Scene::GameOver),
                    ui: vec![UiCommand::ShowGameOver {
                        score: self.state.score,
                    }],
                }
            }
            _ => Response::draw(Scene::Play),
        }
    }

    fn on_resize(&mut self, width: f32, height: f32) -> Response {
        let old_interval = self.sim_interval_ms();
        self.layout = Layout::from_viewport(width, height);
        log::debug!("Resized to scale {:.3}", self.layout.scale);

        let mut response = Response {
            scene: self.current_scene(),
            ..Default::default()
        };
        let interval_ms = self.sim_interval_ms();
        if self.phase == Phase::Running && interval_ms != old_interval {
            response.schedule = Schedule::Start {
                kind: TimerKind::Simulation,
                interval_ms,
            };
        }
        response
    }

    /// Record the round's score. Saving never resets the round; only
    /// `NewGame` does. Rounds the autopilot played are not recorded.
    fn on_submit_score(&mut self, name: &str) -> Response {
        if self.phase != Phase::GameOver || self.score_submitted {
            return Response::default();
        }
        if self.autopilot_round {
            log::info!("Autopilot round, score {} not recorded", self.state.score);
            return Response::default();
        }
        match self.scores.submit(name, self.state.score as u64) {
            Some(rank) => log::info!("Score {} saved at rank {}", self.state.score, rank),
            None if name.trim().is_empty() => return Response::default(),
            None => log::info!("Score {} didn't make the board", self.state.score),
        }
        self.score_submitted = true;
        Response {
            ui: vec![UiCommand::RefreshScores],
            ..Default::default()
        }
    }

    fn on_new_game(&mut self) -> Response {
        if self.phase != Phase::GameOver {
            return Response::default();
        }
        let mut response = self.start_countdown();
        response.ui.push(UiCommand::HideGameOver);
        response
    }
}
