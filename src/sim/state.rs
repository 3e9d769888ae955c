//! Session state and the actions on its two transitions
//!
//! The session is a two-state machine: `Idle` waits for a tap, `Running`
//! steps physics and scrolls trunks. [`GameState::start`] and
//! [`GameState::game_over`] are the one-shot actions on each edge.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FixedStepper;
use super::collision::BoxShape;
use super::contact::Category;
use super::spawner::Spawner;
use super::trunk::Trunk;
use super::view::{DrawRect, FrameView, PlayerView, TrunkView};
use super::world::{BodyDef, BodyId, PhysicsWorld};
use crate::settings::Settings;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first tap; nothing moves
    Idle,
    /// Physics active, trunks flowing, score counting
    Running,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LossCause {
    /// Touched a trunk barrier
    Collision,
    /// Left the playfield through the top or bottom
    OutOfBounds,
}

/// Things that happened during the last frame (for sound and UI cues)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Jumped,
    Scored { score: u32 },
    TrunkSpawned { id: u32, offset: i32 },
    TrunkCulled { id: u32 },
    GameOver { cause: LossCause, score: u32, high_score: u32 },
}

/// The player-controlled body. Created once and only ever reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    body: BodyId,
    size: f32,
    start: Vec2,
}

impl Player {
    pub fn spawn(world: &mut PhysicsWorld, settings: &Settings) -> Self {
        let start = settings.player_start();
        let half = settings.player_size / 2.0;
        let body = world.create_body(BodyDef::dynamic(
            start,
            BoxShape::centered(half, half),
            Category::Player,
            settings.player_gravity_scale,
        ));
        Self {
            body,
            size: settings.player_size,
            start,
        }
    }

    pub fn body(&self) -> BodyId {
        self.body
    }

    pub fn size(&self) -> f32 {
        self.size
    }

    pub fn position(&self, world: &PhysicsWorld) -> Vec2 {
        world.position(self.body).unwrap_or(self.start)
    }

    pub fn velocity(&self, world: &PhysicsWorld) -> Vec2 {
        world.velocity(self.body).unwrap_or(Vec2::ZERO)
    }

    /// Back to the start position, at rest
    pub fn reset(&self, world: &mut PhysicsWorld) {
        world.set_transform(self.body, self.start);
        world.set_linear_velocity(self.body, Vec2::ZERO);
    }

    /// Replace the current velocity with a purely vertical one
    pub fn set_vertical_velocity(&self, world: &mut PhysicsWorld, vy: f32) {
        world.set_linear_velocity(self.body, Vec2::new(0.0, vy));
    }
}

/// Complete session state
#[derive(Debug)]
pub struct GameState {
    pub settings: Settings,
    /// Seed for trunk offsets
    pub seed: u64,
    rng: Pcg32,
    pub phase: GamePhase,
    /// Points in the current run
    pub score: u32,
    /// Best score since the process started
    pub high_score: u32,
    pub world: PhysicsWorld,
    pub player: Player,
    /// Live trunks (oldest first)
    pub trunks: Vec<Trunk>,
    pub spawner: Spawner,
    pub stepper: FixedStepper,
    /// Player y at the end of the previous frame
    pub last_y: f32,
    /// Frames processed by `update`
    pub frame_count: u64,
    /// Events from the most recent frame
    pub events: Vec<GameEvent>,
    next_trunk_id: u32,
}

impl GameState {
    pub fn new(settings: Settings, seed: u64) -> Self {
        let settings = settings.sanitized();
        let mut world = PhysicsWorld::new(settings.gravity_vec());
        let player = Player::spawn(&mut world, &settings);
        let spawner = Spawner::new(settings.spawn_interval);
        let last_y = settings.player_start().y;

        Self {
            settings,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            high_score: 0,
            world,
            player,
            trunks: Vec::new(),
            spawner,
            stepper: FixedStepper::new(),
            last_y,
            frame_count: 0,
            events: Vec::new(),
            next_trunk_id: 1,
        }
    }

    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    /// Score to display: live score while running, best score while idle
    pub fn displayed_score(&self) -> u32 {
        if self.is_running() {
            self.score
        } else {
            self.high_score
        }
    }

    pub fn player_position(&self) -> Vec2 {
        self.player.position(&self.world)
    }

    pub fn player_velocity(&self) -> Vec2 {
        self.player.velocity(&self.world)
    }

    /// Idle -> Running
    pub fn start(&mut self) {
        if self.is_running() {
            return;
        }

        self.phase = GamePhase::Running;
        self.score = 0;
        self.stepper.reset();
        self.spawn_trunk();
        self.spawner.start();
        self.player.reset(&mut self.world);
        self.last_y = self.player_position().y;

        log::info!(
            "Run started at frame {} (seed {}, high score {})",
            self.frame_count,
            self.seed,
            self.high_score
        );
        self.events.push(GameEvent::Started);
    }

    /// Running -> Idle
    pub fn game_over(&mut self, cause: LossCause) {
        if !self.is_running() {
            return;
        }

        let score = self.score;
        self.high_score = self.high_score.max(score);
        self.score = 0;
        self.spawner.cancel();
        self.stepper.reset();
        self.player
            .set_vertical_velocity(&mut self.world, self.settings.death_pop_velocity);
        self.clear_trunks();
        self.phase = GamePhase::Idle;

        log::info!(
            "Game over ({:?}) at frame {}: score {}, high score {}",
            cause,
            self.frame_count,
            score,
            self.high_score
        );
        self.events.push(GameEvent::GameOver {
            cause,
            score,
            high_score: self.high_score,
        });
    }

    /// Tap while running
    pub fn jump(&mut self) {
        self.player
            .set_vertical_velocity(&mut self.world, self.settings.jump_velocity);
        self.events.push(GameEvent::Jumped);
    }

    /// Award a point for entering a score trigger
    pub fn add_point(&mut self) {
        self.score += 1;
        log::debug!("Scored: {}", self.score);
        self.events.push(GameEvent::Scored { score: self.score });
    }

    /// Spawn a trunk at the right edge with a fresh random offset
    pub fn spawn_trunk(&mut self) {
        let offset = self
            .rng
            .random_range(self.settings.trunk_offset_min..=self.settings.trunk_offset_max);
        let id = self.next_trunk_id;
        self.next_trunk_id += 1;

        let trunk = Trunk::spawn(
            &mut self.world,
            id,
            offset as f32,
            self.settings.spawn_x(),
            self.settings.spawn_y(),
        );
        self.trunks.push(trunk);

        log::debug!("Spawned trunk {} at offset {}", id, offset);
        self.events.push(GameEvent::TrunkSpawned { id, offset });
    }

    /// Destroy every live trunk
    pub fn clear_trunks(&mut self) {
        for trunk in self.trunks.drain(..) {
            trunk.destroy(&mut self.world);
        }
    }

    /// Snapshot for the renderer
    pub fn view(&self) -> FrameView {
        let pos = self.player_position();
        let size = self.player.size();

        FrameView {
            player: PlayerView {
                pos,
                rect: DrawRect::new(pos.x - size / 2.0, pos.y - size / 2.0, size, size),
                ascending: pos.y > self.last_y,
            },
            trunks: self
                .trunks
                .iter()
                .map(|t| {
                    let [upper, lower] = t.draw_rects();
                    TrunkView {
                        id: t.id,
                        upper,
                        lower,
                    }
                })
                .collect(),
            score: self.displayed_score(),
            started: self.is_running(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_idle() {
        let state = GameState::new(Settings::default(), 1);
        assert_eq!(state.phase, GamePhase::Idle);
        assert!(state.trunks.is_empty());
        assert_eq!(state.world.body_count(), 1);
        assert_eq!(state.player_position(), Settings::default().player_start());
        assert!(!state.spawner.is_active());
    }

    #[test]
    fn test_start_spawns_first_trunk_immediately() {
        let mut state = GameState::new(Settings::default(), 1);
        state.start();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.trunks.len(), 1);
        assert_eq!(state.trunks[0].x(), state.settings.screen_width);
        assert_eq!(state.world.body_count(), 4);
        assert!(state.spawner.is_active());
        assert_eq!(state.events, vec![
            GameEvent::TrunkSpawned { id: 1, offset: state.trunks[0].offset_y() as i32 },
            GameEvent::Started,
        ]);
    }

    #[test]
    fn test_offsets_within_range() {
        let mut state = GameState::new(Settings::default(), 7);
        for _ in 0..200 {
            state.spawn_trunk();
        }
        assert!(state.trunks.iter().all(|t| (-35.0..=35.0).contains(&t.offset_y())));
        state.clear_trunks();
        assert_eq!(state.world.body_count(), 1);
    }

    #[test]
    fn test_same_seed_same_offsets() {
        let offsets = |seed| {
            let mut state = GameState::new(Settings::default(), seed);
            (0..20)
                .map(|_| {
                    state.spawn_trunk();
                    state.trunks.last().map(|t| t.offset_y()).unwrap_or_default()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(offsets(42), offsets(42));
    }

    #[test]
    fn test_game_over_archives_and_resets() {
        let mut state = GameState::new(Settings::default(), 1);
        state.start();
        state.add_point();
        state.add_point();
        state.spawn_trunk();

        state.game_over(LossCause::Collision);

        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!(state.high_score, 2);
        assert_eq!(state.score, 0);
        assert!(state.trunks.is_empty());
        assert_eq!(state.world.body_count(), 1);
        assert!(!state.spawner.is_active());
        assert_eq!(state.player_velocity(), Vec2::new(0.0, 20.0));
        assert_eq!(state.displayed_score(), 2);
    }

    #[test]
    fn test_high_score_is_monotonic() {
        let mut state = GameState::new(Settings::default(), 1);
        state.start();
        for _ in 0..5 {
            state.add_point();
        }
        state.game_over(LossCause::OutOfBounds);
        state.start();
        state.add_point();
        state.game_over(LossCause::OutOfBounds);
        assert_eq!(state.high_score, 5);
    }

    #[test]
    fn test_game_over_when_idle_is_noop() {
        let mut state = GameState::new(Settings::default(), 1);
        state.game_over(LossCause::Collision);
        assert!(state.events.is_empty());
    }

    #[test]
    fn test_restart_clears_death_pop() {
        let mut state = GameState::new(Settings::default(), 1);
        state.start();
        state.game_over(LossCause::OutOfBounds);
        state.start();
        assert_eq!(state.player_velocity(), Vec2::ZERO);
        assert_eq!(state.player_position(), state.settings.player_start());
    }

    #[test]
    fn test_view_reports_idle_prompt_and_high_score() {
        let mut state = GameState::new(Settings::default(), 1);
        state.high_score = 9;
        let view = state.view();
        assert!(!view.started);
        assert_eq!(view.score, 9);
        assert!(view.trunks.is_empty());
        assert_eq!(view.player.rect.width, 10.0);

        state.start();
        let view = state.view();
        assert!(view.started);
        assert_eq!(view.score, 0);
        assert_eq!(view.trunks.len(), 1);
    }
}
