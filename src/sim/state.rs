//! Game state and core simulation types
//!
//! All state that must survive a host snapshot lives here; cosmetic
//! particles and the pending event queue are skipped in serialization.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn::SpawnTimers;
use crate::center_of;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated yet
    Start,
    /// Active gameplay
    Playing,
    /// Frozen mid-run
    Paused,
    /// Score threshold reached, waiting for the next-level command
    /// (or for the victory countdown on the final level)
    LevelComplete,
    /// Run ended, in defeat or victory
    GameOver,
}

/// Enemy size classes. The class fixes hitbox, health, descent damping,
/// fire probability and score value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyClass {
    Basic,
    Medium,
    Boss,
}

impl EnemyClass {
    pub fn size(&self) -> Vec2 {
        match self {
            EnemyClass::Basic => Vec2::new(28.0, 32.0),
            EnemyClass::Medium => Vec2::new(35.0, 35.0),
            EnemyClass::Boss => Vec2::new(50.0, 50.0),
        }
    }

    pub fn health(&self) -> i32 {
        match self {
            EnemyClass::Basic => 1,
            EnemyClass::Medium => 2,
            EnemyClass::Boss => 3,
        }
    }

    /// Heavier classes descend slower
    pub fn descent_damping(&self) -> f32 {
        match self {
            EnemyClass::Basic => 1.0,
            EnemyClass::Medium => 0.8,
            EnemyClass::Boss => 0.6,
        }
    }

    /// Probability of actually firing when the shoot timer expires
    pub fn fire_chance(&self) -> f32 {
        match self {
            EnemyClass::Basic => 0.2,
            EnemyClass::Medium => 0.4,
            EnemyClass::Boss => 0.8,
        }
    }

    /// Score multiplier tier (basic 1, medium 2, boss 3)
    pub fn score_value(&self) -> u64 {
        match self {
            EnemyClass::Basic => 1,
            EnemyClass::Medium => 2,
            EnemyClass::Boss => 3,
        }
    }
}

/// Which side fired a projectile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectileOwner {
    Player,
    Enemy,
}

/// What a projectile was fired from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Standard,
    Laser,
    Rocket,
}

impl WeaponKind {
    pub fn damage(&self) -> i32 {
        match self {
            WeaponKind::Standard => 1,
            WeaponKind::Laser => 2,
            WeaponKind::Rocket => 3,
        }
    }
}

/// A projectile in flight
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: ProjectileOwner,
    pub kind: WeaponKind,
    pub damage: i32,
}

impl Projectile {
    pub fn size(&self) -> Vec2 {
        Vec2::new(PROJECTILE_WIDTH, PROJECTILE_HEIGHT)
    }
}

/// An enemy ship descending through the viewport
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub class: EnemyClass,
    pub health: i32,
    /// Ticks until the next fire attempt; may run negative while the
    /// enemy is outside the firing band
    pub shoot_timer: i32,
}

impl Enemy {
    pub fn size(&self) -> Vec2 {
        self.class.size()
    }
}

/// Timed player buffs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerupKind {
    Rapid,
    Shield,
    MultiShot,
}

/// A falling power-up capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Powerup {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: PowerupKind,
}

/// A falling platform that grants one life on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LifePlatform {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
}

/// Mutually exclusive special weapons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SpecialWeapon {
    Rocket,
    Triple,
    Laser,
}

/// A falling block that arms a special weapon on contact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeaponBlock {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub kind: SpecialWeapon,
}

/// Visual flavor of an explosion particle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticleCue {
    Blast,
    LifeGain,
}

/// A short-lived explosion effect (cosmetic only)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    pub life: u32,
    pub cue: ParticleCue,
}

/// Active power-up effects, one countdown per buff
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActiveEffects {
    pub rapid_fire_ticks: u32,
    pub shield_ticks: u32,
    pub multi_shot_ticks: u32,
}

impl ActiveEffects {
    pub fn rapid_fire(&self) -> bool {
        self.rapid_fire_ticks > 0
    }

    pub fn shield(&self) -> bool {
        self.shield_ticks > 0
    }

    pub fn multi_shot(&self) -> bool {
        self.multi_shot_ticks > 0
    }

    /// Decrement every countdown; expired buffs simply read as inactive
    pub fn step(&mut self) {
        self.rapid_fire_ticks = self.rapid_fire_ticks.saturating_sub(1);
        self.shield_ticks = self.shield_ticks.saturating_sub(1);
        self.multi_shot_ticks = self.multi_shot_ticks.saturating_sub(1);
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub pos: Vec2,
    /// Ticks until the fire key is honored again
    pub shoot_cooldown: u32,
    /// Ticks between shots (lowered on level-up, floored at MIN_SHOOT_RATE)
    pub shoot_rate: u32,
    pub effects: ActiveEffects,
    /// At most one special weapon is armed at a time
    pub special: Option<SpecialWeapon>,
    pub special_ticks: u32,
}

impl Player {
    pub fn new(view: Vec2) -> Self {
        Self {
            pos: Vec2::new(
                view.x / 2.0 - PLAYER_WIDTH / 2.0,
                view.y - PLAYER_START_OFFSET,
            ),
            shoot_cooldown: 0,
            shoot_rate: BASE_SHOOT_RATE,
            effects: ActiveEffects::default(),
            special: None,
            special_ticks: 0,
        }
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// What kind of projectile the ship currently fires.
    /// Triple changes the volley shape, not the projectile itself.
    pub fn shot_kind(&self) -> WeaponKind {
        match self.special {
            Some(SpecialWeapon::Laser) => WeaponKind::Laser,
            Some(SpecialWeapon::Rocket) => WeaponKind::Rocket,
            _ => WeaponKind::Standard,
        }
    }

    /// Whether firing produces a three-shot spread
    pub fn spread_active(&self) -> bool {
        self.special == Some(SpecialWeapon::Triple) || self.effects.multi_shot()
    }

    /// Arm a special weapon, replacing whichever one was active
    pub fn arm(&mut self, weapon: SpecialWeapon) {
        self.special = Some(weapon);
        self.special_ticks = WEAPON_DURATION;
    }

    /// Decrement the special-weapon countdown, disarming on expiry
    pub fn step_weapon(&mut self) {
        if self.special.is_some() {
            self.special_ticks = self.special_ticks.saturating_sub(1);
            if self.special_ticks == 0 {
                self.special = None;
            }
        }
    }
}

/// Host commands driving the state machine. Commands received in a phase
/// that does not permit them are silent no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Pause,
    Resume,
    Restart,
    AdvanceLevel,
}

/// State transitions and visual cues for the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum SessionEvent {
    Started,
    Paused,
    Resumed,
    Restarted,
    /// A new level began via the advance-level command
    LevelStarted { level: u32 },
    /// Carries the pre-bonus score; the bonus is added to the session
    /// score at the same instant
    LevelCleared { level: u32, score: u64, bonus: u64 },
    PlayerHit { lives_left: u32 },
    LifeGained { lives: u32 },
    GameOver { score: u64, level: u32, victory: bool },
}

/// Complete game session (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameSession {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Live RNG stream (advances every tick with spawns and fire rolls)
    pub rng: Pcg32,
    /// Viewport size in pixels
    pub view: Vec2,
    pub phase: GamePhase,
    /// Current level (1..=MAX_LEVEL)
    pub level: u32,
    pub score: u64,
    pub lives: u32,
    /// Difficulty multiplier; scales enemy movement and grows by 0.5 per level
    pub game_speed: f32,
    /// Simulation tick counter
    pub tick_count: u64,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub powerups: Vec<Powerup>,
    pub platforms: Vec<LifePlatform>,
    pub weapon_blocks: Vec<WeaponBlock>,
    /// Visual particles (not gameplay-affecting)
    #[serde(skip)]
    pub particles: Vec<Particle>,
    pub(crate) spawn_timers: SpawnTimers,
    /// Ticks left on the level-complete screen before a final-level victory
    pub victory_countdown: u32,
    /// Events accumulated since the last drain
    #[serde(skip)]
    events: Vec<SessionEvent>,
    /// Next entity ID
    next_id: u32,
}

impl GameSession {
    /// Create a session with the default viewport
    pub fn new(seed: u64) -> Self {
        Self::with_viewport(seed, Vec2::new(VIEW_WIDTH, VIEW_HEIGHT))
    }

    /// Create a session for an embedder with a different screen size
    pub fn with_viewport(seed: u64, view: Vec2) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            view,
            phase: GamePhase::Start,
            level: 1,
            score: 0,
            lives: STARTING_LIVES,
            game_speed: 1.0,
            tick_count: 0,
            player: Player::new(view),
            enemies: Vec::new(),
            projectiles: Vec::new(),
            powerups: Vec::new(),
            platforms: Vec::new(),
            weapon_blocks: Vec::new(),
            particles: Vec::new(),
            spawn_timers: SpawnTimers::default(),
            victory_countdown: 0,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Apply a host command. Invalid commands for the current phase are
    /// silent no-ops.
    pub fn apply(&mut self, command: Command) {
        match (command, self.phase) {
            (Command::Start, GamePhase::Start) => {
                self.reset();
                self.phase = GamePhase::Playing;
                self.events.push(SessionEvent::Started);
                log::info!("session started (seed {})", self.seed);
            }
            (Command::Pause, GamePhase::Playing) => {
                self.phase = GamePhase::Paused;
                self.events.push(SessionEvent::Paused);
            }
            (Command::Resume, GamePhase::Paused) => {
                self.phase = GamePhase::Playing;
                self.events.push(SessionEvent::Resumed);
            }
            (Command::Restart, _) => {
                self.reset();
                self.events.push(SessionEvent::Restarted);
                log::info!("session reset");
            }
            (Command::AdvanceLevel, GamePhase::LevelComplete)
                if self.level < MAX_LEVEL && self.victory_countdown == 0 =>
            {
                self.level += 1;
                self.game_speed += 0.5;
                self.player.shoot_rate = (self.player.shoot_rate - 2).max(MIN_SHOOT_RATE);
                self.phase = GamePhase::Playing;
                self.events.push(SessionEvent::LevelStarted { level: self.level });
                log::info!(
                    "level {} started (game speed {:.1})",
                    self.level,
                    self.game_speed
                );
            }
            _ => {}
        }
    }

    /// Wipe the run back to its initial values, including the RNG stream
    fn reset(&mut self) {
        self.phase = GamePhase::Start;
        self.level = 1;
        self.score = 0;
        self.lives = STARTING_LIVES;
        self.game_speed = 1.0;
        self.tick_count = 0;
        self.player = Player::new(self.view);
        self.enemies.clear();
        self.projectiles.clear();
        self.powerups.clear();
        self.platforms.clear();
        self.weapon_blocks.clear();
        self.particles.clear();
        self.spawn_timers = SpawnTimers::default();
        self.victory_countdown = 0;
        self.rng = Pcg32::seed_from_u64(self.seed);
        self.next_id = 1;
    }

    /// Spawn an explosion effect centered on `center`
    pub(crate) fn spawn_particle(&mut self, center: Vec2, cue: ParticleCue) {
        self.particles.push(Particle {
            pos: center,
            life: PARTICLE_LIFE,
            cue,
        });
    }

    /// One hit on the player: lose a life, flash an explosion, and end the
    /// run when the last life goes. Extra hits on the same tick are absorbed.
    pub(crate) fn player_hit(&mut self) {
        if self.lives == 0 {
            return;
        }
        self.lives -= 1;
        let center = center_of(self.player.pos, self.player.size());
        self.spawn_particle(center, ParticleCue::Blast);
        self.events.push(SessionEvent::PlayerHit {
            lives_left: self.lives,
        });
        if self.lives == 0 {
            self.game_over(false);
        }
    }

    pub(crate) fn gain_life(&mut self) {
        self.lives += 1;
        let center = center_of(self.player.pos, self.player.size());
        self.spawn_particle(center, ParticleCue::LifeGain);
        self.events.push(SessionEvent::LifeGained { lives: self.lives });
    }

    pub(crate) fn activate_powerup(&mut self, kind: PowerupKind) {
        match kind {
            PowerupKind::Rapid => self.player.effects.rapid_fire_ticks = EFFECT_DURATION,
            PowerupKind::Shield => self.player.effects.shield_ticks = EFFECT_DURATION,
            PowerupKind::MultiShot => self.player.effects.multi_shot_ticks = EFFECT_DURATION,
        }
        log::debug!("powerup {:?} active", kind);
    }

    /// Score threshold reached: hand out the life bonus and either wait for
    /// the advance-level command or, on the final level, start the victory
    /// countdown. Only reachable from Playing, so the bonus cannot
    /// double-apply.
    pub(crate) fn complete_level(&mut self) {
        let bonus = self.lives as u64 * LEVEL_BONUS_PER_LIFE;
        self.phase = GamePhase::LevelComplete;
        self.events.push(SessionEvent::LevelCleared {
            level: self.level,
            score: self.score,
            bonus,
        });
        self.score += bonus;
        log::info!(
            "level {} cleared at score {} (+{} bonus)",
            self.level,
            self.score - bonus,
            bonus
        );
        if self.level >= MAX_LEVEL {
            self.victory_countdown = VICTORY_DELAY;
        }
    }

    pub(crate) fn game_over(&mut self, victory: bool) {
        self.phase = GamePhase::GameOver;
        self.victory_countdown = 0;
        self.events.push(SessionEvent::GameOver {
            score: self.score,
            level: self.level,
            victory,
        });
        log::info!(
            "game over ({}) at level {} with score {}",
            if victory { "victory" } else { "defeat" },
            self.level,
            self.score
        );
    }

    /// Take all events accumulated since the last drain
    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }
}
