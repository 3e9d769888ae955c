//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by body and trunk ID)
//! - No rendering or platform dependencies

pub mod clock;
pub mod collision;
pub mod contact;
pub mod spawner;
pub mod state;
pub mod tick;
pub mod trunk;
pub mod view;
pub mod world;

pub use clock::FixedStepper;
pub use collision::{Aabb, BoxShape, CollisionResult, aabb_overlap};
pub use contact::{Category, ContactAction, ContactRule, contact_rule};
pub use spawner::Spawner;
pub use state::{GameEvent, GamePhase, GameState, LossCause, Player};
pub use tick::{TickInput, physics_step, update};
pub use trunk::Trunk;
pub use view::{DrawRect, FrameView, PlayerView, TrunkView};
pub use world::{Body, BodyDef, BodyId, BodyKind, Contact, PhysicsWorld};
