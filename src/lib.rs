/*
 * Starfield Backdrop - Module Definitions
 *
 * This file defines the module structure for the animated particle backdrop:
 * a drifting, pointer-reactive star field with proximity links, drawn behind
 * a small profile card with social links and a music toggle.
 */

// Re-export key components for easier access
pub use app::Model;
pub use config::AppConfig;
pub use params::{ConnectionStrategy, FieldParams};
pub use particle::Particle;
pub use pointer::PointerTracker;
pub use renderer::{FieldRenderer, Surface};
pub use scheduler::{FrameScheduler, TickSource};
pub use simulation::{FieldSimulator, ParticleField};
pub use spatial_grid::SpatialGrid;
pub use viewport::Viewport;

// Define modules
pub mod app;
pub mod audio;
pub mod config;
pub mod debug;
pub mod media;
#[cfg(feature = "audio")]
pub mod output;
pub mod params;
pub mod particle;
pub mod pointer;
pub mod profile;
pub mod renderer;
pub mod scheduler;
pub mod simulation;
pub mod spatial_grid;
pub mod surface;
pub mod ui;
pub mod viewport;

// Constants
pub const PARTICLE_COUNT: usize = 70;
pub const CONNECTION_DISTANCE: f32 = 160.0;
