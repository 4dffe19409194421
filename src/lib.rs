//! Dragon Flight: steer a dragon through a storm of fireballs.
//!
//! The library holds the whole game model.  Rendering, sound and input
//! devices sit behind the `Surface` and `Audio` traits and the `Touch`
//! events, so a host only has to translate.

pub mod audio;
pub mod config;
pub mod engine;
pub mod entities;
pub mod error;
pub mod input;
pub mod surface;
pub mod timer;
pub mod view;

pub use config::GameConfig;
pub use engine::{GameEngine, Phase};
pub use error::ConfigError;
pub use view::GameView;
