use std::fmt;

/// Rejected game setup.  The game itself has no runtime failures; everything
/// that can go wrong is caught when the engine is built.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    ZeroInterval { timer: &'static str },
    EmptyPlayfield { width: i32, height: i32 },
    BadSpriteSize { sprite: &'static str, width: i32, height: i32 },
    ZeroFireballSpeed,
    ZeroFrameCount,
    InvertedLimits { min: i32, max: i32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZeroInterval { timer } => write!(f, "{timer} interval must be non-zero"),
            Self::EmptyPlayfield { width, height } => {
                write!(f, "playfield {width}x{height} has no area")
            }
            Self::BadSpriteSize { sprite, width, height } => {
                write!(f, "{sprite} size {width}x{height} must be positive")
            }
            Self::ZeroFireballSpeed => write!(f, "fireball speed must be positive"),
            Self::ZeroFrameCount => write!(f, "dragon needs at least one animation frame"),
            Self::InvertedLimits { min, max } => {
                write!(f, "dragon limits are inverted: min {min} > max {max}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}
