//! Randomized timed gameplay effect scheduler.
//!
//! A [`Scheduler`] owns a table of effects. Every frame it counts down to
//! the next random pick, keeps already running effects ticking, and lets an
//! operator force effects on and off through the manual control surface.

pub mod condition;
pub use condition::eligible;

mod config;
pub use config::Config;

pub mod effects;

mod manual;
pub use manual::{Confirm, ManualControl};

mod registry;
pub use registry::{Condition, Descriptor, Registry, RegistryBuilder, Shape};

mod reload;
pub use reload::Reload;

mod runtime;
pub use runtime::{from_fn, Cadence, Effect, EffectCx, Outcome, Request, Slot};

mod scheduler;
pub use scheduler::{Operation, OverlayLine, Scheduler};

mod timers;
pub use timers::{Timer, Timers};

/// Errors from setting up a scheduler.
#[derive(Clone, Eq, PartialEq, Debug, derive_more::Display)]
pub enum Error {
    #[display("effect {name:?} max {max_secs}s must exceed {min_secs}s")]
    DegenerateDuration {
        name: String,
        max_secs: u32,
        min_secs: u32,
    },
    #[display("effect {name:?} duration doesn't match its shape")]
    ShapeMismatch { name: String },
    #[display("duplicate effect name {name:?}")]
    DuplicateName { name: String },
    #[display("no effects available for random selection")]
    NoSelectableEffects,
    #[display("invalid config: {reason}")]
    InvalidConfig { reason: String },
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
