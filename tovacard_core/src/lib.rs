pub mod bootstrap;
pub mod composer;
pub mod config;
pub mod error;
pub mod fonts;
pub mod gemini;
pub mod media;
pub mod pipeline;
pub mod session;
pub mod styles;
pub mod telemetry;

pub use bootstrap::CardServices;
pub use error::CardError;
