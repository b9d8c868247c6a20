pub mod entity;
pub mod error;
pub mod settings;
pub mod traits;

pub use entity::EntityRef;
pub use error::{Result, ZoneError};
pub use settings::Settings;
