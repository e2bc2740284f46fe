pub mod di;
pub mod entity;
pub mod interactor;
pub mod presenter;
pub mod settings;
pub mod solana;
pub mod view;

// Re-export commonly used items
pub use di::*;
pub use entity::*;
pub use interactor::*;
pub use presenter::*;
pub use settings::Settings;
pub use view::*;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
