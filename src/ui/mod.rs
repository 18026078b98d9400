pub mod app;
pub mod components;
pub mod state;
pub mod theme;

pub use app::CharlaApp;
pub use state::{AppState, TurnPhase};
pub use theme::Theme;
