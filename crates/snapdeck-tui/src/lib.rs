pub mod app;
pub mod deck;
pub mod event;
pub mod history;
pub mod input;
pub mod scroll;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use theme::Theme;
