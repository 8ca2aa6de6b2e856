mod deck;
mod status_bar;

pub use deck::{visible_slices, wrap_text, DeckWidget, VisibleSlice};
pub use status_bar::StatusBarWidget;
