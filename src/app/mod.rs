// Application layer: per-view request lifecycles and text rendering.

pub mod detail_view;
pub mod list_view;
pub mod render;

pub use detail_view::{DetailState, DetailTicket, DetailView};
pub use list_view::ListView;

/// One request lifecycle as seen by the presentation layer.
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }
}
