//! Adaptateur de lecture locale au-dessus d'un élément média natif.

mod element;
mod player;

pub use element::{ElementEvent, ElementHandler, MediaElement, MediaElementError};
pub use player::{LocalEvent, LocalEventKind, LocalPlayer};
