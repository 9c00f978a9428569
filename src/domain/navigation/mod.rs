//! Navigation module - explicit screen graph.
//!
//! Screens are a closed enum and every move is a [`NavEvent`] checked by
//! [`Screen::on`], so an unknown destination cannot be expressed.

mod navigator;
mod screen;

pub use navigator::Navigator;
pub use screen::{NavEvent, Screen, Tab};
