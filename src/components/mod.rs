//! The components module contains all shared components for the site.

mod app;
mod audio_preview;
mod auth_modal;
mod icons;
mod navigation;
mod views;

pub use app::*;
pub use audio_preview::*;
pub use auth_modal::*;
pub use icons::*;
pub use navigation::*;
// Sections are accessed via views::SectionName
