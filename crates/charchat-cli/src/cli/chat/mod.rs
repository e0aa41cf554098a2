//! Interactive chat: banners, terminal console, rendering and orchestration.

pub mod banner;
pub mod input;
pub mod render;
pub mod runner;
