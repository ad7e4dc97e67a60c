//! Daily reminder popup controller.
//!
//! The decision logic lives in [`reminder`] and talks to the outside world
//! through three seams: a [`store::KeyValueStore`], a [`clock::Clock`] and a
//! [`reminder::Popup`]. The terminal host (`nudge` binary) and the browser
//! host (`web` feature) each plug their own implementations in.

pub mod clock;
pub mod config;
pub mod reminder;
pub mod store;
pub mod util;

#[cfg(all(feature = "web", target_arch = "wasm32"))]
pub mod web;
