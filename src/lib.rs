//! Pokedex TUI - browse the PokeAPI pokemon list and per-pokemon details
//!
//! This library exposes the app's modules for testing.

pub mod action;
pub mod api;
pub mod components;
pub mod effect;
pub mod palette;
pub mod reducer;
pub mod state;
