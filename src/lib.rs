//! Random joke card: fetches one joke from one of two public joke APIs with
//! layered retry, and exposes the result through a single outcome slot.

pub mod config;
pub mod error;
pub mod fetch;
pub mod jokes;
pub mod retry;
pub mod services;
pub mod state;
