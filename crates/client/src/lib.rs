pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod notice;
pub mod render;
pub mod runtime;
pub mod selection;
pub mod session;
pub mod terminal;

#[cfg(test)]
mod testing;

pub use xiangqi_core;
