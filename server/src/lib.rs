//! Stockroom: per-user inventory analytics served over HTTP and the CLI

pub mod api;
mod app;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;
