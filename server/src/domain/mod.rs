//! Domain logic for inventory analytics

pub mod analytics;
