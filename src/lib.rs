//! Punch card of git commit activity.
//!
//! Reads `git log` author dates, bins them into a 7×24 weekday/hour grid,
//! normalizes by the busiest cell and hands the result to a [`render::Renderer`].

pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod model;
pub mod punch;
pub mod render;
