//! **maze-gen** builds seeded procedural mazes: perfect mazes carved by a recursive backtracker and
//! turn style wall layouts, with text and image views of the results.

pub mod cells;
pub mod config;
pub mod errors;
pub mod generators;
pub mod grid;
pub mod grid_displays;
pub mod grid_iterators;
pub mod pathing;
pub mod renderers;
pub mod turns;
pub mod units;
