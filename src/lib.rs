//! Lane-based arcade driving game: dodge obstacles, grab coins, keep the car
//! on the road.
//!
//! The library holds the whole simulation plus the two collaborator seams
//! (rendering and input).  The binary wires them to a real terminal.

pub mod compute;
pub mod config;
pub mod entities;
pub mod geometry;
pub mod input;
pub mod render;
