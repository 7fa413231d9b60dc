#![warn(clippy::pedantic)]
#![allow(clippy::similar_names, clippy::module_name_repetitions)]

//! A 3x3x3 twisty puzzle modelled as a permutation group with orientation
//! data: cubie states, the move algebra, legality validators, a WCA-style
//! scrambler and an IDA* solver.

pub mod color_scheme;
pub mod config;
pub mod cube;
pub mod moves;
pub mod scramble;
pub mod solver;
pub mod validate;

pub use color_scheme::ColorScheme;
pub use cube::CubeState;
pub use moves::{Direction, Face, Move, MoveSequence, parse};

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
