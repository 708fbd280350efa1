#![warn(clippy::all, clippy::pedantic)]

pub mod particles_tests;
pub mod sound_tests;
pub mod store_tests;
pub mod systems_tests;

// Shared fixtures
pub mod test_utils;
