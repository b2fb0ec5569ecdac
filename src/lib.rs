// Library crate exposing modules for the binary, integration tests and benches

pub mod cli;
pub mod config;
pub mod model;
pub mod repository;
pub mod viewmodel;
pub mod view;
pub mod input;
pub mod util;
