#![allow(clippy::too_many_arguments)]

pub mod error;
pub mod validation;
pub mod model;
pub mod db;
pub mod draw;
pub mod session;
pub mod ops;
pub mod queries;
pub mod config;
pub mod telemetry;
pub mod cli;
