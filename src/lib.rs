//! Used-car resale price predictor.
//!
//! Loads a vehicle dataset, derives the options for each selector, tracks the
//! user's selection, and asks a remote scoring service for a price.

pub mod app;
pub mod config;
pub mod data;
pub mod error;
pub mod predict;
pub mod selection;
pub mod state;
pub mod tasks;
pub mod ui;
