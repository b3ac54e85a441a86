//! Shelf Designer Library
//!
//! Core of a parametric box-module shelving configurator: the component
//! registry and its geometry, pointer interaction, viewport scene sync,
//! structural safety evaluation, BOM export and design persistence.

// Module declarations
pub mod app;
pub mod cli;
pub mod config;
pub mod constants;
pub mod export;
pub mod interaction;
pub mod models;
pub mod persistence;
pub mod safety;
pub mod services;
pub mod viewport;
#[cfg(feature = "web")]
pub mod web;
