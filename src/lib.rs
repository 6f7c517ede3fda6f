//! # Photo Tournament Bot
//!
//! A Telegram bot that runs single-elimination photo tournaments.
//!
//! ## Features
//! - Pairwise "which one do you like more?" rounds over a category of images
//! - Personal galleries built from uploaded photos
//! - Per-user usage statistics persisted to a JSON file
//! - Health endpoints and periodic housekeeping

/// Shared application state wired from configuration
pub mod app;
/// Bot command handlers and message processing
pub mod bot;
/// Configuration management and environment variables
pub mod config;
/// Error types for the tournament engine and storage
pub mod error;
/// Game flow, health checks, and background maintenance
pub mod services;
/// Image sources, galleries, and usage statistics on disk
pub mod storage;
/// Tournament sessions and the per-user session registry
pub mod tournament;
/// Utility functions for datetime, validation, and formatting
pub mod utils;
