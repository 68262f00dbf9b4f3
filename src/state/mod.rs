/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The photo source seam (repository.rs)
/// - The Loading/Success/Error state machine (controller.rs)

pub mod controller;
pub mod data;
pub mod repository;
