/// User interface module
///
/// - Per-card thumbnail bookkeeping (gallery.rs)
/// - Loading / error / grid screens (screens.rs)
/// - Canvas loading indicator (spinner.rs)

pub mod gallery;
pub mod screens;
pub mod spinner;
