//! Input processing module
//! Handles file detection, vacancy / skill extraction, and input management

pub mod file_detector;
pub mod text_extractor;
pub mod manager;

pub use manager::InputManager;
