//! Gemini API wire types shared by the story-weaver binaries.

pub mod config;
pub mod content;
pub mod enums;
pub mod models;
pub mod response;
