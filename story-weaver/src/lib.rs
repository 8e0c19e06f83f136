//! Gemini model lister and story paragraph generator.

pub mod catalog;
pub mod client;
pub mod console;
pub mod error;
pub mod logging;
pub mod models;
pub mod settings;
pub mod story;

#[cfg(test)]
mod test_support;

pub use story_weaver_types as types;

pub use client::{Client, ClientBuilder, HttpOptions};
pub use error::{Error, Result};
pub use settings::Settings;
pub use story::{StoryOutcome, StoryWeaver};
