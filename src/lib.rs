//! Component Filter API Library
//!
//! An in-process decision engine that suppresses unwanted UI components
//! (ads, promotional shelves, action buttons, comment sections) before they
//! reach the screen. Each rendered component is described by a structural
//! `path` and a type `identifier`; the engine answers one question per
//! descriptor: block it or let it through.
//!
//! # Quick Start
//!
//! ```rust
//! use component_filter_api::{FilterConfig, FilterEngine};
//!
//! let engine = FilterEngine::from_config(&FilterConfig::default());
//!
//! if engine.evaluate("cell_layout|banner_ad_wrapper.eml", "") {
//!     println!("Component suppressed!");
//! }
//! ```

pub mod config;
pub mod engine;
pub mod filters;
pub mod playback;
pub mod rules;
pub mod settings;
pub mod types;

pub use config::FilterConfig;
pub use engine::FilterEngine;
pub use playback::{PlaybackRecovery, PlayerHandle};
pub use settings::{InMemorySettings, Setting, SettingsProvider};
pub use types::{BlockCategory, BlockResult, BlockStats};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::{
        BlockCategory, BlockResult, BlockStats, FilterConfig, FilterEngine, InMemorySettings,
        PlaybackRecovery, PlayerHandle, Setting, SettingsProvider,
    };
}
