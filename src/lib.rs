//! Animate a square across a surface and color it by the outcome of a request.
//!
//! ```rust,ignore
//! use status_square::{config::AnimationConfig, coordinator::Coordinator, fetch::HttpFetcher};
//! use status_square::surface::Surface;
//!
//! let mut surface = Surface::new();
//! let coordinator = Coordinator::new(AnimationConfig::default(), HttpFetcher::new());
//! let report = coordinator.run(&mut surface, "http://127.0.0.1:8000/result").await;
//! println!("{}", surface.render());
//! ```

pub mod config;
pub mod coordinator;
pub mod fetch;
pub mod models;
pub mod motion;
pub mod surface;
