//! Domain models for status-square.
//!
//! # Core Concepts
//!
//! - [`Color`]: the fixed palette a shape can be painted with.
//! - [`FetchOutcome`]: the settled result of the single request, produced exactly once.
//! - [`ResultValue`]: the `{1, 0, error}` domain an outcome reduces to.
//! - [`Palette`]: the value-to-color mapping that turns a [`ResultValue`] into a [`Color`].
//! - [`RunReport`]: the ordered record of what one invocation did.

mod color;
mod outcome;
mod report;

pub use color::*;
pub use outcome::*;
pub use report::*;
