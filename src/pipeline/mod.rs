//! Generic interception pipeline.
//!
//! A pipeline passes a context through an ordered list of middlewares. Each
//! middleware receives the context and a [`Next`] handle for the rest of the
//! chain, so it can act before the rest runs, after it, instead of it, or
//! not call it at all.
//!
//! The effects engine composes its active effects with [`Next`], and any
//! other consumer can build a [`Pipeline`] of [`Step`]s for its own
//! before/after processing.
//!
//! ## Example Usage
//!
//! ```
//! use grimoire::pipeline::{Pipeline, Step};
//!
//! let mut pipeline: Pipeline<Step<Vec<&str>, ()>> = Pipeline::new();
//! pipeline.push(Step::new("outer", |mut trail: Vec<&str>, next| {
//!     trail.push("outer before");
//!     let mut trail = next.run(trail)?;
//!     trail.push("outer after");
//!     Ok(trail)
//! }));
//! pipeline.push(Step::new("inner", |mut trail: Vec<&str>, next| {
//!     trail.push("inner");
//!     next.run(trail)
//! }));
//!
//! let trail = pipeline.apply(Vec::new()).unwrap();
//! assert_eq!(trail, vec!["outer before", "inner", "outer after"]);
//! ```

mod middleware;

pub use middleware::{Middleware, Next, Pipeline, Step};
