//! The session clock: phase progression, history, rewind.
//!
//! The clock is the single authority for "when". It is created at setup,
//! moves forward only through [`Clock::advance`], and records every phase
//! it reaches as a [`Moment`].
//!
//! ## Query Surface
//!
//! - [`Clock::current`]: The phase the session is in
//! - [`Clock::today`]: Moments of the current date
//! - [`Clock::get_moment`]: A phase's moment within today
//! - [`Clock::rewind`]: Moments between the present and a past phase
//! - [`Clock::recall`]: Moments of a past date
//!
//! ## Example Usage
//!
//! ```
//! use grimoire::clock::Clock;
//! use grimoire::core::{ClockConfig, GamePhase, Phase};
//! use grimoire::interaction::AutoConfirm;
//!
//! # tokio_test_block(async {
//! let mut clock = Clock::with_config(ClockConfig::new().unconfirmed());
//!
//! for _ in 0..4 {
//!     let _ = clock.advance(&AutoConfirm, None).await;
//! }
//!
//! assert_eq!(clock.current().phase(), Phase::Dusk);
//! assert!(clock.get_moment(Phase::Day).is_some());
//!
//! let back: Vec<_> = clock.rewind(GamePhase::setup()).map(|m| m.phase()).collect();
//! assert_eq!(back, vec![Phase::Day, Phase::Dawn, Phase::Night]);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

mod moment;
mod timeline;

pub use moment::{DateRecord, Moment, Rewind};
pub use timeline::{Advance, Clock};
