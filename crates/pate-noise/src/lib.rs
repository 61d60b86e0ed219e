//! # PATE Noise
//!
//! Laplace noise and caller-injected random sources for noisy-max label
//! aggregation.
//!
//! ## Components
//!
//! | Component | Purpose |
//! |-----------|---------|
//! | [`LaplaceScale`] | Validated noise scale (finite, non-negative) |
//! | [`Laplace`] | Zero-centred Laplace distribution |
//! | [`NoiseStreams`] | One independent generator per sample |
//! | [`CountingRng`] | Draw-count instrumentation |
//!
//! ## Quick Start
//!
//! ```rust
//! use pate_noise::{Laplace, NoiseStreams};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//!
//! let laplace = Laplace::new(20.0)?;
//! let mut rng = StdRng::seed_from_u64(1234);
//!
//! // One stream per sample, one draw per class.
//! for mut stream in NoiseStreams::fork(&mut rng, 2)? {
//!     let mut counts = vec![3.0, 1.0, 1.0, 0.0];
//!     laplace.perturb(&mut counts, &mut stream);
//! }
//! # Ok::<(), pate_noise::NoiseError>(())
//! ```
//!
//! ## Privacy Notes
//!
//! - Scales are validated before any entropy is consumed
//! - No global generator is used; seeding the injected source makes a run
//!   reproducible

mod error;
mod laplace;
mod scale;
mod streams;

pub use error::{NoiseError, Result};
pub use laplace::Laplace;
pub use scale::LaplaceScale;
pub use streams::{CountingRng, NoiseStreams};
