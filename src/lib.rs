//! A deterministic, value-semantic pseudo-random number generator built on Bob
//! Jenkins' small fast 32-bit mixing cipher, with heterogeneous seed packing
//! and unbiased range and collection sampling.
//!
//! Not cryptographically secure: the cipher is fast and statistically sound
//! but its output is easy to predict.
//!
//! # Usage
//! The generator comes in two forms:
//!
//! - [`GeneratorCore`] is an immutable `Copy` value. Every draw takes a core
//!   and returns the value together with the successor core, so sequences can
//!   be forked, replayed or sent to other threads without coordination.
//! - [`Generator`] owns one core and replaces it on every draw, for callers
//!   that prefer an ordinary mutable RNG.
//!
//! Seed either from an arbitrary list of fixed-width scalars (see [`seeds!`]
//! and [`Seed`]) or from the OS with [`GeneratorCore::from_entropy`]. Draw any
//! [`Draw`] type, integers from a range with `draw_range`, or an element of any
//! [`Domain`] (slices, arrays, tuples, strings, [`BitSet`]s, maps and sets)
//! with `sample`.
//!
//! # Examples
//! Threading cores by hand:
//! ```
//! use jsf_rng::{seeds, GeneratorCore, MixingStrength};
//!
//! let core = GeneratorCore::from_seeds(&seeds![7u32, 3u32, 11u32], MixingStrength::Strong)?;
//! let (x, core) = core.draw::<f64>();
//! let (n, core) = core.draw_range(1..=100u32)?;
//! let (c, _) = core.sample("hello")?;
//! assert!((0.0..1.0).contains(&x));
//! assert!((1..=100).contains(&n));
//! assert!("hello".contains(c));
//! # Ok::<(), jsf_rng::Error>(())
//! ```
//!
//! Using the mutable handle:
//! ```
//! use jsf_rng::{seeds, Generator, MixingStrength};
//!
//! let mut rng = Generator::from_seeds(&seeds![42u8, -1i16, 2.5f64], MixingStrength::Medium)?;
//! let bytes: [u8; 16] = rng.draw();
//! let pick = rng.sample(&(1, 2, 3))?;
//! # let _ = (bytes, pick);
//! # Ok::<(), jsf_rng::Error>(())
//! ```
//!
//! # Determinism & Portability
//! Output is a pure function of the seeds and the [`MixingStrength`]: the same
//! seed list yields the same sequence on every platform and every run. The
//! one exception is `usize`/`isize` draws (and with them collection sampling),
//! which draw at the target's pointer width.
//!
//! # Crate Features
//! - `std` (default): enable sampling from `HashMap` and `HashSet`.
//! - `getrandom` (default): enable dependency on the [`getrandom` crate], used
//!   to seed from the OS when no seeds are given
//!   ([`GeneratorCore::from_entropy`]).
//! - `rand-core`: enable dependency on the [`rand_core` crate]. This
//!   implements `RngCore` and `SeedableRng` for [`Generator`].
//!
//! # Design
//! ## Cipher
//! The state is four 32-bit words: one state word `a` and three seed words
//! `b, c, d`. One round computes
//!
//! ```text
//! e  = a - (b <<< 27)
//! a' = b ^ (c <<< 17)
//! b' = c + d
//! c' = d + e
//! d' = e + a'
//! ```
//!
//! and outputs `d'`. Wider draws chain rounds; narrower ones fold halves.
//!
//! ## Seeding
//! Seeds of any supported width are folded into the three seed words:
//! bytes pair into half-words, half-words pair into words, 64 and 128 bit
//! seeds split into words, and a word is emitted as soon as it is complete.
//! One word `s` becomes `(s, s, s)`, two words `(u, v)` become
//! `(u, v, u ^ v)`, and words past the third are xored into word `i % 3`. The
//! state word starts at [`GeneratorCore::INITIAL_STATE`] and the cipher is run
//! [`MixingStrength::rounds`] times before the core is handed out.
//!
//! [`getrandom` crate]: https://crates.io/crates/getrandom
//! [`rand_core` crate]: https://crates.io/crates/rand_core
#![cfg_attr(docsrs, feature(doc_cfg))]
#![no_std]
#![forbid(unsafe_code, rust_2018_compatibility)]
#![deny(future_incompatible, rust_2018_idioms)]
#![warn(clippy::cast_possible_truncation, clippy::cast_sign_loss)]

extern crate alloc;
#[cfg(any(feature = "std", test))]
extern crate std;

mod bitset;
mod cipher;
mod domain;
mod draw;
mod error;
mod float;
mod generator;
mod handle;
mod seed;
mod uniform;

pub use bitset::BitSet;
pub use domain::Domain;
pub use draw::Draw;
pub use error::{Error, Result};
pub use float::F16;
pub use generator::GeneratorCore;
pub use handle::Generator;
pub use seed::{MixingStrength, Seed, SeedKind};
pub use uniform::{SampleRange, UniformInt};
