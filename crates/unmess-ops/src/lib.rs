//! # unmess-ops
//!
//! Pixel algorithms for the unmess photo-editing engine.
//!
//! Every operation takes any [`PixelBuffer`](unmess_core::PixelBuffer),
//! validates its arguments, and returns a fresh
//! [`RgbaBuffer`](unmess_core::RgbaBuffer). Inputs are never modified.
//!
//! # Modules
//!
//! - [`adjust`] - brightness, contrast, saturation, grayscale, sepia, invert
//! - [`filter`] - Gaussian blur and sharpen convolutions
//! - [`transform`] - quarter-turn rotation and flips
//! - [`edit`] - typed [`Edit`] values that bundle an operation with its parameters
//! - [`adjustments`] - the combined [`Adjustments`] pipeline
//! - [`parallel`] - row-parallel rendering shared by all of the above
//!
//! # Example
//!
//! ```rust
//! use unmess_core::{NoopObserver, PixelBuffer, RgbaBuffer};
//! use unmess_ops::{Adjustments, Edit};
//!
//! let src = RgbaBuffer::filled(8, 8, [0.4, 0.5, 0.6, 1.0]);
//!
//! let sepia = Edit::Sepia.apply(&src, &NoopObserver).unwrap();
//! assert_eq!(sepia.dimensions(), (8, 8));
//!
//! let adj = Adjustments::new().brightness(0.1).blur(1);
//! let out = adj.apply(&src, &NoopObserver).unwrap();
//! assert_eq!(out.dimensions(), (8, 8));
//! ```
//!
//! # Features
//!
//! - `parallel` (default) - fill output rows concurrently with Rayon

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod adjust;
pub mod adjustments;
pub mod edit;
pub mod filter;
pub mod parallel;
pub mod transform;

pub use adjustments::Adjustments;
pub use edit::{Edit, ParseEditError};
pub use filter::{AlphaMode, Kernel};
