//! Decide whether on-screen text matches an intended activity.
//!
//! The text and the activity description are joined into one prompt, a local
//! text-classification model powered by [Candle](https://github.com/huggingface/candle)
//! scores it, and a score above 0.5 means "on task".
//!
//! ```rust
//! use ontask::error::Result;
//! use ontask::invoker::{invoke, Invocation};
//! use ontask::text_classification::Prediction;
//! use ontask::Verdict;
//!
//! # fn main() -> Result<()> {
//! let classifier = |_: &str| -> Result<Prediction> {
//!     Ok(Prediction { label: "LABEL_1".into(), score: 0.9 })
//! };
//! let mut out = Vec::new();
//! let verdict = invoke(&classifier, &Invocation::new("frog facts", "write an essay"), &mut out)?;
//! assert_eq!(verdict, Verdict::OnTask);
//! assert_eq!(out, b"on task\n");
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

// ============ Internal API ============

pub(crate) mod loaders;
pub(crate) mod models;
pub(crate) mod pipelines;

// ============ Public API ============

pub mod cli;
pub mod config;
pub mod error;
pub mod invoker;
pub mod verdict;

pub use pipelines::{text_classification, utils::DeviceRequest};
pub use verdict::Verdict;
