// SPDX-License-Identifier: MIT OR Apache-2.0
//! # jsonmatch-tester
//!
//! The structural matcher for jsonmatch value trees.
//!
//! A [`Tester`] decides whether an actual tree satisfies an expected one.
//! Documents match as subsets, arrays and scalars match exactly, and rule
//! nodes in the expected tree take over their own subtree. Mismatches carry
//! the path at which they occurred.
//!
//! Behaviour is fixed at construction through [`TesterOptions`]: whether to
//! stop at the first mismatch or collect all of them, and the document size
//! at which lookups switch to a pooled key index.

#![warn(missing_docs)]
#![deny(rust_2018_idioms)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]

mod config;
mod default;
mod index;
mod tester;

pub use config::{DEFAULT_LINEAR_THRESHOLD, TesterOptions};
pub use default::{default_tester, set_default_tester, test};
pub use index::IndexMap;
pub use tester::Tester;
