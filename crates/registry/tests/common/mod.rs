//! Shared by every integration test binary.
//!
//! Each binary links the full dependency set, so the ones a given file does
//! not touch are named here.

use parking_lot as _;
use pretty_assertions as _;
use proptest as _;
use rustc_hash as _;
use thiserror as _;
#[cfg(feature = "tracing")]
use tracing as _;
use tracing_subscriber as _;
