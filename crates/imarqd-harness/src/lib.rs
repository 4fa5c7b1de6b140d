//! Shared test fixtures for the imarqd workspace.
//!
//! Generates deterministic synthetic images at test time rather than
//! checking in binary fixtures, and hosts the cross-crate integration tests
//! that need the image codec, the video pipeline and the verifier together
//! (`tests/`) — the equivalent, for this workspace, of `lockframe-harness`
//! hosting scenarios that exercise `lockframe-client`/`lockframe-server`/
//! `lockframe-app` together rather than any one of them in isolation.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod fixtures;

pub use fixtures::{synthetic_gradient_image, write_gradient_png};
