//! One module per subcommand.

/// `ecc-encode` / `ecc-decode`.
pub mod ecc;
/// `embed-image`.
pub mod embed_image;
/// `embed-video`.
pub mod embed_video;
/// `extract-image`.
pub mod extract_image;
/// `extract-video`.
pub mod extract_video;
/// `verify`.
pub mod verify;
