//! Integration test support
//!
//! - `fixtures`: fake transcoders, multipart request builders, WAV generation
//! - `e2e`: full server over TCP against the real ffmpeg binary

pub mod e2e;
