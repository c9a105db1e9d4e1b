//! Builds and runs ffmpeg invocations, probes media metadata from ffmpeg's
//! diagnostic output, and talks to a cloud face-fusion service.
//!
//! ```no_run
//! use ffcmd::core::{MediaInspector, Transcoder};
//!
//! let inspector = MediaInspector::default();
//! let probe = inspector.probe("clip.mp4")?;
//! println!("{:?} s at {:?} kb/s", probe.duration_seconds, probe.bitrate_kbps);
//!
//! let ok = Transcoder::default().compress("clip.mp4", "clip.small.mp4", 800)?;
//! assert!(ok);
//! # Ok::<(), ffcmd::core::FfxError>(())
//! ```

pub mod cli;
pub mod core;
pub mod facefusion;
pub mod repl;
