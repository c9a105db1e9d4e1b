pub mod batch;
pub mod command;
pub mod diagnostics;
pub mod error;
pub mod formatter;
pub mod metadata;
pub mod operations;
pub mod runner;
pub mod timestamp;

pub use command::{build, InvocationSpec, OptionSet};
pub use error::FfxError;
pub use metadata::{MediaInspector, ProbeResult};
pub use operations::Transcoder;
pub use runner::{capture, execute, run};
pub use timestamp::parse_timestamp;
