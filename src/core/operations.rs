use crate::core::command::{InvocationSpec, OptionSet};
use crate::core::error::FfxError;
use crate::core::runner;

/// Preset transcodes. Each call builds a fresh invocation and runs it once.
#[derive(Debug, Clone)]
pub struct Transcoder {
    tool: String,
}

impl Default for Transcoder {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl Transcoder {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    fn single(&self, input: &str, output: &str, options: OptionSet) -> InvocationSpec {
        InvocationSpec::new(self.tool.as_str())
            .input(input, OptionSet::new())
            .output(output, options)
    }

    pub fn compress_spec(&self, input: &str, output: &str, target_kbps: u32) -> InvocationSpec {
        self.single(input, output, ["-b".to_string(), format!("{target_kbps}k"), "-y".to_string()].into())
    }

    pub fn extract_audio_spec(&self, video: &str, audio: &str) -> InvocationSpec {
        self.single(video, audio, ["-vn", "-c:a", "copy", "-y"].into())
    }

    pub fn burn_in_subtitle_spec(&self, video: &str, subtitle: &str, output: &str) -> InvocationSpec {
        self.single(
            video,
            output,
            ["-vf".to_string(), format!("subtitles={subtitle}"), "-y".to_string()].into(),
        )
    }

    /// Re-encodes `input` at roughly `target_kbps`, overwriting `output`.
    pub fn compress(&self, input: &str, output: &str, target_kbps: u32) -> Result<bool, FfxError> {
        runner::execute(&self.compress_spec(input, output, target_kbps))
    }

    /// Drops the video stream and copies the audio codec as-is.
    pub fn extract_audio(&self, video: &str, audio: &str) -> Result<bool, FfxError> {
        runner::execute(&self.extract_audio_spec(video, audio))
    }

    pub fn burn_in_subtitle(&self, video: &str, subtitle: &str, output: &str) -> Result<bool, FfxError> {
        runner::execute(&self.burn_in_subtitle_spec(video, subtitle, output))
    }
}
