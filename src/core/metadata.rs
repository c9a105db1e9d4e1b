use std::fs;
use std::path::Path;

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::error::FfxError;
use crate::core::runner;
use crate::core::timestamp::parse_timestamp;

static RE_DURATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"Duration: (.*?),").unwrap());
static RE_BITRATE: Lazy<Regex> = Lazy::new(|| Regex::new(r", bitrate: (\d*) kb/s").unwrap());

/// What a single probe could recover. `None` means the pattern was absent or unreadable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProbeResult {
    pub duration_seconds: Option<f64>,
    pub bitrate_kbps: Option<u32>,
    pub container_format: String,
}

impl ProbeResult {
    pub fn duration_or_zero(&self) -> f64 {
        self.duration_seconds.unwrap_or(0.0)
    }

    pub fn bitrate_or_zero(&self) -> u32 {
        self.bitrate_kbps.unwrap_or(0)
    }
}

/// First `Duration: <timestamp>,` in the text, in seconds.
pub fn extract_duration(text: &str) -> Option<f64> {
    let raw = RE_DURATION.captures(text)?.get(1)?.as_str();
    match parse_timestamp(raw) {
        Ok(seconds) => Some(seconds),
        Err(err) => {
            debug!("ignoring unreadable duration: {err}");
            None
        }
    }
}

/// First `, bitrate: <n> kb/s` in the text.
pub fn extract_bitrate(text: &str) -> Option<u32> {
    RE_BITRATE
        .captures(text)?
        .get(1)?
        .as_str()
        .parse::<u32>()
        .ok()
}

/// Container format as named by the path's last `.` segment.
pub fn probe_format(path: &str) -> String {
    path.rsplit('.').next().unwrap_or_default().to_string()
}

/// Size in bytes, or 0 when the path is missing or not a regular file.
pub fn probe_size(path: impl AsRef<Path>) -> u64 {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => meta.len(),
        _ => 0,
    }
}

/// Harvests metadata by running the tool in probe mode (`<tool> -i <path>`).
#[derive(Debug, Clone)]
pub struct MediaInspector {
    tool: String,
}

impl Default for MediaInspector {
    fn default() -> Self {
        Self::new("ffmpeg")
    }
}

impl MediaInspector {
    pub fn new(tool: impl Into<String>) -> Self {
        Self { tool: tool.into() }
    }

    fn probe_text(&self, path: &str) -> Result<String, FfxError> {
        runner::capture(&[self.tool.clone(), "-i".to_string(), path.to_string()])
    }

    pub fn probe_duration(&self, path: &str) -> Result<Option<f64>, FfxError> {
        let duration = extract_duration(&self.probe_text(path)?);
        if duration.is_none() {
            debug!("no duration reported for {path}");
        }
        Ok(duration)
    }

    pub fn probe_bitrate(&self, path: &str) -> Result<Option<u32>, FfxError> {
        let bitrate = extract_bitrate(&self.probe_text(path)?);
        if bitrate.is_none() {
            debug!("no bitrate reported for {path}");
        }
        Ok(bitrate)
    }

    pub fn probe_format(&self, path: &str) -> String {
        probe_format(path)
    }

    pub fn probe_size(&self, path: &str) -> u64 {
        probe_size(path)
    }

    /// Duration, bitrate and format from one tool invocation.
    pub fn probe(&self, path: &str) -> Result<ProbeResult, FfxError> {
        let text = self.probe_text(path)?;
        Ok(ProbeResult {
            duration_seconds: extract_duration(&text),
            bitrate_kbps: extract_bitrate(&text),
            container_format: probe_format(path),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const PROBE_OUTPUT: &str = "\
Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'clip.mp4':
  Metadata:
    major_brand     : isom
  Duration: 00:01:30.50, start: 0.000000, bitrate: 1205 kb/s
  Stream #0:0(und): Video: h264 (High), yuv420p, 1920x1080, 1072 kb/s, 25 fps
  Stream #0:1(und): Audio: aac (LC), 48000 Hz, stereo, fltp, 128 kb/s
At least one output file must be specified
";

    #[test]
    fn extracts_duration_and_bitrate() {
        assert!((extract_duration(PROBE_OUTPUT).unwrap() - 90.5).abs() < 1e-6);
        assert_eq!(extract_bitrate(PROBE_OUTPUT), Some(1205));
    }

    #[test]
    fn missing_patterns_are_none() {
        let text = "clip.mp4: No such file or directory";
        assert_eq!(extract_duration(text), None);
        assert_eq!(extract_bitrate(text), None);
        assert_eq!(ProbeResult::default().duration_or_zero(), 0.0);
    }

    #[test]
    fn unavailable_duration_is_none() {
        let text = "  Duration: N/A, bitrate: N/A";
        assert_eq!(extract_duration(text), None);
        assert_eq!(extract_bitrate(text), None);
    }

    #[test]
    fn first_match_wins() {
        let text = "Duration: 00:00:02.00, bitrate: 10 kb/s\nDuration: 00:00:09.00, bitrate: 99 kb/s";
        assert_eq!(extract_duration(text), Some(2.0));
        assert_eq!(extract_bitrate(text), Some(10));
    }

    #[test]
    fn format_is_last_dot_segment() {
        assert_eq!(probe_format("movie.final.mkv"), "mkv");
        assert_eq!(probe_format("noext"), "noext");
        assert_eq!(probe_format("clip."), "");
    }

    #[test]
    fn size_of_file_directory_and_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.bin");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(&[0u8; 42]).unwrap();
        drop(file);

        assert_eq!(probe_size(&path), 42);
        assert_eq!(probe_size(dir.path()), 0);
        assert_eq!(probe_size(dir.path().join("missing")), 0);
    }

    #[test]
    fn missing_tool_is_an_error_not_a_zero() {
        let inspector = MediaInspector::new("ffcmd-definitely-missing-binary");
        assert!(inspector.probe_duration("clip.mp4").unwrap_err().is_execution());
        assert!(inspector.probe_bitrate("clip.mp4").unwrap_err().is_execution());
        assert!(inspector.probe("clip.mp4").is_err());
    }

    #[cfg(unix)]
    #[test]
    fn probe_without_metadata_degrades_to_none() {
        // `echo -i clip.mp4` prints the arguments back and exits 0.
        let inspector = MediaInspector::new("echo");
        assert_eq!(inspector.probe_duration("clip.mp4").unwrap(), None);
        let result = inspector.probe("clip.mp4").unwrap();
        assert_eq!(result.bitrate_kbps, None);
        assert_eq!(result.container_format, "mp4");
    }
}
