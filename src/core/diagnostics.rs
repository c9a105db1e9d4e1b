#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Metadata,
    Progress,
    Warning,
    Error,
    Noise,
}

/// Sorts one line of ffmpeg diagnostic output.
pub fn classify_line(line: &str) -> LineKind {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return LineKind::Noise;
    }

    if trimmed.starts_with("Input #")
        || trimmed.starts_with("Output #")
        || trimmed.starts_with("Duration:")
        || trimmed.starts_with("Stream #")
    {
        return LineKind::Metadata;
    }
    if trimmed.contains("frame=") && trimmed.contains("time=") {
        return LineKind::Progress;
    }

    let lower = trimmed.to_ascii_lowercase();
    let banner_prefixes = [
        "ffmpeg version",
        "built with",
        "configuration:",
        "libavutil",
        "libavcodec",
        "libavformat",
        "libavdevice",
        "libavfilter",
        "libswscale",
        "libswresample",
        "libpostproc",
    ];
    if banner_prefixes.iter().any(|prefix| lower.starts_with(prefix)) {
        return LineKind::Noise;
    }

    // Probe mode always ends with this; it is not a failure of the probe.
    if lower.contains("at least one output file must be specified") {
        return LineKind::Noise;
    }

    if lower.contains("error")
        || lower.contains("invalid")
        || lower.contains("no such file")
        || lower.contains("not found")
        || lower.contains("permission denied")
    {
        return LineKind::Error;
    }

    if lower.contains("warning") || lower.contains("deprecated") {
        return LineKind::Warning;
    }

    LineKind::Noise
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_probe_metadata() {
        assert_eq!(
            classify_line("  Duration: 00:00:10.02, start: 0.000000, bitrate: 1205 kb/s"),
            LineKind::Metadata
        );
        assert_eq!(
            classify_line("Input #0, mov,mp4,m4a,3gp,3g2,mj2, from 'in.mp4':"),
            LineKind::Metadata
        );
    }

    #[test]
    fn errors_and_warnings() {
        assert_eq!(
            classify_line("missing.mp4: No such file or directory"),
            LineKind::Error
        );
        assert_eq!(
            classify_line("[AVFilterGraph @ 0x1] Error initializing filter 'subtitles'"),
            LineKind::Error
        );
        assert_eq!(
            classify_line("[mp4 @ 0x2] Warning: pixel format deprecated"),
            LineKind::Warning
        );
    }

    #[test]
    fn banner_and_probe_trailer_are_noise() {
        assert_eq!(classify_line("ffmpeg version 6.1 Copyright"), LineKind::Noise);
        assert_eq!(
            classify_line("At least one output file must be specified"),
            LineKind::Noise
        );
        assert_eq!(classify_line("   "), LineKind::Noise);
    }

    #[test]
    fn progress_line() {
        assert_eq!(
            classify_line("frame=  240 fps=120 q=28.0 size=512kB time=00:00:08.00 bitrate= 524.3kbits/s"),
            LineKind::Progress
        );
    }
}
