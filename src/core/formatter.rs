use crate::core::metadata::ProbeResult;

pub fn format_probe(path: &str, probe: &ProbeResult, size_bytes: u64) -> String {
    let duration = probe
        .duration_seconds
        .map(format_seconds)
        .unwrap_or_else(|| "unknown".to_string());
    let bitrate = probe
        .bitrate_kbps
        .map(|kbps| format!("{kbps} kb/s"))
        .unwrap_or_else(|| "unknown".to_string());
    let format = if probe.container_format.is_empty() {
        "unknown"
    } else {
        probe.container_format.as_str()
    };
    format!(
        "File     : {path}\nFormat   : {format}\nDuration : {duration}\nBitrate  : {bitrate}\nSize     : {}",
        format_bytes(size_bytes)
    )
}

/// `HH:MM:SS.mmm`, rounded to the millisecond.
pub fn format_seconds(seconds: f64) -> String {
    let total_ms = (seconds.max(0.0) * 1000.0).round() as u64;
    let hours = total_ms / 3_600_000;
    let minutes = (total_ms % 3_600_000) / 60_000;
    let secs = (total_ms % 60_000) / 1000;
    let millis = total_ms % 1000;
    format!("{hours:02}:{minutes:02}:{secs:02}.{millis:03}")
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: f64 = 1024.0;
    const MB: f64 = KB * 1024.0;
    const GB: f64 = MB * 1024.0;
    let value = bytes as f64;
    if value >= GB {
        format!("{:.2} GB", value / GB)
    } else if value >= MB {
        format!("{:.2} MB", value / MB)
    } else if value >= KB {
        format!("{:.2} KB", value / KB)
    } else {
        format!("{bytes} B")
    }
}
