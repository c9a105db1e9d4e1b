use crate::core::error::FfxError;

/// Converts an `H:MM:SS.mmm` (or `H:MM:SS,mmm`) timestamp into seconds.
///
/// Segments are tested numerically, so `0.5` seconds counts and `00` does not.
pub fn parse_timestamp(timestamp: &str) -> Result<f64, FfxError> {
    let trimmed = timestamp.trim();
    let segments: Vec<&str> = trimmed.split(':').collect();
    if segments.len() != 3 {
        return Err(FfxError::format(
            timestamp,
            format!("expected 3 segments, found {}", segments.len()),
        ));
    }

    let hours = parse_segment(timestamp, segments[0])?;
    let minutes = parse_segment(timestamp, segments[1])?;
    let seconds = parse_segment(timestamp, &segments[2].replace(',', "."))?;

    let mut total = 0.0;
    for (value, scale) in [(hours, 3600.0), (minutes, 60.0), (seconds, 1.0)] {
        if value != 0.0 {
            total += value * scale;
        }
    }
    Ok(total)
}

fn parse_segment(timestamp: &str, segment: &str) -> Result<f64, FfxError> {
    if segment.is_empty() {
        return Err(FfxError::format(timestamp, "empty segment"));
    }
    if !segment.chars().all(|ch| ch.is_ascii_digit() || ch == '.') {
        return Err(FfxError::format(
            timestamp,
            format!("non-numeric segment {segment:?}"),
        ));
    }
    segment
        .parse::<f64>()
        .map_err(|e| FfxError::format(timestamp, format!("segment {segment:?}: {e}")))
}
