use std::fs;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine as _};

use super::FusionError;

/// Reads the image file and returns its bytes as standard base64.
pub fn encode_image(path: impl AsRef<Path>) -> Result<String, FusionError> {
    let data = fs::read(path)?;
    Ok(STANDARD.encode(data))
}

/// Decodes base64 image data and writes the bytes to `out_path`.
pub fn decode_image(data: &str, out_path: impl AsRef<Path>) -> Result<(), FusionError> {
    let bytes = STANDARD.decode(data.trim())?;
    fs::write(out_path, bytes)?;
    Ok(())
}
