//! 16-bit grayscale PNG output.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::tile::Heightfield;

/// Map a height to a 16-bit gray level, clamping to `[0, max_height]`.
///
/// NaN maps to 0.
pub fn height_to_gray(height: f32, max_height: f32) -> u16 {
    let t = (height / max_height).clamp(0.0, 1.0);
    // Float-to-int casts saturate and send NaN to 0.
    (t * 65535.0).round() as u16
}

/// Encode `field` as a 16-bit grayscale PNG into `writer`.
pub fn encode_png<W: Write>(
    field: &Heightfield,
    max_height: f32,
    writer: W,
) -> Result<(), png::EncodingError> {
    let size = field.resolution() as u32;
    let mut encoder = png::Encoder::new(writer, size, size);
    encoder.set_color(png::ColorType::Grayscale);
    encoder.set_depth(png::BitDepth::Sixteen);

    // PNG stores 16-bit samples big-endian.
    let data: Vec<u8> = field
        .heights()
        .iter()
        .flat_map(|&h| height_to_gray(h, max_height).to_be_bytes())
        .collect();

    let mut png_writer = encoder.write_header()?;
    png_writer.write_image_data(&data)?;
    png_writer.finish()
}

/// Write `field` to `<directory>/<name>.png` and return the path.
pub fn write_tile(
    directory: &Path,
    name: &str,
    field: &Heightfield,
    max_height: f32,
) -> Result<PathBuf, AppError> {
    let path = directory.join(format!("{name}.png"));
    let file = File::create(&path).map_err(|source| AppError::Io {
        path: path.clone(),
        source,
    })?;
    encode_png(field, max_height, BufWriter::new(file))?;
    Ok(path)
}
