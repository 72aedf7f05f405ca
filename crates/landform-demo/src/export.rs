//! PNG export of the generated height map.

use std::path::Path;

use landform_terrain::HeightmapImage;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("pixel buffer does not match {width}x{height} RGBA")]
    BufferSize { width: u32, height: u32 },

    #[error("failed to create output directory: {0}")]
    CreateDir(#[source] std::io::Error),

    #[error("failed to write PNG: {0}")]
    Encode(#[from] image::ImageError),
}

/// Write `heightmap` to `path` as an RGBA PNG, creating parent directories.
pub fn write_heightmap_png(heightmap: &HeightmapImage, path: &Path) -> Result<(), ExportError> {
    let (width, height) = heightmap.dimensions();
    let buffer = image::RgbaImage::from_raw(width, height, heightmap.pixels.clone())
        .ok_or(ExportError::BufferSize { width, height })?;

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(ExportError::CreateDir)?;
    }

    buffer.save_with_format(path, image::ImageFormat::Png)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use landform_terrain::HeightGrid;

    #[test]
    fn test_png_round_trips_dimensions() {
        let grid = HeightGrid::from_fn(12, |r, c| (r * 12 + c) as f32).unwrap();
        let heightmap = HeightmapImage::from_grid(&grid, grid.range());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("height.png");
        write_heightmap_png(&heightmap, &path).unwrap();

        let decoded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(decoded.dimensions(), (12, 12));
        assert_eq!(decoded.as_raw(), &heightmap.pixels);
    }

    #[test]
    fn test_mismatched_buffer_rejected() {
        let heightmap = HeightmapImage {
            width: 4,
            height: 4,
            pixels: vec![0; 10],
        };
        let dir = tempfile::tempdir().unwrap();
        let result = write_heightmap_png(&heightmap, &dir.path().join("bad.png"));
        assert!(matches!(
            result,
            Err(ExportError::BufferSize { width: 4, height: 4 })
        ));
    }
}
