//! Image loading, saving and output path generation

use std::io;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use log::{debug, info};
use thiserror::Error;

use crate::buffer::PixelBuffer;
use crate::error::{Error, Result};

/// Error type for write operations
#[derive(Debug, Error)]
pub enum OutputError {
    /// IO error during file operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Image encoding error
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode an image file into a [`PixelBuffer`].
///
/// Any format the `image` crate can decode is accepted; pixels are converted
/// to 8-bit RGBA.
///
/// # Errors
///
/// Returns `Error::ImageLoadFailed` if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<PixelBuffer> {
    let decoded = image::open(path)
        .map_err(|source| Error::ImageLoadFailed { path: path.to_path_buf(), source })?;
    let rgba = decoded.to_rgba8();
    debug!("loaded '{}' ({}x{})", path.display(), rgba.width(), rgba.height());
    Ok(PixelBuffer::from(rgba))
}

/// Encode a [`PixelBuffer`] to `path`, format chosen by extension.
///
/// # Errors
///
/// Returns `Error::ImageSaveFailed` if the directory cannot be created or the
/// image cannot be encoded.
pub fn save_image(buffer: &PixelBuffer, path: &Path) -> Result<()> {
    save_rgba(&buffer.to_rgba_image(), path)
        .map_err(|source| Error::ImageSaveFailed { path: path.to_path_buf(), source })?;
    info!("wrote '{}' ({}x{})", path.display(), buffer.width(), buffer.height());
    Ok(())
}

/// Save an RGBA image, creating parent directories if they don't exist.
pub fn save_rgba(image: &RgbaImage, path: &Path) -> std::result::Result<(), OutputError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Path for a recolored copy of `input`: `<dir>/<stem><suffix>.<ext>`.
///
/// ```
/// use palettescan::output::replacement_output_path;
/// use std::path::{Path, PathBuf};
///
/// let out = replacement_output_path(Path::new("art/hero.png"), "_color_change");
/// assert_eq!(out, PathBuf::from("art/hero_color_change.png"));
/// ```
pub fn replacement_output_path(input: &Path, suffix: &str) -> PathBuf {
    let stem = input.file_stem().and_then(|s| s.to_str()).unwrap_or("output");
    let name = match input.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}{}.{}", stem, suffix, ext),
        None => format!("{}{}", stem, suffix),
    };
    match input.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.join(name),
        _ => PathBuf::from(name),
    }
}

/// Resolve where a recolored image is written.
///
/// | `-o` argument | Output |
/// |---------------|--------|
/// | none | `<input dir>/<stem><suffix>.<ext>` |
/// | `dir/` or an existing directory | `dir/<stem><suffix>.<ext>` |
/// | `file.png` | `file.png` |
pub fn resolve_output_path(input: &Path, output_arg: Option<&Path>, suffix: &str) -> PathBuf {
    match output_arg {
        Some(output) => {
            let is_dir = output.as_os_str().to_string_lossy().ends_with('/') || output.is_dir();
            if is_dir {
                let default = replacement_output_path(input, suffix);
                let name = default.file_name().map(PathBuf::from).unwrap_or(default);
                output.join(name)
            } else {
                output.to_path_buf()
            }
        }
        None => replacement_output_path(input, suffix),
    }
}

/// Resolve the output path for a recolored copy of `input`.
///
/// A path derived from the suffix or an output directory must not be the
/// input file itself; only an explicit `-o` naming that file may overwrite it.
///
/// # Errors
///
/// Returns `Error::OutputOverwritesInput` when the derived path is the input.
pub fn replacement_target(input: &Path, output_arg: Option<&Path>, suffix: &str) -> Result<PathBuf> {
    let path = resolve_output_path(input, output_arg, suffix);
    let explicit = output_arg.is_some_and(|arg| arg == path);
    if !explicit && same_file(input, &path) {
        return Err(Error::OutputOverwritesInput { path });
    }
    Ok(path)
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (std::fs::canonicalize(a), std::fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelColor;
    use tempfile::tempdir;

    #[test]
    fn test_replacement_output_path_keeps_directory_and_extension() {
        assert_eq!(
            replacement_output_path(Path::new("sprites/hero.png"), "_color_change"),
            PathBuf::from("sprites/hero_color_change.png")
        );
        assert_eq!(
            replacement_output_path(Path::new("hero.gif"), "_new"),
            PathBuf::from("hero_new.gif")
        );
        assert_eq!(replacement_output_path(Path::new("hero"), "_x"), PathBuf::from("hero_x"));
    }

    #[test]
    fn test_resolve_output_path() {
        let input = Path::new("a/b.png");
        assert_eq!(resolve_output_path(input, None, "_c"), PathBuf::from("a/b_c.png"));
        assert_eq!(
            resolve_output_path(input, Some(Path::new("out.png")), "_c"),
            PathBuf::from("out.png")
        );
        assert_eq!(
            resolve_output_path(input, Some(Path::new("dist/")), "_c"),
            PathBuf::from("dist/b_c.png")
        );
    }

    #[test]
    fn test_replacement_target_refuses_derived_input_path() {
        let err = replacement_target(Path::new("a/b.png"), None, "").unwrap_err();
        assert!(matches!(err, Error::OutputOverwritesInput { .. }));
        assert!(err.is_invalid_input());

        assert_eq!(
            replacement_target(Path::new("a/b.png"), None, "_c").unwrap(),
            PathBuf::from("a/b_c.png")
        );
    }

    #[test]
    fn test_replacement_target_refuses_output_dir_holding_input() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("s.png");
        save_image(&PixelBuffer::new(1, 1, PixelColor::rgb(1, 2, 3)), &input).unwrap();

        let err = replacement_target(&input, Some(dir.path()), "").unwrap_err();
        assert!(matches!(err, Error::OutputOverwritesInput { .. }));
    }

    #[test]
    fn test_replacement_target_allows_explicit_overwrite() {
        let input = Path::new("a/b.png");
        assert_eq!(replacement_target(input, Some(input), "").unwrap(), PathBuf::from("a/b.png"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        let pixels = vec![
            PixelColor::rgb(255, 0, 0),
            PixelColor::rgb(0, 255, 0),
            PixelColor::rgb(0, 0, 255),
            PixelColor::rgba(0, 0, 0, 0),
        ];
        let buffer = PixelBuffer::from_pixels(2, 2, pixels).unwrap();
        save_image(&buffer, &path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, buffer);
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/test.png");

        let buffer = PixelBuffer::new(1, 1, PixelColor::rgb(1, 2, 3));
        save_image(&buffer, &path).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_load_missing_file_is_load_error() {
        let dir = tempdir().unwrap();
        let err = load_image(&dir.path().join("missing.png")).unwrap_err();
        assert!(matches!(err, Error::ImageLoadFailed { .. }));
    }

    #[test]
    fn test_load_garbage_is_load_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let err = load_image(&path).unwrap_err();
        assert!(matches!(err, Error::ImageLoadFailed { .. }));
        assert!(err.to_string().contains("garbage.png"));
    }

    #[test]
    fn test_save_unknown_extension_is_save_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("image.notaformat");
        let err = save_image(&PixelBuffer::new(1, 1, PixelColor::rgb(0, 0, 0)), &path).unwrap_err();
        assert!(matches!(err, Error::ImageSaveFailed { .. }));
    }
}
