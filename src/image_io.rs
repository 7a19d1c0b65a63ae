use std::path::{Path, PathBuf};
use std::fs;
use image::{ImageFormat, RgbaImage};

use crate::errors::{Result, SelectorError};

/// Extensions accepted as plant photos
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Represents an input image with its metadata
pub struct InputImage {
    pub image: RgbaImage,
    pub path: PathBuf,
    pub filename: String,
}

/// Whether a path has one of the accepted image extensions
pub fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Get all image files from a directory (recursively), sorted by path
pub fn get_image_files_in_dir<P: AsRef<Path>>(dir_path: P) -> Result<Vec<PathBuf>> {
    let dir_path = dir_path.as_ref();

    if !dir_path.exists() {
        return Err(SelectorError::InvalidPath(dir_path.to_path_buf()));
    }

    if !dir_path.is_dir() {
        return Err(SelectorError::Config(format!(
            "{} is not a directory", dir_path.display()
        )));
    }

    let mut image_files = Vec::new();
    find_image_files_recursive(dir_path, &mut image_files)?;
    image_files.sort();

    Ok(image_files)
}

fn find_image_files_recursive(dir_path: &Path, result: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir_path)? {
        let path = entry?.path();

        if path.is_dir() {
            find_image_files_recursive(&path, result)?;
        } else if path.is_file() && is_image_file(&path) {
            result.push(path);
        }
    }

    Ok(())
}

/// Load an image ensuring RGBA format
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<InputImage> {
    let path = path.as_ref();

    let filename = path.file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| SelectorError::InvalidPath(path.to_path_buf()))?
        .to_string();

    let rgba_img = image::open(path)?.to_rgba8();

    Ok(InputImage {
        image: rgba_img,
        path: path.to_path_buf(),
        filename,
    })
}

/// Save an RGBA image as PNG, creating the parent directory
pub fn save_image<P: AsRef<Path>>(image: &RgbaImage, path: P) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    image.save_with_format(path, ImageFormat::Png)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extensions_are_case_insensitive() {
        assert!(is_image_file(Path::new("leaf.PNG")));
        assert!(is_image_file(Path::new("dir/leaf.jpeg")));
        assert!(!is_image_file(Path::new("leaf.events")));
        assert!(!is_image_file(Path::new("leaf")));
    }

    #[test]
    fn missing_directory_is_an_invalid_path() {
        let err = get_image_files_in_dir("/definitely/not/here").unwrap_err();
        assert!(matches!(err, SelectorError::InvalidPath(_)));
    }
}
