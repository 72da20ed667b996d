use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use raylib::prelude::*;
use exif::{Reader, Tag, Value, In};
use tracing::{debug, info, warn};

use crate::error::LoadError;
use crate::slide::SlideSource;

const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

/// Slide catalog plus one texture slot per slide. A slot is `None` when the
/// image could not be decoded; the slide is kept and drawn as a placeholder.
pub struct Gallery {
    pub sources: Vec<SlideSource>,
    pub textures: Vec<Option<Texture2D>>,
}

impl Gallery {
    pub fn empty() -> Self {
        Self { sources: Vec::new(), textures: Vec::new() }
    }
}

pub fn load_gallery(rl: &mut RaylibHandle, thread: &RaylibThread, dir_path: &Path) -> Gallery {
    let paths = match load_sorted_image_paths(dir_path) {
        Ok(paths) => paths,
        Err(e) => {
            warn!("gallery unavailable: {e}");
            return Gallery::empty();
        }
    };

    let mut gallery = Gallery::empty();
    for path in paths {
        let label = path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_default();
        let texture = match load_texture_with_exif_rotation(rl, thread, &path) {
            Ok(texture) => Some(texture),
            Err(e) => {
                warn!("image failed to load: {e}");
                None
            }
        };
        gallery.sources.push(SlideSource::new(label, texture.is_some()));
        gallery.textures.push(texture);
    }
    info!("loaded {} gallery images from {:?}", gallery.sources.len(), dir_path);
    gallery
}

// --- Helper: Load and Sort Image Paths ---
pub fn load_sorted_image_paths(dir_path: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    let entries = fs::read_dir(dir_path)
        .map_err(|source| LoadError::Io { path: dir_path.to_path_buf(), source })?;

    for entry in entries {
        let entry = entry.map_err(|source| LoadError::Io { path: dir_path.to_path_buf(), source })?;
        let path = entry.path();
        if path.is_file() && has_image_extension(&path) {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    if paths.is_empty() {
        Err(LoadError::NoImages(dir_path.to_path_buf()))
    } else {
        Ok(paths)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// EXIF orientation tag, 1 (no rotation) when absent or unreadable.
fn read_orientation(image_path: &Path, file_bytes: &[u8]) -> u16 {
    match Reader::new().read_from_container(&mut Cursor::new(file_bytes)) {
        Ok(exif) => {
            if let Some(field) = exif.get_field(Tag::Orientation, In::PRIMARY) {
                if let Value::Short(values) = &field.value {
                    if let Some(&orientation) = values.first() {
                        return orientation;
                    }
                }
            }
            1
        }
        Err(e) => {
            // Non-critical: proceed without rotation
            debug!("no EXIF data for {:?}: {}", image_path.file_name().unwrap_or_else(|| image_path.as_os_str()), e);
            1
        }
    }
}

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D, LoadError> {
    let file_bytes = fs::read(image_path)
        .map_err(|source| LoadError::Io { path: image_path.to_path_buf(), source })?;

    // EXIF is only reliable for JPEG
    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if extension == "jpg" || extension == "jpeg" {
        read_orientation(image_path, &file_bytes)
    } else {
        1
    };

    // Provide extension hint for loading from memory
    let mut image = Image::load_image_from_mem(&(".".to_string() + &extension), &file_bytes)
        .map_err(|e| LoadError::Decode { path: image_path.to_path_buf(), message: e.to_string() })?;

    // 1 = Top-left (Normal)
    // 3 = Bottom-right (180 deg)
    // 6 = Top-right (90 deg clockwise)
    // 8 = Bottom-left (270 deg clockwise / 90 deg counter-clockwise)
    // Others involve flips, ignored here.
    match orientation {
        3 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        6 => image.rotate_cw(),
        8 => image.rotate_ccw(),
        _ => {}
    }
    if orientation != 1 {
        debug!("applied EXIF orientation {} to {:?}", orientation, image_path);
    }

    let texture = rl.load_texture_from_image(thread, &image)
        .map_err(|e| LoadError::Texture { path: image_path.to_path_buf(), message: e.to_string() })?;

    Ok(texture)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("greeting-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn image_paths_are_filtered_and_sorted_by_name() {
        let dir = scratch_dir("sorted");
        for name in ["b.JPG", "a.png", "notes.txt", "c.jpeg"] {
            fs::write(dir.join(name), b"x").unwrap();
        }
        fs::create_dir(dir.join("nested.png")).unwrap();

        let names: Vec<_> = load_sorted_image_paths(&dir)
            .unwrap()
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.png", "b.JPG", "c.jpeg"]);
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn directory_without_images_is_an_error() {
        let dir = scratch_dir("empty");
        fs::write(dir.join("readme.md"), b"x").unwrap();

        assert!(matches!(load_sorted_image_paths(&dir), Err(LoadError::NoImages(_))));
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let result = load_sorted_image_paths(Path::new("/no/such/gallery"));
        assert!(matches!(result, Err(LoadError::Io { .. })));
    }

    #[test]
    fn unreadable_exif_means_no_rotation() {
        assert_eq!(read_orientation(Path::new("x.jpg"), b"not a jpeg"), 1);
    }
}
