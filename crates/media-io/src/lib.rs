use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("ffmpeg not found on PATH; please install FFmpeg")]
    FfmpegMissing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaKind {
    Image,
    Video,
}

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp", "tiff"];

impl MediaKind {
    /// Classify a user-selected file by extension: known image formats are
    /// images, everything else imports as video.
    pub fn from_path(path: &Path) -> Self {
        let is_image = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                IMAGE_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);
        if is_image {
            Self::Image
        } else {
            Self::Video
        }
    }
}

/// One user-selected file, classified and ready to append to the sequence
/// in selection order.
#[derive(Debug, Clone)]
pub struct ImportedMedia {
    pub kind: MediaKind,
    pub display_name: String,
    pub path: PathBuf,
}

impl ImportedMedia {
    pub fn from_path(path: PathBuf) -> Self {
        let display_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned());
        Self {
            kind: MediaKind::from_path(&path),
            display_name,
            path,
        }
    }
}

/// Classify a picked file list, preserving selection order.
pub fn classify_files(paths: impl IntoIterator<Item = PathBuf>) -> Vec<ImportedMedia> {
    paths.into_iter().map(ImportedMedia::from_path).collect()
}

/// Opaque transcode backend wrapping the external FFmpeg install. The
/// editor only needs "locate it, or fail"; a missing install degrades
/// preview and transcode without touching sequence editing.
#[derive(Debug, Clone)]
pub struct TranscodeEngine {
    ffmpeg: PathBuf,
}

impl TranscodeEngine {
    pub fn locate() -> Result<Self, EngineError> {
        let ffmpeg = which::which("ffmpeg").map_err(|_| EngineError::FfmpegMissing)?;
        tracing::debug!(path = %ffmpeg.display(), "transcode engine located");
        Ok(Self { ffmpeg })
    }

    pub fn executable(&self) -> &Path {
        &self.ffmpeg
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn image_extensions_classify_as_images() {
        assert_eq!(MediaKind::from_path(Path::new("a/beach.PNG")), MediaKind::Image);
        assert_eq!(MediaKind::from_path(Path::new("shot.jpeg")), MediaKind::Image);
    }

    #[test]
    fn everything_else_imports_as_video() {
        assert_eq!(MediaKind::from_path(Path::new("intro.mp4")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("clip.mov")), MediaKind::Video);
        assert_eq!(MediaKind::from_path(Path::new("no_extension")), MediaKind::Video);
    }

    #[test]
    fn classification_preserves_selection_order_and_names() {
        let imported = classify_files([
            PathBuf::from("media/one.png"),
            PathBuf::from("media/two.mp4"),
        ]);
        assert_eq!(imported.len(), 2);
        assert_eq!(imported[0].display_name, "one.png");
        assert_eq!(imported[0].kind, MediaKind::Image);
        assert_eq!(imported[1].display_name, "two.mp4");
        assert_eq!(imported[1].kind, MediaKind::Video);
    }
}
