use std::fs;
use std::io::{self, Cursor};
use std::path::{Path, PathBuf};

use image::{ImageFormat, RgbaImage};
use thiserror::Error;

pub const DEFAULT_EXPORT_FILE_NAME: &str = "redacted-image.png";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("export file name is empty")]
    MissingFileName,
    #[error("failed to encode png: {message}")]
    Encode { message: String },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Destination for a flattened export frame.
pub trait ExportSink {
    fn write_png(&mut self, frame: &RgbaImage) -> StorageResult<()>;
}

pub fn encode_png(frame: &RgbaImage) -> StorageResult<Vec<u8>> {
    let mut bytes = Vec::new();
    frame
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .map_err(|err| StorageError::Encode {
            message: err.to_string(),
        })?;
    Ok(bytes)
}

/// Writes PNG files, replacing any existing file at the target path.
#[derive(Debug, Clone)]
pub struct PngFileSink {
    path: PathBuf,
}

impl PngFileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Targets `file_name` inside `directory`.
    pub fn in_directory(directory: impl AsRef<Path>, file_name: &str) -> StorageResult<Self> {
        if file_name.trim().is_empty() {
            return Err(StorageError::MissingFileName);
        }
        Ok(Self::new(directory.as_ref().join(file_name)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ExportSink for PngFileSink {
    fn write_png(&mut self, frame: &RgbaImage) -> StorageResult<()> {
        let bytes = encode_png(frame)?;
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&self.path, bytes)?;
        tracing::info!(
            path = %self.path.display(),
            width = frame.width(),
            height = frame.height(),
            "exported redacted image"
        );
        Ok(())
    }
}

/// Keeps the encoded PNG in memory.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    bytes: Option<Vec<u8>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bytes(&self) -> Option<&[u8]> {
        self.bytes.as_deref()
    }

    pub fn into_bytes(self) -> Option<Vec<u8>> {
        self.bytes
    }
}

impl ExportSink for MemorySink {
    fn write_png(&mut self, frame: &RgbaImage) -> StorageResult<()> {
        self.bytes = Some(encode_png(frame)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn frame() -> RgbaImage {
        RgbaImage::from_fn(3, 2, |x, y| Rgba([x as u8 * 40, y as u8 * 90, 7, 255]))
    }

    #[test]
    fn memory_sink_holds_decodable_png() {
        let mut sink = MemorySink::new();
        assert!(sink.bytes().is_none());
        sink.write_png(&frame()).expect("encode should succeed");

        let bytes = sink.into_bytes().expect("bytes present after write");
        assert!(bytes.starts_with(b"\x89PNG"));
        let decoded = image::load_from_memory(&bytes)
            .expect("decode png")
            .into_rgba8();
        assert_eq!(decoded, frame());
    }

    #[test]
    fn in_directory_rejects_blank_file_name() {
        let err = PngFileSink::in_directory("/tmp", "  ").expect_err("blank name should fail");
        assert!(matches!(err, StorageError::MissingFileName));
    }

    #[test]
    fn in_directory_joins_file_name() {
        let sink = PngFileSink::in_directory("/home/test/Pictures", DEFAULT_EXPORT_FILE_NAME)
            .expect("valid name");
        assert_eq!(
            sink.path(),
            Path::new("/home/test/Pictures/redacted-image.png")
        );
    }

    #[test]
    fn file_sink_creates_parent_dirs_and_overwrites() {
        let dir = std::env::temp_dir().join(format!("redact-storage-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        let mut sink = PngFileSink::new(dir.join("nested").join(DEFAULT_EXPORT_FILE_NAME));

        sink.write_png(&RgbaImage::from_pixel(1, 1, Rgba([1, 2, 3, 255])))
            .expect("first write");
        sink.write_png(&frame()).expect("second write");

        let written = image::open(sink.path()).expect("open export").into_rgba8();
        assert_eq!(written, frame());
        let _ = fs::remove_dir_all(dir);
    }
}
