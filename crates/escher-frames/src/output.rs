//! Streaming frame output.
//!
//! Frames are appended as JSON Lines so a viewer can tail the file while the
//! renderer is still running.

use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::frame::Frame;

/// File name used for the frame stream inside an output directory.
pub const FRAMES_FILE_NAME: &str = "frames.jsonl";

/// Errors that can occur during output operations.
#[derive(Debug, Error)]
pub enum OutputError {
    /// I/O error (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// Frame holds infinite or NaN values, which JSON cannot represent
    #[error("frame {tick} is not finite (zoom {zoom_factor})")]
    NonFinite { tick: u64, zoom_factor: f64 },
}

/// Appends frames to `frames.jsonl` in an output directory.
#[derive(Debug)]
pub struct FrameWriter {
    path: PathBuf,
    writer: BufWriter<File>,
    frames_written: u64,
}

impl FrameWriter {
    /// Creates the output directory if needed and truncates any previous stream.
    pub fn new(output_dir: &Path) -> Result<Self, OutputError> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(FRAMES_FILE_NAME);
        let file = File::create(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            frames_written: 0,
        })
    }

    /// Opens an existing stream for appending.
    pub fn append(output_dir: &Path) -> Result<Self, OutputError> {
        fs::create_dir_all(output_dir)?;
        let path = output_dir.join(FRAMES_FILE_NAME);
        let file = OpenOptions::new().create(true).append(true).open(&path)?;

        Ok(Self {
            path,
            writer: BufWriter::new(file),
            frames_written: 0,
        })
    }

    /// Writes one frame as a single line.
    ///
    /// Non-finite frames are rejected and nothing is written.
    pub fn write_frame(&mut self, frame: &Frame) -> Result<(), OutputError> {
        if !frame.is_finite() {
            return Err(OutputError::NonFinite {
                tick: frame.tick,
                zoom_factor: frame.zoom_factor,
            });
        }
        let line = frame.to_jsonl()?;
        writeln!(self.writer, "{}", line)?;
        self.frames_written += 1;
        Ok(())
    }

    /// Flushes buffered frames to disk.
    pub fn flush(&mut self) -> Result<(), OutputError> {
        self.writer.flush()?;
        Ok(())
    }

    /// Path of the stream file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of frames written by this writer.
    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }
}

/// Reads frames back from a `frames.jsonl` stream.
#[derive(Debug, Clone)]
pub struct FrameReader {
    path: PathBuf,
}

impl FrameReader {
    /// Creates a reader for the given file.
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }

    /// Creates a reader for the `frames.jsonl` in a directory.
    pub fn from_dir(output_dir: &Path) -> Self {
        Self::new(&output_dir.join(FRAMES_FILE_NAME))
    }

    /// Reads all frames from the file.
    pub fn read_all(&self) -> Result<Vec<Frame>, OutputError> {
        let content = fs::read_to_string(&self.path)?;
        let mut frames = Vec::new();

        for line in content.lines() {
            if !line.trim().is_empty() {
                frames.push(Frame::from_jsonl(line)?);
            }
        }

        Ok(frames)
    }

    /// Reads a specific frame (0-indexed by line).
    pub fn read_frame(&self, index: usize) -> Result<Option<Frame>, OutputError> {
        let content = fs::read_to_string(&self.path)?;

        match content.lines().filter(|l| !l.trim().is_empty()).nth(index) {
            Some(line) => Ok(Some(Frame::from_jsonl(line)?)),
            None => Ok(None),
        }
    }
}
