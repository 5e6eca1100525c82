// MIT License - Copyright (c) 2026 Peter Wright

//! Camera image classification.
//!
//! The controller only needs a yes/no answer to "is there a cat in this
//! picture at this confidence?". [`VisionClassifier`] is that seam; the image
//! handle is whatever the classifier wants it to be.

use rand::Rng;

use crate::error::Result;

/// Decides whether an image contains a cat.
///
/// Treated as a pure, possibly slow, synchronous call.
pub trait VisionClassifier: Send {
    /// Opaque image handle accepted by this classifier.
    type Image: Send;

    fn contains_cat(&self, image: &Self::Image, confidence_threshold: f32) -> Result<bool>;
}

/// A single camera frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Where the frame came from (file path, camera name, ...)
    pub source: String,
    pub data: Vec<u8>,
}

impl Frame {
    pub fn new(source: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            source: source.into(),
            data,
        }
    }

    /// Read a frame from an image file on disk.
    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        Ok(Self::new(path.display().to_string(), data))
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// Stand-in classifier without any real vision.
///
/// Draws a confidence uniformly from `[0, 1)` and reports a cat when it
/// reaches the threshold. An empty frame never contains a cat.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomClassifier;

impl VisionClassifier for RandomClassifier {
    type Image = Frame;

    fn contains_cat(&self, image: &Frame, confidence_threshold: f32) -> Result<bool> {
        if image.is_empty() {
            return Ok(false);
        }
        let confidence: f32 = rand::thread_rng().gen_range(0.0..1.0);
        Ok(confidence >= confidence_threshold)
    }
}
