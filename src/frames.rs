use crate::{Dimension, Error, Timing, STRIP_HEIGHT, WINDOW_WIDTH};
use image::RgbaImage;
use log::debug;

/// One pass of 8x8 frames with their display durations, kept as flat RGB
/// buffers ready for the encoder.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSequence {
    pub frames: Vec<Vec<u8>>,
    pub durations_ms: Vec<u16>,
}

impl FrameSequence {
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The whole sequence concatenated with itself `times` back-to-back,
    /// frames and durations alike.
    pub fn repeated(self, times: usize) -> Self {
        let mut frames = Vec::with_capacity(self.frames.len() * times);
        let mut durations_ms = Vec::with_capacity(self.durations_ms.len() * times);
        for _ in 0..times {
            frames.extend_from_slice(&self.frames);
            durations_ms.extend_from_slice(&self.durations_ms);
        }
        Self {
            frames,
            durations_ms,
        }
    }
}

pub fn validate_dimensions(width: u32, height: u32) -> Result<(), Error> {
    if height != STRIP_HEIGHT {
        return Err(Error::InvalidDimensions {
            dimension: Dimension::Height,
            expected: STRIP_HEIGHT,
            actual: height,
        });
    }
    if width < WINDOW_WIDTH {
        return Err(Error::InvalidDimensions {
            dimension: Dimension::Width,
            expected: WINDOW_WIDTH,
            actual: width,
        });
    }
    Ok(())
}

/// Slides the 8x8 window one pixel at a time across the strip, flattening
/// each crop over opaque black and assigning its display duration. The
/// first-position hold wins the tie when the strip is exactly 8px wide.
pub fn build_sequence(img: &RgbaImage, timing: &Timing) -> Result<FrameSequence, Error> {
    let (width, height) = img.dimensions();
    validate_dimensions(width, height)?;

    let last_offset = width - WINDOW_WIDTH;
    let mut frames = Vec::with_capacity((last_offset + 1) as usize);
    let mut durations_ms = Vec::with_capacity((last_offset + 1) as usize);

    for x in 0..=last_offset {
        frames.push(flatten_window(img, x));

        let duration = if x == 0 {
            timing.hold_start_ms
        } else if x == last_offset {
            timing.hold_end_ms
        } else {
            timing.frame_duration_ms
        };
        durations_ms.push(duration);
        debug!("Frame at offset {}: {}ms", x, duration);
    }

    Ok(FrameSequence {
        frames,
        durations_ms,
    })
}

// Composites the 8x8 crop at `x` over an opaque black canvas using the
// crop's own alpha, yielding a flat RGB buffer with no transparency left.
fn flatten_window(img: &RgbaImage, x: u32) -> Vec<u8> {
    let mut rgb = Vec::with_capacity((WINDOW_WIDTH * STRIP_HEIGHT * 3) as usize);
    for row in 0..STRIP_HEIGHT {
        for col in 0..WINDOW_WIDTH {
            let px = img.get_pixel(x + col, row).0;
            let alpha = u16::from(px[3]);
            for &channel in &px[..3] {
                rgb.push((u16::from(channel) * alpha / 255) as u8);
            }
        }
    }
    rgb
}
