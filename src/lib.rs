pub mod encoder;
pub mod frames;

use log::info;
use std::fmt;
use std::path::Path;

/// Height every source strip must have, and the side length of the pan window.
pub const STRIP_HEIGHT: u32 = 8;
pub const WINDOW_WIDTH: u32 = 8;

/// Per-frame display timing, all in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub frame_duration_ms: u16,
    pub hold_start_ms: u16,
    pub hold_end_ms: u16,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            frame_duration_ms: 50,
            hold_start_ms: 500,
            hold_end_ms: 500,
        }
    }
}

/// How the finished animation repeats.
///
/// The two upstream script variants disagreed on this, so both are exposed:
/// one pass with a finite container loop count, or the pass concatenated
/// `times` back-to-back with the container looping forever.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RepeatPolicy {
    SinglePass { loops: u16 },
    Repeated { times: usize },
}

impl Default for RepeatPolicy {
    fn default() -> Self {
        Self::SinglePass { loops: 2 }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Width,
    Height,
}

#[derive(Debug, PartialEq, Eq)]
pub enum Error {
    InvalidDimensions {
        dimension: Dimension,
        expected: u32,
        actual: u32,
    },
    EmptySequence,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDimensions {
                dimension: Dimension::Height,
                expected,
                actual,
            } => write!(
                f,
                "image must be exactly {}px tall (got {}px)",
                expected, actual
            ),
            Self::InvalidDimensions {
                dimension: Dimension::Width,
                expected,
                actual,
            } => write!(
                f,
                "image must be at least {}px wide (got {}px)",
                expected, actual
            ),
            Self::EmptySequence => write!(f, "no frames generated"),
        }
    }
}

impl std::error::Error for Error {}

/// What a run produced, for the CLI to report.
#[derive(Debug)]
pub struct Summary {
    pub width: u32,
    pub height: u32,
    pub frames_per_pass: usize,
    pub total_frames: usize,
    pub policy: RepeatPolicy,
    /// The full base64 payload written to the sidecar (without the data-URI prefix).
    pub base64: String,
}

/// Builds the panning animation end to end: decode, validate, slice, apply
/// the repeat policy, encode the GIF to `output_path` and the base64
/// data-URI sidecar to `output_path + ".txt"`.
pub fn create_panning_animation<P: AsRef<Path>>(
    input_path: P,
    output_path: P,
    timing: Timing,
    policy: RepeatPolicy,
) -> anyhow::Result<Summary> {
    let img = image::open(input_path.as_ref())?.to_rgba8();
    let (width, height) = img.dimensions();
    info!("Decoded {}x{} source image", width, height);

    let mut sequence = frames::build_sequence(&img, &timing)?;
    let frames_per_pass = sequence.len();
    info!("Sliced {} frames from the source strip", frames_per_pass);

    if let RepeatPolicy::Repeated { times } = policy {
        sequence = sequence.repeated(times);
        info!("Repeated the pass {}x: {} frames total", times, sequence.len());
    }

    if sequence.is_empty() {
        return Err(Error::EmptySequence.into());
    }
    let total_frames = sequence.len();

    encoder::write_gif(output_path.as_ref(), &sequence, policy)?;
    let base64 = encoder::write_sidecar(output_path.as_ref())?;

    Ok(Summary {
        width,
        height,
        frames_per_pass,
        total_frames,
        policy,
        base64,
    })
}
