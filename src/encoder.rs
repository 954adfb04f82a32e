use crate::{frames::FrameSequence, RepeatPolicy, STRIP_HEIGHT, WINDOW_WIDTH};
use base64::Engine;
use gif::{Encoder, Frame, Repeat};
use log::{debug, info};
use std::fs;
use std::fs::File;
use std::path::{Path, PathBuf};

pub const DATA_URI_PREFIX: &str = "data:image/gif;base64,";

/// Encodes the sequence as an 8x8 animated GIF with per-frame delays and
/// the loop count the policy calls for. Each frame gets its own adaptive
/// local palette.
pub fn write_gif(path: &Path, sequence: &FrameSequence, policy: RepeatPolicy) -> anyhow::Result<()> {
    let mut file = File::create(path)?;
    let mut encoder = Encoder::new(&mut file, WINDOW_WIDTH as u16, STRIP_HEIGHT as u16, &[])?;
    encoder.set_repeat(match policy {
        RepeatPolicy::SinglePass { loops } => Repeat::Finite(loops),
        RepeatPolicy::Repeated { .. } => Repeat::Infinite,
    })?;
    info!("Wrote the GIF header and loop policy {:?}", policy);

    for (buffer, &duration_ms) in sequence.frames.iter().zip(&sequence.durations_ms) {
        let mut frame = Frame::from_rgb(WINDOW_WIDTH as u16, STRIP_HEIGHT as u16, buffer);
        // GIF delay is counted in 10ms units
        frame.delay = duration_ms / 10;
        encoder.write_frame(&frame)?;
        debug!("Wrote a frame with delay {}ms", duration_ms);
    }
    info!("Wrote {} frames to {}", sequence.len(), path.display());

    Ok(())
}

/// Reads the finished GIF back, base64-encodes its bytes and writes the
/// single-line data URI to `<path>.txt`. Returns the bare base64 payload.
pub fn write_sidecar(gif_path: &Path) -> anyhow::Result<String> {
    let bytes = fs::read(gif_path)?;
    let b64 = base64::engine::general_purpose::STANDARD.encode(&bytes);
    let sidecar = sidecar_path(gif_path);
    fs::write(&sidecar, format!("{}{}", DATA_URI_PREFIX, b64))?;
    info!(
        "Wrote {} base64 chars to {}",
        b64.len(),
        sidecar.display()
    );
    Ok(b64)
}

pub fn sidecar_path(gif_path: &Path) -> PathBuf {
    let mut name = gif_path.as_os_str().to_os_string();
    name.push(".txt");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{frames, Timing};
    use image::{Rgba, RgbaImage};

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(name)
    }

    fn sequence(width: u32) -> FrameSequence {
        let img = RgbaImage::from_pixel(width, 8, Rgba([120, 40, 200, 255]));
        frames::build_sequence(&img, &Timing::default()).unwrap()
    }

    fn read_back(path: &Path) -> (gif::Repeat, Vec<u16>) {
        let mut decoder = gif::DecodeOptions::new()
            .read_info(File::open(path).unwrap())
            .unwrap();
        let repeat = decoder.repeat();
        let mut delays = Vec::new();
        while let Some(frame) = decoder.read_next_frame().unwrap() {
            delays.push(frame.delay);
        }
        (repeat, delays)
    }

    #[test]
    fn gif_carries_delays_and_finite_loop() {
        let path = scratch("create_icon_finite.gif");
        write_gif(&path, &sequence(15), RepeatPolicy::SinglePass { loops: 2 }).unwrap();

        let (repeat, delays) = read_back(&path);
        assert_eq!(repeat, gif::Repeat::Finite(2));
        assert_eq!(delays, vec![50, 5, 5, 5, 5, 5, 5, 50]);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn repeated_policy_loops_forever() {
        let path = scratch("create_icon_infinite.gif");
        let tripled = sequence(10).repeated(3);
        write_gif(&path, &tripled, RepeatPolicy::Repeated { times: 3 }).unwrap();

        let (repeat, delays) = read_back(&path);
        assert_eq!(repeat, gif::Repeat::Infinite);
        assert_eq!(delays.len(), 9);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn sidecar_round_trips_the_gif_bytes() {
        let path = scratch("create_icon_sidecar.gif");
        write_gif(&path, &sequence(8), RepeatPolicy::default()).unwrap();
        let b64 = write_sidecar(&path).unwrap();

        let sidecar = sidecar_path(&path);
        let text = fs::read_to_string(&sidecar).unwrap();
        assert!(text.starts_with(DATA_URI_PREFIX));
        assert!(!text.ends_with('\n'));
        assert_eq!(&text[DATA_URI_PREFIX.len()..], b64);

        let decoded = base64::engine::general_purpose::STANDARD
            .decode(&text[DATA_URI_PREFIX.len()..])
            .unwrap();
        assert_eq!(decoded, fs::read(&path).unwrap());

        fs::remove_file(&path).unwrap();
        fs::remove_file(&sidecar).unwrap();
    }

    #[test]
    fn sidecar_path_appends_txt() {
        assert_eq!(
            sidecar_path(Path::new("out/icon.gif")),
            PathBuf::from("out/icon.gif.txt")
        );
    }
}
