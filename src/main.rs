//! Panning icon builder.
//!
//! Usage: create_icon <input.png> <output.gif>
//!
//! The input image must be exactly 8 pixels tall; an 8x8 window pans across
//! its width, one pixel per frame. Writes the GIF plus a
//! `data:image/gif;base64,...` sidecar at `<output.gif>.txt`.

use create_icon::{create_panning_animation, encoder, RepeatPolicy, Summary, Timing};
use std::env;
use std::process;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        println!("Usage: create_icon <input.png> <output.gif>");
        println!();
        println!("The input image must be exactly 8 pixels tall.");
        println!("An 8x8 window pans across the width to create the animation.");
        process::exit(1);
    }

    let timing = Timing::default();
    let policy = RepeatPolicy::default();

    match create_panning_animation(&args[1], &args[2], timing, policy) {
        Ok(summary) => report(&summary, &args[2], timing),
        Err(err) => {
            println!("Error: {}", err);
            process::exit(1);
        }
    }
}

fn report(summary: &Summary, output: &str, timing: Timing) {
    println!(
        "Created {} frames from {}x{} image",
        summary.frames_per_pass, summary.width, summary.height
    );
    println!(
        "Hold at start: {}ms, Hold at end: {}ms, Frame duration: {}ms",
        timing.hold_start_ms, timing.hold_end_ms, timing.frame_duration_ms
    );
    if let RepeatPolicy::Repeated { times } = summary.policy {
        println!(
            "Repeated the sequence {}x: {} frames total, looping forever",
            times, summary.total_frames
        );
    }
    println!("Saved animated GIF to: {}", output);

    let preview_len = summary.base64.len().min(100);
    println!();
    println!("Base64 for the device icon field:");
    println!(
        "{}{}...",
        encoder::DATA_URI_PREFIX,
        &summary.base64[..preview_len]
    );
    println!();
    println!(
        "Full base64 ({} chars) saved to: {}",
        summary.base64.len(),
        encoder::sidecar_path(output.as_ref()).display()
    );
}
