//! Build script for the PSK transmit firmware
//!
//! Handles:
//! - Memory layout configuration
//! - Generation of the pulse-shape table (`pulse_shape_table.rs` in `OUT_DIR`)

use std::env;
use std::f64::consts::PI;
use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

/// Samples per symbol; must match `config::SAMPLES_PER_SYMBOL`
const SEGMENT_LEN: usize = 256;

/// Segment names in table order; must match `dsp::pulse_shape::Segment`
const SEGMENTS: [&str; 8] = [
    "ZERO",
    "HOLD_POSITIVE",
    "HOLD_NEGATIVE",
    "FALL_TO_NEGATIVE",
    "RISE_TO_POSITIVE",
    "DECAY_FROM_POSITIVE",
    "DECAY_FROM_NEGATIVE",
    "ATTACK_TO_POSITIVE",
];

/// Raised-cosine level of segment `index` at normalized time `t` in `0..=1`
fn shape(index: usize, t: f64) -> f64 {
    let c = (PI * t).cos();
    match index {
        1 => 1.0,
        2 => -1.0,
        3 => c,
        4 => -c,
        5 => 0.5 * (1.0 + c),
        6 => -0.5 * (1.0 + c),
        7 => 0.5 * (1.0 - c),
        _ => 0.0,
    }
}

fn main() {
    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");

    let Ok(manifest_dir) = env::var("CARGO_MANIFEST_DIR") else {
        panic!("CARGO_MANIFEST_DIR not set by cargo");
    };
    println!("cargo:rustc-link-search={manifest_dir}");

    let Ok(out_dir) = env::var("OUT_DIR") else {
        panic!("OUT_DIR not set by cargo");
    };
    let path = PathBuf::from(out_dir).join("pulse_shape_table.rs");
    if let Err(err) = fs::write(&path, render_table()) {
        panic!("failed to write {}: {err}", path.display());
    }
}

fn render_table() -> String {
    let mut out = String::new();
    let _ = writeln!(out, "// @generated by build.rs; do not edit.");
    let _ = writeln!(
        out,
        "pub(crate) static SHAPE_TABLE: [[f32; {}]; {}] = [",
        SEGMENT_LEN + 1,
        SEGMENTS.len()
    );
    for (index, name) in SEGMENTS.iter().enumerate() {
        let _ = writeln!(out, "    // {name}");
        let _ = write!(out, "    [");
        for n in 0..=SEGMENT_LEN {
            let t = n as f64 / SEGMENT_LEN as f64;
            // Snap rounding noise so the end points are exact.
            let mut v = shape(index, t);
            if v.abs() < 1e-12 {
                v = 0.0;
            }
            let _ = write!(out, "{:?}f32, ", v as f32);
        }
        let _ = writeln!(out, "],");
    }
    let _ = writeln!(out, "];");
    out
}
