use std::env;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// IEC 61966-2-1 decoding curve
fn srgb_to_linear(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 encoding curve
fn linear_to_srgb(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

/// Emit `pub static NAME: [f32; len]` sampling `curve` at `i / (len - 1)`.
fn write_table(
    out: &mut impl Write,
    name: &str,
    doc: &str,
    len: usize,
    curve: fn(f64) -> f64,
) -> io::Result<()> {
    writeln!(out, "/// {doc}")?;
    writeln!(out, "pub static {name}: [f32; {len}] = [")?;
    let last = (len - 1) as f64;
    for row in (0..len).collect::<Vec<_>>().chunks(8) {
        write!(out, "   ")?;
        for &i in row {
            write!(out, " {:.9},", curve(i as f64 / last) as f32)?;
        }
        writeln!(out)?;
    }
    writeln!(out, "];\n")
}

fn main() -> io::Result<()> {
    let out_dir = env::var("OUT_DIR").map_err(io::Error::other)?;
    let mut out = BufWriter::new(File::create(Path::new(&out_dir).join("gamma_lut.rs"))?);

    write_table(
        &mut out,
        "SRGB8_TO_LINEAR",
        "Linear light for each stored 8-bit sRGB value.",
        256,
        srgb_to_linear,
    )?;
    write_table(
        &mut out,
        "LINEAR_TO_SRGB",
        "sRGB value at `index / 4095` linear light, interpolated on lookup.",
        4096,
        linear_to_srgb,
    )?;
    out.flush()?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
