//! ASCII PPM ("P3") output
//!
//! Header `P3\n<width> <height>\n255\n`, then one text line per pixel row
//! of space-separated `R G B ` byte triples, rows top to bottom. The depth
//! writer maps each stored z to a gray byte.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::raster::framebuffer::FrameBuffer;

fn write_header<W: Write>(w: &mut W, width: usize, height: usize) -> io::Result<()> {
    writeln!(w, "P3")?;
    writeln!(w, "{} {}", width, height)?;
    writeln!(w, "255")
}

/// Encode the color raster as P3 text.
pub fn encode_color<W: Write>(w: &mut W, fb: &FrameBuffer) -> io::Result<()> {
    write_header(w, fb.width(), fb.height())?;
    let data = fb.data();
    for row in 0..fb.height() {
        for col in 0..fb.width() {
            let start = (row * fb.width() + col) * 3;
            write!(w, "{} {} {} ", data[start], data[start + 1], data[start + 2])?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Encode the depth raster as grayscale P3 text, byte = z·255 saturating.
pub fn encode_depth<W: Write>(w: &mut W, fb: &FrameBuffer) -> io::Result<()> {
    write_header(w, fb.width(), fb.height())?;
    let z_buffer = fb.z_buffer();
    for row in 0..fb.height() {
        for col in 0..fb.width() {
            let z = z_buffer[row * fb.width() + col];
            let gray = (z * 255.0).clamp(0.0, 255.0) as u8;
            write!(w, "{} {} {} ", gray, gray, gray)?;
        }
        writeln!(w)?;
    }
    Ok(())
}

/// Write the color raster to a P3 file.
pub fn write_color<P: AsRef<Path>>(fb: &FrameBuffer, path: P) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    encode_color(&mut file, fb)?;
    file.flush()
}

/// Write the depth raster to a grayscale P3 file.
pub fn write_depth<P: AsRef<Path>>(fb: &FrameBuffer, path: P) -> io::Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    encode_depth(&mut file, fb)?;
    file.flush()
}
