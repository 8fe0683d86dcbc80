use anyhow::{anyhow, bail, Context, Result};
#[cfg(feature = "time")]
use palpng::util::event_log::{log_event, Event};
use palpng::{ErrorKind, ImageInfo};
use std::io::{self, BufWriter, Write};
#[cfg(feature = "time")]
use std::time::Instant;

/// Uncompressed true-color image.
const TGA_TRUE_COLOR: u8 = 0x02;

/// Writes `pixels` as a 24-bit TGA: rows bottom-up, channels in BGR order.
fn write_tga<W: Write>(mut w: W, info: &ImageInfo, pixels: &[u8]) -> Result<()> {
    let width = u16::try_from(info.width).context("TGA width is limited to 65535")?;
    let height = u16::try_from(info.height).context("TGA height is limited to 65535")?;

    let mut header = [0_u8; 18];
    header[2] = TGA_TRUE_COLOR;
    header[12..14].copy_from_slice(&width.to_le_bytes());
    header[14..16].copy_from_slice(&height.to_le_bytes());
    header[16] = 24;

    w.write_all(&header)?;

    for row in pixels.chunks_exact(info.width as usize * 4).rev() {
        for pixel in row.chunks_exact(4) {
            w.write_all(&[pixel[2], pixel[1], pixel[0]])?;
        }
    }

    w.flush()?;

    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args();
    let program = args.next().unwrap_or_else(|| "palpng2tga".to_owned());
    let image_path = args
        .next()
        .ok_or_else(|| anyhow!("usage: {program} <file>"))?;

    #[cfg(feature = "time")]
    let a = Instant::now();

    let info = match palpng::stat(&image_path) {
        Ok(info) => info,
        Err(err) if err.kind() == ErrorKind::FileSystem => {
            bail!("'{image_path}' not found: {err}")
        }
        Err(err) => bail!("{}: {err}", err.kind().name()),
    };

    eprintln!(
        "# [{}] {} bytes, {}x{} pixels",
        file!(),
        info.required_bytes,
        info.width,
        info.height
    );

    let mut pixels = vec![0_u8; info.required_bytes];
    if let Err(err) = palpng::load(&image_path, &mut pixels) {
        bail!("{}: {err}", err.kind().name());
    }

    write_tga(BufWriter::new(io::stdout().lock()), &info, &pixels)?;

    #[cfg(feature = "time")]
    log_event("", Event::TotalElapsed, Some(a.elapsed()));

    Ok(())
}
