#[cfg(feature = "time")]
use crate::util::event_log::{log_event, Event};
use crate::{
    chunk::{check_signature, ChunkHeader, ChunkKind},
    error::{DecodeError, Result},
    header::{ImageHeader, ImageInfo},
    inflate::CompressedStream,
    palette::Palette,
    reader::ByteReader,
    reconstruct::ScanlineReader,
};
#[cfg(feature = "time")]
use std::time::Instant;
use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
};

/// Where a decode is at. Every variant owns what it has read so far, so
/// whatever state an error leaves behind is simply dropped.
#[derive(Debug)]
enum State {
    Start,
    SignatureChecked,
    HeaderParsed(ImageHeader),
    Iterating(Iteration),
    Ended(Decoded),
}

#[derive(Debug)]
struct Iteration {
    image_header: ImageHeader,
    palette: Option<Palette>,
    compressed_stream: CompressedStream,
}

#[derive(Debug)]
struct Decoded {
    image_header: ImageHeader,
    palette: Palette,
    input_buffer: Vec<u8>,
}

/// Decodes an 8-bit palette PNG from any byte source.
#[derive(Debug)]
pub struct Decoder<R> {
    reader: ByteReader<R>,
}

impl<R: Read> Decoder<R> {
    pub const fn new(input: R) -> Self {
        Self {
            reader: ByteReader::new(input),
        }
    }

    /// Reads the signature and the header, nothing else.
    pub fn stat(mut self) -> Result<ImageInfo> {
        let mut state = State::Start;

        loop {
            state = match state {
                State::HeaderParsed(image_header) => return image_header.info(),
                state => self.step(state)?,
            };
        }
    }

    /// Decodes the whole image into `pixels` as RGBA8, row-major, top row
    /// first. `pixels` must be exactly [`ImageInfo::required_bytes`] long.
    pub fn load(mut self, pixels: &mut [u8]) -> Result<()> {
        #[cfg(feature = "time")]
        let a = Instant::now();

        let mut state = State::Start;

        let decoded = loop {
            state = match state {
                State::HeaderParsed(image_header) => {
                    let expected = image_header.required_bytes()?;
                    if pixels.len() != expected {
                        return Err(DecodeError::OutputSize {
                            expected,
                            actual: pixels.len(),
                        });
                    }

                    self.step(State::HeaderParsed(image_header))?
                }
                State::Ended(decoded) => break decoded,
                state => self.step(state)?,
            };
        };

        #[cfg(feature = "time")]
        log_event("", Event::ParseChunks, Some(a.elapsed()));

        // The input is released before any pixel is written.
        drop(self);

        #[cfg(feature = "time")]
        let b = Instant::now();

        let Decoded {
            image_header,
            palette,
            input_buffer,
        } = decoded;

        ScanlineReader::new(&input_buffer, &image_header, &palette).read_lines(pixels)?;

        #[cfg(feature = "time")]
        log_event("", Event::Reconstruct, Some(b.elapsed()));

        Ok(())
    }

    fn step(&mut self, state: State) -> Result<State> {
        match state {
            State::Start => self.check_signature(),
            State::SignatureChecked => self.parse_header(),
            State::HeaderParsed(image_header) => Ok(Self::begin_iteration(image_header)),
            State::Iterating(iteration) => self.visit_chunk(iteration),
            State::Ended(_) => Err(DecodeError::InvalidFormat("decode already ended")),
        }
    }

    fn check_signature(&mut self) -> Result<State> {
        check_signature(&mut self.reader)?;
        log::debug!("signature ok");

        Ok(State::SignatureChecked)
    }

    fn parse_header(&mut self) -> Result<State> {
        let chunk = ChunkHeader::read(&mut self.reader)?;

        if chunk.kind != ChunkKind::Header {
            return Err(DecodeError::InvalidFormat(
                "image header chunk must appear first",
            ));
        }

        let image_header = ImageHeader::read(&mut self.reader, chunk.length)?;
        log::debug!(
            "image header: {}x{}",
            image_header.width,
            image_header.height
        );

        Ok(State::HeaderParsed(image_header))
    }

    fn begin_iteration(image_header: ImageHeader) -> State {
        State::Iterating(Iteration {
            image_header,
            palette: None,
            compressed_stream: CompressedStream::default(),
        })
    }

    fn visit_chunk(&mut self, mut iteration: Iteration) -> Result<State> {
        let chunk = ChunkHeader::read(&mut self.reader)?;
        log::debug!(
            "chunk {:?}, {} bytes at offset {}",
            chunk.kind,
            chunk.length,
            self.reader.position()
        );

        match chunk.kind {
            ChunkKind::PixelData => iteration
                .compressed_stream
                .append(&mut self.reader, chunk.length)?,
            ChunkKind::Palette => {
                if iteration.palette.is_some() {
                    log::warn!("replacing an earlier palette chunk");
                }

                iteration.palette = Some(Palette::read(&mut self.reader, chunk.length)?);
            }
            ChunkKind::End => return Self::end(iteration),
            ChunkKind::Header | ChunkKind::Unknown(_) => {
                log::warn!("skipping {:?} chunk", chunk.kind);
                chunk.skip(&mut self.reader)?;
            }
        }

        Ok(State::Iterating(iteration))
    }

    fn end(iteration: Iteration) -> Result<State> {
        let Iteration {
            image_header,
            palette,
            compressed_stream,
        } = iteration;

        #[cfg(feature = "time")]
        let c = Instant::now();

        let input_buffer = compressed_stream.inflate()?;

        #[cfg(feature = "time")]
        log_event("", Event::Inflate, Some(c.elapsed()));

        log::debug!(
            "inflated {} chunks, {} -> {} bytes",
            compressed_stream.chunks(),
            compressed_stream.len(),
            input_buffer.len()
        );

        let palette = palette.ok_or(DecodeError::InvalidFormat("no palette chunk"))?;

        Ok(State::Ended(Decoded {
            image_header,
            palette,
            input_buffer,
        }))
    }
}

fn open(path: &Path) -> Result<Decoder<BufReader<File>>> {
    Ok(Decoder::new(BufReader::new(File::open(path)?)))
}

/// Reads the dimensions of the PNG at `path` and the size of the buffer
/// [`load`] needs for it.
pub fn stat(path: impl AsRef<Path>) -> Result<ImageInfo> {
    open(path.as_ref())?.stat()
}

/// Decodes the PNG at `path` into `pixels`.
pub fn load(path: impl AsRef<Path>, pixels: &mut [u8]) -> Result<()> {
    open(path.as_ref())?.load(pixels)
}

/// [`stat`] then [`load`], into a freshly allocated buffer.
pub fn load_to_vec(path: impl AsRef<Path>) -> Result<(ImageInfo, Vec<u8>)> {
    let path = path.as_ref();
    let info = stat(path)?;

    let mut pixels = Vec::new();
    pixels.try_reserve_exact(info.required_bytes)?;
    pixels.resize(info.required_bytes, 0);

    load(path, &mut pixels)?;

    Ok((info, pixels))
}
