use afl::fuzz;
use palpng::Decoder;

// Anything bigger than this is rejected before allocating, fuzz inputs are tiny.
const MAX_PIXEL_BYTES: usize = 1 << 24;

fn main() {
    fuzz!(|data: &[u8]| {
        let Ok(info) = Decoder::new(data).stat() else {
            return;
        };

        if info.required_bytes > MAX_PIXEL_BYTES {
            return;
        }

        let mut pixels = vec![0; info.required_bytes];
        let _ = Decoder::new(data).load(&mut pixels);
    });
}
