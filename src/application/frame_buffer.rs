// Frame reassembly - Turns an unframed character stream into telegram frames

/// Accumulates stream chunks and yields complete telegram frames.
///
/// A frame runs from a `/` start marker up to the first `!` end marker that
/// is followed by up to four hex checksum digits, an optional NUL and CRLF.
/// The frame body never contains another `/`; a later `/` restarts the
/// frame. Bytes before a recognised frame are discarded together with it,
/// so the buffer only ever holds the unconsumed tail of the stream.
#[derive(Debug, Default)]
pub struct FrameBuffer {
    buffer: String,
}

impl FrameBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, chunk: &str) {
        self.buffer.push_str(chunk);
    }

    /// Lazily yields every complete frame currently buffered, oldest first.
    /// Frames are removed from the buffer as they are yielded.
    pub fn drain(&mut self) -> Drain<'_> {
        Drain { buffer: self }
    }

    /// Unconsumed tail of the stream.
    pub fn pending(&self) -> &str {
        &self.buffer
    }

    fn take_frame(&mut self) -> Option<String> {
        let (start, end) = find_frame(&self.buffer)?;
        let frame = self.buffer[start..end].to_string();
        self.buffer.drain(..end);
        Some(frame)
    }
}

pub struct Drain<'a> {
    buffer: &'a mut FrameBuffer,
}

impl Iterator for Drain<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.buffer.take_frame()
    }
}

/// Locate the first complete frame, returning its byte range.
fn find_frame(buffer: &str) -> Option<(usize, usize)> {
    for (bang, _) in buffer.match_indices('!') {
        let Some(end) = trailer_end(&buffer[bang + 1..]) else {
            continue;
        };
        let Some(start) = buffer[..bang].rfind('/') else {
            continue;
        };
        // An empty body cannot terminate here, a later '!' may still do so
        if bang == start + 1 {
            continue;
        }
        return Some((start, bang + 1 + end));
    }

    None
}

/// Length of a complete checksum trailer (`[0-9A-F]{0,4}\0?\r\n`) at the
/// start of `rest`, or `None` if it is malformed or not fully received.
fn trailer_end(rest: &str) -> Option<usize> {
    let bytes = rest.as_bytes();
    let mut pos = bytes
        .iter()
        .take(4)
        .take_while(|b| b.is_ascii_digit() || (b'A'..=b'F').contains(*b))
        .count();

    if bytes.get(pos) == Some(&0) {
        pos += 1;
    }

    if bytes.get(pos..pos + 2) == Some(b"\r\n".as_slice()) {
        Some(pos + 2)
    } else {
        None
    }
}
