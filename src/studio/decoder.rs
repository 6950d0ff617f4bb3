use crate::error::{Result, StudioError};
use crate::models::{StreamEvent, StreamLine};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecoderState {
    Accumulating,
    Finished,
    Errored,
}

/// Incremental decoder for the newline-delimited JSON stream body.
///
/// Chunks arrive with arbitrary boundaries; the decoder buffers bytes, splits
/// on `\n`, and hands back the trailing incomplete fragment to the buffer.
/// Splitting happens on raw bytes, so a multi-byte UTF-8 character broken
/// across chunks is reassembled before the line is parsed.
///
/// A malformed line or an explicit `error` field terminates the decoder; no
/// further lines are processed and later pushes are rejected. Events already
/// handed to the sink stay with the caller.
#[derive(Debug)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
    state: DecoderState,
}

impl Default for StreamDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamDecoder {
    pub fn new() -> Self {
        StreamDecoder {
            buffer: Vec::new(),
            state: DecoderState::Accumulating,
        }
    }

    /// Feed one chunk of the response body, emitting an event per complete
    /// line that carries an image payload.
    pub fn push<F>(&mut self, chunk: &[u8], sink: &mut F) -> Result<()>
    where
        F: FnMut(StreamEvent),
    {
        self.ensure_accumulating()?;
        self.buffer.extend_from_slice(chunk);

        let mut cursor = 0;
        while let Some(offset) = self.buffer[cursor..].iter().position(|&b| b == b'\n') {
            let end = cursor + offset;
            let line = self.buffer[cursor..end].to_vec();
            cursor = end + 1;

            if let Err(e) = self.emit_line(&line, sink) {
                self.buffer.clear();
                return Err(e);
            }
        }
        self.buffer.drain(..cursor);
        Ok(())
    }

    /// Signal end of stream. A non-blank held-back fragment is treated as one
    /// final line, covering bodies without a trailing newline.
    pub fn finish<F>(&mut self, sink: &mut F) -> Result<()>
    where
        F: FnMut(StreamEvent),
    {
        self.ensure_accumulating()?;
        let tail = std::mem::take(&mut self.buffer);
        self.emit_line(&tail, sink)?;
        self.state = DecoderState::Finished;
        Ok(())
    }

    fn ensure_accumulating(&self) -> Result<()> {
        match self.state {
            DecoderState::Accumulating => Ok(()),
            DecoderState::Finished => Err(StudioError::StreamProtocolError(
                "stream already finished".into(),
            )),
            DecoderState::Errored => Err(StudioError::StreamProtocolError(
                "stream already terminated by a previous error".into(),
            )),
        }
    }

    fn emit_line<F>(&mut self, line: &[u8], sink: &mut F) -> Result<()>
    where
        F: FnMut(StreamEvent),
    {
        match decode_line(line) {
            Ok(Some(event)) => {
                sink(event);
                Ok(())
            }
            Ok(None) => Ok(()),
            Err(e) => {
                self.state = DecoderState::Errored;
                Err(e)
            }
        }
    }
}

/// Decode one complete line. Blank lines and records without an image payload
/// yield nothing; an `error` field or unparseable JSON fails the stream.
fn decode_line(line: &[u8]) -> Result<Option<StreamEvent>> {
    let text = std::str::from_utf8(line)
        .map_err(|e| StudioError::StreamProtocolError(format!("invalid UTF-8 in stream: {}", e)))?;
    let text = text.trim();
    if text.is_empty() {
        return Ok(None);
    }

    let record: StreamLine = serde_json::from_str(text)
        .map_err(|e| StudioError::StreamProtocolError(format!("malformed stream line: {}", e)))?;

    if let Some(message) = record.error {
        return Err(StudioError::StreamProtocolError(message));
    }

    match record.image_base64.clone().filter(|b64| !b64.is_empty()) {
        Some(payload) => Ok(Some(StreamEvent::from_line(&record, payload))),
        None => Ok(None),
    }
}
