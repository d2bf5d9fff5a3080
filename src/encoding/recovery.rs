use tracing::{trace, warn};

/// Best-effort UTF-8 decoder with single-byte Latin-1 recovery
///
/// # Algorithm
///
/// Decode UTF-8 from the current position. On a decode error at byte
/// offset `p`:
///
/// 1. If `p <= last`, use `p = last + 1` instead. Bytes skipped this way
///    are dropped.
/// 2. If `p` is past the end of the input, stop.
/// 3. Emit `bytes[p]` as the Latin-1 character `U+00XX`.
/// 4. Set `last = p` and resume UTF-8 decoding at `p + 1`.
///
/// `last` lives as long as the decoder and is shared by every
/// [`decode`](Self::decode) call made on it; only a new decoder starts from
/// scratch. Callers that decode concurrently use one decoder per call
/// (see [`decode_mixed`]).
///
/// Decoding never fails and always moves forward: every recovered offset is
/// strictly greater than the one before it.
#[derive(Debug, Default, Clone)]
pub struct RecoveryDecoder {
    last: Option<usize>,
    recovered: Vec<usize>,
}

impl RecoveryDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Offset of the most recent Latin-1 recovery, if any
    pub fn last_recovered(&self) -> Option<usize> {
        self.last
    }

    /// Every offset recovered so far, in the order they were resolved
    pub fn recovered_offsets(&self) -> &[usize] {
        &self.recovered
    }

    /// Decodes `bytes`, substituting Latin-1 for invalid UTF-8 bytes
    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut out = String::with_capacity(bytes.len());
        let mut pos = 0;

        while pos < bytes.len() {
            match std::str::from_utf8(&bytes[pos..]) {
                Ok(rest) => {
                    out.push_str(rest);
                    break;
                }
                Err(err) => {
                    let valid_end = pos + err.valid_up_to();
                    // Everything before the error is valid UTF-8.
                    out.push_str(&String::from_utf8_lossy(&bytes[pos..valid_end]));

                    let mut p = valid_end;
                    if let Some(last) = self.last {
                        if p <= last {
                            p = last + 1;
                        }
                    }
                    if p >= bytes.len() {
                        break;
                    }

                    trace!(offset = p, byte = bytes[p], "latin-1 recovery");
                    out.push(char::from(bytes[p]));
                    self.last = Some(p);
                    self.recovered.push(p);
                    pos = p + 1;
                }
            }
        }

        out
    }
}

/// Decodes one response body with a fresh [`RecoveryDecoder`]
pub fn decode_mixed(bytes: &[u8]) -> String {
    let mut decoder = RecoveryDecoder::new();
    let text = decoder.decode(bytes);
    if !decoder.recovered_offsets().is_empty() {
        warn!(
            "Recovered {} Latin-1 byte(s), first at offset {}",
            decoder.recovered_offsets().len(),
            decoder.recovered_offsets()[0]
        );
    }
    text
}
