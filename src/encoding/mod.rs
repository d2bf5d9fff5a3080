//! Byte decoding for pages that mix UTF-8 and Latin-1
//!
//! The shop declares UTF-8 but some text blocks are stored as ISO-8859-1.
//! [`RecoveryDecoder`] decodes UTF-8 and falls back to Latin-1 one byte at
//! a time wherever the UTF-8 decode fails.

mod recovery;

pub use recovery::{decode_mixed, RecoveryDecoder};
