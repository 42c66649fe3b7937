//! Frame sequences: the range-string codec, the extension allow-list and
//! the compression of per-frame listings into sequence entries.

pub mod codec;
pub mod compress;
pub mod extensions;

pub use codec::{frame_to_string, seq_to_string, string_to_frame, string_to_seq, Seq};
pub use compress::{seq_compress, SeqMode};
pub use extensions::SeqExtensions;
