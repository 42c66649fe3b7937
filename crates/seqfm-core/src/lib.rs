//! seqfm core library: UI-agnostic file sequence logic.
//!
//! `seqfm-core` locates, names and groups numbered image files
//! (`render.0001.exr … render.0100.exr`) and converts between explicit frame
//! lists and compact range strings (`"1-10,12,15-20"`). Frontends build
//! listings with the pipeline
//! [`read_directory`] → [`filter`] → [`sort`] → [`seq_compress`] →
//! [`sort`] / [`sort_directories_first`].
//!
//! # Modules
//!
//! - [`fs`]: Path helpers, the file name splitter, the [`File`] entity and directory reading.
//! - [`seq`]: The [`Seq`] frame list, range-string codec and sequence compression.
//! - [`nav`]: Filtering and sorting of listings.
//! - [`config`]: User-facing configuration (TOML-based settings).
//! - [`error`]: Unified error type ([`CoreError`]) and result alias ([`CoreResult`]).

pub mod config;
pub mod error;
pub mod fs;
pub mod nav;
pub mod seq;

pub use config::settings::{Config, ListingConfig, SequenceConfig};
pub use error::{CoreError, CoreResult};
pub use fs::file::{File, FileKind, FileType, Permissions};
pub use fs::ops::read_directory;
pub use fs::path::{
    is_path_separator, path_absolute, path_expand, path_fix, path_split, PATH_SEPARATOR,
};
pub use fs::split::{split, FileNameParts};
pub use nav::filter::{filter, sort, sort_directories_first, FilterMask, SortKey};
pub use seq::codec::{
    frame_to_string, seq_to_string, string_to_frame, string_to_seq, Seq, PAD_MAX, SEQ_MAX,
};
pub use seq::compress::{seq_compress, SeqMode};
pub use seq::extensions::SeqExtensions;

/// Normalises a string to NFC (composed) form.
///
/// macOS stores filenames in NFD (decomposed), which would otherwise make
/// two spellings of the same base name fall into different sequences.
pub fn nfc_string(s: &str) -> String {
    use unicode_normalization::UnicodeNormalization;
    s.nfc().collect()
}
