//! File-system side of seqfm.
//!
//! Path string helpers ([`path`]), the file name splitter ([`split`]), the
//! [`file::File`] entity with its metadata, and directory reading
//! ([`ops::read_directory`]).

pub mod file;
pub mod ops;
pub mod path;
pub mod split;

pub use file::{File, FileKind, FileType, Permissions};
pub use split::{split, FileNameParts};
