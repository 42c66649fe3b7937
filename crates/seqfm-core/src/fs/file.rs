//! The `File` entity: one name on disk, or a whole numbered sequence.

use std::fmt;
use std::ops::{BitOr, BitOrAssign};
use std::time::SystemTime;

use crate::fs::path::PATH_SEPARATOR;
use crate::fs::split::split;
use crate::seq::codec::{frame_to_string, seq_to_string, string_to_seq, Seq};
use crate::seq::extensions::SeqExtensions;

static EMPTY_SEQ: Seq = Seq::new_const();

/// Coarse classification used for masks and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileType {
    File,
    Seq,
    Directory,
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileType::File => "file",
            FileType::Seq => "seq",
            FileType::Directory => "dir",
        };
        f.pad(label)
    }
}

/// What a [`File`] stands for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileKind {
    /// A single file. The [`Seq`] holds the frames parsed from its number
    /// token, empty when it has none.
    File(Seq),
    /// A directory. Directories never carry frames.
    Directory,
    /// A family of numbered files sharing base and extension.
    Sequence(Seq),
}

/// Owner permission bits of a file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Permissions(u8);

impl Permissions {
    pub const NONE: Self = Self(0);
    pub const READ: Self = Self(1);
    pub const WRITE: Self = Self(2);
    pub const EXEC: Self = Self(4);

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for Permissions {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for Permissions {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Permissions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let flag = |p: Permissions, c: char| if self.contains(p) { c } else { '-' };
        write!(
            f,
            "{}{}{}",
            flag(Permissions::READ, 'r'),
            flag(Permissions::WRITE, 'w'),
            flag(Permissions::EXEC, 'x')
        )
    }
}

/// A file name decomposed into path, base, number and extension, with
/// optional file-system metadata.
///
/// A `File` is built from a path string and split immediately. It either
/// names one file on disk or, once [`crate::seq_compress`] has merged it
/// with its siblings, a whole sequence of frames.
///
/// # Examples
///
/// ```
/// use seqfm_core::{File, SeqExtensions};
///
/// let exts = SeqExtensions::new([".exr"]);
/// let file = File::new("/shots/render.0001.exr", &exts);
/// assert_eq!(file.base(), "render.");
/// assert_eq!(file.number(), "0001");
/// assert_eq!(file.seq().pad(), 4);
/// assert!(file.is_seq_valid());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: String,
    base: String,
    number: String,
    extension: String,
    kind: FileKind,
    size: u64,
    user: u32,
    permissions: Permissions,
    modified: Option<SystemTime>,
    has_seq_extension: bool,
}

impl Default for File {
    fn default() -> Self {
        Self {
            path: String::new(),
            base: String::new(),
            number: String::new(),
            extension: String::new(),
            kind: FileKind::File(Seq::default()),
            size: 0,
            user: 0,
            permissions: Permissions::NONE,
            modified: None,
            has_seq_extension: false,
        }
    }
}

impl File {
    /// Parses `name` without touching the file system.
    pub fn new(name: &str, extensions: &SeqExtensions) -> Self {
        let mut file = Self::default();
        file.set(name, extensions, false);
        file
    }

    /// Replaces this entry with a freshly parsed `name`.
    ///
    /// The name is split, its number decoded into frames, the extension
    /// checked against `extensions`, and, when `do_stat` is set, the file
    /// system queried for metadata.
    pub fn set(&mut self, name: &str, extensions: &SeqExtensions, do_stat: bool) {
        let parts = split(name);
        let seq = string_to_seq(&parts.number);

        *self = Self {
            has_seq_extension: extensions.contains(&parts.extension),
            path: parts.path,
            base: parts.base,
            number: parts.number,
            extension: parts.extension,
            kind: FileKind::File(seq),
            ..Self::default()
        };

        if do_stat {
            self.stat();
        }
    }

    /// Reconstructs a file name.
    ///
    /// For a sequence, `Some(frame)` yields that frame's file name and
    /// `None` yields the compact range form (`render.1-10.exr`). Anything
    /// else reuses the number exactly as it was found on disk.
    pub fn get(&self, frame: Option<i64>, include_path: bool) -> String {
        let number = match (&self.kind, frame) {
            (FileKind::Sequence(seq), Some(frame)) => frame_to_string(frame, seq.pad()),
            (FileKind::Sequence(seq), None) if !seq.is_empty() => seq_to_string(seq),
            _ => self.number.clone(),
        };

        let path = if include_path { self.path.as_str() } else { "" };
        format!("{path}{}{number}{}", self.base, self.extension)
    }

    /// The display name: [`File::get`] without frame or path.
    pub fn name(&self) -> String {
        self.get(None, false)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    /// The number token exactly as found in the file name.
    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn kind(&self) -> &FileKind {
        &self.kind
    }

    pub fn file_type(&self) -> FileType {
        match self.kind {
            FileKind::File(_) => FileType::File,
            FileKind::Directory => FileType::Directory,
            FileKind::Sequence(_) => FileType::Seq,
        }
    }

    /// The frames this entry covers. Empty for directories.
    pub fn seq(&self) -> &Seq {
        match &self.kind {
            FileKind::File(seq) | FileKind::Sequence(seq) => seq,
            FileKind::Directory => &EMPTY_SEQ,
        }
    }

    /// Size in bytes; summed over all frames for a sequence.
    pub fn size(&self) -> u64 {
        self.size
    }

    /// Owning user id (`0` where the platform has none).
    pub fn user(&self) -> u32 {
        self.user
    }

    pub fn permissions(&self) -> Permissions {
        self.permissions
    }

    /// Last-modified time; the newest frame's for a sequence.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn is_dir(&self) -> bool {
        matches!(self.kind, FileKind::Directory)
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self.kind, FileKind::Sequence(_))
    }

    /// Returns `true` when the name starts with `.` and is not `.` or `..`.
    pub fn is_hidden(&self) -> bool {
        let name = self.name();
        name.starts_with('.') && name != "." && name != ".."
    }

    /// Returns `true` if the extension is on the sequence allow-list this
    /// entry was built with.
    pub fn has_seq_extension(&self) -> bool {
        self.has_seq_extension
    }

    /// Returns `true` if this entry can take part in sequence grouping.
    pub fn is_seq_valid(&self) -> bool {
        match &self.kind {
            FileKind::Directory => false,
            FileKind::Sequence(seq) => !seq.is_empty(),
            FileKind::File(seq) => self.has_seq_extension && !seq.is_empty(),
        }
    }

    /// Queries the file system for this entry's metadata.
    ///
    /// Sequences are stat-ed through their first frame. Returns `false` if
    /// the file could not be found, leaving the metadata untouched.
    pub fn stat(&mut self) -> bool {
        let target = match &self.kind {
            FileKind::Sequence(seq) => self.get(seq.start(), true),
            _ => self.get(None, true),
        };
        self.stat_at(&target)
    }

    /// Like [`File::stat`] but queries `path` instead of this entry's name.
    ///
    /// The literal path is tried first, then with a separator appended, then
    /// with its last character removed, which covers directory names given
    /// with or without a trailing separator.
    pub fn stat_at(&mut self, path: &str) -> bool {
        let Some(metadata) = stat_with_fallbacks(path) else {
            tracing::debug!(path, "stat failed");
            return false;
        };

        self.size = metadata.len();
        self.modified = metadata.modified().ok();
        self.user = owner_of(&metadata);
        self.permissions = permissions_of(&metadata);

        if metadata.is_dir() {
            if matches!(self.kind, FileKind::File(_)) {
                self.kind = FileKind::Directory;
            }
        } else if self.is_dir() {
            self.kind = FileKind::File(string_to_seq(&self.number));
        }
        true
    }

    /// Absorbs `other` into this sequence.
    ///
    /// Succeeds only when `self` is a sequence, `other` is sequence-valid,
    /// base and extension are identical, and the two paddings agree. The
    /// frames are appended unsorted and metadata is accumulated: sizes
    /// summed, permissions combined, newest time and highest user id kept.
    pub fn seq_add(&mut self, other: &File) -> bool {
        if !other.is_seq_valid() || self.base != other.base || self.extension != other.extension {
            return false;
        }
        let FileKind::Sequence(seq) = &mut self.kind else {
            return false;
        };
        let Some(pad) = seq.merged_pad(other.seq()) else {
            return false;
        };

        seq.append(other.seq());
        seq.set_pad(pad);

        self.size += other.size;
        self.user = self.user.max(other.user);
        self.permissions |= other.permissions;
        self.modified = self.modified.max(other.modified);
        true
    }

    /// Sorts a sequence's frames numerically. Other kinds are untouched.
    pub fn seq_sort(&mut self) {
        if let FileKind::Sequence(seq) = &mut self.kind {
            seq.sort();
        }
    }

    /// Turns a sequence-valid file into a sequence accumulator.
    pub(crate) fn into_sequence(mut self) -> Self {
        if let FileKind::File(seq) = self.kind {
            self.kind = FileKind::Sequence(seq);
        }
        self
    }

    /// Fills a sequence's gaps so it spans its first to last frame.
    pub(crate) fn collapse_range(&mut self) {
        if let FileKind::Sequence(seq) = &mut self.kind {
            seq.collapse_to_range();
        }
    }

    /// Turns a sequence holding a single frame back into a plain file.
    pub(crate) fn demote_single_frame(&mut self) {
        if let FileKind::Sequence(seq) = &mut self.kind {
            if seq.len() == 1 {
                let seq = std::mem::take(seq);
                self.kind = FileKind::File(seq);
            }
        }
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get(None, true))
    }
}

/// Paths tried by [`File::stat_at`], in order: the literal path, the path
/// with a separator appended, the path without its last character.
fn stat_candidates(path: &str) -> Vec<String> {
    if path.is_empty() {
        return Vec::new();
    }
    let mut candidates = vec![path.to_string(), format!("{path}{PATH_SEPARATOR}")];

    let mut chars = path.chars();
    chars.next_back();
    if !chars.as_str().is_empty() {
        candidates.push(chars.as_str().to_string());
    }
    candidates
}

fn stat_with_fallbacks(path: &str) -> Option<std::fs::Metadata> {
    first_metadata(path, |candidate| std::fs::metadata(candidate))
}

fn first_metadata<F>(path: &str, lookup: F) -> Option<std::fs::Metadata>
where
    F: Fn(&str) -> std::io::Result<std::fs::Metadata>,
{
    for (attempt, candidate) in stat_candidates(path).iter().enumerate() {
        if let Ok(metadata) = lookup(candidate) {
            if attempt > 0 {
                tracing::debug!(path, candidate = candidate.as_str(), "stat succeeded on fallback");
            }
            return Some(metadata);
        }
    }
    None
}

#[cfg(unix)]
fn owner_of(metadata: &std::fs::Metadata) -> u32 {
    use std::os::unix::fs::MetadataExt;
    metadata.uid()
}

#[cfg(not(unix))]
fn owner_of(_metadata: &std::fs::Metadata) -> u32 {
    0
}

#[cfg(unix)]
fn permissions_of(metadata: &std::fs::Metadata) -> Permissions {
    use std::os::unix::fs::PermissionsExt;
    let mode = metadata.permissions().mode();
    let mut out = Permissions::NONE;
    if mode & 0o400 != 0 {
        out |= Permissions::READ;
    }
    if mode & 0o200 != 0 {
        out |= Permissions::WRITE;
    }
    if mode & 0o100 != 0 {
        out |= Permissions::EXEC;
    }
    out
}

#[cfg(not(unix))]
fn permissions_of(metadata: &std::fs::Metadata) -> Permissions {
    let mut out = Permissions::READ;
    if !metadata.permissions().readonly() {
        out |= Permissions::WRITE;
    }
    out
}
