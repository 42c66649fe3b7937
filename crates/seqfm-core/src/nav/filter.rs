//! Sorting and filtering for file listings.

use std::cmp::Ordering;
use std::ops::{BitOr, BitOrAssign};

use globset::{Glob, GlobSetBuilder};
use serde::{Deserialize, Serialize};

use crate::fs::file::{File, FileType};

/// Which kinds of entry [`filter`] removes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FilterMask(u8);

impl FilterMask {
    /// Remove nothing.
    pub const NONE: Self = Self(0);
    /// Remove everything that is not a directory.
    pub const FILES: Self = Self(1);
    /// Remove directories.
    pub const DIRECTORIES: Self = Self(2);
    /// Remove names starting with `.` (except `.` and `..`).
    pub const HIDDEN: Self = Self(4);

    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0 && other.0 != 0
    }
}

impl BitOr for FilterMask {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for FilterMask {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// Removes entries by kind and by glob pattern.
///
/// Entries matching `mask` are dropped. When `globs` is non-empty, an entry
/// survives only if its name matches at least one pattern; with
/// `glob_files_only` directories skip the pattern check so they remain
/// navigable. Malformed patterns are ignored. Relative order is preserved.
/// Returns a new `Vec`; the input is never mutated.
pub fn filter(entries: &[File], mask: FilterMask, globs: &[&str], glob_files_only: bool) -> Vec<File> {
    let mut builder = GlobSetBuilder::new();
    let mut pattern_count = 0;
    for pattern in globs {
        match Glob::new(pattern) {
            Ok(glob) => {
                builder.add(glob);
                pattern_count += 1;
            }
            Err(err) => tracing::warn!(pattern, %err, "ignoring malformed glob"),
        }
    }
    let glob_set = if pattern_count > 0 {
        match builder.build() {
            Ok(set) => Some(set),
            Err(err) => {
                tracing::warn!(%err, "failed to build glob set");
                None
            }
        }
    } else {
        None
    };

    entries
        .iter()
        .filter(|e| {
            if mask.contains(FilterMask::FILES) && !e.is_dir() {
                return false;
            }
            if mask.contains(FilterMask::DIRECTORIES) && e.is_dir() {
                return false;
            }
            if mask.contains(FilterMask::HIDDEN) && e.is_hidden() {
                return false;
            }
            match &glob_set {
                Some(_) if glob_files_only && e.is_dir() => true,
                Some(set) => set.is_match(e.name()),
                None => true,
            }
        })
        .cloned()
        .collect()
}

/// The field by which entries are compared.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Alphabetical by display name (case-insensitive).
    #[default]
    Name,
    /// File, then sequence, then directory.
    Type,
    /// Size in bytes.
    Size,
    /// Owning user id.
    User,
    /// Owner permission bits.
    Permissions,
    /// Last-modified time.
    Time,
}

impl std::str::FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "name" => Ok(SortKey::Name),
            "type" => Ok(SortKey::Type),
            "size" => Ok(SortKey::Size),
            "user" => Ok(SortKey::User),
            "permissions" | "perm" => Ok(SortKey::Permissions),
            "time" | "date" => Ok(SortKey::Time),
            other => Err(format!("unknown sort key: {other}")),
        }
    }
}

/// Sorts entries by `key`, descending when `reverse` is set.
///
/// The sort is stable. Returns a **new** sorted `Vec<File>`; the input
/// slice is never mutated.
pub fn sort(entries: &[File], key: SortKey, reverse: bool) -> Vec<File> {
    let mut sorted: Vec<File> = entries.to_vec();

    sorted.sort_by(|a, b| {
        let ord = compare_by_key(a, b, key);
        if reverse {
            ord.reverse()
        } else {
            ord
        }
    });

    sorted
}

fn compare_by_key(a: &File, b: &File, key: SortKey) -> Ordering {
    match key {
        SortKey::Name => compare_names(a, b),
        SortKey::Type => a.file_type().cmp(&b.file_type()),
        SortKey::Size => a.size().cmp(&b.size()),
        SortKey::User => a.user().cmp(&b.user()),
        SortKey::Permissions => a.permissions().cmp(&b.permissions()),
        SortKey::Time => a.modified().cmp(&b.modified()),
    }
}

fn compare_names(a: &File, b: &File) -> Ordering {
    let (name_a, name_b) = (a.name(), b.name());
    name_a
        .to_lowercase()
        .cmp(&name_b.to_lowercase())
        .then_with(|| name_a.cmp(&name_b))
}

/// Moves directories ahead of everything else, keeping the existing order
/// within each group.
pub fn sort_directories_first(entries: &[File]) -> Vec<File> {
    let (mut dirs, others): (Vec<File>, Vec<File>) = entries
        .iter()
        .cloned()
        .partition(|e| e.file_type() == FileType::Directory);
    dirs.extend(others);
    dirs
}
