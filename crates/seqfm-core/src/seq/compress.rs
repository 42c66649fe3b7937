//! Merging per-frame directory entries into sequence entries.

use serde::{Deserialize, Serialize};

use crate::fs::file::File;

/// How [`seq_compress`] groups numbered files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeqMode {
    /// Leave every file as its own entry.
    Off,
    /// Group files and keep the exact frame list.
    #[default]
    Sparse,
    /// Group files and keep only the first-to-last span, filling gaps.
    Range,
}

impl std::str::FromStr for SeqMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "off" => Ok(SeqMode::Off),
            "sparse" => Ok(SeqMode::Sparse),
            "range" => Ok(SeqMode::Range),
            other => Err(format!("unknown sequence mode: {other}")),
        }
    }
}

/// Merges numbered files into sequence entries.
///
/// The input is expected in name order, as a directory listing sorted with
/// [`crate::sort`] would be. Each sequence-valid entry is first offered to
/// the sequence that absorbed the previous frame; if that refuses it, the
/// sequences already emitted are searched from the back, which handles
/// interleaved listings. Entries nothing accepts start a new sequence.
/// Everything else passes through in place.
///
/// Afterwards each sequence's frames are sorted, collapsed to a span in
/// [`SeqMode::Range`], and a sequence left with a single frame is returned
/// as an ordinary file.
///
/// Worst case cost is proportional to the number of entries times the
/// number of open sequences.
///
/// ```
/// use seqfm_core::{seq_compress, File, FileType, SeqExtensions, SeqMode};
///
/// let exts = SeqExtensions::new([".exr"]);
/// let files = vec![
///     File::new("render.0001.exr", &exts),
///     File::new("render.0002.exr", &exts),
///     File::new("render.0003.exr", &exts),
/// ];
/// let out = seq_compress(files, SeqMode::Sparse);
/// assert_eq!(out.len(), 1);
/// assert_eq!(out[0].file_type(), FileType::Seq);
/// assert_eq!(out[0].name(), "render.0001-0003.exr");
/// ```
pub fn seq_compress(files: Vec<File>, mode: SeqMode) -> Vec<File> {
    if mode == SeqMode::Off {
        return files;
    }

    let input_len = files.len();
    let mut out: Vec<File> = Vec::with_capacity(input_len);
    let mut current: Option<usize> = None;

    for file in files {
        if !file.is_seq_valid() {
            out.push(file);
            continue;
        }

        if let Some(idx) = current {
            if out[idx].seq_add(&file) {
                continue;
            }
        }

        let mut earlier = None;
        for idx in (0..out.len()).rev() {
            if Some(idx) != current && out[idx].seq_add(&file) {
                earlier = Some(idx);
                break;
            }
        }

        current = Some(match earlier {
            Some(idx) => idx,
            None => {
                out.push(file.into_sequence());
                out.len() - 1
            }
        });
    }

    for file in out.iter_mut().filter(|f| f.is_sequence()) {
        file.seq_sort();
        if mode == SeqMode::Range {
            file.collapse_range();
        }
        file.demote_single_frame();
    }

    tracing::debug!(input = input_len, output = out.len(), ?mode, "compressed listing");
    out
}
