//! Subcommand implementations. Each returns the lines to print.

use std::path::{Path, PathBuf};

use anyhow::Context;
use seqfm_core::{
    filter, frame_to_string, path_absolute, path_expand, read_directory, seq_compress,
    seq_to_string, sort, sort_directories_first, split, string_to_seq, Config, File, FileType,
    FilterMask, Seq, SortKey,
};

use crate::cli::ListArgs;

/// Loads the configuration from `explicit`, or from the default location
/// when it exists, or falls back to defaults.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    if let Some(path) = explicit {
        return Config::load(path).with_context(|| format!("loading {}", path.display()));
    }

    let default_path = default_config_path();
    if default_path.exists() {
        tracing::debug!(path = %default_path.display(), "using default config");
        return Config::load(&default_path)
            .with_context(|| format!("loading {}", default_path.display()));
    }
    Ok(Config::default())
}

/// Returns the path to the config file (~/.config/seqfm/config.toml).
fn default_config_path() -> PathBuf {
    std::env::var("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
        .join(".config")
        .join("seqfm")
        .join("config.toml")
}

/// Runs the listing pipeline over one directory.
pub fn list(config: &Config, args: &ListArgs) -> anyhow::Result<Vec<String>> {
    let dir = match &args.dir {
        Some(dir) => PathBuf::from(path_absolute(&path_expand(&dir.to_string_lossy()))),
        None => std::env::current_dir().context("resolving current directory")?,
    };

    let listing_config = &config.listing;
    let mode = args.seq.unwrap_or(config.sequence.mode);
    let key = args.sort.unwrap_or(listing_config.sort);
    let reverse = args.reverse || listing_config.reverse;
    let dirs_first = listing_config.dirs_first && !args.no_dirs_first;
    let mask = if args.all {
        FilterMask::NONE
    } else {
        listing_config.filter_mask()
    };
    let globs: Vec<&str> = if args.globs.is_empty() {
        listing_config.globs.iter().map(String::as_str).collect()
    } else {
        args.globs.iter().map(String::as_str).collect()
    };
    let glob_files_only = listing_config.glob_files_only && !args.glob_dirs;

    let extensions = config.sequence.seq_extensions();
    let raw = read_directory(&dir, &extensions)
        .with_context(|| format!("reading {}", dir.display()))?;

    let visible = filter(&raw, mask, &globs, glob_files_only);
    let compressed = seq_compress(sort(&visible, SortKey::Name, false), mode);
    let mut sorted = sort(&compressed, key, reverse);
    if dirs_first {
        sorted = sort_directories_first(&sorted);
    }

    tracing::info!(dir = %dir.display(), entries = sorted.len(), "listed directory");
    Ok(sorted.iter().map(format_row).collect())
}

/// One listing line: type, size, permissions, frame count and name.
pub fn format_row(file: &File) -> String {
    let frames = match file.file_type() {
        FileType::Seq => file.seq().len().to_string(),
        _ => String::new(),
    };
    format!(
        "{:<4} {:>12} {} {:>6} {}",
        file.file_type(),
        file.size(),
        file.permissions(),
        frames,
        file.name()
    )
}

/// Expands a range string, or a file name carrying one, into one line per frame.
pub fn expand(text: &str) -> Vec<String> {
    let parts = split(text);
    let seq = string_to_seq(&parts.number);

    seq.frames()
        .iter()
        .map(|&frame| {
            format!(
                "{}{}{}{}",
                parts.path,
                parts.base,
                frame_to_string(frame, seq.pad()),
                parts.extension
            )
        })
        .collect()
}

/// Encodes explicit frames as a range string.
pub fn compact(frames: &[i64], pad: usize) -> String {
    seq_to_string(&Seq::new(frames.to_vec(), pad))
}

/// Describes how `name` splits.
pub fn describe_split(name: &str) -> Vec<String> {
    let parts = split(name);
    vec![
        format!("path:      {}", parts.path),
        format!("base:      {}", parts.base),
        format!("number:    {}", parts.number),
        format!("extension: {}", parts.extension),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn populate(tmp: &TempDir) {
        for i in [1, 2, 3, 5] {
            fs::write(tmp.path().join(format!("beauty.{i:04}.exr")), "px").unwrap();
        }
        fs::write(tmp.path().join("notes.txt"), "").unwrap();
        fs::write(tmp.path().join(".hidden.0001.exr"), "").unwrap();
        fs::create_dir(tmp.path().join("comp")).unwrap();
    }

    fn list_args(tmp: &TempDir) -> ListArgs {
        ListArgs {
            dir: Some(tmp.path().to_path_buf()),
            ..ListArgs::default()
        }
    }

    fn last_column(lines: &[String]) -> Vec<String> {
        lines
            .iter()
            .map(|l| l.rsplit(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn list_groups_sequences() {
        let tmp = TempDir::new().unwrap();
        populate(&tmp);

        let lines = list(&Config::default(), &list_args(&tmp)).unwrap();
        assert_eq!(
            last_column(&lines),
            vec!["comp", "beauty.0001-0003,0005.exr", "notes.txt"]
        );
        assert!(lines[1].starts_with("seq"));
        assert!(lines[1].contains(" 4 "));
    }

    #[test]
    fn list_range_mode_and_hidden() {
        let tmp = TempDir::new().unwrap();
        populate(&tmp);

        let args = ListArgs {
            seq: Some(seqfm_core::SeqMode::Range),
            all: true,
            ..list_args(&tmp)
        };
        let lines = list(&Config::default(), &args).unwrap();
        assert_eq!(
            last_column(&lines),
            vec!["comp", ".hidden.0001.exr", "beauty.0001-0005.exr", "notes.txt"]
        );
    }

    #[test]
    fn list_with_globs() {
        let tmp = TempDir::new().unwrap();
        populate(&tmp);

        let args = ListArgs {
            globs: vec!["*.txt".to_string()],
            glob_dirs: true,
            ..list_args(&tmp)
        };
        let lines = list(&Config::default(), &args).unwrap();
        assert_eq!(last_column(&lines), vec!["notes.txt"]);
    }

    #[test]
    fn list_missing_directory_fails() {
        let tmp = TempDir::new().unwrap();
        let args = ListArgs {
            dir: Some(tmp.path().join("absent")),
            ..ListArgs::default()
        };
        assert!(list(&Config::default(), &args).is_err());
    }

    #[test]
    fn expand_plain_range() {
        assert_eq!(expand("1-3,7"), vec!["1", "2", "3", "7"]);
    }

    #[test]
    fn expand_file_name() {
        assert_eq!(
            expand("/shots/render.0009-0011.exr"),
            vec![
                "/shots/render.0009.exr",
                "/shots/render.0010.exr",
                "/shots/render.0011.exr"
            ]
        );
    }

    #[test]
    fn compact_frames() {
        assert_eq!(compact(&[1, 2, 3, 5, 6, 8], 0), "1-3,5-6,8");
        assert_eq!(compact(&[9, 10], 3), "009-010");
    }

    #[test]
    fn describe_split_lines() {
        let lines = describe_split("/tmp/render.1-100.exr");
        assert_eq!(lines[0], "path:      /tmp/");
        assert_eq!(lines[2], "number:    1-100");
    }

    #[test]
    fn load_explicit_config() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[listing]\nreverse = true\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert!(config.listing.reverse);
    }

    #[test]
    fn load_missing_explicit_config_fails() {
        let tmp = TempDir::new().unwrap();
        assert!(load_config(Some(&tmp.path().join("missing.toml"))).is_err());
    }
}
