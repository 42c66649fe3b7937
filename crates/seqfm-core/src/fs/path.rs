//! Path string helpers.
//!
//! File names are handled as strings throughout the crate because frame
//! numbers are substituted textually. These helpers normalise separators and
//! resolve relative or `~`-prefixed paths before names are split.

use std::path::{Component, Path, PathBuf};

/// The native path separator.
#[cfg(windows)]
pub const PATH_SEPARATOR: char = '\\';

/// The native path separator.
#[cfg(not(windows))]
pub const PATH_SEPARATOR: char = '/';

/// Returns `true` for either `/` or `\`.
///
/// Both are accepted on every platform so that names copied from another
/// system still split correctly.
pub fn is_path_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

/// Converts separators to [`PATH_SEPARATOR`] and guarantees exactly one
/// trailing separator. An empty input stays empty.
///
/// ```
/// use seqfm_core::fs::path::{path_fix, PATH_SEPARATOR};
///
/// let fixed = path_fix("shots//sh010");
/// assert!(fixed.ends_with(PATH_SEPARATOR));
/// ```
#[must_use]
pub fn path_fix(path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut out = String::with_capacity(path.len() + 1);
    let mut last_was_separator = false;
    for (i, c) in path.chars().enumerate() {
        if is_path_separator(c) {
            // A leading double separator is a UNC prefix on Windows.
            if last_was_separator && !(cfg!(windows) && i == 1) {
                continue;
            }
            out.push(PATH_SEPARATOR);
            last_was_separator = true;
        } else {
            out.push(c);
            last_was_separator = false;
        }
    }
    if !last_was_separator {
        out.push(PATH_SEPARATOR);
    }
    out
}

/// Resolves `path` against the current directory and removes `.` and `..`
/// components lexically. A trailing separator on the input is kept.
///
/// If the current directory cannot be determined the path is only
/// normalised.
#[must_use]
pub fn path_absolute(path: &str) -> String {
    let input = Path::new(path);
    let joined = if input.is_absolute() {
        input.to_path_buf()
    } else {
        match std::env::current_dir() {
            Ok(cwd) => cwd.join(input),
            Err(err) => {
                tracing::debug!(path, %err, "current directory unavailable");
                input.to_path_buf()
            }
        }
    };

    let mut out = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other.as_os_str()),
        }
    }

    let mut absolute = out.to_string_lossy().into_owned();
    if path.ends_with(is_path_separator) && !absolute.ends_with(is_path_separator) {
        absolute.push(PATH_SEPARATOR);
    }
    absolute
}

/// Expands a leading `~` to `$HOME` and substitutes `$VAR` / `${VAR}`
/// references from the environment. Unknown variables are left verbatim.
#[must_use]
pub fn path_expand(path: &str) -> String {
    let tilde_expanded = match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with(is_path_separator) => {
            match std::env::var("HOME") {
                Ok(home) => format!("{home}{rest}"),
                Err(_) => path.to_string(),
            }
        }
        _ => path.to_string(),
    };
    expand_variables(&tilde_expanded)
}

fn expand_variables(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        out.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        let (name, consumed, braced) = if let Some(inner) = after.strip_prefix('{') {
            match inner.find('}') {
                Some(close) => (&inner[..close], close + 2, true),
                None => ("", 0, true),
            }
        } else {
            let len = after
                .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            (&after[..len], len, false)
        };

        let valid = !name.is_empty() && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
        if !valid {
            out.push('$');
            rest = after;
            continue;
        }

        match std::env::var(name) {
            Ok(value) => out.push_str(&value),
            Err(_) if braced => {
                out.push_str("${");
                out.push_str(name);
                out.push('}');
            }
            Err(_) => {
                out.push('$');
                out.push_str(name);
            }
        }
        rest = &after[consumed..];
    }

    out.push_str(rest);
    out
}

/// Splits a path into its components. An absolute path keeps its leading
/// separator as the first element.
#[must_use]
pub fn path_split(path: &str) -> Vec<String> {
    let mut out = Vec::new();
    if path.starts_with(is_path_separator) {
        out.push(PATH_SEPARATOR.to_string());
    }
    out.extend(
        path.split(is_path_separator)
            .filter(|piece| !piece.is_empty())
            .map(str::to_string),
    );
    out
}
