//! Decomposition of a path string into `{path, base, number, extension}`.
//!
//! `/shots/render.0001.exr` splits into `/shots/`, `render.`, `0001` and
//! `.exr`. The four pieces always concatenate back into the input.

use crate::fs::path::is_path_separator;

/// The four components of a file name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct FileNameParts {
    /// Directory portion including its trailing separator.
    pub path: String,
    /// Everything between the directory and the frame number.
    pub base: String,
    /// The frame number or range token, verbatim.
    pub number: String,
    /// The extension including its leading dot.
    pub extension: String,
}

impl FileNameParts {
    /// Concatenates the components back into a single string.
    #[must_use]
    pub fn join(&self) -> String {
        format!("{}{}{}{}", self.path, self.base, self.number, self.extension)
    }
}

fn is_separator_byte(b: u8) -> bool {
    is_path_separator(char::from(b))
}

/// Characters that may appear in a number token.
fn is_seq_byte(b: u8) -> bool {
    b.is_ascii_digit() || matches!(b, b'-' | b',' | b'#')
}

fn is_seq_delimiter(b: u8) -> bool {
    matches!(b, b'-' | b',')
}

/// Two neighbouring number words belong together unless one of them is
/// zero padded and their widths differ.
fn pad_match(a: &str, b: &str) -> bool {
    let padded = |w: &str| w.len() > 1 && w.starts_with('0');
    if padded(a) || padded(b) {
        a.len() == b.len()
    } else {
        true
    }
}

/// Splits `full` into its path, base, number and extension.
///
/// The number is the run of digits, `#`, `-` and `,` directly in front of
/// the extension. While scanning it backwards, each dash or comma separated
/// word is checked against the word after it: if either is zero padded the
/// two must be the same width, otherwise the scan stops and the rest stays
/// in the base. This keeps `shot01-0001` from reading as one range.
///
/// ```
/// use seqfm_core::fs::split::split;
///
/// let parts = split("/tmp/render.1-100.exr");
/// assert_eq!(parts.path, "/tmp/");
/// assert_eq!(parts.base, "render.");
/// assert_eq!(parts.number, "1-100");
/// assert_eq!(parts.extension, ".exr");
/// ```
#[must_use]
pub fn split(full: &str) -> FileNameParts {
    let mut parts = FileNameParts::default();
    let c = full.as_bytes();
    if c.is_empty() {
        return parts;
    }
    let last = c.len() as isize - 1;
    let at = |i: isize| c[i as usize];
    let slice = |from: isize, to_inclusive: isize| full[from as usize..=to_inclusive as usize].to_string();

    // Extension.
    let mut i = last;
    while i > 0 && at(i) != b'.' && !is_separator_byte(at(i)) {
        i -= 1;
    }
    if i > 0 && at(i) == b'.' {
        parts.extension = full[i as usize..].to_string();
        i -= 1;
    } else {
        i = last;
    }

    // Number.
    if i >= 0 && is_seq_byte(at(i)) {
        let end = i;
        let mut delimiter: isize = -1;
        let mut word = "";
        while i > 0 {
            let prev = at(i - 1);
            if !is_seq_byte(prev) || is_seq_delimiter(prev) {
                if delimiter != -1 && !pad_match(&full[i as usize..delimiter as usize], word) {
                    i = delimiter + 1;
                    break;
                }
                word = if delimiter == -1 {
                    &full[i as usize..=end as usize]
                } else {
                    &full[i as usize..delimiter as usize]
                };
                delimiter = i - 1;
            }
            if !is_seq_byte(prev) {
                break;
            }
            i -= 1;
        }
        parts.number = slice(i, end);
        i -= 1;
    }

    // Base.
    if i >= 0 && !is_separator_byte(at(i)) {
        let end = i;
        while i > 0 && !is_separator_byte(at(i - 1)) {
            i -= 1;
        }
        parts.base = slice(i, end);
        i -= 1;
    }

    // Path.
    if i >= 0 {
        parts.path = slice(0, i);
    }

    parts
}
