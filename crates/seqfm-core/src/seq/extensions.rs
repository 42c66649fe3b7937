//! The allow-list of extensions eligible for sequence grouping.

/// Extensions (with leading dot, compared case-insensitively) whose numbered
/// files may be merged into sequences.
///
/// Built once from configuration and handed to [`crate::File`] construction
/// and [`crate::read_directory`]. An empty list makes nothing eligible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeqExtensions {
    list: Vec<String>,
}

impl SeqExtensions {
    /// Builds the list, lowercasing entries and adding a missing leading dot.
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list: Vec<String> = Vec::new();
        for ext in extensions {
            let ext = ext.as_ref().trim();
            if ext.is_empty() || ext == "." {
                continue;
            }
            let normalized = if ext.starts_with('.') {
                ext.to_lowercase()
            } else {
                format!(".{}", ext.to_lowercase())
            };
            if !list.contains(&normalized) {
                list.push(normalized);
            }
        }
        Self { list }
    }

    /// Returns `true` if `extension` (e.g. `".EXR"`) is on the list.
    pub fn contains(&self, extension: &str) -> bool {
        !extension.is_empty() && self.list.iter().any(|e| e.eq_ignore_ascii_case(extension))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.list
    }

    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for SeqExtensions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}
