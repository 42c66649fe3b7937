//! Frame lists and the compact range-string syntax.
//!
//! A range string is a comma-separated list of tokens, each either a single
//! frame (`"12"`) or an inclusive run (`"1-10"`, `"10-1"` for descending).
//! Zero padding is carried implicitly by the leading zeros of a token:
//! `"0001-0100"` has a pad of 4, `"1-100"` has none. Frames are
//! non-negative: `-` only ever separates the two ends of a run.

use std::fmt;

/// Upper bound on the number of frames a single [`Seq`] may hold.
///
/// Pathological ranges such as `"0-99999999999"` are truncated here rather
/// than allocated.
pub const SEQ_MAX: usize = 100_000;

/// Widest zero padding [`frame_to_string`] will produce.
pub const PAD_MAX: usize = 16;

/// An ordered list of frame numbers plus the zero-pad width used when the
/// frames are written into file names.
///
/// Frames keep the order in which they were added. They are only sorted
/// when [`Seq::sort`] runs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Seq {
    frames: Vec<i64>,
    pad: usize,
}

impl Seq {
    pub(crate) const fn new_const() -> Self {
        Self {
            frames: Vec::new(),
            pad: 0,
        }
    }

    /// Creates a sequence from an explicit frame list, truncated at [`SEQ_MAX`].
    pub fn new(mut frames: Vec<i64>, pad: usize) -> Self {
        frames.truncate(SEQ_MAX);
        Self { frames, pad }
    }

    /// Creates a sequence covering the inclusive range `start..=end`.
    ///
    /// See [`Seq::set`] for the direction rules.
    pub fn range(start: i64, end: i64, pad: usize) -> Self {
        let mut seq = Self {
            frames: Vec::new(),
            pad,
        };
        seq.set(start, end);
        seq
    }

    /// Replaces the frames with the inclusive range between `start` and `end`.
    ///
    /// The range ascends when `start < end` and descends otherwise. At most
    /// [`SEQ_MAX`] frames are produced.
    pub fn set(&mut self, start: i64, end: i64) {
        self.frames.clear();
        push_range(&mut self.frames, start, end);
    }

    /// The frames in their current order.
    pub fn frames(&self) -> &[i64] {
        &self.frames
    }

    /// Zero-pad width, `0` for unpadded frame numbers.
    pub fn pad(&self) -> usize {
        self.pad
    }

    pub fn set_pad(&mut self, pad: usize) {
        self.pad = pad;
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// First frame in list order.
    pub fn start(&self) -> Option<i64> {
        self.frames.first().copied()
    }

    /// Last frame in list order.
    pub fn end(&self) -> Option<i64> {
        self.frames.last().copied()
    }

    /// Sorts the frames numerically.
    pub fn sort(&mut self) {
        self.frames.sort_unstable();
    }

    /// Collapses the list to `[first, last]`, discarding interior gaps.
    pub(crate) fn collapse_to_range(&mut self) {
        if let (Some(start), Some(end)) = (self.start(), self.end()) {
            self.set(start, end);
        }
    }

    /// Appends `other`'s frames, respecting [`SEQ_MAX`].
    pub(crate) fn append(&mut self, other: &Seq) {
        let room = SEQ_MAX.saturating_sub(self.frames.len());
        self.frames.extend(other.frames.iter().take(room).copied());
    }

    /// Returns the pad the union of `self` and `other` would use, or `None`
    /// when their paddings cannot describe the same family of file names.
    ///
    /// Equal pads always agree. An unpadded side agrees with a padded one
    /// only when every one of its frames is exactly as wide as the pad, as
    /// with `1000` joining `0001 … 0999`. `10000` stays out, since a range
    /// like `0999-10000` would not split back into one number.
    pub(crate) fn merged_pad(&self, other: &Seq) -> Option<usize> {
        if self.pad == other.pad {
            return Some(self.pad);
        }
        if self.pad == 0 && self.frames.iter().all(|&f| frame_width(f) == other.pad) {
            return Some(other.pad);
        }
        if other.pad == 0 && other.frames.iter().all(|&f| frame_width(f) == self.pad) {
            return Some(self.pad);
        }
        None
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&seq_to_string(self))
    }
}

/// Number of decimal digits in `frame`, ignoring the sign.
fn frame_width(frame: i64) -> usize {
    frame
        .unsigned_abs()
        .checked_ilog10()
        .map_or(1, |digits| digits as usize + 1)
}

fn push_range(frames: &mut Vec<i64>, start: i64, end: i64) {
    let room = SEQ_MAX.saturating_sub(frames.len());
    let span = (i128::from(end) - i128::from(start)).unsigned_abs() + 1;
    let count = span.min(room as u128) as i64;
    if start < end {
        frames.extend((0..count).map(|i| start + i));
    } else {
        frames.extend((0..count).map(|i| start - i));
    }
}

/// Formats `frame` zero-padded to `pad` digits.
///
/// `pad` is clamped to [`PAD_MAX`]; a pad of `0` means no padding.
///
/// ```
/// use seqfm_core::frame_to_string;
///
/// assert_eq!(frame_to_string(7, 4), "0007");
/// assert_eq!(frame_to_string(7, 0), "7");
/// ```
pub fn frame_to_string(frame: i64, pad: usize) -> String {
    let pad = pad.min(PAD_MAX);
    if pad == 0 {
        frame.to_string()
    } else {
        format!("{frame:0pad$}")
    }
}

/// Parses one frame token, returning the frame and its padding.
///
/// The padding is the token length when the token has a leading zero and
/// more than one digit, `0` otherwise. Anything other than plain ASCII
/// digits yields `None`.
pub fn string_to_frame(token: &str) -> Option<(i64, usize)> {
    let token = token.trim();
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let frame = token.parse::<i64>().ok()?;
    let pad = if token.len() > 1 && token.starts_with('0') {
        token.len()
    } else {
        0
    };
    Some((frame, pad))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Ascend,
    Descend,
    Break,
}

impl Step {
    fn between(cur: i64, next: i64) -> Self {
        if cur.checked_add(1) == Some(next) {
            Step::Ascend
        } else if cur.checked_sub(1) == Some(next) {
            Step::Descend
        } else {
            Step::Break
        }
    }
}

fn run_token(start: i64, end: i64, pad: usize) -> String {
    if start == end {
        frame_to_string(start, pad)
    } else {
        format!(
            "{}-{}",
            frame_to_string(start, pad),
            frame_to_string(end, pad)
        )
    }
}

/// Run-length encodes a frame list into range-string syntax.
///
/// Only unit steps form runs, so `[1, 3, 5]` encodes as `"1,3,5"`. Every
/// frame is written with the sequence's pad. Negative frames are written
/// as-is for display, but [`string_to_seq`] does not read them back.
///
/// ```
/// use seqfm_core::{seq_to_string, Seq};
///
/// let seq = Seq::new(vec![1, 2, 3, 5, 6, 8], 0);
/// assert_eq!(seq_to_string(&seq), "1-3,5-6,8");
/// ```
pub fn seq_to_string(seq: &Seq) -> String {
    let frames = seq.frames();
    let Some(&first) = frames.first() else {
        return String::new();
    };

    let mut tokens = Vec::new();
    let mut start = first;
    let mut prev = first;
    let mut run = Step::Break;

    // `None` marks the end of the list and flushes the final run.
    let rest = frames[1..].iter().copied().map(Some).chain(std::iter::once(None));
    for next in rest {
        let step = next.map_or(Step::Break, |n| Step::between(prev, n));
        if step != Step::Break && (run == Step::Break || step == run) {
            run = step;
        } else {
            tokens.push(run_token(start, prev, seq.pad()));
            run = Step::Break;
            if let Some(n) = next {
                start = n;
            }
        }
        if let Some(n) = next {
            prev = n;
        }
    }

    tokens.join(",")
}

/// Parses a range string into an explicit frame list.
///
/// Tokens are expanded in the order they appear, not sorted. Malformed
/// tokens are skipped. The resulting pad is the largest padding seen on
/// any token's start frame.
///
/// ```
/// use seqfm_core::string_to_seq;
///
/// let seq = string_to_seq("1-3,5-6,8");
/// assert_eq!(seq.frames(), &[1, 2, 3, 5, 6, 8]);
/// assert_eq!(seq.pad(), 0);
/// ```
pub fn string_to_seq(text: &str) -> Seq {
    let mut seq = Seq::default();

    for token in text.split(',') {
        let bounds: Vec<&str> = token.split('-').collect();
        let parsed = match bounds.as_slice() {
            [single] => string_to_frame(single).map(|(frame, pad)| (frame, frame, pad)),
            [first, last] => string_to_frame(first).and_then(|(start, pad)| {
                string_to_frame(last).map(|(end, _)| (start, end, pad))
            }),
            _ => None,
        };

        let Some((start, end, pad)) = parsed else {
            if !token.trim().is_empty() {
                tracing::trace!(token, "skipping malformed range token");
            }
            continue;
        };

        push_range(&mut seq.frames, start, end);
        seq.pad = seq.pad.max(pad);
    }

    seq
}
