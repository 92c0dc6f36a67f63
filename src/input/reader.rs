use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use super::stats::TextStats;

/// Upper bounds on how much of a file to read.
///
/// `None` means no limit for that dimension. Reading stops after the first
/// line that pushes ANY set counter strictly above its limit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReadLimits {
    pub characters: Option<usize>,
    pub words: Option<usize>,
    pub sentences: Option<usize>,
}

impl ReadLimits {
    /// Returns `true` if any set limit is strictly exceeded by `stats`.
    pub fn exceeded_by(&self, stats: &TextStats) -> bool {
        let over = |limit: Option<usize>, value: usize| limit.is_some_and(|l| value > l);

        over(self.characters, stats.characters)
            || over(self.words, stats.words)
            || over(self.sentences, stats.sentences)
    }
}

/// Text read from a file together with its statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextSnapshot {
    pub text: String,
    pub stats: TextStats,
    /// `true` if reading stopped before the end of the file.
    pub truncated: bool,
}

impl TextSnapshot {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

pub struct TextReader;

impl TextReader {
    /// Reads `path` line by line until the end of the file or until a limit
    /// is exceeded.
    ///
    /// The line that crosses a limit is kept, so the returned counts describe
    /// the text up to and including that line. `\n`, `\r\n` and a lone `\r`
    /// all end a line and are stored as `\n`.
    pub fn read(path: &Path, limits: &ReadLimits) -> Result<TextSnapshot> {
        let file =
            File::open(path).with_context(|| format!("Failed to open file: {}", path.display()))?;

        Self::read_from(BufReader::new(file), limits)
            .with_context(|| format!("Failed to read file: {}", path.display()))
    }

    pub fn read_from<R: BufRead>(mut reader: R, limits: &ReadLimits) -> Result<TextSnapshot> {
        let mut snapshot = TextSnapshot::default();
        let mut buf = Vec::new();

        while read_line(&mut reader, &mut buf)? {
            let line = std::str::from_utf8(&buf).context("stream did not contain valid UTF-8")?;

            snapshot.stats += TextStats::of(line);
            snapshot.text.push_str(line);

            if limits.exceeded_by(&snapshot.stats) {
                // Only truncated if something is left behind.
                snapshot.truncated = !reader.fill_buf()?.is_empty();
                tracing::debug!(stats = ?snapshot.stats, "read limit exceeded, stopping");
                break;
            }
        }

        Ok(snapshot)
    }
}

/// Reads one line into `buf` with its terminator rewritten to `\n`.
///
/// Returns `false` once the input is exhausted.
fn read_line<R: BufRead>(reader: &mut R, buf: &mut Vec<u8>) -> io::Result<bool> {
    buf.clear();

    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(!buf.is_empty());
        }

        let Some(end) = available.iter().position(|&b| b == b'\n' || b == b'\r') else {
            let len = available.len();
            buf.extend_from_slice(available);
            reader.consume(len);
            continue;
        };

        let ends_in_cr = available[end] == b'\r';
        buf.extend_from_slice(&available[..end]);
        buf.push(b'\n');
        reader.consume(end + 1);

        // The `\n` of a `\r\n` pair may sit in the next buffer fill.
        if ends_in_cr && reader.fill_buf()?.first() == Some(&b'\n') {
            reader.consume(1);
        }
        return Ok(true);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};
    use tempfile::NamedTempFile;

    fn read_str(content: &str, limits: &ReadLimits) -> TextSnapshot {
        TextReader::read_from(Cursor::new(content.as_bytes()), limits).unwrap()
    }

    #[test]
    fn test_read_whole_file_without_limits() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "Hello world! How are you?\n").unwrap();

        let snapshot = TextReader::read(temp_file.path(), &ReadLimits::default()).unwrap();

        assert_eq!(snapshot.text, "Hello world! How are you?\n");
        assert_eq!(snapshot.stats.characters, 26);
        assert_eq!(snapshot.stats.words, 5);
        assert_eq!(snapshot.stats.sentences, 2);
        assert!(!snapshot.truncated);
    }

    #[test]
    fn test_read_nonexistent_file() {
        let result = TextReader::read(
            Path::new("/nonexistent/path/to/file.txt"),
            &ReadLimits::default(),
        );

        assert!(result.unwrap_err().to_string().contains("Failed to open file"));
    }

    #[test]
    fn test_read_invalid_utf8_is_an_error() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(&[0x66, 0x6f, 0xff, 0xfe, b'\n']).unwrap();

        let result = TextReader::read(temp_file.path(), &ReadLimits::default());

        assert!(result.is_err());
    }

    #[test]
    fn test_read_empty_file() {
        let snapshot = read_str("", &ReadLimits::default());
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.stats, TextStats::default());
    }

    #[test]
    fn test_stops_after_line_exceeding_sentence_limit() {
        let limits = ReadLimits {
            sentences: Some(1),
            ..ReadLimits::default()
        };

        let snapshot = read_str("One.\nTwo.\nThree.\n", &limits);

        // The line that crossed the limit is included.
        assert_eq!(snapshot.text, "One.\nTwo.\n");
        assert_eq!(snapshot.stats.sentences, 2);
        assert!(snapshot.truncated);
    }

    #[test]
    fn test_limit_reached_but_not_exceeded_keeps_reading() {
        let limits = ReadLimits {
            words: Some(2),
            ..ReadLimits::default()
        };

        let snapshot = read_str("a b\nc\nd\n", &limits);

        assert_eq!(snapshot.text, "a b\nc\n");
        assert_eq!(snapshot.stats.words, 3);
    }

    #[test]
    fn test_any_single_limit_stops_reading() {
        let limits = ReadLimits {
            characters: Some(1000),
            words: Some(1000),
            sentences: Some(0),
        };

        let snapshot = read_str("no marks here\nfirst mark.\nmore text\n", &limits);

        assert_eq!(snapshot.text, "no marks here\nfirst mark.\n");
    }

    #[test]
    fn test_zero_limits_stop_after_first_non_empty_line() {
        let limits = ReadLimits {
            characters: Some(0),
            words: Some(0),
            sentences: Some(0),
        };

        let snapshot = read_str("first\nsecond\n", &limits);

        assert_eq!(snapshot.text, "first\n");
        assert_eq!(snapshot.stats.characters, 6);
        assert!(snapshot.truncated);
    }

    #[test]
    fn test_crlf_is_normalized() {
        let snapshot = read_str("one\r\ntwo\r\n", &ReadLimits::default());

        assert_eq!(snapshot.text, "one\ntwo\n");
        assert_eq!(snapshot.stats.characters, 8);
    }

    #[test]
    fn test_lone_cr_ends_a_line() {
        let limits = ReadLimits {
            sentences: Some(1),
            ..ReadLimits::default()
        };

        let snapshot = read_str("One.\rTwo.\rThree.\r", &limits);

        assert_eq!(snapshot.text, "One.\nTwo.\n");
        assert_eq!(snapshot.stats.characters, 10);
        assert!(snapshot.truncated);
    }

    #[test]
    fn test_mixed_terminators_are_normalized() {
        let snapshot = read_str("a\rb\r\nc\nd\r", &ReadLimits::default());

        assert_eq!(snapshot.text, "a\nb\nc\nd\n");
        assert_eq!(snapshot.stats.words, 4);
    }

    #[test]
    fn test_crlf_split_across_buffer_fills() {
        // A two-byte buffer puts the `\r` and `\n` of each pair in separate fills.
        let reader = BufReader::with_capacity(2, Cursor::new("x\r\ny\r\n".as_bytes()));

        let snapshot = TextReader::read_from(reader, &ReadLimits::default()).unwrap();

        assert_eq!(snapshot.text, "x\ny\n");
    }

    #[test]
    fn test_last_line_without_terminator() {
        let snapshot = read_str("alpha\nbeta", &ReadLimits::default());

        assert_eq!(snapshot.text, "alpha\nbeta");
        assert_eq!(snapshot.stats.words, 2);
    }

    #[test]
    fn test_limit_on_last_line_is_not_truncated() {
        let limits = ReadLimits {
            characters: Some(3),
            ..ReadLimits::default()
        };

        let snapshot = read_str("abcdef", &limits);

        assert_eq!(snapshot.text, "abcdef");
        assert!(!snapshot.truncated);
    }

    #[test]
    fn test_counts_match_recount_at_stopping_line() {
        let content = "It is 3.5 degrees.  Cold!\n\n  Really?  Yes...\nend\n";
        let limits = ReadLimits {
            sentences: Some(5),
            ..ReadLimits::default()
        };

        let snapshot = read_str(content, &limits);

        assert_eq!(snapshot.stats, TextStats::of(&snapshot.text));
    }
}
