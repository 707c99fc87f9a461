use crate::error::Result;
use crate::partition::PartitionRange;
use std::fs::File;
use std::io::{BufRead, BufReader, Seek, SeekFrom};
use std::path::Path;

/// Yields the complete lines owned by one byte range of a file.
///
/// A line is owned by the range holding its first byte. Two rules follow:
/// a range that starts mid-line is aligned forward past the partial line
/// it opens in (that line belongs to the previous range), and the line
/// whose body straddles the range end is read to completion. Applied to
/// every range of a partition plan, each line in the file is yielded by
/// exactly one scanner, except lines starting past the last range's end.
pub struct RangeScanner {
    reader: BufReader<File>,
    /// Offset of the next unread byte
    cursor: u64,
    /// Offsets at or past this no longer start owned lines
    end: u64,
}

impl RangeScanner {
    /// Open a scanner over one partition range.
    pub fn open(path: impl AsRef<Path>, range: &PartitionRange) -> Result<Self> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);
        let mut cursor = range.start;
        if range.start > 0 {
            // Align to the next line start. Backing up one byte first
            // means a range that begins exactly on a line start consumes
            // only the previous line's newline and keeps the line itself.
            reader.seek(SeekFrom::Start(range.start - 1))?;
            cursor = range.start - 1;
            let mut fragment = Vec::new();
            cursor += reader.read_until(b'\n', &mut fragment)? as u64;
        }
        Ok(Self {
            reader,
            cursor,
            end: range.end,
        })
    }

    /// Open a scanner over the whole file, bypassing all boundary logic.
    pub fn whole_file(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let end = file.metadata()?.len();
        Ok(Self {
            reader: BufReader::new(file),
            cursor: 0,
            end,
        })
    }
}

impl Iterator for RangeScanner {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.cursor >= self.end {
            return None;
        }
        let mut buf = Vec::new();
        match self.reader.read_until(b'\n', &mut buf) {
            Ok(0) => None,
            Ok(read) => {
                self.cursor += read as u64;
                while buf.last().is_some_and(|&byte| byte == b'\n' || byte == b'\r') {
                    buf.pop();
                }
                Some(Ok(String::from_utf8_lossy(&buf).into_owned()))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RangeScanner;
    use crate::partition::PartitionRange;
    use pretty_assertions::assert_eq;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;

    fn write_file(content: &str) -> (tempfile::TempDir, PathBuf) {
        let temp = tempdir().unwrap();
        let path = temp.path().join("input.txt");
        fs::write(&path, content).unwrap();
        (temp, path)
    }

    fn collect(scanner: RangeScanner) -> Vec<String> {
        scanner.map(|line| line.unwrap()).collect()
    }

    fn range(start: u64, end: u64) -> PartitionRange {
        PartitionRange {
            start,
            end,
            worker_index: 0,
        }
    }

    #[test]
    fn whole_file_yields_every_line() {
        let (_temp, path) = write_file("alpha\nbravo\ncharlie\n");
        let lines = collect(RangeScanner::whole_file(&path).unwrap());
        assert_eq!(lines, vec!["alpha", "bravo", "charlie"]);
    }

    #[test]
    fn whole_file_keeps_unterminated_last_line() {
        let (_temp, path) = write_file("alpha\nbravo");
        let lines = collect(RangeScanner::whole_file(&path).unwrap());
        assert_eq!(lines, vec!["alpha", "bravo"]);
    }

    #[test]
    fn range_starting_mid_line_skips_the_fragment() {
        // "alpha\n" occupies bytes 0..6; a range starting at byte 2 is
        // inside it, so "alpha" belongs to the previous range.
        let (_temp, path) = write_file("alpha\nbravo\ncharlie\n");
        let lines = collect(RangeScanner::open(&path, &range(2, 20)).unwrap());
        assert_eq!(lines, vec!["bravo", "charlie"]);
    }

    #[test]
    fn range_starting_on_line_start_keeps_the_line() {
        // byte 6 is the first byte of "bravo".
        let (_temp, path) = write_file("alpha\nbravo\ncharlie\n");
        let lines = collect(RangeScanner::open(&path, &range(6, 20)).unwrap());
        assert_eq!(lines, vec!["bravo", "charlie"]);
    }

    #[test]
    fn straddling_line_is_read_to_completion() {
        // "bravo\n" starts at byte 6 and ends past the range end at 8.
        let (_temp, path) = write_file("alpha\nbravo\ncharlie\n");
        let lines = collect(RangeScanner::open(&path, &range(0, 8)).unwrap());
        assert_eq!(lines, vec!["alpha", "bravo"]);
    }

    #[test]
    fn line_starting_at_range_end_belongs_to_the_next_range() {
        // "bravo" starts exactly at byte 6 == end: not owned here.
        let (_temp, path) = write_file("alpha\nbravo\ncharlie\n");
        let lines = collect(RangeScanner::open(&path, &range(0, 6)).unwrap());
        assert_eq!(lines, vec!["alpha"]);

        let rest = collect(RangeScanner::open(&path, &range(6, 20)).unwrap());
        assert_eq!(rest, vec!["bravo", "charlie"]);
    }

    #[test]
    fn empty_range_yields_nothing() {
        let (_temp, path) = write_file("alpha\nbravo\n");
        assert!(collect(RangeScanner::open(&path, &range(3, 3)).unwrap()).is_empty());
    }

    #[test]
    fn empty_file_yields_nothing() {
        let (_temp, path) = write_file("");
        assert!(collect(RangeScanner::whole_file(&path).unwrap()).is_empty());
    }

    #[test]
    fn crlf_terminators_are_trimmed() {
        let (_temp, path) = write_file("alpha\r\nbravo\r\n");
        let lines = collect(RangeScanner::whole_file(&path).unwrap());
        assert_eq!(lines, vec!["alpha", "bravo"]);
    }
}
