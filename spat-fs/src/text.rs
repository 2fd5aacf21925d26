//! Whole-file text I/O as line sequences.
//!
//! `write_text`/`read_text` keep the sentinel contract (`false`, empty `Vec`);
//! `write_lines`/`read_lines` return the underlying error for callers that need
//! to tell a failed read from an empty file.

use std::path::Path;

use crate::vfs::{Filesystem, FsError};

/// Write each line followed by `\n`, replacing the file.
pub fn write_lines<F, S>(fs: &F, path: &str, lines: &[S]) -> Result<(), FsError>
where
    F: Filesystem + ?Sized,
    S: AsRef<str>,
{
    let mut buf = String::with_capacity(lines.iter().map(|l| l.as_ref().len() + 1).sum());
    for line in lines {
        buf.push_str(line.as_ref());
        buf.push('\n');
    }
    fs.write_file(Path::new(path), buf.as_bytes())
}

/// [`write_lines`], reporting only success.
pub fn write_text<F, S>(fs: &F, path: &str, lines: &[S]) -> bool
where
    F: Filesystem + ?Sized,
    S: AsRef<str>,
{
    write_lines(fs, path, lines).is_ok()
}

/// Read a file and split it on line feeds.
///
/// A zero-length file yields no lines. The read must return exactly as many
/// bytes as the backend reports for the file.
pub fn read_lines<F: Filesystem + ?Sized>(fs: &F, path: &str) -> Result<Vec<String>, FsError> {
    let path = Path::new(path);
    let expected = fs.file_size(path)?;
    if expected == 0 {
        return Ok(Vec::new());
    }

    let data = fs.read_file(path)?;
    let actual = data.len() as u64;
    if actual != expected {
        return Err(FsError::ShortRead { expected, actual });
    }

    Ok(split_lines(&String::from_utf8_lossy(&data)))
}

/// [`read_lines`], with every failure mapped to an empty result.
pub fn read_text<F: Filesystem + ?Sized>(fs: &F, path: &str) -> Vec<String> {
    read_lines(fs, path).unwrap_or_default()
}

// Only `\n` ends a line; `\r` stays in the text. A final `\n` does not open
// another (empty) line.
fn split_lines(text: &str) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }
    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vfs::{MemoryFilesystem, RealFilesystem, VsiFilesystem};
    use std::fs;
    use tempfile::tempdir;

    // --- split_lines ---

    #[test]
    fn test_split_lines_trailing_newline() {
        assert_eq!(split_lines("a\nb\n"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_lines_no_trailing_newline() {
        assert_eq!(split_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn test_split_lines_empty_lines_preserved() {
        assert_eq!(split_lines("a\n\nb\n\n"), vec!["a", "", "b", ""]);
        assert_eq!(split_lines("\n"), vec![""]);
    }

    #[test]
    fn test_split_lines_keeps_carriage_return() {
        assert_eq!(split_lines("a\r\nb\r\n"), vec!["a\r", "b\r"]);
    }

    // --- write_lines / write_text ---

    #[test]
    fn test_write_lines_format() {
        let fs = MemoryFilesystem::new();
        write_lines(&fs, "out.txt", &["x", "", "y"]).expect("write");
        assert_eq!(fs.get_file("out.txt"), Some(b"x\n\ny\n".to_vec()));
    }

    #[test]
    fn test_write_lines_empty_creates_empty_file() {
        let fs = MemoryFilesystem::new();
        let lines: [&str; 0] = [];
        write_lines(&fs, "out.txt", &lines).expect("write");
        assert_eq!(fs.get_file("out.txt"), Some(vec![]));
    }

    #[test]
    fn test_write_text_missing_dir() {
        let fs = MemoryFilesystem::new();
        assert!(!write_text(&fs, "/missing/out.txt", &["x"]));
    }

    #[test]
    fn test_write_text_replaces_content() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/d/out.txt", b"old\nold\nold\n".to_vec());

        assert!(write_text(&fs, "/d/out.txt", &["new"]));
        assert_eq!(read_text(&fs, "/d/out.txt"), vec!["new"]);
    }

    // --- read_lines / read_text ---

    #[test]
    fn test_roundtrip_preserves_lines() {
        let fs = MemoryFilesystem::new();
        let lines = vec![
            "EPSG:4326".to_string(),
            "band 1: elevation".to_string(),
            "ünïcödé".to_string(),
        ];

        assert!(write_text(&fs, "meta.txt", &lines));
        assert_eq!(read_text(&fs, "meta.txt"), lines);
    }

    #[test]
    fn test_read_text_empty_and_missing_are_indistinguishable() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/d/empty.txt", vec![]);

        let empty = read_text(&fs, "/d/empty.txt");
        let missing = read_text(&fs, "/d/missing.txt");

        assert!(empty.is_empty());
        assert!(missing.is_empty());
        assert_eq!(empty, missing);
    }

    #[test]
    fn test_read_lines_tells_empty_from_missing() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/d/empty.txt", vec![]);

        assert!(read_lines(&fs, "/d/empty.txt").expect("read").is_empty());
        assert!(matches!(read_lines(&fs, "/d/missing.txt"), Err(FsError::Io(_))));
    }

    #[test]
    fn test_read_short_read_is_empty() {
        let fs = MemoryFilesystem::new();
        fs.add_file("/d/a.txt", b"a\nb\n".to_vec());
        fs.set_reported_size("/d/a.txt", 100);

        assert!(read_text(&fs, "/d/a.txt").is_empty());
        assert!(matches!(
            read_lines(&fs, "/d/a.txt"),
            Err(FsError::ShortRead { expected: 100, actual: 4 })
        ));
    }

    #[test]
    fn test_read_invalid_utf8_is_lossy() {
        let fs = MemoryFilesystem::new();
        fs.add_file("a.txt", vec![b'o', b'k', b'\n', 0xff, b'\n']);

        let lines = read_text(&fs, "a.txt");
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "ok");
        assert_eq!(lines[1], "\u{fffd}");
    }

    #[test]
    fn test_text_on_virtual_memory_path() {
        let fs = VsiFilesystem::new(MemoryFilesystem::new());

        assert!(write_text(&fs, "/vsimem/tmp/a.txt", &["one", "two"]));
        assert_eq!(read_text(&fs, "/vsimem/tmp/a.txt"), vec!["one", "two"]);
    }

    #[test]
    fn test_real_fs_roundtrip() {
        let dir = tempdir().expect("create temp dir");
        let fs = RealFilesystem;
        let path = dir.path().join("lines.txt");
        let path = path.to_str().expect("utf8 temp path");

        let lines: Vec<String> = (0..50).map(|i| format!("line {}", i)).collect();
        assert!(write_text(&fs, path, &lines));
        assert_eq!(read_text(&fs, path), lines);
    }

    #[test]
    fn test_real_fs_no_final_newline() {
        let dir = tempdir().expect("create temp dir");
        let fs = RealFilesystem;
        let path = dir.path().join("partial.txt");
        fs::write(&path, "a\nb").expect("write");

        let lines = read_text(&fs, path.to_str().expect("utf8 temp path"));
        assert_eq!(lines, vec!["a", "b"]);
    }

    #[test]
    fn test_real_fs_empty_and_missing() {
        let dir = tempdir().expect("create temp dir");
        let fs = RealFilesystem;
        let empty = dir.path().join("empty.txt");
        fs::write(&empty, "").expect("write");
        let missing = dir.path().join("missing.txt");

        assert!(read_text(&fs, empty.to_str().expect("utf8")).is_empty());
        assert!(read_text(&fs, missing.to_str().expect("utf8")).is_empty());
    }
}
