//! Filename string helpers.
//!
//! Pure string operations on paths written with `/` or `\` separators. Nothing
//! here touches the filesystem, normalizes `.`/`..` segments, or treats a
//! trailing separator specially.

const SEPARATORS: [char; 2] = ['/', '\\'];

/// Extension including the leading dot, taken from the last `.` in the path.
/// Empty if there is no dot.
pub fn get_extension(path: &str) -> String {
    match path.rfind('.') {
        Some(i) => path[i..].to_string(),
        None => String::new(),
    }
}

/// Replace everything from the last `.` with `ext`, or append `ext` if there is no dot.
pub fn set_extension(path: &str, ext: &str) -> String {
    let mut out = strip_extension(path);
    out.push_str(ext);
    out
}

/// Drop everything from the last `.` onward.
pub fn strip_extension(path: &str) -> String {
    match path.rfind('.') {
        Some(i) => path[..i].to_string(),
        None => path.to_string(),
    }
}

/// Component after the last separator; the whole string if there is none.
pub fn base_name(path: &str) -> String {
    match path.rfind(&SEPARATORS[..]) {
        Some(i) => path[i + 1..].to_string(),
        None => path.to_string(),
    }
}

pub fn base_name_without_extension(path: &str) -> String {
    strip_extension(&base_name(path))
}

/// Everything before the last separator.
///
/// A bare filename has an empty parent, not `"."`.
pub fn parent_directory(path: &str) -> String {
    match path.rfind(&SEPARATORS[..]) {
        Some(i) => path[..i].to_string(),
        None => String::new(),
    }
}

/// Like [`parent_directory`], but a path without separators is returned whole.
pub fn path_prefix(path: &str) -> String {
    match path.rfind(&SEPARATORS[..]) {
        Some(i) => path[..i].to_string(),
        None => path.to_string(),
    }
}
