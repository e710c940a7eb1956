//! Shell-facing string conversions.
//!
//! Paths and arguments end up inside command strings that are run by a
//! shell (`cmake --build ...`) or handed to an IDE as a flags string, so
//! they are converted the same way the native generators write them.

use std::path::Path;

/// Convert a path to the form used on generated command lines.
///
/// On Unix, duplicate separators are collapsed and spaces are escaped with a
/// backslash. On Windows, separators become backslashes and paths containing
/// spaces are quoted.
pub fn convert_to_output_path(path: &str) -> String {
    if cfg!(windows) {
        windows_output_path(path)
    } else {
        unix_output_path(path)
    }
}

/// [`convert_to_output_path`] for a `Path`.
pub fn path_to_output(path: &Path) -> String {
    convert_to_output_path(&path.to_string_lossy())
}

fn unix_output_path(path: &str) -> String {
    let mut out = String::with_capacity(path.len());
    let mut prev_slash = false;

    for (i, c) in path.chars().enumerate() {
        if c == '/' {
            // A leading `//` is significant (network paths)
            if prev_slash && i > 1 {
                continue;
            }
            prev_slash = true;
        } else {
            prev_slash = false;
        }

        if c == ' ' && !out.ends_with('\\') {
            out.push('\\');
        }
        out.push(c);
    }

    out
}

fn windows_output_path(path: &str) -> String {
    let converted = path.replace('/', "\\");
    if converted.contains(' ') && !converted.starts_with('"') {
        format!("\"{}\"", converted)
    } else {
        converted
    }
}

/// Escape a single argument for a POSIX shell command line.
///
/// Arguments made only of characters that are never special are returned
/// unchanged; anything else is wrapped in double quotes with `"`, `\`, `$`
/// and `` ` `` escaped.
pub fn escape_for_shell(arg: &str) -> String {
    if !arg.is_empty() && arg.chars().all(is_plain_char) {
        return arg.to_string();
    }

    let mut out = String::with_capacity(arg.len() + 2);
    out.push('"');
    for c in arg.chars() {
        if matches!(c, '"' | '\\' | '$' | '`') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

fn is_plain_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '+' | '=' | '.' | '/' | ':' | ',' | '@' | '%')
}

/// Append `flag` to a space-separated flags string, skipping empty input.
pub fn append_flags(flags: &mut String, flag: &str) {
    let flag = flag.trim();
    if flag.is_empty() {
        return;
    }
    if !flags.is_empty() {
        flags.push(' ');
    }
    flags.push_str(flag);
}
