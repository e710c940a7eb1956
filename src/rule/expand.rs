//! Intermediate form of an expanded rule.
//!
//! Generic variable expansion produces [`Piece`]s whose text may still hold
//! [`Marker`]s for the real flags, defines and includes. Markers are resolved
//! last, so resolved text is never expanded a second time.

use crate::generator::LanguageFlags;

/// A payload resolved after generic expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    Flags,
    Defines,
    Includes,
}

impl Marker {
    /// The marker a `$(<LANG>_FLAGS)`-style make variable stands for.
    pub fn for_make_var(name: &str, language: &str) -> Option<Marker> {
        let suffix = name.strip_prefix(language)?.strip_prefix('_')?;
        match suffix {
            "FLAGS" => Some(Marker::Flags),
            "DEFINES" => Some(Marker::Defines),
            "INCLUDES" => Some(Marker::Includes),
            _ => None,
        }
    }

    fn resolve<'a>(&self, flags: &'a LanguageFlags) -> &'a str {
        match self {
            Marker::Flags => &flags.flags,
            Marker::Defines => &flags.defines,
            Marker::Includes => &flags.includes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Part {
    Text(String),
    Marker(Marker),
    /// A single space, emitted only between two non-empty parts.
    Gap,
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text(text.into())
    }
}

/// One word of the expanded command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Piece {
    /// The compiler executable, dropped when rendering flags.
    Executable(String),
    Parts(Vec<Part>),
}

/// Render the pieces of an expanded rule as a flags string.
///
/// Executable pieces are left out. Empty pieces are skipped and the rest
/// are joined with single spaces.
pub fn render(pieces: &[Piece], flags: &LanguageFlags) -> String {
    let mut out = String::new();

    for piece in pieces {
        let Piece::Parts(parts) = piece else {
            continue;
        };
        let word = render_parts(parts, flags);
        let word = word.trim();
        if word.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }

    out
}

fn render_parts(parts: &[Part], flags: &LanguageFlags) -> String {
    let mut out = String::new();
    let mut pending_gap = false;

    for part in parts {
        let text = match part {
            Part::Text(text) => text.as_str(),
            Part::Marker(marker) => marker.resolve(flags),
            Part::Gap => {
                pending_gap = true;
                continue;
            }
        };
        if text.is_empty() {
            continue;
        }
        if pending_gap && !out.is_empty() && !out.ends_with(' ') {
            out.push(' ');
        }
        pending_gap = false;
        out.push_str(text);
    }

    out
}
