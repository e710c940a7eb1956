//! Parsed compile-rule templates.
//!
//! A rule such as
//!
//! ```text
//! <CMAKE_CXX_COMPILER> <DEFINES> <INCLUDES> <FLAGS> -o <OBJECT> -c <SOURCE>
//! ```
//!
//! is split on whitespace into tokens. Tokens that mark a fixed position of
//! the compiler invocation are recognised up front, so stripping them is a
//! matter of dropping tokens rather than searching the expanded text.

/// A fixed position of the compiler invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Positional {
    /// `<CMAKE_<LANG>_COMPILER>`
    Compiler(String),
    /// `-c`
    CompileOnly,
    /// `-o`
    OutputSwitch,
    /// Any word containing `<OBJECT>`
    Object,
    /// Any word containing `<SOURCE>`
    Source,
    /// Any word containing `<DEP_FILE>` or `<DEPFILE>`
    DepFile,
}

impl Positional {
    /// Positionals that describe one object file rather than the target.
    pub fn is_per_object(&self) -> bool {
        !matches!(self, Positional::Compiler(_))
    }

    /// Per-object paths, which may be the argument of the option before them.
    fn is_path(&self) -> bool {
        matches!(self, Positional::Object | Positional::Source | Positional::DepFile)
    }
}

/// Part of a template word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    /// `<NAME>`
    Var(String),
    /// `$(NAME)`
    MakeVar(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleToken {
    Word(Vec<Segment>),
    Positional(Positional),
}

/// A tokenized rule template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTemplate {
    tokens: Vec<RuleToken>,
}

impl RuleTemplate {
    pub fn parse(text: &str) -> Self {
        RuleTemplate {
            tokens: text.split_whitespace().map(parse_token).collect(),
        }
    }

    pub fn tokens(&self) -> &[RuleToken] {
        &self.tokens
    }

    /// Remove `-c`, `-o` and the object, source and depfile tokens.
    ///
    /// A plain option word directly in front of a per-object path (`-MT
    /// <OBJECT>`) is its argument's switch and goes with it. The compiler
    /// token is kept: flags bound to it are part of the result.
    pub fn strip_per_object(self) -> Self {
        let mut tokens: Vec<RuleToken> = Vec::with_capacity(self.tokens.len());
        // Whether the previous token of the rule is the last one kept.
        let mut previous_kept = false;

        for token in self.tokens {
            match &token {
                RuleToken::Positional(positional) if positional.is_per_object() => {
                    if positional.is_path()
                        && previous_kept
                        && tokens.last().is_some_and(is_option_word)
                    {
                        tokens.pop();
                    }
                    previous_kept = false;
                }
                _ => {
                    tokens.push(token);
                    previous_kept = true;
                }
            }
        }

        RuleTemplate { tokens }
    }
}

fn parse_token(word: &str) -> RuleToken {
    match word {
        "-c" => return RuleToken::Positional(Positional::CompileOnly),
        "-o" => return RuleToken::Positional(Positional::OutputSwitch),
        _ => {}
    }

    if word.contains("<OBJECT>") {
        return RuleToken::Positional(Positional::Object);
    }
    if word.contains("<SOURCE>") {
        return RuleToken::Positional(Positional::Source);
    }
    if word.contains("<DEP_FILE>") || word.contains("<DEPFILE>") {
        return RuleToken::Positional(Positional::DepFile);
    }

    if let Some(language) = word
        .strip_prefix("<CMAKE_")
        .and_then(|rest| rest.strip_suffix("_COMPILER>"))
        .filter(|language| is_variable_name(language))
    {
        return RuleToken::Positional(Positional::Compiler(language.to_string()));
    }

    RuleToken::Word(parse_segments(word))
}

/// A literal word that starts with `-`.
fn is_option_word(token: &RuleToken) -> bool {
    match token {
        RuleToken::Word(segments) => matches!(
            segments.as_slice(),
            [Segment::Text(text)] if text.starts_with('-')
        ),
        RuleToken::Positional(_) => false,
    }
}

fn parse_segments(word: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut text = String::new();
    let mut rest = word;

    while let Some(c) = rest.chars().next() {
        let variable = match c {
            '<' => closed_name(&rest[1..], '>').map(|name| (Segment::Var(name.to_string()), name.len() + 2)),
            '$' if rest[1..].starts_with('(') => closed_name(&rest[2..], ')')
                .map(|name| (Segment::MakeVar(name.to_string()), name.len() + 3)),
            _ => None,
        };

        match variable {
            Some((segment, consumed)) => {
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(segment);
                rest = &rest[consumed..];
            }
            None => {
                text.push(c);
                rest = &rest[c.len_utf8()..];
            }
        }
    }

    if !text.is_empty() {
        segments.push(Segment::Text(text));
    }
    segments
}

/// The variable name in front of `close`, if `input` starts with one.
fn closed_name(input: &str, close: char) -> Option<&str> {
    let end = input.find(close)?;
    let name = &input[..end];
    is_variable_name(name).then_some(name)
}

fn is_variable_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}
