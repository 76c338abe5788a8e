use globset::{Glob, GlobBuilder};
use std::borrow::Cow;
use thiserror::Error;

const GLOB_METACHARACTERS: &[char] = &['*', '?', '[', ']', '{', '}', '\\'];

/// Reasons a glob pattern is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PatternError {
    #[error("pattern is empty")]
    Empty,

    #[error("unbalanced '{delimiter}' at byte {position}")]
    Unbalanced { delimiter: char, position: usize },

    #[error("leading '/' cannot match a project-relative path; use '**/' or a '/dir/' fragment")]
    RootAnchored,

    #[error("{0}")]
    Syntax(String),
}

/// Validate a single exclusion pattern.
///
/// A pattern is valid when it is non-blank, every `[` character class and
/// `{` alternation is closed (and no `}` appears without an opener), it does
/// not start with `/` unless it is a path fragment (see [`glob_source`]), and
/// the glob compiler accepts it.
///
/// ```rust
/// use testrig_selectors::{PatternError, validate_pattern};
///
/// assert!(validate_pattern("**/node_modules/**").is_ok());
/// assert!(validate_pattern("src/**/*.{ts,tsx}").is_ok());
/// assert!(validate_pattern("/node_modules/").is_ok());
/// assert_eq!(validate_pattern(""), Err(PatternError::Empty));
/// assert_eq!(validate_pattern("/src/*.js"), Err(PatternError::RootAnchored));
/// assert!(matches!(
///     validate_pattern("src/{a,b"),
///     Err(PatternError::Unbalanced { delimiter: '{', .. })
/// ));
/// ```
pub fn validate_pattern(pattern: &str) -> Result<(), PatternError> {
    if pattern.trim().is_empty() {
        return Err(PatternError::Empty);
    }
    check_balanced(pattern)?;
    if pattern.starts_with('/') && !is_path_fragment(pattern) {
        return Err(PatternError::RootAnchored);
    }
    compile_glob(pattern).map(|_| ())
}

/// Glob text actually compiled for `pattern`.
///
/// A slash-bounded fragment without glob metacharacters, the form Jest's
/// ignore patterns use, matches that directory at any depth:
/// `/node_modules/` compiles as `**/node_modules/**`. Everything else is
/// used as written.
///
/// ```rust
/// use testrig_selectors::glob_source;
///
/// assert_eq!(glob_source("/lib/"), "**/lib/**");
/// assert_eq!(glob_source("/packages/core/"), "**/packages/core/**");
/// assert_eq!(glob_source("**/lib/**"), "**/lib/**");
/// ```
#[must_use]
pub fn glob_source(pattern: &str) -> Cow<'_, str> {
    if is_path_fragment(pattern) {
        Cow::Owned(format!("**{pattern}**"))
    } else {
        Cow::Borrowed(pattern)
    }
}

fn is_path_fragment(pattern: &str) -> bool {
    pattern.len() > 2
        && pattern.starts_with('/')
        && pattern.ends_with('/')
        && !pattern.contains("//")
        && !pattern.contains(GLOB_METACHARACTERS)
}

/// Compile a pattern with the matching semantics used everywhere in testrig:
/// `*` and `?` never cross a `/`, `**` spans directories.
pub fn compile_glob(pattern: &str) -> Result<Glob, PatternError> {
    GlobBuilder::new(&glob_source(pattern))
        .literal_separator(true)
        .build()
        .map_err(|e| PatternError::Syntax(e.kind().to_string()))
}

fn check_balanced(pattern: &str) -> Result<(), PatternError> {
    let mut chars = pattern.char_indices().peekable();
    let mut open_braces = Vec::new();

    while let Some((position, c)) = chars.next() {
        match c {
            '\\' => {
                chars.next();
            }
            '[' => {
                // A `]` directly after `[` or `[!` is a literal member of the class.
                if matches!(chars.peek(), Some((_, '!' | '^'))) {
                    chars.next();
                }
                if matches!(chars.peek(), Some((_, ']'))) {
                    chars.next();
                }
                if !chars.by_ref().any(|(_, c)| c == ']') {
                    return Err(PatternError::Unbalanced {
                        delimiter: '[',
                        position,
                    });
                }
            }
            '{' => open_braces.push(position),
            '}' => {
                if open_braces.pop().is_none() {
                    return Err(PatternError::Unbalanced {
                        delimiter: '}',
                        position,
                    });
                }
            }
            _ => {}
        }
    }

    match open_braces.pop() {
        Some(position) => Err(PatternError::Unbalanced {
            delimiter: '{',
            position,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_conventional_patterns() {
        for pattern in [
            "**/vendor/**",
            "**/dist/**",
            "*.snap",
            "src/[abc]*.ts",
            "src/[!_]*.ts",
            "src/[]]x",
            "**/*.{spec,test}.{js,ts}",
            "fixtures/\\{literal\\}",
        ] {
            assert_eq!(validate_pattern(pattern), Ok(()), "{pattern}");
        }
    }

    #[test]
    fn rejects_blank_patterns() {
        assert_eq!(validate_pattern(""), Err(PatternError::Empty));
        assert_eq!(validate_pattern("   "), Err(PatternError::Empty));
    }

    #[test]
    fn rejects_unclosed_class() {
        assert_eq!(
            validate_pattern("src/[abc"),
            Err(PatternError::Unbalanced {
                delimiter: '[',
                position: 4
            })
        );
    }

    #[test]
    fn rejects_unbalanced_braces() {
        assert_eq!(
            validate_pattern("**/*.{js,ts"),
            Err(PatternError::Unbalanced {
                delimiter: '{',
                position: 5
            })
        );
        assert_eq!(
            validate_pattern("lib}/**"),
            Err(PatternError::Unbalanced {
                delimiter: '}',
                position: 3
            })
        );
    }

    #[test]
    fn path_fragments_become_recursive_globs() {
        assert_eq!(glob_source("/node_modules/"), "**/node_modules/**");
        assert_eq!(glob_source("/a/b/"), "**/a/b/**");
        assert_eq!(glob_source("/"), "/");
        assert_eq!(glob_source("//"), "//");
        assert_eq!(glob_source("/x/*/"), "/x/*/");
        assert_eq!(validate_pattern("/node_modules/"), Ok(()));
    }

    #[test]
    fn rejects_root_anchored_globs() {
        for pattern in ["/src/*.js", "/dist", "/", "//", "/a//b/"] {
            assert_eq!(
                validate_pattern(pattern),
                Err(PatternError::RootAnchored),
                "{pattern}"
            );
        }
    }

    #[test]
    fn error_messages_are_readable() {
        let err = validate_pattern("a[").unwrap_err();
        assert_eq!(err.to_string(), "unbalanced '[' at byte 1");
    }
}
