//! Ant-style path matching.
//!
//! # Pattern Syntax
//!
//! - `?` matches exactly one character
//! - `*` matches zero or more characters within a path segment
//! - `**` matches zero or more path segments
//!
//! A pattern is anchored at both ends. Whether it starts with `/` matters:
//! `notices` and `/notices` are different patterns, and only the latter can
//! ever match a request path, since request paths always start with `/`.
//!
//! ```rust
//! use bank_security_core::http::security::ant_matcher::AntMatcher;
//!
//! let matcher = AntMatcher::new("/api/**");
//! assert!(matcher.matches("/api/accounts/42"));
//!
//! // No leading separator: never matches a real request path.
//! let matcher = AntMatcher::new("notices");
//! assert!(!matcher.matches("/notices"));
//! ```
//!
//! # Spring Equivalent
//!
//! `org.springframework.util.AntPathMatcher`

#[derive(Debug, Clone)]
pub struct AntMatcher {
    pattern: String,
    absolute: bool,
    segments: Vec<Segment>,
}

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    /// `*` or `?` inside a single segment
    Glob(String),
    /// `**`
    Any,
}

impl AntMatcher {
    pub fn new(pattern: &str) -> Self {
        let absolute = pattern.starts_with('/');
        let body = pattern.strip_prefix('/').unwrap_or(pattern);
        let segments = body
            .split('/')
            .map(|part| {
                if part == "**" {
                    Segment::Any
                } else if part.contains('*') || part.contains('?') {
                    Segment::Glob(part.to_string())
                } else {
                    Segment::Literal(part.to_string())
                }
            })
            .collect();

        AntMatcher {
            pattern: pattern.to_string(),
            absolute,
            segments,
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Whether the pattern starts with `/`.
    ///
    /// A relative pattern can never match an incoming request path.
    pub fn is_absolute(&self) -> bool {
        self.absolute
    }

    pub fn matches(&self, path: &str) -> bool {
        if path.starts_with('/') != self.absolute {
            return false;
        }
        let body = path.strip_prefix('/').unwrap_or(path);
        let parts: Vec<&str> = body.split('/').collect();
        self.match_from(0, &parts)
    }

    fn match_from(&self, seg_idx: usize, parts: &[&str]) -> bool {
        let Some(segment) = self.segments.get(seg_idx) else {
            return parts.is_empty();
        };

        match segment {
            Segment::Any => {
                (0..=parts.len()).any(|skip| self.match_from(seg_idx + 1, &parts[skip..]))
            }
            Segment::Literal(literal) => match parts.split_first() {
                Some((head, rest)) => literal == *head && self.match_from(seg_idx + 1, rest),
                None => false,
            },
            Segment::Glob(glob) => match parts.split_first() {
                Some((head, rest)) => {
                    self.glob_matches(glob, head) && self.match_from(seg_idx + 1, rest)
                }
                None => false,
            },
        }
    }

    fn glob_matches(&self, glob: &str, text: &str) -> bool {
        let glob: Vec<char> = glob.chars().collect();
        let text: Vec<char> = text.chars().collect();

        // Greedy scan with backtracking to the last `*`.
        let (mut g, mut t) = (0, 0);
        let mut star: Option<(usize, usize)> = None;
        while t < text.len() {
            if g < glob.len() && (glob[g] == '?' || glob[g] == text[t]) {
                g += 1;
                t += 1;
            } else if g < glob.len() && glob[g] == '*' {
                star = Some((g, t));
                g += 1;
            } else if let Some((sg, st)) = star {
                g = sg + 1;
                t = st + 1;
                star = Some((sg, st + 1));
            } else {
                return false;
            }
        }
        glob[g..].iter().all(|&c| c == '*')
    }
}
