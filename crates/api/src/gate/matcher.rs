//! Path patterns selecting which requests pass through the gate.
//!
//! Pattern syntax: literal segments, `:name` (exactly one segment),
//! `:name*` (zero or more trailing segments), `:name+` (one or more).

/// Patterns the gate runs on by default.
pub const DEFAULT_PATTERNS: &[&str] = &[
    "/",
    "/logout",
    "/api/:path*",
    "/admin/:path*",
    "/dashboard/:path*",
    "/tournaments/:path*",
    "/gatherings/:path*",
    "/rankings/:path*",
];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param,
    Rest { at_least_one: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Pattern {
    source: String,
    segments: Vec<Segment>,
}

impl Pattern {
    fn parse(source: &str) -> Result<Self, String> {
        if !source.starts_with('/') {
            return Err(format!("pattern '{source}' must start with '/'"));
        }

        let parts: Vec<&str> = split_path(source).collect();
        let mut segments = Vec::with_capacity(parts.len());
        for (i, part) in parts.iter().enumerate() {
            let segment = match part.strip_prefix(':') {
                Some(name) if name.ends_with('*') || name.ends_with('+') => {
                    if i + 1 != parts.len() {
                        return Err(format!("pattern '{source}': '{part}' must be the last segment"));
                    }
                    Segment::Rest { at_least_one: name.ends_with('+') }
                }
                Some("") => return Err(format!("pattern '{source}': empty parameter name")),
                Some(_) => Segment::Param,
                None => Segment::Literal((*part).to_string()),
            };
            segments.push(segment);
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    fn matches(&self, path: &str) -> bool {
        let mut parts = split_path(path);
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => match parts.next() {
                    Some(part) if part == lit => {}
                    _ => return false,
                },
                Segment::Param => {
                    if parts.next().is_none() {
                        return false;
                    }
                }
                Segment::Rest { at_least_one } => {
                    return !*at_least_one || parts.next().is_some();
                }
            }
        }
        parts.next().is_none()
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

/// First non-empty segment of `path`, read the same way patterns are matched.
pub fn first_segment(path: &str) -> Option<&str> {
    split_path(path).next()
}

/// Static list of route patterns, injected into the gate at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatcher {
    patterns: Vec<Pattern>,
}

impl RouteMatcher {
    pub fn new<I, S>(patterns: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| Pattern::parse(p.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { patterns })
    }

    /// Whether `path` (without query string) is covered by any pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.patterns.iter().any(|p| p.matches(path))
    }

    pub fn patterns(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.source.as_str())
    }
}

impl Default for RouteMatcher {
    fn default() -> Self {
        Self {
            patterns: DEFAULT_PATTERNS
                .iter()
                .filter_map(|p| Pattern::parse(p).ok())
                .collect(),
        }
    }
}
