use glob::Pattern;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,      // f
    Directory, // d
}

/// How a `-name` argument is compared against base names.
#[derive(Debug, Clone, PartialEq)]
pub enum NameMatcher {
    Glob(Pattern),
    /// Patterns the glob grammar rejects compare as plain text.
    Literal(String),
}

/// Compiled `-name` argument.
#[derive(Debug, Clone, PartialEq)]
pub struct NamePattern {
    pub raw: String,
    pub matcher: NameMatcher,
}

impl NamePattern {
    pub fn matches(&self, name: &str) -> bool {
        match &self.matcher {
            NameMatcher::Glob(pattern) => pattern.matches(name),
            NameMatcher::Literal(text) => text == name,
        }
    }
}

/// Every predicate `find` understands. Absent predicates match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Predicates {
    pub name: Option<NamePattern>,
    pub file_type: Option<FileType>,
    pub max_depth: Option<usize>,
}

/// Parsed command line: start paths plus predicates.
#[derive(Debug, Clone, PartialEq)]
pub struct FindInvocation {
    pub start_paths: Vec<String>,
    pub predicates: Predicates,
}
