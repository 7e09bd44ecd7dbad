//! Path Resolution
//!
//! Pure path joining and normalization shared by every backend. The only
//! backend-specific input is the home directory that `~` expands to: `/` for
//! the in-memory tree, the user's home for the host filesystem.

/// Resolves user-typed paths against a working directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    home: String,
}

impl PathResolver {
    /// Create a resolver whose `~` expands to `home` (normalized).
    pub fn new(home: &str) -> Self {
        Self { home: normalize(home) }
    }

    /// Resolver for a backend whose home concept is the filesystem root.
    pub fn rooted() -> Self {
        Self::new("/")
    }

    pub fn home(&self) -> &str {
        &self.home
    }

    /// Resolve `input` typed while in `cwd`.
    ///
    /// Never fails: the result is always an absolute normalized path, whether
    /// or not anything exists there.
    pub fn resolve(&self, cwd: &str, input: &str) -> String {
        if input.is_empty() || input == "~" {
            return self.home.clone();
        }

        // Any leading `~` is replaced textually: `~/x` is under home, `~x` is a
        // sibling name glued onto it.
        let expanded = match input.strip_prefix('~') {
            Some(rest) => format!("{}{}", self.home, rest),
            None => input.to_string(),
        };

        if expanded.starts_with('/') {
            normalize(&expanded)
        } else {
            normalize(&join(cwd, &expanded))
        }
    }
}

/// Normalize an absolute or relative path into an absolute one.
///
/// Empty and `.` segments are dropped; `..` pops the last kept segment and is
/// clamped at the root.
pub fn normalize(path: &str) -> String {
    let mut resolved: Vec<&str> = Vec::new();
    for part in path.split('/') {
        match part {
            "" | "." => {}
            ".." => {
                resolved.pop();
            }
            _ => resolved.push(part),
        }
    }
    if resolved.is_empty() {
        "/".to_string()
    } else {
        format!("/{}", resolved.join("/"))
    }
}

/// Join a child name under a directory without doubling the separator.
pub fn join(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{}{}", dir, name)
    } else {
        format!("{}/{}", dir, name)
    }
}

/// Last component of a normalized path; empty for the root.
pub fn base_name(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or("")
}

/// Parent of a normalized path; the root is its own parent.
pub fn parent(path: &str) -> String {
    match path.rfind('/') {
        Some(0) | None => "/".to_string(),
        Some(pos) => path[..pos].to_string(),
    }
}

/// Components of a normalized path, root excluded.
pub fn components(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|p| !p.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(""), "/");
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("/foo/bar/"), "/foo/bar");
        assert_eq!(normalize("foo//bar"), "/foo/bar");
        assert_eq!(normalize("/foo/./bar"), "/foo/bar");
        assert_eq!(normalize("/foo/../bar"), "/bar");
        assert_eq!(normalize("/../../.."), "/");
    }

    #[test]
    fn test_resolve_relative_and_absolute() {
        let r = PathResolver::rooted();
        assert_eq!(r.resolve("/a/b", "c"), "/a/b/c");
        assert_eq!(r.resolve("/a/b", "../c"), "/a/c");
        assert_eq!(r.resolve("/a/b", "/x/./y"), "/x/y");
        assert_eq!(r.resolve("/", ".."), "/");
        assert_eq!(r.resolve("/a", "../../../b"), "/b");
    }

    #[test]
    fn test_resolve_home() {
        let r = PathResolver::new("/home/user/");
        assert_eq!(r.resolve("/tmp", ""), "/home/user");
        assert_eq!(r.resolve("/tmp", "~"), "/home/user");
        assert_eq!(r.resolve("/tmp", "~/docs/../x"), "/home/user/x");
        assert_eq!(r.resolve("/tmp", "~bob"), "/home/userbob");
        assert_eq!(r.resolve("/tmp", "a/~"), "/tmp/a/~");

        let rooted = PathResolver::rooted();
        assert_eq!(rooted.resolve("/a", "~"), "/");
        assert_eq!(rooted.resolve("/a", "~/b"), "/b");
        assert_eq!(rooted.resolve("/a", "~b"), "/b");
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let r = PathResolver::new("/home/u");
        let cwds = ["/", "/a/b", "/home/u"];
        let inputs = ["", "~", "~/x/..", ".", "..", "../../..", "a/./b//c", "/x/../y", "~x/y"];
        for cwd in cwds {
            for input in inputs {
                let once = r.resolve(cwd, input);
                assert_eq!(r.resolve(cwd, &once), once, "cwd={} input={}", cwd, input);
            }
        }
    }

    #[test]
    fn test_helpers() {
        assert_eq!(base_name("/a/b.txt"), "b.txt");
        assert_eq!(base_name("/"), "");
        assert_eq!(parent("/a/b"), "/a");
        assert_eq!(parent("/a"), "/");
        assert_eq!(parent("/"), "/");
        assert_eq!(join("/", "a"), "/a");
        assert_eq!(join("/a", "b"), "/a/b");
        assert_eq!(components("/a/b").collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
