//! In-Memory File System Implementation
//!
//! A read-only tree built once from a record source. Every directory owns its
//! children outright; there are no parent links, so lookups walk down from
//! the root one component at a time.

use std::collections::BTreeMap;
use std::fs::File;
use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;

use super::path::{components, normalize, PathResolver};
use super::records::{decode_data, parse_mode, parse_mtime, read_records, LoadError, VfsRecord};
use super::types::*;

/// What a node holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Directory(BTreeMap<String, VfsNode>),
    File(Vec<u8>),
}

/// One entry of the in-memory tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VfsNode {
    /// Empty only for the root.
    pub name: String,
    pub kind: NodeKind,
    pub mode: Option<u32>,
    pub mtime: SystemTime,
}

impl VfsNode {
    pub fn directory(name: &str, mtime: SystemTime) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::Directory(BTreeMap::new()),
            mode: None,
            mtime,
        }
    }

    pub fn file(name: &str, content: Vec<u8>, mtime: SystemTime) -> Self {
        Self {
            name: name.to_string(),
            kind: NodeKind::File(content),
            mode: None,
            mtime,
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self.kind, NodeKind::Directory(_))
    }

    pub fn children(&self) -> Option<&BTreeMap<String, VfsNode>> {
        match &self.kind {
            NodeKind::Directory(children) => Some(children),
            NodeKind::File(_) => None,
        }
    }

    pub fn size(&self) -> u64 {
        match &self.kind {
            NodeKind::File(content) => content.len() as u64,
            NodeKind::Directory(_) => 0,
        }
    }

    /// Turn a file into an empty directory, dropping its content.
    fn make_directory(&mut self) {
        if let NodeKind::File(_) = self.kind {
            log::debug!("converting file '{}' into a directory", self.name);
            self.kind = NodeKind::Directory(BTreeMap::new());
        }
    }

    fn children_mut(&mut self) -> &mut BTreeMap<String, VfsNode> {
        self.make_directory();
        match &mut self.kind {
            NodeKind::Directory(children) => children,
            NodeKind::File(_) => unreachable!("make_directory converts files"),
        }
    }

    fn apply_metadata(&mut self, mode: Option<u32>, mtime: Option<SystemTime>) {
        if let Some(mode) = mode {
            self.mode = Some(mode);
        }
        if let Some(mtime) = mtime {
            self.mtime = mtime;
        }
    }
}

/// In-memory virtual file system.
#[derive(Debug, Clone)]
pub struct InMemoryFs {
    root: VfsNode,
    resolver: PathResolver,
}

impl InMemoryFs {
    /// Create a filesystem holding only the root directory.
    pub fn new() -> Self {
        Self {
            root: VfsNode::directory("", SystemTime::now()),
            resolver: PathResolver::rooted(),
        }
    }

    /// Build a tree by applying records in order; a later record for the
    /// same path replaces the earlier one.
    pub fn from_records<I>(records: I) -> Result<Self, LoadError>
    where
        I: IntoIterator<Item = VfsRecord>,
    {
        let mut fs = Self::new();
        let mut applied = 0usize;
        for record in records {
            if fs.apply_record(&record)? {
                applied += 1;
            }
        }
        log::info!("in-memory filesystem built from {} records", applied);
        Ok(fs)
    }

    /// Build a tree from CSV text with a header row.
    pub fn from_csv_reader<R: std::io::Read>(reader: R) -> Result<Self, LoadError> {
        Self::from_records(read_records(reader)?)
    }

    /// Build a tree from a CSV file on the host.
    pub fn from_csv_path(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let file = File::open(path.as_ref())?;
        log::debug!("loading records from {}", path.as_ref().display());
        Self::from_csv_reader(file)
    }

    pub fn root(&self) -> &VfsNode {
        &self.root
    }

    /// Find the node a path names.
    pub fn lookup(&self, path: &str) -> Option<&VfsNode> {
        let normalized = normalize(path);
        let mut node = &self.root;
        for part in components(&normalized) {
            node = node.children()?.get(part)?;
        }
        Some(node)
    }

    /// Apply one record. Returns whether the record changed the tree.
    fn apply_record(&mut self, record: &VfsRecord) -> Result<bool, LoadError> {
        if record.is_blank() {
            return Ok(false);
        }
        let path = normalize(record.path.trim());
        let kind = record.kind.trim().to_ascii_lowercase();

        let mode = match record.mode.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let parsed = parse_mode(raw);
                if parsed.is_none() {
                    log::warn!("ignoring malformed mode '{}' for '{}'", raw, path);
                }
                parsed
            }
        };
        let mtime = record.mtime.as_deref().and_then(parse_mtime);
        let now = SystemTime::now();
        let parts: Vec<&str> = components(&path).collect();

        match kind.as_str() {
            "dir" => {
                let node = ensure_directory_chain(&mut self.root, &parts, now);
                node.make_directory();
                node.apply_metadata(mode, mtime);
            }
            "file" => {
                let Some((name, ancestors)) = parts.split_last() else {
                    log::warn!("skipping file record for the root directory");
                    return Ok(false);
                };
                let content = decode_data(record.data_b64.as_deref(), &path)?;
                let parent = ensure_directory_chain(&mut self.root, ancestors, now);
                let children = parent.children_mut();
                match children.get_mut(*name) {
                    Some(existing) if !existing.is_directory() => {
                        existing.kind = NodeKind::File(content);
                        existing.apply_metadata(mode, mtime);
                    }
                    _ => {
                        let mut node = VfsNode::file(name, content, now);
                        node.apply_metadata(mode, mtime);
                        children.insert(name.to_string(), node);
                    }
                }
            }
            other => {
                log::warn!("skipping record for '{}': unknown type '{}'", path, other);
                return Ok(false);
            }
        }
        Ok(true)
    }
}

impl Default for InMemoryFs {
    fn default() -> Self {
        Self::new()
    }
}

/// Walk down `parts` from `root`, creating missing directories and converting
/// files in the way, and return the last node.
fn ensure_directory_chain<'a>(
    root: &'a mut VfsNode,
    parts: &[&str],
    now: SystemTime,
) -> &'a mut VfsNode {
    let mut node = root;
    for part in parts {
        node = node
            .children_mut()
            .entry(part.to_string())
            .or_insert_with(|| VfsNode::directory(part, now));
    }
    node
}

#[async_trait]
impl FileSystem for InMemoryFs {
    fn home(&self) -> &str {
        self.resolver.home()
    }

    fn resolve_path(&self, cwd: &str, path: &str) -> String {
        self.resolver.resolve(cwd, path)
    }

    async fn is_directory(&self, path: &str) -> bool {
        self.lookup(path).map_or(false, VfsNode::is_directory)
    }

    async fn list_directory(&self, path: &str) -> Result<Vec<String>, FsError> {
        match self.lookup(path).and_then(VfsNode::children) {
            Some(children) => Ok(children.keys().cloned().collect()),
            None => Err(FsError::not_found(path, "scandir")),
        }
    }

    async fn list_directory_with_kinds(&self, path: &str) -> Result<Vec<DirentEntry>, FsError> {
        match self.lookup(path).and_then(VfsNode::children) {
            Some(children) => Ok(children
                .values()
                .map(|child| DirentEntry {
                    name: child.name.clone(),
                    is_directory: child.is_directory(),
                })
                .collect()),
            None => Err(FsError::not_found(path, "scandir")),
        }
    }

    async fn stat(&self, path: &str) -> Result<FsStat, FsError> {
        match self.lookup(path) {
            Some(node) => Ok(FsStat {
                is_directory: node.is_directory(),
                mode: node.mode,
                size: node.size(),
                mtime: node.mtime,
                base_name: node.name.clone(),
            }),
            None => Err(FsError::not_found(path, "stat")),
        }
    }

    async fn exists(&self, path: &str) -> bool {
        self.lookup(path).is_some()
    }

    async fn read_file(&self, path: &str) -> Result<Vec<u8>, FsError> {
        match self.lookup(path).map(|node| &node.kind) {
            Some(NodeKind::File(content)) => Ok(content.clone()),
            Some(NodeKind::Directory(_)) => Err(FsError::is_directory(path, "read")),
            None => Err(FsError::not_found(path, "open")),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    fn build(records: Vec<VfsRecord>) -> InMemoryFs {
        InMemoryFs::from_records(records).unwrap()
    }

    #[test]
    fn test_new_has_only_root() {
        let fs = InMemoryFs::new();
        assert!(fs.root().is_directory());
        assert_eq!(fs.root().name, "");
        assert!(fs.root().children().unwrap().is_empty());
    }

    #[test]
    fn test_file_record_creates_missing_ancestors() {
        let fs = build(vec![
            VfsRecord::dir("/a"),
            VfsRecord::file("/a/b/c/d.txt", "aGk="),
        ]);
        let a = fs.lookup("/a").unwrap();
        assert_eq!(a.children().unwrap().len(), 1);
        assert!(fs.lookup("/a/b").unwrap().is_directory());
        assert!(fs.lookup("/a/b/c").unwrap().is_directory());
        assert_eq!(fs.lookup("/a/b").unwrap().children().unwrap().len(), 1);
        assert_eq!(fs.lookup("/a/b/c/d.txt").unwrap().kind, NodeKind::File(b"hi".to_vec()));
        assert_eq!(fs.root().children().unwrap().len(), 1);
    }

    #[test]
    fn test_dir_record_converts_file() {
        let fs = build(vec![
            VfsRecord::file("/x", "aGk="),
            VfsRecord::dir("/x"),
        ]);
        let x = fs.lookup("/x").unwrap();
        assert!(x.is_directory());
        assert_eq!(x.size(), 0);
        assert!(x.children().unwrap().is_empty());
    }

    #[test]
    fn test_file_under_file_converts_ancestor() {
        let fs = build(vec![
            VfsRecord::file("/x", "aGk="),
            VfsRecord::file("/x/y", ""),
        ]);
        assert!(fs.lookup("/x").unwrap().is_directory());
        assert!(!fs.lookup("/x/y").unwrap().is_directory());
    }

    #[test]
    fn test_last_write_wins() {
        let fs = build(vec![
            VfsRecord::dir("/d"),
            VfsRecord::file("/d/inner", ""),
            VfsRecord::file("/d", "aGk="),
        ]);
        let d = fs.lookup("/d").unwrap();
        assert_eq!(d.kind, NodeKind::File(b"hi".to_vec()));
        assert!(fs.lookup("/d/inner").is_none());

        let fs = build(vec![
            VfsRecord::file("/f", "aGk="),
            VfsRecord::file("/f", "Ynll"),
        ]);
        assert_eq!(fs.lookup("/f").unwrap().kind, NodeKind::File(b"bye".to_vec()));
    }

    #[test]
    fn test_repeated_dir_record_keeps_children() {
        let fs = build(vec![
            VfsRecord::file("/d/a", ""),
            VfsRecord::dir("/d").with_mode("0o700"),
        ]);
        let d = fs.lookup("/d").unwrap();
        assert_eq!(d.mode, Some(0o700));
        assert!(d.children().unwrap().contains_key("a"));
    }

    #[test]
    fn test_metadata() {
        let fs = build(vec![
            VfsRecord::file("/f", "").with_mode("0o600").with_mtime("60"),
            VfsRecord::file("/f", "aGk="),
            VfsRecord::file("/g", "").with_mode("garbage"),
        ]);
        let f = fs.lookup("/f").unwrap();
        assert_eq!(f.mode, Some(0o600));
        assert_eq!(f.mtime, UNIX_EPOCH + Duration::from_secs(60));
        assert_eq!(f.size(), 2);
        assert_eq!(fs.lookup("/g").unwrap().mode, None);
    }

    #[test]
    fn test_skips_blank_and_unknown_records() {
        let fs = build(vec![
            VfsRecord { path: "".into(), kind: "dir".into(), ..Default::default() },
            VfsRecord { path: "/x".into(), kind: " ".into(), ..Default::default() },
            VfsRecord { path: "/y".into(), kind: "symlink".into(), ..Default::default() },
            VfsRecord { path: "/".into(), kind: "file".into(), ..Default::default() },
        ]);
        assert!(fs.root().children().unwrap().is_empty());
        assert!(fs.root().is_directory());
    }

    #[test]
    fn test_relative_record_paths_land_under_root() {
        let fs = build(vec![VfsRecord::file("docs/./readme", "")]);
        assert!(fs.lookup("/docs/readme").is_some());
    }

    #[test]
    fn test_invalid_base64_fails_load() {
        let result = InMemoryFs::from_records(vec![VfsRecord::file("/f", "%%%")]);
        assert!(matches!(result, Err(LoadError::InvalidData { .. })));
    }

    #[test]
    fn test_from_csv_reader() {
        let csv = "path,type,data_b64,mode,mtime\n/a,dir,,,\n/a/b.txt,file,aGk=,,\n";
        let fs = InMemoryFs::from_csv_reader(csv.as_bytes()).unwrap();
        assert_eq!(fs.lookup("/a/b.txt").unwrap().size(), 2);
    }

    #[test]
    fn test_from_csv_path_missing_file() {
        let result = InMemoryFs::from_csv_path("/definitely/not/here.csv");
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[tokio::test]
    async fn test_trait_operations() {
        let fs = build(vec![
            VfsRecord::file("/a/b.txt", "aGk="),
            VfsRecord::file("/a/.hidden", ""),
            VfsRecord::dir("/a/sub"),
        ]);
        assert!(fs.is_directory("/a").await);
        assert!(!fs.is_directory("/a/b.txt").await);
        assert!(!fs.is_directory("/nope").await);
        assert!(fs.exists("/a/b.txt").await);
        assert!(!fs.exists("/a/c.txt").await);

        assert_eq!(fs.list_directory("/a").await.unwrap(), vec![".hidden", "b.txt", "sub"]);
        assert!(matches!(fs.list_directory("/a/b.txt").await, Err(FsError::NotFound { .. })));
        assert!(matches!(fs.list_directory("/zzz").await, Err(FsError::NotFound { .. })));

        let kinds = fs.list_directory_with_kinds("/a").await.unwrap();
        assert_eq!(kinds[2], DirentEntry { name: "sub".into(), is_directory: true });

        let stat = fs.stat("/a/b.txt").await.unwrap();
        assert!(stat.is_file());
        assert_eq!(stat.size, 2);
        assert_eq!(stat.base_name, "b.txt");
        assert_eq!(stat.mode, None);
        assert!(matches!(fs.stat("/zzz").await, Err(FsError::NotFound { .. })));

        assert_eq!(fs.read_file("/a/b.txt").await.unwrap(), b"hi");
        assert!(matches!(fs.read_file("/a").await, Err(FsError::IsDirectory { .. })));
        assert!(matches!(fs.read_file("/a/zzz").await, Err(FsError::NotFound { .. })));
    }

    #[test]
    fn test_home_is_root() {
        let fs = InMemoryFs::new();
        assert_eq!(fs.home(), "/");
        assert_eq!(fs.resolve_path("/a", "~/b"), "/b");
    }
}
