use super::types::*;

impl Predicates {
    /// Test one entry by base name and kind.
    pub fn matches(&self, name: &str, is_directory: bool) -> bool {
        if let Some(file_type) = self.file_type {
            if (file_type == FileType::Directory) != is_directory {
                return false;
            }
        }
        self.name.as_ref().map_or(true, |n| n.matches(name))
    }

    /// Whether an entry `depth` levels below the start is within `-maxdepth`.
    pub fn within_depth(&self, depth: usize) -> bool {
        self.max_depth.map_or(true, |max| depth <= max)
    }
}
