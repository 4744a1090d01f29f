//! Well-known directory names inside an allocation directory.

use std::path::Path;

/// Directories making up a task's slice of the allocation directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskDirEntry {
    /// The `alloc` directory shared by every task in the allocation
    SharedAlloc,
    /// The task's `local` directory
    Local,
    /// The task's `secrets` directory (private to the task)
    Secrets,
    /// The task's `private` directory (agent-only state)
    Private,
    /// The task's `tmp` directory
    Tmp,
}

impl TaskDirEntry {
    /// Get the string representation of the directory name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SharedAlloc => "alloc",
            Self::Local => "local",
            Self::Secrets => "secrets",
            Self::Private => "private",
            Self::Tmp => "tmp",
        }
    }
}

impl AsRef<Path> for TaskDirEntry {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for TaskDirEntry {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for TaskDirEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_as_str() {
        assert_eq!(TaskDirEntry::Secrets.to_string(), "secrets");
        assert_eq!(TaskDirEntry::SharedAlloc.to_string(), "alloc");
    }

    #[test]
    fn joins_as_path() {
        let path = Path::new("/alloc/web").join(TaskDirEntry::Secrets);
        assert_eq!(path, Path::new("/alloc/web/secrets"));
    }
}
