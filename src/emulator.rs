//! Emulator
//!
//! Main entry point for an emulator session. Picks the filesystem backend,
//! owns the session and feeds lines through the interpreter.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::commands::ConfirmFn;
use crate::fs::{FileSystem, InMemoryFs, OsFs};
use crate::interpreter::{Interpreter, ProcessOutcome, Session, ShellError};

/// Options for creating an emulator.
#[derive(Default)]
pub struct EmulatorOptions {
    /// CSV record file for the in-memory backend. Unset means the host filesystem.
    pub vfs: Option<PathBuf>,
    /// Starting directory, resolved against the backend's home.
    pub cwd: Option<String>,
    /// Backend override; takes precedence over `vfs`.
    pub fs: Option<Arc<dyn FileSystem>>,
}

/// Load the record file if one was given. A load failure falls back to the
/// host filesystem and is reported as an informational line.
pub fn select_backend(vfs: Option<&Path>) -> (Arc<dyn FileSystem>, Option<String>) {
    let Some(path) = vfs else {
        log::info!("using the host filesystem");
        return (Arc::new(OsFs::new()), None);
    };

    match InMemoryFs::from_csv_path(path) {
        Ok(fs) => {
            log::info!("using in-memory filesystem from {}", path.display());
            (Arc::new(fs), None)
        }
        Err(e) => {
            log::warn!("cannot load {}: {}", path.display(), e);
            let notice = format!(
                "[info] cannot load {}: {}; using the host filesystem",
                path.display(),
                e
            );
            (Arc::new(OsFs::new()), Some(notice))
        }
    }
}

/// One interactive session.
pub struct Emulator {
    session: Session,
    interpreter: Interpreter,
    notices: Vec<String>,
    finished: bool,
}

impl Emulator {
    pub async fn new(options: EmulatorOptions) -> Self {
        let mut notices = Vec::new();
        let fs = match options.fs {
            Some(fs) => fs,
            None => {
                let (fs, notice) = select_backend(options.vfs.as_deref());
                notices.extend(notice);
                fs
            }
        };

        let session = match options.cwd {
            Some(cwd) => match starting_directory(fs.as_ref(), &cwd).await {
                Ok(path) => Session::with_cwd(fs, &path),
                Err(e) => {
                    notices.push(format!(
                        "[info] cannot start in {}; starting in {}",
                        e,
                        fs.home()
                    ));
                    Session::new(fs)
                }
            },
            None => Session::new(fs),
        };

        Self {
            session,
            interpreter: Interpreter::new(),
            notices,
            finished: false,
        }
    }

    pub fn with_confirm(mut self, confirm_fn: ConfirmFn) -> Self {
        self.interpreter = self.interpreter.with_confirm(confirm_fn);
        self
    }

    /// Process one line and apply whatever it changed.
    pub async fn exec(&mut self, line: &str) -> ProcessOutcome {
        let outcome = self.interpreter.process(line, &self.session).await;
        if let Some(update) = &outcome.update {
            if self.session.apply(update) {
                self.finished = true;
            }
        }
        outcome
    }

    pub fn cwd(&self) -> &str {
        self.session.cwd()
    }

    pub fn home(&self) -> &str {
        self.session.fs().home()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Set once a confirmed `exit` has been processed.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Informational lines produced during startup.
    pub fn notices(&self) -> &[String] {
        &self.notices
    }

    pub fn command_names(&self) -> Vec<&str> {
        self.interpreter.command_names()
    }
}

async fn starting_directory(fs: &dyn FileSystem, cwd: &str) -> Result<String, ShellError> {
    let path = fs.resolve_path(fs.home(), cwd);
    let stat = fs.stat(&path).await.map_err(|e| ShellError::from_fs(cwd, e))?;
    if stat.is_directory {
        Ok(path)
    } else {
        Err(ShellError::NotADirectory { path: cwd.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::VfsRecord;
    use std::io::Write;

    fn memory_fs() -> Arc<dyn FileSystem> {
        Arc::new(
            InMemoryFs::from_records(vec![
                VfsRecord::file("/docs/a.txt", "aGk="),
                VfsRecord::file("/top.txt", ""),
            ])
            .unwrap(),
        )
    }

    #[tokio::test]
    async fn test_missing_record_file_falls_back() {
        let emulator = Emulator::new(EmulatorOptions {
            vfs: Some(PathBuf::from("/definitely/not/here.csv")),
            ..Default::default()
        })
        .await;
        assert_eq!(emulator.notices().len(), 1);
        let notice = &emulator.notices()[0];
        assert!(notice.starts_with("[info] cannot load /definitely/not/here.csv: "));
        assert!(notice.ends_with("; using the host filesystem"));
        assert_eq!(emulator.cwd(), OsFs::new().home());
    }

    #[tokio::test]
    async fn test_bad_base64_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "path,type,data_b64").unwrap();
        writeln!(file, "/x.txt,file,***").unwrap();
        let (_, notice) = select_backend(Some(file.path()));
        assert!(notice.is_some());
    }

    #[tokio::test]
    async fn test_loads_record_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "path,type,data_b64,mode,mtime").unwrap();
        writeln!(file, "/a,dir,,,").unwrap();
        writeln!(file, "/a/b.txt,file,aGk=,0644,1700000000").unwrap();

        let mut emulator = Emulator::new(EmulatorOptions {
            vfs: Some(file.path().to_path_buf()),
            ..Default::default()
        })
        .await;
        assert!(emulator.notices().is_empty());
        assert_eq!(emulator.cwd(), "/");

        let outcome = emulator.exec("cat /a/b.txt").await;
        assert_eq!(outcome.output, vec!["hi"]);
    }

    #[tokio::test]
    async fn test_exec_applies_updates() {
        let mut emulator = Emulator::new(EmulatorOptions {
            fs: Some(memory_fs()),
            ..Default::default()
        })
        .await
        .with_confirm(Arc::new(|_: &str| true));

        emulator.exec("cd docs").await;
        assert_eq!(emulator.cwd(), "/docs");
        assert_eq!(emulator.exec("ls").await.output, vec!["a.txt"]);
        assert!(!emulator.is_finished());

        let outcome = emulator.exec("exit").await;
        assert!(outcome.exit_requested());
        assert!(emulator.is_finished());
    }

    #[tokio::test]
    async fn test_starting_directory() {
        let emulator = Emulator::new(EmulatorOptions {
            fs: Some(memory_fs()),
            cwd: Some("docs".into()),
            ..Default::default()
        })
        .await;
        assert_eq!(emulator.cwd(), "/docs");
        assert!(emulator.notices().is_empty());

        let emulator = Emulator::new(EmulatorOptions {
            fs: Some(memory_fs()),
            cwd: Some("top.txt".into()),
            ..Default::default()
        })
        .await;
        assert_eq!(emulator.cwd(), "/");
        assert_eq!(
            emulator.notices(),
            &["[info] cannot start in top.txt: Not a directory; starting in /".to_string()]
        );
    }
}
