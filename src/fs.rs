//! ファイルシステムの抽象化
//!
//! コアは実際の OS ファイルシステムかインメモリ実装かを区別しない。
//! CLI は [`OsFileSystem`] を、テストは [`MemoryFileSystem`] を使う。

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// 走査で見つかった 1 エントリ
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkEntry {
    /// 走査ルートを先頭に含むパス (WalkDir と同じ形)
    pub path: PathBuf,
    pub is_dir: bool,
}

impl WalkEntry {
    pub fn file_name(&self) -> Option<&str> {
        self.path.file_name().and_then(|n| n.to_str())
    }
}

/// エントリ単位の結果を返すイテレータ。個々の `Err` は呼び出し側がスキップしてよい
pub type WalkIter<'a> = Box<dyn Iterator<Item = io::Result<WalkEntry>> + 'a>;

pub trait FileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;

    fn exists(&self, path: &Path) -> bool;

    /// `root` 以下を再帰的に走査する。走査自体を開始できないときだけ `Err` を返す
    fn walk<'a>(&'a self, root: &Path) -> io::Result<WalkIter<'a>>;

    fn create_dir_all(&self, path: &Path) -> io::Result<()>;

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;
}

/// 実際の OS ファイルシステム
#[derive(Debug, Default, Clone, Copy)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }

    fn exists(&self, path: &Path) -> bool {
        path.exists()
    }

    fn walk<'a>(&'a self, root: &Path) -> io::Result<WalkIter<'a>> {
        // ルートが読めなければ走査そのものを失敗させる
        let metadata = fs::metadata(root)?;
        if !metadata.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                format!("'{}' is not a directory", root.display()),
            ));
        }
        fs::read_dir(root)?;

        let iter = WalkDir::new(root)
            .sort_by_file_name()
            .into_iter()
            .map(|entry| {
                entry
                    .map(|e| WalkEntry {
                        is_dir: e.file_type().is_dir(),
                        path: e.into_path(),
                    })
                    .map_err(io::Error::from)
            });
        Ok(Box::new(iter))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        fs::create_dir_all(path)
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents)
    }
}

#[derive(Debug, Clone)]
enum MemoryEntry {
    Dir,
    File(Vec<u8>),
}

#[derive(Debug, Clone)]
struct MemoryNode {
    entry: MemoryEntry,
    unreadable: bool,
}

/// テスト用のインメモリファイルシステム
///
/// パスは `BTreeMap` で保持するので、走査順はコンポーネント単位の辞書順になり
/// 親ディレクトリは常に子より先に現れる。
#[derive(Debug, Default)]
pub struct MemoryFileSystem {
    nodes: RefCell<BTreeMap<PathBuf, MemoryNode>>,
}

impl MemoryFileSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// 親ディレクトリを作りつつファイルを追加する (テストのセットアップ用)
    pub fn add_file(&self, path: impl AsRef<Path>, contents: impl AsRef<[u8]>) {
        let path = path.as_ref();
        if let Some(parent) = parent_dir(path) {
            self.insert_dirs(parent);
        }
        self.nodes.borrow_mut().insert(
            path.to_path_buf(),
            MemoryNode {
                entry: MemoryEntry::File(contents.as_ref().to_vec()),
                unreadable: false,
            },
        );
    }

    /// 既存エントリを読み取り不可にする。ディレクトリなら配下も走査されなくなる
    pub fn set_unreadable(&self, path: impl AsRef<Path>) {
        if let Some(node) = self.nodes.borrow_mut().get_mut(path.as_ref()) {
            node.unreadable = true;
        }
    }

    fn insert_dirs(&self, path: &Path) {
        let mut nodes = self.nodes.borrow_mut();
        for ancestor in path.ancestors() {
            if ancestor.as_os_str().is_empty() {
                continue;
            }
            nodes.entry(ancestor.to_path_buf()).or_insert(MemoryNode {
                entry: MemoryEntry::Dir,
                unreadable: false,
            });
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.as_os_str().is_empty()
            || matches!(
                self.nodes.borrow().get(path),
                Some(MemoryNode {
                    entry: MemoryEntry::Dir,
                    ..
                })
            )
    }
}

// `Path::parent` は "file.txt" に対して Some("") を返すので、空のパスは None として扱う
fn parent_dir(path: &Path) -> Option<&Path> {
    path.parent().filter(|p| !p.as_os_str().is_empty())
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::NotFound,
        format!("'{}' does not exist", path.display()),
    )
}

fn permission_denied(path: &Path) -> io::Error {
    io::Error::new(
        io::ErrorKind::PermissionDenied,
        format!("'{}' is not readable", path.display()),
    )
}

impl FileSystem for MemoryFileSystem {
    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        match self.nodes.borrow().get(path) {
            Some(node) if node.unreadable => Err(permission_denied(path)),
            Some(MemoryNode {
                entry: MemoryEntry::File(data),
                ..
            }) => Ok(data.clone()),
            Some(_) => Err(io::Error::new(
                io::ErrorKind::IsADirectory,
                format!("'{}' is a directory", path.display()),
            )),
            None => Err(not_found(path)),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        self.nodes.borrow().contains_key(path)
    }

    fn walk<'a>(&'a self, root: &Path) -> io::Result<WalkIter<'a>> {
        let nodes = self.nodes.borrow();
        match nodes.get(root) {
            None => return Err(not_found(root)),
            Some(node) if node.unreadable => return Err(permission_denied(root)),
            Some(MemoryNode {
                entry: MemoryEntry::File(_),
                ..
            }) => {
                return Err(io::Error::new(
                    io::ErrorKind::NotADirectory,
                    format!("'{}' is not a directory", root.display()),
                ));
            }
            Some(_) => {}
        }

        // 走査中に書き込まれても影響しないよう、結果はここで確定させる
        let mut results = Vec::new();
        let mut skipped: Vec<&Path> = Vec::new();
        for (path, node) in nodes.range(root.to_path_buf()..) {
            if !path.starts_with(root) {
                break;
            }
            if skipped.iter().any(|dir| path.starts_with(dir)) {
                continue;
            }
            if node.unreadable {
                results.push(Err(permission_denied(path)));
                skipped.push(path);
                continue;
            }
            results.push(Ok(WalkEntry {
                path: path.clone(),
                is_dir: matches!(node.entry, MemoryEntry::Dir),
            }));
        }
        Ok(Box::new(results.into_iter()))
    }

    fn create_dir_all(&self, path: &Path) -> io::Result<()> {
        for ancestor in path.ancestors() {
            if let Some(MemoryNode {
                entry: MemoryEntry::File(_),
                ..
            }) = self.nodes.borrow().get(ancestor)
            {
                return Err(io::Error::new(
                    io::ErrorKind::AlreadyExists,
                    format!("'{}' is a file", ancestor.display()),
                ));
            }
        }
        self.insert_dirs(path);
        Ok(())
    }

    fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        if let Some(parent) = parent_dir(path) {
            if !self.is_dir(parent) {
                return Err(not_found(parent));
            }
        }
        let mut nodes = self.nodes.borrow_mut();
        match nodes.get(path) {
            Some(node) if node.unreadable => return Err(permission_denied(path)),
            Some(MemoryNode {
                entry: MemoryEntry::Dir,
                ..
            }) => {
                return Err(io::Error::new(
                    io::ErrorKind::IsADirectory,
                    format!("'{}' is a directory", path.display()),
                ));
            }
            _ => {}
        }
        nodes.insert(
            path.to_path_buf(),
            MemoryNode {
                entry: MemoryEntry::File(contents.to_vec()),
                unreadable: false,
            },
        );
        Ok(())
    }
}
