// src/tree.rs
use std::collections::HashMap;
use std::path::Path;

use crate::error::RoutingError;
use crate::fs::{FileSystem, WalkEntry};
use crate::model::RouteNode;
use crate::route::{route_segments, to_route};

/// ルートとして扱うファイルの拡張子
pub const ROUTE_FILE_EXTENSIONS: [&str; 3] = [".tsx", ".jsx", ".js"];

/// ディレクトリを走査してルートツリーを組み立てる
///
/// ```
/// use nextjs_routing_helper::fs::MemoryFileSystem;
/// use nextjs_routing_helper::tree::RouteTreeBuilder;
/// use std::path::Path;
///
/// let fs = MemoryFileSystem::new();
/// fs.add_file("app/a/page.tsx", "");
/// fs.add_file("app/a/b/page.tsx", "");
///
/// let root = RouteTreeBuilder::new().build(&fs, Path::new("app")).unwrap();
/// assert_eq!(root.label, "app");
/// assert_eq!(root.routes(), vec!["/a", "/a/b"]);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteTreeBuilder {
    sorted: bool,
}

impl RouteTreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// 兄弟ノードをラベル順に並べる。既定では走査で見つかった順
    pub fn sorted(mut self, sorted: bool) -> Self {
        self.sorted = sorted;
        self
    }

    /// `root` 以下の `.tsx` / `.jsx` / `.js` ファイルからツリーを作る。
    /// ルートが読めない場合だけエラーで、個々のエントリの読み取りエラーは飛ばす
    pub fn build(&self, fs: &dyn FileSystem, root: &Path) -> Result<RouteNode, RoutingError> {
        let entries = fs.walk(root).map_err(|source| RoutingError::Traversal {
            path: root.to_path_buf(),
            source,
        })?;

        let mut arena = NodeArena::default();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    tracing::debug!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if entry.is_dir || !is_route_file(&entry) {
                continue;
            }

            let relative = entry.path.strip_prefix(root).unwrap_or(&entry.path);
            let route = to_route(&relative.to_string_lossy());
            let description = entry.path.to_string_lossy().replace('\\', "/");
            tracing::debug!(file = %description, route = %route, "route discovered");

            arena.insert(&route_segments(&route), &description);
        }

        let mut tree = arena.assemble(root_label(root));
        if self.sorted {
            tree.sort();
        }
        Ok(tree)
    }
}

/// `RouteTreeBuilder::new().build(fs, root)` の短縮形
pub fn build_route_tree(fs: &dyn FileSystem, root: &Path) -> Result<RouteNode, RoutingError> {
    RouteTreeBuilder::new().build(fs, root)
}

fn is_route_file(entry: &WalkEntry) -> bool {
    entry
        .file_name()
        .is_some_and(|name| ROUTE_FILE_EXTENSIONS.iter().any(|ext| name.ends_with(ext)))
}

fn root_label(root: &Path) -> String {
    root.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| root.display().to_string())
}

struct NodeSlot {
    label: String,
    description: String,
    children: Vec<usize>,
}

/// 走査中だけ使う作業領域。ノードはキー (`a/b/c` のような結合済みパス) で一意になる
#[derive(Default)]
struct NodeArena {
    slots: Vec<NodeSlot>,
    by_key: HashMap<String, usize>,
    top_level: Vec<usize>,
    root_description: Option<String>,
}

impl NodeArena {
    fn insert(&mut self, segments: &[&str], description: &str) {
        // ルーター直下のページ (route が "/") は根ノードの説明になる
        if segments.is_empty() {
            if self.root_description.is_none() {
                self.root_description = Some(description.to_string());
            }
            return;
        }

        let mut key = String::new();
        let mut parent: Option<usize> = None;
        for &segment in segments {
            if !key.is_empty() {
                key.push('/');
            }
            key.push_str(segment);

            // 最初に見つけたファイルだけが説明を決める
            let id = match self.by_key.get(&key) {
                Some(&id) => id,
                None => {
                    let id = self.slots.len();
                    self.slots.push(NodeSlot {
                        label: segment.to_string(),
                        description: description.to_string(),
                        children: Vec::new(),
                    });
                    self.by_key.insert(key.clone(), id);
                    id
                }
            };

            match parent {
                Some(parent_id) => {
                    let already_child = self.slots[parent_id]
                        .children
                        .iter()
                        .any(|&c| self.slots[c].label == segment);
                    if !already_child {
                        self.slots[parent_id].children.push(id);
                    }
                }
                None => {
                    if !self.top_level.contains(&id) {
                        self.top_level.push(id);
                    }
                }
            }
            parent = Some(id);
        }
    }

    fn assemble(&self, root_label: String) -> RouteNode {
        RouteNode {
            label: root_label,
            description: self.root_description.clone().unwrap_or_default(),
            children: self.top_level.iter().map(|&id| self.build_node(id)).collect(),
        }
    }

    fn build_node(&self, id: usize) -> RouteNode {
        let slot = &self.slots[id];
        RouteNode {
            label: slot.label.clone(),
            description: slot.description.clone(),
            children: slot.children.iter().map(|&c| self.build_node(c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    #[test]
    fn test_prefix_nodes_are_shared() {
        let fs = MemoryFileSystem::new();
        fs.add_file("app/a/page.tsx", "");
        fs.add_file("app/a/b/page.tsx", "");

        let root = build_route_tree(&fs, Path::new("app")).unwrap();
        assert_eq!(root.children.len(), 1);
        let a = &root.children[0];
        assert_eq!(a.label, "a");
        // 走査順では app/a/b が app/a/page.tsx より先に現れる
        assert_eq!(a.description, "app/a/b/page.tsx");
        assert_eq!(a.children.len(), 1);
        assert_eq!(a.children[0].label, "b");
    }

    #[test]
    fn test_intermediate_node_takes_first_file_description() {
        let fs = MemoryFileSystem::new();
        // intro/ が docs/page.tsx より先に走査されるので、そのパスが説明になり上書きされない
        fs.add_file("app/docs/intro/page.tsx", "");
        fs.add_file("app/docs/page.tsx", "");

        let root = build_route_tree(&fs, Path::new("app")).unwrap();
        let docs = root.child("docs").unwrap();
        assert_eq!(docs.description, "app/docs/intro/page.tsx");
    }

    #[test]
    fn test_root_page_sets_root_description() {
        let fs = MemoryFileSystem::new();
        fs.add_file("pages/index.tsx", "");
        fs.add_file("pages/about.tsx", "");

        let root = build_route_tree(&fs, Path::new("pages")).unwrap();
        assert_eq!(root.label, "pages");
        assert_eq!(root.description, "pages/index.tsx");
        assert_eq!(root.routes(), vec!["/about"]);
    }

    #[test]
    fn test_ignores_non_route_files() {
        let fs = MemoryFileSystem::new();
        fs.add_file("app/page.module.css", "");
        fs.add_file("app/readme.md", "");
        fs.add_file("app/blog/page.jsx", "");
        fs.add_file("app/api/route.js", "");

        let root = build_route_tree(&fs, Path::new("app")).unwrap();
        assert_eq!(root.routes(), vec!["/api", "/api/route", "/blog"]);
    }

    #[test]
    fn test_missing_root_is_traversal_error() {
        let fs = MemoryFileSystem::new();
        let err = build_route_tree(&fs, Path::new("app")).unwrap_err();
        assert!(matches!(err, RoutingError::Traversal { .. }));
    }

    #[test]
    fn test_sorted_option() {
        let fs = MemoryFileSystem::new();
        // index セグメントは取り除かれるので、走査順 (b → index/a) とラベル順が食い違う
        fs.add_file("pages/b.tsx", "");
        fs.add_file("pages/index/a.tsx", "");

        let unsorted = build_route_tree(&fs, Path::new("pages")).unwrap();
        assert_eq!(unsorted.routes(), vec!["/b", "/a"]);

        let sorted = RouteTreeBuilder::new()
            .sorted(true)
            .build(&fs, Path::new("pages"))
            .unwrap();
        assert_eq!(sorted.routes(), vec!["/a", "/b"]);
    }
}
