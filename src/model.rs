// src/model.rs
use serde::Serialize;
use std::path::PathBuf;

/// ページ名を解決した結果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPage {
    /// 作成するファイルのパス (プロジェクトルートからの相対パス、正規化済み)
    pub target_path: PathBuf,

    /// 生成するコンポーネント名 (例: "UserProfilePage")
    pub component_name: String,
}

/// ルートツリーの 1 ノード
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteNode {
    /// ルートの 1 セグメント (例: "dashboard")。ルートノードは走査したディレクトリ名
    pub label: String,

    /// このノードを生成したファイルのパス。中間ノードなどファイルがない場合は空文字
    pub description: String,

    /// 子ノード (ラベルで重複排除済み)
    pub children: Vec<RouteNode>,
}

impl RouteNode {
    pub fn new(label: impl Into<String>, description: impl Into<String>) -> Self {
        RouteNode {
            label: label.into(),
            description: description.into(),
            children: Vec::new(),
        }
    }

    pub fn child(&self, label: &str) -> Option<&RouteNode> {
        self.children.iter().find(|c| c.label == label)
    }

    /// ラベルを順にたどって子孫ノードを探す
    pub fn find(&self, path: &[&str]) -> Option<&RouteNode> {
        path.iter().try_fold(self, |node, label| node.child(label))
    }

    /// 根から各ノードまでのルート文字列を深さ優先で列挙する (根自身は含まない)
    pub fn routes(&self) -> Vec<String> {
        let mut out = Vec::new();
        collect_routes(self, "", &mut out);
        out
    }

    pub fn depth(&self) -> usize {
        self.children.iter().map(|c| c.depth() + 1).max().unwrap_or(0)
    }

    /// 子を再帰的にラベル順に並べ替える
    pub fn sort(&mut self) {
        self.children.sort_by(|a, b| a.label.cmp(&b.label));
        for child in &mut self.children {
            child.sort();
        }
    }
}

fn collect_routes(node: &RouteNode, prefix: &str, out: &mut Vec<String>) {
    for child in &node.children {
        let route = format!("{}/{}", prefix, child.label);
        out.push(route.clone());
        collect_routes(child, &route, out);
    }
}
