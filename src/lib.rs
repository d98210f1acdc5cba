//! Next.js のファイルベースルーティング (App Router / Pages Router) 用のヘルパー
//!
//! - [`resolver`]: ページ名 → 作成するファイルのパスとコンポーネント名
//! - [`tree`]: 既存のページファイル群 → ルートツリー
//! - [`route`]: ファイルパス → ルート文字列の正規化 (両方向で共有)

pub mod config;
pub mod display;
pub mod error;
pub mod fs;
pub mod init;
pub mod model;
pub mod naming;
pub mod resolver;
pub mod route;
pub mod scaffold;
pub mod template;
pub mod tree;

pub use config::{ComponentStyle, Language, Router, RoutingConfig};
pub use error::{BatchError, RoutingError};
pub use model::{ResolvedPage, RouteNode};
pub use resolver::{resolve, resolve_all};
pub use route::to_route;
pub use tree::{RouteTreeBuilder, build_route_tree};
