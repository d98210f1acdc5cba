// src/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// ルーティング規約エンジンが返すエラー
#[derive(Debug, Error)]
pub enum RoutingError {
    /// ページ名が不正 (空文字、スラッシュのみ、末尾スラッシュなど)
    #[error("invalid page name '{request}': {reason}")]
    InvalidInput {
        request: String,
        reason: &'static str,
    },

    /// router / language が列挙値以外。コア内部では決してデフォルト値に置き換えない
    #[error("invalid {field} value '{value}', expected {expected}")]
    Configuration {
        field: &'static str,
        value: String,
        expected: &'static str,
    },

    /// ディレクトリ走査を開始できなかった (ルートが存在しない・読めない)
    #[error("could not walk the directory '{}': {source}", .path.display())]
    Traversal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl RoutingError {
    pub(crate) fn invalid_input(request: &str, reason: &'static str) -> Self {
        RoutingError::InvalidInput {
            request: request.to_string(),
            reason,
        }
    }
}

/// 複数ページを一括で解決したときに、何番目のどの入力で失敗したかを保持する
#[derive(Debug, Error)]
#[error("page #{} ('{request}') could not be resolved: {source}", .index + 1)]
pub struct BatchError {
    /// 0 始まりのインデックス
    pub index: usize,
    pub request: String,
    #[source]
    pub source: RoutingError,
}
