// src/config.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

use crate::error::RoutingError;
use crate::fs::FileSystem;

/// 設定ファイル名 (プロジェクトルートに置かれる)
pub const CONFIG_FILE_NAME: &str = ".nextjs_routing_helper.json";

/// App Router (`app/**/page.ext`) か Pages Router (`pages/**/index.ext`) か
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Router {
    App,
    Pages,
}

/// 生成するファイルの言語 (拡張子を決める)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum Language {
    #[serde(rename = "ts")]
    TypeScript,
    #[serde(rename = "js")]
    JavaScript,
}

/// `function` 宣言か `const` アロー関数か。パス計算には関与せず、テンプレート生成にだけ渡す
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "String")]
pub enum ComponentStyle {
    #[default]
    Function,
    Const,
}

impl Router {
    pub fn as_str(self) -> &'static str {
        match self {
            Router::App => "app",
            Router::Pages => "pages",
        }
    }
}

impl Language {
    pub fn as_str(self) -> &'static str {
        match self {
            Language::TypeScript => "ts",
            Language::JavaScript => "js",
        }
    }
}

impl ComponentStyle {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentStyle::Function => "function",
            ComponentStyle::Const => "const",
        }
    }
}

// 文字列 → 列挙値。大文字小文字は区別しないが、列挙値以外は必ずエラーにする
impl FromStr for Router {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "app" => Ok(Router::App),
            "pages" => Ok(Router::Pages),
            _ => Err(RoutingError::Configuration {
                field: "router",
                value: s.to_string(),
                expected: "'app' or 'pages'",
            }),
        }
    }
}

impl FromStr for Language {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ts" => Ok(Language::TypeScript),
            "js" => Ok(Language::JavaScript),
            _ => Err(RoutingError::Configuration {
                field: "language",
                value: s.to_string(),
                expected: "'ts' or 'js'",
            }),
        }
    }
}

impl FromStr for ComponentStyle {
    type Err = RoutingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "function" => Ok(ComponentStyle::Function),
            "const" => Ok(ComponentStyle::Const),
            _ => Err(RoutingError::Configuration {
                field: "componentStyle",
                value: s.to_string(),
                expected: "'function' or 'const'",
            }),
        }
    }
}

macro_rules! impl_try_from_string {
    ($($ty:ty),*) => {$(
        impl TryFrom<String> for $ty {
            type Error = RoutingError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    )*};
}

impl_try_from_string!(Router, Language, ComponentStyle);

/// 設定ファイルの内容。ロード後は読み取り専用としてリゾルバとツリービルダに渡す
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingConfig {
    pub router: Router,
    pub language: Language,
    #[serde(default)]
    pub component_style: ComponentStyle,
    #[serde(default)]
    pub src_folder: bool,
    #[serde(default)]
    pub page_component_suffix: String,
}

impl RoutingConfig {
    pub fn new(router: Router, language: Language) -> Self {
        RoutingConfig {
            router,
            language,
            component_style: ComponentStyle::default(),
            src_folder: false,
            page_component_suffix: String::new(),
        }
    }

    /// ルーティングファイルを置くディレクトリ (`app`, `src/app`, `pages`, `src/pages`)
    pub fn base_directory(&self) -> PathBuf {
        let base = PathBuf::from(self.router.as_str());
        if self.src_folder {
            Path::new("src").join(base)
        } else {
            base
        }
    }

    /// `.tsx` / `.jsx` (先頭のドット込み)
    pub fn extension(&self) -> &'static str {
        match self.language {
            Language::TypeScript => ".tsx",
            Language::JavaScript => ".jsx",
        }
    }

    /// 各ディレクトリの末端ファイル名 (`page.tsx`, `index.jsx` など)
    pub fn leaf_file_name(&self) -> String {
        format!("{}{}", self.reserved_leaf(), self.extension())
    }

    /// 規約上の予約語 (App Router は `page`、Pages Router は `index`)
    pub fn reserved_leaf(&self) -> &'static str {
        match self.router {
            Router::App => "page",
            Router::Pages => "index",
        }
    }
}

/// 設定ファイルの読み書きに関するエラー
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file '{}': {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not serialize configuration: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error("could not write config file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// 設定ファイルを読み込んでパースする。列挙値以外の router / language はここで拒否される
pub fn load_config(fs: &dyn FileSystem, path: &Path) -> Result<RoutingConfig, ConfigError> {
    let data = fs.read(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let config: RoutingConfig =
        serde_json::from_slice(&data).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::debug!(
        router = %config.router,
        language = %config.language,
        src_folder = config.src_folder,
        "configuration loaded"
    );
    Ok(config)
}

/// 設定を整形済み JSON として書き出す
pub fn save_config(
    fs: &dyn FileSystem,
    path: &Path,
    config: &RoutingConfig,
) -> Result<(), ConfigError> {
    let data = serde_json::to_vec_pretty(config).map_err(ConfigError::Serialize)?;
    fs.write(path, &data).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fs::MemoryFileSystem;

    #[test]
    fn test_parse_full_config() {
        let json = r#"{
            "router": "pages",
            "language": "js",
            "componentStyle": "const",
            "srcFolder": true,
            "pageComponentSuffix": "page"
        }"#;
        let config: RoutingConfig = serde_json::from_str(json).unwrap();

        assert_eq!(config.router, Router::Pages);
        assert_eq!(config.language, Language::JavaScript);
        assert_eq!(config.component_style, ComponentStyle::Const);
        assert!(config.src_folder);
        assert_eq!(config.page_component_suffix, "page");
    }

    #[test]
    fn test_optional_fields_default() {
        let config: RoutingConfig =
            serde_json::from_str(r#"{"router": "app", "language": "ts"}"#).unwrap();

        assert_eq!(config, RoutingConfig::new(Router::App, Language::TypeScript));
    }

    #[test]
    fn test_enum_values_are_case_insensitive() {
        let config: RoutingConfig =
            serde_json::from_str(r#"{"router": "APP", "language": "Ts"}"#).unwrap();

        assert_eq!(config.router, Router::App);
        assert_eq!(config.language, Language::TypeScript);
    }

    #[test]
    fn test_invalid_router_is_rejected() {
        let err = serde_json::from_str::<RoutingConfig>(r#"{"router": "remix", "language": "ts"}"#)
            .unwrap_err();
        assert!(err.to_string().contains("invalid router value 'remix'"));
    }

    #[test]
    fn test_invalid_language_is_rejected() {
        let err = "coffee".parse::<Language>().unwrap_err();
        assert!(matches!(
            err,
            RoutingError::Configuration { field: "language", .. }
        ));
    }

    #[test]
    fn test_missing_router_is_rejected() {
        assert!(serde_json::from_str::<RoutingConfig>(r#"{"language": "ts"}"#).is_err());
    }

    #[test]
    fn test_serializes_lowercase_camel_case() {
        let mut config = RoutingConfig::new(Router::Pages, Language::JavaScript);
        config.page_component_suffix = "Screen".to_string();
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(value["router"], "pages");
        assert_eq!(value["language"], "js");
        assert_eq!(value["componentStyle"], "function");
        assert_eq!(value["srcFolder"], false);
        assert_eq!(value["pageComponentSuffix"], "Screen");
    }

    #[test]
    fn test_base_directory_and_leaf() {
        let mut config = RoutingConfig::new(Router::App, Language::TypeScript);
        assert_eq!(config.base_directory(), PathBuf::from("app"));
        assert_eq!(config.leaf_file_name(), "page.tsx");

        config.src_folder = true;
        config.router = Router::Pages;
        config.language = Language::JavaScript;
        assert_eq!(config.base_directory(), Path::new("src").join("pages"));
        assert_eq!(config.leaf_file_name(), "index.jsx");
    }

    #[test]
    fn test_save_then_load() {
        let fs = MemoryFileSystem::new();
        let path = Path::new(CONFIG_FILE_NAME);
        let mut config = RoutingConfig::new(Router::App, Language::TypeScript);
        config.component_style = ComponentStyle::Const;
        config.src_folder = true;

        save_config(&fs, path, &config).unwrap();
        assert!(fs.exists(path));
        assert_eq!(load_config(&fs, path).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let fs = MemoryFileSystem::new();
        let err = load_config(&fs, Path::new(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn test_load_invalid_json() {
        let fs = MemoryFileSystem::new();
        let path = Path::new(CONFIG_FILE_NAME);
        fs.write(path, b"{ not json").unwrap();

        let err = load_config(&fs, path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }
}
