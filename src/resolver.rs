use path_absolutize::Absolutize;
use std::path::{Path, PathBuf};

use crate::config::RoutingConfig;
use crate::error::{BatchError, RoutingError};
use crate::model::ResolvedPage;
use crate::naming::to_pascal_case;

/// ページ名 (例: "users/profile") から作成するファイルのパスとコンポーネント名を決める
///
/// - `page_request`: `/` 区切りのページ名。末尾の `page` (App Router) / `index` (Pages Router) は省略可
/// - `config`: ロード済みの設定
///
/// 戻り値:
/// - Ok(ResolvedPage) → 例: App Router + "dashboard" なら `app/dashboard/page.tsx` と "DashboardPage"
/// - Err(InvalidInput) → 空文字、スラッシュのみ、先頭・末尾のスラッシュなど
pub fn resolve(page_request: &str, config: &RoutingConfig) -> Result<ResolvedPage, RoutingError> {
    // 1) `/` で分割
    if page_request.chars().all(|c| c == '/') {
        return Err(RoutingError::invalid_input(
            page_request,
            "page name cannot be empty or just slashes",
        ));
    }
    let mut segments: Vec<&str> = page_request.split('/').collect();
    if segments[0].is_empty() {
        return Err(RoutingError::invalid_input(
            page_request,
            "page name cannot start with a slash",
        ));
    }

    // 2) 規約上の予約語 (page / index) で終わっていれば取り除く
    let last_segment = segments[segments.len() - 1];
    if last_segment.eq_ignore_ascii_case(config.reserved_leaf()) {
        segments.pop();
    }

    // 3) 名前セグメントを決める。予約語だけの入力はルーター直下を指すので、予約語自体を名前に使う
    let name_segment = segments.last().copied().unwrap_or(last_segment);
    if name_segment.is_empty() {
        return Err(RoutingError::invalid_input(
            page_request,
            "page name cannot end with a slash",
        ));
    }
    if name_segment == "." || name_segment == ".." {
        return Err(RoutingError::invalid_input(
            page_request,
            "page name must end with a named segment",
        ));
    }

    // 4) コンポーネント名 (+ サフィックス)
    let mut component_name = to_pascal_case(name_segment);
    if component_name.is_empty() {
        return Err(RoutingError::invalid_input(
            page_request,
            "page name must contain at least one letter or digit",
        ));
    }
    if !config.page_component_suffix.is_empty() {
        component_name.push_str(&to_pascal_case(&config.page_component_suffix));
    }

    // 5)-8) ベースディレクトリ + ディレクトリ階層 + 末端ファイル名 (page.ext / index.ext)
    let mut path = config.base_directory();
    path.extend(&segments);
    path.push(config.leaf_file_name());

    // 9) 冗長な区切りや `.` / `..` を解決
    let target_path = normalize(&path).map_err(|_| {
        RoutingError::invalid_input(page_request, "page path could not be normalized")
    })?;

    tracing::debug!(
        request = page_request,
        target = %target_path.display(),
        component = %component_name,
        "page resolved"
    );

    Ok(ResolvedPage {
        target_path,
        component_name,
    })
}

/// 複数のページ名を順に解決する。最初に失敗した時点で打ち切り、部分的な成功は返さない
pub fn resolve_all<S: AsRef<str>>(
    requests: &[S],
    config: &RoutingConfig,
) -> Result<Vec<ResolvedPage>, BatchError> {
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            let request = request.as_ref();
            resolve(request, config).map_err(|source| BatchError {
                index,
                request: request.to_string(),
                source,
            })
        })
        .collect()
}

/// 仮想ルート `/` を基準に絶対化してから相対パスに戻す。
/// `..` がプロジェクトルートより上に出ることはない
fn normalize(path: &Path) -> std::io::Result<PathBuf> {
    let virtual_root = Path::new(std::path::MAIN_SEPARATOR_STR);
    let absolute = path.absolutize_from(virtual_root)?;
    Ok(absolute
        .strip_prefix(virtual_root)
        .map(Path::to_path_buf)
        .unwrap_or_else(|_| absolute.to_path_buf()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Language, Router};

    fn config(router: Router, language: Language, suffix: &str) -> RoutingConfig {
        let mut config = RoutingConfig::new(router, language);
        config.page_component_suffix = suffix.to_string();
        config
    }

    #[test]
    fn test_normalize_collapses_dots_and_separators() {
        assert_eq!(
            normalize(Path::new("app/./users//profile/page.tsx")).unwrap(),
            Path::new("app").join("users").join("profile").join("page.tsx")
        );
        assert_eq!(
            normalize(Path::new("app/users/../about/page.tsx")).unwrap(),
            Path::new("app").join("about").join("page.tsx")
        );
    }

    #[test]
    fn test_normalize_never_climbs_above_root() {
        assert_eq!(
            normalize(Path::new("app/../../../etc/page.tsx")).unwrap(),
            Path::new("etc").join("page.tsx")
        );
    }

    #[test]
    fn test_app_router_elides_page() {
        let cfg = config(Router::App, Language::TypeScript, "");
        let resolved = resolve("blog/Page", &cfg).unwrap();
        assert_eq!(
            resolved.target_path,
            Path::new("app").join("blog").join("page.tsx")
        );
        assert_eq!(resolved.component_name, "Blog");
    }

    #[test]
    fn test_pages_router_keeps_page_segment() {
        // Pages Router では "page" は予約語ではない
        let cfg = config(Router::Pages, Language::TypeScript, "");
        let resolved = resolve("blog/page", &cfg).unwrap();
        assert_eq!(
            resolved.target_path,
            Path::new("pages").join("blog").join("page").join("index.tsx")
        );
        assert_eq!(resolved.component_name, "Page");
    }

    #[test]
    fn test_reserved_word_only_targets_router_root() {
        let cfg = config(Router::Pages, Language::JavaScript, "page");
        let resolved = resolve("index", &cfg).unwrap();
        assert_eq!(resolved.target_path, Path::new("pages").join("index.jsx"));
        assert_eq!(resolved.component_name, "IndexPage");

        let cfg = config(Router::App, Language::TypeScript, "");
        let resolved = resolve("PAGE", &cfg).unwrap();
        assert_eq!(resolved.target_path, Path::new("app").join("page.tsx"));
    }

    #[test]
    fn test_invalid_inputs() {
        let cfg = config(Router::App, Language::TypeScript, "");
        for request in ["", "/", "///", "/about", "about/", "about/page/", "a/..", "-_-"] {
            let err = resolve(request, &cfg).unwrap_err();
            assert!(
                matches!(err, RoutingError::InvalidInput { .. }),
                "expected InvalidInput for {request:?}, got {err:?}"
            );
        }
    }

    #[test]
    fn test_error_names_the_request() {
        let cfg = config(Router::App, Language::TypeScript, "");
        let err = resolve("users/", &cfg).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid page name 'users/': page name cannot end with a slash"
        );
    }

    #[test]
    fn test_redundant_separators_in_the_middle() {
        let cfg = config(Router::App, Language::TypeScript, "");
        let resolved = resolve("users//profile", &cfg).unwrap();
        assert_eq!(
            resolved.target_path,
            Path::new("app").join("users").join("profile").join("page.tsx")
        );
    }

    #[test]
    fn test_resolve_all_ok() {
        let cfg = config(Router::App, Language::TypeScript, "page");
        let pages = resolve_all(&["home", "users/profile"], &cfg).unwrap();
        let names: Vec<_> = pages.iter().map(|p| p.component_name.as_str()).collect();
        assert_eq!(names, vec!["HomePage", "ProfilePage"]);
    }
}
