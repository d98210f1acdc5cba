// src/route.rs

/// 末端ファイルの予約語。ルート文字列ではこのセグメントを取り除く
const LEAF_SEGMENTS: [&str; 2] = ["page", "index"];

/// ファイルパスをルート文字列 (`/users/profile` のような形) に変換する
///
/// ファイルシステムには触れない純粋な文字列変換で、失敗しない。
///
/// 1) 最後のコンポーネントから拡張子を取り除く
/// 2) `\` を `/` に揃える
/// 3) `page` / `index` と完全一致するセグメントを取り除く
/// 4) 何も残らなければ `/`
///
/// ```
/// use nextjs_routing_helper::route::to_route;
///
/// assert_eq!(to_route("/dashboard/page.tsx"), "/dashboard");
/// assert_eq!(to_route("auth\\login\\index.jsx"), "/auth/login");
/// assert_eq!(to_route("/index.tsx"), "/");
/// ```
pub fn to_route(file_path: &str) -> String {
    let unified = file_path.replace('\\', "/");
    let without_ext = strip_extension(&unified);

    let segments: Vec<&str> = without_ext
        .split('/')
        .filter(|s| !s.is_empty() && !LEAF_SEGMENTS.contains(s))
        .collect();

    format!("/{}", segments.join("/"))
}

/// ルート文字列をセグメント列に分解する (`/` は空の列になる)
pub fn route_segments(route: &str) -> Vec<&str> {
    route.split('/').filter(|s| !s.is_empty()).collect()
}

// 最後のコンポーネントにドットがある場合だけ拡張子を落とす。
// `.env` のような先頭ドットのみの名前は拡張子なしとして扱う
fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(dot) if dot > 0 => &path[..name_start + dot],
        _ => path,
    }
}
