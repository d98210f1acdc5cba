/// ページ名やサフィックスをコンポーネント名 (UpperCamelCase) に変換する
///
/// `-`、`_`、空白を単語の区切りとみなし、各単語の先頭を大文字・残りを小文字にして連結する。
///
/// ```
/// use nextjs_routing_helper::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("user-profile"), "UserProfile");
/// assert_eq!(to_pascal_case("user_profile"), "UserProfile");
/// assert_eq!(to_pascal_case("page"), "Page");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(|c: char| c == '-' || c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect()
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}
