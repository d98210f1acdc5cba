use crate::config::ComponentStyle;

/// ページコンポーネントのソースを生成する
///
/// `use_client` が真なら先頭に `'use client';` ディレクティブを付ける (App Router 用)。
pub fn render_page(component_name: &str, style: ComponentStyle, use_client: bool) -> String {
    let mut out = String::new();
    if use_client {
        out.push_str("'use client';\n\n");
    }

    let body = format!(
        "  return (\n    <div>\n      <h1>{component_name}</h1>\n      {{/* Add your content here */}}\n    </div>\n  );\n"
    );

    match style {
        ComponentStyle::Function => {
            out.push_str(&format!(
                "export default function {component_name}() {{\n{body}}}\n"
            ));
        }
        ComponentStyle::Const => {
            out.push_str(&format!(
                "const {component_name} = () => {{\n{body}}};\n\nexport default {component_name};\n"
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_style() {
        let source = render_page("AboutPage", ComponentStyle::Function, false);
        assert_eq!(
            source,
            "export default function AboutPage() {\n  return (\n    <div>\n      <h1>AboutPage</h1>\n      {/* Add your content here */}\n    </div>\n  );\n}\n"
        );
    }

    #[test]
    fn test_const_style() {
        let source = render_page("Login", ComponentStyle::Const, false);
        assert!(source.starts_with("const Login = () => {\n"));
        assert!(source.contains("  );\n};\n"));
        assert!(source.ends_with("export default Login;\n"));
    }

    #[test]
    fn test_use_client_directive() {
        let source = render_page("Counter", ComponentStyle::Function, true);
        assert!(source.starts_with("'use client';\n\nexport default function Counter()"));
        assert!(!render_page("Counter", ComponentStyle::Const, false).contains("use client"));
    }
}
