use colored::Colorize;

use crate::model::RouteNode;

/// ルートツリーをテキストに整形する (`view` コマンドの出力)
///
/// ```text
/// app  (app/page.tsx)
/// ├── dashboard  (app/dashboard/page.tsx)
/// │   └── settings  (app/dashboard/settings/page.tsx)
/// └── login  (app/login/page.tsx)
/// ```
pub fn render_tree(root: &RouteNode, colors: bool) -> String {
    let mut out = String::new();
    push_line(&mut out, "", root, colors);

    let count = root.children.len();
    for (i, child) in root.children.iter().enumerate() {
        render_node(&mut out, child, "", i + 1 == count, colors);
    }
    out
}

fn render_node(out: &mut String, node: &RouteNode, prefix: &str, is_last: bool, colors: bool) {
    let branch = if is_last { "└── " } else { "├── " };
    push_line(out, &format!("{prefix}{branch}"), node, colors);

    let child_prefix = format!("{prefix}{}", if is_last { "    " } else { "│   " });
    let count = node.children.len();
    for (i, child) in node.children.iter().enumerate() {
        render_node(out, child, &child_prefix, i + 1 == count, colors);
    }
}

fn push_line(out: &mut String, lead: &str, node: &RouteNode, colors: bool) {
    out.push_str(lead);
    if colors {
        out.push_str(&node.label.yellow().bold().to_string());
    } else {
        out.push_str(&node.label);
    }
    if !node.description.is_empty() {
        let desc = format!("  ({})", node.description);
        if colors {
            out.push_str(&desc.dimmed().to_string());
        } else {
            out.push_str(&desc);
        }
    }
    out.push('\n');
}
