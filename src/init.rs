//! `init` コマンドの対話プロンプト
//!
//! 不正な入力をデフォルト値に置き換えるのはこの層だけで、コア (resolver / tree) は
//! 列挙値以外を常にエラーとして扱う。

use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

use crate::config::{ComponentStyle, ConfigError, Language, Router, RoutingConfig, save_config};
use crate::fs::FileSystem;

#[derive(Debug, Error)]
pub enum InitError {
    #[error("could not interact with the terminal: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// 設定を対話的に作成して保存する。上書きを断られた場合は `None`
pub fn run<R: BufRead, W: Write>(
    fs: &dyn FileSystem,
    path: &Path,
    input: &mut R,
    output: &mut W,
) -> Result<Option<RoutingConfig>, InitError> {
    writeln!(output, "Initializing Next.js Routing Helper configuration...")?;

    if fs.exists(path) {
        writeln!(
            output,
            "Configuration file '{}' already exists.",
            path.display()
        )?;
        let answer = ask(input, output, "Overwrite? (y/N): ")?;
        if !is_yes(&answer) {
            writeln!(output, "Initialization cancelled.")?;
            return Ok(None);
        }
    }

    let router: Router = choose(
        input,
        output,
        "Use App Router or Pages Router? (app/pages): ",
        Router::App,
    )?;
    let language: Language = choose(
        input,
        output,
        "Use TypeScript or JavaScript? (ts/js): ",
        Language::TypeScript,
    )?;
    let component_style: ComponentStyle = choose(
        input,
        output,
        "Prefer 'function' declarations or 'const' arrow functions? (function/const): ",
        ComponentStyle::Function,
    )?;

    let src_answer = ask(input, output, "Place routes under a 'src/' folder? (y/N): ")?;
    let src_folder = match src_answer.to_ascii_lowercase().as_str() {
        "" | "n" | "no" => false,
        "y" | "yes" => true,
        _ => {
            writeln!(output, "Invalid choice. Defaulting to 'no'.")?;
            false
        }
    };

    let page_component_suffix = ask(
        input,
        output,
        "Suffix for page component names, e.g. 'Page' (leave empty for none): ",
    )?;

    let config = RoutingConfig {
        router,
        language,
        component_style,
        src_folder,
        page_component_suffix,
    };
    save_config(fs, path, &config)?;

    writeln!(output, "Configuration saved successfully to {}", path.display())?;
    writeln!(output, "  Router: {}", config.router)?;
    writeln!(output, "  Language: {}", config.language)?;
    writeln!(output, "  Component Style: {}", config.component_style)?;
    writeln!(output, "  Src Folder: {}", config.src_folder)?;
    writeln!(output, "  Page Component Suffix: {}", config.page_component_suffix)?;

    Ok(Some(config))
}

fn ask<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<String> {
    write!(output, "{question}")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim().to_string())
}

// 空欄はそのままデフォルト、不正な値はメッセージを出してデフォルト
fn choose<T, R, W>(input: &mut R, output: &mut W, question: &str, default: T) -> io::Result<T>
where
    T: FromStr + Display,
    R: BufRead,
    W: Write,
{
    let answer = ask(input, output, question)?;
    if answer.is_empty() {
        return Ok(default);
    }
    match answer.parse() {
        Ok(value) => Ok(value),
        Err(_) => {
            writeln!(output, "Invalid choice. Defaulting to '{default}'.")?;
            Ok(default)
        }
    }
}

fn is_yes(answer: &str) -> bool {
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
