// src/main.rs

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nextjs_routing_helper::config::{CONFIG_FILE_NAME, RoutingConfig, load_config};
use nextjs_routing_helper::display::render_tree;
use nextjs_routing_helper::fs::{FileSystem, OsFileSystem};
use nextjs_routing_helper::scaffold::create_page_file;
use nextjs_routing_helper::template::render_page;
use nextjs_routing_helper::{Router, RouteTreeBuilder, init, resolve_all};

/// CLI 引数定義
#[derive(Parser, Debug)]
#[command(
    name = "nextjs-routing-helper",
    version,
    about = "Next.js プロジェクトのページ作成とルート一覧表示を行う CLI ツール"
)]
struct Cli {
    /// 設定ファイルのパス
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        default_value = CONFIG_FILE_NAME,
        global = true
    )]
    config: PathBuf,

    /// デバッグログを出力する (RUST_LOG が優先)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// 対話形式で設定ファイルを作成する
    Init,

    /// ページを追加する。サブディレクトリを含められる (例: 'users/profile')
    Add {
        /// 追加するページ名 (複数指定可)
        #[arg(value_name = "PAGE", required = true)]
        names: Vec<String>,

        /// 'use client' ディレクティブを付ける (App Router のみ)
        #[arg(long)]
        use_client: bool,

        /// 既存のファイルを上書きする
        #[arg(short, long)]
        force: bool,
    },

    /// app / pages ディレクトリを走査してルートツリーを表示する
    View {
        /// 走査するディレクトリ (省略時は設定から決める)
        #[arg(short = 'd', long = "dir", value_name = "DIR")]
        dir: Option<PathBuf>,

        /// ツリーを JSON で出力する
        #[arg(long)]
        json: bool,

        /// 兄弟ノードをラベル順に並べる
        #[arg(long)]
        sort: bool,
    },
}

fn main() -> Result<()> {
    // 1) CLI 引数をパースし、ログを初期化
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let fs = OsFileSystem;

    // 2) サブコマンドを実行
    match cli.command {
        Commands::Init => run_init(&fs, &cli.config),
        Commands::Add {
            names,
            use_client,
            force,
        } => run_add(&fs, &cli.config, &names, use_client, force),
        Commands::View { dir, json, sort } => run_view(&fs, &cli.config, dir, json, sort),
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "nextjs_routing_helper=debug"
    } else {
        "nextjs_routing_helper=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false),
        )
        .init();
}

fn load(fs: &dyn FileSystem, config_path: &Path) -> Result<RoutingConfig> {
    load_config(fs, config_path).context("Please run 'nextjs-routing-helper init' first.")
}

fn run_init(fs: &dyn FileSystem, config_path: &Path) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut output = io::stdout().lock();

    init::run(fs, config_path, &mut input, &mut output)?;
    Ok(())
}

fn run_add(
    fs: &dyn FileSystem,
    config_path: &Path,
    names: &[String],
    use_client: bool,
    force: bool,
) -> Result<()> {
    let config = load(fs, config_path)?;

    if use_client && config.router == Router::Pages {
        tracing::warn!("--use-client only applies to the app router, ignoring it");
    }
    let use_client = use_client && config.router == Router::App;

    // 3) すべてのページ名を先に解決する。1 件でも不正なら何も書き込まない
    let pages = resolve_all(names, &config)?;

    // 4) ファイルを生成
    for page in &pages {
        let content = render_page(&page.component_name, config.component_style, use_client);
        create_page_file(fs, &page.target_path, &content, force).with_context(|| {
            format!("could not create page '{}'", page.target_path.display())
        })?;

        println!(
            "{} {} ({})",
            "✓ Created".green().bold(),
            page.target_path.display(),
            page.component_name.cyan()
        );
    }

    Ok(())
}

fn run_view(
    fs: &dyn FileSystem,
    config_path: &Path,
    dir: Option<PathBuf>,
    json: bool,
    sort: bool,
) -> Result<()> {
    let start_path = match dir {
        Some(dir) => dir,
        None => load(fs, config_path)?.base_directory(),
    };

    let tree = RouteTreeBuilder::new().sorted(sort).build(fs, &start_path)?;

    // 5) JSON かテキストツリーで標準出力へ
    if json {
        let json = serde_json::to_string_pretty(&tree)?;
        println!("{}", json);
    } else {
        print!("{}", render_tree(&tree, io::stdout().is_terminal()));
    }

    Ok(())
}
