use clap::Parser;
use code_review::{cli, config, display, error, export, logging, source};
use code_review::{FileStore, ReviewClient};
use code_review_common::{
    prefs, render, Comparison, ComparisonKind, HistoryStore, QuickFix, ReviewRequest,
    ALREADY_FORMATTED,
};
use cli::{Cli, Commands, HistoryAction};
use config::Config;
use dialoguer::Confirm;
use error::{CodeReviewError, Result};
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e.user_message());
        std::process::exit(1);
    }
}

fn open_store(config: &Config) -> Result<FileStore> {
    Ok(FileStore::in_dir(&config.data_dir()?, config.storage_quota_bytes))
}

fn spinner(message: String) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message);
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Review { input, language, model, layout, html, no_history } => {
            let source = source::read_source(&input)?;
            let language = source.resolve_language(language.as_deref(), &config.default_language);

            let mut store = open_store(&config)?;
            let model = model
                .or_else(|| prefs::load_model(&store).map(|m| m.id.to_string()))
                .unwrap_or_else(|| config.default_model.clone());
            let layout = layout.or_else(|| prefs::load_layout(&store)).unwrap_or_default();
            prefs::save_model(&mut store, &model);
            prefs::save_layout(&mut store, layout);

            println!("🔍 code-review - {} / {}\n", language.to_uppercase(), model);

            let client = ReviewClient::new(&config.endpoint, Duration::from_secs(config.timeout_seconds))?;
            let request = ReviewRequest::new(source.code.clone(), language.clone(), model.clone());

            let progress = spinner(format!("{} でレビュー中...", model));
            let outcome = client.review(&request).await;
            progress.finish_and_clear();
            let result = outcome?;

            if let Some(improved) = result.improved_code(&source.code) {
                let comparison = Comparison::new(source.code.as_str(), improved, ComparisonKind::TigerStyle);
                display::print_comparison(&comparison, layout);
            }

            let document = render(&result);
            display::print_document(&document);

            if let Some(path) = html {
                std::fs::write(&path, document.wrapped_html())?;
                println!("✔ HTML出力: {}", path.display());
            }

            if !no_history {
                let mut history = HistoryStore::new(store);
                let entry = history.save_review(&source.code, &language, &model, &result);
                println!("✔ 履歴に保存: #{}", entry.id);
            }
        }

        Commands::Format { input, language, layout, write } => {
            let source = source::read_source(&input)?;
            let language = source.resolve_language(language.as_deref(), &config.default_language);

            let mut store = open_store(&config)?;
            let layout = layout.or_else(|| prefs::load_layout(&store)).unwrap_or_default();
            prefs::save_layout(&mut store, layout);

            let fix = QuickFix::new(&source.code, &language);
            if fix.is_unchanged() {
                println!("{}", ALREADY_FORMATTED);
                return Ok(());
            }

            let comparison = Comparison::new(fix.original.as_str(), fix.formatted.as_str(), ComparisonKind::QuickFormat);
            match display::comparison_view(&comparison, layout) {
                Some(view) => println!("{}\n", view),
                None => println!("{}", fix.formatted),
            }

            if write {
                let path = source.path.as_ref().ok_or_else(|| {
                    CodeReviewError::Config("標準入力には --write を使えません".into())
                })?;
                std::fs::write(path, &fix.formatted)?;
                println!("✔ 整形結果を書き込み: {}", path.display());
            }
        }

        Commands::History { action } => {
            let mut history = HistoryStore::new(open_store(&config)?);

            match action {
                HistoryAction::List => display::print_history(&history.get_history()),

                HistoryAction::Show { id } => {
                    let entry = history
                        .restore_entry(id)
                        .ok_or(CodeReviewError::HistoryEntryNotFound(id))?;
                    display::print_entry_header(&entry);
                    println!("{}\n", entry.code.trim_end());

                    let layout = prefs::load_layout(history.store()).unwrap_or_default();
                    if let Some(improved) = entry.result.improved_code(&entry.code) {
                        let comparison = Comparison::new(entry.code.as_str(), improved, ComparisonKind::TigerStyle);
                        display::print_comparison(&comparison, layout);
                    }
                    display::print_document(&render(&entry.result));
                }

                HistoryAction::Delete { id } => {
                    if history.restore_entry(id).is_none() {
                        return Err(CodeReviewError::HistoryEntryNotFound(id));
                    }
                    history.delete_entry(id);
                    println!("✔ 履歴を削除しました: #{}", id);
                }

                HistoryAction::Clear { yes } => {
                    let confirmed = yes
                        || Confirm::new()
                            .with_prompt("すべての履歴を削除しますか？")
                            .default(false)
                            .interact()
                            .map_err(|e| std::io::Error::other(e.to_string()))?;

                    if confirmed {
                        history.clear_history();
                        println!("✔ 履歴をすべて削除しました");
                    } else {
                        println!("キャンセルしました");
                    }
                }
            }
        }

        Commands::Export { id, format, output } => {
            let history = HistoryStore::new(open_store(&config)?);
            let entry = history
                .restore_entry(id)
                .ok_or(CodeReviewError::HistoryEntryNotFound(id))?;

            match output {
                Some(output) => {
                    let path = export::export_entry(&entry, format, &output)?;
                    println!("✔ エクスポート: {}", path.display());
                }
                None => print!("{}", export::render_report(&entry, format)),
            }
        }

        Commands::Config { set_endpoint, set_timeout, set_model, show } => {
            let mut config = config;
            let changed = set_endpoint.is_some() || set_timeout.is_some() || set_model.is_some();

            if let Some(endpoint) = set_endpoint {
                config.set_endpoint(endpoint)?;
            }
            if let Some(seconds) = set_timeout {
                config.set_timeout(seconds)?;
            }
            if let Some(model) = set_model {
                config.set_default_model(model)?;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  エンドポイント: {}", config.endpoint);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!("  既定モデル: {}", config.default_model);
                println!("  既定言語: {}", config.default_language);
                println!("  保存先: {}", config.data_dir()?.display());
            }
        }
    }

    Ok(())
}
