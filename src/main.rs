use clap::Parser;
use dialoguer::{Confirm, Select};
use home_online::{cli, config, error, export, session, store, validation};
use cli::{Cli, Commands};
use config::Config;
use error::{HomeOnlineError, Result};
use home_online_common::aggregator;
use home_online_common::{StoredApplication, APPLICATION_KEY};
use indicatif::{ProgressBar, ProgressStyle};
use session::{ConsoleNotifier, Session};
use std::path::{Path, PathBuf};
use std::time::Duration;
use store::LocalStore;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut config = Config::load()?;
    let store_path = match &cli.store {
        Some(path) => path.clone(),
        None => config.resolve_store_path()?,
    };

    match cli.command {
        Commands::Init { kind, name, email, phone, force } => {
            println!("🏠 home-online - 申込作成\n");

            let details = validation::ApplicantDetails {
                full_name: name,
                email,
                phone,
            };
            let errors = details.validate();
            if !errors.is_empty() {
                return Err(HomeOnlineError::Validation(errors.summary()));
            }

            let store = LocalStore::open(&store_path)?;
            if store.contains(APPLICATION_KEY) && !force {
                return Err(HomeOnlineError::CliExecution(
                    "既に申込があります。`--force` で上書きできます".into(),
                ));
            }

            let mut application = StoredApplication::new(kind);
            application.full_name = details.full_name.trim().to_string();
            application.email = details.email.trim().to_string();
            application.phone = details.phone.trim().to_string();

            let mut session = Session::create(store, application, ConsoleNotifier);
            session.save()?;

            println!("✔ {} を作成しました", session.title());
            println!("  ストア: {}", store_path.display());
            println!("  書類: {}件", session.checklist().documents().len());
        }

        Commands::Status => {
            let session = load_session(&store_path)?;
            print_status(&session);
        }

        Commands::Docs => {
            let session = load_session(&store_path)?;
            print_documents(&session);
        }

        Commands::Upload { doc_id, file } => {
            let mut session = load_session(&store_path)?;
            session.upload_path(&doc_id, &file)?;
            session.save()?;
            println!();
            print_status(&session);
        }

        Commands::Remove { doc_id, index } => {
            let mut session = load_session(&store_path)?;
            session.remove(&doc_id, index)?;
            session.save()?;
            println!();
            print_status(&session);
        }

        Commands::Review => {
            let mut session = load_session(&store_path)?;
            let spinner = spinner("管理者が審査中...");
            let result = session.submit_for_review(config.review_delay()).await;
            spinner.finish_and_clear();
            result?;
            session.save()?;
            print_status(&session);
        }

        Commands::Offers => {
            let mut session = load_session(&store_path)?;
            let spinner = spinner("金融機関からのオファーを待っています...");
            let result = session.request_offers(config.offer_delay()).await;
            spinner.finish_and_clear();
            let count = result?;
            session.save()?;
            println!("✔ {}件のオファーを受け取りました\n", count);
            print_status(&session);
        }

        Commands::Lenders => {
            let session = load_session(&store_path)?;
            print_lenders(&session);
        }

        Commands::Compare { sort } => {
            let session = load_session(&store_path)?;
            let rows = aggregator::compare_offers(session.lenders(), sort);
            if rows.is_empty() {
                println!("承認済みのオファーはありません");
                return Ok(());
            }

            println!(
                "{:<4}{:<30}{:>8}{:>10}{:>12}{:>10}  {}",
                "#", "金融機関", "金利", "比較金利", "月額返済", "初期費用", "ID"
            );
            for (i, row) in rows.iter().enumerate() {
                println!(
                    "{:<4}{:<30}{:>7.2}%{:>9.2}%{:>12.0}{:>10.0}  {}",
                    i + 1,
                    row.lender_name,
                    row.offer.interest_rate,
                    row.offer.comparison_rate,
                    row.offer.monthly_repayment,
                    row.offer.upfront_cost(),
                    row.offer.id
                );
            }
        }

        Commands::Accept { offer_id, yes } => {
            let mut session = load_session(&store_path)?;

            let offer_id = match offer_id {
                Some(id) => id,
                None => select_offer(&session)?,
            };

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt(format!("オファー {} を確定しますか？（取り消しできません）", offer_id))
                    .default(false)
                    .interact()
                    .map_err(|e| HomeOnlineError::CliExecution(e.to_string()))?;
                if !confirmed {
                    println!("キャンセルしました");
                    return Ok(());
                }
            }

            let accepted = session.accept(&offer_id)?;
            session.save()?;

            println!("\n✅ {} のオファーを確定しました", accepted.lender_name);
            println!("  金額: ${:.0}", accepted.offer.amount);
            println!("  金利: {:.2}%", accepted.offer.interest_rate);
            println!("  次の画面: {}", accepted.route);
        }

        Commands::Export { output, sort, title } => {
            let session = load_session(&store_path)?;
            let rows = aggregator::compare_offers(session.lenders(), sort);

            let output = output.unwrap_or_else(|| PathBuf::from("."));
            println!("- Excelを生成中...");
            let path = export::export_offers(&rows, &output, &title)?;
            println!("✔ Excel出力: {} ({}件)", path.display(), rows.len());
        }

        Commands::Log => {
            let session = load_session(&store_path)?;
            let entries = session.checklist().activity().entries();
            if entries.is_empty() {
                println!("アクティビティはまだありません");
            }
            for entry in entries {
                println!(
                    "{}  [{:?}] {}",
                    entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    entry.kind,
                    entry.message
                );
            }
        }

        Commands::Config { review_delay, offer_delay, set_store, show } => {
            let mut changed = false;

            if let Some(ms) = review_delay {
                config.review_delay_ms = ms;
                changed = true;
            }
            if let Some(ms) = offer_delay {
                config.offer_delay_ms = ms;
                changed = true;
            }
            if let Some(path) = set_store {
                config.store_path = Some(path);
                changed = true;
            }

            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                println!("設定:");
                println!("  ストア: {}", config.resolve_store_path()?.display());
                println!("  審査の擬似遅延: {}ms", config.review_delay_ms);
                println!("  オファーの擬似遅延: {}ms", config.offer_delay_ms);
            }
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "home_online=debug"
    } else {
        "warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_session(store_path: &Path) -> Result<Session<ConsoleNotifier>> {
    Session::load(LocalStore::open(store_path)?, ConsoleNotifier)
}

fn spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(style);
    }
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    spinner
}

fn progress_bar(progress: u8) -> String {
    let filled = (progress as usize).min(100) / 5;
    format!("[{}{}] {}%", "█".repeat(filled), "░".repeat(20 - filled), progress)
}

fn print_status(session: &Session<ConsoleNotifier>) {
    let status = session.checklist().status();

    println!("📋 {}", session.title());
    println!("  ステージ: {}", status.stage.label());
    println!("  進捗: {}", progress_bar(status.progress));
    println!(
        "  書類: {}",
        if status.documents_complete { "提出済み" } else { "未提出あり" }
    );
    println!(
        "  管理者承認: {}",
        if status.admin_approved { "承認済み" } else { "未承認" }
    );
    if status.offers_received > 0 {
        println!("  オファー: {}件", status.offers_received);
    }
}

fn print_documents(session: &Session<ConsoleNotifier>) {
    let classification = session.checklist().classify();

    let sections = [
        ("⚠ 必須（未提出）", &classification.required_missing),
        ("- 任意（未提出）", &classification.optional_missing),
        ("✔ 提出済み", &classification.completed),
    ];

    for (heading, docs) in sections {
        if docs.is_empty() {
            continue;
        }
        println!("{} ({}件)", heading, docs.len());
        for doc in docs.iter() {
            println!("  {:<20} {}", doc.id, doc.name);
            if !doc.reason_for_request.is_empty() && !doc.is_complete() {
                println!("  {:<20} 理由: {}", "", doc.reason_for_request);
            }
            for (i, file) in doc.uploaded_files.iter().enumerate() {
                println!("  {:<20} [{}] {} ({} bytes)", "", i, file.name, file.size);
            }
        }
        println!();
    }
}

fn print_lenders(session: &Session<ConsoleNotifier>) {
    let lenders = session.lenders();
    let summary = aggregator::summarize(lenders);

    println!("🏦 金融機関の審査状況 ({}件)\n", summary.total);
    for app in lenders {
        println!(
            "  {:<30} {:<10} {:<20} {:>3}%",
            app.lender_name,
            app.application_id,
            app.status.label(),
            app.progress
        );
        for doc in &app.additional_documents {
            println!("  {:<30} 追加書類: {} ({:?})", "", doc.name, doc.status);
        }
    }

    println!();
    println!("  承認: {}  要追加情報: {}  審査中: {}  否決: {}  保留: {}",
        summary.approved, summary.needing_more_info, summary.reviewing, summary.declined, summary.pending);
    match summary.best_rate {
        Some(rate) => println!("  最低金利: {:.2}%", rate),
        None => println!("  最低金利: -"),
    }
    println!("  未提出の追加書類: {}件", summary.pending_documents);
    println!("  全体進捗: {}", progress_bar(summary.overall_progress));
}

/// 対話式でオファーを選択
fn select_offer(session: &Session<ConsoleNotifier>) -> Result<String> {
    let rows = aggregator::compare_offers(session.lenders(), Default::default());
    if rows.is_empty() {
        return Err(home_online_common::Error::NoApprovedOffers.into());
    }

    let items: Vec<String> = rows
        .iter()
        .map(|r| {
            format!(
                "{} - {:.2}% (月額 ${:.0})",
                r.lender_name, r.offer.interest_rate, r.offer.monthly_repayment
            )
        })
        .collect();

    let index = Select::new()
        .with_prompt("確定するオファーを選択してください")
        .items(&items)
        .default(0)
        .interact()
        .map_err(|e| HomeOnlineError::CliExecution(e.to_string()))?;

    Ok(rows[index].offer.id.clone())
}
