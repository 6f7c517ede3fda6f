use anyhow::{anyhow, Result};
use photo_tournament_bot::config::stats_file_from_env;
use photo_tournament_bot::storage::StatsStore;
use std::env;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("show");

    match command {
        "show" => show_stats(),
        "normalize" => normalize_stats(),
        "help" | "--help" | "-h" => {
            print_help();
            Ok(())
        }
        _ => {
            eprintln!("Unknown command: {command}");
            print_help();
            std::process::exit(1);
        }
    }
}

fn open_store() -> StatsStore {
    dotenvy::dotenv().ok();
    let path = stats_file_from_env();
    println!("📊 Stats file: {}", mask_path(&path));
    if !path.exists() {
        println!("⚠️  File does not exist yet, nothing recorded");
    }
    StatsStore::load(path)
}

fn show_stats() -> Result<()> {
    println!("🏆 Photo Tournament Bot - Usage Statistics");
    println!("==========================================");

    let store = open_store();
    let summary = store.summary();

    println!("👥 Users: {}", summary.total_users);
    println!("🎯 Menu visits: {}", summary.total_uses);

    if summary.ranking.is_empty() {
        return Ok(());
    }

    println!();
    for (i, user) in summary.ranking.iter().enumerate() {
        println!(
            "{:>3}. {} ({}) - {} visit(s), last seen {}",
            i + 1,
            user.name,
            user.participant,
            user.uses,
            user.last_seen.as_deref().unwrap_or("never")
        );
    }

    Ok(())
}

fn normalize_stats() -> Result<()> {
    println!("🔧 Rewriting stats file in the current format...");

    let store = open_store();
    store
        .flush()
        .map_err(|e| anyhow!("Failed to write {}: {}", store.path().display(), e))?;

    println!("✅ Normalized {} user entries", store.len());
    Ok(())
}

fn mask_path(path: &Path) -> String {
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            format!(".../{}", name.to_string_lossy())
        }
        _ => path.display().to_string(),
    }
}

fn print_help() {
    println!("🏆 Photo Tournament Bot - Stats Admin Tool");
    println!();
    println!("USAGE:");
    println!("    stats-admin [COMMAND]");
    println!();
    println!("COMMANDS:");
    println!("    show           Print users ranked by menu visits (default)");
    println!("    normalize      Rewrite legacy entries in the current format");
    println!("    help           Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    STATS_FILE     Path of the stats file (default: stats.json)");
    println!();
}
