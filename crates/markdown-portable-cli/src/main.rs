use anyhow::{Context, Result};
use markdown_portable_config::Config;
use markdown_portable_engine::{Conversion, SyncRequest, convert_text, sync::InMemoryStore};
use std::{env, path::Path, process};

mod setup;

fn usage(program: &str) -> String {
    format!(
        "Usage:\n  {program} convert <file.md>                  print Portable Text JSON\n  {program} hash <file.md>                     print the content hash\n  {program} fields                             list registered sync targets\n  {program} sync <file.md> <type> <field>      rehearse a create against an in-memory store"
    )
}

fn convert_file(path: &Path) -> Result<Conversion> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let conversion =
        convert_text(&text).with_context(|| format!("Failed to convert {}", path.display()))?;
    for warning in &conversion.warnings {
        eprintln!("warning: {}: {warning}", path.display());
    }
    Ok(conversion)
}

fn load_config() -> Result<Option<Config>> {
    let config = Config::load()?;
    if config.is_none() {
        eprintln!("No config file found at {}", Config::config_path().display());
    }
    Ok(config)
}

fn run_convert(path: &Path) -> Result<()> {
    let conversion = convert_file(path)?;
    println!("{}", serde_json::to_string_pretty(&conversion.blocks)?);
    Ok(())
}

fn run_hash(path: &Path) -> Result<()> {
    let conversion = convert_file(path)?;
    println!("{}", conversion.content_hash);
    Ok(())
}

fn run_fields() -> Result<()> {
    let Some(config) = load_config()? else {
        return Ok(());
    };

    let registry = setup::registry(&config);
    if registry.is_empty() {
        eprintln!("No fields registered in {}", Config::config_path().display());
    }
    for entry in registry.list_accepted_fields() {
        println!("{}.{}", entry.document_type, entry.field_name);
    }
    Ok(())
}

/// Runs the full sync path (registry gate, timeout, audit record) without a
/// remote store.
async fn run_sync(path: &Path, document_type: &str, field_name: &str) -> Result<()> {
    let Some(config) = load_config()? else {
        return Ok(());
    };
    let conversion = convert_file(path)?;

    let engine = setup::sync_engine(&config, InMemoryStore::new()).await?;
    log::info!(
        "syncing with timeout {:?}, audit log {}",
        engine.timeout(),
        config.audit_log_path().display()
    );

    let outcome = engine
        .sync(&SyncRequest::create(
            document_type,
            field_name,
            conversion.blocks,
        ))
        .await?;
    println!(
        "{} {} {}",
        outcome.document_id, outcome.revision, outcome.content_hash
    );
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("markdown-portable-cli");

    match args.get(1).map(String::as_str) {
        Some("convert") if args.len() == 3 => run_convert(Path::new(&args[2])),
        Some("hash") if args.len() == 3 => run_hash(Path::new(&args[2])),
        Some("fields") if args.len() == 2 => run_fields(),
        Some("sync") if args.len() == 5 => {
            run_sync(Path::new(&args[2]), &args[3], &args[4]).await
        }
        _ => {
            eprintln!("{}", usage(program));
            process::exit(1);
        }
    }
}
