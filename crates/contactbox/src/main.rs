//! `cbox` - CLI for contactbox
//!
//! Submit contact forms and list what has been collected.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use contactbox::cli::{
    ClearCommand, Cli, Command, ConfigCommand, InterestsCommand, ListCommand, OutputFormat,
    StatusCommand, SubmitCommand,
};
use contactbox::{
    init_logging, render_json, render_plain, Config, ListingView, RecordStore, SubmissionHandler,
};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbosity());

    let config = Config::load_from(cli.config.clone()).context("loading configuration")?;
    debug!(
        "Using database {} with key {}",
        config.database_path().display(),
        config.storage.key
    );

    match cli.command {
        Command::Submit(cmd) => handle_submit(&config, &cmd),
        Command::List(cmd) => handle_list(&config, &cmd),
        Command::Interests(cmd) => handle_interests(&config, &cmd),
        Command::Status(cmd) => handle_status(&config, &cmd),
        Command::Clear(cmd) => handle_clear(&config, &cmd),
        Command::Config(cmd) => handle_config(&config, cmd),
    }
}

fn open_store(config: &Config) -> anyhow::Result<RecordStore> {
    RecordStore::open(config)
        .with_context(|| format!("opening store at {}", config.database_path().display()))
}

fn handle_submit(config: &Config, cmd: &SubmitCommand) -> anyhow::Result<()> {
    let mut form = cmd.to_form()?;
    let store = open_store(config)?;
    let mut handler = SubmissionHandler::new(&store, &config.form);

    let confirmation = handler.submit(&mut form, Instant::now());
    println!("{}", confirmation.message);
    Ok(())
}

fn handle_list(config: &Config, cmd: &ListCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let mut view = ListingView::open(&store);

    if let Some(sort) = cmd.sort {
        view.sort_by(sort.into());
    }
    if let Some(interes) = &cmd.interes {
        view.set_filter(interes.clone());
    }

    match cmd.format {
        OutputFormat::Plain => print!("{}", render_plain(&view.visible(), &config.display)),
        OutputFormat::Html => println!("{}", view.render(&config.display).into_string()),
        OutputFormat::Json => println!("{}", render_json(&view.visible())?),
    }
    Ok(())
}

fn handle_interests(config: &Config, cmd: &InterestsCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let interests = ListingView::open(&store).interests();

    if cmd.json {
        println!("{}", serde_json::to_string_pretty(&interests)?);
    } else {
        for interest in interests {
            println!("{interest}");
        }
    }
    Ok(())
}

fn handle_status(config: &Config, cmd: &StatusCommand) -> anyhow::Result<()> {
    let store = open_store(config)?;
    let slot = store.slot_info()?;
    let (records, readable) = match store.try_load() {
        Ok(records) => (records.len(), true),
        Err(_) => (0, false),
    };
    let size = slot.as_ref().map_or(0, |s| s.size_bytes);
    let updated = slot.and_then(|s| s.updated_at);

    if cmd.json {
        let status = serde_json::json!({
            "database_path": config.database_path(),
            "key": store.key(),
            "records": records,
            "readable": readable,
            "size_bytes": size,
            "quota_bytes": config.quota(),
            "updated_at": updated,
        });
        println!("{}", serde_json::to_string_pretty(&status)?);
    } else {
        println!("cbox status");
        println!("-----------");
        println!("Database:      {}", config.database_path().display());
        println!("Key:           {}", store.key());
        println!(
            "Records:       {records}{}",
            if readable { "" } else { " (stored value unreadable)" }
        );
        println!("Size:          {size} bytes");
        match config.quota() {
            Some(quota) => println!("Quota:         {quota} bytes"),
            None => println!("Quota:         unlimited"),
        }
        match updated {
            Some(at) => println!("Last write:    {}", at.to_rfc3339()),
            None => println!("Last write:    never"),
        }
    }
    Ok(())
}

fn handle_clear(config: &Config, cmd: &ClearCommand) -> anyhow::Result<()> {
    if !cmd.yes {
        println!("This will delete every stored submission.");
        println!("Use --yes to confirm.");
        return Ok(());
    }

    let store = open_store(config)?;
    if store.clear()? {
        println!("Stored submissions deleted.");
    } else {
        println!("Nothing to delete.");
    }
    Ok(())
}

fn handle_config(config: &Config, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Storage]");
                println!("  Database path:        {}", config.database_path().display());
                println!("  Key:                  {}", config.storage.key);
                println!("  Quota (bytes):        {}", config.storage.quota_bytes);
                println!();
                println!("[Form]");
                println!("  Confirmation (secs):  {}", config.form.confirmation_secs);
                println!("  Confirmation message: {}", config.form.confirmation_message);
                println!();
                println!("[Display]");
                println!("  Empty message:        {}", config.display.empty_message);
                println!(
                    "  Unspecified interest: {}",
                    config.display.unspecified_interest
                );
                println!("  No message:           {}", config.display.no_message);
            }
        }
        ConfigCommand::Path => {
            println!("{}", Config::default_config_path().display());
        }
        ConfigCommand::Validate { file } => {
            let path = file.unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            match Config::load_from(Some(path)) {
                Ok(_) => println!("Configuration is valid."),
                Err(e) => println!("Configuration error: {e}"),
            }
        }
    }
    Ok(())
}
