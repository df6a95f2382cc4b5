use std::io::{self, BufRead, Write};

use anyhow::Context;
use colored::Colorize;
use phonebook_client::{
    ClientCache, Confirmation, Entry, EntryId, HttpTransport, Notice, Reconciler, Submission,
    SubmitOutcome,
};
use phonebook_server::{PhonebookServer, ServerConfig};

use crate::cli::*;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args).await,
        Command::List(args) => cmd_list(&cli.server, args).await,
        Command::Add(args) => cmd_add(&cli.server, args).await,
        Command::Remove(args) => cmd_remove(&cli.server, args).await,
        Command::Info => cmd_info(&cli.server).await,
    }
}

/// Config file, then `PORT`, then flags.
fn serve_config(args: &ServeArgs, port_env: Option<&str>) -> anyhow::Result<ServerConfig> {
    let mut config = match &args.config {
        Some(path) => ServerConfig::load(path)?,
        None => ServerConfig::default(),
    }
    .with_port_override(port_env)?;

    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if let Some(data) = &args.data {
        config.data_path = Some(data.clone());
    }
    config.seed |= args.seed;
    Ok(config)
}

async fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let port = std::env::var("PORT").ok();
    let config = serve_config(&args, port.as_deref())?;
    let storage = match &config.data_path {
        Some(path) => path.display().to_string(),
        None => "memory".into(),
    };
    println!(
        "{} Phonebook server on {} (store: {})",
        "✓".green().bold(),
        config.bind_addr.to_string().bold(),
        storage
    );
    PhonebookServer::new(config)
        .context("failed to start server")?
        .serve()
        .await
        .context("server stopped with an error")
}

async fn connect(server: &str) -> anyhow::Result<Reconciler<HttpTransport>> {
    let reconciler = Reconciler::new(HttpTransport::new(server));
    reconciler
        .load()
        .await
        .with_context(|| format!("could not load entries from {server}"))?;
    Ok(reconciler)
}

async fn cmd_list(server: &str, args: ListArgs) -> anyhow::Result<()> {
    let reconciler = connect(server).await?;
    let entries = reconciler.cache().filtered(args.filter.as_deref().unwrap_or(""));
    if entries.is_empty() {
        println!("No entries.");
    }
    for entry in &entries {
        print_entry(entry);
    }
    Ok(())
}

async fn cmd_add(server: &str, args: AddArgs) -> anyhow::Result<()> {
    let reconciler = connect(server).await?;
    let outcome = reconciler
        .submit(Submission::new(args.name, args.number))
        .await?;

    match outcome {
        SubmitOutcome::ConfirmUpdate(pending) => {
            let answer = confirm(&pending.prompt(), args.yes).await?;
            let outcome = reconciler.resolve_update(pending, answer).await?;
            if let Some(notice) = outcome.notice() {
                print_notice(&notice);
            }
        }
        other => print_notice(&other.notice()),
    }
    Ok(())
}

async fn cmd_remove(server: &str, args: RemoveArgs) -> anyhow::Result<()> {
    let reconciler = connect(server).await?;
    let entry = find_target(reconciler.cache(), &args.target)?;
    let Some(pending) = reconciler.request_delete(&entry.id) else {
        anyhow::bail!("no entry with id {}", entry.id);
    };

    let answer = confirm(&pending.prompt(), args.yes).await?;
    if let Some(notice) = reconciler.resolve_delete(pending, answer).await?.notice() {
        print_notice(&notice);
    }
    Ok(())
}

/// Look `target` up as an id first, then as a case-insensitive name.
fn find_target(cache: &ClientCache, target: &str) -> anyhow::Result<Entry> {
    let found = match EntryId::parse(target) {
        Ok(id) => cache.get(&id),
        Err(_) => cache.find_by_name(target),
    };
    found.with_context(|| format!("no entry matches name or id {target:?}"))
}

async fn cmd_info(server: &str) -> anyhow::Result<()> {
    let page = HttpTransport::new(server).info().await?;
    for line in page.split("</p>").map(|s| s.trim().trim_start_matches("<p>")) {
        if !line.is_empty() {
            println!("{line}");
        }
    }
    Ok(())
}

fn print_entry(entry: &Entry) {
    println!("{}  {}  {}", entry.id.short_id().dimmed(), entry.name.bold(), entry.number.cyan());
}

fn print_notice(notice: &Notice) {
    if notice.is_error() {
        println!("{} {}", "✗".red().bold(), notice);
    } else {
        println!("{} {}", "✓".green().bold(), notice);
    }
}

async fn confirm(prompt: &Notice, assume_yes: bool) -> anyhow::Result<Confirmation> {
    if assume_yes {
        return Ok(Confirmation::Confirmed);
    }
    let prompt = prompt.to_string();
    let yes = tokio::task::spawn_blocking(move || ask(&prompt)).await??;
    Ok(Confirmation::from(yes))
}

fn ask(prompt: &str) -> io::Result<bool> {
    print!("{} {} ", prompt.yellow(), "[y/N]".dimmed());
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(parse_answer(&line))
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn serve_args(argv: &[&str]) -> ServeArgs {
        let mut full = vec!["phonebook", "serve"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Serve(args) => args,
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn answers() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer(""));
        assert!(!parse_answer("n"));
        assert!(!parse_answer("sure"));
    }

    #[test]
    fn flags_override_port_env() {
        let config = serve_config(&serve_args(&["--bind", "0.0.0.0:9000"]), Some("4000")).unwrap();
        assert_eq!(config.bind_addr.port(), 9000);
    }

    #[test]
    fn port_env_applies_without_flag() {
        let config = serve_config(&serve_args(&["--seed"]), Some("4000")).unwrap();
        assert_eq!(config.bind_addr.port(), 4000);
        assert!(config.seed);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn remove_target_by_name_or_id() {
        let ada = Entry {
            id: EntryId::new(),
            name: "Ada Lovelace".into(),
            number: "1".into(),
        };
        let cache = ClientCache::new();
        cache.replace_all(vec![ada.clone()]);

        assert_eq!(find_target(&cache, "ada lovelace").unwrap(), ada);
        assert_eq!(find_target(&cache, &ada.id.to_string()).unwrap(), ada);

        let missing = EntryId::new().to_string();
        let err = find_target(&cache, &missing).unwrap_err();
        assert_eq!(err.to_string(), format!("no entry matches name or id {missing:?}"));
        let err = find_target(&cache, "Grace Hopper").unwrap_err();
        assert_eq!(err.to_string(), "no entry matches name or id \"Grace Hopper\"");
    }

    #[tokio::test]
    async fn assume_yes_skips_prompt() {
        let answer = confirm(&Notice::ConfirmDelete("Ada".into()), true).await.unwrap();
        assert_eq!(answer, Confirmation::Confirmed);
    }
}
