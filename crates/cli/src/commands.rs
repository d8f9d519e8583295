//! Command execution

use std::io::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context};
use ewiki_core::{load_overview, ChatSession, WikiBackend};
use ewiki_domain::{
    ChatRequest, ChatTurn, Config, DevServerConfig, ImportRequest, KnowledgeUpload, UploadRequest,
};
use ewiki_infra::{config, DevServer, WikiApiClient};
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::cli::{Cli, Command, KnowledgeCommand};

/// Load configuration and run the selected command.
pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = config::load(cli.config).context("failed to load configuration")?;
    if let Some(base_url) = cli.base_url {
        config.api.origin = base_url;
        config.api.base_path = String::new();
    }

    if let Command::Serve { host, port, target, static_dir } = cli.command {
        let dev = apply_serve_overrides(config.dev_server, host, port, target, static_dir);
        return serve(&dev).await;
    }

    let client = WikiApiClient::new(&config.api)?;
    info!(base_url = client.base_url(), "using backend");

    execute(&client, &config, cli.command).await
}

async fn execute(
    backend: &dyn WikiBackend,
    config: &Config,
    command: Command,
) -> anyhow::Result<()> {
    match command {
        Command::Projects => {
            for project in backend.list_projects().await? {
                println!("{project}");
            }
        }
        Command::Import { path, language } => {
            let language = language.unwrap_or_else(|| config.defaults.language.clone());
            let request = ImportRequest::new(path).with_language(language);
            print_json(&backend.import_project(request).await?)?;
        }
        Command::Upload { file, language } => {
            let language = language.unwrap_or_else(|| config.defaults.language.clone());
            let (file_name, bytes) = read_upload(&file).await?;
            let request = UploadRequest::new(file_name, bytes).with_language(language);
            print_json(&backend.upload_project(request).await?)?;
        }
        Command::Readme { project } => {
            println!("{}", backend.project_readme(&project).await?);
        }
        Command::Modules { project } => {
            for module in backend.list_modules(&project).await? {
                println!("{module}");
            }
        }
        Command::Module { project, name } => {
            println!("{}", backend.module(&project, &name).await?);
        }
        Command::Chat { project, question, history, top_k, detailed } => {
            let history = match history {
                Some(path) => read_history(&path)?,
                None => Vec::new(),
            };
            let mut request = ChatRequest::new(question).with_history(history);
            request.top_k = top_k;

            if detailed {
                print_json(&backend.chat_detailed(&project, request).await?)?;
            } else {
                println!("{}", backend.chat(&project, request).await?);
            }
        }
        Command::Repl { project, top_k } => {
            let mut session = ChatSession::new(project);
            if let Some(top_k) = top_k {
                session = session.with_top_k(top_k);
            }
            repl(backend, session).await?;
        }
        Command::Overview { project } => {
            print_json(&load_overview(backend, &project).await?.to_json())?;
        }
        Command::Delete { project } => {
            print_json(&backend.delete_project(&project).await?)?;
        }
        Command::Knowledge(command) => knowledge(backend, command).await?,
        Command::Serve { .. } => return Err(anyhow!("serve is handled before client setup")),
    }

    Ok(())
}

async fn knowledge(backend: &dyn WikiBackend, command: KnowledgeCommand) -> anyhow::Result<()> {
    match command {
        KnowledgeCommand::List { project } => {
            print_json(&backend.list_knowledge_files(&project).await?)?;
        }
        KnowledgeCommand::Upload { project, file, description } => {
            let (file_name, bytes) = read_upload(&file).await?;
            let upload = KnowledgeUpload::new(file_name, bytes).with_description(description);
            print_json(&backend.upload_knowledge_file(&project, upload).await?)?;
        }
        KnowledgeCommand::Delete { project, filename } => {
            print_json(&backend.delete_knowledge_file(&project, &filename).await?)?;
        }
    }
    Ok(())
}

/// Line-oriented chat over stdin. `/clear` resets the history, `/exit` or
/// EOF ends the session. A failed question is reported and the session
/// continues with its history unchanged.
async fn repl(backend: &dyn WikiBackend, mut session: ChatSession) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("{}> ", session.project());
        std::io::stdout().flush().context("failed to flush stdout")?;

        let Some(line) = lines.next_line().await.context("failed to read stdin")? else {
            println!();
            break;
        };

        match line.trim() {
            "" => {}
            "/exit" | "/quit" => break,
            "/clear" => {
                session.clear();
                println!("(history cleared)");
            }
            question => match session.ask(backend, question).await {
                Ok(answer) => println!("{answer}\n"),
                Err(err) => {
                    warn!(error = %err, kind = err.label(), "question failed");
                    eprintln!("error: {err}");
                }
            },
        }
    }

    Ok(())
}

async fn serve(dev: &DevServerConfig) -> anyhow::Result<()> {
    let server = DevServer::start(dev).await?;
    println!(
        "EWiki dev server at {} ({} -> {})",
        server.url(),
        dev.proxy_prefix,
        dev.proxy_target
    );

    tokio::signal::ctrl_c().await.context("failed to listen for ctrl-c")?;
    info!("shutdown requested");

    server.shutdown().await?;
    Ok(())
}

fn apply_serve_overrides(
    mut dev: DevServerConfig,
    host: Option<String>,
    port: Option<u16>,
    target: Option<String>,
    static_dir: Option<PathBuf>,
) -> DevServerConfig {
    if let Some(host) = host {
        dev.host = host;
    }
    if let Some(port) = port {
        dev.port = port;
    }
    if let Some(target) = target {
        dev.proxy_target = target;
    }
    if let Some(dir) = static_dir {
        dev.static_dir = Some(dir.to_string_lossy().into_owned());
    }
    dev
}

async fn read_upload(path: &Path) -> anyhow::Result<(String, Vec<u8>)> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| anyhow!("not a file path: {}", path.display()))?;
    let bytes =
        tokio::fs::read(path).await.with_context(|| format!("failed to read {}", path.display()))?;
    Ok((file_name, bytes))
}

/// Prior conversation from a JSON array; entries are passed through as-is.
fn read_history(path: &Path) -> anyhow::Result<Vec<ChatTurn>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read history file {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("history file {} is not a JSON array", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
