//! Command-line interface

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use creatorhub_client::flows::{self, CreatedContent, UploadRequest, ViewedContent};
use creatorhub_client::{
    format_xlm, ClientConfig, InMemorySigner, PlaceholderBackend, WalletAddress, WalletSession,
};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Wallets used by `demo`
const DEMO_CREATOR: &str = "GBRPYHIL2CI3FNQ4BXLFMNDLFJUNPU2HY3ZMFSHONUCEOASW7QC7OX2H";
const DEMO_SUBSCRIBER: &str = "GCEZWKCA5VLDNRLN3RPRJMRZOX3Z6G5CHCGSNFHEYVXM3XOJMDS674JZ";

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

#[derive(Parser, Debug)]
#[command(author, version, about = "CreatorHub - client-side content encryption")]
struct Args {
    /// Log level
    #[arg(long, value_enum, default_value = "warn", global = true)]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Encrypt a file and print its key descriptor
    Encrypt {
        /// File to encrypt
        input: PathBuf,

        /// Where to write the ciphertext
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Decrypt a file with its key descriptor
    Decrypt {
        /// Ciphertext produced by `encrypt`
        input: PathBuf,

        /// Key descriptor printed by `encrypt`
        #[arg(short, long, env = "CREATORHUB_KEY", hide_env_values = true)]
        key: String,

        /// Where to write the plaintext
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Publish, buy and view a file against the placeholder backend
    Demo {
        /// File to publish
        file: PathBuf,

        /// Price in XLM
        #[arg(long, default_value = "1")]
        price: String,

        /// Publish for subscribers only; the demo viewer subscribes instead of buying
        #[arg(long)]
        subscribers_only: bool,

        /// Override the simulated backend latency
        #[arg(long)]
        delay_ms: Option<u64>,
    },
}

/// Options for [`run_demo`]
#[derive(Debug, Clone)]
pub struct DemoOptions {
    pub file_name: String,
    pub data: Vec<u8>,
    pub price: String,
    pub subscribers_only: bool,
}

/// What the demo published and what the subscriber saw
#[derive(Debug, Clone)]
pub struct DemoReport {
    pub content: CreatedContent,
    pub viewed: ViewedContent,
    pub matches: bool,
}

pub async fn run() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let log_level = match args.log_level {
        LogLevel::Trace => tracing::Level::TRACE,
        LogLevel::Debug => tracing::Level::DEBUG,
        LogLevel::Info => tracing::Level::INFO,
        LogLevel::Warn => tracing::Level::WARN,
        LogLevel::Error => tracing::Level::ERROR,
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_writer(io::stderr)
        .init();

    match args.command {
        Command::Encrypt { input, output } => {
            let descriptor = encrypt_path(&input, &output).await?;
            println!("{descriptor}");
        }
        Command::Decrypt { input, key, output } => {
            decrypt_path(&input, &key, &output).await?;
        }
        Command::Demo {
            file,
            price,
            subscribers_only,
            delay_ms,
        } => {
            let mut config = ClientConfig::from_env()?;
            if let Some(delay_ms) = delay_ms {
                config.placeholder_delay = Duration::from_millis(delay_ms);
            }

            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let options = DemoOptions {
                file_name: display_name(&file),
                data,
                price,
                subscribers_only,
            };

            let report = run_demo(config, options).await?;
            print_report(&report);
            if !report.matches {
                anyhow::bail!("Decrypted content does not match the original file");
            }
        }
    }

    Ok(())
}

/// Encrypt `input` into `output`, returning the key descriptor
pub async fn encrypt_path(input: &Path, output: &Path) -> Result<String> {
    let data = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let sealed = flows::encrypt_file(data).await?;

    tokio::fs::write(output, &sealed.ciphertext)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!(
        "Encrypted {} -> {} ({} bytes)",
        input.display(),
        output.display(),
        sealed.ciphertext.len()
    );

    Ok(sealed.descriptor)
}

/// Decrypt `input` with `descriptor` into `output`
pub async fn decrypt_path(input: &Path, descriptor: &str, output: &Path) -> Result<()> {
    let ciphertext = tokio::fs::read(input)
        .await
        .with_context(|| format!("Failed to read {}", input.display()))?;

    let plaintext = flows::decrypt_file(ciphertext, descriptor.to_string())
        .await
        .with_context(|| format!("Failed to decrypt {}", input.display()))?;

    tokio::fs::write(output, &plaintext)
        .await
        .with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Decrypted {} -> {}", input.display(), output.display());

    Ok(())
}

/// Register, upload, pay and view in one go against the placeholder backend
pub async fn run_demo(config: ClientConfig, options: DemoOptions) -> Result<DemoReport> {
    let backend = PlaceholderBackend::new(config);

    let creator_address = WalletAddress::parse(DEMO_CREATOR)?;
    let creator = WalletSession::new(Arc::new(InMemorySigner::new(creator_address.clone())));
    let subscriber = WalletSession::new(Arc::new(InMemorySigner::new(WalletAddress::parse(
        DEMO_SUBSCRIBER,
    )?)));
    creator.connect().await?;
    subscriber.connect().await?;

    flows::register_creator(&creator, &backend, "", &options.price)
        .await
        .context("Creator registration failed")?;

    let original = options.data.clone();
    let content = flows::upload_content(
        &creator,
        &backend,
        UploadRequest {
            title: options.file_name.clone(),
            description: String::new(),
            price: options.price,
            is_for_subscribers: options.subscribers_only,
            file_name: options.file_name,
            data: options.data,
        },
    )
    .await
    .context("Upload failed")?;

    if options.subscribers_only {
        flows::subscribe(&subscriber, &backend, creator_address.as_str(), 1)
            .await
            .context("Subscription failed")?;
    } else {
        flows::buy_content(&subscriber, &backend, content.id)
            .await
            .context("Purchase failed")?;
    }

    let viewed = flows::view_content(&subscriber, &backend, content.id, &content.encrypted_cid)
        .await
        .context("Viewing failed")?;

    Ok(DemoReport {
        matches: viewed.data == original,
        content,
        viewed,
    })
}

fn print_report(report: &DemoReport) {
    println!("content id:  {}", report.content.id);
    println!("cid:         {}", report.content.encrypted_cid);
    println!("price:       {}", format_xlm(report.content.price));
    println!(
        "access:      {}",
        if report.content.is_for_subscribers {
            "subscribers only"
        } else {
            "pay per content"
        }
    );
    println!("viewed as:   {}", report.viewed.kind.mime_type());
    println!("roundtrip:   {}", if report.matches { "ok" } else { "MISMATCH" });
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
