use bytes::Bytes;
use clap::{Parser, Subcommand};
use doc_dashboard::files::{FileFilter, SortKey};
use doc_dashboard::models::FileAction;
use doc_dashboard::view::TerminalView;
use doc_dashboard::wizard::{HardcopyOption, WizardState};
use doc_dashboard::{Dashboard, DashboardConfig, HttpBackend, NotificationPoller};
use dotenvy::dotenv;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::Mutex;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Poll notifications until interrupted
    Watch,

    /// Run a file through the upload wizard
    Upload {
        path: PathBuf,

        #[arg(long = "doc-type")]
        document_type: String,

        #[arg(long)]
        department: Option<String>,

        #[arg(long = "sub-department")]
        sub_department: Option<String>,

        /// none, new or link
        #[arg(long, default_value = "none")]
        hardcopy: HardcopyOption,

        /// Existing hardcopy to link (with --hardcopy link)
        #[arg(long = "hardcopy-id")]
        hardcopy_id: Option<String>,

        /// Document type field as name=value, repeatable
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },

    /// List files with optional sort and filter
    Files {
        /// name, date, type or size
        #[arg(long, default_value = "name")]
        sort: SortKey,

        #[arg(long, default_value = "")]
        search: String,

        #[arg(long = "type", default_value = "")]
        document_type: String,

        #[arg(long)]
        hardcopy_only: bool,
    },

    /// Send a stored file to recipients
    Send {
        file_id: String,
        #[arg(required = true)]
        recipients: Vec<String>,
    },

    /// Accept or deny a pending notification
    Decide {
        notification_id: String,
        file_id: String,
        action: FileAction,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(k, v)| (k.trim().to_string(), v.to_string()))
        .filter(|(k, _)| !k.is_empty())
        .ok_or_else(|| format!("expected name=value, got '{}'", raw))
}

/// The hardcopy step only runs with a department
fn hardcopy_requested(hardcopy: HardcopyOption, hardcopy_id: Option<&str>) -> bool {
    hardcopy != HardcopyOption::None || hardcopy_id.is_some()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "doc_dashboard=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = DashboardConfig::from_env();
    info!(
        "🚀 Document dashboard against {} (poll every {:?})",
        config.base_url, config.poll_interval
    );

    let backend = Arc::new(HttpBackend::new(config.clone())?);
    let mut dashboard = Dashboard::new(backend, TerminalView::default(), config.clone());

    match args.command {
        Command::Watch => {
            let dashboard = Arc::new(Mutex::new(dashboard));
            let (shutdown_tx, shutdown_rx) = tokio::sync::watch::channel(false);
            let poller = NotificationPoller::new(dashboard, config.poll_interval, shutdown_rx);
            let handle = tokio::spawn(poller.run());

            shutdown_signal().await;
            let _ = shutdown_tx.send(true);
            if let Err(e) = handle.await {
                error!("Poller task failed: {}", e);
            }
        }
        Command::Upload {
            path,
            document_type,
            department,
            sub_department,
            hardcopy,
            hardcopy_id,
            fields,
        } => {
            let content = Bytes::from(tokio::fs::read(&path).await?);
            let filename = path
                .file_name()
                .and_then(|n| n.to_str())
                .unwrap_or_default()
                .to_string();

            if department.is_none() && hardcopy_requested(hardcopy, hardcopy_id.as_deref()) {
                warn!("⚠️  No --department given; hardcopy options are ignored");
            }

            dashboard.select_file(&filename, content).await?;
            dashboard.select_document_type(&document_type).await?;
            for (name, value) in &fields {
                dashboard.set_field(name, value);
            }
            dashboard.select_department(department).await?;
            if sub_department.is_some() {
                dashboard.select_sub_department(sub_department).await;
            }
            dashboard.submit_details().await?;

            if dashboard.wizard_state() == WizardState::HardcopyDecision {
                dashboard
                    .choose_hardcopy(hardcopy != HardcopyOption::None, hardcopy)
                    .await;
                dashboard.submit_hardcopy().await?;
            }
            if dashboard.wizard_state() == WizardState::HardcopyLinking {
                dashboard.select_hardcopy(hardcopy_id);
                dashboard.confirm_link().await?;
            }

            if dashboard.wizard_state() != WizardState::Done {
                anyhow::bail!("upload did not complete");
            }
        }
        Command::Files {
            sort,
            search,
            document_type,
            hardcopy_only,
        } => {
            dashboard.load_files().await?;
            dashboard.filter_files(FileFilter {
                search,
                document_type,
                hardcopy_only,
            });
            dashboard.sort_files_by(sort);
        }
        Command::Send {
            file_id,
            recipients,
        } => {
            dashboard.send_file(&file_id, &recipients).await?;
        }
        Command::Decide {
            notification_id,
            file_id,
            action,
        } => {
            dashboard
                .submit_decision(&notification_id, &file_id, action)
                .await?;
        }
    }

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, stopping...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, stopping...");
        },
    }
}
