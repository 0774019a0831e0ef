use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use troops::api;
use troops::config::{NodeConfig, Role};
use troops::courier::{Enlistment, HttpCourier};
use troops::node::{Commander, Private, Reporter, Sergeant};

#[derive(Parser)]
#[command(name = "troops")]
#[command(about = "Sensor troop node: private, sergeant or commander")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a private (sensor owner)
    Private {
        #[command(flatten)]
        node: NodeArgs,

        /// Sensor capability this private owns (repeatable)
        #[arg(long = "sensor", default_values = ["random", "zero"])]
        sensors: Vec<String>,

        /// Join the superior as a commander's soldier instead of a sergeant's private
        #[arg(long)]
        direct: bool,
    },
    /// Run a sergeant
    Sergeant {
        #[command(flatten)]
        node: NodeArgs,
    },
    /// Run the commander
    Commander {
        #[command(flatten)]
        node: NodeArgs,

        /// Campaign label (repeatable)
        #[arg(long = "campaign")]
        campaigns: Vec<String>,
    },
}

#[derive(Args)]
struct NodeArgs {
    /// Node id (defaults to TROOPS_ID or a fresh UUID)
    #[arg(long)]
    id: Option<String>,

    /// Display name
    #[arg(long)]
    name: Option<String>,

    /// Address to bind and advertise
    #[arg(short, long)]
    addr: Option<String>,

    /// Port for the HTTP API
    #[arg(short, long)]
    port: Option<u16>,

    /// Base URL of the superior to join, e.g. http://127.0.0.1:51000
    #[arg(short, long)]
    superior: Option<String>,

    /// Per-child delivery timeout in milliseconds
    #[arg(long)]
    timeout_ms: Option<u64>,
}

impl NodeArgs {
    fn into_config(self, role: Role) -> NodeConfig {
        let mut config = NodeConfig::from_env(role);
        if let Some(id) = self.id {
            config.id = id;
        }
        if let Some(name) = self.name {
            config.name = name;
        }
        if let Some(addr) = self.addr {
            config.addr = addr;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if self.superior.is_some() {
            config.superior = self.superior;
        }
        if let Some(ms) = self.timeout_ms {
            config.delivery_timeout = Duration::from_millis(ms);
        }
        config
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "troops=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn serve(config: &NodeConfig, app: axum::Router) -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind((config.addr.as_str(), config.port)).await?;
    tracing::info!(
        role = ?config.role,
        id = %config.id,
        "{} listening on {}",
        config.name,
        config.endpoint()
    );
    axum::serve(listener, app).await?;
    Ok(())
}

/// Register with the superior, logging instead of failing: a node without
/// a reachable superior still serves its own children.
async fn enlist(
    courier: &HttpCourier,
    config: &NodeConfig,
    enlistment: Enlistment,
    record: &troops::models::ChildRecord,
) {
    let Some(superior) = &config.superior else {
        return;
    };
    match courier.join(superior, enlistment, record).await {
        Ok(()) => tracing::info!(superior = %superior, "joined superior"),
        Err(e) => tracing::error!(superior = %superior, error = %e, "could not join superior"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Commands::Private {
            node,
            sensors,
            direct,
        } => {
            let config = node.into_config(Role::Private);
            let courier = HttpCourier::new(config.delivery_timeout)?;
            let private = Arc::new(Private::new(&config, sensors));

            let enlistment = if direct {
                Enlistment::PrivateToCommander
            } else {
                Enlistment::PrivateToSergeant
            };
            enlist(&courier, &config, enlistment, &private.record()).await;

            serve(&config, api::private_router(private)).await?;
        }
        Commands::Sergeant { node } => {
            let config = node.into_config(Role::Sergeant);
            let courier = Arc::new(HttpCourier::new(config.delivery_timeout)?);
            let sergeant = Arc::new(Sergeant::new(&config, courier.clone()));

            enlist(&courier, &config, Enlistment::SergeantToCommander, &sergeant.record()).await;
            let relay = config
                .superior
                .clone()
                .map(|superior| Reporter::new(sergeant.clone(), courier.clone(), superior).spawn());

            let app = api::sergeant_router(sergeant);
            match relay {
                Some(relay) => tokio::select! {
                    served = serve(&config, app) => served?,
                    ended = relay => match ended {
                        Ok(()) => anyhow::bail!("relay task stopped"),
                        Err(e) => anyhow::bail!("relay task failed: {}", e),
                    },
                },
                None => serve(&config, app).await?,
            }
        }
        Commands::Commander { node, campaigns } => {
            let mut config = node.into_config(Role::Commander);
            config.campaigns = campaigns;
            let courier = Arc::new(HttpCourier::new(config.delivery_timeout)?);
            let commander = Arc::new(Commander::new(&config, courier));

            serve(&config, api::commander_router(commander)).await?;
        }
    }

    Ok(())
}
