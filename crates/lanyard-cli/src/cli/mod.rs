//! CLI entry and dispatch.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use lanyard_core::api::ApiClient;
use lanyard_core::config::{Config, paths};
use lanyard_core::guard::{Access, Route, RouteGuard};
use lanyard_core::session::{CredentialStore, Session, TokenCell};

mod commands;

#[derive(Parser)]
#[command(name = "lanyard")]
#[command(version)]
#[command(about = "Terminal companion for event attendees")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Log in to the event platform (password read from stdin)
    Login {
        /// Account email
        #[arg(long)]
        email: Option<String>,
    },

    /// Log out and erase the stored credential
    Logout,

    /// Create an account (password read from stdin)
    Register(RegisterArgs),

    /// Show the current session
    Whoami,

    /// Browse events
    Events {
        #[command(subcommand)]
        command: EventsCommands,
    },

    /// List your event registrations
    Registrations,

    /// Show your digital credential for an event
    Badge {
        /// The event ID
        #[arg(value_name = "EVENT_ID")]
        event_id: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Args)]
struct RegisterArgs {
    #[arg(long)]
    email: String,
    #[arg(long)]
    name: String,
    #[arg(long)]
    company: String,
    #[arg(long)]
    position: String,
    #[arg(long)]
    phone: String,
    /// Tax id (11 digits, punctuation allowed)
    #[arg(long)]
    cpf: String,
}

#[derive(clap::Subcommand)]
enum EventsCommands {
    /// List all events
    List,
    /// Show one event and its detail entries
    Show {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// Show the schedule
    Schedule {
        #[arg(value_name = "EVENT_ID")]
        id: String,
        /// Day to show (defaults to the first day in the schedule)
        #[arg(long)]
        day: Option<u32>,
    },
    /// List the speakers
    Speakers {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// List the sponsors by tier
    Sponsors {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// Show the venue and a map link
    Venue {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// Show general information
    Info {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
    /// Show the photo drive link
    Photos {
        #[arg(value_name = "EVENT_ID")]
        id: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
    /// Set the API base URL (preserves comments)
    SetUrl {
        #[arg(value_name = "URL")]
        url: String,
    },
}

/// Everything a command handler needs, wired up once per invocation.
/// Explicit construction keeps the session out of global state.
pub struct App {
    pub config: Config,
    pub store: CredentialStore,
    pub session: Session,
    pub guard: RouteGuard,
    pub api: ApiClient,
}

impl App {
    fn bootstrap() -> Result<Self> {
        let config = Config::load().context("load config")?;
        let store = CredentialStore::new(paths::credentials_path());
        let tokens = Arc::new(TokenCell::new());
        let session = Session::new(store.clone(), Arc::clone(&tokens));
        let api = ApiClient::new(&config, tokens).context("build api client")?;

        // Consult the store once at startup; anonymous when absent.
        session.restore().map_err(anyhow::Error::new)?;

        Ok(Self {
            config,
            store,
            session,
            guard: RouteGuard::new(),
            api,
        })
    }

    /// Gate for protected views.
    pub fn require(&self, route: Route) -> Result<()> {
        match self.guard.check(&self.session, route) {
            Access::Granted => Ok(()),
            Access::LoginRequired { .. } => {
                anyhow::bail!("Not logged in. Run `lanyard login` first.")
            }
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    init_tracing();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    // Logs go to stderr so tables stay clean on stdout.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();
}

async fn dispatch(cli: Cli) -> Result<()> {
    // Config-only commands don't need a session or network stack.
    if let Commands::Config { command } = &cli.command {
        return match command {
            ConfigCommands::Path => commands::config::path(),
            ConfigCommands::Init => commands::config::init(),
            ConfigCommands::SetUrl { url } => commands::config::set_url(url),
        };
    }

    let app = App::bootstrap()?;

    match cli.command {
        Commands::Login { email } => commands::auth::login(&app, email.as_deref()).await,
        Commands::Logout => commands::auth::logout(&app),
        Commands::Register(args) => {
            commands::auth::register(
                &app,
                &args.email,
                &args.name,
                &args.company,
                &args.position,
                &args.phone,
                &args.cpf,
            )
            .await
        }
        Commands::Whoami => commands::auth::whoami(&app),

        Commands::Events { command } => match command {
            EventsCommands::List => commands::events::list(&app).await,
            EventsCommands::Show { id } => commands::events::show(&app, &id).await,
            EventsCommands::Schedule { id, day } => {
                commands::events::schedule(&app, &id, day).await
            }
            EventsCommands::Speakers { id } => commands::events::speakers(&app, &id).await,
            EventsCommands::Sponsors { id } => commands::events::sponsors(&app, &id).await,
            EventsCommands::Venue { id } => commands::events::venue(&app, &id).await,
            EventsCommands::Info { id } => commands::events::info(&app, &id).await,
            EventsCommands::Photos { id } => commands::events::photos(&app, &id).await,
        },

        Commands::Registrations => commands::badge::registrations(&app).await,
        Commands::Badge { event_id } => commands::badge::badge(&app, &event_id).await,

        Commands::Config { .. } => unreachable!("handled before bootstrap"),
    }
}
