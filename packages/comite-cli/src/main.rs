//! Terminal front end for the committee membership client.
//!
//! Renders whatever screen the shell selects (sign in, sign up or one of the
//! authenticated routes) and feeds the user's choices back into it.

mod menu;
mod screens;
mod views;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use comite_api::ApiClient;
use comite_client::{
    App, ClientConfig, Directories, FileStorage, MenuLayout, NavEvent, Route, Screen,
};
use console::Term;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Layout {
    /// Top bar with a committees dropdown
    Top,
    /// Collapsible side panel with a committees submenu
    Side,
}

impl From<Layout> for MenuLayout {
    fn from(layout: Layout) -> Self {
        match layout {
            Layout::Top => MenuLayout::TopBar,
            Layout::Side => MenuLayout::SidePanel,
        }
    }
}

#[derive(Parser)]
#[command(name = "comite")]
#[command(about = "Portal de miembros de los Comités de Base")]
struct Cli {
    /// API base URL (overrides COMITE_API_URL)
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for the persisted session (overrides COMITE_DATA_DIR)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Menu layout
    #[arg(long, value_enum, default_value = "top")]
    layout: Layout,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so they don't interleave with the prompts
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,comite_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let mut config = ClientConfig::from_env().context("Failed to load configuration")?;
    if let Some(api_url) = cli.api_url {
        config.api_url = api_url;
    }
    if let Some(data_dir) = cli.data_dir {
        config.data_dir = data_dir;
    }

    let api = ApiClient::with_timeout(&config.api_url, config.http_timeout)
        .context("Invalid API base URL")?;
    tracing::info!(api_url = api.base_url(), "Starting comite client");

    let storage = Arc::new(FileStorage::new(&config.data_dir));
    let mut app = App::bootstrap(
        Directories::from_shared(Arc::new(api)),
        storage,
        &config,
        cli.layout.into(),
    );

    let term = Term::stdout();
    print_banner(&term)?;

    // Approximate pixels at 8px per terminal column
    let (_, columns) = term.size();
    app.handle(NavEvent::ViewportResized {
        width: u32::from(columns) * 8,
    });

    // Route currently drawn, and the dashboard's editor when it is the one
    let mut drawn: Option<Route> = None;
    let mut profile = None;

    loop {
        let keep_going = match app.screen() {
            Screen::SignIn => {
                drawn = None;
                screens::sign_in(&mut app, &term).await?
            }
            Screen::SignUp => screens::sign_up(&mut app, &term).await?,
            Screen::Main(route) => {
                if drawn != Some(route) {
                    profile = views::render(&app, route, &term).await?;
                    drawn = Some(route);
                }
                match menu::main_menu(&mut app, &term, profile.as_mut()).await? {
                    menu::Outcome::Stay => true,
                    menu::Outcome::Redraw => {
                        drawn = None;
                        true
                    }
                    menu::Outcome::Exit => false,
                }
            }
        };
        if !keep_going {
            break;
        }
    }

    println!("{}", "👋 ¡Hasta luego!".bright_blue());
    Ok(())
}

fn print_banner(term: &Term) -> Result<()> {
    term.clear_screen()?;
    println!(
        "{}",
        "╔════════════════════════════════════════╗".bright_cyan()
    );
    println!(
        "{}",
        "║        Comités de Base - Miembros      ║".bright_cyan()
    );
    println!(
        "{}",
        "╚════════════════════════════════════════╝".bright_cyan()
    );
    println!();
    Ok(())
}
