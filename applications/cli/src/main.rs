/// Animagery - anime streaming front end, headless
use animagery_cli::{
    commands::{describe_position, describe_profile, describe_title},
    config::AppConfig,
    watch::{pick_episode, WatchSession},
    App,
};
use animagery_playback::{PlaybackRate, PlayerEvent};
use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "animagery")]
#[command(about = "Browse, save and watch anime from the terminal", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, env = "ANIMAGERY_CONFIG", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and sign in
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign in to an existing account
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    /// Sign out
    Logout,
    /// Show the signed-in profile
    Whoami,
    /// List all accounts on this device
    Users,
    /// Manage the saved list
    List {
        #[command(subcommand)]
        action: ListAction,
    },
    /// Show watch history
    History,
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Play a title headlessly
    Watch {
        /// Title id
        title: String,
        /// Episode id (defaults to the first episode)
        #[arg(short, long)]
        episode: Option<String>,
        /// Seconds of playback to simulate
        #[arg(short, long, default_value_t = 30.0)]
        seconds: f64,
        /// Playback speed (0.5, 1, 1.5 or 2)
        #[arg(short, long, default_value_t = 1.0)]
        rate: f64,
        /// Jump past the intro once it is offered
        #[arg(long)]
        skip_intro: bool,
    },
}

#[derive(Subcommand)]
enum ListAction {
    /// Show saved titles
    Show,
    /// Save a title
    Add { title: String },
    /// Remove a saved title
    Remove { title: String },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Show the home rails
    Home,
    /// Search titles
    Search { query: String },
    /// Show a title's seasons and episodes
    Show { title: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "animagery=info,animagery_cli=info,animagery_storage=info,animagery_catalog=info"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = AppConfig::load(cli.config.as_deref())?;
    config.validate()?;

    let mut app = App::from_config(config).context("Failed to open local storage")?;

    match cli.command {
        Commands::Register {
            email,
            username,
            password,
        } => {
            let profile = app.session.register(&email, &username, &password).await?;
            tracing::info!(user_id = %profile.id, "Registered");
            println!("Welcome, {}!", profile.username);
        }
        Commands::Login { email, password } => {
            let profile = app.session.login(&email, &password).await?;
            tracing::info!(user_id = %profile.id, "Logged in");
            println!("Signed in as {}", profile.username);
        }
        Commands::Logout => {
            app.session.logout();
            println!("Signed out");
        }
        Commands::Whoami => match app.session.current() {
            Some(profile) => println!("{}", describe_profile(profile)),
            None => println!("Not signed in"),
        },
        Commands::Users => {
            for profile in app.session.accounts()? {
                println!("{}  {} <{}>", profile.id, profile.username, profile.email);
            }
        }
        Commands::List { action } => list(&mut app, action).await?,
        Commands::History => {
            let Some(profile) = app.session.current() else {
                bail!("Sign in to see your history");
            };
            if profile.history.is_empty() {
                println!("Nothing watched yet");
            }
            for title in &profile.history {
                println!("{}", describe_title(title));
            }
        }
        Commands::Catalog { action } => catalog(&app, action).await?,
        Commands::Watch {
            title,
            episode,
            seconds,
            rate,
            skip_intro,
        } => watch(&mut app, &title, episode.as_deref(), seconds, rate, skip_intro).await?,
    }

    Ok(())
}

async fn list(
    app: &mut App<animagery_storage::JsonFileStore, animagery_catalog::GeminiClient>,
    action: ListAction,
) -> anyhow::Result<()> {
    match action {
        ListAction::Show => {
            let Some(profile) = app.session.current() else {
                bail!("Sign in to see your list");
            };
            if profile.my_list.is_empty() {
                println!("Your list is empty");
            }
            for title in &profile.my_list {
                println!("{}", describe_title(title));
            }
        }
        ListAction::Add { title } => {
            let title = app.resolve_title(&title).await?;
            let name = title.title.clone();
            app.session.add_to_list(title)?;
            println!("Added {} to your list", name);
        }
        ListAction::Remove { title } => {
            if !app.session.is_in_list(&title) {
                println!("{} is not in your list", title);
                return Ok(());
            }
            app.session.remove_from_list(&title)?;
            println!("Removed {} from your list", title);
        }
    }

    Ok(())
}

async fn catalog(
    app: &App<animagery_storage::JsonFileStore, animagery_catalog::GeminiClient>,
    action: CatalogAction,
) -> anyhow::Result<()> {
    match action {
        CatalogAction::Home => {
            for category in app.catalog.home().await {
                println!("== {} ==", category.title);
                for title in &category.items {
                    let saved = if app.session.is_in_list(&title.id) { "✓" } else { " " };
                    println!("{} {}", saved, describe_title(title));
                }
                println!();
            }
        }
        CatalogAction::Search { query } => {
            let results = app.catalog.search(&query).await;
            if results.is_empty() {
                println!("No results for \"{}\"", query);
            }
            for title in &results {
                println!("{}", describe_title(title));
            }
        }
        CatalogAction::Show { title } => {
            let title = app.resolve_title(&title).await?;
            println!("{}", describe_title(&title));
            if !title.description.is_empty() {
                println!("{}", title.description);
            }
            for season in title.seasons() {
                println!("Season {}", season);
                for episode in title.episodes_in_season(season) {
                    println!(
                        "  {:<10} E{:<3} {}  {}",
                        episode.id,
                        episode.number,
                        episode.title,
                        episode.duration.as_deref().unwrap_or("")
                    );
                }
            }
        }
    }

    Ok(())
}

async fn watch(
    app: &mut App<animagery_storage::JsonFileStore, animagery_catalog::GeminiClient>,
    title_id: &str,
    episode_id: Option<&str>,
    seconds: f64,
    rate: f64,
    skip_intro: bool,
) -> anyhow::Result<()> {
    let Some(rate) = PlaybackRate::from_f64(rate) else {
        bail!("Unsupported playback rate {} (use 0.5, 1, 1.5 or 2)", rate);
    };

    let title = app.resolve_title(title_id).await?;
    let episode = pick_episode(&title, episode_id)?;
    let player_config = app.config.player_config();
    let intro_start = player_config.intro.start_secs;

    let mut session = WatchSession::start(&mut app.session, title, episode.as_ref(), player_config)?;
    session.player_mut().set_playback_rate(rate);

    println!(
        "▶ {}{}",
        session.title().title,
        episode
            .as_ref()
            .map(|e| format!(" - S{}E{} {}", e.season, e.number, e.title))
            .unwrap_or_default()
    );

    let mut events = Vec::new();
    if skip_intro {
        let wall_to_intro = (intro_start / rate.as_f64()).min(seconds);
        events.extend(session.run_for(wall_to_intro, 1.0));
        if session.player_mut().skip_intro() {
            println!("⏭ Skipped intro");
        }
        events.extend(session.pump());
        events.extend(session.run_for(seconds - wall_to_intro, 1.0));
    } else {
        events.extend(session.run_for(seconds, 1.0));
    }

    for event in &events {
        match event {
            PlayerEvent::Unplayable { message } => println!("✗ {}", message),
            PlayerEvent::StateChanged { phase } => tracing::debug!(?phase, "Phase"),
            _ => {}
        }
    }

    let state = session.finish();
    println!(
        "■ {} at {}x",
        describe_position(state.current_time_secs, state.duration_secs),
        state.playback_rate.as_f64()
    );

    Ok(())
}
