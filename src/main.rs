// ============================================================================
// Quotefolio - Portfolio personnel dans le terminal
// ============================================================================
// Pages de présentation, export des documents et page Markets avec un
// panel de cotation historique par titre configuré.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : boucle qui gère événements et rendering
// 3. Async dans sync : tokio::runtime::Runtime + block_on pour les appels API
// 4. CLI déclarative : clap derive
// ============================================================================

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::runtime::Runtime;
use tracing::{debug, error, info};

use quotefolio::api::YahooProvider;
use quotefolio::app::App;
use quotefolio::config::PortfolioConfig;
use quotefolio::documents::default_download_dir;
use quotefolio::models::Page;
use quotefolio::panel::render_all;
use quotefolio::ui::{self, events, Event, EventHandler};

// ============================================================================
// Arguments de la ligne de commande
// ============================================================================

/// Portfolio personnel avec cotations historiques
#[derive(Debug, Parser)]
#[command(name = "quotefolio", version, about)]
struct Args {
    /// Fichier de configuration TOML (sinon : configuration utilisateur, puis intégrée)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page affichée au démarrage (id ou libellé, ex: "markets")
    #[arg(short, long, default_value = "home")]
    page: Page,

    /// Répertoire contenant les documents exportables
    #[arg(long, default_value = "assets")]
    assets: PathBuf,

    /// Répertoire de destination des exports
    #[arg(long)]
    download_dir: Option<PathBuf>,

    /// Répertoire des fichiers de log
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Affiche la page Markets en texte brut et quitte
    #[arg(long)]
    once: bool,
}

// ============================================================================
// Initialisation du logging
// ============================================================================
// CONCEPT : Logging dans une app TUI
// - Les println! ne fonctionnent pas une fois le TUI lancé
// - On log vers un fichier à la place, avec rotation quotidienne
// ============================================================================

/// Répertoire de logs par défaut
///
/// - Linux : ~/.local/share/quotefolio/logs
/// - macOS : ~/Library/Application Support/quotefolio/logs
/// - Sinon : ./logs
fn default_log_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|dir| dir.join("quotefolio").join("logs"))
        .unwrap_or_else(|| PathBuf::from("./logs"))
}

/// Initialise le système de logging vers fichier
///
/// ```bash
/// tail -f ~/.local/share/quotefolio/logs/quotefolio.log
/// RUST_LOG=quotefolio=trace quotefolio
/// ```
fn init_logging(log_dir: PathBuf) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(&log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir.clone(), "quotefolio.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_line_number(true),
        )
        .with(
            // RUST_LOG prioritaire, sinon debug pour quotefolio et info pour les dépendances
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quotefolio=debug,info".into()),
        )
        .init();

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_dir.clone().unwrap_or_else(default_log_dir)).unwrap_or_else(|e| {
        eprintln!("⚠️  Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    });

    info!(?args, "Quotefolio starting up");

    let config = PortfolioConfig::resolve(args.config.as_deref())
        .context("Impossible de charger la configuration du portfolio")?;

    // CONCEPT RUST : Exécuter du code async dans du code sync
    // - Un seul runtime pour toute la durée du programme
    // - block_on() bloque jusqu'à ce que les panels soient rendus
    let runtime = Runtime::new().context("Impossible de créer le runtime tokio")?;
    let provider = YahooProvider::new(&config.provider).context("Impossible de créer le client HTTP")?;

    if args.once {
        let requests: Vec<_> = config.tickers.iter().map(|ticker| ticker.request()).collect();
        let outcomes = runtime.block_on(render_all(&provider, &requests));
        for outcome in &outcomes {
            println!("{}", ui::text::outcome_text(outcome));
        }
        return Ok(());
    }

    let download_dir = args.download_dir.unwrap_or_else(default_download_dir);
    let mut app = App::new(config, args.assets, download_dir);
    app.show_page(args.page);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &runtime, &provider);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event Loop
// ============================================================================
// 1. LOAD   : charge les cotations si la page Markets les attend
// 2. RENDER : dessine l'interface
// 3. INPUT  : traite l'événement suivant
// ============================================================================

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    runtime: &Runtime,
    provider: &YahooProvider,
) -> Result<()> {
    while app.is_running() {
        if app.needs_quotes() {
            let requests = app.quote_requests();
            app.start_loading(Some(format!("Chargement de {} cotations...", requests.len())));

            // Un premier rendu pour afficher l'indicateur de chargement
            terminal.draw(|frame| ui::render(frame, &*app))?;

            let outcomes = runtime.block_on(render_all(provider, &requests));
            app.set_quotes(outcomes);
            app.stop_loading();
        }

        terminal.draw(|frame| ui::render(frame, &*app))?;

        match events.next() {
            Ok(event) => handle_event(app, event),
            Err(e) => error!(error = ?e, "Failed to read terminal event"),
        }
    }

    Ok(())
}

// ============================================================================
// Gestion des événements
// ============================================================================

/// Traite un événement et met à jour l'état de l'application
///
/// CONCEPT RUST : if / else if sur des prédicats
/// - Chaque helper de events.rs décrit une intention
/// - Le quit en deux temps est prioritaire sur le reste
fn handle_event(app: &mut App, event: Event) {
    if matches!(event, Event::Tick) {
        return;
    }

    if events::is_quit_event(&event) {
        if app.is_awaiting_quit_confirmation() {
            info!("Quit confirmed");
            app.quit();
        } else {
            app.request_quit();
        }
        return;
    }

    // Toute autre touche annule la demande de quit
    if app.is_awaiting_quit_confirmation() {
        app.cancel_quit();
        return;
    }

    if events::is_escape_event(&event) {
        app.clear_status();
    } else if events::is_up_event(&event) {
        app.navigate_up();
    } else if events::is_down_event(&event) {
        app.navigate_down();
    } else if let Some(page) = events::page_shortcut(&event) {
        app.show_page(page);
    } else if events::is_tab_event(&event) {
        app.next_selection();
    } else if events::is_refresh_event(&event) {
        if app.is_on_markets() {
            app.refresh_quotes();
        }
    } else if events::is_export_event(&event) {
        app.export_selected_document();
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Passe le terminal en mode TUI (raw mode + alternate screen)
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode().context("Impossible d'activer le raw mode")?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("Impossible de créer le terminal")
}

/// Restaure le terminal à son état normal
///
/// Appelé dans main() même si la boucle a échoué.
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
