// ============================================================================
// Morkan - Suivi des cryptomonnaies dans le terminal
// ============================================================================
// Programme TUI : classement du marché, détail d'une entrée, actualités.
// Les appels API tournent sur un worker thread, l'interface ne gèle jamais.
//
// CONCEPTS RUST CLÉS :
// 1. Terminal raw mode : contrôle total du terminal
// 2. Event loop : rendu, entrée, mise à jour
// 3. Async dans sync : runtime tokio possédé par le worker thread
// 4. Channels mpsc : commandes vers le worker, résultats vers l'UI
// ============================================================================

use std::io;
use std::path::Path;
use std::sync::mpsc;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing::{debug, error, info, warn};

use morkan::api::ApiClients;
use morkan::app::App;
use morkan::config::Config;
use morkan::ui::{render, EventHandler};
use morkan::worker::{spawn_worker, AppCommand, AppResult};

// ============================================================================
// Logging
// ============================================================================
// Le terminal appartient à l'interface : les logs vont dans un fichier.
// ============================================================================

/// Initialise le système de logging vers fichier
///
/// CONCEPT RUST : Tracing subscriber
/// - Registry : point central des logs
/// - EnvFilter : filtre par niveau (RUST_LOG env var)
/// - RollingFileAppender : un fichier par jour
///
/// # Utilisation
/// ```bash
/// tail -f ~/.local/share/morkan/logs/morkan.log.*
/// RUST_LOG=morkan=trace morkan
/// ```
fn init_logging(log_dir: &Path) -> Result<()> {
    use tracing_appender::rolling::{RollingFileAppender, Rotation};
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    std::fs::create_dir_all(log_dir).context("Échec de la création du répertoire de logs")?;

    let file_appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "morkan.log");

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(file_appender)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_line_number(true),
        )
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "morkan=debug,info".into()),
        )
        .try_init()
        .context("Échec de l'initialisation du subscriber")?;

    info!(?log_dir, "Logging initialisé");
    Ok(())
}

// ============================================================================
// Point d'entrée du programme
// ============================================================================

fn main() -> Result<()> {
    let config = Config::parse();

    // Si init échoue, on continue sans logs
    if let Err(e) = init_logging(&config.log_dir()) {
        eprintln!("Warning: Failed to initialize logging: {:#}", e);
        eprintln!("   Continuing without logging...");
    }

    info!(
        coingecko_url = %config.coingecko_url,
        newsapi_url = %config.newsapi_url,
        refresh_secs = config.refresh_secs,
        "Morkan starting up"
    );
    if config.uses_placeholder_key() {
        warn!("No NewsAPI key configured, news requests will fail and show the sample article");
    }

    // Tout ce qui peut échouer avant la prise du terminal
    let runtime = tokio::runtime::Runtime::new().context("Échec de la création du runtime tokio")?;
    let clients = ApiClients::from_config(&config)?;

    // CONCEPT RUST : mpsc channels
    // - command_tx/rx : UI -> worker
    // - result_tx/rx : worker -> UI
    let (command_tx, command_rx) = mpsc::channel::<AppCommand>();
    let (result_tx, result_rx) = mpsc::channel::<AppResult>();

    info!("Spawning background worker thread");
    let worker = spawn_worker(runtime, clients, command_rx, result_tx);

    debug!("Setting up terminal");
    let mut terminal = setup_terminal()?;

    let mut app = App::with_refresh_interval(config.refresh_interval());
    dispatch(&command_tx, app.start());

    let events = EventHandler::new();

    info!("Starting event loop");
    let result = run(&mut terminal, &mut app, &events, &command_tx, &result_rx);

    // Restaure le terminal (même en cas d'erreur)
    debug!("Restoring terminal");
    restore_terminal(&mut terminal)?;

    // Ferme le channel : le worker termine sa requête en cours puis s'arrête
    drop(command_tx);
    if worker.join().is_err() {
        error!("Worker thread panicked");
    }

    match &result {
        Ok(_) => info!("Application exited normally"),
        Err(e) => error!(error = ?e, "Application exited with error"),
    }

    result
}

// ============================================================================
// Event loop
// ============================================================================

/// Boucle principale : résultats, rendu, entrée, mise à jour
///
/// CONCEPT : Non-blocking receive avec try_recv
/// - Ok(result) : appliqué à l'écran concerné
/// - Err(Empty) : rien à faire
/// - Err(Disconnected) : worker mort, l'UI continue sans lui
fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
    command_tx: &mpsc::Sender<AppCommand>,
    result_rx: &mpsc::Receiver<AppResult>,
) -> Result<()> {
    let mut worker_alive = true;

    while app.is_running() {
        // 0. RÉSULTATS
        loop {
            match result_rx.try_recv() {
                Ok(result) => app.apply_result(result),
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    if worker_alive {
                        error!("Worker thread disconnected");
                        worker_alive = false;
                    }
                    break;
                }
            }
        }

        // 1. RENDER
        // La zone du rendu sert au hit-test des clics
        let viewport = terminal.draw(|frame| render(frame, app))?.area;

        // 2. INPUT
        match events.next() {
            Ok(event) => {
                if let Some(command) = app.handle_event(&event, viewport) {
                    dispatch(command_tx, command);
                }
            }
            Err(e) => warn!(error = %e, "Failed to read terminal event"),
        }

        // 3. UPDATE
        if let Some(command) = app.tick(Instant::now()) {
            dispatch(command_tx, command);
        }
    }

    Ok(())
}

/// Envoie une commande au worker
fn dispatch(command_tx: &mpsc::Sender<AppCommand>, command: AppCommand) {
    debug!(?command, "Dispatching command");
    if let Err(e) = command_tx.send(command) {
        error!(command = ?e.0, "Failed to send command to worker");
    }
}

// ============================================================================
// Terminal
// ============================================================================

/// Configure le terminal en mode TUI
///
/// CONCEPT : Raw mode + alternate screen + capture souris
/// - Les clics gauches servent de "tap" sur les cartes et le bouton
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(|e| e.into())
}

/// Restaure le terminal à son état normal
///
/// Appelé dans main() même si la boucle a échoué
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}
