use color_eyre::eyre::eyre;
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures_util::StreamExt;
use tracing_subscriber::EnvFilter;

use toebeans::api::ToeBeansClient;
use toebeans::app::App;
use toebeans::session::{Session, SessionStore};
use toebeans::terminal::{self, Tui};
use toebeans::{config, input, ui};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Send tracing output to a file under the data dir; stdout belongs to
/// the TUI. Logging is best-effort: failing to open the file only means
/// no logs.
fn init_tracing() {
    let path = match config::log_file_path() {
        Some(p) => p,
        None => return,
    };
    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    let file = match std::fs::OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(_) => return,
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("toebeans=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(file)
        .with_ansi(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    if std::env::args().any(|arg| arg == "--version") {
        println!("toebeans {}", VERSION);
        return Ok(());
    }

    color_eyre::install()?;
    terminal::install_panic_hook();
    init_tracing();

    let store =
        SessionStore::new().ok_or_else(|| eyre!("could not determine the home directory"))?;
    let session = Session::load(store);
    let client = ToeBeansClient::new();
    tracing::info!(base_url = client.base_url(), "starting");

    let mut app = App::new(client, session);
    let mut tui = terminal::init()?;
    let result = run(&mut tui, &mut app).await;
    terminal::restore();
    result
}

/// The event loop: redraw when dirty, then wait for a key press, a
/// network completion, or the animation tick.
async fn run(terminal: &mut Tui, app: &mut App) -> Result<()> {
    let mut events = EventStream::new();
    let mut message_rx = app
        .message_rx
        .take()
        .ok_or_else(|| eyre!("message receiver already taken"))?;

    loop {
        if app.needs_redraw {
            terminal.draw(|frame| ui::render(frame, app))?;
            app.needs_redraw = false;
        }

        let timeout = tokio::time::sleep(std::time::Duration::from_millis(100));
        tokio::select! {
            _ = timeout => {
                app.tick();
            }
            message = message_rx.recv() => {
                if let Some(message) = message {
                    app.handle_message(message);
                }
            }
            event = events.next() => {
                match event {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        input::handle_key(app, key);
                    }
                    Some(Ok(Event::Resize(_, _))) => {
                        app.mark_dirty();
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        tracing::warn!(error = %e, "terminal event error");
                    }
                    None => return Ok(()),
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
