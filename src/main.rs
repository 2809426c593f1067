mod app;
mod blueprints;
mod input;
mod log;
mod ui;

use std::io::{stdout, IsTerminal};
use std::path::Path;
use std::sync::mpsc::{self, Receiver};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use app::{App, Dispatcher, Message};
use blueprints::{BlueprintsApi, BlueprintsClient, Config, Flags};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use input::{handle_key, Action};
use ratatui::prelude::CrosstermBackend;
use ratatui::Terminal;

const DEBUG_LOG: &str = "debug.log";
const TICK_RATE: Duration = Duration::from_millis(100);

#[derive(Parser, Debug)]
#[command(
    name = "blueprints-tui",
    version,
    about = "Browse Blueprints stacks, resources, operations and logs"
)]
struct Cli {
    /// Auth token (default: SANITY_AUTH_TOKEN, then the Sanity CLI login)
    #[arg(long)]
    token: Option<String>,

    /// Organization ID to scope to, skipping the scope picker
    #[arg(long)]
    org: Option<String>,

    /// Project ID to scope to, skipping the scope picker
    #[arg(long)]
    project: Option<String>,

    /// API base URL (default: https://api.sanity.io)
    #[arg(long)]
    api_url: Option<String>,

    /// Use the staging API and staging CLI login
    #[arg(long)]
    staging: bool,

    /// Write request and navigation logs to ./debug.log
    #[arg(long)]
    debug: bool,
}

impl Cli {
    fn flags(&self) -> Flags {
        Flags {
            token: self.token.clone(),
            org: self.org.clone(),
            project: self.project.clone(),
            api_url: self.api_url.clone(),
            staging: self.staging,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        log::init(Path::new(DEBUG_LOG)).with_context(|| format!("opening {}", DEBUG_LOG))?;
    }

    let config = match Config::load(&cli.flags()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    tlog!(
        info,
        "api {} token {} scope {:?}",
        config.api_url,
        log::mask(&config.token),
        config.scope
    );

    if !stdout().is_terminal() {
        eprintln!("Error: blueprints-tui requires an interactive terminal (TTY).");
        std::process::exit(1);
    }

    let runtime = tokio::runtime::Runtime::new().context("starting background runtime")?;
    let api: Arc<dyn BlueprintsApi> = Arc::new(BlueprintsClient::new(&config));
    let (tx, rx) = mpsc::channel();
    let dispatcher = Dispatcher::new(Arc::clone(&api), runtime.handle().clone(), tx);

    let (width, height) = crossterm::terminal::size()?;
    let mut app = App::new(api, config.scope.clone(), width, height);
    dispatcher.dispatch(app.init());

    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout());
    let mut terminal = Terminal::new(backend)?;

    let result = run_loop(&mut terminal, &mut app, &dispatcher, &rx);

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    // In-flight requests are abandoned rather than awaited.
    runtime.shutdown_background();
    tlog!(info, "exit");
    result
}

fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
    dispatcher: &Dispatcher,
    rx: &Receiver<Message>,
) -> Result<()> {
    let mut last_tick = Instant::now();
    let mut needs_draw = true;

    loop {
        while let Ok(msg) = rx.try_recv() {
            app.handle_message(msg);
            needs_draw = true;
        }

        if needs_draw {
            terminal.draw(|f| ui::render(f, app))?;
            needs_draw = false;
        }

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) => {
                    let action = handle_key(&key, app.is_filtering());
                    if action != Action::None {
                        let commands = app.handle_action(action);
                        dispatcher.dispatch(commands);
                        needs_draw = true;
                    }
                }
                Event::Resize(cols, rows) => {
                    app.resize(cols, rows);
                    needs_draw = true;
                }
                _ => {}
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            if app.tick() {
                needs_draw = true;
            }
            last_tick = Instant::now();
        }

        if app.should_quit() {
            break;
        }
    }

    Ok(())
}
