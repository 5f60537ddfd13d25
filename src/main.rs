mod ui;

use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use keysmash::{
    app_dirs::AppDirs,
    config::{Config, ConfigStore, FileConfigStore},
    input,
    language::{CyclingWords, Language, WordSource},
    logging,
    runtime::{AppEvent, CrosstermEventSource, FixedTicker, Runner},
    session::Session,
    KeysmashError,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
};
use tracing::{info, warn};

/// timed typing trial: type the words before the clock runs out
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A timed typing trial. Type the stream of words, press space after each one, and see your words per minute and accuracy when the clock runs out."
)]
pub struct Cli {
    /// number of seconds to run the trial (overrides the saved preference)
    #[clap(short = 's', long, value_parser = clap::value_parser!(u32).range(1..))]
    number_of_secs: Option<u32>,

    /// word list to pull words from, e.g. english or english200
    #[clap(short = 'l', long)]
    language: Option<String>,

    /// custom passage to type instead of random words, repeated in order
    #[clap(short = 'p', long)]
    prompt: Option<String>,

    /// write logs to this file instead of the state directory
    #[clap(long)]
    log_file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of the saved preferences.
    fn settings(&self, stored: Config) -> Config {
        Config {
            duration_secs: self.number_of_secs.unwrap_or(stored.duration_secs),
            language: self.language.clone().unwrap_or(stored.language),
        }
    }

    fn word_source(&self, config: &Config) -> keysmash::Result<Box<dyn WordSource>> {
        match &self.prompt {
            Some(prompt) => CyclingWords::from_passage(prompt)
                .map(|words| Box::new(words) as Box<dyn WordSource>)
                .ok_or_else(|| KeysmashError::EmptyCorpus("prompt".to_string())),
            None => Ok(Box::new(Language::new(&config.language)?)),
        }
    }
}

pub struct App {
    pub session: Session<Box<dyn WordSource>>,
    /// Settings for this run, command line overrides included.
    pub config: Config,
    store: Box<dyn ConfigStore>,
}

impl App {
    pub fn new(
        session: Session<Box<dyn WordSource>>,
        config: Config,
        store: Box<dyn ConfigStore>,
    ) -> Self {
        Self {
            session,
            config,
            store,
        }
    }

    /// Start over with fresh words, keeping the current duration.
    pub fn restart(&mut self) {
        self.session.reset();
    }

    /// Move to the next offered duration and remember it.
    pub fn cycle_duration(&mut self) {
        let next = self.config.next_duration();
        if let Err(err) = self.session.set_duration(next) {
            warn!(error = %err, "duration change rejected");
            return;
        }
        self.config.duration_secs = next;

        // only the duration is remembered; other overrides last one run
        let mut stored = self.store.load();
        stored.duration_secs = next;
        if let Err(err) = self.store.save(&stored) {
            warn!(error = %err, "could not save preferences");
        }
    }

    /// Handle one key press. Returns false when the app should quit.
    pub fn on_key(&mut self, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Esc => return false,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => return false,
            KeyCode::Enter => self.restart(),
            KeyCode::Tab => self.cycle_duration(),
            _ => {
                input::route(&mut self.session, &key);
            }
        }
        true
    }
}

fn startup_error_message(err: &KeysmashError) -> String {
    match err {
        KeysmashError::UnknownLanguage(_) => {
            format!("{err} (available: {})", Language::available().join(", "))
        }
        _ => err.to_string(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    if let Some(path) = cli.log_file.clone().or_else(AppDirs::log_path) {
        // the trial runs fine without a log
        if let Err(err) = logging::init(&path) {
            eprintln!("keysmash: logging disabled: {err}");
        }
    }

    let store = FileConfigStore::new();
    let config = cli.settings(store.load());
    let session = match cli
        .word_source(&config)
        .and_then(|source| Session::new(source, config.duration_secs))
    {
        Ok(session) => session,
        Err(err) => {
            let mut cmd = Cli::command();
            cmd.error(ErrorKind::InvalidValue, startup_error_message(&err))
                .exit();
        }
    };
    info!(
        duration_secs = config.duration_secs,
        language = %config.language,
        "starting keysmash"
    );

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, config, Box::new(store));
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui(app, f))?;

    loop {
        match runner.step() {
            AppEvent::Tick(elapsed) => {
                // the screen only changes on a tick while the clock runs
                if app.session.is_running() {
                    app.session.on_tick(elapsed);
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            AppEvent::Resize => {
                terminal.draw(|f| ui(app, f))?;
            }
            AppEvent::Key(key) => {
                let was_running = app.session.is_running();
                if !app.on_key(key) {
                    break;
                }
                if !was_running && app.session.is_running() {
                    runner.restart_tick();
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &mut App, f: &mut Frame) {
    f.render_widget(&*app, f.area());
}
