use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    event::{KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    fs,
    io::{self, stdin},
    path::PathBuf,
    time::Duration,
};

use drill::{
    config::{Config, ConfigStore, FileConfigStore},
    drill::Drill,
    runtime::{ChannelEventSource, DrillEvent, Runner, WallClock},
    ui::DrillScreen,
    util::Palette,
    TICK_RATE_MS,
};

/// stamina-gated typing drill tui with per-letter feedback animation
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A typing drill that gates input behind a depleting stamina timer. Toggle typing with the control key, keep the caret moving, and watch each letter settle green after its confirmation delay."
)]
pub struct Cli {
    /// sentence to type; may be given multiple times
    #[clap(short = 'p', long = "sentence")]
    sentences: Vec<String>,

    /// file with one sentence per line
    #[clap(short = 'f', long)]
    sentences_file: Option<PathBuf>,

    /// stamina budget in seconds of typing time
    #[clap(short = 'm', long)]
    max_stamina: Option<f64>,

    /// key that toggles between typing and recharging
    #[clap(short = 't', long)]
    toggle_key: Option<char>,

    /// persist the effective settings as the new defaults
    #[clap(long)]
    save_config: bool,
}

const DEFAULT_SENTENCES: &[&str] = &[
    "the quick brown fox jumps over the lazy dog",
    "pack my box with five dozen liquor jugs",
    "how vexingly quick daft zebras jump",
];

impl Cli {
    /// Overlay CLI arguments on the persisted config.
    fn effective_config(&self, mut cfg: Config) -> Config {
        if let Some(max) = self.max_stamina {
            cfg.max_stamina = max;
        }
        if let Some(key) = self.toggle_key {
            cfg.toggle_key = key;
        }
        if self.sentences_file.is_some() {
            cfg.sentences_file = self.sentences_file.clone();
        }
        cfg
    }
}

fn load_sentences(cli: &Cli, cfg: &Config) -> Result<Vec<String>, Box<dyn Error>> {
    if !cli.sentences.is_empty() {
        return Ok(cli.sentences.clone());
    }
    if let Some(path) = &cfg.sentences_file {
        let text = fs::read_to_string(path)?;
        return Ok(text.lines().map(String::from).collect());
    }
    Ok(DEFAULT_SENTENCES.iter().map(|s| s.to_string()).collect())
}

pub struct App {
    pub drill: Drill,
    pub toggle_key: char,
    pub palette: Palette,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let store = FileConfigStore::new();
    let cfg = cli.effective_config(store.load());
    if !cfg.max_stamina.is_finite() || cfg.max_stamina <= 0.0 {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::InvalidValue, "max stamina must be a positive number")
            .exit();
    }
    if cli.save_config {
        store.save(&cfg)?;
    }

    let sentences = load_sentences(&cli, &cfg)?;
    let drill = Drill::new(sentences, cfg.max_stamina)?;
    let app = App {
        drill,
        toggle_key: cfg.toggle_key,
        palette: Palette::default(),
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        ChannelEventSource::spawn_crossterm(),
        Duration::from_millis(TICK_RATE_MS),
        WallClock::new(),
    );

    loop {
        terminal.draw(|f| {
            f.render_widget(
                DrillScreen {
                    drill: &app.drill,
                    toggle_key: app.toggle_key,
                    palette: app.palette,
                },
                f.area(),
            )
        })?;

        // Timer and animations advance before any key in this frame is
        // processed, so a render never shows a half-applied state.
        match runner.step() {
            DrillEvent::Tick(dt) => app.drill.on_tick(dt),
            DrillEvent::Resize => {}
            DrillEvent::Key(key) => match key.code {
                KeyCode::Esc => break,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => break,
                _ if app.drill.has_finished() => break,
                KeyCode::Char(c) if c == app.toggle_key => app.drill.toggle(),
                KeyCode::Char(c) => app.drill.write(c),
                _ => {}
            },
        }
    }

    Ok(())
}
