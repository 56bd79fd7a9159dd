//! nctable - Page through multi-dimensional netCDF variables as a flat table.

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use nctable::app::{default_selection, App};
use nctable::config::ViewerConfig;
use nctable::data::{ArraySource, NetcdfSource};
use nctable::dump;
use nctable::table::{Calendar, PagedTable};
use nctable::ui;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{self, Write};
use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Mutex;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "nctable")]
#[command(about = "Page through netCDF variables as a flat table", long_about = None)]
struct Args {
    /// Path to the NetCDF file to open
    file: PathBuf,

    /// Variables to show; all must share the same dimensions
    variables: Vec<String>,

    /// Rows per page
    #[arg(long)]
    page_size: Option<usize>,

    /// Page to start on (with --dump, 0 prints every row)
    #[arg(long, default_value_t = 1)]
    page: usize,

    /// Calendar for time variables without a calendar attribute
    #[arg(long)]
    calendar: Option<Calendar>,

    /// List the variables in the file and exit
    #[arg(long)]
    list: bool,

    /// Print the page as tab-separated text and exit
    #[arg(long)]
    dump: bool,

    /// Enable logging to specified file
    #[arg(long)]
    log: Option<PathBuf>,
}

impl Args {
    fn config(&self) -> ViewerConfig {
        let mut config = ViewerConfig::default();
        if let Some(page_size) = self.page_size {
            config = config.with_page_size(page_size);
        }
        if let Some(calendar) = self.calendar {
            config = config.with_default_calendar(calendar);
        }
        config
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Set up logging if --log option is provided
    if let Some(log_path) = &args.log {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(log_path)
            .with_context(|| format!("Failed to open log file {}", log_path.display()))?;
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        let subscriber = FmtSubscriber::builder()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .finish();
        tracing::subscriber::set_global_default(subscriber)?;
        tracing::info!("Starting nctable");
    }

    if !args.file.exists() {
        eprintln!("Error: Path not found: {}", args.file.display());
        std::process::exit(1);
    }

    let source: Rc<dyn ArraySource> = Rc::new(NetcdfSource::open(&args.file)?);
    let config = args.config();

    let res = if args.list {
        list(source.as_ref())
    } else {
        let selection = if args.variables.is_empty() {
            match default_selection(&source.variables()?) {
                Some(name) => vec![name],
                None => bail!("No variables in {}", args.file.display()),
            }
        } else {
            args.variables.clone()
        };
        if args.dump {
            dump_table(Rc::clone(&source), &config, &selection, args.page)
        } else {
            interactive(Rc::clone(&source), config, selection, args.page)
        }
    };

    source.close();
    if args.log.is_some() {
        tracing::info!("nctable exited");
    }
    res
}

fn list(source: &dyn ArraySource) -> Result<()> {
    let mut out = io::stdout().lock();
    dump::write_variables(source, &mut out)?;
    out.flush()?;
    Ok(())
}

fn dump_table(
    source: Rc<dyn ArraySource>,
    config: &ViewerConfig,
    selection: &[String],
    page: usize,
) -> Result<()> {
    let mut table = PagedTable::new(source, config);
    table.fill(selection)?;
    let mut out = io::stdout().lock();
    if page == 0 {
        dump::write_table(table.view(), &mut out)?;
    } else {
        table.pager_mut().set_page_number(page);
        dump::write_page(&table, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

fn interactive(
    source: Rc<dyn ArraySource>,
    config: ViewerConfig,
    selection: Vec<String>,
    page: usize,
) -> Result<()> {
    let mut app = App::new(source, config, selection);
    if page > 1 {
        app.goto_page(page);
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    app.close();
    res
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match (key.modifiers, key.code) {
                    // Quit
                    (KeyModifiers::NONE, KeyCode::Char('q'))
                    | (KeyModifiers::NONE, KeyCode::Esc) => return Ok(()),

                    // Pages
                    (KeyModifiers::NONE, KeyCode::Char('n'))
                    | (KeyModifiers::NONE, KeyCode::Right)
                    | (KeyModifiers::NONE, KeyCode::PageDown) => app.next_page(),
                    (KeyModifiers::NONE, KeyCode::Char('p'))
                    | (KeyModifiers::NONE, KeyCode::Left)
                    | (KeyModifiers::NONE, KeyCode::PageUp) => app.previous_page(),
                    (KeyModifiers::NONE, KeyCode::Char(']')) => app.advance_pages(10),
                    (KeyModifiers::NONE, KeyCode::Char('[')) => app.advance_pages(-10),
                    (KeyModifiers::NONE, KeyCode::Char('g'))
                    | (KeyModifiers::NONE, KeyCode::Home) => app.first_page(),
                    (KeyModifiers::SHIFT, KeyCode::Char('G'))
                    | (KeyModifiers::NONE, KeyCode::Char('G'))
                    | (KeyModifiers::NONE, KeyCode::End) => app.last_page(),

                    // Rows and columns
                    (KeyModifiers::NONE, KeyCode::Up)
                    | (KeyModifiers::NONE, KeyCode::Char('k')) => app.cursor_up(),
                    (KeyModifiers::NONE, KeyCode::Down)
                    | (KeyModifiers::NONE, KeyCode::Char('j')) => app.cursor_down(),
                    (KeyModifiers::NONE, KeyCode::Char('h')) => app.scroll_left(),
                    (KeyModifiers::NONE, KeyCode::Char('l')) => app.scroll_right(),

                    (KeyModifiers::SHIFT, KeyCode::Char('T'))
                    | (KeyModifiers::NONE, KeyCode::Char('T')) => app.cycle_theme(),

                    _ => {},
                }
            }
        }
    }
}
