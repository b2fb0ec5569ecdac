use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, layout::Rect, Terminal};
use std::collections::hash_map::DefaultHasher;
use std::fs;
use std::hash::{Hash, Hasher};
use std::io;
use std::path::Path;

use locscope::cli::Cli;
use locscope::config::Config;
use locscope::input::{map_key_to_intent, map_mouse_to_intent};
use locscope::model::{Export, LineEdit, SummaryStats, aggregate_commits};
use locscope::repository::{origin_url, BlameScanner, Database, NoStore};
use locscope::view::{render_files, render_narrative, render_timeline};
use locscope::viewmodel::{Action, AppViewModel, ViewMode};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // A failed load leaves the views empty rather than aborting
    let edits = match load_edits(&cli).await {
        Ok(edits) => edits,
        Err(err) => {
            eprintln!("Could not load history: {:#}", err);
            Vec::new()
        }
    };

    let origin = origin_url(&cli.repo_path);
    let config = Config::from_cli(&cli, origin.as_deref());

    if cli.json {
        let commits = aggregate_commits(&edits, &config.url_base);
        let stats = SummaryStats::compute(&edits, &commits);
        println!("{}", Export::new(&commits, &stats).to_json()?);
        return Ok(());
    }

    let mut app = AppViewModel::new(&edits, &config);
    run_tui(&mut app)
}

/// Blame the repository, going through the index cache unless told not to
async fn load_edits(cli: &Cli) -> Result<Vec<LineEdit>> {
    let scanner = if cli.profile {
        BlameScanner::profiling(&cli.repo_path)
    } else if cli.quiet {
        BlameScanner::quiet(&cli.repo_path)
    } else {
        BlameScanner::new(&cli.repo_path)
    };
    let scanner = scanner.with_uncommitted(cli.uncommitted);

    if cli.no_cache || cli.uncommitted {
        return scanner.scan(&NoStore).await;
    }

    let db_path = index_path(&cli.repo_path)?;
    if !cli.quiet {
        eprintln!("Using index: {}", db_path);
    }
    let db = Database::new(&db_path).await?;
    db.init_schema().await?;
    scanner.scan(&db).await
}

/// Cache file unique to the repository's absolute path
fn index_path(repo_path: &Path) -> Result<String> {
    let cache_dir = dirs::cache_dir()
        .context("Could not determine cache directory")?
        .join("locscope");
    fs::create_dir_all(&cache_dir)?;

    let abs_repo_path = fs::canonicalize(repo_path)
        .with_context(|| format!("Could not resolve path: {}", repo_path.display()))?;
    let repo_name = abs_repo_path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("repo");
    let mut hasher = DefaultHasher::new();
    abs_repo_path.hash(&mut hasher);
    let db_path = cache_dir.join(format!("{}_{:016x}.db", repo_name, hasher.finish()));

    db_path
        .to_str()
        .map(str::to_string)
        .context("Invalid path encoding")
}

fn run_tui(app: &mut AppViewModel) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    // Cleanup runs even when the loop failed
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut AppViewModel) -> Result<()> {
    // Where the scatter canvas was last drawn, for mapping mouse cells
    let mut plot = Rect::default();

    loop {
        terminal.draw(|f| {
            let area = f.area();
            match app.view_mode() {
                ViewMode::Timeline => plot = render_timeline(f, &app.timeline_vm, area),
                ViewMode::Narrative => render_narrative(f, &app.narrative_vm, &app.timeline_vm, area),
                ViewMode::Files => render_files(f, app.files_vm(), area),
            }
        })?;

        let intent = match event::read()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => map_key_to_intent(&key, app.view_mode()),
            Event::Mouse(mouse) => map_mouse_to_intent(&mouse, app.view_mode(), plot, app.timeline_vm.area()),
            _ => None,
        };

        if let Some(intent) = intent {
            match app.handle_intent(intent) {
                Action::Quit => break,
                Action::Redraw => {}
            }
        }
    }

    Ok(())
}
