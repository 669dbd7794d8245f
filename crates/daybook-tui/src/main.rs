use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use daybook_core::config::CoreConfig;
use daybook_core::runtime::CoreRuntime;
use daybook_core::tracing_setup::init_tracing;
use daybook_tui::runtime::run_app;
use daybook_tui::ui::{self, App};

/// Journal entries and todos in the terminal.
#[derive(Parser, Debug)]
#[command(name = "daybook", version, about)]
struct Args {
    /// Directory holding entries.json and todos.json [default: ~/.daybook]
    #[arg(long, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    /// Log file [default: <data dir>/daybook.log]
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match args.data_dir {
        Some(dir) => CoreConfig::new(dir),
        None => CoreConfig::default(),
    };
    let log_path = args.log_file.unwrap_or_else(|| config.log_path());
    if let Err(e) = init_tracing(&log_path, args.verbose) {
        eprintln!("Warning: logging disabled ({}): {}", log_path.display(), e);
    }
    tracing::info!(data_dir = %config.data_dir.display(), "starting daybook");

    // Restore the terminal before the panic message is printed
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = crossterm::terminal::disable_raw_mode();
        let _ = crossterm::execute!(
            std::io::stdout(),
            crossterm::terminal::LeaveAlternateScreen
        );
        eprintln!("\n\n=== PANIC ===");
        eprintln!("{}", panic_info);
        eprintln!("=============\n");
        original_hook(panic_info);
    }));

    let mut core_runtime = CoreRuntime::new(config)?;
    let handle = core_runtime.handle();
    let event_rx = core_runtime
        .take_event_rx()
        .ok_or_else(|| anyhow::anyhow!("Core runtime already has an active event receiver"))?;

    let mut app = App::new();
    let mut terminal = ui::init_terminal()?;

    let result = run_app(&mut terminal, &mut app, handle, event_rx).await;

    core_runtime.shutdown();
    ui::restore_terminal()?;

    if let Err(err) = result {
        tracing::error!("exited with error: {}", err);
        eprintln!("Error: {err}");
    }
    tracing::info!("daybook stopped");

    Ok(())
}
