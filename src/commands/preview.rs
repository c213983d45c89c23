use std::rc::Rc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use texview::cli::Cli;
use texview::config::Config;
use texview::domain::ports::PreviewSink;
use texview::{FileMonitor, PdfView, PreviewSession, PreviewSurface, ProcessCompiler, SessionOptions};

use crate::ui::console::ConsoleSink;
use crate::ui::context::UiContext;
use crate::ui::json::JsonSink;

pub fn cmd_preview(cli: &Cli, config: &Config) -> Result<()> {
    let ui = UiContext::new(cli.json, &config.output);

    let compiler = ProcessCompiler::from_config(&config.compiler);
    if !compiler.check_available() {
        warn!(program = %config.compiler.program, "compiler does not answer --version");
    }

    let options = SessionOptions::new(cli.master.clone())
        .with_included(cli.included.clone())
        .with_initial_compile(config.watch.initial_compile)
        .with_poll_interval(config.poll_interval());

    // Set up Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    ctrlc::set_handler(move || {
        running_clone.store(false, Ordering::SeqCst);
    })
    .context("failed to install the Ctrl+C handler")?;

    if cli.json {
        run(options, compiler, config, JsonSink::stdout(), running)
    } else {
        let label = std::iter::once(config.compiler.program.as_str())
            .chain(config.compiler.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        run(options, compiler, config, ConsoleSink::stdout(ui, label), running)
    }
}

fn run<S: PreviewSink + 'static>(
    options: SessionOptions,
    compiler: ProcessCompiler,
    config: &Config,
    sink: S,
    running: Arc<AtomicBool>,
) -> Result<()> {
    let surface = PreviewSurface::new(PdfView::new(), sink, &config.compiler.output_extension);
    let mut monitor = FileMonitor::new().context("cannot start the file watcher")?;

    let session = PreviewSession::start(&options, Rc::new(compiler), surface, &mut monitor)
        .with_context(|| format!("cannot preview {}", options.master.display()))?;

    session.run(&mut monitor, running);
    info!("preview stopped");
    Ok(())
}
