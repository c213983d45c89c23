//! Tests for the preview surface

use super::*;
use crate::domain::ports::{Compiler, CompilerRun, DocumentSummary};
use crate::error::PreviewError;
use std::fs;
use tempfile::tempdir;

/// View double that reads the artifact's text as its "content" and tracks
/// page and sizing the way a real backend would.
#[derive(Default)]
struct FakeView {
    path: Option<PathBuf>,
    content: String,
    page: usize,
    sizing: SizingMode,
    opens: usize,
}

impl DocumentView for FakeView {
    fn open(&mut self, path: &Path) -> PreviewResult<()> {
        let content =
            fs::read_to_string(path).map_err(|source| PreviewError::ArtifactUnavailable {
                path: path.to_path_buf(),
                source,
            })?;
        self.path = Some(path.to_path_buf());
        self.content = content;
        self.page = 0;
        self.sizing = SizingMode::Free;
        self.opens += 1;
        Ok(())
    }

    fn page(&self) -> usize {
        self.page
    }

    fn set_page(&mut self, page: usize) {
        self.page = page;
    }

    fn set_sizing(&mut self, mode: SizingMode) {
        self.sizing = mode;
    }

    fn summary(&self) -> Option<DocumentSummary> {
        self.path.as_ref().map(|path| DocumentSummary {
            path: path.clone(),
            page: self.page,
            page_count: 10,
            size_bytes: self.content.len() as u64,
            sizing: self.sizing,
        })
    }
}

#[derive(Default)]
struct RecordingSink {
    events: Vec<PreviewEvent>,
    flushes: usize,
    fail_flush: bool,
}

impl RecordingSink {
    fn statuses(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                PreviewEvent::Status { message } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    fn last_status(&self) -> Option<&str> {
        self.statuses().last().copied()
    }
}

impl PreviewSink for RecordingSink {
    fn emit(&mut self, event: PreviewEvent) {
        self.events.push(event);
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flushes += 1;
        if self.fail_flush {
            return Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"));
        }
        Ok(())
    }
}

struct FixedCompiler {
    success: bool,
    output: &'static str,
}

impl Compiler for FixedCompiler {
    fn name(&self) -> &str {
        "fixed"
    }

    fn compile(&self, _source: &Path) -> PreviewResult<CompilerRun> {
        Ok(CompilerRun {
            success: self.success,
            status: Some(if self.success { 0 } else { 1 }),
            output: self.output.to_string(),
        })
    }
}

type TestSurface = PreviewSurface<FakeView, RecordingSink>;

fn surface() -> Rc<RefCell<TestSurface>> {
    PreviewSurface::new(FakeView::default(), RecordingSink::default(), "pdf").into_shared()
}

fn project(dir: &Path) -> (PathBuf, PathBuf, PathBuf) {
    let main = dir.join("paper.tex");
    let chapter = dir.join("intro.tex");
    let pdf = dir.join("paper.pdf");
    fs::write(&main, "\\input{intro}").unwrap();
    fs::write(&chapter, "Hello").unwrap();
    fs::write(&pdf, "rendering v1").unwrap();
    (main, chapter, pdf)
}

fn ok_compiler() -> Rc<dyn Compiler> {
    Rc::new(FixedCompiler {
        success: true,
        output: "",
    })
}

// === add_watched_file / load_rendering ===

#[test]
fn test_add_master_loads_its_rendering() {
    let dir = tempdir().unwrap();
    let (main, _, _) = project(dir.path());
    let surface = surface();

    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    PreviewSurface::add_watched_file(&surface, master.clone()).unwrap();

    let s = surface.borrow();
    assert_eq!(
        s.rendering(),
        Some(rendered_artifact_path(master.path(), "pdf").as_path())
    );
    assert_eq!(s.view().content, "rendering v1");
    assert_eq!(s.view().sizing, SizingMode::BestFit);
    assert_eq!(s.sink().last_status(), Some(LOADED_MESSAGE));
    assert_eq!(s.state(), SurfaceState::Displaying);
    assert_eq!(s.files().len(), 1);
}

#[test]
fn test_add_included_loads_master_rendering() {
    let dir = tempdir().unwrap();
    let (main, chapter, _) = project(dir.path());
    fs::write(dir.path().join("intro.pdf"), "wrong file").unwrap();
    let surface = surface();

    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    let included = WatchedFile::included(&chapter, &master).unwrap();
    PreviewSurface::add_watched_file(&surface, master.clone()).unwrap();
    PreviewSurface::add_watched_file(&surface, included).unwrap();

    let s = surface.borrow();
    assert_eq!(s.view().content, "rendering v1");
    assert!(s.rendering().unwrap().ends_with("paper.pdf"));
    assert_eq!(s.files().len(), 2);
}

#[test]
fn test_load_missing_artifact_fails_to_caller() {
    let dir = tempdir().unwrap();
    let (main, _, pdf) = project(dir.path());
    fs::remove_file(&pdf).unwrap();
    let surface = surface();

    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    let result = PreviewSurface::add_watched_file(&surface, master);

    assert!(matches!(
        result,
        Err(PreviewError::ArtifactUnavailable { .. })
    ));
    assert!(surface.borrow().rendering().is_none());
}

#[test]
fn test_detached_include_is_not_subscribed() {
    let dir = tempdir().unwrap();
    let (main, chapter, _) = project(dir.path());
    let surface = surface();

    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    let included = WatchedFile::included(&chapter, &master).unwrap();
    drop(master);

    let result = PreviewSurface::add_watched_file(&surface, included.clone());
    assert!(matches!(result, Err(PreviewError::DetachedInclude { .. })));

    // Compiling the orphan must not reach the surface
    included.compile();
    let s = surface.borrow();
    assert!(s.files().is_empty());
    assert!(s.sink().events.is_empty());
    assert_eq!(s.state(), SurfaceState::Idle);
}

// === reload_rendering ===

#[test]
fn test_reload_after_success_preserves_page() {
    let dir = tempdir().unwrap();
    let (_, _, pdf) = project(dir.path());
    let mut s = PreviewSurface::new(FakeView::default(), RecordingSink::default(), "pdf");

    s.load_rendering(&pdf).unwrap();
    s.view_mut().set_page(4);
    s.view_mut().set_sizing(SizingMode::FitWidth);

    s.reload_rendering(None).unwrap();

    assert_eq!(s.view().page(), 4);
    assert_eq!(s.view().opens, 2);
    assert_eq!(s.view().sizing, SizingMode::BestFit);
    assert_eq!(s.state(), SurfaceState::Displaying);
}

#[test]
fn test_reload_after_failure_leaves_rendering_untouched() {
    let dir = tempdir().unwrap();
    let (_, _, pdf) = project(dir.path());
    let mut s = PreviewSurface::new(FakeView::default(), RecordingSink::default(), "pdf");

    s.load_rendering(&pdf).unwrap();
    s.view_mut().set_page(4);
    fs::write(&pdf, "rendering v2").unwrap();

    s.reload_rendering(Some("! Undefined control sequence.\nl.3 \\badcmd\n"))
        .unwrap();

    assert_eq!(s.view().page(), 4);
    assert_eq!(s.view().opens, 1);
    assert_eq!(s.view().content, "rendering v1");
    assert_eq!(s.rendering(), Some(pdf.as_path()));
    assert_eq!(s.state(), SurfaceState::ErrorShown);
    assert_eq!(
        s.sink().last_status(),
        Some(
            "<b>An error occurred during the compilation</b>:\n\
             ! Undefined control sequence.\nl.3 \\badcmd\n"
        )
    );
}

#[test]
fn test_reload_without_rendering_is_noop() {
    let mut s = PreviewSurface::new(FakeView::default(), RecordingSink::default(), "pdf");
    s.reload_rendering(None).unwrap();
    assert_eq!(s.view().opens, 0);
    assert!(s.sink().events.is_empty());
}

#[test]
fn test_reload_round_trip_shows_new_content_at_same_path() {
    let dir = tempdir().unwrap();
    let (_, _, pdf) = project(dir.path());
    let mut s = PreviewSurface::new(FakeView::default(), RecordingSink::default(), "pdf");

    s.load_rendering(&pdf).unwrap();
    fs::write(&pdf, "rendering v2").unwrap();
    s.reload_rendering(None).unwrap();

    assert_eq!(s.view().content, "rendering v2");
    assert_eq!(s.rendering(), Some(pdf.as_path()));
}

#[test]
fn test_show_message_flushes_immediately() {
    let mut s = PreviewSurface::new(FakeView::default(), RecordingSink::default(), "pdf");
    s.show_message("<i>hello</i>");
    assert_eq!(s.sink().statuses(), vec!["<i>hello</i>"]);
    assert_eq!(s.sink().flushes, 1);
}

// === listener wiring ===

#[test]
fn test_compile_cycle_shows_reloading_then_reloads() {
    let dir = tempdir().unwrap();
    let (main, _, pdf) = project(dir.path());
    let surface = surface();
    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    PreviewSurface::add_watched_file(&surface, master.clone()).unwrap();
    surface.borrow_mut().view_mut().set_page(3);

    fs::write(&pdf, "rendering v2").unwrap();
    fs::write(&main, "\\input{intro} changed").unwrap();
    assert!(master.on_change_notification().unwrap());

    let s = surface.borrow();
    assert_eq!(s.view().content, "rendering v2");
    assert_eq!(s.view().page(), 3);
    assert_eq!(
        s.sink().statuses(),
        vec![LOADED_MESSAGE, RELOADING_MESSAGE, LOADED_MESSAGE]
    );
    assert!(s.sink().events.contains(&PreviewEvent::CompileStarted));
}

#[test]
fn test_included_change_reloads_once() {
    let dir = tempdir().unwrap();
    let (main, chapter, _) = project(dir.path());
    let surface = surface();
    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    let included = WatchedFile::included(&chapter, &master).unwrap();
    PreviewSurface::add_watched_file(&surface, master.clone()).unwrap();
    PreviewSurface::add_watched_file(&surface, included.clone()).unwrap();
    let opens_before = surface.borrow().view().opens;

    fs::write(&chapter, "Hello again").unwrap();
    assert!(included.on_change_notification().unwrap());

    let s = surface.borrow();
    assert_eq!(s.view().opens, opens_before + 1);
    let started = s
        .sink()
        .events
        .iter()
        .filter(|e| **e == PreviewEvent::CompileStarted)
        .count();
    assert_eq!(started, 1);
}

#[test]
fn test_failed_compile_shows_error_banner() {
    let dir = tempdir().unwrap();
    let (main, _, _) = project(dir.path());
    let surface = surface();
    let compiler: Rc<dyn Compiler> = Rc::new(FixedCompiler {
        success: false,
        output: "This is pdfTeX\n! Missing } inserted.\n<inserted text>\n}\nl.12",
    });
    let master = WatchedFile::master(&main, compiler).unwrap();
    PreviewSurface::add_watched_file(&surface, master.clone()).unwrap();

    master.compile();

    let s = surface.borrow();
    assert_eq!(s.state(), SurfaceState::ErrorShown);
    assert_eq!(s.view().opens, 1);
    assert!(s.sink().events.contains(&PreviewEvent::CompileFailed {
        message: "! Missing } inserted.\n<inserted text>\n}".to_string()
    }));
}

#[test]
fn test_reload_failure_is_shown_not_raised() {
    let dir = tempdir().unwrap();
    let (main, _, pdf) = project(dir.path());
    let surface = surface();
    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    PreviewSurface::add_watched_file(&surface, master.clone()).unwrap();

    fs::remove_file(&pdf).unwrap();
    master.compile();

    let s = surface.borrow();
    assert_eq!(s.state(), SurfaceState::ErrorShown);
    assert!(s
        .sink()
        .last_status()
        .unwrap()
        .starts_with("<b>Cannot reload the document</b>"));
    assert!(s
        .sink()
        .events
        .iter()
        .any(|e| matches!(e, PreviewEvent::ReloadFailed { .. })));
}

#[test]
fn test_start_watching_and_shutdown_events() {
    let dir = tempdir().unwrap();
    let (main, chapter, _) = project(dir.path());
    let surface = surface();
    let master = WatchedFile::master(&main, ok_compiler()).unwrap();
    let included = WatchedFile::included(&chapter, &master).unwrap();
    PreviewSurface::add_watched_file(&surface, master.clone()).unwrap();
    PreviewSurface::add_watched_file(&surface, included).unwrap();

    surface.borrow_mut().start_watching();
    surface.borrow_mut().shutdown();

    let s = surface.borrow();
    let started = s
        .sink()
        .events
        .iter()
        .find_map(|e| match e {
            PreviewEvent::WatchStarted { master, watching } => Some((master, watching)),
            _ => None,
        })
        .unwrap();
    assert_eq!(started.0, &master.path().display().to_string());
    assert_eq!(started.1.len(), 2);
    assert_eq!(s.sink().events.last(), Some(&PreviewEvent::Shutdown));
    assert_eq!(s.state(), SurfaceState::Idle);
}

#[test]
fn test_shutdown_survives_flush_failure() {
    let sink = RecordingSink {
        fail_flush: true,
        ..RecordingSink::default()
    };
    let mut s = PreviewSurface::new(FakeView::default(), sink, "pdf");

    s.shutdown();

    assert_eq!(s.sink().events, vec![PreviewEvent::Shutdown]);
    assert_eq!(s.sink().flushes, 1);
    assert_eq!(s.state(), SurfaceState::Idle);
}
