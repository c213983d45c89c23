//! Rendering for the terminal preview surface

use texview::domain::ports::{DocumentSummary, PreviewEvent};

use crate::ui::markup;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{SemanticColor, StyledText};
use crate::ui::theme;

/// What the status line is currently reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusKind {
    #[default]
    Idle,
    Busy,
    Success,
    Error,
}

impl StatusKind {
    fn icon(self) -> Icon {
        match self {
            StatusKind::Idle => Icon::Watch,
            StatusKind::Busy => Icon::Progress,
            StatusKind::Success => Icon::Success,
            StatusKind::Error => Icon::Error,
        }
    }
}

pub fn render_preview_header(
    master: &str,
    watching: &[String],
    compiler: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let title = StyledText::colored("texview", SemanticColor::Info)
        .bold()
        .render(supports_color);
    let mut out = format!(
        "{} {}\n",
        Icon::Watch.colored(supports_color, supports_unicode),
        title
    );
    out.push_str(&format!("Master: {}\n", master));
    out.push_str(&format!("Compiler: {}\n", compiler));
    for path in watching.iter().filter(|p| p.as_str() != master) {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            path
        ));
    }
    out.push_str("Hint: Press Ctrl+C to stop\n");
    out
}

pub fn render_document_panel(
    document: Option<&DocumentSummary>,
    supports_color: bool,
    supports_unicode: bool,
    width: usize,
) -> String {
    let icon = Icon::Document.colored(supports_color, supports_unicode);
    let rule = if supports_unicode {
        theme::rules::HORIZONTAL
    } else {
        theme::rules::HORIZONTAL_ASCII
    };
    let rule = StyledText::colored(rule.repeat(width.min(60)), SemanticColor::Dim)
        .render(supports_color);

    let Some(doc) = document else {
        let empty = StyledText::colored("no document loaded", SemanticColor::Dim)
            .render(supports_color);
        return format!("{}\n{} {}\n", rule, icon, empty);
    };

    let name = doc
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| doc.path.display().to_string());
    let details = format!(
        "page {}/{} {} {} {} {}",
        doc.page + 1,
        doc.page_count.max(1),
        separator(supports_unicode),
        doc.sizing.label(),
        separator(supports_unicode),
        format_size(doc.size_bytes)
    );
    let line = vec![
        StyledText::plain(name).bold(),
        StyledText::plain("  "),
        StyledText::colored(details, SemanticColor::Dim),
    ];
    // icon plus one space
    let budget = width.saturating_sub(markup::display_width(
        Icon::Document.render(supports_unicode),
    ) + 1);

    format!(
        "{}\n{} {}\n",
        rule,
        icon,
        markup::render_line(&line, supports_color, budget, ellipsis(supports_unicode))
    )
}

/// Status line plus any further message lines, each cut to `width`.
/// At most `max_lines` lines are produced; the last one notes what was cut.
pub fn render_status(
    timestamp: &str,
    message: &str,
    kind: StatusKind,
    supports_color: bool,
    supports_unicode: bool,
    width: usize,
    max_lines: usize,
) -> String {
    let prefix = format!(
        "[{}] {} ",
        timestamp,
        kind.icon().colored(supports_color, supports_unicode)
    );
    let prefix_width = timestamp.len()
        + 3
        + markup::display_width(kind.icon().render(supports_unicode))
        + 1;

    let mut lines = markup::lines(message);
    while lines.len() > 1 && lines.last().is_some_and(|l| l.is_empty()) {
        lines.pop();
    }

    let max_lines = max_lines.max(1);
    let shown = if lines.len() > max_lines {
        max_lines - 1
    } else {
        lines.len()
    };
    let hidden = lines.len() - shown;
    let ellipsis = ellipsis(supports_unicode);

    let mut out = String::new();
    for (i, runs) in lines.iter().take(shown).enumerate() {
        if i == 0 {
            out.push_str(&prefix);
            out.push_str(&markup::render_line(
                runs,
                supports_color,
                width.saturating_sub(prefix_width),
                ellipsis,
            ));
        } else {
            out.push_str("  ");
            out.push_str(&markup::render_line(
                runs,
                supports_color,
                width.saturating_sub(2),
                ellipsis,
            ));
        }
        out.push('\n');
    }
    if hidden > 0 {
        let note = format!("  ({} more lines)", hidden);
        out.push_str(&StyledText::colored(note, SemanticColor::Dim).render(supports_color));
        out.push('\n');
    }
    out
}

/// One appended line per event, for output that cannot be redrawn in place
pub fn render_event_line(
    timestamp: &str,
    event: &PreviewEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> Option<String> {
    let prefix = format!("[{}]", timestamp);

    match event {
        PreviewEvent::WatchStarted { .. } | PreviewEvent::CompileFailed { .. } => None,
        PreviewEvent::ReloadFailed { .. } => None,
        PreviewEvent::CompileStarted => Some(format!(
            "{} {} Compiling...\n",
            prefix,
            Icon::Progress.colored(supports_color, supports_unicode)
        )),
        PreviewEvent::DocumentLoaded { document } => Some(format!(
            "{} {} {} (page {}/{})\n",
            prefix,
            Icon::Document.colored(supports_color, supports_unicode),
            document.path.display(),
            document.page + 1,
            document.page_count.max(1)
        )),
        PreviewEvent::Status { message } => {
            let text = markup::render(message, supports_color);
            Some(format!(
                "{} {} {}\n",
                prefix,
                Icon::Arrow.colored(supports_color, supports_unicode),
                text.replace('\n', "\n    ")
            ))
        }
        PreviewEvent::Shutdown => Some(format!(
            "\n{} {} Preview stopped.\n",
            prefix,
            Icon::Watch.colored(supports_color, supports_unicode)
        )),
    }
}

pub fn format_size(bytes: u64) -> String {
    const KIB: f64 = 1024.0;
    const MIB: f64 = KIB * 1024.0;
    let b = bytes as f64;
    if b >= MIB {
        format!("{:.1} MiB", b / MIB)
    } else if b >= KIB {
        format!("{:.1} KiB", b / KIB)
    } else {
        format!("{} B", bytes)
    }
}

fn separator(supports_unicode: bool) -> &'static str {
    if supports_unicode {
        "·"
    } else {
        "|"
    }
}

fn ellipsis(supports_unicode: bool) -> &'static str {
    if supports_unicode {
        "…"
    } else {
        "..."
    }
}
