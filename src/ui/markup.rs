//! Minimal status markup
//!
//! Status messages may carry `<b>` and `<i>` tags. Only those exact tags are
//! recognized; any other `<` is literal text, which matters because compiler
//! output is spliced into the message verbatim.

use unicode_width::UnicodeWidthChar;

use crate::ui::primitives::text::StyledText;

const TAGS: &[(&str, Tag)] = &[
    ("<b>", Tag::OpenBold),
    ("</b>", Tag::CloseBold),
    ("<i>", Tag::OpenItalic),
    ("</i>", Tag::CloseItalic),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tag {
    OpenBold,
    CloseBold,
    OpenItalic,
    CloseItalic,
}

/// Split markup into styled runs
pub fn parse(markup: &str) -> Vec<StyledText> {
    let mut runs = Vec::new();
    let mut bold = 0usize;
    let mut italic = 0usize;
    let mut text = String::new();
    let mut rest = markup;

    let mut push = |text: &mut String, bold: usize, italic: usize| {
        if text.is_empty() {
            return;
        }
        let mut run = StyledText::plain(std::mem::take(text));
        if bold > 0 {
            run = run.bold();
        }
        if italic > 0 {
            run = run.italic();
        }
        runs.push(run);
    };

    while let Some(idx) = rest.find('<') {
        text.push_str(&rest[..idx]);
        rest = &rest[idx..];

        match TAGS.iter().find(|(tag, _)| rest.starts_with(tag)) {
            Some((literal, tag)) => {
                push(&mut text, bold, italic);
                match tag {
                    Tag::OpenBold => bold += 1,
                    Tag::CloseBold => bold = bold.saturating_sub(1),
                    Tag::OpenItalic => italic += 1,
                    Tag::CloseItalic => italic = italic.saturating_sub(1),
                }
                rest = &rest[literal.len()..];
            }
            None => {
                text.push('<');
                rest = &rest[1..];
            }
        }
    }
    text.push_str(rest);
    push(&mut text, bold, italic);

    runs
}

/// Render markup with terminal styles, or as plain text without color
pub fn render(markup: &str, supports_color: bool) -> String {
    parse(markup)
        .iter()
        .map(|run| run.render(supports_color))
        .collect()
}

/// Styled runs split into lines; emphasis carries across line breaks
pub fn lines(markup: &str) -> Vec<Vec<StyledText>> {
    let mut lines = Vec::new();
    let mut current = Vec::new();

    for run in parse(markup) {
        let mut parts = run.text().split('\n');
        if let Some(first) = parts.next().filter(|p| !p.is_empty()) {
            current.push(run.with_text(first));
        }
        for part in parts {
            lines.push(std::mem::take(&mut current));
            if !part.is_empty() {
                current.push(run.with_text(part));
            }
        }
    }
    lines.push(current);
    lines
}

/// Render one line of runs, cut to `max_width` display columns. A cut line
/// ends with `ellipsis`, which counts toward the width.
pub fn render_line(
    runs: &[StyledText],
    supports_color: bool,
    max_width: usize,
    ellipsis: &str,
) -> String {
    let total: usize = runs.iter().map(|r| display_width(r.text())).sum();
    if total <= max_width {
        return runs.iter().map(|r| r.render(supports_color)).collect();
    }

    let budget = max_width.saturating_sub(display_width(ellipsis));
    let mut used = 0;
    let mut out = String::new();
    for run in runs {
        let mut kept = String::new();
        for c in run.text().chars() {
            let w = c.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            kept.push(c);
        }
        if !kept.is_empty() {
            out.push_str(&run.with_text(kept).render(supports_color));
        }
        if used >= budget {
            break;
        }
    }
    if max_width > 0 {
        out.push_str(ellipsis);
    }
    out
}

pub fn display_width(text: &str) -> usize {
    text.chars().map(|c| c.width().unwrap_or(0)).sum()
}
