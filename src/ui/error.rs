use texview::config::ConfigWarning;
use texview::PreviewError;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::{SemanticColor, StyledText};
use crate::ui::terminal::detect_capabilities;

/// Hint shown under errors the user can act on
fn hint(err: &PreviewError) -> Option<String> {
    match err {
        PreviewError::ArtifactUnavailable { .. } => {
            Some("Compile the document once, or pass --initial-compile.".to_string())
        }
        PreviewError::NotADocument { .. } => {
            Some("Check --output-extension matches what the compiler produces.".to_string())
        }
        PreviewError::CompilerSpawn { program, .. } => Some(format!(
            "Install `{}` or choose another program with --compiler.",
            program
        )),
        PreviewError::InvalidConfig { file, .. } => {
            Some(format!("Fix {} and try again.", file.display()))
        }
        _ => None,
    }
}

pub fn format_error_with(err: &anyhow::Error, supports_color: bool, supports_unicode: bool) -> String {
    let mut out = format!(
        "{} {}\n",
        Icon::Error.colored(supports_color, supports_unicode),
        StyledText::colored(err.to_string(), SemanticColor::Error)
            .bold()
            .render(supports_color)
    );
    for cause in err.chain().skip(1) {
        out.push_str(&format!("  caused by: {}\n", cause));
    }
    if let Some(hint) = err
        .chain()
        .find_map(|e| e.downcast_ref::<PreviewError>())
        .and_then(hint)
    {
        out.push_str(&format!(
            "  {} {}\n",
            Icon::Arrow.colored(supports_color, supports_unicode),
            StyledText::colored(hint, SemanticColor::Dim).render(supports_color)
        ));
    }
    out
}

pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let output = serde_json::json!({
            "event": "error",
            "command": "preview",
            "message": format!("{:#}", err),
        });
        let _ = crate::ui::json::emit(output);
        return;
    }

    let caps = detect_capabilities();
    eprint!(
        "{}",
        format_error_with(err, caps.supports_color, caps.supports_unicode)
    );
}

pub fn format_config_warning(
    warning: &ConfigWarning,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let location = match warning.line {
        Some(line) => format!("{}:{}", warning.file.display(), line),
        None => warning.file.display().to_string(),
    };
    let mut out = format!(
        "{} Unknown config key '{}' in {}",
        Icon::Warning.colored(supports_color, supports_unicode),
        warning.key,
        location
    );
    if let Some(suggestion) = &warning.suggestion {
        out.push_str(&format!(" (did you mean '{}'?)", suggestion));
    }
    out.push('\n');
    out
}
