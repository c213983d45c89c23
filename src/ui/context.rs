use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use texview::config::{ColorMode, OutputConfig};

/// Presentation decisions for one run, resolved once at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    /// Redraw the preview in place instead of appending lines
    pub live: bool,
}

impl UiContext {
    /// `output` already carries the CLI and env overrides
    pub fn new(json: bool, output: &OutputConfig) -> Self {
        Self::from_caps(json, output, detect_capabilities())
    }

    pub(crate) fn from_caps(json: bool, output: &OutputConfig, caps: TerminalCapabilities) -> Self {
        let unicode = output.unicode && caps.supports_unicode;

        let color = match output.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        let live = !json && caps.is_tty && !caps.is_ci;

        Self {
            json,
            caps,
            color,
            unicode,
            live,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tty_caps(is_ci: bool) -> TerminalCapabilities {
        TerminalCapabilities {
            is_tty: true,
            supports_color: true,
            supports_unicode: true,
            is_ci,
            width: 120,
            height: 40,
        }
    }

    #[test]
    fn ci_forces_line_output() {
        let ui = UiContext::from_caps(false, &OutputConfig::default(), tty_caps(true));
        assert!(!ui.live);
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let ui = UiContext::from_caps(false, &OutputConfig::default(), tty_caps(true));
        assert!(!ui.color);
    }

    #[test]
    fn explicit_color_always_wins_in_ci() {
        let output = OutputConfig {
            color: ColorMode::Always,
            ..OutputConfig::default()
        };
        let ui = UiContext::from_caps(false, &output, tty_caps(true));
        assert!(ui.color);
    }

    #[test]
    fn json_is_never_live() {
        let ui = UiContext::from_caps(true, &OutputConfig::default(), tty_caps(false));
        assert!(!ui.live);
    }

    #[test]
    fn unicode_needs_config_and_terminal() {
        let output = OutputConfig {
            unicode: false,
            ..OutputConfig::default()
        };
        let ui = UiContext::from_caps(false, &output, tty_caps(false));
        assert!(!ui.unicode);
        assert!(ui.live);
    }
}
