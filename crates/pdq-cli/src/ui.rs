use std::io::IsTerminal;
use std::sync::OnceLock;

use crate::cli::{GlobalFlags, OutputFormat};

#[derive(Clone, Copy, Debug)]
pub struct UiPrefs {
    pub table_color: bool,
    pub progress: bool,
    pub term_width: Option<usize>,
}

static UI_PREFS: OnceLock<UiPrefs> = OnceLock::new();

pub fn init(flags: &GlobalFlags) {
    let _ = UI_PREFS.set(prefs_for(flags, std::io::stdout().is_terminal()));
}

fn prefs_for(flags: &GlobalFlags, is_tty: bool) -> UiPrefs {
    let interactive = is_tty && !flags.quiet;
    UiPrefs {
        table_color: interactive
            && flags.format == OutputFormat::Table
            && std::env::var_os("NO_COLOR").is_none(),
        progress: interactive && flags.format != OutputFormat::Json,
        term_width: std::env::var("COLUMNS")
            .ok()
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|width| *width >= 40),
    }
}

#[must_use]
pub fn prefs() -> UiPrefs {
    *UI_PREFS.get().unwrap_or(&UiPrefs {
        table_color: false,
        progress: false,
        term_width: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags(format: OutputFormat, quiet: bool) -> GlobalFlags {
        GlobalFlags {
            format,
            quiet,
            verbose: false,
            config: None,
        }
    }

    #[test]
    fn progress_only_on_interactive_non_json() {
        assert!(prefs_for(&flags(OutputFormat::Table, false), true).progress);
        assert!(prefs_for(&flags(OutputFormat::Raw, false), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Json, false), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Table, true), true).progress);
        assert!(!prefs_for(&flags(OutputFormat::Table, false), false).progress);
    }
}
