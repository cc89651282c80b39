use owo_colors::Style;
use std::sync::OnceLock;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Styles for status lines and for the function listing
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub title: Style,
    pub ok: Style,
    pub failure: Style,
    pub caution: Style,
    pub label: Style,
    pub icon: Style,
    /// `File:` lines of the listing
    pub file: Style,
    pub function_name: Style,
    pub return_type: Style,
    pub parameters: Style,
    /// Placeholder for a field the extractor did not find
    pub missing: Style,
}

impl Theme {
    /// Colored on a terminal unless `NO_COLOR` is set
    pub fn detect() -> Self {
        let no_color = std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty());
        Self::new(!no_color && console::Term::stdout().is_term())
    }

    pub fn new(colored: bool) -> Self {
        if !colored {
            return Self::plain();
        }
        Self {
            title: Style::new().cyan().bold(),
            ok: Style::new().green().bold(),
            failure: Style::new().red().bold(),
            caution: Style::new().yellow().bold(),
            label: Style::new().white().dimmed(),
            icon: Style::new().magenta(),
            file: Style::new().bold().underline(),
            function_name: Style::new().green(),
            return_type: Style::new().cyan(),
            parameters: Style::new().yellow(),
            missing: Style::new().dimmed().italic(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            title: none,
            ok: none,
            failure: none,
            caution: none,
            label: none,
            icon: none,
            file: none,
            function_name: none,
            return_type: none,
            parameters: none,
            missing: none,
        }
    }
}

pub fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::detect)
}
