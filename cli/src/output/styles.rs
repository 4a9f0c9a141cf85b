//! Terminal stylesheet.

use owo_colors::Style;

/// Styles used by gonut's terminal output.
///
/// `Styles::default()` is the plain sheet: every style is a no-op, which is
/// what pipes, `--no-color` and `NO_COLOR` get.
#[derive(Default, Clone)]
pub struct Styles {
    pub success: Style,
    pub warning: Style,
    pub error: Style,
    pub info: Style,
    pub dim: Style,
    pub bold: Style,
    /// Section titles, e.g. the `gonut list` header.
    pub header: Style,
    /// Phase durations and elapsed times.
    pub duration: Style,
    /// Buildpack names.
    pub buildpack: Style,
}

impl Styles {
    /// The colored sheet for terminals that accept ANSI escapes.
    #[must_use]
    pub fn colored() -> Self {
        Self {
            success: Style::new().green(),
            warning: Style::new().yellow(),
            error: Style::new().red().bold(),
            info: Style::new().blue(),
            dim: Style::new().dimmed(),
            bold: Style::new().bold(),
            header: Style::new().bold().cyan(),
            duration: Style::new().truecolor(95, 158, 160),
            buildpack: Style::new().truecolor(143, 188, 143),
        }
    }
}
