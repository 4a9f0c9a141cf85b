//! `gonut list` — show the sample apps in catalog order.

use owo_colors::OwoColorize as _;

use crate::domain::Catalog;
use crate::output::OutputContext;

/// Run `gonut list`.
pub fn run(ctx: &OutputContext, catalog: &Catalog) {
    ctx.header("Sample apps");
    for line in rows(catalog, ctx) {
        println!("{line}");
    }
}

/// One line per app: selector, aliases, caption and buildpack.
fn rows(catalog: &Catalog, ctx: &OutputContext) -> Vec<String> {
    let width = catalog.iter().map(|a| a.selector.len()).max().unwrap_or(0);
    catalog
        .iter()
        .map(|app| {
            let aliases = if app.aliases.is_empty() {
                String::new()
            } else {
                format!(" ({})", app.aliases.join(", "))
            };
            format!(
                "  {:<width$}  {}{aliases} [{}]",
                app.selector,
                app.caption,
                app.buildpack.style(ctx.styles.buildpack)
            )
        })
        .collect()
}
