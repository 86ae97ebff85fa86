//! Bordered warning banners.
//!
//! Deprecation advisories are rendered inside a box with the message
//! text centered and documentation links highlighted. Line widths are
//! measured with [`console::measure_text_width`], which ignores ANSI
//! codes, so styled lines center correctly.

use console::measure_text_width;
use semver::Version;

use super::theme::MoorageTheme;

const NODE_VERSIONS_URL: &str = "https://moorage.dev/docs/faq/node-versions/";
const MAJOR_VERSIONS_URL: &str = "https://moorage.dev/docs/faq/major-versions/";

/// Render pre-styled lines inside a border, centered.
pub fn boxed(lines: &[String], theme: &MoorageTheme) -> String {
    let width = lines
        .iter()
        .map(|l| measure_text_width(l))
        .max()
        .unwrap_or(0);
    let border = &theme.warning_border;
    let horizontal = "─".repeat(width + 2);

    let mut out = String::new();
    out.push_str(&format!("{}\n", border.apply_to(format!("┌{}┐", horizontal))));
    for line in lines {
        let w = measure_text_width(line);
        let left = (width - w) / 2;
        let right = width - w - left;
        out.push_str(&format!(
            "{} {}{}{} {}\n",
            border.apply_to("│"),
            " ".repeat(left),
            line,
            " ".repeat(right),
            border.apply_to("│"),
        ));
    }
    out.push_str(&format!("{}", border.apply_to(format!("└{}┘", horizontal))));
    out
}

/// Banner for an end-of-life Node.js runtime.
pub fn runtime_deprecated(theme: &MoorageTheme, current: &Version) -> String {
    let warn = &theme.warning;
    boxed(
        &[
            warn.apply_to(format!(
                "The current Node.js version ({}) has reached end-of-life status.",
                current
            ))
            .to_string(),
            warn.apply_to(
                "Moorage will drop support for this Node.js version in an upcoming release, \
                 please update your Node.js version.",
            )
            .to_string(),
            format!(
                "{}{}{}",
                warn.apply_to("See "),
                theme.link.apply_to(NODE_VERSIONS_URL),
                warn.apply_to("."),
            ),
        ],
        theme,
    )
}

/// Banner for instances running an unmaintained Lantern major version.
pub fn app_deprecated(theme: &MoorageTheme) -> String {
    let warn = &theme.warning;
    boxed(
        &[
            warn.apply_to("Lantern 4.x has reached end-of-life status.")
                .to_string(),
            warn.apply_to(
                "Moorage will drop support for unmaintained Lantern versions in an upcoming \
                 release, please update your Lantern version.",
            )
            .to_string(),
            format!(
                "{}{}{}",
                warn.apply_to("See "),
                theme.link.apply_to(MAJOR_VERSIONS_URL),
                warn.apply_to("."),
            ),
        ],
        theme,
    )
}

/// Banner for unsupported database configurations.
pub fn database_deprecated(theme: &MoorageTheme) -> String {
    let warn = &theme.warning;
    boxed(
        &[
            warn.apply_to(
                "Warning: MySQL 8 will be the required database in the next major release of \
                 Lantern.",
            )
            .to_string(),
            warn.apply_to("Make sure your database is up to date to ensure forwards compatibility.")
                .to_string(),
        ],
        theme,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boxed_draws_border() {
        let theme = MoorageTheme::plain();
        let out = boxed(&["hello".to_string()], &theme);

        assert!(out.contains("┌"));
        assert!(out.contains("┐"));
        assert!(out.contains("└"));
        assert!(out.contains("┘"));
        assert!(out.contains("│ hello │"));
    }

    #[test]
    fn boxed_centers_short_lines() {
        let theme = MoorageTheme::plain();
        let out = boxed(&["wide line here".to_string(), "hi".to_string()], &theme);

        // Every rendered line spans the same width.
        let widths: Vec<usize> = out.lines().map(measure_text_width).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
        // The short line is padded on both sides.
        assert!(out.contains("│       hi       │"));
    }

    #[test]
    fn runtime_banner_names_current_version() {
        let theme = MoorageTheme::plain();
        let out = runtime_deprecated(&theme, &Version::new(16, 20, 2));

        assert!(out.contains("16.20.2"));
        assert!(out.contains("end-of-life"));
        assert!(out.contains(NODE_VERSIONS_URL));
    }

    #[test]
    fn app_banner_links_docs() {
        let theme = MoorageTheme::plain();
        let out = app_deprecated(&theme);

        assert!(out.contains("Lantern 4.x"));
        assert!(out.contains(MAJOR_VERSIONS_URL));
    }

    #[test]
    fn database_banner_mentions_required_major() {
        let theme = MoorageTheme::plain();
        let out = database_deprecated(&theme);

        assert!(out.contains("MySQL 8"));
        assert!(out.contains("forwards compatibility"));
    }

    #[test]
    fn banners_are_bordered() {
        let theme = MoorageTheme::plain();
        for banner in [
            runtime_deprecated(&theme, &Version::new(16, 0, 0)),
            app_deprecated(&theme),
            database_deprecated(&theme),
        ] {
            assert!(banner.starts_with("┌"));
            assert!(banner.ends_with("┘"));
        }
    }
}
