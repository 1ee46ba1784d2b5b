//! Help text rendering.
//!
//! Rendering is a pure string assembly so hosts can capture it (tests
//! included) without touching process streams. The registry decides where
//! the text goes and when.

/// Aliases reserved for the built-in help flag.
pub(crate) const HELP_TEMPLATE: &str = "-?|--help";

/// Usage line for the built-in help flag.
pub(crate) const HELP_USAGE: &str = "Show help information";

/// Column width alias templates are padded to.
const TEMPLATE_WIDTH: usize = 20;

/// Banner metadata shown at the top of help output.
#[derive(Debug, Clone, Default)]
pub(crate) struct AppInfo {
    pub(crate) name: String,
    pub(crate) version: String,
    pub(crate) about: String,
}

/// Renders the full help text: version, banner, usage synopsis, and one
/// line per flag entry, the built-in help entry last.
pub(crate) fn render<'a, I>(info: &AppInfo, entries: I) -> String
where
    I: Iterator<Item = (&'a str, &'a str)>,
{
    let mut out = String::new();

    out.push_str(&format!("{}\n", info.version));
    out.push_str(&format!("\n{} - {}\n", info.name, info.about));
    out.push_str(&format!("Usage: {} [options] [arguments]\n\n", info.name));
    out.push_str("OPTIONS\n\n");

    for (template, usage) in entries {
        out.push_str(&format!("  {template:<TEMPLATE_WIDTH$}\t{usage}\n"));
    }
    out.push_str(&format!("  {HELP_TEMPLATE:<TEMPLATE_WIDTH$}\t{HELP_USAGE}\n"));

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info() -> AppInfo {
        AppInfo {
            name: "transfer".to_string(),
            version: "0.3.1".to_string(),
            about: "Moves files between hosts".to_string(),
        }
    }

    #[test]
    fn test_render_layout() {
        let entries = [
            ("-v|--verbose", "Enable verbose output"),
            ("--retries", "Retry count"),
        ];
        let text = render(&info(), entries.iter().copied());
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "0.3.1");
        assert_eq!(lines[1], "");
        assert_eq!(lines[2], "transfer - Moves files between hosts");
        assert_eq!(lines[3], "Usage: transfer [options] [arguments]");
        assert_eq!(lines[4], "");
        assert_eq!(lines[5], "OPTIONS");
        assert_eq!(lines[6], "");
        assert_eq!(lines[7], "  -v|--verbose        \tEnable verbose output");
        assert_eq!(lines[8], "  --retries           \tRetry count");
        assert_eq!(lines[9], "  -?|--help           \tShow help information");
        assert_eq!(lines.len(), 10);
    }

    #[test]
    fn test_render_with_no_flags_still_lists_help() {
        let text = render(&info(), std::iter::empty());
        assert!(text.contains("OPTIONS"));
        assert!(text.ends_with("  -?|--help           \tShow help information\n"));
    }

    #[test]
    fn test_render_does_not_truncate_wide_templates() {
        let entries = [("-x|--extremely-long-alias", "Does a thing")];
        let text = render(&info(), entries.iter().copied());
        assert!(text.contains("  -x|--extremely-long-alias\tDoes a thing\n"));
    }
}
