//! Terminal styling helpers shared by the dashboard output

use console::{style, Emoji};

use crate::pipeline::DashboardConfig;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
static LINK: Emoji<'_, '_> = Emoji("🔗 ", "");

/// Print the application banner with ASCII art
pub fn print_banner(version: &str) {
    let banner = r#"
     █████╗ ████████╗████████╗██████╗ ██╗██╗  ██╗██████╗ ██╗
    ██╔══██╗╚══██╔══╝╚══██╔══╝██╔══██╗██║██║ ██╔╝██╔══██╗██║
    ███████║   ██║      ██║   ██████╔╝██║█████╔╝ ██████╔╝██║
    ██╔══██║   ██║      ██║   ██╔══██╗██║██╔═██╗ ██╔═══╝ ██║
    ██║  ██║   ██║      ██║   ██║  ██║██║██║  ██╗██║     ██║
    ╚═╝  ╚═╝   ╚═╝      ╚═╝   ╚═╝  ╚═╝╚═╝╚═╝  ╚═╝╚═╝     ╚═╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {} {}",
        style("%").magenta().bold(),
        style("HR attrition KPIs at a glance").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(source: &str, config: &DashboardConfig) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);
    let columns = &config.columns;

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Dataset:  {:<37}│",
        FOLDER,
        truncate_string(source, 36)
    );
    println!(
        "    │  {} Flag:     {:<37}│",
        TARGET,
        truncate_string(
            &format!(
                "{} / {} ({}=1)",
                columns.flag, columns.label, columns.label_mapping.positive
            ),
            36
        )
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Category top-N:  {:<30}│",
        CHART,
        style(config.top_n).yellow()
    );
    println!(
        "    │  {} Heatmap:         {:<30}│",
        LINK,
        style(if config.show_heatmap { "on" } else { "off" }).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Dashboard complete!").green().bold()
    );
    println!();
}

/// Shorten a string from the left so it fits in `max_len` characters
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a/long/path/to/hr.csv", 10), ".../hr.csv");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        let truncated = truncate_string("ééééééééééé", 6);
        assert_eq!(truncated, "...ééé");
    }
}
