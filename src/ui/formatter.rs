//! Pure formatting functions for UI output.
//!
//! Status lines go to stdout, errors and warnings to stderr.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::domain::TagList;
use crate::release::ToolCommand;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").for_stderr().red(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("{} {}", style("⚠ WARNING:").for_stderr().yellow(), warning);
}

/// Format the tags resolved for a reference.
///
/// The primary tag is listed first and highlighted.
pub fn format_resolved_tags(reference: &str, tags: &TagList) -> String {
    let mut out = format!(
        "{}",
        style(format!("Tags for reference '{}':", reference)).bold()
    );
    for (i, tag) in tags.iter().enumerate() {
        if i == 0 {
            out.push_str(&format!("\n  {} {}", style(tag).green(), style("(primary)").dim()));
        } else {
            out.push_str(&format!("\n  {}", tag));
        }
    }
    out
}

/// Display the tags resolved for a reference.
pub fn display_resolved_tags(reference: &str, tags: &TagList) {
    println!("\n{}", format_resolved_tags(reference, tags));
}

/// Display a toolchain command about to run.
pub fn display_command(command: &ToolCommand) {
    println!("{} {}", style("$").dim(), style(command).cyan());
}

/// Format the numbered list of commands a dry run would execute.
pub fn format_plan(commands: &[ToolCommand]) -> String {
    let mut out = format!("{}", style("Planned commands:").bold());
    for (i, command) in commands.iter().enumerate() {
        out.push_str(&format!("\n  {}. {}", i + 1, style(command).cyan()));
    }
    out
}

/// Display the commands a dry run would execute.
pub fn display_plan(commands: &[ToolCommand]) {
    println!("\n{}", format_plan(commands));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::release::Toolchain;
    use console::strip_ansi_codes;

    #[test]
    fn test_resolved_tags_mark_first_as_primary() {
        let tags = TagList::from_candidates(["1.2.3", "1.2", "1"]).unwrap();
        let text = format_resolved_tags("refs/tags/v1.2.3", &tags);

        assert_eq!(
            strip_ansi_codes(&text),
            "Tags for reference 'refs/tags/v1.2.3':\n  1.2.3 (primary)\n  1.2\n  1"
        );
    }

    #[test]
    fn test_single_tag_is_primary() {
        let text = format_resolved_tags("refs/heads/main", &TagList::single("latest"));
        let plain = strip_ansi_codes(&text);
        let lines: Vec<&str> = plain.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[1], "  latest (primary)");
    }

    #[test]
    fn test_plan_is_numbered_in_order() {
        let toolchain = Toolchain::new("docker");
        let commands = vec![toolchain.push("my/repository:1.2"), toolchain.logout(None)];

        assert_eq!(
            strip_ansi_codes(&format_plan(&commands)),
            "Planned commands:\n  1. docker push my/repository:1.2\n  2. docker logout"
        );
    }
}
