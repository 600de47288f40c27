//! User interface module.
//!
//! docker-publish runs unattended in CI, so there are no prompts: everything
//! here is output formatting, kept in `formatter`.

pub mod formatter;

pub use formatter::{
    display_boundary_warning, display_command, display_error, display_plan,
    display_resolved_tags, display_status, display_success, format_plan, format_resolved_tags,
};
