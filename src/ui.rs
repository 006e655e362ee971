//! Formatting functions for user-facing output.
//!
//! Diagnostics for developers go through `tracing`; everything here is meant
//! for the person running the release.

use crate::boundary::BoundaryWarning;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("\x1b[31mERROR:\x1b[0m {}", message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("\x1b[32m✓\x1b[0m {}", message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("\x1b[33m→\x1b[0m {}", message);
}

/// Display a boundary warning to the user.
pub fn display_boundary_warning(warning: &BoundaryWarning) {
    eprintln!("\x1b[33m⚠ WARNING:\x1b[0m {}", warning);
}

/// Display the steps a dry run would perform.
///
/// # Arguments
/// * `steps` - Human-readable description of each planned step, in order
pub fn display_plan(steps: &[String]) {
    println!("\x1b[1mDry run, no changes made. Planned steps:\x1b[0m");
    for (i, step) in steps.iter().enumerate() {
        println!("  Step {}: {}", i + 1, step);
    }
}

/// Display manual push instruction for a release that was not pushed.
pub fn display_manual_push_instruction(tag: &str) {
    println!(
        "\x1b[33m→\x1b[0m To publish this release later, run:\n  \x1b[36mgit push <remote> HEAD {}\x1b[0m",
        tag
    );
}
