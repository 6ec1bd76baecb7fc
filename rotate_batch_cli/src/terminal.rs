//! Terminal checks deciding whether to prompt and draw progress bars

use is_terminal::IsTerminal;
use std::env;
use std::io::{stderr, stdin};

const CI_VARS: &[&str] = &["CI", "GITHUB_ACTIONS", "GITLAB_CI", "BUILDKITE", "TF_BUILD"];

/// Check if both ends of a prompt are attached to a terminal
///
/// Folder prompts read from stdin and draw on stderr.
pub fn can_prompt() -> bool {
    stdin().is_terminal() && stderr().is_terminal() && !is_ci_environment()
}

/// Progress bars go to stderr and need a terminal that understands cursor movement
pub fn should_show_progress_by_default() -> bool {
    stderr().is_terminal()
        && !is_ci_environment()
        && term_supports_progress(env::var("TERM").ok().as_deref())
}

fn is_ci_environment() -> bool {
    detect_ci(|var| env::var_os(var).is_some())
}

fn detect_ci(is_set: impl Fn(&str) -> bool) -> bool {
    CI_VARS.iter().any(|var| is_set(var))
}

fn term_supports_progress(term: Option<&str>) -> bool {
    // Windows consoles leave TERM unset
    !matches!(term, Some("dumb") | Some(""))
}
