//! Constants shared by the gitlog crates.

/// Platform-specific Git executable name
#[cfg(windows)]
pub const GIT_EXECUTABLE: &str = "git.exe";

/// Platform-specific Git executable name
#[cfg(not(windows))]
pub const GIT_EXECUTABLE: &str = "git";

/// Log format used when neither the command line nor the config file sets one.
pub const DEFAULT_LOG_FORMAT: &str = "%h %s (%cn <%ce>)";

/// Marker git prints in front of the checked-out branch.
pub const CURRENT_BRANCH_MARKER: char = '*';

/// Marker git prints in front of branches checked out in another worktree.
pub const WORKTREE_BRANCH_MARKER: &str = "+ ";

/// Separator git uses to display a symbolic ref such as `origin/HEAD -> origin/main`.
pub const SYMBOLIC_REF_ARROW: &str = " -> ";

/// Environment variable that points gitlog at an explicit config file.
pub const ENV_GITLOG_CONFIG: &str = "GITLOG_CONFIG";
