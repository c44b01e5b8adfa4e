//! Common constants used throughout the Mason application.

/// Filename token that marks a file as substitution-eligible.
/// It is stripped from the destination name wherever it appears.
pub const TEMPLATE_MARKER: &str = ".template";

/// Mason's ignore file name, looked up in the template root
pub const IGNORE_FILE: &str = ".masonignore";

/// Integration-tooling configuration subtree
pub const AGENT_DIR: &str = ".claude";

/// AI rules subtree and its fixed children
pub const RULES_DIR: &str = "ai-rules";
pub const RULES_COMMON_DIR: &str = "common";
pub const RULES_PROJECT_TEMPLATE_DIR: &str = "_project_template";

/// Documentation subtree
pub const DOCS_DIR: &str = "docs";

/// Memory-tier subtree, selected by tier under the source side
pub const MEMORIES_DIR: &str = ".serena/memories";

/// Skeleton variant roots inside the template tree
pub const BACKEND_SKELETON_DIR: &str = "backend/skeleton";
pub const FRONTEND_SKELETON_DIR: &str = "frontend/skeleton";

/// Skeleton destination names
pub const BACKEND_DIR: &str = "backend";
pub const FRONTEND_DIR: &str = "frontend";

/// Deployment variant root, mirrored per selected hosting target
pub const DEPLOYMENT_DIR: &str = "deployment";

/// CI configuration subtree
pub const CI_DIR: &str = ".github";
