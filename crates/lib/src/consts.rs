/// Reserved directory name that marks the shared tooling subtree.
pub const SUBTREE_DIR_NAME: &str = "prism";

/// Project manifest read at every root and workspace.
pub const MANIFEST_FILE: &str = "package.json";

/// Optional tool configuration, looked up in the subtree (or standalone) root.
pub const CONFIG_FILE: &str = "prism.json";

/// Type configuration whose presence makes a workspace typecheck-eligible.
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Manifest script that makes a workspace test-eligible.
pub const TEST_SCRIPT: &str = "test";
