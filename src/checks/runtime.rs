//! Node.js runtime probing.
//!
//! Lantern runs on Node.js; the deprecation checks need to know which
//! version is on the PATH. An absent or unparsable `node` simply yields
//! `None` — other diagnostics report a missing runtime, the advisory
//! layer only warns about outdated ones.

use std::process::Command;

use semver::Version;
use tracing::debug;

/// Detect the Node.js version by running `node --version`.
pub fn node_version() -> Option<Version> {
    let output = match Command::new("node").arg("--version").output() {
        Ok(output) => output,
        Err(e) => {
            debug!(error = %e, "node not runnable");
            return None;
        }
    };

    if !output.status.success() {
        debug!(code = ?output.status.code(), "node --version failed");
        return None;
    }

    parse_node_version(&String::from_utf8_lossy(&output.stdout))
}

/// Parse `node --version` output, e.g. `v20.11.1`.
fn parse_node_version(raw: &str) -> Option<Version> {
    let trimmed = raw.trim().trim_start_matches('v');
    match Version::parse(trimmed) {
        Ok(v) => Some(v),
        Err(e) => {
            debug!(raw = %raw.trim(), error = %e, "unparsable node version");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_v_prefixed_version() {
        assert_eq!(
            parse_node_version("v20.11.1\n"),
            Some(Version::new(20, 11, 1))
        );
    }

    #[test]
    fn parses_bare_version() {
        assert_eq!(parse_node_version("18.19.0"), Some(Version::new(18, 19, 0)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_node_version("node: command not found"), None);
        assert_eq!(parse_node_version(""), None);
    }
}
