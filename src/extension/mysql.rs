//! MySQL extension.
//!
//! Probes the configured MySQL server's version by running the `mysql`
//! client in batch mode with `SELECT VERSION()`. The server's answer is
//! a string like `8.0.34-log` or `10.11.2-MariaDB-1:10.11.2+maria~deb12`;
//! only the leading `x.y.z` matters here.

use std::process::Command;

use semver::Version;
use tracing::debug;

use crate::config::InstanceConfig;
use crate::error::Result;

use super::DatabaseExtension;

/// Built-in MySQL integration.
#[derive(Debug, Default)]
pub struct MysqlExtension;

impl DatabaseExtension for MysqlExtension {
    fn name(&self) -> &str {
        "mysql"
    }

    fn server_version(&self, config: &InstanceConfig) -> Result<Option<Version>> {
        let host = config
            .get_str("database.connection.host")
            .unwrap_or("localhost");
        let port = config.get_u64("database.connection.port").unwrap_or(3306);
        let user = config
            .get_str("database.connection.user")
            .unwrap_or("root");

        let mut cmd = Command::new("mysql");
        cmd.arg("--batch")
            .arg("--skip-column-names")
            .arg(format!("--host={}", host))
            .arg(format!("--port={}", port))
            .arg(format!("--user={}", user))
            .arg("--execute=SELECT VERSION()");

        // MYSQL_PWD keeps the password off the process command line.
        if let Some(password) = config.get_str("database.connection.password") {
            cmd.env("MYSQL_PWD", password);
        }

        let output = match cmd.output() {
            Ok(output) => output,
            Err(e) => {
                debug!(error = %e, "mysql client not runnable");
                return Ok(None);
            }
        };

        if !output.status.success() {
            debug!(
                code = ?output.status.code(),
                stderr = %String::from_utf8_lossy(&output.stderr).trim(),
                "mysql version query failed"
            );
            return Ok(None);
        }

        Ok(parse_server_version(&String::from_utf8_lossy(
            &output.stdout,
        )))
    }
}

/// Extract an `x.y.z` version from a server version string.
fn parse_server_version(raw: &str) -> Option<Version> {
    let re = regex::Regex::new(r"(\d+)\.(\d+)\.(\d+)").ok()?;
    let caps = re.captures(raw)?;

    // Capture groups are all-digit by construction.
    let major = caps[1].parse().ok()?;
    let minor = caps[2].parse().ok()?;
    let patch = caps[3].parse().ok()?;
    Some(Version::new(major, minor, patch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_mysql_version() {
        assert_eq!(
            parse_server_version("8.0.34\n"),
            Some(Version::new(8, 0, 34))
        );
    }

    #[test]
    fn parses_suffixed_mysql_version() {
        assert_eq!(
            parse_server_version("8.4.0-log"),
            Some(Version::new(8, 4, 0))
        );
    }

    #[test]
    fn parses_mariadb_version() {
        assert_eq!(
            parse_server_version("10.11.2-MariaDB-1:10.11.2+maria~deb12"),
            Some(Version::new(10, 11, 2))
        );
    }

    #[test]
    fn rejects_output_without_version() {
        assert_eq!(parse_server_version("ERROR 2002 (HY000)"), None);
        assert_eq!(parse_server_version(""), None);
    }

    #[test]
    fn extension_reports_its_name() {
        assert_eq!(MysqlExtension.name(), "mysql");
    }
}
