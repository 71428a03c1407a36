//! Version comparison for CLI and catalog compatibility

use semver::Version;

/// Compare CLI version against the catalog version.
/// Returns a warning message if the CLI is older than the catalog expects.
pub fn check_compatibility(
    cli_version: &str,
    catalog_version: &str,
    upgrade_command: &str,
) -> Option<String> {
    let cli_ver = parse_version(cli_version).ok()?;
    let catalog_ver = parse_version(catalog_version).ok()?;

    if cli_ver < catalog_ver {
        Some(format!(
            "This catalog was written for CLI version {} or newer.\n\
             You are running version {}.\n\
             Consider updating: {}",
            catalog_version, cli_version, upgrade_command
        ))
    } else {
        None
    }
}

/// Parse version string, accepting a leading 'v'
pub fn parse_version(version_str: &str) -> Result<Version, semver::Error> {
    let cleaned = version_str.strip_prefix('v').unwrap_or(version_str);
    Version::parse(cleaned)
}
