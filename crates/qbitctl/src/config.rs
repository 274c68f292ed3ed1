//! CLI configuration: thin wrapper around `qbitctl_config` shared types.
//!
//! Re-exports the shared types and adds CLI-specific resolution that
//! respects `GlobalOpts` flag overrides (--url, --username, --password, ...).

use std::time::Duration;

use secrecy::SecretString;

use qbitctl_api::TlsMode;

use crate::cli::{GlobalOpts, OutputFormat};
use crate::error::CliError;

// ── Re-exports from shared crate ────────────────────────────────────

pub use qbitctl_config::{
    ClientSettings, Config, Profile, config_path, load_config_or_default, save_config,
};

// ── CLI-specific helpers ────────────────────────────────────────────

/// Resolve the active profile name from CLI flags and config.
pub fn active_profile_name(global: &GlobalOpts, config: &Config) -> String {
    global
        .profile
        .clone()
        .or_else(|| config.default_profile.clone())
        .unwrap_or_else(|| "default".into())
}

/// Output format: `--output` flag, then `defaults.output`, then table.
pub fn output_format(global: &GlobalOpts, config: &Config) -> OutputFormat {
    if let Some(ref format) = global.output {
        return format.clone();
    }
    <OutputFormat as clap::ValueEnum>::from_str(&config.defaults.output, true).unwrap_or_default()
}

/// Pick the profile to connect with.
///
/// A bare `--url` works without any config file; an explicitly named
/// profile must exist.
fn select_profile(
    global: &GlobalOpts,
    config: &Config,
    name: &str,
) -> Result<Profile, CliError> {
    if let Some(profile) = config.profiles.get(name) {
        return Ok(profile.clone());
    }
    if global.url.is_some() {
        return Ok(Profile::default());
    }
    if global.profile.is_some() {
        let mut available: Vec<&str> = config.profiles.keys().map(String::as_str).collect();
        available.sort_unstable();
        return Err(CliError::ProfileNotFound {
            name: name.into(),
            available: if available.is_empty() {
                "(none)".into()
            } else {
                available.join(", ")
            },
        });
    }
    Err(CliError::NoConfig {
        path: config_path().display().to_string(),
    })
}

/// Translate the active profile + global flags into `ClientSettings`.
///
/// CLI flag overrides take priority over profile values.
pub fn resolve_settings(
    global: &GlobalOpts,
    config: &Config,
) -> Result<(String, ClientSettings), CliError> {
    let name = active_profile_name(global, config);
    let profile = select_profile(global, config, &name)?;

    // 1. URL (flag > env > profile)
    let url = qbitctl_config::parse_url(global.url.as_deref().unwrap_or(&profile.url))?;

    // 2. Credentials (flag > profile chain)
    let username = match global.username {
        Some(ref user) => user.clone(),
        None => qbitctl_config::resolve_username(&profile, &name)?,
    };
    let password = match global.password {
        Some(ref pw) => SecretString::from(pw.clone()),
        None => qbitctl_config::resolve_password(&profile, &name)?,
    };

    // 3. Transport (TLS + timeout)
    let mut transport = qbitctl_config::profile_transport(&profile, &config.defaults);
    if global.insecure {
        transport = transport.with_tls(TlsMode::DangerAcceptInvalid);
    }
    if let Some(secs) = global.timeout {
        transport = transport.with_timeout(Duration::from_secs(secs));
    }

    Ok((
        name,
        ClientSettings {
            url,
            username,
            password,
            transport,
        },
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;
    use secrecy::ExposeSecret;

    use super::*;
    use crate::cli::Cli;

    fn global(args: &[&str]) -> GlobalOpts {
        let mut argv = vec!["qbitctl"];
        argv.extend_from_slice(args);
        argv.push("endpoints");
        Cli::try_parse_from(argv).unwrap().global
    }

    fn config_with(name: &str, profile: Profile) -> Config {
        let mut config = Config::default();
        config.profiles.insert(name.into(), profile);
        config
    }

    #[test]
    fn flags_override_profile_values() {
        let config = config_with(
            "default",
            Profile {
                url: "http://nas:8080".into(),
                username: Some("admin".into()),
                password: Some("from-file".into()),
                ..Profile::default()
            },
        );
        let global = global(&[
            "--url",
            "https://seedbox:443",
            "--password",
            "from-flag",
            "-k",
            "--timeout",
            "5",
        ]);

        let (name, settings) = resolve_settings(&global, &config).unwrap();
        assert_eq!(name, "default");
        assert_eq!(settings.url.as_str(), "https://seedbox/");
        assert_eq!(settings.username, "admin");
        assert_eq!(settings.password.expose_secret(), "from-flag");
        assert!(matches!(settings.transport.tls, TlsMode::DangerAcceptInvalid));
        assert_eq!(settings.transport.timeout, Duration::from_secs(5));
    }

    #[test]
    fn bare_url_works_without_profiles() {
        let global = global(&["--url", "http://localhost:8080", "--username", "u", "--password", "p"]);
        let (_, settings) = resolve_settings(&global, &Config::default()).unwrap();
        assert_eq!(settings.url.as_str(), "http://localhost:8080/");
        assert_eq!(settings.transport.timeout, Duration::from_secs(30));
    }

    #[test]
    fn unknown_named_profile_lists_available() {
        let config = config_with("home", Profile::default());
        let err = resolve_settings(&global(&["--profile", "work"]), &config).unwrap_err();
        assert!(matches!(err, CliError::ProfileNotFound { ref available, .. } if available == "home"));
    }

    #[test]
    fn missing_config_reports_no_config() {
        let err = resolve_settings(&global(&[]), &Config::default()).unwrap_err();
        assert!(matches!(err, CliError::NoConfig { .. }));
    }

    #[test]
    fn output_falls_back_to_config_default() {
        let mut config = Config::default();
        config.defaults.output = "yaml".into();
        assert_eq!(output_format(&global(&[]), &config), OutputFormat::Yaml);
        assert_eq!(output_format(&global(&["-o", "json"]), &config), OutputFormat::Json);

        config.defaults.output = "bogus".into();
        assert_eq!(output_format(&global(&[]), &config), OutputFormat::Table);
    }
}
