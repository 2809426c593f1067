use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::tlog;

use super::models::Scope;

const DEFAULT_API_URL: &str = "https://api.sanity.io";
const STAGING_API_URL: &str = "https://api.sanity.work";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("--org and --project are mutually exclusive")]
    ConflictingFlags,
    #[error("SANITY_ORG_ID and SANITY_PROJECT_ID are mutually exclusive")]
    ConflictingEnv,
    #[error("no auth token found (use --token, SANITY_AUTH_TOKEN, or log in with the Sanity CLI)")]
    MissingToken,
}

/// Values supplied on the command line. Empty means "not given".
#[derive(Debug, Clone, Default)]
pub struct Flags {
    pub token: Option<String>,
    pub org: Option<String>,
    pub project: Option<String>,
    pub api_url: Option<String>,
    pub staging: bool,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub api_url: String,
    /// Pre-supplied scope; `None` means the scope picker is shown.
    pub scope: Option<Scope>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SanityCliConfig {
    #[serde(default)]
    auth_token: Option<String>,
}

impl Config {
    pub fn load(flags: &Flags) -> Result<Self, ConfigError> {
        let home = dirs::home_dir();
        Self::resolve(flags, |key| std::env::var(key).ok(), home.as_deref())
    }

    /// Flags win over environment variables, which win over the Sanity CLI
    /// config file found under `home`.
    pub fn resolve(
        flags: &Flags,
        lookup: impl Fn(&str) -> Option<String>,
        home: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let env = |key: &str| lookup(key).filter(|v| !v.is_empty());
        let flag = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());

        let flag_org = flag(&flags.org);
        let flag_project = flag(&flags.project);
        if flag_org.is_some() && flag_project.is_some() {
            return Err(ConfigError::ConflictingFlags);
        }

        let token = flag(&flags.token)
            .or_else(|| env("SANITY_AUTH_TOKEN"))
            .or_else(|| home.and_then(|h| read_cli_token(h, flags.staging)))
            .ok_or(ConfigError::MissingToken)?;

        let scope = match (flag_org, flag_project) {
            (Some(org), _) => Some(Scope::organization(org.clone(), org)),
            (_, Some(project)) => Some(Scope::project(project.clone(), project)),
            (None, None) => match (env("SANITY_ORG_ID"), env("SANITY_PROJECT_ID")) {
                (Some(_), Some(_)) => return Err(ConfigError::ConflictingEnv),
                (Some(org), None) => Some(Scope::organization(org.clone(), org)),
                (None, Some(project)) => Some(Scope::project(project.clone(), project)),
                (None, None) => None,
            },
        };

        let default_url = if flags.staging {
            STAGING_API_URL
        } else {
            DEFAULT_API_URL
        };
        let api_url = flag(&flags.api_url)
            .or_else(|| env("BLUEPRINTS_API_URL"))
            .unwrap_or_else(|| default_url.to_string());

        Ok(Self {
            token,
            api_url,
            scope,
        })
    }
}

fn cli_config_path(home: &Path, staging: bool) -> PathBuf {
    let dir = if staging { "sanity-staging" } else { "sanity" };
    home.join(".config").join(dir).join("config.json")
}

fn read_cli_token(home: &Path, staging: bool) -> Option<String> {
    let path = cli_config_path(home, staging);
    let content = std::fs::read_to_string(&path).ok()?;
    let parsed: SanityCliConfig = match serde_json::from_str(&content) {
        Ok(parsed) => parsed,
        Err(e) => {
            tlog!(warn, "ignoring unreadable {}: {}", path.display(), e);
            return None;
        }
    };
    parsed.auth_token.filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blueprints::models::ScopeKind;
    use std::collections::HashMap;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn with_token() -> Flags {
        Flags {
            token: Some("tok".into()),
            ..Flags::default()
        }
    }

    #[test]
    fn test_flags_are_mutually_exclusive() {
        let flags = Flags {
            org: Some("o1".into()),
            project: Some("p1".into()),
            ..with_token()
        };
        let err = Config::resolve(&flags, env_of(&[]), None).unwrap_err();
        assert_eq!(err, ConfigError::ConflictingFlags);
    }

    #[test]
    fn test_env_scope_is_mutually_exclusive() {
        let env = env_of(&[("SANITY_ORG_ID", "o1"), ("SANITY_PROJECT_ID", "p1")]);
        let err = Config::resolve(&with_token(), env, None).unwrap_err();
        assert_eq!(err, ConfigError::ConflictingEnv);
    }

    #[test]
    fn test_flag_scope_beats_env() {
        let flags = Flags {
            project: Some("p1".into()),
            ..with_token()
        };
        let env = env_of(&[("SANITY_ORG_ID", "o1")]);
        let cfg = Config::resolve(&flags, env, None).unwrap();
        let scope = cfg.scope.unwrap();
        assert_eq!(scope.kind, ScopeKind::Project);
        assert_eq!(scope.id, "p1");
        assert_eq!(scope.label, "p1");
    }

    #[test]
    fn test_no_scope_means_picker() {
        let cfg = Config::resolve(&with_token(), env_of(&[]), None).unwrap();
        assert!(cfg.scope.is_none());
        assert_eq!(cfg.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_missing_token() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::resolve(&Flags::default(), env_of(&[]), Some(dir.path())).unwrap_err();
        assert_eq!(err, ConfigError::MissingToken);
    }

    #[test]
    fn test_token_from_env_beats_cli_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = cli_config_path(dir.path(), false);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"authToken":"from-file"}"#).unwrap();

        let env = env_of(&[("SANITY_AUTH_TOKEN", "from-env")]);
        let cfg = Config::resolve(&Flags::default(), env, Some(dir.path())).unwrap();
        assert_eq!(cfg.token, "from-env");
    }

    #[test]
    fn test_token_from_staging_cli_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = cli_config_path(dir.path(), true);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, r#"{"authToken":"staging-token"}"#).unwrap();

        let flags = Flags {
            staging: true,
            ..Flags::default()
        };
        let cfg = Config::resolve(&flags, env_of(&[]), Some(dir.path())).unwrap();
        assert_eq!(cfg.token, "staging-token");
        assert_eq!(cfg.api_url, STAGING_API_URL);
    }

    #[test]
    fn test_api_url_override_order() {
        let flags = Flags {
            api_url: Some("http://localhost:3000".into()),
            ..with_token()
        };
        let env = env_of(&[("BLUEPRINTS_API_URL", "http://env")]);
        let cfg = Config::resolve(&flags, env, None).unwrap();
        assert_eq!(cfg.api_url, "http://localhost:3000");

        let env = env_of(&[("BLUEPRINTS_API_URL", "http://env")]);
        let cfg = Config::resolve(&with_token(), env, None).unwrap();
        assert_eq!(cfg.api_url, "http://env");
    }
}
