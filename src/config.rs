use std::path::Path;

use anyhow::bail;
use getset::{CopyGetters, Getters};
use log::info;
use serde::Deserialize;
use url::Url;

use crate::{api::UserIdentifier, fs_json_util::read_toml, maimai::best::PoolSizes};

pub const DEFAULT_CONFIG_PATH: &str = "ignore/maimai-b50.toml";

#[derive(Clone, PartialEq, Eq, Debug, Default, Getters, CopyGetters, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    #[getset(get = "pub")]
    username: Option<String>,
    #[serde(default)]
    #[getset(get = "pub")]
    qq: Option<String>,
    #[serde(default)]
    #[getset(get = "pub")]
    endpoint: Option<Url>,
    #[serde(default)]
    #[getset(get_copy = "pub")]
    pool_sizes: PoolSizes,
}

impl Config {
    /// Loads the config at `path`.  Without an explicit path, the default path is tried,
    /// and its absence is not an error.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => read_toml(path),
            None => {
                let path = Path::new(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    read_toml(path)
                } else {
                    info!("No config found at {path:?}.  Using the default config.");
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn user_identifier(&self) -> anyhow::Result<Option<UserIdentifier>> {
        user_identifier(self.username.clone(), self.qq.clone())
    }
}

pub fn user_identifier(
    username: Option<String>,
    qq: Option<String>,
) -> anyhow::Result<Option<UserIdentifier>> {
    Ok(match (username, qq) {
        (Some(_), Some(_)) => bail!("Specify either a username or a QQ number, not both"),
        (Some(username), None) => Some(UserIdentifier::Username(username)),
        (None, Some(qq)) => Some(UserIdentifier::Qq(qq)),
        (None, None) => None,
    })
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use crate::{api::UserIdentifier, maimai::best::PoolSizes};

    use super::Config;

    #[test]
    fn parse_full_config() {
        let config: Config = toml::from_str(
            r#"
            username = "player"
            endpoint = "http://localhost:8000/query"

            [pool_sizes]
            legacy = 30
            current = 20
            "#,
        )
        .unwrap();
        assert_eq!(
            config.user_identifier().unwrap(),
            Some(UserIdentifier::Username("player".to_owned()))
        );
        assert_eq!(
            config.endpoint().as_ref().map(|x| x.as_str()),
            Some("http://localhost:8000/query")
        );
        assert_eq!(config.pool_sizes(), PoolSizes::new(30, 20));
    }

    #[test]
    fn parse_empty_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.user_identifier().unwrap(), None);
        assert_eq!(config.pool_sizes(), PoolSizes::new(35, 15));
    }

    #[test]
    fn conflicting_identifiers() {
        let config: Config = toml::from_str("username = \"a\"\nqq = \"1\"").unwrap();
        assert!(config.user_identifier().is_err());
        let config: Config = toml::from_str("qq = \"1\"").unwrap();
        assert_eq!(
            config.user_identifier().unwrap(),
            Some(UserIdentifier::Qq("1".to_owned()))
        );
    }

    #[test]
    fn unknown_key_is_rejected() {
        assert!(toml::from_str::<Config>("user_id = \"a\"").is_err());
        assert!(toml::from_str::<Config>("[pool_sizes]\nlegcy = 30").is_err());
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "maimai-b50-config-{}.toml",
            std::process::id()
        ));
        fs_err::write(&path, "username = \"player\"\n[pool_sizes]\ncurrent = 10\n").unwrap();
        let config = Config::load(Some(path.as_path())).unwrap();
        fs_err::remove_file(&path).unwrap();
        assert_eq!(config.username().as_deref(), Some("player"));
        assert_eq!(config.pool_sizes(), PoolSizes::new(35, 10));

        assert!(Config::load(Some(Path::new("/nonexistent/maimai-b50.toml"))).is_err());
    }
}
