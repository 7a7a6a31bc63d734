// connectors/wallet.rs
use async_trait::async_trait;
use serde::Deserialize;

use crate::config::{ConfigError, ConfigSlot};
use crate::plugin::{
    ConfigField, ConfigFieldKind, ConfigFieldOption, Connector, ExternalLoginUser, LoginError,
    PluginInfo,
};

const LOGO_SVG: &str = "PHN2ZyB0PSIxNzE3ODM1NzkwNTM1IiBjbGFzcz0iaWNvbiIgdmlld0JveD0iMCAwIDEwMjQgMTAyNCIgdmVyc2lvbj0iMS4xIiB4bWxucz0iaHR0cDovL3d3dy53My5vcmcvMjAwMC9zdmciIHAtaWQ9IjMyNjU3IiB3aWR0aD0iMjAwIiBoZWlnaHQ9IjIwMCI+PHBhdGggZD0iTTgxMC42NjY2NjcgMjk4LjY2NjY2N2gtNDIuNjY2NjY3VjI1NmExMjggMTI4IDAgMCAwLTEyOC0xMjhIMjEzLjMzMzMzM2ExMjggMTI4IDAgMCAwLTEyOCAxMjh2NTEyYTEyOCAxMjggMCAwIDAgMTI4IDEyOGg1OTcuMzMzMzM0YTEyOCAxMjggMCAwIDAgMTI4LTEyOHYtMzQxLjMzMzMzM2ExMjggMTI4IDAgMCAwLTEyOC0xMjh6TTIxMy4zMzMzMzMgMjEzLjMzMzMzM2g0MjYuNjY2NjY3YTQyLjY2NjY2NyA0Mi42NjY2NjcgMCAwIDEgNDIuNjY2NjY3IDQyLjY2NjY2N3Y0Mi42NjY2NjdIMjEzLjMzMzMzM2E0Mi42NjY2NjcgNDIuNjY2NjY3IDAgMCAxIDAtODUuMzMzMzM0eiBtNjQwIDQyNi42NjY2NjdoLTQyLjY2NjY2NmE0Mi42NjY2NjcgNDIuNjY2NjY3IDAgMCAxIDAtODUuMzMzMzMzaDQyLjY2NjY2NnogbTAtMTcwLjY2NjY2N2gtNDIuNjY2NjY2YTEyOCAxMjggMCAwIDAgMCAyNTZoNDIuNjY2NjY2djQyLjY2NjY2N2E0Mi42NjY2NjcgNDIuNjY2NjY3IDAgMCAxLTQyLjY2NjY2NiA0Mi42NjY2NjdIMjEzLjMzMzMzM2E0Mi42NjY2NjcgNDIuNjY2NjY3IDAgMCAxLTQyLjY2NjY2Ni00Mi42NjY2NjdWMzc2Ljc0NjY2N0ExMjggMTI4IDAgMCAwIDIxMy4zMzMzMzMgMzg0aDU5Ny4zMzMzMzRhNDIuNjY2NjY3IDQyLjY2NjY2NyAwIDAgMSA0Mi42NjY2NjYgNDIuNjY2NjY3eiIgcC1pZD0iMzI2NTgiPjwvcGF0aD48L3N2Zz4=";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct WalletConfig {
    pub signature_method: String,
}

/// Inert placeholder connector. It exercises the plugin surface without
/// talking to any provider: no redirect target, empty login result.
pub struct WalletConnector {
    config: ConfigSlot<WalletConfig>,
}

impl WalletConnector {
    pub fn new() -> Self {
        Self {
            config: ConfigSlot::default(),
        }
    }
}

impl Default for WalletConnector {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Connector for WalletConnector {
    fn info(&self) -> PluginInfo {
        PluginInfo {
            name: "Wallet",
            slug_name: "wallet_connector",
            description: "Sign in with a crypto wallet",
            author: "quorum-dev",
            version: "0.0.1",
            link: "https://github.com/quorum-oss/quorum-plugins/tree/main/connector-wallet",
        }
    }

    fn logo_svg(&self) -> &'static str {
        LOGO_SVG
    }

    fn slug(&self) -> &'static str {
        "wallet"
    }

    fn config_fields(&self) -> Vec<ConfigField> {
        let config = self.config.current();
        vec![ConfigField {
            name: "signature_method",
            kind: ConfigFieldKind::Select,
            title: "Signature Method",
            description: "How the wallet signing challenge is derived",
            required: true,
            value: config.signature_method.clone(),
            options: vec![
                ConfigFieldOption {
                    value: "nonce",
                    label: "Nonce",
                },
                ConfigFieldOption {
                    value: "timestamp",
                    label: "Timestamp",
                },
                ConfigFieldOption {
                    value: "random",
                    label: "Random",
                },
            ],
        }]
    }

    fn apply_config(&self, raw: &[u8]) -> Result<(), ConfigError> {
        self.config.replace_from_slice(raw)
    }

    fn authorization_url(&self, _callback_url: &str) -> String {
        String::new()
    }

    async fn complete_login(&self, _code: &str) -> Result<ExternalLoginUser, LoginError> {
        Ok(ExternalLoginUser::default())
    }
}
