pub mod config;
pub mod connectors;
pub mod plugin;
pub mod utils;

pub use connectors::{github::GithubConnector, wallet::WalletConnector};
pub use plugin::{Connector, ExternalLoginUser};
