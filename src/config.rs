use thiserror::Error;

/// 既定の待ち受けポート
pub const DEFAULT_PORT: u16 = 3000;

/// 待ち受けアドレス（全インターフェース）
pub const LISTEN_HOST: &str = "0.0.0.0";

/// 設定読み込みのエラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("PORT must be a number between 0 and 65535, got {0:?}")]
    InvalidPort(String),
}

/// サーバー設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub port: u16,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self { port: DEFAULT_PORT }
    }
}

impl AppConfig {
    /// 環境変数 `PORT` から読み込む
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から読み込む
    ///
    /// 未設定や空文字列は既定値。`PORT`が数値でなければエラー。
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(port) = lookup("PORT").filter(|p| !p.trim().is_empty()) {
            config.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidPort(port.clone()))?;
        }

        Ok(config)
    }

    /// `0.0.0.0:port`形式のアドレス
    pub fn bind_address(&self) -> String {
        format!("{}:{}", LISTEN_HOST, self.port)
    }
}
