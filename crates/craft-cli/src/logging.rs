//! 日誌初始化（`tracing` + `tracing-subscriber`）
//!
//! 預設只輸出 warn 以上，互動選單的畫面不會被日誌打斷。
//! 設定了 `RUST_LOG` 且未指定 `-v`/`-q` 時，以環境變數為準。

use std::io;

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, MakeWriter},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
};

/// 日誌設定
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// 等級上限
    pub level_filter: LevelFilter,
    /// 是否允許 `RUST_LOG` 覆寫等級
    pub use_env_filter: bool,
    /// 是否輸出 ANSI 色碼
    pub with_ansi: bool,
    /// 輸出格式
    pub format: LogFormat,
}

/// 日誌輸出格式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// 多行、易讀
    #[default]
    Pretty,
    /// 單行
    Compact,
    /// JSON
    Json,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level_filter: LevelFilter::WARN,
            use_env_filter: true,
            with_ansi: true,
            format: LogFormat::default(),
        }
    }
}

impl LogConfig {
    #[must_use]
    pub fn with_level_filter(mut self, level_filter: LevelFilter) -> Self {
        self.level_filter = level_filter;
        self
    }

    #[must_use]
    pub fn with_env_filter(mut self, enable: bool) -> Self {
        self.use_env_filter = enable;
        self
    }

    #[must_use]
    pub fn with_ansi(mut self, enable: bool) -> Self {
        self.with_ansi = enable;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }
}

/// 安裝全域 subscriber，輸出到 stderr
///
/// 只能在程式啟動時呼叫一次。
pub fn init_logging(config: &LogConfig) -> anyhow::Result<()> {
    init_logging_with_writer(config, io::stderr)
}

/// 以自訂輸出安裝全域 subscriber
pub fn init_logging_with_writer<W>(config: &LogConfig, writer: W) -> anyhow::Result<()>
where
    W: for<'writer> MakeWriter<'writer> + Send + Sync + 'static,
{
    let filter = build_env_filter(config);

    match config.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(writer).with_target(false))
            .try_init()?,
        LogFormat::Compact => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .compact()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()?,
        LogFormat::Pretty => tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_writer(writer)
                    .with_ansi(config.with_ansi)
                    .with_target(false)
                    .without_time(),
            )
            .try_init()?,
    }

    Ok(())
}

/// 建立過濾器：本專案的 crate 使用指定等級，其他 crate 維持 warn
fn build_env_filter(config: &LogConfig) -> EnvFilter {
    if config.use_env_filter {
        if let Ok(filter) = EnvFilter::try_from_default_env() {
            return filter;
        }
    }
    EnvFilter::new(default_directives(config.level_filter))
}

fn default_directives(level_filter: LevelFilter) -> String {
    let level = level_filter.to_string().to_lowercase();
    format!(
        "warn,craft_cli={level},craft_core={level},craft_calc={level},craft_store={level},mincecalc={level}"
    )
}
