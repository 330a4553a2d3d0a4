use std::{
    fs::create_dir_all,
    path::{Path, PathBuf},
    sync::Arc,
};

use colorful::Colorful;
use tracing_subscriber::layer::SubscriberExt;

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: tracing::Level,
    pub logging_enabled: bool,
    pub logger_name: String,
    /// Where rolling log files go. `None` logs to the terminal only.
    pub log_dir: Option<PathBuf>,
    pub _tracing_guard: Option<Arc<tracing::subscriber::DefaultGuard>>,
}

impl LoggingConfig {
    pub fn new() -> Self {
        Default::default()
    }

    /// The per-user data directory for this crate's log files, if the platform has one.
    pub fn default_log_dir() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "clip_token_count")
            .map(|dirs| dirs.data_local_dir().join("logs"))
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: tracing::Level::INFO,
            logging_enabled: true,
            logger_name: "clip_token_count".to_string(),
            log_dir: None,
            _tracing_guard: None,
        }
    }
}

impl LoggingConfig {
    /// Installs the subscriber for the current thread. Dropping the config drops the guard.
    pub fn load_logger(&mut self) -> crate::Result<()> {
        self._tracing_guard = if self.logging_enabled {
            Some(Arc::new(self.create_logger()?))
        } else {
            None
        };

        println!(
            "{}",
            format!("Starting {} Logger", self.logger_name)
                .color(colorful::RGB::new(0, 139, 248))
                .bold()
        );

        Ok(())
    }

    fn create_logger(&self) -> crate::Result<tracing::subscriber::DefaultGuard> {
        let filter = tracing_subscriber::EnvFilter::builder()
            .with_default_directive(self.level.into())
            .from_env_lossy();

        let terminal_layer = tracing_subscriber::fmt::layer()
            .compact()
            .with_ansi(false)
            .with_writer(std::io::stdout);

        let file_layer = match &self.log_dir {
            Some(log_dir) => {
                if !Path::new(log_dir).exists() {
                    create_dir_all(log_dir)?;
                }
                let file_appender = tracing_appender::rolling::RollingFileAppender::builder()
                    .rotation(tracing_appender::rolling::Rotation::HOURLY)
                    .max_log_files(6)
                    .filename_prefix(&self.logger_name)
                    .filename_suffix("log")
                    .build(log_dir)
                    .map_err(std::io::Error::other)?;
                Some(
                    tracing_subscriber::fmt::layer()
                        .pretty()
                        .with_ansi(false)
                        .with_writer(file_appender),
                )
            }
            None => None,
        };

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(terminal_layer)
            .with(file_layer);

        Ok(tracing::subscriber::set_default(subscriber))
    }
}

pub trait LoggingConfigTrait {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig;

    fn logging_enabled(mut self, enabled: bool) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logging_enabled = enabled;
        self
    }

    fn logger_name<S: Into<String>>(mut self, logger_name: S) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().logger_name = logger_name.into();
        self
    }

    fn log_dir<P: Into<PathBuf>>(mut self, log_dir: P) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().log_dir = Some(log_dir.into());
        self
    }

    /// Log files go to [`LoggingConfig::default_log_dir`]. Terminal only if the platform has none.
    fn log_to_default_dir(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().log_dir = LoggingConfig::default_log_dir();
        self
    }

    /// TRACE: "I am here" flow, e.g. which token source was used.
    fn log_level_trace(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::TRACE;
        self
    }

    /// DEBUG: selections and loads, e.g. which repo a tokenizer came from.
    fn log_level_debug(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::DEBUG;
        self
    }

    fn log_level_info(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::INFO;
        self
    }

    fn log_level_warn(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::WARN;
        self
    }

    fn log_level_error(mut self) -> Self
    where
        Self: Sized,
    {
        self.logging_config_mut().level = tracing::Level::ERROR;
        self
    }
}

impl LoggingConfigTrait for LoggingConfig {
    fn logging_config_mut(&mut self) -> &mut LoggingConfig {
        self
    }
}
