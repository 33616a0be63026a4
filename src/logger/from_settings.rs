//! Logger construction from [`Settings`].

use super::{Logger, LoggerBuilder};
use crate::config::Settings;
use crate::internal;

impl Logger {
    /// Builds a logger named `name` as the settings describe.
    ///
    /// A file destination that cannot be opened is reported through the crate's
    /// diagnostics and dropped; construction itself never fails.
    #[must_use]
    pub fn new(name: impl Into<String>, settings: &Settings) -> Self {
        let mut builder = LoggerBuilder::new()
            .name(name)
            .format(settings.line_format());
        let mut outputs: Vec<&str> = Vec::new();

        if settings.console.enabled {
            builder = Self::configure_console(builder, settings);
            outputs.push("console");
        }

        if settings.file.enabled {
            builder = Self::configure_file(builder, settings);
            outputs.push("file");
        }

        if outputs.is_empty() {
            internal::warn("LOGGER", "No outputs enabled");
        } else {
            internal::debug(
                "LOGGER",
                &format!("Outputs enabled: [{}]", outputs.join(", ")),
            );
        }

        builder.build()
    }

    /// Loads `<config dir>/<app>/log.toml` and builds from it; unreadable settings
    /// are reported and replaced by defaults.
    #[must_use]
    pub fn from_app(name: impl Into<String>, app: &str) -> Self {
        let settings = Settings::load(app).unwrap_or_else(|e| {
            internal::warn("CONFIG", &format!("{e}, using defaults"));
            Settings::default()
        });
        Self::new(name, &settings)
    }

    fn configure_console(builder: LoggerBuilder, settings: &Settings) -> LoggerBuilder {
        let level = settings.console_level();
        internal::debug(
            "CONSOLE",
            &format!("level={level}, color={}", settings.console.color),
        );

        settings
            .color_overrides()
            .into_iter()
            .fold(builder.colors(settings.console.color), |b, (level, color)| {
                b.level_color(level, Some(color))
            })
            .console(level)
    }

    fn configure_file(builder: LoggerBuilder, settings: &Settings) -> LoggerBuilder {
        let path = settings.file_location();
        let level = settings.file_level();
        internal::debug(
            "FILE",
            &format!("path={}, level={level}", path.display()),
        );

        builder
            .file(path)
            .level(level)
            .limit(settings.size_limit())
            .backups(settings.file.backup_count)
            .buffer_size(settings.file.buffer_size)
            .mode(settings.file.mode)
            .done()
    }
}
