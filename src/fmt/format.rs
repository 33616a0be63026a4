//! Line assembly: where the timestamp, call site, level tag, logger name and message
//! body end up in each emitted line.
//!
//! The order is a template, so tag-before-name and name-before-tag layouts
//! are both expressible. The default puts the tag first.

use crate::internal;
use crate::level::Level;
use chrono::format::{Item, StrftimeItems};
use chrono::{Local, Utc};
use std::borrow::Cow;
use std::fmt::Write as _;
use std::panic::Location;
use std::path::Path;

/// Tag first, then the logger name, then the body.
pub const DEFAULT_TEMPLATE: &str = "{timestamp}{caller}{tag} {name}{msg}";
/// `2006/01/02 15:04:05` style.
pub const DEFAULT_TIMESTAMP: &str = "%Y/%m/%d %H:%M:%S";

/// Closed set of known substitution tokens. Unknown `{names}` pass through as literal text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// Formatted time plus a trailing space, or nothing when timestamps are off.
    Timestamp,
    /// `file:line: ` of the logging call, or nothing when call sites are off.
    Caller,
    /// Fixed level tag such as `INFO`.
    Tag,
    /// Lowercase level name.
    Level,
    /// Logger name, verbatim.
    Name,
    /// Message body.
    Msg,
}

impl Placeholder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timestamp => "timestamp",
            Self::Caller => "caller",
            Self::Tag => "tag",
            Self::Level => "level",
            Self::Name => "name",
            Self::Msg => "msg",
        }
    }

    pub const ALL: &'static [Self] = &[
        Self::Timestamp,
        Self::Caller,
        Self::Tag,
        Self::Level,
        Self::Name,
        Self::Msg,
    ];
}

/// Parsing into segments once avoids re-scanning the template on every log line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Literal(String),
    Placeholder(Placeholder),
}

/// Everything a template can reference for one line.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineValues<'a> {
    pub timestamp: &'a str,
    pub caller: &'a str,
    pub tag: &'a str,
    pub level: &'a str,
    pub name: &'a str,
    pub msg: &'a str,
}

/// Pre-parsed line layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineTemplate {
    segments: Vec<Segment>,
}

impl LineTemplate {
    #[must_use]
    pub fn parse(template: &str) -> Self {
        let mut segments = Vec::new();
        let mut current = String::new();
        let mut rest = template;

        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|i| open + i) else {
                break;
            };
            current.push_str(&rest[..open]);
            let name = &rest[open + 1..close];

            if let Some(ph) = Placeholder::ALL.iter().find(|ph| ph.as_str() == name) {
                if !current.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current)));
                }
                segments.push(Segment::Placeholder(*ph));
            } else {
                current.push_str(&rest[open..=close]);
            }
            rest = &rest[close + 1..];
        }

        current.push_str(rest);
        if !current.is_empty() {
            segments.push(Segment::Literal(current));
        }

        Self { segments }
    }

    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    #[must_use]
    pub fn render(&self, values: &LineValues<'_>) -> String {
        let mut line = String::with_capacity(64 + values.msg.len());

        for segment in &self.segments {
            match segment {
                Segment::Literal(s) => line.push_str(s),
                Segment::Placeholder(ph) => line.push_str(match ph {
                    Placeholder::Timestamp => values.timestamp,
                    Placeholder::Caller => values.caller,
                    Placeholder::Tag => values.tag,
                    Placeholder::Level => values.level,
                    Placeholder::Name => values.name,
                    Placeholder::Msg => values.msg,
                }),
            }
        }

        line
    }
}

impl Default for LineTemplate {
    fn default() -> Self {
        Self::parse(DEFAULT_TEMPLATE)
    }
}

/// How the logging call site is recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Caller {
    #[default]
    Off,
    /// File name and line.
    Short,
    /// Full source path and line.
    Long,
}

impl Caller {
    /// Lenient like level parsing: anything unknown turns call sites off.
    #[must_use]
    pub fn parse_lenient(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "short" | "file" => Self::Short,
            "long" | "path" => Self::Long,
            _ => Self::Off,
        }
    }
}

/// Everything that shapes a line apart from the logger's name. Shared by derived loggers.
#[derive(Debug, Clone)]
pub struct LineFormat {
    template: LineTemplate,
    timestamp: Option<String>,
    utc: bool,
    caller: Caller,
}

impl Default for LineFormat {
    fn default() -> Self {
        Self {
            template: LineTemplate::default(),
            timestamp: Some(DEFAULT_TIMESTAMP.to_string()),
            utc: false,
            caller: Caller::Off,
        }
    }
}

impl LineFormat {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn template(mut self, template: &str) -> Self {
        self.template = LineTemplate::parse(template);
        self
    }

    /// strftime pattern; an empty pattern turns timestamps off.
    ///
    /// A pattern chrono cannot format is reported and replaced by [`DEFAULT_TIMESTAMP`].
    #[must_use]
    pub fn timestamp(mut self, pattern: impl Into<String>) -> Self {
        let mut pattern = pattern.into();
        if StrftimeItems::new(&pattern).any(|item| matches!(item, Item::Error)) {
            internal::warn(
                "FORMAT",
                &format!("Invalid timestamp pattern '{pattern}', using '{DEFAULT_TIMESTAMP}'"),
            );
            pattern = DEFAULT_TIMESTAMP.to_string();
        }
        self.timestamp = (!pattern.is_empty()).then_some(pattern);
        self
    }

    #[must_use]
    pub const fn utc(mut self, utc: bool) -> Self {
        self.utc = utc;
        self
    }

    #[must_use]
    pub const fn caller(mut self, caller: Caller) -> Self {
        self.caller = caller;
        self
    }

    /// Assembles one newline-terminated line.
    #[must_use]
    pub fn render(&self, level: Level, name: &str, location: &Location<'_>, body: &str) -> String {
        let timestamp = self.render_timestamp();
        let caller = self.render_caller(location);

        let mut line = self.template.render(&LineValues {
            timestamp: &timestamp,
            caller: &caller,
            tag: level.tag(),
            level: level.as_str(),
            name,
            msg: body,
        });

        if !line.ends_with('\n') {
            line.push('\n');
        }
        line
    }

    fn render_timestamp(&self) -> String {
        let Some(pattern) = &self.timestamp else {
            return String::new();
        };

        let mut stamp = String::new();
        let _ = if self.utc {
            write!(stamp, "{} ", Utc::now().format(pattern))
        } else {
            write!(stamp, "{} ", Local::now().format(pattern))
        };
        stamp
    }

    fn render_caller(&self, location: &Location<'_>) -> String {
        let file = match self.caller {
            Caller::Off => return String::new(),
            Caller::Short => Path::new(location.file())
                .file_name()
                .map_or(Cow::Borrowed(location.file()), |f| f.to_string_lossy()),
            Caller::Long => Cow::Borrowed(location.file()),
        };
        format!("{file}:{}: ", location.line())
    }
}
