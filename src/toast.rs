//! Toast records and their options.
//!
//! A [`Toast`] is created by the manager from caller-supplied [`ToastContent`]
//! and [`ToastOptions`]. Options are merged field by field over the manager's
//! defaults, so a record always carries fully [`ResolvedOptions`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use uuid::Uuid;

/// Default auto-dismiss delay
pub const DEFAULT_DURATION: Duration = Duration::from_millis(3000);

/// Opaque toast identifier, unique for the lifetime of the process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ToastId(Uuid);

impl ToastId {
    /// Generate a fresh random identifier
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ToastId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ToastId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for ToastId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Toast type, used for styling only
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToastType {
    /// Operation completed
    Success,
    /// Something failed
    Error,
    /// Neutral information
    #[default]
    Info,
    /// Needs attention
    Warning,
}

impl ToastType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToastType::Success => "success",
            ToastType::Error => "error",
            ToastType::Info => "info",
            ToastType::Warning => "warning",
        }
    }

    /// Class applied to the toast node, e.g. `toastr-success`
    pub fn class_name(&self) -> String {
        format!("toastr-{}", self.as_str())
    }
}

impl fmt::Display for ToastType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToastType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(ToastType::Success),
            "error" => Ok(ToastType::Error),
            "info" => Ok(ToastType::Info),
            "warning" => Ok(ToastType::Warning),
            other => Err(format!("unknown toast type: {other}")),
        }
    }
}

/// Anchor of the shared host surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Position {
    #[default]
    TopRight,
    TopLeft,
    BottomRight,
    BottomLeft,
    TopCenter,
    BottomCenter,
}

impl Position {
    /// Every position, in the order their classes are cleared from the host
    pub const ALL: [Position; 6] = [
        Position::TopRight,
        Position::TopLeft,
        Position::BottomRight,
        Position::BottomLeft,
        Position::TopCenter,
        Position::BottomCenter,
    ];

    /// Class name applied to the host
    pub fn as_class(&self) -> &'static str {
        match self {
            Position::TopRight => "top-right",
            Position::TopLeft => "top-left",
            Position::BottomRight => "bottom-right",
            Position::BottomLeft => "bottom-left",
            Position::TopCenter => "top-center",
            Position::BottomCenter => "bottom-center",
        }
    }

    pub fn is_top(&self) -> bool {
        matches!(
            self,
            Position::TopRight | Position::TopLeft | Position::TopCenter
        )
    }

    /// Resolve a host class back to its position
    pub fn from_class(class: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.as_class() == class)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_class())
    }
}

impl FromStr for Position {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_class(&s.to_lowercase()).ok_or_else(|| format!("unknown position: {s}"))
    }
}

/// What a toast displays
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToastContent {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: ToastType,
}

impl ToastContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    pub fn kind(mut self, kind: ToastType) -> Self {
        self.kind = kind;
        self
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::new(title).kind(ToastType::Success)
    }

    pub fn error(title: impl Into<String>) -> Self {
        Self::new(title).kind(ToastType::Error)
    }

    pub fn info(title: impl Into<String>) -> Self {
        Self::new(title).kind(ToastType::Info)
    }

    pub fn warning(title: impl Into<String>) -> Self {
        Self::new(title).kind(ToastType::Warning)
    }
}

impl From<&str> for ToastContent {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for ToastContent {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

/// Caller-supplied options; every unset field takes the manager default
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ToastOptions {
    #[serde(rename = "duration_ms", with = "millis")]
    pub duration: Option<Duration>,
    pub position: Option<Position>,
    pub close_button: Option<bool>,
    pub progress_bar: Option<bool>,
    pub class_name: Option<String>,
}

impl ToastOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Auto-dismiss delay; zero keeps the toast until it is removed
    pub fn duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn position(mut self, position: Position) -> Self {
        self.position = Some(position);
        self
    }

    pub fn close_button(mut self, enabled: bool) -> Self {
        self.close_button = Some(enabled);
        self
    }

    pub fn progress_bar(mut self, enabled: bool) -> Self {
        self.progress_bar = Some(enabled);
        self
    }

    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = Some(class_name.into());
        self
    }

    /// Shallow merge over `defaults`: each set field wins independently
    pub fn resolve(&self, defaults: &ResolvedOptions) -> ResolvedOptions {
        ResolvedOptions {
            duration: self.duration.unwrap_or(defaults.duration),
            position: self.position.unwrap_or(defaults.position),
            close_button: self.close_button.unwrap_or(defaults.close_button),
            progress_bar: self.progress_bar.unwrap_or(defaults.progress_bar),
            class_name: self
                .class_name
                .clone()
                .or_else(|| defaults.class_name.clone()),
        }
    }
}

/// Options after defaults are merged in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedOptions {
    #[serde(rename = "duration_ms", with = "millis::required")]
    pub duration: Duration,
    pub position: Position,
    pub close_button: bool,
    pub progress_bar: bool,
    pub class_name: Option<String>,
}

impl ResolvedOptions {
    /// Delay before the toast dismisses itself, if it does
    pub fn auto_dismiss(&self) -> Option<Duration> {
        (!self.duration.is_zero()).then_some(self.duration)
    }
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            duration: DEFAULT_DURATION,
            position: Position::default(),
            close_button: true,
            progress_bar: true,
            class_name: None,
        }
    }
}

/// One live toast record
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Toast {
    pub id: ToastId,
    pub title: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: ToastType,
    pub icon: Option<String>,
    pub options: ResolvedOptions,
}

impl Toast {
    pub(crate) fn new(content: ToastContent, options: ResolvedOptions) -> Self {
        Self {
            id: ToastId::new(),
            title: content.title,
            description: content.description,
            kind: content.kind,
            icon: content.icon,
            options,
        }
    }
}

/// Durations as whole milliseconds in config and script files
mod millis {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(d) => s.serialize_some(&(d.as_millis() as u64)),
            None => s.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }

    pub mod required {
        use serde::{Deserialize, Deserializer, Serializer};
        use std::time::Duration;

        pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
            s.serialize_u64(value.as_millis() as u64)
        }

        pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
            u64::deserialize(d).map(Duration::from_millis)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_fills_every_unset_field() {
        let resolved = ToastOptions::new().resolve(&ResolvedOptions::default());
        assert_eq!(resolved, ResolvedOptions::default());
        assert_eq!(resolved.auto_dismiss(), Some(Duration::from_millis(3000)));
    }

    #[test]
    fn test_resolve_is_shallow_per_field() {
        let options = ToastOptions::new()
            .position(Position::BottomLeft)
            .close_button(false);
        let resolved = options.resolve(&ResolvedOptions::default());

        assert_eq!(resolved.position, Position::BottomLeft);
        assert!(!resolved.close_button);
        // Untouched fields keep their defaults
        assert!(resolved.progress_bar);
        assert_eq!(resolved.duration, DEFAULT_DURATION);
    }

    #[test]
    fn test_zero_duration_never_auto_dismisses() {
        let resolved = ToastOptions::new()
            .duration(Duration::ZERO)
            .resolve(&ResolvedOptions::default());
        assert_eq!(resolved.auto_dismiss(), None);
    }

    #[test]
    fn test_position_round_trips_through_class() {
        for position in Position::ALL {
            assert_eq!(Position::from_class(position.as_class()), Some(position));
        }
        assert_eq!("Bottom-Center".parse::<Position>(), Ok(Position::BottomCenter));
        assert!("middle".parse::<Position>().is_err());
    }

    #[test]
    fn test_toast_type_class_name() {
        assert_eq!(ToastType::Warning.class_name(), "toastr-warning");
        assert_eq!(ToastType::default(), ToastType::Info);
    }

    #[test]
    fn test_toast_id_parses_its_display_form() {
        let id = ToastId::new();
        assert_eq!(id.to_string().parse::<ToastId>().unwrap(), id);
        assert_ne!(ToastId::new(), id);
    }

    #[test]
    fn test_options_deserialize_from_toml() {
        let options: ToastOptions =
            toml::from_str("duration_ms = 2000\nposition = \"top-center\"\n").unwrap();
        assert_eq!(options.duration, Some(Duration::from_millis(2000)));
        assert_eq!(options.position, Some(Position::TopCenter));
        assert_eq!(options.close_button, None);
    }
}
