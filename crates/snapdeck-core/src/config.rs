use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub use crate::input::Axis;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub gesture: GestureConfig,
    #[serde(default)]
    pub throttle: ThrottleConfig,
    #[serde(default)]
    pub navigation: NavigationConfig,
    #[serde(default)]
    pub touch: TouchConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level used when RUST_LOG is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Momentum classifier tuning
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Samples with a smaller absolute magnitude are treated as sensor noise
    #[serde(default = "default_min_delta")]
    pub min_delta: f64,
    /// Samples further apart than this always start a new gesture
    #[serde(default = "default_min_time_gap")]
    pub min_time_gap_ms: u64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_delta: default_min_delta(),
            min_time_gap_ms: default_min_time_gap(),
        }
    }
}

/// Throttle windows applied after an accepted navigation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThrottleConfig {
    /// Window after an intentional gesture
    #[serde(default = "default_normal_throttle")]
    pub normal_ms: u64,
    /// Window while a momentum cascade is running; must outlast the whole cascade
    #[serde(default = "default_momentum_throttle")]
    pub momentum_ms: u64,
}

impl Default for ThrottleConfig {
    fn default() -> Self {
        Self {
            normal_ms: default_normal_throttle(),
            momentum_ms: default_momentum_throttle(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NavigationConfig {
    /// Section shown at startup (clamped to the section count)
    #[serde(default)]
    pub initial_index: usize,
    /// Per-transition timeout that releases the transition lock
    #[serde(default = "default_safety_timeout")]
    pub safety_timeout_ms: u64,
    /// Age after which the watchdog force-releases a stuck transition
    #[serde(default = "default_stall_threshold")]
    pub stall_threshold_ms: u64,
    /// Watchdog period
    #[serde(default = "default_watchdog_interval")]
    pub watchdog_interval_ms: u64,
    /// Visible ratio (0.0-1.0] at which the target counts as arrived
    #[serde(default = "default_visibility_threshold")]
    pub visibility_threshold: f64,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            initial_index: 0,
            safety_timeout_ms: default_safety_timeout(),
            stall_threshold_ms: default_stall_threshold(),
            watchdog_interval_ms: default_watchdog_interval(),
            visibility_threshold: default_visibility_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TouchConfig {
    /// Shorter swipes are ignored
    #[serde(default = "default_min_swipe_distance")]
    pub min_swipe_distance: f64,
    /// Slower swipes are ignored
    #[serde(default = "default_max_swipe_duration")]
    pub max_swipe_duration_ms: u64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            min_swipe_distance: default_min_swipe_distance(),
            max_swipe_duration_ms: default_max_swipe_duration(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Magnitude reported for one terminal wheel notch
    #[serde(default = "default_wheel_line_delta")]
    pub wheel_line_delta: f64,
    /// Navigation axis of the deck
    #[serde(default)]
    pub axis: Axis,
    /// Transition animation
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            wheel_line_delta: default_wheel_line_delta(),
            axis: Axis::default(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve used by the transition animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    Linear,
    #[default]
    Cubic,
    Quintic,
}

/// Transition animation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate transitions; when false every transition is immediate
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while an animation is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("snapdeck")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_min_delta() -> f64 {
    4.0
}

fn default_min_time_gap() -> u64 {
    1500
}

fn default_normal_throttle() -> u64 {
    600
}

fn default_momentum_throttle() -> u64 {
    1800 // long enough to swallow a full trackpad inertia tail
}

fn default_safety_timeout() -> u64 {
    2000
}

fn default_stall_threshold() -> u64 {
    5000
}

fn default_watchdog_interval() -> u64 {
    1000
}

fn default_visibility_threshold() -> f64 {
    0.5
}

fn default_min_swipe_distance() -> f64 {
    50.0
}

fn default_max_swipe_duration() -> u64 {
    800
}

fn default_tick_rate() -> u64 {
    100
}

fn default_wheel_line_delta() -> f64 {
    100.0
}

fn default_animation_duration() -> u64 {
    350
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl GestureConfig {
    pub fn min_time_gap(&self) -> Duration {
        Duration::from_millis(self.min_time_gap_ms)
    }
}

impl ThrottleConfig {
    pub fn normal(&self) -> Duration {
        Duration::from_millis(self.normal_ms)
    }

    pub fn momentum(&self) -> Duration {
        Duration::from_millis(self.momentum_ms)
    }
}

impl NavigationConfig {
    pub fn safety_timeout(&self) -> Duration {
        Duration::from_millis(self.safety_timeout_ms)
    }

    pub fn stall_threshold(&self) -> Duration {
        Duration::from_millis(self.stall_threshold_ms)
    }

    pub fn watchdog_interval(&self) -> Duration {
        Duration::from_millis(self.watchdog_interval_ms)
    }
}

impl TouchConfig {
    pub fn max_swipe_duration(&self) -> Duration {
        Duration::from_millis(self.max_swipe_duration_ms)
    }
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from an explicit path, falling back to defaults when it does not exist
    pub fn load_from(path: &std::path::Path) -> crate::Result<Self> {
        let config = if path.exists() {
            let content = std::fs::read_to_string(path)?;
            toml::from_str(&content)?
        } else {
            Self::default()
        };
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, path: &std::path::Path) -> crate::Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Reject combinations the navigation core cannot work with
    pub fn validate(&self) -> crate::Result<()> {
        use crate::Error;

        if self.gesture.min_time_gap_ms == 0 {
            return Err(Error::Config("gesture.min_time_gap_ms must be positive".into()));
        }
        if self.throttle.momentum_ms < self.throttle.normal_ms {
            return Err(Error::Config(format!(
                "throttle.momentum_ms ({}) must not be shorter than throttle.normal_ms ({})",
                self.throttle.momentum_ms, self.throttle.normal_ms
            )));
        }
        if self.navigation.stall_threshold_ms <= self.navigation.safety_timeout_ms {
            return Err(Error::Config(format!(
                "navigation.stall_threshold_ms ({}) must exceed navigation.safety_timeout_ms ({})",
                self.navigation.stall_threshold_ms, self.navigation.safety_timeout_ms
            )));
        }
        if self.navigation.watchdog_interval_ms == 0 {
            return Err(Error::Config("navigation.watchdog_interval_ms must be positive".into()));
        }
        let ratio = self.navigation.visibility_threshold;
        if !(ratio > 0.0 && ratio <= 1.0) {
            return Err(Error::Config(format!(
                "navigation.visibility_threshold ({}) must be in (0, 1]",
                ratio
            )));
        }
        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/snapdeck/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("snapdeck")
            .join("config.toml")
    }

    /// Get the log file path
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("snapdeck.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
