//! Configuration with YAML schema and validation.
//!
//! Size ranges and playback speed are driver policy. The trace builders
//! enforce only their own caps (`1..=MAX_DISKS` disks, `1..=MAX_QUEENS`
//! queens), and configured limits may not exceed them. The defaults match
//! the classroom demos (Hanoi 1–6 disks, N-Queens 4–10, 0.5 s per step).

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use validator::Validate;

use crate::error::{TraceError, TraceResult};
use crate::trace::hanoi::MAX_DISKS;
use crate::trace::nqueens::MAX_QUEENS;
use crate::trace::ProblemKind;

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TraceConfig {
    /// Schema version for forward compatibility.
    #[validate(length(min = 1))]
    #[serde(default = "default_schema_version")]
    pub schema_version: String,

    /// Which problem to load at start-up.
    #[validate(nested)]
    #[serde(default)]
    pub problem: ProblemConfig,

    /// Auto-play settings.
    #[validate(nested)]
    #[serde(default)]
    pub playback: PlaybackConfig,

    /// Allowed problem sizes.
    #[validate(nested)]
    #[serde(default)]
    pub limits: SizeLimits,

    /// Trace log display.
    #[validate(nested)]
    #[serde(default)]
    pub log: LogConfig,
}

fn default_schema_version() -> String {
    "1.0".to_string()
}

impl Default for TraceConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            problem: ProblemConfig::default(),
            playback: PlaybackConfig::default(),
            limits: SizeLimits::default(),
            log: LogConfig::default(),
        }
    }
}

impl TraceConfig {
    /// Load configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read, parsing fails, or
    /// validation fails.
    pub fn load<P: AsRef<Path>>(path: P) -> TraceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns error if parsing or validation fails.
    pub fn from_yaml(yaml: &str) -> TraceResult<Self> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    /// Serialize to YAML.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_yaml(&self) -> TraceResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Create a builder.
    #[must_use]
    pub fn builder() -> TraceConfigBuilder {
        TraceConfigBuilder::default()
    }

    /// Run field validation plus the cross-field checks.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn check(&self) -> TraceResult<()> {
        // range validation lets NaN through
        if !self.playback.delay_secs.is_finite() {
            return Err(TraceError::config(format!(
                "playback delay must be a finite number of seconds, got {}",
                self.playback.delay_secs
            )));
        }
        self.validate()?;
        self.validate_semantic()
    }

    fn validate_semantic(&self) -> TraceResult<()> {
        for (kind, range, ceiling) in [
            (ProblemKind::Hanoi, &self.limits.hanoi, MAX_DISKS),
            (ProblemKind::NQueens, &self.limits.nqueens, MAX_QUEENS),
        ] {
            if range.min > range.max {
                return Err(TraceError::config(format!(
                    "{kind} limits inverted: min {} > max {}",
                    range.min, range.max
                )));
            }
            if range.max > ceiling {
                return Err(TraceError::config(format!(
                    "{kind} max {} exceeds supported maximum {ceiling}",
                    range.max
                )));
            }
        }

        self.limits.check(self.problem.kind, self.problem.size)
    }
}

/// Builder for programmatic construction.
#[derive(Debug, Default)]
pub struct TraceConfigBuilder {
    kind: Option<ProblemKind>,
    size: Option<usize>,
    delay_secs: Option<f64>,
    limits: Option<SizeLimits>,
    display_tail: Option<usize>,
}

impl TraceConfigBuilder {
    /// Set the start-up problem.
    #[must_use]
    pub const fn kind(mut self, kind: ProblemKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the start-up size.
    #[must_use]
    pub const fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Set the auto-play delay in seconds.
    #[must_use]
    pub const fn delay_secs(mut self, secs: f64) -> Self {
        self.delay_secs = Some(secs);
        self
    }

    /// Set the size limits.
    #[must_use]
    pub const fn limits(mut self, limits: SizeLimits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Set how many log lines a display shows.
    #[must_use]
    pub const fn display_tail(mut self, lines: usize) -> Self {
        self.display_tail = Some(lines);
        self
    }

    /// Build the configuration. Unset fields keep their defaults; a kind
    /// without a size gets that kind's default size.
    ///
    /// # Errors
    ///
    /// Returns error if the result fails validation.
    pub fn build(self) -> TraceResult<TraceConfig> {
        let mut config = TraceConfig::default();

        if let Some(limits) = self.limits {
            config.limits = limits;
        }
        if let Some(kind) = self.kind {
            config.problem = ProblemConfig::default_for(kind);
        }
        if let Some(size) = self.size {
            config.problem.size = size;
        }
        if let Some(secs) = self.delay_secs {
            config.playback.delay_secs = secs;
        }
        if let Some(lines) = self.display_tail {
            config.log.display_tail = lines;
        }

        config.check()?;
        Ok(config)
    }
}

/// Start-up problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ProblemConfig {
    /// Hanoi or N-Queens.
    #[serde(default)]
    pub kind: ProblemKind,
    /// Disks or board width.
    #[validate(range(min = 1))]
    pub size: usize,
}

impl ProblemConfig {
    /// Default start-up size for `kind`.
    #[must_use]
    pub const fn default_for(kind: ProblemKind) -> Self {
        let size = match kind {
            ProblemKind::Hanoi => 3,
            ProblemKind::NQueens => 4,
        };
        Self { kind, size }
    }
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self::default_for(ProblemKind::Hanoi)
    }
}

/// Auto-play settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct PlaybackConfig {
    /// Seconds between auto-play steps.
    #[validate(range(min = 0.05, max = 2.0))]
    #[serde(default = "default_delay_secs")]
    pub delay_secs: f64,
}

fn default_delay_secs() -> f64 {
    0.5
}

impl PlaybackConfig {
    /// Delay as a `Duration`.
    ///
    /// A delay that cannot be represented (negative, NaN or infinite) falls
    /// back to the default. [`TraceConfig::check`] rejects such values.
    #[must_use]
    pub fn delay(&self) -> Duration {
        Duration::try_from_secs_f64(self.delay_secs)
            .unwrap_or_else(|_| Duration::from_secs_f64(default_delay_secs()))
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            delay_secs: default_delay_secs(),
        }
    }
}

/// Inclusive size range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SizeRange {
    /// Smallest allowed size.
    #[validate(range(min = 1))]
    pub min: usize,
    /// Largest allowed size.
    #[validate(range(min = 1))]
    pub max: usize,
}

impl SizeRange {
    /// Create a range.
    #[must_use]
    pub const fn new(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// Whether `size` is in range.
    #[must_use]
    pub const fn contains(&self, size: usize) -> bool {
        self.min <= size && size <= self.max
    }

    /// `size` clamped into range.
    #[must_use]
    pub fn clamp(&self, size: usize) -> usize {
        size.clamp(self.min, self.max.max(self.min))
    }
}

/// Per-problem size policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SizeLimits {
    /// Disk counts.
    #[validate(nested)]
    #[serde(default = "default_hanoi_range")]
    pub hanoi: SizeRange,
    /// Board widths.
    #[validate(nested)]
    #[serde(default = "default_nqueens_range")]
    pub nqueens: SizeRange,
}

const fn default_hanoi_range() -> SizeRange {
    SizeRange::new(1, 6)
}

const fn default_nqueens_range() -> SizeRange {
    SizeRange::new(4, 10)
}

impl Default for SizeLimits {
    fn default() -> Self {
        Self {
            hanoi: default_hanoi_range(),
            nqueens: default_nqueens_range(),
        }
    }
}

impl SizeLimits {
    /// Range for `kind`.
    #[must_use]
    pub const fn range(&self, kind: ProblemKind) -> SizeRange {
        match kind {
            ProblemKind::Hanoi => self.hanoi,
            ProblemKind::NQueens => self.nqueens,
        }
    }

    /// Check `size` against the range for `kind`.
    ///
    /// # Errors
    ///
    /// Returns `TraceError::SizeOutOfRange` if it is outside.
    pub fn check(&self, kind: ProblemKind, size: usize) -> TraceResult<()> {
        let range = self.range(kind);
        if range.contains(size) {
            Ok(())
        } else {
            Err(TraceError::SizeOutOfRange {
                problem: kind.name(),
                size,
                min: range.min,
                max: range.max,
            })
        }
    }
}

/// Trace log display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct LogConfig {
    /// How many of the latest log lines a display shows.
    #[validate(range(min = 1))]
    #[serde(default = "default_display_tail")]
    pub display_tail: usize,
}

const fn default_display_tail() -> usize {
    400
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            display_tail: default_display_tail(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = TraceConfig::default();
        config.check().expect("defaults valid");
        assert_eq!(config.problem.kind, ProblemKind::Hanoi);
        assert_eq!(config.problem.size, 3);
        assert!((config.playback.delay_secs - 0.5).abs() < f64::EPSILON);
        assert_eq!(config.limits.hanoi, SizeRange::new(1, 6));
        assert_eq!(config.limits.nqueens, SizeRange::new(4, 10));
        assert_eq!(config.log.display_tail, 400);
    }

    #[test]
    fn test_from_yaml_full() {
        let yaml = r#"
schema_version: "1.0"
problem:
  kind: nqueens
  size: 6
playback:
  delay_secs: 0.25
limits:
  hanoi: { min: 1, max: 5 }
  nqueens: { min: 4, max: 8 }
log:
  display_tail: 50
"#;
        let config = TraceConfig::from_yaml(yaml).expect("parse");
        assert_eq!(config.problem.kind, ProblemKind::NQueens);
        assert_eq!(config.problem.size, 6);
        assert_eq!(config.playback.delay(), Duration::from_millis(250));
        assert_eq!(config.limits.nqueens.max, 8);
        assert_eq!(config.log.display_tail, 50);
    }

    #[test]
    fn test_from_yaml_minimal() {
        let config = TraceConfig::from_yaml("problem: { size: 2 }").expect("parse");
        assert_eq!(config.problem.kind, ProblemKind::Hanoi);
        assert_eq!(config.problem.size, 2);
        assert_eq!(config.limits, SizeLimits::default());
    }

    #[test]
    fn test_rejects_unknown_fields() {
        let result = TraceConfig::from_yaml("speed: 3");
        assert!(matches!(result, Err(TraceError::YamlParse(_))));
    }

    #[test]
    fn test_rejects_fast_delay() {
        let result = TraceConfig::builder().delay_secs(0.01).build();
        assert!(matches!(result, Err(TraceError::Validation(_))));
    }

    #[test]
    fn test_rejects_slow_delay() {
        let result = TraceConfig::from_yaml("playback: { delay_secs: 2.5 }");
        assert!(matches!(result, Err(TraceError::Validation(_))));
    }

    #[test]
    fn test_rejects_nan_delay() {
        let err = TraceConfig::from_yaml("playback: { delay_secs: .nan }").unwrap_err();
        assert!(matches!(err, TraceError::Config { .. }));
        assert!(err.to_string().contains("finite"));

        assert!(TraceConfig::builder().delay_secs(f64::NAN).build().is_err());
    }

    #[test]
    fn test_rejects_infinite_delay() {
        assert!(TraceConfig::from_yaml("playback: { delay_secs: .inf }").is_err());
        assert!(TraceConfig::builder()
            .delay_secs(f64::NEG_INFINITY)
            .build()
            .is_err());
    }

    #[test]
    fn test_unrepresentable_delay_falls_back() {
        let playback = PlaybackConfig {
            delay_secs: f64::NAN,
        };
        assert_eq!(playback.delay(), PlaybackConfig::default().delay());
    }

    #[test]
    fn test_rejects_inverted_limits() {
        let limits = SizeLimits {
            hanoi: SizeRange::new(5, 2),
            ..SizeLimits::default()
        };
        let err = TraceConfig::builder().limits(limits).build().unwrap_err();
        assert!(err.to_string().contains("inverted"));
    }

    #[test]
    fn test_rejects_limit_above_builder_maximum() {
        let limits = SizeLimits {
            nqueens: SizeRange::new(4, MAX_QUEENS + 1),
            ..SizeLimits::default()
        };
        assert!(TraceConfig::builder().limits(limits).build().is_err());
    }

    #[test]
    fn test_rejects_problem_outside_limits() {
        let err = TraceConfig::builder()
            .kind(ProblemKind::NQueens)
            .size(3)
            .build()
            .unwrap_err();
        assert!(matches!(err, TraceError::SizeOutOfRange { size: 3, .. }));
    }

    #[test]
    fn test_builder_kind_sets_default_size() {
        let config = TraceConfig::builder()
            .kind(ProblemKind::NQueens)
            .build()
            .expect("valid");
        assert_eq!(config.problem.size, 4);
    }

    #[test]
    fn test_yaml_roundtrip() {
        let config = TraceConfig::builder()
            .kind(ProblemKind::NQueens)
            .size(8)
            .delay_secs(1.0)
            .display_tail(20)
            .build()
            .expect("valid");
        let yaml = config.to_yaml().expect("serialize");
        let back = TraceConfig::from_yaml(&yaml).expect("parse");
        assert_eq!(config, back);
    }

    #[test]
    fn test_size_range_clamp() {
        let range = SizeRange::new(4, 10);
        assert_eq!(range.clamp(2), 4);
        assert_eq!(range.clamp(7), 7);
        assert_eq!(range.clamp(12), 10);
        assert!(range.contains(4));
        assert!(!range.contains(11));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("demo.yaml");
        std::fs::write(&path, "problem: { kind: nqueens, size: 5 }\n").expect("write");
        let config = TraceConfig::load(&path).expect("load");
        assert_eq!(config.problem.size, 5);
    }

    #[test]
    fn test_load_missing_file() {
        let result = TraceConfig::load("/nonexistent/tracestep.yaml");
        assert!(matches!(result, Err(TraceError::Io(_))));
    }
}
