use tabswipe_core::{AnimationSpec, ConfigError, Easing};
use web_time::Duration;

pub const DEFAULT_VELOCITY_THRESHOLD: f32 = 500.0;
pub const DEFAULT_TRANSLATION_RATIO: f32 = 0.75;

/// Tunables of the engine. One source of truth for every platform.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// When false every slot is materialized eagerly.
    pub enable_virtualization: bool,
    /// Settle animation after release or a programmatic selection.
    pub transition: AnimationSpec,
    /// Release speed (units/sec) that commits regardless of distance.
    pub velocity_threshold: f32,
    /// Fraction of the slot width a drag must cover to commit.
    pub translation_ratio: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            enable_virtualization: true,
            transition: AnimationSpec::default(),
            velocity_threshold: DEFAULT_VELOCITY_THRESHOLD,
            translation_ratio: DEFAULT_TRANSLATION_RATIO,
        }
    }
}

impl EngineConfig {
    pub fn with_virtualization(mut self, enabled: bool) -> Self {
        self.enable_virtualization = enabled;
        self
    }

    pub fn with_transition(mut self, duration: Duration, easing: Easing) -> Self {
        self.transition = AnimationSpec::tween(duration, easing);
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: f32) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    pub fn with_translation_ratio(mut self, ratio: f32) -> Self {
        self.translation_ratio = ratio;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.velocity_threshold.is_finite() || self.velocity_threshold < 0.0 {
            return Err(ConfigError::VelocityThreshold(self.velocity_threshold));
        }
        if !(self.translation_ratio > 0.0 && self.translation_ratio <= 1.0) {
            return Err(ConfigError::TranslationRatio(self.translation_ratio));
        }
        if let Easing::Spring { damping, stiffness } = self.transition.easing
            && !(damping > 0.0 && stiffness > 0.0)
        {
            return Err(ConfigError::SpringParameters { damping, stiffness });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let c = EngineConfig::default();
        assert_eq!(c.velocity_threshold, 500.0);
        assert_eq!(c.translation_ratio, 0.75);
        assert_eq!(c.transition.duration, Duration::from_millis(100));
        assert!(c.enable_virtualization);
        assert_eq!(c.validate(), Ok(()));
    }

    #[test]
    fn rejects_bad_thresholds() {
        let c = EngineConfig::default().with_velocity_threshold(-1.0);
        assert_eq!(c.validate(), Err(ConfigError::VelocityThreshold(-1.0)));

        let c = EngineConfig::default().with_translation_ratio(0.0);
        assert_eq!(c.validate(), Err(ConfigError::TranslationRatio(0.0)));

        let c = EngineConfig::default().with_translation_ratio(f32::NAN);
        assert!(c.validate().is_err());
    }

    #[test]
    fn rejects_degenerate_spring() {
        let c = EngineConfig::default().with_transition(
            Duration::from_millis(200),
            Easing::Spring {
                damping: 0.0,
                stiffness: 10.0,
            },
        );
        assert!(matches!(
            c.validate(),
            Err(ConfigError::SpringParameters { .. })
        ));
    }
}
