//! Navigator config: speed, hover height, stop threshold, look target

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{NavigationError, NavigationResult};

/// Дистанция "достаточно близко" - камера останавливается, НЕ снапится в destination
pub const DEFAULT_ARRIVAL_EPSILON: f32 = 0.1;

/// Как `speed` превращается в lerp factor на конкретном tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum AdvanceMode {
    /// Каждый tick закрывает ровно `speed` оставшейся дистанции (dt игнорируется)
    #[default]
    PerTick,

    /// `speed` задан для частоты `reference_hz`; factor пересчитывается от dt,
    /// чтобы glide занимал одинаковое время на 30/60/144 Hz
    FrameRateIndependent { reference_hz: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    /// Доля оставшейся дистанции за tick, (0, 1]
    pub speed: f32,
    /// Y координата destination (высота зависания над target)
    pub hover_height: f32,
    pub arrival_epsilon: f32,
    /// Куда смотрит камера во время движения
    pub look_target: Vec3,
    pub advance_mode: AdvanceMode,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            speed: 0.08,
            hover_height: 2.0,
            arrival_epsilon: DEFAULT_ARRIVAL_EPSILON,
            look_target: Vec3::ZERO,
            advance_mode: AdvanceMode::PerTick,
        }
    }
}

impl NavigatorConfig {
    pub fn validate(&self) -> NavigationResult<()> {
        if !self.speed.is_finite() || self.speed <= 0.0 || self.speed > 1.0 {
            return Err(NavigationError::invalid(
                "speed",
                format!("must be in (0, 1], got {}", self.speed),
            ));
        }
        if !self.hover_height.is_finite() {
            return Err(NavigationError::invalid(
                "hover_height",
                format!("must be finite, got {}", self.hover_height),
            ));
        }
        if !self.arrival_epsilon.is_finite() || self.arrival_epsilon <= 0.0 {
            return Err(NavigationError::invalid(
                "arrival_epsilon",
                format!("must be > 0, got {}", self.arrival_epsilon),
            ));
        }
        if !self.look_target.is_finite() {
            return Err(NavigationError::invalid(
                "look_target",
                format!("must be finite, got {}", self.look_target),
            ));
        }
        if let AdvanceMode::FrameRateIndependent { reference_hz } = self.advance_mode {
            if !reference_hz.is_finite() || reference_hz <= 0.0 {
                return Err(NavigationError::invalid(
                    "advance_mode.reference_hz",
                    format!("must be > 0, got {}", reference_hz),
                ));
            }
        }
        Ok(())
    }

    /// Lerp factor для одного tick длительностью `dt` секунд
    pub fn step_factor(&self, dt: f32) -> f32 {
        match self.advance_mode {
            AdvanceMode::PerTick => self.speed,
            AdvanceMode::FrameRateIndependent { reference_hz } => {
                if dt <= 0.0 {
                    return 0.0;
                }
                let frames = dt * reference_hz;
                (1.0 - (1.0 - self.speed).powf(frames)).clamp(0.0, 1.0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = NavigatorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.arrival_epsilon, 0.1);
        assert_eq!(config.advance_mode, AdvanceMode::PerTick);
    }

    #[test]
    fn test_speed_bounds() {
        for bad in [0.0, -0.5, 1.01, f32::NAN, f32::INFINITY] {
            let config = NavigatorConfig { speed: bad, ..default() };
            assert!(config.validate().is_err(), "speed {} должен быть отклонён", bad);
        }

        // 1.0 включительно - snap за один tick
        let config = NavigatorConfig { speed: 1.0, ..default() };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_epsilon_and_reference_hz_rejected() {
        let config = NavigatorConfig { arrival_epsilon: 0.0, ..default() };
        assert!(config.validate().is_err());

        let config = NavigatorConfig {
            advance_mode: AdvanceMode::FrameRateIndependent { reference_hz: 0.0 },
            ..default()
        };
        assert!(config.validate().is_err());

        let config = NavigatorConfig {
            look_target: Vec3::new(f32::NAN, 0.0, 0.0),
            ..default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_step_factor_per_tick_ignores_dt() {
        let config = NavigatorConfig { speed: 0.05, ..default() };
        assert_eq!(config.step_factor(0.0), 0.05);
        assert_eq!(config.step_factor(1.0), 0.05);
    }

    #[test]
    fn test_step_factor_frame_rate_independent() {
        let config = NavigatorConfig {
            speed: 0.08,
            advance_mode: AdvanceMode::FrameRateIndependent { reference_hz: 60.0 },
            ..default()
        };

        // Один кадр на 60 Hz == PerTick
        assert!((config.step_factor(1.0 / 60.0) - 0.08).abs() < 1e-5);

        // Два кадра по 1/120 == один кадр 1/60
        let half = config.step_factor(1.0 / 120.0);
        let combined = 1.0 - (1.0 - half) * (1.0 - half);
        assert!((combined - 0.08).abs() < 1e-5);

        assert_eq!(config.step_factor(0.0), 0.0);
    }

    #[test]
    fn test_config_json_roundtrip_with_defaults() {
        let config: NavigatorConfig =
            serde_json::from_str(r#"{ "speed": 0.05, "hover_height": 5.0 }"#).unwrap();
        assert_eq!(config.speed, 0.05);
        assert_eq!(config.hover_height, 5.0);
        assert_eq!(config.arrival_epsilon, DEFAULT_ARRIVAL_EPSILON);

        let mode: AdvanceMode =
            serde_json::from_str(r#"{ "mode": "frame_rate_independent", "reference_hz": 60.0 }"#)
                .unwrap();
        assert_eq!(mode, AdvanceMode::FrameRateIndependent { reference_hz: 60.0 });
    }
}
