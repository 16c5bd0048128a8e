use crate::color::Rgba;
use crate::error::ConfigError;
use crate::params::Params;
use serde::{Deserialize, Serialize};

/// Particle field configuration
///
/// Every key is optional in JSON; missing keys take the `Params` defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FieldConfig {
    pub particle_count: usize,
    pub palette: Vec<Rgba>,
    pub connection_distance: f32,
    pub speed_range: f32,
    pub radius_min: f32,
    pub radius_max: f32,
    pub link_color: Rgba,
    pub link_alpha: f32,
    pub link_width: f32,
    pub backdrop_inner: Rgba,
    pub backdrop_outer: Rgba,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            particle_count: Params::PARTICLE_COUNT,
            palette: Params::PALETTE.iter().map(|c| parse_builtin(c)).collect(),
            connection_distance: Params::CONNECTION_DISTANCE,
            speed_range: Params::SPEED_RANGE,
            radius_min: Params::RADIUS_MIN,
            radius_max: Params::RADIUS_MAX,
            link_color: parse_builtin(Params::LINK_COLOR),
            link_alpha: Params::LINK_ALPHA,
            link_width: Params::LINK_WIDTH,
            backdrop_inner: parse_builtin(Params::BACKDROP_INNER),
            backdrop_outer: parse_builtin(Params::BACKDROP_OUTER),
        }
    }
}

// Built-in colors are literals in `Params`; a typo there shows up in tests
fn parse_builtin(css: &str) -> Rgba {
    css.parse().unwrap_or(Rgba::TRANSPARENT)
}

impl FieldConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse and validate a JSON config object
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: FieldConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every value against its allowed range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.particle_count == 0 || self.particle_count > Params::MAX_PARTICLE_COUNT {
            return Err(ConfigError::invalid(
                "particleCount",
                format!(
                    "must be within 1..={}, got {}",
                    Params::MAX_PARTICLE_COUNT,
                    self.particle_count
                ),
            ));
        }
        if self.palette.is_empty() {
            return Err(ConfigError::invalid("palette", "must not be empty"));
        }
        if !(self.connection_distance >= 0.0 && self.connection_distance.is_finite()) {
            return Err(ConfigError::invalid(
                "connectionDistance",
                format!("must be a finite value >= 0, got {}", self.connection_distance),
            ));
        }
        if !(self.speed_range > 0.0 && self.speed_range.is_finite()) {
            return Err(ConfigError::invalid(
                "speedRange",
                format!("must be a finite value > 0, got {}", self.speed_range),
            ));
        }
        if !(self.radius_min > 0.0 && self.radius_min <= self.radius_max && self.radius_max.is_finite()) {
            return Err(ConfigError::invalid(
                "radiusMin",
                format!(
                    "need 0 < radiusMin <= radiusMax, got {}..{}",
                    self.radius_min, self.radius_max
                ),
            ));
        }
        if !(0.0..=1.0).contains(&self.link_alpha) {
            return Err(ConfigError::invalid("linkAlpha", "must be within [0, 1]"));
        }
        if !(self.link_width > 0.0 && self.link_width.is_finite()) {
            return Err(ConfigError::invalid("linkWidth", "must be > 0"));
        }
        Ok(())
    }

    /// Validated config, or the defaults with a warning
    pub fn or_default(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                log::warn!("Ignoring particle config: {e}");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = FieldConfig::new();
        assert!(config.validate().is_ok());
        assert_eq!(config.palette.len(), Params::PALETTE.len());
        assert!(config.palette.iter().all(|c| c.a > 0.0), "palette literals parse");
        assert!(config.link_color.a > 0.0);
        assert!(config.backdrop_inner.a > 0.0);
        assert_ne!(config.backdrop_inner, config.backdrop_outer);
    }

    #[test]
    fn test_from_json_partial_uses_defaults() {
        let config =
            FieldConfig::from_json(r##"{"particleCount": 40, "palette": ["#ffffff"]}"##).unwrap();
        assert_eq!(config.particle_count, 40);
        assert_eq!(config.palette, vec![Rgba::new(1.0, 1.0, 1.0, 1.0)]);
        assert_eq!(config.connection_distance, Params::CONNECTION_DISTANCE);
        assert_eq!(config.speed_range, Params::SPEED_RANGE);
    }

    #[test]
    fn test_from_json_rejects_invalid_values() {
        assert!(matches!(
            FieldConfig::from_json(r#"{"particleCount": 0}"#),
            Err(ConfigError::InvalidValue { field: "particleCount", .. })
        ));
        assert!(matches!(
            FieldConfig::from_json(r#"{"speedRange": 0.0}"#),
            Err(ConfigError::InvalidValue { field: "speedRange", .. })
        ));
        assert!(matches!(
            FieldConfig::from_json(r#"{"connectionDistance": -1.0}"#),
            Err(ConfigError::InvalidValue { field: "connectionDistance", .. })
        ));
        assert!(matches!(
            FieldConfig::from_json(r#"{"palette": []}"#),
            Err(ConfigError::InvalidValue { field: "palette", .. })
        ));
    }

    #[test]
    fn test_particle_count_is_capped() {
        assert!(matches!(
            FieldConfig::from_json(r#"{"particleCount": 100000000}"#),
            Err(ConfigError::InvalidValue { field: "particleCount", .. })
        ));

        let at_cap = format!(r#"{{"particleCount": {}}}"#, Params::MAX_PARTICLE_COUNT);
        assert_eq!(
            FieldConfig::from_json(&at_cap).unwrap().particle_count,
            Params::MAX_PARTICLE_COUNT
        );

        let over = FieldConfig {
            particle_count: Params::MAX_PARTICLE_COUNT + 1,
            ..FieldConfig::default()
        };
        assert_eq!(over.or_default(), FieldConfig::default());
    }

    #[test]
    fn test_from_json_rejects_bad_color_and_syntax() {
        assert!(matches!(
            FieldConfig::from_json(r#"{"palette": ["shiny"]}"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            FieldConfig::from_json("{particleCount"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn test_zero_connection_distance_is_allowed() {
        let config = FieldConfig::from_json(r#"{"connectionDistance": 0}"#).unwrap();
        assert_eq!(config.connection_distance, 0.0);
    }

    #[test]
    fn test_or_default_replaces_invalid() {
        let config = FieldConfig {
            particle_count: 0,
            ..FieldConfig::default()
        };
        assert_eq!(config.or_default(), FieldConfig::default());
    }
}
