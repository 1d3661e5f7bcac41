use serde::{Deserialize, Serialize};

use crate::error::JarError;

/// Every tunable constant of the jar simulation.
///
/// Units are "per tick": velocities are pixels per tick and gravity is added
/// to the vertical velocity once per tick. Only `spawn_interval_ms` is wall
/// clock time, measured against the `dt_ms` the host passes to `step`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JarConfig {
    pub gravity: f32,
    /// Velocity multiplier applied every tick.
    pub friction: f32,
    /// Per-axis velocity clamp.
    pub max_velocity: f32,
    pub restitution: f32,
    /// Velocity multiplier (after negation) on wall contact.
    pub wall_damping: f32,
    pub solver_iterations: u32,
    /// Extra share of the overlap correction given to the higher body of a pair.
    pub collision_bias: f32,

    /// Fraction of the container height below which vertical velocity is damped.
    pub pressure_zone: f32,
    pub pressure_damping: f32,
    /// Fraction of the container height below which both axes get extra friction.
    pub friction_zone: f32,
    pub zone_friction: f32,
    pub rest_epsilon: f32,
    /// Distance above the floor line within which a falling body is snapped down.
    pub floor_tolerance: f32,

    pub marble_radius: f32,
    /// Maximum number of active + pending bodies.
    pub capacity: usize,
    pub placement_attempts: u32,
    pub spawn_interval_ms: f64,
    pub seed: u64,
}

impl Default for JarConfig {
    fn default() -> Self {
        Self {
            gravity: 0.3,
            friction: 0.99,
            max_velocity: 10.0,
            restitution: 0.4,
            wall_damping: 0.5,
            solver_iterations: 15,
            collision_bias: 0.1,

            pressure_zone: 0.9,
            pressure_damping: 0.5,
            friction_zone: 0.8,
            zone_friction: 0.9,
            rest_epsilon: 0.1,
            floor_tolerance: 0.5,

            marble_radius: 12.0,
            capacity: 150,
            placement_attempts: 10,
            spawn_interval_ms: 50.0,
            seed: 12345,
        }
    }
}

impl JarConfig {
    pub fn from_json(json: &str) -> Result<Self, JarError> {
        let config: JarConfig = serde_json::from_str(json).map_err(JarError::ConfigParse)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn validate(&self) -> Result<(), JarError> {
        let finite = [
            ("gravity", self.gravity),
            ("friction", self.friction),
            ("maxVelocity", self.max_velocity),
            ("restitution", self.restitution),
            ("wallDamping", self.wall_damping),
            ("collisionBias", self.collision_bias),
            ("pressureZone", self.pressure_zone),
            ("pressureDamping", self.pressure_damping),
            ("frictionZone", self.friction_zone),
            ("zoneFriction", self.zone_friction),
            ("restEpsilon", self.rest_epsilon),
            ("floorTolerance", self.floor_tolerance),
            ("marbleRadius", self.marble_radius),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{} must be finite", name)));
            }
        }

        let unit = [
            ("friction", self.friction),
            ("restitution", self.restitution),
            ("wallDamping", self.wall_damping),
            ("pressureZone", self.pressure_zone),
            ("pressureDamping", self.pressure_damping),
            ("frictionZone", self.friction_zone),
            ("zoneFriction", self.zone_friction),
        ];
        for (name, value) in unit {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{} must be within 0..=1, got {}", name, value)));
            }
        }

        if !(0.0..=0.5).contains(&self.collision_bias) {
            return Err(invalid(format!(
                "collisionBias must be within 0..=0.5, got {}",
                self.collision_bias
            )));
        }
        if self.max_velocity <= 0.0 {
            return Err(invalid(format!("maxVelocity must be positive, got {}", self.max_velocity)));
        }
        if self.marble_radius <= 0.0 {
            return Err(invalid(format!("marbleRadius must be positive, got {}", self.marble_radius)));
        }
        if self.rest_epsilon < 0.0 || self.floor_tolerance < 0.0 {
            return Err(invalid("restEpsilon and floorTolerance must not be negative".to_string()));
        }
        if self.solver_iterations == 0 {
            return Err(invalid("solverIterations must be at least 1".to_string()));
        }
        if self.placement_attempts == 0 {
            return Err(invalid("placementAttempts must be at least 1".to_string()));
        }
        if !self.spawn_interval_ms.is_finite() || self.spawn_interval_ms < 0.0 {
            return Err(invalid(format!(
                "spawnIntervalMs must be a non-negative number, got {}",
                self.spawn_interval_ms
            )));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> JarError {
    JarError::InvalidConfig(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = JarConfig::from_json(r#"{ "gravity": 0.5, "capacity": 20 }"#).unwrap();
        assert_eq!(config.gravity, 0.5);
        assert_eq!(config.capacity, 20);
        assert_eq!(config.solver_iterations, 15);
        assert_eq!(config.restitution, 0.4);
    }

    #[test]
    fn rejects_out_of_range_restitution() {
        let err = JarConfig::from_json(r#"{ "restitution": 1.5 }"#).unwrap_err();
        assert!(matches!(err, JarError::InvalidConfig(_)));
        assert!(err.to_string().contains("restitution"));
    }

    #[test]
    fn rejects_zero_iterations() {
        let err = JarConfig::from_json(r#"{ "solverIterations": 0 }"#).unwrap_err();
        assert!(matches!(err, JarError::InvalidConfig(_)));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = JarConfig::from_json("{ gravity: ").unwrap_err();
        assert!(matches!(err, JarError::ConfigParse(_)));
    }

    #[test]
    fn json_uses_camel_case_keys() {
        let json = JarConfig::default().to_json();
        assert!(json.contains("\"maxVelocity\""));
        assert!(json.contains("\"spawnIntervalMs\""));
    }
}
