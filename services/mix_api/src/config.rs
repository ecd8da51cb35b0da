//! Mapping from service settings to solver configuration

use crate::error::{ApiError, Result};
use alligo_config::{RatioScalingMode, SolverSettings};
use alligo_solver::{RatioScaling, SolverConfig};

pub fn solver_config(settings: &SolverSettings) -> Result<SolverConfig> {
    let scaling = match settings.ratio_scaling {
        RatioScalingMode::Precision => RatioScaling::Precision {
            max_decimals: settings.max_ratio_decimals,
        },
        RatioScalingMode::Fixed => {
            if settings.fixed_multiplier == 0 {
                return Err(ApiError::Configuration {
                    message: "solver.fixed_multiplier must be positive".to_string(),
                });
            }
            RatioScaling::Fixed {
                multiplier: settings.fixed_multiplier,
            }
        }
    };

    Ok(SolverConfig { scaling })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings_use_precision_scaling() {
        let config = solver_config(&SolverSettings::default()).unwrap();
        assert_eq!(config.scaling, RatioScaling::default());
    }

    #[test]
    fn test_fixed_scaling() {
        let settings = SolverSettings {
            ratio_scaling: RatioScalingMode::Fixed,
            fixed_multiplier: 10,
            ..SolverSettings::default()
        };
        assert_eq!(
            solver_config(&settings).unwrap().scaling,
            RatioScaling::Fixed { multiplier: 10 }
        );

        let settings = SolverSettings {
            fixed_multiplier: 0,
            ..settings
        };
        assert_eq!(solver_config(&settings).unwrap_err().kind(), "configuration");
    }
}
