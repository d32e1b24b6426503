use crate::core::chains::{ChainModel, SelfAvoidanceLimits};
use crate::core::error::SimulationError;
use crate::core::models::parameters::ChainConfiguration;
use crate::core::models::results::GyrationResult;
use crate::core::observables::gyration::radius_of_gyration;
use crate::core::observables::localization::apply_localization_noise;
use rand::Rng;
use tracing::trace;

/// Runs single trials for one batch of chains: generate a path, measure it, blur it with
/// localization noise and measure it again.
#[derive(Debug, Clone)]
pub struct ChainSimulationUnit {
    config: ChainConfiguration,
    model: ChainModel,
}

impl ChainSimulationUnit {
    pub fn new(
        config: &ChainConfiguration,
        limits: SelfAvoidanceLimits,
    ) -> Result<Self, SimulationError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            model: ChainModel::for_link_diameter(config.link_diameter, limits),
        })
    }

    #[inline]
    pub fn config(&self) -> &ChainConfiguration {
        &self.config
    }

    #[inline]
    pub fn model(&self) -> &ChainModel {
        &self.model
    }

    /// The returned result always carries its parameter tuple; callers that do not want it can
    /// drop it.
    pub fn run(&self, trial: usize, rng: &mut impl Rng) -> Result<GyrationResult, SimulationError> {
        let geometry = self.config.geometry(trial)?;
        let parameters = self.config.parameters(trial)?;

        let path = self.model.generate(&geometry, rng)?;
        let rg = radius_of_gyration(path.points())?;

        let bumped = apply_localization_noise(&path, self.config.localization_precision, rng)?;
        let rg_bump = radius_of_gyration(bumped.points())?;

        trace!(trial, segments = geometry.segments, rg, rg_bump, "Trial complete.");

        Ok(GyrationResult {
            rg,
            rg_bump,
            parameters: Some(parameters),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn config(localization_precision: f64, link_diameter: f64) -> ChainConfiguration {
        ChainConfiguration {
            num_paths: 2,
            path_lengths: vec![100.0, 400.0],
            linear_density: 1.0,
            segment_conversion: 1.0,
            link_diameter,
            localization_precision,
            persistence_length: 10.0,
            initial_point: Point3::origin(),
        }
    }

    #[test]
    fn zero_precision_makes_bumped_radius_equal_true_radius() {
        let unit = ChainSimulationUnit::new(&config(0.0, 0.0), SelfAvoidanceLimits::default())
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = unit.run(0, &mut rng).unwrap();
        assert!(result.rg > 0.0);
        assert_eq!(result.rg, result.rg_bump);
    }

    #[test]
    fn noise_changes_the_bumped_radius() {
        let unit = ChainSimulationUnit::new(&config(2.0, 0.0), SelfAvoidanceLimits::default())
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let result = unit.run(1, &mut rng).unwrap();
        assert_ne!(result.rg, result.rg_bump);
    }

    #[test]
    fn result_carries_the_trial_parameters() {
        let unit = ChainSimulationUnit::new(&config(3.0, 0.0), SelfAvoidanceLimits::default())
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let params = unit.run(1, &mut rng).unwrap().parameters.unwrap();
        assert_eq!(params.path_length, 400.0);
        assert_eq!(params.persistence_length, 10.0);
        assert_eq!(params.localization_precision, 3.0);
        assert_eq!(params.linear_density, 1.0);
    }

    #[test]
    fn positive_link_diameter_uses_self_avoiding_model() {
        let unit = ChainSimulationUnit::new(&config(0.0, 0.5), SelfAvoidanceLimits::default())
            .unwrap();
        assert!(unit.model().is_self_avoiding());
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        assert!(unit.run(0, &mut rng).is_ok());
    }

    #[test]
    fn out_of_range_trial_is_rejected() {
        let unit = ChainSimulationUnit::new(&config(0.0, 0.0), SelfAvoidanceLimits::default())
            .unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        assert!(matches!(
            unit.run(2, &mut rng),
            Err(SimulationError::InvalidArgument {
                parameter: "trial",
                ..
            })
        ));
    }

    #[test]
    fn invalid_configuration_is_rejected_up_front() {
        let mut bad = config(0.0, 0.0);
        bad.persistence_length = 0.0;
        assert!(ChainSimulationUnit::new(&bad, SelfAvoidanceLimits::default()).is_err());
    }

    #[test]
    fn same_stream_reproduces_the_same_result() {
        let unit = ChainSimulationUnit::new(&config(1.0, 0.0), SelfAvoidanceLimits::default())
            .unwrap();
        let a = unit.run(0, &mut ChaCha8Rng::seed_from_u64(6)).unwrap();
        let b = unit.run(0, &mut ChaCha8Rng::seed_from_u64(6)).unwrap();
        assert_eq!(a, b);
    }
}
