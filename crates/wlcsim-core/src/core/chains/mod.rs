//! Chain path generators.
//!
//! Both models grow a chain of equal-length segments from the initial point. The direction of
//! each segment is the previous direction rotated by a Gaussian turning angle about a random
//! perpendicular axis, which gives consecutive directions the wormlike-chain correlation
//! `<cos theta> = exp(-1 / Lp)` with `Lp` measured in segments. The self-avoiding model
//! additionally rejects candidate points that come closer than the link diameter to any earlier,
//! non-bonded point.

mod self_avoiding;
mod wormlike;

use crate::core::error::SimulationError;
use crate::core::models::conformation::ChainConformation;
use crate::core::models::parameters::ChainGeometry;
use rand::Rng;

pub use self_avoiding::SelfAvoidanceLimits;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChainModel {
    WormlikeChain,
    SelfAvoidingWormlikeChain {
        link_diameter: f64,
        limits: SelfAvoidanceLimits,
    },
}

impl ChainModel {
    /// A zero link diameter selects the plain wormlike chain.
    pub fn for_link_diameter(link_diameter: f64, limits: SelfAvoidanceLimits) -> Self {
        if link_diameter > 0.0 {
            ChainModel::SelfAvoidingWormlikeChain {
                link_diameter,
                limits,
            }
        } else {
            ChainModel::WormlikeChain
        }
    }

    pub fn is_self_avoiding(&self) -> bool {
        matches!(self, ChainModel::SelfAvoidingWormlikeChain { .. })
    }

    /// Grows a fresh conformation. Nothing is carried over between calls.
    pub fn generate(
        &self,
        geometry: &ChainGeometry,
        rng: &mut impl Rng,
    ) -> Result<ChainConformation, SimulationError> {
        match *self {
            ChainModel::WormlikeChain => Ok(wormlike::generate(geometry, rng)),
            ChainModel::SelfAvoidingWormlikeChain {
                link_diameter,
                limits,
            } => self_avoiding::generate(geometry, link_diameter, &limits, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn zero_link_diameter_selects_wormlike_chain() {
        let model = ChainModel::for_link_diameter(0.0, SelfAvoidanceLimits::default());
        assert_eq!(model, ChainModel::WormlikeChain);
        assert!(!model.is_self_avoiding());
    }

    #[test]
    fn positive_link_diameter_selects_self_avoiding_chain() {
        let model = ChainModel::for_link_diameter(0.5, SelfAvoidanceLimits::default());
        assert!(model.is_self_avoiding());
    }

    #[test]
    fn repeated_generation_produces_independent_paths() {
        let geometry = ChainGeometry::new(50, 1.0, 5.0, Point3::new(1.0, 2.0, 3.0)).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for model in [
            ChainModel::WormlikeChain,
            ChainModel::for_link_diameter(0.5, SelfAvoidanceLimits::default()),
        ] {
            let first = model.generate(&geometry, &mut rng).unwrap();
            let second = model.generate(&geometry, &mut rng).unwrap();
            assert_eq!(first.len(), 51);
            assert_eq!(second.len(), 51);
            assert_eq!(first.initial_point(), second.initial_point());
            assert_ne!(first, second);
        }
    }
}
