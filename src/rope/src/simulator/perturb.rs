use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::warn;

use crate::V3;

const SEED: u64 = 0x5eed;
const SCALE: f32 = 1e-4;

/// Optional guard against zero-length constraints. Disabled by default,
/// in which case degenerate constraints produce NaN.
#[derive(Clone, Debug)]
pub struct Perturber {
	rng: Option<StdRng>,
}

impl Perturber {
	pub fn new(enabled: bool) -> Self {
		Self {
			rng: enabled.then(|| StdRng::seed_from_u64(SEED)),
		}
	}

	fn rp(rng: &mut StdRng) -> V3 {
		V3::new(
			rng.gen::<f32>() - 0.5,
			rng.gen::<f32>() - 0.5,
			rng.gen::<f32>() - 0.5,
		) * SCALE
	}

	/// Returns true when the constraint has to be skipped this time.
	pub fn check(&mut self, l: f32, p1: &mut V3, p2: &mut V3) -> bool {
		let rng = match self.rng.as_mut() {
			Some(rng) => rng,
			None => return false,
		};
		if l.is_normal() {
			return false;
		}
		warn!(distance = l, "bad distance, perturbing");
		*p1 += Self::rp(rng);
		*p2 += Self::rp(rng);
		true
	}
}
