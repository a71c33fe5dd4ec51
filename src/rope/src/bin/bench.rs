use std::time::SystemTime;

use rayon::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rope::{
	PbdParameter, RopeObject, RopeSolver, SimulationParameter, XpbdParameter, V3,
};

const DT: f32 = 0.02;

fn run(parameter: SimulationParameter, steps: usize) {
	let rope = RopeObject::new_line(V3::zeros(), V3::new(1., 0., 0.), 5, 1.0);
	let mut solver = RopeSolver::new(rope).with_parameter(parameter);
	if let Err(e) = solver.initialize() {
		error!(error = %e, "initialize failed");
		return;
	}
	let start = SystemTime::now();
	for _ in 0..steps {
		solver.step(DT);
	}
	let duration = SystemTime::now()
		.duration_since(start)
		.map(|d| d.as_micros())
		.unwrap_or_default();
	let time = steps as f32 * DT;
	let model = match solver.pr_model() {
		Some(model) => model,
		None => return,
	};
	let stretch = model
		.particles
		.windows(2)
		.zip(model.constraints.iter())
		.map(|(w, c)| {
			let d = V3::from(w[1].pos) - V3::from(w[0].pos);
			(d.magnitude() / c.rest_length - 1.0).abs()
		})
		.fold(0f32, f32::max);
	let tip = model.particles.last().map(|p| p.pos[1]).unwrap_or_default();
	info!(
		algorithm = %solver.algorithm(),
		steps,
		load = %format!("{:.3}%", duration as f32 / time / 1e4),
		tip,
		stretch,
		"bench finished"
	);
}

fn main() {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let steps = std::env::args()
		.nth(1)
		.and_then(|s| s.parse().ok())
		.unwrap_or(200);
	let gravity = V3::new(0., -9.8, 0.);
	let parameters: Vec<SimulationParameter> = vec![
		PbdParameter::default().with_gravity(gravity).into(),
		XpbdParameter::default().with_gravity(gravity).into(),
		XpbdParameter::default()
			.with_gravity(gravity)
			.with_flexibility(0.0)
			.into(),
	];
	// ropes are independent, each one still steps sequentially
	parameters
		.into_par_iter()
		.for_each(|parameter| run(parameter, steps));
}
