pub mod pr_model;
pub mod provider;

pub type V3 = nalgebra::Vector3<f32>;
