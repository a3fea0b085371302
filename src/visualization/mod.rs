pub mod draw;
pub mod orbsim_vis2d;
