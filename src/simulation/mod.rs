pub mod states;
pub mod error;
pub mod params;
pub mod random;
pub mod store;
pub mod activity;
pub mod boundary;
pub mod forces;
pub mod integrator;
pub mod interaction;
pub mod link_curve;
pub mod scenario;
