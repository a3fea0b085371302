pub mod simulation;
pub mod configuration;
pub mod visualization;
pub mod benchmark;

pub use simulation::states::{Body, BodyKind, Canvas, Link, NVec2, System};
pub use simulation::params::Parameters;
pub use simulation::error::ConfigError;
pub use simulation::activity::Activity;
pub use simulation::boundary::{Boundary, Directionality, Segment};
pub use simulation::forces::{Bounce, Brownian, CenterPull, Charge, Force, ForceSet, LinkSpring, Surface, Viscosity};
pub use simulation::integrator::{step, TickReport};
pub use simulation::interaction::{DragState, Interaction};
pub use simulation::link_curve::{link_geometry, CubicBezier, LinkGeometry, LinkShape, LinkStyle, WidthProfile};
pub use simulation::scenario::{Reconfiguration, Scenario};

pub use configuration::config::{BoundaryConfig, CanvasConfig, ParametersConfig, ScenarioConfig};

pub use visualization::draw::{render_frame, Rasterizer};
pub use visualization::orbsim_vis2d::run_2d;

pub use benchmark::benchmark::{bench_forces, bench_tick};
