//! Frame drawing against an abstract rasterizer
//!
//! `render_frame` walks the scenario once and issues primitive draw calls:
//! gas first, then links, then orbs on top. It only reads state.

use crate::simulation::link_curve::{link_geometry, LinkGeometry, LinkShape};
use crate::simulation::params::Rgb;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

/// Points per bezier when a lens outline is flattened
pub const CURVE_SAMPLES: usize = 16;

/// Drawing surface in canvas coordinates (origin top-left, y down)
pub trait Rasterizer {
    fn fill_circle(&mut self, center: NVec2, radius: f64, color: Rgb);
    fn stroke_path(&mut self, points: &[NVec2], color: Rgb);
    fn stroke_line(&mut self, from: NVec2, to: NVec2, width: f64, color: Rgb);
}

pub fn render_frame<R: Rasterizer + ?Sized>(scenario: &Scenario, out: &mut R) {
    let p = &scenario.parameters;
    let sys = &scenario.system;

    if p.show_gas {
        for b in sys.gas() {
            out.fill_circle(b.x, b.radius, p.gas_color);
        }
    }

    if p.show_links {
        let shape = LinkShape::from_parameters(p);
        for link in sys.live_links() {
            let s = &sys.bodies[link.source];
            let t = &sys.bodies[link.target];
            match link_geometry(s.x, t.x, s.radius, &shape) {
                geom @ LinkGeometry::Lens { .. } => out.stroke_path(&geom.polyline(CURVE_SAMPLES), p.link_color),
                LinkGeometry::Line { from, to, width } => out.stroke_line(from, to, width, p.link_color),
                LinkGeometry::Hidden => {}
            }
        }
    }

    if p.show_orbs {
        for b in sys.orbs() {
            out.fill_circle(b.x, b.radius, p.orb_color);
        }
    }
}
