use std::collections::HashMap;

use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;
use bevy::window::PrimaryWindow;

use crate::simulation::link_curve::{LinkStyle, WidthProfile};
use crate::simulation::params::Rgb;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;
use crate::visualization::draw::{render_frame, Rasterizer};

/// Density used when gas is switched on from the keyboard
const GAS_TOGGLE_DENSITY: f64 = 0.0005;

/// Slot `i` of the circle pool shows the i-th circle drawn this frame
#[derive(Component)]
struct CircleSlot(pub usize);

#[derive(Clone, Copy)]
struct CircleSprite {
    center: Vec2,
    radius: f32,
    color: Rgb,
}

/// Filled circles requested by the last `render_frame`
#[derive(Resource, Default)]
struct FrameCircles(Vec<CircleSprite>);

/// Unit circle mesh shared by every slot plus one material per color
#[derive(Resource)]
struct CirclePool {
    mesh: Mesh2dHandle,
    materials: HashMap<Rgb, Handle<ColorMaterial>>,
    slots: usize,
}

impl CirclePool {
    fn material(&mut self, color: Rgb, assets: &mut Assets<ColorMaterial>) -> Handle<ColorMaterial> {
        self.materials
            .entry(color)
            .or_insert_with(|| assets.add(ColorMaterial::from(rgb(color))))
            .clone()
    }
}

pub fn run_2d(scenario: Scenario) {
    println!(
        "run_2d: starting Bevy 2D viewer with {} orbs and {} gas particles",
        scenario.system.num_orbs,
        scenario.system.num_gas()
    );

    let canvas = scenario.system.canvas;
    let background = scenario.parameters.background_color;

    App::new()
        .insert_resource(ClearColor(rgb(background)))
        .insert_resource(scenario)
        .init_resource::<FrameCircles>()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "orbsim".into(),
                resolution: (canvas.width as f32, canvas.height as f32).into(),
                resizable: false,
                ..Default::default()
            }),
            ..Default::default()
        }))
        .add_systems(Startup, setup_system)
        .add_systems(
            Update,
            (
                pointer_input_system,
                tuning_keys_system,
                physics_step_system,
                draw_frame_system,
                sync_circle_pool_system,
            )
                .chain(),
        )
        .run();
}

fn rgb(c: Rgb) -> Color {
    Color::srgb_u8(c[0], c[1], c[2])
}

fn setup_system(mut commands: Commands, mut meshes: ResMut<Assets<Mesh>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    commands.insert_resource(CirclePool {
        mesh: Mesh2dHandle(meshes.add(Circle::new(1.0))),
        materials: HashMap::new(),
        slots: 0,
    });
}

/// Left button: press picks an orb, holding drags it, letting go releases it
fn pointer_input_system(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    // window cursor space matches canvas space: origin top-left, y down
    let cursor = window.cursor_position();

    if buttons.just_pressed(MouseButton::Left) {
        if let Some(c) = cursor {
            scenario.press(c.x as f64, c.y as f64);
        }
    } else if buttons.pressed(MouseButton::Left) {
        if let Some(c) = cursor {
            scenario.drag(c.x as f64, c.y as f64);
        }
    }

    if buttons.just_released(MouseButton::Left) {
        scenario.release();
    }
}

/// Stand-in for a GUI panel: keys edit the parameter store live
fn tuning_keys_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    let mut p = scenario.parameters.clone();
    let mut touched = true;

    if keys.just_pressed(KeyCode::ArrowUp) {
        p.num_orbs += 1;
    } else if keys.just_pressed(KeyCode::ArrowDown) {
        p.num_orbs = p.num_orbs.saturating_sub(1);
    } else if keys.just_pressed(KeyCode::KeyG) {
        p.gas_density = if p.gas_density > 0.0 { 0.0 } else { GAS_TOGGLE_DENSITY };
    } else if keys.just_pressed(KeyCode::KeyL) {
        p.link_style = match p.link_style {
            LinkStyle::Lens => LinkStyle::VariableWidth,
            LinkStyle::VariableWidth => LinkStyle::Lens,
        };
    } else if keys.just_pressed(KeyCode::KeyW) {
        p.width_profile = match p.width_profile {
            WidthProfile::Gaussian => WidthProfile::Semicircle,
            WidthProfile::Semicircle => WidthProfile::Gaussian,
        };
    } else if keys.just_pressed(KeyCode::KeyO) {
        p.show_orbs = !p.show_orbs;
    } else if keys.just_pressed(KeyCode::KeyK) {
        p.show_links = !p.show_links;
    } else if keys.just_pressed(KeyCode::KeyH) {
        p.show_gas = !p.show_gas;
    } else {
        touched = false;
    }

    if !touched {
        return;
    }
    match scenario.apply_parameters(p) {
        Ok(change) if change.is_structural() => info!(
            "reconfigured: {} orbs, {} gas ({:?})",
            scenario.system.num_orbs,
            scenario.system.num_gas(),
            change
        ),
        Ok(_) => {}
        Err(e) => warn!("parameters rejected: {}", e),
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>) {
    scenario.tick();
}

/// Rasterizer backed by gizmos for strokes and the circle pool for fills
struct BevyRasterizer<'a, 'w, 's> {
    gizmos: &'a mut Gizmos<'w, 's>,
    circles: &'a mut Vec<CircleSprite>,
    half: Vec2, // half canvas size, canvas -> world offset
}

impl BevyRasterizer<'_, '_, '_> {
    fn world(&self, p: NVec2) -> Vec2 {
        Vec2::new(p.x as f32 - self.half.x, self.half.y - p.y as f32)
    }
}

impl Rasterizer for BevyRasterizer<'_, '_, '_> {
    fn fill_circle(&mut self, center: NVec2, radius: f64, color: Rgb) {
        let center = self.world(center);
        self.circles.push(CircleSprite { center, radius: radius as f32, color });
    }

    fn stroke_path(&mut self, points: &[NVec2], color: Rgb) {
        let pts: Vec<Vec2> = points.iter().map(|p| self.world(*p)).collect();
        self.gizmos.linestrip_2d(pts, rgb(color));
    }

    fn stroke_line(&mut self, from: NVec2, to: NVec2, width: f64, color: Rgb) {
        let a = self.world(from);
        let b = self.world(to);
        let normal = (b - a).perp().normalize_or_zero();
        // gizmo lines have a fixed width, so lay thin lines side by side
        let strands = width.ceil().max(1.0) as usize;
        for k in 0..strands {
            let off = (k as f32 + 0.5) - strands as f32 * 0.5;
            self.gizmos.line_2d(a + normal * off, b + normal * off, rgb(color));
        }
    }
}

fn draw_frame_system(scenario: Res<Scenario>, mut gizmos: Gizmos, mut frame: ResMut<FrameCircles>) {
    frame.0.clear();
    let canvas = scenario.system.canvas;
    let mut raster = BevyRasterizer {
        gizmos: &mut gizmos,
        circles: &mut frame.0,
        half: Vec2::new(0.5 * canvas.width as f32, 0.5 * canvas.height as f32),
    };
    render_frame(&scenario, &mut raster);
}

fn sync_circle_pool_system(
    mut commands: Commands,
    frame: Res<FrameCircles>,
    mut pool: ResMut<CirclePool>,
    mut assets: ResMut<Assets<ColorMaterial>>,
    mut query: Query<(&CircleSlot, &mut Transform, &mut Visibility, &mut Handle<ColorMaterial>)>,
) {
    for (CircleSlot(i), mut transform, mut visibility, mut material) in &mut query {
        match frame.0.get(*i) {
            Some(c) => {
                // later circles sit slightly in front of earlier ones
                *transform = Transform::from_xyz(c.center.x, c.center.y, *i as f32 * 1e-3)
                    .with_scale(Vec3::splat(c.radius));
                *visibility = Visibility::Visible;
                *material = pool.material(c.color, &mut assets);
            }
            None => *visibility = Visibility::Hidden,
        }
    }

    // grow the pool; new slots show up from the next frame's sync onward
    for i in pool.slots..frame.0.len() {
        let c = frame.0[i];
        let material = pool.material(c.color, &mut assets);
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: pool.mesh.clone(),
                material,
                transform: Transform::from_xyz(c.center.x, c.center.y, i as f32 * 1e-3)
                    .with_scale(Vec3::splat(c.radius)),
                ..Default::default()
            },
            CircleSlot(i),
        ));
    }
    pool.slots = pool.slots.max(frame.0.len());
}
