use std::time::Duration;

use bevy::audio::{Pitch, PitchBundle, PlaybackSettings};
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::PrimaryWindow;

use crate::simulation::integrator::FrameReport;
use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;

#[derive(Component)]
struct BodyIndex(pub usize);

#[derive(Component)]
struct HudText;

/// Report of the most recent physics step, read by the sound and HUD systems.
#[derive(Resource, Default)]
struct LastFrame(FrameReport);

const BACKGROUND: Color = Color::srgb(0.86, 0.86, 0.86);
const ACCENT: Color = Color::srgb(0.016, 0.455, 0.812);
const TRAIL: Color = Color::srgb(0.2, 0.2, 0.2);
const GRAVITY_STEP: f64 = 10.0;
const TONE_HZ: f32 = 660.0;
const TONE_MS: u64 = 60;

pub fn run_2d(scenario: Scenario) {
    let (width, height) = (
        scenario.world.parameters.width as f32,
        scenario.world.parameters.height as f32,
    );
    log::info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.world.len());

    App::new()
        .insert_resource(scenario)
        .insert_resource(LastFrame::default())
        .insert_resource(ClearColor(BACKGROUND))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "gravsim".into(),
                resolution: (width, height).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        .add_systems(Startup, setup_bodies_system)
        .add_systems(
            Update,
            (
                controls_system,
                spawn_system,
                physics_step_system,
                collision_sound_system,
                sync_transforms_system,
                draw_overlay_system,
                hud_system,
            )
                .chain(),
        )
        .run();
}

/// Screen coordinates (origin top-left, y down) to Bevy world coordinates.
fn to_world(p: &NVec2, width: f32, height: f32) -> Vec2 {
    Vec2::new(p.x as f32 - width * 0.5, height * 0.5 - p.y as f32)
}

fn spawn_body_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<ColorMaterial>,
    index: usize,
    radius: f64,
    at: Vec2,
) {
    commands.spawn((
        MaterialMesh2dBundle {
            mesh: Mesh2dHandle(meshes.add(Circle::new(radius as f32))),
            material: materials.add(ColorMaterial::from(Color::WHITE)),
            transform: Transform::from_xyz(at.x, at.y, index as f32 * 0.01),
            ..default()
        },
        BodyIndex(index),
    ));
}

fn setup_bodies_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    commands.spawn(Camera2dBundle::default());

    let (w, h) = (
        scenario.world.parameters.width as f32,
        scenario.world.parameters.height as f32,
    );
    for (i, body) in scenario.world.bodies().iter().enumerate() {
        let at = to_world(&body.position, w, h);
        spawn_body_entity(&mut commands, &mut meshes, &mut materials, i, body.radius, at);
    }

    commands.spawn((
        TextBundle::from_section(
            "",
            TextStyle {
                font_size: 18.0,
                color: ACCENT,
                ..default()
            },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(12.0),
            ..default()
        }),
        HudText,
    ));
}

fn controls_system(keys: Res<ButtonInput<KeyCode>>, mut scenario: ResMut<Scenario>) {
    let controls = &mut scenario.controls;
    if keys.pressed(KeyCode::ArrowUp) {
        controls.nudge_gravity(GRAVITY_STEP);
    }
    if keys.pressed(KeyCode::ArrowDown) {
        controls.nudge_gravity(-GRAVITY_STEP);
    }
    if keys.just_pressed(KeyCode::KeyR) {
        controls.toggle_repulsive();
    }
    if keys.just_pressed(KeyCode::BracketRight) {
        controls.faster();
    }
    if keys.just_pressed(KeyCode::BracketLeft) {
        controls.slower();
    }
    if keys.just_pressed(KeyCode::KeyM) {
        controls.toggle_sound();
    }
    if keys.just_pressed(KeyCode::KeyT) {
        controls.toggle_spawning();
    }
}

// Runs before the physics step so new pairs never appear mid-frame
fn spawn_system(
    mut commands: Commands,
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut scenario: ResMut<Scenario>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
) {
    if !scenario.controls.spawning || !buttons.just_pressed(MouseButton::Left) {
        return;
    }
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    let position = NVec2::new(cursor.x as f64, cursor.y as f64);
    let index = scenario.spawn_at(position);
    let radius = scenario.world.body(index).radius;
    let (w, h) = (
        scenario.world.parameters.width as f32,
        scenario.world.parameters.height as f32,
    );
    let at = to_world(&position, w, h);
    spawn_body_entity(&mut commands, &mut meshes, &mut materials, index, radius, at);
}

fn physics_step_system(time: Res<Time>, mut scenario: ResMut<Scenario>, mut last: ResMut<LastFrame>) {
    // Split &mut Scenario into &mut fields in one destructuring step
    let Scenario { world, controls, .. } = &mut *scenario;

    let cfg = controls.frame_config(time.delta_seconds_f64());
    last.0 = world.step(&cfg);
}

fn collision_sound_system(
    mut commands: Commands,
    scenario: Res<Scenario>,
    last: Res<LastFrame>,
    mut pitches: ResMut<Assets<Pitch>>,
) {
    if !last.0.collided || !scenario.controls.sound {
        return;
    }
    commands.spawn(PitchBundle {
        source: pitches.add(Pitch::new(TONE_HZ, Duration::from_millis(TONE_MS))),
        settings: PlaybackSettings::DESPAWN,
    });
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let (w, h) = (
        scenario.world.parameters.width as f32,
        scenario.world.parameters.height as f32,
    );
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.world.bodies().get(*i) {
            let p = to_world(&b.position, w, h);
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
}

// Trails and velocity arrows
fn draw_overlay_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    let (w, h) = (
        scenario.world.parameters.width as f32,
        scenario.world.parameters.height as f32,
    );
    for body in scenario.world.bodies() {
        if body.history().len() > 1 {
            gizmos.linestrip_2d(body.history().iter().map(|p| to_world(p, w, h)), TRAIL);
        }

        let start = to_world(&body.position, w, h);
        // velocity is in screen space, so y flips
        let end = start + Vec2::new(body.velocity.x as f32, -body.velocity.y as f32);
        if start.distance_squared(end) > 1.0 {
            gizmos.arrow_2d(start, end, Color::BLACK);
        }
    }
}

fn hud_system(scenario: Res<Scenario>, last: Res<LastFrame>, mut query: Query<&mut Text, With<HudText>>) {
    let c = &scenario.controls;
    let on_off = |b: bool| if b { "on" } else { "off" };
    let summary = format!(
        "Gravitational constant: {:.0}{}  [Up/Down, R]\n\
         Simulation speed: {}x  [ '[' / ']' ]\n\
         Sound: {}  [M]   Click to spawn: {}  [T]\n\
         Bodies: {}   Pairs: {}{}",
        c.gravity,
        if c.repulsive { " (repulsive)" } else { "" },
        c.speed,
        on_off(c.sound),
        on_off(c.spawning),
        scenario.world.len(),
        scenario.world.pairs().len(),
        if last.0.collided { "   *" } else { "" },
    );
    for mut text in &mut query {
        text.sections[0].value.clone_from(&summary);
    }
}
