use bevy::prelude::*;
use camshake::prelude::*;
use camshake::resources::CliArgs;
use camshake::systems::camera::camera_pose;

/// Where the demo's "explosions" go off.
const BLAST_POSITION: Vec3 = Vec3::new(-6.0, 0.5, -4.0);

/// Next seed handed to a shake when `--seed` was given.
#[derive(Resource, Default)]
struct DemoSeed(Option<u64>);

impl DemoSeed {
    fn apply(&mut self, shake: Shake) -> Shake {
        let Some(seed) = self.0 else {
            return shake;
        };
        self.0 = Some(seed.wrapping_add(1));
        match shake {
            Shake::Noise(noise) => noise.with_seed(seed).into(),
            Shake::Bounce(bounce) => bounce.with_seed(seed).into(),
            kick @ Shake::Kick(_) => kick,
        }
    }
}

/// Manually controlled rumble while Space is held.
#[derive(Resource, Default)]
struct EngineRumble(Option<ShakeId>);

fn main() {
    let cli = CliArgs::parse();

    let mut config = if cli.no_config {
        ShakeConfig::default()
    } else {
        ShakeConfig::load_from_file()
    };
    if let Some(strength) = cli.strength {
        config.strength_multiplier = strength;
    }
    let config = config.sanitized();

    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(CameraShakePlugin::new(config))
        .insert_resource(DemoSeed(cli.seed))
        .insert_resource(cli)
        .init_resource::<EngineRumble>()
        .add_systems(Startup, (setup_scene, save_config_if_requested))
        .add_systems(Update, (trigger_preset_shakes, drive_engine_rumble))
        .run();
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(40.0, 40.0))),
        MeshMaterial3d(materials.add(Color::srgb(0.3, 0.35, 0.3))),
    ));

    for i in 0..5 {
        let x = (i as f32 - 2.0) * 2.5;
        commands.spawn((
            Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
            MeshMaterial3d(materials.add(Color::srgb(0.8, 0.3 + i as f32 * 0.1, 0.2))),
            Transform::from_xyz(x, 0.5, 0.0),
        ));
    }

    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(0.4))),
        MeshMaterial3d(materials.add(Color::srgb(1.0, 0.6, 0.1))),
        Transform::from_translation(BLAST_POSITION),
    ));

    commands.spawn((
        DirectionalLight {
            shadows_enabled: true,
            ..default()
        },
        Transform::from_xyz(4.0, 8.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Rig carries the pose; the camera child only ever holds the shake offset.
    commands
        .spawn(Transform::from_xyz(0.0, 3.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y))
        .with_children(|rig| {
            rig.spawn((Camera3d::default(), ShakeTarget));
        });

    commands.spawn((
        Text::new(
            "1: short 2D  2: short 3D  3: explosion 2D  4: explosion 3D\n\
             K: kick from blast  B: bounce from blast  Space (hold): engine rumble\n\
             +/-: strength multiplier",
        ),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

fn save_config_if_requested(cli: Res<CliArgs>, config: Res<ShakeConfig>) {
    if !cli.save_config {
        return;
    }
    if let Err(e) = config.save_to_file() {
        error!("Could not save shake config: {}", e);
    }
}

/// System that maps number keys to preset shakes.
fn trigger_preset_shakes(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ShakeConfig>,
    mut seed: ResMut<DemoSeed>,
    mut requests: EventWriter<ShakeRequest>,
    mut shaker: ResMut<CameraShaker>,
) {
    let shake = if keys.just_pressed(KeyCode::Digit1) {
        Some(config.short_shake_2d())
    } else if keys.just_pressed(KeyCode::Digit2) {
        Some(config.short_shake_3d())
    } else if keys.just_pressed(KeyCode::Digit3) {
        Some(config.explosion_2d(Some(BLAST_POSITION)))
    } else if keys.just_pressed(KeyCode::Digit4) {
        Some(config.explosion_3d(Some(BLAST_POSITION)))
    } else if keys.just_pressed(KeyCode::KeyK) {
        Some(KickShake::from_source(config.recoil.clone(), BLAST_POSITION, true).into())
    } else if keys.just_pressed(KeyCode::KeyB) {
        Some(BounceShake::new(config.short_shake_2d.clone(), Some(BLAST_POSITION)).into())
    } else {
        None
    };

    if let Some(shake) = shake {
        info!("Triggered {} shake", shake.kind());
        requests.send(ShakeRequest::new(seed.apply(shake)));
    }

    let step = if keys.just_pressed(KeyCode::Equal) {
        0.1
    } else if keys.just_pressed(KeyCode::Minus) {
        -0.1
    } else {
        0.0
    };
    if step != 0.0 {
        let strength = shaker.strength_multiplier() + step;
        shaker.set_strength_multiplier(strength);
        info!("Shake strength multiplier: {:.1}", shaker.strength_multiplier());
    }
}

/// System that keeps a manual rumble alive while Space is held and fades it
/// out on release.
fn drive_engine_rumble(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<ShakeConfig>,
    mut seed: ResMut<DemoSeed>,
    mut rumble: ResMut<EngineRumble>,
    mut shaker: ResMut<CameraShaker>,
    rigs: Query<&GlobalTransform, Without<ShakeTarget>>,
    targets: Query<&Parent, With<ShakeTarget>>,
) {
    if keys.just_pressed(KeyCode::Space) {
        let (position, rotation) = camera_pose(targets.get_single().ok(), &rigs);
        let shake = seed.apply(NoiseShake::new(config.rumble.clone(), 0.0, None, true).into());
        rumble.0 = Some(shaker.register_shake(shake, position, rotation));
    }

    let Some(id) = rumble.0 else {
        return;
    };
    let Some(controller) = shaker.amplitude_controller(id) else {
        rumble.0 = None;
        return;
    };

    if keys.pressed(KeyCode::Space) {
        controller.set_target_amplitude(1.0);
    } else {
        controller.finish();
        rumble.0 = None;
    }
}
