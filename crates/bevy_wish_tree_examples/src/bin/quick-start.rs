use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input::ButtonState;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy_wish_tree::prelude::*;

/// Handles of the materials recolored whenever a new theme is applied.
#[derive(Resource)]
struct ThemeMaterials {
    foliage: Handle<StandardMaterial>,
    spheres: Handle<StandardMaterial>,
    boxes: Handle<StandardMaterial>,
    star: Handle<StandardMaterial>,
}

/// Wish currently being typed.
#[derive(Resource, Default)]
struct WishDraft(String);

#[derive(Component)]
struct HudText;

fn main() {
    App::new()
        .insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.02)))
        .init_resource::<WishDraft>()
        .add_plugins(DefaultPlugins)
        .add_plugins(WishTreePlugin)
        .add_systems(Startup, (setup, load_config))
        .add_systems(Update, (type_wish, update_hud).chain())
        .add_observer(recolor)
        .run();
}

/// Loads the scene config; later edits to the file are applied on hot reload.
fn load_config(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.insert_resource(WishTreeConfigHandle(asset_server.load("scene.wishtree")));
}

fn color(rgb: Rgb) -> Color {
    Color::srgb_u8(rgb.r, rgb.g, rgb.b)
}

fn emissive(rgb: Rgb, intensity: f32) -> LinearRgba {
    LinearRgba::from(color(rgb)) * intensity
}

fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    theme: Res<ActiveTheme>,
    formations: Res<ActiveFormations>,
) {
    commands.spawn((
        Camera3d::default(),
        Bloom::NATURAL,
        Transform::from_xyz(0.0, 2.0, 25.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            illuminance: 8_000.0,
            color: Color::srgb_u8(0xaa, 0xdd, 0xff),
            ..default()
        },
        Transform::from_xyz(10.0, 10.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    for y in [-2.0, 4.0] {
        commands.spawn((
            PointLight {
                intensity: 200_000.0,
                range: 15.0,
                color: Color::srgb_u8(0xff, 0xaa, 0x00),
                ..default()
            },
            Transform::from_xyz(0.0, y, 0.0),
        ));
    }

    let colors = *theme.0.colors();
    let sphere_material = OrnamentKind::Sphere.material(&theme.0);
    let box_material = OrnamentKind::Box.material(&theme.0);
    let star = theme.0.star();

    let handles = ThemeMaterials {
        foliage: materials.add(StandardMaterial {
            base_color: color(colors.foliage_base),
            emissive: emissive(colors.foliage_tip, 2.0),
            unlit: true,
            ..default()
        }),
        spheres: materials.add(StandardMaterial {
            base_color: color(sphere_material.base_color),
            perceptual_roughness: sphere_material.roughness,
            metallic: sphere_material.metalness,
            emissive: emissive(sphere_material.emissive, sphere_material.emissive_intensity),
            ..default()
        }),
        boxes: materials.add(StandardMaterial {
            base_color: color(box_material.base_color),
            perceptual_roughness: box_material.roughness,
            metallic: box_material.metalness,
            emissive: emissive(box_material.emissive, box_material.emissive_intensity),
            ..default()
        }),
        star: materials.add(StandardMaterial {
            base_color: color(star.color),
            emissive: emissive(star.color, star.emissive_intensity * 4.0),
            ..default()
        }),
    };

    let foliage_mesh = meshes.add(Mesh::from(Sphere::new(0.04)));
    let sphere_mesh = meshes.add(Mesh::from(Sphere::new(OrnamentKind::Sphere.mesh_size())));
    let box_mesh = meshes.add(Mesh::from(Cuboid::from_length(
        OrnamentKind::Box.mesh_size(),
    )));
    let star_mesh = meshes.add(Mesh::from(Sphere::new(star.size)));

    let root = commands
        .spawn((TreeGroupRoot, Transform::default(), Visibility::default()))
        .id();

    for index in 0..formations.0.foliage.len() {
        commands.spawn((
            FoliageInstance { index },
            Mesh3d(foliage_mesh.clone()),
            MeshMaterial3d(handles.foliage.clone()),
            Transform::default(),
            ChildOf(root),
        ));
    }
    for (kind, mesh, material) in [
        (OrnamentKind::Sphere, &sphere_mesh, &handles.spheres),
        (OrnamentKind::Box, &box_mesh, &handles.boxes),
    ] {
        for index in 0..formations.0.ornaments(kind).len() {
            commands.spawn((
                OrnamentInstance { kind, index },
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material.clone()),
                Transform::default(),
                ChildOf(root),
            ));
        }
    }
    commands.spawn((
        TreeStar,
        Mesh3d(star_mesh),
        MeshMaterial3d(handles.star.clone()),
        Transform::default(),
        ChildOf(root),
    ));

    commands.insert_resource(handles);

    commands.spawn((
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(16.0),
            bottom: Val::Px(12.0),
            padding: UiRect::all(Val::Px(10.0)),
            ..default()
        },
        BackgroundColor(Color::srgba(0.02, 0.03, 0.05, 0.75)),
        children![(
            Text::new(""),
            TextFont::from_font_size(14.0),
            TextColor(Color::srgb(0.9, 0.95, 1.0)),
            HudText,
        )],
    ));
}

/// Type a wish and press Enter; Tab toggles between scattered and tree.
fn type_wish(
    mut keyboard: MessageReader<KeyboardInput>,
    mut draft: ResMut<WishDraft>,
    mut inputs: MessageWriter<WishTreeInput>,
) {
    for event in keyboard.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        match &event.logical_key {
            Key::Tab => {
                inputs.write(WishTreeInput::Toggle);
            }
            Key::Enter => {
                inputs.write(WishTreeInput::Wish(std::mem::take(&mut draft.0)));
            }
            Key::Backspace => {
                draft.0.pop();
            }
            Key::Escape => draft.0.clear(),
            Key::Space => draft.0.push(' '),
            Key::Character(text) => draft.0.push_str(text),
            _ => {}
        }
    }
}

fn update_hud(
    draft: Res<WishDraft>,
    theme: Res<ActiveTheme>,
    target: Res<TreeTarget>,
    transitions: Res<GroupTransitions>,
    mut text: Query<&mut Text, With<HudText>>,
) {
    let Ok(mut text) = text.single_mut() else {
        return;
    };
    let geometry = theme.0.geometry();
    text.0 = format!(
        "Wish: {}_\nTheme: {} ({})  height {:.1}  radius {:.1}  loops {}\nTarget: {:?}  progress {:.2}\n[Enter] make a wish  [Tab] toggle",
        draft.0,
        theme.0.id(),
        theme.0.palette_name().unwrap_or("default"),
        geometry.height,
        geometry.radius_base,
        geometry.spiral_loops,
        target.0,
        transitions.foliage.progress(),
    );
}

fn recolor(
    applied: On<ThemeApplied>,
    handles: Res<ThemeMaterials>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let theme = &applied.theme;
    let colors = theme.colors();
    let star = theme.star();

    if let Some(mut foliage) = materials.get_mut(&handles.foliage) {
        foliage.base_color = color(colors.foliage_base);
        foliage.emissive = emissive(colors.foliage_tip, 2.0);
    }
    for (kind, handle) in [
        (OrnamentKind::Sphere, &handles.spheres),
        (OrnamentKind::Box, &handles.boxes),
    ] {
        let surface = kind.material(theme);
        if let Some(mut material) = materials.get_mut(handle) {
            material.base_color = color(surface.base_color);
            material.emissive = emissive(surface.emissive, surface.emissive_intensity);
        }
    }
    if let Some(mut material) = materials.get_mut(&handles.star) {
        material.base_color = color(star.color);
        material.emissive = emissive(star.color, star.emissive_intensity * 4.0);
    }
}
