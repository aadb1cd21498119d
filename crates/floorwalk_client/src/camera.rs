use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use floorwalk_navigation::{
    log, pointer_to_ndc, NavigationArrived, NavigationSet, Navigator, NavigatorCamera,
    PerspectiveRig, PointerClicked,
};

/// Границы zoom колесом
const MIN_ORBIT_DISTANCE: f32 = 2.0;
const MAX_ORBIT_DISTANCE: f32 = 80.0;

/// Left click → NDC → PointerClicked (ray строит core через PerspectiveRig)
pub struct PointerInputPlugin;

impl Plugin for PointerInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (sync_rig_aspect, click_to_navigate)
                .chain()
                .before(NavigationSet),
        );
    }
}

/// Right drag: orbit вокруг look target, колесо: zoom
///
/// Пока Navigator везёт камеру, orbit не трогает Transform.
pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                attach_orbit_camera,
                orbit_camera_controls,
                update_camera_transform,
            )
                .chain()
                .before(NavigationSet),
        )
        .add_systems(Update, refocus_on_arrival.after(NavigationSet));
    }
}

fn navigator_is_moving(navigator: &Option<Res<Navigator>>) -> bool {
    navigator.as_ref().is_some_and(|n| n.is_moving())
}

/// Курсор в пикселях окна → PointerClicked в NDC
fn click_to_navigate(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut clicks: EventWriter<PointerClicked>,
) {
    if !mouse_buttons.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = windows.single() else {
        return;
    };
    // None когда курсор вне окна
    let Some(cursor) = window.cursor_position() else {
        return;
    };

    match pointer_to_ndc(cursor, window.size()) {
        Some(ndc) => {
            clicks.write(PointerClicked { ndc });
        }
        None => log(&format!("click_to_navigate: degenerate window size {}", window.size())),
    }
}

/// Aspect у PerspectiveRig = aspect окна (иначе ray не совпадёт с картинкой)
fn sync_rig_aspect(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut rigs: Query<&mut PerspectiveRig, With<NavigatorCamera>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let size = window.size();
    // Свернутое окно
    if size.x <= 0.0 || size.y <= 0.0 {
        return;
    }

    let aspect = size.x / size.y;
    for mut rig in rigs.iter_mut() {
        if rig.aspect != aspect {
            rig.aspect = aspect;
            log(&format!("sync_rig_aspect: {}x{} → aspect {:.3}", size.x, size.y, aspect));
        }
    }
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub focus: Vec3,
    pub distance: f32,
    pub yaw: f32,   // Horizontal rotation (radians)
    pub pitch: f32, // Vertical rotation (radians)
    pub sensitivity: f32,
    pub zoom_speed: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            focus: Vec3::ZERO,
            distance: 15.0,
            yaw: std::f32::consts::FRAC_PI_4,   // 45°
            pitch: std::f32::consts::FRAC_PI_6, // 30°
            sensitivity: 0.005,
            zoom_speed: 1.0,
        }
    }
}

impl OrbitCamera {
    /// Орбита вокруг `focus`, на которой камера уже стоит в `position`
    ///
    /// None если камера совпадает с focus.
    pub fn around(focus: Vec3, position: Vec3) -> Option<Self> {
        let offset = position - focus;
        let distance = offset.length();
        if distance < 1e-4 {
            return None;
        }
        Some(Self {
            focus,
            distance,
            yaw: offset.x.atan2(offset.z),
            pitch: (offset.y / distance).clamp(-1.0, 1.0).asin(),
            ..default()
        })
    }

    /// Позиция камеры из сферических координат
    pub fn translation(&self) -> Vec3 {
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        self.focus + Vec3::new(x, y, z)
    }
}

/// Новая navigator camera → OrbitCamera вокруг look target
fn attach_orbit_camera(
    mut commands: Commands,
    cameras: Query<(Entity, &Transform), Added<NavigatorCamera>>,
    navigator: Option<Res<Navigator>>,
) {
    let focus = navigator.as_ref().map_or(Vec3::ZERO, |n| n.look_target());
    for (entity, transform) in cameras.iter() {
        let orbit = OrbitCamera::around(focus, transform.translation).unwrap_or_default();
        commands.entity(entity).insert(orbit);
    }
}

/// Handle mouse input for orbit camera
fn orbit_camera_controls(
    mut query: Query<&mut OrbitCamera>,
    navigator: Option<Res<Navigator>>,
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: EventReader<MouseMotion>,
    mut mouse_wheel: EventReader<MouseWheel>,
) {
    // Во время glide ввод выбрасываем, а не копим
    if navigator_is_moving(&navigator) {
        mouse_motion.clear();
        mouse_wheel.clear();
        return;
    }

    let mut camera = match query.single_mut() {
        Ok(cam) => cam,
        Err(_) => return,
    };

    // Right mouse button: orbit
    if mouse_buttons.pressed(MouseButton::Right) {
        for motion in mouse_motion.read() {
            camera.yaw -= motion.delta.x * camera.sensitivity;
            camera.pitch -= motion.delta.y * camera.sensitivity;

            // Clamp pitch to avoid gimbal lock
            camera.pitch = camera.pitch.clamp(
                -std::f32::consts::FRAC_PI_2 + 0.1,
                std::f32::consts::FRAC_PI_2 - 0.1,
            );
        }
    } else {
        // Consume motion events even when not orbiting
        mouse_motion.clear();
    }

    // Mouse wheel: zoom
    for wheel in mouse_wheel.read() {
        camera.distance -= wheel.y * camera.zoom_speed;
        camera.distance = camera.distance.clamp(MIN_ORBIT_DISTANCE, MAX_ORBIT_DISTANCE);
    }
}

/// Update camera transform based on orbit parameters
fn update_camera_transform(
    mut query: Query<(&OrbitCamera, &mut Transform), Changed<OrbitCamera>>,
    navigator: Option<Res<Navigator>>,
) {
    if navigator_is_moving(&navigator) {
        return;
    }

    for (camera, mut transform) in query.iter_mut() {
        *transform = Transform::from_translation(camera.translation()).looking_at(camera.focus, Vec3::Y);
    }
}

/// После прибытия орбита продолжается с того места, где камера остановилась
fn refocus_on_arrival(
    mut arrived: EventReader<NavigationArrived>,
    navigator: Option<Res<Navigator>>,
    mut cameras: Query<(&Transform, &mut OrbitCamera), With<NavigatorCamera>>,
) {
    if arrived.is_empty() {
        return;
    }
    arrived.clear();

    let Some(navigator) = navigator else {
        return;
    };
    for (transform, mut orbit) in cameras.iter_mut() {
        if let Some(refocused) = OrbitCamera::around(navigator.look_target(), transform.translation) {
            *orbit = OrbitCamera {
                sensitivity: orbit.sensitivity,
                zoom_speed: orbit.zoom_speed,
                ..refocused
            };
        }
    }
}
