//! The pool table scene
//!
//! Object layout (Z up, table centred on the origin):
//! - table: 4 x 2 x 0.1 cube
//! - cue: cylinder resting left of the white ball
//! - white ball at the origin, black ball 1.5 units along +X
//! - six pockets on the table rim, four ambient lights just past the corners

use slotmap::SlotMap;

use crate::core::config::CameraConfig;
use crate::foundation::math::Vec3;
use crate::scene::{Camera, CameraTarget, GeometryKind, ObjectKey, SceneObject};

/// Number of pockets on the table
pub const POCKET_COUNT: usize = 6;

/// Number of emissive ambient lights
pub const AMBIENT_LIGHT_COUNT: usize = 4;

const TABLE_HALF_LENGTH: f32 = 2.0;
const TABLE_HALF_WIDTH: f32 = 1.0;
const BALL_SCALE: f32 = 0.15;
const LIGHT_SCALE: f32 = 0.1;
const LIGHT_INSET: f32 = 0.2;

/// Scene holding every object and the camera
///
/// Objects are created once in [`PoolScene::new`] and never removed, so the
/// keys handed out here stay valid for the life of the scene. Mutation is
/// reserved to the animation system; everything public is read-only.
#[derive(Debug, Clone)]
pub struct PoolScene {
    objects: SlotMap<ObjectKey, SceneObject>,
    table: ObjectKey,
    cue: ObjectKey,
    white_ball: ObjectKey,
    black_ball: ObjectKey,
    pockets: Vec<ObjectKey>,
    ambient_lights: Vec<ObjectKey>,
    lit_order: Vec<ObjectKey>,
    camera: Camera,
}

impl PoolScene {
    /// Build the scene with the overhead camera
    pub fn new(camera_config: &CameraConfig) -> Self {
        let mut objects = SlotMap::with_key();

        let table = objects.insert(SceneObject::lit(
            GeometryKind::Cube,
            Vec3::zeros(),
            Vec3::new(TABLE_HALF_LENGTH * 2.0, TABLE_HALF_WIDTH * 2.0, 0.1),
            Vec3::new(0.1, 0.5, 0.1),
        ));

        let cue = objects.insert(
            SceneObject::lit(
                GeometryKind::Cylinder,
                Vec3::new(-1.5, 0.0, 0.2),
                Vec3::new(0.05, 0.05, 1.5),
                Vec3::new(0.8, 0.6, 0.3),
            )
            .with_rotation(Vec3::zeros()),
        );

        let white_ball = objects.insert(SceneObject::lit(
            GeometryKind::Sphere,
            Vec3::new(0.0, 0.0, 0.3),
            Vec3::repeat(BALL_SCALE),
            Vec3::new(1.0, 1.0, 1.0),
        ));

        let black_ball = objects.insert(SceneObject::lit(
            GeometryKind::Sphere,
            Vec3::new(1.5, 0.0, 0.3),
            Vec3::repeat(BALL_SCALE),
            Vec3::new(0.1, 0.1, 0.1),
        ));

        // Corners and long-side midpoints
        let pockets: Vec<ObjectKey> = [-TABLE_HALF_LENGTH, 0.0, TABLE_HALF_LENGTH]
            .iter()
            .flat_map(|&x| [-TABLE_HALF_WIDTH, TABLE_HALF_WIDTH].map(|y| Vec3::new(x, y, 0.05)))
            .map(|position| {
                objects.insert(SceneObject::lit(
                    GeometryKind::Cylinder,
                    position,
                    Vec3::new(0.2, 0.2, 0.1),
                    Vec3::new(0.2, 0.2, 0.2),
                ))
            })
            .collect();

        let ambient_lights: Vec<ObjectKey> = [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)]
            .iter()
            .map(|&(sx, sy)| {
                let position = Vec3::new(
                    sx * (TABLE_HALF_LENGTH + LIGHT_INSET),
                    sy * (TABLE_HALF_WIDTH + LIGHT_INSET),
                    0.3,
                );
                objects.insert(SceneObject::emissive(
                    GeometryKind::Cube,
                    position,
                    Vec3::repeat(LIGHT_SCALE),
                    Vec3::new(0.0, 0.5, 1.0),
                ))
            })
            .collect();

        let mut lit_order = vec![table, cue, white_ball, black_ball];
        lit_order.extend(pockets.iter().copied());

        log::debug!(
            "Pool scene created: {} lit objects, {} ambient lights",
            lit_order.len(),
            ambient_lights.len()
        );

        Self {
            objects,
            table,
            cue,
            white_ball,
            black_ball,
            pockets,
            ambient_lights,
            lit_order,
            camera: Camera::top_down(
                camera_config.top_down_eye,
                camera_config.top_down_target,
                camera_config.up,
            ),
        }
    }

    /// Look up an object by key
    pub fn object(&self, key: ObjectKey) -> Option<&SceneObject> {
        self.objects.get(key)
    }

    /// The table
    pub fn table(&self) -> &SceneObject {
        &self.objects[self.table]
    }

    /// The cue
    pub fn cue(&self) -> &SceneObject {
        &self.objects[self.cue]
    }

    /// The white ball
    pub fn white_ball(&self) -> &SceneObject {
        &self.objects[self.white_ball]
    }

    /// The black ball
    pub fn black_ball(&self) -> &SceneObject {
        &self.objects[self.black_ball]
    }

    /// Key of the white ball, the follow camera's subject
    pub fn white_ball_key(&self) -> ObjectKey {
        self.white_ball
    }

    /// Pockets in layout order
    pub fn pockets(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.pockets.iter().map(move |&key| &self.objects[key])
    }

    /// Ambient lights in layout order
    pub fn ambient_lights(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.ambient_lights.iter().map(move |&key| &self.objects[key])
    }

    /// Objects of the lit pass in draw order: table, cue, balls, pockets
    pub fn lit_objects(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.lit_order.iter().map(move |&key| &self.objects[key])
    }

    /// Objects of the emissive pass in draw order
    pub fn emissive_objects(&self) -> impl Iterator<Item = &SceneObject> + '_ {
        self.ambient_lights()
    }

    /// The camera
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Resolve the camera target to a world-space point
    ///
    /// Object targets read the object's current position.
    pub fn camera_target(&self) -> Vec3 {
        match self.camera.target {
            CameraTarget::Point(point) => point,
            CameraTarget::Object(key) => self.objects.get(key).map_or_else(
                || {
                    log::warn!("Camera tracks a missing object, looking at the origin");
                    Vec3::zeros()
                },
                |object| object.position,
            ),
        }
    }

    pub(crate) fn set_camera(&mut self, camera: Camera) {
        self.camera = camera;
    }

    pub(crate) fn cue_mut(&mut self) -> &mut SceneObject {
        &mut self.objects[self.cue]
    }

    pub(crate) fn white_ball_mut(&mut self) -> &mut SceneObject {
        &mut self.objects[self.white_ball]
    }

    pub(crate) fn black_ball_mut(&mut self) -> &mut SceneObject {
        &mut self.objects[self.black_ball]
    }

    /// Set every ambient light to the same intensity
    pub(crate) fn set_ambient_intensity(&mut self, intensity: f32) {
        for &key in &self.ambient_lights {
            self.objects[key].set_emissive_intensity(intensity);
        }
    }

    /// Put animated objects back to their creation pose and switch the lights off
    pub(crate) fn restore_initial_pose(&mut self) {
        self.white_ball_mut().restore_original_pose();
        self.black_ball_mut().restore_original_pose();
        let cue = self.cue_mut();
        cue.position = cue.original_position();
        self.set_ambient_intensity(0.0);
    }
}
