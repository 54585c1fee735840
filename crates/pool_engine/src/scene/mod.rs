//! Scene object model
//!
//! The pool scene is a fixed set of objects (table, cue, two balls, six
//! pockets, four ambient lights) plus a camera. It is built once and lives
//! for the whole run; only positions, scales, rotations and light
//! intensities change between frames.
//!
//! ## Architecture
//!
//! ```text
//! SceneAnimator (writes object/camera state)
//!      ↓
//! PoolScene (owned by SceneRenderer)
//!      ↓
//! SceneRenderer (reads state, issues draw calls)
//! ```

mod object;
mod camera;
mod pool_scene;
mod scene_renderer;

pub use object::{GeometryKind, ObjectKey, SceneObject, Shading};
pub use camera::{Camera, CameraMode, CameraTarget};
pub use pool_scene::{PoolScene, POCKET_COUNT, AMBIENT_LIGHT_COUNT};
pub use scene_renderer::{SceneRenderer, clamp_delta, normal_matrix};
