//! Uniform names shared with the shader programs

/// Object-to-camera transform, both passes
pub const MODEL_VIEW_MATRIX: &str = "uModelViewMatrix";
/// Camera-to-clip transform, both passes
pub const PROJECTION_MATRIX: &str = "uProjectionMatrix";
/// Transform applied to normals in the lit pass
pub const NORMAL_MATRIX: &str = "uNormalMatrix";

/// Light position, lit pass
pub const LIGHT_POSITION: &str = "uLightPosition";
/// Light colour, lit pass
pub const LIGHT_COLOR: &str = "uLightColor";
/// Fog colour, lit pass
pub const FOG_COLOR: &str = "uFogColor";
/// Exponential fog density, lit pass
pub const FOG_DENSITY: &str = "uFogDensity";

/// Material ambient term
pub const AMBIENT_COLOR: &str = "uAmbientColor";
/// Material diffuse term
pub const DIFFUSE_COLOR: &str = "uDiffuseColor";
/// Material specular term
pub const SPECULAR_COLOR: &str = "uSpecularColor";
/// Material specular exponent
pub const SHININESS: &str = "uShininess";

/// Flat colour, emissive pass
pub const EMISSIVE_COLOR: &str = "uEmissiveColor";
/// Glow factor, emissive pass
pub const INTENSITY: &str = "uIntensity";
