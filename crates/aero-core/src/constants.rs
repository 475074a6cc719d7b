use glam::Vec3;

// Shared scene tuning constants used by both web and native frontends.

// Centerpiece model placement (model space -> group space)
pub const MODEL_SCALE: f32 = 0.05; // master scale for the imported mesh
pub const MESH_OFFSET: [f32; 3] = [50.0, 0.0, 100.0]; // pivot correction, pre-scale units
pub const MESH_ROTATION_Y: f32 = std::f32::consts::PI; // model faces -Z after this turn

// Wireframe edges
pub const EDGE_THRESHOLD_DEG: f32 = 11.27; // min dihedral angle for a kept edge
pub const EDGE_COLOR: [f32; 3] = [0x8C as f32 / 255.0, 0x82 as f32 / 255.0, 0x79 as f32 / 255.0];
pub const EDGE_OPACITY: f32 = 0.4;

// Intro fly-in
pub const INTRO_START_Z: f32 = -20.0; // start far away
pub const INTRO_END_Z: f32 = 0.0; // rest at origin
pub const INTRO_DURATION_SEC: f32 = 1.5;

// Idle motion
pub const BOB_AMPLITUDE: f32 = 0.25;
pub const BOB_SPEED: f32 = 0.5;
pub const BANK_AMPLITUDE: f32 = 0.25;
pub const BANK_SPEED: f32 = 0.3;
pub const BANK_PITCH_FACTOR: f32 = 0.25; // pitch follows bank at this ratio
pub const YAW_AMPLITUDE: f32 = 0.04;
pub const YAW_SPEED: f32 = 0.2;
pub const IDLE_BLEND: f32 = 0.3; // per-tick blend toward the idle target

// Camera
pub const CAMERA_BLEND: f32 = 0.08; // per-tick blend toward the keyframe target
pub const CAMERA_FOVY_DEG: f32 = 45.0;
pub const CAMERA_ZNEAR: f32 = 0.1;
pub const CAMERA_ZFAR: f32 = 200.0;

// Scroll sampling
pub const SCROLL_THROTTLE_MS: f64 = 16.0; // one display frame

// Afterburners
pub const AFTERBURNER_LEFT: [f32; 3] = [-1.19, 0.77, 4.0];
pub const AFTERBURNER_RIGHT: [f32; 3] = [1.25, 0.77, 4.0];
pub const AFTERBURNER_SCALE: f32 = 1.5;
pub const AFTERBURNER_LENGTH: f32 = 1.5;
pub const AFTERBURNER_RADIUS: f32 = 0.15;
pub const AFTERBURNER_SEGMENTS: u32 = 6;
pub const AFTERBURNER_COLOR: [f32; 3] = [1.0, 0x6B as f32 / 255.0, 0x35 as f32 / 255.0];
pub const AFTERBURNER_EMISSIVE: [f32; 3] = [1.0, 0xAA as f32 / 255.0, 0.0];
pub const FLICKER_SPEED: f32 = 30.0; // base angular frequency
pub const FLICKER_INTENSITY: f32 = 0.05; // opacity variation range
pub const FLICKER_BASE_OPACITY: f32 = 0.1;
pub const FLICKER_EMISSIVE_BASE: f32 = 1.0;
pub const FLICKER_EMISSIVE_SPAN: f32 = 0.8;

// Engine nacelle outlines
pub const NACELLE_LEFT: [f32; 3] = [-1.19, 0.79, 1.13];
pub const NACELLE_RIGHT: [f32; 3] = [1.25, 0.77, 1.13];
pub const NACELLE_RADIUS: f32 = 0.28;
pub const NACELLE_TAPER: f32 = 0.8; // bottom radius = radius * taper
pub const NACELLE_LENGTH: f32 = 3.19;
pub const NACELLE_SEGMENTS: u32 = 10;
pub const NACELLE_OPACITY: f32 = 0.2;

// Streamlines (airflow)
pub const STREAM_COUNT: usize = 20;
pub const STREAM_SPAWN_SPREAD: [f32; 2] = [6.0, 4.0]; // x/y spread of the initial pool
pub const STREAM_RESPAWN_SPREAD: [f32; 2] = [8.0, 4.0]; // x/y spread after recycling
pub const STREAM_LENGTH_RANGE: [f32; 2] = [1.5, 3.5];
pub const STREAM_SPEED_RANGE: [f32; 2] = [2.0, 4.0];
pub const STREAM_SPAWN_Z_RANGE: [f32; 2] = [-12.0, -8.0];
pub const STREAM_INLET_Z: f32 = -10.0;
pub const STREAM_INLET_JITTER: f32 = 2.0; // respawn lands in [inlet - jitter, inlet]
pub const STREAM_OUTLET_Z: f32 = 12.0;
pub const STREAM_FADE_DISTANCE: f32 = 4.0;
pub const STREAM_STEP: f32 = 0.03; // depth advance per tick per unit speed
pub const STREAM_WOBBLE_X: [f32; 2] = [0.5, 0.3]; // [freq, amplitude]
pub const STREAM_WOBBLE_Y: [f32; 2] = [0.3, 0.2];
pub const STREAM_MAX_OPACITY: f32 = 0.2;

// Fallback silhouette
pub const FALLBACK_OPACITY: f32 = 0.2;

#[inline]
pub fn mesh_offset_vec3() -> Vec3 {
    Vec3::from(MESH_OFFSET)
}
