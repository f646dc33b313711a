// Shared tuning constants for the particle field and scroll choreography.

// Colour
pub const HUE_BUCKETS: usize = 48; // rainbow steps in the sprite atlas
pub const PRISM_HUE_OFFSETS: [f32; 2] = [32.0, 72.0]; // secondary gradient hues

// Viewport
pub const MOBILE_MAX_WIDTH: f32 = 640.0; // widths below this use the mobile profile
pub const MAX_DEVICE_PIXEL_RATIO: f32 = 2.0;
pub const WRAP_PADDING_PX: f32 = 26.0; // flow particles wrap this far outside the edges

// Frame timing (seconds)
pub const MIN_FRAME_DT_SEC: f32 = 0.001;
pub const MAX_FRAME_DT_SEC: f32 = 0.033;

// Deterministic seeds
pub const FLOW_SEED: u32 = 123_456_789;
pub const CLUSTER_ATTR_SEED: u32 = 246_813_579;
pub const LEFT_CLUSTER_SEED: u32 = 9001;
pub const RIGHT_CLUSTER_SEED: u32 = 4242;
pub const LEFT_SHAPE_SEED_STRIDE: u32 = 101;
pub const RIGHT_SHAPE_SEED_STRIDE: u32 = 131;

// Shape generation
pub const SHAPE_SCALE: f32 = 5.8;
pub const SHAPE_JITTER: f32 = 6.8; // +/- px added to every shape point
pub const FROG_HEAD_FRACTION: f32 = 0.14;
pub const FROG_HEAD_LIFT: f32 = 25.0;

// Flow particles
pub const FLOW_TWINKLE_BASE: f32 = 0.70;
pub const FLOW_TWINKLE_SPAN: f32 = 0.30;
pub const FLOW_PHASE_RATE: f32 = 1.6; // rad/s, multiplied by per-particle speed
pub const FLOW_SPEED_RANGE: (f32, f32) = (0.95, 2.2);
pub const FLOW_VX_JITTER: (f32, f32) = (-14.0, 22.0);
pub const FLOW_VY_JITTER: (f32, f32) = (-18.0, 14.0);
pub const FLOW_BLOOM_EVERY: usize = 6;
pub const FLOW_BLOOM_ALPHA: f32 = 0.34;
pub const FLOW_BLOOM_HUE_OFFSET: usize = 3;
pub const FLOW_HUE_PERIOD_MS: f64 = 220.0;
pub const FLOW_SIZE_CUTS: [f32; 2] = [0.55, 0.85];

// Clusters
pub const CLUSTER_TWINKLE_BASE: f32 = 0.68;
pub const CLUSTER_TWINKLE_SPAN: f32 = 0.32;
pub const CLUSTER_PHASE_RATE: f32 = 2.6; // rad/s
pub const CLUSTER_ALPHA_BASE: f32 = 0.36;
pub const CLUSTER_ALPHA_SPAN: f32 = 0.64;
pub const CLUSTER_BLOOM_EVERY: usize = 5;
pub const CLUSTER_BLOOM_ALPHA: f32 = 0.30;
pub const CLUSTER_HUE_PERIOD_MS: f64 = 260.0;
pub const CLUSTER_HUE_SPREAD: usize = 7; // neighbouring points step through 7 buckets
pub const CLUSTER_SIZE_CUTS: [f32; 2] = [0.40, 0.80];

// Cluster anchor drift (ms-based angular frequencies, px amplitudes)
pub const DRIFT_X_SLOW: (f64, f32) = (0.00055, 28.0);
pub const DRIFT_X_FAST: (f64, f32) = (0.0011, 10.0);
pub const DRIFT_Y: (f64, f32) = (0.00048, 18.0);

// Sprites
pub const BLOOM_SCALE: f32 = 1.6;
pub const SPRITE_RAY_HALF_LENGTH: f32 = 0.24; // fraction of sprite size
pub const SPRITE_RAY_ALPHA: f32 = 0.22;

// Scroll choreography
pub const INSIDE_BUFFER_PX: f64 = 50.0;
pub const INTRO_FADE_RATE: f64 = 3.0;
pub const INTRO_SHRINK: f64 = 0.1;
pub const SLIDE_UNDER_SHRINK: f64 = 0.05;
pub const SLIDE_UNDER_DIM: f64 = 0.4;

// Section nav
pub const ACTIVATION_BUFFER_PX: f64 = 6.0;
