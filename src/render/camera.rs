//! Orbit camera and perspective projection onto a 2-D viewport.
//!
//! The camera always looks at the origin. Drag changes azimuth/elevation,
//! scroll changes distance; there is no pan.

const NEAR: f32 = 0.1;
const ROTATE_SPEED: f32 = 0.008;
const ZOOM_SPEED: f32 = 0.003;
const ELEVATION_LIMIT: f32 = std::f32::consts::FRAC_PI_2 - 0.05;
pub const MIN_DISTANCE: f32 = 4.0;
pub const MAX_DISTANCE: f32 = 60.0;

/// Screen rectangle the scene is projected into, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn center(&self) -> [f32; 2] {
        [self.x + self.width * 0.5, self.y + self.height * 0.5]
    }

    pub fn aspect(&self) -> f32 {
        if self.height > 0.0 {
            self.width / self.height
        } else {
            1.0
        }
    }
}

/// A point after projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projected {
    /// Screen position
    pub pos: [f32; 2],
    /// Distance along the view direction
    pub depth: f32,
    /// Screen points per world unit at this depth
    pub scale: f32,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbitCamera {
    pub azimuth: f32,
    pub elevation: f32,
    pub distance: f32,
    /// Vertical field of view, radians
    pub fov_y: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        // Sits at (0, 0, 14) looking down -z
        Self {
            azimuth: 0.0,
            elevation: 0.0,
            distance: 14.0,
            fov_y: 45.0_f32.to_radians(),
        }
    }
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn cross(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn normalize(v: [f32; 3]) -> [f32; 3] {
    let len = dot(v, v).sqrt();
    if len > 1e-6 {
        [v[0] / len, v[1] / len, v[2] / len]
    } else {
        v
    }
}

impl OrbitCamera {
    pub fn position(&self) -> [f32; 3] {
        let (sa, ca) = self.azimuth.sin_cos();
        let (se, ce) = self.elevation.sin_cos();
        [
            self.distance * ce * sa,
            self.distance * se,
            self.distance * ce * ca,
        ]
    }

    /// Right, up and forward unit vectors.
    pub fn basis(&self) -> ([f32; 3], [f32; 3], [f32; 3]) {
        let pos = self.position();
        let forward = normalize([-pos[0], -pos[1], -pos[2]]);
        let right = normalize(cross(forward, [0.0, 1.0, 0.0]));
        let up = cross(right, forward);
        (right, up, forward)
    }

    /// Rotate around the target from a pointer drag (screen points).
    pub fn orbit(&mut self, dx: f32, dy: f32) {
        self.azimuth -= dx * ROTATE_SPEED;
        self.elevation = (self.elevation + dy * ROTATE_SPEED).clamp(-ELEVATION_LIMIT, ELEVATION_LIMIT);
    }

    /// Dolly in (positive scroll) or out.
    pub fn zoom(&mut self, scroll: f32) {
        self.distance = (self.distance * (1.0 - scroll * ZOOM_SPEED)).clamp(MIN_DISTANCE, MAX_DISTANCE);
    }

    /// Project a world-space point. `None` when behind the near plane.
    pub fn project(&self, point: [f32; 3], viewport: &Viewport) -> Option<Projected> {
        let pos = self.position();
        let (right, up, forward) = self.basis();
        let v = [point[0] - pos[0], point[1] - pos[1], point[2] - pos[2]];
        self.project_view([dot(v, right), dot(v, up), dot(v, forward)], viewport)
    }

    /// Project a point given in camera space (x right, y up, z forward).
    pub fn project_view(&self, view: [f32; 3], viewport: &Viewport) -> Option<Projected> {
        let [x, y, z] = view;
        if z < NEAR {
            return None;
        }

        let tan_half = (self.fov_y * 0.5).tan();
        let ndc_x = x / (z * tan_half * viewport.aspect());
        let ndc_y = y / (z * tan_half);
        let [cx, cy] = viewport.center();

        Some(Projected {
            pos: [
                cx + ndc_x * viewport.width * 0.5,
                cy - ndc_y * viewport.height * 0.5,
            ],
            depth: z,
            scale: viewport.height * 0.5 / (z * tan_half),
        })
    }

    /// Project a point that rides along with the camera (skybox-style),
    /// given in the camera's local frame where -z points into the screen.
    pub fn project_attached(&self, local: [f32; 3], viewport: &Viewport) -> Option<Projected> {
        self.project_view([local[0], local[1], -local[2]], viewport)
    }
}
