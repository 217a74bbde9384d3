pub mod camera;
pub mod cloud;
pub mod connections;
pub mod galaxy;
pub mod sphere;

/// How the starfield is attached to the view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundMode {
    /// Drawn with the fixed default camera; orbiting does not move it
    Static,
    /// Rides along with the orbit camera like a skybox
    FollowCamera,
}

impl Default for BackgroundMode {
    fn default() -> Self {
        Self::Static
    }
}

impl BackgroundMode {
    pub fn from_static_flag(is_static: bool) -> Self {
        if is_static {
            Self::Static
        } else {
            Self::FollowCamera
        }
    }
}
