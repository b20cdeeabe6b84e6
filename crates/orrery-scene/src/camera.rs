use glam::{Mat4, Vec3};

use orrery_engine::coords::Viewport;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PerspectiveParams {
    pub fov_y_radians: f32,
    pub near: f32,
    pub far: f32,
}

/// How big the orthographic view volume is.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum OrthoExtent {
    /// Constant half height in world units; width follows the aspect ratio.
    Fixed { half_height: f32 },
    /// Constant zoom: this many logical pixels per world unit.
    PixelsPerUnit(f32),
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct OrthographicParams {
    pub extent: OrthoExtent,
    pub near: f32,
    pub far: f32,
}

/// The active projection with everything needed to build its matrix.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Perspective(PerspectiveParams),
    Orthographic(OrthographicParams),
}

impl Projection {
    /// Projection matrix into wgpu clip space (depth 0..1).
    pub fn matrix(&self, viewport: Viewport) -> Mat4 {
        match *self {
            Projection::Perspective(p) => {
                Mat4::perspective_rh(p.fov_y_radians, viewport.aspect(), p.near, p.far)
            }
            Projection::Orthographic(o) => {
                let (half_w, half_h) = match o.extent {
                    OrthoExtent::Fixed { half_height } => (half_height * viewport.aspect(), half_height),
                    OrthoExtent::PixelsPerUnit(ppu) => {
                        if viewport.is_valid() && ppu > 0.0 {
                            (viewport.width / (2.0 * ppu), viewport.height / (2.0 * ppu))
                        } else {
                            (1.0, 1.0)
                        }
                    }
                };
                Mat4::orthographic_rh(-half_w, half_w, -half_h, half_h, o.near, o.far)
            }
        }
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum ProjectionMode {
    Perspective,
    Orthographic,
}

/// Look-at camera holding both projection setups; `mode` picks the live one.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub perspective: PerspectiveParams,
    pub orthographic: OrthographicParams,
    pub mode: ProjectionMode,

    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
}

impl Camera {
    /// Perspective view of the solar system from above and to the side.
    pub fn solar_system() -> Self {
        Self {
            perspective: PerspectiveParams {
                fov_y_radians: 45f32.to_radians(),
                near: 0.1,
                far: 1000.0,
            },
            orthographic: OrthographicParams {
                extent: OrthoExtent::PixelsPerUnit(8.0),
                near: -200.0,
                far: 500.0,
            },
            mode: ProjectionMode::Perspective,
            eye: Vec3::new(120.0, 60.0, 180.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    /// Orthographic view of the XY plane spanning [-1, 1] vertically.
    pub fn flat() -> Self {
        Self {
            perspective: PerspectiveParams {
                fov_y_radians: 90f32.to_radians(),
                near: 0.1,
                far: 10.0,
            },
            orthographic: OrthographicParams {
                extent: OrthoExtent::Fixed { half_height: 1.0 },
                near: 0.0,
                far: 2.0,
            },
            mode: ProjectionMode::Orthographic,
            eye: Vec3::Z,
            target: Vec3::ZERO,
            up: Vec3::Y,
        }
    }

    pub fn projection(&self) -> Projection {
        match self.mode {
            ProjectionMode::Perspective => Projection::Perspective(self.perspective),
            ProjectionMode::Orthographic => Projection::Orthographic(self.orthographic),
        }
    }

    /// Switches to the other projection and returns the new mode.
    pub fn toggle(&mut self) -> ProjectionMode {
        self.mode = match self.mode {
            ProjectionMode::Perspective => ProjectionMode::Orthographic,
            ProjectionMode::Orthographic => ProjectionMode::Perspective,
        };
        self.mode
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self, viewport: Viewport) -> Mat4 {
        self.projection().matrix(viewport) * self.view()
    }
}
