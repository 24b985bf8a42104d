use quartz::{Angle, Mat4, Vec3};

use super::input::{Input, KeyCode, MouseButton};

fn clamped_fov(fov: Angle) -> Angle {
    const MIN: f32 = 0.01;
    const MAX: f32 = std::f32::consts::PI - 0.01;

    let radians = fov.to_rad();
    let clamped = radians.max(MIN).min(MAX);
    if (clamped - radians).abs() > 1e-6 {
        log::warn!("Field of view out of bounds: {} <= `{}` <= {}", MIN, radians, MAX);
    }
    Angle::from_rad(clamped)
}

/// First-person free-fly camera. Position and rotation change through
/// [`update`](Self::update) from the input of the current frame, the view and
/// projection matrices are derived from the resulting pose.
#[derive(Debug)]
pub struct Camera {
    eye_position: Vec3,
    eye_rotation: Vec3,
    focal_point: Vec3,
    up_vector: Vec3,
    forward_vector: Vec3,
    backward_vector: Vec3,
    left_vector: Vec3,
    right_vector: Vec3,
    rotation_matrix: Mat4,
    vector_rotation_matrix: Mat4,
    sensitivity: f32,
    move_speed: f32,
    move_speed_boost: f32,
    scroll_speed: f32,
    scroll_speed_boost: f32,
    fov: Angle,
    aspect: f32,
    render_distance: f32,
}

impl Camera {
    pub const DEFAULT_UP: Vec3 = Vec3::Y;
    pub const DEFAULT_FORWARD: Vec3 = Vec3::Z;
    pub const DEFAULT_BACKWARD: Vec3 = Vec3::new(0.0, 0.0, -1.0);
    pub const DEFAULT_LEFT: Vec3 = Vec3::new(-1.0, 0.0, 0.0);
    pub const DEFAULT_RIGHT: Vec3 = Vec3::X;

    const NEAR_PLANE: f32 = 1.0;

    pub fn builder() -> CameraBuilder {
        CameraBuilder {
            eye_position: Vec3::new(0.0, 0.0, -10.0),
            eye_rotation: Vec3::ZERO,
            focal_point: Vec3::ZERO,
            sensitivity: 0.05,
            move_speed: 0.1,
            move_speed_boost: 0.2,
            scroll_speed: 0.5,
            scroll_speed_boost: 1.0,
            fov: Angle::from_rad(std::f32::consts::FRAC_PI_4),
            aspect: 800.0 / 600.0,
            render_distance: 200.0,
        }
    }

    /// Folds one frame of input into the pose: sprint edges change the
    /// speeds, held keys and scroll move the eye along the current basis
    /// vectors, dragging with the left button turns the eye. Ends by
    /// recomputing the basis from the new rotation.
    pub fn update(&mut self, input: &Input) {
        if input.key_was_pressed(KeyCode::LShift) {
            self.adjust_move_speed(self.move_speed_boost);
            self.adjust_scroll_speed(self.scroll_speed_boost);
        }
        if input.key_was_released(KeyCode::LShift) {
            self.adjust_move_speed(-self.move_speed_boost);
            self.adjust_scroll_speed(-self.scroll_speed_boost);
        }

        if input.key_down(KeyCode::W) {
            self.adjust_eye_position(self.forward_vector * self.move_speed);
        }
        if input.key_down(KeyCode::A) {
            self.adjust_eye_position(self.left_vector * self.move_speed);
        }
        if input.key_down(KeyCode::S) {
            self.adjust_eye_position(self.backward_vector * self.move_speed);
        }
        if input.key_down(KeyCode::D) {
            self.adjust_eye_position(self.right_vector * self.move_speed);
        }
        if input.key_down(KeyCode::Space) {
            self.adjust_eye_position(self.up_vector * self.move_speed);
        }
        if input.key_down(KeyCode::C) {
            self.adjust_eye_position(-self.up_vector * self.move_speed);
        }

        let ticks = input.scroll_delta().1;
        if ticks > 0.0 {
            self.adjust_eye_position(self.forward_vector * (self.scroll_speed * ticks));
        } else if ticks < 0.0 {
            self.adjust_eye_position(self.backward_vector * (self.scroll_speed * -ticks));
        }

        if input.mouse_button_down(MouseButton::Left) {
            let (delta_x, delta_y) = input.mouse_delta();
            let scale = self.sensitivity * self.sensitivity;
            self.adjust_eye_rotation(Vec3::new(delta_x * scale, delta_y * scale, 0.0));
        }

        self.update_vectors();
    }

    /// Rebuilds focal point, up and the four movement vectors from
    /// `eye_rotation`. The movement vectors ignore roll, so strafing stays
    /// level.
    fn update_vectors(&mut self) {
        self.rotation_matrix = Mat4::from_yaw_pitch_roll(
            self.eye_rotation.x,
            self.eye_rotation.y,
            self.eye_rotation.z,
        );
        self.focal_point =
            self.rotation_matrix.transform_point(Self::DEFAULT_FORWARD) + self.eye_position;
        self.up_vector = self.rotation_matrix.transform_point(Self::DEFAULT_UP);

        self.vector_rotation_matrix =
            Mat4::from_yaw_pitch_roll(self.eye_rotation.x, self.eye_rotation.y, 0.0);
        self.forward_vector = self
            .vector_rotation_matrix
            .transform_point(Self::DEFAULT_FORWARD);
        self.backward_vector = self
            .vector_rotation_matrix
            .transform_point(Self::DEFAULT_BACKWARD);
        self.left_vector = self.vector_rotation_matrix.transform_point(Self::DEFAULT_LEFT);
        self.right_vector = self
            .vector_rotation_matrix
            .transform_point(Self::DEFAULT_RIGHT);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_lh(self.eye_position, self.focal_point, self.up_vector)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_lh(
            self.fov.to_rad(),
            self.aspect,
            Self::NEAR_PLANE,
            self.render_distance,
        )
    }

    pub fn eye_position(&self) -> Vec3 {
        self.eye_position
    }

    pub fn set_eye_position(&mut self, position: Vec3) {
        self.eye_position = position;
    }

    pub fn adjust_eye_position(&mut self, delta: Vec3) {
        self.eye_position += delta;
    }

    pub fn eye_rotation(&self) -> Vec3 {
        self.eye_rotation
    }

    pub fn set_eye_rotation(&mut self, rotation: Vec3) {
        self.eye_rotation = rotation;
    }

    pub fn adjust_eye_rotation(&mut self, delta: Vec3) {
        self.eye_rotation += delta;
    }

    pub fn focal_point(&self) -> Vec3 {
        self.focal_point
    }

    pub fn set_focal_point(&mut self, focal_point: Vec3) {
        self.focal_point = focal_point;
    }

    pub fn up_vector(&self) -> Vec3 {
        self.up_vector
    }

    pub fn forward_vector(&self) -> Vec3 {
        self.forward_vector
    }

    pub fn backward_vector(&self) -> Vec3 {
        self.backward_vector
    }

    pub fn left_vector(&self) -> Vec3 {
        self.left_vector
    }

    pub fn right_vector(&self) -> Vec3 {
        self.right_vector
    }

    pub fn rotation_matrix(&self) -> Mat4 {
        self.rotation_matrix
    }

    pub fn vector_rotation_matrix(&self) -> Mat4 {
        self.vector_rotation_matrix
    }

    pub fn sensitivity(&self) -> f32 {
        self.sensitivity
    }

    pub fn set_sensitivity(&mut self, sensitivity: f32) {
        self.sensitivity = sensitivity;
    }

    pub fn move_speed(&self) -> f32 {
        self.move_speed
    }

    pub fn set_move_speed(&mut self, speed: f32) {
        self.move_speed = speed;
    }

    pub fn adjust_move_speed(&mut self, delta: f32) {
        self.move_speed += delta;
    }

    pub fn move_speed_boost(&self) -> f32 {
        self.move_speed_boost
    }

    pub fn set_move_speed_boost(&mut self, boost: f32) {
        self.move_speed_boost = boost;
    }

    pub fn scroll_speed(&self) -> f32 {
        self.scroll_speed
    }

    pub fn set_scroll_speed(&mut self, speed: f32) {
        self.scroll_speed = speed;
    }

    pub fn adjust_scroll_speed(&mut self, delta: f32) {
        self.scroll_speed += delta;
    }

    pub fn scroll_speed_boost(&self) -> f32 {
        self.scroll_speed_boost
    }

    pub fn set_scroll_speed_boost(&mut self, boost: f32) {
        self.scroll_speed_boost = boost;
    }

    pub fn fov(&self) -> Angle {
        self.fov
    }

    pub fn set_fov(&mut self, fov: Angle) {
        self.fov = clamped_fov(fov);
    }

    pub fn render_distance(&self) -> f32 {
        self.render_distance
    }

    pub fn set_render_distance(&mut self, render_distance: f32) {
        self.render_distance = render_distance;
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }
}

pub struct CameraBuilder {
    eye_position: Vec3,
    eye_rotation: Vec3,
    focal_point: Vec3,
    sensitivity: f32,
    move_speed: f32,
    move_speed_boost: f32,
    scroll_speed: f32,
    scroll_speed_boost: f32,
    fov: Angle,
    aspect: f32,
    render_distance: f32,
}

impl CameraBuilder {
    pub fn eye_position(&mut self, position: Vec3) -> &mut Self {
        self.eye_position = position;
        self
    }

    pub fn eye_rotation(&mut self, rotation: Vec3) -> &mut Self {
        self.eye_rotation = rotation;
        self
    }

    pub fn focal_point(&mut self, focal_point: Vec3) -> &mut Self {
        self.focal_point = focal_point;
        self
    }

    pub fn sensitivity(&mut self, sensitivity: f32) -> &mut Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn move_speed(&mut self, speed: f32) -> &mut Self {
        self.move_speed = speed;
        self
    }

    pub fn move_speed_boost(&mut self, boost: f32) -> &mut Self {
        self.move_speed_boost = boost;
        self
    }

    pub fn scroll_speed(&mut self, speed: f32) -> &mut Self {
        self.scroll_speed = speed;
        self
    }

    pub fn scroll_speed_boost(&mut self, boost: f32) -> &mut Self {
        self.scroll_speed_boost = boost;
        self
    }

    pub fn fov(&mut self, fov: Angle) -> &mut Self {
        self.fov = clamped_fov(fov);
        self
    }

    pub fn aspect(&mut self, aspect: f32) -> &mut Self {
        self.aspect = aspect;
        self
    }

    pub fn render_distance(&mut self, render_distance: f32) -> &mut Self {
        if render_distance <= Camera::NEAR_PLANE {
            log::warn!(
                "Render distance does not reach past the near plane: `{}`",
                render_distance
            );
        }
        self.render_distance = render_distance;
        self
    }

    /// Builds the camera with the pose exactly as given. The basis vectors
    /// start at their defaults and snap to the rotation on the first
    /// [`update`](Camera::update).
    pub fn build(&mut self) -> Camera {
        Camera {
            eye_position: self.eye_position,
            eye_rotation: self.eye_rotation,
            focal_point: self.focal_point,
            up_vector: Camera::DEFAULT_UP,
            forward_vector: Camera::DEFAULT_FORWARD,
            backward_vector: Camera::DEFAULT_BACKWARD,
            left_vector: Camera::DEFAULT_LEFT,
            right_vector: Camera::DEFAULT_RIGHT,
            rotation_matrix: Mat4::IDENTITY,
            vector_rotation_matrix: Mat4::IDENTITY,
            sensitivity: self.sensitivity,
            move_speed: self.move_speed,
            move_speed_boost: self.move_speed_boost,
            scroll_speed: self.scroll_speed,
            scroll_speed_boost: self.scroll_speed_boost,
            fov: self.fov,
            aspect: self.aspect,
            render_distance: self.render_distance,
        }
    }
}
