//! Spatial transforms and the per-item record handed to a GPU renderer.
//!
//! ```
//! use sleeve::{Transform, Vec3, Quat};
//!
//! let transform = Transform::new()
//!     .position(Vec3::new(0.0, 2.0, -5.0))
//!     .rotation(Quat::from_rotation_y(0.5))
//!     .uniform_scale(2.0);
//!
//! let positioned = Transform::from_position(Vec3::new(1.0, 0.0, 0.0));
//! assert_eq!(positioned.scale, Vec3::ONE);
//! ```

use glam::{Mat4, Quat, Vec3};

/// Position, rotation, and scale of one item in scene space.
///
/// Applied in scale → rotate → translate order by [`Transform::matrix`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Scene-space translation.
    pub position: Vec3,
    /// Rotation as a unit quaternion.
    pub rotation: Quat,
    /// Scale factors for each axis.
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Identity transform: origin, no rotation, unit scale.
    ///
    /// # Example
    ///
    /// ```
    /// use sleeve::{Mat4, Transform};
    ///
    /// assert_eq!(Transform::new().matrix(), Mat4::IDENTITY);
    /// ```
    pub fn new() -> Self {
        Self::default()
    }

    /// Transform positioned at `position` with no rotation or scaling.
    ///
    /// # Example
    ///
    /// ```
    /// use sleeve::{Transform, Vec3};
    ///
    /// let sleeve = Transform::from_position(Vec3::new(1.5, 0.0, -2.0));
    /// assert_eq!(sleeve.position, Vec3::new(1.5, 0.0, -2.0));
    /// ```
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Sets the translation.
    ///
    /// # Example
    ///
    /// ```
    /// use sleeve::{Transform, Vec3};
    ///
    /// let transform = Transform::new().position(Vec3::new(0.0, 0.0, -3.0));
    /// assert_eq!(transform.position.z, -3.0);
    /// ```
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Sets the rotation.
    ///
    /// # Example
    ///
    /// ```
    /// use sleeve::{Quat, Transform};
    ///
    /// // Turn a sleeve a quarter away from the viewer.
    /// let transform = Transform::new().rotation(Quat::from_rotation_y(0.4));
    /// ```
    pub fn rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    /// Sets non-uniform scale factors for each axis.
    ///
    /// # Example
    ///
    /// ```
    /// use sleeve::{Transform, Vec3};
    ///
    /// let wide = Transform::new().scale(Vec3::new(2.0, 1.0, 1.0));
    /// assert_eq!(wide.scale.x, 2.0);
    /// ```
    pub fn scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the same scale on all axes.
    ///
    /// # Example
    ///
    /// ```
    /// use sleeve::{Transform, Vec3};
    ///
    /// let shrunk = Transform::new().uniform_scale(0.6);
    /// assert_eq!(shrunk.scale, Vec3::splat(0.6));
    /// ```
    pub fn uniform_scale(mut self, scale: f32) -> Self {
        self.scale = Vec3::splat(scale);
        self
    }

    /// Model matrix for this transform, composed scale, then rotation, then
    /// translation.
    ///
    /// # Example
    ///
    /// ```
    /// use sleeve::{Transform, Vec3};
    ///
    /// let transform = Transform::from_position(Vec3::X).uniform_scale(2.0);
    /// let corner = transform.matrix().transform_point3(Vec3::ONE);
    /// assert_eq!(corner, Vec3::new(3.0, 2.0, 2.0));
    /// ```
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }
}

/// One item's placement laid out for a GPU instance buffer.
///
/// 80 bytes: a column-major model matrix followed by opacity and padding
/// to keep 16-byte alignment for uniform/storage buffers.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ItemInstance {
    /// Column-major model matrix.
    pub model: [[f32; 4]; 4],
    /// Opacity in `[0, 1]`.
    pub opacity: f32,
    pub _padding: [f32; 3],
}

impl ItemInstance {
    /// Packs `transform` and `opacity` for upload.
    pub fn new(transform: &Transform, opacity: f32) -> Self {
        Self {
            model: transform.matrix().to_cols_array_2d(),
            opacity,
            _padding: [0.0; 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_matrix() {
        assert_eq!(Transform::new().matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn matrix_scales_then_rotates_then_translates() {
        let transform = Transform::new()
            .position(Vec3::new(1.0, 0.0, 0.0))
            .rotation(Quat::from_rotation_y(std::f32::consts::FRAC_PI_2))
            .uniform_scale(2.0);

        let p = transform.matrix().transform_point3(Vec3::X);
        assert!((p - Vec3::new(1.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn instance_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<ItemInstance>(), 80);

        let instance = ItemInstance::new(&Transform::from_position(Vec3::new(0.0, 0.0, -3.0)), 0.5);
        let bytes: &[u8] = bytemuck::bytes_of(&instance);
        assert_eq!(bytes.len(), 80);
        assert_eq!(instance.model[3], [0.0, 0.0, -3.0, 1.0]);
        assert_eq!(instance.opacity, 0.5);
    }
}
