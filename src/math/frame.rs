// Copyright @yucwang 2023

use crate::math::constants::Vector3f;

/// Orthonormal basis whose `z` axis is a surface normal.
#[derive(Debug, Clone, Copy)]
pub struct Frame {
    x: Vector3f,
    y: Vector3f,
    z: Vector3f
}

impl Default for Frame {
    fn default() -> Self {
        Frame {
            x: Vector3f::new(1.0, 0.0, 0.0),
            y: Vector3f::new(0.0, 1.0, 0.0),
            z: Vector3f::new(0.0, 0.0, 1.0)
        }
    }
}

impl Frame {
    pub fn from_normal(n: Vector3f) -> Frame {
        let up = if n.x.abs() > 0.1 {
            Vector3f::new(0.0, 1.0, 0.0)
        } else {
            Vector3f::new(1.0, 0.0, 0.0)
        };
        let x = up.cross(&n).normalize();
        let y = n.cross(&x);
        Frame { x, y, z: n }
    }

    pub fn normal(&self) -> Vector3f {
        self.z
    }

    pub fn to_local(&self, v: Vector3f) -> Vector3f {
        Vector3f::new(v.dot(&self.x), v.dot(&self.y), v.dot(&self.z))
    }

    pub fn from_local(&self, v: Vector3f) -> Vector3f {
        v.x * self.x + v.y * self.y + v.z * self.z
    }
}
