//! Triangle meshes and primitive geometry
//!
//! All primitives are built in local space centered at the origin, using the
//! same parameterisation as common web 3D libraries so scene tables port
//! across unchanged. Faces are wound counter-clockwise when seen from outside.

use std::f32::consts::{PI, TAU};

use cottage_math::Vec3;

/// An indexed triangle mesh with per-vertex normals
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    /// Vertex positions in local space
    pub positions: Vec<Vec3>,
    /// Unit normals, one per position
    pub normals: Vec<Vec3>,
    /// Triangle list indices
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Axis-aligned bounds as `(min, max)`, or `None` for an empty mesh
    pub fn bounds(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.positions.first()?;
        Some(self.positions.iter().fold((first, first), |(lo, hi), p| {
            (lo.min_components(*p), hi.max_components(*p))
        }))
    }

    fn push_vertex(&mut self, position: Vec3, normal: Vec3) -> u32 {
        let index = self.positions.len() as u32;
        self.positions.push(position);
        self.normals.push(normal);
        index
    }

    /// Append a quad given counter-clockwise corners and a shared normal
    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.positions.len() as u32;
        for c in corners {
            self.push_vertex(c, normal);
        }
        self.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    /// Replace the normals with area-weighted smooth normals computed from the faces
    pub fn compute_normals(&mut self) {
        let mut normals = vec![Vec3::ZERO; self.positions.len()];
        for tri in self.indices.chunks_exact(3) {
            let (a, b, c) = (tri[0] as usize, tri[1] as usize, tri[2] as usize);
            let face = (self.positions[b] - self.positions[a]).cross(self.positions[c] - self.positions[a]);
            normals[a] += face;
            normals[b] += face;
            normals[c] += face;
        }
        self.normals = normals
            .into_iter()
            .map(|n| if n.length_squared() > 0.0 { n.normalized() } else { Vec3::Y })
            .collect();
    }

    /// Axis-aligned box centered at the origin
    ///
    /// A zero extent on one axis yields a flat double quad (used for thin panels).
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        let (hx, hy, hz) = (width / 2.0, height / 2.0, depth / 2.0);
        let mut mesh = Self::new();

        // +X / -X
        mesh.push_quad(
            [Vec3::new(hx, -hy, hz), Vec3::new(hx, -hy, -hz), Vec3::new(hx, hy, -hz), Vec3::new(hx, hy, hz)],
            Vec3::X,
        );
        mesh.push_quad(
            [Vec3::new(-hx, -hy, -hz), Vec3::new(-hx, -hy, hz), Vec3::new(-hx, hy, hz), Vec3::new(-hx, hy, -hz)],
            -Vec3::X,
        );
        // +Y / -Y
        mesh.push_quad(
            [Vec3::new(-hx, hy, hz), Vec3::new(hx, hy, hz), Vec3::new(hx, hy, -hz), Vec3::new(-hx, hy, -hz)],
            Vec3::Y,
        );
        mesh.push_quad(
            [Vec3::new(-hx, -hy, -hz), Vec3::new(hx, -hy, -hz), Vec3::new(hx, -hy, hz), Vec3::new(-hx, -hy, hz)],
            -Vec3::Y,
        );
        // +Z / -Z
        mesh.push_quad(
            [Vec3::new(-hx, -hy, hz), Vec3::new(hx, -hy, hz), Vec3::new(hx, hy, hz), Vec3::new(-hx, hy, hz)],
            Vec3::Z,
        );
        mesh.push_quad(
            [Vec3::new(hx, -hy, -hz), Vec3::new(-hx, -hy, -hz), Vec3::new(-hx, hy, -hz), Vec3::new(hx, hy, -hz)],
            -Vec3::Z,
        );

        mesh
    }

    /// Flat rectangle in the XY plane facing +Z
    pub fn plane(width: f32, height: f32) -> Self {
        let (hw, hh) = (width / 2.0, height / 2.0);
        let mut mesh = Self::new();
        mesh.push_quad(
            [Vec3::new(-hw, -hh, 0.0), Vec3::new(hw, -hh, 0.0), Vec3::new(hw, hh, 0.0), Vec3::new(-hw, hh, 0.0)],
            Vec3::Z,
        );
        mesh
    }

    /// Capped cylinder (or frustum) along the Y axis, centered at the origin
    ///
    /// A radius of zero omits that cap, so `cylinder(0, r, h, n)` is a cone.
    pub fn cylinder(radius_top: f32, radius_bottom: f32, height: f32, radial_segments: u32) -> Self {
        let segments = radial_segments.max(3);
        let half = height / 2.0;
        let slope = if height != 0.0 { (radius_bottom - radius_top) / height } else { 0.0 };
        let mut mesh = Self::new();

        // Side: one (top, bottom) pair per seam position; the seam is duplicated
        let side_start = mesh.positions.len() as u32;
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            let normal = Vec3::new(sin, slope, cos).normalized();
            mesh.push_vertex(Vec3::new(radius_top * sin, half, radius_top * cos), normal);
            mesh.push_vertex(Vec3::new(radius_bottom * sin, -half, radius_bottom * cos), normal);
        }
        for i in 0..segments {
            let top = side_start + i * 2;
            let bottom = top + 1;
            let next_top = top + 2;
            let next_bottom = top + 3;
            mesh.indices.extend_from_slice(&[bottom, next_bottom, next_top, bottom, next_top, top]);
        }

        if radius_top > 0.0 {
            mesh.push_cap(radius_top, half, segments, true);
        }
        if radius_bottom > 0.0 {
            mesh.push_cap(radius_bottom, -half, segments, false);
        }

        mesh
    }

    fn push_cap(&mut self, radius: f32, y: f32, segments: u32, top: bool) {
        let normal = if top { Vec3::Y } else { -Vec3::Y };
        let center = self.push_vertex(Vec3::new(0.0, y, 0.0), normal);
        let ring_start = self.positions.len() as u32;
        for i in 0..=segments {
            let theta = i as f32 / segments as f32 * TAU;
            let (sin, cos) = theta.sin_cos();
            self.push_vertex(Vec3::new(radius * sin, y, radius * cos), normal);
        }
        for i in 0..segments {
            let a = ring_start + i;
            let b = a + 1;
            if top {
                self.indices.extend_from_slice(&[center, a, b]);
            } else {
                self.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }

    /// Cone along the Y axis with its apex at `+height/2`
    pub fn cone(radius: f32, height: f32, radial_segments: u32) -> Self {
        Self::cylinder(0.0, radius, height, radial_segments)
    }

    /// UV sphere centered at the origin
    pub fn sphere(radius: f32, width_segments: u32, height_segments: u32) -> Self {
        let ws = width_segments.max(3);
        let hs = height_segments.max(2);
        let mut mesh = Self::new();

        for j in 0..=hs {
            let phi = j as f32 / hs as f32 * PI;
            let (sin_phi, cos_phi) = phi.sin_cos();
            for i in 0..=ws {
                let theta = i as f32 / ws as f32 * TAU;
                let (sin_theta, cos_theta) = theta.sin_cos();
                let normal = Vec3::new(sin_phi * sin_theta, cos_phi, sin_phi * cos_theta);
                mesh.push_vertex(normal * radius, normal);
            }
        }

        let row = ws + 1;
        for j in 0..hs {
            for i in 0..ws {
                let a = j * row + i;
                let b = (j + 1) * row + i;
                let c = b + 1;
                let d = a + 1;
                if j != 0 {
                    mesh.indices.extend_from_slice(&[a, b, d]);
                }
                if j != hs - 1 {
                    mesh.indices.extend_from_slice(&[b, c, d]);
                }
            }
        }

        mesh
    }
}
