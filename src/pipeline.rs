//! Per-frame geometry pipeline.
//!
//! Every face of the mesh goes through the same stages, in face order:
//!
//! ```text
//! fetch -> transform -> cull -> project -> screen-map -> append
//! ```
//!
//! The output is the list of screen-space [`Triangle`]s for the current frame.
//! No clipping is performed: a vertex at or behind the camera projects to
//! non-finite or far-away coordinates and the rasterizer skips the triangle.

use crate::buffer::{BufferError, DynamicBuffer};
use crate::config::EngineConfig;
use crate::math::{vec2::Vec2, vec3::Vec3};
use crate::mesh::Mesh;
use crate::projection::Projection;
use crate::render::Triangle;

/// Backface culling policy (keys: c / d).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CullMode {
    /// Drop faces whose front side points away from the camera.
    #[default]
    Backface,
    /// Keep every face.
    None,
}

/// Model space to camera space for one vertex: scale, rotate around X then Y
/// then Z, translate, then push the result `camera_distance` units along +Z.
pub fn transform_vertex(vertex: Vec3, mesh: &Mesh, camera_distance: f32) -> Vec3 {
    let rotation = mesh.rotation();
    let mut transformed = vertex
        .scale_by(mesh.scale())
        .rotate_x(rotation.x)
        .rotate_y(rotation.y)
        .rotate_z(rotation.z)
        + mesh.translation();
    transformed.z += camera_distance;
    transformed
}

/// True when the face `a, b, c` points away from `camera_position`.
///
/// The face normal is `(b - a) x (c - a)`; the face is a back face when the
/// normal and the ray from `a` to the camera form an obtuse angle.
pub fn is_back_face(vertices: &[Vec3; 3], camera_position: Vec3) -> bool {
    let [a, b, c] = *vertices;
    let vec_ab = b.subtract(a);
    let vec_ac = c.subtract(a);

    // Not normalized; only the direction matters.
    let normal = vec_ab.cross(vec_ac);
    let camera_ray = camera_position.subtract(a);

    normal.dot(camera_ray) < 0.0
}

/// Moves a projected point from the projection center to pixel coordinates
/// with the origin at the top-left of a `width` x `height` buffer.
#[inline]
pub fn to_screen(point: Vec2, width: u32, height: u32) -> Vec2 {
    Vec2::new(
        point.x + (width / 2) as f32,
        point.y + (height / 2) as f32,
    )
}

/// Runs every face of `mesh` through the pipeline and appends the surviving
/// triangles to `triangles`. Returns the number of culled faces.
///
/// Faces referring to missing vertices are skipped; a `Mesh` built through
/// its constructors never has any.
pub fn build_frame(
    mesh: &Mesh,
    config: &EngineConfig,
    cull_mode: CullMode,
    projection: Projection,
    triangles: &mut DynamicBuffer<Triangle>,
) -> Result<usize, BufferError> {
    let mut culled = 0;

    for face in mesh.faces() {
        let Some(face_vertices) = mesh.face_vertices(face) else {
            log::trace!("skipping face {:?} with a missing vertex", face);
            continue;
        };

        let transformed =
            face_vertices.map(|v| transform_vertex(v, mesh, config.camera_distance));

        if cull_mode == CullMode::Backface && is_back_face(&transformed, config.camera_position)
        {
            culled += 1;
            continue;
        }

        let points = transformed
            .map(|v| to_screen(projection.project(v), config.width, config.height));

        triangles.push(Triangle::new(points, Some(config.palette.fill)))?;
    }

    Ok(culled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;
    use approx::assert_relative_eq;

    fn run(mesh: &Mesh, cull_mode: CullMode, projection: Projection) -> DynamicBuffer<Triangle> {
        let config = EngineConfig::default();
        let mut triangles = DynamicBuffer::new();
        build_frame(mesh, &config, cull_mode, projection, &mut triangles).unwrap();
        triangles
    }

    #[test]
    fn transform_pushes_mesh_away_from_camera() {
        let mesh = Mesh::cube();
        let v = transform_vertex(Vec3::new(-1.0, -1.0, -1.0), &mesh, 5.0);
        assert_eq!(v, Vec3::new(-1.0, -1.0, 4.0));
    }

    #[test]
    fn transform_applies_x_before_y_before_z() {
        let mut mesh = Mesh::cube();
        mesh.set_rotation(Vec3::new(0.3, 0.7, 1.1));
        let v = Vec3::new(1.0, 2.0, 3.0);

        let expected = v.rotate_x(0.3).rotate_y(0.7).rotate_z(1.1);
        let actual = transform_vertex(v, &mesh, 0.0);
        assert_relative_eq!(actual.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(actual.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(actual.z, expected.z, epsilon = 1e-5);

        let reversed = v.rotate_z(1.1).rotate_y(0.7).rotate_x(0.3);
        assert!((actual.x - reversed.x).abs() > 1e-3 || (actual.y - reversed.y).abs() > 1e-3);
    }

    #[test]
    fn transform_applies_scale_and_translation() {
        let mut mesh = Mesh::cube();
        mesh.set_scale(Vec3::new(2.0, 2.0, 2.0));
        mesh.set_translation(Vec3::new(1.0, 0.0, 0.0));
        let v = transform_vertex(Vec3::new(1.0, 1.0, 1.0), &mesh, 5.0);
        assert_eq!(v, Vec3::new(3.0, 2.0, 7.0));
    }

    #[test]
    fn back_face_test_follows_winding() {
        let camera = Vec3::ZERO;
        let facing = [
            Vec3::new(-1.0, -1.0, 4.0),
            Vec3::new(-1.0, 1.0, 4.0),
            Vec3::new(1.0, 1.0, 4.0),
        ];
        assert!(!is_back_face(&facing, camera));

        let away = [facing[0], facing[2], facing[1]];
        assert!(is_back_face(&away, camera));
    }

    #[test]
    fn unrotated_cube_shows_only_its_front_face() {
        let triangles = run(&Mesh::cube(), CullMode::Backface, Projection::default());
        assert_eq!(triangles.len(), 2);
    }

    #[test]
    fn culling_disabled_keeps_every_face() {
        let triangles = run(&Mesh::cube(), CullMode::None, Projection::default());
        assert_eq!(triangles.len(), 12);
    }

    #[test]
    fn rotated_cube_shows_three_sides() {
        // Turned so that the front, right and bottom sides face the camera.
        let mut mesh = Mesh::cube();
        mesh.set_rotation(Vec3::new(0.5, 0.5, 0.0));
        let triangles = run(&mesh, CullMode::Backface, Projection::default());
        assert_eq!(triangles.len(), 6);
    }

    #[test]
    fn front_face_projects_to_closed_form_coordinates() {
        let triangles = run(&Mesh::cube(), CullMode::Backface, Projection::default());

        // Front face sits at z = -1 + 5 = 4: x_screen = 640 * x / 4 + 400,
        // y_screen = 640 * y / 4 + 300.
        let expected: [[(f32, f32); 3]; 2] = [
            [(240.0, 140.0), (240.0, 460.0), (560.0, 460.0)],
            [(240.0, 140.0), (560.0, 460.0), (560.0, 140.0)],
        ];

        for (triangle, expected) in triangles.iter().zip(expected.iter()) {
            for (point, &(x, y)) in triangle.points.iter().zip(expected.iter()) {
                assert_relative_eq!(point.x, x, epsilon = 1e-3);
                assert_relative_eq!(point.y, y, epsilon = 1e-3);
            }
            assert_eq!(triangle.color, Some(EngineConfig::default().palette.fill));
        }
    }

    #[test]
    fn orthographic_projection_ignores_depth() {
        let triangles = run(
            &Mesh::cube(),
            CullMode::Backface,
            Projection::Orthographic { fov_factor: 100.0 },
        );
        let first = triangles.get(0).unwrap();
        assert_relative_eq!(first.points[0].x, 300.0);
        assert_relative_eq!(first.points[0].y, 200.0);
    }

    #[test]
    fn vertex_at_camera_depth_is_non_finite_but_kept() {
        // A triangle whose first corner lands exactly at z = 0 after the push.
        let mesh = Mesh::new(
            vec![
                Vec3::new(0.0, 0.0, -5.0),
                Vec3::new(1.0, 0.0, 0.0),
                Vec3::new(0.0, 1.0, 0.0),
            ],
            vec![Face::new(1, 2, 3)],
        )
        .unwrap();

        let triangles = run(&mesh, CullMode::None, Projection::default());
        assert_eq!(triangles.len(), 1);
        let triangle = triangles.get(0).unwrap();
        assert!(!triangle.points[0].is_finite());
        assert!(!triangle.is_drawable());
    }

    #[test]
    fn reports_culled_faces() {
        let config = EngineConfig::default();
        let mut triangles = DynamicBuffer::new();
        let culled = build_frame(
            &Mesh::cube(),
            &config,
            CullMode::Backface,
            Projection::default(),
            &mut triangles,
        )
        .unwrap();
        assert_eq!(culled, 10);
        assert_eq!(culled + triangles.len(), 12);
    }
}
