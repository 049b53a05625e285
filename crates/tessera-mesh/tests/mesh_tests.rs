//! Integration tests for tessera-mesh.

use glam::Vec3;
use tessera_mesh::face::{compute_face_normals, face_area, face_normal, unit_or_zero};
use tessera_mesh::normals::compute_vertex_normals;
use tessera_mesh::packer::{flatten_indices, interleave};
use tessera_mesh::{
    AdjacencyStrategy, BuildConfig, Geometry, MeshInput, NormalConfig, NormalWeighting,
    PackedBuffers, VertexFaces,
};
use tessera_types::{TesseraError, VertexId};

// ─── Fixtures ─────────────────────────────────────────────────

fn single_triangle() -> MeshInput {
    MeshInput::new(
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ],
        vec![[0, 1, 2]],
    )
}

/// Unit cube, vertex `i` at `(i & 1, (i >> 1) & 1, (i >> 2) & 1)`, outward CCW faces.
fn unit_cube() -> MeshInput {
    let positions = (0..8u32)
        .map(|i| Vec3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32))
        .collect();
    let triangles = vec![
        [0, 2, 1], [1, 2, 3], // -Z
        [4, 5, 6], [5, 7, 6], // +Z
        [0, 1, 5], [0, 5, 4], // -Y
        [2, 6, 7], [2, 7, 3], // +Y
        [0, 4, 6], [0, 6, 2], // -X
        [1, 3, 7], [1, 7, 5], // +X
    ];
    MeshInput::new(positions, triangles)
}

/// A height-field grid with a non-planar surface.
fn wavy_grid(cols: u32, rows: u32) -> MeshInput {
    let mut mesh = MeshInput::with_capacity(((cols + 1) * (rows + 1)) as usize, (cols * rows * 2) as usize);
    for j in 0..=rows {
        for i in 0..=cols {
            let x = i as f32 * 0.25;
            let y = j as f32 * 0.25;
            mesh.positions.push(Vec3::new(x, y, (x * 3.0).sin() * (y * 2.0).cos()));
        }
    }
    let stride = cols + 1;
    for j in 0..rows {
        for i in 0..cols {
            let a = j * stride + i;
            let b = a + 1;
            let c = a + stride;
            let d = c + 1;
            mesh.triangles.push([a, b, c]);
            mesh.triangles.push([b, d, c]);
        }
    }
    mesh
}

fn assert_vec_close(a: Vec3, b: Vec3) {
    assert!((a - b).length() < 1e-5, "{:?} != {:?}", a, b);
}

// ─── MeshInput Tests ──────────────────────────────────────────

#[test]
fn basic_counts() {
    let mesh = single_triangle();
    assert_eq!(mesh.vertex_count(), 3);
    assert_eq!(mesh.face_count(), 1);
    assert!(!mesh.is_empty());
}

#[test]
fn corners_resolve_positions() {
    let mesh = single_triangle();
    let [p0, p1, p2] = mesh.corners(0).unwrap();
    assert_eq!(p0, Vec3::ZERO);
    assert_eq!(p1, Vec3::X);
    assert_eq!(p2, Vec3::Y);
}

#[test]
fn corners_report_bounds_violation() {
    let mut mesh = single_triangle();
    mesh.triangles[0] = [0, 3, 1];
    match mesh.corners(0) {
        Err(TesseraError::IndexOutOfBounds {
            face,
            corner,
            index,
            vertex_count,
        }) => {
            assert_eq!(face, 0);
            assert_eq!(corner, 1);
            assert_eq!(index, 3);
            assert_eq!(vertex_count, 3);
        }
        other => panic!("expected bounds violation, got {:?}", other),
    }
}

#[test]
fn validate_accepts_repeated_indices() {
    let mut mesh = single_triangle();
    mesh.triangles.push([0, 0, 1]);
    assert!(mesh.validate_indices().is_ok());
}

#[test]
fn validate_finite_catches_nan() {
    let mut mesh = single_triangle();
    mesh.positions[1].y = f32::NAN;
    assert!(matches!(mesh.validate_finite(), Err(TesseraError::InvalidMesh(_))));
}

#[test]
fn from_flat() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let mesh = MeshInput::from_flat(&positions, &[0, 1, 2]).unwrap();
    assert_eq!(mesh, single_triangle());
}

#[test]
fn from_flat_rejects_ragged_input() {
    assert!(MeshInput::from_flat(&[0.0, 1.0], &[]).is_err());
    assert!(MeshInput::from_flat(&[0.0; 9], &[0, 1]).is_err());
    assert!(MeshInput::from_flat(&[0.0; 9], &[0, 1, 3]).is_err());
}

#[test]
fn mesh_json_roundtrip() {
    let mesh = unit_cube();
    let json = serde_json::to_string(&mesh).unwrap();
    let recovered: MeshInput = serde_json::from_str(&json).unwrap();
    assert_eq!(mesh, recovered);
}

#[test]
fn mesh_json_from_literal() {
    let json = r#"{ "positions": [[0, 0, 0], [1, 0, 0], [0, 1, 0]], "triangles": [[0, 1, 2]] }"#;
    let mesh: MeshInput = serde_json::from_str(json).unwrap();
    assert_eq!(mesh, single_triangle());
}

// ─── Face Normal Tests ────────────────────────────────────────

#[test]
fn face_normal_right_handed() {
    let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
    assert_vec_close(n, Vec3::Z);
}

#[test]
fn face_normal_flips_with_winding() {
    let n = face_normal(Vec3::ZERO, Vec3::Y, Vec3::X);
    assert_vec_close(n, -Vec3::Z);
}

#[test]
fn face_normal_is_unit_length() {
    let p0 = Vec3::new(0.3, -1.2, 4.0);
    let p1 = Vec3::new(2.5, 0.7, -1.0);
    let p2 = Vec3::new(-0.4, 3.3, 0.5);
    let n = face_normal(p0, p1, p2);
    let expected = (p1 - p0).cross(p2 - p0).normalize();
    assert_vec_close(n, expected);
    assert!((n.length() - 1.0).abs() < 1e-5);
}

#[test]
fn collinear_face_has_zero_normal() {
    let n = face_normal(Vec3::ZERO, Vec3::X, Vec3::X * 2.0);
    assert_eq!(n, Vec3::ZERO);
}

#[test]
fn coincident_face_has_zero_normal() {
    let p = Vec3::new(1.0, 2.0, 3.0);
    assert_eq!(face_normal(p, p, p), Vec3::ZERO);
}

#[test]
fn face_area_of_right_triangle() {
    assert!((face_area(Vec3::ZERO, Vec3::X * 2.0, Vec3::Y * 3.0) - 3.0).abs() < 1e-6);
}

#[test]
fn tiny_face_keeps_unit_normal() {
    let n = face_normal(Vec3::ZERO, Vec3::new(1e-20, 0.0, 0.0), Vec3::new(0.0, 1e-20, 0.0));
    assert_vec_close(n, Vec3::Z);
    assert!((n.length() - 1.0).abs() < 1e-6);
}

#[test]
fn tiny_face_has_positive_area() {
    let area = face_area(Vec3::ZERO, Vec3::new(1e-20, 0.0, 0.0), Vec3::new(0.0, 1e-20, 0.0));
    assert!(area > 0.0);
}

#[test]
#[allow(overflowing_literals)]
fn unit_or_zero_handles_extremes() {
    assert_eq!(unit_or_zero(Vec3::ZERO), Vec3::ZERO);
    assert_eq!(unit_or_zero(Vec3::new(f32::NAN, 0.0, 1.0)), Vec3::ZERO);
    assert_eq!(unit_or_zero(Vec3::new(f32::INFINITY, 0.0, 0.0)), Vec3::ZERO);
    assert_vec_close(unit_or_zero(Vec3::new(0.0, 0.0, 1e-40)), Vec3::Z);
    assert_vec_close(unit_or_zero(Vec3::new(3e38, 4e38, 0.0)), Vec3::new(0.6, 0.8, 0.0));
}

#[test]
fn compute_face_normals_per_face() {
    let normals = compute_face_normals(&unit_cube()).unwrap();
    assert_eq!(normals.len(), 12);
    let expected = [-Vec3::Z, Vec3::Z, -Vec3::Y, Vec3::Y, -Vec3::X, Vec3::X];
    for (t, n) in normals.iter().enumerate() {
        assert_vec_close(*n, expected[t / 2]);
    }
}

#[test]
fn compute_face_normals_fails_fast() {
    let mut mesh = unit_cube();
    mesh.triangles[5][2] = 8;
    assert!(matches!(
        compute_face_normals(&mesh),
        Err(TesseraError::IndexOutOfBounds { face: 5, corner: 2, index: 8, .. })
    ));
}

// ─── Adjacency Tests ──────────────────────────────────────────

#[test]
fn adjacency_fans_are_sorted() {
    let mesh = unit_cube();
    let adj = VertexFaces::build(&mesh).unwrap();
    assert_eq!(adj.vertex_count(), 8);
    assert_eq!(adj.faces_of(VertexId(0)), &[0, 4, 5, 8, 9]);
    assert_eq!(adj.valence(VertexId(7)), 5);
    for v in 0..8 {
        let fan = adj.faces_of(VertexId(v));
        assert!(fan.windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn adjacency_matches_scan() {
    let mesh = wavy_grid(5, 4);
    let adj = VertexFaces::build(&mesh).unwrap();
    for v in 0..mesh.vertex_count() as u32 {
        let scanned: Vec<u32> = mesh
            .triangles
            .iter()
            .enumerate()
            .filter(|(_, tri)| tri.contains(&v))
            .map(|(t, _)| t as u32)
            .collect();
        assert_eq!(adj.faces_of(VertexId(v)), scanned.as_slice());
    }
}

#[test]
fn adjacency_records_repeated_corner_once() {
    let mesh = MeshInput::new(vec![Vec3::ZERO, Vec3::X], vec![[0, 0, 1], [1, 1, 1]]);
    let adj = VertexFaces::build(&mesh).unwrap();
    assert_eq!(adj.faces_of(VertexId(0)), &[0]);
    assert_eq!(adj.faces_of(VertexId(1)), &[0, 1]);
}

#[test]
fn adjacency_finds_isolated_vertices() {
    let mut mesh = single_triangle();
    mesh.positions.push(Vec3::ONE);
    let adj = VertexFaces::build(&mesh).unwrap();
    assert_eq!(adj.isolated_vertices(), vec![VertexId(3)]);
    assert_eq!(adj.face_ids(VertexId(1)).count(), 1);
}

#[test]
#[should_panic]
fn adjacency_faces_of_unknown_vertex_panics() {
    let adj = VertexFaces::build(&single_triangle()).unwrap();
    let _ = adj.faces_of(VertexId(3));
}

#[test]
fn adjacency_rejects_out_of_range() {
    let mut mesh = single_triangle();
    mesh.triangles[0] = [0, 1, 3];
    assert!(VertexFaces::build(&mesh).is_err());
}

// ─── Vertex Normal Tests ──────────────────────────────────────

fn vertex_normals(mesh: &MeshInput, config: &NormalConfig) -> Vec<Vec3> {
    let faces = compute_face_normals(mesh).unwrap();
    compute_vertex_normals(mesh, &faces, config).unwrap()
}

#[test]
fn single_triangle_vertex_normals() {
    let normals = vertex_normals(&single_triangle(), &NormalConfig::default());
    assert_eq!(normals.len(), 3);
    for n in normals {
        assert_vec_close(n, Vec3::Z);
    }
}

#[test]
fn isolated_vertex_gets_zero_normal() {
    let mut mesh = single_triangle();
    mesh.positions.push(Vec3::new(5.0, 5.0, 5.0));
    for strategy in [AdjacencyStrategy::Scan, AdjacencyStrategy::Indexed] {
        let config = NormalConfig { strategy, ..Default::default() };
        let normals = vertex_normals(&mesh, &config);
        assert_eq!(normals.len(), 4);
        assert_eq!(normals[3], Vec3::ZERO);
        assert!(!normals[3].is_nan());
    }
}

#[test]
fn tiny_triangle_vertex_normals_are_unit() {
    let mesh = MeshInput::new(
        vec![Vec3::ZERO, Vec3::new(1e-20, 0.0, 0.0), Vec3::new(0.0, 1e-20, 0.0)],
        vec![[0, 1, 2]],
    );
    for weighting in [NormalWeighting::Uniform, NormalWeighting::Area] {
        for strategy in [AdjacencyStrategy::Scan, AdjacencyStrategy::Indexed] {
            let config = NormalConfig { strategy, weighting, ..Default::default() };
            for n in vertex_normals(&mesh, &config) {
                assert_vec_close(n, Vec3::Z);
            }
        }
    }
}

#[test]
fn opposite_faces_cancel_to_zero() {
    let mut mesh = single_triangle();
    mesh.triangles.push([0, 2, 1]);
    for strategy in [AdjacencyStrategy::Scan, AdjacencyStrategy::Indexed] {
        let config = NormalConfig { strategy, ..Default::default() };
        for n in vertex_normals(&mesh, &config) {
            assert_eq!(n, Vec3::ZERO);
        }
    }
}

#[test]
fn degenerate_face_contributes_nothing() {
    let mut mesh = single_triangle();
    mesh.positions.push(Vec3::X * 2.0);
    mesh.triangles.push([0, 1, 3]);
    let normals = vertex_normals(&mesh, &NormalConfig::default());
    assert_vec_close(normals[0], Vec3::Z);
    assert_vec_close(normals[1], Vec3::Z);
    assert_eq!(normals[3], Vec3::ZERO);
}

#[test]
fn cube_corner_normal_is_uniform_average() {
    let normals = vertex_normals(&unit_cube(), &NormalConfig::default());
    // Vertex 0 touches -Z once, -Y twice, -X twice.
    assert_vec_close(normals[0], Vec3::new(-2.0, -2.0, -1.0) / 3.0);
}

#[test]
fn cube_normals_point_outward() {
    let mesh = unit_cube();
    let center = Vec3::splat(0.5);
    let normals = vertex_normals(&mesh, &NormalConfig::default());
    for (p, n) in mesh.positions.iter().zip(&normals) {
        assert!((n.length() - 1.0).abs() < 1e-5);
        assert!(n.dot(*p - center) > 0.0, "normal {:?} at {:?} points inward", n, p);
    }
}

#[test]
fn strategies_agree_exactly() {
    let mesh = wavy_grid(12, 9);
    let reference = vertex_normals(
        &mesh,
        &NormalConfig {
            strategy: AdjacencyStrategy::Scan,
            weighting: NormalWeighting::Uniform,
            parallel: false,
        },
    );
    for strategy in [AdjacencyStrategy::Scan, AdjacencyStrategy::Indexed] {
        for parallel in [false, true] {
            let config = NormalConfig {
                strategy,
                weighting: NormalWeighting::Uniform,
                parallel,
            };
            assert_eq!(vertex_normals(&mesh, &config), reference, "{:?}", config);
        }
    }
}

#[test]
fn area_weighting_favors_larger_face() {
    let mesh = MeshInput::new(
        vec![
            Vec3::ZERO,
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 2.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
        // Area 2 facing +Z, area 1 facing +Y.
        vec![[0, 1, 2], [0, 3, 1]],
    );
    let uniform = vertex_normals(&mesh, &NormalConfig::default());
    assert_vec_close(uniform[0], Vec3::new(0.0, 1.0, 1.0).normalize());

    let weighted = vertex_normals(
        &mesh,
        &NormalConfig {
            weighting: NormalWeighting::Area,
            ..Default::default()
        },
    );
    assert_vec_close(weighted[0], Vec3::new(0.0, 1.0, 2.0).normalize());
}

#[test]
fn vertex_normals_reject_mismatched_face_normals() {
    let mesh = unit_cube();
    let err = compute_vertex_normals(&mesh, &[Vec3::Z], &NormalConfig::default());
    assert!(matches!(err, Err(TesseraError::InvalidMesh(_))));
}

#[test]
fn scan_strategy_rejects_out_of_range() {
    let mut mesh = single_triangle();
    mesh.triangles[0] = [0, 1, 3];
    let config = NormalConfig {
        strategy: AdjacencyStrategy::Scan,
        ..Default::default()
    };
    let err = compute_vertex_normals(&mesh, &[Vec3::Z], &config);
    assert!(matches!(err, Err(TesseraError::IndexOutOfBounds { index: 3, .. })));
}

// ─── Packer Tests ─────────────────────────────────────────────

#[test]
fn interleave_blocks() {
    let positions = [Vec3::new(1.0, 2.0, 3.0), Vec3::new(4.0, 5.0, 6.0)];
    let normals = [Vec3::X, Vec3::Y];
    let out = interleave(&positions, &normals).unwrap();
    assert_eq!(
        out,
        vec![1.0, 2.0, 3.0, 1.0, 0.0, 0.0, 4.0, 5.0, 6.0, 0.0, 1.0, 0.0]
    );
}

#[test]
fn interleave_rejects_length_mismatch() {
    assert!(interleave(&[Vec3::ZERO], &[]).is_err());
}

#[test]
fn flatten_preserves_order() {
    assert_eq!(flatten_indices(&[[2, 0, 1], [1, 3, 2]]), vec![2, 0, 1, 1, 3, 2]);
}

#[test]
fn packed_buffer_views() {
    let mesh = unit_cube();
    let normals = vertex_normals(&mesh, &NormalConfig::default());
    let packed = PackedBuffers::pack(&mesh, &normals).unwrap();
    assert_eq!(packed.vertex_count(), 8);
    assert_eq!(packed.face_count(), 12);
    assert_eq!(packed.vertex_bytes().len(), 8 * 24);
    assert_eq!(packed.index_bytes().len(), 36 * 4);
    assert!(packed.vertex_block(8).is_none());
}

// ─── Geometry Tests ───────────────────────────────────────────

#[test]
fn single_triangle_geometry() {
    let geometry = Geometry::build(&single_triangle(), &BuildConfig::default()).unwrap();
    let buffers = geometry.buffers();
    assert_eq!(buffers.vertices.len(), 18);
    assert_eq!(buffers.indices, vec![0, 1, 2]);
    for n in geometry.vertex_normals() {
        assert_vec_close(*n, Vec3::Z);
    }
    assert_eq!(
        buffers.vertex_block(1).unwrap(),
        &[1.0, 0.0, 0.0, 0.0, 0.0, 1.0]
    );
}

#[test]
fn geometry_lengths_track_input() {
    let mesh = wavy_grid(6, 3);
    let geometry = Geometry::build(&mesh, &BuildConfig::fast()).unwrap();
    let counts = geometry.counts();
    assert_eq!(counts.vertices, mesh.vertex_count());
    assert_eq!(counts.faces, mesh.face_count());
    assert_eq!(counts.indices, 3 * mesh.face_count());
    assert_eq!(geometry.vertex_normals().len(), mesh.vertex_count());
    assert_eq!(geometry.buffers().vertices.len(), 6 * mesh.vertex_count());
}

#[test]
fn geometry_interleaving_reads_back() {
    let mesh = wavy_grid(4, 4);
    let geometry = Geometry::build(&mesh, &BuildConfig::default()).unwrap();
    let vertices = &geometry.buffers().vertices;
    for (i, p) in mesh.positions.iter().enumerate() {
        let block = &vertices[6 * i..6 * i + 6];
        let n = geometry.vertex_normals()[i];
        assert_eq!(block, &[p.x, p.y, p.z, n.x, n.y, n.z]);
    }
}

#[test]
fn geometry_rejects_index_equal_to_vertex_count() {
    let mut mesh = single_triangle();
    mesh.triangles[0] = [0, 1, 3];
    assert!(matches!(
        Geometry::build(&mesh, &BuildConfig::default()),
        Err(TesseraError::IndexOutOfBounds { index: 3, vertex_count: 3, .. })
    ));
}

#[test]
fn geometry_reports_first_bad_corner() {
    let mut mesh = unit_cube();
    mesh.triangles[3] = [0, 9, 10];
    mesh.triangles[7] = [11, 0, 1];
    assert!(matches!(
        Geometry::build(&mesh, &BuildConfig::fast()),
        Err(TesseraError::IndexOutOfBounds { face: 3, corner: 1, index: 9, vertex_count: 8 })
    ));
}

#[test]
fn geometry_rejects_non_finite_when_enabled() {
    let mut mesh = single_triangle();
    mesh.positions[0].x = f32::INFINITY;
    let config = BuildConfig {
        validate_finite: true,
        ..Default::default()
    };
    assert!(matches!(
        Geometry::build(&mesh, &config),
        Err(TesseraError::InvalidMesh(_))
    ));
}

#[test]
fn geometry_accepts_non_finite_by_default() {
    let mut mesh = single_triangle();
    mesh.positions[0].x = f32::INFINITY;
    let geometry = Geometry::build(&mesh, &BuildConfig::default()).unwrap();
    assert!(geometry.vertex_normals().iter().all(|n| *n == Vec3::ZERO));
    assert_eq!(geometry.counts().indices, 3);
}

#[test]
fn empty_mesh_builds_empty_buffers() {
    let geometry = Geometry::build(&MeshInput::default(), &BuildConfig::default()).unwrap();
    assert!(geometry.buffers().vertices.is_empty());
    assert!(geometry.buffers().indices.is_empty());
    assert_eq!(geometry.counts().indices, 0);
}

#[test]
fn vertices_without_faces_build() {
    let mesh = MeshInput::new(vec![Vec3::ZERO, Vec3::ONE], Vec::new());
    let geometry = Geometry::build(&mesh, &BuildConfig::debug()).unwrap();
    assert_eq!(geometry.buffers().vertices.len(), 12);
    assert!(geometry.vertex_normals().iter().all(|n| *n == Vec3::ZERO));
}

// ─── Config Tests ─────────────────────────────────────────────

#[test]
fn config_toml_roundtrip() {
    let config = BuildConfig::fast();
    let text = config.to_toml().unwrap();
    let recovered = BuildConfig::from_toml(&text).unwrap();
    assert_eq!(config, recovered);
}

#[test]
fn config_partial_toml_uses_defaults() {
    let config = BuildConfig::from_toml("[normals]\nstrategy = \"scan\"\n").unwrap();
    assert_eq!(config.normals.strategy, AdjacencyStrategy::Scan);
    assert_eq!(config.normals.weighting, NormalWeighting::Uniform);
    assert!(!config.validate_finite);
}

#[test]
fn config_rejects_unknown_strategy() {
    let err = BuildConfig::from_toml("[normals]\nstrategy = \"octree\"\n");
    assert!(matches!(err, Err(TesseraError::InvalidConfig(_))));
}
