//! Procedural body generators for tests and CLI scenarios.

use elastica_math::Vec3;
use elastica_types::Scalar;

/// A single unit tetrahedron: vertices at the origin and the three axes.
pub fn single_tetrahedron() -> (Vec<Vec3>, Vec<[u32; 4]>) {
    (
        vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ],
        vec![[0, 1, 2, 3]],
    )
}

/// Axis-aligned beam of (nx × ny × nz) cells, each split into six
/// tetrahedra along the main diagonal (Kuhn triangulation), so adjacent
/// cells share conforming faces.
///
/// Returns `(positions, tetrahedra)`; positions form an
/// (nx+1)(ny+1)(nz+1) grid with the given cell `spacing`.
pub fn beam(nx: usize, ny: usize, nz: usize, spacing: Scalar) -> (Vec<Vec3>, Vec<[u32; 4]>) {
    let (px, py, pz) = (nx + 1, ny + 1, nz + 1);
    let index = |x: usize, y: usize, z: usize| -> u32 { ((z * py + y) * px + x) as u32 };

    let mut positions = Vec::with_capacity(px * py * pz);
    for z in 0..pz {
        for y in 0..py {
            for x in 0..px {
                positions.push(Vec3::new(
                    x as Scalar * spacing,
                    y as Scalar * spacing,
                    z as Scalar * spacing,
                ));
            }
        }
    }

    // The six tets of each cell follow the coordinate-increment paths
    // from corner 0 to corner 7 (x/y/z in each order).
    const CELL_TETS: [[usize; 4]; 6] = [
        [0, 1, 3, 7],
        [0, 1, 5, 7],
        [0, 2, 3, 7],
        [0, 2, 6, 7],
        [0, 4, 5, 7],
        [0, 4, 6, 7],
    ];

    let mut tetrahedra = Vec::with_capacity(nx * ny * nz * 6);
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                let corners = [
                    index(x, y, z),
                    index(x + 1, y, z),
                    index(x, y + 1, z),
                    index(x + 1, y + 1, z),
                    index(x, y, z + 1),
                    index(x + 1, y, z + 1),
                    index(x, y + 1, z + 1),
                    index(x + 1, y + 1, z + 1),
                ];
                for tet in &CELL_TETS {
                    tetrahedra.push([
                        corners[tet[0]],
                        corners[tet[1]],
                        corners[tet[2]],
                        corners[tet[3]],
                    ]);
                }
            }
        }
    }

    (positions, tetrahedra)
}

/// Regular grid of meshless node samples with uniform rest volumes.
///
/// Returns `(rest_positions, volumes)`; each node's volume is `spacing³`.
pub fn node_grid(
    nx: usize,
    ny: usize,
    nz: usize,
    spacing: Scalar,
) -> (Vec<Vec3>, Vec<Scalar>) {
    let mut positions = Vec::with_capacity(nx * ny * nz);
    for z in 0..nz {
        for y in 0..ny {
            for x in 0..nx {
                positions.push(Vec3::new(
                    x as Scalar * spacing,
                    y as Scalar * spacing,
                    z as Scalar * spacing,
                ));
            }
        }
    }
    let volume = spacing * spacing * spacing;
    let volumes = vec![volume; positions.len()];
    (positions, volumes)
}
