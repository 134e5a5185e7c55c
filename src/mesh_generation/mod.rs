//! Structured triangle grids on the integer lattice.
//!
//! A grid of `xsize × ysize` nodes puts node `i * ysize + j` at `(i, j)`.
//! Every lattice cell has corners
//!
//! ```text
//!   3 - 2
//!   | 4 |
//!   0 - 1
//! ```
//!
//! where `4` is the cell centre (cross-wise grids only). The grid kind
//! decides how a cell is cut into triangles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::trimesh::{TriMesh, Triangle};

/// How lattice cells are cut into triangles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GridKind {
    /// Cut along `0–2`: triangles `0-1-2`, `2-3-0`.
    EastSlope,
    /// Cut along `1–3`: triangles `1-2-3`, `3-0-1`.
    WestSlope,
    /// Chequerboard of east and west cuts, east on even cells.
    EastSnake,
    /// Chequerboard of west and east cuts, west on even cells.
    WestSnake,
    /// Four triangles around the cell centre.
    CrossWise,
}

const TRIS_EAST: [[usize; 3]; 2] = [[0, 1, 2], [2, 3, 0]];
const TRIS_WEST: [[usize; 3]; 2] = [[1, 2, 3], [3, 0, 1]];
const TRIS_CROSS: [[usize; 3]; 4] = [[4, 3, 0], [4, 0, 1], [4, 1, 2], [4, 2, 3]];

impl GridKind {
    pub const ALL: [GridKind; 5] = [
        GridKind::EastSlope,
        GridKind::WestSlope,
        GridKind::EastSnake,
        GridKind::WestSnake,
        GridKind::CrossWise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            GridKind::EastSlope => "east-slope",
            GridKind::WestSlope => "west-slope",
            GridKind::EastSnake => "east-snake",
            GridKind::WestSnake => "west-snake",
            GridKind::CrossWise => "cross-wise",
        }
    }
}

impl fmt::Display for GridKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GridKind {
    type Err = AmrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GridKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| AmrError::UnknownGridKind(s.to_owned()))
    }
}

/// Corner node numbers of the lattice cells, cell `(i, j)` at `i * (ysize - 1) + j`.
fn lattice_cells(xsize: usize, ysize: usize) -> Vec<[usize; 4]> {
    let node = |i: usize, j: usize| i * ysize + j;
    (0..xsize - 1)
        .flat_map(|i| {
            (0..ysize - 1).map(move |j| {
                [node(i, j), node(i + 1, j), node(i + 1, j + 1), node(i, j + 1)]
            })
        })
        .collect()
}

fn lattice_points(xsize: usize, ysize: usize, shift: f64) -> impl Iterator<Item = Point2> {
    (0..xsize).flat_map(move |i| {
        (0..ysize).map(move |j| Point2::new(i as f64 + shift, j as f64 + shift))
    })
}

fn cut<const N: usize, const K: usize>(cell: &[usize; N], paths: &[[usize; 3]; K]) -> [Triangle; K] {
    (*paths).map(|p| p.map(|c| cell[c]))
}

/// Triangle grid with `xsize × ysize` nodes; both sizes are raised to 2 at least.
pub fn trigrid(xsize: usize, ysize: usize, kind: GridKind) -> TriMesh {
    let (xsize, ysize) = (xsize.max(2), ysize.max(2));
    let cells = lattice_cells(xsize, ysize);
    let mut points: Vec<Point2> = lattice_points(xsize, ysize, 0.0).collect();

    let triangs: Vec<Triangle> = match kind {
        GridKind::EastSlope => cells.iter().flat_map(|c| cut(c, &TRIS_EAST)).collect(),
        GridKind::WestSlope => cells.iter().flat_map(|c| cut(c, &TRIS_WEST)).collect(),
        GridKind::EastSnake | GridKind::WestSnake => {
            let (first, second) = match kind {
                GridKind::EastSnake => (&TRIS_EAST, &TRIS_WEST),
                _ => (&TRIS_WEST, &TRIS_EAST),
            };
            let ncols = ysize - 1;
            let even = |k: usize| (k / ncols) % 2 == (k % ncols) % 2;
            let (evens, odds): (Vec<_>, Vec<_>) =
                cells.iter().enumerate().partition(|(k, _)| even(*k));
            evens
                .into_iter()
                .flat_map(|(_, c)| cut(c, first))
                .chain(odds.into_iter().flat_map(|(_, c)| cut(c, second)))
                .collect()
        }
        GridKind::CrossWise => {
            let offset = points.len();
            points.extend(lattice_points(xsize - 1, ysize - 1, 0.5));
            cells
                .iter()
                .enumerate()
                .flat_map(|(k, c)| cut(&[c[0], c[1], c[2], c[3], offset + k], &TRIS_CROSS))
                .collect()
        }
    };
    log::debug!(
        "trigrid {kind}: {} points, {} triangles",
        points.len(),
        triangs.len()
    );
    TriMesh::from_parts(points, triangs)
}
