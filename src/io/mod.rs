//! Mesh archives: a mesh stored as its `points` and `triangs` arrays.
//!
//! Archives are written and read through the [`MeshWriter`] and
//! [`MeshReader`] traits; [`JsonFormat`] is the bundled format. Named node
//! fields may travel with the mesh.

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::geometry::Point2;
use crate::mesh_error::AmrError;
use crate::topology::trimesh::{TriMesh, Triangle};

/// Plain-array form of a mesh and its node fields.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct MeshArchive {
    /// Point coordinates as `[x, y]` pairs.
    pub points: Vec<[f64; 2]>,
    /// Node triples of the triangles.
    pub triangs: Vec<Triangle>,
    /// Node fields keyed by name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub data: BTreeMap<String, Vec<f64>>,
}

impl MeshArchive {
    pub fn from_mesh(mesh: &TriMesh) -> Self {
        Self {
            points: mesh.points().iter().map(|p| p.to_array()).collect(),
            triangs: mesh.triangs().to_vec(),
            data: BTreeMap::new(),
        }
    }

    /// Attach node fields; every field must hold one value per point.
    pub fn with_data(mut self, data: BTreeMap<String, Vec<f64>>) -> Result<Self, AmrError> {
        if let Some(bad) = data.values().find(|v| v.len() != self.points.len()) {
            return Err(AmrError::DataLengthMismatch {
                expected: self.points.len(),
                found: bad.len(),
            });
        }
        self.data = data;
        Ok(self)
    }

    /// Rebuild the mesh, validating node numbers.
    pub fn to_mesh(&self) -> Result<TriMesh, AmrError> {
        let points = self.points.iter().map(|&p| Point2::from(p)).collect();
        TriMesh::from_data(points, self.triangs.clone())
    }
}

/// Reads mesh archives.
pub trait MeshReader {
    fn read<R: Read>(&self, reader: R) -> Result<MeshArchive, AmrError>;
}

/// Writes mesh archives.
pub trait MeshWriter {
    fn write<W: Write>(&self, writer: W, archive: &MeshArchive) -> Result<(), AmrError>;
}

/// JSON archives via `serde_json`.
#[derive(Clone, Copy, Debug, Default)]
pub struct JsonFormat {
    /// Indent the output.
    pub pretty: bool,
}

impl MeshReader for JsonFormat {
    fn read<R: Read>(&self, reader: R) -> Result<MeshArchive, AmrError> {
        Ok(serde_json::from_reader(reader)?)
    }
}

impl MeshWriter for JsonFormat {
    fn write<W: Write>(&self, mut writer: W, archive: &MeshArchive) -> Result<(), AmrError> {
        if self.pretty {
            serde_json::to_writer_pretty(&mut writer, archive)?;
        } else {
            serde_json::to_writer(&mut writer, archive)?;
        }
        writer.flush()?;
        Ok(())
    }
}

/// Write `mesh` as a JSON archive.
pub fn save<W: Write>(writer: W, mesh: &TriMesh) -> Result<(), AmrError> {
    JsonFormat::default().write(writer, &MeshArchive::from_mesh(mesh))
}

/// Read a mesh from a JSON archive.
pub fn load<R: Read>(reader: R) -> Result<TriMesh, AmrError> {
    JsonFormat::default().read(reader)?.to_mesh()
}

pub fn save_to_path(path: impl AsRef<Path>, mesh: &TriMesh) -> Result<(), AmrError> {
    let file = File::create(path.as_ref())?;
    log::debug!("saving mesh archive to {}", path.as_ref().display());
    save(BufWriter::new(file), mesh)
}

pub fn load_from_path(path: impl AsRef<Path>) -> Result<TriMesh, AmrError> {
    let file = File::open(path.as_ref())?;
    load(BufReader::new(file))
}
