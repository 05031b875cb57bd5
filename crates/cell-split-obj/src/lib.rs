//! Wavefront OBJ input and output for [`cell_split`] meshes.
//!
//! [`read_obj`] builds a [`Mesh`](cell_split::Mesh) whose polygons carry the
//! active `usemtl` material as payload; [`write_obj`] writes any mesh whose
//! payload implements [`MaterialName`]. [`read_mtl`] loads the material
//! libraries an OBJ file references. [`JobConfig`] holds the settings of the
//! `split-obj` tool.

mod config;
mod error;
mod mtl;
mod read;
mod write;

pub use config::JobConfig;
pub use error::{ObjError, ObjResult};
pub use mtl::{MaterialLibrary, MtlMaterial, read_mtl};
pub use read::{ObjMaterial, ObjModel, read_obj, read_obj_model};
pub use write::{MaterialName, write_obj, write_obj_with_libraries};
