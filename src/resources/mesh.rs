use crate::data_structures::mesh::{self, MeshData, ModelVertex};

/// Converts imported OBJ meshes into lecture meshes.
///
/// Texture coordinates are flipped vertically (OBJ puts v = 0 at the bottom
/// of the image). Files without normals get smooth averaged ones. All normals
/// are then inverted to match the inward-facing convention of the
/// hand-written lecture shapes.
pub fn load_meshes(models: &[tobj::Model], file_name: &str) -> Vec<(String, MeshData, usize)> {
    models
        .iter()
        .map(|m| {
            let vertex_count = m.mesh.positions.len() / 3;
            let has_normals = m.mesh.normals.len() == m.mesh.positions.len();
            if !has_normals {
                log::info!(
                    "Mesh {:?} in {} has no normals, generating smooth ones",
                    m.name,
                    file_name
                );
            }

            let vertices = (0..vertex_count)
                .map(|i| ModelVertex {
                    position: [
                        m.mesh.positions[i * 3],
                        m.mesh.positions[i * 3 + 1],
                        m.mesh.positions[i * 3 + 2],
                    ],
                    tex_coords: [
                        m.mesh.texcoords.get(i * 2).map_or(0.0, |f| *f),
                        1.0 - m.mesh.texcoords.get(i * 2 + 1).map_or(0.0, |f| *f),
                    ],
                    normal: if has_normals {
                        [
                            m.mesh.normals[i * 3],
                            m.mesh.normals[i * 3 + 1],
                            m.mesh.normals[i * 3 + 2],
                        ]
                    } else {
                        [0.0; 3]
                    },
                })
                .collect::<Vec<_>>();

            let mut data = MeshData::new(vertices, m.mesh.indices.clone());
            if !has_normals {
                mesh::calculate_average_normals(&data.indices, &mut data.vertices);
            }
            data.flip_normals();

            (
                format!("{}/{}", file_name, m.name),
                data,
                m.mesh.material_id.unwrap_or(0),
            )
        })
        .collect()
}
