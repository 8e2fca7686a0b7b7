use crate::vertex::TexVert;


/// Vertices and triangle indices for one (mesh, material) pairing.
///
/// Structural edits (anything that changes the vertex or index count) mark the array
/// modified so storage built from it gets thrown away. Editing vertex values in place
/// through [`DisplayArray::vertex_mut`] does not.
#[derive(Debug, Clone, Default)]
pub struct DisplayArray {
	vertices: Vec<TexVert>,
	indices: Vec<u32>,
	modified: bool,
}

impl DisplayArray {
	pub fn new(vertices: Vec<TexVert>, indices: Vec<u32>) -> Self {
		let array = DisplayArray {
			vertices,
			indices,
			modified: false,
		};

		array.debug_validate();
		array
	}

	pub fn vertex_count(&self) -> usize {
		self.vertices.len()
	}

	pub fn index_count(&self) -> usize {
		self.indices.len()
	}

	pub fn is_empty(&self) -> bool {
		self.indices.is_empty()
	}

	pub fn vertices(&self) -> &[TexVert] {
		&self.vertices
	}

	pub fn indices(&self) -> &[u32] {
		&self.indices
	}

	pub fn vertex(&self, index: usize) -> &TexVert {
		&self.vertices[index]
	}

	pub fn vertex_mut(&mut self, index: usize) -> &mut TexVert {
		&mut self.vertices[index]
	}

	pub fn vertices_mut(&mut self) -> &mut [TexVert] {
		&mut self.vertices
	}

	pub fn add_vertex(&mut self, vertex: TexVert) -> u32 {
		self.vertices.push(vertex);
		self.modified = true;
		(self.vertices.len() - 1) as u32
	}

	pub fn add_triangle(&mut self, a: u32, b: u32, c: u32) {
		let count = self.vertices.len() as u32;
		debug_assert!(a < count && b < count && c < count, "triangle ({a}, {b}, {c}) out of range for {count} vertices");

		self.indices.extend_from_slice(&[a, b, c]);
		self.modified = true;
	}

	pub fn set_geometry(&mut self, vertices: Vec<TexVert>, indices: Vec<u32>) {
		self.vertices = vertices;
		self.indices = indices;
		self.modified = true;
		self.debug_validate();
	}

	pub fn is_modified(&self) -> bool {
		self.modified
	}

	pub fn clear_modified(&mut self) {
		self.modified = false;
	}

	pub fn vertex_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(&self.vertices)
	}

	pub fn index_bytes(&self) -> &[u8] {
		bytemuck::cast_slice(&self.indices)
	}

	pub fn indices_in_range(&self) -> bool {
		let count = self.vertices.len();
		self.indices.iter().all(|&index| (index as usize) < count)
	}

	fn debug_validate(&self) {
		debug_assert!(self.indices_in_range(), "index out of range for {} vertices", self.vertices.len());
	}
}
