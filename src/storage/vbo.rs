use super::{DrawType, Storage, StorageInfo, StorageKind};
use crate::attrib::{AttribBindings, AttribRequest, VertexSource};
use crate::bucket::DisplayArrayBucket;
use crate::device::{BufferHandle, BufferTarget, ClientArray, Device, IndexPointer, PrimitiveType};
use crate::display_array::DisplayArray;
use crate::error::StorageError;
use crate::material::PolyMaterial;
use glam::Vec4;
use std::rc::Rc;


#[derive(Debug)]
pub struct Vbo {
	device: Rc<dyn Device>,
	index_buffer: BufferHandle,
	vertex_buffer: BufferHandle,
	vertex_count: usize,
	index_count: usize,
	mode: PrimitiveType,
	source: VertexSource,
}

impl Vbo {
	pub fn new(device: &Rc<dyn Device>, array: &DisplayArray) -> Result<Self, StorageError> {
		let index_buffer = BufferHandle::new(device)?;
		let vertex_buffer = BufferHandle::new(device)?;

		let mut vbo = Vbo {
			device: device.clone(),
			index_buffer,
			vertex_buffer,
			vertex_count: array.vertex_count(),
			index_count: array.index_count(),
			mode: PrimitiveType::Triangles,
			source: VertexSource::buffer(),
		};

		vbo.update_indices(array);
		vbo.update_data(array);

		log::debug!("created vbo {}/{} for {} vertices, {} indices",
			vbo.vertex_buffer.name(), vbo.index_buffer.name(), vbo.vertex_count, vbo.index_count);

		Ok(vbo)
	}

	/// Re-upload vertex values. The vertex count must not have changed, a structural
	/// change goes through a new [`Vbo`].
	pub fn update_data(&mut self, array: &DisplayArray) {
		debug_assert_eq!(array.vertex_count(), self.vertex_count, "vertex count changed under a live vbo");

		self.device.bind_buffer(BufferTarget::Array, self.vertex_buffer.name());
		self.device.buffer_data(BufferTarget::Array, array.vertex_bytes());
	}

	pub fn update_indices(&mut self, array: &DisplayArray) {
		self.index_count = array.index_count();

		self.device.bind_buffer(BufferTarget::ElementArray, self.index_buffer.name());
		self.device.buffer_data(BufferTarget::ElementArray, array.index_bytes());
	}

	pub fn vertex_buffer(&self) -> u32 {
		self.vertex_buffer.name()
	}

	pub fn index_buffer(&self) -> u32 {
		self.index_buffer.name()
	}

	pub fn index_count(&self) -> usize {
		self.index_count
	}

	pub fn bind(&self, bindings: &mut AttribBindings, request: &AttribRequest, color_array: bool) {
		let device = &*self.device;

		device.bind_buffer(BufferTarget::ElementArray, self.index_buffer.name());
		device.bind_buffer(BufferTarget::Array, self.vertex_buffer.name());

		device.enable_client_state(ClientArray::Vertex);
		device.enable_client_state(ClientArray::Normal);
		device.vertex_pointer(self.source.position());
		device.normal_pointer(self.source.normal());

		if color_array {
			device.enable_client_state(ClientArray::Color);
			device.color_pointer(self.source.color());
		}

		bindings.bind(device, request, &self.source);
	}

	pub fn unbind(&self, bindings: &mut AttribBindings, color_array: bool) {
		let device = &*self.device;

		device.disable_client_state(ClientArray::Vertex);
		device.disable_client_state(ClientArray::Normal);

		if color_array {
			device.disable_client_state(ClientArray::Color);
		}

		bindings.unbind(device);

		device.bind_buffer(BufferTarget::ElementArray, 0);
		device.bind_buffer(BufferTarget::Array, 0);
	}

	pub fn draw(&self) {
		if self.index_count == 0 {
			return
		}

		self.device.draw_elements(self.mode, self.index_count as u32, IndexPointer::Offset(0));
	}
}


// Takes the bucket's vbo out of its storage slot, or builds one if the slot is empty or
// holds another backend's storage. The flag says whether it was created just now.
fn take_vbo(device: &Rc<dyn Device>, array: &DisplayArray, info: &mut Option<StorageInfo>)
	-> Result<(Vbo, bool), StorageError>
{
	match info.take() {
		Some(StorageInfo::Vbo(vbo)) => Ok((vbo, false)),
		other => {
			*info = other;
			Ok((Vbo::new(device, array)?, true))
		}
	}
}


#[derive(Debug)]
pub struct StorageVbo {
	device: Rc<dyn Device>,
	drawing_mode: DrawType,
}

impl StorageVbo {
	pub fn new(device: Rc<dyn Device>) -> Self {
		StorageVbo {
			device,
			drawing_mode: DrawType::Textured,
		}
	}

	fn color_array(&self, material: &PolyMaterial) -> bool {
		!self.drawing_mode.is_wireframe() && !material.uses_object_color()
	}
}

impl Storage for StorageVbo {
	fn kind(&self) -> StorageKind {
		StorageKind::BufferObject
	}

	fn drawing_mode(&self) -> DrawType {
		self.drawing_mode
	}

	fn set_drawing_mode(&mut self, mode: DrawType) {
		self.drawing_mode = mode;
	}

	fn bind_primitives(&mut self, bucket: &mut DisplayArrayBucket, material: &PolyMaterial,
		bindings: &mut AttribBindings) -> Result<(), StorageError>
	{
		let request = if self.drawing_mode.is_wireframe() {
			AttribRequest::default()
		} else {
			material.attrib_request(self.device.extensions())
		};

		let color_array = self.color_array(material);
		let modified = bucket.is_mesh_modified();

		{
			let (array, info) = bucket.storage_parts();
			let (mut vbo, created) = take_vbo(&self.device, array, info)?;

			// A fresh vbo already holds the current values.
			if modified && !created {
				vbo.update_data(array);
			}

			vbo.bind(bindings, &request, color_array);
			*info = Some(StorageInfo::Vbo(vbo));
		}

		bucket.consume_mesh_modified();
		bucket.set_bound(true);
		Ok(())
	}

	fn unbind_primitives(&mut self, bucket: &mut DisplayArrayBucket, material: &PolyMaterial,
		bindings: &mut AttribBindings) -> Result<(), StorageError>
	{
		if let Some(StorageInfo::Vbo(vbo)) = bucket.storage_info() {
			vbo.unbind(bindings, self.color_array(material));
		}

		bucket.set_bound(false);
		Ok(())
	}

	fn index_primitives(&mut self, bucket: &mut DisplayArrayBucket, slot: usize,
		material: &PolyMaterial) -> Result<(), StorageError>
	{
		debug_assert!(bucket.is_bound(), "index_primitives called outside bind/unbind");

		if self.drawing_mode.is_wireframe() {
			self.device.color(Vec4::new(0.0, 0.0, 0.0, 1.0));
		} else if material.uses_object_color() {
			self.device.color(bucket.slots()[slot].color);
		}

		if let Some(StorageInfo::Vbo(vbo)) = bucket.storage_info() {
			vbo.draw();
		}

		Ok(())
	}
}
