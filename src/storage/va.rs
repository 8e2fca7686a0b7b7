use super::{DrawType, Storage, StorageInfo, StorageKind, DRAW_MAX};
use crate::attrib::{AttribBindings, AttribRequest, VertexSource};
use crate::bucket::DisplayArrayBucket;
use crate::device::{ClientArray, Device, IndexPointer, ListHandle, PrimitiveType};
use crate::error::StorageError;
use crate::material::PolyMaterial;
use glam::Vec4;
use std::rc::Rc;


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum ListType {
	Bind = 0,
	Draw = 1,
	Unbind = 2,
}

pub const NUM_LIST: usize = 3;


/// Recorded bind, draw and unbind work for each drawing mode.
#[derive(Debug, Default)]
pub struct DisplayList {
	lists: [[Option<ListHandle>; NUM_LIST]; DRAW_MAX],
}

impl DisplayList {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn remove_all_lists(&mut self, mode: DrawType) {
		for list in self.lists[mode.index()].iter_mut() {
			*list = None;
		}
	}

	/// Lists of every mode captured vertex values, not just the mode being drawn.
	pub fn set_mesh_modified(&mut self, modified: bool) {
		if modified {
			for mode in DrawType::ALL {
				self.remove_all_lists(mode);
			}
		}
	}

	pub fn is_recorded(&self, mode: DrawType, ty: ListType) -> bool {
		self.lists[mode.index()][ty as usize].is_some()
	}

	/// Replays the list and returns true if one was recorded. Otherwise starts
	/// recording and returns false, the caller then does the real work and calls
	/// [`DisplayList::end`].
	pub fn draw(&mut self, device: &Rc<dyn Device>, mode: DrawType, ty: ListType) -> Result<bool, StorageError> {
		let slot = &mut self.lists[mode.index()][ty as usize];

		if let Some(list) = slot {
			device.call_list(list.name());
			return Ok(true)
		}

		let list = ListHandle::new(device)?;
		device.new_list(list.name());
		*slot = Some(list);

		Ok(false)
	}

	pub fn end(&self, device: &Rc<dyn Device>, mode: DrawType, ty: ListType) {
		device.end_list();

		if let Some(list) = &self.lists[mode.index()][ty as usize] {
			device.call_list(list.name());
		}
	}
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
enum Pass {
	Immediate,
	Recording,
	Replayed,
}

fn display_list(bucket: &mut DisplayArrayBucket) -> Option<&mut DisplayList> {
	if !bucket.use_display_list() {
		return None
	}

	if !matches!(bucket.storage_info(), Some(StorageInfo::DisplayList(_))) {
		let (_, info) = bucket.storage_parts();
		*info = Some(StorageInfo::DisplayList(DisplayList::new()));
	}

	match bucket.storage_info_mut() {
		Some(StorageInfo::DisplayList(list)) => Some(list),
		_ => None,
	}
}


#[derive(Debug)]
pub struct StorageVa {
	device: Rc<dyn Device>,
	drawing_mode: DrawType,
}

impl StorageVa {
	pub fn new(device: Rc<dyn Device>) -> Self {
		StorageVa {
			device,
			drawing_mode: DrawType::Textured,
		}
	}

	fn begin(&self, bucket: &mut DisplayArrayBucket, ty: ListType) -> Result<Pass, StorageError> {
		let Some(list) = display_list(bucket) else {
			return Ok(Pass::Immediate)
		};

		if list.draw(&self.device, self.drawing_mode, ty)? {
			Ok(Pass::Replayed)
		} else {
			Ok(Pass::Recording)
		}
	}

	fn finish(&self, bucket: &mut DisplayArrayBucket, ty: ListType, pass: Pass) {
		if pass != Pass::Recording {
			return
		}

		if let Some(list) = display_list(bucket) {
			list.end(&self.device, self.drawing_mode, ty);
		}
	}
}

impl Storage for StorageVa {
	fn kind(&self) -> StorageKind {
		StorageKind::VertexArray
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
		bucket.set_bound(true);

		if matches!(bucket.storage_info(), Some(StorageInfo::Vbo(_))) {
			bucket.destroy_storage_info();
		}

		if bucket.is_mesh_modified() {
			if let Some(StorageInfo::DisplayList(list)) = bucket.storage_info_mut() {
				list.set_mesh_modified(true);
			}

			bucket.consume_mesh_modified();
		}

		let extensions = self.device.extensions();
		let wireframe = self.drawing_mode.is_wireframe();
		let request = if wireframe {
			AttribRequest::default()
		} else {
			material.attrib_request(extensions)
		};

		let pass = self.begin(bucket, ListType::Bind)?;
		if pass == Pass::Replayed {
			bindings.assume(&request, extensions.multitexture);
			return Ok(())
		}

		let source = VertexSource::client(bucket.array().vertices());

		self.device.enable_client_state(ClientArray::Vertex);
		self.device.enable_client_state(ClientArray::Normal);
		self.device.vertex_pointer(source.position());
		self.device.normal_pointer(source.normal());

		if !wireframe {
			bindings.bind(&*self.device, &request, &source);
		}

		self.finish(bucket, ListType::Bind, pass);
		Ok(())
	}

	fn unbind_primitives(&mut self, bucket: &mut DisplayArrayBucket, _material: &PolyMaterial,
		bindings: &mut AttribBindings) -> Result<(), StorageError>
	{
		let pass = self.begin(bucket, ListType::Unbind)?;

		if pass == Pass::Replayed {
			bindings.forget();
		} else {
			self.device.disable_client_state(ClientArray::Vertex);
			self.device.disable_client_state(ClientArray::Normal);

			if !self.drawing_mode.is_wireframe() {
				self.device.disable_client_state(ClientArray::Color);
				bindings.unbind(&*self.device);
			}

			self.finish(bucket, ListType::Unbind, pass);
		}

		bucket.set_bound(false);
		Ok(())
	}

	fn index_primitives(&mut self, bucket: &mut DisplayArrayBucket, slot: usize,
		material: &PolyMaterial) -> Result<(), StorageError>
	{
		debug_assert!(bucket.is_bound(), "index_primitives called outside bind/unbind");

		if bucket.array().is_empty() {
			return Ok(())
		}

		let wireframe = self.drawing_mode.is_wireframe();
		let object_color = !wireframe && material.uses_object_color();

		// Per-slot colour stays outside the recorded list, slots share one list.
		if wireframe {
			self.device.color(Vec4::new(0.0, 0.0, 0.0, 1.0));
		} else if object_color {
			self.device.color(bucket.slots()[slot].color);
		}

		let pass = self.begin(bucket, ListType::Draw)?;
		if pass == Pass::Replayed {
			return Ok(())
		}

		let array = bucket.array();

		if !wireframe {
			if object_color {
				self.device.disable_client_state(ClientArray::Color);
			} else {
				self.device.enable_client_state(ClientArray::Color);
				self.device.color_pointer(VertexSource::client(array.vertices()).color());
			}
		}

		debug_assert!(array.indices_in_range(), "index out of range for {} vertices", array.vertex_count());

		self.device.draw_elements(PrimitiveType::Triangles, array.index_count() as u32,
			IndexPointer::Client(array.indices().as_ptr()));

		self.finish(bucket, ListType::Draw, pass);
		Ok(())
	}
}
