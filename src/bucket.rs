use crate::display_array::DisplayArray;
use crate::material::PolyMaterial;
use crate::mesh::MeshObject;
use crate::storage::StorageInfo;
use glam::{Mat4, Vec4};
use std::rc::Rc;


#[derive(Debug, Clone, PartialEq)]
pub struct MeshSlot {
	pub transform: Mat4,
	pub color: Vec4,
	pub auto_bump_scale: f32,
	pub visible: bool,
}

impl MeshSlot {
	pub fn new(transform: Mat4) -> Self {
		MeshSlot {
			transform,
			color: Vec4::ONE,
			auto_bump_scale: 1.0,
			visible: true,
		}
	}
}


#[derive(Debug)]
pub struct DisplayArrayBucket {
	mesh: Rc<MeshObject>,
	array: DisplayArray,
	slots: Vec<MeshSlot>,
	storage_info: Option<StorageInfo>,
	use_display_list: bool,
	mesh_modified: bool,
	bound: bool,
}

impl DisplayArrayBucket {
	pub fn new(mesh: Rc<MeshObject>, array: DisplayArray) -> Self {
		DisplayArrayBucket {
			mesh,
			array,
			slots: Vec::new(),
			storage_info: None,
			use_display_list: false,
			mesh_modified: false,
			bound: false,
		}
	}

	pub fn mesh(&self) -> &Rc<MeshObject> {
		&self.mesh
	}

	pub fn array(&self) -> &DisplayArray {
		&self.array
	}

	pub fn array_mut(&mut self) -> &mut DisplayArray {
		&mut self.array
	}

	pub fn add_slot(&mut self, slot: MeshSlot) -> usize {
		self.slots.push(slot);
		self.slots.len() - 1
	}

	pub fn slots(&self) -> &[MeshSlot] {
		&self.slots
	}

	pub fn slot_mut(&mut self, index: usize) -> &mut MeshSlot {
		&mut self.slots[index]
	}

	pub fn has_visible_slots(&self) -> bool {
		self.slots.iter().any(|slot| slot.visible)
	}

	pub fn use_display_list(&self) -> bool {
		self.use_display_list
	}

	pub fn set_use_display_list(&mut self, enable: bool) {
		if self.use_display_list && !enable && matches!(self.storage_info, Some(StorageInfo::DisplayList(_))) {
			self.destroy_storage_info();
		}

		self.use_display_list = enable;
	}

	pub fn storage_info(&self) -> Option<&StorageInfo> {
		self.storage_info.as_ref()
	}

	pub fn storage_info_mut(&mut self) -> Option<&mut StorageInfo> {
		self.storage_info.as_mut()
	}

	pub fn storage_parts(&mut self) -> (&DisplayArray, &mut Option<StorageInfo>) {
		(&self.array, &mut self.storage_info)
	}

	pub fn destroy_storage_info(&mut self) -> bool {
		match self.storage_info.take() {
			Some(info) => {
				log::debug!("releasing {} storage for mesh '{}'", info.kind_name(), self.mesh.name());
				true
			}

			None => false,
		}
	}

	/// Sample the mesh for changes at the start of drawing this bucket.
	///
	/// A structural change to the array drops the storage outright, a value change is
	/// left for the backend to pick up through [`Self::is_mesh_modified`]. It stays
	/// pending across frames where the bucket isn't drawn.
	pub fn update_mesh_modified(&mut self) {
		if self.array.is_modified() {
			self.destroy_storage_info();
			self.array.clear_modified();
		}

		self.mesh_modified |= self.mesh.is_modified();
	}

	pub fn is_mesh_modified(&self) -> bool {
		self.mesh_modified
	}

	pub fn consume_mesh_modified(&mut self) {
		self.mesh_modified = false;
	}

	pub fn is_bound(&self) -> bool {
		self.bound
	}

	pub(crate) fn set_bound(&mut self, bound: bool) {
		self.bound = bound;
	}
}


#[derive(Debug)]
pub struct MaterialBucket {
	material: PolyMaterial,
	arrays: Vec<DisplayArrayBucket>,
}

impl MaterialBucket {
	pub fn new(material: PolyMaterial) -> Self {
		MaterialBucket {
			material,
			arrays: Vec::new(),
		}
	}

	pub fn material(&self) -> &PolyMaterial {
		&self.material
	}

	pub fn add_display_array(&mut self, bucket: DisplayArrayBucket) -> usize {
		self.arrays.push(bucket);
		self.arrays.len() - 1
	}

	pub fn display_arrays(&self) -> &[DisplayArrayBucket] {
		&self.arrays
	}

	pub fn display_array_mut(&mut self, index: usize) -> &mut DisplayArrayBucket {
		&mut self.arrays[index]
	}

	pub fn parts_mut(&mut self) -> (&mut PolyMaterial, &mut [DisplayArrayBucket]) {
		(&mut self.material, &mut self.arrays)
	}

	pub fn reload_material(&mut self) {
		if let Some(shader) = self.material.shader_mut() {
			shader.reload_material();
		}

		self.release_storage();
	}

	pub fn release_storage(&mut self) -> usize {
		self.arrays.iter_mut()
			.map(|bucket| bucket.destroy_storage_info() as usize)
			.sum()
	}
}


#[derive(Debug, Default)]
pub struct BucketManager {
	buckets: Vec<MaterialBucket>,
}

impl BucketManager {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn add_bucket(&mut self, bucket: MaterialBucket) -> usize {
		self.buckets.push(bucket);
		self.buckets.len() - 1
	}

	pub fn buckets(&self) -> &[MaterialBucket] {
		&self.buckets
	}

	pub fn buckets_mut(&mut self) -> &mut [MaterialBucket] {
		&mut self.buckets
	}

	pub fn bucket_mut(&mut self, index: usize) -> &mut MaterialBucket {
		&mut self.buckets[index]
	}

	pub fn set_use_display_lists(&mut self, enable: bool) {
		for bucket in self.buckets.iter_mut() {
			for array in bucket.arrays.iter_mut() {
				array.set_use_display_list(enable);
			}
		}
	}

	pub fn release_storage(&mut self) -> usize {
		self.buckets.iter_mut().map(MaterialBucket::release_storage).sum()
	}

	pub fn clear_mesh_modified(&mut self) {
		for bucket in self.buckets.iter() {
			for array in bucket.arrays.iter() {
				array.mesh().set_modified_flag(Default::default());
			}
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use crate::mesh::ModifiedFlags;
	use crate::vertex::TexVert;
	use bytemuck::Zeroable;

	fn triangle() -> DisplayArray {
		DisplayArray::new(vec![TexVert::zeroed(); 3], vec![0, 1, 2])
	}

	#[test]
	fn structural_change_drops_storage() {
		let mesh = Rc::new(MeshObject::new("Tri"));
		let mut bucket = DisplayArrayBucket::new(mesh, triangle());
		bucket.storage_info = Some(StorageInfo::DisplayList(Default::default()));

		bucket.update_mesh_modified();
		assert!(bucket.storage_info().is_some());

		bucket.array_mut().add_triangle(2, 1, 0);
		bucket.update_mesh_modified();
		assert!(bucket.storage_info().is_none());
		assert!(!bucket.array().is_modified());
	}

	#[test]
	fn mesh_flags_are_sampled_per_frame() {
		let mesh = Rc::new(MeshObject::new("Tri"));
		let mut bucket = DisplayArrayBucket::new(mesh.clone(), triangle());

		mesh.append_modified_flag(ModifiedFlags::COLORS);
		bucket.update_mesh_modified();
		assert!(bucket.is_mesh_modified());

		bucket.consume_mesh_modified();
		assert!(!bucket.is_mesh_modified());
		assert!(mesh.is_modified());
	}

	#[test]
	fn unconsumed_change_stays_pending() {
		let mesh = Rc::new(MeshObject::new("Tri"));
		let mut bucket = DisplayArrayBucket::new(mesh.clone(), triangle());

		mesh.append_modified_flag(ModifiedFlags::POSITION);
		bucket.update_mesh_modified();
		mesh.set_modified_flag(ModifiedFlags::empty());

		bucket.update_mesh_modified();
		assert!(bucket.is_mesh_modified());

		bucket.consume_mesh_modified();
		bucket.update_mesh_modified();
		assert!(!bucket.is_mesh_modified());
	}

	#[test]
	fn disabling_display_lists_drops_recorded_storage() {
		let mesh = Rc::new(MeshObject::new("Tri"));
		let mut bucket = DisplayArrayBucket::new(mesh, triangle());
		bucket.set_use_display_list(true);
		bucket.storage_info = Some(StorageInfo::DisplayList(Default::default()));

		bucket.set_use_display_list(false);
		assert!(bucket.storage_info().is_none());
	}
}
