use crate::attrib::AttribBindings;
use crate::bucket::{BucketManager, DisplayArrayBucket, MaterialBucket};
use crate::device::{Device, MatrixMode};
use crate::error::StorageError;
use crate::material::PolyMaterial;
use crate::settings::RenderSettings;
use crate::shader::AlphaBlend;
use crate::storage::{create_storage, DrawType, Storage, StorageKind};
use glam::Mat4;
use std::rc::Rc;


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewState {
	pub view: Mat4,
	pub view_inv: Mat4,
	pub scene_layers: u32,
}

impl ViewState {
	pub fn new(view: Mat4, scene_layers: u32) -> Self {
		ViewState {
			view,
			view_inv: view.inverse(),
			scene_layers,
		}
	}
}

impl Default for ViewState {
	fn default() -> Self {
		ViewState::new(Mat4::IDENTITY, 1)
	}
}


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
	pub materials_drawn: usize,
	pub materials_skipped: usize,
	pub arrays_drawn: usize,
	pub slots_drawn: usize,
}


#[derive(Debug)]
pub struct Rasterizer {
	device: Rc<dyn Device>,
	storage: Box<dyn Storage>,
	bindings: AttribBindings,

	view: ViewState,
	time: f64,

	alpha_blend: Option<AlphaBlend>,
}

impl Rasterizer {
	pub fn new(device: Rc<dyn Device>, settings: &RenderSettings) -> Self {
		let storage = create_storage(settings.storage, device.clone(), settings.drawing_mode);

		log::debug!("rasterizer using {:?} storage, {:?} mode", settings.storage, settings.drawing_mode);

		Rasterizer {
			device,
			storage,
			bindings: AttribBindings::new(),

			view: ViewState::default(),
			time: 0.0,

			alpha_blend: None,
		}
	}

	pub fn storage_kind(&self) -> StorageKind {
		self.storage.kind()
	}

	pub fn set_storage(&mut self, kind: StorageKind, buckets: &mut BucketManager) -> usize {
		if kind == self.storage.kind() {
			return 0
		}

		let released = buckets.release_storage();
		let mode = self.storage.drawing_mode();

		self.storage = create_storage(kind, self.device.clone(), mode);
		self.bindings = AttribBindings::new();

		log::debug!("switched to {kind:?} storage, released {released} buckets");
		released
	}

	pub fn drawing_mode(&self) -> DrawType {
		self.storage.drawing_mode()
	}

	pub fn set_drawing_mode(&mut self, mode: DrawType) {
		self.storage.set_drawing_mode(mode);
	}

	pub fn view(&self) -> &ViewState {
		&self.view
	}

	pub fn set_view_matrix(&mut self, view: Mat4, scene_layers: u32) {
		self.view = ViewState::new(view, scene_layers);
	}

	pub fn set_projection_matrix(&mut self, projection: &Mat4) {
		self.device.load_matrix(MatrixMode::Projection, projection);
	}

	pub fn set_time(&mut self, time: f64) {
		self.time = time;
	}

	pub fn render_buckets(&mut self, buckets: &mut BucketManager) -> Result<FrameStats, StorageError> {
		let mut stats = FrameStats::default();

		for bucket in buckets.buckets_mut() {
			self.render_material_bucket(bucket, &mut stats)?;
		}

		// Only once every bucket sharing a mesh has seen the change.
		buckets.clear_mesh_modified();

		log::trace!("{stats:?}");
		Ok(stats)
	}

	pub fn render_material_bucket(&mut self, bucket: &mut MaterialBucket, stats: &mut FrameStats) -> Result<(), StorageError> {
		let (material, arrays) = bucket.parts_mut();

		if !material.is_ready() {
			log::trace!("skipping material '{}', not ready", material.name());
			stats.materials_skipped += 1;
			return Ok(())
		}

		let (time, view) = (self.time, self.view);

		if let Some(shader) = material.shader_mut() {
			shader.bind(true, time, &view);
		}

		let result = self.render_arrays(material, arrays, stats);

		if let Some(shader) = material.shader_mut() {
			shader.bind(false, time, &view);
		}

		stats.materials_drawn += 1;
		result
	}

	fn render_arrays(&mut self, material: &mut PolyMaterial, arrays: &mut [DisplayArrayBucket],
		stats: &mut FrameStats) -> Result<(), StorageError>
	{
		for array in arrays.iter_mut() {
			array.update_mesh_modified();

			if array.array().is_empty() || !array.has_visible_slots() {
				continue
			}

			self.storage.bind_primitives(array, material, &mut self.bindings)?;

			let drawn = self.render_slots(material, array, stats);
			let unbound = self.storage.unbind_primitives(array, material, &mut self.bindings);

			drawn?;
			unbound?;

			stats.arrays_drawn += 1;
		}

		Ok(())
	}

	fn render_slots(&mut self, material: &mut PolyMaterial, array: &mut DisplayArrayBucket,
		stats: &mut FrameStats) -> Result<(), StorageError>
	{
		for index in 0..array.slots().len() {
			let slot = &array.slots()[index];
			if !slot.visible {
				continue
			}

			let model_view = self.view.view * slot.transform;
			self.device.load_matrix(MatrixMode::ModelView, &model_view);

			if let Some(shader) = material.shader_mut() {
				shader.update(slot);
			}

			self.apply_alpha_blend(material.alpha_blend());
			self.storage.index_primitives(array, index, material)?;

			stats.slots_drawn += 1;
		}

		Ok(())
	}

	fn apply_alpha_blend(&mut self, blend: AlphaBlend) {
		if self.alpha_blend != Some(blend) {
			self.device.set_alpha_blend(blend);
			self.alpha_blend = Some(blend);
		}
	}
}
