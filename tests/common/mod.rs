#![allow(dead_code)]

use gl_rasterizer::shader::{AttribKind, GpuMaterial, GpuVertexAttrib, HostMaterial, ObjectUniforms, ProgramBind};
use gl_rasterizer::*;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::cell::RefCell;
use std::rc::Rc;


/// What a fake program saw.
#[derive(Debug, Default)]
pub struct ProgramLog {
	pub binds: Vec<ProgramBind>,
	pub unbinds: usize,
	pub uniforms: Vec<ObjectUniforms>,
}


#[derive(Debug)]
pub struct FakeProgram {
	attributes: Vec<GpuVertexAttrib>,
	bound: bool,
	log: Rc<RefCell<ProgramLog>>,
}

impl GpuMaterial for FakeProgram {
	fn vertex_attributes(&self) -> Vec<GpuVertexAttrib> {
		self.attributes.clone()
	}

	fn bind(&mut self, params: &ProgramBind) {
		self.bound = true;
		self.log.borrow_mut().binds.push(*params);
	}

	fn unbind(&mut self) {
		self.bound = false;
		self.log.borrow_mut().unbinds += 1;
	}

	fn is_bound(&self) -> bool {
		self.bound
	}

	fn bind_uniforms(&mut self, uniforms: &ObjectUniforms) {
		self.log.borrow_mut().uniforms.push(*uniforms);
	}

	fn alpha_blend(&self, color: [f32; 4]) -> AlphaBlend {
		if color[3] < 1.0 { AlphaBlend::Alpha } else { AlphaBlend::Solid }
	}
}


/// Host material that compiles to a [`FakeProgram`], or fails to.
#[derive(Debug, Default)]
pub struct FakeHost {
	pub attributes: Vec<GpuVertexAttrib>,
	pub fails: bool,
	pub log: Rc<RefCell<ProgramLog>>,
}

impl HostMaterial for FakeHost {
	fn compile(&self) -> Option<Box<dyn GpuMaterial>> {
		if self.fails {
			return None
		}

		Some(Box::new(FakeProgram {
			attributes: self.attributes.clone(),
			bound: false,
			log: self.log.clone(),
		}))
	}
}


pub fn uv_attrib(name: &str, gl_index: u32) -> GpuVertexAttrib {
	GpuVertexAttrib {
		kind: AttribKind::TexFace,
		name: name.into(),
		gl_index,
	}
}

pub fn uv_names() -> Vec<String> {
	vec!["UVMap".into(), "Detail".into(), "Lightmap".into()]
}


/// A flat grid of `quads` quads along x, two triangles each.
pub fn strip(quads: u32) -> DisplayArray {
	let mut vertices = Vec::new();
	let mut indices = Vec::new();

	for i in 0..=quads {
		for y in 0..2 {
			let position = Vec3::new(i as f32, y as f32, 0.0);
			let uv = Vec2::new(i as f32 / quads.max(1) as f32, y as f32);
			vertices.push(TexVert::new(position, Vec3::Z, Vec4::X, [255; 4], &[uv, uv, uv]));
		}
	}

	for i in 0..quads {
		let base = i * 2;
		indices.extend_from_slice(&[base, base + 1, base + 3, base, base + 3, base + 2]);
	}

	DisplayArray::new(vertices, indices)
}


pub struct Scene {
	pub trace: Rc<TraceDevice>,
	pub rasterizer: Rasterizer,
	pub buckets: BucketManager,
	pub mesh: Rc<MeshObject>,
}

impl Scene {
	pub fn new(settings: RenderSettings, material: PolyMaterial, array: DisplayArray) -> Self {
		let trace = Rc::new(TraceDevice::new());
		let rasterizer = Rasterizer::new(trace.clone(), &settings);

		let mesh = Rc::new(MeshObject::new("Strip"));
		let mut array_bucket = DisplayArrayBucket::new(mesh.clone(), array);
		array_bucket.set_use_display_list(settings.display_lists);
		array_bucket.add_slot(MeshSlot::new(Mat4::IDENTITY));

		let mut material_bucket = MaterialBucket::new(material);
		material_bucket.add_display_array(array_bucket);

		let mut buckets = BucketManager::new();
		buckets.add_bucket(material_bucket);

		Scene { trace, rasterizer, buckets, mesh }
	}

	pub fn with_storage(storage: StorageKind, display_lists: bool) -> Self {
		let settings = RenderSettings {
			storage,
			display_lists,
			..Default::default()
		};

		Self::new(settings, PolyMaterial::new("Plain"), strip(2))
	}

	pub fn render(&mut self) -> FrameStats {
		self.rasterizer.render_buckets(&mut self.buckets)
			.expect("rendering failed")
	}

	pub fn array_bucket(&mut self) -> &mut DisplayArrayBucket {
		self.buckets.bucket_mut(0).display_array_mut(0)
	}
}
