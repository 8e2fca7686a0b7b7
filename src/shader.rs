use crate::attrib::{Attrib, AttribList, TexCoGen};
use crate::bucket::MeshSlot;
use crate::rasterizer::ViewState;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::rc::Rc;


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlphaBlend {
	#[default]
	Solid,
	Add,
	Alpha,
	Clip,
	AlphaSort,
	AlphaToCoverage,
}


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum AttribKind {
	TexFace,
	Tangent,
	Orco,
	Normal,
	VertexColor,
	Other(u32),
}

#[derive(Debug, Clone, Eq, PartialEq)]
pub struct GpuVertexAttrib {
	pub kind: AttribKind,
	pub name: String,
	pub gl_index: u32,
}


#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProgramBind {
	pub view: [f32; 16],
	pub view_inv: [f32; 16],
	pub light_layer: u32,
	pub scene_layers: u32,
	pub time: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectUniforms {
	pub model: [f32; 16],
	pub color: [f32; 4],
	pub auto_bump_scale: f32,
}


pub trait GpuMaterial: fmt::Debug {
	fn vertex_attributes(&self) -> Vec<GpuVertexAttrib>;

	fn bind(&mut self, params: &ProgramBind);
	fn unbind(&mut self);
	fn is_bound(&self) -> bool;

	fn bind_uniforms(&mut self, uniforms: &ObjectUniforms);
	fn alpha_blend(&self, object_color: [f32; 4]) -> AlphaBlend;
}

pub trait HostMaterial: fmt::Debug {
	fn compile(&self) -> Option<Box<dyn GpuMaterial>>;
}


#[derive(Debug)]
pub struct MaterialShader {
	host: Option<Rc<dyn HostMaterial>>,
	gpu: Option<Box<dyn GpuMaterial>>,
	uv_names: Vec<String>,
	light_layer: u32,
	attribs: AttribList,
	alpha_blend: AlphaBlend,
}

impl MaterialShader {
	pub fn new(host: Option<Rc<dyn HostMaterial>>, uv_names: Vec<String>, light_layer: u32) -> Self {
		let mut shader = MaterialShader {
			host,
			gpu: None,
			uv_names,
			light_layer,
			attribs: AttribList::new(),
			alpha_blend: AlphaBlend::Solid,
		};

		shader.reload_material();
		shader
	}

	pub fn is_ready(&self) -> bool {
		self.gpu.is_some()
	}

	pub fn reload_material(&mut self) {
		if let Some(gpu) = self.gpu.as_mut() {
			if gpu.is_bound() {
				gpu.unbind();
			}
		}

		self.gpu = self.host.as_ref().and_then(|host| host.compile());

		if self.gpu.is_none() {
			log::warn!("material {:?} is not ready", self.host);
		}

		self.parse_attribs();
	}

	fn parse_attribs(&mut self) {
		self.attribs.clear();

		let Some(gpu) = self.gpu.as_ref() else {
			return
		};

		for attribute in gpu.vertex_attributes() {
			let mut layer = 0;

			let texco = match attribute.kind {
				AttribKind::TexFace => {
					// An unnamed or unknown layer means the default, first, UV layer.
					if !attribute.name.is_empty() {
						match self.uv_names.iter().position(|name| *name == attribute.name) {
							Some(found) => layer = found,
							None => log::debug!("uv layer '{}' not found, using layer 0", attribute.name),
						}
					}

					TexCoGen::Uv
				}

				AttribKind::Tangent => TexCoGen::Tangent,
				AttribKind::Orco => TexCoGen::Orco,
				AttribKind::Normal => TexCoGen::Norm,
				AttribKind::VertexColor => TexCoGen::VertexColor,
				AttribKind::Other(_) => TexCoGen::Disable,
			};

			self.attribs.push(Attrib {
				texco,
				layer,
				index: attribute.gl_index,
			});
		}
	}

	pub fn attrib_list(&self) -> &[Attrib] {
		&self.attribs
	}

	pub fn bind(&mut self, enable: bool, time: f64, view: &ViewState) -> bool {
		let light_layer = self.light_layer;

		let Some(gpu) = self.gpu.as_mut() else {
			return false
		};

		if enable {
			gpu.bind(&ProgramBind {
				view: view.view.to_cols_array(),
				view_inv: view.view_inv.to_cols_array(),
				light_layer,
				scene_layers: view.scene_layers,
				time,
			});
		} else {
			gpu.unbind();
		}

		true
	}

	pub fn update(&mut self, slot: &MeshSlot) -> bool {
		let Some(gpu) = self.gpu.as_mut() else {
			return false
		};

		if !gpu.is_bound() {
			return false
		}

		let uniforms = ObjectUniforms {
			model: slot.transform.to_cols_array(),
			color: slot.color.to_array(),
			auto_bump_scale: slot.auto_bump_scale,
		};

		gpu.bind_uniforms(&uniforms);
		self.alpha_blend = gpu.alpha_blend(uniforms.color);

		true
	}

	pub fn alpha_blend(&self) -> AlphaBlend {
		self.alpha_blend
	}
}

impl Drop for MaterialShader {
	fn drop(&mut self) {
		if let Some(gpu) = self.gpu.as_mut() {
			if gpu.is_bound() {
				gpu.unbind();
			}
		}
	}
}


#[cfg(test)]
mod tests {
	use super::*;
	use glam::{Mat4, Vec4};
	use std::cell::RefCell;

	#[derive(Debug, Default)]
	struct Log {
		binds: Vec<ProgramBind>,
		unbinds: usize,
		uniforms: Vec<ObjectUniforms>,
	}

	#[derive(Debug)]
	struct FakeGpu {
		attributes: Vec<GpuVertexAttrib>,
		bound: bool,
		log: Rc<RefCell<Log>>,
	}

	impl GpuMaterial for FakeGpu {
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

	#[derive(Debug, Default)]
	struct FakeHost {
		attributes: Vec<GpuVertexAttrib>,
		fails: bool,
		log: Rc<RefCell<Log>>,
	}

	impl HostMaterial for FakeHost {
		fn compile(&self) -> Option<Box<dyn GpuMaterial>> {
			if self.fails {
				return None
			}

			Some(Box::new(FakeGpu {
				attributes: self.attributes.clone(),
				bound: false,
				log: self.log.clone(),
			}))
		}
	}

	fn uv(name: &str, gl_index: u32) -> GpuVertexAttrib {
		GpuVertexAttrib { kind: AttribKind::TexFace, name: name.into(), gl_index }
	}

	fn uv_names() -> Vec<String> {
		vec!["UVMap".into(), "Detail".into(), "Lightmap".into()]
	}

	fn view() -> ViewState {
		ViewState::new(Mat4::from_translation(glam::Vec3::new(0.0, 0.0, -5.0)), 1)
	}

	#[test]
	fn uv_attributes_resolve_by_name() {
		let host = FakeHost {
			attributes: vec![uv("Lightmap", 0), uv("", 1), uv("DoesNotExist", 2), uv("Detail", 3)],
			..Default::default()
		};

		let shader = MaterialShader::new(Some(Rc::new(host)), uv_names(), 1);
		let layers: Vec<_> = shader.attrib_list().iter().map(|a| (a.texco, a.layer, a.index)).collect();

		assert_eq!(layers, vec![
			(TexCoGen::Uv, 2, 0),
			(TexCoGen::Uv, 0, 1),
			(TexCoGen::Uv, 0, 2),
			(TexCoGen::Uv, 1, 3),
		]);
	}

	#[test]
	fn other_kinds_map_to_texco() {
		let host = FakeHost {
			attributes: vec![
				GpuVertexAttrib { kind: AttribKind::Tangent, name: String::new(), gl_index: 0 },
				GpuVertexAttrib { kind: AttribKind::Orco, name: String::new(), gl_index: 1 },
				GpuVertexAttrib { kind: AttribKind::Normal, name: String::new(), gl_index: 2 },
				GpuVertexAttrib { kind: AttribKind::VertexColor, name: "Col".into(), gl_index: 3 },
				GpuVertexAttrib { kind: AttribKind::Other(42), name: String::new(), gl_index: 4 },
			],
			..Default::default()
		};

		let shader = MaterialShader::new(Some(Rc::new(host)), uv_names(), 1);
		let texcos: Vec<_> = shader.attrib_list().iter().map(|a| a.texco).collect();

		assert_eq!(texcos, vec![TexCoGen::Tangent, TexCoGen::Orco, TexCoGen::Norm, TexCoGen::VertexColor, TexCoGen::Disable]);
	}

	#[test]
	fn missing_or_failed_material_is_not_ready() {
		let slot = MeshSlot::new(Mat4::IDENTITY);

		for host in [None, Some(Rc::new(FakeHost { fails: true, ..Default::default() }) as Rc<dyn HostMaterial>)] {
			let mut shader = MaterialShader::new(host, uv_names(), 1);

			assert!(!shader.is_ready());
			assert!(!shader.bind(true, 0.0, &view()));
			assert!(!shader.update(&slot));
			assert!(!shader.bind(false, 0.0, &view()));
			assert!(shader.attrib_list().is_empty());
		}
	}

	#[test]
	fn bind_passes_view_and_light_layer() {
		let host = FakeHost::default();
		let log = host.log.clone();
		let mut shader = MaterialShader::new(Some(Rc::new(host)), uv_names(), 4);
		let view = view();

		assert!(shader.bind(true, 2.5, &view));

		let log = log.borrow();
		assert_eq!(log.binds.len(), 1);
		assert_eq!(log.binds[0].view, view.view.to_cols_array());
		assert_eq!(log.binds[0].view_inv, view.view.inverse().to_cols_array());
		assert_eq!(log.binds[0].light_layer, 4);
		assert_eq!(log.binds[0].time, 2.5);
	}

	#[test]
	fn update_requires_bound_program() {
		let host = FakeHost::default();
		let log = host.log.clone();
		let mut shader = MaterialShader::new(Some(Rc::new(host)), uv_names(), 1);

		let mut slot = MeshSlot::new(Mat4::from_scale(glam::Vec3::splat(2.0)));
		slot.color = Vec4::new(1.0, 0.0, 0.0, 0.5);

		assert!(!shader.update(&slot));
		assert!(log.borrow().uniforms.is_empty());

		shader.bind(true, 0.0, &view());
		assert!(shader.update(&slot));
		assert_eq!(shader.alpha_blend(), AlphaBlend::Alpha);

		let log = log.borrow();
		assert_eq!(log.uniforms[0].model, slot.transform.to_cols_array());
		assert_eq!(log.uniforms[0].color, [1.0, 0.0, 0.0, 0.5]);
		assert_eq!(log.uniforms[0].auto_bump_scale, 1.0);
	}

	#[test]
	fn dropping_bound_shader_releases_program() {
		let host = FakeHost::default();
		let log = host.log.clone();
		let mut shader = MaterialShader::new(Some(Rc::new(host)), uv_names(), 1);

		shader.bind(true, 0.0, &view());
		drop(shader);

		assert_eq!(log.borrow().unbinds, 1);
	}
}
