use crate::attrib::{Attrib, AttribRequest, TexCoGen, TexCoGenList};
use crate::device::Extensions;
use crate::shader::{AlphaBlend, MaterialShader};
use bitflags::bitflags;


bitflags! {
	#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
	pub struct MaterialFlags: u32 {
		const USE_OBJECT_COLOR = 1 << 0;
	}
}


#[derive(Debug)]
pub struct PolyMaterial {
	name: String,
	flags: MaterialFlags,
	texco_list: TexCoGenList,
	alpha_blend: AlphaBlend,
	shader: Option<MaterialShader>,
}

impl PolyMaterial {
	pub fn new(name: impl Into<String>) -> Self {
		PolyMaterial {
			name: name.into(),
			flags: MaterialFlags::empty(),
			texco_list: TexCoGenList::new(),
			alpha_blend: AlphaBlend::Solid,
			shader: None,
		}
	}

	pub fn with_flags(mut self, flags: MaterialFlags) -> Self {
		self.flags = flags;
		self
	}

	pub fn with_texcos(mut self, texcos: impl Into<TexCoGenList>) -> Self {
		self.texco_list = texcos.into();
		self
	}

	pub fn with_alpha_blend(mut self, blend: AlphaBlend) -> Self {
		self.alpha_blend = blend;
		self
	}

	pub fn with_shader(mut self, shader: MaterialShader) -> Self {
		self.shader = Some(shader);
		self
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn uses_object_color(&self) -> bool {
		self.flags.contains(MaterialFlags::USE_OBJECT_COLOR)
	}

	pub fn texco_list(&self) -> &[TexCoGen] {
		&self.texco_list
	}

	pub fn attrib_list(&self) -> &[Attrib] {
		match self.shader.as_ref() {
			Some(shader) => shader.attrib_list(),
			None => &[],
		}
	}

	pub fn attrib_request(&self, extensions: Extensions) -> AttribRequest {
		AttribRequest::resolve(self.texco_list(), self.attrib_list(), extensions)
	}

	pub fn shader(&self) -> Option<&MaterialShader> {
		self.shader.as_ref()
	}

	pub fn shader_mut(&mut self) -> Option<&mut MaterialShader> {
		self.shader.as_mut()
	}

	pub fn is_ready(&self) -> bool {
		self.shader.as_ref().map_or(true, MaterialShader::is_ready)
	}

	pub fn alpha_blend(&self) -> AlphaBlend {
		match self.shader.as_ref() {
			Some(shader) => shader.alpha_blend(),
			None => self.alpha_blend,
		}
	}
}
