use crate::device::{ArrayPointer, ClientArray, Device, Extensions, PointerSource};
use crate::vertex::{TexVert, VertexLayout, MAX_UNIT, TEX_VERT_LAYOUT};


#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum TexCoGen {
	Orco,
	Glob,
	Uv,
	Norm,
	Tangent,
	VertexColor,
	Disable,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Attrib {
	pub texco: TexCoGen,
	pub layer: usize,
	pub index: u32,
}

pub type TexCoGenList = Vec<TexCoGen>;
pub type AttribList = Vec<Attrib>;


#[derive(Debug, Copy, Clone)]
pub struct VertexSource {
	base: PointerSource,
	layout: VertexLayout,
}

impl VertexSource {
	/// Point straight into client memory. The slice must outlive every draw using it.
	pub fn client(vertices: &[TexVert]) -> Self {
		VertexSource {
			base: PointerSource::Client(vertices.as_ptr().cast()),
			layout: TEX_VERT_LAYOUT,
		}
	}

	pub fn buffer() -> Self {
		VertexSource {
			base: PointerSource::Offset(0),
			layout: TEX_VERT_LAYOUT,
		}
	}

	pub fn position(&self) -> ArrayPointer {
		ArrayPointer::floats(3, self.layout.stride, self.base.at(self.layout.position))
	}

	pub fn normal(&self) -> ArrayPointer {
		ArrayPointer::floats(3, self.layout.stride, self.base.at(self.layout.normal))
	}

	pub fn tangent(&self) -> ArrayPointer {
		ArrayPointer::floats(4, self.layout.stride, self.base.at(self.layout.tangent))
	}

	pub fn color(&self) -> ArrayPointer {
		ArrayPointer::bytes(4, self.layout.stride, self.base.at(self.layout.color))
	}

	pub fn uv(&self, layer: usize) -> ArrayPointer {
		ArrayPointer::floats(2, self.layout.stride, self.base.at(self.layout.uv_layer(layer)))
	}

	pub fn channel(&self, channel: Channel) -> Option<ArrayPointer> {
		match channel.texco {
			TexCoGen::Orco | TexCoGen::Glob => Some(self.position()),
			TexCoGen::Uv => Some(self.uv(channel.layer)),
			TexCoGen::Norm => Some(self.normal()),
			TexCoGen::Tangent => Some(self.tangent()),
			TexCoGen::VertexColor => Some(self.color()),
			TexCoGen::Disable => None,
		}
	}
}


#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Channel {
	pub index: u32,
	pub texco: TexCoGen,
	pub layer: usize,
}

impl Channel {
	pub fn is_enabled(&self) -> bool {
		self.texco != TexCoGen::Disable
	}
}


#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct AttribRequest {
	pub units: Vec<Channel>,
	pub slots: Vec<Channel>,
}

impl AttribRequest {
	pub fn resolve(texcos: &[TexCoGen], attribs: &[Attrib], extensions: Extensions) -> Self {
		// Without multitexture only the first unit can carry coordinates.
		let unit_limit = if extensions.multitexture { texcos.len() } else { texcos.len().min(1) };

		let units = texcos[..unit_limit].iter()
			.enumerate()
			.map(|(unit, &texco)| {
				let texco = match texco {
					TexCoGen::Uv if unit >= MAX_UNIT => TexCoGen::Disable,
					TexCoGen::VertexColor => TexCoGen::Disable,
					other => other,
				};

				Channel { index: unit as u32, texco, layer: unit }
			})
			.collect();

		let slots = if extensions.vertex_program {
			attribs.iter()
				.map(|attrib| {
					let texco = match attrib.texco {
						TexCoGen::Uv if attrib.layer >= MAX_UNIT => TexCoGen::Disable,
						other => other,
					};

					Channel { index: attrib.index, texco, layer: attrib.layer }
				})
				.collect()
		} else {
			Vec::new()
		};

		AttribRequest { units, slots }
	}

	pub fn enabled_units(&self) -> impl Iterator<Item = u32> + '_ {
		self.units.iter().filter(|c| c.is_enabled()).map(|c| c.index)
	}

	pub fn enabled_slots(&self) -> impl Iterator<Item = u32> + '_ {
		self.slots.iter().filter(|c| c.is_enabled()).map(|c| c.index)
	}
}


#[derive(Debug, Default)]
pub struct AttribBindings {
	multitexture: bool,
	units: Vec<u32>,
	slots: Vec<u32>,
}

impl AttribBindings {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn enabled_units(&self) -> &[u32] {
		&self.units
	}

	pub fn enabled_slots(&self) -> &[u32] {
		&self.slots
	}

	pub fn bind(&mut self, device: &dyn Device, request: &AttribRequest, source: &VertexSource) {
		let multitexture = device.extensions().multitexture;

		self.disable_stale(device, request, multitexture);

		for &channel in request.units.iter() {
			if multitexture {
				device.client_active_texture(channel.index);
			}

			match source.channel(channel) {
				Some(pointer) => {
					device.enable_client_state(ClientArray::TexCoord);
					device.tex_coord_pointer(pointer);
				}

				None => device.disable_client_state(ClientArray::TexCoord),
			}
		}

		if multitexture && !request.units.is_empty() {
			device.client_active_texture(0);
		}

		for &channel in request.slots.iter() {
			match source.channel(channel) {
				Some(pointer) => {
					device.vertex_attrib_pointer(channel.index, pointer);
					device.enable_vertex_attrib_array(channel.index);
				}

				None => device.disable_vertex_attrib_array(channel.index),
			}
		}

		self.assume(request, multitexture);
	}

	/// Record `request` as bound without touching the device, for when a recorded list
	/// replays the binding instead.
	pub fn assume(&mut self, request: &AttribRequest, multitexture: bool) {
		self.multitexture = multitexture;
		self.units = request.enabled_units().collect();
		self.slots = request.enabled_slots().collect();
	}

	pub fn unbind(&mut self, device: &dyn Device) {
		for &unit in self.units.iter() {
			if self.multitexture {
				device.client_active_texture(unit);
			}

			device.disable_client_state(ClientArray::TexCoord);
		}

		if self.multitexture && !self.units.is_empty() {
			device.client_active_texture(0);
		}

		for &slot in self.slots.iter() {
			device.disable_vertex_attrib_array(slot);
		}

		self.units.clear();
		self.slots.clear();
	}

	pub fn forget(&mut self) {
		self.units.clear();
		self.slots.clear();
	}

	// Anything still enabled from a previous bind that this request doesn't cover.
	fn disable_stale(&mut self, device: &dyn Device, request: &AttribRequest, multitexture: bool) {
		let stale_units: Vec<u32> = self.units.iter()
			.copied()
			.filter(|unit| !request.units.iter().any(|c| c.index == *unit))
			.collect();

		for &unit in stale_units.iter() {
			if multitexture {
				device.client_active_texture(unit);
			}

			device.disable_client_state(ClientArray::TexCoord);
		}

		if multitexture && !stale_units.is_empty() {
			device.client_active_texture(0);
		}

		for &slot in self.slots.iter() {
			if !request.slots.iter().any(|c| c.index == slot) {
				device.disable_vertex_attrib_array(slot);
			}
		}

		self.units.clear();
		self.slots.clear();
	}
}
