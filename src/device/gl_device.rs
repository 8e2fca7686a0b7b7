use super::*;
use std::ffi::{c_void, CStr};


#[derive(Debug)]
pub struct GlDevice {
	extensions: Extensions,
}

impl GlDevice {
	/// Expects the GL context to be current and `gl::load_with` to have run.
	pub fn new() -> anyhow::Result<Self> {
		let version = get_string(gl::VERSION)
			.ok_or_else(|| anyhow::anyhow!("Couldn't query GL_VERSION - is a context current?"))?;

		let major = version.split(|c: char| !c.is_ascii_digit())
			.next()
			.and_then(|major| major.parse::<u32>().ok())
			.unwrap_or(1);

		// Both are core from 2.0 onwards.
		let extensions = if major >= 2 {
			Extensions::all()
		} else {
			let supported = get_string(gl::EXTENSIONS).unwrap_or_default();
			let has = |name: &str| supported.split_whitespace().any(|ext| ext == name);

			Extensions {
				multitexture: has("GL_ARB_multitexture"),
				vertex_program: has("GL_ARB_vertex_program"),
			}
		};

		log::info!("GL {version} ({extensions:?})");

		Ok(GlDevice {
			extensions,
		})
	}
}

fn get_string(name: u32) -> Option<String> {
	unsafe {
		let ptr = gl::GetString(name);
		if ptr.is_null() {
			return None
		}

		Some(CStr::from_ptr(ptr.cast()).to_string_lossy().into_owned())
	}
}

fn raw_pointer(source: PointerSource) -> *const c_void {
	match source {
		PointerSource::Client(ptr) => ptr.cast(),
		PointerSource::Offset(offset) => offset as *const c_void,
	}
}

fn gl_bool(value: bool) -> u8 {
	if value { gl::TRUE } else { gl::FALSE }
}


impl Device for GlDevice {
	fn extensions(&self) -> Extensions {
		self.extensions
	}

	fn enable_client_state(&self, array: ClientArray) {
		unsafe { gl::EnableClientState(array as u32) }
	}

	fn disable_client_state(&self, array: ClientArray) {
		unsafe { gl::DisableClientState(array as u32) }
	}

	fn client_active_texture(&self, unit: u32) {
		unsafe { gl::ClientActiveTexture(gl::TEXTURE0 + unit) }
	}

	fn vertex_pointer(&self, p: ArrayPointer) {
		unsafe { gl::VertexPointer(p.components, p.component_type as u32, p.stride, raw_pointer(p.source)) }
	}

	fn normal_pointer(&self, p: ArrayPointer) {
		unsafe { gl::NormalPointer(p.component_type as u32, p.stride, raw_pointer(p.source)) }
	}

	fn color_pointer(&self, p: ArrayPointer) {
		unsafe { gl::ColorPointer(p.components, p.component_type as u32, p.stride, raw_pointer(p.source)) }
	}

	fn tex_coord_pointer(&self, p: ArrayPointer) {
		unsafe { gl::TexCoordPointer(p.components, p.component_type as u32, p.stride, raw_pointer(p.source)) }
	}

	fn vertex_attrib_pointer(&self, slot: u32, p: ArrayPointer) {
		unsafe {
			gl::VertexAttribPointer(slot, p.components, p.component_type as u32, gl_bool(p.normalized),
				p.stride, raw_pointer(p.source));
		}
	}

	fn enable_vertex_attrib_array(&self, slot: u32) {
		unsafe { gl::EnableVertexAttribArray(slot) }
	}

	fn disable_vertex_attrib_array(&self, slot: u32) {
		unsafe { gl::DisableVertexAttribArray(slot) }
	}

	fn color(&self, rgba: Vec4) {
		unsafe { gl::Color4f(rgba.x, rgba.y, rgba.z, rgba.w) }
	}

	fn load_matrix(&self, mode: MatrixMode, matrix: &Mat4) {
		let columns = matrix.to_cols_array();
		unsafe {
			gl::MatrixMode(mode as u32);
			gl::LoadMatrixf(columns.as_ptr());
		}
	}

	fn set_alpha_blend(&self, blend: AlphaBlend) {
		unsafe {
			gl::Disable(gl::SAMPLE_ALPHA_TO_COVERAGE);

			match blend {
				AlphaBlend::Solid => {
					gl::Disable(gl::BLEND);
					gl::Disable(gl::ALPHA_TEST);
				}

				AlphaBlend::Add => {
					gl::Enable(gl::BLEND);
					gl::BlendFunc(gl::ONE, gl::ONE);
					gl::Disable(gl::ALPHA_TEST);
				}

				AlphaBlend::Alpha | AlphaBlend::AlphaSort => {
					gl::Enable(gl::BLEND);
					gl::BlendFunc(gl::SRC_ALPHA, gl::ONE_MINUS_SRC_ALPHA);
					gl::Enable(gl::ALPHA_TEST);
					gl::AlphaFunc(gl::GREATER, 0.0);
				}

				AlphaBlend::Clip => {
					gl::Disable(gl::BLEND);
					gl::Enable(gl::ALPHA_TEST);
					gl::AlphaFunc(gl::GREATER, 0.5);
				}

				AlphaBlend::AlphaToCoverage => {
					gl::Disable(gl::BLEND);
					gl::Disable(gl::ALPHA_TEST);
					gl::Enable(gl::SAMPLE_ALPHA_TO_COVERAGE);
				}
			}
		}
	}

	fn gen_buffer(&self) -> u32 {
		let mut name = 0;
		unsafe { gl::GenBuffers(1, &mut name) }
		name
	}

	fn delete_buffer(&self, name: u32) {
		unsafe { gl::DeleteBuffers(1, &name) }
	}

	fn bind_buffer(&self, target: BufferTarget, name: u32) {
		unsafe { gl::BindBuffer(target as u32, name) }
	}

	fn buffer_data(&self, target: BufferTarget, data: &[u8]) {
		unsafe {
			gl::BufferData(target as u32, data.len() as isize, data.as_ptr().cast(), gl::STATIC_DRAW);
		}
	}

	fn gen_list(&self) -> u32 {
		unsafe { gl::GenLists(1) }
	}

	fn new_list(&self, list: u32) {
		unsafe { gl::NewList(list, gl::COMPILE) }
	}

	fn end_list(&self) {
		unsafe { gl::EndList() }
	}

	fn call_list(&self, list: u32) {
		unsafe { gl::CallList(list) }
	}

	fn delete_list(&self, list: u32) {
		unsafe { gl::DeleteLists(list, 1) }
	}

	fn draw_elements(&self, primitive: PrimitiveType, count: u32, indices: IndexPointer) {
		let indices = match indices {
			IndexPointer::Client(ptr) => ptr.cast::<c_void>(),
			IndexPointer::Offset(offset) => offset as *const c_void,
		};

		unsafe {
			gl::DrawElements(primitive as u32, count as i32, gl::UNSIGNED_INT, indices);
		}
	}
}
