mod main_loop;

use gl_rasterizer::*;
use glam::{Mat4, Vec2, Vec3, Vec4};
use std::f32::consts::PI;
use std::rc::Rc;


const SETTINGS_PATH: &str = "resource/settings.toml";


fn main() -> anyhow::Result<()> {
	std::env::set_var("RUST_BACKTRACE", "1");
	env_logger::init();

	let settings = RenderSettings::load(SETTINGS_PATH)?;
	let window = settings.window.clone();

	main_loop::run(&window, move || Viewer::new(settings))
}



struct Viewer {
	rasterizer: Rasterizer,
	buckets: BucketManager,
	cube: Rc<MeshObject>,

	aspect: f32,
	time: f32,
}

impl Viewer {
	fn new(settings: RenderSettings) -> anyhow::Result<Self> {
		let device: Rc<dyn Device> = Rc::new(GlDevice::new()?);
		let rasterizer = Rasterizer::new(device, &settings);

		let cube = Rc::new(MeshObject::new("Cube"));

		let mut array_bucket = DisplayArrayBucket::new(cube.clone(), cube_array());
		array_bucket.set_use_display_list(settings.display_lists);

		for x in -1..=1 {
			let transform = Mat4::from_translation(Vec3::new(x as f32 * 2.5, 0.0, 0.0));
			let slot = array_bucket.add_slot(MeshSlot::new(transform));
			array_bucket.slot_mut(slot).color = Vec4::new(0.5 + x as f32 * 0.25, 0.6, 0.8, 1.0);
		}

		let mut material_bucket = MaterialBucket::new(PolyMaterial::new("VertexColor")
			.with_texcos(vec![TexCoGen::Uv]));
		material_bucket.add_display_array(array_bucket);

		let mut buckets = BucketManager::new();
		buckets.add_bucket(material_bucket);

		unsafe {
			gl::Enable(gl::DEPTH_TEST);
		}

		Ok(Viewer {
			rasterizer,
			buckets,
			cube,

			aspect: 1.0,
			time: 0.0,
		})
	}

	// Value-only change, storage is refreshed rather than rebuilt.
	fn pulse_colors(&mut self) {
		let brightness = (self.time * 2.0).sin() * 0.25 + 0.75;
		let array = self.buckets.bucket_mut(0).display_array_mut(0).array_mut();

		for (index, vertex) in array.vertices_mut().iter_mut().enumerate() {
			let face = FACE_COLORS[index / 4];
			vertex.set_rgba(face.map(|c| (c as f32 * brightness) as u8));
		}

		self.cube.append_modified_flag(ModifiedFlags::COLORS);
	}
}

impl main_loop::MainLoop for Viewer {
	fn resize(&mut self, width: u32, height: u32) {
		self.aspect = width as f32 / height.max(1) as f32;

		unsafe {
			gl::Viewport(0, 0, width as i32, height as i32);
		}
	}

	fn present(&mut self) {
		self.time += 1.0/60.0;

		unsafe {
			gl::ClearColor(0.1, 0.1, 0.15, 1.0);
			gl::Clear(gl::COLOR_BUFFER_BIT|gl::DEPTH_BUFFER_BIT);
		}

		self.pulse_colors();

		let projection = Mat4::perspective_rh_gl(PI/3.0, self.aspect, 0.01, 100.0);
		let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -8.0))
			* Mat4::from_rotation_x(0.4)
			* Mat4::from_rotation_y(self.time);

		self.rasterizer.set_projection_matrix(&projection);
		self.rasterizer.set_view_matrix(view, 1);
		self.rasterizer.set_time(self.time as f64);

		if let Err(err) = self.rasterizer.render_buckets(&mut self.buckets) {
			log::error!("Failed to render frame: {err}");
		}
	}
}



const FACE_COLORS: [[u8; 4]; 6] = [
	[255, 80, 80, 255],
	[80, 255, 80, 255],
	[80, 80, 255, 255],
	[255, 255, 80, 255],
	[80, 255, 255, 255],
	[255, 80, 255, 255],
];

fn cube_array() -> DisplayArray {
	let faces = [Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
	let corners = [Vec2::new(-1.0, -1.0), Vec2::new(1.0, -1.0), Vec2::new(1.0, 1.0), Vec2::new(-1.0, 1.0)];

	let mut vertices = Vec::with_capacity(24);
	let mut indices = Vec::with_capacity(36);

	for (face, normal) in faces.into_iter().enumerate() {
		let up = if normal.y.abs() > 0.5 { Vec3::Z } else { Vec3::Y };
		let right = up.cross(normal);
		let base = vertices.len() as u32;

		for corner in corners {
			let position = (normal + right * corner.x + up * corner.y) * 0.5;
			let uv = corner * 0.5 + Vec2::splat(0.5);
			vertices.push(TexVert::new(position, normal, right.extend(1.0), FACE_COLORS[face], &[uv]));
		}

		indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
	}

	DisplayArray::new(vertices, indices)
}
