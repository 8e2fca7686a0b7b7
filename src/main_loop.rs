use gl_rasterizer::settings::WindowSettings;
use glutin::config::{ConfigTemplateBuilder, GlConfig};
use glutin::context::{ContextApi, ContextAttributesBuilder, GlProfile, Version};
use glutin::display::{GetGlDisplay, GlDisplay};
use glutin::prelude::*;
use glutin_winit::{DisplayBuilder, GlWindow};
use raw_window_handle::HasRawWindowHandle;
use std::ffi::CString;
use std::num::NonZeroU32;
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;


pub trait MainLoop {
	fn present(&mut self);
	fn resize(&mut self, _width: u32, _height: u32) {}
}


pub fn run<F, M>(settings: &WindowSettings, start_main_loop: F) -> anyhow::Result<()>
	where F: FnOnce() -> anyhow::Result<M>
		, M: MainLoop + 'static
{
	let event_loop = EventLoop::new();

	let window_builder = WindowBuilder::new()
		.with_title(&settings.title)
		.with_inner_size(LogicalSize::new(settings.width, settings.height));

	let template = ConfigTemplateBuilder::new()
		.with_depth_size(24);

	let (window, gl_config) = DisplayBuilder::new()
		.with_window_builder(Some(window_builder))
		.build(&event_loop, template, |configs| {
			configs.max_by_key(|config| config.num_samples())
				.expect("display offered no GL configs")
		})
		.map_err(|err| anyhow::anyhow!("Failed to create display: {err}"))?;

	let window = window.ok_or_else(|| anyhow::anyhow!("Failed to create window"))?;
	let gl_display = gl_config.display();

	// Client arrays and display lists only exist in the compatibility profile.
	let context_attributes = ContextAttributesBuilder::new()
		.with_profile(GlProfile::Compatibility)
		.with_context_api(ContextApi::OpenGl(Some(Version::new(2, 1))))
		.build(Some(window.raw_window_handle()));

	let surface_attributes = window.build_surface_attributes(Default::default());

	let (gl_surface, gl_context) = unsafe {
		let context = gl_display.create_context(&gl_config, &context_attributes)?;
		let surface = gl_display.create_window_surface(&gl_config, &surface_attributes)?;
		let context = context.make_current(&surface)?;
		(surface, context)
	};

	gl::load_with(|symbol| match CString::new(symbol) {
		Ok(symbol) => gl_display.get_proc_address(&symbol),
		Err(_) => std::ptr::null(),
	});

	let mut main_loop = start_main_loop()?;

	let size = window.inner_size();
	main_loop.resize(size.width, size.height);

	event_loop.run(move |event, _, control_flow| {
		*control_flow = ControlFlow::Poll;

		match event {
			Event::WindowEvent { event: WindowEvent::CloseRequested, .. } => {
				*control_flow = ControlFlow::Exit;
			}

			Event::WindowEvent { event: WindowEvent::Resized(size), .. } => {
				if let (Some(width), Some(height)) = (NonZeroU32::new(size.width), NonZeroU32::new(size.height)) {
					gl_surface.resize(&gl_context, width, height);
					main_loop.resize(size.width, size.height);
				}
			}

			Event::MainEventsCleared => {
				window.request_redraw();
			}

			Event::RedrawRequested(_) => {
				main_loop.present();

				if let Err(err) = gl_surface.swap_buffers(&gl_context) {
					log::error!("swap_buffers failed: {err}");
					*control_flow = ControlFlow::Exit;
				}
			}

			_ => {}
		}
	})
}
