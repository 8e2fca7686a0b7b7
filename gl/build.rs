
use gl_generator::{Registry, Api, Profile, Fallbacks, GlobalGenerator};
use std::env;
use std::fs::File;
use std::path::Path;

fn main() {
	let dest = env::var("OUT_DIR").unwrap();
	let mut file = File::create(&Path::new(&dest).join("gl_bindings.rs")).unwrap();

	// Client arrays and display lists only exist in the compatibility profile.
	Registry::new(Api::Gl, (2, 1), Profile::Compatibility, Fallbacks::All, ["GL_ARB_multitexture", "GL_ARB_vertex_program"])
		.write_bindings(GlobalGenerator, &mut file)
		.unwrap();
}
