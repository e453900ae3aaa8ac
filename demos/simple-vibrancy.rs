fn main() {
	let event_loop = winit::event_loop::EventLoop::new();
	let window = winit::window::WindowBuilder::new()
		.with_resizable(true)
		.with_decorations(true)
		.with_transparent(true)
		.with_inner_size(winit::dpi::PhysicalSize::new(800, 600))
		.build(&event_loop).unwrap();

	let options = vibrancy_wrapper::VibrancyOptions {
		theme: Some(vibrancy_wrapper::Theme::Dark),
		..Default::default()
	};
	if let Err(what) = vibrancy_wrapper::apply_options(&window, &options, true) {
		eprintln!("could not enable vibrancy ({}): {}", what.code(), what);
	}

	event_loop.run(move |event, _, flow| {
		*flow = winit::event_loop::ControlFlow::Wait;
		match event {
			winit::event::Event::WindowEvent { window_id, event }
			if window_id == window.id() => match event {

				winit::event::WindowEvent::CloseRequested => {
					let _ = vibrancy_wrapper::disable_vibrancy(&window);
					*flow = winit::event_loop::ControlFlow::Exit
				},
				_ => {}
			},
			_ => {}
		}
	})
}
