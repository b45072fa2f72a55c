//! Court Scene entry point
//!
//! On the web this builds the court, sets up WebGPU and runs the frame loop.
//! The native binary builds the same layout and prints it as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_scene {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent, WheelEvent};

    use court_scene::controls::{DragMode, OrbitControls};
    use court_scene::platform::web::{self, ImageEvent, ImageQueue};
    use court_scene::renderer::SceneRenderer;
    use court_scene::textures::BallTextures;
    use court_scene::{CourtLayout, SceneError, SceneGraph, Settings};

    /// Everything the DOM callbacks and the frame loop share
    struct App {
        controls: OrbitControls,
        renderer: SceneRenderer,
        textures: BallTextures,
        images: ImageQueue,
        canvas: HtmlCanvasElement,
        stored: Settings,
    }

    impl App {
        /// Apply finished image loads to the ball
        fn drain_images(&mut self) {
            let events: Vec<ImageEvent> = self.images.borrow_mut().drain(..).collect();
            for event in events {
                match event {
                    ImageEvent::Loaded(map, image) => {
                        if self.textures.mark_loaded(map) {
                            self.renderer.upload_ball_map(map, &image);
                        }
                    }
                    ImageEvent::Failed(map, reason) => {
                        self.textures.mark_failed(map, reason);
                    }
                }
            }
        }

        fn render(&mut self) {
            match self.renderer.render(&self.controls) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let (w, h) = self.renderer.size;
                    self.renderer.resize(w, h);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Keyboard input; the orbit toggle is remembered for the next visit
        fn key_down(&mut self, key: &str) {
            if self.controls.handle_key(key) {
                self.stored.orbit_on_start = self.controls.enabled;
                self.stored.save();
            }
        }

        fn resize(&mut self, width: u32, height: u32) {
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            self.renderer.resize(width, height);
        }

        /// Viewport height in CSS pixels, the unit pointer events report
        fn viewport_height(&self) -> f32 {
            self.canvas.client_height() as f32
        }
    }

    pub async fn run() -> Result<(), SceneError> {
        log::info!("Court scene starting...");

        let window = web::window()?;
        let document = web::document(&window)?;

        // Query overrides apply to this visit only; `stored` is what gets saved back
        let stored = Settings::load();
        let mut settings = stored.clone();
        settings.apply_query(&web::query_string(&window));
        log::info!(
            "Color policy: {}, exposure: {}",
            settings.color_policy.as_str(),
            settings.exposure
        );

        let layout = CourtLayout::build();
        let mut scene = SceneGraph::new(settings.color_policy);
        let handles = layout.register(&mut scene);
        log::info!("Registered {} primitives", handles.len());

        let canvas = web::create_canvas(&window, &document)?;
        if settings.show_instructions {
            web::show_instructions(&document)?;
        }

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });
        let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let renderer = SceneRenderer::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            &scene,
            settings.exposure,
        )
        .await?;

        let mut controls = OrbitControls::default();
        controls.enabled = settings.orbit_on_start;

        let textures = BallTextures::new(settings.texture_path.clone());
        let images: ImageQueue = Rc::new(RefCell::new(Vec::new()));
        web::load_ball_maps(&textures, &images)?;

        let app = Rc::new(RefCell::new(App {
            controls,
            renderer,
            textures,
            images,
            canvas: canvas.clone(),
            stored,
        }));

        setup_input_handlers(&window, &canvas, app.clone());
        request_animation_frame(app);

        log::info!("Court scene running!");
        Ok(())
    }

    fn setup_input_handlers(window: &web_sys::Window, canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Keyboard
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                app.borrow_mut().key_down(&event.key());
            });
            let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer down: left button rotates, right button pans
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                if let Some(mode) = DragMode::from_button(event.button()) {
                    let _ = canvas_clone.set_pointer_capture(event.pointer_id());
                    app.borrow_mut().controls.pointer_down(
                        mode,
                        event.client_x() as f32,
                        event.client_y() as f32,
                    );
                }
            });
            let _ = canvas.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                let mut a = app.borrow_mut();
                let height = a.viewport_height();
                a.controls
                    .pointer_move(event.client_x() as f32, event.client_y() as f32, height);
            });
            let _ = canvas.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Pointer up / cancel
        for name in ["pointerup", "pointercancel"] {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                app.borrow_mut().controls.pointer_up();
            });
            let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Wheel zoom
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: WheelEvent| {
                event.prevent_default();
                app.borrow_mut().controls.wheel(event.delta_y() as f32);
            });
            let _ = canvas.add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Right-drag pans, so keep the context menu away
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::Event| {
                event.prevent_default();
            });
            let _ = canvas.add_event_listener_with_callback("contextmenu", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window resize
        {
            let window_clone = window.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let (width, height) = web::window_pixel_size(&window_clone);
                app.borrow_mut().resize(width, height);
            });
            let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            log::error!("Window went away; stopping frame loop");
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            frame(app);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn frame(app: Rc<RefCell<App>>) {
        {
            let mut a = app.borrow_mut();
            a.drain_images();
            a.render();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    console_error_panic_hook::set_once();
    if let Err(e) = console_log::init_with_level(log::Level::Info) {
        web_sys::console::error_1(&format!("Failed to init logger: {e}").into());
    }

    if let Err(e) = wasm_scene::run().await {
        log::error!("Court scene failed to start: {e}");
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use court_scene::scene::SceneSink;
    use court_scene::{CourtLayout, SceneGraph, Settings};

    env_logger::init();
    log::info!("Court scene (native) starting...");
    log::info!("Native mode prints the layout - run with `trunk serve` for the web version");

    let settings = Settings::load();
    let layout = CourtLayout::build();
    let mut scene = SceneGraph::new(settings.color_policy);
    let handles = layout.register(&mut scene as &mut dyn SceneSink);
    log::info!(
        "Registered {} primitives under color policy {}",
        handles.len(),
        scene.policy().as_str()
    );

    match serde_json::to_string_pretty(&layout) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize layout: {e}"),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
