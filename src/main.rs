//! Trash Toss entry point
//!
//! Handles platform-specific initialization and runs the demo loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_app {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, MouseEvent, TouchEvent};

    use glam::Vec2;
    use trash_toss::Settings;
    use trash_toss::consts::*;
    use trash_toss::renderer::SdfRenderState;
    use trash_toss::sim::{DragInput, GesturePhase, SceneState, apply_drag, tick};

    /// App instance holding all state
    struct App {
        scene: SceneState,
        settings: Settings,
        render_state: Option<SdfRenderState>,
        accumulator: f32,
        last_time: f64,
        // Pointer tracking for the drag gesture
        pointer_down: bool,
        press_origin: Vec2,
        last_translation: Vec2,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl App {
        fn new(seed: u64, width: f32, height: f32) -> Self {
            Self {
                scene: SceneState::new(seed, width, height),
                settings: Settings::load(),
                render_state: None,
                accumulator: 0.0,
                last_time: 0.0,
                pointer_down: false,
                press_origin: Vec2::ZERO,
                last_translation: Vec2::ZERO,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Pointer pressed. The gesture belongs to the ball, so only a press
        /// landing on its frame starts a drag.
        fn pointer_began(&mut self, pos: Vec2) {
            if !self.scene.ball.frame().contains_point(pos) {
                return;
            }
            self.pointer_down = true;
            self.press_origin = pos;
            self.last_translation = Vec2::ZERO;
            apply_drag(
                &mut self.scene,
                &DragInput::new(GesturePhase::Began, Vec2::ZERO),
            );
        }

        fn pointer_moved(&mut self, pos: Vec2) {
            if !self.pointer_down {
                return;
            }
            self.last_translation = pos - self.press_origin;
            apply_drag(
                &mut self.scene,
                &DragInput::new(GesturePhase::Changed, self.last_translation),
            );
        }

        /// Pointer released. Touch end events carry no position; reuse the
        /// last reported translation in that case.
        fn pointer_ended(&mut self, pos: Option<Vec2>) {
            if !self.pointer_down {
                return;
            }
            self.pointer_down = false;
            if let Some(pos) = pos {
                self.last_translation = pos - self.press_origin;
            }
            apply_drag(
                &mut self.scene,
                &DragInput::new(GesturePhase::Ended, self.last_translation),
            );
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                tick(&mut self.scene, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.scene, &self.settings, time) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }

        /// Update HUD elements in the DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.query_selector("#hud-trashed .hud-value").ok().flatten() {
                el.set_text_content(Some(&self.scene.trashed.to_string()));
            }

            if let Some(el) = document.query_selector("#hud-mode .hud-value").ok().flatten() {
                el.set_text_content(Some(self.scene.ball.position.mode_label()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    let _ = el.set_attribute("class", "hud-item");
                    if let Some(val) = document.query_selector("#hud-fps .hud-value").ok().flatten()
                    {
                        val.set_text_content(Some(&self.fps.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Trash Toss starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        let width = (client_w as f64 * dpr) as u32;
        let height = (client_h as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // Initialize the scene
        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App::new(
            seed,
            client_w as f32,
            client_h as f32,
        )));

        log::info!("Scene initialized with seed: {}", seed);

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            SdfRenderState::new(surface, &adapter, width, height, dpr as f32).await;
        app.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, app.clone());

        request_animation_frame(app);

        log::info!("Trash Toss running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse down - may begin a drag if it lands on the ball
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                app.borrow_mut().pointer_began(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let pos = Vec2::new(event.offset_x() as f32, event.offset_y() as f32);
                app.borrow_mut().pointer_moved(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse up - anywhere in the window, so drags ending off-canvas still release
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let window = web_sys::window().unwrap();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let rect = canvas_clone.get_bounding_client_rect();
                let pos = Vec2::new(
                    event.client_x() as f32 - rect.left() as f32,
                    event.client_y() as f32 - rect.top() as f32,
                );
                app.borrow_mut().pointer_ended(Some(pos));
            });
            let _ = window
                .add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let pos = Vec2::new(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                    app.borrow_mut().pointer_began(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    let rect = canvas_clone.get_bounding_client_rect();
                    let pos = Vec2::new(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    );
                    app.borrow_mut().pointer_moved(pos);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch end
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let pos = event.changed_touches().get(0).map(|touch| {
                    let rect = canvas_clone.get_bounding_client_rect();
                    Vec2::new(
                        touch.client_x() as f32 - rect.left() as f32,
                        touch.client_y() as f32 - rect.top() as f32,
                    )
                });
                app.borrow_mut().pointer_ended(pos);
            });
            let _ = canvas
                .add_event_listener_with_callback("touchend", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            app_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn app_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut a = app.borrow_mut();

            let dt = if a.last_time > 0.0 {
                ((time - a.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            a.last_time = time;

            a.update(dt, time);
            a.render(time);
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_app::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Trash Toss (native) starting...");
    log::info!("Native mode has no window - run with `trunk serve` for the web version");

    // Run a scripted drag
    println!("\nRunning scripted drag...");
    run_scripted_drag();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn run_scripted_drag() {
    use glam::Vec2;
    use trash_toss::consts::{BALL_SIZE, SIM_DT};
    use trash_toss::sim::{DragInput, GesturePhase, SceneState, apply_drag, tick};

    let mut scene = SceneState::new(7, 390.0, 844.0);
    let first_id = scene.ball.id;

    // aim for the middle of the can's accept window, well above the can
    let zone = scene.trash_can;
    let frame_x = (zone.min_x() * 1.05 + (zone.min_x() + zone.width() * 0.95 - BALL_SIZE)) / 2.0;
    let target = Vec2::new(frame_x + BALL_SIZE / 2.0, zone.min_y() - 40.0);
    let translation = target - scene.ball.center;

    apply_drag(&mut scene, &DragInput::new(GesturePhase::Began, Vec2::ZERO));
    apply_drag(
        &mut scene,
        &DragInput::new(GesturePhase::Changed, translation),
    );
    apply_drag(&mut scene, &DragInput::new(GesturePhase::Ended, translation));

    // settle for the full animation duration
    for _ in 0..90 {
        tick(&mut scene, SIM_DT);
    }

    assert_ne!(scene.ball.id, first_id, "Ball should have been trashed");
    assert_eq!(scene.trashed, 1);
    println!("✓ Ball trashed and a fresh one respawned at the start anchor");
}
