// Browser side of the particle background: owns the canvas renderer, the
// requestAnimationFrame callback and the window resize listener.

use crate::config::FieldConfig;
use crate::error::{describe, BackgroundError};
use crate::field::ParticleField;
use crate::lifecycle::{FrameLoop, FrameScheduler};
use crate::renderer::CanvasRenderer;
use crate::Timer;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, Window};

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

pub struct BrowserScheduler {
    window: Window,
    callback: FrameCallback,
}

impl FrameScheduler for BrowserScheduler {
    type Handle = i32;

    fn request_frame(&mut self) -> Result<i32, BackgroundError> {
        let slot = self.callback.borrow();
        let callback = slot
            .as_ref()
            .ok_or_else(|| BackgroundError::Schedule("frame callback released".to_owned()))?;
        let function: &js_sys::Function = callback.as_ref().unchecked_ref();
        self.window
            .request_animation_frame(function)
            .map_err(|e| BackgroundError::Schedule(describe(&e)))
    }

    fn cancel_frame(&mut self, handle: i32) {
        if let Err(e) = self.window.cancel_animation_frame(handle) {
            log::warn!("failed to cancel frame {}: {}", handle, describe(&e));
        }
    }
}

struct Animation {
    field: ParticleField,
    renderer: CanvasRenderer,
    frames: FrameLoop<BrowserScheduler>,
}

impl Animation {
    // Full reset: the canvas takes the viewport size and every particle is
    // replaced.
    fn fit_to_window(&mut self, window: &Window) -> Result<(), BackgroundError> {
        let _timer = Timer::new("ParticleBackground::fit_to_window");
        let (width, height) = viewport(window)?;
        self.renderer.fit_to(width, height);
        self.field
            .resize(width as f64, height as f64, &mut rand::thread_rng());
        log::debug!(
            "spawned {} particles for a {}x{} viewport",
            self.field.particles().len(),
            width,
            height
        );
        Ok(())
    }

    fn draw_frame(&mut self) {
        if let Err(e) = self
            .field
            .tick(&mut rand::thread_rng(), &mut self.renderer)
        {
            log::warn!("particle frame failed: {}", e);
        }
    }

    fn on_frame(&mut self) {
        if !self.frames.frame_fired() {
            return;
        }
        self.draw_frame();
        if let Err(e) = self.frames.schedule_next() {
            log::warn!("particle animation stalled: {}", e);
        }
    }
}

fn viewport(window: &Window) -> Result<(u32, u32), BackgroundError> {
    let width = window
        .inner_width()
        .map_err(|e| BackgroundError::Viewport(describe(&e)))?;
    let height = window
        .inner_height()
        .map_err(|e| BackgroundError::Viewport(describe(&e)))?;
    Ok((pixels("innerWidth", &width), pixels("innerHeight", &height)))
}

// Anything that is not a number counts as an empty viewport.
fn pixels(name: &str, value: &JsValue) -> u32 {
    match value.as_f64() {
        Some(n) => n.max(0.0) as u32,
        None => {
            log::debug!("{} is not a number ({}), using 0", name, describe(value));
            0
        }
    }
}

struct Mounted {
    window: Window,
    animation: Rc<RefCell<Animation>>,
    frame_callback: FrameCallback,
    on_resize: Closure<dyn FnMut()>,
}

impl Mounted {
    fn start(canvas: HtmlCanvasElement, config: FieldConfig) -> Result<Mounted, BackgroundError> {
        config.validate()?;
        let window = web_sys::window().ok_or(BackgroundError::NoWindow)?;
        let renderer = CanvasRenderer::new(canvas, &config)?;
        renderer.pin_behind_content()?;

        let frame_callback: FrameCallback = Rc::new(RefCell::new(None));
        let scheduler = BrowserScheduler {
            window: window.clone(),
            callback: frame_callback.clone(),
        };
        let animation = Rc::new(RefCell::new(Animation {
            field: ParticleField::new(config),
            renderer,
            frames: FrameLoop::new(scheduler),
        }));
        animation.borrow_mut().fit_to_window(&window)?;

        {
            let animation = animation.clone();
            *frame_callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
                animation.borrow_mut().on_frame();
            }) as Box<dyn FnMut()>));
        }

        let on_resize = {
            let animation = animation.clone();
            let window = window.clone();
            Closure::wrap(Box::new(move || {
                if let Err(e) = animation.borrow_mut().fit_to_window(&window) {
                    log::warn!("particle background resize failed: {}", e);
                }
            }) as Box<dyn FnMut()>)
        };
        let resize_fn: &js_sys::Function = on_resize.as_ref().unchecked_ref();
        if let Err(e) = window.add_event_listener_with_callback("resize", resize_fn) {
            frame_callback.borrow_mut().take();
            return Err(BackgroundError::Listener(describe(&e)));
        }

        let mounted = Mounted {
            window,
            animation,
            frame_callback,
            on_resize,
        };

        // The first frame is drawn right away; later ones come from the
        // scheduler.
        let started = {
            let mut animation = mounted.animation.borrow_mut();
            animation.draw_frame();
            animation.frames.mount()
        };
        if let Err(e) = started {
            mounted.stop();
            return Err(e);
        }
        Ok(mounted)
    }

    fn is_running(&self) -> bool {
        self.animation.borrow().frames.is_running()
    }

    fn stop(self) {
        let resize_fn: &js_sys::Function = self.on_resize.as_ref().unchecked_ref();
        if let Err(e) = self
            .window
            .remove_event_listener_with_callback("resize", resize_fn)
        {
            log::warn!("failed to remove resize listener: {}", describe(&e));
        }
        self.animation.borrow_mut().frames.unmount();
        // The frame closure holds the animation, which holds the scheduler,
        // which holds the closure. Dropping it here breaks that cycle.
        self.frame_callback.borrow_mut().take();
    }
}

/// Animated glyph background drawn on a caller-supplied canvas.
///
/// A handle whose mount failed is inert: it draws nothing and unmounting it
/// does nothing.
#[wasm_bindgen]
pub struct ParticleBackground {
    mounted: Option<Mounted>,
}

#[wasm_bindgen]
impl ParticleBackground {
    pub fn mount(canvas: HtmlCanvasElement) -> ParticleBackground {
        ParticleBackground::mount_with_config(canvas, FieldConfig::default())
    }

    pub fn mount_with_config(canvas: HtmlCanvasElement, config: FieldConfig) -> ParticleBackground {
        match Mounted::start(canvas, config) {
            Ok(mounted) => ParticleBackground {
                mounted: Some(mounted),
            },
            Err(e) => {
                log::warn!("particle background disabled: {}", e);
                ParticleBackground { mounted: None }
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.mounted.as_ref().map_or(false, Mounted::is_running)
    }

    pub fn particle_count(&self) -> usize {
        self.mounted
            .as_ref()
            .map_or(0, |m| m.animation.borrow().field.particles().len())
    }

    pub fn unmount(&mut self) {
        if let Some(mounted) = self.mounted.take() {
            mounted.stop();
            log::debug!("particle background unmounted");
        }
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}
