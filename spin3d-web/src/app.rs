//! Wiring: DOM events and the animation frame both go through one
//! `Rc<RefCell<App>>`.

use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::{closure::Closure, JsCast, JsValue};
use web_sys::{window, EventTarget, HtmlCanvasElement, WebGl2RenderingContext as GL};
use spin3d_core::{Camera, ControlPanel, SceneConfig, SceneHost, ShapeKind};

use crate::controls::ControlWidgets;
use crate::gl::Pipeline;
use crate::markup;

struct App {
    panel: ControlPanel,
    scene: SceneHost,
    camera: Camera,
    gl: GL,
    canvas: HtmlCanvasElement,
    pipeline: Pipeline,
    widgets: ControlWidgets,
    last_frame_ms: Option<f64>,
}

impl App {
    /// Apply a panel change to the scene and the DOM right away.
    fn handle(&mut self, change: impl FnOnce(&mut ControlPanel)) {
        change(&mut self.panel);
        self.scene.apply(&self.panel);
        self.widgets.refresh(&self.panel);
    }

    /// Match the canvas and viewport to the window.
    fn fit_canvas(&mut self) {
        let Some(win) = window() else { return };
        let size = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(1.0) as u32;
        let (w, h) = (size(win.inner_width()), size(win.inner_height()));
        if self.canvas.width() != w || self.canvas.height() != h {
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.gl.viewport(0, 0, w as i32, h as i32);
            self.camera.aspect = w as f32 / h.max(1) as f32;
            log::debug!("canvas resized to {}x{}", w, h);
        }
    }

    fn frame(&mut self, now_ms: f64) {
        let delta = match self.last_frame_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => 0.0,
        };
        self.last_frame_ms = Some(now_ms);

        self.fit_canvas();
        self.scene.frame(&self.panel, delta);
        self.pipeline.draw(&self.gl, &self.scene, &self.camera);
    }
}

fn listen(
    target: &EventTarget,
    event: &str,
    app: &Rc<RefCell<App>>,
    change: impl Fn(&mut App) + 'static,
) -> Result<(), JsValue> {
    let app = app.clone();
    let closure = Closure::wrap(Box::new(move || {
        change(&mut app.borrow_mut());
    }) as Box<dyn FnMut()>);
    target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
    closure.forget();
    Ok(())
}

fn wire_group(app: &Rc<RefCell<App>>, index: usize) -> Result<(), JsValue> {
    let (kind, toggle, slider, field) = {
        let app = app.borrow();
        let group = &app.widgets.groups[index];
        (group.kind, group.toggle.clone(), group.slider.clone(), group.field.clone())
    };

    listen(&toggle, "click", app, move |app| app.handle(|panel| panel.toggle(kind)))?;

    let input = slider.clone();
    listen(&slider, "input", app, move |app| {
        let value = input.value_as_number();
        app.handle(|panel| panel.slide(kind, value));
    })?;

    let input = field.clone();
    listen(&field, "input", app, move |app| {
        let text = input.value();
        app.handle(|panel| panel.edit_field(kind, &text));
    })?;

    listen(&field, "blur", app, move |app| app.handle(|panel| panel.blur_field(kind)))?;
    Ok(())
}

/// Build the page and start the animation loop.
pub fn launch() -> Result<(), JsValue> {
    let win = window().ok_or("no global window")?;
    let document = win.document().ok_or("window has no document")?;
    let body = document.body().ok_or("document has no body")?;

    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    canvas.set_id(markup::CANVAS_ID);
    canvas.style().set_css_text(markup::CANVAS_STYLE);
    body.append_child(&canvas)?;

    let gl: GL = canvas
        .get_context("webgl2")?
        .ok_or("WebGL2 not supported")?
        .dyn_into()?;

    let config = SceneConfig::default();
    let panel = ControlPanel::new();
    let scene = SceneHost::new(&config, &panel);
    let pipeline = Pipeline::new(&gl, &scene)?;
    let widgets = ControlWidgets::build(&document, &body, &panel)?;

    let app = Rc::new(RefCell::new(App {
        panel,
        scene,
        camera: config.camera.clone(),
        gl,
        canvas,
        pipeline,
        widgets,
        last_frame_ms: None,
    }));
    app.borrow_mut().fit_canvas();

    for index in 0..ShapeKind::ALL.len() {
        wire_group(&app, index)?;
    }

    // ---------- Animation loop ----------
    // `f` holds the frame closure so it can schedule itself again.
    let f: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |now_ms: f64| {
        app.borrow_mut().frame(now_ms);

        let Some(win) = window() else { return };
        if let Some(callback) = f.borrow().as_ref() {
            if let Err(err) = win.request_animation_frame(callback.as_ref().unchecked_ref()) {
                log::error!("requestAnimationFrame failed: {:?}", err);
            }
        }
    }) as Box<dyn FnMut(f64)>));

    if let Some(callback) = g.borrow().as_ref() {
        win.request_animation_frame(callback.as_ref().unchecked_ref())?;
    }
    Ok(())
}
