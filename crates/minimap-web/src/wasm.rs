#![forbid(unsafe_code)]

use crate::bindings::{DomTarget, dom_bindings};
use crate::canvas::CanvasSurface;
use crate::options::config_from_json;
use crate::pointer::{pointer_y, row_from_js};
use js_sys::{Array, Function, Object, Reflect};
use minimap::{EditorHost, Minimap, PointerEvent, PointerPhase, PointerTarget};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{EventTarget, HtmlCanvasElement, MouseEvent};

type SharedMinimap = Rc<RefCell<Minimap<CanvasSurface, JsEditor>>>;

fn to_js(err: impl fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn busy() -> JsValue {
    JsValue::from_str("minimap is handling another event")
}

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn call_method(target: &JsValue, method: &str, args: &Array) -> Result<JsValue, JsValue> {
    let func = Reflect::get(target, &JsValue::from_str(method))?.dyn_into::<Function>()?;
    func.apply(target, args)
}

/// The JS editor object, plus the lines it reported at the last refresh.
struct JsEditor {
    handle: JsValue,
    lines: Vec<String>,
}

impl JsEditor {
    fn new(handle: JsValue) -> Self {
        let mut editor = Self {
            handle,
            lines: Vec::new(),
        };
        editor.lines = editor.read_lines();
        editor
    }

    fn number(&self, method: &str) -> usize {
        row_from_js(
            call_method(&self.handle, method, &Array::new())
                .ok()
                .and_then(|v| v.as_f64()),
        )
    }

    fn read_lines(&self) -> Vec<String> {
        let Ok(value) = call_method(&self.handle, "lines", &Array::new()) else {
            return Vec::new();
        };
        Array::from(&value)
            .iter()
            .map(|line| line.as_string().unwrap_or_default())
            .collect()
    }
}

impl EditorHost for JsEditor {
    type Session = Vec<String>;

    fn visible_row_count(&self) -> usize {
        self.number("visibleRowCount")
    }

    fn first_visible_row(&self) -> usize {
        self.number("firstVisibleRow")
    }

    fn scroll_to_line(&mut self, line: usize) {
        let args = Array::of1(&JsValue::from_f64(line as f64));
        if let Err(err) = call_method(&self.handle, "scrollToLine", &args) {
            console_error(&format!("minimap: scrollToLine({line}) failed: {err:?}"));
        }
    }

    fn session(&self) -> &Vec<String> {
        &self.lines
    }
}

struct DomListener {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(MouseEvent)>,
}

/// Minimap attached to a `<canvas>` and a JS editor.
///
/// Pointer listeners are registered on construction and removed by
/// `destroy()`. Events that arrive while the minimap is already handling one
/// (for example a scroll notification fired synchronously from
/// `scrollToLine`) are dropped.
#[wasm_bindgen]
pub struct MinimapWeb {
    shared: SharedMinimap,
    editor: JsValue,
    dom: Vec<DomListener>,
    scroll_listener: Option<Closure<dyn FnMut()>>,
}

#[wasm_bindgen]
impl MinimapWeb {
    /// Attach to `canvas`, reading `editor` through the `MinimapEditor`
    /// contract. `options` is an optional JSON config object.
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: HtmlCanvasElement,
        editor: JsValue,
        options: Option<String>,
    ) -> Result<MinimapWeb, JsValue> {
        let config = config_from_json(options.as_deref()).map_err(to_js)?;
        let surface = CanvasSurface::new(canvas.clone())?;
        let map = Minimap::with_config(JsEditor::new(editor.clone()), surface, config)
            .map_err(to_js)?;
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let listeners = map.listeners();

        let mut web = Self {
            shared: Rc::new(RefCell::new(map)),
            editor,
            dom: Vec::new(),
            scroll_listener: None,
        };
        for binding in dom_bindings(listeners) {
            match binding.target {
                DomTarget::Canvas => web.listen(canvas.clone().into(), binding.event, &canvas)?,
                DomTarget::Document => {
                    web.listen(document.clone().into(), binding.event, &canvas)?;
                }
                DomTarget::Editor => web.subscribe_scroll()?,
            }
        }
        Ok(web)
    }

    /// Resize the canvas and rebuild the visor.
    pub fn resize(&self, width: u32, height: u32) -> Result<(), JsValue> {
        let mut map = self.shared.try_borrow_mut().map_err(|_| busy())?;
        map.resize(width, height).map_err(to_js)?;
        Ok(())
    }

    /// Re-read the editor's lines and re-rasterize.
    #[wasm_bindgen(js_name = updateSource)]
    pub fn update_source(&self) -> Result<(), JsValue> {
        let mut map = self.shared.try_borrow_mut().map_err(|_| busy())?;
        let lines = map.editor().read_lines();
        map.editor_mut().lines = lines;
        map.refresh_source().map_err(to_js)?;
        Ok(())
    }

    /// Sync the visor to the editor's scroll position.
    #[wasm_bindgen(js_name = onHostScroll)]
    pub fn on_host_scroll(&self) -> Result<(), JsValue> {
        let mut map = self.shared.try_borrow_mut().map_err(|_| busy())?;
        map.on_host_scroll().map_err(to_js)?;
        Ok(())
    }

    #[wasm_bindgen(js_name = visorTop)]
    pub fn visor_top(&self) -> f64 {
        self.shared.borrow().visor_top()
    }

    pub fn normal(&self) -> f64 {
        self.shared.borrow().normal()
    }

    /// The most recent frame report as one JSON line.
    #[wasm_bindgen(js_name = lastFrameJson)]
    pub fn last_frame_json(&self) -> Option<String> {
        self.shared
            .borrow()
            .last_frame()
            .and_then(|frame| frame.to_jsonl().ok())
    }

    /// Detach every listener, release the bitmap, and clear the canvas.
    /// Calling it again does nothing. Fails without detaching anything when
    /// called from inside one of the minimap's own callbacks.
    pub fn destroy(&mut self) -> Result<(), JsValue> {
        let mut map = self.shared.try_borrow_mut().map_err(|_| busy())?;
        for listener in self.dom.drain(..) {
            if let Err(err) = listener.target.remove_event_listener_with_callback(
                listener.event,
                listener.callback.as_ref().unchecked_ref(),
            ) {
                console_error(&format!(
                    "minimap: removing {} listener failed: {err:?}",
                    listener.event
                ));
            }
        }
        if let Some(callback) = self.scroll_listener.take() {
            if let Err(err) = call_method(
                &self.editor,
                "removeScrollListener",
                &Array::of1(callback.as_ref()),
            ) {
                console_error(&format!("minimap: removeScrollListener failed: {err:?}"));
            }
        }
        map.destroy();
        Ok(())
    }
}

impl MinimapWeb {
    fn listen(
        &mut self,
        target: EventTarget,
        event: &'static str,
        canvas: &HtmlCanvasElement,
    ) -> Result<(), JsValue> {
        let phase = match event {
            "mousedown" => PointerPhase::Press,
            "mousemove" => PointerPhase::Move,
            _ => PointerPhase::Release,
        };
        let shared = Rc::clone(&self.shared);
        let canvas = canvas.clone();
        let callback = Closure::wrap(Box::new(move |event: MouseEvent| {
            let y = pointer_y(f64::from(event.offset_y()), f64::from(event.layer_y()));
            let on_canvas = event
                .target()
                .is_some_and(|target| Object::is(&target, &canvas));
            let target = if on_canvas {
                PointerTarget::Minimap
            } else {
                PointerTarget::Elsewhere
            };
            dispatch_pointer(&shared, PointerEvent::new(phase, y, target));
        }) as Box<dyn FnMut(MouseEvent)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        self.dom.push(DomListener {
            target,
            event,
            callback,
        });
        Ok(())
    }

    fn subscribe_scroll(&mut self) -> Result<(), JsValue> {
        let shared = Rc::clone(&self.shared);
        let callback = Closure::wrap(Box::new(move || {
            if let Ok(mut map) = shared.try_borrow_mut() {
                if let Err(err) = map.on_host_scroll() {
                    console_error(&format!("minimap: {err}"));
                }
            }
        }) as Box<dyn FnMut()>);
        call_method(&self.editor, "addScrollListener", &Array::of1(callback.as_ref()))?;
        self.scroll_listener = Some(callback);
        Ok(())
    }
}

/// Feed one DOM pointer event to the minimap. Dropped while another event is
/// being handled.
fn dispatch_pointer(shared: &SharedMinimap, event: PointerEvent) {
    let Ok(mut map) = shared.try_borrow_mut() else {
        return;
    };
    if let Err(err) = map.handle_pointer(event) {
        console_error(&format!("minimap: {err}"));
    }
}
