//! Browser host
//!
//! Drives a [`Session`] from `requestAnimationFrame`, maps keyboard and
//! pointer input to intents, and hands each frame's snapshot to a JS render
//! callback as JSON. Drawing is entirely up to the page.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Event, EventTarget, KeyboardEvent};

use crate::audio::WebAudio;
use crate::persistence::LocalStorage;
use crate::platform::{Intent, Session};
use crate::settings::AudioSettings;
use crate::sim::{Difficulty, GamePhase};
use crate::tuning::Tuning;

type WebSession = Session<LocalStorage, WebAudio>;
type FrameCallback = Closure<dyn FnMut(f64)>;

#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    // A second module instance on the page already installed the logger
    console_log::init_with_level(log::Level::Info).ok();
}

struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

struct Host {
    session: WebSession,
    render: Option<js_sys::Function>,
    frame_id: Option<i32>,
    listeners: Vec<Listener>,
}

impl Host {
    /// Space, tap or click: start from the menus, flap while playing
    fn primary_action(&mut self) {
        // Browsers only unlock audio inside a user gesture
        self.session.audio_mut().resume();
        match self.session.state().phase {
            GamePhase::Menu | GamePhase::GameOver => self.session.push(Intent::Start),
            GamePhase::Playing => self.session.push(Intent::Flap),
            GamePhase::Paused => {}
        }
    }

    fn on_key(&mut self, event: &KeyboardEvent) {
        match event.key().as_str() {
            " " | "ArrowUp" | "w" | "W" => {
                event.prevent_default();
                self.primary_action();
            }
            "Escape" | "p" | "P" => self.session.push(Intent::TogglePause),
            "r" | "R" => self.session.push(Intent::Restart),
            "m" | "M" => self.session.push(Intent::ReturnToMenu),
            "1" => self.session.push(Intent::SelectDifficulty(Difficulty::Easy)),
            "2" => self.session.push(Intent::SelectDifficulty(Difficulty::Medium)),
            "3" => self.session.push(Intent::SelectDifficulty(Difficulty::Hard)),
            _ => {}
        }
    }

    /// Losing focus mid-round pauses it
    fn on_focus_lost(&mut self) {
        if self.session.state().phase == GamePhase::Playing {
            log::info!("Focus lost - pausing");
            self.session.push(Intent::Pause);
        }
    }

    fn remove_listeners(&mut self) {
        for listener in self.listeners.drain(..) {
            let _ = listener.target.remove_event_listener_with_callback(
                listener.kind,
                listener.closure.as_ref().unchecked_ref(),
            );
        }
    }
}

/// Browser game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    host: Rc<RefCell<Host>>,
    frame_cb: Rc<RefCell<Option<FrameCallback>>>,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game, optionally overriding geometry with a JSON tuning object
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> Result<WebGame, JsValue> {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json(&json).map_err(|e| JsValue::from_str(&e.to_string()))?,
            None => Tuning::default(),
        };

        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            seed,
            tuning,
            LocalStorage::new(),
            WebAudio::new(AudioSettings::default()),
        );

        Ok(WebGame {
            host: Rc::new(RefCell::new(Host {
                session,
                render: None,
                frame_id: None,
                listeners: Vec::new(),
            })),
            frame_cb: Rc::new(RefCell::new(None)),
        })
    }

    /// Called once per frame with the snapshot JSON
    #[wasm_bindgen(js_name = setRenderCallback)]
    pub fn set_render_callback(&self, callback: js_sys::Function) {
        self.host.borrow_mut().render = Some(callback);
    }

    /// Attach input listeners and start the frame loop
    pub fn run(&self) -> Result<(), JsValue> {
        if self.host.borrow().session.is_disposed() || self.frame_cb.borrow().is_some() {
            return Ok(());
        }

        let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;

        self.listen(&window, "keydown", |host, event| {
            if let Some(key) = event.dyn_ref::<KeyboardEvent>() {
                host.on_key(key);
            }
        })?;
        self.listen(&window, "pointerdown", |host, _event| host.primary_action())?;
        self.listen(&window, "blur", |host, _event| host.on_focus_lost())?;
        {
            let doc = document.clone();
            self.listen(&document, "visibilitychange", move |host, _event| {
                if doc.hidden() {
                    host.on_focus_lost();
                }
            })?;
        }

        let host = Rc::clone(&self.host);
        let frame_cb: Weak<RefCell<Option<FrameCallback>>> = Rc::downgrade(&self.frame_cb);
        *self.frame_cb.borrow_mut() = Some(Closure::new(move |now_ms: f64| {
            // Nothing is rendered for a frame whose snapshot failed to encode
            let json = host.borrow_mut().session.frame_json(now_ms);

            // Render outside the borrow so the callback may call back into the game
            let render = host.borrow().render.clone();
            if let (Some(json), Some(render)) = (json, render) {
                if let Err(e) = render.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    log::warn!("Render callback failed: {:?}", e);
                }
            }

            if host.borrow().session.is_disposed() {
                return;
            }
            if let Some(cb) = frame_cb.upgrade() {
                let id = cb.borrow().as_ref().and_then(request_frame);
                host.borrow_mut().frame_id = id;
            }
        }));

        let id = self.frame_cb.borrow().as_ref().and_then(request_frame);
        self.host.borrow_mut().frame_id = id;
        log::info!("Frame loop running");
        Ok(())
    }

    pub fn flap(&self) {
        self.host.borrow_mut().session.push(Intent::Flap);
    }

    #[wasm_bindgen(js_name = togglePause)]
    pub fn toggle_pause(&self) {
        self.host.borrow_mut().session.push(Intent::TogglePause);
    }

    #[wasm_bindgen(js_name = startGame)]
    pub fn start_game(&self) {
        self.host.borrow_mut().session.push(Intent::Start);
    }

    pub fn restart(&self) {
        self.host.borrow_mut().session.push(Intent::Restart);
    }

    #[wasm_bindgen(js_name = returnToMenu)]
    pub fn return_to_menu(&self) {
        self.host.borrow_mut().session.push(Intent::ReturnToMenu);
    }

    /// Returns false for keys that name no difficulty
    #[wasm_bindgen(js_name = selectDifficulty)]
    pub fn select_difficulty(&self, key: &str) -> bool {
        self.host.borrow_mut().session.select_difficulty_key(key)
    }

    #[wasm_bindgen(js_name = setAutoplay)]
    pub fn set_autoplay(&self, enabled: bool) {
        self.host.borrow_mut().session.set_autoplay(enabled);
    }

    /// Replace audio preferences from a JSON object
    #[wasm_bindgen(js_name = setAudioSettings)]
    pub fn set_audio_settings(&self, json: &str) -> Result<(), JsValue> {
        let audio: AudioSettings =
            serde_json::from_str(json).map_err(|e| JsValue::from_str(&e.to_string()))?;
        self.host.borrow_mut().session.set_audio_settings(audio);
        Ok(())
    }

    /// Current audio preferences as JSON, including the page-owned music volume
    #[wasm_bindgen(js_name = audioSettings)]
    pub fn audio_settings(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.host.borrow().session.settings().audio)
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    #[wasm_bindgen(js_name = resetHighScore)]
    pub fn reset_high_score(&self) {
        self.host.borrow_mut().session.reset_high_score();
    }

    /// Current snapshot as JSON, for pages that render on their own schedule
    pub fn snapshot(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.host.borrow().session.snapshot())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }

    /// Stop the loop and detach every listener. Safe to call more than once.
    pub fn dispose(&self) {
        let mut host = self.host.borrow_mut();
        if host.session.is_disposed() {
            return;
        }
        if let Some(id) = host.frame_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }
        host.remove_listeners();
        host.render = None;
        host.session.dispose();
    }
}

impl WebGame {
    fn listen<T, F>(&self, target: &T, kind: &'static str, mut handler: F) -> Result<(), JsValue>
    where
        T: AsRef<EventTarget>,
        F: FnMut(&mut Host, &Event) + 'static,
    {
        let host = Rc::downgrade(&self.host);
        let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            if let Some(host) = host.upgrade() {
                handler(&mut *host.borrow_mut(), &event);
            }
        });
        let target: &EventTarget = target.as_ref();
        target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())?;
        self.host.borrow_mut().listeners.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }
}

fn request_frame(cb: &FrameCallback) -> Option<i32> {
    let window = web_sys::window()?;
    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
        Ok(id) => Some(id),
        Err(e) => {
            log::error!("requestAnimationFrame failed: {:?}", e);
            None
        }
    }
}
