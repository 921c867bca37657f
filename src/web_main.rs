use crate::{dispatch, Config, Game, Layout, Renderer, WebRenderer};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

const CANVAS_HEIGHT: f64 = 550.0;

struct GameLoop {
    game: Game,
    renderer: WebRenderer,
    tick_interval: f64,
    last_tick: f64,
}

impl GameLoop {
    fn new(config: Config, now: f64) -> Result<Self, JsValue> {
        let layout = Layout::canvas(config.grid_size, CANVAS_HEIGHT);
        let tick_interval = config.tick_interval().as_secs_f64() * 1000.0;
        let game = Game::new(config, layout);
        let mut renderer = WebRenderer::new("gameCanvas")?;
        renderer.init().map_err(|e| JsValue::from_str(&e.to_string()))?;

        Ok(Self {
            game,
            renderer,
            tick_interval,
            last_tick: now,
        })
    }

    fn update_frame(&mut self, current_time: f64) -> Result<(), JsValue> {
        // Drain input that arrived since the last frame
        while let Some(input) = self
            .renderer
            .poll_input()
            .map_err(|e| JsValue::from_str(&e.to_string()))?
        {
            dispatch(&mut self.game, input);
        }

        // Fixed ticks: render, then advance the game, once per elapsed interval
        while current_time - self.last_tick >= self.tick_interval {
            self.renderer
                .render(&self.game)
                .map_err(|e| JsValue::from_str(&e.to_string()))?;
            self.game.tick();
            self.last_tick += self.tick_interval;
        }

        Ok(())
    }
}

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    web_sys::console::log_1(&"[WASM] Starting Dots and Boxes...".into());

    let window = web_sys::window().ok_or("no window")?;
    let performance = window.performance().ok_or("no performance")?;

    let config = Config::default();
    config
        .validate()
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    let game_loop = match GameLoop::new(config, performance.now()) {
        Ok(gl) => Rc::new(RefCell::new(gl)),
        Err(e) => {
            web_sys::console::error_1(&format!("[WASM] Failed to create game loop: {:?}", e).into());
            return Err(e);
        }
    };

    // Create closure for animation frame
    let f: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let g = f.clone();

    let game_loop_clone = game_loop.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        let current_time = performance.now();

        if let Err(e) = game_loop_clone.borrow_mut().update_frame(current_time) {
            web_sys::console::error_1(&e);
            return; // Stop loop on error
        }

        // Schedule next frame
        let window = web_sys::window().unwrap();
        window
            .request_animation_frame(f.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            .unwrap();
    }) as Box<dyn FnMut()>));

    // Start the loop
    window.request_animation_frame(g.borrow().as_ref().unwrap().as_ref().unchecked_ref())?;

    web_sys::console::log_1(&"[WASM] Game loop started".into());

    Ok(())
}
