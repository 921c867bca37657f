use crate::game::Game;
use crate::layout::Point;
use crate::renderer::{Input, Renderer};
use crate::scene::{self, DrawCmd, Paint};
use std::cell::RefCell;
use std::collections::VecDeque;
use std::f64::consts::PI;
use std::io;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlElement, MouseEvent};

const FONT: &str = "dejavu sans mono";

fn css(paint: Paint) -> &'static str {
    match paint {
        Paint::Board => "cornsilk",
        Paint::Border => "wheat",
        Paint::Dot => "sienna",
        Paint::Human => "royalblue",
        Paint::HumanLit => "lightsteelblue",
        Paint::Computer => "crimson",
        Paint::ComputerLit => "lightpink",
        Paint::Tie => "black",
    }
}

pub struct WebRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
    device_pixel_ratio: f64,
    sized: bool,

    // Mouse events queue up between frames so no click is lost.
    pending_input: Rc<RefCell<VecDeque<Input>>>,
}

impl WebRenderer {
    pub fn new(canvas_id: &str) -> Result<Self, JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or("canvas not found")?
            .dyn_into::<HtmlCanvasElement>()?;

        let context = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into::<CanvasRenderingContext2d>()?;

        // Get device pixel ratio for high DPI displays
        let device_pixel_ratio = window.device_pixel_ratio();

        Ok(Self {
            canvas,
            context,
            device_pixel_ratio,
            sized: false,
            pending_input: Rc::new(RefCell::new(VecDeque::new())),
        })
    }

    fn setup_mouse_listener(&self, event_name: &str, to_input: fn(Point) -> Input) {
        let pending_input = self.pending_input.clone();

        let closure = Closure::wrap(Box::new(move |event: MouseEvent| {
            // Offsets are relative to the canvas, in CSS pixels, which is
            // what the layout is expressed in.
            let at = Point::new(event.offset_x() as f64, event.offset_y() as f64);
            pending_input.borrow_mut().push_back(to_input(at));
        }) as Box<dyn FnMut(MouseEvent)>);

        self.canvas
            .add_event_listener_with_callback(event_name, closure.as_ref().unchecked_ref())
            .unwrap();

        closure.forget(); // Keep listener alive
    }

    fn resize(&mut self, width: f64, height: f64, stroke: f64) -> Result<(), JsValue> {
        // Internal resolution (actual pixels, scaled for high DPI)
        self.canvas.set_width((width * self.device_pixel_ratio) as u32);
        self.canvas.set_height((height * self.device_pixel_ratio) as u32);

        // Set CSS display size
        let element: &HtmlElement = self.canvas.unchecked_ref();
        element.style().set_property("width", &format!("{}px", width))?;
        element.style().set_property("height", &format!("{}px", height))?;

        // Setting the canvas size resets the context
        self.context.scale(self.device_pixel_ratio, self.device_pixel_ratio)?;
        self.context.set_line_width(stroke);
        self.context.set_text_align("center");
        self.context.set_text_baseline("middle");
        Ok(())
    }

    fn draw(&self, cmd: &DrawCmd) -> Result<(), JsValue> {
        match cmd {
            DrawCmd::FillRect { rect, paint } => {
                self.context.set_fill_style_str(css(*paint));
                self.context
                    .fill_rect(rect.left, rect.top, rect.width(), rect.height());
            }
            DrawCmd::StrokeRect { rect, paint } => {
                self.context.set_stroke_style_str(css(*paint));
                self.context
                    .stroke_rect(rect.left, rect.top, rect.width(), rect.height());
            }
            DrawCmd::Line { from, to, paint } => {
                self.context.set_stroke_style_str(css(*paint));
                self.context.begin_path();
                self.context.move_to(from.x, from.y);
                self.context.line_to(to.x, to.y);
                self.context.stroke();
            }
            DrawCmd::Dot {
                center,
                radius,
                paint,
            } => {
                self.context.set_fill_style_str(css(*paint));
                self.context.begin_path();
                self.context.arc(center.x, center.y, *radius, 0.0, PI * 2.0)?;
                self.context.fill();
            }
            DrawCmd::Text {
                text,
                at,
                size,
                paint,
            } => {
                self.context.set_fill_style_str(css(*paint));
                self.context.set_font(&format!("{}px {}", size, FONT));
                self.context.fill_text(text, at.x, at.y)?;
            }
        }
        Ok(())
    }
}

fn to_io(err: JsValue) -> io::Error {
    io::Error::other(format!("{:?}", err))
}

impl Renderer for WebRenderer {
    fn init(&mut self) -> io::Result<()> {
        self.setup_mouse_listener("mousemove", Input::PointerMove);
        self.setup_mouse_listener("click", Input::Click);
        Ok(())
    }

    fn render(&mut self, game: &Game) -> io::Result<()> {
        let scene = scene::compose(game);

        if !self.sized {
            self.resize(scene.width, scene.height, scene.stroke)
                .map_err(to_io)?;
            self.sized = true;
        }

        for cmd in &scene.commands {
            self.draw(cmd).map_err(to_io)?;
        }
        Ok(())
    }

    fn cleanup(&mut self) -> io::Result<()> {
        // No cleanup needed for web
        Ok(())
    }

    fn poll_input(&mut self) -> io::Result<Option<Input>> {
        Ok(self.pending_input.borrow_mut().pop_front())
    }
}
