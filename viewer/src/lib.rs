use common::{Direction, InputEvent, types::*};
use std::{cell::RefCell, rc::Rc};
use wasm_bindgen::prelude::*;

mod demo;
use demo::Demo;

mod mesh;
mod shaders;
mod texture;

#[wasm_bindgen(start)]
pub fn start() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init_with_level(log::Level::Debug).unwrap();

    let window = web_sys::window().unwrap();
    let performance = window.performance().unwrap();

    let canvas = window
        .document()
        .unwrap()
        .get_element_by_id("GameCanvas")
        .unwrap()
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .unwrap();

    let dim = Vec2::new(
        window.inner_width().unwrap().as_f64().unwrap() as f32,
        window.inner_height().unwrap().as_f64().unwrap() as f32,
    );

    canvas.set_width(dim.x as u32);
    canvas.set_height(dim.y as u32);

    let webgl2_context = canvas
        .get_context("webgl2")
        .unwrap()
        .unwrap()
        .dyn_into::<web_sys::WebGl2RenderingContext>()
        .unwrap();

    let gl = glow::Context::from_webgl2_context(webgl2_context);

    let demo = Rc::new(RefCell::new(Demo::new(gl, dim)));
    let start_time = performance.now();

    let main_loop = Rc::new(RefCell::new(None));

    // --- main loop ---
    {
        let demo_clone = demo.clone();
        let main_loop_clone = main_loop.clone();
        *main_loop.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            let time = (performance.now() - start_time) as f32 / 1000.0;
            demo_clone.borrow_mut().render(time);

            request_animation_frame(main_loop_clone.borrow().as_ref().unwrap());
        }) as Box<dyn FnMut()>));
    }

    type DemoRef<'a> = &'a Rc<RefCell<Demo>>;
    macro_rules! add_event_listener {
        ($event:literal, $evt_type:ty, $f:expr) => {
            let demo_clone = demo.clone();
            let on_event = Closure::<dyn FnMut(_)>::new(move |e: $evt_type| {
                $f(&demo_clone, e);
            });

            web_sys::window()
                .unwrap()
                .add_event_listener_with_callback($event, on_event.as_ref().unchecked_ref())
                .unwrap();

            on_event.forget();
        };
    }

    // --- resize ---
    add_event_listener!("resize", web_sys::Event, |demo: DemoRef, _| {
        let dim = Vec2::new(
            window.inner_width().unwrap().as_f64().unwrap() as f32,
            window.inner_height().unwrap().as_f64().unwrap() as f32,
        );

        canvas.set_width(dim.x as u32);
        canvas.set_height(dim.y as u32);

        demo.borrow_mut().resize(dim)
    });

    // --- mouse look ---
    add_event_listener!("mousedown", web_sys::MouseEvent, |demo: DemoRef, _| {
        demo.borrow_mut().handle_event(InputEvent::ButtonDown);
    });
    add_event_listener!("mouseup", web_sys::MouseEvent, |demo: DemoRef, _| {
        demo.borrow_mut().handle_event(InputEvent::ButtonUp);
    });
    add_event_listener!(
        "mousemove",
        web_sys::MouseEvent,
        |demo: DemoRef, e: web_sys::MouseEvent| {
            demo.borrow_mut().handle_event(InputEvent::Motion {
                dx: e.movement_x() as f32,
                dy: e.movement_y() as f32,
            });
        }
    );
    add_event_listener!(
        "wheel",
        web_sys::WheelEvent,
        |demo: DemoRef, e: web_sys::WheelEvent| {
            // the DOM reports scrolling towards the user as positive
            let delta = e.delta_y();
            if delta != 0.0 {
                let dy = -(delta.signum() as f32);
                demo.borrow_mut().handle_event(InputEvent::Scroll { dy });
            }
        }
    );

    // --- movement keys ---
    add_event_listener!(
        "keydown",
        web_sys::KeyboardEvent,
        |demo: DemoRef, e: web_sys::KeyboardEvent| {
            if let Some(direction) = Direction::from_key_code(&e.code()) {
                demo.borrow_mut().handle_event(InputEvent::Key {
                    direction,
                    pressed: true,
                });
            }
        }
    );
    add_event_listener!(
        "keyup",
        web_sys::KeyboardEvent,
        |demo: DemoRef, e: web_sys::KeyboardEvent| {
            if let Some(direction) = Direction::from_key_code(&e.code()) {
                demo.borrow_mut().handle_event(InputEvent::Key {
                    direction,
                    pressed: false,
                });
            }
        }
    );

    request_animation_frame(main_loop.borrow().as_ref().unwrap());
}

fn request_animation_frame(f: &Closure<dyn FnMut()>) {
    web_sys::window()
        .unwrap()
        .request_animation_frame(f.as_ref().unchecked_ref())
        .unwrap();
}
