use wasm_bindgen::prelude::*;
use worldgen::editor::GraphEditor;
use worldgen::viewport::Viewport;

mod api;
mod canvas;
mod error;
mod interop;
mod logging;

pub use logging::init_logging;

/// A world plus the editing state of one canvas.
#[wasm_bindgen]
pub struct World {
    pub(crate) inner: worldgen::World,
    pub(crate) editor: GraphEditor,
    pub(crate) viewport: Viewport,
}

impl World {
    pub fn rs_new(width: f64, height: f64, seed: u64) -> World {
        World {
            inner: worldgen::World::empty(seed),
            editor: GraphEditor::new(),
            viewport: Viewport::new(width, height),
        }
    }
}
