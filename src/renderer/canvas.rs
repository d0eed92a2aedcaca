//! Canvas 2D backend

use glam::Vec2;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use super::{Surface, TextStyle, colors};
use crate::layout::{Layout, Rect};

/// Draws onto a `<canvas>` element
pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    background: Option<HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        Ok(Self {
            canvas,
            ctx,
            background: None,
        })
    }

    /// Use a loaded image as the background
    pub fn set_background(&mut self, image: Option<HtmlImageElement>) {
        self.background = image;
    }

    /// Resize the backing store to the layout's canvas size
    pub fn apply_layout(&self, layout: &Layout) {
        let (w, h) = layout.canvas_size();
        self.canvas.set_width(w);
        self.canvas.set_height(h);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, rect: Rect) {
        self.ctx
            .clear_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn draw_background(&mut self, rect: Rect) {
        match &self.background {
            Some(image) => {
                let drawn = self
                    .ctx
                    .draw_image_with_html_image_element_and_dw_and_dh(
                        image,
                        rect.x as f64,
                        rect.y as f64,
                        rect.w as f64,
                        rect.h as f64,
                    );
                if let Err(e) = drawn {
                    log::warn!("Background draw failed: {:?}", e);
                }
            }
            None => self.fill_rect(rect, colors::BACKGROUND),
        }
    }

    fn stroke_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_stroke_style_str(color);
        self.ctx
            .stroke_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(rect.x as f64, rect.y as f64, rect.w as f64, rect.h as f64);
    }

    fn fill_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        self.ctx.set_fill_style_str(style.color);
        self.ctx.set_font(&format!("{}px Arial", style.size.round().max(1.0)));
        self.ctx.set_text_align(style.align.as_str());
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
