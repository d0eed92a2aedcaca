//! DOM around the canvas

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlInputElement};

use crate::lifecycle::GameUi;

/// Element ids the page provides
pub mod ids {
    pub const CANVAS: &str = "gameCanvas";
    pub const TOUCH_AREA: &str = "touchArea";
    pub const GAME_OVER_MODAL: &str = "gameOverModal";
    pub const FINAL_SCORE: &str = "finalScore";
    pub const PLAYER_NAME: &str = "playerName";
    pub const SAVE_SCORE_BTN: &str = "saveScoreBtn";
    pub const NEW_GAME_BTN: &str = "newGameBtn";
    pub const SCORE_LIST: &str = "scoreList";
}

/// Game-over modal and high score list
pub struct DomUi {
    document: Document,
}

impl DomUi {
    pub fn new(document: Document) -> Self {
        Self { document }
    }

    /// Current contents of the name field
    pub fn player_name(&self) -> String {
        self.document
            .get_element_by_id(ids::PLAYER_NAME)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
            .map(|input| input.value())
            .unwrap_or_default()
    }
}

impl GameUi for DomUi {
    fn set_game_over_visible(&mut self, visible: bool) {
        if let Some(el) = self.document.get_element_by_id(ids::GAME_OVER_MODAL) {
            let display = if visible { "display: block" } else { "display: none" };
            let _ = el.set_attribute("style", display);
        }
    }

    fn set_final_score(&mut self, score: u32) {
        if let Some(el) = self.document.get_element_by_id(ids::FINAL_SCORE) {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn render_scores(&mut self, lines: &[String]) {
        let Some(list) = self.document.get_element_by_id(ids::SCORE_LIST) else {
            return;
        };
        list.set_inner_html("");
        for line in lines {
            if let Ok(li) = self.document.create_element("li") {
                li.set_text_content(Some(line));
                let _ = list.append_child(&li);
            }
        }
    }
}
