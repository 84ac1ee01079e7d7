//! DOM presentation
//!
//! Positions absolutely-placed elements inside `#game-container`. Entity and
//! sparkle elements are keyed by id and created/removed as the simulation
//! adds and drops them.

use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlElement, HtmlImageElement};

use super::{Heart, HudView, sprite_for};
use crate::consts::MAX_LIVES;
use crate::sim::{EntityId, GameState};

/// Look up a required element by id
fn element_by_id(document: &Document, id: &str) -> Result<Element, JsValue> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

fn set_px(el: &HtmlElement, property: &str, value: f32) {
    let _ = el.style().set_property(property, &format!("{value}px"));
}

pub struct DomRenderer {
    document: Document,
    container: HtmlElement,
    basket: HtmlElement,
    hearts: Element,
    score: Element,
    game_over: Element,
    final_score: Element,
    entities: HashMap<EntityId, HtmlElement>,
    sparkles: HashMap<u32, HtmlElement>,
    // Last drawn values, so unchanged text/icons are not rebuilt every frame
    drawn_hearts: Option<[Heart; MAX_LIVES as usize]>,
    drawn_score: String,
}

impl DomRenderer {
    pub fn new(document: &Document) -> Result<Self, JsValue> {
        Ok(Self {
            document: document.clone(),
            container: element_by_id(document, "game-container")?.dyn_into()?,
            basket: element_by_id(document, "basket")?.dyn_into()?,
            hearts: element_by_id(document, "hearts")?,
            score: element_by_id(document, "score")?,
            game_over: element_by_id(document, "game-over")?,
            final_score: element_by_id(document, "final-score")?,
            entities: HashMap::new(),
            sparkles: HashMap::new(),
            drawn_hearts: None,
            drawn_score: String::new(),
        })
    }

    /// Container size in CSS pixels
    pub fn container_size(&self) -> (f32, f32) {
        (
            self.container.offset_width() as f32,
            self.container.offset_height() as f32,
        )
    }

    /// Convert a viewport x (MouseEvent.clientX) to container space
    pub fn to_container_x(&self, client_x: f32) -> f32 {
        client_x - self.container.get_bounding_client_rect().left() as f32
    }

    /// Reflect state and HUD into the page
    pub fn render(&mut self, state: &GameState, hud: &HudView) {
        set_px(&self.basket, "left", state.basket.x);
        self.sync_entities(state);
        self.sync_sparkles(hud);
        self.draw_hud(hud);
    }

    fn sync_entities(&mut self, state: &GameState) {
        for entity in &state.entities {
            if !self.entities.contains_key(&entity.id) {
                let Some(el) = self.create_object(sprite_for(entity.kind)) else {
                    continue;
                };
                self.entities.insert(entity.id, el);
            }
            let Some(el) = self.entities.get(&entity.id) else {
                continue;
            };
            set_px(el, "left", entity.pos.x);
            set_px(el, "top", entity.pos.y);
        }

        self.entities.retain(|id, el| {
            let alive = state.entities.iter().any(|e| e.id == *id);
            if !alive {
                el.remove();
            }
            alive
        });
    }

    fn sync_sparkles(&mut self, hud: &HudView) {
        for sparkle in &hud.sparkles {
            if !self.sparkles.contains_key(&sparkle.id) {
                let Some(el) = self.create_sparkle(sparkle.hue) else {
                    continue;
                };
                self.sparkles.insert(sparkle.id, el);
            }
            let Some(el) = self.sparkles.get(&sparkle.id) else {
                continue;
            };
            set_px(el, "left", sparkle.pos.x);
            set_px(el, "top", sparkle.pos.y);
            let _ = el.style().set_property("opacity", &sparkle.opacity.to_string());
        }

        self.sparkles.retain(|id, el| {
            let alive = hud.sparkles.iter().any(|s| s.id == *id);
            if !alive {
                el.remove();
            }
            alive
        });
    }

    fn create_object(&self, src: &str) -> Option<HtmlElement> {
        let img: HtmlImageElement = self.document.create_element("img").ok()?.dyn_into().ok()?;
        img.set_src(src);
        let _ = img.class_list().add_1("object");
        self.container.append_child(&img).ok()?;
        Some(img.into())
    }

    fn create_sparkle(&self, hue: f32) -> Option<HtmlElement> {
        let div: HtmlElement = self.document.create_element("div").ok()?.dyn_into().ok()?;
        let _ = div.class_list().add_1("sparkle");
        let _ = div
            .style()
            .set_property("background-color", &format!("hsl({hue:.0}, 100%, 50%)"));
        self.container.append_child(&div).ok()?;
        Some(div)
    }

    fn draw_hud(&mut self, hud: &HudView) {
        if self.drawn_score != hud.score_text {
            self.score.set_text_content(Some(&hud.score_text));
            self.drawn_score = hud.score_text.clone();
        }

        if self.drawn_hearts != Some(hud.hearts) {
            self.hearts.set_inner_html("");
            for heart in hud.hearts {
                if let Ok(img) = self.document.create_element("img") {
                    let _ = img.set_attribute("src", heart.image());
                    let _ = self.hearts.append_child(&img);
                }
            }
            self.drawn_hearts = Some(hud.hearts);
        }

        match hud.game_over {
            Some(final_score) => {
                self.final_score
                    .set_text_content(Some(&final_score.to_string()));
                let _ = self.game_over.class_list().remove_1("hidden");
            }
            None => {
                let _ = self.game_over.class_list().add_1("hidden");
            }
        }
    }
}
