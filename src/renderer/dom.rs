//! DOM rendering adapter
//!
//! The host page provides `#game-area`, `#paddle`, `#ball`, the HUD readouts
//! and four overlay menus. Bricks are created here as absolutely positioned
//! `div.brick` children of the game area. Nothing in this module touches game
//! state; it only reads snapshots.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement};

use super::hud::{HudText, MenuVisibility};
use crate::sim::{GameState, Snapshot};

/// Overlay menu elements (any may be missing from the page)
struct Menus {
    start: Option<Element>,
    pause: Option<Element>,
    game_over: Option<Element>,
    win: Option<Element>,
}

pub struct DomRenderer {
    document: Document,
    game_area: Element,
    paddle: HtmlElement,
    ball: HtmlElement,
    score: Option<Element>,
    lives: Option<Element>,
    timer: Option<Element>,
    menus: Menus,
    bricks: Vec<HtmlElement>,
    /// Last rendered values, to skip redundant DOM writes
    last_hud: Option<HudText>,
    last_menus: Option<MenuVisibility>,
}

impl DomRenderer {
    /// Look up the page elements. Returns None if the play field is missing.
    pub fn new(document: &Document) -> Option<Self> {
        let game_area = document.get_element_by_id("game-area")?;
        let paddle = html_by_id(document, "paddle")?;
        let ball = html_by_id(document, "ball")?;

        Some(Self {
            document: document.clone(),
            game_area,
            paddle,
            ball,
            score: document.get_element_by_id("score-value"),
            lives: document.get_element_by_id("lives-value"),
            timer: document.get_element_by_id("timer-value"),
            menus: Menus {
                start: document.get_element_by_id("start-menu"),
                pause: document.get_element_by_id("pause-menu"),
                game_over: document.get_element_by_id("game-over"),
                win: document.get_element_by_id("win-screen"),
            },
            bricks: Vec::new(),
            last_hud: None,
            last_menus: None,
        })
    }

    /// Optional JSON config override from `<div id="game-area" data-config=...>`
    pub fn config_attribute(&self) -> Option<String> {
        self.game_area.get_attribute("data-config")
    }

    /// Replace brick visuals with one element per brick in `state`
    pub fn build_bricks(&mut self, state: &GameState) {
        self.clear_bricks();

        for brick in &state.bricks {
            let Some(el) = self
                .document
                .create_element("div")
                .ok()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                log::warn!("Failed to create brick element");
                continue;
            };
            el.set_class_name("brick");
            let style = el.style();
            let _ = style.set_property("left", &px(brick.rect.left()));
            let _ = style.set_property("top", &px(brick.rect.top()));
            let _ = style.set_property("width", &px(brick.rect.width()));
            let _ = style.set_property("height", &px(brick.rect.height()));
            let _ = style.set_property("background", brick.color_hex());
            if !brick.alive {
                let _ = style.set_property("visibility", "hidden");
            }
            let _ = self.game_area.append_child(&el);
            self.bricks.push(el);
        }

        log::debug!("Created {} brick elements", self.bricks.len());
    }

    /// Remove every brick element from the page
    pub fn clear_bricks(&mut self) {
        for el in self.bricks.drain(..) {
            el.remove();
        }
    }

    pub fn hide_brick(&self, idx: usize) {
        if let Some(el) = self.bricks.get(idx) {
            let _ = el.style().set_property("visibility", "hidden");
        }
    }

    /// Write positions, HUD text and menu visibility
    pub fn render(&mut self, snapshot: &Snapshot) {
        let _ = self.paddle.style().set_property("left", &px(snapshot.paddle_x));
        let ball_style = self.ball.style();
        let _ = ball_style.set_property("left", &px(snapshot.ball.x));
        let _ = ball_style.set_property("top", &px(snapshot.ball.y));

        let hud = HudText::from_snapshot(snapshot);
        if self.last_hud.as_ref() != Some(&hud) {
            set_text(&self.score, &hud.score);
            set_text(&self.lives, &hud.lives);
            set_text(&self.timer, &hud.timer);
            self.last_hud = Some(hud);
        }

        let menus = MenuVisibility::for_phase(snapshot.phase);
        if self.last_menus != Some(menus) {
            set_visible(&self.menus.start, menus.start);
            set_visible(&self.menus.pause, menus.pause);
            set_visible(&self.menus.game_over, menus.game_over);
            set_visible(&self.menus.win, menus.win);

            let score = snapshot.score.to_string();
            for menu in [&self.menus.game_over, &self.menus.win] {
                if let Some(el) = menu
                    .as_ref()
                    .and_then(|m| m.query_selector(".final-score").ok().flatten())
                {
                    el.set_text_content(Some(&score));
                }
            }
            self.last_menus = Some(menus);
        }
    }
}

fn html_by_id(document: &Document, id: &str) -> Option<HtmlElement> {
    document.get_element_by_id(id)?.dyn_into::<HtmlElement>().ok()
}

fn px(value: f32) -> String {
    format!("{}px", value)
}

fn set_text(el: &Option<Element>, text: &str) {
    if let Some(el) = el {
        el.set_text_content(Some(text));
    }
}

fn set_visible(el: &Option<Element>, visible: bool) {
    if let Some(el) = el {
        let _ = el.class_list().toggle_with_force("hidden", !visible);
    }
}
