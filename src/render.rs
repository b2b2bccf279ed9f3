use crate::actors::{Actor, Behavior};
use crate::arena::Arena;
use crate::assets;
use crate::config::{ARENA_HEIGHT, ARENA_WIDTH};
use crate::types::Rect;
use macroquad::math::Rect as ScreenRect;
use macroquad::prelude::{
    BLACK, Color, DARKGRAY, DrawTextureParams, FilterMode, Image, ImageFormat, KeyCode, LIGHTGRAY,
    Texture2D, WHITE, clear_background, draw_rectangle, draw_text, draw_texture_ex, is_key_down,
    is_key_pressed, is_quit_requested, measure_text, next_frame, vec2,
};

pub const SPRITES_FILE: &str = "moon-patrol.png";
pub const BACKDROP_FILE: &str = "moon-patrol-bg.png";

// Solid fill for actors without a sprite (projectiles)
const FILL_COLOR: Color = Color::new(1.0, 1.0, 1.0, 1.0);

/// Which image a visual region is cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteSheet {
    Sprites,
    Backdrop,
}

/// Drawing surface for one frame
pub trait Canvas {
    fn clear_frame(&mut self);
    /// Copy `source` from `sheet` scaled into `dest`
    fn draw_region(&mut self, sheet: SpriteSheet, source: Rect, dest: Rect);
    fn fill_rect(&mut self, dest: Rect);
}

/// Draws every actor in insertion order, so later actors paint over earlier ones.
pub fn draw_actors(arena: &Arena, canvas: &mut impl Canvas) {
    for id in arena.actors() {
        let Some(actor) = arena.get(id) else {
            continue;
        };
        let dest = actor.bounding_box();
        let source = actor.visual_region();
        if source.is_empty() {
            canvas.fill_rect(dest);
            continue;
        }
        let sheet = match actor {
            Actor::Background(_) => SpriteSheet::Backdrop,
            _ => SpriteSheet::Sprites,
        };
        canvas.draw_region(sheet, source, dest);
    }
}

fn screen_rect(r: Rect) -> ScreenRect {
    ScreenRect::new(r.x as f32, r.y as f32, r.w as f32, r.h as f32)
}

fn load_sheet(name: &str) -> Option<Texture2D> {
    let Some(bytes) = assets::get_asset_bytes(name) else {
        log::warn!("Sprite sheet {} is not bundled, drawing placeholders.", name);
        return None;
    };
    match Image::from_file_with_format(&bytes, Some(ImageFormat::Png)) {
        Ok(image) => {
            let texture = Texture2D::from_image(&image);
            texture.set_filter(FilterMode::Nearest);
            Some(texture)
        }
        Err(e) => {
            log::error!("Failed to decode sprite sheet {}: {}", name, e);
            None
        }
    }
}

// Handles rendering the game state using macroquad
pub struct Renderer {
    sprites: Option<Texture2D>,
    backdrop: Option<Texture2D>,
}

impl Renderer {
    pub fn new() -> Self {
        Renderer {
            sprites: load_sheet(SPRITES_FILE),
            backdrop: load_sheet(BACKDROP_FILE),
        }
    }

    pub fn draw_frame(&mut self, arena: &Arena) {
        self.clear_frame();
        draw_actors(arena, self);
    }

    pub fn draw_announcement(&self, msg: &str) {
        let rect_width = 400.0;
        let rect_height = 120.0;
        let x = (ARENA_WIDTH as f32 - rect_width) / 2.0;
        let y = (ARENA_HEIGHT as f32 - rect_height) / 2.0;
        draw_rectangle(x, y, rect_width, rect_height, Color::from_rgba(0, 0, 0, 180));

        let font_size = 32.0;
        let dims = measure_text(msg, None, font_size as u16, 1.0);
        let text_x = x + (rect_width - dims.width) / 2.0;
        draw_text(msg, text_x, y + rect_height / 2.0, font_size, WHITE);

        let hint = "Press ENTER or ESC to exit";
        let hint_size = 18.0;
        let hint_dims = measure_text(hint, None, hint_size as u16, 1.0);
        let hint_x = x + (rect_width - hint_dims.width) / 2.0;
        draw_text(hint, hint_x, y + rect_height - hint_size, hint_size, LIGHTGRAY);
    }

    /// Yes/no prompt drawn over a blank window. Closing the window answers no.
    pub async fn confirm(&self, question: &str) -> bool {
        let prompt = format!("{} [Y/N]", question);
        loop {
            if is_quit_requested() {
                return false;
            }
            if is_key_pressed(KeyCode::Y) {
                return true;
            }
            if is_key_pressed(KeyCode::N) {
                return false;
            }
            clear_background(BLACK);
            let font_size = 28.0;
            let dims = measure_text(&prompt, None, font_size as u16, 1.0);
            let x = (ARENA_WIDTH as f32 - dims.width) / 2.0;
            draw_text(&prompt, x, ARENA_HEIGHT as f32 / 2.0, font_size, WHITE);
            next_frame().await;
        }
    }

    pub fn window_should_close() -> bool {
        is_key_down(KeyCode::Escape) || is_quit_requested()
    }
}

impl Canvas for Renderer {
    fn clear_frame(&mut self) {
        clear_background(BLACK);
    }

    fn draw_region(&mut self, sheet: SpriteSheet, source: Rect, dest: Rect) {
        let texture = match sheet {
            SpriteSheet::Sprites => self.sprites.as_ref(),
            SpriteSheet::Backdrop => self.backdrop.as_ref(),
        };
        let d = screen_rect(dest);
        match texture {
            Some(texture) => draw_texture_ex(
                texture,
                d.x,
                d.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(vec2(d.w, d.h)),
                    source: Some(screen_rect(source)),
                    ..Default::default()
                },
            ),
            None => {
                let color = match sheet {
                    SpriteSheet::Sprites => LIGHTGRAY,
                    SpriteSheet::Backdrop => DARKGRAY,
                };
                draw_rectangle(d.x, d.y, d.w, d.h, color);
            }
        }
    }

    fn fill_rect(&mut self, dest: Rect) {
        let d = screen_rect(dest);
        draw_rectangle(d.x, d.y, d.w, d.h, FILL_COLOR);
    }
}
