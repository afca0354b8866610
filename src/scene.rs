//! One-time scene composition
//!
//! Declarative description of everything the host engine builds when
//! the game attaches to its display: physics gravity, background,
//! scrolling ground and cloud strips, score labels, and the bird.
//! Pipes are not here; they arrive later as `PipeSpawned` events.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::{BIRD_COLLISION_MASK, BodyTag};
use crate::WorldGeom;

/// Sprite sizes for host-owned textures the layout depends on
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SceneAssets {
    pub ground_tex: Vec2,
    pub cloud_tex: Vec2,
}

/// A horizontally tiled strip that loops leftward forever.
///
/// Tiles sit side by side starting at x = 0; each scrolls left one
/// texture width over `loop_secs`, then snaps back. The strip obeys
/// the global scroll rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TileStrip {
    pub tile_size: Vec2,
    /// Tiles needed to cover the screen with one spare on each side
    pub count: u32,
    /// Y of the tile centers
    pub y: f32,
    pub z: f32,
    pub loop_secs: f32,
    /// Physics category for static tile bodies; None for decor
    pub category: Option<u32>,
}

/// A text label the host keeps in sync with the score events
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelSpec {
    pub text: String,
    /// Top-left anchored position
    pub pos: Vec2,
    pub z: f32,
}

/// The player's sprite and body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BirdSpec {
    pub pos: Vec2,
    /// Circular body radius (half the sprite height)
    pub radius: f32,
    pub category: u32,
    pub collision_mask: u32,
    pub contact_test: u32,
    /// Two-frame flap animation cadence
    pub frame_secs: f32,
    /// The body must not rotate from collisions; only the terminal
    /// roll rotates it
    pub rotation_locked: bool,
}

/// Everything the host instantiates on attach
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSpec {
    /// World gravity for the host physics
    pub gravity: Vec2,
    /// Sky color, linear RGBA
    pub sky_color: [f32; 4],
    pub ground: TileStrip,
    pub clouds: TileStrip,
    pub score_label: LabelSpec,
    pub best_label: LabelSpec,
    pub bird: BirdSpec,
}

impl SceneSpec {
    /// Compose the scene for the given screen and textures.
    ///
    /// `score_text`/`best_text` are the initial label strings (current
    /// score is 0 at attach, best comes from storage).
    pub fn build(
        geom: &WorldGeom,
        assets: &SceneAssets,
        score_text: String,
        best_text: String,
    ) -> Self {
        let screen = geom.screen;
        Self {
            gravity: Vec2::new(WORLD_GRAVITY.0, WORLD_GRAVITY.1),
            sky_color: [0.15, 0.75, 0.90, 1.0],
            ground: TileStrip {
                tile_size: assets.ground_tex,
                count: tiles_to_cover(screen.x, assets.ground_tex.x),
                y: assets.ground_tex.y / 2.0,
                z: 0.0,
                loop_secs: GROUND_LOOP_SECS,
                category: Some(BodyTag::Ground.bit()),
            },
            clouds: TileStrip {
                tile_size: assets.cloud_tex,
                count: tiles_to_cover(screen.x, assets.cloud_tex.x),
                y: screen.y - assets.cloud_tex.y / 2.0,
                z: -100.0,
                loop_secs: CLOUD_LOOP_SECS,
                category: None,
            },
            score_label: LabelSpec {
                text: score_text,
                pos: Vec2::new(10.0, screen.y - 30.0),
                z: 100.0,
            },
            best_label: LabelSpec {
                text: best_text,
                pos: Vec2::new(10.0, screen.y - 60.0),
                z: 100.0,
            },
            bird: BirdSpec {
                pos: geom.bird_start(),
                radius: geom.bird_size.y / 2.0,
                category: BodyTag::Bird.bit(),
                collision_mask: BIRD_COLLISION_MASK,
                contact_test: BIRD_COLLISION_MASK,
                frame_secs: FLAP_FRAME_SECS,
                rotation_locked: true,
            },
        }
    }
}

/// Tiles needed so the strip never shows a seam while looping
fn tiles_to_cover(screen_w: f32, tile_w: f32) -> u32 {
    2 + (screen_w / tile_w).ceil() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spec() -> SceneSpec {
        let geom = WorldGeom::new(Vec2::new(375.0, 667.0), 50.0, Vec2::new(34.0, 24.0));
        let assets = SceneAssets {
            ground_tex: Vec2::new(168.0, 56.0),
            cloud_tex: Vec2::new(168.0, 84.0),
        };
        SceneSpec::build(&geom, &assets, "Score:0".into(), "Best Score:5".into())
    }

    #[test]
    fn test_strips_cover_screen_with_margin() {
        let s = spec();
        // Coverage must exceed one screen plus one tile so the loop
        // reset never exposes the edge
        let covered = s.ground.count as f32 * s.ground.tile_size.x;
        assert!(covered >= 375.0 + 2.0 * s.ground.tile_size.x);
        assert_eq!(s.ground.count, 2 + 3); // ceil(375/168) = 3
    }

    #[test]
    fn test_layering() {
        let s = spec();
        assert!(s.clouds.z < s.ground.z);
        assert!(s.score_label.z > s.ground.z);
        assert!(s.clouds.category.is_none());
        assert_eq!(s.ground.category, Some(BodyTag::Ground.bit()));
    }

    #[test]
    fn test_bird_spec() {
        let s = spec();
        assert!((s.bird.pos.x - 75.0).abs() < 0.001);
        assert!((s.bird.pos.y - 466.9).abs() < 0.1);
        assert!((s.bird.radius - 12.0).abs() < 0.001);
        assert!(s.bird.rotation_locked);
        assert_eq!(s.bird.collision_mask, BIRD_COLLISION_MASK);
    }

    #[test]
    fn test_label_positions() {
        let s = spec();
        assert_eq!(s.score_label.pos, Vec2::new(10.0, 637.0));
        assert_eq!(s.best_label.pos, Vec2::new(10.0, 607.0));
        assert_eq!(s.best_label.text, "Best Score:5");
    }

    #[test]
    fn test_spec_serializes() {
        let s = spec();
        let json = serde_json::to_string(&s).expect("scene spec to JSON");
        assert!(json.contains("\"gravity\""));
        assert!(json.contains("Best Score:5"));
    }
}
