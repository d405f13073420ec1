//! Render collaborator interface
//!
//! The simulation never draws pixels itself. Each frame it hands the
//! renderer the visible tiles, the pizzas and one player pose, all in
//! screen pixels relative to a camera that follows the player.

use glam::{IVec2, Vec2};

use crate::consts::*;
use crate::floor_cell;
use crate::sim::{Direction, GameState, PizzaKind, Player, TileKind, TileWorld};

/// Everything a renderer needs to pick the player's limbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerPose {
    pub direction: Direction,
    pub crouch: bool,
    pub airborne: bool,
}

impl PlayerPose {
    pub fn of(player: &Player) -> Self {
        Self {
            direction: player.direction,
            crouch: player.crouch,
            airborne: player.is_airborne(),
        }
    }
}

/// Draw sink supplied by the platform layer
pub trait Renderer {
    fn draw_tile(&mut self, kind: TileKind, left: f32, top: f32);
    fn draw_pizza(&mut self, kind: PizzaKind, left: f32, top: f32);
    fn draw_player(&mut self, pose: PlayerPose, left: f32, top: f32);
}

/// Horizontal camera keeping the player centred
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// World column shown at the left window edge
    pub anchor_x: f32,
}

impl Camera {
    pub fn following(player: &Player) -> Self {
        Self {
            anchor_x: player.pos.x - (W_BLOCKS / 2) as f32,
        }
    }

    /// World tiles to screen pixels
    #[inline]
    pub fn to_screen(&self, world: Vec2) -> Vec2 {
        Vec2::new((world.x - self.anchor_x) * BLOCK_SIZE, world.y * BLOCK_SIZE)
    }
}

/// One tile draw request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSprite {
    pub kind: TileKind,
    pub cell: IVec2,
    /// Top-left corner in screen pixels
    pub screen: Vec2,
}

/// Tiles inside the window, column by column
pub fn visible_tiles(world: &TileWorld, camera: &Camera) -> Vec<TileSprite> {
    let first = floor_cell(camera.anchor_x);
    let mut sprites = Vec::new();
    for x in first..=first + W_BLOCKS {
        for y in 0..=H_BLOCKS {
            let cell = IVec2::new(x, y);
            if let Some(tile) = world.get(cell) {
                sprites.push(TileSprite {
                    kind: tile.kind,
                    cell,
                    screen: camera.to_screen(cell.as_vec2()),
                });
            }
        }
    }
    sprites
}

/// Draw every visible tile
pub fn render_tiles<R: Renderer>(state: &GameState, renderer: &mut R) {
    let camera = Camera::following(&state.player);
    for sprite in visible_tiles(&state.world, &camera) {
        renderer.draw_tile(sprite.kind, sprite.screen.x, sprite.screen.y);
    }
}

/// Draw pizzas, then the player on top
pub fn render_actors<R: Renderer>(state: &GameState, renderer: &mut R) {
    let camera = Camera::following(&state.player);
    for pizza in &state.pizzas {
        let at = camera.to_screen(pizza.pos);
        renderer.draw_pizza(pizza.kind, at.x, at.y);
    }

    let at = camera.to_screen(state.player.pos);
    renderer.draw_player(PlayerPose::of(&state.player), at.x, at.y);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::Level;

    #[derive(Default)]
    struct Recorder {
        tiles: Vec<(TileKind, f32, f32)>,
        pizzas: Vec<(PizzaKind, f32, f32)>,
        player: Option<(PlayerPose, f32, f32)>,
    }

    impl Renderer for Recorder {
        fn draw_tile(&mut self, kind: TileKind, left: f32, top: f32) {
            self.tiles.push((kind, left, top));
        }

        fn draw_pizza(&mut self, kind: PizzaKind, left: f32, top: f32) {
            self.pizzas.push((kind, left, top));
        }

        fn draw_player(&mut self, pose: PlayerPose, left: f32, top: f32) {
            self.player = Some((pose, left, top));
        }
    }

    #[test]
    fn test_camera_centres_player() {
        let player = Player::new(IVec2::new(100, 10));
        let camera = Camera::following(&player);
        assert_eq!(camera.anchor_x, 68.0);
        let at = camera.to_screen(player.pos);
        assert_eq!(at, Vec2::new(32.0 * BLOCK_SIZE, 10.0 * BLOCK_SIZE));
    }

    #[test]
    fn test_visible_tiles_window() {
        let mut world = TileWorld::new();
        world.place(IVec2::new(0, 5), TileKind::Ground);
        world.place(IVec2::new(64, 5), TileKind::Cloud);
        world.place(IVec2::new(65, 5), TileKind::Ground);
        world.place(IVec2::new(-1, 5), TileKind::Ground);
        world.place(IVec2::new(3, H_BLOCKS + 1), TileKind::Ground);

        let camera = Camera { anchor_x: 0.0 };
        let sprites = visible_tiles(&world, &camera);
        let cells: Vec<IVec2> = sprites.iter().map(|s| s.cell).collect();
        assert_eq!(cells, vec![IVec2::new(0, 5), IVec2::new(64, 5)]);
        assert_eq!(sprites[1].screen, Vec2::new(64.0 * BLOCK_SIZE, 100.0));
    }

    #[test]
    fn test_fractional_camera_offsets_tiles() {
        let mut world = TileWorld::new();
        world.place(IVec2::new(10, 0), TileKind::Ground);
        let camera = Camera { anchor_x: 9.5 };
        let sprites = visible_tiles(&world, &camera);
        assert_eq!(sprites.len(), 1);
        assert_eq!(sprites[0].screen.x, 0.5 * BLOCK_SIZE);
    }

    #[test]
    fn test_render_frame_requests() {
        let mut state = GameState::new(Level::Classic).unwrap();
        state.player.direction = Direction::Right;
        state.player.jump_velocity = -3.0;

        let mut recorder = Recorder::default();
        render_tiles(&state, &mut recorder);
        render_actors(&state, &mut recorder);

        assert!(!recorder.tiles.is_empty());
        assert!(recorder.pizzas.is_empty());
        let (pose, left, _) = recorder.player.unwrap();
        assert_eq!(
            pose,
            PlayerPose {
                direction: Direction::Right,
                crouch: false,
                airborne: true
            }
        );
        assert_eq!(left, (W_BLOCKS / 2) as f32 * BLOCK_SIZE);
    }
}
