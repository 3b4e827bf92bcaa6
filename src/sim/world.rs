//! Tile grid world
//!
//! The arena is a dense grid of tiles. Everything that asks "can I stand
//! here" goes through [`World::is_wall_at`], which answers wall for any
//! out-of-bounds query so callers never walk off the map.

use std::fs;
use std::io;
use std::path::Path;

use glam::{IVec2, Vec2};
use serde::{Deserialize, Serialize};

use crate::consts::{TILE_HEIGHT, TILE_WIDTH};

/// A single grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Tile {
    #[default]
    Floor,
    Wall,
}

/// Dense tile grid, row-major
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    width: i32,
    height: i32,
    tiles: Vec<Tile>,
}

impl World {
    /// Empty arena with wall borders
    pub fn new(width: i32, height: i32) -> Self {
        let mut world = Self {
            width,
            height,
            tiles: vec![Tile::Floor; (width * height) as usize],
        };
        for x in 0..width {
            world.set_tile(x, 0, Tile::Wall);
            world.set_tile(x, height - 1, Tile::Wall);
        }
        for y in 0..height {
            world.set_tile(0, y, Tile::Wall);
            world.set_tile(width - 1, y, Tile::Wall);
        }
        world
    }

    /// Bordered arena with the standard obstacle layout: a horizontal wall
    /// across the middle and two short vertical walls flanking it
    pub fn with_default_layout(width: i32, height: i32) -> Self {
        let mut world = Self::new(width, height);
        let cx = width / 2;
        let cy = height / 2;

        for x in (cx - 5)..=(cx + 5) {
            world.set_tile(x, cy, Tile::Wall);
        }
        for y in (cy - 3)..=(cy + 3) {
            world.set_tile(cx - 10, y, Tile::Wall);
            world.set_tile(cx + 10, y, Tile::Wall);
        }
        world
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width && y >= 0 && y < self.height
    }

    pub fn tile(&self, x: i32, y: i32) -> Option<Tile> {
        self.in_bounds(x, y)
            .then(|| self.tiles[(y * self.width + x) as usize])
    }

    pub fn set_tile(&mut self, x: i32, y: i32, tile: Tile) {
        if self.in_bounds(x, y) {
            self.tiles[(y * self.width + x) as usize] = tile;
        }
    }

    /// Wall query, fail-closed: out-of-bounds cells count as walls
    pub fn is_wall_at(&self, x: i32, y: i32) -> bool {
        match self.tile(x, y) {
            Some(tile) => tile == Tile::Wall,
            None => true,
        }
    }

    /// Wall query in world pixels
    pub fn is_wall_at_pixel(&self, pos: Vec2) -> bool {
        let cell = Self::world_to_tile(pos);
        self.is_wall_at(cell.x, cell.y)
    }

    /// World-pixel position to tile coordinates
    pub fn world_to_tile(pos: Vec2) -> IVec2 {
        IVec2::new(
            (pos.x / TILE_WIDTH) as i32,
            (pos.y / TILE_HEIGHT) as i32,
        )
    }

    /// Center of a tile in world pixels
    pub fn tile_center(cell: IVec2) -> Vec2 {
        Vec2::new(
            cell.x as f32 * TILE_WIDTH + TILE_WIDTH / 2.0,
            cell.y as f32 * TILE_HEIGHT + TILE_HEIGHT / 2.0,
        )
    }

    /// Top-left corner of a tile in world pixels
    pub fn tile_origin(cell: IVec2) -> Vec2 {
        Vec2::new(cell.x as f32 * TILE_WIDTH, cell.y as f32 * TILE_HEIGHT)
    }

    /// Pixel dimensions of the whole arena
    pub fn pixel_size(&self) -> Vec2 {
        Vec2::new(
            self.width as f32 * TILE_WIDTH,
            self.height as f32 * TILE_HEIGHT,
        )
    }

    /// Pixel center of the whole arena
    pub fn pixel_center(&self) -> Vec2 {
        self.pixel_size() / 2.0
    }

    /// Load a tile grid from a JSON file
    pub fn load(path: &Path) -> io::Result<Self> {
        let json = fs::read_to_string(path)?;
        let world: World = serde_json::from_str(&json)?;
        log::info!(
            "loaded {}x{} world from {}",
            world.width,
            world.height,
            path.display()
        );
        Ok(world)
    }

    /// Save the tile grid as JSON
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_borders_are_walls() {
        let world = World::new(10, 8);
        for x in 0..10 {
            assert!(world.is_wall_at(x, 0));
            assert!(world.is_wall_at(x, 7));
        }
        for y in 0..8 {
            assert!(world.is_wall_at(0, y));
            assert!(world.is_wall_at(9, y));
        }
        assert!(!world.is_wall_at(4, 4));
    }

    #[test]
    fn test_out_of_bounds_is_wall() {
        let world = World::new(10, 8);
        assert!(world.is_wall_at(-1, 4));
        assert!(world.is_wall_at(10, 4));
        assert!(world.is_wall_at(4, -1));
        assert!(world.is_wall_at(4, 8));
        assert_eq!(world.tile(-1, 0), None);
    }

    #[test]
    fn test_default_layout_obstacles() {
        let world = World::with_default_layout(40, 40);
        // Middle horizontal wall
        assert!(world.is_wall_at(15, 20));
        assert!(world.is_wall_at(25, 20));
        assert!(!world.is_wall_at(14, 20));
        // Flanking vertical walls
        assert!(world.is_wall_at(10, 17));
        assert!(world.is_wall_at(30, 23));
        assert!(!world.is_wall_at(10, 16));
    }

    #[test]
    fn test_world_tile_round_trip() {
        let cell = IVec2::new(7, 11);
        assert_eq!(World::world_to_tile(World::tile_center(cell)), cell);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = std::env::temp_dir().join("snakeball-world-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("world.json");

        let mut world = World::new(12, 9);
        world.set_tile(5, 4, Tile::Wall);
        world.save(&path).unwrap();

        let loaded = World::load(&path).unwrap();
        assert_eq!(loaded.width(), 12);
        assert_eq!(loaded.height(), 9);
        assert!(loaded.is_wall_at(5, 4));
        assert!(!loaded.is_wall_at(5, 5));

        std::fs::remove_file(&path).ok();
    }
}
