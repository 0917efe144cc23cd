//! World object registry and level layouts
//!
//! Interaction state lives here, keyed by a stable `ObjectId`, not on render
//! nodes. A renderer draws from `World::objects()` and never owns the flags.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::f32::consts::{FRAC_PI_2, PI};

use super::collision::{Aabb, Ray, ray_aabb};
use super::state::LevelState;
use crate::consts::*;

/// Stable per-instance id, unique within one built world
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Recognized interaction tags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectKind {
    KeyRoof,
    DoorRoof,
    DoorRoom,
    Drawer,
    CableBox,
    ExitDoorElec,
}

impl ObjectKind {
    pub fn tag(&self) -> &'static str {
        match self {
            ObjectKind::KeyRoof => "KEY_ROOF",
            ObjectKind::DoorRoof => "DOOR_ROOF",
            ObjectKind::DoorRoom => "DOOR_ROOM",
            ObjectKind::Drawer => "DRAWER",
            ObjectKind::CableBox => "CABLE_BOX",
            ObjectKind::ExitDoorElec => "EXIT_DOOR_ELEC",
        }
    }

    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "KEY_ROOF" => Some(ObjectKind::KeyRoof),
            "DOOR_ROOF" => Some(ObjectKind::DoorRoof),
            "DOOR_ROOM" => Some(ObjectKind::DoorRoom),
            "DRAWER" => Some(ObjectKind::Drawer),
            "CABLE_BOX" => Some(ObjectKind::CableBox),
            "EXIT_DOOR_ELEC" => Some(ObjectKind::ExitDoorElec),
            _ => None,
        }
    }
}

/// A placed object with its mutable interaction flags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorldObject {
    pub id: ObjectId,
    /// Raw type tag as authored in the layout
    pub tag: String,
    /// `None` for scenery and for tags the dispatcher does not know
    pub kind: Option<ObjectKind>,
    pub bounds: Aabb,
    /// Rotation about +Y, radians
    pub yaw: f32,
    pub interactable: bool,
    pub visible: bool,
    pub is_open: bool,
    pub searched: bool,
    pub fixed: bool,
    /// Room doors decide on first contact whether they need a key
    pub needs_key: Option<bool>,
}

impl WorldObject {
    fn new(id: ObjectId, tag: &str, bounds: Aabb, interactable: bool) -> Self {
        Self {
            id,
            tag: tag.to_string(),
            kind: ObjectKind::from_tag(tag),
            bounds,
            yaw: 0.0,
            interactable,
            visible: true,
            is_open: false,
            searched: false,
            fixed: false,
            needs_key: None,
        }
    }

    /// Picked up or otherwise gone from the scene
    pub fn deactivate(&mut self) {
        self.interactable = false;
        self.visible = false;
    }

    /// Quarter turn on the hinge, pulled half a unit back toward the corridor
    pub fn swing_open(&mut self) {
        self.yaw += FRAC_PI_2;
        self.bounds.center.x += if self.bounds.center.x > 0.0 { -0.5 } else { 0.5 };
        let half = self.bounds.half_extents;
        self.bounds.half_extents = Vec3::new(half.z, half.y, half.x);
        self.is_open = true;
    }
}

/// One ray intersection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    pub id: ObjectId,
    pub distance: f32,
}

/// The built scene for one level/floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub level: LevelState,
    pub floor: u32,
    /// Epoch of the run this scene was built for
    pub epoch: u64,
    /// Walkable volume for the player's feet/eyes
    pub bounds: Aabb,
    pub spawn: Vec3,
    pub spawn_yaw: f32,
    objects: Vec<WorldObject>,
}

impl World {
    fn empty(
        level: LevelState,
        floor: u32,
        epoch: u64,
        bounds: Aabb,
        spawn: Vec3,
        spawn_yaw: f32,
    ) -> Self {
        Self {
            level,
            floor,
            epoch,
            bounds,
            spawn,
            spawn_yaw,
            objects: Vec::new(),
        }
    }

    /// Build the layout for `level`
    pub fn build(level: LevelState, floor: u32, epoch: u64) -> Self {
        let world = match level {
            LevelState::Rooftop => Self::rooftop(floor, epoch),
            LevelState::Apartment => Self::apartment_floor(floor, epoch),
            LevelState::Electrical => Self::electrical_room(floor, epoch),
        };
        log::info!(
            "Built {:?} scene for floor {} ({} objects)",
            level,
            floor,
            world.objects.len()
        );
        world
    }

    /// Whether this scene is the one the store currently describes
    pub fn matches(&self, level: LevelState, floor: u32, epoch: u64) -> bool {
        self.level == level && self.floor == floor && self.epoch == epoch
    }

    fn rooftop(floor: u32, epoch: u64) -> Self {
        let bounds = Aabb::new(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(ROOF_HALF_EXTENT - 0.5, 1.0, ROOF_HALF_EXTENT - 0.5),
        );
        let mut world = Self::empty(
            LevelState::Rooftop,
            floor,
            epoch,
            bounds,
            Vec3::new(0.0, PLAYER_HEIGHT_STANDING, -6.0),
            PI,
        );

        // Stair housing with the roof door on its west face
        world.spawn_object(
            "STAIR_HOUSING",
            Aabb::from_size(Vec3::new(5.0, 1.5, 5.0), Vec3::new(4.0, 3.0, 4.0)),
            false,
        );
        world.spawn_object(
            "DOOR_ROOF",
            Aabb::from_size(Vec3::new(2.9, 1.0, 5.0), Vec3::new(0.2, 2.0, 1.5)),
            true,
        );
        world.spawn_object(
            "KEY_ROOF",
            Aabb::from_size(Vec3::new(2.0, 0.2, 2.0), Vec3::new(0.2, 0.2, 0.4)),
            true,
        );
        world
    }

    fn apartment_floor(floor: u32, epoch: u64) -> Self {
        let bounds = Aabb::new(
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(7.0, 1.0, CORRIDOR_HALF_LENGTH),
        );
        let mut world = Self::empty(
            LevelState::Apartment,
            floor,
            epoch,
            bounds,
            Vec3::new(0.0, PLAYER_HEIGHT_STANDING, -CORRIDOR_HALF_LENGTH + 2.0),
            PI,
        );

        // Two rows of flats along the corridor, one drawer in each
        for z in [-9.0, -3.0, 3.0, 9.0] {
            for side in [-1.0f32, 1.0] {
                let door_x = side * (CORRIDOR_HALF_WIDTH + 0.1);
                world.spawn_object(
                    "DOOR_ROOM",
                    Aabb::from_size(Vec3::new(door_x, 1.0, z), Vec3::new(0.2, 2.0, 1.5)),
                    true,
                );
                world.spawn_object(
                    "DRAWER",
                    Aabb::from_size(Vec3::new(side * 5.0, 0.5, z), Vec3::new(1.0, 1.0, 0.6)),
                    true,
                );
            }
        }
        world.spawn_object(
            "STAIRS_SIGN",
            Aabb::from_size(Vec3::new(0.0, 2.5, CORRIDOR_HALF_LENGTH), Vec3::new(1.5, 0.4, 0.1)),
            false,
        );
        world
    }

    fn electrical_room(floor: u32, epoch: u64) -> Self {
        let half = ELECTRICAL_HALF_EXTENT;
        let bounds = Aabb::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(half - 0.5, 1.0, half - 0.5));
        let mut world = Self::empty(
            LevelState::Electrical,
            floor,
            epoch,
            bounds,
            Vec3::new(0.0, PLAYER_HEIGHT_STANDING, 5.0),
            0.0,
        );

        for (x, z) in [(-1.0, -4.0), (1.0, -4.0), (-1.0, 4.0), (1.0, 4.0)] {
            world.spawn_object(
                "CABLE_BOX",
                Aabb::from_size(Vec3::new(x * (half - 0.2), 1.2, z), Vec3::new(0.3, 0.8, 0.6)),
                true,
            );
        }
        world.spawn_object(
            "EXIT_DOOR_ELEC",
            Aabb::from_size(Vec3::new(0.0, 1.0, -(half - 0.1)), Vec3::new(1.5, 2.0, 0.2)),
            true,
        );
        world
    }

    /// Add an object; the id is its index in spawn order
    pub fn spawn_object(&mut self, tag: &str, bounds: Aabb, interactable: bool) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(WorldObject::new(id, tag, bounds, interactable));
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&WorldObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut WorldObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn objects(&self) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter()
    }

    pub fn objects_of(&self, kind: ObjectKind) -> impl Iterator<Item = &WorldObject> {
        self.objects.iter().filter(move |o| o.kind == Some(kind))
    }

    /// Every visible object the ray crosses, nearest first. Equal distances
    /// keep spawn order.
    pub fn raycast(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits: Vec<RayHit> = self
            .objects
            .iter()
            .filter(|o| o.visible)
            .filter_map(|o| {
                ray_aabb(ray, &o.bounds).map(|distance| RayHit { id: o.id, distance })
            })
            .collect();
        hits.sort_by(|a, b| {
            a.distance
                .partial_cmp(&b.distance)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        hits
    }

    /// Nearest interactable hit closer than `max_distance`.
    /// Non-interactable objects in front do not block it.
    pub fn nearest_interactable(&self, ray: &Ray, max_distance: f32) -> Option<RayHit> {
        self.raycast(ray).into_iter().find(|hit| {
            hit.distance < max_distance
                && self.get(hit.id).is_some_and(|o| o.interactable)
        })
    }

    /// Stairwell trigger at the far end of an apartment corridor
    pub fn in_stairwell(&self, p: Vec3) -> bool {
        self.level == LevelState::Apartment
            && p.z > STAIRWELL_TRIGGER_Z
            && p.x > -CORRIDOR_HALF_WIDTH
            && p.x < CORRIDOR_HALF_WIDTH
    }
}
