//! Interaction dispatch
//!
//! Per playing tick: first the apartment stairwell trigger, then (if the
//! stairwell did not fire) at most one interact press resolved against the
//! nearest interactable under the crosshair.

use super::rolls::RollSource;
use super::schedule::DeferredAction;
use super::session::{GameEvent, Session};
use super::state::{ItemType, LevelState};
use super::world::{ObjectId, ObjectKind};

impl<R: RollSource> Session<R> {
    /// Descend if the player walked into the stairwell.
    /// Returns true when it fired; the rest of the dispatch is skipped.
    pub fn check_stairwell(&mut self) -> bool {
        if self.progress.level_state != LevelState::Apartment
            || !self.world.in_stairwell(self.player.position)
        {
            return false;
        }

        let text = format!(
            "{}: {} {}",
            self.tr("floor_descended"),
            self.tr("floor"),
            self.progress.floor + 1
        );
        self.notify_text(text);
        self.progress.next_floor();
        let floor = self.progress.floor;
        log::info!("Descended to floor {floor}");
        self.emit(GameEvent::FloorDescended(floor));
        self.sync_world();
        true
    }

    /// Resolve one interact press. Returns the object that was hit, if any.
    /// A miss is a silent no-op.
    pub fn interact(&mut self) -> Option<ObjectId> {
        let ray = self.player.view_ray();
        let hit = self
            .world
            .nearest_interactable(&ray, self.tuning.interaction_distance)?;
        self.interact_with(hit.id);
        Some(hit.id)
    }

    /// Apply the interaction for object `id`, whatever the player is looking
    /// at. Objects without a recognized tag are ignored.
    pub fn interact_with(&mut self, id: ObjectId) {
        let Some(kind) = self.world.get(id).and_then(|o| o.kind) else {
            return;
        };
        match kind {
            ObjectKind::KeyRoof => self.pick_up_roof_key(id),
            ObjectKind::DoorRoof => self.try_roof_door(),
            ObjectKind::DoorRoom => self.try_room_door(id),
            ObjectKind::Drawer => self.search_drawer(id),
            ObjectKind::CableBox => self.repair_cable_box(id),
            ObjectKind::ExitDoorElec => self.try_exit_door(),
        }
    }

    fn pick_up_roof_key(&mut self, id: ObjectId) {
        let Some(key) = self.world.get_mut(id) else {
            return;
        };
        if !key.interactable {
            return;
        }
        key.deactivate();
        self.progress.add_item(ItemType::KeyRoof);
        self.notify("found_roof_key");
        self.emit(GameEvent::ItemAcquired(ItemType::KeyRoof));
    }

    fn try_roof_door(&mut self) {
        if !self.progress.has_item(ItemType::KeyRoof) {
            self.notify("locked_need_key");
            self.emit(GameEvent::DoorLocked);
            return;
        }
        self.notify("door_opening");
        // Repeated presses while it is already opening only repeat the message
        if !self.scheduler.is_pending(DeferredAction::OpenRoofDoor, self.epoch()) {
            self.schedule(self.tuning.roof_door_delay, DeferredAction::OpenRoofDoor);
            self.emit(GameEvent::DoorUnlocking);
        }
    }

    fn try_room_door(&mut self, id: ObjectId) {
        let lock_chance = self.tuning.door_lock_chance;
        let needs_key = match self.world.get(id) {
            Some(door) if door.is_open => return,
            Some(door) => door.needs_key,
            None => return,
        };
        // Each door settles its lock on first contact and keeps it
        let needs_key = match needs_key {
            Some(needs_key) => needs_key,
            None => {
                let needs_key = self.roll() < lock_chance;
                if let Some(door) = self.world.get_mut(id) {
                    door.needs_key = Some(needs_key);
                }
                needs_key
            }
        };

        if needs_key {
            if self.progress.inventory.consume(ItemType::KeyRoom).is_err() {
                self.notify("room_locked");
                self.emit(GameEvent::DoorLocked);
                return;
            }
            self.emit(GameEvent::ItemSpent(ItemType::KeyRoom));
        }

        if let Some(door) = self.world.get_mut(id) {
            door.swing_open();
        }
        self.notify("room_opened");
        self.emit(GameEvent::DoorOpened);
    }

    fn search_drawer(&mut self, id: ObjectId) {
        let key_chance = self.tuning.drawer_key_chance;
        let Some(drawer) = self.world.get_mut(id) else {
            return;
        };
        if drawer.searched {
            self.notify("drawer_searched");
            return;
        }
        drawer.searched = true;

        if self.roll() < key_chance {
            self.progress.add_item(ItemType::KeyRoom);
            self.notify("found_room_key");
            self.emit(GameEvent::ItemAcquired(ItemType::KeyRoom));
        } else {
            self.notify("drawer_empty");
            self.emit(GameEvent::DrawerEmpty);
        }
    }

    fn repair_cable_box(&mut self, id: ObjectId) {
        let Some(cable_box) = self.world.get_mut(id) else {
            return;
        };
        if cable_box.fixed {
            return;
        }
        cable_box.fixed = true;
        self.progress.fix_cable();

        let fixed = self.progress.cables_fixed;
        let required = self.tuning.cables_required;
        let text = format!("{} ({fixed}/{required})", self.tr("cable_fixed"));
        self.notify_text(text);
        self.emit(GameEvent::CableFixed { fixed, required });
    }

    fn try_exit_door(&mut self) {
        if self.progress.cables_fixed < self.tuning.cables_required {
            self.notify("fix_first");
            return;
        }
        self.notify("escape_success");
        if !self.scheduler.is_pending(DeferredAction::ResetAfterEscape, self.epoch()) {
            log::info!("Escaped with {} cables fixed", self.progress.cables_fixed);
            self.schedule(self.tuning.escape_reset_delay, DeferredAction::ResetAfterEscape);
            self.emit(GameEvent::Escaped);
        }
    }
}
