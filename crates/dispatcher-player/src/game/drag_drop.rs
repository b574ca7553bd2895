//! Drag & Drop engine: picking up trucks and dropping them on docks
//!
//!   - Mouse down on a truck → start drag (record grab offset)
//!   - Mouse move → truck follows the pointer
//!   - Mouse up → dock under the truck's center receives it, otherwise the
//!     truck backs out toward the lane it came from
//!
//! The DragDropState is owned by GameState and fed the pointer every frame.

use crate::game::level::Dock;
use crate::game::truck::Truck;

/// What happened when a drop occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropResult {
    /// Truck released over a dock (index into the dock list)
    Docked { truck_id: u32, dock_index: usize },
    /// Truck released over empty floor; it now returns to its lane
    Released { truck_id: u32 },
    /// No drag was active
    Nothing,
}

/// Central drag & drop state
#[derive(Debug, Default)]
pub struct DragDropState {
    /// Id of the truck being dragged (ids survive removals, indices don't)
    dragging_id: Option<u32>,
    /// Offset from truck origin to grab point
    grab_offset_x: f32,
    grab_offset_y: f32,
    /// Whether the mouse was down last frame
    prev_mouse_down: bool,
}

/// First dock in list order containing the point
pub fn dock_at(docks: &[Dock], x: f32, y: f32) -> Option<usize> {
    docks.iter().position(|d| d.contains(x, y))
}

impl DragDropState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging_id().is_some()
    }

    pub fn dragging_id(&self) -> Option<u32> {
        self.dragging_id
    }

    /// First truck in spawn order under the pointer
    pub fn truck_at(trucks: &[Truck], px: f32, py: f32) -> Option<usize> {
        trucks.iter().position(|t| t.contains(px, py))
    }

    // -----------------------------------------------------------------------
    // Input handlers
    // -----------------------------------------------------------------------

    /// Call on mouse down. Returns true if drag started.
    pub fn on_mouse_down(&mut self, trucks: &mut [Truck], mx: f32, my: f32) -> bool {
        if self.dragging_id.is_some() {
            return false;
        }

        match Self::truck_at(trucks, mx, my) {
            Some(idx) => {
                let truck = &mut trucks[idx];
                truck.dragging = true;
                truck.returning = false;
                self.grab_offset_x = mx - truck.rect.x;
                self.grab_offset_y = my - truck.rect.y;
                self.dragging_id = Some(truck.id);
                tracing::debug!("Drag start: truck {} ({}) at ({}, {})", truck.id, truck.kind.name(), mx, my);
                true
            }
            None => false,
        }
    }

    /// Call on mouse move while button is held.
    pub fn on_mouse_move(&mut self, trucks: &mut [Truck], mx: f32, my: f32) {
        if let Some(truck) = self.dragged_mut(trucks) {
            truck.rect.x = mx - self.grab_offset_x;
            truck.rect.y = my - self.grab_offset_y;
        }
    }

    /// Call on mouse up. Returns the drop result.
    pub fn on_mouse_up(&mut self, trucks: &mut [Truck], docks: &[Dock]) -> DropResult {
        let Some(id) = self.dragging_id.take() else {
            return DropResult::Nothing;
        };
        let Some(truck) = trucks.iter_mut().find(|t| t.id == id) else {
            return DropResult::Nothing;
        };

        truck.dragging = false;
        let (cx, cy) = truck.center();
        match dock_at(docks, cx, cy) {
            Some(dock_index) => {
                tracing::debug!("Drag end: truck {} over dock {}", id, dock_index);
                DropResult::Docked { truck_id: id, dock_index }
            }
            None => {
                truck.returning = true;
                tracing::debug!("Drag end: truck {} on open floor, returning", id);
                DropResult::Released { truck_id: id }
            }
        }
    }

    /// Process mouse input for a frame. Call this with current mouse state.
    ///
    /// Returns a DropResult if a drop just occurred.
    pub fn process_mouse(
        &mut self,
        trucks: &mut [Truck],
        docks: &[Dock],
        mx: f32,
        my: f32,
        mouse_down: bool,
    ) -> DropResult {
        let was_down = self.prev_mouse_down;
        self.prev_mouse_down = mouse_down;

        if mouse_down && !was_down {
            self.on_mouse_down(trucks, mx, my);
            DropResult::Nothing
        } else if mouse_down && was_down {
            self.on_mouse_move(trucks, mx, my);
            DropResult::Nothing
        } else if !mouse_down && was_down {
            self.on_mouse_up(trucks, docks)
        } else {
            DropResult::Nothing
        }
    }

    /// Track the button level without acting on it (input outside play)
    pub fn sync_button(&mut self, mouse_down: bool) {
        self.prev_mouse_down = mouse_down;
    }

    /// Drop the current drag without docking; the truck returns to its lane
    pub fn cancel(&mut self, trucks: &mut [Truck]) {
        if let Some(truck) = self.dragged_mut(trucks) {
            truck.dragging = false;
            truck.returning = true;
            tracing::debug!("Drag cancelled: truck {}", truck.id);
        }
        self.dragging_id = None;
    }

    /// Forget the drag if its truck was removed from the floor
    pub fn forget(&mut self, truck_id: u32) {
        if self.dragging_id == Some(truck_id) {
            self.dragging_id = None;
        }
    }

    /// Clear all state (new round)
    pub fn reset(&mut self) {
        self.dragging_id = None;
        self.grab_offset_x = 0.0;
        self.grab_offset_y = 0.0;
    }

    fn dragged_mut<'a>(&self, trucks: &'a mut [Truck]) -> Option<&'a mut Truck> {
        let id = self.dragging_id?;
        trucks.iter_mut().find(|t| t.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::level::{docks_for, LevelId, TruckKind};

    fn floor() -> Vec<Truck> {
        vec![
            Truck::new(1, TruckKind::INBOUND, 100.0, 100.0, 1.0),
            Truck::new(2, TruckKind::OUTBOUND, 120.0, 110.0, 1.0),
        ]
    }

    #[test]
    fn grabs_first_truck_in_spawn_order() {
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        // (130, 115) lies inside both trucks
        assert!(dd.on_mouse_down(&mut trucks, 130.0, 115.0));
        assert_eq!(dd.dragging_id(), Some(1));
        assert!(trucks[0].dragging);
        assert!(!trucks[1].dragging);
    }

    #[test]
    fn grab_edges_are_inclusive() {
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        assert!(dd.on_mouse_down(&mut trucks, 100.0, 100.0));
        let mut dd = DragDropState::new();
        assert!(!dd.on_mouse_down(&mut trucks, 99.0, 100.0));
    }

    #[test]
    fn truck_follows_pointer_keeping_offset() {
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        dd.on_mouse_down(&mut trucks, 110.0, 105.0);
        dd.on_mouse_move(&mut trucks, 310.0, 405.0);
        assert_eq!((trucks[0].rect.x, trucks[0].rect.y), (300.0, 400.0));
    }

    #[test]
    fn drop_on_dock_uses_truck_center() {
        let docks = docks_for(LevelId::FIRST);
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        dd.on_mouse_down(&mut trucks, 100.0, 100.0);
        // grab point is the truck's top-left corner; move it so the center
        // (x+30, y+15) lands inside the inbound dock at (20..120, 200..400)
        dd.on_mouse_move(&mut trucks, 40.0, 250.0);
        let result = dd.on_mouse_up(&mut trucks, &docks);
        assert_eq!(result, DropResult::Docked { truck_id: 1, dock_index: 0 });
        assert!(!trucks[0].dragging);
        assert!(!dd.is_dragging());
    }

    #[test]
    fn overlapping_docks_first_in_list_wins() {
        // level 2: inbound docks at (20..120, 200..400) and (80..180, 310..510)
        let docks = docks_for(LevelId::new(2).unwrap());
        assert!(docks[0].contains(100.0, 350.0) && docks[1].contains(100.0, 350.0));

        let mut trucks = floor();
        let mut dd = DragDropState::new();
        dd.on_mouse_down(&mut trucks, 100.0, 100.0);
        dd.on_mouse_move(&mut trucks, 70.0, 335.0);
        assert_eq!(trucks[0].rect.center(), (100.0, 350.0));
        assert_eq!(dd.on_mouse_up(&mut trucks, &docks), DropResult::Docked { truck_id: 1, dock_index: 0 });
    }

    #[test]
    fn drop_on_open_floor_sends_truck_back() {
        let docks = docks_for(LevelId::FIRST);
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        dd.on_mouse_down(&mut trucks, 100.0, 100.0);
        dd.on_mouse_move(&mut trucks, 400.0, 300.0);
        assert_eq!(dd.on_mouse_up(&mut trucks, &docks), DropResult::Released { truck_id: 1 });
        assert!(trucks[0].returning);
    }

    #[test]
    fn process_mouse_tracks_edges() {
        let docks = docks_for(LevelId::FIRST);
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        assert_eq!(dd.process_mouse(&mut trucks, &docks, 100.0, 100.0, true), DropResult::Nothing);
        assert!(dd.is_dragging());
        assert_eq!(dd.process_mouse(&mut trucks, &docks, 60.0, 300.0, true), DropResult::Nothing);
        assert_eq!(
            dd.process_mouse(&mut trucks, &docks, 60.0, 300.0, false),
            DropResult::Docked { truck_id: 1, dock_index: 0 }
        );
        assert_eq!(dd.process_mouse(&mut trucks, &docks, 60.0, 300.0, false), DropResult::Nothing);
    }

    #[test]
    fn held_button_does_not_start_a_drag() {
        let docks = docks_for(LevelId::FIRST);
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        dd.sync_button(true);
        dd.process_mouse(&mut trucks, &docks, 100.0, 100.0, true);
        assert!(!dd.is_dragging());
    }

    #[test]
    fn cancel_and_forget() {
        let mut trucks = floor();
        let mut dd = DragDropState::new();
        dd.on_mouse_down(&mut trucks, 100.0, 100.0);
        dd.cancel(&mut trucks);
        assert!(!dd.is_dragging());
        assert!(trucks[0].returning && !trucks[0].dragging);

        dd.on_mouse_down(&mut trucks, 100.0, 100.0);
        dd.forget(1);
        assert_eq!(dd.on_mouse_up(&mut trucks, &[]), DropResult::Nothing);
    }
}
