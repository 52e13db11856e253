#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use crate::commands::PlayerCommand;
    use crate::constants::*;
    use crate::enums::*;
    use crate::events::GameEvent;
    use crate::state::{EntityView, GameStateSnapshot, Lifecycle};
    use crate::types::{column_of, lane_center_y, world_to_grid, GridCell, Position, SimTime};

    /// Commands are tagged by "type" on the wire.
    #[test]
    fn test_command_wire_format() {
        let cmd = PlayerCommand::PlaceDefender {
            kind: DefenderKind::Peashooter,
            row: 2,
            col: 4,
        };
        let json = serde_json::to_string(&cmd).unwrap();
        assert!(json.contains("\"type\":\"PlaceDefender\""), "got {json}");

        let parsed: PlayerCommand =
            serde_json::from_str(r#"{"type":"CollectResource","entity":77}"#).unwrap();
        assert_eq!(parsed, PlayerCommand::CollectResource { entity: 77 });
    }

    #[test]
    fn test_cooldown_update_uses_kind_names_as_keys() {
        let mut fractions = BTreeMap::new();
        fractions.insert(DefenderKind::Sunflower, 0.5);
        fractions.insert(DefenderKind::CherryBomb, 1.0);
        let event = GameEvent::CooldownUpdate { fractions };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"Sunflower\":0.5"), "got {json}");
        let back: GameEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }

    #[test]
    fn test_snapshot_serde() {
        let mut snapshot = GameStateSnapshot::default();
        snapshot.entities.push(EntityView {
            id: 1,
            kind: EntityKind::Attacker,
            alive: true,
            position: Position::new(500.0, lane_center_y(1), ATTACKER_WIDTH, ATTACKER_HEIGHT),
            health_ratio: 0.25,
            armor_broken: true,
            lifecycle: Lifecycle::Attacker {
                kind: AttackerKind::Normal,
                phase: AttackerPhase::Engaging,
            },
            damage_tier: None,
        });
        snapshot.events.push(GameEvent::PhaseChanged {
            phase: GamePhase::Playing,
        });

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.entities, snapshot.entities);
        assert_eq!(back.events, snapshot.events);

        let empty = serde_json::to_string(&GameStateSnapshot::default()).unwrap();
        assert!(
            empty.len() < 512,
            "Empty snapshot should be small, was {} bytes",
            empty.len()
        );
    }

    #[test]
    fn test_attacker_phase_activity() {
        assert!(AttackerPhase::Advancing.is_active());
        assert!(AttackerPhase::Engaging.is_active());
        assert!(!AttackerPhase::Dying.is_active());
        assert!(!AttackerPhase::Removed.is_active());
        assert!(GamePhase::Won.is_terminal());
        assert!(!GamePhase::Paused.is_terminal());
    }

    /// Touching edges are not an overlap.
    #[test]
    fn test_position_overlap_is_strict() {
        let a = Position::new(100.0, 100.0, 20.0, 20.0);
        let touching = Position::new(120.0, 100.0, 20.0, 20.0);
        let inside = Position::new(119.0, 100.0, 20.0, 20.0);
        let other_lane = Position::new(100.0, 200.0, 20.0, 20.0);

        assert!(!a.overlaps(&touching));
        assert!(a.overlaps(&inside));
        assert!(!a.overlaps(&other_lane));
        assert!(a.overlaps_horizontally(&other_lane));
    }

    #[test]
    fn test_grid_mapping() {
        let cell = GridCell::new(0, 0);
        let (x, y) = cell.center();
        assert!((x - 110.0).abs() < 1e-10);
        assert!((y - 147.5).abs() < 1e-10);
        assert_eq!(world_to_grid(x, y), Some(cell));

        let far = GridCell::new(4, 8);
        let (fx, fy) = far.center();
        assert_eq!(world_to_grid(fx, fy), Some(far));

        // Left of the lawn, above it, right of it.
        assert_eq!(world_to_grid(60.0, 147.5), None);
        assert_eq!(world_to_grid(110.0, 50.0), None);
        assert_eq!(world_to_grid(GRID_OFFSET_X + 9.0 * CELL_WIDTH + 1.0, 147.5), None);

        assert_eq!(column_of(60.0), -1);
        assert!(!GridCell::new(GRID_ROWS, 0).in_bounds());
        assert!(!GridCell::new(0, -1).in_bounds());
    }

    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(DT);
        }
        assert_eq!(time.tick, 60);
        // 60 ticks at 60Hz = 1 second
        assert!((time.elapsed_secs - 1.0).abs() < 1e-9);
    }
}
