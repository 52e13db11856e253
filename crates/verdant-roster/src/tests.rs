#[cfg(test)]
mod tests {
    use verdant_core::components::Vitality;
    use verdant_core::constants::*;
    use verdant_core::enums::{AttackerKind, AttackerPhase, DamageTier, DefenderKind};

    use crate::damage::{apply_blast, apply_hit, apply_lethal, damage_tier, health_ratio};
    use crate::fsm::{evaluate, AttackerContext, DefenderContact};
    use crate::profiles::{attacker_stats, defender_stats, is_armored, presentation_kind};

    fn vitality(health: f64, armor: f64) -> Vitality {
        Vitality {
            health,
            max_health: health,
            armor,
            max_armor: armor,
        }
    }

    fn make_context(
        kind: AttackerKind,
        phase: AttackerPhase,
        gap: Option<f64>,
        has_leaped: bool,
    ) -> AttackerContext {
        AttackerContext {
            kind,
            phase,
            has_leaped,
            dying_elapsed: 0.0,
            defender_ahead: gap.map(|gap| DefenderContact {
                x: 400.0,
                gap,
                reach: (ATTACKER_WIDTH + DEFENDER_WIDTH) / 2.0,
            }),
        }
    }

    #[test]
    fn test_armor_overflow_spills_into_health() {
        let mut v = vitality(200.0, 10.0);
        let outcome = apply_hit(&mut v, 15.0);
        assert_eq!(v.armor, 0.0);
        assert!((v.health - 195.0).abs() < 1e-10);
        assert!(outcome.armor_broken);
        assert!(!outcome.depleted);
    }

    #[test]
    fn test_armor_absorbs_fully_when_sufficient() {
        let mut v = vitality(200.0, 370.0);
        let outcome = apply_hit(&mut v, 20.0);
        assert!((v.armor - 350.0).abs() < 1e-10);
        assert_eq!(v.health, 200.0);
        assert!(!outcome.armor_broken);
    }

    #[test]
    fn test_exact_armor_hit_breaks_without_overflow() {
        let mut v = vitality(200.0, 20.0);
        let outcome = apply_hit(&mut v, 20.0);
        assert_eq!(v.armor, 0.0);
        assert_eq!(v.health, 200.0);
        assert!(outcome.armor_broken);
    }

    #[test]
    fn test_health_never_negative() {
        let mut v = vitality(10.0, 0.0);
        let outcome = apply_hit(&mut v, 20.0);
        assert_eq!(v.health, 0.0);
        assert!(outcome.depleted);

        // Overflow larger than remaining health still clamps.
        let mut v = vitality(5.0, 5.0);
        apply_hit(&mut v, 100.0);
        assert_eq!(v.health, 0.0);
        assert_eq!(v.armor, 0.0);
    }

    #[test]
    fn test_blast_bypasses_armor() {
        let mut v = vitality(200.0, 1100.0);
        let outcome = apply_blast(&mut v, 150.0);
        assert_eq!(v.armor, 0.0);
        assert!((v.health - 50.0).abs() < 1e-10);
        assert!(outcome.armor_broken);

        let mut v = vitality(200.0, 1100.0);
        assert!(apply_blast(&mut v, BLAST_DAMAGE).depleted);
    }

    #[test]
    fn test_lethal_zeroes_both_pools() {
        let mut v = vitality(200.0, 370.0);
        let outcome = apply_lethal(&mut v);
        assert_eq!(v.health, 0.0);
        assert_eq!(v.armor, 0.0);
        assert!(outcome.depleted);
    }

    #[test]
    fn test_damage_tiers() {
        let wall = defender_stats(DefenderKind::WallNut);
        let mut v = vitality(wall.health, 0.0);
        assert_eq!(damage_tier(health_ratio(&v)), DamageTier::Intact);

        v.health = wall.health * 0.5;
        assert_eq!(damage_tier(health_ratio(&v)), DamageTier::Cracked);

        v.health = wall.health * 0.2;
        assert_eq!(damage_tier(health_ratio(&v)), DamageTier::Crumbling);
    }

    #[test]
    fn test_kind_tables() {
        assert_eq!(defender_stats(DefenderKind::Sunflower).cost, 50);
        assert_eq!(defender_stats(DefenderKind::PotatoMine).cost, 25);
        for kind in DefenderKind::ALL {
            let stats = defender_stats(kind);
            assert!(stats.health > 0.0, "{kind:?} needs health");
            assert!(stats.cooldown_secs > 0.0, "{kind:?} needs a cooldown");
        }
        assert!(!is_armored(AttackerKind::Normal));
        assert!(is_armored(AttackerKind::Buckethead));
        assert_eq!(attacker_stats(AttackerKind::PoleVaulter).speed, 30.0);
    }

    #[test]
    fn test_presentation_kind_after_armor_breaks() {
        assert_eq!(
            presentation_kind(AttackerKind::Conehead, false),
            AttackerKind::Conehead
        );
        assert_eq!(
            presentation_kind(AttackerKind::Conehead, true),
            AttackerKind::Normal
        );
        assert_eq!(
            presentation_kind(AttackerKind::PoleVaulter, true),
            AttackerKind::PoleVaulter
        );
    }

    #[test]
    fn test_advancing_to_engaging_on_contact() {
        let ctx = make_context(AttackerKind::Normal, AttackerPhase::Advancing, Some(40.0), false);
        let update = evaluate(&ctx);
        assert!(update.phase_changed);
        assert_eq!(update.new_phase, AttackerPhase::Engaging);
        assert!(update.leap_to.is_none());
    }

    #[test]
    fn test_engaging_resumes_when_defender_gone() {
        let ctx = make_context(AttackerKind::Normal, AttackerPhase::Engaging, None, false);
        let update = evaluate(&ctx);
        assert!(update.phase_changed);
        assert_eq!(update.new_phase, AttackerPhase::Advancing);
    }

    #[test]
    fn test_leaper_hops_once() {
        let ctx = make_context(AttackerKind::PoleVaulter, AttackerPhase::Advancing, Some(60.0), false);
        let update = evaluate(&ctx);
        assert_eq!(update.new_phase, AttackerPhase::Advancing);
        assert_eq!(update.leap_to, Some(400.0 - LEAP_LANDING_OFFSET));

        // After the hop it engages like the base kind.
        let ctx = make_context(AttackerKind::PoleVaulter, AttackerPhase::Advancing, Some(40.0), true);
        let update = evaluate(&ctx);
        assert!(update.leap_to.is_none());
        assert_eq!(update.new_phase, AttackerPhase::Engaging);
    }

    #[test]
    fn test_dying_becomes_removed_after_duration() {
        let mut ctx = make_context(AttackerKind::Normal, AttackerPhase::Dying, Some(10.0), false);
        ctx.dying_elapsed = ATTACKER_DYING_SECS - 0.01;
        assert!(!evaluate(&ctx).phase_changed);

        ctx.dying_elapsed = ATTACKER_DYING_SECS;
        let update = evaluate(&ctx);
        assert!(update.phase_changed);
        assert_eq!(update.new_phase, AttackerPhase::Removed);

        ctx.phase = AttackerPhase::Removed;
        assert!(!evaluate(&ctx).phase_changed);
    }
}
