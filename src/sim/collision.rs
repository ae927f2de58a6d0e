//! Contact detection and resolution
//!
//! Detection is a plain pairwise bounding-box pass over the store, filtered
//! by collision layers. Only pairs that start overlapping this frame become
//! contact events. Resolution applies the contact table to one unordered
//! pair; it is symmetric and a no-op once either side is dead.

use std::collections::HashSet;

use glam::Vec2;

use super::entity::{EntityId, EntityKind};
use super::state::Score;
use super::store::EntityStore;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center(center: Vec2, size: Vec2) -> Self {
        let half = size / 2.0;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Strict overlap; boxes sharing only an edge do not touch
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min.x < other.max.x
            && other.min.x < self.max.x
            && self.min.y < other.max.y
            && other.min.y < self.max.y
    }

    /// Point inside or on the boundary
    pub fn contains_point(&self, p: Vec2) -> bool {
        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }
}

/// Two entities found overlapping (`a` has the lower id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    pub a: EntityId,
    pub b: EntityId,
}

impl Contact {
    pub fn new(a: EntityId, b: EntityId) -> Self {
        if a <= b { Self { a, b } } else { Self { a: b, b: a } }
    }
}

/// All overlapping pairs whose layers allow contact, in id order
pub fn detect_overlaps(store: &EntityStore) -> Vec<Contact> {
    let bodies: Vec<_> = store
        .query(|e| e.kind.layer() != 0)
        .map(|e| (e.id, e.kind, e.bounds()))
        .collect();

    let mut contacts = Vec::new();
    for (i, (id_a, kind_a, box_a)) in bodies.iter().enumerate() {
        for (id_b, kind_b, box_b) in &bodies[i + 1..] {
            if kind_a.can_contact(kind_b) && box_a.overlaps(box_b) {
                contacts.push(Contact::new(*id_a, *id_b));
            }
        }
    }
    contacts
}

/// Remembers which pairs were touching last frame so each physical
/// contact is reported once, when it begins
#[derive(Debug, Clone, Default)]
pub struct ContactTracker {
    active: HashSet<Contact>,
}

impl ContactTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contacts that started since the previous call
    pub fn begin_contacts(&mut self, store: &EntityStore) -> Vec<Contact> {
        let current = detect_overlaps(store);
        let began = current
            .iter()
            .copied()
            .filter(|c| !self.active.contains(c))
            .collect();
        self.active = current.into_iter().collect();
        began
    }

    pub fn clear(&mut self) {
        self.active.clear();
    }
}

/// What a resolved contact did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactOutcome {
    /// Shot killed an enemy (score +1)
    EnemyDestroyed { enemy: EntityId, shot: EntityId },
    /// Bomb took out a shield block
    ShieldHit { shield: EntityId, bomb: EntityId },
    /// Shot and bomb cancelled each other
    ProjectilesCancelled { shot: EntityId, bomb: EntityId },
    /// Formation reached the shields: the game is lost
    FormationLanded { enemy: EntityId, shield: EntityId },
    /// Shot hit something that absorbs it
    ShotAbsorbed { shot: EntityId },
    /// Nothing happened (no rule, or an entity already gone)
    Ignored,
}

/// Order an unordered pair so the first element satisfies `first`
fn match_pair(
    (a, ka): (EntityId, EntityKind),
    (b, kb): (EntityId, EntityKind),
    first: fn(&EntityKind) -> bool,
    second: fn(&EntityKind) -> bool,
) -> Option<(EntityId, EntityId)> {
    if first(&ka) && second(&kb) {
        Some((a, b))
    } else if first(&kb) && second(&ka) {
        Some((b, a))
    } else {
        None
    }
}

/// Apply the contact table to one pair. First matching rule wins.
pub fn resolve_contact(
    store: &mut EntityStore,
    score: &mut Score,
    a: EntityId,
    b: EntityId,
) -> ContactOutcome {
    if a == b {
        return ContactOutcome::Ignored;
    }
    let (Some(ea), Some(eb)) = (store.get(a), store.get(b)) else {
        return ContactOutcome::Ignored;
    };
    let pa = (a, ea.kind);
    let pb = (b, eb.kind);

    if let Some((enemy, shot)) = match_pair(pa, pb, EntityKind::is_enemy, EntityKind::is_shot) {
        store.remove(enemy);
        store.remove(shot);
        score.increment();
        return ContactOutcome::EnemyDestroyed { enemy, shot };
    }

    if let Some((shield, bomb)) = match_pair(pa, pb, EntityKind::is_shield, EntityKind::is_bomb) {
        store.remove(shield);
        store.remove(bomb);
        return ContactOutcome::ShieldHit { shield, bomb };
    }

    if let Some((shot, bomb)) = match_pair(pa, pb, EntityKind::is_shot, EntityKind::is_bomb) {
        store.remove(shot);
        store.remove(bomb);
        return ContactOutcome::ProjectilesCancelled { shot, bomb };
    }

    if let Some((enemy, shield)) = match_pair(pa, pb, EntityKind::is_enemy, EntityKind::is_shield)
    {
        return ContactOutcome::FormationLanded { enemy, shield };
    }

    let shot = match (pa.1.is_shot(), pb.1.is_shot()) {
        // Two shots: drop the older one so either pair order agrees
        (true, true) => Some(a.min(b)),
        (true, false) => Some(a),
        (false, true) => Some(b),
        (false, false) => None,
    };
    if let Some(shot) = shot {
        store.remove(shot);
        return ContactOutcome::ShotAbsorbed { shot };
    }

    ContactOutcome::Ignored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EnemyTier;
    use proptest::prelude::*;

    const ENEMY: EntityKind = EntityKind::Enemy {
        tier: EnemyTier::One,
    };
    const SHIELD: EntityKind = EntityKind::Shield { house: 0, block: 4 };

    fn spawn(store: &mut EntityStore, kind: EntityKind, x: f32, y: f32) -> EntityId {
        store.spawn(kind, Vec2::new(x, y), Vec2::new(20.0, 20.0))
    }

    #[test]
    fn test_aabb_overlap_and_contains() {
        let a = Aabb::from_center(Vec2::ZERO, Vec2::new(10.0, 10.0));
        let b = Aabb::from_center(Vec2::new(9.0, 0.0), Vec2::new(10.0, 10.0));
        let edge = Aabb::from_center(Vec2::new(10.0, 0.0), Vec2::new(10.0, 10.0));
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
        assert!(!a.overlaps(&edge));
        assert!(a.contains_point(Vec2::new(5.0, -5.0)));
        assert!(!a.contains_point(Vec2::new(5.1, 0.0)));
    }

    #[test]
    fn test_detect_overlaps_filters_layers() {
        let mut store = EntityStore::new();
        let enemy = spawn(&mut store, ENEMY, 0.0, 0.0);
        let shot = spawn(&mut store, EntityKind::PlayerShot, 5.0, 5.0);
        let bomb = spawn(&mut store, EntityKind::EnemyBomb, 0.0, 5.0);
        // Ship overlapping everything: no body
        spawn(&mut store, EntityKind::Spaceship, 0.0, 0.0);
        spawn(&mut store, ENEMY, 500.0, 0.0);

        // Enemy and bomb overlap but cannot contact
        let contacts = detect_overlaps(&store);
        assert_eq!(
            contacts,
            vec![Contact::new(enemy, shot), Contact::new(shot, bomb)]
        );
    }

    #[test]
    fn test_overlapping_shots_keep_the_newer() {
        let mut store = EntityStore::new();
        let mut score = Score::default();
        let older = spawn(&mut store, EntityKind::PlayerShot, 0.0, 0.0);
        let newer = spawn(&mut store, EntityKind::PlayerShot, 0.0, 4.0);

        let contacts = detect_overlaps(&store);
        assert_eq!(contacts, vec![Contact::new(older, newer)]);

        let c = contacts[0];
        assert_eq!(
            resolve_contact(&mut store, &mut score, c.b, c.a),
            ContactOutcome::ShotAbsorbed { shot: older }
        );
        assert!(!store.is_alive(older));
        assert!(store.is_alive(newer));
    }

    #[test]
    fn test_tracker_reports_contact_once() {
        let mut store = EntityStore::new();
        let enemy = spawn(&mut store, ENEMY, 0.0, 0.0);
        let bomb = spawn(&mut store, EntityKind::EnemyBomb, 0.0, 5.0);
        let shield = spawn(&mut store, SHIELD, 0.0, 200.0);
        let mut tracker = ContactTracker::new();

        // Enemy and bomb cannot contact; nothing to report
        assert!(tracker.begin_contacts(&store).is_empty());

        store.get_mut(shield).unwrap().pos = Vec2::new(0.0, 8.0);
        let began = tracker.begin_contacts(&store);
        assert_eq!(began, vec![Contact::new(enemy, shield), Contact::new(bomb, shield)]);

        // Still overlapping next frame: no new events
        assert!(tracker.begin_contacts(&store).is_empty());

        // Separate then touch again: reported again
        store.get_mut(shield).unwrap().pos = Vec2::new(0.0, 200.0);
        assert!(tracker.begin_contacts(&store).is_empty());
        store.get_mut(shield).unwrap().pos = Vec2::new(0.0, 8.0);
        assert_eq!(tracker.begin_contacts(&store).len(), 2);
    }

    #[test]
    fn test_enemy_shot_scores_once() {
        let mut store = EntityStore::new();
        let mut score = Score::default();
        let enemy = spawn(&mut store, ENEMY, 0.0, 0.0);
        let shot = spawn(&mut store, EntityKind::PlayerShot, 0.0, 0.0);

        let outcome = resolve_contact(&mut store, &mut score, shot, enemy);
        assert_eq!(outcome, ContactOutcome::EnemyDestroyed { enemy, shot });
        assert_eq!(score.value(), 1);
        assert!(!store.is_alive(enemy));
        assert!(!store.is_alive(shot));

        // Duplicate event
        let again = resolve_contact(&mut store, &mut score, enemy, shot);
        assert_eq!(again, ContactOutcome::Ignored);
        assert_eq!(score.value(), 1);
    }

    #[test]
    fn test_shield_bomb_and_shot_bomb() {
        let mut store = EntityStore::new();
        let mut score = Score::default();
        let shield = spawn(&mut store, SHIELD, 0.0, 0.0);
        let bomb = spawn(&mut store, EntityKind::EnemyBomb, 0.0, 0.0);
        assert_eq!(
            resolve_contact(&mut store, &mut score, bomb, shield),
            ContactOutcome::ShieldHit { shield, bomb }
        );

        let shot = spawn(&mut store, EntityKind::PlayerShot, 0.0, 0.0);
        let bomb = spawn(&mut store, EntityKind::EnemyBomb, 0.0, 0.0);
        assert_eq!(
            resolve_contact(&mut store, &mut score, bomb, shot),
            ContactOutcome::ProjectilesCancelled { shot, bomb }
        );
        assert_eq!(score.value(), 0);
        assert!(store.is_empty());
    }

    #[test]
    fn test_enemy_shield_lands_without_removal() {
        let mut store = EntityStore::new();
        let mut score = Score::default();
        let enemy = spawn(&mut store, ENEMY, 0.0, 0.0);
        let shield = spawn(&mut store, SHIELD, 0.0, 0.0);
        assert_eq!(
            resolve_contact(&mut store, &mut score, shield, enemy),
            ContactOutcome::FormationLanded { enemy, shield }
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_shot_absorbed_by_shield() {
        let mut store = EntityStore::new();
        let mut score = Score::default();
        let shield = spawn(&mut store, SHIELD, 0.0, 0.0);
        let shot = spawn(&mut store, EntityKind::PlayerShot, 0.0, 0.0);
        assert_eq!(
            resolve_contact(&mut store, &mut score, shield, shot),
            ContactOutcome::ShotAbsorbed { shot }
        );
        assert!(store.is_alive(shield));
        assert!(!store.is_alive(shot));
    }

    #[test]
    fn test_unlisted_pair_ignored() {
        let mut store = EntityStore::new();
        let mut score = Score::default();
        let enemy = spawn(&mut store, ENEMY, 0.0, 0.0);
        let bomb = spawn(&mut store, EntityKind::EnemyBomb, 0.0, 0.0);
        assert_eq!(
            resolve_contact(&mut store, &mut score, enemy, bomb),
            ContactOutcome::Ignored
        );
        assert_eq!(
            resolve_contact(&mut store, &mut score, enemy, enemy),
            ContactOutcome::Ignored
        );
        assert_eq!(store.len(), 2);
    }

    fn any_kind() -> impl Strategy<Value = EntityKind> {
        prop_oneof![
            Just(EntityKind::Spaceship),
            Just(ENEMY),
            Just(SHIELD),
            Just(EntityKind::PlayerShot),
            Just(EntityKind::EnemyBomb),
        ]
    }

    proptest! {
        #[test]
        fn prop_resolution_is_symmetric(ka in any_kind(), kb in any_kind()) {
            let mut store = EntityStore::new();
            let a = spawn(&mut store, ka, 0.0, 0.0);
            let b = spawn(&mut store, kb, 0.0, 0.0);
            let mut forward_store = store.clone();
            let mut reverse_store = store;
            let mut forward_score = Score::default();
            let mut reverse_score = Score::default();

            resolve_contact(&mut forward_store, &mut forward_score, a, b);
            resolve_contact(&mut reverse_store, &mut reverse_score, b, a);

            prop_assert_eq!(forward_score, reverse_score);
            prop_assert_eq!(forward_store.is_alive(a), reverse_store.is_alive(a));
            prop_assert_eq!(forward_store.is_alive(b), reverse_store.is_alive(b));
        }

        #[test]
        fn prop_resolution_is_idempotent(ka in any_kind(), kb in any_kind()) {
            let mut store = EntityStore::new();
            let a = spawn(&mut store, ka, 0.0, 0.0);
            let b = spawn(&mut store, kb, 0.0, 0.0);
            let mut score = Score::default();

            resolve_contact(&mut store, &mut score, a, b);
            let once = (score, store.is_alive(a), store.is_alive(b));
            resolve_contact(&mut store, &mut score, a, b);
            let twice = (score, store.is_alive(a), store.is_alive(b));
            prop_assert_eq!(once, twice);
        }
    }
}
