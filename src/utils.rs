use fnv::FnvHasher;
use rand::Rng;
use std::{
    collections::{HashMap, HashSet},
    hash::{BuildHasherDefault, Hash}
};

pub type FnvHashMap<K, V> = HashMap<K, V, BuildHasherDefault<FnvHasher>>;
pub type FnvHashSet<T> = HashSet<T, BuildHasherDefault<FnvHasher>>;

/// Hash map with the fnv hasher, which is much faster than the default on small integer keys.
/// It is less robust against key collision attacks, which does not matter for cell indices.
pub fn fnv_hashmap<K: Hash + Eq, V>(capacity: usize) -> FnvHashMap<K, V> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashMap::<K, V, _>::with_capacity_and_hasher(capacity, fnv)
}

pub fn fnv_hashset<T: Hash + Eq>(capacity: usize) -> FnvHashSet<T> {
    let fnv = BuildHasherDefault::<FnvHasher>::default();
    HashSet::<T, _>::with_capacity_and_hasher(capacity, fnv)
}

/// Set of cell indices with O(1) insert, remove, membership test and uniform random removal.
///
/// The members live in a dense vec so a random position picks a uniform member; the map
/// records each member's position so removal can swap the last member into the hole.
#[derive(Debug, Clone)]
pub struct RandomSet {
    members: Vec<usize>,
    positions: FnvHashMap<usize, usize>,
}

impl RandomSet {
    pub fn with_capacity(capacity: usize) -> RandomSet {
        RandomSet {
            members: Vec::with_capacity(capacity),
            positions: fnv_hashmap(capacity),
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn contains(&self, member: usize) -> bool {
        self.positions.contains_key(&member)
    }

    /// Returns false if the member was already present.
    pub fn insert(&mut self, member: usize) -> bool {
        if self.contains(member) {
            return false;
        }
        self.positions.insert(member, self.members.len());
        self.members.push(member);
        true
    }

    /// Remove and return a uniformly chosen member.
    pub fn remove_random<R: Rng>(&mut self, rng: &mut R) -> Option<usize> {
        if self.members.is_empty() {
            None
        } else {
            let position = rng.gen_range(0..self.members.len());
            Some(self.remove_at(position))
        }
    }

    fn remove_at(&mut self, position: usize) -> usize {
        let member = self.members.swap_remove(position);
        self.positions.remove(&member);
        if let Some(moved) = self.members.get(position) {
            self.positions.insert(*moved, position);
        }
        member
    }
}

#[cfg(test)]
mod tests {

    use itertools::Itertools;
    use quickcheck::{quickcheck, TestResult};
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;

    #[test]
    fn insert_contains() {
        let mut set = RandomSet::with_capacity(4);
        assert!(set.is_empty());
        assert!(set.insert(3));
        assert!(set.insert(7));
        assert!(!set.insert(3));
        assert_eq!(set.len(), 2);
        assert!(set.contains(3) && set.contains(7));
        assert!(!set.contains(4));
    }

    #[test]
    fn random_removal_drains_every_member_once() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut set = RandomSet::with_capacity(100);
        for member in 0..100 {
            set.insert(member);
        }
        let mut drained = Vec::new();
        while let Some(member) = set.remove_random(&mut rng) {
            assert!(!set.contains(member));
            drained.push(member);
        }
        assert!(set.is_empty());
        assert_eq!(drained.into_iter().sorted().collect::<Vec<_>>(), (0..100).collect::<Vec<_>>());
    }

    #[test]
    fn remove_random_from_empty_set() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut set = RandomSet::with_capacity(0);
        assert_eq!(set.remove_random(&mut rng), None);
    }

    #[test]
    fn positions_stay_consistent() {
        fn p(inserts: Vec<u8>, removals: u8, seed: u64) -> TestResult {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut set = RandomSet::with_capacity(inserts.len());
            let mut model = std::collections::BTreeSet::new();
            for member in inserts {
                if set.insert(member as usize) != model.insert(member as usize) {
                    return TestResult::failed();
                }
            }
            for _ in 0..removals {
                match set.remove_random(&mut rng) {
                    Some(member) if model.remove(&member) => {}
                    Some(_) => return TestResult::failed(),
                    None if model.is_empty() => {}
                    None => return TestResult::failed(),
                }
            }
            let consistent = set.len() == model.len() &&
                             model.iter().all(|member| set.contains(*member)) &&
                             set.members.iter().enumerate().all(|(i, m)| set.positions[m] == i);
            TestResult::from_bool(consistent)
        }
        quickcheck(p as fn(Vec<u8>, u8, u64) -> TestResult);
    }
}
