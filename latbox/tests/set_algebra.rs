//! Checks of set-algebra identities on randomly generated box lists, by enumerating
//! lattice points.

use std::collections::HashSet;
use std::sync::{Arc, Barrier, Mutex};
use std::thread;

use pretty_assertions::assert_eq;
use rand::{Rng as _, SeedableRng as _};
use rand_xoshiro::Xoshiro256Plus;

use latbox::comm::Communicator;
use latbox::math::{GridBox, IndexType, IntVect};
use latbox::options::ParallelComplementOptions;
use latbox::{BoxDomain, BoxList, complement_in, intersect, remove_overlap};

fn region() -> GridBox<3> {
    GridBox::cell([-8, -8, -4], [8, 8, 4])
}

fn random_box(rng: &mut Xoshiro256Plus, itype: IndexType<3>) -> GridBox<3> {
    let lower = IntVect([
        rng.random_range(-10..10),
        rng.random_range(-10..10),
        rng.random_range(-6..6),
    ]);
    let size = IntVect([
        rng.random_range(0..9),
        rng.random_range(0..9),
        rng.random_range(0..5),
    ]);
    GridBox::from_lower_size(lower, size, itype)
}

fn random_list(rng: &mut Xoshiro256Plus, itype: IndexType<3>) -> BoxList<3> {
    let count = rng.random_range(0..10);
    let mut list = BoxList::with_ix_type(itype);
    for _ in 0..count {
        list.push(random_box(rng, itype));
    }
    list
}

fn points(list: &BoxList<3>) -> HashSet<IntVect<3>> {
    list.iter().flat_map(|b| b.iter_points()).collect()
}

fn sorted(set: HashSet<IntVect<3>>) -> Vec<IntVect<3>> {
    let mut v: Vec<_> = set.into_iter().collect();
    v.sort_by(IntVect::lex_cmp);
    v
}

#[test]
fn complement_partitions_box() {
    let mut rng = Xoshiro256Plus::seed_from_u64(0);
    for itype in [IndexType::cell(), IndexType::node(), IndexType::cell().flipped(2)] {
        for _ in 0..40 {
            let reference = random_list(&mut rng, itype);
            let b = region().convert(itype);
            let complement = complement_in(b, &reference);
            assert!(complement.is_disjoint());
            assert!(complement.ok());
            assert_eq!(complement.ix_type(), itype);

            let outside = points(&complement);
            let inside = points(&intersect(&reference, &b));
            assert!(outside.is_disjoint(&inside));
            let union: HashSet<_> = outside.union(&inside).copied().collect();
            assert_eq!(sorted(union), sorted(b.iter_points().collect()));
        }
    }
}

#[test]
fn parallel_complement_agrees() {
    let mut rng = Xoshiro256Plus::seed_from_u64(1);
    let mut options = ParallelComplementOptions::default();
    options.min_members = 0;
    options.chunk = 3;
    for _ in 0..30 {
        let reference = random_list(&mut rng, IndexType::cell());
        let b = region();
        let mut parallel = BoxList::new();
        parallel.parallel_complement_in_with(b, &reference, &options);
        assert!(parallel.is_disjoint());
        assert_eq!(
            sorted(points(&parallel)),
            sorted(points(&complement_in(b, &reference)))
        );
    }
}

#[test]
fn simplify_keeps_points() {
    let mut rng = Xoshiro256Plus::seed_from_u64(2);
    for _ in 0..40 {
        let list = random_list(&mut rng, IndexType::node());
        let before = sorted(points(&list));
        let mut fast = list.clone();
        fast.simplify(false);
        let mut best = list.clone();
        best.simplify(true);
        assert!(best.len() <= list.len());
        assert_eq!(sorted(points(&fast)), before);
        assert_eq!(sorted(points(&best)), before);
    }
}

#[test]
fn chop_is_exact() {
    let mut rng = Xoshiro256Plus::seed_from_u64(3);
    let mut tested = 0;
    while tested < 40 {
        let b = random_box(&mut rng, IndexType::cell());
        let Some(available) = b.num_pts().filter(|&n| n > 0) else {
            continue;
        };
        tested += 1;
        let n = rng.random_range(1..=available.min(40));
        let n = usize::try_from(n).unwrap();
        let pieces = BoxList::chop(b, n);
        assert_eq!(pieces.len(), n, "{b} into {n}");
        assert!(pieces.ok());
        assert!(pieces.is_disjoint());
        assert_eq!(sorted(points(&pieces)), sorted(b.iter_points().collect()));
    }
}

#[test]
fn max_size_is_exact() {
    let mut rng = Xoshiro256Plus::seed_from_u64(4);
    for _ in 0..30 {
        let mut list = random_list(&mut rng, IndexType::cell());
        let before = sorted(points(&list));
        let chunk = IntVect([rng.random_range(1..5), rng.random_range(1..5), 2]);
        list.max_size(chunk);
        assert!(list.iter().all(|b| b.is_empty() || b.size().all_le(&chunk)));
        assert_eq!(sorted(points(&list)), before);
    }
}

#[test]
fn overlap_removal_and_domains() {
    let mut rng = Xoshiro256Plus::seed_from_u64(5);
    for _ in 0..30 {
        let list = random_list(&mut rng, IndexType::cell());
        let before = sorted(points(&list));

        let disjoint = remove_overlap(&list);
        assert!(disjoint.is_disjoint());
        assert_eq!(sorted(points(&disjoint)), before);

        let mut domain = BoxDomain::new(IndexType::cell());
        domain.add_list(&list);
        assert!(domain.as_list().is_disjoint());
        assert_eq!(sorted(points(domain.as_list())), before);

        let hole = random_box(&mut rng, IndexType::cell());
        domain.rm(hole);
        assert!(domain.as_list().is_disjoint());
        let expected: HashSet<_> = before
            .iter()
            .copied()
            .filter(|&p| !hole.contains_point(p))
            .collect();
        assert_eq!(sorted(points(domain.as_list())), sorted(expected));
    }
}

#[test]
fn contains_matches_points() {
    let mut rng = Xoshiro256Plus::seed_from_u64(6);
    for _ in 0..60 {
        let a = random_list(&mut rng, IndexType::cell());
        let b = random_list(&mut rng, IndexType::cell());
        let a_points = points(&a);
        let b_points = points(&b);
        let expected = !a.is_empty() && !b.is_empty() && b_points.is_subset(&a_points);
        assert_eq!(a.contains(&b), expected, "{a}\n{b}");
    }
}

/// A [`Communicator`] whose participants are threads sharing a mailbox.
struct ThreadComm {
    rank: usize,
    barrier: Arc<Barrier>,
    mailbox: Arc<Mutex<Vec<i32>>>,
}

impl Communicator for ThreadComm {
    fn is_root(&self) -> bool {
        self.rank == 0
    }

    fn broadcast_words(&self, words: &mut Vec<i32>) {
        if self.is_root() {
            self.mailbox.lock().unwrap().clone_from(words);
        }
        self.barrier.wait();
        if !self.is_root() {
            words.clone_from(&self.mailbox.lock().unwrap());
        }
        self.barrier.wait();
    }
}

#[test]
fn broadcast_between_threads() {
    const PARTICIPANTS: usize = 4;
    let barrier = Arc::new(Barrier::new(PARTICIPANTS));
    let mailbox = Arc::new(Mutex::new(Vec::new()));
    let root_list = BoxList::chop(GridBox::node([0, 0, 0], [6, 6, 6]), 5);

    let handles: Vec<_> = (0..PARTICIPANTS)
        .map(|rank| {
            let comm = ThreadComm {
                rank,
                barrier: barrier.clone(),
                mailbox: mailbox.clone(),
            };
            let mut list = if rank == 0 {
                root_list.clone()
            } else {
                BoxList::from_box(GridBox::cell([i32::try_from(rank).unwrap(); 3], [9; 3]))
            };
            thread::spawn(move || {
                list.broadcast(&comm).unwrap();
                list
            })
        })
        .collect();

    for handle in handles {
        let list = handle.join().unwrap();
        assert_eq!(list, root_list);
        assert_eq!(list.ix_type(), IndexType::node());
    }
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trip() {
    let mut rng = Xoshiro256Plus::seed_from_u64(7);
    for _ in 0..10 {
        let list = random_list(&mut rng, IndexType::cell().flipped(0));
        let json = serde_json::to_string(&list).unwrap();
        let back: BoxList<3> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, list);
        assert_eq!(back.ix_type(), list.ix_type());
    }
}
