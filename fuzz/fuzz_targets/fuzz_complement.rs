#![no_main]

use std::collections::HashSet;

use latbox::math::{GridBox, IntVect};
use latbox::{BoxDomain, BoxList, complement_in};

use libfuzzer_sys::{arbitrary::Arbitrary, fuzz_target};

#[derive(Arbitrary, Debug)]
struct FuzzComplement {
    region: GridBox<3>,
    members: Vec<GridBox<3>>,
}

fuzz_target!(|input: FuzzComplement| {
    let itype = input.region.ix_type();
    let mut reference = BoxList::with_ix_type(itype);
    for b in input.members {
        reference.push(b.convert(itype));
    }

    let complement = complement_in(input.region, &reference);
    assert!(complement.is_disjoint());
    assert!(complement.iter().all(|b| input.region.contains(b)));

    let covered: HashSet<IntVect<3>> = reference.iter().flat_map(|b| b.iter_points()).collect();
    let mut seen = 0u64;
    for b in &complement {
        for p in b.iter_points() {
            assert!(!covered.contains(&p), "{p} is covered by\n{reference}");
            seen += 1;
        }
    }
    let inside = input
        .region
        .iter_points()
        .filter(|p| covered.contains(p))
        .count();
    pretty_assertions::assert_eq!(
        Some(seen + u64::try_from(inside).unwrap()),
        input.region.num_pts()
    );

    let mut domain = BoxDomain::new(itype);
    domain.add_list(&reference);
    assert!(domain.as_list().is_disjoint());
    pretty_assertions::assert_eq!(domain.num_pts(), Some(covered.len() as u64));
});
