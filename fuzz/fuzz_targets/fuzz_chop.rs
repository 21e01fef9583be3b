#![no_main]

use latbox::BoxList;
use latbox::math::GridBox;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|input: (GridBox<3>, u16)| {
    let (b, n) = input;
    let n = usize::from(n);
    match BoxList::try_chop(b, n) {
        Ok(pieces) => {
            assert_eq!(pieces.len(), n);
            assert!(pieces.ok());
            assert!(pieces.is_disjoint());
            assert_eq!(pieces.num_pts(), b.num_pts());
            assert!(pieces.iter().all(|p| b.contains(p)));
        }
        Err(_) => {
            assert!(n == 0 || b.num_pts().is_none_or(|total| total < n as u64));
        }
    }
});
