use proptest::prelude::*;
use terrace_geom::IVec3;
use terrace_world::ChunkDims;

fn dims() -> impl Strategy<Value = ChunkDims> {
    (1i32..=12, 1i32..=12, 1i32..=12).prop_map(|(x, y, z)| ChunkDims::new(x, y, z))
}

fn origin_for(d: ChunkDims) -> impl Strategy<Value = IVec3> {
    (-50i32..=50, -50i32..=50, -50i32..=50)
        .prop_map(move |(a, b, c)| IVec3::new(a * d.x, b * d.y, c * d.z))
}

proptest! {
    // unflatten/flatten is a bijection over [0, volume)
    #[test]
    fn flatten_unflatten_roundtrip(d in dims()) {
        let mut seen = vec![false; d.volume()];
        for i in 0..d.volume() {
            let local = d.unflatten(i);
            prop_assert!(d.contains_local(local));
            prop_assert_eq!(d.flatten(local), i);
            prop_assert!(!seen[i]);
            seen[i] = true;
        }
    }

    // exactly one axis out of range: shift by one chunk on that axis, wrap to the opposite face
    #[test]
    fn single_axis_overflow_wraps(
        (d, origin) in dims().prop_flat_map(|d| (Just(d), origin_for(d))),
        axis in 0usize..3,
        upper in any::<bool>(),
        seed in (0i32..1000, 0i32..1000, 0i32..1000),
    ) {
        let base = IVec3::new(seed.0 % d.x, seed.1 % d.y, seed.2 % d.z);
        let dim = [d.x, d.y, d.z][axis];
        let mut local = base.to_array();
        local[axis] = if upper { dim } else { -1 };
        let local = IVec3::new(local[0], local[1], local[2]);

        let (wrapped, target) = d.resolve_neighbor(local, origin);

        let mut expect_local = base.to_array();
        expect_local[axis] = if upper { 0 } else { dim - 1 };
        let mut expect_origin = origin.to_array();
        expect_origin[axis] += if upper { dim } else { -dim };

        prop_assert_eq!(wrapped.to_array(), expect_local);
        prop_assert_eq!(target.to_array(), expect_origin);
        prop_assert!(d.contains_local(wrapped));
        prop_assert!(d.is_aligned(target));
    }

    // chunk origin of a world coordinate is aligned and contains it
    #[test]
    fn origin_of_contains_point(d in dims(), x in -500i32..500, y in -500i32..500, z in -500i32..500) {
        let p = IVec3::new(x, y, z);
        let o = d.origin_of(p);
        prop_assert!(d.is_aligned(o));
        prop_assert!(d.contains_local(p - o));
    }
}
