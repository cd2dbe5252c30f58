use solo_memory::{
    Address, Construct, Null, Owned, OwnedSlice, create, create_slice, upcast,
};
use solo_test_utils::*;
use std::{
    cmp::Ordering,
    collections::{BTreeSet, HashSet},
    ptr::NonNull,
};
use test_case::test_case;

mod compare {
    use super::*;
    use test_case::test_case;

    #[test]
    fn equal_iff_same_address() {
        let a = create::<u32, _>((1,));
        let b = create::<u32, _>((1,));

        assert!(a != b);
        assert!(a.eq(&a));
        assert_eq!(*a, *b);
        assert!(Owned::<u32>::null() == Owned::<u32>::null());
    }

    #[test]
    fn related_owner_types_compare_by_address() {
        let square = create::<Square, _>((1.0,));
        let other = create::<Square, _>((1.0,));
        let address = square.address();

        let shape: Owned<dyn Shape> = square.convert();

        assert_eq!(shape.address(), address);
        assert!(shape != other);
        assert_eq!(
            shape.partial_cmp(&other),
            Some(address.cmp(&other.address()))
        );
    }

    #[test_case(0 ; "no owners")]
    #[test_case(1 ; "single owner")]
    #[test_case(16 ; "many owners")]
    fn ordering_is_total(count: usize) {
        let mut owners: Vec<Owned<u8>> = (0..count).map(|_| create::<u8, _>(())).collect();
        owners.push(Owned::null());

        owners.sort();

        assert!(owners[0] == Null);
        for pair in owners.windows(2) {
            assert_eq!(pair[0].cmp(&pair[1]), Ordering::Less);
            assert!(pair[0].address() < pair[1].address());
        }
    }

    #[test]
    fn owners_as_set_keys() {
        let a = create_slice::<u8>(1);
        let b = create_slice::<u8>(1);
        let (address_a, address_b) = (a.address(), b.address());

        let hashed: HashSet<OwnedSlice<u8>> = [a, b, OwnedSlice::null()].into_iter().collect();
        assert_eq!(hashed.len(), 3);

        let ordered: BTreeSet<_> = hashed.into_iter().map(|owner| owner.address()).collect();
        let mut expected = vec![address_a, address_b];
        expected.sort();
        assert_eq!(ordered.into_iter().skip(1).collect::<Vec<_>>(), expected);
    }

    #[test]
    fn null_marker_in_either_position() {
        let empty = Owned::<Widget>::null();
        let full = create::<Widget, _>((1, 2));

        assert!(empty == Null && Null == empty);
        assert!(full != Null && Null != full);
        assert_eq!(empty.partial_cmp(&Null), Some(Ordering::Equal));
        assert_eq!(full.partial_cmp(&Null), Some(Ordering::Greater));
        assert_eq!(Null.partial_cmp(&full), Some(Ordering::Less));
    }
}

mod zero_size {
    use super::*;

    #[derive(Debug)]
    struct Point;

    impl Shape for Point {
        fn area(&self) -> f64 {
            0.0
        }
    }

    impl Construct<()> for Point {
        fn construct(_: ()) -> Self {
            Self
        }
    }

    upcast!(Point => dyn Shape);

    #[test]
    fn distinct_owners_have_distinct_addresses() {
        let a = Owned::new(());
        let b = Owned::new(());

        assert!(a != b);
        assert_ne!(a.address(), b.address());

        let hashed: HashSet<Owned<()>> = [a, b].into_iter().collect();
        assert_eq!(hashed.len(), 2);
    }

    #[test]
    fn zero_length_arrays_have_distinct_addresses() {
        let a = create_slice::<u8>(0);
        let b = create_slice::<u8>(0);
        assert!(a != b);

        let c = create_slice::<()>(3);
        let d = create_slice::<()>(3);
        assert!(c != d);
        assert_eq!(c.len(), 3);
    }

    #[test]
    fn boxed_values_are_given_their_own_address() {
        let a = Owned::from_box(Box::new(Point));
        let b = Owned::from(Box::new(Point));
        assert!(a != b);

        let boxed = a.into_box().unwrap();
        assert_eq!(
            Address::from(&*boxed as *const Point),
            Address::from(NonNull::<Point>::dangling())
        );

        let elements = OwnedSlice::from_vec(Vec::<u32>::new());
        let other = OwnedSlice::from_vec(Vec::<u32>::new());
        assert!(elements != other);
        assert_eq!(elements.into_boxed_slice().unwrap().len(), 0);
    }

    #[test]
    fn trait_object_keeps_its_address() {
        let point = create::<Point, _>(());
        let address = point.address();

        let shape: Owned<dyn Shape> = point.convert();

        assert_eq!(shape.address(), address);
        assert_eq!(shape.area(), 0.0);
    }
}
