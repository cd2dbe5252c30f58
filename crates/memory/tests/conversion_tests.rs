use solo_memory::{Owned, OwnedSlice, create, create_slice};
use solo_test_utils::*;
use std::ptr::NonNull;

mod convert {
    use super::*;

    #[test]
    fn derived_owner_to_trait_object_owner() {
        let log = EventLog::new();
        let circle = create::<Circle, _>((2.0, log.tracked(1)));
        let address = circle.address();

        let shape: Owned<dyn Shape> = circle.convert();

        assert_eq!(shape.address(), address);
        assert!((shape.area() - 4.0 * std::f64::consts::PI).abs() < 1e-9);
        assert!(log.is_empty());

        drop(shape);
        assert_eq!(log.drops(), [1]);
    }

    #[test]
    fn stateful_deleter_is_carried_through() {
        let log = EventLog::new();
        let pointer = NonNull::from(Box::leak(Box::new(Circle {
            radius: 1.0,
            tracked: log.tracked(7),
        })));
        let circle = unsafe { Owned::from_raw_with(pointer, LoggingDelete::new(&log)) };

        let shape: Owned<dyn Shape, LoggingDelete> = circle.convert();
        drop(shape);

        assert_eq!(
            log.events(),
            [
                Event::Deleted(pointer.into()),
                Event::Dropped(7)
            ]
        );
    }

    #[test]
    fn empty_owner_converts_to_empty_owner() {
        let circle = Owned::<Circle>::null();

        let shape: Owned<dyn Shape> = circle.convert();

        assert!(shape.is_null());
    }

    #[test]
    fn assign_from_releases_previous_object() {
        let log = EventLog::new();
        let mut shape: Owned<dyn Shape> = create::<Circle, _>((1.0, log.tracked(1))).convert();
        let square = create::<Square, _>((3.0,));
        let address = square.address();

        shape.assign_from(square);

        assert_eq!(log.drops(), [1]);
        assert_eq!(shape.address(), address);
        assert_eq!(shape.area(), 9.0);
    }

    #[test]
    fn collection_of_shapes() {
        let log = EventLog::new();
        let shapes: Vec<Owned<dyn Shape>> = vec![
            create::<Square, _>((1.0,)).convert(),
            create::<Circle, _>((1.0, log.tracked(1))).convert(),
            create::<Circle, _>((1.0, log.tracked(2))).convert(),
        ];

        let total: f64 = shapes.iter().map(|shape| shape.area()).sum();
        assert!((total - (1.0 + 2.0 * std::f64::consts::PI)).abs() < 1e-9);

        drop(shapes);
        assert_eq!(log.drops(), [1, 2]);
    }

    #[test]
    fn array_owner_changes_deleter() {
        let log = EventLog::new();
        let elements = create_slice::<u16>(3);
        let address = elements.address();

        let (pointer, _) = elements.into_parts();
        let deleter = LoggingDelete::new(&log);
        let logged = unsafe { OwnedSlice::from_raw_with(pointer.unwrap(), deleter) };
        let logged: OwnedSlice<u16, LoggingDelete> = logged.convert();

        assert_eq!(logged.address(), address);
        assert_eq!(logged.len(), 3);
        drop(logged);
        assert_eq!(log.deletions(), [address]);
    }
}
