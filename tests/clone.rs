use cowbits::CowBitmap;

#[test]
#[allow(clippy::redundant_clone)]
fn array() {
    let original = (0..2000).collect::<CowBitmap>();
    let clone = original.clone();

    assert_eq!(clone, original);
}

#[test]
#[allow(clippy::redundant_clone)]
fn bitmap() {
    let original = (0..6000).collect::<CowBitmap>();
    let clone = original.clone();

    assert_eq!(clone, original);
}

#[test]
#[allow(clippy::redundant_clone)]
fn runs() {
    let mut original = (0..6000).chain(1_000_000..1_012_000).collect::<CowBitmap>();
    original.optimize();
    let clone = original.clone();

    assert_eq!(clone, original);
    assert_eq!(clone.statistics(), original.statistics());
}

#[test]
fn clone_preserves_representation_until_it_mutates() {
    let mut original = (0..30_000).collect::<CowBitmap>();
    original.optimize();
    let mut clone = original.clone();

    assert_eq!(clone.statistics(), original.statistics());

    // Fragment the clone until its run container converts; the original
    // must keep its representation and its contents.
    for value in (1..10_000).step_by(3) {
        clone.remove(value);
    }
    assert_eq!(original.len(), 30_000);
    assert_eq!(original.statistics().n_run_containers, 1);
    assert!(original.contains(1));
}

#[test]
fn mutating_the_source_leaves_clones_alone() {
    let mut source = (0..1000).chain(1 << 16..(1 << 16) + 1000).collect::<CowBitmap>();
    let clone = source.clone();

    for value in 0..1000 {
        source.remove(value);
    }
    source.insert(42);

    assert_eq!(clone.len(), 2000);
    assert_eq!(source.len(), 1001);
    for value in 0..1000 {
        assert!(clone.contains(value));
    }
}

#[test]
fn chained_clones_stay_independent() {
    let a = (0..500).collect::<CowBitmap>();
    let b = a.clone();
    let mut c = b.clone();

    c.insert(9999);

    assert_eq!(a, b);
    assert_eq!(a.len(), 500);
    assert_eq!(c.len(), 501);
}

#[test]
fn clone_from_reuses_the_target() {
    let source = (0..100).collect::<CowBitmap>();
    let mut target = (500..600).collect::<CowBitmap>();

    target.clone_from(&source);

    assert_eq!(target, source);
    assert!(target.contains(0));
    assert!(!target.contains(500));
}

#[test]
fn set_operations_on_clones_do_not_leak_back() {
    let a = (0..10_000).collect::<CowBitmap>();
    let b = a.clone();

    let mut c = b.clone();
    c &= &(5_000..20_000).collect::<CowBitmap>();

    assert_eq!(a.len(), 10_000);
    assert_eq!(b.len(), 10_000);
    assert_eq!(c.len(), 5_000);
}
