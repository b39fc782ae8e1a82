use anyface::{AnyFace, TypeTag, markers::Incomparable};

struct FamilyA;
struct FamilyB;

#[derive(Clone)]
struct A;
#[derive(Clone)]
struct B;

#[test]
fn test_same_type_same_tag() {
    let a1 = TypeTag::<FamilyA>::of::<A>();
    let a2 = TypeTag::<FamilyA>::of::<A>();
    let b = TypeTag::<FamilyA>::of::<B>();

    assert_eq!(a1, a2);
    assert_ne!(a1, b);
    assert_ne!(a1.index(), 0);
}

#[test]
fn test_reference_names_the_referent() {
    static VALUE: A = A;
    let by_ref: &'static A = &VALUE;

    assert_eq!(TypeTag::<FamilyB>::of_val(by_ref), TypeTag::<FamilyB>::of::<A>());
    assert_eq!(TypeTag::<FamilyB>::of_val(&by_ref), TypeTag::<FamilyB>::of::<&A>());
}

#[test]
fn test_container_tags_match_family() {
    type Holder = AnyFace<dyn core::any::Any, Incomparable>;

    let a = Holder::new(A);
    let b = Holder::new(B);

    assert_eq!(a.type_tag(), Some(Holder::tag_of::<A>()));
    assert_eq!(b.type_tag(), Some(Holder::tag_of::<B>()));
    assert_ne!(a.type_tag(), b.type_tag());
    assert_eq!(a.clone().type_tag(), a.type_tag());
    assert_eq!(Holder::empty().type_tag(), None);
}

#[test]
fn test_tags_are_a_total_order() {
    let mut tags = [
        TypeTag::<FamilyA>::of::<u8>(),
        TypeTag::<FamilyA>::of::<u16>(),
        TypeTag::<FamilyA>::of::<u8>(),
    ];
    tags.sort();

    assert!(tags[0] <= tags[1] && tags[1] <= tags[2]);
    assert_eq!(tags.iter().filter(|t| **t == TypeTag::<FamilyA>::of::<u8>()).count(), 2);
}

#[test]
fn test_debug_names_index() {
    let tag = TypeTag::<FamilyB>::of::<char>();
    let debug = format!("{tag:?}");

    assert!(debug.contains(&tag.index().to_string()), "{debug}");
}
