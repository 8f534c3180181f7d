use compound_core::{IdMapError, IdMapping};
use pretty_assertions::assert_eq;

#[test]
fn three_item_record_maps_to_contiguous_ids() {
    let mapping = IdMapping::new(3666, 3).unwrap();
    assert_eq!(mapping.first_info_id(), 3663);
    assert_eq!(mapping.info_ids().collect::<Vec<_>>(), vec![3663, 3664, 3665]);
    assert_eq!(mapping.info_id(0), Some(3663));
    assert_eq!(mapping.info_id(2), Some(3665));
    assert_eq!(mapping.info_id(3), None);
}

#[test]
fn single_item_record_is_one_below_display_id() {
    let mapping = IdMapping::new(500, 1).unwrap();
    assert_eq!(mapping.first_info_id(), 499);
    assert_eq!(mapping.info_id(0), Some(mapping.first_info_id()));
    assert_eq!(mapping.count(), 1);
}

#[test]
fn same_inputs_give_same_mapping() {
    let first = IdMapping::new(9000, 12).unwrap();
    let second = IdMapping::new(9000, 12).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        first.info_ids().collect::<Vec<_>>(),
        second.info_ids().collect::<Vec<_>>()
    );
}

#[test]
fn empty_and_underflowing_records_are_rejected() {
    assert_eq!(IdMapping::new(10, 0), Err(IdMapError::EmptyRecord));
    assert_eq!(
        IdMapping::new(2, 3),
        Err(IdMapError::Underflow {
            last_display_id: 2,
            count: 3
        })
    );
}
