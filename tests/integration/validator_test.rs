// Validator integration tests
use bitmask_fields::{Bitmask, FieldEntry, FieldMap, FieldsValidator, MaskValidator, Validator};
use serde_json::json;
use std::sync::Arc;
use crate::mocks::MockRecord;

const OPT_SPAM: u64 = 1 << 0;
const OPT_DELETED: u64 = 1 << 1;
const OPT_ADMIN: u64 = 1 << 2;

fn user_fields() -> Arc<FieldMap> {
    Arc::new(
        FieldMap::new([
            ("spamOption", FieldEntry::Bit(OPT_SPAM)),
            ("deletedOption", FieldEntry::Bit(OPT_DELETED)),
            ("adminOption", FieldEntry::Bit(OPT_ADMIN)),
        ])
        .unwrap(),
    )
}

fn found(mask: u64) -> (MockRecord, Bitmask) {
    let record = MockRecord::found(&[("options", json!(mask))]);
    let mut bitmask = Bitmask::new(user_fields());
    bitmask.after_find(&record);
    (record, bitmask)
}

#[test]
fn test_owned_fields_may_change() {
    let (mut record, mut bitmask) = found(OPT_ADMIN);
    let validator = FieldsValidator::for_bitmask(&bitmask, &["spamOption", "deletedOption"]).unwrap();

    let post = json!({"spamOption": true, "deletedOption": true});
    bitmask.load(&mut record, post.as_object().unwrap());

    assert!(validator.validate(&mut record));
    assert!(record.errors.is_empty());
    assert!(record.save());
}

#[test]
fn test_foreign_field_change_blocks_save() {
    let (mut record, mut bitmask) = found(0);
    let validator = FieldsValidator::for_bitmask(&bitmask, &["spamOption", "deletedOption"]).unwrap();

    // form smuggles in an admin flag
    let post = json!({"spamOption": "1", "adminOption": "1"});
    bitmask.load(&mut record, post.as_object().unwrap());

    assert!(!validator.validate(&mut record));
    assert_eq!(record.errors.len(), 1);
    assert_eq!(record.errors[0].attribute, "options");
    assert_eq!(
        record.errors[0].message,
        "Only \"spamOption, deletedOption\" fields can be modified"
    );
    assert_eq!(record.errors[0].params["names"], "spamOption, deletedOption");

    // in-memory values are not rolled back
    assert_eq!(bitmask.get("adminOption"), Some(true));
    assert!(!record.save());
    assert_eq!(bitmask.old_bit(&record, "adminOption"), Some(false));
}

#[test]
fn test_writing_same_value_is_not_a_change() {
    let (mut record, mut bitmask) = found(OPT_ADMIN);
    let validator = FieldsValidator::for_bitmask(&bitmask, &["spamOption"]).unwrap();

    bitmask.set(&mut record, "adminOption", true);
    bitmask.set(&mut record, "spamOption", true);

    assert!(validator.validate(&mut record));
}

#[test]
fn test_new_record_may_only_set_owned_bits() {
    let mut record = MockRecord::new();
    let mut bitmask = Bitmask::new(user_fields());
    let validator = FieldsValidator::for_bitmask(&bitmask, &["spamOption"]).unwrap();

    bitmask.set(&mut record, "spamOption", true);
    assert!(validator.validate(&mut record));

    bitmask.set(&mut record, "deletedOption", true);
    assert!(!validator.validate(&mut record));
}

#[test]
fn test_custom_mask_attribute() {
    let fields = user_fields();
    let mut record = MockRecord::found(&[("flags", json!(0))]);
    let mut bitmask = Bitmask::new(Arc::clone(&fields)).with_attribute("flags");
    bitmask.after_find(&record);

    let validator = FieldsValidator::for_bitmask(&bitmask, &["spamOption"]).unwrap();
    assert_eq!(validator.mask_attribute(), "flags");

    bitmask.set(&mut record, "adminOption", true);
    assert!(!validator.validate(&mut record));
    assert_eq!(record.errors[0].attribute, "flags");

    let default_attr = FieldsValidator::new(&fields, &["spamOption"]).unwrap();
    assert_eq!(default_attr.mask_attribute(), "options");
}

#[test]
fn test_mask_validator_literal_bits() {
    let (mut record, mut bitmask) = found(OPT_SPAM);
    let validator = MaskValidator::new("options", OPT_DELETED | OPT_ADMIN);

    bitmask.set(&mut record, "deletedOption", true);
    bitmask.set(&mut record, "adminOption", true);
    assert!(validator.validate(&mut record));

    bitmask.set(&mut record, "spamOption", false);
    assert!(!validator.validate(&mut record));
    assert_eq!(
        record.errors[0].message,
        "Only \"6\" bit mask in options field can be modified"
    );
    assert_eq!(record.errors[0].params["mask"], "6");
}

#[test]
fn test_mask_validator_sees_raw_foreign_bits() {
    let mut record = MockRecord::found(&[("options", json!(0))]);
    record.attributes.insert("options".to_string(), json!(1 << 10));

    assert!(!MaskValidator::new("options", 0b111).validate(&mut record));
    assert!(MaskValidator::new("options", 1 << 10).validate(&mut MockRecord::found(&[("options", json!(0))])));
}

#[test]
fn test_validators_as_rule_list() {
    let (mut record, mut bitmask) = found(0);
    let rules: Vec<Box<dyn Validator>> = vec![
        Box::new(FieldsValidator::for_bitmask(&bitmask, &["spamOption", "deletedOption"]).unwrap()),
        Box::new(MaskValidator::new("options", OPT_SPAM).with_message("{attribute} locked to {mask}")),
    ];

    bitmask.set(&mut record, "deletedOption", true);

    let results: Vec<bool> = rules.iter().map(|r| r.validate(&mut record)).collect();
    assert_eq!(results, vec![true, false]);
    assert_eq!(record.errors.len(), 1);
    assert_eq!(record.errors[0].message, "options locked to 1");

    record.clear_errors();
    bitmask.set(&mut record, "deletedOption", false);
    assert!(rules.iter().all(|r| r.validate(&mut record)));
}
