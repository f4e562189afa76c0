use listmerge_core::{ComparableField, Record, RecordStatus, SearchCriteria, Tag};
use listmerge_dedup::{CancelToken, DuplicateService, compare_records};
use uuid::Uuid;

const MAILING_LIST: u128 = 0xA;
const DONOR_LIST: u128 = 0xB;

fn contact(id: u128, list: u128, first: &str, last: &str, address: &str, zip: &str) -> Record {
    let mut record = Record::new(Uuid::from_u128(id), Uuid::from_u128(list));
    record.first_name = first.to_string();
    record.last_name = last.to_string();
    record.address = address.to_string();
    record.zip_code = zip.to_string();
    record
}

fn sample_records() -> Vec<Record> {
    let mut jane = contact(1, MAILING_LIST, "Jane", "Doe", "12 Main St", "78701");
    jane.tags = vec![Tag::new(Uuid::from_u128(100), "newsletter")];

    let mut jane_dup = contact(2, MAILING_LIST, "JANE", "Doe", "12 Main  St", "");
    jane_dup.city = "Austin".to_string();
    jane_dup.status = Some(RecordStatus::ReturnedMail);
    jane_dup.tags = vec![Tag::new(Uuid::from_u128(101), "donor")];

    vec![
        jane,
        contact(3, MAILING_LIST, "Robert", "Stone", "400 Elm Ave", "10001"),
        jane_dup,
        contact(4, DONOR_LIST, "Jane", "Doe", "12 Main St", "78701"),
        contact(5, MAILING_LIST, "Rob", "Stone", "400 Elm Avenue", "10001"),
    ]
}

fn criteria() -> SearchCriteria {
    SearchCriteria::new([
        ComparableField::FirstName,
        ComparableField::LastName,
        ComparableField::Address,
        ComparableField::ZipCode,
    ])
    .with_threshold(80)
}

#[test]
fn find_select_merge_and_delete() {
    let records = sample_records();
    let service = DuplicateService::new();

    let mut outcome = service.find_duplicates(&records, &criteria()).unwrap();
    assert!(outcome.complete);
    assert_eq!(outcome.groups.len(), 2);

    // Both groups score 100; the Jane pair was discovered first.
    let jane = &mut outcome.groups[0];
    let ids: Vec<u128> = jane.records().iter().map(|r| r.id.as_u128()).collect();
    assert_eq!(ids, vec![1, 2]);
    assert_eq!(jane.match_score(), 100.0);

    let preview = service.preview_merge(jane).unwrap();
    assert_eq!(preview.record.first_name, "Jane");
    assert_eq!(preview.record.city, "Austin");
    assert_eq!(preview.record.status, Some(RecordStatus::ReturnedMail));
    assert_eq!(preview.record.tags.len(), 2);

    service.set_primary(jane, Uuid::from_u128(2)).unwrap();
    let preview = service.preview_merge(jane).unwrap();
    assert_eq!(preview.record.first_name, "JANE");
    assert_eq!(preview.record.zip_code, "78701");

    let plans = service.confirm_merge(&outcome.groups).unwrap();
    assert_eq!(plans.len(), 2);
    assert_eq!(plans[0].retire, vec![Uuid::from_u128(1)]);

    let deletions = service.delete_duplicates(&outcome.groups).unwrap();
    assert_eq!(deletions[1].keep, Uuid::from_u128(3));
    assert_eq!(deletions[1].delete, vec![Uuid::from_u128(5)]);
}

#[test]
fn cross_list_search_pulls_in_other_lists() {
    let records = sample_records();
    let service = DuplicateService::new();

    let outcome = service
        .find_duplicates(&records, &criteria().cross_list(true))
        .unwrap();
    let jane = outcome
        .groups
        .iter()
        .find(|g| g.contains(Uuid::from_u128(1)))
        .unwrap();
    assert!(jane.contains(Uuid::from_u128(4)));
}

#[test]
fn merged_record_does_not_duplicate_itself() {
    let records = sample_records();
    let service = DuplicateService::new();
    let outcome = service.find_duplicates(&records, &criteria()).unwrap();

    let merged = service.preview_merge(&outcome.groups[0]).unwrap();
    let alone = vec![merged.record];
    let rerun = service.find_duplicates(&alone, &criteria()).unwrap();
    assert!(rerun.groups.is_empty());
}

#[test]
fn comparison_is_symmetric_across_sample() {
    let records = sample_records();
    let criteria = criteria();
    for a in &records {
        for b in &records {
            let ab = compare_records(a, b, &criteria);
            let ba = compare_records(b, a, &criteria);
            assert_eq!(ab.is_candidate, ba.is_candidate);
            assert_eq!(ab.aggregate_score, ba.aggregate_score);
        }
    }
}

#[test]
fn pre_cancelled_search_is_incomplete_not_an_error() {
    let records = sample_records();
    let token = CancelToken::new();
    token.cancel();

    let outcome = DuplicateService::new()
        .find_duplicates_with(&records, &criteria(), &token, |_, _| {})
        .unwrap();
    assert!(!outcome.complete);
    assert!(outcome.groups.is_empty());
}

#[test]
fn groups_serialize_with_member_records() {
    let records = sample_records();
    let outcome = DuplicateService::new()
        .find_duplicates(&records, &criteria())
        .unwrap();
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["complete"], true);
    assert_eq!(json["groups"][0]["records"][0]["firstName"], "Jane");
    assert_eq!(json["groups"][0]["matchFields"][0], "firstName");
}
