use std::fs;

use phonenumber::country::Id;
use tempfile::TempDir;

use super::{init_logging, region_code::RegionCode};
use crate::{
    lookup::{
        csv_first_column, locales_for_region, parse_locale, parse_multiple_numbers,
        parse_single_number, LookupError, Verdict,
    },
    regions::RegionMap,
};

#[test]
fn international_number_needs_no_locale() {
    init_logging();
    let details = parse_single_number("+41 44 668 18 00", &[]);

    assert_eq!(Some("+41446681800".to_string()), details.e164);
    assert_eq!(Some(RegionCode::ch().to_string()), details.region);
    assert_eq!(Some(41), details.calling_code);
    assert_eq!(None, details.assumed_local_locale);
    assert_eq!(Verdict::Resolved, details.comment);
}

#[test]
fn national_number_uses_locale() {
    let details = parse_single_number("(650) 253-0000", &[Id::US]);

    assert_eq!(Some("+16502530000".to_string()), details.e164);
    assert_eq!(Some(RegionCode::us().to_string()), details.assumed_local_locale);
    assert_eq!(Verdict::Resolved, details.comment);
}

#[test]
fn only_matching_locale_is_kept() {
    let details = parse_single_number("020 8765 4321", &[Id::US, Id::GB]);

    assert_eq!(Some("+442087654321".to_string()), details.e164);
    assert_eq!(Some(RegionCode::gb().to_string()), details.assumed_local_locale);
}

#[test]
fn ambiguous_number_needs_review() {
    init_logging();
    let details = parse_single_number("650 253 0000", &[Id::US, Id::CA]);

    assert_eq!(Verdict::NeedsManualReview, details.comment);
    assert_eq!(None, details.e164);
    assert_eq!("650 253 0000", details.raw_input);
}

#[test]
fn invalid_number_needs_review() {
    let details = parse_single_number("12", &[Id::US]);

    assert_eq!(Verdict::NeedsManualReview, details.comment);
    assert_eq!("Needs manual review", details.comment.to_string());
}

#[test]
fn full_width_digits_are_normalized() {
    let details = parse_single_number("+４１ ４４ ６６８ １８ ００", &[]);

    assert_eq!(Some("+41446681800".to_string()), details.e164);
}

#[test]
fn locale_is_case_insensitive() {
    assert_eq!(Id::GB, parse_locale("gb").unwrap());
    assert!(matches!(parse_locale("zz-top"), Err(LookupError::UnknownLocale(_))));
}

#[test]
fn region_expands_to_locales() {
    let regions = RegionMap::from([(
        "Northern America".to_string(),
        vec!["US".to_string(), "CA".to_string(), "US".to_string(), "QQ".to_string()],
    )]);

    let locales = locales_for_region(&regions, "Northern America").unwrap();

    assert_eq!(vec![Id::US, Id::CA], locales);
    assert!(matches!(
        locales_for_region(&regions, "Atlantis"),
        Err(LookupError::UnknownRegion(_))
    ));
}

#[test]
fn bulk_lookup_keeps_order_and_writes_csv() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");
    let numbers = vec![
        "+41 44 668 18 00".to_string(),
        "(650) 253-0000".to_string(),
        "12".to_string(),
    ];

    let results =
        parse_multiple_numbers(&numbers, &[Id::US], Some(output.as_path()), Some(2)).unwrap();

    let inputs: Vec<&str> = results.iter().map(|details| details.raw_input.as_str()).collect();
    assert_eq!(vec!["+41 44 668 18 00", "(650) 253-0000", "12"], inputs);

    let csv = fs::read_to_string(&output).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!("raw_input,assumed_local_locale,E164,region,calling_code,comment", lines[0]);
    assert_eq!("+41 44 668 18 00,,+41446681800,CH,41,", lines[1]);
    assert_eq!("(650) 253-0000,US,+16502530000,US,1,", lines[2]);
    assert_eq!("12,,,,,Needs manual review", lines[3]);
}

#[test]
fn existing_output_is_not_overwritten() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("results.csv");
    fs::write(&output, "keep me").unwrap();

    let numbers = ["+41 44 668 18 00".to_string()];
    let err = parse_multiple_numbers(&numbers, &[], Some(output.as_path()), Some(1)).unwrap_err();

    assert!(matches!(err, LookupError::OutputExists(_)));
    assert_eq!("keep me", fs::read_to_string(&output).unwrap());
}

#[test]
fn first_column_of_csv() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("numbers.csv");
    fs::write(
        &input,
        "+41 44 668 18 00,office\n(650) 253-0000\n\n\"020 8765 4321\",x,y\n",
    )
    .unwrap();

    let numbers = csv_first_column(&input).unwrap();

    assert_eq!(vec!["+41 44 668 18 00", "(650) 253-0000", "020 8765 4321"], numbers);
}
