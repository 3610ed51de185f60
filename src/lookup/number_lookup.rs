use std::{
    fs::OpenOptions,
    io::{ErrorKind, Write},
    path::Path,
};

use dec_from_char::normalize_decimals;
use log::{debug, trace, warn};
use phonenumber::{country::Id, Mode};
use rayon::{prelude::*, ThreadPoolBuilder};
use serde::Serialize;

use super::{enums::Verdict, errors::LookupError};
use crate::{i18n::RegionCode, regions::RegionMap};

/// What is known about one raw phone number after parsing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NumberDetails {
    pub raw_input: String,
    /// Locale the number was read as a national number of, `None` when the
    /// input was already in international form.
    pub assumed_local_locale: Option<String>,
    #[serde(rename = "E164")]
    pub e164: Option<String>,
    /// Region the number belongs to.
    pub region: Option<String>,
    pub calling_code: Option<u16>,
    pub comment: Verdict,
}

impl NumberDetails {
    fn needs_review(raw_input: &str) -> Self {
        Self {
            raw_input: raw_input.to_string(),
            assumed_local_locale: None,
            e164: None,
            region: None,
            calling_code: None,
            comment: Verdict::NeedsManualReview,
        }
    }
}

/// Parses a candidate locale given on the command line, e.g. `us` or `GB`.
pub fn parse_locale(locale: &str) -> Result<Id, LookupError> {
    locale
        .to_ascii_uppercase()
        .parse::<Id>()
        .map_err(|_| LookupError::UnknownLocale(locale.to_string()))
}

/// Expands a region of the region table into the phone regions of its
/// countries. Country codes the phone metadata does not know are skipped.
pub fn locales_for_region(regions: &RegionMap, region: &str) -> Result<Vec<Id>, LookupError> {
    let codes = regions
        .get(region)
        .ok_or_else(|| LookupError::UnknownRegion(region.to_string()))?;

    let mut locales = Vec::with_capacity(codes.len());
    for code in codes {
        match code.parse::<Id>() {
            Ok(id) if !locales.contains(&id) => locales.push(id),
            Ok(_) => {}
            Err(_) => warn!("'{}' in region '{}' is not a known phone region", code, region),
        }
    }
    Ok(locales)
}

fn join_locales<'a>(locales: impl Iterator<Item = &'a str>) -> String {
    locales.collect::<Vec<_>>().join(", ")
}

/// Parses `raw_input` and keeps it only if it is a valid number.
fn parse_for_locale(raw_input: &str, locale: Option<Id>) -> Option<NumberDetails> {
    let number = match phonenumber::parse(locale, normalize_decimals(raw_input)) {
        Ok(number) => number,
        Err(err) => {
            trace!("'{}' as {:?}: {}", raw_input, locale, err);
            return None;
        }
    };
    if !phonenumber::is_valid(&number) {
        trace!("'{}' as {:?}: not a valid number", raw_input, locale);
        return None;
    }

    Some(NumberDetails {
        raw_input: raw_input.to_string(),
        assumed_local_locale: locale.map(|id| id.as_ref().to_string()),
        e164: Some(number.format().mode(Mode::E164).to_string()),
        region: Some(
            number
                .country()
                .id()
                .map(|id| id.as_ref().to_string())
                .unwrap_or_else(|| RegionCode::get_unknown().to_string()),
        ),
        calling_code: Some(number.code().value()),
        comment: Verdict::Resolved,
    })
}

/// Parses a single number against several possible local locales.
///
/// The number may already be internationally formatted, so it is first parsed
/// without a locale. Only if that fails is every locale in `locales` tried.
/// Zero or more than one valid interpretation yields a result flagged for
/// manual review.
pub fn parse_single_number(raw_input: &str, locales: &[Id]) -> NumberDetails {
    if let Some(details) = parse_for_locale(raw_input, None) {
        return details;
    }

    let mut matches: Vec<NumberDetails> = locales
        .iter()
        .filter_map(|&locale| parse_for_locale(raw_input, Some(locale)))
        .collect();

    if matches.len() == 1 {
        return matches.remove(0);
    }
    if matches.is_empty() {
        warn!(
            "'{}' does not appear to be a valid number for any of the following: {}",
            raw_input,
            join_locales(locales.iter().map(|id| id.as_ref()))
        );
    } else {
        warn!(
            "'{}' could be a valid number in any of the following: {}",
            raw_input,
            join_locales(matches.iter().filter_map(|m| m.assumed_local_locale.as_deref()))
        );
    }
    NumberDetails::needs_review(raw_input)
}

/// Twice the number of available cores.
pub fn default_pool_size() -> usize {
    std::thread::available_parallelism()
        .map(|cores| cores.get())
        .unwrap_or(1)
        * 2
}

/// Parses every number in `numbers` on a worker pool. Results keep input
/// order. When `output` is given, the results are also written there as CSV;
/// an existing file is never overwritten.
pub fn parse_multiple_numbers(
    numbers: &[String],
    locales: &[Id],
    output: Option<&Path>,
    threads: Option<usize>,
) -> Result<Vec<NumberDetails>, LookupError> {
    let pool = ThreadPoolBuilder::new()
        .num_threads(threads.unwrap_or_else(default_pool_size))
        .build()?;
    debug!("parsing {} numbers on {} threads", numbers.len(), pool.current_num_threads());

    let results: Vec<NumberDetails> = pool.install(|| {
        numbers
            .par_iter()
            .map(|number| parse_single_number(number, locales))
            .collect()
    });

    if let Some(path) = output {
        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .map_err(|err| match err.kind() {
                ErrorKind::AlreadyExists => LookupError::OutputExists(path.to_path_buf()),
                _ => err.into(),
            })?;
        write_csv(&results, file)?;
    }

    Ok(results)
}

/// Writes a header line and one record per result.
pub fn write_csv<W: Write>(results: &[NumberDetails], out: W) -> Result<(), LookupError> {
    let mut writer = csv::Writer::from_writer(out);
    for details in results {
        writer.serialize(details)?;
    }
    writer.flush()?;
    Ok(())
}

/// Values of the first column of a header-less CSV file. Empty lines are
/// skipped.
pub fn csv_first_column(path: &Path) -> Result<Vec<String>, LookupError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut values = Vec::new();
    for record in reader.records() {
        if let Some(first) = record?.get(0) {
            values.push(first.to_string());
        }
    }
    Ok(values)
}
