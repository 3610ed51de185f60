//! Phone number lookup: parses free-form numbers into E.164 form and
//! classifies them against a set of candidate local locales.

mod enums;
pub mod errors;
mod number_lookup;

pub use enums::Verdict;
pub use errors::LookupError;
pub use number_lookup::{
    csv_first_column, default_pool_size, locales_for_region, parse_locale, parse_multiple_numbers,
    parse_single_number, write_csv, NumberDetails,
};
