use std::{io::Write, path::PathBuf};

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use log::{info, LevelFilter};
use phonenumber::country::Id;

use phonetools::{
    config::{RegionConfig, DEFAULT_REGIONS_FILE},
    lookup::{self, NumberDetails},
    mccmnc::{self, MCC_MNC_TABLE_INDEX},
    RegionCodes, RegionMap,
};

/// Phone number classification and reference data utilities.
#[derive(Parser)]
#[command(name = "phonetools", version)]
struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract geographical area, MCC and MNC from the ITU annex .docx into CSV
    MccMnc {
        /// Annex to ITU Operational Bulletin, .docx format
        input: PathBuf,
        /// CSV file to write the table to
        output: PathBuf,
        /// Index of the table to extract, counting from 0
        #[arg(long, default_value_t = MCC_MNC_TABLE_INDEX)]
        table: usize,
    },
    /// Parse phone numbers to determine their international form and region
    Lookup(LookupArgs),
    /// Print the region to country-code table, generating it when needed
    Regions {
        #[command(flatten)]
        regions_file: RegionsFile,
        /// Ignore the cached table and rebuild it from the reference sites
        #[arg(long)]
        regenerate: bool,
        /// Print only this region
        name: Option<String>,
    },
}

#[derive(Args)]
struct RegionsFile {
    /// YAML cache of the region table, created when missing
    #[arg(long, env = "PHONETOOLS_REGIONS_FILE", default_value = DEFAULT_REGIONS_FILE)]
    regions_file: PathBuf,
}

impl RegionsFile {
    fn region_codes(&self) -> anyhow::Result<RegionCodes> {
        let config = RegionConfig::default().with_regions_file(self.regions_file.clone());
        Ok(RegionCodes::from_config(&config)?)
    }
}

#[derive(Args)]
struct LookupArgs {
    /// Write the results to this CSV file, which must not exist yet
    #[arg(long)]
    output: Option<PathBuf>,

    /// Worker threads, defaults to twice the number of cores
    #[arg(long)]
    threads: Option<usize>,

    #[command(flatten)]
    regions_file: RegionsFile,

    /// Check numbers against the formatting rules of every country in this
    /// region of the region table
    #[arg(long, conflicts_with = "locale")]
    region: Option<String>,

    /// Locale(s) to treat numbers as dialed from when the country is missing
    #[arg(long, value_delimiter = ',', value_parser = locale_arg)]
    locale: Vec<Id>,

    #[command(subcommand)]
    source: Source,
}

#[derive(Subcommand)]
enum Source {
    /// Input one or more numbers from the command line
    Cli {
        #[arg(required = true)]
        numbers: Vec<String>,
    },
    /// Read numbers from the first column of a CSV file
    Csv {
        #[arg(long)]
        input: PathBuf,
    },
}

fn locale_arg(value: &str) -> Result<Id, String> {
    lookup::parse_locale(value).map_err(|err| err.to_string())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format(|buf, record| writeln!(buf, "{} - {}", record.level(), record.args()))
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::MccMnc { input, output, table } => {
            let written = mccmnc::extract_mcc_mnc(&input, &output, table)
                .with_context(|| format!("extracting table {} of {}", table, input.display()))?;
            info!("wrote {} rows to {}", written, output.display());
        }
        Commands::Lookup(args) => run_lookup(args)?,
        Commands::Regions {
            regions_file,
            regenerate,
            name,
        } => {
            let mut region_codes = regions_file.region_codes()?;
            let regions = if regenerate {
                region_codes.generate_regions()?
            } else {
                region_codes.regions()?.clone()
            };
            print_regions(&regions, name.as_deref())?;
        }
    }

    Ok(())
}

fn run_lookup(args: LookupArgs) -> anyhow::Result<()> {
    let locales = match &args.region {
        Some(region) => {
            let mut region_codes = args.regions_file.region_codes()?;
            let regions = region_codes.regions()?;
            lookup::locales_for_region(regions, region).with_context(|| {
                format!(
                    "available regions: {}",
                    regions.keys().cloned().collect::<Vec<_>>().join(", ")
                )
            })?
        }
        None => args.locale.clone(),
    };

    let numbers = match &args.source {
        Source::Cli { numbers } => numbers.clone(),
        Source::Csv { input } => lookup::csv_first_column(input)
            .with_context(|| format!("reading numbers from {}", input.display()))?,
    };

    let results =
        lookup::parse_multiple_numbers(&numbers, &locales, args.output.as_deref(), args.threads)?;
    for details in &results {
        print_details(details);
    }
    Ok(())
}

fn print_details(details: &NumberDetails) {
    println!(
        "{}: E164: {}, Region: {}, Calling code: {}, Assumed locale: {}, Comment: {}",
        details.raw_input,
        details.e164.as_deref().unwrap_or("-"),
        details.region.as_deref().unwrap_or("-"),
        details
            .calling_code
            .map(|code| code.to_string())
            .unwrap_or_else(|| "-".to_string()),
        details.assumed_local_locale.as_deref().unwrap_or("-"),
        details.comment,
    );
}

fn print_regions(regions: &RegionMap, name: Option<&str>) -> anyhow::Result<()> {
    match name {
        Some(name) => {
            let codes = regions
                .get(name)
                .with_context(|| format!("unknown region '{name}'"))?;
            println!("{}: {}", name, codes.join(", "));
        }
        None => {
            for (name, codes) in regions {
                println!("{}: {}", name, codes.join(", "));
            }
        }
    }
    Ok(())
}
