use std::{collections::HashMap, sync::LazyLock, time::Duration};

use log::{debug, trace};
use regex::Regex;
use reqwest::blocking::Client;
use scraper::{ElementRef, Html, Selector};

use super::errors::FetchError;
use crate::config::RegionConfig;

static ALPHA_2_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z]{2}$").expect("alpha-2 pattern is a valid regex"));
static ALPHA_3_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Z]{3}$").expect("alpha-3 pattern is a valid regex"));

const ALPHA_CODES_ANCHOR_ID: &str = "Current_codes";
const HIERARCHY_TABLE_ID: &str = "GeoGroupsENG";
const NAME_HEADER: &str = "Country or Area";
const ALPHA_3_HEADER: &str = "ISO-alpha3 code";

/// One row of the geographic hierarchy table, as scraped.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct HierarchyRow {
    pub name: String,
    pub id: Option<String>,
    pub parent_id: Option<String>,
    pub alpha3: Option<String>,
}

/// Supplies the ISO 3166-1 alpha-3 to alpha-2 code table.
pub trait AlphaCodeSource {
    fn alpha3_to_alpha2(&self) -> Result<HashMap<String, String>, FetchError>;
}

/// Supplies the flat geographic hierarchy, in table order.
pub trait HierarchySource {
    fn rows(&self) -> Result<Vec<HierarchyRow>, FetchError>;
}

/// Builds the blocking HTTP client shared by the scraping sources.
pub fn http_client(config: &RegionConfig) -> Result<Client, FetchError> {
    let client = Client::builder()
        .user_agent(config.user_agent.clone())
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?;
    Ok(client)
}

fn fetch_page(client: &Client, url: &str) -> Result<String, FetchError> {
    debug!("fetching {}", url);
    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status: response.status(),
        });
    }
    Ok(response.text()?)
}

fn selector(css: &str) -> Result<Selector, FetchError> {
    Selector::parse(css)
        .map_err(|e| FetchError::Schema(format!("invalid CSS selector '{css}': {e}")))
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Scrapes the alpha code table of the Wikipedia ISO 3166-1 article.
pub struct WikipediaAlphaCodes {
    client: Client,
    url: String,
}

impl WikipediaAlphaCodes {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl AlphaCodeSource for WikipediaAlphaCodes {
    fn alpha3_to_alpha2(&self) -> Result<HashMap<String, String>, FetchError> {
        parse_alpha_code_table(&fetch_page(&self.client, &self.url)?)
    }
}

/// Extracts alpha-3 to alpha-2 pairs from the first table that follows the
/// `Current_codes` anchor. Within a row, the first cell that looks like an
/// alpha-2 code and is directly followed by an alpha-3 looking cell is taken.
pub fn parse_alpha_code_table(html: &str) -> Result<HashMap<String, String>, FetchError> {
    let document = Html::parse_document(html);

    let table = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .skip_while(|element| element.value().id() != Some(ALPHA_CODES_ANCHOR_ID))
        .find(|element| element.value().name() == "table")
        .ok_or_else(|| {
            FetchError::Schema(format!("no table follows the '{ALPHA_CODES_ANCHOR_ID}' anchor"))
        })?;

    let rows = selector("tr")?;
    let cells = selector("td")?;

    let mut alpha3_to_alpha2 = HashMap::new();
    for row in table.select(&rows) {
        let texts: Vec<String> = row.select(&cells).map(cell_text).collect();
        let pair = texts
            .windows(2)
            .find(|pair| ALPHA_2_PATTERN.is_match(&pair[0]) && ALPHA_3_PATTERN.is_match(&pair[1]));
        if let Some(pair) = pair {
            alpha3_to_alpha2.insert(pair[1].clone(), pair[0].clone());
        }
    }
    trace!("parsed {} alpha codes", alpha3_to_alpha2.len());

    if alpha3_to_alpha2.is_empty() {
        return Err(FetchError::Schema("alpha code table has no code rows".to_string()));
    }
    Ok(alpha3_to_alpha2)
}

/// Scrapes the UN M49 geographic regions table.
pub struct UnM49Hierarchy {
    client: Client,
    url: String,
}

impl UnM49Hierarchy {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

impl HierarchySource for UnM49Hierarchy {
    fn rows(&self) -> Result<Vec<HierarchyRow>, FetchError> {
        parse_hierarchy_table(&fetch_page(&self.client, &self.url)?)
    }
}

/// Reads the `GeoGroupsENG` tree table. The first row holds the column
/// headers, every other row is one node linked through its `data-tt-id` and
/// `data-tt-parent-id` attributes.
pub fn parse_hierarchy_table(html: &str) -> Result<Vec<HierarchyRow>, FetchError> {
    let document = Html::parse_document(html);

    let table_selector = selector(&format!("#{HIERARCHY_TABLE_ID}"))?;
    let table = document
        .select(&table_selector)
        .next()
        .ok_or_else(|| FetchError::Schema(format!("no element with id '{HIERARCHY_TABLE_ID}'")))?;

    let row_selector = selector("tr")?;
    let header_selector = selector("th")?;
    let cell_selector = selector("td")?;

    let mut table_rows = table.select(&row_selector);
    let headers: Vec<String> = table_rows
        .next()
        .map(|row| row.select(&header_selector).map(cell_text).collect())
        .unwrap_or_default();

    let column = |header: &str| headers.iter().position(|h| h == header);
    let name_column = column(NAME_HEADER).ok_or_else(|| {
        FetchError::Schema(format!("hierarchy table has no '{NAME_HEADER}' column"))
    })?;
    let alpha3_column = column(ALPHA_3_HEADER);

    let mut rows = Vec::new();
    for row in table_rows {
        let cells: Vec<String> = row.select(&cell_selector).map(cell_text).collect();
        let cell = |index: usize| cells.get(index).filter(|text| !text.is_empty()).cloned();
        let attribute = |name: &str| {
            row.value()
                .attr(name)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        rows.push(HierarchyRow {
            name: cell(name_column).unwrap_or_default(),
            id: attribute("data-tt-id"),
            parent_id: attribute("data-tt-parent-id"),
            alpha3: alpha3_column.and_then(cell),
        });
    }
    debug!("parsed {} hierarchy rows", rows.len());

    Ok(rows)
}
