//! Scraper for the chamber's attendance summary page.
//!
//! The page is a classic ASP.NET form: the scraper fetches it once to
//! pick up the server-state hidden fields, posts the date-range query
//! back, and parses the results table out of the response. Any failure
//! to reach the page, locate the form fields, or find the table aborts
//! the whole scrape; there is no partial result.

use std::collections::HashSet;
use std::sync::LazyLock;

use reqwest::StatusCode;
use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};

use asistencia_api::user_agent::get_user_agent;

use crate::config::SyncConfig;
use crate::extract::{format_date_dmy, parse_count, parse_percentage, slugify, DateRange};

#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {status}")]
    HttpStatus { status: StatusCode },
    #[error("invalid table selector `{0}`")]
    Selector(String),
    #[error("form field `{0}` not found on the attendance page")]
    MissingFormField(String),
    #[error("results table did not appear in the search response")]
    MissingResultsTable,
}

static ROW_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("tbody > tr").expect("invalid selector: rows"));
static CELL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td").expect("invalid selector: cells"));
static NESTED_COUNT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("a span").expect("invalid selector: nested count"));
static HIDDEN_INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"input[type="hidden"]"#).expect("invalid selector: hidden"));
static INPUT_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input").expect("invalid selector: input"));

/// One politician's figures for the scraped window, deduplicated by the
/// slug of the display name (first occurrence wins).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoliticianAttendance {
    pub name: String,
    pub party_slug: String,
    pub attended: u32,
    pub justified_absent: u32,
    pub unjustified_absent: u32,
    /// Total absences for the period as reported by the chamber.
    pub absent: u32,
    /// Attendance rate for the period, 0-100.
    pub percentage: f64,
}

/// A party seen while parsing politician rows, keyed by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyData {
    pub slug: String,
    pub party: String,
}

/// Raw per-row tuple kept for audit and export, before deduplication.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    pub name: String,
    pub party: String,
    pub party_slug: String,
    pub attended: u32,
    pub justified_absent: u32,
    pub unjustified_absent: u32,
    pub absent: u32,
    pub percentage: f64,
}

/// Everything one scrape run produces.
#[derive(Debug)]
pub struct ScrapeResult {
    pub parties: Vec<PartyData>,
    pub politicians: Vec<PoliticianAttendance>,
    pub attendance: Vec<AttendanceRow>,
}

pub struct ChamberScraper {
    config: SyncConfig,
    http: reqwest::Client,
}

impl ChamberScraper {
    pub fn new(config: &SyncConfig) -> Result<Self, ScrapeError> {
        let http = reqwest::Client::builder()
            .user_agent(get_user_agent())
            .timeout(config.page_load_timeout)
            .build()?;
        Ok(Self {
            config: config.clone(),
            http,
        })
    }

    /// Scrapes attendance figures for the given window.
    pub async fn scrape(&self, range: &DateRange) -> Result<ScrapeResult, ScrapeError> {
        let form_html = self.fetch_form_page().await?;
        let state = extract_form_state(&form_html, &self.config)?;

        tracing::info!(
            "searching chamber attendance from {} to {}",
            format_date_dmy(range.from),
            format_date_dmy(range.to)
        );

        let results_html = self.submit_search(state, range).await?;
        parse_attendance_table(&results_html, &self.config.result_table_selector)
    }

    async fn fetch_form_page(&self) -> Result<String, ScrapeError> {
        let resp = self
            .http
            .get(&self.config.chamber_attendance_url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "es-CL,es;q=0.9")
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                status: resp.status(),
            });
        }

        Ok(resp.text().await?)
    }

    async fn submit_search(
        &self,
        mut form: Vec<(String, String)>,
        range: &DateRange,
    ) -> Result<String, ScrapeError> {
        form.push((
            self.config.date_from_field.clone(),
            format_date_dmy(range.from),
        ));
        form.push((self.config.date_to_field.clone(), format_date_dmy(range.to)));
        form.push((
            self.config.search_button_field.clone(),
            self.config.search_button_label.clone(),
        ));

        let resp = self
            .http
            .post(&self.config.chamber_attendance_url)
            .header("accept", "text/html,application/xhtml+xml")
            .header("accept-language", "es-CL,es;q=0.9")
            .timeout(self.config.table_timeout)
            .form(&form)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(ScrapeError::HttpStatus {
                status: resp.status(),
            });
        }

        Ok(resp.text().await?)
    }
}

/// Collects the ASP.NET server-state hidden fields and checks that the
/// two date inputs exist, so a silently redesigned page fails loudly
/// instead of posting a query into the void.
fn extract_form_state(
    html: &str,
    config: &SyncConfig,
) -> Result<Vec<(String, String)>, ScrapeError> {
    let document = Html::parse_document(html);

    let mut fields = Vec::new();
    for input in document.select(&HIDDEN_INPUT_SELECTOR) {
        if let Some(name) = input.value().attr("name") {
            let value = input.value().attr("value").unwrap_or_default();
            fields.push((name.to_string(), value.to_string()));
        }
    }

    if !fields.iter().any(|(name, _)| name == "__VIEWSTATE") {
        return Err(ScrapeError::MissingFormField("__VIEWSTATE".to_string()));
    }

    for required in [&config.date_from_field, &config.date_to_field] {
        let present = document
            .select(&INPUT_SELECTOR)
            .any(|input| input.value().attr("name") == Some(required.as_str()));
        if !present {
            return Err(ScrapeError::MissingFormField(required.clone()));
        }
    }

    Ok(fields)
}

fn parse_attendance_table(html: &str, table_selector: &str) -> Result<ScrapeResult, ScrapeError> {
    let selector = Selector::parse(table_selector)
        .map_err(|e| ScrapeError::Selector(e.to_string()))?;
    let document = Html::parse_document(html);

    let table = document
        .select(&selector)
        .next()
        .ok_or(ScrapeError::MissingResultsTable)?;

    let mut parties = Vec::new();
    let mut politicians = Vec::new();
    let mut attendance = Vec::new();
    let mut seen_parties: HashSet<String> = HashSet::new();
    let mut seen_names: HashSet<String> = HashSet::new();

    for row in table.select(&ROW_SELECTOR) {
        let cells: Vec<ElementRef> = row.select(&CELL_SELECTOR).collect();
        let Some(parsed) = parse_row(&cells) else {
            continue;
        };

        if seen_parties.insert(parsed.party_slug.clone()) {
            parties.push(PartyData {
                slug: parsed.party_slug.clone(),
                party: parsed.party.clone(),
            });
        }

        if seen_names.insert(slugify(&parsed.name)) {
            politicians.push(PoliticianAttendance {
                name: parsed.name.clone(),
                party_slug: parsed.party_slug.clone(),
                attended: parsed.attended,
                justified_absent: parsed.justified_absent,
                unjustified_absent: parsed.unjustified_absent,
                absent: parsed.absent,
                percentage: parsed.percentage,
            });
        }

        attendance.push(parsed);
    }

    Ok(ScrapeResult {
        parties,
        politicians,
        attendance,
    })
}

fn parse_row(cells: &[ElementRef]) -> Option<AttendanceRow> {
    // Header and footer rows carry fewer columns
    if cells.len() < 7 {
        return None;
    }

    let name = element_text(cells[0]);
    let party = element_text(cells[1]);
    if name.is_empty() || party.is_empty() {
        return None;
    }

    let attended = parse_count(&element_text(cells[2]))?;
    let justified_absent = nested_count(cells[3])?;
    let unjustified_absent = nested_count(cells[4])?;
    let absent = parse_count(&element_text(cells[5]))?;
    let percentage = parse_percentage(&element_text(cells[6]))?;

    let party_slug = slugify(&party);
    Some(AttendanceRow {
        name,
        party,
        party_slug,
        attended,
        justified_absent,
        unjustified_absent,
        absent,
        percentage,
    })
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// The justified/unjustified cells nest their count in an anchor's span;
/// anchors without a count render as zero.
fn nested_count(cell: ElementRef) -> Option<u32> {
    let text = cell
        .select(&NESTED_COUNT_SELECTOR)
        .next()
        .map(element_text)
        .unwrap_or_default();
    parse_count(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &str) -> String {
        format!(
            "<html><body><table class=\"tabla\"><tbody>{}</tbody></table></body></html>",
            rows
        )
    }

    fn data_row(name: &str, party: &str, figures: [&str; 4], percentage: &str) -> String {
        format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td>\
             <td><a href=\"#\"><span>{}</span></a></td>\
             <td><a href=\"#\"><span>{}</span></a></td>\
             <td>{}</td><td>{}</td></tr>",
            name, party, figures[0], figures[1], figures[2], figures[3], percentage
        )
    }

    #[test]
    fn parses_a_data_row() {
        let html = table(&data_row(
            "Acevedo Sáez, María Candelaria",
            "Partido Socialista",
            ["18", "1", "1", "2"],
            "90,0%",
        ));
        let result = parse_attendance_table(&html, "table.tabla").unwrap();

        assert_eq!(result.attendance.len(), 1);
        let row = &result.attendance[0];
        assert_eq!(row.party_slug, "partido-socialista");
        assert_eq!(row.attended, 18);
        assert_eq!(row.justified_absent, 1);
        assert_eq!(row.unjustified_absent, 1);
        assert_eq!(row.absent, 2);
        assert_eq!(row.percentage, 90.0);
    }

    #[test]
    fn skips_rows_with_fewer_than_seven_cells() {
        let rows = format!(
            "<tr><td>Nombre</td><td>Partido</td><td>Asistencia</td><td>Total</td><td>%</td></tr>{}",
            data_row("Aedo Jeldres, Eric", "DC", ["20", "0", "0", "0"], "100%")
        );
        let result = parse_attendance_table(&table(&rows), "table.tabla").unwrap();

        assert_eq!(result.attendance.len(), 1);
        assert_eq!(result.politicians.len(), 1);
    }

    #[test]
    fn missing_table_is_fatal() {
        let result = parse_attendance_table("<html><body><p>sin datos</p></body></html>", "table.tabla");
        assert!(matches!(result, Err(ScrapeError::MissingResultsTable)));
    }

    #[test]
    fn duplicate_names_collapse_to_first_occurrence() {
        let rows = format!(
            "{}{}",
            data_row("Aedo Jeldres, Eric", "DC", ["20", "0", "0", "0"], "100%"),
            data_row("Aedo Jeldres, Eric", "DC", ["5", "3", "2", "5"], "50%"),
        );
        let result = parse_attendance_table(&table(&rows), "table.tabla").unwrap();

        // Both raw rows are kept; the deduplicated collection keeps the first.
        assert_eq!(result.attendance.len(), 2);
        assert_eq!(result.politicians.len(), 1);
        assert_eq!(result.politicians[0].attended, 20);
    }

    #[test]
    fn parties_dedupe_by_slug() {
        let rows = format!(
            "{}{}{}",
            data_row("Uno, Diputado", "Frente Amplio", ["10", "0", "0", "0"], "100%"),
            data_row("Dos, Diputada", "Frente Amplio", ["9", "1", "0", "1"], "90%"),
            data_row("Tres, Diputado", "Renovación Nacional", ["8", "1", "1", "2"], "80%"),
        );
        let result = parse_attendance_table(&table(&rows), "table.tabla").unwrap();

        assert_eq!(result.parties.len(), 2);
        assert_eq!(result.parties[0].slug, "frente-amplio");
        assert_eq!(result.parties[0].party, "Frente Amplio");
    }

    #[test]
    fn empty_nested_counts_render_as_zero() {
        let row = "<tr><td>Sin Ausencias, Diputado</td><td>Evópoli</td><td>22</td>\
                   <td><a href=\"#\"><span></span></a></td><td></td>\
                   <td>0</td><td>100%</td></tr>";
        let result = parse_attendance_table(&table(row), "table.tabla").unwrap();

        assert_eq!(result.attendance[0].justified_absent, 0);
        assert_eq!(result.attendance[0].unjustified_absent, 0);
    }

    #[test]
    fn malformed_numeric_cells_drop_the_row() {
        let rows = format!(
            "{}{}",
            data_row("Roto, Diputado", "PS", ["n/a", "0", "0", "0"], "90%"),
            data_row("Sano, Diputado", "PS", ["18", "0", "0", "0"], "90%"),
        );
        let result = parse_attendance_table(&table(&rows), "table.tabla").unwrap();

        assert_eq!(result.attendance.len(), 1);
        assert_eq!(result.attendance[0].name, "Sano, Diputado");
    }

    #[test]
    fn three_row_scenario_one_malformed() {
        // One 5-cell noise row plus two valid rows in the same party.
        let rows = format!(
            "<tr><td>a</td><td>b</td><td>c</td><td>d</td><td>e</td></tr>{}{}",
            data_row("Uno, Diputado", "Partido Socialista", ["18", "1", "1", "2"], "90,0%"),
            data_row("Dos, Diputada", "Partido Socialista", ["20", "0", "0", "0"], "100%"),
        );
        let result = parse_attendance_table(&table(&rows), "table.tabla").unwrap();

        assert_eq!(result.parties.len(), 1);
        assert_eq!(result.politicians.len(), 2);
        assert_eq!(result.attendance.len(), 2);
    }

    #[test]
    fn form_state_extraction_requires_viewstate() {
        let config = SyncConfig::default();
        let html = r#"<html><body><form><input type="text" name="q" /></form></body></html>"#;
        let result = extract_form_state(html, &config);
        assert!(matches!(result, Err(ScrapeError::MissingFormField(f)) if f == "__VIEWSTATE"));
    }

    #[test]
    fn form_state_extraction_requires_date_fields() {
        let config = SyncConfig::default();
        let html = r#"<html><body><form>
            <input type="hidden" name="__VIEWSTATE" value="abc" />
        </form></body></html>"#;
        let result = extract_form_state(html, &config);
        assert!(matches!(result, Err(ScrapeError::MissingFormField(_))));
    }

    #[test]
    fn form_state_extraction_collects_hidden_fields() {
        let config = SyncConfig::default();
        let html = format!(
            r#"<html><body><form>
            <input type="hidden" name="__VIEWSTATE" value="abc" />
            <input type="hidden" name="__EVENTVALIDATION" value="xyz" />
            <input type="text" name="{}" />
            <input type="text" name="{}" />
        </form></body></html>"#,
            config.date_from_field, config.date_to_field
        );
        let fields = extract_form_state(&html, &config).unwrap();
        assert_eq!(
            fields,
            vec![
                ("__VIEWSTATE".to_string(), "abc".to_string()),
                ("__EVENTVALIDATION".to_string(), "xyz".to_string()),
            ]
        );
    }
}
