//! Centralized configuration for the sync pipeline.
//!
//! One immutable value carries every URL, form field, timeout, delay, and
//! path the scraper and sync clients need. It is constructed at the edge
//! and passed by reference so tests can substitute mock servers and zero
//! delays.

use std::path::PathBuf;
use std::time::Duration;

/// Configuration shared by the scraper, the sync clients, and the pipeline.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Chamber attendance summary page.
    pub chamber_attendance_url: String,

    /// Base URL of the destination API.
    pub api_base_url: String,

    /// Name of the form field carrying the range start date.
    pub date_from_field: String,

    /// Name of the form field carrying the range end date.
    pub date_to_field: String,

    /// Name of the form's search submit control.
    pub search_button_field: String,

    /// Label posted for the search control.
    pub search_button_label: String,

    /// CSS selector of the results table.
    pub result_table_selector: String,

    /// Timeout for loading the attendance form page.
    pub page_load_timeout: Duration,

    /// Timeout for the search request that must return the results table.
    pub table_timeout: Duration,

    /// Pause after each party creation request.
    pub party_create_delay: Duration,

    /// Pause between politician/attendance requests.
    pub politician_create_delay: Duration,

    /// Directory holding the scrape artifacts.
    pub temp_dir: PathBuf,

    /// File name of the parties artifact.
    pub parties_file: String,

    /// File name of the politicians artifact.
    pub politicians_file: String,

    /// File name of the raw attendance rows artifact.
    pub attendance_file: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            chamber_attendance_url:
                "https://www.camara.cl/legislacion/sala_sesiones/asistencia_resumen.aspx"
                    .to_string(),
            api_base_url: "http://localhost:3000".to_string(),
            // ASP.NET posts container-scoped field names with `$` separators
            date_from_field: "ctl00$ContentPlaceHolder1$ContentPlaceHolder1$PaginaContent$fecha_desde"
                .to_string(),
            date_to_field: "ctl00$ContentPlaceHolder1$ContentPlaceHolder1$PaginaContent$fecha_hasta"
                .to_string(),
            search_button_field: "ctl00$ContentPlaceHolder1$ContentPlaceHolder1$PaginaContent$btnBuscar"
                .to_string(),
            search_button_label: "Buscar".to_string(),
            result_table_selector: "table.tabla".to_string(),
            page_load_timeout: Duration::from_secs(30),
            table_timeout: Duration::from_secs(10),
            party_create_delay: Duration::from_millis(50),
            politician_create_delay: Duration::from_millis(100),
            temp_dir: PathBuf::from("temp"),
            parties_file: "parties.json".to_string(),
            politicians_file: "politicians.json".to_string(),
            attendance_file: "attendance.json".to_string(),
        }
    }
}
