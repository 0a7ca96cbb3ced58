//! Shared test utilities and fixtures for logbook parser tests

use crate::app::models::{Page, RawTable};
use crate::app::services::species_registry::StaticSpeciesRegistry;
use crate::config::ExtractorConfig;
use chrono::{NaiveDate, NaiveDateTime};

use super::haul_tables::TableContext;
use super::sequential::{SequentialOutput, process_stream};
use super::stats::ParseDiagnostics;
use super::table_stream::build_table_stream;


/// Fixed clock for identifier synthesis
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|date| date.and_hms_opt(14, 5, 30))
        .unwrap()
}

pub fn general_info_table() -> RawTable {
    RawTable::from_strs(&[
        &["INFORMACIÓN GENERAL", "", "", ""],
        &["ARMADOR", "PESQUERA QUINTERO S.A.", "", ""],
        &["EMBARCACIÓN", "DON TITO", "PAÍS ABANDERAMIENTO", "CHILE"],
        &["MATRÍCULA", "VAL-1234", "SEÑAL DE LLAMADA", "CB-4567"],
        &["CAPITÁN", "JUAN PÉREZ", "", ""],
        &["TIPO REGISTRO", "RPA", "N° REGISTRO", "960123"],
        &["ZARPE", "01-06-2021 06:00:00", "PUERTO", "QUINTERO"],
        &["RECALADA", "05-06-2021 18:30:00", "PUERTO", "SAN ANTONIO"],
    ])
}

pub fn summary_table() -> RawTable {
    RawTable::from_strs(&[
        &["CAPTURA TOTAL", "", "", "", "", ""],
        &["ESPECIE", "", "TIPO DE CAPTURA", "", "", ""],
        &["", "", "Retenida (TON)", "Descartada (TON)", "Descartada (N°)", "Incidental (N°)"],
        &["1", "Camarón nailon", "3.234", "", "", ""],
        &["2", "Merluza común", "0.150", "", "", ""],
    ])
}

/// Six-column rows continuing a species table on a new page
pub fn species_continuation_table(rows: &[&[&str]]) -> RawTable {
    RawTable::from_strs(rows)
}

/// Narrow detail table opening haul `number`
pub fn haul_header_table(number: &str) -> RawTable {
    RawTable::from_strs(&[
        &["DETALLE DE LANCE", "", "", ""],
        &["LANCE #", number, "ARTE DE PESCA", "ARRASTRE FONDO"],
        &["INICIO", "02-06-2021 08:00:00", "FIN", "02-06-2021 10:30:00"],
    ])
}

/// Wide continuation table carrying positions and species for haul `number`
pub fn haul_continuation_table(number: &str, species_rows: &[&[&str]]) -> RawTable {
    let mut table = RawTable::from_strs(&[
        &["LANCE #", number, "", "ARTE DE PESCA", "", "ARRASTRE FONDO", "", "", ""],
        &["LATITUD", "33º 51.21588' S", "", "", "LATITUD", "33º 46.31808' S", "", "", ""],
        &["LONGITUD", "72º 2.6991' W", "", "", "LONGITUD", "72º 1.5' W", "", "", ""],
        &[
            "N°",
            "ESPECIE",
            "",
            "",
            "Retenida (TON)",
            "",
            "Descartada (TON)",
            "Descartada (N°)",
            "Incidental (N°)",
        ],
    ]);
    table.rows.extend(RawTable::from_strs(species_rows).rows);
    table
}

pub fn observations_table(line: &str) -> RawTable {
    RawTable::from_strs(&[&["OBSERVACIONES"], &[line]])
}

/// One page per table list
pub fn pages_of(tables: Vec<Vec<RawTable>>, text: &str) -> Vec<Page> {
    tables
        .into_iter()
        .map(|tables| Page::new(tables, text))
        .collect()
}

/// Run the sequential processor over pages with the built-in registry
pub fn run_sequential(pages: &[Page]) -> (SequentialOutput, ParseDiagnostics) {
    let registry = StaticSpeciesRegistry::builtin();
    let config = ExtractorConfig::default();
    let stream = build_table_stream(pages);
    process_stream(
        &stream,
        TableContext {
            registry: &registry,
            config: &config,
        },
    )
}
