#[cfg(test)]
#[path = "../../tests/unit/format/setup_reader_test.rs"]
mod setup_reader_test;

use crate::CliError;
use pnp_core::models::problem::{
    FeederDefinition, JobDefinition, Machine, PlacementDefinition, Setup,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

const MACHINE_TABLE: &str = "machine.csv";
const FEEDERS_TABLE: &str = "feeders.csv";
const JOBS_TABLE: &str = "jobs.csv";
const PLACEMENTS_TABLE: &str = "placements.csv";

#[derive(Debug, Deserialize)]
struct MachineRow {
    property: String,
    value: f64,
}

#[derive(Debug, Deserialize)]
struct FeederRow {
    id: String,
    part_type: String,
    pickup_x_mm: f64,
    pickup_y_mm: f64,
}

#[derive(Debug, Deserialize)]
struct JobRow {
    id: String,
    name: String,
    quantity: usize,
    due_time_s: f64,
}

#[derive(Debug, Deserialize)]
struct PlacementRow {
    job_id: String,
    id: String,
    part_type: String,
    x_mm: f64,
    y_mm: f64,
}

/// Reads a setup from a directory holding the four workbook tables
/// `machine.csv` (key/value), `feeders.csv`, `jobs.csv` and
/// `placements.csv`. Structural validation happens in the core and is fatal.
pub fn read_setup(dir: &Path) -> Result<Setup, CliError> {
    let machine = read_machine(&dir.join(MACHINE_TABLE))?;
    let feeders: Vec<FeederRow> = read_table(&dir.join(FEEDERS_TABLE))?;
    let jobs: Vec<JobRow> = read_table(&dir.join(JOBS_TABLE))?;
    let placements: Vec<PlacementRow> = read_table(&dir.join(PLACEMENTS_TABLE))?;

    let feeders = feeders
        .into_iter()
        .map(|row| FeederDefinition {
            id: row.id,
            part_type: row.part_type,
            pickup_x: row.pickup_x_mm,
            pickup_y: row.pickup_y_mm,
        })
        .collect();
    let jobs = jobs
        .into_iter()
        .map(|row| JobDefinition {
            id: row.id,
            name: row.name,
            quantity: row.quantity,
            due_time: row.due_time_s,
        })
        .collect();
    let placements = placements
        .into_iter()
        .map(|row| PlacementDefinition {
            job_id: row.job_id,
            id: row.id,
            part_type: row.part_type,
            x: row.x_mm,
            y: row.y_mm,
        })
        .collect();

    Setup::new(machine, feeders, jobs, placements).map_err(CliError::from)
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CliError> {
    let file =
        File::open(path).map_err(|err| CliError::Io { path: path.to_path_buf(), source: err })?;

    csv::Reader::from_reader(file)
        .deserialize()
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| CliError::Csv { path: path.to_path_buf(), source: err })
}

fn read_machine(path: &Path) -> Result<Machine, CliError> {
    let rows: Vec<MachineRow> = read_table(path)?;
    let mut values =
        rows.into_iter().map(|row| (row.property, row.value)).collect::<HashMap<_, _>>();
    let mut property = |name: &str| {
        values.remove(name).ok_or_else(|| CliError::MissingProperty(name.to_string()))
    };

    Ok(Machine {
        head_count: property("head_count")? as usize,
        head_capacity: property("head_capacity")? as usize,
        travel_speed: property("travel_speed_mm_s")?,
        pick_time: property("pick_time_s")?,
        place_time: property("place_time_s")?,
        vision_align_time: property("vision_align_s")?,
        pcb_changeover_time: property("pcb_changeover_s")?,
    })
}
