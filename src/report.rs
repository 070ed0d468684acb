use crate::record::SightingRecord;
use csv::Writer;
use log::info;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fs::File;
use std::io::Write;

/// Save records to CSV file
pub fn save_to_csv(
    records: &[SightingRecord],
    filename: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = File::create(filename)?;
    write_csv(records, file)?;
    info!("Exported {} sightings to {}", records.len(), filename);
    Ok(())
}

fn write_csv<W: Write>(records: &[SightingRecord], out: W) -> Result<(), csv::Error> {
    let mut writer = Writer::from_writer(out);

    for record in records {
        writer.serialize(record)?;
    }

    writer.flush()?;
    Ok(())
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub unique_species: usize,
    pub date_range: Option<(String, String)>,
    pub by_severity: BTreeMap<String, usize>,
    pub top_locations: Vec<(String, usize)>,
}

pub fn summarize(records: &[SightingRecord]) -> Summary {
    let unique_species: HashSet<&String> = records.iter().map(|r| &r.species).collect();

    // ISO dates compare correctly as strings
    let date_range = records
        .iter()
        .map(|r| &r.date)
        .min()
        .zip(records.iter().map(|r| &r.date).max())
        .map(|(min, max)| (min.clone(), max.clone()));

    let mut by_severity = BTreeMap::new();
    for record in records {
        *by_severity.entry(record.severity.clone()).or_insert(0) += 1;
    }

    let mut location_counts: HashMap<&String, usize> = HashMap::new();
    for record in records {
        *location_counts.entry(&record.location).or_insert(0) += 1;
    }
    let mut top_locations: Vec<(String, usize)> = location_counts
        .into_iter()
        .map(|(location, count)| (location.clone(), count))
        .collect();
    top_locations.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    top_locations.truncate(3);

    Summary {
        total: records.len(),
        unique_species: unique_species.len(),
        date_range,
        by_severity,
        top_locations,
    }
}

pub fn print_summary(records: &[SightingRecord]) {
    if records.is_empty() {
        println!("No sightings to summarize");
        return;
    }

    let summary = summarize(records);

    println!("\nSummary:");
    println!("Total sightings: {}", summary.total);
    println!("Unique species: {}", summary.unique_species);

    if let Some((first, last)) = &summary.date_range {
        println!("Date range: {} to {}", first, last);
    }

    println!("By severity:");
    for (severity, count) in &summary.by_severity {
        println!("  {}: {}", severity, count);
    }

    println!("Top locations:");
    for (location, count) in &summary.top_locations {
        println!("  {}: {}", location, count);
    }
}
