use crate::dashboard::data::{AvailabilityLevel, Distribution, QuickStats, FREE_LABEL, NO_VEHICLES};
use crate::models::StatusSnapshot;
use anyhow::Result;
use colored::Colorize;
use prettytable::{format, Cell, Row, Table};

pub fn format_table(snapshot: &StatusSnapshot) -> String {
    let mut table = Table::new();
    table.set_format(*format::consts::FORMAT_NO_LINESEP_WITH_TITLE);

    table.set_titles(Row::new(vec![
        Cell::new("Space").style_spec("bFc"),
        Cell::new("Status").style_spec("bFc"),
        Cell::new("Vehicle").style_spec("bFc"),
        Cell::new("Time").style_spec("bFc"),
    ]));

    for space in &snapshot.spaces {
        let status_style = if space.occupied { "Fr" } else { "Fg" };
        table.add_row(Row::new(vec![
            Cell::new(space.id.as_str()),
            Cell::new(space.status_word()).style_spec(status_style),
            Cell::new(space.vehicle().unwrap_or(if space.occupied { "-" } else { FREE_LABEL })),
            Cell::new(space.duration().unwrap_or("")),
        ]));
    }

    table.to_string()
}

pub fn format_csv(snapshot: &StatusSnapshot) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "occupied", "vehicle_type", "time"])?;

    for space in &snapshot.spaces {
        writer.write_record([
            space.id.as_str(),
            if space.occupied { "true" } else { "false" },
            space.vehicle().unwrap_or(""),
            space.duration().unwrap_or(""),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|err| err.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

pub fn format_json(snapshot: &StatusSnapshot) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(snapshot)
}

pub fn format_markdown(snapshot: &StatusSnapshot, show_summary: bool) -> String {
    let mut md = String::new();

    md.push_str("| Space | Status | Vehicle | Time |\n");
    md.push_str("|-------|--------|---------|------|\n");

    for space in &snapshot.spaces {
        md.push_str(&format!(
            "| {} | {} | {} | {} |\n",
            space.id,
            space.status_word(),
            space.vehicle().unwrap_or(if space.occupied { "-" } else { FREE_LABEL }),
            space.duration().unwrap_or(""),
        ));
    }

    if show_summary {
        let stats = QuickStats::from_snapshot(snapshot);
        md.push_str(&format!(
            "\n**Total:** {} | **Occupied:** {} | **Available:** {} | **Occupancy:** {}% | **Availability:** {}\n",
            snapshot.total_spaces,
            snapshot.occupied_spaces,
            snapshot.available_spaces,
            snapshot.occupancy_rate,
            stats.availability_text()
        ));
    }

    md
}

pub fn print_summary(snapshot: &StatusSnapshot) {
    println!("\n{}", "=== Parking Summary ===".bright_cyan().bold());
    println!("  Updated: {}", snapshot.timestamp);

    println!("\n{}", "Occupancy:".yellow());
    println!("  Total Spaces: {}", snapshot.total_spaces.to_string().cyan());
    println!("  Occupied: {}", snapshot.occupied_spaces.to_string().red());
    println!("  Available: {}", snapshot.available_spaces.to_string().green());
    println!("  Occupancy Rate: {}%", snapshot.occupancy_rate);

    let stats = QuickStats::from_snapshot(snapshot);
    let availability = match stats.level {
        AvailabilityLevel::High => stats.availability_text().green().bold(),
        AvailabilityLevel::Low => stats.availability_text().red().bold(),
    };
    println!("  Availability: {}", availability);

    println!("\n{}", "Vehicles:".yellow());
    let distribution = Distribution::from_spaces(&snapshot.spaces);
    if distribution.is_empty() {
        println!("  {}", NO_VEHICLES.dimmed());
    }
    for row in &distribution.rows {
        println!("  {}", row.label().bright_blue());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::render::tests::two_space_snapshot;

    #[test]
    fn test_format_table() {
        let table = format_table(&two_space_snapshot());
        assert!(table.contains("A1"));
        assert!(table.contains("Occupied"));
        assert!(table.contains("car"));
        assert!(table.contains("Free"));
    }

    #[test]
    fn test_format_csv() {
        let csv = format_csv(&two_space_snapshot()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "id,occupied,vehicle_type,time");
        assert_eq!(lines[1], "A1,true,car,10m");
        assert_eq!(lines[2], "A2,false,,");
    }

    #[test]
    fn test_format_markdown_summary() {
        let md = format_markdown(&two_space_snapshot(), true);
        assert!(md.contains("| A2 | Available | Free |  |"));
        assert!(md.contains("**Occupancy:** 50%"));
        assert!(md.contains("**Availability:** 50.0%"));
    }

    #[test]
    fn test_format_json_keeps_field_names() {
        let json = format_json(&two_space_snapshot()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total_spaces"], 2);
        assert_eq!(value["spaces"][0]["id"], "A1");
    }
}
