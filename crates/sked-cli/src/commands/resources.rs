//! Resource management commands.

use std::io::Write;

use anyhow::{Context, Result};
use sked_core::{Resource, ResourceId, ResourceType};
use sked_db::Database;

/// Creates a resource and prints its ID to stdout.
pub fn add(db: &mut Database, name: &str, kind: ResourceType) -> Result<()> {
    let resource = db
        .create_resource(name, kind)
        .context("failed to create resource")?;
    println!("{}", resource.id);
    Ok(())
}

/// Format resources for human-readable output, grouped by type.
fn format_resources(resources: &[Resource]) -> String {
    use std::fmt::Write;

    let mut output = String::new();
    if resources.is_empty() {
        writeln!(output, "No resources registered.").unwrap();
        return output;
    }

    let mut current_kind = None;
    for resource in resources {
        if current_kind != Some(resource.kind) {
            writeln!(output, "{}:", resource.kind).unwrap();
            current_kind = Some(resource.kind);
        }
        writeln!(output, "  {:<38}  {}", resource.id, resource.name).unwrap();
    }
    output
}

/// Runs the resource list command.
pub fn list<W: Write>(writer: &mut W, db: &Database, json: bool) -> Result<()> {
    let resources = db.list_resources()?;
    if json {
        writeln!(writer, "{}", serde_json::to_string_pretty(&resources)?)?;
    } else {
        write!(writer, "{}", format_resources(&resources))?;
    }
    Ok(())
}

/// Edits a resource; omitted fields keep their current value.
pub fn edit(
    db: &mut Database,
    id: &str,
    name: Option<&str>,
    kind: Option<ResourceType>,
) -> Result<()> {
    let id = ResourceId::new(id)?;
    let current = db.get_resource(&id)?;
    let name = name.unwrap_or(&current.name);
    let kind = kind.unwrap_or(current.kind);

    let updated = db.update_resource(&id, name, kind)?;
    println!("Updated \"{}\" ({})", updated.name, updated.kind);
    Ok(())
}

/// Deletes a resource; its allocations go with it.
pub fn delete(db: &mut Database, id: &str) -> Result<()> {
    let id = ResourceId::new(id)?;
    let resource = db.get_resource(&id)?;
    db.delete_resource(&id)?;
    println!("Deleted \"{}\"", resource.name);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_groups_by_type() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_resource("Room A", ResourceType::Room).unwrap();
        db.create_resource("Room B", ResourceType::Room).unwrap();
        db.create_resource("Coach Kim", ResourceType::Instructor)
            .unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, false).unwrap();
        let output = String::from_utf8(output).unwrap();

        let instructor_pos = output.find("instructor:").unwrap();
        let room_pos = output.find("room:").unwrap();
        assert!(instructor_pos < room_pos, "types should be grouped in order");
        assert!(output.contains("Coach Kim"));
        assert!(output.contains("Room A"));
        assert!(output.contains("Room B"));
    }

    #[test]
    fn list_empty_database() {
        let db = Database::open_in_memory().unwrap();
        let mut output = Vec::new();
        list(&mut output, &db, false).unwrap();
        assert_eq!(
            String::from_utf8(output).unwrap(),
            "No resources registered.\n"
        );
    }

    #[test]
    fn list_json_uses_storage_type_strings() {
        let mut db = Database::open_in_memory().unwrap();
        db.create_resource("Camera 1", ResourceType::Equipment)
            .unwrap();

        let mut output = Vec::new();
        list(&mut output, &db, true).unwrap();
        let parsed: serde_json::Value = serde_json::from_slice(&output).unwrap();

        assert_eq!(parsed[0]["name"], "Camera 1");
        assert_eq!(parsed[0]["type"], "equipment");
    }
}
